//! Media catalog types for the Press article renderer.
//!
//! A [`MediaCatalog`] is the caller-supplied, read-only list of media items
//! available to one render call. The renderer never mutates it; lookups are
//! the ordered strategies used by placeholder resolution (id, exact name,
//! substring containment).
//!
//! URL construction is abstracted behind the [`UrlResolver`] trait so the
//! renderer stays independent of how the content store lays out its uploads.

mod catalog;
mod url;

pub use catalog::{CatalogError, MediaCatalog, MediaItem};
pub use url::{PrefixUrlResolver, UrlResolver};
