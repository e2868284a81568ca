//! Placeholder-aware markdown renderer for Press articles.
//!
//! Turns editor-written text (a constrained markdown subset plus media
//! placeholder syntax) into a single HTML fragment, resolving placeholders
//! against a caller-supplied [`press_media::MediaCatalog`].
//!
//! # Architecture
//!
//! Rendering is two-stage: a line-level lexer classifies the source into a
//! typed block/inline tree, and an emission stage walks that tree. Resolved
//! placeholders live in a per-call table addressed by integer handles held
//! in tree nodes, so media markup never travels through the markdown
//! transformations and cannot be corrupted by them.
//!
//! # Placeholder grammar
//!
//! | Syntax | Resolution |
//! |---|---|
//! | `{{image:<id-or-name>}}` | id match (integer refs) or name match with positional fallback; miss renders a warning |
//! | `{{img:<filename>}}` | filename/original-name match only; miss stays literal |
//! | `{{image}}` | first catalog item, shared by every bare occurrence |
//!
//! # Example
//!
//! ```
//! use press_media::{MediaCatalog, PrefixUrlResolver};
//! use press_renderer::ArticleRenderer;
//!
//! let renderer = ArticleRenderer::new(PrefixUrlResolver::new("/media"));
//! let result = renderer.render("# Hello\n\nThis is **bold**.", &MediaCatalog::empty());
//! assert_eq!(result.html, "<h1>Hello</h1><p>This is <strong>bold</strong>.</p>");
//! ```

mod block;
mod escape;
mod html;
mod inline;
mod placeholder;
mod renderer;

pub use escape::escape_html;
pub use renderer::{ArticleRenderer, RenderResult, render_article};
