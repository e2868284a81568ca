//! Placeholder resolution against the media catalog.
//!
//! The lexer leaves placeholder occurrences in the tree as typed spans; the
//! [`Resolver`] walks the finished tree in document order and rewrites each
//! one to a handle into the [`PlaceholderTable`], or back to literal text
//! for the conservatively-handled cases. Resolution never fails the render:
//! a miss becomes a visible warning fragment at emission.

use press_media::{MediaCatalog, MediaItem};

use crate::block::Block;
use crate::inline::Inline;

/// Index into the per-render [`PlaceholderTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MediaHandle(usize);

/// Which placeholder grammar an occurrence used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PlaceholderKind {
    /// `{{image:<ref>}}` with the raw reference text.
    Reference(String),
    /// `{{img:<filename>}}` with the raw filename text.
    Filename(String),
    /// Bare `{{image}}`.
    Bare,
}

/// Outcome of resolving one placeholder occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Bound to a catalog item.
    Embed { item: MediaItem },
    /// `{{image:…}}` that matched nothing; emission renders a warning
    /// fragment listing the available catalog.
    Missing { reference: String },
}

/// Table of resolution outcomes, scoped to exactly one render call.
#[derive(Debug, Default)]
pub(crate) struct PlaceholderTable {
    entries: Vec<Resolution>,
}

impl PlaceholderTable {
    fn push(&mut self, resolution: Resolution) -> MediaHandle {
        self.entries.push(resolution);
        MediaHandle(self.entries.len() - 1)
    }

    pub(crate) fn get(&self, handle: MediaHandle) -> &Resolution {
        &self.entries[handle.0]
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Walks the block tree and resolves placeholder spans.
///
/// Holds the per-kind occurrence state the strategies need: the rank of
/// each `{{image:…}}` occurrence for the positional fallback, and the
/// shared binding for bare `{{image}}` occurrences.
pub(crate) struct Resolver<'a> {
    catalog: &'a MediaCatalog,
    table: PlaceholderTable,
    /// 0-based rank of the next `{{image:…}}` occurrence in the document.
    reference_rank: usize,
    /// Every bare `{{image}}` in one document shares a single binding.
    bare_binding: Option<MediaHandle>,
    warnings: Vec<String>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(catalog: &'a MediaCatalog) -> Self {
        Self {
            catalog,
            table: PlaceholderTable::default(),
            reference_rank: 0,
            bare_binding: None,
            warnings: Vec::new(),
        }
    }

    /// Resolve every placeholder span in the tree, in document order.
    pub(crate) fn resolve_blocks(&mut self, blocks: &mut [Block]) {
        for block in blocks {
            match block {
                Block::Heading { content, .. }
                | Block::CodeBlock { content, .. }
                | Block::Blockquote { content }
                | Block::Paragraph { content } => self.resolve_inlines(content),
                Block::UnorderedList { items } | Block::OrderedList { items } => {
                    for item in items {
                        self.resolve_inlines(item);
                    }
                }
            }
        }
    }

    /// Consume the resolver, yielding the table and collected warnings.
    pub(crate) fn finish(self) -> (PlaceholderTable, Vec<String>) {
        (self.table, self.warnings)
    }

    fn resolve_inlines(&mut self, inlines: &mut [Inline]) {
        for inline in inlines {
            match inline {
                Inline::Placeholder { kind, raw } => {
                    let kind = kind.clone();
                    let raw = std::mem::take(raw);
                    *inline = self.resolve_one(&kind, raw);
                }
                // Styled spans carry text and placeholder segments;
                // occurrences inside them resolve and count toward the
                // document-order rank like any other.
                Inline::Strong(content) | Inline::Emphasis(content) | Inline::Code(content) => {
                    self.resolve_inlines(content);
                }
                Inline::Link { text, .. } => self.resolve_inlines(text),
                Inline::Text(_) | Inline::Media(_) => {}
            }
        }
    }

    fn resolve_one(&mut self, kind: &PlaceholderKind, raw: String) -> Inline {
        match kind {
            PlaceholderKind::Reference(reference) => {
                let rank = self.reference_rank;
                self.reference_rank += 1;
                match self.lookup_reference(reference, rank) {
                    Some(item) => Inline::Media(self.table.push(Resolution::Embed { item })),
                    None => {
                        tracing::warn!(reference = %reference, "unresolved image placeholder");
                        self.warnings.push(format!(
                            "image reference \"{reference}\" did not match any media item"
                        ));
                        Inline::Media(self.table.push(Resolution::Missing {
                            reference: reference.clone(),
                        }))
                    }
                }
            }
            PlaceholderKind::Filename(filename) => match self.lookup_filename(filename) {
                Some(item) => Inline::Media(self.table.push(Resolution::Embed { item })),
                // No warning here: the narrow {{img:…}} grammar passes
                // unresolved occurrences through verbatim.
                None => Inline::Text(raw),
            },
            PlaceholderKind::Bare => {
                let Some(first) = self.catalog.first() else {
                    return Inline::Text(raw);
                };
                let handle = match self.bare_binding {
                    Some(handle) => handle,
                    None => {
                        let handle = self.table.push(Resolution::Embed {
                            item: first.clone(),
                        });
                        self.bare_binding = Some(handle);
                        handle
                    }
                };
                Inline::Media(handle)
            }
        }
    }

    /// Strategy chain for `{{image:<ref>}}`.
    ///
    /// A pure-integer reference names an id and nothing else; a miss there
    /// is a miss. Non-integer references try exact filename, substring
    /// containment, containment with the extension stripped, and finally
    /// the positional fallback: `rank` is this occurrence's 0-based rank
    /// among all `{{image:…}}` occurrences in the document. An empty
    /// reference names nothing and skips the chain entirely.
    fn lookup_reference(&self, reference: &str, rank: usize) -> Option<MediaItem> {
        if reference.is_empty() {
            return None;
        }
        if let Ok(id) = reference.parse::<u64>() {
            return self.catalog.by_id(id).cloned();
        }
        if let Some(item) = self.catalog.by_filename(reference) {
            return Some(item.clone());
        }
        if let Some(item) = self.catalog.by_name_containing(reference) {
            return Some(item.clone());
        }
        if let Some(stem) = strip_extension(reference) {
            if let Some(item) = self.catalog.by_name_containing(stem) {
                return Some(item.clone());
            }
        }
        self.catalog.get(rank).cloned()
    }

    /// Narrow strategy for `{{img:<filename>}}`: exact names, then
    /// substring containment on the filename only.
    fn lookup_filename(&self, filename: &str) -> Option<MediaItem> {
        if let Some(item) = self.catalog.by_filename(filename) {
            return Some(item.clone());
        }
        if let Some(item) = self.catalog.by_original_name(filename) {
            return Some(item.clone());
        }
        self.catalog.by_filename_containing(filename).cloned()
    }
}

/// Strip one trailing file extension, if present.
fn strip_extension(reference: &str) -> Option<&str> {
    match reference.rfind('.') {
        Some(dot) if dot > 0 => Some(&reference[..dot]),
        _ => None,
    }
}
