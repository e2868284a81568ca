//! Media item and catalog types.

/// A single media item from the content store.
///
/// Owned by the external store; the renderer only reads it. `id` is expected
/// to be unique within one catalog — [`MediaCatalog::new`] does not check
/// this (it is a caller precondition), [`MediaCatalog::validated`] does.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaItem {
    /// Numeric identifier, unique within one catalog.
    pub id: u64,
    /// Stored filename (e.g. `"chart-2024.png"`).
    pub filename: String,
    /// Display name as uploaded by the editor.
    pub original_name: String,
    /// Storage path, relative to the upload root.
    pub path: String,
}

/// Error building a validated catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Two items share the same id.
    #[error("duplicate media id {id} in catalog")]
    DuplicateId {
        /// The offending id.
        id: u64,
    },
}

/// Ordered, read-only collection of media items for one render call.
///
/// Item order matters: the bare `{{image}}` placeholder binds to the first
/// item, and the positional fallback for `{{image:…}}` indexes into this
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaCatalog {
    items: Vec<MediaItem>,
}

impl MediaCatalog {
    /// Create a catalog from items in store order.
    ///
    /// Does not validate id uniqueness; use [`validated`](Self::validated)
    /// when the items come from an untrusted aggregation.
    #[must_use]
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self { items }
    }

    /// Create an empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a catalog, rejecting duplicate ids.
    pub fn validated(items: Vec<MediaItem>) -> Result<Self, CatalogError> {
        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|other| other.id == item.id) {
                return Err(CatalogError::DuplicateId { id: item.id });
            }
        }
        Ok(Self { items })
    }

    /// All items in store order.
    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Item at a positional index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    /// First item, if any.
    #[must_use]
    pub fn first(&self) -> Option<&MediaItem> {
        self.items.first()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Exact id match.
    #[must_use]
    pub fn by_id(&self, id: u64) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Exact filename match.
    #[must_use]
    pub fn by_filename(&self, filename: &str) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.filename == filename)
    }

    /// Exact original-name match.
    #[must_use]
    pub fn by_original_name(&self, name: &str) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.original_name == name)
    }

    /// Case-insensitive substring containment against the filename only.
    ///
    /// An empty needle matches nothing; it names no item.
    #[must_use]
    pub fn by_filename_containing(&self, needle: &str) -> Option<&MediaItem> {
        if needle.is_empty() {
            return None;
        }
        let needle = needle.to_lowercase();
        self.items
            .iter()
            .find(|item| item.filename.to_lowercase().contains(&needle))
    }

    /// Case-insensitive substring containment against filename or original name.
    ///
    /// An empty needle matches nothing; it names no item.
    #[must_use]
    pub fn by_name_containing(&self, needle: &str) -> Option<&MediaItem> {
        if needle.is_empty() {
            return None;
        }
        let needle = needle.to_lowercase();
        self.items.iter().find(|item| {
            item.filename.to_lowercase().contains(&needle)
                || item.original_name.to_lowercase().contains(&needle)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, filename: &str, original_name: &str) -> MediaItem {
        MediaItem {
            id,
            filename: filename.to_owned(),
            original_name: original_name.to_owned(),
            path: format!("uploads/{filename}"),
        }
    }

    fn catalog() -> MediaCatalog {
        MediaCatalog::new(vec![
            item(5, "chart-2024.png", "Wheat price chart"),
            item(9, "harvest.jpg", "Harvest photo"),
        ])
    }

    #[test]
    fn test_by_id() {
        let catalog = catalog();
        assert_eq!(catalog.by_id(9).unwrap().filename, "harvest.jpg");
        assert!(catalog.by_id(42).is_none());
    }

    #[test]
    fn test_by_filename_exact() {
        let catalog = catalog();
        assert_eq!(catalog.by_filename("harvest.jpg").unwrap().id, 9);
        // Exact match is case-sensitive
        assert!(catalog.by_filename("HARVEST.JPG").is_none());
    }

    #[test]
    fn test_by_original_name_exact() {
        let catalog = catalog();
        assert_eq!(catalog.by_original_name("Harvest photo").unwrap().id, 9);
        assert!(catalog.by_original_name("harvest").is_none());
    }

    #[test]
    fn test_substring_containment_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(catalog.by_name_containing("WHEAT").unwrap().id, 5);
        assert_eq!(catalog.by_filename_containing("Chart-2024").unwrap().id, 5);
    }

    #[test]
    fn test_empty_needle_matches_nothing() {
        let catalog = catalog();
        assert!(catalog.by_name_containing("").is_none());
        assert!(catalog.by_filename_containing("").is_none());
    }

    #[test]
    fn test_substring_matches_first_in_store_order() {
        let catalog = MediaCatalog::new(vec![
            item(1, "photo-a.png", "First"),
            item(2, "photo-b.png", "Second"),
        ]);
        assert_eq!(catalog.by_name_containing("photo").unwrap().id, 1);
    }

    #[test]
    fn test_validated_rejects_duplicate_id() {
        let result = MediaCatalog::validated(vec![
            item(5, "a.png", "A"),
            item(5, "b.png", "B"),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId { id: 5 })));
    }

    #[test]
    fn test_validated_accepts_unique_ids() {
        let result = MediaCatalog::validated(vec![
            item(5, "a.png", "A"),
            item(6, "b.png", "B"),
        ]);
        assert_eq!(result.unwrap().len(), 2);
    }

    #[test]
    fn test_new_does_not_validate() {
        let catalog = MediaCatalog::new(vec![item(5, "a.png", "A"), item(5, "b.png", "B")]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_empty() {
        let catalog = MediaCatalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.first().is_none());
        assert!(catalog.get(0).is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_items() {
        let json = r#"[{"id":5,"filename":"a.png","original_name":"A","path":"u/a.png"}]"#;
        let items: Vec<MediaItem> = serde_json::from_str(json).unwrap();
        let catalog = MediaCatalog::new(items);
        assert_eq!(catalog.by_id(5).unwrap().path, "u/a.png");
    }
}
