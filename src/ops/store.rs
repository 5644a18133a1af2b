use crate::model::item::{ItemInput, TagItem};

/// Error type for tag collection operations.
///
/// None of these reach callers of the widget; they are recovered where the
/// widget handles them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("no allowed item matches {0:?}")]
    UnresolvedItem(String),
    #[error("no tag with value {0:?}")]
    NotFound(String),
    #[error("tag {0:?} is already present")]
    DuplicateTag(String),
}

/// The ordered tag collection plus the candidates new tags may come from.
#[derive(Debug, Clone, Default)]
pub struct TagStore {
    items: Vec<TagItem>,
    allowed: Vec<TagItem>,
    free_input: bool,
}

impl TagStore {
    pub fn new(allowed: Vec<TagItem>, free_input: bool) -> Self {
        TagStore {
            items: Vec::new(),
            allowed,
            free_input,
        }
    }

    /// Turn input into an item. Structured items pass through untouched.
    /// Text is trimmed, then synthesized (free input) or matched against the
    /// allowed items by text.
    pub fn resolve(&self, input: ItemInput) -> Option<TagItem> {
        match input {
            ItemInput::Item(item) => Some(item),
            ItemInput::Text(raw) => {
                let text = raw.trim();
                if self.free_input {
                    if text.is_empty() {
                        return None;
                    }
                    return Some(TagItem::free(text));
                }
                self.allowed.iter().find(|x| x.text() == text).cloned()
            }
        }
    }

    /// Like `resolve`, but matches the allowed items by value.
    pub fn resolve_value(&self, value: &str) -> Option<TagItem> {
        if self.free_input {
            if value.is_empty() {
                return None;
            }
            return Some(TagItem::free(value));
        }
        self.allowed.iter().find(|x| x.value() == value).cloned()
    }

    /// Append an item. Order is creation order, whatever the cursor does.
    pub fn add(&mut self, item: TagItem) -> Result<(), TagError> {
        if self.contains(item.value()) {
            return Err(TagError::DuplicateTag(item.value().to_string()));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, value: &str) -> Result<TagItem, TagError> {
        let idx = self
            .items
            .iter()
            .position(|x| x.value() == value)
            .ok_or_else(|| TagError::NotFound(value.to_string()))?;
        Ok(self.items.remove(idx))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[TagItem] {
        &self.items
    }

    pub fn get(&self, value: &str) -> Option<&TagItem> {
        self.items.iter().find(|x| x.value() == value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.get(value).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn allowed(&self) -> &[TagItem] {
        &self.allowed
    }

    /// Add delivered suggestions to the allowed items, skipping ones already
    /// known. Returns how many were new.
    pub fn merge_allowed(&mut self, items: &[TagItem]) -> usize {
        let mut added = 0;
        for item in items {
            if !self.allowed.contains(item) {
                self.allowed.push(item.clone());
                added += 1;
            }
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn letters() -> Vec<TagItem> {
        vec![TagItem::new("1", "A"), TagItem::new("2", "B")]
    }

    fn values(store: &TagStore) -> Vec<&str> {
        store.items().iter().map(|x| x.value()).collect()
    }

    #[test]
    fn free_input_synthesizes_trimmed_items() {
        let store = TagStore::new(vec![], true);
        assert_eq!(
            store.resolve("  apple ".into()),
            Some(TagItem::free("apple"))
        );
        assert_eq!(store.resolve("   ".into()), None);
        assert_eq!(store.resolve_value("pear"), Some(TagItem::free("pear")));
    }

    #[test]
    fn allowed_list_matches_text_and_value() {
        let store = TagStore::new(letters(), false);
        assert_eq!(store.resolve("B".into()), Some(TagItem::new("2", "B")));
        assert_eq!(store.resolve("C".into()), None);
        assert_eq!(store.resolve("2".into()), None);
        assert_eq!(store.resolve_value("1"), Some(TagItem::new("1", "A")));
        assert_eq!(store.resolve_value("A"), None);
    }

    #[test]
    fn structured_items_bypass_lookup() {
        let store = TagStore::new(letters(), false);
        let item = TagItem::new("9", "Z");
        assert_eq!(store.resolve(item.clone().into()), Some(item));
    }

    #[test]
    fn add_appends_and_rejects_duplicates() {
        let mut store = TagStore::new(vec![], true);
        store.add(TagItem::free("b")).unwrap();
        store.add(TagItem::free("a")).unwrap();
        assert_eq!(
            store.add(TagItem::new("b", "other text")),
            Err(TagError::DuplicateTag("b".into()))
        );
        assert_eq!(values(&store), vec!["b", "a"]);
    }

    #[test]
    fn remove_preserves_order() {
        let mut store = TagStore::new(vec![], true);
        for v in ["x", "y", "z"] {
            store.add(TagItem::free(v)).unwrap();
        }
        assert_eq!(store.remove("y").unwrap(), TagItem::free("y"));
        assert_eq!(values(&store), vec!["x", "z"]);
        assert_eq!(store.remove("y"), Err(TagError::NotFound("y".into())));
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn merge_skips_known_items() {
        let mut store = TagStore::new(letters(), false);
        let delivered = vec![TagItem::new("2", "B"), TagItem::new("3", "C")];
        assert_eq!(store.merge_allowed(&delivered), 1);
        assert_eq!(store.merge_allowed(&delivered), 0);
        assert_eq!(store.allowed().len(), 3);
        assert_eq!(store.resolve("C".into()), Some(TagItem::new("3", "C")));
    }
}
