use std::fmt;

use crate::model::item::TagItem;

/// External suggestion engine. Given the entry text it hands zero or more
/// candidate items to `deliver`.
pub trait SuggestionSource {
    fn query(&mut self, query: &str, deliver: &mut dyn FnMut(Vec<TagItem>));
}

impl<F> SuggestionSource for F
where
    F: FnMut(&str, &mut dyn FnMut(Vec<TagItem>)),
{
    fn query(&mut self, query: &str, deliver: &mut dyn FnMut(Vec<TagItem>)) {
        self(query, deliver)
    }
}

/// A fixed candidate list, matched case-insensitively anywhere in the text.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    items: Vec<TagItem>,
}

impl StaticSource {
    pub fn new(items: Vec<TagItem>) -> Self {
        StaticSource { items }
    }
}

impl SuggestionSource for StaticSource {
    fn query(&mut self, query: &str, deliver: &mut dyn FnMut(Vec<TagItem>)) {
        let needle = query.to_lowercase();
        let hits = self
            .items
            .iter()
            .filter(|x| x.text().to_lowercase().contains(&needle))
            .cloned()
            .collect();
        deliver(hits);
    }
}

/// The suggestion dropdown shown under the entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    pub visible: bool,
    pub items: Vec<TagItem>,
    /// Highlighted row; None until the user moves into the list
    pub selected: Option<usize>,
}

impl Suggestions {
    pub fn show(&mut self, items: Vec<TagItem>) {
        self.visible = !items.is_empty();
        self.items = items;
        self.selected = None;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.visible && !self.items.is_empty()
    }

    /// Highlight the next row, wrapping. Returns the highlighted item.
    pub fn select_next(&mut self) -> Option<&TagItem> {
        if !self.is_open() {
            return None;
        }
        let next = match self.selected {
            Some(i) if i + 1 < self.items.len() => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.selected = Some(next);
        self.items.get(next)
    }

    /// Highlight the previous row, wrapping. Returns the highlighted item.
    pub fn select_prev(&mut self) -> Option<&TagItem> {
        if !self.is_open() {
            return None;
        }
        let prev = match self.selected {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.selected = Some(prev);
        self.items.get(prev)
    }

    pub fn highlighted(&self) -> Option<&TagItem> {
        self.selected.and_then(|i| self.items.get(i))
    }
}

/// A source plus its dropdown state.
pub struct Typeahead {
    pub source: Box<dyn SuggestionSource>,
    pub min_length: usize,
    pub panel: Suggestions,
}

impl fmt::Debug for Typeahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typeahead")
            .field("min_length", &self.min_length)
            .field("panel", &self.panel)
            .finish_non_exhaustive()
    }
}

impl Typeahead {
    pub fn new(source: impl SuggestionSource + 'static, min_length: usize) -> Self {
        Typeahead {
            source: Box::new(source),
            min_length,
            panel: Suggestions::default(),
        }
    }

    /// Ask the source about `query`, collecting everything it delivers.
    pub fn fetch(&mut self, query: &str) -> Vec<TagItem> {
        let mut delivered = Vec::new();
        self.source
            .query(query, &mut |items| delivered.extend(items));
        delivered
    }
}
