use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::host::BackingOption;
use crate::model::item::{ItemFields, RawItem};

/// Key code of Enter, the default confirm key
pub const KEY_ENTER: u32 = 13;

/// Widget configuration, read from tags.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsInputConfig {
    /// Record field holding an item's unique value
    #[serde(default = "default_field")]
    pub item_value: String,
    /// Record field holding an item's display text
    #[serde(default = "default_field")]
    pub item_text: String,
    /// Accept arbitrary typed text as tags
    #[serde(default)]
    pub free_input: bool,
    /// Key codes that turn the entry text into a tag
    #[serde(default = "default_confirm_keys")]
    pub confirm_keys: Vec<u32>,
    #[serde(default)]
    pub tag_class: TagClassConfig,
    #[serde(default)]
    pub placeholder: String,
    /// Tags present when the widget starts
    #[serde(default)]
    pub items: Vec<RawItem>,
    /// Candidates when free input is off
    #[serde(default)]
    pub allowed_items: Vec<RawItem>,
    #[serde(default)]
    pub typeahead: Option<TypeaheadConfig>,
    /// Options already present on the host select
    #[serde(default)]
    pub options: Vec<BackingOption>,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for TagsInputConfig {
    fn default() -> Self {
        TagsInputConfig {
            item_value: default_field(),
            item_text: default_field(),
            free_input: false,
            confirm_keys: default_confirm_keys(),
            tag_class: TagClassConfig::default(),
            placeholder: String::new(),
            items: Vec::new(),
            allowed_items: Vec::new(),
            typeahead: None,
            options: Vec::new(),
            ui: UiConfig::default(),
        }
    }
}

impl TagsInputConfig {
    pub fn fields(&self) -> ItemFields {
        ItemFields {
            value: self.item_value.clone(),
            text: self.item_text.clone(),
        }
    }
}

fn default_field() -> String {
    "value".into()
}

fn default_confirm_keys() -> Vec<u32> {
    vec![KEY_ENTER]
}

/// How chip classes are chosen: `tag_class = "label label-info"` for a fixed
/// class list, or `tag_class = { field = "kind" }` to read it from each item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagClassConfig {
    Constant(String),
    Field { field: String },
}

impl Default for TagClassConfig {
    fn default() -> Self {
        TagClassConfig::Constant("label label-info".into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeaheadConfig {
    /// Suggestion candidates
    #[serde(default)]
    pub source: Vec<RawItem>,
    /// Shortest entry text that triggers a query
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

fn default_min_length() -> usize {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme colour overrides, e.g. `background = "#0C001B"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Chip colour per class name, e.g. `label-danger = "#FF4444"`
    #[serde(default)]
    pub class_colors: HashMap<String, String>,
}
