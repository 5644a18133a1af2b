use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Names of the record fields holding an item's value and its display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub value: String,
    pub text: String,
}

impl Default for ItemFields {
    fn default() -> Self {
        ItemFields {
            value: "value".into(),
            text: "value".into(),
        }
    }
}

/// One tag: a unique `value` plus the `text` shown on its chip.
///
/// Items are immutable once built. The record they came from is kept so a
/// field-based class lookup can read any other property of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagItem {
    value: String,
    text: String,
    #[serde(skip)]
    record: Map<String, Value>,
}

impl TagItem {
    /// An item with distinct value and text.
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        let value = value.into();
        let text = text.into();
        let mut record = Map::new();
        record.insert("value".into(), Value::String(value.clone()));
        record.insert("text".into(), Value::String(text.clone()));
        TagItem {
            value,
            text,
            record,
        }
    }

    /// An item synthesized from typed text: value and text are both `text`.
    pub fn free(text: impl Into<String>) -> Self {
        let text = text.into();
        TagItem::new(text.clone(), text)
    }

    /// Build an item from a record, reading value and text through `fields`.
    ///
    /// Returns None if either field is missing or not a scalar.
    pub fn from_record(record: Map<String, Value>, fields: &ItemFields) -> Option<Self> {
        let value = scalar_key(record.get(&fields.value)?)?;
        let text = scalar_key(record.get(&fields.text)?)?;
        Some(TagItem {
            value,
            text,
            record,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// A field of the source record, in string form.
    pub fn field(&self, name: &str) -> Option<String> {
        self.record.get(name).and_then(scalar_key)
    }
}

/// String form of a scalar JSON value, used as the comparison key.
pub fn scalar_key(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Something that can be turned into a tag: raw typed text or a ready item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemInput {
    Text(String),
    Item(TagItem),
}

impl From<&str> for ItemInput {
    fn from(s: &str) -> Self {
        ItemInput::Text(s.to_string())
    }
}

impl From<String> for ItemInput {
    fn from(s: String) -> Self {
        ItemInput::Text(s)
    }
}

impl From<TagItem> for ItemInput {
    fn from(item: TagItem) -> Self {
        ItemInput::Item(item)
    }
}

/// An item as written in a config file: bare text or a full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawItem {
    Text(String),
    Record(Map<String, Value>),
}
