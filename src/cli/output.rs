use serde::Serialize;

use crate::model::host::BackingOption;
use crate::model::item::TagItem;
use crate::ops::events::TagEvent;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    pub value: String,
    pub text: String,
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum EventJson {
    Change,
    ItemAdded { item: ItemJson },
    ItemRemoved { item: ItemJson },
}

#[derive(Serialize)]
pub struct OptionJson {
    pub value: String,
    pub text: String,
    pub selected: bool,
}

#[derive(Serialize)]
pub struct StateJson {
    pub items: Vec<ItemJson>,
    pub options: Vec<OptionJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventJson>>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn item_to_json(item: &TagItem) -> ItemJson {
    ItemJson {
        value: item.value().to_string(),
        text: item.text().to_string(),
    }
}

pub fn event_to_json(event: &TagEvent) -> EventJson {
    match event {
        TagEvent::Changed => EventJson::Change,
        TagEvent::ItemAdded(item) => EventJson::ItemAdded {
            item: item_to_json(item),
        },
        TagEvent::ItemRemoved(item) => EventJson::ItemRemoved {
            item: item_to_json(item),
        },
    }
}

pub fn option_to_json(option: &BackingOption) -> OptionJson {
    OptionJson {
        value: option.value.clone(),
        text: option.text.clone(),
        selected: option.selected,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `value`, or `value  text` when they differ.
pub fn format_item(item: &TagItem) -> String {
    if item.value() == item.text() {
        item.value().to_string()
    } else {
        format!("{}  {}", item.value(), item.text())
    }
}

pub fn format_event(event: &TagEvent) -> String {
    match event {
        TagEvent::Changed => "change".to_string(),
        TagEvent::ItemAdded(item) => format!("itemAdded {}", item.value()),
        TagEvent::ItemRemoved(item) => format!("itemRemoved {}", item.value()),
    }
}
