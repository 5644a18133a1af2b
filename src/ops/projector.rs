use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::model::chip::{Chip, ChipContainer};
use crate::model::config::TagClassConfig;
use crate::model::host::HostSelect;
use crate::model::item::TagItem;
use crate::ops::events::{Observers, TagEvent};
use crate::ops::store::{TagError, TagStore};
use crate::util::html::html_encode;

/// Chooses the class names of an item's chip.
#[derive(Clone)]
pub enum TagClass {
    /// Same classes for every chip
    Constant(String),
    /// Classes read from a field of the item's record
    Field(String),
    Custom(Rc<dyn Fn(&TagItem) -> String>),
}

impl Default for TagClass {
    fn default() -> Self {
        TagClass::Constant("label label-info".into())
    }
}

impl fmt::Debug for TagClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagClass::Constant(c) => f.debug_tuple("Constant").field(c).finish(),
            TagClass::Field(name) => f.debug_tuple("Field").field(name).finish(),
            TagClass::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&TagClassConfig> for TagClass {
    fn from(config: &TagClassConfig) -> Self {
        match config {
            TagClassConfig::Constant(c) => TagClass::Constant(c.clone()),
            TagClassConfig::Field { field } => TagClass::Field(field.clone()),
        }
    }
}

impl TagClass {
    /// Escaped class string for `item`.
    pub fn classify(&self, item: &TagItem) -> String {
        let raw = match self {
            TagClass::Constant(c) => c.clone(),
            TagClass::Field(name) => item.field(name).unwrap_or_default(),
            TagClass::Custom(f) => f(item),
        };
        html_encode(&raw)
    }
}

/// Keeps chips and host options in step with the tag store and reports
/// every structural change to the observers.
#[derive(Debug)]
pub struct SyncProjector {
    chips: IndexMap<String, Chip>,
    container: ChipContainer,
    host: HostSelect,
    /// Options this projector put on the host; pre-seeded ones stay put
    created: HashSet<String>,
    tag_class: TagClass,
    observers: Observers,
}

impl SyncProjector {
    /// Take over `host` and start with an empty chip container.
    pub fn new(mut host: HostSelect, tag_class: TagClass) -> Self {
        host.attach();
        SyncProjector {
            chips: IndexMap::new(),
            container: ChipContainer::default(),
            host,
            created: HashSet::new(),
            tag_class,
            observers: Observers::default(),
        }
    }

    /// Add `item` to the store and project it. With `notify` off no events
    /// are emitted (used for the initial items).
    ///
    /// A duplicate re-affirms the existing chip instead. Returns true if the
    /// tag set changed.
    pub fn add(&mut self, store: &mut TagStore, item: TagItem, notify: bool) -> bool {
        match store.add(item.clone()) {
            Ok(()) => {}
            Err(TagError::DuplicateTag(value)) => {
                log::debug!("tag {:?} already present", value);
                self.reaffirm(&value);
                return false;
            }
            Err(e) => {
                log::debug!("add skipped: {}", e);
                return false;
            }
        }

        let chip = Chip {
            value: item.value().to_string(),
            text: item.text().to_string(),
            class: self.tag_class.classify(&item),
            pulsing: false,
        };
        self.container.insert_before_entry(&chip.value);
        self.chips.insert(chip.value.clone(), chip);
        if self.host.ensure_option(item.value(), item.text()) {
            self.created.insert(item.value().to_string());
        }
        debug_assert!(self.is_consistent(store));

        if notify {
            self.observers.emit(&TagEvent::Changed);
            self.observers.emit(&TagEvent::ItemAdded(item));
        }
        true
    }

    /// Remove the tag with `value`. A value with no tag is logged and ignored.
    pub fn remove(&mut self, store: &mut TagStore, value: &str) -> bool {
        let item = match store.remove(value) {
            Ok(item) => item,
            Err(e) => {
                log::warn!("<tag:remove> {}", e);
                return false;
            }
        };

        self.container.remove_chip(value);
        self.chips.shift_remove(value);
        if self.created.remove(value) {
            self.host.remove_option(value);
        }
        debug_assert!(self.is_consistent(store));

        self.observers.emit(&TagEvent::Changed);
        self.observers.emit(&TagEvent::ItemRemoved(item));
        true
    }

    /// Drop every tag, chip and host option. Only `Changed` is emitted.
    pub fn remove_all(&mut self, store: &mut TagStore) {
        self.container.clear_chips();
        self.chips.clear();
        self.host.clear();
        self.created.clear();
        store.clear();
        self.observers.emit(&TagEvent::Changed);
    }

    /// Pulse the chip for `value` to show it was already there.
    pub fn reaffirm(&mut self, value: &str) {
        if let Some(chip) = self.chips.get_mut(value) {
            chip.pulsing = true;
        }
    }

    /// End every pulse. Returns true if any chip was pulsing.
    pub fn settle_pulses(&mut self) -> bool {
        let mut any = false;
        for chip in self.chips.values_mut() {
            any |= chip.pulsing;
            chip.pulsing = false;
        }
        any
    }

    /// Chip values, store values and host options agree.
    pub fn is_consistent(&self, store: &TagStore) -> bool {
        let stored: HashSet<&str> = store.items().iter().map(|x| x.value()).collect();
        let chips: HashSet<&str> = self.chips.keys().map(|k| k.as_str()).collect();
        let placed: HashSet<&str> = self.container.chip_values().collect();
        stored == chips
            && stored == placed
            && stored.iter().all(|v| self.host.option(v).is_some())
    }

    pub fn chip(&self, value: &str) -> Option<&Chip> {
        self.chips.get(value)
    }

    pub fn chips(&self) -> impl Iterator<Item = &Chip> {
        self.chips.values()
    }

    pub fn container(&self) -> &ChipContainer {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut ChipContainer {
        &mut self.container
    }

    pub fn host(&self) -> &HostSelect {
        &self.host
    }

    pub fn observers_mut(&mut self) -> &mut Observers {
        &mut self.observers
    }

    /// Unbind every observer and hand the host back, visible.
    pub fn into_host(mut self) -> HostSelect {
        self.observers.clear();
        self.host.detach();
        self.host
    }
}
