//! The tags input widget.
//!
//! `TagsInput` turns key presses and clicks into tag store operations,
//! projects the result onto chips and the host select, and moves the entry
//! slot when the user navigates between chips.

pub mod keys;

pub use keys::Key;

use crate::model::chip::{Chip, ChipContainer, Node};
use crate::model::config::TagsInputConfig;
use crate::model::entry::EntryControl;
use crate::model::host::{BackingOption, HostSelect};
use crate::model::item::{ItemFields, ItemInput, RawItem, TagItem};
use crate::ops::cursor;
use crate::ops::events::{SubscriptionId, TagEvent};
use crate::ops::projector::{SyncProjector, TagClass};
use crate::ops::store::TagStore;
use crate::ops::typeahead::{StaticSource, Suggestions, Typeahead};
use crate::util::html::html_encode;

/// Build an allowed/suggested item from its config form. Bare text becomes
/// an item whose value is its text.
pub fn item_from_raw(raw: &RawItem, fields: &ItemFields) -> Option<TagItem> {
    match raw {
        RawItem::Text(text) => Some(TagItem::free(text.as_str())),
        RawItem::Record(record) => TagItem::from_record(record.clone(), fields),
    }
}

fn items_from_raw(raw: &[RawItem], fields: &ItemFields) -> Vec<TagItem> {
    raw.iter()
        .filter_map(|r| {
            let item = item_from_raw(r, fields);
            if item.is_none() {
                log::warn!("skipping item without {:?}/{:?}: {:?}", fields.value, fields.text, r);
            }
            item
        })
        .collect()
}

/// Assembles a `TagsInput` from a config plus the collaborators a config
/// file cannot express.
pub struct TagsInputBuilder<'a> {
    config: &'a TagsInputConfig,
    host: Option<HostSelect>,
    tag_class: Option<TagClass>,
    typeahead: Option<Typeahead>,
}

impl<'a> TagsInputBuilder<'a> {
    /// Attach to an existing host instead of one built from `config.options`.
    pub fn host(mut self, host: HostSelect) -> Self {
        self.host = Some(host);
        self
    }

    pub fn tag_class(mut self, tag_class: TagClass) -> Self {
        self.tag_class = Some(tag_class);
        self
    }

    /// Use a custom suggestion source instead of `config.typeahead`.
    pub fn typeahead(mut self, typeahead: Typeahead) -> Self {
        self.typeahead = Some(typeahead);
        self
    }

    pub fn build(self) -> TagsInput {
        let config = self.config;
        let fields = config.fields();

        let host = self
            .host
            .unwrap_or_else(|| HostSelect::new(config.options.iter().cloned()));
        let tag_class = self
            .tag_class
            .unwrap_or_else(|| TagClass::from(&config.tag_class));
        let typeahead = self.typeahead.or_else(|| {
            config.typeahead.as_ref().map(|ta| {
                Typeahead::new(
                    StaticSource::new(items_from_raw(&ta.source, &fields)),
                    ta.min_length,
                )
            })
        });

        let mut entry = EntryControl::new(config.placeholder.as_str());
        cursor::refresh_width(&mut entry);

        let mut input = TagsInput {
            store: TagStore::new(items_from_raw(&config.allowed_items, &fields), config.free_input),
            projector: SyncProjector::new(host, tag_class),
            entry,
            confirm_keys: config.confirm_keys.clone(),
            typeahead,
        };

        // Initial items are projected silently.
        for raw in &config.items {
            let item = match raw {
                RawItem::Text(text) => input.store.resolve(ItemInput::Text(text.clone())),
                RawItem::Record(record) => TagItem::from_record(record.clone(), &fields),
            };
            match item {
                Some(item) => {
                    input.projector.add(&mut input.store, item, false);
                }
                None => log::warn!("initial item {:?} does not resolve", raw),
            }
        }
        input
    }
}

/// A tags editor attached to a host select.
#[derive(Debug)]
pub struct TagsInput {
    store: TagStore,
    projector: SyncProjector,
    entry: EntryControl,
    confirm_keys: Vec<u32>,
    typeahead: Option<Typeahead>,
}

impl TagsInput {
    pub fn new(config: &TagsInputConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: &TagsInputConfig) -> TagsInputBuilder<'_> {
        TagsInputBuilder {
            config,
            host: None,
            tag_class: None,
            typeahead: None,
        }
    }

    // ---------------------------------------------------------------------
    // Public operations
    // ---------------------------------------------------------------------

    /// Add a tag from typed text or a ready item. Text that resolves to
    /// nothing is skipped. Returns true if a tag was added.
    pub fn add(&mut self, input: impl Into<ItemInput>) -> bool {
        let input = input.into();
        match self.store.resolve(input.clone()) {
            Some(item) => self.projector.add(&mut self.store, item, true),
            None => {
                log::debug!("unresolved item {:?}", input);
                false
            }
        }
    }

    /// Add the allowed item whose value is `value`.
    pub fn add_by_value(&mut self, value: &str) -> bool {
        match self.store.resolve_value(value) {
            Some(item) => self.projector.add(&mut self.store, item, true),
            None => {
                log::debug!("no allowed item with value {:?}", value);
                false
            }
        }
    }

    /// Remove the tag with `value`. Unknown values are logged and ignored.
    pub fn remove(&mut self, value: &str) -> bool {
        self.projector.remove(&mut self.store, value)
    }

    pub fn remove_all(&mut self) {
        self.projector.remove_all(&mut self.store);
    }

    /// Tags in the order they were added.
    pub fn items(&self) -> &[TagItem] {
        self.store.items()
    }

    pub fn focus(&mut self) {
        self.entry.focused = true;
    }

    pub fn input(&self) -> &EntryControl {
        &self.entry
    }

    pub fn input_mut(&mut self) -> &mut EntryControl {
        &mut self.entry
    }

    /// Tear the widget down: listeners are dropped, chips disappear and the
    /// host comes back visible with its current options.
    pub fn destroy(self) -> HostSelect {
        self.projector.into_host()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&TagEvent) + 'static) -> SubscriptionId {
        self.projector.observers_mut().subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.projector.observers_mut().unsubscribe(id)
    }

    // ---------------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------------

    /// A click anywhere in the container focuses the entry.
    pub fn click_container(&mut self) {
        self.focus();
    }

    /// A click on a chip's remove affordance.
    pub fn click_remove(&mut self, value: &str) -> bool {
        self.remove(value)
    }

    /// Feed every character of `text` through the key handler.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.handle_key(Key::Char(c));
        }
    }

    pub fn handle_key(&mut self, key: Key) {
        if self.handle_suggestion_key(key) {
            cursor::refresh_width(&mut self.entry);
            return;
        }

        let mut prevented = false;
        match key {
            Key::Backspace => {
                if let Some(value) = cursor::backspace_target(self.projector.container(), &self.entry) {
                    self.remove(&value);
                }
            }
            Key::Delete => {
                if let Some(value) = cursor::delete_target(self.projector.container(), &self.entry) {
                    self.remove(&value);
                }
            }
            Key::Left => {
                cursor::move_left(self.projector.container_mut(), &mut self.entry);
            }
            Key::Right => {
                cursor::move_right(self.projector.container_mut(), &mut self.entry);
            }
            _ if self.confirm_keys.contains(&key.code()) => {
                prevented = true;
                self.confirm();
            }
            _ => {}
        }

        if !prevented && self.apply_default_action(key) {
            self.refresh_suggestions();
        }
        cursor::refresh_width(&mut self.entry);
    }

    /// Turn the entry text into a tag and reset the entry and suggestions.
    fn confirm(&mut self) {
        let text = self.entry.text().to_string();
        self.add(text);
        self.entry.clear();
        if let Some(ta) = &mut self.typeahead {
            ta.panel.close();
            ta.panel.clear();
        }
    }

    /// Keys the open suggestion panel consumes. Returns true if consumed.
    fn handle_suggestion_key(&mut self, key: Key) -> bool {
        let Some(ta) = &mut self.typeahead else {
            return false;
        };
        if !ta.panel.is_open() {
            return false;
        }
        let highlighted = match key {
            Key::Down => ta.panel.select_next().cloned(),
            Key::Up => ta.panel.select_prev().cloned(),
            Key::Escape => {
                ta.panel.close();
                return true;
            }
            _ => return false,
        };
        if let Some(item) = highlighted {
            self.entry.set_text(item.text());
        }
        true
    }

    /// The plain text-input behaviour of `key`. Returns true if the text
    /// changed.
    fn apply_default_action(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) if !c.is_control() => {
                self.entry.insert_char(c);
                true
            }
            Key::Backspace => self.entry.delete_back(),
            Key::Delete => self.entry.delete_forward(),
            Key::Left => {
                self.entry.caret_left();
                false
            }
            Key::Right => {
                self.entry.caret_right();
                false
            }
            Key::Home => {
                self.entry.caret_home();
                false
            }
            Key::End => {
                self.entry.caret_end();
                false
            }
            _ => false,
        }
    }

    /// Query the suggestion source for the current entry text and merge what
    /// it delivers into the allowed items.
    fn refresh_suggestions(&mut self) {
        let Some(ta) = &mut self.typeahead else {
            return;
        };
        let query = self.entry.text().trim();
        if query.chars().count() < ta.min_length.max(1) {
            ta.panel.close();
            ta.panel.clear();
            return;
        }
        let delivered = ta.fetch(query);
        let merged = self.store.merge_allowed(&delivered);
        if merged > 0 {
            log::debug!("typeahead added {} allowed items", merged);
        }
        ta.panel.show(delivered);
    }

    /// End chip pulses; call once the UI has had a chance to show them.
    pub fn settle_pulses(&mut self) -> bool {
        self.projector.settle_pulses()
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    pub fn host(&self) -> &HostSelect {
        self.projector.host()
    }

    pub fn options(&self) -> impl Iterator<Item = &BackingOption> {
        self.projector.host().options()
    }

    pub fn container(&self) -> &ChipContainer {
        self.projector.container()
    }

    pub fn chip(&self, value: &str) -> Option<&Chip> {
        self.projector.chip(value)
    }

    pub fn chips(&self) -> impl Iterator<Item = &Chip> {
        self.projector.chips()
    }

    pub fn store(&self) -> &TagStore {
        &self.store
    }

    pub fn suggestions(&self) -> Option<&Suggestions> {
        self.typeahead.as_ref().map(|ta| &ta.panel)
    }

    pub fn is_consistent(&self) -> bool {
        self.projector.is_consistent(&self.store)
    }

    /// The chip container as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<div class=\"bootstrap-tagsinput\">");
        for node in self.container().nodes() {
            match node {
                Node::Chip(value) => {
                    if let Some(chip) = self.chip(value) {
                        out.push_str(&format!(
                            "<span class=\"tag {}\" data-value=\"{}\">{}<span data-role=\"remove\"></span></span>",
                            chip.class,
                            html_encode(&chip.value),
                            html_encode(&chip.text)
                        ));
                    }
                }
                Node::Spacer => out.push(' '),
                Node::Entry => {
                    out.push_str(&format!(
                        "<input type=\"text\" placeholder=\"{}\"",
                        html_encode(&self.entry.placeholder)
                    ));
                    if !self.entry.is_empty() {
                        out.push_str(&format!(" value=\"{}\"", html_encode(self.entry.text())));
                    }
                    out.push_str(&format!(
                        " style=\"width: {}em !important;\">",
                        self.entry.width
                    ));
                }
            }
        }
        out.push_str("</div>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn free() -> TagsInput {
        TagsInput::new(&TagsInputConfig {
            free_input: true,
            ..Default::default()
        })
    }

    fn letters() -> TagsInput {
        let config: TagsInputConfig = toml::from_str(
            r#"
item_text = "text"
allowed_items = [{ value = 1, text = "A" }, { value = 2, text = "B" }]
"#,
        )
        .unwrap();
        TagsInput::new(&config)
    }

    fn values(input: &TagsInput) -> Vec<&str> {
        input.items().iter().map(|x| x.value()).collect()
    }

    fn events(input: &mut TagsInput) -> Rc<RefCell<Vec<TagEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        input.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        log
    }

    #[test]
    fn typing_and_enter_creates_free_tag() {
        let mut input = free();
        input.type_text("apple");
        assert_eq!(input.input().text(), "apple");
        input.handle_key(Key::Enter);
        assert_eq!(input.items(), &[TagItem::free("apple")]);
        assert_eq!(input.input().text(), "");
        assert!(input.is_consistent());
    }

    #[test]
    fn unmatched_text_in_allowed_mode_is_skipped() {
        let mut input = letters();
        let log = events(&mut input);
        assert!(!input.add("C"));
        assert!(input.items().is_empty());
        assert!(log.borrow().is_empty());

        assert!(input.add("B"));
        assert_eq!(values(&input), vec!["2"]);
        assert!(input.add_by_value("1"));
        assert!(!input.add_by_value("3"));
        assert_eq!(values(&input), vec!["2", "1"]);
    }

    #[test]
    fn add_and_remove_emit_paired_events() {
        let mut input = free();
        let log = events(&mut input);
        input.add("x");
        input.remove("x");
        input.remove("x");
        assert_eq!(
            *log.borrow(),
            vec![
                TagEvent::Changed,
                TagEvent::ItemAdded(TagItem::free("x")),
                TagEvent::Changed,
                TagEvent::ItemRemoved(TagItem::free("x")),
            ]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut input = free();
        let log = Rc::new(RefCell::new(0));
        let sink = log.clone();
        let id = input.subscribe(move |_| *sink.borrow_mut() += 1);
        input.add("a");
        assert!(input.unsubscribe(id));
        input.add("b");
        assert_eq!(*log.borrow(), 2);
    }

    #[test]
    fn backspace_removes_previous_chip_only_at_start() {
        let mut input = free();
        input.handle_key(Key::Backspace);
        assert!(input.items().is_empty());

        input.add("one");
        input.type_text("ab");
        input.handle_key(Key::Backspace);
        assert_eq!(input.input().text(), "a");
        assert_eq!(values(&input), vec!["one"]);

        input.handle_key(Key::Backspace);
        assert_eq!(input.input().text(), "");
        assert_eq!(values(&input), vec!["one"]);

        input.handle_key(Key::Backspace);
        assert!(input.items().is_empty());
        assert!(input.host().is_empty());
        assert!(input.is_consistent());
    }

    #[test]
    fn delete_removes_chip_after_cursor() {
        let mut input = free();
        input.add("a");
        input.add("b");
        input.handle_key(Key::Delete);
        assert_eq!(values(&input), vec!["a", "b"]);

        input.handle_key(Key::Left);
        input.handle_key(Key::Delete);
        assert_eq!(values(&input), vec!["a"]);
        assert!(input.is_consistent());
    }

    #[test]
    fn new_tags_go_before_entry_but_store_appends() {
        let mut input = free();
        input.add("a");
        input.add("b");
        input.handle_key(Key::Left);
        input.add("c");

        assert_eq!(values(&input), vec!["a", "b", "c"]);
        let visual: Vec<&str> = input.container().chip_values().collect();
        assert_eq!(visual, vec!["a", "c", "b"]);
        assert!(input.is_consistent());
    }

    #[test]
    fn arrows_move_caret_inside_text() {
        let mut input = free();
        input.add("a");
        input.type_text("xy");
        input.handle_key(Key::Left);
        assert_eq!(input.input().caret(), 1);
        assert_eq!(input.container().chip_before_entry().map(|(_, v)| v), Some("a"));
        input.handle_key(Key::Home);
        input.handle_key(Key::Right);
        input.handle_key(Key::End);
        assert_eq!(input.input().caret(), 2);
    }

    #[test]
    fn extra_confirm_key_is_not_typed() {
        let mut input = TagsInput::new(&TagsInputConfig {
            free_input: true,
            confirm_keys: vec![13, 188],
            ..Default::default()
        });
        input.type_text("red,green,");
        assert_eq!(values(&input), vec!["red", "green"]);
        assert_eq!(input.input().text(), "");
    }

    #[test]
    fn duplicate_confirm_pulses_chip() {
        let mut input = free();
        input.add("dup");
        input.type_text("dup");
        input.handle_key(Key::Enter);
        assert_eq!(input.items().len(), 1);
        assert!(input.chip("dup").unwrap().pulsing);
        assert_eq!(input.input().text(), "");
        assert!(input.settle_pulses());
    }

    #[test]
    fn width_tracks_text_and_placeholder() {
        let mut input = TagsInput::new(&TagsInputConfig {
            free_input: true,
            placeholder: "Add tags".into(),
            ..Default::default()
        });
        assert_eq!(input.input().width, 8);
        input.type_text("a much longer tag");
        assert_eq!(input.input().width, 17);
        input.handle_key(Key::Enter);
        assert_eq!(input.input().width, 8);
    }

    #[test]
    fn initial_items_are_silent_and_projected() {
        let config: TagsInputConfig = toml::from_str(
            r#"
item_text = "text"
items = ["A", { value = 9, text = "Nine" }, "missing"]
allowed_items = [{ value = 1, text = "A" }]

[[options]]
value = "1"
text = "A"
"#,
        )
        .unwrap();
        let input = TagsInput::new(&config);
        assert_eq!(values(&input), vec!["1", "9"]);
        let options: Vec<&str> = input.options().map(|o| o.value.as_str()).collect();
        assert_eq!(options, vec!["1", "9"]);
        assert!(input.host().hidden);
    }

    #[test]
    fn typeahead_merges_and_confirms_highlight() {
        let config: TagsInputConfig = toml::from_str(
            r#"
item_text = "text"
allowed_items = [{ value = "nl", text = "Netherlands" }]

[typeahead]
source = [{ value = "nz", text = "New Zealand" }, { value = "np", text = "Nepal" }]
"#,
        )
        .unwrap();
        let mut input = TagsInput::new(&config);
        input.type_text("ne");
        let panel = input.suggestions().unwrap();
        assert!(panel.is_open());
        assert_eq!(panel.items.len(), 2);
        assert_eq!(input.store().allowed().len(), 3);

        input.handle_key(Key::Down);
        input.handle_key(Key::Down);
        assert_eq!(input.input().text(), "Nepal");
        input.handle_key(Key::Enter);

        assert_eq!(values(&input), vec!["np"]);
        let panel = input.suggestions().unwrap();
        assert!(!panel.is_open());
        assert!(panel.items.is_empty());
    }

    #[test]
    fn escape_closes_suggestions_first() {
        let mut input = TagsInput::builder(&TagsInputConfig::default())
            .typeahead(Typeahead::new(StaticSource::new(vec![TagItem::free("kiwi")]), 1))
            .build();
        input.type_text("k");
        assert!(input.suggestions().unwrap().is_open());
        input.handle_key(Key::Escape);
        assert!(!input.suggestions().unwrap().is_open());
        input.handle_key(Key::Backspace);
        assert!(!input.suggestions().unwrap().is_open());
    }

    #[test]
    fn clicks_focus_and_remove() {
        let mut input = free();
        input.add("a");
        assert!(!input.input().focused);
        input.click_container();
        assert!(input.input().focused);
        assert!(input.click_remove("a"));
        assert!(!input.click_remove("a"));
    }

    #[test]
    fn custom_class_and_host() {
        let host = HostSelect::new([BackingOption::new("seed", "Seed")]);
        let mut input = TagsInput::builder(&TagsInputConfig {
            free_input: true,
            ..Default::default()
        })
        .host(host)
        .tag_class(TagClass::Custom(Rc::new(|i: &TagItem| {
            let class = if i.text().len() > 3 { "long" } else { "short" };
            class.to_string()
        })))
        .build();
        input.add("abc");
        input.add("abcdef");
        assert_eq!(input.chip("abc").unwrap().class, "short");
        assert_eq!(input.chip("abcdef").unwrap().class, "long");
        assert_eq!(input.host().len(), 3);

        let host = input.destroy();
        assert!(!host.hidden);
        assert_eq!(host.selected_values(), vec!["seed", "abc", "abcdef"]);
    }

    #[test]
    fn field_class_reads_record() {
        let config: TagsInputConfig = toml::from_str(
            r#"
item_text = "text"
tag_class = { field = "kind" }
allowed_items = [{ value = "b", text = "Bug", kind = "label-danger" }]
"#,
        )
        .unwrap();
        let mut input = TagsInput::new(&config);
        input.add("Bug");
        assert_eq!(input.chip("b").unwrap().class, "label-danger");
    }

    #[test]
    fn structured_item_skips_lookup() {
        let mut input = letters();
        let mut record = serde_json::Map::new();
        record.insert("value".into(), json!(5));
        let item = TagItem::from_record(record, &ItemFields::default()).unwrap();
        assert!(input.add(item));
        assert_eq!(values(&input), vec!["5"]);
    }

    #[test]
    fn html_projection() {
        let mut input = TagsInput::new(&TagsInputConfig {
            free_input: true,
            placeholder: "tags".into(),
            ..Default::default()
        });
        input.add("<b>");
        input.add("rust");
        input.type_text("go");
        assert_snapshot!(input.to_html(), @r#"<div class="bootstrap-tagsinput"><span class="tag label label-info" data-value="&lt;b&gt;">&lt;b&gt;<span data-role="remove"></span></span> <span class="tag label label-info" data-value="rust">rust<span data-role="remove"></span></span> <input type="text" placeholder="tags" value="go" style="width: 4em !important;"></div>"#);
    }
}
