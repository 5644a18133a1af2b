use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::util::html::html_encode;

/// An `<option>` of the host select, mirroring one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackingOption {
    pub value: String,
    pub text: String,
    #[serde(default = "default_true")]
    pub selected: bool,
}

fn default_true() -> bool {
    true
}

impl BackingOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        BackingOption {
            value: value.into(),
            text: text.into(),
            selected: true,
        }
    }
}

/// The form element the widget is attached to.
///
/// Options are keyed by value, so there is never more than one option per
/// distinct value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSelect {
    options: IndexMap<String, BackingOption>,
    pub multiple: bool,
    pub hidden: bool,
}

impl HostSelect {
    /// A host pre-seeded with options. A repeated value keeps the first option.
    pub fn new(options: impl IntoIterator<Item = BackingOption>) -> Self {
        let mut map = IndexMap::new();
        for opt in options {
            map.entry(opt.value.clone()).or_insert(opt);
        }
        HostSelect {
            options: map,
            multiple: false,
            hidden: false,
        }
    }

    /// Take over the element: multi-select, every option selected, hidden.
    pub fn attach(&mut self) {
        self.multiple = true;
        self.hidden = true;
        for opt in self.options.values_mut() {
            opt.selected = true;
        }
    }

    /// Give the element back, visible again.
    pub fn detach(&mut self) {
        self.hidden = false;
    }

    pub fn option(&self, value: &str) -> Option<&BackingOption> {
        self.options.get(value)
    }

    pub fn options(&self) -> impl Iterator<Item = &BackingOption> {
        self.options.values()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Append an option unless one with the same value exists.
    /// Returns true if a new option was created.
    pub fn ensure_option(&mut self, value: &str, text: &str) -> bool {
        if self.options.contains_key(value) {
            return false;
        }
        self.options
            .insert(value.to_string(), BackingOption::new(value, text));
        true
    }

    pub fn remove_option(&mut self, value: &str) -> Option<BackingOption> {
        self.options.shift_remove(value)
    }

    pub fn clear(&mut self) {
        self.options.clear();
    }

    /// Values of the selected options, in order; what the form would submit.
    pub fn selected_values(&self) -> Vec<&str> {
        self.options
            .values()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect()
    }

    pub fn to_html(&self) -> String {
        let mut attrs = String::new();
        if self.multiple {
            attrs.push_str(" multiple");
        }
        if self.hidden {
            attrs.push_str(" style=\"display: none;\"");
        }
        let mut out = format!("<select{}>", attrs);
        for opt in self.options.values() {
            out.push_str(&format!(
                "<option value=\"{}\"{}>{}</option>",
                html_encode(&opt.value),
                if opt.selected { " selected" } else { "" },
                html_encode(&opt.text)
            ));
        }
        out.push_str("</select>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn attach_selects_everything() {
        let mut opt = BackingOption::new("1", "One");
        opt.selected = false;
        let mut host = HostSelect::new([opt]);
        host.attach();
        assert!(host.multiple);
        assert!(host.hidden);
        assert_eq!(host.selected_values(), vec!["1"]);
        host.detach();
        assert!(!host.hidden);
    }

    #[test]
    fn one_option_per_value() {
        let mut host = HostSelect::new([BackingOption::new("a", "A"), BackingOption::new("a", "dup")]);
        assert_eq!(host.len(), 1);
        assert_eq!(host.option("a").unwrap().text, "A");
        assert!(!host.ensure_option("a", "again"));
        assert!(host.ensure_option("b", "B"));
        assert_eq!(host.len(), 2);
        assert!(host.remove_option("a").is_some());
        assert!(host.remove_option("a").is_none());
    }

    #[test]
    fn html_escapes_values_and_text() {
        let mut host = HostSelect::new([BackingOption::new("a&b", "<A>")]);
        host.attach();
        assert_snapshot!(host.to_html(), @r#"<select multiple style="display: none;"><option value="a&amp;b" selected>&lt;A&gt;</option></select>"#);
    }
}
