/// Visual proxy for one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub value: String,
    pub text: String,
    /// Space-separated, already HTML-escaped class names
    pub class: String,
    /// Set when a duplicate add re-affirms this chip; cleared on the next idle tick
    pub pulsing: bool,
}

/// One slot in the container's left-to-right sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A chip, keyed by its tag value
    Chip(String),
    /// Separator emitted after each chip
    Spacer,
    /// The live entry control
    Entry,
}

/// The chip container: chips, their spacers, and exactly one entry slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipContainer {
    nodes: Vec<Node>,
}

impl Default for ChipContainer {
    fn default() -> Self {
        ChipContainer {
            nodes: vec![Node::Entry],
        }
    }
}

impl ChipContainer {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Index of the entry node.
    pub fn entry_index(&self) -> usize {
        // The entry node is never removed, so the fallback is unreachable.
        self.nodes
            .iter()
            .position(|n| *n == Node::Entry)
            .unwrap_or(self.nodes.len())
    }

    /// Chip values in visual order.
    pub fn chip_values(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Chip(v) => Some(v.as_str()),
            _ => None,
        })
    }

    /// Insert a chip and its trailing spacer right before the entry slot.
    pub fn insert_before_entry(&mut self, value: &str) {
        let at = self.entry_index();
        self.nodes.insert(at, Node::Spacer);
        self.nodes.insert(at, Node::Chip(value.to_string()));
    }

    /// Remove a chip and the spacer following it. No-op if absent.
    pub fn remove_chip(&mut self, value: &str) -> bool {
        let Some(i) = self
            .nodes
            .iter()
            .position(|n| matches!(n, Node::Chip(v) if v == value))
        else {
            return false;
        };
        self.nodes.remove(i);
        if matches!(self.nodes.get(i), Some(Node::Spacer)) {
            self.nodes.remove(i);
        }
        true
    }

    /// Drop every chip and spacer, leaving only the entry slot.
    pub fn clear_chips(&mut self) {
        self.nodes.retain(|n| *n == Node::Entry);
    }

    /// The chip immediately before the entry, skipping spacers.
    pub fn chip_before_entry(&self) -> Option<(usize, &str)> {
        let entry = self.entry_index();
        self.nodes[..entry]
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, n)| match n {
                Node::Chip(v) => Some((i, v.as_str())),
                _ => None,
            })
    }

    /// The chip immediately after the entry, skipping spacers.
    pub fn chip_after_entry(&self) -> Option<(usize, &str)> {
        let entry = self.entry_index();
        self.nodes
            .iter()
            .enumerate()
            .skip(entry + 1)
            .find_map(|(i, n)| match n {
                Node::Chip(v) => Some((i, v.as_str())),
                _ => None,
            })
    }

    /// Move the entry node so it sits at `index` of the sequence with the
    /// entry removed.
    pub fn move_entry_to(&mut self, index: usize) {
        let from = self.entry_index();
        self.nodes.remove(from);
        let to = index.min(self.nodes.len());
        self.nodes.insert(to, Node::Entry);
    }
}
