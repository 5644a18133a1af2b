use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

/// The live text entry hosted inside the chip container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryControl {
    text: String,
    /// Byte offset into `text`, always on a grapheme boundary
    caret: usize,
    pub placeholder: String,
    pub focused: bool,
    /// Visual width in character cells, maintained by the cursor logic
    pub width: usize,
}

impl EntryControl {
    pub fn new(placeholder: impl Into<String>) -> Self {
        EntryControl {
            placeholder: placeholder.into(),
            ..Default::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text and put the caret at its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.caret, c);
        self.caret += c.len_utf8();
    }

    /// Delete the grapheme before the caret. Returns false at start of text.
    pub fn delete_back(&mut self) -> bool {
        match prev_grapheme_boundary(&self.text, self.caret) {
            Some(prev) => {
                self.text.replace_range(prev..self.caret, "");
                self.caret = prev;
                true
            }
            None => false,
        }
    }

    /// Delete the grapheme after the caret. Returns false at end of text.
    pub fn delete_forward(&mut self) -> bool {
        match next_grapheme_boundary(&self.text, self.caret) {
            Some(next) => {
                self.text.replace_range(self.caret..next, "");
                true
            }
            None => false,
        }
    }

    pub fn caret_left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.caret) {
            self.caret = prev;
        }
    }

    pub fn caret_right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.caret) {
            self.caret = next;
        }
    }

    pub fn caret_home(&mut self) {
        self.caret = 0;
    }

    pub fn caret_end(&mut self) {
        self.caret = self.text.len();
    }
}
