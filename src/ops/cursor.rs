//! Entry-slot navigation within the chip sequence.
//!
//! The entry node is the cursor: chips are removed or stepped over relative
//! to where it currently sits.

use crate::model::chip::ChipContainer;
use crate::model::entry::EntryControl;
use crate::util::unicode::display_width;

/// Narrowest the entry is ever drawn, in cells
pub const MIN_ENTRY_WIDTH: usize = 3;

/// Width of the entry: wide enough for the placeholder (at least
/// `MIN_ENTRY_WIDTH`), growing with the typed text.
pub fn entry_width(placeholder: &str, text: &str) -> usize {
    let base = display_width(placeholder).max(1).max(MIN_ENTRY_WIDTH);
    base.max(display_width(text))
}

pub fn refresh_width(entry: &mut EntryControl) {
    entry.width = entry_width(&entry.placeholder, entry.text());
}

/// Value of the chip Backspace would remove: the chip right before the
/// entry, when the caret is at the start of the text.
pub fn backspace_target(container: &ChipContainer, entry: &EntryControl) -> Option<String> {
    if entry.caret() != 0 {
        return None;
    }
    container.chip_before_entry().map(|(_, v)| v.to_string())
}

/// Value of the chip Delete would remove: the chip right after the entry,
/// when the caret is at the start of the text.
pub fn delete_target(container: &ChipContainer, entry: &EntryControl) -> Option<String> {
    if entry.caret() != 0 {
        return None;
    }
    container.chip_after_entry().map(|(_, v)| v.to_string())
}

/// Move the entry in front of the previous chip. Only with empty text.
pub fn move_left(container: &mut ChipContainer, entry: &mut EntryControl) -> bool {
    if !entry.is_empty() {
        return false;
    }
    let Some((idx, _)) = container.chip_before_entry() else {
        return false;
    };
    container.move_entry_to(idx);
    entry.focused = true;
    true
}

/// Move the entry behind the next chip. Only with empty text.
pub fn move_right(container: &mut ChipContainer, entry: &mut EntryControl) -> bool {
    if !entry.is_empty() {
        return false;
    }
    let Some((idx, _)) = container.chip_after_entry() else {
        return false;
    };
    // With the entry taken out the chip shifts down by one; land right after it.
    container.move_entry_to(idx);
    entry.focused = true;
    true
}
