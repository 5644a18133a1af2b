/// A key press delivered to the entry control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Tab,
    Enter,
    Escape,
    End,
    Home,
    Left,
    Up,
    Right,
    Down,
    Delete,
    Char(char),
}

impl Key {
    /// Browser key code of this key; confirm keys are configured in these.
    pub fn code(self) -> u32 {
        match self {
            Key::Backspace => 8,
            Key::Tab => 9,
            Key::Enter => 13,
            Key::Escape => 27,
            Key::End => 35,
            Key::Home => 36,
            Key::Left => 37,
            Key::Up => 38,
            Key::Right => 39,
            Key::Down => 40,
            Key::Delete => 46,
            Key::Char(c) => char_code(c),
        }
    }

    /// Parse a key name as used in scripted input (`enter`, `left`, ...).
    /// A single character names itself.
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name.to_ascii_lowercase().as_str() {
            "backspace" => Key::Backspace,
            "tab" => Key::Tab,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "end" => Key::End,
            "home" => Key::Home,
            "left" => Key::Left,
            "up" => Key::Up,
            "right" => Key::Right,
            "down" => Key::Down,
            "delete" | "del" => Key::Delete,
            "space" => Key::Char(' '),
            "comma" => Key::Char(','),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

/// US-layout keydown code: shifted symbols share their base key's code.
fn char_code(c: char) -> u32 {
    match c {
        'a'..='z' => c.to_ascii_uppercase() as u32,
        'A'..='Z' | '0'..='9' | ' ' => c as u32,
        ')' => 48,
        '!' => 49,
        '@' => 50,
        '#' => 51,
        '$' => 52,
        '%' => 53,
        '^' => 54,
        '&' => 55,
        '*' => 56,
        '(' => 57,
        ';' | ':' => 186,
        '=' | '+' => 187,
        ',' | '<' => 188,
        '-' | '_' => 189,
        '.' | '>' => 190,
        '/' | '?' => 191,
        '`' | '~' => 192,
        '[' | '{' => 219,
        '\\' | '|' => 220,
        ']' | '}' => 221,
        '\'' | '"' => 222,
        c if c.is_ascii_control() => c as u32,
        // No key of its own on the layout
        _ => 0,
    }
}
