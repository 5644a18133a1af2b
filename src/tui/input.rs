use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::widget::Key;

use super::app::{App, HitTarget};

/// Translate a terminal key into a widget key.
pub fn map_key(key: KeyEvent) -> Option<Key> {
    let mapped = match key.code {
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::End => Key::End,
        KeyCode::Home => Key::Home,
        KeyCode::Left => Key::Left,
        KeyCode::Up => Key::Up,
        KeyCode::Right => Key::Right,
        KeyCode::Down => Key::Down,
        KeyCode::Delete => Key::Delete,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    };
    Some(mapped)
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.should_quit = true;
        }
        return;
    }

    // Esc closes the suggestions first, and quits once they are gone.
    let suggestions_open = app.input.suggestions().is_some_and(|s| s.is_open());
    if key.code == KeyCode::Esc && !suggestions_open {
        app.should_quit = true;
        return;
    }

    if let Some(k) = map_key(key) {
        app.input.focus();
        app.input.handle_key(k);
    }
}

/// Handle a mouse event: clicks on `×` remove, any other click in the
/// container focuses the entry.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    match app.hit_test(mouse.column, mouse.row).cloned() {
        Some(HitTarget::Remove(value)) => {
            app.input.click_remove(&value);
        }
        Some(HitTarget::Chip(_)) => app.input.click_container(),
        None => {
            let area = app.container_area;
            if mouse.column >= area.x
                && mouse.column < area.x + area.width
                && mouse.row >= area.y
                && mouse.row < area.y + area.height
            {
                app.input.click_container();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TagsInputConfig;
    use crate::tui::app::Hitbox;
    use ratatui::layout::Rect;

    fn free_app() -> App {
        App::new(&TagsInputConfig {
            free_input: true,
            ..Default::default()
        })
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn typed_keys_reach_the_widget() {
        let mut app = free_app();
        for c in "tui".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.input.items().len(), 1);
        assert_eq!(app.input.items()[0].value(), "tui");
        assert!(!app.should_quit);
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let mut app = free_app();
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.should_quit);

        let mut app = free_app();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert_eq!(app.input.input().text(), "");
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(map_key(press(KeyCode::F(5))), None);
        assert_eq!(map_key(press(KeyCode::Delete)), Some(Key::Delete));
    }

    #[test]
    fn clicking_remove_affordance() {
        let mut app = free_app();
        app.input.add("x");
        app.input.input_mut().focused = false;
        app.hitboxes.push(Hitbox {
            area: Rect::new(4, 1, 1, 1),
            target: HitTarget::Remove("x".into()),
        });
        app.container_area = Rect::new(0, 0, 20, 3);

        handle_mouse(&mut app, click(10, 1));
        assert!(app.input.input().focused);
        assert_eq!(app.input.items().len(), 1);

        handle_mouse(&mut app, click(4, 1));
        assert!(app.input.items().is_empty());
    }
}
