use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

/// Maximum number of visible entries in the dropdown
const MAX_VISIBLE: usize = 8;

/// Render the typeahead dropdown below the entry
pub fn render_suggestions(frame: &mut Frame, app: &App, entry_area: Rect) {
    let panel = match app.input.suggestions() {
        Some(panel) if panel.is_open() => panel,
        _ => return,
    };

    let bg = app.theme.background;
    let dim = app.theme.dim;
    let term_area = frame.area();

    let count = panel.items.len().min(MAX_VISIBLE);
    let widest = panel
        .items
        .iter()
        .take(MAX_VISIBLE)
        .map(|x| display_width(x.text()))
        .max()
        .unwrap_or(10)
        + 5; // marker + borders

    let popup_w = (widest as u16).min(term_area.width.saturating_sub(2)).max(12);
    let popup_h = (count as u16) + 2; // +2 for borders

    // Below the entry if it fits, else above
    let y = if entry_area.y + 1 + popup_h <= term_area.height {
        entry_area.y + 1
    } else {
        entry_area.y.saturating_sub(popup_h)
    };
    let x = entry_area.x.min(term_area.width.saturating_sub(popup_w));
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(term_area);

    // Keep the highlighted row in view
    let selected = panel.selected.unwrap_or(0);
    let scroll_start = if selected >= MAX_VISIBLE {
        selected - MAX_VISIBLE + 1
    } else {
        0
    };

    let inner_w = (popup_w as usize).saturating_sub(2);
    let mut lines: Vec<Line> = Vec::new();
    for (i, item) in panel.items.iter().enumerate().skip(scroll_start).take(MAX_VISIBLE) {
        let is_selected = panel.selected == Some(i);
        let style = if is_selected {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };

        let prefix = if is_selected { " \u{25B8} " } else { "   " };
        let text = truncate_to_width(item.text(), inner_w.saturating_sub(3));
        let pad = inner_w.saturating_sub(3 + display_width(&text));
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(text, style),
            Span::styled(" ".repeat(pad), style),
        ]));
    }

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup_area);
}
