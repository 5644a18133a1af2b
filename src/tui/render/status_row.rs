use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::display_width;

const HINT: &str = "Enter add  Bksp remove  Esc quit";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let count = app.input.items().len();
    let mut status = format!(" {} {}", count, if count == 1 { "tag" } else { "tags" });
    if let Some(last) = app.last_event_text() {
        status.push_str(" \u{00B7} ");
        status.push_str(&last);
    }

    let mut spans = vec![Span::styled(
        status.clone(),
        Style::default().fg(app.theme.text).bg(bg),
    )];
    let content_width = display_width(&status);
    let hint_width = display_width(HINT);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(HINT, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
