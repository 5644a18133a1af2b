pub mod chips;
pub mod status_row;
pub mod suggestions;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function: container, status row, then the suggestions popup
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Container grows with its rows, plus 2 for the border
    let rows = chips::rows_needed(&app.input, area.width.saturating_sub(2));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(rows + 2), // chip container
            Constraint::Min(0),           // free space for the dropdown
            Constraint::Length(1),        // status row
        ])
        .split(area);

    let entry_area = chips::render_container(frame, app, chunks[0]);

    status_row::render_status_row(frame, app, chunks[2]);

    // Suggestions go last so they draw over everything else
    if let Some(entry_area) = entry_area {
        suggestions::render_suggestions(frame, app, entry_area);
    }
}
