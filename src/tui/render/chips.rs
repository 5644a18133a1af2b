use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::chip::Node;
use crate::tui::app::{App, HitTarget, Hitbox};
use crate::util::unicode::{caret_col, display_width, truncate_to_width};
use crate::widget::TagsInput;

/// Cells a chip adds around its text: " text × "
const CHIP_PADDING: usize = 4;

/// What occupies a laid-out slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Chip { value: String, label: String },
    Entry,
}

/// A slot positioned relative to the container's inner area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placed {
    pub slot: Slot,
    pub x: u16,
    pub y: u16,
    pub width: u16,
}

/// Flow the container's nodes into rows of `width` cells.
pub fn layout(input: &TagsInput, width: u16) -> Vec<Placed> {
    let width = width.max(1) as usize;
    let mut placed = Vec::new();
    let (mut x, mut y) = (0usize, 0usize);

    for node in input.container().nodes() {
        let (slot, w) = match node {
            Node::Spacer => {
                if x > 0 && x < width {
                    x += 1;
                }
                continue;
            }
            Node::Chip(value) => {
                let Some(chip) = input.chip(value) else {
                    continue;
                };
                let max_text = width.saturating_sub(CHIP_PADDING).max(1);
                let label = format!(" {} \u{00D7} ", truncate_to_width(&chip.text, max_text));
                let w = display_width(&label);
                (
                    Slot::Chip {
                        value: value.clone(),
                        label,
                    },
                    w,
                )
            }
            Node::Entry => (Slot::Entry, input.input().width.min(width)),
        };

        if x > 0 && x + w > width {
            x = 0;
            y += 1;
        }
        placed.push(Placed {
            slot,
            x: x as u16,
            y: y as u16,
            width: w as u16,
        });
        x += w;
    }
    placed
}

/// Number of rows `layout` needs.
pub fn rows_needed(input: &TagsInput, width: u16) -> u16 {
    layout(input, width).iter().map(|p| p.y + 1).max().unwrap_or(1)
}

/// Render the bordered chip container. Returns the screen area of the entry
/// so popups can anchor to it.
pub fn render_container(frame: &mut Frame, app: &mut App, area: Rect) -> Option<Rect> {
    let bg = app.theme.background;
    let dim = app.theme.dim;

    let block = Block::default()
        .title(Span::styled(
            " Tags ",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(dim).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.container_area = area;
    app.hitboxes.clear();
    let mut entry_area = None;

    for p in layout(&app.input, inner.width) {
        if p.y >= inner.height {
            break;
        }
        let rect = Rect::new(inner.x + p.x, inner.y + p.y, p.width, 1).intersection(inner);
        match &p.slot {
            Slot::Chip { value, label } => {
                let Some(chip) = app.input.chip(value) else {
                    continue;
                };
                let mut style = Style::default()
                    .fg(bg)
                    .bg(app.theme.chip_color(&chip.class));
                if chip.pulsing {
                    style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                }
                frame.render_widget(Paragraph::new(Span::styled(label.clone(), style)), rect);

                // The × sits one cell in from the chip's right edge.
                app.hitboxes.push(Hitbox {
                    area: Rect::new(rect.x + rect.width.saturating_sub(2), rect.y, 1, 1),
                    target: HitTarget::Remove(value.clone()),
                });
                app.hitboxes.push(Hitbox {
                    area: rect,
                    target: HitTarget::Chip(value.clone()),
                });
            }
            Slot::Entry => {
                let entry = app.input.input();
                let line = if entry.is_empty() {
                    Line::from(Span::styled(
                        truncate_to_width(&entry.placeholder, rect.width as usize),
                        Style::default().fg(dim).bg(bg).add_modifier(Modifier::ITALIC),
                    ))
                } else {
                    Line::from(Span::styled(
                        entry.text().to_string(),
                        Style::default().fg(app.theme.text_bright).bg(bg),
                    ))
                };
                frame.render_widget(Paragraph::new(line), rect);
                if entry.focused {
                    let col = caret_col(entry.text(), entry.caret()) as u16;
                    frame.set_cursor_position(Position::new(
                        (rect.x + col).min(inner.x + inner.width.saturating_sub(1)),
                        rect.y,
                    ));
                }
                entry_area = Some(rect);
            }
        }
    }
    entry_area
}
