mod controls;
mod grid;
mod help;
mod overlay;
mod palette;

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub use palette::Palette;

/// Top-level render.
pub fn render(app: &App, frame: &mut Frame) {
    let palette = Palette::for_theme(app.theme);
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)), area);

    // Layout: header(3) + controls(3) + grid(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    controls::render_header(app, &palette, frame, chunks[0]);
    controls::render_controls(app, &palette, frame, chunks[1]);
    grid::render(app, &palette, frame, chunks[2]);
    controls::render_status(app, &palette, frame, chunks[3]);

    if app.loading {
        overlay::render_loader(&palette, frame);
    }
    if app.modal.open {
        overlay::render_modal(app, &palette, frame);
    }
    overlay::render_toast(app, &palette, frame);

    // Render help overlay on top if active
    if app.show_help {
        help::render(&palette, frame);
    }
}

/// Truncate to `max_width` display columns, adding "…" if truncated.
pub fn truncate_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    if max_width > 0 {
        out.push('…');
    }
    out
}

/// Create a centered rectangle using percentage of parent area.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
