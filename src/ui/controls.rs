use super::Palette;
use crate::app::{App, InputMode};
use crate::pipeline::ViewMode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

pub fn render_header(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Link Catalog ",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  [{} entries]", app.visible.len()),
            Style::default().fg(palette.muted),
        ),
        Span::styled(
            format!("  ★ {}", app.bookmarks.len()),
            Style::default().fg(palette.favorite),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} t", Palette::theme_icon(app.theme)),
            Style::default().fg(palette.accent),
        ),
    ]))
    .alignment(Alignment::Left)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(palette.border)),
    );
    frame.render_widget(header, area);
}

pub fn render_controls(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(18),
            Constraint::Percentage(22),
        ])
        .split(area);

    // ── Search box ──
    let editing = app.input_mode == InputMode::Editing;
    let search_style = if editing {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };
    let search_label = if editing { " 🔍 " } else { " 🔍 (/) " };
    let search = Paragraph::new(format!("{}{}", search_label, app.filter.search))
        .style(Style::default().fg(palette.fg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(" Search "),
        );
    frame.render_widget(search, chunks[0]);

    // Set cursor position when editing
    if editing {
        let cursor_x = chunks[0].x + 1 + (search_label.width() + app.filter.search.width()) as u16;
        let max_x = chunks[0].right().saturating_sub(2);
        frame.set_cursor_position((cursor_x.min(max_x), chunks[0].y + 1));
    }

    // ── Category dropdown ──
    let category = Paragraph::new(format!(" {} ▾", app.category_label()))
        .style(Style::default().fg(palette.fg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title(" Category (c) "),
        );
    frame.render_widget(category, chunks[1]);

    // ── Sort dropdown ──
    let sort = Paragraph::new(format!(" {} ▾", app.filter.sort.label()))
        .style(Style::default().fg(palette.fg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title(" Sort (s) "),
        );
    frame.render_widget(sort, chunks[2]);

    // ── View toggle: exactly one button active ──
    let button = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                label,
                Style::default()
                    .bg(palette.accent)
                    .fg(palette.bg)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(palette.muted))
        }
    };
    let view = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        button(" All (a) ", app.filter.view == ViewMode::All),
        Span::raw(" "),
        button(" ★ Saved (b) ", app.filter.view == ViewMode::Bookmarks),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(" View "),
    );
    frame.render_widget(view, chunks[3]);
}

pub fn render_status(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )
    };
    let status_line = Line::from(vec![
        Span::styled(
            format!(" Page {}/{} ", app.filter.page, app.total_pages()),
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("({})  ", app.range_label()),
            Style::default().fg(palette.muted),
        ),
        key("n/p"),
        Span::raw(" Page  "),
        key("f"),
        Span::raw(" Favorite  "),
        key("y/Y"),
        Span::raw(" Copy  "),
        key("1-3"),
        Span::raw(" Open  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit"),
    ]);
    frame.render_widget(
        Paragraph::new(status_line).style(Style::default().fg(palette.fg)),
        area,
    );
}
