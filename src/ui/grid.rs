use super::{Palette, truncate_width};
use crate::app::{App, GRID_COLUMNS};
use crate::pipeline::PAGE_SIZE;
use crate::record::Record;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

const GRID_ROWS: usize = PAGE_SIZE / GRID_COLUMNS;

pub fn render(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    if let Some(ref message) = app.load_error {
        render_notice(message, Style::default().fg(palette.error), palette, frame, area);
        return;
    }

    let positions = app.page_positions();
    if positions.is_empty() {
        // Nothing fetched yet; the loader covers this.
        if app.loading && app.records.is_empty() {
            return;
        }
        render_notice("No data found.", Style::default().fg(palette.muted), palette, frame, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, GRID_ROWS as u32); GRID_ROWS])
        .split(area);

    for (row_idx, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row_area);
        for (col_idx, cell) in cols.iter().enumerate() {
            let slot = row_idx * GRID_COLUMNS + col_idx;
            if let Some(&position) = positions.get(slot) {
                render_card(app, palette, frame, *cell, position, slot == app.selected);
            }
        }
    }
}

/// A single message spanning the whole grid.
fn render_notice(message: &str, style: Style, palette: &Palette, frame: &mut Frame, area: Rect) {
    let notice = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(message.to_string(), style))])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        );
    frame.render_widget(notice, area);
}

fn render_card(app: &App, palette: &Palette, frame: &mut Frame, area: Rect, position: usize, selected: bool) {
    let record = &app.records[position];
    let favorite = app.is_favorite(position);
    let inner_width = area.width.saturating_sub(2) as usize;

    let border_style = if selected {
        Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.border)
    };
    let star = if favorite {
        Span::styled(" ★ ", Style::default().fg(palette.favorite).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(" ☆ ", Style::default().fg(palette.muted))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(star).alignment(Alignment::Right));

    frame.render_widget(Paragraph::new(card_lines(record, palette, inner_width)).block(block), area);
}

fn card_lines<'a>(record: &'a Record, palette: &Palette, width: usize) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    // Terminals can't draw the image; show a marker and the URL instead.
    if let Some(ref url) = record.thumbnail {
        lines.push(Line::from(vec![
            Span::styled("▣ ", Style::default().fg(palette.muted)),
            Span::styled(
                truncate_width(url, width.saturating_sub(2)),
                Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
            ),
        ]));
    }

    // Code + name header
    let code = record.code.as_deref().unwrap_or("");
    let code_width = if code.is_empty() { 0 } else { code.width() + 1 };
    let mut header = Vec::new();
    if !code.is_empty() {
        header.push(Span::styled(
            format!("{} ", code),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));
    }
    header.push(Span::styled(
        truncate_width(record.display_name(), width.saturating_sub(code_width)),
        Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::from(header));

    if let Some(ref category) = record.category {
        lines.push(Line::from(Span::styled(
            truncate_width(category, width),
            Style::default().fg(palette.muted),
        )));
    }

    // Action controls: only slots present on the record, copy marker on copyable ones
    let mut actions = Vec::new();
    for (slot, _) in record.present_links() {
        actions.push(Span::styled(
            format!("[{}]", slot.label()),
            Style::default().fg(palette.link).add_modifier(Modifier::UNDERLINED),
        ));
        if slot.is_copyable() {
            actions.push(Span::styled(" ⧉", Style::default().fg(palette.muted)));
        }
        actions.push(Span::raw(" "));
    }
    if !actions.is_empty() {
        lines.push(Line::from(actions));
    }

    lines
}
