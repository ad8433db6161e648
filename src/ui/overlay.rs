use super::{Palette, centered_rect};
use crate::app::App;
use crate::toast::ToastPhase;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

pub fn render_loader(palette: &Palette, frame: &mut Frame) {
    let area = centered_rect(30, 20, frame.area());
    frame.render_widget(Clear, area);
    let loader = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Loading…",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().bg(palette.bg))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent)),
    );
    frame.render_widget(loader, area);
}

pub fn render_modal(app: &App, palette: &Palette, frame: &mut Frame) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let checkbox = if app.modal.opt_out { "[x]" } else { "[ ]" };
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enjoying the catalog?",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Every link here is curated and kept up to date by hand."),
        Line::from("If it saves you time, consider supporting the project."),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} ", checkbox), Style::default().fg(palette.accent)),
            Span::raw("Don't show this again"),
            Span::styled("  (Space)", Style::default().fg(palette.muted)),
        ]),
    ];

    let modal = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(palette.bg).fg(palette.fg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(" Support ")
                .title_bottom(Line::from(" Enter/Esc to close ").style(Style::default().fg(palette.muted))),
        );
    frame.render_widget(modal, area);
}

/// Bottom-right transient message. Dimmed while fading out.
pub fn render_toast(app: &App, palette: &Palette, frame: &mut Frame) {
    let Some(toast) = app.toast.current() else {
        return;
    };
    let style = match app.toast.phase(Instant::now()) {
        Some(ToastPhase::Visible) => Style::default().fg(palette.bg).bg(palette.accent),
        Some(ToastPhase::Fading) => Style::default()
            .fg(palette.muted)
            .bg(palette.bg)
            .add_modifier(Modifier::DIM),
        _ => return,
    };

    let full = frame.area();
    let width = (toast.message.width() as u16 + 4).min(full.width);
    let height = 3.min(full.height);
    let area = Rect {
        x: full.right().saturating_sub(width + 1),
        y: full.bottom().saturating_sub(height + 1),
        width,
        height,
    }
    .intersection(full);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(format!(" {} ", toast.message))
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(style)),
        area,
    );
}
