use super::{Palette, centered_rect};
use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("?", "Toggle this help"),
            ("q", "Quit application"),
            ("t", "Toggle dark/light theme"),
        ],
    ),
    (
        "Filter",
        &[
            ("/", "Search by name or code (Enter/Esc to stop typing)"),
            ("Esc", "Clear search"),
            ("c / C", "Next / previous category"),
            ("s", "Toggle sort: default / name"),
            ("a / b", "Show all / bookmarked only"),
        ],
    ),
    (
        "Cards",
        &[
            ("←↓↑→ hjkl", "Move selection"),
            ("n / p", "Next / previous page"),
            ("g / G", "First / last page"),
            ("f Space", "Toggle favorite"),
            ("y / Y", "Copy 5MB / XML link"),
            ("1 2 3", "Open 5MB / XML / Watch link"),
        ],
    ),
];

pub fn render(palette: &Palette, frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let mut help_text = vec![Line::from("")];
    for (title, bindings) in SECTIONS {
        help_text.push(Line::from(Span::styled(
            format!("  {}", title),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )));
        for (keys, action) in bindings.iter() {
            help_text.push(Line::from(vec![
                Span::styled(format!("    {:<12}", keys), Style::default().fg(palette.favorite)),
                Span::raw(*action),
            ]));
        }
        help_text.push(Line::from(""));
    }

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(" Help: Keybindings ")
                .title_bottom(Line::from(" Press any key to close ").style(Style::default().fg(palette.muted))),
        )
        .style(Style::default().bg(palette.bg).fg(palette.fg));

    frame.render_widget(help, area);
}
