use crate::storage::Theme;
use ratatui::style::Color;

/// Colours for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub highlight: Color,
    pub favorite: Color,
    pub link: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::Gray,
                border: Color::Gray,
                accent: Color::Blue,
                highlight: Color::LightBlue,
                favorite: Color::Rgb(214, 140, 0),
                link: Color::Blue,
                error: Color::Red,
            },
            Theme::Dark => Self {
                bg: Color::Black,
                fg: Color::White,
                muted: Color::DarkGray,
                border: Color::DarkGray,
                accent: Color::Cyan,
                highlight: Color::Cyan,
                favorite: Color::Yellow,
                link: Color::LightBlue,
                error: Color::LightRed,
            },
        }
    }

    /// Glyph for the theme toggle.
    pub fn theme_icon(theme: Theme) -> &'static str {
        match theme {
            Theme::Light => "☀",
            Theme::Dark => "☾",
        }
    }
}
