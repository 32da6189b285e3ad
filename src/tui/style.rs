//! Color palettes and styles for the light and dark themes.

use ratatui::style::{Color, Modifier, Style};

use crate::prefs::ThemeMode;

/// Theme-dependent color palette.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub dim: Color,
    pub header_fg: Color,
    pub header_bg: Color,
    pub accent: Color,
    pub selected_bg: Color,
    pub error: Color,
    pub ok: Color,
    pub border: Color,
}

const DARK: Palette = Palette {
    fg: Color::White,
    dim: Color::DarkGray,
    header_fg: Color::White,
    header_bg: Color::Blue,
    accent: Color::Yellow,
    selected_bg: Color::DarkGray,
    error: Color::Red,
    ok: Color::Green,
    border: Color::Cyan,
};

const LIGHT: Palette = Palette {
    fg: Color::Black,
    dim: Color::Gray,
    header_fg: Color::White,
    header_bg: Color::Blue,
    accent: Color::Rgb(160, 98, 7),
    selected_bg: Color::Rgb(216, 222, 233),
    error: Color::Rgb(160, 32, 32),
    ok: Color::Rgb(22, 120, 60),
    border: Color::Blue,
};

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Palette {
        match mode {
            ThemeMode::Dark => DARK,
            ThemeMode::Light => LIGHT,
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_header(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn ok(&self) -> Style {
        Style::default().fg(self.ok)
    }

    pub fn popup_border(&self) -> Style {
        Style::default().fg(self.border)
    }
}
