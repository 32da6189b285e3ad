//! Keybinding help popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Palette;

use super::centered_rect;

const BINDINGS: [(&str, &str); 15] = [
    ("↑/k  ↓/j", "move selection"),
    ("PgUp/PgDn", "move selection by page"),
    ("g / G", "first / last record"),
    ("/", "search name, style and notes"),
    ("c", "cycle style filter (all → each style)"),
    ("a", "add a beer"),
    ("e / Enter", "edit selected beer"),
    ("d", "delete selected beer (asks first)"),
    ("r", "refresh from the store"),
    ("t", "toggle light/dark theme"),
    ("o", "sign out"),
    ("Esc", "dismiss message / close popup"),
    ("?", "this help"),
    ("q", "quit (asks first)"),
    ("Ctrl-C", "quit immediately"),
];

/// Renders the scrollable help popup.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: usize, palette: &Palette) {
    let height = (BINDINGS.len() as u16 + 4).min(area.height);
    let popup_area = centered_rect(area, 60, 44, 64, height);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(palette.popup_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:>10}  ", keys), palette.accent()),
                Span::styled(*action, palette.text()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).scroll((scroll as u16, 0));
    frame.render_widget(paragraph, inner);
}
