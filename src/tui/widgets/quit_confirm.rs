//! Quit confirmation popup.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Palette;

use super::centered_rect;

/// Renders a centered quit confirmation popup.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect, palette: &Palette) {
    let popup_area = centered_rect(area, 50, 36, 56, 7);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Exit cellar ")
        .borders(Borders::ALL)
        .border_style(palette.popup_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let content = vec![
        Line::styled("Quit the cellar?", palette.text()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", palette.accent()),
            Span::styled(" / ", palette.dimmed()),
            Span::styled("y", palette.accent()),
            Span::styled(" → quit    ", palette.dimmed()),
            Span::styled("Esc", palette.accent()),
            Span::styled(" / ", palette.dimmed()),
            Span::styled("n", palette.accent()),
            Span::styled(" → stay", palette.dimmed()),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        inner,
    );
}
