//! Delete confirmation popup.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::fmt::truncate;
use crate::tui::style::Palette;

use super::centered_rect;

/// Renders a centered delete confirmation. The request is only sent on
/// explicit confirmation.
pub fn render_delete_confirm(frame: &mut Frame, area: Rect, name: &str, palette: &Palette) {
    let popup_area = centered_rect(area, 50, 40, 60, 7);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Delete beer ")
        .borders(Borders::ALL)
        .border_style(palette.popup_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let content = vec![
        Line::from(vec![
            Span::styled("Delete \"", palette.text()),
            Span::styled(truncate(name, 30), palette.accent()),
            Span::styled("\"?", palette.text()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", palette.accent()),
            Span::styled(" / ", palette.dimmed()),
            Span::styled("Enter", palette.accent()),
            Span::styled(" → delete    ", palette.dimmed()),
            Span::styled("n", palette.accent()),
            Span::styled(" / ", palette.dimmed()),
            Span::styled("Esc", palette.accent()),
            Span::styled(" → keep", palette.dimmed()),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        inner,
    );
}
