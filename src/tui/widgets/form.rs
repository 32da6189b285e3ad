//! Create/edit form popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::editor::{Form, FormField, FormMode};
use crate::tui::style::Palette;

use super::centered_rect;

/// Renders the create/edit popup over the main view.
pub fn render_form(frame: &mut Frame, area: Rect, form: &Form, palette: &Palette) {
    // One line per field plus error/status and hint lines.
    let height = (FormField::all().len() as u16 + 6).min(area.height);
    let popup_area = centered_rect(area, 60, 44, 72, height);

    frame.render_widget(Clear, popup_area);

    let title = match form.mode {
        FormMode::Create => " Add beer ",
        FormMode::Edit { .. } => " Edit beer ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(palette.popup_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines: Vec<Line> = Vec::new();
    for field in FormField::all() {
        let focused = *field == form.field && !form.busy;
        let label_style = if focused {
            palette.accent()
        } else {
            palette.dimmed()
        };
        let mut spans = vec![
            Span::styled(format!("{:>8}: ", field.label()), label_style),
            Span::styled(form.text_of(*field).to_string(), palette.text()),
        ];
        if focused {
            spans.push(Span::styled("█", palette.accent()));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    if form.busy {
        lines.push(Line::styled("Saving…", palette.accent()));
    } else if let Some(error) = &form.error {
        lines.push(Line::styled(error.clone(), palette.error()));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::styled(
        "Tab next field · Enter save · Esc cancel",
        palette.dimmed(),
    ));

    frame.render_widget(Paragraph::new(lines), inner);
}
