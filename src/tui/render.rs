//! Main rendering logic for the TUI.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use super::state::{AppState, Popup};
use super::style::Palette;
use super::widgets::{
    SUMMARY_HEIGHT, render_delete_confirm, render_form, render_header, render_help,
    render_quit_confirm, render_records, render_summary,
};

const FOOTER_HINT: &str =
    " a add · e edit · d delete · / search · c style · r refresh · t theme · ? help · q quit";

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let palette = Palette::for_mode(state.theme);
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1),              // Header
        Constraint::Length(SUMMARY_HEIGHT), // Statistics
        Constraint::Min(5),                 // Record list
        Constraint::Length(1),              // Footer
    ])
    .split(area);

    render_header(frame, chunks[0], state, &palette);
    render_summary(frame, chunks[1], &state.view.stats, &palette);
    render_content(frame, chunks[2], state, &palette);
    render_footer(frame, chunks[3], state, &palette);

    // Popups overlay everything; only one can be open at a time.
    if let Some(form) = &state.form {
        render_form(frame, area, form, &palette);
    }
    match &state.popup {
        Popup::Help { scroll } => render_help(frame, area, *scroll, &palette),
        Popup::DeleteConfirm { name, .. } => render_delete_confirm(frame, area, name, &palette),
        Popup::QuitConfirm => render_quit_confirm(frame, area, &palette),
        Popup::None => {}
    }
}

fn render_content(frame: &mut Frame, area: Rect, state: &mut AppState, palette: &Palette) {
    if state.resolving_identity {
        frame.render_widget(
            Paragraph::new("Resolving session…")
                .style(palette.dimmed())
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    if state.identity.is_none() {
        let hint = if state.signed_out {
            "Signed out. Press q to exit."
        } else {
            "No session. Set CELLAR_USER (or PGUSER) and restart, or run with --demo."
        };
        frame.render_widget(
            Paragraph::new(hint)
                .style(palette.dimmed())
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    render_records(frame, area, state, palette);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    // The header already shows the short status; the footer carries the
    // full error text so store messages are not truncated away.
    let (text, style) = match &state.status {
        Some(status) if status.is_error => (format!(" {}", status.text), palette.error()),
        _ => match &state.inventory.error {
            Some(error) => (format!(" {}", error), palette.error()),
            None => (FOOTER_HINT.to_string(), palette.dimmed()),
        },
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}
