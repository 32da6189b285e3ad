//! Header bar: title, session, list status, active filters.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, InputMode};
use crate::tui::style::Palette;
use crate::view::CategoryFilter;

/// Renders the one-line header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let chunks = Layout::horizontal([
        Constraint::Length(9),  // Title
        Constraint::Min(20),    // Session
        Constraint::Length(16), // List status
        Constraint::Length(40), // Search / filters / status message
    ])
    .split(area);

    frame.render_widget(Paragraph::new(" cellar ").style(palette.header()), chunks[0]);

    let session = if state.resolving_identity {
        "resolving session…".to_string()
    } else {
        match &state.identity {
            Some(identity) => identity.email.clone(),
            None => "signed out".to_string(),
        }
    };
    frame.render_widget(Paragraph::new(session).style(palette.header()), chunks[1]);

    let list_status = if state.inventory.loading {
        " loading… ".to_string()
    } else if state.inventory.error.is_some() {
        " fetch failed ".to_string()
    } else {
        format!(" {} beers ", state.inventory.records().len())
    };
    let list_style = if state.inventory.error.is_some() {
        palette.error()
    } else {
        palette.header()
    };
    frame.render_widget(Paragraph::new(list_status).style(list_style), chunks[2]);

    // Right side: live search input, else a summary of active filters, else
    // the transient status message.
    let (text, style) = if state.input_mode == InputMode::Search {
        (format!("/{}█", state.search_input), palette.accent())
    } else if let Some(status) = &state.status {
        (
            status.text.clone(),
            if status.is_error {
                palette.error()
            } else {
                palette.ok()
            },
        )
    } else {
        let mut parts: Vec<String> = Vec::new();
        if !state.search_input.is_empty() {
            parts.push(format!("/{}", state.search_input));
        }
        if let CategoryFilter::Is(category) = &state.category_filter {
            parts.push(format!("[{}]", category));
        }
        (parts.join(" "), palette.header())
    };
    frame.render_widget(Paragraph::new(text).style(style), chunks[3]);
}
