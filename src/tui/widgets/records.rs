//! Record list table.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use crate::fmt::{format_abv, format_date, format_ibu, truncate};
use crate::tui::state::AppState;
use crate::tui::style::Palette;

const HEADERS: [&str; 7] = ["NAME", "BREWERY", "STYLE", "ABV", "IBU", "ADDED", "NOTES"];

/// Renders the record table, or an empty-state hint.
pub fn render_records(frame: &mut Frame, area: Rect, state: &mut AppState, palette: &Palette) {
    let records = state.inventory.records();

    if state.view.filtered.is_empty() {
        let hint = if state.inventory.loading && records.is_empty() {
            "Loading beers…"
        } else if records.is_empty() {
            "No beers in the cellar yet. Press a to add your first."
        } else {
            "No beers match the current search/filter."
        };
        frame.render_widget(
            Paragraph::new(hint)
                .style(palette.dimmed())
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
        .style(palette.table_header())
        .height(1);

    let rows: Vec<Row> = state
        .view
        .filtered
        .iter()
        .filter_map(|&i| records.get(i))
        .map(|record| {
            Row::new(vec![
                Cell::from(record.name.clone()),
                Cell::from(record.brewery.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(record.category.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(format_abv(record.abv)),
                Cell::from(format_ibu(record.ibu)),
                Cell::from(format_date(record.created_at)),
                Cell::from(truncate(record.notes.as_deref().unwrap_or(""), 48)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(10),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .style(palette.text())
        .row_highlight_style(palette.selected())
        .column_spacing(1);

    state.table_state.select(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut state.table_state);
}
