//! TUI widgets.

mod delete_confirm;
mod form;
mod header;
mod help;
mod quit_confirm;
mod records;
mod summary;

pub use delete_confirm::render_delete_confirm;
pub use form::render_form;
pub use header::render_header;
pub use help::render_help;
pub use quit_confirm::render_quit_confirm;
pub use records::render_records;
pub use summary::{SUMMARY_HEIGHT, render_summary};

use ratatui::layout::Rect;

/// A centered popup area: `pct` percent of the width clamped to
/// `[min_w, max_w]`, fixed height clamped to the screen.
pub(crate) fn centered_rect(area: Rect, pct: u16, min_w: u16, max_w: u16, height: u16) -> Rect {
    let width = (area.width * pct / 100).clamp(min_w.min(area.width), max_w.min(area.width));
    let height = height.min(area.height);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(area.x + x, area.y + y, width, height)
}
