//! Statistics summary: count, average ABV, average IBU, top style.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::fmt::{format_mean_abv, format_mean_ibu};
use crate::tui::style::Palette;
use crate::view::Stats;

/// Height of the summary strip including borders.
pub const SUMMARY_HEIGHT: u16 = 4;

/// Renders the four statistic boxes.
pub fn render_summary(frame: &mut Frame, area: Rect, stats: &Stats, palette: &Palette) {
    let chunks = Layout::horizontal([
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
    ])
    .split(area);

    let boxes = [
        ("Total", stats.count.to_string()),
        ("Avg ABV", format_mean_abv(stats.mean_abv)),
        ("Avg IBU", format_mean_ibu(stats.mean_ibu)),
        (
            "Top style",
            stats
                .top_category
                .clone()
                .unwrap_or_else(|| "n/a".to_string()),
        ),
    ];

    for (chunk, (label, value)) in chunks.iter().zip(boxes) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.dimmed());
        let inner = block.inner(*chunk);
        frame.render_widget(block, *chunk);
        let lines = vec![
            Line::styled(value, palette.accent()),
            Line::styled(label, palette.dimmed()),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            inner,
        );
    }
}
