//! UI module: View components for the TUI.

pub mod overview;
pub mod result;
pub mod sidebar;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::FloodTheme;

/// Training figures published with the flood model.
pub const TRAINING_NOTE: &str = "R² ≈ 0.977 | Trained on 500 thousand flood records";

/// Footer caption naming the loaded model.
pub fn render_caption(f: &mut Frame, area: Rect, model_summary: &str) {
    let text = vec![Line::from(vec![Span::styled(
        format!("{model_summary} | {TRAINING_NOTE}"),
        FloodTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(FloodTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Rows of a rendered buffer as plain text.
#[cfg(test)]
pub(crate) fn buffer_lines(buffer: &ratatui::buffer::Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}
