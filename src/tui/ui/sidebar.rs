//! Risk-factor slider sidebar.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{FeatureKey, FeatureVector, DEFAULT_SCORE, FEATURE_COUNT, MAX_SCORE, MIN_SCORE};
use crate::tui::styles::FloodTheme;

/// Focus index of the "Predict Flood Risk" button, after the sliders.
pub const PREDICT_BUTTON: usize = FEATURE_COUNT;

/// Width of a slider track in cells (one per score step).
const TRACK_WIDTH: usize = MAX_SCORE as usize + 1;

/// Slider form state.
pub struct SliderFormState {
    pub values: FeatureVector,
    /// 0..FEATURE_COUNT selects a slider, `PREDICT_BUTTON` the button
    pub focus: usize,
}

impl Default for SliderFormState {
    fn default() -> Self {
        Self {
            values: FeatureVector::uniform(DEFAULT_SCORE),
            focus: 0,
        }
    }
}

impl SliderFormState {
    /// Move focus down, wrapping from the button back to the first slider
    pub fn next(&mut self) {
        self.focus = (self.focus + 1) % (PREDICT_BUTTON + 1);
    }

    /// Move focus up
    pub fn prev(&mut self) {
        if self.focus == 0 {
            self.focus = PREDICT_BUTTON;
        } else {
            self.focus -= 1;
        }
    }

    /// Slider under focus, if any
    #[must_use]
    pub fn focused_key(&self) -> Option<FeatureKey> {
        FeatureKey::ALL.get(self.focus).copied()
    }

    #[must_use]
    pub fn on_button(&self) -> bool {
        self.focus == PREDICT_BUTTON
    }

    pub fn increment(&mut self) {
        if let Some(key) = self.focused_key() {
            let v = self.values.get(key);
            self.values.set(key, v.saturating_add(1).min(MAX_SCORE));
        }
    }

    pub fn decrement(&mut self) {
        if let Some(key) = self.focused_key() {
            let v = self.values.get(key);
            self.values.set(key, v.saturating_sub(1).max(MIN_SCORE));
        }
    }

    pub fn set_focused(&mut self, score: u8) {
        if let Some(key) = self.focused_key() {
            self.values.set(key, score);
        }
    }

    /// Put every slider back to its default.
    pub fn reset(&mut self) {
        self.values = FeatureVector::uniform(DEFAULT_SCORE);
    }
}

/// Render the slider sidebar
pub fn render_sidebar(f: &mut Frame, area: Rect, state: &SliderFormState) {
    let block = Block::default()
        .title(Span::styled(
            " Adjust Flood Risk Factors (0 = Low, 15 = Extreme) ",
            FloodTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(FloodTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FEATURE_COUNT as u16), // Sliders
            Constraint::Length(1),                    // Spacer
            Constraint::Length(1),                    // Button
            Constraint::Min(0),                       // Hints
        ])
        .split(inner);

    let label_width = FeatureKey::ALL
        .iter()
        .map(|k| k.name().len())
        .max()
        .unwrap_or(0);

    let rows: Vec<Line> = FeatureKey::ALL
        .iter()
        .enumerate()
        .map(|(i, &key)| slider_line(key, state.values.get(key), i == state.focus, label_width))
        .collect();
    f.render_widget(Paragraph::new(rows), chunks[0]);

    let button_style = if state.on_button() {
        FloodTheme::selected()
    } else {
        FloodTheme::button()
    };
    let button = Paragraph::new(Line::from(Span::styled(" Predict Flood Risk ", button_style)))
        .alignment(Alignment::Center);
    f.render_widget(button, chunks[2]);

    render_hints(f, chunks[3]);
}

fn slider_line(key: FeatureKey, value: u8, focused: bool, label_width: usize) -> Line<'static> {
    let label_style = if focused {
        FloodTheme::focused()
    } else {
        FloodTheme::text_secondary()
    };
    let marker = if focused { "▶ " } else { "  " };
    let filled = usize::from(value);

    Line::from(vec![
        Span::styled(marker, FloodTheme::focused()),
        Span::styled(format!("{:<label_width$} ", key.name()), label_style),
        Span::styled("━".repeat(filled), FloodTheme::slider_filled()),
        Span::styled("●", FloodTheme::slider_filled()),
        Span::styled("─".repeat(TRACK_WIDTH - 1 - filled), FloodTheme::slider_empty()),
        Span::styled(format!(" {value:>2}"), FloodTheme::text_bold()),
    ])
}

fn render_hints(f: &mut Frame, area: Rect) {
    let hints = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("[↑↓] ", FloodTheme::key_hint()),
            Span::styled("Select ", FloodTheme::key_desc()),
            Span::styled("[←→] ", FloodTheme::key_hint()),
            Span::styled("Adjust ", FloodTheme::key_desc()),
            Span::styled("[Home/End] ", FloodTheme::key_hint()),
            Span::styled("0/15 ", FloodTheme::key_desc()),
            Span::styled("[Q/Esc] ", FloodTheme::key_hint()),
            Span::styled("Quit", FloodTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[P] ", FloodTheme::key_hint()),
            Span::styled("Predict ", FloodTheme::key_desc()),
            Span::styled("[R] ", FloodTheme::key_hint()),
            Span::styled("Reset ", FloodTheme::key_desc()),
            Span::styled("[D] ", FloodTheme::key_hint()),
            Span::styled("Docs ", FloodTheme::key_desc()),
            Span::styled("[V] ", FloodTheme::key_hint()),
            Span::styled("Inputs", FloodTheme::key_desc()),
        ]),
    ]);

    f.render_widget(hints, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps_through_button() {
        let mut state = SliderFormState::default();
        state.prev();
        assert!(state.on_button());
        assert_eq!(state.focused_key(), None);
        state.next();
        assert_eq!(state.focused_key(), Some(FeatureKey::MonsoonIntensity));
        for _ in 0..FEATURE_COUNT {
            state.next();
        }
        assert!(state.on_button());
    }

    #[test]
    fn test_adjust_clamps_to_domain() {
        let mut state = SliderFormState::default();
        for _ in 0..30 {
            state.increment();
        }
        assert_eq!(state.values.get(FeatureKey::MonsoonIntensity), MAX_SCORE);
        for _ in 0..30 {
            state.decrement();
        }
        assert_eq!(state.values.get(FeatureKey::MonsoonIntensity), MIN_SCORE);

        state.set_focused(99);
        assert_eq!(state.values.get(FeatureKey::MonsoonIntensity), MAX_SCORE);
        assert_eq!(state.values.get(FeatureKey::TopographyDrainage), DEFAULT_SCORE);
    }

    #[test]
    fn test_button_focus_ignores_adjustments() {
        let mut state = SliderFormState {
            focus: PREDICT_BUTTON,
            ..Default::default()
        };
        state.increment();
        state.decrement();
        state.set_focused(0);
        assert_eq!(state.values, FeatureVector::default());
    }

    #[test]
    fn test_reset() {
        let mut state = SliderFormState::default();
        state.set_focused(12);
        state.reset();
        assert_eq!(state.values, FeatureVector::default());
    }

    #[test]
    fn test_slider_track_width() {
        for value in [MIN_SCORE, DEFAULT_SCORE, MAX_SCORE] {
            let line = slider_line(FeatureKey::Siltation, value, false, 10);
            let track: usize = line.spans[2..5]
                .iter()
                .map(|s| s.content.chars().count())
                .sum();
            assert_eq!(track, TRACK_WIDTH);
        }
    }

    #[test]
    fn test_hints_list_quit_keys() {
        use crate::tui::ui::buffer_lines;
        use ratatui::{backend::TestBackend, Terminal};

        let mut terminal = Terminal::new(TestBackend::new(56, 60)).expect("terminal");
        terminal
            .draw(|f| render_sidebar(f, f.area(), &SliderFormState::default()))
            .expect("draw");
        let text = buffer_lines(terminal.backend().buffer()).join("\n");
        assert!(text.contains("[Q/Esc] Quit"));
        assert!(text.contains("[V] Inputs"));
    }
}
