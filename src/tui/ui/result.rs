//! Prediction result panel and input echo.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Row, Table},
    Frame,
};

use crate::domain::{FeatureKey, Prediction, FEATURE_COUNT};
use crate::tui::styles::FloodTheme;

/// Column header for the echoed scores.
pub const SCORE_COLUMN: &str = "Score (0–15)";

/// Result panel state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Nothing predicted yet
    #[default]
    Idle,
    /// Last Predict succeeded
    Complete { prediction: Prediction },
    /// Last Predict failed
    Error { message: String },
}

/// Render the result panel
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState, echo_expanded: bool) {
    match state {
        ResultState::Idle => render_idle(f, area),
        ResultState::Complete { prediction } => {
            render_prediction(f, area, prediction, echo_expanded)
        }
        ResultState::Error { message } => render_error(f, area, message),
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Adjust the risk factors, then press Predict Flood Risk",
            FloodTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(FloodTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_prediction(f: &mut Frame, area: Rect, prediction: &Prediction, echo_expanded: bool) {
    let warning_rows = u16::from(prediction.is_out_of_range());
    let echo_rows = if echo_expanded {
        FEATURE_COUNT as u16 + 3
    } else {
        3
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Probability
            Constraint::Length(3),            // Percent gauge
            Constraint::Length(1),            // Tier message
            Constraint::Length(warning_rows), // Out-of-range notice
            Constraint::Length(1),            // Timestamp
            Constraint::Length(echo_rows),    // Input echo
            Constraint::Min(0),
        ])
        .split(area);

    let probability = Paragraph::new(Line::from(vec![
        Span::styled("Predicted Flood Probability: ", FloodTheme::success()),
        Span::styled(
            prediction.formatted_probability(),
            FloodTheme::success().add_modifier(ratatui::style::Modifier::BOLD),
        ),
    ]));
    f.render_widget(probability, chunks[0]);

    let tier_style = FloodTheme::risk_tier(prediction.tier);

    // Gauge needs a ratio in [0, 1]; the label keeps the raw value.
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Flood Risk ", FloodTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(FloodTheme::border()),
        )
        .gauge_style(tier_style)
        .ratio(prediction.probability.clamp(0.0, 1.0))
        .label(prediction.formatted_percent());
    f.render_widget(gauge, chunks[1]);

    let message = Paragraph::new(Line::from(Span::styled(prediction.tier.message(), tier_style)));
    f.render_widget(message, chunks[2]);

    if prediction.is_out_of_range() {
        let notice = Paragraph::new(Line::from(Span::styled(
            "! Model output is outside [0, 1]; values are shown unclamped",
            FloodTheme::warning(),
        )));
        f.render_widget(notice, chunks[3]);
    }

    let stamp = Paragraph::new(Line::from(Span::styled(
        format!(
            "Computed at {}",
            prediction.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        FloodTheme::text_muted(),
    )));
    f.render_widget(stamp, chunks[4]);

    render_echo(f, chunks[5], prediction, echo_expanded);
}

/// Transposed table of the scores that produced `prediction`.
fn render_echo(f: &mut Frame, area: Rect, prediction: &Prediction, expanded: bool) {
    let arrow = if expanded { "▾" } else { "▸" };
    let block = Block::default()
        .title(Span::styled(
            format!(" {arrow} View Your Input Values "),
            FloodTheme::focused(),
        ))
        .borders(Borders::ALL)
        .border_style(FloodTheme::border());

    if !expanded {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Press [V] to expand",
            FloodTheme::text_muted(),
        )))
        .block(block);
        f.render_widget(hint, area);
        return;
    }

    let name_width = FeatureKey::ALL
        .iter()
        .map(|k| k.name().len())
        .max()
        .unwrap_or(0) as u16;

    let rows: Vec<Row> = prediction
        .inputs
        .iter()
        .map(|(key, score)| Row::new(vec![key.name().to_string(), score.to_string()]))
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(name_width + 2), Constraint::Length(14)],
    )
    .header(Row::new(vec!["", SCORE_COLUMN]).style(FloodTheme::text_bold()))
    .style(FloodTheme::text())
    .block(block);

    f.render_widget(table, area);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Prediction failed", FloodTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, FloodTheme::text())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(FloodTheme::danger()),
    );

    f.render_widget(content, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureVector;
    use crate::tui::ui::buffer_lines;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &ResultState, echo_expanded: bool) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).expect("terminal");
        terminal
            .draw(|f| render_result(f, f.area(), state, echo_expanded))
            .expect("draw");
        buffer_lines(terminal.backend().buffer())
    }

    fn echoed_score(lines: &[String], key: FeatureKey) -> u8 {
        // Borders touch the first column, so drop them before tokenizing.
        let line = lines
            .iter()
            .map(|l| l.replace('│', " "))
            .find(|l| l.split_whitespace().any(|w| w == key.name()))
            .unwrap_or_else(|| panic!("{key} missing from echo"));
        line.split_whitespace()
            .skip_while(|w| *w != key.name())
            .nth(1)
            .and_then(|w| w.parse().ok())
            .unwrap_or_else(|| panic!("no score next to {key}"))
    }

    #[test]
    fn test_echo_lists_every_submitted_score() {
        let mut inputs = FeatureVector::default();
        inputs.set(FeatureKey::WetlandLoss, 13);
        inputs.set(FeatureKey::DamsQuality, 0);
        let state = ResultState::Complete {
            prediction: Prediction::new(0.52, inputs),
        };

        let lines = draw(&state, true);
        assert!(lines.iter().any(|l| l.contains(SCORE_COLUMN)));
        for (key, score) in inputs.iter() {
            assert_eq!(echoed_score(&lines, key), score, "{key}");
        }
        let text = lines.join("\n");
        assert!(text.contains("MODERATE RISK — Monitor closely and prepare"));
        assert!(text.contains("52.0%"));
    }

    #[test]
    fn test_default_echo_is_twenty_fives() {
        let state = ResultState::Complete {
            prediction: Prediction::new(0.46, FeatureVector::default()),
        };
        let lines = draw(&state, true);
        for key in FeatureKey::ALL {
            assert_eq!(echoed_score(&lines, key), 5);
        }
    }

    #[test]
    fn test_out_of_range_is_drawn_with_notice() {
        let state = ResultState::Complete {
            prediction: Prediction::new(-0.05, FeatureVector::default()),
        };
        let text = draw(&state, false).join("\n");
        assert!(text.contains("-0.0500"));
        assert!(text.contains("-5.0%"));
        assert!(text.contains("outside [0, 1]"));
        assert!(text.contains("LOW RISK — Normal conditions"));
    }

    #[test]
    fn test_idle_and_error_states() {
        let idle = draw(&ResultState::Idle, false).join("\n");
        assert!(idle.contains("press Predict Flood Risk"));

        let error = draw(
            &ResultState::Error {
                message: "Model returned a non-finite value: NaN".into(),
            },
            false,
        )
        .join("\n");
        assert!(error.contains("Prediction failed"));
        assert!(error.contains("non-finite"));
    }
}
