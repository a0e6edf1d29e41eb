//! Title area and the feature documentation panel.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::adapters::Banner;
use crate::domain::{FeatureKey, FEATURE_COUNT};
use crate::tui::styles::FloodTheme;

const DOCS_TITLE: &str = "Documentation: Input Feature Descriptions (Scale 0-15)";

/// Rows the header needs: optional banner plus title, subtitle, blank, intro.
#[must_use]
pub fn header_height(banner: Option<&Banner>) -> u16 {
    banner.map_or(0, Banner::height).saturating_add(4)
}

/// Rows the documentation panel needs.
#[must_use]
pub fn docs_height(expanded: bool) -> u16 {
    if expanded {
        FEATURE_COUNT as u16 + 2
    } else {
        3
    }
}

pub fn render_header(f: &mut Frame, area: Rect, banner: Option<&Banner>) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(banner) = banner {
        lines.extend(
            banner
                .lines
                .iter()
                .map(|l| Line::from(Span::styled(l.as_str(), FloodTheme::info()))),
        );
    }

    lines.push(Line::from(Span::styled(
        "Flood Probability Prediction Model",
        FloodTheme::title(),
    )));
    lines.push(Line::from(Span::styled(
        "Real-time flood risk assessment",
        FloodTheme::text_secondary(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Enter the values below to predict ", FloodTheme::text()),
        Span::styled(
            "Flood Probability (0 = Safe, 1 = Certain Flood)",
            FloodTheme::text_bold(),
        ),
    ]));

    f.render_widget(Paragraph::new(lines), area);
}

/// Collapsible list of what each factor means.
pub fn render_docs(f: &mut Frame, area: Rect, expanded: bool) {
    let (arrow, border_style) = if expanded {
        ("▾", FloodTheme::border_focused())
    } else {
        ("▸", FloodTheme::border())
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" {arrow} {DOCS_TITLE} "),
            FloodTheme::focused(),
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    let body: Vec<Line> = if expanded {
        FeatureKey::ALL
            .iter()
            .map(|k| {
                Line::from(vec![
                    Span::styled(k.name(), FloodTheme::text_bold()),
                    Span::styled(" — ", FloodTheme::text_muted()),
                    Span::styled(k.description(), FloodTheme::text_secondary()),
                ])
            })
            .collect()
    } else {
        vec![Line::from(Span::styled(
            "Press [D] to expand",
            FloodTheme::text_muted(),
        ))]
    };

    f.render_widget(Paragraph::new(body).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_height_saturates_for_huge_banner() {
        assert_eq!(header_height(None), 4);

        let banner = Banner {
            lines: vec![String::new(); 70_000],
        };
        assert_eq!(banner.height(), u16::MAX);
        assert_eq!(header_height(Some(&banner)), u16::MAX);
    }
}
