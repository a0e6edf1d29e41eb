//! Flood-themed color palette and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{RiskTier, Severity};

/// Water-toned color palette.
pub struct FloodTheme;

impl FloodTheme {
    // === Primary Colors ===

    /// Ocean blue
    pub const PRIMARY: Color = Color::Rgb(14, 116, 144); // #0E7490

    /// Shallow-water cyan for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(103, 232, 249); // #67E8F9

    /// Deep water for header fills
    pub const PRIMARY_DARK: Color = Color::Rgb(21, 94, 117); // #155E75

    /// Storm grey for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    pub const SUCCESS: Color = Color::Rgb(34, 197, 94); // #22C55E

    pub const WARNING: Color = Color::Rgb(245, 158, 11); // #F59E0B

    pub const DANGER: Color = Color::Rgb(239, 68, 68); // #EF4444

    pub const INFO: Color = Color::Rgb(56, 189, 248); // #38BDF8

    // === Background Colors ===

    pub const BG_DARK: Color = Color::Rgb(12, 74, 110); // #0C4A6E

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(241, 245, 249); // #F1F5F9

    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8

    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_bold() -> Style {
        Self::text().add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Focused slider row or button
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Filled part of a slider track
    #[must_use]
    pub fn slider_filled() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    /// Empty part of a slider track
    #[must_use]
    pub fn slider_empty() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn button() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for a severity level (error, warning, info)
    #[must_use]
    pub fn severity(severity: Severity) -> Style {
        match severity {
            Severity::Error => Self::danger(),
            Severity::Warning => Self::warning(),
            Severity::Info => Self::info(),
        }
    }

    /// The tier's severity style, made bold
    #[must_use]
    pub fn risk_tier(tier: RiskTier) -> Style {
        Self::severity(tier.severity()).add_modifier(Modifier::BOLD)
    }
}
