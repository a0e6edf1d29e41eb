//! TUI module: Terminal User Interface using Ratatui.
//!
//! A single screen with:
//! - Risk-factor sliders and the Predict trigger
//! - Feature documentation
//! - Prediction result and input echo

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::FloodTheme;
