//! Main TUI application: the prediction form controller.
//!
//! Handles:
//! - Startup (model and banner loading)
//! - Input event handling
//! - Synchronous prediction on the trigger key
//! - Drawing the form, documentation, result and input echo

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::{Banner, XgboostModel};
use crate::application::PredictionService;
use crate::config::AppConfig;
use crate::domain::{FEATURE_COUNT, MAX_SCORE, MIN_SCORE};
use crate::ports::FloodModel;

use super::ui::{
    overview::{docs_height, header_height, render_docs, render_header},
    render_caption,
    result::{render_result, ResultState},
    sidebar::{render_sidebar, SliderFormState},
};

/// Sidebar width: marker, longest feature name, track, value and borders.
const SIDEBAR_WIDTH: u16 = 56;

/// Main application state
pub struct App<M: FloodModel> {
    /// Whether the app should quit
    should_quit: bool,

    /// Predict use case over the model loaded at startup
    service: PredictionService<M>,

    /// Caption describing the model
    model_summary: String,

    /// Optional banner above the title
    banner: Option<Banner>,

    /// Slider values and focus
    form: SliderFormState,

    /// Documentation panel open
    docs_expanded: bool,

    /// Input echo panel open
    echo_expanded: bool,

    /// Outcome of the last Predict
    result: ResultState,
}

impl App<XgboostModel> {
    /// Load the model and banner named by `config` and build the app.
    ///
    /// # Errors
    /// Returns error if the model is missing or cannot be loaded.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let model = XgboostModel::load(&config.model_path)
            .with_context(|| format!("Failed to load model from {:?}", config.model_path))?;
        tracing::info!("Model loaded successfully");

        let banner = Banner::load_optional(&config.banner_path);

        Ok(Self::with_dependencies(
            PredictionService::new(Arc::new(model)),
            banner,
        ))
    }
}

impl<M: FloodModel> App<M> {
    /// Create the application around an already-built service.
    pub fn with_dependencies(service: PredictionService<M>, banner: Option<Banner>) -> Self {
        let model_summary = service.model_summary();
        tracing::info!("Documentation set successfully");

        let form = SliderFormState::default();
        tracing::info!("Feature values created successfully ({FEATURE_COUNT} features)");
        tracing::info!("Input features set successfully");

        Self {
            should_quit: false,
            service,
            model_summary,
            banner,
            form,
            docs_expanded: false,
            echo_expanded: false,
            result: ResultState::Idle,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            // Nothing runs in the background, so block until the next key.
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(chunks[0]);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_height(self.banner.as_ref())),
                Constraint::Length(docs_height(self.docs_expanded)),
                Constraint::Min(0),
            ])
            .horizontal_margin(1)
            .split(columns[1]);

        render_sidebar(f, columns[0], &self.form);
        render_header(f, main[0], self.banner.as_ref());
        render_docs(f, main[1], self.docs_expanded);
        render_result(f, main[2], &self.result, self.echo_expanded);
        render_caption(f, chunks[1], &self.model_summary);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => self.form.prev(),
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => self.form.next(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => self.form.decrement(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Char('=') => {
                self.form.increment()
            }
            KeyCode::Home => self.form.set_focused(MIN_SCORE),
            KeyCode::End => self.form.set_focused(MAX_SCORE),
            KeyCode::Enter => {
                if self.form.on_button() {
                    self.predict();
                }
            }
            KeyCode::Char('p') | KeyCode::Char('P') => self.predict(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.form.reset(),
            KeyCode::Char('d') | KeyCode::Char('D') => self.docs_expanded = !self.docs_expanded,
            KeyCode::Char('v') | KeyCode::Char('V') => self.echo_expanded = !self.echo_expanded,
            _ => {}
        }
    }

    /// Run Predict on the current slider values.
    fn predict(&mut self) {
        self.result = match self.service.predict(self.form.values) {
            Ok(prediction) => ResultState::Complete { prediction },
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                ResultState::Error {
                    message: e.to_string(),
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeatureKey, FeatureVector, RiskTier};
    use crate::ports::ModelError;
    use crate::tui::ui::buffer_lines;
    use ratatui::backend::TestBackend;
    use std::path::Path;
    use tempfile::tempdir;

    struct FailingModel;

    impl FloodModel for FailingModel {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
            Err(ModelError::NonFinite(f64::INFINITY))
        }

        fn summary(&self) -> String {
            "failing".into()
        }
    }

    fn fixture_config() -> AppConfig {
        AppConfig::with_asset_dir(&Path::new(env!("CARGO_MANIFEST_DIR")).join("models"))
    }

    fn create_test_app() -> App<XgboostModel> {
        App::new(&fixture_config()).expect("App should start with the fixture model")
    }

    fn press(app: &mut App<impl FloodModel>, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn screen(app: &App<impl FloodModel>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 60)).expect("terminal");
        terminal.draw(|f| app.draw(f)).expect("draw");
        buffer_lines(terminal.backend().buffer()).join("\n")
    }

    fn completed(app: &App<impl FloodModel>) -> &crate::domain::Prediction {
        match &app.result {
            ResultState::Complete { prediction } => prediction,
            other => panic!("expected a prediction, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_end_to_end() {
        let mut app = create_test_app();
        assert!(matches!(app.result, ResultState::Idle));

        press(&mut app, KeyCode::Char('p'));
        let prediction = completed(&app);
        assert_eq!(prediction.tier, RiskTier::from_probability(prediction.probability));
        assert_eq!(prediction.tier, RiskTier::Elevated);
        assert!(prediction.inputs.iter().all(|(_, s)| s == 5));

        let text = screen(&app);
        assert!(text.contains("Predicted Flood Probability: 0.4600"));
        assert!(text.contains("46.0%"));
        assert!(text.contains("ELEVATED RISK — Stay alert"));
        assert!(text.contains("Powered by XGBoost | 3 trees | reg:squarederror"));
    }

    #[test]
    fn test_all_max_end_to_end() {
        let mut app = create_test_app();
        for _ in 0..FEATURE_COUNT {
            press(&mut app, KeyCode::End);
            press(&mut app, KeyCode::Down);
        }
        assert!(app.form.on_button());
        press(&mut app, KeyCode::Enter);

        let prediction = completed(&app);
        assert!(prediction.inputs.iter().all(|(_, s)| s == 15));
        assert_eq!(prediction.tier, RiskTier::Extreme);
        assert_eq!(
            prediction.formatted_percent(),
            format!("{:.1}%", prediction.probability * 100.0)
        );

        let text = screen(&app);
        assert!(text.contains("77.0%"));
        assert!(text.contains("EXTREME DANGER — Evacuation strongly recommended!"));
    }

    #[test]
    fn test_enter_on_slider_does_not_predict() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.result, ResultState::Idle));
    }

    #[test]
    fn test_repeat_predict_is_stable() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('p'));
        let first = completed(&app).clone();
        press(&mut app, KeyCode::Char('p'));
        let second = completed(&app);

        assert_eq!(first.probability, second.probability);
        assert_eq!(first.tier, second.tier);
        assert_eq!(first.inputs.get(FeatureKey::MonsoonIntensity), 8);
    }

    #[test]
    fn test_echo_keeps_submitted_values() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('p'));

        press(&mut app, KeyCode::End);
        assert_eq!(app.form.values.get(FeatureKey::MonsoonIntensity), 15);
        assert_eq!(completed(&app).inputs, FeatureVector::default());
    }

    #[test]
    fn test_panels_toggle() {
        let mut app = create_test_app();
        let collapsed = screen(&app);
        assert!(collapsed.contains("Documentation: Input Feature Descriptions (Scale 0-15)"));
        assert!(!collapsed.contains("Strength of monsoon rains"));

        press(&mut app, KeyCode::Char('d'));
        let expanded = screen(&app);
        assert!(expanded.contains("Strength of monsoon rains"));
        assert!(expanded.contains("Corruption or neglect in governance"));

        press(&mut app, KeyCode::Char('p'));
        assert!(!screen(&app).contains("Score (0–15)"));
        press(&mut app, KeyCode::Char('v'));
        assert!(screen(&app).contains("Score (0–15)"));
    }

    #[test]
    fn test_missing_banner_renders_without_it() {
        // The fixture directory has no banner file.
        let app = create_test_app();
        assert!(app.banner.is_none());
        let text = screen(&app);
        assert!(text.contains("Flood Probability Prediction Model"));
        assert!(text.contains("Real-time flood risk assessment"));
    }

    #[test]
    fn test_banner_is_rendered_when_present() {
        let dir = tempdir().expect("tempdir");
        std::fs::copy(
            fixture_config().model_path,
            dir.path().join(crate::config::MODEL_FILE_NAME),
        )
        .expect("copy model");
        std::fs::write(
            dir.path().join(crate::config::BANNER_FILE_NAME),
            "~~~ FLOODWATCH ~~~\n",
        )
        .expect("write banner");

        let app = App::new(&AppConfig::with_asset_dir(dir.path())).expect("app");
        assert!(app.banner.is_some());
        assert!(screen(&app).contains("~~~ FLOODWATCH ~~~"));
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let dir = tempdir().expect("tempdir");
        let err = App::new(&AppConfig::with_asset_dir(dir.path()))
            .err()
            .expect("startup must fail");
        let message = format!("{err:#}");
        assert!(message.contains("Failed to load model"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn test_inference_error_is_shown() {
        let service = PredictionService::new(Arc::new(FailingModel));
        let mut app = App::with_dependencies(service, None);
        press(&mut app, KeyCode::Char('p'));

        assert!(matches!(app.result, ResultState::Error { .. }));
        assert!(screen(&app).contains("Prediction failed"));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_nan_output_is_shown_as_error_and_draws() {
        struct NanModel;

        impl FloodModel for NanModel {
            fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
                Ok(f64::NAN)
            }

            fn summary(&self) -> String {
                "nan".into()
            }
        }

        let mut app = App::with_dependencies(PredictionService::new(Arc::new(NanModel)), None);
        press(&mut app, KeyCode::Char('p'));

        assert!(matches!(app.result, ResultState::Error { .. }));
        let text = screen(&app);
        assert!(text.contains("Prediction failed"));
        assert!(text.contains("non-finite"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app();
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);

        let mut app = create_test_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
