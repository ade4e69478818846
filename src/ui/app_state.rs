//! # Application State Management
//!
//! This module implements the central `AppState` struct which owns all UI
//! state and implements the `eframe::App` trait. At its core sits an explicit
//! finite state machine over [`UiState`]: exactly one of the idle form, the
//! busy indicator, the error alert, or the results panel is active at any
//! instant, enforced structurally by the enum.
//!
//! ## Responsibilities
//!
//! - Applies [`UiEvent`]s through the exhaustive [`transition`] function
//! - Drains upload outcomes from the worker via `ui_refresh_rx` every frame
//! - Sends submissions to the worker via `ui_command_tx`
//! - Coordinates rendering of the upload form and results panels
//! - Persists the last file-picker directory across application sessions
//!
//! ## Concurrency
//!
//! All state mutation happens on the UI thread. The only off-thread work is
//! the upload itself; its outcome arrives as a message and is applied in
//! arrival order. Nothing cancels an in-flight request, so when two requests
//! overlap the latest *response* wins, not the latest submission.

use eframe::egui;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::{FileSlot, UICommand, UIRefresh, results_panel, upload_panel};
use crate::render::{ResultsView, build_results_view};

/// Fallback message when the service reports failure without an `error`
/// string.
pub const GENERIC_UPLOAD_ERROR: &str = "An error occurred while processing the files";

/// Display-layer state. Exactly one variant is active at any instant; the
/// panels render from whichever variant holds the data they need.
#[derive(Debug, Clone)]
pub enum UiState {
    /// Upload form shown, nothing else.
    Idle,
    /// A submission is in flight: busy indicator shown, submit disabled.
    Loading,
    /// An error message is displayed; the submit control is interactive.
    Error(String),
    /// A completed analysis is displayed.
    Results(ResultsView),
}

/// Events driving the state machine.
#[derive(Debug)]
pub enum UiEvent {
    /// The user submitted the form with both files present.
    Submit,
    /// A validation failure or the missing-files guard surfaced a message.
    ShowError(String),
    /// A file selection passed validation, clearing any displayed error.
    ClearError,
    /// The upload worker finished one submission attempt.
    UploadFinished(Result<crate::api::AnalysisResponse, String>),
}

/// Exhaustive transition function of the display state machine.
///
/// Every `UploadFinished` outcome leaves `Loading`, which is what re-enables
/// the submit control and hides the busy indicator on all exit paths.
pub fn transition(current: UiState, event: UiEvent) -> UiState {
    match event {
        // Re-entrant from Idle, Error and Results alike; whatever was
        // displayed is overwritten.
        UiEvent::Submit => UiState::Loading,

        UiEvent::ShowError(message) => UiState::Error(message),

        UiEvent::ClearError => match current {
            UiState::Error(_) => UiState::Idle,
            other => other,
        },

        UiEvent::UploadFinished(result) => match result {
            Ok(response) if response.success => match response.data {
                Some(data) => UiState::Results(build_results_view(&data)),
                None => UiState::Error(GENERIC_UPLOAD_ERROR.to_string()),
            },
            Ok(response) => UiState::Error(response.error.unwrap_or_else(|| GENERIC_UPLOAD_ERROR.to_string())),
            Err(message) => UiState::Error(message),
        },
    }
}

/// Settings persisted across application sessions.
#[derive(Default, Serialize, Deserialize)]
struct PersistedSettings {
    last_open_dir: Option<String>,
}

/// Central application state: the state machine plus the view context
/// (channels, file slots, texture cache) passed into the panel renderers.
pub struct AppState {
    /// Current display state.
    pub state: UiState,
    /// Receiver for upload outcomes from the worker.
    pub ui_refresh_rx: crate::UIRefreshReceiver,
    /// Sender for commands from the UI to the worker.
    pub ui_command_tx: crate::UICommandSender,

    /// Selected mental disorders CSV, if any.
    pub file1: Option<PathBuf>,
    /// Selected substance use CSV, if any.
    pub file2: Option<PathBuf>,

    /// Uploaded textures for the current results view, one per
    /// visualization panel. Rebuilt lazily after each new result.
    pub viz_textures: Vec<Option<egui::TextureHandle>>,
    /// Whether the results panel should scroll itself into view this frame.
    pub scroll_to_results: bool,
    /// Bumped whenever a new results view arrives; keys the entrance fade.
    pub results_generation: u64,

    /// Last directory used in the file pickers, persisted between sessions.
    pub last_open_dir: Option<String>,
}

impl AppState {
    /// Create a new AppState, loading persisted settings if available.
    pub fn new(rx: crate::UIRefreshReceiver, tx: crate::UICommandSender, storage: Option<&dyn eframe::Storage>) -> Self {
        let persisted: PersistedSettings = storage.and_then(|s| eframe::get_value(s, "app_settings")).unwrap_or_default();

        Self {
            state: UiState::Idle,
            ui_refresh_rx: rx,
            ui_command_tx: tx,
            file1: None,
            file2: None,
            viz_textures: Vec::new(),
            scroll_to_results: false,
            results_generation: 0,
            last_open_dir: persisted.last_open_dir,
        }
    }

    /// Apply one event to the state machine, with the bookkeeping the pure
    /// [`transition`] function cannot do: resetting the texture cache and
    /// arming the scroll/fade when a new results view arrives.
    pub fn apply_event(&mut self, event: UiEvent) {
        let is_upload_outcome = matches!(event, UiEvent::UploadFinished(_));

        let current = std::mem::replace(&mut self.state, UiState::Idle);
        self.state = transition(current, event);

        if is_upload_outcome {
            self.viz_textures.clear();
            if matches!(self.state, UiState::Results(_)) {
                self.scroll_to_results = true;
                self.results_generation += 1;
            }
        }
    }

    /// Submit the form.
    ///
    /// Requires both file slots to be populated; otherwise surfaces an error
    /// without contacting the worker. Enters `Loading` before the command is
    /// sent so the busy state is visible immediately.
    pub fn on_submit(&mut self) {
        let (Some(file1), Some(file2)) = (self.file1.clone(), self.file2.clone()) else {
            self.apply_event(UiEvent::ShowError("Please select both CSV files".to_string()));
            return;
        };

        self.apply_event(UiEvent::Submit);
        log::debug!("Submitting {} and {} for analysis", file1.display(), file2.display());
        let _ = self.ui_command_tx.send(UICommand::Analyze { file1, file2 });
    }

    /// Read access to a file slot.
    pub fn slot(&self, slot: FileSlot) -> &Option<PathBuf> {
        match slot {
            FileSlot::MentalDisorders => &self.file1,
            FileSlot::SubstanceUse => &self.file2,
        }
    }

    /// Replace a file slot's selection (`None` clears it).
    pub fn set_slot(&mut self, slot: FileSlot, path: Option<PathBuf>) {
        match slot {
            FileSlot::MentalDisorders => self.file1 = path,
            FileSlot::SubstanceUse => self.file2 = path,
        }
    }
}

impl eframe::App for AppState {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            last_open_dir: self.last_open_dir.clone(),
        };
        eframe::set_value(storage, "app_settings", &settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain worker outcomes in arrival order.
        while let Ok(msg) = self.ui_refresh_rx.try_recv() {
            match msg {
                UIRefresh::UploadFinished(result) => self.apply_event(UiEvent::UploadFinished(result)),
            }
        }

        // Keep polling for the outcome while a request is in flight.
        if matches!(self.state, UiState::Loading) {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                upload_panel::render(ui, self);

                if let UiState::Results(view) = &self.state {
                    results_panel::render(
                        ui,
                        view,
                        self.results_generation,
                        &mut self.viz_textures,
                        &mut self.scroll_to_results,
                    );
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AnalysisResponse;
    use std::sync::mpsc;

    fn test_state() -> (AppState, mpsc::Receiver<UICommand>) {
        let (command_tx, command_rx) = mpsc::channel();
        let (_refresh_tx, refresh_rx) = mpsc::channel();
        (AppState::new(refresh_rx, command_tx, None), command_rx)
    }

    fn response(body: &str) -> AnalysisResponse {
        serde_json::from_str(body).unwrap()
    }

    fn success_response() -> AnalysisResponse {
        response(
            r#"{
                "success": true,
                "data": {
                    "statistics": {
                        "shape": [100, 5],
                        "mean_mental_fitness": 0.5,
                        "std_mental_fitness": 0.1,
                        "min_mental_fitness": 0.0,
                        "max_mental_fitness": 0.9
                    },
                    "model_metrics": {
                        "train": {"mse": 0.1, "rmse": 0.316, "r2": 0.9},
                        "test": {"mse": 0.12, "rmse": 0.346, "r2": 0.88}
                    },
                    "visualizations": {}
                }
            }"#,
        )
    }

    #[test]
    fn test_submit_enters_loading_from_idle_error_and_results() {
        for start in [
            UiState::Idle,
            UiState::Error("boom".to_string()),
            transition(UiState::Loading, UiEvent::UploadFinished(Ok(success_response()))),
        ] {
            let next = transition(start, UiEvent::Submit);
            assert!(matches!(next, UiState::Loading));
        }
    }

    #[test]
    fn test_successful_upload_enters_results() {
        let next = transition(UiState::Loading, UiEvent::UploadFinished(Ok(success_response())));
        let UiState::Results(view) = next else {
            panic!("expected Results state");
        };
        assert_eq!(view.stat_cards.len(), 6);
        assert_eq!(view.viz_panels.len(), 5);
    }

    #[test]
    fn test_application_error_shows_server_message_verbatim() {
        let resp = response(r#"{"success": false, "error": "Invalid CSV headers"}"#);
        let next = transition(UiState::Loading, UiEvent::UploadFinished(Ok(resp)));
        let UiState::Error(message) = next else {
            panic!("expected Error state");
        };
        assert_eq!(message, "Invalid CSV headers");
    }

    #[test]
    fn test_application_error_without_message_uses_fallback() {
        let resp = response(r#"{"success": false}"#);
        let next = transition(UiState::Loading, UiEvent::UploadFinished(Ok(resp)));
        let UiState::Error(message) = next else {
            panic!("expected Error state");
        };
        assert_eq!(message, "An error occurred while processing the files");
    }

    #[test]
    fn test_transport_error_is_displayed_as_received() {
        let next = transition(
            UiState::Loading,
            UiEvent::UploadFinished(Err("Network error: timeout".to_string())),
        );
        let UiState::Error(message) = next else {
            panic!("expected Error state");
        };
        assert_eq!(message, "Network error: timeout");
    }

    #[test]
    fn test_clear_error_returns_to_idle_only_from_error() {
        let next = transition(UiState::Error("boom".to_string()), UiEvent::ClearError);
        assert!(matches!(next, UiState::Idle));

        let results = transition(UiState::Loading, UiEvent::UploadFinished(Ok(success_response())));
        let next = transition(results, UiEvent::ClearError);
        assert!(matches!(next, UiState::Results(_)));
    }

    #[test]
    fn test_submit_without_both_files_sends_no_command() {
        let (mut state, command_rx) = test_state();
        state.on_submit();
        assert!(command_rx.try_recv().is_err());
        let UiState::Error(message) = &state.state else {
            panic!("expected Error state");
        };
        assert_eq!(message, "Please select both CSV files");

        state.file1 = Some(PathBuf::from("disorders.csv"));
        state.on_submit();
        assert!(command_rx.try_recv().is_err());
    }

    #[test]
    fn test_submit_with_both_files_sends_command_and_enters_loading() {
        let (mut state, command_rx) = test_state();
        state.file1 = Some(PathBuf::from("disorders.csv"));
        state.file2 = Some(PathBuf::from("substance.csv"));
        state.on_submit();

        assert!(matches!(state.state, UiState::Loading));
        let UICommand::Analyze { file1, file2 } = command_rx.try_recv().unwrap();
        assert_eq!(file1, PathBuf::from("disorders.csv"));
        assert_eq!(file2, PathBuf::from("substance.csv"));
    }

    #[test]
    fn test_upload_outcome_always_leaves_loading() {
        // Every possible outcome re-enables the submit path.
        let outcomes: Vec<Result<AnalysisResponse, String>> = vec![
            Ok(success_response()),
            Ok(response(r#"{"success": false, "error": "boom"}"#)),
            Ok(response(r#"{"error": "boom"}"#)),
            Ok(response(r#"{"success": true}"#)),
            Err("Network error: timeout".to_string()),
        ];
        for outcome in outcomes {
            let next = transition(UiState::Loading, UiEvent::UploadFinished(outcome));
            assert!(!matches!(next, UiState::Loading));
        }
    }

    #[test]
    fn test_new_results_arm_scroll_and_reset_textures() {
        let (mut state, _command_rx) = test_state();
        state.viz_textures.push(None);

        state.apply_event(UiEvent::UploadFinished(Ok(success_response())));
        assert!(state.scroll_to_results);
        assert!(state.viz_textures.is_empty());
        assert_eq!(state.results_generation, 1);

        // A validation pass while results are shown must not re-arm the
        // entrance scroll.
        state.scroll_to_results = false;
        state.apply_event(UiEvent::ClearError);
        assert!(!state.scroll_to_results);
        assert_eq!(state.results_generation, 1);
    }

    #[test]
    fn test_responses_apply_in_arrival_order() {
        // Two overlapping requests: the response processed last wins,
        // regardless of which submission it belonged to.
        let (mut state, _command_rx) = test_state();
        state.apply_event(UiEvent::Submit);
        state.apply_event(UiEvent::UploadFinished(Ok(success_response())));
        assert!(matches!(state.state, UiState::Results(_)));

        state.apply_event(UiEvent::UploadFinished(Err("Network error: timeout".to_string())));
        assert!(matches!(state.state, UiState::Error(_)));
    }
}
