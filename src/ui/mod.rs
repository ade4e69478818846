// UI module for the Mental Fitness Analyzer
//
// This module organizes the UI into separate components:
// - `upload_panel`: File selection form, submit control, and error alert
// - `results_panel`: Statistics cards, metric tables, and visualizations
// - `app_state`: Application state machine and main update loop

pub mod app_state;
pub mod results_panel;
pub mod upload_panel;

use std::path::PathBuf;

use crate::api::AnalysisResponse;

pub use app_state::{AppState, UiEvent, UiState};

/// Messages from the upload worker back to the UI.
#[derive(Debug)]
pub enum UIRefresh {
    /// One submission attempt finished: a decoded response (successful or
    /// application-level failure) or a display-ready transport error.
    UploadFinished(Result<AnalysisResponse, String>),
}

/// Commands from the UI to the upload worker.
#[derive(Debug)]
pub enum UICommand {
    Analyze { file1: PathBuf, file2: PathBuf },
}

/// The two file inputs of the upload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSlot {
    MentalDisorders,
    SubstanceUse,
}

impl FileSlot {
    /// Human-readable label used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            FileSlot::MentalDisorders => "Mental disorders data",
            FileSlot::SubstanceUse => "Substance use data",
        }
    }
}
