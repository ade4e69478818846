//! # Upload Panel - File Selection Form and Submit Control
//!
//! Renders the upload form: one picker button per CSV input, the submit
//! button with its busy affordance, the in-flight spinner, and the error
//! alert. Selections are validated immediately when picked; a rejected file
//! clears its slot so the user has to reselect.

use eframe::egui;
use egui::Color32;

use super::{AppState, FileSlot, UiEvent, UiState};
use crate::validate;

/// Render the upload form into the current layout.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Mental Fitness Analyzer");
    ui.label("Upload the mental disorders and substance use datasets to analyze mental fitness trends.");
    ui.separator();

    file_row(ui, state, FileSlot::MentalDisorders);
    file_row(ui, state, FileSlot::SubstanceUse);
    ui.add_space(8.0);

    let busy = matches!(state.state, UiState::Loading);
    let button_text = if busy { "⏳ Processing..." } else { "📈 Analyze Data" };
    if ui.add_enabled(!busy, egui::Button::new(button_text)).clicked() {
        state.on_submit();
    }

    if busy {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Analyzing your data, this may take a moment...");
        });
    }

    if let UiState::Error(message) = &state.state {
        ui.add_space(8.0);
        egui::Frame::group(ui.style())
            .fill(Color32::from_rgb(60, 20, 20))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(Color32::from_rgb(255, 120, 120), "⚠");
                    ui.colored_label(Color32::from_rgb(255, 120, 120), message);
                });
            });
    }
}

/// One row of the form: label, picker button, and the current selection.
fn file_row(ui: &mut egui::Ui, state: &mut AppState, slot: FileSlot) {
    ui.horizontal(|ui| {
        ui.label(format!("{}:", slot.label()));
        if ui.button("Select CSV file...").clicked() {
            pick_file(state, slot);
        }
        match state.slot(slot) {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                ui.label(egui::RichText::new(name).strong());
            }
            None => {
                ui.label(egui::RichText::new("no file selected").weak());
            }
        }
    });
}

/// Open a native file picker for the given slot and validate the selection.
///
/// Acceptance clears any displayed error; rejection clears the slot and
/// surfaces the validation message.
fn pick_file(state: &mut AppState, slot: FileSlot) {
    let mut dialog = rfd::FileDialog::new().add_filter("CSV files", &["csv"]);
    if let Some(dir) = &state.last_open_dir {
        dialog = dialog.set_directory(dir);
    }
    let Some(file) = dialog.pick_file() else {
        return;
    };

    // Remember directory for next time
    if let Some(parent) = file.parent() {
        state.last_open_dir = Some(parent.to_string_lossy().to_string());
    }

    match validate::validate_file(&file, slot.label()) {
        Ok(()) => {
            state.set_slot(slot, Some(file));
            state.apply_event(UiEvent::ClearError);
        }
        Err(e) => {
            log::debug!("Rejected selection {}: {}", file.display(), e);
            state.set_slot(slot, None);
            state.apply_event(UiEvent::ShowError(e.to_string()));
        }
    }
}
