//! # Results Panel - Statistics, Metrics, and Visualizations
//!
//! Renders a completed [`ResultsView`]: the six statistics cards in a grid,
//! the training/testing metric tables, and the five visualization panels.
//! PNG payloads are decoded into textures once per results view and cached
//! in the order of the panels; a missing slot shows its fixed placeholder.
//!
//! On the first frame after a new result arrives the panel fades in and
//! scrolls itself into view.

use eframe::egui;
use egui::Color32;
use egui_extras::{Column, TableBuilder};

use crate::render::{MetricPanel, ResultsView, StatCard, VizPanel};

/// Render the results panel.
///
/// # Parameters
///
/// * `ui` - Current layout
/// * `view` - The results view built from the latest analysis
/// * `generation` - Results generation counter, keys the entrance fade
/// * `textures` - Texture cache, one entry per visualization panel
/// * `scroll_to_results` - Cleared after the panel scrolls itself into view
pub fn render(
    ui: &mut egui::Ui,
    view: &ResultsView,
    generation: u64,
    textures: &mut Vec<Option<egui::TextureHandle>>,
    scroll_to_results: &mut bool,
) {
    if textures.len() != view.viz_panels.len() {
        *textures = view
            .viz_panels
            .iter()
            .map(|panel| {
                panel
                    .image
                    .as_ref()
                    .and_then(|image| load_png_texture(ui.ctx(), &image.uri, &image.png))
            })
            .collect();
    }

    // Entrance fade, restarted for every new results generation.
    let fade = ui
        .ctx()
        .animate_bool_with_time(egui::Id::new(("results_fade", generation)), true, 0.4);
    ui.multiply_opacity(fade);

    ui.add_space(16.0);
    let heading = ui.heading("Analysis Results");
    if *scroll_to_results {
        heading.scroll_to_me(Some(egui::Align::TOP));
        *scroll_to_results = false;
    }
    ui.separator();

    ui.horizontal_wrapped(|ui| {
        for card in &view.stat_cards {
            stat_card(ui, card);
        }
    });

    ui.add_space(12.0);
    ui.columns(2, |cols| {
        for (col, panel) in cols.iter_mut().zip(&view.metric_panels) {
            metric_table(col, panel);
        }
    });

    ui.add_space(12.0);
    for (panel, texture) in view.viz_panels.iter().zip(textures.iter()) {
        viz_section(ui, panel, texture.as_ref());
    }
}

/// One statistics card: icon and value on a colored background.
fn stat_card(ui: &mut egui::Ui, card: &StatCard) {
    egui::Frame::group(ui.style()).fill(card.color.gamma_multiply(0.25)).show(ui, |ui| {
        ui.set_min_width(140.0);
        ui.vertical_centered(|ui| {
            ui.colored_label(card.color, egui::RichText::new(card.icon).size(22.0));
            ui.label(egui::RichText::new(&card.value).strong().size(18.0));
            ui.label(egui::RichText::new(card.title).weak());
        });
    });
}

/// One metric panel rendered as a striped two-column table.
fn metric_table(ui: &mut egui::Ui, panel: &MetricPanel) {
    ui.heading(format!("{} {}", panel.icon, panel.title));
    ui.add_space(4.0);

    let row_height = ui.text_style_height(&egui::TextStyle::Body) * 1.3;
    TableBuilder::new(ui)
        .id_salt(panel.title)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder())
        .column(Column::auto().at_least(90.0))
        .body(|mut body| {
            for (label, value) in &panel.rows {
                body.row(row_height, |mut row| {
                    row.col(|ui| {
                        ui.label(format!("{}:", label));
                    });
                    row.col(|ui| {
                        ui.label(egui::RichText::new(value).strong().monospace());
                    });
                });
            }
        });
}

/// One visualization section: the decoded image, or the placeholder when the
/// slot was not generated (or its payload could not be decoded).
fn viz_section(ui: &mut egui::Ui, panel: &VizPanel, texture: Option<&egui::TextureHandle>) {
    ui.add_space(8.0);
    ui.heading(panel.title);
    match texture {
        Some(texture) => {
            let size = texture.size_vec2();
            let width = ui.available_width().min(size.x);
            let scaled = egui::vec2(width, width * size.y / size.x.max(1.0));
            ui.add(egui::Image::from_texture((texture.id(), size)).fit_to_exact_size(scaled));
        }
        None => {
            ui.horizontal(|ui| {
                ui.colored_label(Color32::GRAY, "ℹ");
                ui.colored_label(Color32::GRAY, panel.placeholder);
            });
        }
    }
}

/// Decode PNG bytes and upload them as an egui texture.
///
/// The texture is registered under the image's data URI. Returns `None` when
/// decoding fails, in which case the caller falls back to the placeholder.
fn load_png_texture(ctx: &egui::Context, uri: &str, png: &[u8]) -> Option<egui::TextureHandle> {
    match image::load_from_memory(png) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let pixels = rgba.as_flat_samples();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
            Some(ctx.load_texture(uri, color_image, egui::TextureOptions::LINEAR))
        }
        Err(e) => {
            log::error!("Failed to decode visualization image: {}", e);
            None
        }
    }
}
