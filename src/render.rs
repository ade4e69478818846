//! # Result Rendering
//!
//! Pure mapping from an [`AnalysisData`] payload to the display fragments
//! shown in the results panel:
//!
//! - six fixed statistics cards (record count, feature count, mean, std,
//!   min, max of the mental-fitness target)
//! - two model metric panels (training and testing performance)
//! - five visualization panels, each either an inline base64 PNG image or a
//!   fixed slot-specific placeholder
//!
//! Building the view touches no UI state; texture upload happens later in
//! the results panel from the decoded PNG bytes kept on each [`VizImage`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use egui::Color32;

use crate::api::{AnalysisData, MetricSet};

/// One statistics card: icon glyph, accent color, label, formatted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub icon: &'static str,
    pub color: Color32,
}

/// One model metric panel (training or testing) with its three rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricPanel {
    pub title: &'static str,
    pub icon: &'static str,
    pub rows: [(&'static str, String); 3],
}

/// An image ready for display: the data URI it was received as, plus the
/// decoded PNG bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VizImage {
    /// `data:image/png;base64,` + the payload, byte for byte.
    pub uri: String,
    pub png: Vec<u8>,
}

/// One visualization panel: an image when the slot was generated upstream,
/// otherwise a fixed placeholder message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VizPanel {
    pub title: &'static str,
    pub image: Option<VizImage>,
    pub placeholder: &'static str,
}

/// Everything the results panel displays for one completed analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub stat_cards: Vec<StatCard>,
    pub metric_panels: [MetricPanel; 2],
    pub viz_panels: Vec<VizPanel>,
}

/// Build the full results view from an analysis payload.
pub fn build_results_view(data: &AnalysisData) -> ResultsView {
    let stats = &data.statistics;

    let stat_cards = vec![
        StatCard {
            title: "Total Records",
            value: group_thousands(stats.shape.0),
            icon: "🗄",
            color: Color32::from_rgb(13, 110, 253),
        },
        StatCard {
            title: "Features",
            value: stats.shape.1.to_string(),
            icon: "📋",
            color: Color32::from_rgb(13, 202, 240),
        },
        StatCard {
            title: "Mean Mental Fitness",
            value: format_fixed(stats.mean_mental_fitness, 4),
            icon: "📈",
            color: Color32::from_rgb(25, 135, 84),
        },
        StatCard {
            title: "Std Deviation",
            value: format_fixed(stats.std_mental_fitness, 4),
            icon: "📊",
            color: Color32::from_rgb(255, 193, 7),
        },
        StatCard {
            title: "Min Value",
            value: format_fixed(stats.min_mental_fitness, 4),
            icon: "⬇",
            color: Color32::from_rgb(220, 53, 69),
        },
        StatCard {
            title: "Max Value",
            value: format_fixed(stats.max_mental_fitness, 4),
            icon: "⬆",
            color: Color32::from_rgb(108, 117, 125),
        },
    ];

    let metric_panels = [
        metric_panel(
            "Training Performance",
            "🎓",
            ["Training MSE", "Training RMSE", "Training R²"],
            &data.model_metrics.train,
        ),
        metric_panel(
            "Testing Performance",
            "🧪",
            ["Testing MSE", "Testing RMSE", "Testing R²"],
            &data.model_metrics.test,
        ),
    ];

    let viz = &data.visualizations;
    let viz_panels = vec![
        viz_panel(
            "Correlation Heatmap",
            viz.correlation_heatmap.as_deref(),
            "Correlation heatmap could not be generated",
        ),
        viz_panel(
            "Pairwise Relationships",
            viz.pairplot.as_deref(),
            "Pairplot could not be generated",
        ),
        viz_panel(
            "Distribution Analysis",
            viz.distribution_histogram.as_deref(),
            "Distribution analysis could not be generated",
        ),
        viz_panel(
            "Time Series Analysis",
            viz.time_series_analysis.as_deref(),
            "Time series analysis could not be generated",
        ),
        viz_panel(
            "Feature Importance",
            viz.feature_importance.as_deref(),
            "Feature importance analysis could not be generated",
        ),
    ];

    ResultsView {
        stat_cards,
        metric_panels,
        viz_panels,
    }
}

fn metric_panel(title: &'static str, icon: &'static str, labels: [&'static str; 3], metrics: &MetricSet) -> MetricPanel {
    MetricPanel {
        title,
        icon,
        rows: [
            (labels[0], format_fixed(metrics.mse, 6)),
            (labels[1], format_fixed(metrics.rmse, 6)),
            (labels[2], format_fixed(metrics.r2, 6)),
        ],
    }
}

fn viz_panel(title: &'static str, payload: Option<&str>, placeholder: &'static str) -> VizPanel {
    let image = payload.map(|payload| VizImage {
        uri: format!("data:image/png;base64,{}", payload),
        png: BASE64.decode(payload).unwrap_or_default(),
    });
    VizPanel {
        title,
        image,
        placeholder,
    }
}

/// Format a float with a fixed number of decimal places.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Render an integer with comma thousands separators (1234567 -> "1,234,567").
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
