//! Wire types for the analysis service's JSON responses.
//!
//! The service answers `POST /api/upload` with an [`AnalysisResponse`]. On
//! success the body carries `success: true` plus the full [`AnalysisData`];
//! on failure the body carries an `error` string and usually omits the
//! `success` field entirely, so `success` defaults to `false` when missing.
//! Unknown fields (the service also sends a `columns` list inside the
//! statistics block) are ignored.

use serde::Deserialize;

/// Top-level response envelope. Exactly one of `data`/`error` is meaningful,
/// gated by `success`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<AnalysisData>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Complete analysis payload for one upload.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisData {
    pub statistics: StatsSummary,
    pub model_metrics: ModelMetrics,
    pub visualizations: VisualizationSet,
}

/// Dataset summary statistics over the mental-fitness target column.
///
/// All fields are required; the service always fills them on a successful
/// analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsSummary {
    /// (row count, column count) of the processed dataset.
    pub shape: (u64, u64),
    pub mean_mental_fitness: f64,
    pub std_mental_fitness: f64,
    pub min_mental_fitness: f64,
    pub max_mental_fitness: f64,
}

/// Regression metrics for the train and test splits.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelMetrics {
    pub train: MetricSet,
    pub test: MetricSet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricSet {
    pub mse: f64,
    pub rmse: f64,
    pub r2: f64,
}

/// The five visualization slots, each an optional base64-encoded PNG.
///
/// The service omits a slot when generating that chart failed, so every
/// field defaults to `None`. A missing slot is a normal outcome, not an
/// error for the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisualizationSet {
    #[serde(default)]
    pub correlation_heatmap: Option<String>,
    #[serde(default)]
    pub pairplot: Option<String>,
    #[serde(default)]
    pub distribution_histogram: Option<String>,
    #[serde(default)]
    pub time_series_analysis: Option<String>,
    #[serde(default)]
    pub feature_importance: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_response() {
        let body = r#"{
            "success": true,
            "data": {
                "statistics": {
                    "shape": [100, 5],
                    "columns": ["Year", "mental_fitness"],
                    "mean_mental_fitness": 0.4999,
                    "std_mental_fitness": 0.1,
                    "min_mental_fitness": 0.0,
                    "max_mental_fitness": 0.9
                },
                "model_metrics": {
                    "train": {"mse": 0.10, "rmse": 0.316, "r2": 0.90},
                    "test": {"mse": 0.12, "rmse": 0.346, "r2": 0.88}
                },
                "visualizations": {
                    "correlation_heatmap": "AAAA",
                    "pairplot": null,
                    "distribution_histogram": "BBBB",
                    "time_series_analysis": null,
                    "feature_importance": "CCCC"
                }
            }
        }"#;

        let response: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert!(response.success);
        assert!(response.error.is_none());

        let data = response.data.unwrap();
        assert_eq!(data.statistics.shape, (100, 5));
        assert_eq!(data.statistics.mean_mental_fitness, 0.4999);
        assert_eq!(data.model_metrics.train.mse, 0.10);
        assert_eq!(data.model_metrics.test.r2, 0.88);
        assert_eq!(data.visualizations.correlation_heatmap.as_deref(), Some("AAAA"));
        assert!(data.visualizations.pairplot.is_none());
        assert!(data.visualizations.time_series_analysis.is_none());
        assert_eq!(data.visualizations.feature_importance.as_deref(), Some("CCCC"));
    }

    #[test]
    fn test_parse_error_response_without_success_field() {
        // Error responses from the service carry only an `error` string.
        let body = r#"{"error": "Only CSV files are allowed"}"#;
        let response: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("Only CSV files are allowed"));
    }

    #[test]
    fn test_parse_failure_response_with_success_false() {
        let body = r#"{"success": false, "error": "Invalid CSV headers"}"#;
        let response: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Invalid CSV headers"));
    }

    #[test]
    fn test_missing_visualization_slots_default_to_none() {
        let body = r#"{"correlation_heatmap": "AAAA"}"#;
        let set: VisualizationSet = serde_json::from_str(body).unwrap();
        assert_eq!(set.correlation_heatmap.as_deref(), Some("AAAA"));
        assert!(set.pairplot.is_none());
        assert!(set.distribution_histogram.is_none());
        assert!(set.time_series_analysis.is_none());
        assert!(set.feature_importance.is_none());
    }
}
