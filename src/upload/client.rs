//! HTTP client for the analysis service's upload endpoint.

use reqwest::blocking::Client;
use reqwest::blocking::multipart::Form;
use std::path::Path;

use super::ClientConfig;
use crate::api::AnalysisResponse;

/// Client for submitting a CSV pair to `POST /api/upload`.
pub struct AnalysisClient {
    client: Client,
    config: ClientConfig,
}

impl AnalysisClient {
    /// Create a new AnalysisClient with the given configuration.
    ///
    /// No explicit request timeout is configured; the client's built-in
    /// default applies.
    pub fn new(config: ClientConfig) -> Result<Self, String> {
        let client = Client::builder()
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    /// Upload both CSV files and decode the analysis response.
    ///
    /// # Returns
    /// * `Ok(AnalysisResponse)` whenever the service answered with a JSON
    ///   body, including application failures (`success: false`)
    /// * `Err(String)` with a display-ready "Network error: ..." message for
    ///   any transport failure (file read, connection, body decoding)
    pub fn analyze(&self, file1: &Path, file2: &Path) -> Result<AnalysisResponse, String> {
        let url = format!("{}/api/upload", self.config.server_url);
        log::info!(
            "Uploading {} and {} to {}",
            file1.display(),
            file2.display(),
            url
        );

        let form = Form::new()
            .file("file1", file1)
            .map_err(network_error)?
            .file("file2", file2)
            .map_err(network_error)?;

        let response = self.client.post(&url).multipart(form).send().map_err(network_error)?;

        // Failure responses carry their `error` field in the JSON body (with
        // a 4xx/5xx status), so the status code is not consulted here.
        let result: AnalysisResponse = response.json().map_err(network_error)?;

        if result.success {
            log::info!("Analysis completed successfully");
        } else {
            log::warn!("Service reported an error: {:?}", result.error);
        }
        Ok(result)
    }
}

/// Format a transport-level failure for display in the error channel.
pub fn network_error(error: impl std::fmt::Display) -> String {
    format!("Network error: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_prefix() {
        assert_eq!(network_error("timeout"), "Network error: timeout");
    }
}
