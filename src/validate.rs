//! Client-side acceptability checks for the two CSV inputs.
//!
//! Runs synchronously on every file selection, before any network activity.
//! A rejected file is reported through the UI error channel and its slot is
//! cleared by the caller, forcing reselection.

use std::fmt;
use std::path::Path;

/// Maximum accepted upload size: 16 MiB, matching the service's
/// MAX_CONTENT_LENGTH limit.
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Why a selected file was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    WrongExtension,
    TooLarge,
}

/// A rejected file selection, carrying the human-readable label of the
/// input it belongs to ("Mental disorders data" or "Substance use data").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub label: String,
    pub reason: RejectReason,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            RejectReason::WrongExtension => write!(f, "{} must be a CSV file", self.label),
            RejectReason::TooLarge => write!(f, "{} file is too large. Maximum size is 16MB", self.label),
        }
    }
}

/// Check a candidate file by name and size.
///
/// The extension check is case-insensitive and runs before the size check,
/// so a non-CSV file is always reported as a CSV problem even when it is
/// also oversized.
pub fn check(file_name: &str, size_bytes: u64, label: &str) -> Result<(), ValidationError> {
    if !file_name.to_lowercase().ends_with(".csv") {
        return Err(ValidationError {
            label: label.to_string(),
            reason: RejectReason::WrongExtension,
        });
    }

    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ValidationError {
            label: label.to_string(),
            reason: RejectReason::TooLarge,
        });
    }

    Ok(())
}

/// Validate a file on disk by stat-ing it.
///
/// A file that cannot be stat-ed (vanished between the picker and the check)
/// is rejected as oversized so the slot gets cleared and reselected.
pub fn validate_file(path: &Path, label: &str) -> Result<(), ValidationError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let size_bytes = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            log::warn!("Could not stat selected file {}: {}", path.display(), e);
            u64::MAX
        }
    };

    check(&file_name, size_bytes, label)
}
