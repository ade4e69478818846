//! Upload module for submitting CSV pairs to the analysis service.
//!
//! The UI never talks HTTP directly: a dedicated worker thread owns the
//! blocking client and serves [`crate::ui::UICommand`] messages, replying
//! with [`crate::ui::UIRefresh`] messages.

pub mod client;
pub mod config;
pub mod task;

pub use client::AnalysisClient;
pub use config::ClientConfig;
pub use task::upload_task;
