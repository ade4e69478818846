//! Background worker thread serving upload commands from the UI.
//!
//! Commands arrive over an mpsc channel and are processed one at a time;
//! each one produces exactly one `UploadFinished` reply, successful or not,
//! so the UI always leaves its busy state.

use crate::ui::{UICommand, UIRefresh};
use crate::upload::{AnalysisClient, ClientConfig};
use crate::{UICommandReceiver, UIRefreshSender};

/// Worker loop: runs until the UI side drops either channel.
pub fn upload_task(config: ClientConfig, command_rx: UICommandReceiver, refresh_tx: UIRefreshSender) {
    log::info!("Upload worker started");

    let client = AnalysisClient::new(config);
    if let Err(e) = &client {
        log::error!("{}", e);
    }

    while let Ok(command) = command_rx.recv() {
        match command {
            UICommand::Analyze { file1, file2 } => {
                let result = match &client {
                    Ok(client) => client.analyze(&file1, &file2),
                    Err(e) => Err(e.clone()),
                };
                if refresh_tx.send(UIRefresh::UploadFinished(result)).is_err() {
                    break;
                }
            }
        }
    }

    log::info!("Upload worker shutting down");
}
