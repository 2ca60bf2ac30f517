//! Backend event loop: owns the Tokio runtime and the HTTP client.

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::time::Duration;
use tokio::runtime::Runtime;

use super::client::ApiClient;
use super::handlers;
use crate::protocol::{BackendAction, GuiEvent};

/// How often the loop checks for new actions from the UI
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Endpoints the backend talks to
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub reply_endpoint: String,
    pub feedback_endpoint: String,
}

/// Run the backend loop until the UI drops its action sender.
///
/// Each action runs as its own task, so a slow reply never delays a feedback
/// post. The UI keeps at most one reply request in flight.
pub fn run_backend(
    action_rx: Receiver<BackendAction>,
    event_tx: Sender<GuiEvent>,
    config: BackendConfig,
) {
    // Create a Tokio runtime for this thread
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {}", e);
            fail_all(&action_rx, &event_tx, format!("Failed to create Tokio runtime: {}", e));
            return;
        }
    };

    let client = match ApiClient::new(&config.reply_endpoint, &config.feedback_endpoint) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Backend disabled: {}", e);
            fail_all(&action_rx, &event_tx, e.to_string());
            return;
        }
    };

    rt.block_on(async move {
        loop {
            // Check for actions from the UI (non-blocking)
            loop {
                match action_rx.try_recv() {
                    Ok(action) => {
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        tokio::spawn(async move {
                            handlers::handle_backend_action(action, &client, &event_tx).await;
                        });
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        tracing::debug!("UI channel closed, stopping backend");
                        return;
                    }
                }
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    });
}

/// Without a working client every action fails immediately, which keeps the
/// UI's one-request-at-a-time contract intact.
fn fail_all(action_rx: &Receiver<BackendAction>, event_tx: &Sender<GuiEvent>, reason: String) {
    while let Ok(action) = action_rx.recv() {
        let event = match action {
            BackendAction::SendMessage { .. } => GuiEvent::ReplyFailed(reason.clone()),
            BackendAction::SubmitFeedback { .. } => GuiEvent::FeedbackFailed(reason.clone()),
        };
        if event_tx.send(event).is_err() {
            break;
        }
    }
}
