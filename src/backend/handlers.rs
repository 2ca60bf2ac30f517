//! Turns UI actions into HTTP calls and reports the outcome as GUI events.

use crossbeam_channel::Sender;

use super::client::ApiClient;
use crate::protocol::{BackendAction, GuiEvent};

/// Perform one action and send its result event.
pub async fn handle_backend_action(
    action: BackendAction,
    client: &ApiClient,
    event_tx: &Sender<GuiEvent>,
) {
    let event = match action {
        BackendAction::SendMessage {
            message,
            session_id,
        } => {
            tracing::debug!(url = client.reply_url(), "requesting reply");
            match client.generate_reply(&message, &session_id).await {
                Ok(reply) => GuiEvent::ReplyReceived {
                    text: reply.response,
                    timestamp: reply.timestamp,
                },
                Err(e) => {
                    tracing::warn!("Reply request failed: {}", e);
                    GuiEvent::ReplyFailed(e.to_string())
                }
            }
        }

        BackendAction::SubmitFeedback { rating, comment } => {
            match client.submit_feedback(rating, &comment).await {
                Ok(()) => GuiEvent::FeedbackSubmitted { rating },
                Err(e) => {
                    tracing::warn!("Feedback submission failed: {}", e);
                    GuiEvent::FeedbackFailed(e.to_string())
                }
            }
        }
    };

    // If send fails, the UI has gone away - nothing left to report to
    let _ = event_tx.send(event);
}
