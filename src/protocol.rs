/// Actions sent from the UI to the Backend
#[derive(Debug, Clone, PartialEq)]
pub enum BackendAction {
    /// Ask the reply endpoint for an answer to `message`
    SendMessage { message: String, session_id: String },
    /// Post a star rating and comment to the feedback endpoint
    SubmitFeedback { rating: u8, comment: String },
}

/// Events sent from the Backend to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum GuiEvent {
    /// The reply endpoint answered
    ReplyReceived {
        text: String,
        /// Server-side display time, when provided
        timestamp: Option<String>,
    },
    /// Network, status or decode failure on the reply request
    ReplyFailed(String),
    /// Feedback was accepted
    FeedbackSubmitted { rating: u8 },
    /// Feedback could not be delivered
    FeedbackFailed(String),
}
