//! Core chat session state, separated from UI logic.
//!
//! `ChatSession` owns the transcript, the renderer and the in-flight flag.
//! The UI hands it raw input and backend events; it decides what is appended
//! and which requests go out, so every rule here is testable without a window
//! or a network.

use chrono::Local;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Instant;

use crate::logging::{LogEntry, Logger};
use crate::protocol::{BackendAction, GuiEvent};
use crate::render::{MathTypesetter, MessageRenderer};
use crate::transcript::{Message, Sender, Transcript};
use crate::validation::validate_message;

/// Shown in place of a reply when the request fails
pub const APOLOGIES: [&str; 3] = [
    "I'm sorry, I couldn't reach my thoughts just now. Please try again in a moment.",
    "Something went wrong on my side. Could you send that again?",
    "I'm having trouble connecting right now. Let's try once more shortly.",
];

/// Tone of a status toast, used to pick its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

/// Display format for message times
pub const TIMESTAMP_FORMAT: &str = "%I:%M %p";

pub fn display_time() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// State of one chat session.
pub struct ChatSession {
    pub transcript: Transcript,

    session_id: String,

    /// A reply request is outstanding; input stays disabled until it resolves.
    pending: bool,

    renderer: MessageRenderer,

    /// Optional math typesetting hook, run after each assistant message.
    typesetter: Option<Box<dyn MathTypesetter>>,

    rng: StdRng,

    /// Status toast messages with creation time (auto-expire).
    pub status_messages: Vec<(String, StatusLevel, Instant)>,

    /// Chat logger for persisting messages to disk.
    pub logger: Option<Logger>,
}

impl ChatSession {
    pub fn new(session_id: String) -> Self {
        Self::with_parts(session_id, MessageRenderer::new(), StdRng::from_entropy())
    }

    /// Deterministic session, for tests.
    pub fn seeded(session_id: String, seed: u64) -> Self {
        Self::with_parts(
            session_id,
            MessageRenderer::seeded(seed),
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_parts(session_id: String, renderer: MessageRenderer, rng: StdRng) -> Self {
        Self {
            transcript: Transcript::new(),
            session_id,
            pending: false,
            renderer,
            typesetter: None,
            rng,
            status_messages: Vec::new(),
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Option<Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_typesetter(mut self, typesetter: Box<dyn MathTypesetter>) -> Self {
        self.typesetter = Some(typesetter);
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Input box and send button are usable only while nothing is in flight.
    pub fn input_enabled(&self) -> bool {
        !self.pending
    }

    /// Handle the user pressing send.
    ///
    /// Blank input, or input while a request is outstanding, changes nothing
    /// and returns `None`. Otherwise the user message is appended and the
    /// returned action must be dispatched to the backend.
    pub fn submit(&mut self, raw: &str) -> Option<BackendAction> {
        if self.pending {
            return None;
        }
        let text = match validate_message(raw) {
            Ok(text) => text.to_string(),
            Err(e) => {
                if !raw.trim().is_empty() {
                    self.push_status(e, StatusLevel::Error);
                }
                return None;
            }
        };

        let html = self.renderer.render_user(&text);
        self.append(Message::new(display_time(), Sender::User, text.clone(), html));
        self.pending = true;

        Some(BackendAction::SendMessage {
            message: text,
            session_id: self.session_id.clone(),
        })
    }

    /// Apply one event from the backend.
    pub fn handle_event(&mut self, event: GuiEvent) {
        match event {
            GuiEvent::ReplyReceived { text, timestamp } => {
                self.pending = false;
                if !self.append_assistant_text(&text, timestamp) {
                    tracing::debug!("Empty reply, showing apology instead");
                    self.append_apology();
                }
            }

            GuiEvent::ReplyFailed(reason) => {
                tracing::info!("Reply failed: {}", reason);
                self.pending = false;
                self.append_apology();
            }

            GuiEvent::FeedbackSubmitted { rating } => {
                self.push_status(
                    format!("Thank you for your feedback! Rating: {}/5", rating),
                    StatusLevel::Success,
                );
            }

            GuiEvent::FeedbackFailed(reason) => {
                self.push_status(format!("Feedback not sent: {}", reason), StatusLevel::Error);
            }
        }
    }

    /// Render `text` as an assistant message and append it.
    ///
    /// Returns `false` without appending when the text renders to nothing.
    pub fn append_assistant_text(&mut self, text: &str, timestamp: Option<String>) -> bool {
        let rendered = self.renderer.render(Some(text));
        if rendered.is_empty() {
            return false;
        }

        let message = Message::new(
            timestamp.unwrap_or_else(display_time),
            Sender::Assistant,
            rendered.decorate_text(text),
            rendered.decorated_html(),
        );
        self.append(message);
        self.typeset_last();
        true
    }

    fn append_apology(&mut self) {
        let text = APOLOGIES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(APOLOGIES[0])
            .to_string();
        let html = self.renderer.render_user(&text);
        self.append(Message::new(display_time(), Sender::Assistant, text, html));
    }

    fn append(&mut self, message: Message) {
        if let Some(logger) = &self.logger {
            logger.log(LogEntry {
                session: self.session_id.clone(),
                timestamp: Local::now().format("%H:%M:%S").to_string(),
                sender: message.sender.label().to_string(),
                message: message.text.clone(),
            });
        }
        self.transcript.push(message);
    }

    /// Best effort: typesetting errors are logged and dropped.
    fn typeset_last(&mut self) {
        let (Some(typesetter), Some(last)) = (self.typesetter.as_mut(), self.transcript.last())
        else {
            return;
        };
        if let Err(e) = typesetter.typeset(&last.html) {
            tracing::debug!("Math typesetting failed: {}", e);
        }
    }

    pub fn push_status(&mut self, text: String, level: StatusLevel) {
        self.status_messages.push((text, level, Instant::now()));
    }

    /// Purge status messages older than the given duration.
    pub fn purge_old_status_messages(&mut self, max_age_secs: u64) {
        self.status_messages
            .retain(|(_, _, created)| created.elapsed().as_secs() < max_age_secs);
    }
}
