//! Core HeckerApp struct definition and initialization

use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use crate::backend::{run_backend, BackendConfig};
use crate::config::{load_settings, project_dirs, save_settings, Settings};
use crate::engagement::{FeedbackForm, Notebook, PomodoroTimer};
use crate::logging::Logger;
use crate::protocol::{BackendAction, GuiEvent};
use crate::state::{ChatSession, StatusLevel};
use crate::ui;

/// First assistant line of every session
pub const WELCOME_MESSAGE: &str = "Welcome to Hecker! What would you like to learn today?";

pub struct HeckerApp {
    // Chat session (transcript, pending request, renderer)
    pub session: ChatSession,

    // Persisted settings (session id, theme, endpoints)
    pub settings: Settings,

    // Channels for backend communication
    pub action_tx: Sender<BackendAction>,
    pub event_rx: Receiver<GuiEvent>,

    // Message composition
    pub message_input: String,

    // Study panels
    pub feedback: FeedbackForm,
    pub notebook: Notebook,
    pub pomodoro: PomodoroTimer,
    pub last_tick: Instant,

    // UI visibility toggles
    pub show_side_panel: bool,
}

impl HeckerApp {
    pub(super) fn get_theme(&self) -> ui::HeckerTheme {
        ui::HeckerTheme::for_theme(self.settings.theme)
    }

    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut settings = load_settings().unwrap_or_default();
        settings.apply_env_overrides();

        let (session_id, created) = settings.ensure_session_id();
        if created {
            tracing::info!(session = %session_id, "Created new session identifier");
            if let Err(e) = save_settings(&settings) {
                tracing::warn!("Failed to save settings: {}", e);
            }
        }

        // Create channels for UI <-> Backend
        let (action_tx, action_rx) = unbounded::<BackendAction>();
        let (event_tx, event_rx) = unbounded::<GuiEvent>();

        // Spawn the backend thread
        let backend_config = BackendConfig {
            reply_endpoint: settings.reply_endpoint.clone(),
            feedback_endpoint: settings.feedback_endpoint.clone(),
        };
        thread::spawn(move || {
            run_backend(action_rx, event_tx, backend_config);
        });

        ui::apply_app_style(&cc.egui_ctx, settings.theme);

        let logger = if settings.log_transcript {
            match Logger::new() {
                Ok(logger) => Some(logger),
                Err(e) => {
                    tracing::warn!("Chat log disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let mut session = ChatSession::new(session_id).with_logger(logger);
        session.append_assistant_text(WELCOME_MESSAGE, None);

        Self {
            session,
            settings,
            action_tx,
            event_rx,
            message_input: String::new(),
            feedback: FeedbackForm::new(),
            notebook: Notebook::new(),
            pomodoro: PomodoroTimer::new(),
            last_tick: Instant::now(),
            show_side_panel: true,
        }
    }

    /// Flip between light and dark and remember the choice.
    pub(super) fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.settings.theme = self.settings.theme.toggled();
        ui::apply_app_style(ctx, self.settings.theme);
        self.session.push_status(
            format!("Switched to {} theme", self.settings.theme.as_str()),
            StatusLevel::Info,
        );
        if let Err(e) = save_settings(&self.settings) {
            tracing::warn!("Failed to save theme preference: {}", e);
        }
    }

    /// Send the composed message if the session accepts it.
    pub(super) fn send_message(&mut self) {
        if let Some(action) = self.session.submit(&self.message_input) {
            self.message_input.clear();
            self.dispatch(action);
        } else if self.message_input.trim().is_empty() {
            self.message_input.clear();
        }
    }

    pub(super) fn submit_feedback(&mut self) {
        match self.feedback.submit() {
            Ok(action) => self.dispatch(action),
            Err(e) => self.session.push_status(e, StatusLevel::Error),
        }
    }

    pub(super) fn save_note(&mut self) {
        if self.notebook.save() {
            self.session
                .push_status("Notes saved!".to_string(), StatusLevel::Success);
        }
    }

    pub(super) fn export_transcript(&mut self) {
        let path = export_path(self.session.session_id());
        match self.session.transcript.export_html(&path, "Hecker transcript") {
            Ok(()) => self.session.push_status(
                format!("Transcript saved to {}", path.display()),
                StatusLevel::Success,
            ),
            Err(e) => self.session.push_status(
                format!("Could not save transcript: {}", e),
                StatusLevel::Error,
            ),
        }
    }

    fn dispatch(&mut self, action: BackendAction) {
        if let Err(e) = self.action_tx.send(action) {
            // Backend thread is gone; report it the way any failed request is reported
            tracing::error!("Backend channel closed");
            let reason = "backend unavailable".to_string();
            let event = match e.into_inner() {
                BackendAction::SendMessage { .. } => GuiEvent::ReplyFailed(reason),
                BackendAction::SubmitFeedback { .. } => GuiEvent::FeedbackFailed(reason),
            };
            self.session.handle_event(event);
        }
    }
}

fn export_path(session_id: &str) -> PathBuf {
    let base = project_dirs()
        .map(|p| p.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("exports").join(format!("{}.html", session_id))
}

impl Drop for HeckerApp {
    fn drop(&mut self) {
        // Persist settings on exit
        if let Err(e) = save_settings(&self.settings) {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }
}
