use chrono::Utc;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

// Default configuration
pub const DEFAULT_REPLY_ENDPOINT: &str = "http://127.0.0.1:5000/generate_response";
pub const DEFAULT_FEEDBACK_ENDPOINT: &str = "http://127.0.0.1:5000/feedback";

/// Environment overrides for the endpoints
pub const REPLY_URL_ENV: &str = "HECKER_REPLY_URL";
pub const FEEDBACK_URL_ENV: &str = "HECKER_FEEDBACK_URL";

/// Presentation theme, stored as "light" or "dark"
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

fn default_reply_endpoint() -> String {
    DEFAULT_REPLY_ENDPOINT.to_string()
}

fn default_feedback_endpoint() -> String {
    DEFAULT_FEEDBACK_ENDPOINT.to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    /// Correlates our requests with the server-side conversation
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_reply_endpoint")]
    pub reply_endpoint: String,
    #[serde(default = "default_feedback_endpoint")]
    pub feedback_endpoint: String,
    /// Append transcript lines to the daily chat log
    #[serde(default = "default_true")]
    pub log_transcript: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_id: None,
            theme: Theme::default(),
            reply_endpoint: default_reply_endpoint(),
            feedback_endpoint: default_feedback_endpoint(),
            log_transcript: true,
        }
    }
}

impl Settings {
    /// Return the session identifier, generating one from the current time if absent.
    ///
    /// Returns `true` in the second slot when a new identifier was created and
    /// the settings need saving.
    pub fn ensure_session_id(&mut self) -> (String, bool) {
        match &self.session_id {
            Some(id) if !id.trim().is_empty() => (id.clone(), false),
            _ => {
                let id = new_session_id();
                self.session_id = Some(id.clone());
                (id, true)
            }
        }
    }

    /// Replace endpoints with values from the environment, when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var(REPLY_URL_ENV).ok(),
            std::env::var(FEEDBACK_URL_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, reply: Option<String>, feedback: Option<String>) {
        if let Some(url) = reply.filter(|u| !u.trim().is_empty()) {
            self.reply_endpoint = url;
        }
        if let Some(url) = feedback.filter(|u| !u.trim().is_empty()) {
            self.feedback_endpoint = url;
        }
    }
}

/// Session identifiers are derived from the creation time in milliseconds.
pub fn new_session_id() -> String {
    format!("session_{}", Utc::now().timestamp_millis())
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "hecker", "hecker-client")
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = project_dirs() {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            tracing::warn!("Failed to create config dir: {}", e);
            return None;
        }
        return Some(dir.join("settings.json"));
    }
    None
}

pub fn load_settings() -> Option<Settings> {
    let path = settings_path()?;
    load_settings_from(&path)
}

pub fn load_settings_from(path: &Path) -> Option<Settings> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!("Ignoring unreadable settings file {}: {}", path.display(), e);
            None
        }
    }
}

pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    if let Some(path) = settings_path() {
        save_settings_to(&path, settings)?;
    }
    Ok(())
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> std::io::Result<()> {
    let data = serde_json::to_string_pretty(settings)?;
    let mut file = fs::File::create(path)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}
