//! Application module structure for HeckerApp
//!
//! - `core`: HeckerApp struct, initialization and user actions
//! - `events`: Event processing from backend
//! - `update`: Main update loop and global shortcuts
//! - `ui::panels`: Top bar, study side panel and central transcript panel
//! - `ui::input`: Message input panel

pub mod core;
pub mod events;
pub mod update;
pub mod ui;

// Re-export HeckerApp for public API
pub use self::core::HeckerApp;
