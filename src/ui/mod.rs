//! UI rendering modules for the Hecker client.
//!
//! - `messages`: transcript bubbles in the central panel
//! - `theme`: color palettes and global styling

pub mod messages;
pub mod theme;

pub use messages::render_messages;
pub use theme::{apply_app_style, HeckerTheme};
