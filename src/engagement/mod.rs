//! Study aids shown beside the chat: feedback stars, notebook, focus timer.

pub mod feedback;
pub mod notebook;
pub mod pomodoro;

pub use feedback::FeedbackForm;
pub use notebook::{Note, Notebook};
pub use pomodoro::PomodoroTimer;
