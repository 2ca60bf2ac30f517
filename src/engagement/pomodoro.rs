use std::time::Duration;

/// Length of one focus session
pub const POMODORO_LENGTH: Duration = Duration::from_secs(25 * 60);

/// Countdown timer for focused study sessions.
///
/// Time is fed in by the caller through `advance`, which keeps the timer
/// independent of the frame loop.
#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    remaining: Duration,
    running: bool,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PomodoroTimer {
    pub fn new() -> Self {
        Self {
            remaining: POMODORO_LENGTH,
            running: false,
        }
    }

    /// Start (or restart) a full session.
    pub fn start(&mut self) {
        self.remaining = POMODORO_LENGTH;
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Move the countdown forward. Returns `true` exactly once, when the
    /// session reaches zero.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.running = false;
            return true;
        }
        false
    }

    /// Remaining time as `m:ss`.
    pub fn display(&self) -> String {
        // Round partial seconds up so "0:00" only shows once finished
        let secs = self.remaining.as_millis().div_ceil(1000) as u64;
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}
