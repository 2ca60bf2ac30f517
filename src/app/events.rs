//! Event processing from backend

use super::HeckerApp;

impl HeckerApp {
    /// Drain all pending events from the backend into the session.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.session.handle_event(event);
        }
    }
}
