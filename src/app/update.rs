//! Main update loop and global shortcuts

use eframe::egui;
use std::time::{Duration, Instant};

use super::HeckerApp;
use crate::state::StatusLevel;

impl eframe::App for HeckerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process network events
        self.process_events();

        // Advance the focus timer by real elapsed time
        let now = Instant::now();
        if self.pomodoro.advance(now - self.last_tick) {
            self.session
                .push_status("Pomodoro session complete!".to_string(), StatusLevel::Success);
        }
        self.last_tick = now;

        // Global keyboard shortcuts
        ctx.input(|i| {
            // Ctrl+B: Toggle study panel
            if i.modifiers.ctrl && i.key_pressed(egui::Key::B) {
                self.show_side_panel = !self.show_side_panel;
            }
        });
        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::T)) {
            self.toggle_theme(ctx);
        }

        // Request repaint to keep checking for events
        ctx.request_repaint_after(Duration::from_millis(100));
        // Purge old status messages (toasts) older than 4 seconds
        self.session.purge_old_status_messages(4);

        self.render_top_bar(ctx);

        if self.show_side_panel {
            self.render_side_panel(ctx);
        }

        // Bottom panel: message input
        self.render_input_panel(ctx);

        // Central panel: transcript
        self.render_central_panel(ctx);
    }
}
