//! Message input panel

use eframe::egui;

use crate::app::HeckerApp;

impl HeckerApp {
    /// Render the input panel at the bottom of the window.
    ///
    /// The text box and send button are disabled while a reply is pending.
    pub(in crate::app) fn render_input_panel(&mut self, ctx: &egui::Context) {
        let theme = self.get_theme();
        let enabled = self.session.input_enabled();
        let mut send_requested = false;

        egui::TopBottomPanel::bottom("input_panel")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .stroke(egui::Stroke::new(1.0, theme.border_medium)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let button_width = 72.0;
                    let response = ui.add_enabled(
                        enabled,
                        egui::TextEdit::multiline(&mut self.message_input)
                            .desired_rows(1)
                            .desired_width(ui.available_width() - button_width)
                            .hint_text("Ask Hecker anything... (Enter to send, Shift+Enter for a new line)"),
                    );

                    // Enter without Shift sends; Shift+Enter inserts a newline
                    if response.has_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter) && !i.modifiers.shift)
                    {
                        // The multiline edit has already inserted the newline
                        if self.message_input.ends_with('\n') {
                            self.message_input.pop();
                        }
                        send_requested = true;
                    }

                    let send = ui.add_enabled(enabled, egui::Button::new("Send"));
                    if send.clicked() {
                        send_requested = true;
                    }

                    if send_requested {
                        response.request_focus();
                    }
                });
            });

        if send_requested && enabled {
            self.send_message();
        }
    }
}
