//! Transcript rendering for the central chat panel.

mod format;

use eframe::egui::{self, RichText};

use crate::transcript::{Message, Sender, Transcript};
use crate::ui::theme::HeckerTheme;

/// Render every transcript message as a chat bubble, newest at the bottom.
pub fn render_messages(ui: &mut egui::Ui, transcript: &Transcript, pending: bool, theme: &HeckerTheme) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.add_space(8.0);

            for msg in transcript.messages() {
                render_bubble(ui, msg, theme);
                ui.add_space(6.0);
            }

            if pending {
                ui.horizontal(|ui| {
                    ui.add_space(12.0);
                    ui.spinner();
                    ui.label(RichText::new("Hecker is thinking...").italics().color(theme.text_muted));
                });
            }

            ui.add_space(8.0);
        });
}

fn render_bubble(ui: &mut egui::Ui, msg: &Message, theme: &HeckerTheme) {
    let (fill, layout) = match msg.sender {
        Sender::User => (theme.user_bubble, egui::Layout::right_to_left(egui::Align::TOP)),
        Sender::Assistant => (theme.assistant_bubble, egui::Layout::left_to_right(egui::Align::TOP)),
    };
    let max_width = ui.available_width() * 0.8;

    ui.with_layout(layout, |ui| {
        egui::Frame::new()
            .fill(fill)
            .corner_radius(12.0)
            .inner_margin(egui::Margin::symmetric(14, 10))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.vertical(|ui| {
                    format::render_message_html(ui, &msg.html, theme);
                    ui.label(
                        RichText::new(format!("{} · {}", msg.sender.label(), msg.timestamp))
                            .small()
                            .color(theme.text_muted),
                    );
                });
            });
    });
}
