//! Top bar, study side panel, and central transcript panel

use eframe::egui::{self, RichText};

use crate::app::HeckerApp;
use crate::config::Theme;
use crate::state::StatusLevel;
use crate::ui;
use crate::validation::MAX_RATING;

impl HeckerApp {
    /// Title, theme toggle, export, and the latest status toast
    pub(in crate::app) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let theme = self.get_theme();

        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .stroke(egui::Stroke::new(1.0, theme.border_medium)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("🎓 Hecker").heading().color(theme.accent));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let icon = match self.settings.theme {
                            Theme::Dark => "☀",
                            Theme::Light => "🌙",
                        };
                        if ui.button(icon).on_hover_text("Toggle theme (Ctrl+T)").clicked() {
                            self.toggle_theme(ctx);
                        }
                        if ui.button("Export").on_hover_text("Save transcript as HTML").clicked() {
                            self.export_transcript();
                        }
                        if ui
                            .selectable_label(self.show_side_panel, "Study tools")
                            .clicked()
                        {
                            self.show_side_panel = !self.show_side_panel;
                        }

                        if let Some((status, level, _)) = self.session.status_messages.last() {
                            let color = match level {
                                StatusLevel::Info => theme.text_muted,
                                StatusLevel::Success => theme.success,
                                StatusLevel::Error => theme.error,
                            };
                            ui.label(RichText::new(status).color(color));
                        }
                    });
                });
            });
    }

    /// Feedback stars, notebook and focus timer
    pub(in crate::app) fn render_side_panel(&mut self, ctx: &egui::Context) {
        let theme = self.get_theme();

        egui::SidePanel::right("study_panel")
            .resizable(true)
            .default_width(260.0)
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[2])
                    .inner_margin(egui::Margin::same(12)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Focus timer");
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(self.pomodoro.display()).monospace().size(22.0));
                        let label = if self.pomodoro.is_running() { "Restart" } else { "Start" };
                        if ui.button(label).clicked() {
                            self.pomodoro.start();
                        }
                    });

                    ui.separator();
                    ui.heading("Notebook");
                    ui.add(
                        egui::TextEdit::multiline(&mut self.notebook.entry)
                            .desired_rows(4)
                            .hint_text("Jot down what you learned..."),
                    );
                    if ui.button("Save notes").clicked() {
                        self.save_note();
                    }
                    for note in self.notebook.notes().iter().rev() {
                        ui.label(RichText::new(&note.saved_at).small().color(theme.text_muted));
                        ui.label(&note.text);
                    }

                    ui.separator();
                    ui.heading("Feedback");
                    ui.horizontal(|ui| {
                        for star in 1..=MAX_RATING {
                            let color = if self.feedback.is_star_active(star) {
                                theme.star_active
                            } else {
                                theme.text_muted
                            };
                            let button = egui::Button::new(RichText::new("★").size(20.0).color(color))
                                .frame(false);
                            if ui.add(button).clicked() {
                                self.feedback.select_star(star);
                            }
                        }
                    });
                    ui.add(
                        egui::TextEdit::multiline(&mut self.feedback.comment)
                            .desired_rows(2)
                            .hint_text("Tell us how Hecker helped"),
                    );
                    if ui.button("Submit feedback").clicked() {
                        self.submit_feedback();
                    }
                });
            });
    }

    /// Render the central panel with the transcript
    pub(in crate::app) fn render_central_panel(&mut self, ctx: &egui::Context) {
        let theme = self.get_theme();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme.surface[0]).inner_margin(12.0))
            .show(ctx, |ui| {
                ui::render_messages(
                    ui,
                    &self.session.transcript,
                    self.session.is_pending(),
                    &theme,
                );
            });
    }
}
