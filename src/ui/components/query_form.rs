//! Query form component
//!
//! Question editor with clear button, microphone toggle, and submit
//! control. While listening, the editor shows the committed question plus
//! the live interim transcript; edits are applied back to the committed
//! question only.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};

/// Input form for composing and submitting a question
pub struct QueryForm<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> QueryForm<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                self.show_editor(ui);
                ui.add_space(self.theme.spacing_sm);
                ui.horizontal(|ui| {
                    self.show_voice_controls(ui);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        self.show_submit_button(ui);
                        self.show_clear_button(ui);
                    });
                });
            });
    }

    fn show_editor(&mut self, ui: &mut egui::Ui) {
        let is_listening = self.state.speech.is_listening();
        let is_loading = self.state.is_loading();

        // While interim text is visible the editor is read-only; otherwise a
        // keystroke would silently commit the provisional transcript.
        let mut display = self.state.display_question();
        let editable = !is_listening && !is_loading;

        let editor = egui::TextEdit::multiline(&mut display)
            .hint_text("Ask a complex question about agriculture and climate patterns... or use the microphone to speak your question")
            .desired_rows(4)
            .desired_width(f32::INFINITY)
            .font(egui::TextStyle::Body)
            .id(egui::Id::new("question_input"));

        let response = ui.add_enabled(editable, editor);

        response.widget_info(|| {
            egui::WidgetInfo::text_edit(editable, &display, "Question input")
        });

        if editable && response.changed() {
            self.state.question = display;
        }

        // Ctrl+Enter submits from the editor
        if response.has_focus()
            && ui.input(|i| i.key_pressed(Key::Enter) && i.modifiers.command)
        {
            self.state.submit();
        }
    }

    fn show_voice_controls(&mut self, ui: &mut egui::Ui) {
        if !self.state.speech.is_supported() {
            // No capability, no controls
            return;
        }

        let is_listening = self.state.speech.is_listening();
        let is_loading = self.state.is_loading();

        let (icon, label, color) = if is_listening {
            ("⏹", "Stop", self.theme.listening)
        } else {
            ("🎤", "Speak", self.theme.text_secondary)
        };

        let button = egui::Button::new(
            RichText::new(format!("{} {}", icon, label))
                .size(14.0)
                .color(color),
        )
        .min_size(Vec2::new(90.0, 36.0))
        .rounding(self.theme.button_rounding);

        let button = if is_listening {
            button.fill(self.theme.listening.gamma_multiply(0.2))
        } else {
            button
        };

        let response = ui.add_enabled(!is_loading, button);
        if response.clicked() {
            self.state.toggle_listening();
        }
        response.on_hover_text(if is_listening {
            "Stop listening"
        } else {
            "Start voice input"
        });

        if is_listening {
            // Pulsing listening indicator
            let t = ui.ctx().input(|i| i.time);
            let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;
            ui.label(
                RichText::new("● Listening... speak now")
                    .size(12.0)
                    .color(self.theme.listening.gamma_multiply(0.5 + pulse * 0.5)),
            );
            ui.ctx().request_repaint();
        }
    }

    fn show_clear_button(&mut self, ui: &mut egui::Ui) {
        let has_content = !self.state.display_question().is_empty();

        let button = egui::Button::new(
            RichText::new("✕ Clear").size(14.0).color(if has_content {
                self.theme.text_secondary
            } else {
                self.theme.text_muted
            }),
        )
        .min_size(Vec2::new(80.0, 36.0))
        .rounding(self.theme.button_rounding);

        let response = ui.add_enabled(has_content, button);
        if response.clicked() {
            self.state.clear_question();
        }
        response.on_hover_text("Clear question");
    }

    fn show_submit_button(&mut self, ui: &mut egui::Ui) {
        let is_loading = self.state.is_loading();
        let can_submit = !is_loading && !self.state.question.trim().is_empty();

        let label = if is_loading {
            "Analyzing Data..."
        } else {
            "🔍 Get Insights"
        };

        let button = egui::Button::new(
            RichText::new(label).size(14.0).color(egui::Color32::WHITE),
        )
        .min_size(Vec2::new(140.0, 36.0))
        .rounding(self.theme.button_rounding)
        .fill(if can_submit {
            self.theme.primary
        } else {
            self.theme.text_muted
        });

        let response = ui.add_enabled(can_submit, button);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, can_submit, "Get Insights")
        });

        if response.clicked() {
            self.state.submit();
        }
    }
}
