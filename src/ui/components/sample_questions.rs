//! Sample question cards
//!
//! Clickable example questions that fill the editor.

use crate::ui::state::{AppState, SAMPLE_QUESTIONS};
use crate::ui::theme::Theme;
use egui::{self, RichText};

pub struct SampleQuestions<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> SampleQuestions<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("💡 Try these sample questions:")
                    .strong()
                    .color(self.theme.text_primary),
            );
            ui.label(
                RichText::new("Click to use")
                    .size(12.0)
                    .color(self.theme.text_muted),
            );
        });
        ui.add_space(self.theme.spacing_sm);

        for question in SAMPLE_QUESTIONS {
            let card = egui::Frame::none()
                .fill(self.theme.bg_secondary)
                .rounding(self.theme.card_rounding)
                .inner_margin(self.theme.spacing_sm)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        RichText::new(question)
                            .size(12.0)
                            .color(self.theme.text_secondary),
                    );
                });

            let response = card
                .response
                .interact(egui::Sense::click())
                .on_hover_text("Click to use");
            if response.clicked() {
                self.state.question = question.to_string();
            }

            ui.add_space(self.theme.spacing_sm);
        }
    }
}
