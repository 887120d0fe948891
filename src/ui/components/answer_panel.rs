//! Answer display component
//!
//! Composes the rendered markup blocks, extracted charts, and the cited
//! source list into one card.

use crate::insights;
use crate::markup::{self, MarkupBlock, MarkupSpan};
use crate::query::Answer;
use crate::ui::components::BarChart;
use crate::ui::theme::Theme;
use egui::{self, RichText};

pub struct AnswerPanel<'a> {
    answer: &'a Answer,
    theme: &'a Theme,
}

impl<'a> AnswerPanel<'a> {
    pub fn new(answer: &'a Answer, theme: &'a Theme) -> Self {
        Self { answer, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("✅ Data-Backed Answer")
                            .size(18.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.label(
                        RichText::new("Generated from trusted sources")
                            .size(11.0)
                            .color(self.theme.text_muted),
                    );
                });
                ui.separator();

                // Recomputed from the answer text on every frame; the
                // blocks and charts are derived views, never stored state.
                let blocks = markup::render(&self.answer.answer);
                for block in &blocks {
                    self.show_block(ui, block);
                }

                let charts = insights::extract(&self.answer.answer);
                if !charts.is_empty() {
                    ui.add_space(self.theme.spacing);
                    for chart in &charts {
                        BarChart::new(chart, self.theme).show(ui);
                        ui.add_space(self.theme.spacing_sm);
                    }
                }

                ui.add_space(self.theme.spacing);
                self.show_sources(ui);
            });
    }

    fn show_block(&self, ui: &mut egui::Ui, block: &MarkupBlock) {
        match block {
            MarkupBlock::Heading { level, spans } => {
                let size = if *level == 2 { 17.0 } else { 15.0 };
                ui.add_space(self.theme.spacing_sm);
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    for span in spans {
                        ui.label(self.span_text(span, size).strong());
                    }
                });
            }
            MarkupBlock::List { items } => {
                for spans in items {
                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing.x = 0.0;
                        ui.label(
                            RichText::new("•  ")
                                .size(13.0)
                                .color(self.theme.text_secondary),
                        );
                        for span in spans {
                            ui.label(self.span_text(span, 13.0));
                        }
                    });
                }
            }
            MarkupBlock::Line { spans } => {
                if spans.is_empty() {
                    // Explicit line break
                    ui.add_space(self.theme.spacing_sm);
                    return;
                }
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    for span in spans {
                        ui.label(self.span_text(span, 13.0));
                    }
                });
            }
        }
    }

    fn span_text(&self, span: &MarkupSpan, size: f32) -> RichText {
        match span {
            MarkupSpan::Text(text) => RichText::new(text)
                .size(size)
                .color(self.theme.text_secondary),
            MarkupSpan::Strong(text) => RichText::new(text)
                .size(size)
                .strong()
                .color(self.theme.text_primary),
            MarkupSpan::Emphasis(text) => RichText::new(text)
                .size(size)
                .italics()
                .color(self.theme.text_secondary),
        }
    }

    fn show_sources(&self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("📚 Sources Cited")
                .size(15.0)
                .strong()
                .color(self.theme.text_primary),
        );
        ui.add_space(self.theme.spacing_sm);

        if self.answer.sources.is_empty() {
            ui.label(
                RichText::new("No specific sources cited for this answer.")
                    .size(12.0)
                    .color(self.theme.text_muted),
            );
            return;
        }

        for source in &self.answer.sources {
            egui::Frame::none()
                .fill(self.theme.bg_tertiary)
                .rounding(self.theme.button_rounding)
                .inner_margin(self.theme.spacing_sm)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(&source.name)
                                .size(13.0)
                                .color(self.theme.text_primary),
                        );
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.hyperlink_to(
                                    RichText::new("View Source ↗").size(12.0),
                                    &source.url,
                                );
                            },
                        );
                    });
                });
            ui.add_space(4.0);
        }
    }
}
