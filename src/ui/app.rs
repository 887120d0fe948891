//! Main application struct and eframe integration
//!
//! This module contains the main SamarthApp that implements eframe::App.

use crate::config::AppConfig;
use crate::ui::components::{AnswerPanel, QueryForm, SampleQuestions};
use crate::ui::state::AppState;
use crate::ui::theme::{Theme, ThemePreference};
use egui::{self, CentralPanel, RichText, TopBottomPanel};
use std::time::Instant;
use tracing::info;

/// Storage key for the persisted theme preference
const THEME_STORAGE_KEY: &str = "samarth_theme";

/// Main Samarth application
pub struct SamarthApp {
    /// Application state
    state: AppState,
    /// Visual theme derived from the persisted preference
    theme: Theme,
}

impl SamarthApp {
    /// Create a new Samarth application
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let theme_preference = cc
            .storage
            .and_then(|storage| eframe::get_value::<ThemePreference>(storage, THEME_STORAGE_KEY))
            .unwrap_or_default();

        let theme = theme_preference.theme();
        theme.apply(&cc.egui_ctx);

        let mut state = AppState::new(config);
        state.theme_preference = theme_preference;

        info!("Samarth UI initialized ({:?} theme)", theme_preference);
        Self { state, theme }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.state.theme_preference = self.state.theme_preference.toggled();
        self.theme = self.state.theme_preference.theme();
        self.theme.apply(ctx);
        info!("Theme switched to {:?}", self.state.theme_preference);
    }

    /// Show the top header bar
    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("🌾").size(24.0));
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new("Project Samarth: Intelligent Data Q&A")
                                .size(18.0)
                                .strong()
                                .color(self.theme.text_primary),
                        );
                        ui.label(
                            RichText::new(
                                "Query the Nation's Agriculture & Climate Data (Powered by data.gov.in)",
                            )
                            .size(12.0)
                            .color(self.theme.text_muted),
                        );
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let icon = match self.state.theme_preference {
                            ThemePreference::Light => "🌙",
                            ThemePreference::Dark => "☀",
                        };
                        if ui.button(icon).on_hover_text("Toggle theme").clicked() {
                            self.toggle_theme(ui.ctx());
                        }
                    });
                });
            });
    }

    /// Show the main content area
    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        QueryForm::new(&mut self.state, &self.theme).show(ui);
                        ui.add_space(self.theme.spacing);

                        SampleQuestions::new(&mut self.state, &self.theme).show(ui);
                        ui.add_space(self.theme.spacing);

                        if self.state.is_loading() {
                            self.show_loader(ui);
                        }

                        if self.state.error.is_some() {
                            self.show_error(ui);
                        }

                        if let Some(answer) = self.state.answer.clone() {
                            AnswerPanel::new(&answer, &self.theme).show(ui);
                        }
                    });
            });
    }

    fn show_loader(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new().color(self.theme.primary));
                    ui.vertical(|ui| {
                        for line in [
                            "🔍 Searching agricultural databases...",
                            "📊 Analyzing climate patterns...",
                            "🌱 Generating insights...",
                        ] {
                            ui.label(
                                RichText::new(line)
                                    .size(12.0)
                                    .color(self.theme.text_secondary),
                            );
                        }
                    });
                });
            });
        ui.add_space(self.theme.spacing);
    }

    fn show_error(&mut self, ui: &mut egui::Ui) {
        let mut dismissed = false;
        if let Some(message) = &self.state.error {
            egui::Frame::none()
                .fill(self.theme.error.gamma_multiply(0.15))
                .rounding(self.theme.card_rounding)
                .inner_margin(self.theme.spacing)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("⚠").size(20.0).color(self.theme.error));
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new("Unable to process request")
                                    .strong()
                                    .color(self.theme.text_primary),
                            );
                            ui.label(
                                RichText::new(message)
                                    .size(12.0)
                                    .color(self.theme.text_secondary),
                            );
                            if ui.button("Dismiss").clicked() {
                                dismissed = true;
                            }
                        });
                    });
                });
            ui.add_space(self.theme.spacing);
        }
        if dismissed {
            self.state.dismiss_error();
        }
    }
}

impl eframe::App for SamarthApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain speech and query events before rendering
        self.state.poll_events(Instant::now());

        self.show_header(ctx);
        self.show_content(ctx);

        // Keep polling while anything is in flight
        if self.state.is_loading() || self.state.speech.is_listening() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, THEME_STORAGE_KEY, &self.state.theme_preference);
    }
}
