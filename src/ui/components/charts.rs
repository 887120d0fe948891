//! Bar chart component for extracted visualizations
//!
//! Horizontal bars, one per data point, with widths normalized against the
//! largest value in the chart.

use crate::insights::{bar_fraction, Visualization};
use crate::ui::theme::Theme;
use egui::{self, Pos2, Rect, RichText, Sense, Stroke, Vec2};

const BAR_HEIGHT: f32 = 18.0;
const LABEL_WIDTH: f32 = 120.0;

/// Renders one extracted visualization as a labeled bar chart
pub struct BarChart<'a> {
    chart: &'a Visualization,
    theme: &'a Theme,
}

impl<'a> BarChart<'a> {
    pub fn new(chart: &'a Visualization, theme: &'a Theme) -> Self {
        Self { chart, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                match self.chart {
                    Visualization::Rainfall(chart) => {
                        ui.label(
                            RichText::new(format!("🌧 {}", chart.title))
                                .size(15.0)
                                .strong()
                                .color(self.theme.text_primary),
                        );
                        ui.label(
                            RichText::new(&chart.subtitle)
                                .size(12.0)
                                .color(self.theme.text_muted),
                        );
                        ui.add_space(self.theme.spacing_sm);

                        let max = self.chart.max_value();
                        for point in &chart.data {
                            self.draw_bar(
                                ui,
                                &point.label,
                                point.value,
                                "mm",
                                bar_fraction(point.value, max),
                                point.color,
                            );
                        }
                    }
                    Visualization::Crops(chart) => {
                        ui.label(
                            RichText::new(format!("🌾 {}", chart.title))
                                .size(15.0)
                                .strong()
                                .color(self.theme.text_primary),
                        );
                        ui.add_space(self.theme.spacing_sm);

                        let max = self.chart.max_value();
                        for point in &chart.data {
                            self.draw_bar(
                                ui,
                                &point.crop,
                                point.production,
                                "k tonnes",
                                bar_fraction(point.production, max),
                                point.color,
                            );
                        }
                    }
                }
            });
    }

    fn draw_bar(
        &self,
        ui: &mut egui::Ui,
        label: &str,
        value: f32,
        unit: &str,
        fraction: f32,
        color: egui::Color32,
    ) {
        ui.horizontal(|ui| {
            ui.add_sized(
                Vec2::new(LABEL_WIDTH, BAR_HEIGHT),
                egui::Label::new(
                    RichText::new(label)
                        .size(12.0)
                        .color(self.theme.text_secondary),
                )
                .truncate(),
            );

            let desired = Vec2::new(ui.available_width(), BAR_HEIGHT);
            let (rect, _response) = ui.allocate_exact_size(desired, Sense::hover());
            let painter = ui.painter();

            // Track background
            painter.rect_filled(rect, self.theme.button_rounding, self.theme.bg_tertiary);

            // Value bar
            let bar_rect = Rect::from_min_size(
                rect.min,
                Vec2::new(rect.width() * fraction, rect.height()),
            );
            painter.rect_filled(bar_rect, self.theme.button_rounding, color);
            painter.rect_stroke(
                rect,
                self.theme.button_rounding,
                Stroke::new(1.0, self.theme.bg_secondary),
            );

            // Value caption inside the track
            painter.text(
                Pos2::new(rect.right() - 6.0, rect.center().y),
                egui::Align2::RIGHT_CENTER,
                format!("{:.0} {}", value, unit),
                egui::FontId::proportional(11.0),
                self.theme.text_primary,
            );
        });
    }
}
