//! Top bar UI: title and economy summary.

use super::colors::ui as colors;
use crate::data::format_currency;
use crate::state::AppState;
use eframe::egui::{self, Margin, RichText};
use egui_phosphor::regular as icons;

pub fn render_top_bar(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::top("top_bar")
        .frame(
            egui::Frame::new()
                .fill(colors::BACKGROUND)
                .inner_margin(Margin::symmetric(24, 16)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new("US Economy 2024")
                            .strong()
                            .size(30.0)
                            .color(colors::TEXT),
                    );
                    ui.label(
                        RichText::new("Gross Domestic Product by State (in Billions USD)")
                            .size(14.0)
                            .color(colors::LABEL),
                    );
                    if !state.status_message.is_empty() {
                        ui.label(
                            RichText::new(&state.status_message)
                                .size(12.0)
                                .color(colors::DIM),
                        );
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    render_summary(ui, state);
                });
            });
        });
}

fn render_summary(ui: &mut egui::Ui, state: &AppState) {
    let top = state
        .dataset
        .top_contributor()
        .map(|r| r.name.as_str())
        .unwrap_or("-");

    egui::Frame::new()
        .fill(colors::CARD)
        .stroke(egui::Stroke::new(1.0, colors::BORDER))
        .corner_radius(16.0)
        .inner_margin(Margin::symmetric(24, 12))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(icons::TREND_UP)
                        .size(20.0)
                        .color(colors::BADGE_ICON)
                        .background_color(colors::BADGE),
                );
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new("TOTAL US GDP (SUM OF STATES)")
                            .size(11.0)
                            .strong()
                            .color(colors::LABEL),
                    );
                    ui.label(
                        RichText::new(format_currency(state.dataset.total_gdp()))
                            .size(20.0)
                            .strong()
                            .color(colors::TEXT),
                    );
                });

                ui.add_space(12.0);
                ui.separator();
                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.label(
                        RichText::new("TOP CONTRIBUTOR")
                            .size(11.0)
                            .strong()
                            .color(colors::LABEL),
                    );
                    ui.label(RichText::new(top).size(18.0).strong().color(colors::TEXT));
                });
            });
        });
}
