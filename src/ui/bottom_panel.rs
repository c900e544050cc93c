//! Bottom panel UI: data disclaimers.

use super::colors::ui as colors;
use eframe::egui::{self, Margin, RichText};
use egui_phosphor::regular as icons;

pub fn render_bottom_panel(ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("bottom_panel")
        .frame(
            egui::Frame::new()
                .fill(colors::BACKGROUND)
                .inner_margin(Margin::symmetric(24, 10)),
        )
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(format!(
                        "{} Data based on current market prices. Projections are estimates.",
                        icons::INFO
                    ))
                    .size(11.0)
                    .color(colors::DIM),
                );
                ui.label(
                    RichText::new("\u{a9} 2025 Financial Visualization Demo. Not official government data.")
                        .size(11.0)
                        .color(colors::DIM),
                );
            });
        });
}
