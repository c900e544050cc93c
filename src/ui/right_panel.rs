//! Right panel UI: display settings and state rankings.

use super::colors::{rankings as rank_colors, ui as colors};
use crate::data::{format_grouped, StateRecord};
use crate::map::to_hex;
use crate::state::{AppState, SortOrder, ViewSettings, THEME_COLORS};
use eframe::egui::{self, Align2, Color32, FontId, Margin, Pos2, RichText, ScrollArea, Sense, Stroke, Vec2};
use egui_phosphor::regular as icons;

pub fn render_right_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::right("right_panel")
        .resizable(true)
        .default_width(300.0)
        .min_width(260.0)
        .max_width(380.0)
        .frame(
            egui::Frame::new()
                .fill(colors::BACKGROUND)
                .inner_margin(Margin::symmetric(16, 8)),
        )
        .show(ctx, |ui| {
            card().show(ui, |ui| {
                ui.set_width(ui.available_width());
                render_settings(ui, &mut state.settings);
            });
            ui.add_space(16.0);
            card().inner_margin(Margin::ZERO).show(ui, |ui| {
                render_rankings(ui, state);
            });
        });
}

fn card() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CARD)
        .stroke(Stroke::new(1.0, colors::BORDER_STRONG))
        .corner_radius(24.0)
        .inner_margin(Margin::same(20))
}

fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).size(11.0).strong().color(colors::LABEL));
    ui.add_space(4.0);
}

fn render_settings(ui: &mut egui::Ui, settings: &mut ViewSettings) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(icons::GEAR).size(18.0).color(colors::TEXT));
        ui.label(RichText::new("Display Settings").strong().size(15.0).color(colors::TEXT));
    });
    ui.add_space(12.0);

    section_label(ui, "THEME COLOR");
    ui.horizontal_wrapped(|ui| {
        for theme in THEME_COLORS {
            let (rect, response) = ui.allocate_exact_size(Vec2::splat(32.0), Sense::click());
            let active = settings.theme_color == theme.color;
            let radius = if active || response.hovered() { 16.0 } else { 14.5 };
            let painter = ui.painter();
            painter.circle_filled(rect.center(), radius, theme.color);
            if active {
                painter.circle_stroke(rect.center(), radius + 3.0, Stroke::new(2.0, colors::DIM));
            }
            let response = response.on_hover_text(format!("{} ({})", theme.name, to_hex(theme.color)));
            if response.clicked() {
                settings.theme_color = theme.color;
            }
        }
    });
    ui.add_space(12.0);

    section_label(ui, "VIEW MODE");
    ui.columns(2, |columns| {
        let modes = [
            (false, format!("{} 2D Flat", icons::MAP_TRIFOLD)),
            (true, format!("{} 3D Tilt", icons::CUBE)),
        ];
        for (column, (is_3d, label)) in columns.iter_mut().zip(modes) {
            let width = column.available_width();
            let button = egui::Button::selectable(settings.is_3d == is_3d, label);
            if column.add_sized([width, 32.0], button).clicked() {
                settings.is_3d = is_3d;
            }
        }
    });
    ui.add_space(12.0);

    ui.horizontal(|ui| {
        ui.label(RichText::new("HIGHLIGHT GDP >").size(11.0).strong().color(colors::LABEL));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("${}B", settings.min_gdp))
                    .monospace()
                    .size(12.0)
                    .color(colors::LABEL)
                    .background_color(colors::BORDER),
            );
        });
    });
    let mut min_gdp = settings.min_gdp;
    let slider_width = ui.available_width();
    ui.spacing_mut().slider_width = slider_width;
    let slider = egui::Slider::new(&mut min_gdp, 0.0..=ViewSettings::MAX_MIN_GDP)
        .step_by(ViewSettings::MIN_GDP_STEP)
        .show_value(false);
    if ui.add(slider).changed() {
        settings.set_min_gdp(min_gdp);
    }
    ui.horizontal(|ui| {
        ui.label(RichText::new("$0B").size(10.0).color(colors::DIM));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new("$4.2T").size(10.0).color(colors::DIM));
        });
    });
    ui.add_space(12.0);

    section_label(ui, "SORT LIST BY");
    ui.horizontal(|ui| {
        for order in SortOrder::all() {
            ui.selectable_value(&mut settings.sort_by, *order, order.label());
        }
    });
}

/// Rank number in GDP order, first two letters of the name otherwise.
pub fn rank_label(sort: SortOrder, index: usize, name: &str) -> String {
    match sort {
        SortOrder::Gdp => (index + 1).to_string(),
        SortOrder::Alpha => name.chars().take(2).collect::<String>().to_uppercase(),
    }
}

fn render_rankings(ui: &mut egui::Ui, state: &mut AppState) {
    egui::Frame::new()
        .inner_margin(Margin::same(20))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("State Rankings").strong().size(15.0).color(colors::TEXT));
            ui.label(
                RichText::new(state.settings.sort_by.description())
                    .size(12.0)
                    .color(colors::LABEL),
            );
        });
    ui.separator();

    let sort = state.settings.sort_by;
    let dataset = std::sync::Arc::clone(&state.dataset);
    let mut clicked: Option<String> = None;

    ScrollArea::vertical()
        .max_height((ui.available_height() - 40.0).max(200.0))
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add_space(4.0);
            for (index, record) in dataset.ranked(sort).into_iter().enumerate() {
                let selected = state.selection.contains(&record.name);
                if render_row(ui, sort, index, record, selected) {
                    clicked = Some(record.name.clone());
                }
            }
        });

    if let Some(name) = clicked {
        state.toggle_selection(&name);
    }

    egui::Frame::new()
        .fill(rank_colors::FOOTER)
        .inner_margin(Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Source: Statista 2024 Estimates")
                        .size(10.0)
                        .color(colors::DIM),
                );
            });
        });
}

/// One ranking row; returns whether it was clicked.
fn render_row(
    ui: &mut egui::Ui,
    sort: SortOrder,
    index: usize,
    record: &StateRecord,
    selected: bool,
) -> bool {
    let size = Vec2::new(ui.available_width(), 50.0);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    let painter = ui.painter();

    if selected {
        painter.rect_filled(rect, 12.0, rank_colors::SELECTED);
    } else if response.hovered() {
        painter.rect_filled(rect, 12.0, rank_colors::HOVER);
    }

    let (rank_color, name_color, growth_color, value_color) = if selected {
        (
            rank_colors::RANK_SELECTED,
            Color32::WHITE,
            rank_colors::GROWTH_SELECTED,
            Color32::WHITE,
        )
    } else {
        (colors::FAINT, colors::TEXT, rank_colors::GROWTH, colors::TEXT)
    };

    painter.text(
        Pos2::new(rect.left() + 24.0, rect.center().y),
        Align2::CENTER_CENTER,
        rank_label(sort, index, &record.name),
        FontId::monospace(12.0),
        rank_color,
    );
    painter.text(
        Pos2::new(rect.left() + 48.0, rect.center().y - 8.0),
        Align2::LEFT_CENTER,
        &record.name,
        FontId::proportional(14.0),
        name_color,
    );
    painter.text(
        Pos2::new(rect.left() + 48.0, rect.center().y + 10.0),
        Align2::LEFT_CENTER,
        format!(
            "{} +{:.1}% YoY",
            icons::ARROW_UP_RIGHT,
            record.simulated_growth()
        ),
        FontId::proportional(10.0),
        growth_color,
    );
    painter.text(
        Pos2::new(rect.right() - 12.0, rect.center().y),
        Align2::RIGHT_CENTER,
        format!("${}", format_grouped(record.gdp)),
        FontId::proportional(14.0),
        value_color,
    );

    response.clicked()
}
