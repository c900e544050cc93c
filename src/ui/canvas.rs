//! Central canvas UI: map card and state comparison.

use super::chart::render_comparison_chart;
use super::colors::{map as map_colors, ui as colors};
use crate::map::{card_outline, MapEvent, MapRenderer, Tilt, TiltConfig};
use crate::state::AppState;
use eframe::egui::{self, epaint::Shadow, FontId, Margin, Pos2, Rect, RichText, Shape, Stroke, Vec2};

/// Height of the map card.
const MAP_HEIGHT: f32 = 600.0;
const CARD_RADIUS: f32 = 24.0;
const MAP_CHIP: &str = "Interactive Map \u{2022} Scroll to Zoom \u{2022} Drag to Pan";

/// Renders the map and the comparison chart. Returns the map's selection
/// requests for the caller to apply.
pub fn render_canvas(
    ctx: &egui::Context,
    state: &mut AppState,
    map: &mut MapRenderer,
) -> Vec<MapEvent> {
    let mut events = Vec::new();

    egui::CentralPanel::default()
        .frame(
            egui::Frame::new()
                .fill(colors::BACKGROUND)
                .inner_margin(Margin::symmetric(24, 8)),
        )
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    events = render_map_card(ui, state, map);
                    ui.add_space(24.0);
                    render_comparison_card(ui, state);
                    ui.add_space(16.0);
                });
        });

    events
}

fn render_map_card(ui: &mut egui::Ui, state: &AppState, map: &mut MapRenderer) -> Vec<MapEvent> {
    let tilt = map.tilt(state.settings.is_3d);

    // In 3D the card is painted by hand so it tilts with the map
    let frame = if tilt.is_some() {
        egui::Frame::new()
    } else {
        egui::Frame::new()
            .fill(colors::CARD)
            .stroke(Stroke::new(1.0, colors::BORDER))
            .corner_radius(CARD_RADIUS)
            .shadow(Shadow {
                offset: [0, 4],
                blur: 6,
                spread: 0,
                color: map_colors::shadow_flat(),
            })
    };
    let backdrop = ui.painter().add(Shape::Noop);

    frame
        .show(ui, |ui| {
            let size = Vec2::new(ui.available_width(), MAP_HEIGHT);
            let inner = ui.allocate_ui(size, |ui| {
                ui.set_min_size(size);
                map.show(ui, &state.dataset, &state.settings, &state.selection)
            });
            let rect = inner.response.rect;
            if tilt.is_some() {
                ui.painter().set(backdrop, tilted_card(rect, tilt));
            }
            paint_chip(ui, rect, tilt);
            inner.inner
        })
        .inner
}

/// Card background, border and deep shadow on the tilted plane.
fn tilted_card(rect: Rect, tilt: Option<TiltConfig>) -> Shape {
    let outline = card_outline(rect, CARD_RADIUS, tilt);
    let shadow: Vec<Pos2> = outline.iter().map(|p| *p + Vec2::new(0.0, 25.0)).collect();
    Shape::Vec(vec![
        Shape::convex_polygon(shadow, map_colors::shadow_tilted(), Stroke::NONE),
        Shape::convex_polygon(outline, colors::CARD, Stroke::new(1.0, colors::BORDER)),
    ])
}

/// Hint pill in the top-left corner of the map, on the card's plane.
fn paint_chip(ui: &egui::Ui, map_rect: Rect, tilt: Option<TiltConfig>) {
    let painter = ui.painter();
    let galley = painter.layout_no_wrap(
        MAP_CHIP.to_string(),
        FontId::proportional(12.0),
        colors::LABEL,
    );
    let padding = Vec2::new(16.0, 8.0);
    let chip = Rect::from_min_size(
        map_rect.left_top() + Vec2::splat(16.0),
        galley.size() + padding * 2.0,
    );

    // Tilt about the map's center so the chip sits on the same plane
    let tilt = tilt.map(|config| Tilt::new(config, map_rect.center()));
    let to_plane = |p: Pos2| tilt.map_or(p, |t| t.apply(p));
    let outline: Vec<Pos2> = card_outline(chip, chip.height() / 2.0, None)
        .into_iter()
        .map(&to_plane)
        .collect();
    let text_center = to_plane(chip.center());

    painter.add(Shape::convex_polygon(
        outline,
        map_colors::chip(),
        Stroke::new(1.0, colors::BORDER_STRONG),
    ));
    painter.galley(text_center - galley.size() / 2.0, galley, colors::LABEL);
}

fn render_comparison_card(ui: &mut egui::Ui, state: &mut AppState) {
    egui::Frame::new()
        .fill(colors::CARD)
        .stroke(Stroke::new(1.0, colors::BORDER))
        .corner_radius(CARD_RADIUS)
        .inner_margin(Margin::same(28))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("State Comparison")
                        .strong()
                        .size(20.0)
                        .color(colors::TEXT),
                );
                if !state.selection.is_empty() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let clear = egui::Button::new(
                            RichText::new("Clear Selection").size(13.0).color(colors::DANGER),
                        )
                        .frame(false);
                        if ui.add(clear).clicked() {
                            log::debug!("Cleared {} selected states", state.selection.len());
                            state.selection.clear();
                        }
                    });
                }
            });
            ui.add_space(16.0);

            let records = state.dataset.comparison(state.selection.iter());
            render_comparison_chart(ui, &records, state.settings.theme_color);
        });
}
