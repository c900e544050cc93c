//! Bar chart comparing the selected states.

use super::colors::chart as colors;
use crate::data::{format_currency, StateRecord};
use eframe::egui::{
    self, Align2, Color32, CornerRadius, FontId, Pos2, Rect, Sense, Shape, Stroke, Vec2,
};

const CHART_HEIGHT: f32 = 256.0;
/// Space for y-axis labels
const AXIS_WIDTH: f32 = 56.0;
/// Space for x-axis labels
const LABEL_HEIGHT: f32 = 22.0;
/// Fraction of each category band left empty
const BAND_GAP: f32 = 0.1;

/// Tick values from zero to a rounded-up maximum.
///
/// The step is the smallest of 1, 2, 2.5, 5 or 10 times a power of ten that
/// needs at most four intervals to reach `max`.
pub fn nice_ticks(max: f64) -> Vec<f64> {
    if !max.is_finite() || max <= 0.0 {
        return vec![0.0, 1.0];
    }
    let raw = max / 4.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);
    let count = (max / step).ceil() as usize;
    (0..=count).map(|i| i as f64 * step).collect()
}

/// Bar rects inside `plot`, one per value, with `top` at the upper edge.
pub fn bar_rects(plot: Rect, values: &[f64], top: f64) -> Vec<Rect> {
    if values.is_empty() || top <= 0.0 {
        return Vec::new();
    }
    let band = plot.width() / values.len() as f32;
    let width = band * (1.0 - 2.0 * BAND_GAP);
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let height = (v.max(0.0) / top).min(1.0) as f32 * plot.height();
            let x = plot.left() + band * i as f32 + band * BAND_GAP;
            Rect::from_min_max(
                Pos2::new(x, plot.bottom() - height),
                Pos2::new(x + width, plot.bottom()),
            )
        })
        .collect()
}

/// Renders the chart, or a placeholder when `records` is empty.
pub fn render_comparison_chart(ui: &mut egui::Ui, records: &[&StateRecord], theme: Color32) {
    if records.is_empty() {
        render_empty(ui);
        return;
    }

    let size = Vec2::new(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;

    let plot = Rect::from_min_max(
        Pos2::new(rect.left() + AXIS_WIDTH, rect.top() + 20.0),
        Pos2::new(rect.right() - 30.0, rect.bottom() - LABEL_HEIGHT),
    );

    let max = records.iter().map(|r| r.gdp).fold(0.0, f64::max);
    let ticks = nice_ticks(max);
    let top = ticks.last().copied().unwrap_or(1.0);
    let tick_font = FontId::proportional(12.0);

    // Grid and y-axis labels
    for tick in &ticks {
        let y = plot.bottom() - (*tick / top) as f32 * plot.height();
        painter.extend(Shape::dashed_line(
            &[Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
            Stroke::new(1.0, colors::GRID),
            3.0,
            3.0,
        ));
        painter.text(
            Pos2::new(plot.left() - 8.0, y),
            Align2::RIGHT_CENTER,
            format!("${}", tick),
            tick_font.clone(),
            colors::TICK_LABEL,
        );
    }

    let values: Vec<f64> = records.iter().map(|r| r.gdp).collect();
    let bars = bar_rects(plot, &values, top);
    let band = plot.width() / records.len() as f32;

    let hovered = response.hover_pos().and_then(|p| {
        plot.x_range()
            .contains(p.x)
            .then(|| (((p.x - plot.left()) / band) as usize).min(records.len() - 1))
    });

    if let Some(i) = hovered {
        let cursor = Rect::from_min_max(
            Pos2::new(plot.left() + band * i as f32, plot.top()),
            Pos2::new(plot.left() + band * (i + 1) as f32, plot.bottom()),
        );
        painter.rect_filled(cursor, 0.0, colors::CURSOR);
    }

    for (record, bar) in records.iter().zip(&bars) {
        painter.rect_filled(
            *bar,
            CornerRadius {
                nw: 6,
                ne: 6,
                sw: 0,
                se: 0,
            },
            theme,
        );
        painter.text(
            Pos2::new(bar.center().x, plot.bottom() + 6.0),
            Align2::CENTER_TOP,
            &record.name,
            tick_font.clone(),
            colors::TICK_LABEL,
        );
    }

    if let (Some(i), Some(pointer)) = (hovered, response.hover_pos()) {
        paint_tooltip(&painter, pointer, records[i]);
    }
}

fn render_empty(ui: &mut egui::Ui) {
    let size = Vec2::new(ui.available_width(), CHART_HEIGHT);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 16.0, colors::EMPTY);

    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    painter.extend(Shape::dashed_line(
        &corners,
        Stroke::new(1.0, colors::EMPTY_BORDER),
        4.0,
        4.0,
    ));
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "Select states on the map to compare",
        FontId::proportional(14.0),
        super::colors::ui::DIM,
    );
}

fn paint_tooltip(painter: &egui::Painter, pointer: Pos2, record: &StateRecord) {
    let title = painter.layout_no_wrap(
        record.name.clone(),
        FontId::proportional(14.0),
        super::colors::ui::TEXT,
    );
    let body = painter.layout_no_wrap(
        format!("GDP: {}", format_currency(record.gdp)),
        FontId::proportional(13.0),
        super::colors::ui::LABEL,
    );
    let padding = Vec2::splat(12.0);
    let size = Vec2::new(
        title.size().x.max(body.size().x),
        title.size().y + 4.0 + body.size().y,
    ) + padding * 2.0;
    let bg = Rect::from_min_size(pointer + Vec2::new(12.0, 12.0), size);

    painter.rect(
        bg,
        8.0,
        Color32::from_white_alpha(230),
        Stroke::new(1.0, super::colors::ui::BORDER_STRONG),
        egui::StrokeKind::Inside,
    );
    let title_height = title.size().y;
    painter.galley(bg.min + padding, title, super::colors::ui::TEXT);
    painter.galley(
        bg.min + padding + Vec2::new(0.0, title_height + 4.0),
        body,
        super::colors::ui::LABEL,
    );
}
