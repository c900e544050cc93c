//! Per-shape fill decisions.
//!
//! Pure functions of the dataset, the settings and the selection. Nothing
//! here depends on geometry or on the painter.

use super::color::{PowerScale, SCALE_START};
use crate::data::Dataset;
use crate::state::{SelectionSet, ViewSettings};
use eframe::egui::Color32;
use std::collections::HashMap;

/// Shapes without a dataset record.
pub const UNKNOWN_FILL: Color32 = Color32::from_rgb(0xe5, 0xe7, 0xeb);
/// Shapes below the GDP threshold.
pub const FILTERED_FILL: Color32 = SCALE_START;
/// Selected shapes.
pub const SELECTED_FILL: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37);

/// Which rule decided a shape's fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    Unknown,
    Filtered,
    Selected,
    Scaled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeFill {
    pub kind: FillKind,
    pub color: Color32,
}

/// Resolves a fill. The first matching rule wins:
/// no record, below threshold, selected, then the scale color.
pub fn resolve_fill(gdp: Option<f64>, min_gdp: f64, selected: bool, scale: &PowerScale) -> ShapeFill {
    let (kind, color) = match gdp {
        None => (FillKind::Unknown, UNKNOWN_FILL),
        Some(gdp) if gdp < min_gdp => (FillKind::Filtered, FILTERED_FILL),
        Some(_) if selected => (FillKind::Selected, SELECTED_FILL),
        Some(gdp) => (FillKind::Scaled, scale.color(gdp)),
    };
    ShapeFill { kind, color }
}

/// Lookup tables for resolving fills of many shapes against one input set.
pub struct FillContext<'a> {
    gdp_by_name: HashMap<&'a str, f64>,
    selection: &'a SelectionSet,
    min_gdp: f64,
    scale: PowerScale,
}

impl<'a> FillContext<'a> {
    pub fn new(
        dataset: &'a Dataset,
        settings: &ViewSettings,
        selection: &'a SelectionSet,
        exponent: f64,
        fallback_max: f64,
    ) -> Self {
        let max = dataset.max_gdp().unwrap_or(fallback_max);
        Self {
            gdp_by_name: dataset
                .records()
                .iter()
                .map(|r| (r.name.as_str(), r.gdp))
                .collect(),
            selection,
            min_gdp: settings.min_gdp,
            scale: PowerScale::new(exponent, max, SCALE_START, settings.theme_color),
        }
    }

    pub fn fill_for(&self, name: &str) -> ShapeFill {
        resolve_fill(
            self.gdp_by_name.get(name).copied(),
            self.min_gdp,
            self.selection.contains(name),
            &self.scale,
        )
    }

    #[cfg(test)]
    pub fn scale(&self) -> &PowerScale {
        &self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StateRecord;

    fn sample() -> Dataset {
        Dataset::new([
            StateRecord::new("California", 3900.0),
            StateRecord::new("Texas", 2400.0),
            StateRecord::new("Vermont", 40.0),
        ])
    }

    fn blue_settings(min_gdp: f64) -> ViewSettings {
        ViewSettings {
            min_gdp,
            ..ViewSettings::default()
        }
    }

    #[test]
    fn test_unfiltered_scenario_orders_saturation() {
        let dataset = sample();
        let selection = SelectionSet::new();
        let settings = blue_settings(0.0);
        let ctx = FillContext::new(&dataset, &settings, &selection, 0.4, 4000.0);

        let ca = ctx.fill_for("California");
        let tx = ctx.fill_for("Texas");
        let vt = ctx.fill_for("Vermont");
        for fill in [ca, tx, vt] {
            assert_eq!(fill.kind, FillKind::Scaled);
        }
        // California is the domain max, so it gets the full theme color
        assert_eq!(ca.color, settings.theme_color);
        let (p_ca, p_tx, p_vt) = (
            ctx.scale().position(3900.0),
            ctx.scale().position(2400.0),
            ctx.scale().position(40.0),
        );
        assert!(p_ca > p_tx && p_tx > p_vt);
        // Red falls toward the blue theme color
        assert!(vt.color.r() > tx.color.r() && tx.color.r() > ca.color.r());
    }

    #[test]
    fn test_threshold_scenario() {
        let dataset = sample();
        let selection = SelectionSet::new();
        let settings = blue_settings(3000.0);
        let ctx = FillContext::new(&dataset, &settings, &selection, 0.4, 4000.0);

        assert_eq!(ctx.fill_for("Texas").kind, FillKind::Filtered);
        assert_eq!(ctx.fill_for("Vermont").color, FILTERED_FILL);
        assert_eq!(ctx.fill_for("California").kind, FillKind::Scaled);
    }

    #[test]
    fn test_filter_wins_even_for_max_and_selected() {
        let dataset = sample();
        let mut selection = SelectionSet::new();
        selection.toggle("California");
        let settings = blue_settings(5000.0);
        let ctx = FillContext::new(&dataset, &settings, &selection, 0.4, 4000.0);

        let ca = ctx.fill_for("California");
        assert_eq!(ca.kind, FillKind::Filtered);
        assert_eq!(ca.color, FILTERED_FILL);
    }

    #[test]
    fn test_selected_overrides_scale() {
        let dataset = sample();
        let mut selection = SelectionSet::new();
        selection.toggle("Vermont");
        let settings = blue_settings(0.0);
        let ctx = FillContext::new(&dataset, &settings, &selection, 0.4, 4000.0);

        assert_eq!(ctx.fill_for("Vermont").kind, FillKind::Selected);
        assert_eq!(ctx.fill_for("Vermont").color, SELECTED_FILL);
        assert_eq!(ctx.fill_for("Texas").kind, FillKind::Scaled);
    }

    #[test]
    fn test_unknown_shape_is_gray() {
        let dataset = sample();
        let mut selection = SelectionSet::new();
        selection.toggle("Puerto Rico");
        let settings = blue_settings(0.0);
        let ctx = FillContext::new(&dataset, &settings, &selection, 0.4, 4000.0);

        let fill = ctx.fill_for("Puerto Rico");
        assert_eq!(fill.kind, FillKind::Unknown);
        assert_eq!(fill.color, UNKNOWN_FILL);
    }

    #[test]
    fn test_empty_dataset_uses_fallback_max() {
        let dataset = Dataset::default();
        let selection = SelectionSet::new();
        let settings = blue_settings(0.0);
        let ctx = FillContext::new(&dataset, &settings, &selection, 0.4, 4000.0);
        assert_eq!(ctx.scale().max(), 4000.0);
        assert_eq!(ctx.fill_for("Ohio").kind, FillKind::Unknown);
    }

    #[test]
    fn test_monotonic_over_real_dataset() {
        let dataset = Dataset::us_2024();
        let selection = SelectionSet::new();
        let settings = blue_settings(0.0);
        let ctx = FillContext::new(&dataset, &settings, &selection, 0.4, 4000.0);

        let mut records: Vec<_> = dataset.records().iter().collect();
        records.sort_by(|a, b| a.gdp.total_cmp(&b.gdp));
        for pair in records.windows(2) {
            if pair[1].gdp > pair[0].gdp {
                assert!(ctx.scale().position(pair[1].gdp) > ctx.scale().position(pair[0].gdp));
                // Blue theme: red channel never rises as GDP rises
                assert!(
                    ctx.fill_for(&pair[1].name).color.r() <= ctx.fill_for(&pair[0].name).color.r()
                );
            }
        }
    }
}
