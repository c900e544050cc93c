//! Display settings owned by the application and read by the map.

use eframe::egui::Color32;

/// A named theme color offered in the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColor {
    pub name: &'static str,
    pub color: Color32,
}

/// Theme colors available in the settings panel.
pub const THEME_COLORS: &[ThemeColor] = &[
    ThemeColor {
        name: "Blue",
        color: Color32::from_rgb(0x00, 0x7A, 0xFF),
    },
    ThemeColor {
        name: "Purple",
        color: Color32::from_rgb(0x58, 0x56, 0xD6),
    },
    ThemeColor {
        name: "Pink",
        color: Color32::from_rgb(0xFF, 0x2D, 0x55),
    },
    ThemeColor {
        name: "Teal",
        color: Color32::from_rgb(0x30, 0xB0, 0xC7),
    },
    ThemeColor {
        name: "Orange",
        color: Color32::from_rgb(0xFF, 0x95, 0x00),
    },
    ThemeColor {
        name: "Green",
        color: Color32::from_rgb(0x34, 0xC7, 0x59),
    },
];

/// Ordering of the rankings list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Highest GDP first.
    #[default]
    Gdp,
    /// Alphabetical by state name.
    Alpha,
}

impl SortOrder {
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Gdp => "GDP Value",
            SortOrder::Alpha => "Alphabetical",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SortOrder::Gdp => "Sorted by GDP (High to Low)",
            SortOrder::Alpha => "Alphabetical Order",
        }
    }

    pub fn all() -> &'static [SortOrder] {
        &[SortOrder::Gdp, SortOrder::Alpha]
    }
}

/// View settings chosen in the control panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    /// Color at the top of the GDP scale.
    pub theme_color: Color32,
    /// States below this GDP (billions) are drawn as filtered out.
    pub min_gdp: f64,
    /// Tilt the map card with a perspective transform.
    pub is_3d: bool,
    /// Rankings list order.
    pub sort_by: SortOrder,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            theme_color: THEME_COLORS[0].color,
            min_gdp: 0.0,
            is_3d: true,
            sort_by: SortOrder::default(),
        }
    }
}

impl ViewSettings {
    /// Upper bound of the GDP threshold slider, in billions.
    pub const MAX_MIN_GDP: f64 = 4200.0;
    /// Step of the GDP threshold slider, in billions.
    pub const MIN_GDP_STEP: f64 = 100.0;

    /// Sets the GDP threshold, snapped to the slider step and clamped to its range.
    pub fn set_min_gdp(&mut self, min_gdp: f64) {
        self.min_gdp = if min_gdp.is_finite() {
            ((min_gdp / Self::MIN_GDP_STEP).round() * Self::MIN_GDP_STEP)
                .clamp(0.0, Self::MAX_MIN_GDP)
        } else {
            0.0
        };
    }
}
