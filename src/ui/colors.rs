//! Centralized color constants for the UI.
//!
//! This module provides consistent colors across all UI panels.

use eframe::egui::Color32;

/// General UI colors for surfaces and text.
pub mod ui {
    use super::Color32;

    /// Page background behind the cards.
    pub const BACKGROUND: Color32 = Color32::from_rgb(0xf5, 0xf5, 0xf7);
    /// Card surface.
    pub const CARD: Color32 = Color32::WHITE;
    /// Card border.
    pub const BORDER: Color32 = Color32::from_rgb(0xf3, 0xf4, 0xf6);
    /// Stronger border for inputs and separators.
    pub const BORDER_STRONG: Color32 = Color32::from_rgb(0xe5, 0xe7, 0xeb);
    /// Headings and values.
    pub const TEXT: Color32 = Color32::from_rgb(0x11, 0x18, 0x27);
    /// Secondary text and section labels.
    pub const LABEL: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);
    /// Footnotes and hints.
    pub const DIM: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);
    /// Very faint text such as rank numbers.
    pub const FAINT: Color32 = Color32::from_rgb(0xd1, 0xd5, 0xdb);
    /// Destructive actions.
    pub const DANGER: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
    /// Icon badge background in the header.
    pub const BADGE: Color32 = Color32::from_rgb(0xef, 0xf6, 0xff);
    /// Icon badge foreground in the header.
    pub const BADGE_ICON: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb);
}

/// Colors for the rankings list.
pub mod rankings {
    use super::Color32;

    /// Selected row background.
    pub const SELECTED: Color32 = Color32::from_rgb(0x11, 0x18, 0x27);
    /// Hovered row background.
    pub const HOVER: Color32 = Color32::from_rgb(0xf3, 0xf4, 0xf6);
    /// Growth figure.
    pub const GROWTH: Color32 = Color32::from_rgb(0x16, 0xa3, 0x4a);
    /// Growth figure on a selected row.
    pub const GROWTH_SELECTED: Color32 = Color32::from_rgb(0x86, 0xef, 0xac);
    /// Rank number on a selected row.
    pub const RANK_SELECTED: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);
    /// Footer strip.
    pub const FOOTER: Color32 = Color32::from_rgb(0xf9, 0xfa, 0xfb);
}

/// Colors for the comparison chart.
pub mod chart {
    use super::Color32;

    /// Dashed horizontal grid lines.
    pub const GRID: Color32 = Color32::from_rgb(0xe5, 0xe7, 0xeb);
    /// Axis tick labels.
    pub const TICK_LABEL: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);
    /// Band highlight under the hovered bar.
    pub const CURSOR: Color32 = Color32::from_rgb(0xf3, 0xf4, 0xf6);
    /// Placeholder background when nothing is selected.
    pub const EMPTY: Color32 = Color32::from_rgb(0xf9, 0xfa, 0xfb);
    /// Placeholder dashed border.
    pub const EMPTY_BORDER: Color32 = Color32::from_rgb(0xd1, 0xd5, 0xdb);
}

/// Colors for the map card.
pub mod map {
    use super::Color32;

    /// Overlay chip background - requires alpha, use function.
    pub fn chip() -> Color32 {
        Color32::from_rgba_unmultiplied(255, 255, 255, 204)
    }

    /// Card shadow in flat mode - requires alpha, use function.
    pub fn shadow_flat() -> Color32 {
        Color32::from_black_alpha(26)
    }

    /// Card shadow in tilt mode - requires alpha, use function.
    pub fn shadow_tilted() -> Color32 {
        Color32::from_black_alpha(64)
    }
}
