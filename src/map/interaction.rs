//! Transient pointer interaction: hover, draw order, outlines and tooltip.
//!
//! This state belongs to the renderer and survives layer rebuilds, so a
//! theme or filter change never resets zoom or drops the current hover.

use super::transform::ZoomTransform;
use crate::data::{format_currency, StateRecord};
use eframe::egui::{Color32, Pos2};

/// Outline width of idle shapes, in drawing units.
pub const DEFAULT_STROKE_WIDTH: f32 = 0.5;
/// Outline width of the hovered shape, in drawing units.
pub const HOVER_STROKE_WIDTH: f32 = 2.0;

/// Tooltip following the pointer while a shape is hovered.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Pointer position in screen space
    pub pos: Pos2,
    pub content: String,
}

/// Tooltip text for a shape: `"<name>: <currency>"`, or `N/A` without a record.
pub fn tooltip_text(name: &str, record: Option<&StateRecord>) -> String {
    match record {
        Some(r) => format!("{}: {}", name, format_currency(r.gdp)),
        None => format!("{}: N/A", name),
    }
}

/// Outline of a shape as drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineStyle {
    /// Width in drawing units; scaled with zoom when painted
    pub width: f32,
    pub color: Color32,
    pub shadow: bool,
}

/// Thin white outline when idle; a thick theme outline with a shadow when
/// hovered, white instead of the theme color if the shape is selected.
pub fn outline_style(hovered: bool, selected: bool, theme: Color32) -> OutlineStyle {
    if hovered {
        OutlineStyle {
            width: HOVER_STROKE_WIDTH,
            color: if selected { Color32::WHITE } else { theme },
            shadow: true,
        }
    } else {
        OutlineStyle {
            width: DEFAULT_STROKE_WIDTH,
            color: Color32::WHITE,
            shadow: false,
        }
    }
}

/// Shape indices back to front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawOrder {
    order: Vec<usize>,
}

impl DrawOrder {
    /// Document order `0..len`.
    pub fn document(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
        }
    }

    /// Moves `index` to the front. Unknown indices are ignored.
    pub fn raise(&mut self, index: usize) {
        if let Some(pos) = self.order.iter().position(|&i| i == index) {
            let i = self.order.remove(pos);
            self.order.push(i);
        }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }
}

/// Hover change produced by a pointer update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition {
    Leave(usize),
    Enter(usize),
    Move(usize),
}

/// Renderer-local interaction store.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub zoom: ZoomTransform,
    pub hover: Option<usize>,
    pub tooltip: Option<Tooltip>,
}

impl InteractionState {
    /// Updates the hovered shape and reports the transitions, leave first.
    pub fn track(&mut self, hit: Option<usize>) -> Vec<HoverTransition> {
        let previous = self.hover;
        self.hover = hit;
        match (previous, hit) {
            (Some(old), Some(new)) if old == new => vec![HoverTransition::Move(new)],
            (Some(old), Some(new)) => vec![HoverTransition::Leave(old), HoverTransition::Enter(new)],
            (Some(old), None) => vec![HoverTransition::Leave(old)],
            (None, Some(new)) => vec![HoverTransition::Enter(new)],
            (None, None) => Vec::new(),
        }
    }

    /// Drops hover and tooltip, keeping the zoom.
    pub fn clear_hover(&mut self) {
        self.hover = None;
        self.tooltip = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_moves_to_front() {
        let mut order = DrawOrder::document(4);
        order.raise(1);
        assert_eq!(order.as_slice(), &[0, 2, 3, 1]);
        order.raise(1);
        assert_eq!(order.as_slice(), &[0, 2, 3, 1]);
        order.raise(9);
        assert_eq!(order.as_slice(), &[0, 2, 3, 1]);
        assert_eq!(order.as_slice().last(), Some(&1));
    }

    #[test]
    fn test_track_transitions() {
        let mut state = InteractionState::default();
        assert!(state.track(None).is_empty());
        assert_eq!(state.track(Some(2)), vec![HoverTransition::Enter(2)]);
        assert_eq!(state.track(Some(2)), vec![HoverTransition::Move(2)]);
        assert_eq!(
            state.track(Some(3)),
            vec![HoverTransition::Leave(2), HoverTransition::Enter(3)]
        );
        assert_eq!(state.track(None), vec![HoverTransition::Leave(3)]);
        assert_eq!(state.hover, None);
    }

    #[test]
    fn test_outline_styles() {
        let theme = Color32::from_rgb(0x00, 0x7a, 0xff);
        let idle = outline_style(false, true, theme);
        assert_eq!(idle.width, DEFAULT_STROKE_WIDTH);
        assert_eq!(idle.color, Color32::WHITE);
        assert!(!idle.shadow);

        let hovered = outline_style(true, false, theme);
        assert_eq!(hovered.width, HOVER_STROKE_WIDTH);
        assert_eq!(hovered.color, theme);
        assert!(hovered.shadow);

        assert_eq!(outline_style(true, true, theme).color, Color32::WHITE);
    }

    #[test]
    fn test_tooltip_text() {
        let record = StateRecord::new("Vermont", 42.0);
        assert_eq!(tooltip_text("Vermont", Some(&record)), "Vermont: $42B");
        assert_eq!(tooltip_text("Guam", None), "Guam: N/A");
    }
}
