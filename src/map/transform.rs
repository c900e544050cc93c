//! Coordinate transforms between drawing space and the screen.
//!
//! Four spaces are involved, innermost first:
//! - drawing space: projection output, `drawing_size` wide
//! - zoomed space: drawing space after the pan/zoom transform
//! - container space: zoomed space fitted into the canvas rect
//! - screen space: container space after the optional 3D tilt
//!
//! Hit-testing always happens in drawing space, so every forward transform
//! has an inverse.

use super::config::TiltConfig;
use eframe::egui::{Pos2, Rect, Vec2};
use std::f32::consts::{FRAC_PI_2, PI};

/// Wheel zoom per point of scroll: each point scales by `2^0.002`.
const WHEEL_ZOOM_RATE: f32 = 0.002;

/// Zoom factor for a wheel scroll of `delta_y` points (positive zooms in).
pub fn wheel_zoom_factor(delta_y: f32) -> f32 {
    2f32.powf(delta_y * WHEEL_ZOOM_RATE)
}

/// Zoom factor for a double-click: in by two, out by two with shift held.
pub fn double_click_zoom_factor(shift: bool) -> f32 {
    if shift {
        0.5
    } else {
        2.0
    }
}

/// Pan/zoom state: `zoomed = k * drawing + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub k: f32,
    pub offset: Vec2,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        offset: Vec2::ZERO,
    };

    pub fn apply(&self, p: Pos2) -> Pos2 {
        (p.to_vec2() * self.k + self.offset).to_pos2()
    }

    pub fn invert(&self, p: Pos2) -> Pos2 {
        ((p.to_vec2() - self.offset) / self.k).to_pos2()
    }

    /// Scales by `factor` keeping `anchor` (zoomed space) fixed.
    ///
    /// The resulting zoom is clamped to `extent`; when already at a bound the
    /// transform is unchanged.
    pub fn zoom_about(&mut self, anchor: Pos2, factor: f32, extent: (f32, f32)) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let new_k = (self.k * factor).clamp(extent.0, extent.1);
        if new_k == self.k {
            return;
        }
        let fixed = self.invert(anchor);
        self.k = new_k;
        self.offset = anchor.to_vec2() - fixed.to_vec2() * new_k;
    }

    /// Translates by `delta` in zoomed space. Panning is unconstrained.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    #[cfg(test)]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Uniform fit of the drawing space into a rect, centered, preserving aspect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub origin: Pos2,
    pub scale: f32,
}

impl ViewBox {
    pub fn fit(drawing_size: Vec2, rect: Rect) -> Self {
        let scale = (rect.width() / drawing_size.x)
            .min(rect.height() / drawing_size.y)
            .max(f32::EPSILON);
        Self {
            origin: rect.center() - drawing_size * scale / 2.0,
            scale,
        }
    }

    pub fn to_container(&self, p: Pos2) -> Pos2 {
        self.origin + p.to_vec2() * self.scale
    }

    pub fn from_container(&self, p: Pos2) -> Pos2 {
        ((p - self.origin) / self.scale).to_pos2()
    }
}

/// Perspective tilt about the horizontal axis through `center`.
///
/// Equivalent to `perspective(d) rotateX(angle) scale(s)`: the top edge
/// recedes and the bottom edge comes forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    center: Pos2,
    perspective: f32,
    sin: f32,
    cos: f32,
    scale: f32,
}

impl Tilt {
    pub fn new(config: TiltConfig, center: Pos2) -> Self {
        let angle = config.angle_deg.to_radians();
        Self {
            center,
            perspective: config.perspective,
            sin: angle.sin(),
            cos: angle.cos(),
            scale: config.scale,
        }
    }

    pub fn apply(&self, p: Pos2) -> Pos2 {
        let x = (p.x - self.center.x) * self.scale;
        let y = (p.y - self.center.y) * self.scale;
        let depth = y * self.sin;
        let f = self.perspective / (self.perspective - depth);
        Pos2::new(self.center.x + x * f, self.center.y + y * self.cos * f)
    }

    /// Inverse of [`Tilt::apply`]; `None` for points beyond the horizon.
    pub fn invert(&self, p: Pos2) -> Option<Pos2> {
        let sx = p.x - self.center.x;
        let sy = p.y - self.center.y;
        let d = self.perspective;
        let denom = d * self.cos + sy * self.sin;
        if denom <= f32::EPSILON {
            return None;
        }
        let y = sy * d / denom;
        let f = d / (d - y * self.sin);
        let x = sx / f;
        Some(Pos2::new(
            self.center.x + x / self.scale,
            self.center.y + y / self.scale,
        ))
    }
}

/// Points along the outline of a rounded `rect`, clockwise from the left end
/// of the top-left corner, each tilted about the rect's center when `tilt`
/// is set. The outline stays convex, so it can be filled directly.
pub fn card_outline(rect: Rect, radius: f32, tilt: Option<TiltConfig>) -> Vec<Pos2> {
    const ARC_STEPS: usize = 6;
    let r = radius.clamp(0.0, rect.width().min(rect.height()) / 2.0);
    let corners = [
        (Pos2::new(rect.left() + r, rect.top() + r), PI),
        (Pos2::new(rect.right() - r, rect.top() + r), 1.5 * PI),
        (Pos2::new(rect.right() - r, rect.bottom() - r), 0.0),
        (Pos2::new(rect.left() + r, rect.bottom() - r), FRAC_PI_2),
    ];
    let tilt = tilt.map(|config| Tilt::new(config, rect.center()));

    corners
        .iter()
        .flat_map(|&(center, start)| {
            (0..=ARC_STEPS).map(move |i| {
                center + r * Vec2::angled(start + FRAC_PI_2 * i as f32 / ARC_STEPS as f32)
            })
        })
        .map(|p| tilt.map_or(p, |t| t.apply(p)))
        .collect()
}

/// Full drawing-to-screen mapping for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub zoom: ZoomTransform,
    pub view: ViewBox,
    pub tilt: Option<Tilt>,
}

impl Presentation {
    pub fn new(zoom: ZoomTransform, drawing_size: Vec2, rect: Rect, tilt: Option<TiltConfig>) -> Self {
        Self {
            zoom,
            view: ViewBox::fit(drawing_size, rect),
            tilt: tilt.map(|config| Tilt::new(config, rect.center())),
        }
    }

    pub fn to_screen(&self, p: Pos2) -> Pos2 {
        let container = self.view.to_container(self.zoom.apply(p));
        match &self.tilt {
            Some(tilt) => tilt.apply(container),
            None => container,
        }
    }

    /// Screen position to zoomed space.
    pub fn screen_to_zoomed(&self, p: Pos2) -> Option<Pos2> {
        let container = match &self.tilt {
            Some(tilt) => tilt.invert(p)?,
            None => p,
        };
        Some(self.view.from_container(container))
    }

    /// Screen position to drawing space, for hit-testing.
    pub fn screen_to_drawing(&self, p: Pos2) -> Option<Pos2> {
        self.screen_to_zoomed(p).map(|z| self.zoom.invert(z))
    }

    /// Screen pixels per drawing unit, ignoring perspective.
    pub fn stroke_scale(&self) -> f32 {
        let tilt_scale = self.tilt.map_or(1.0, |t| t.scale);
        self.zoom.k * self.view.scale * tilt_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-2
    }

    #[test]
    fn test_zoom_about_keeps_anchor_fixed() {
        let mut zoom = ZoomTransform::default();
        let anchor = Pos2::new(300.0, 200.0);
        let before = zoom.invert(anchor);
        zoom.zoom_about(anchor, 2.0, (1.0, 8.0));
        assert_eq!(zoom.k, 2.0);
        assert!(close(zoom.apply(before), anchor));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut zoom = ZoomTransform::default();
        for _ in 0..20 {
            zoom.zoom_about(Pos2::new(480.0, 300.0), 1.5, (1.0, 8.0));
        }
        assert_eq!(zoom.k, 8.0);
        for _ in 0..40 {
            zoom.zoom_about(Pos2::new(10.0, 10.0), 0.5, (1.0, 8.0));
        }
        assert_eq!(zoom.k, 1.0);

        let mut at_min = ZoomTransform::default();
        at_min.zoom_about(Pos2::new(10.0, 10.0), 0.5, (1.0, 8.0));
        assert!(at_min.is_identity());
    }

    #[test]
    fn test_pan_is_unconstrained() {
        let mut zoom = ZoomTransform::default();
        zoom.pan(Vec2::new(5000.0, -5000.0));
        assert_eq!(zoom.apply(Pos2::ZERO), Pos2::new(5000.0, -5000.0));
        zoom.pan(Vec2::new(-5000.0, 5000.0));
        assert!(zoom.is_identity());
    }

    #[test]
    fn test_double_click_steps_about_pointer() {
        let mut zoom = ZoomTransform::default();
        let pointer = Pos2::new(700.0, 150.0);
        let under_pointer = zoom.invert(pointer);

        zoom.zoom_about(pointer, double_click_zoom_factor(false), (1.0, 8.0));
        assert_eq!(zoom.k, 2.0);
        assert!(close(zoom.apply(under_pointer), pointer));

        zoom.zoom_about(pointer, double_click_zoom_factor(false), (1.0, 8.0));
        zoom.zoom_about(pointer, double_click_zoom_factor(false), (1.0, 8.0));
        zoom.zoom_about(pointer, double_click_zoom_factor(false), (1.0, 8.0));
        assert_eq!(zoom.k, 8.0);

        zoom.zoom_about(pointer, double_click_zoom_factor(true), (1.0, 8.0));
        assert_eq!(zoom.k, 4.0);
        assert!(close(zoom.apply(under_pointer), pointer));
    }

    #[test]
    fn test_wheel_zoom_factor_is_base_two() {
        assert_eq!(wheel_zoom_factor(0.0), 1.0);
        assert!((wheel_zoom_factor(500.0) - 2.0).abs() < 1e-4);
        assert!((wheel_zoom_factor(-500.0) - 0.5).abs() < 1e-4);
        // One 50-point notch
        assert!((wheel_zoom_factor(50.0) - 2f32.powf(0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_viewbox_fits_and_centers() {
        let rect = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(480.0, 600.0));
        let view = ViewBox::fit(Vec2::new(960.0, 600.0), rect);
        assert_eq!(view.scale, 0.5);
        assert!(close(view.to_container(Pos2::new(480.0, 300.0)), rect.center()));
        let p = Pos2::new(123.0, 456.0);
        assert!(close(view.from_container(view.to_container(p)), p));
    }

    #[test]
    fn test_flat_card_outline_stays_in_rect() {
        let rect = Rect::from_min_size(Pos2::new(20.0, 40.0), Vec2::new(800.0, 600.0));
        let outline = card_outline(rect, 24.0, None);
        assert_eq!(outline.len(), 28);
        assert!(outline.iter().all(|p| rect.expand(1e-3).contains(*p)));
        // Arcs end on the straight edges
        assert!(close(outline[6], Pos2::new(44.0, 40.0)));
        assert!(close(outline[13], Pos2::new(820.0, 64.0)));
    }

    #[test]
    fn test_tilted_card_matches_map_tilt() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(960.0, 600.0));
        let config = TiltConfig::default();
        let outline = card_outline(rect, 0.0, Some(config));
        let (top_left, top_right) = (outline[0], outline[7]);
        let (bottom_right, bottom_left) = (outline[14], outline[21]);

        // Top recedes, bottom comes forward
        assert!(top_right.x - top_left.x < bottom_right.x - bottom_left.x);

        let tilt = Tilt::new(config, rect.center());
        assert!(close(top_left, tilt.apply(rect.left_top())));
        assert!(close(bottom_right, tilt.apply(rect.right_bottom())));

        // A map painted into the same rect uses the same tilt
        let presentation = Presentation::new(
            ZoomTransform::default(),
            Vec2::new(960.0, 600.0),
            rect,
            Some(config),
        );
        assert!(close(presentation.to_screen(Pos2::new(960.0, 600.0)), bottom_right));
    }

    #[test]
    fn test_tilt_round_trip() {
        let tilt = Tilt::new(TiltConfig::default(), Pos2::new(400.0, 300.0));
        for p in [
            Pos2::new(400.0, 300.0),
            Pos2::new(10.0, 20.0),
            Pos2::new(790.0, 580.0),
            Pos2::new(150.0, 450.0),
        ] {
            let back = tilt.invert(tilt.apply(p)).unwrap();
            assert!(close(back, p), "{:?} -> {:?}", p, back);
        }
    }

    #[test]
    fn test_tilt_recedes_top_edge() {
        let center = Pos2::new(400.0, 300.0);
        let tilt = Tilt::new(TiltConfig::default(), center);
        let top = tilt.apply(Pos2::new(700.0, 0.0));
        let bottom = tilt.apply(Pos2::new(700.0, 600.0));
        // Top edge appears narrower than the bottom edge
        assert!(top.x - center.x < bottom.x - center.x);
        assert!(close(tilt.apply(center), center));
    }

    #[test]
    fn test_presentation_round_trip() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let mut zoom = ZoomTransform::default();
        zoom.zoom_about(Pos2::new(200.0, 100.0), 3.0, (1.0, 8.0));
        zoom.pan(Vec2::new(-40.0, 25.0));

        for tilt in [None, Some(TiltConfig::default())] {
            let presentation = Presentation::new(zoom, Vec2::new(960.0, 600.0), rect, tilt);
            let p = Pos2::new(250.0, 180.0);
            let back = presentation
                .screen_to_drawing(presentation.to_screen(p))
                .unwrap();
            assert!(close(back, p), "{:?} -> {:?}", p, back);
        }
    }
}
