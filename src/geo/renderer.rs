//! Projected shape rendering.
//!
//! Paints shapes to the egui canvas. Callers supply the mapping from drawing
//! space to screen space so zoom, view-box fitting and tilt stay outside of
//! this module.

use super::ProjectedShape;
use eframe::egui::{epaint::Mesh, Color32, Painter, Pos2, Shape, Stroke};

/// Resolved paint style for one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapePaint {
    pub fill: Color32,
    /// Outline stroke; width is in screen pixels
    pub stroke: Stroke,
    /// Draw a soft shadow around the outline
    pub shadow: bool,
}

/// Halo passes approximating a soft drop shadow: (width, alpha).
const SHADOW_PASSES: [(f32, u8); 3] = [(12.0, 12), (8.0, 18), (4.0, 26)];

/// Renders a single shape: shadow halo, fill, then outline.
pub fn paint_shape(
    painter: &Painter,
    shape: &ProjectedShape,
    paint: ShapePaint,
    to_screen: &impl Fn(Pos2) -> Pos2,
) {
    let rings: Vec<Vec<Pos2>> = shape
        .rings()
        .map(|ring| ring.iter().map(|p| to_screen(*p)).collect())
        .collect();

    if paint.shadow {
        for (width, alpha) in SHADOW_PASSES {
            let color = Color32::from_rgba_unmultiplied(0, 0, 0, alpha);
            for ring in &rings {
                painter.add(Shape::closed_line(ring.clone(), Stroke::new(width, color)));
            }
        }
    }

    if !shape.indices.is_empty() {
        let mut mesh = Mesh::default();
        for v in &shape.vertices {
            mesh.colored_vertex(to_screen(*v), paint.fill);
        }
        mesh.indices = shape.indices.clone();
        painter.add(Shape::mesh(mesh));
    }

    if paint.stroke.width > 0.0 {
        for ring in rings {
            if ring.len() >= 2 {
                painter.add(Shape::closed_line(ring, paint.stroke));
            }
        }
    }
}
