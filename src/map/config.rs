//! Fixed configuration of the map renderer.

use eframe::egui::Vec2;

/// Boundary document with one feature per state.
pub const BOUNDARY_URL: &str = "https://cdn.jsdelivr.net/npm/us-atlas@3/states-10m.json";

/// In-code configuration for [`super::MapRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// URL of the TopoJSON boundary document
    pub boundary_url: String,
    /// Name of the topology object holding the state geometries
    pub object: String,
    /// Size of the drawing space the projection targets
    pub drawing_size: Vec2,
    /// Albers USA projection scale
    pub projection_scale: f64,
    /// Allowed zoom factor range
    pub zoom_extent: (f32, f32),
    /// Exponent of the power color scale
    pub color_exponent: f64,
    /// Domain maximum used when the dataset is empty
    pub fallback_max_gdp: f64,
    /// 3D presentation transform
    pub tilt: TiltConfig,
}

/// Perspective tilt applied in 3D mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltConfig {
    /// Distance from the viewer to the untilted plane, in pixels
    pub perspective: f32,
    /// Rotation about the horizontal axis, in degrees
    pub angle_deg: f32,
    /// Uniform scale applied before rotating
    pub scale: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            perspective: 1200.0,
            angle_deg: 30.0,
            scale: 0.95,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            boundary_url: BOUNDARY_URL.to_string(),
            object: "states".to_string(),
            drawing_size: Vec2::new(960.0, 600.0),
            projection_scale: 1300.0,
            zoom_extent: (1.0, 8.0),
            color_exponent: 0.4,
            fallback_max_gdp: 4000.0,
            tilt: TiltConfig::default(),
        }
    }
}

impl MapConfig {
    /// Projection centered on the drawing space.
    pub fn projection(&self) -> crate::geo::AlbersUsa {
        crate::geo::AlbersUsa::new(
            self.projection_scale,
            (
                self.drawing_size.x as f64 / 2.0,
                self.drawing_size.y as f64 / 2.0,
            ),
        )
    }
}
