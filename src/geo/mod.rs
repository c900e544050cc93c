//! Geographic boundary pipeline for the choropleth.
//!
//! This module loads the TopoJSON boundary document, decodes it into named
//! shapes, projects them with the Albers USA projection, and paints them.

mod error;
mod fetch;
mod layer;
mod projection;
mod renderer;
mod topology;

pub use error::GeoError;
pub use fetch::{BoundaryChannel, BoundaryResult};
pub use layer::{ProjectedShape, ShapeSet};
pub use projection::AlbersUsa;
pub use renderer::{paint_shape, ShapePaint};
pub use topology::{decode_shapes, GeoShape};

#[cfg(test)]
pub use layer::ProjectedPolygon;
