//! Projected shape data structures.
//!
//! Shapes are projected into drawing space once per boundary load. Each one
//! keeps its outline rings for stroking, a triangulated mesh for filling, and
//! its polygons for hit-testing.

use super::{AlbersUsa, GeoShape};
use earcutr::earcut;
use eframe::egui::{Pos2, Rect};
use geo_types::{Coord, Polygon};

/// One polygon in drawing space.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPolygon {
    pub exterior: Vec<Pos2>,
    pub holes: Vec<Vec<Pos2>>,
}

impl ProjectedPolygon {
    /// Even-odd containment test; points inside a hole are outside.
    pub fn contains(&self, point: Pos2) -> bool {
        ring_contains(&self.exterior, point) && !self.holes.iter().any(|h| ring_contains(h, point))
    }
}

/// A state shape in drawing space.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedShape {
    /// Join key against the dataset
    pub name: String,
    /// Polygons that survived projection clipping
    pub polygons: Vec<ProjectedPolygon>,
    /// Triangle mesh vertices
    pub vertices: Vec<Pos2>,
    /// Triangle mesh indices into `vertices`
    pub indices: Vec<u32>,
    /// Bounding box in drawing space
    pub bounds: Rect,
}

impl ProjectedShape {
    /// Projects a decoded shape. Returns `None` if nothing of it is visible.
    pub fn from_geo(shape: &GeoShape, projection: &AlbersUsa) -> Option<Self> {
        let polygons: Vec<ProjectedPolygon> = shape
            .geometry
            .0
            .iter()
            .filter_map(|polygon| project_polygon(polygon, projection))
            .collect();
        Self::from_polygons(&shape.name, polygons)
    }

    /// Builds a shape from polygons already in drawing space.
    pub fn from_polygons(name: &str, polygons: Vec<ProjectedPolygon>) -> Option<Self> {
        if polygons.is_empty() {
            return None;
        }

        let mut bounds = Rect::NOTHING;
        for polygon in &polygons {
            for p in &polygon.exterior {
                bounds.extend_with(*p);
            }
        }

        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        for polygon in &polygons {
            triangulate(polygon, &mut vertices, &mut indices);
        }

        Some(Self {
            name: name.to_string(),
            polygons,
            vertices,
            indices,
            bounds,
        })
    }

    /// Whether `point` (drawing space) lies inside the shape.
    pub fn contains(&self, point: Pos2) -> bool {
        self.bounds.contains(point) && self.polygons.iter().any(|p| p.contains(point))
    }

    /// Outline rings (exteriors and holes) for stroking.
    pub fn rings(&self) -> impl Iterator<Item = &[Pos2]> {
        self.polygons.iter().flat_map(|p| {
            std::iter::once(p.exterior.as_slice()).chain(p.holes.iter().map(Vec::as_slice))
        })
    }
}

fn project_polygon(polygon: &Polygon<f64>, projection: &AlbersUsa) -> Option<ProjectedPolygon> {
    let exterior = projection.project_ring(open_ring(&polygon.exterior().0))?;
    let holes = polygon
        .interiors()
        .iter()
        .filter_map(|ring| projection.project_ring(open_ring(&ring.0)))
        .collect();
    Some(ProjectedPolygon { exterior, holes })
}

/// Drops the closing duplicate of a closed ring.
fn open_ring(ring: &[Coord<f64>]) -> &[Coord<f64>] {
    match ring {
        [first, rest @ .., last] if first == last && !rest.is_empty() => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Appends the triangulation of `polygon` to the mesh buffers.
fn triangulate(polygon: &ProjectedPolygon, vertices: &mut Vec<Pos2>, indices: &mut Vec<u32>) {
    if polygon.exterior.len() < 3 {
        return;
    }

    let mut flat: Vec<f64> = Vec::new();
    let mut hole_indices: Vec<usize> = Vec::new();
    let mut points: Vec<Pos2> = Vec::new();

    for p in &polygon.exterior {
        flat.extend([p.x as f64, p.y as f64]);
        points.push(*p);
    }
    for hole in polygon.holes.iter().filter(|h| h.len() >= 3) {
        hole_indices.push(points.len());
        for p in hole {
            flat.extend([p.x as f64, p.y as f64]);
            points.push(*p);
        }
    }

    let triangles = match earcut(&flat, &hole_indices, 2) {
        Ok(ix) => ix,
        Err(_) => {
            log::warn!("Failed to triangulate polygon with {} points", points.len());
            return;
        }
    };

    let base = vertices.len() as u32;
    vertices.extend(points);
    indices.extend(triangles.into_iter().map(|i| base + i as u32));
}

/// Even-odd ray casting against an open or closed ring.
fn ring_contains(ring: &[Pos2], point: Pos2) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// All projected shapes of one boundary load, in document order.
#[derive(Debug, Clone, Default)]
pub struct ShapeSet {
    shapes: Vec<ProjectedShape>,
}

impl ShapeSet {
    /// Projects decoded shapes, dropping those with nothing visible.
    pub fn project(shapes: &[GeoShape], projection: &AlbersUsa) -> Self {
        let projected: Vec<ProjectedShape> = shapes
            .iter()
            .filter_map(|s| {
                let projected = ProjectedShape::from_geo(s, projection);
                if projected.is_none() {
                    log::debug!("{} lies outside the map layout", s.name);
                }
                projected
            })
            .collect();
        Self { shapes: projected }
    }

    #[cfg(test)]
    pub fn from_shapes(shapes: Vec<ProjectedShape>) -> Self {
        Self { shapes }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn get(&self, index: usize) -> Option<&ProjectedShape> {
        self.shapes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectedShape> {
        self.shapes.iter()
    }

    /// Topmost shape under `point`, scanning `order` from front to back.
    ///
    /// `order` lists shape indices back to front, as drawn.
    pub fn hit_test(&self, point: Pos2, order: &[usize]) -> Option<usize> {
        order
            .iter()
            .rev()
            .copied()
            .find(|&i| self.shapes.get(i).is_some_and(|s| s.contains(point)))
    }
}
