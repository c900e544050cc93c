//! TopoJSON decoding.
//!
//! Converts the area geometries of one topology object into named
//! multipolygons. Arcs are decoded once up front (delta-decoded and
//! de-quantized when the topology carries a transform) and then stitched into
//! rings, reversing arcs referenced with negative indices.

use super::GeoError;
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A named area feature decoded from a topology.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoShape {
    /// Value of the `name` property; the join key against the dataset.
    pub name: String,
    /// Feature id (a FIPS code in us-atlas), if present.
    pub id: Option<String>,
    /// Boundary in longitude/latitude degrees.
    pub geometry: MultiPolygon<f64>,
}

#[derive(Debug, Deserialize)]
struct Topology {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    transform: Option<Transform>,
    arcs: Vec<Vec<Vec<f64>>>,
    objects: HashMap<String, Value>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum TopoGeometry {
    GeometryCollection {
        geometries: Vec<Value>,
    },
    Polygon {
        arcs: Vec<Vec<i64>>,
        #[serde(default)]
        id: Option<Value>,
        #[serde(default)]
        properties: Option<Map<String, Value>>,
    },
    MultiPolygon {
        arcs: Vec<Vec<Vec<i64>>>,
        #[serde(default)]
        id: Option<Value>,
        #[serde(default)]
        properties: Option<Map<String, Value>>,
    },
    /// Points and lines carry no area and are ignored.
    #[serde(other)]
    Other,
}

/// Decodes every named area geometry of `object` in a TopoJSON document.
///
/// A geometry inside a collection that fails to decode is skipped with a
/// warning; the rest of the collection still loads.
pub fn decode_shapes(json: &str, object: &str) -> Result<Vec<GeoShape>, GeoError> {
    let topology: Topology = serde_json::from_str(json)?;
    if topology.kind != "Topology" {
        return Err(GeoError::Parse(format!(
            "expected type Topology, found {}",
            topology.kind
        )));
    }

    let arcs = decode_arcs(&topology.arcs, topology.transform)?;
    let root = topology
        .objects
        .get(object)
        .ok_or_else(|| GeoError::MissingObject(object.to_string()))?;

    let mut shapes = Vec::new();
    collect_shapes(root, &arcs, &mut shapes)?;
    Ok(shapes)
}

fn collect_shapes(
    value: &Value,
    arcs: &[Vec<Coord<f64>>],
    out: &mut Vec<GeoShape>,
) -> Result<(), GeoError> {
    match TopoGeometry::deserialize(value)? {
        TopoGeometry::GeometryCollection { geometries } => {
            for geometry in &geometries {
                if let Err(e) = collect_shapes(geometry, arcs, out) {
                    log::warn!("Skipping geometry: {}", e);
                }
            }
        }
        TopoGeometry::Polygon {
            arcs: rings,
            id,
            properties,
        } => push_shape(out, id, properties, std::slice::from_ref(&rings), arcs)?,
        TopoGeometry::MultiPolygon {
            arcs: polygons,
            id,
            properties,
        } => push_shape(out, id, properties, &polygons, arcs)?,
        TopoGeometry::Other => {}
    }
    Ok(())
}

fn push_shape(
    out: &mut Vec<GeoShape>,
    id: Option<Value>,
    properties: Option<Map<String, Value>>,
    polygons: &[Vec<Vec<i64>>],
    arcs: &[Vec<Coord<f64>>],
) -> Result<(), GeoError> {
    let Some(name) = properties
        .as_ref()
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
    else {
        log::debug!("Skipping geometry without a name");
        return Ok(());
    };

    let mut decoded = Vec::with_capacity(polygons.len());
    for rings in polygons {
        let mut rings = rings
            .iter()
            .map(|r| stitch_ring(r, arcs))
            .collect::<Result<Vec<_>, _>>()?;
        if rings.is_empty() {
            continue;
        }
        let exterior = rings.remove(0);
        let holes = rings.into_iter().map(LineString::new).collect();
        decoded.push(Polygon::new(LineString::new(exterior), holes));
    }

    out.push(GeoShape {
        name: name.to_string(),
        id: id.and_then(id_string),
        geometry: MultiPolygon::new(decoded),
    });
    Ok(())
}

fn id_string(id: Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Converts raw arcs to absolute coordinates.
fn decode_arcs(
    raw: &[Vec<Vec<f64>>],
    transform: Option<Transform>,
) -> Result<Vec<Vec<Coord<f64>>>, GeoError> {
    raw.iter()
        .map(|arc| {
            // Quantized arcs are delta-encoded from the previous position
            let (mut x, mut y) = (0.0, 0.0);
            arc.iter()
                .map(|position| {
                    let (px, py) = match position.as_slice() {
                        [px, py, ..] => (*px, *py),
                        _ => {
                            return Err(GeoError::Parse(
                                "arc position needs two values".to_string(),
                            ))
                        }
                    };
                    Ok(match transform {
                        Some(t) => {
                            x += px;
                            y += py;
                            Coord {
                                x: x * t.scale[0] + t.translate[0],
                                y: y * t.scale[1] + t.translate[1],
                            }
                        }
                        None => Coord { x: px, y: py },
                    })
                })
                .collect()
        })
        .collect()
}

/// Joins the referenced arcs into one ring.
///
/// Consecutive arcs share an endpoint, so the last point collected so far is
/// dropped before each arc is appended.
fn stitch_ring(indices: &[i64], arcs: &[Vec<Coord<f64>>]) -> Result<Vec<Coord<f64>>, GeoError> {
    let mut points: Vec<Coord<f64>> = Vec::new();
    for &index in indices {
        let (arc_index, reversed) = if index < 0 {
            (!index, true)
        } else {
            (index, false)
        };
        let arc = usize::try_from(arc_index)
            .ok()
            .and_then(|i| arcs.get(i))
            .ok_or(GeoError::InvalidArc(index))?;

        points.pop();
        if reversed {
            points.extend(arc.iter().rev());
        } else {
            points.extend(arc.iter());
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARES: &str = r#"{
        "type": "Topology",
        "arcs": [
            [[0, 0], [1, 0], [1, 1]],
            [[1, 1], [0, 1], [0, 0]]
        ],
        "objects": {
            "states": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "id": "01", "arcs": [[0, 1]], "properties": {"name": "Forward"}},
                    {"type": "Polygon", "id": 2, "arcs": [[-2, -1]], "properties": {"name": "Reversed"}},
                    {"type": "Polygon", "arcs": [[0, 1]]},
                    {"type": "Polygon", "arcs": [[0, 7]], "properties": {"name": "Broken"}},
                    {"type": "Point", "coordinates": [0, 0], "properties": {"name": "Capital"}}
                ]
            }
        }
    }"#;

    fn coords(shape: &GeoShape) -> Vec<(f64, f64)> {
        shape.geometry.0[0]
            .exterior()
            .0
            .iter()
            .map(|c| (c.x, c.y))
            .collect()
    }

    #[test]
    fn test_stitches_forward_arcs() {
        let shapes = decode_shapes(SQUARES, "states").unwrap();
        let forward = shapes.iter().find(|s| s.name == "Forward").unwrap();
        assert_eq!(forward.id.as_deref(), Some("01"));
        assert_eq!(
            coords(forward),
            [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]
        );
    }

    #[test]
    fn test_reversed_arcs() {
        let shapes = decode_shapes(SQUARES, "states").unwrap();
        let reversed = shapes.iter().find(|s| s.name == "Reversed").unwrap();
        assert_eq!(reversed.id.as_deref(), Some("2"));
        assert_eq!(
            coords(reversed),
            [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]
        );
    }

    #[test]
    fn test_skips_unnamed_broken_and_non_area_geometries() {
        let shapes = decode_shapes(SQUARES, "states").unwrap();
        let names: Vec<&str> = shapes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Forward", "Reversed"]);
    }

    #[test]
    fn test_quantized_arcs_are_delta_decoded() {
        let json = r#"{
            "type": "Topology",
            "transform": {"scale": [0.5, 0.25], "translate": [-100, 30]},
            "arcs": [[[0, 0], [2, 0], [0, 2], [-2, 0], [0, -2]]],
            "objects": {
                "states": {"type": "MultiPolygon", "arcs": [[[0]]], "properties": {"name": "Quantized"}}
            }
        }"#;
        let shapes = decode_shapes(json, "states").unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(
            coords(&shapes[0]),
            [
                (-100.0, 30.0),
                (-99.0, 30.0),
                (-99.0, 30.5),
                (-100.0, 30.5),
                (-100.0, 30.0)
            ]
        );
    }

    #[test]
    fn test_holes_follow_exterior() {
        let json = r#"{
            "type": "Topology",
            "arcs": [
                [[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]],
                [[1, 1], [1, 2], [2, 2], [2, 1], [1, 1]]
            ],
            "objects": {
                "states": {"type": "Polygon", "arcs": [[0], [1]], "properties": {"name": "Donut"}}
            }
        }"#;
        let shapes = decode_shapes(json, "states").unwrap();
        let polygon = &shapes[0].geometry.0[0];
        assert_eq!(polygon.interiors().len(), 1);
        assert_eq!(polygon.exterior().0.len(), 5);
    }

    #[test]
    fn test_missing_object() {
        let err = decode_shapes(SQUARES, "counties").unwrap_err();
        assert_eq!(err, GeoError::MissingObject("counties".to_string()));
    }

    #[test]
    fn test_rejects_non_topology() {
        let err = decode_shapes(r#"{"type": "FeatureCollection", "arcs": [], "objects": {}}"#, "states")
            .unwrap_err();
        assert!(matches!(err, GeoError::Parse(_)));

        let err = decode_shapes("not json", "states").unwrap_err();
        assert!(matches!(err, GeoError::Parse(_)));
    }

    #[test]
    fn test_invalid_root_arc_is_an_error() {
        let json = r#"{
            "type": "Topology",
            "arcs": [],
            "objects": {"states": {"type": "Polygon", "arcs": [[3]], "properties": {"name": "X"}}}
        }"#;
        assert_eq!(
            decode_shapes(json, "states").unwrap_err(),
            GeoError::InvalidArc(3)
        );
    }
}
