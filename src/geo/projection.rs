//! Map projection and coordinate transformation.
//!
//! Implements the composite Albers USA projection: a conic equal-area
//! projection of the lower 48 states with Alaska and Hawaii drawn as
//! rescaled insets in the lower-left corner of the drawing space.

use eframe::egui::{Pos2, Rect};
use geo_types::Coord;
use std::f64::consts::PI;

const EPSILON: f64 = 1e-6;

/// Conic equal-area projection with rotation, centering, scale and translation.
#[derive(Debug, Clone, Copy)]
pub struct ConicEqualArea {
    n: f64,
    c: f64,
    r0: f64,
    /// Longitude rotation in radians
    rotate: f64,
    /// Scale factor (pixels per unit of the raw projection)
    k: f64,
    /// Translation after centering
    dx: f64,
    dy: f64,
}

impl ConicEqualArea {
    /// Creates a projection.
    ///
    /// `parallels` and `center` are in degrees, `rotate` is the longitude
    /// rotation in degrees (96 puts 96°W on the central meridian), and
    /// `translate` is where `center` lands in pixels.
    pub fn new(
        parallels: (f64, f64),
        rotate: f64,
        center: (f64, f64),
        scale: f64,
        translate: (f64, f64),
    ) -> Self {
        let sy0 = parallels.0.to_radians().sin();
        let mut n = (sy0 + parallels.1.to_radians().sin()) / 2.0;
        if n.abs() < EPSILON {
            n = EPSILON.copysign(n);
        }
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let r0 = c.sqrt() / n;

        let mut projection = Self {
            n,
            c,
            r0,
            rotate: rotate.to_radians(),
            k: scale,
            dx: 0.0,
            dy: 0.0,
        };

        // The center is expressed in the rotated frame
        let (cx, cy) = projection.raw(center.0.to_radians(), center.1.to_radians());
        projection.dx = translate.0 - scale * cx;
        projection.dy = translate.1 + scale * cy;
        projection
    }

    fn raw(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let r = (self.c - 2.0 * self.n * phi.sin()).max(0.0).sqrt() / self.n;
        let angle = lambda * self.n;
        (r * angle.sin(), self.r0 - r * angle.cos())
    }

    #[cfg(test)]
    fn raw_invert(&self, x: f64, y: f64) -> (f64, f64) {
        let r0y = self.r0 - y;
        let mut l = x.atan2(r0y.abs()) * r0y.signum();
        if r0y * self.n < 0.0 {
            l -= PI * x.signum() * r0y.signum();
        }
        let sin_phi = (self.c - (x * x + r0y * r0y) * self.n * self.n) / (2.0 * self.n);
        (l / self.n, sin_phi.clamp(-1.0, 1.0).asin())
    }

    /// Projects longitude/latitude degrees to pixels.
    pub fn project(&self, coord: Coord<f64>) -> (f64, f64) {
        let lambda = wrap_longitude(coord.x.to_radians() + self.rotate);
        let (x, y) = self.raw(lambda, coord.y.to_radians());
        (self.dx + self.k * x, self.dy - self.k * y)
    }

    /// Converts pixels back to longitude/latitude degrees.
    #[cfg(test)]
    pub fn invert(&self, x: f64, y: f64) -> Coord<f64> {
        let (lambda, phi) = self.raw_invert((x - self.dx) / self.k, (self.dy - y) / self.k);
        Coord {
            x: wrap_longitude(lambda - self.rotate).to_degrees(),
            y: phi.to_degrees(),
        }
    }
}

fn wrap_longitude(lambda: f64) -> f64 {
    if lambda > PI {
        lambda - 2.0 * PI
    } else if lambda < -PI {
        lambda + 2.0 * PI
    } else {
        lambda
    }
}

/// Which sub-projection of the composite draws a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inset {
    Lower48,
    Alaska,
    Hawaii,
}

impl Inset {
    /// Picks the inset for a geographic coordinate.
    pub fn for_coord(coord: Coord<f64>) -> Self {
        let (lon, lat) = (coord.x, coord.y);
        // Alaska's Aleutians cross the antimeridian
        if lat >= 50.0 && (lon <= -129.0 || lon >= 170.0) {
            Inset::Alaska
        } else if lat < 30.0 && lon <= -150.0 {
            Inset::Hawaii
        } else {
            Inset::Lower48
        }
    }
}

/// Composite Albers USA projection.
#[derive(Debug, Clone)]
pub struct AlbersUsa {
    lower48: ConicEqualArea,
    alaska: ConicEqualArea,
    hawaii: ConicEqualArea,
    lower48_extent: Rect,
    alaska_extent: Rect,
    hawaii_extent: Rect,
}

impl AlbersUsa {
    /// Creates the projection with the given scale, centered on `translate`.
    pub fn new(scale: f64, translate: (f64, f64)) -> Self {
        let k = scale;
        let (x, y) = translate;

        let lower48 = ConicEqualArea::new((29.5, 45.5), 96.0, (-0.6, 38.7), k, (x, y));
        let alaska = ConicEqualArea::new(
            (55.0, 65.0),
            154.0,
            (-2.0, 58.5),
            k * 0.35,
            (x - 0.307 * k, y + 0.201 * k),
        );
        let hawaii = ConicEqualArea::new(
            (8.0, 18.0),
            157.0,
            (-3.0, 19.9),
            k,
            (x - 0.205 * k, y + 0.212 * k),
        );

        let extent = |x0: f64, y0: f64, x1: f64, y1: f64| {
            Rect::from_min_max(
                Pos2::new((x + x0 * k) as f32, (y + y0 * k) as f32),
                Pos2::new((x + x1 * k) as f32, (y + y1 * k) as f32),
            )
        };

        Self {
            lower48,
            alaska,
            hawaii,
            lower48_extent: extent(-0.455, -0.238, 0.455, 0.238),
            alaska_extent: extent(-0.425, 0.120, -0.214, 0.234),
            hawaii_extent: extent(-0.214, 0.166, -0.115, 0.234),
        }
    }

    fn inset(&self, inset: Inset) -> (&ConicEqualArea, Rect) {
        match inset {
            Inset::Lower48 => (&self.lower48, self.lower48_extent),
            Inset::Alaska => (&self.alaska, self.alaska_extent),
            Inset::Hawaii => (&self.hawaii, self.hawaii_extent),
        }
    }

    /// Projects a coordinate with an explicit inset, without clipping.
    pub fn project_with(&self, inset: Inset, coord: Coord<f64>) -> Pos2 {
        let (x, y) = self.inset(inset).0.project(coord);
        Pos2::new(x as f32, y as f32)
    }

    /// Projects a coordinate, or `None` when it falls outside its inset's extent.
    #[cfg(test)]
    pub fn project(&self, coord: Coord<f64>) -> Option<Pos2> {
        let inset = Inset::for_coord(coord);
        let pos = self.project_with(inset, coord);
        self.inset(inset).1.contains(pos).then_some(pos)
    }

    /// Projects a whole ring with the inset of its first coordinate.
    ///
    /// Returns `None` when the ring's mean position lies outside the inset's
    /// extent (territories such as Puerto Rico are not part of the layout).
    pub fn project_ring(&self, ring: &[Coord<f64>]) -> Option<Vec<Pos2>> {
        let first = *ring.first()?;
        let inset = Inset::for_coord(first);
        let points: Vec<Pos2> = ring.iter().map(|c| self.project_with(inset, *c)).collect();

        let sum = points
            .iter()
            .fold((0.0f64, 0.0f64), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
        let mean = Pos2::new(
            (sum.0 / points.len() as f64) as f32,
            (sum.1 / points.len() as f64) as f32,
        );
        self.inset(inset).1.contains(mean).then_some(points)
    }

    /// Converts a drawing-space position back to longitude/latitude.
    #[cfg(test)]
    pub fn invert(&self, pos: Pos2) -> Option<Coord<f64>> {
        let inset = if self.alaska_extent.contains(pos) {
            Inset::Alaska
        } else if self.hawaii_extent.contains(pos) {
            Inset::Hawaii
        } else if self.lower48_extent.contains(pos) {
            Inset::Lower48
        } else {
            return None;
        };
        Some(self.inset(inset).0.invert(pos.x as f64, pos.y as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usa() -> AlbersUsa {
        AlbersUsa::new(1300.0, (480.0, 300.0))
    }

    #[test]
    fn test_center_lands_on_translate() {
        let p = ConicEqualArea::new((29.5, 45.5), 96.0, (-0.6, 38.7), 1300.0, (480.0, 300.0));
        let (x, y) = p.project(Coord { x: -96.6, y: 38.7 });
        assert!((x - 480.0).abs() < 1e-6);
        assert!((y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_orientation_east_and_north() {
        let usa = usa();
        let kansas = usa.project(Coord { x: -98.0, y: 38.5 }).unwrap();
        let new_york = usa.project(Coord { x: -74.0, y: 40.7 }).unwrap();
        let minnesota = usa.project(Coord { x: -94.0, y: 46.0 }).unwrap();
        assert!(new_york.x > kansas.x);
        assert!(minnesota.y < kansas.y);
    }

    #[test]
    fn test_insets_are_selected() {
        assert_eq!(Inset::for_coord(Coord { x: -150.0, y: 61.0 }), Inset::Alaska);
        assert_eq!(Inset::for_coord(Coord { x: 178.0, y: 51.8 }), Inset::Alaska);
        assert_eq!(Inset::for_coord(Coord { x: -157.8, y: 21.3 }), Inset::Hawaii);
        assert_eq!(Inset::for_coord(Coord { x: -122.3, y: 47.6 }), Inset::Lower48);
    }

    #[test]
    fn test_alaska_and_hawaii_land_in_lower_left() {
        let usa = usa();
        let anchorage = usa.project(Coord { x: -149.9, y: 61.2 }).unwrap();
        let honolulu = usa.project(Coord { x: -157.86, y: 21.3 }).unwrap();
        assert!(anchorage.x < 480.0 && anchorage.y > 300.0);
        assert!(honolulu.x < 480.0 && honolulu.y > 300.0);
    }

    #[test]
    fn test_invert_round_trip() {
        let usa = usa();
        for coord in [
            Coord { x: -98.0, y: 38.5 },
            Coord { x: -74.0, y: 40.7 },
            Coord { x: -149.9, y: 61.2 },
            Coord { x: -157.86, y: 21.3 },
        ] {
            let pos = usa.project(coord).unwrap();
            let back = usa.invert(pos).unwrap();
            assert!((back.x - coord.x).abs() < 0.01, "{:?} -> {:?}", coord, back);
            assert!((back.y - coord.y).abs() < 0.01, "{:?} -> {:?}", coord, back);
        }
    }

    #[test]
    fn test_points_outside_layout_are_clipped() {
        let usa = usa();
        // London
        assert!(usa.project(Coord { x: -0.1, y: 51.5 }).is_none());
        assert!(usa.invert(Pos2::new(-500.0, -500.0)).is_none());
    }

    #[test]
    fn test_project_ring_drops_outside_rings() {
        let usa = usa();
        let iowa = [
            Coord { x: -96.0, y: 40.5 },
            Coord { x: -91.0, y: 40.5 },
            Coord { x: -91.0, y: 43.5 },
            Coord { x: -96.0, y: 43.5 },
        ];
        assert_eq!(usa.project_ring(&iowa).map(|r| r.len()), Some(4));

        let far_east = [
            Coord { x: 10.0, y: 40.0 },
            Coord { x: 11.0, y: 40.0 },
            Coord { x: 11.0, y: 41.0 },
        ];
        assert!(usa.project_ring(&far_east).is_none());
        assert!(usa.project_ring(&[]).is_none());
    }
}
