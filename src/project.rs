//! Equal Earth projection fitted to a target pixel width, plus SVG path
//! generation for shapes, the sphere outline, and the 10° graticule.
//!
//! Equal Earth is the pseudocylindrical, area-preserving projection of
//! Šavrič, Patterson & Jenny (2018). The forward equations are a closed-form
//! polynomial in the parametric latitude θ:
//!
//! ```text
//! θ = asin(M sin φ),  M = √3 / 2
//! x = λ cos θ / (M (A1 + 3 A2 θ² + θ⁶ (7 A3 + 9 A4 θ²)))
//! y = θ (A1 + A2 θ² + θ⁶ (A3 + A4 θ²))
//! ```
//!
//! Fitting is by width only: the sphere's raw horizontal extent is analytic
//! (widest at the equator/antimeridian), so the scale follows from the target
//! width and the canvas height falls out of the projected vertical extent.

use geo::algorithm::centroid::Centroid;
use geo::{Geometry, LineString};
use std::fmt::Write as _;

const A1: f64 = 1.340264;
const A2: f64 = -0.081106;
const A3: f64 = 0.000893;
const A4: f64 = 0.003796;
/// M = √3 / 2
const M: f64 = 0.866_025_403_784_438_6;

/// Raw forward projection. Input in radians, output in projection units,
/// y positive north.
fn equal_earth_raw(lambda: f64, phi: f64) -> (f64, f64) {
    let theta = (M * phi.sin()).asin();
    let t2 = theta * theta;
    let t6 = t2 * t2 * t2;
    let x = lambda * theta.cos() / (M * (A1 + 3.0 * A2 * t2 + t6 * (7.0 * A3 + 9.0 * A4 * t2)));
    let y = theta * (A1 + A2 * t2 + t6 * (A3 + A4 * t2));
    (x, y)
}

/// Raw half-width of the sphere: x at (λ=π, φ=0).
fn raw_half_width() -> f64 {
    std::f64::consts::PI / (M * A1)
}

/// Raw half-height of the sphere: y at the pole.
fn raw_half_height() -> f64 {
    equal_earth_raw(0.0, std::f64::consts::FRAC_PI_2).1
}

/// Max vertex spacing (degrees) before an edge gets densified, so long
/// straight segments in the source data follow the projection's curvature.
const DENSIFY_STEP_DEG: f64 = 2.5;

/// An Equal Earth projection fitted to a pixel width, with the sphere
/// centered on the canvas. Screen coordinates: x right, y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    scale: f64,
    translate_x: f64,
    translate_y: f64,
    width: f64,
    height: f64,
}

impl Projector {
    /// Fit the whole sphere to `target_width` pixels. Height is derived,
    /// never configured; for a fixed width the result is deterministic.
    pub fn fit_width(target_width: f64) -> Self {
        let scale = target_width / (2.0 * raw_half_width());
        let height = 2.0 * raw_half_height() * scale;
        Self {
            scale,
            translate_x: target_width / 2.0,
            translate_y: height / 2.0,
            width: target_width,
            height,
        }
    }

    /// Project a lon/lat pair (degrees) to screen coordinates.
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let (x, y) = equal_earth_raw(lon_deg.to_radians(), lat_deg.to_radians());
        (
            self.translate_x + self.scale * x,
            self.translate_y - self.scale * y,
        )
    }

    /// Bounding box of the fitted sphere: `[[0, 0], [width, height]]`.
    pub fn sphere_bounds(&self) -> [[f64; 2]; 2] {
        [[0.0, 0.0], [self.width, self.height]]
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Vertical extent of the fitted sphere; the canvas takes its height
    /// from this.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// SVG path data for a polygonal geometry. Each ring becomes a closed
    /// subpath; interior rings read as holes under even-odd filling.
    pub fn path_for(&self, geometry: &Geometry<f64>) -> String {
        let mut d = String::new();
        match geometry {
            Geometry::Polygon(poly) => self.polygon_subpaths(poly, &mut d),
            Geometry::MultiPolygon(mp) => {
                for poly in &mp.0 {
                    self.polygon_subpaths(poly, &mut d);
                }
            }
            // Loaders only admit areal geometries; anything else projects to
            // an empty path.
            _ => {}
        }
        d
    }

    fn polygon_subpaths(&self, poly: &geo::Polygon<f64>, d: &mut String) {
        self.ring_subpath(poly.exterior(), d);
        for interior in poly.interiors() {
            self.ring_subpath(interior, d);
        }
    }

    fn ring_subpath(&self, ring: &LineString<f64>, d: &mut String) {
        let mut first = true;
        let coords: Vec<_> = ring.coords().collect();
        for window in coords.windows(2) {
            let (a, b) = (window[0], window[1]);
            for (lon, lat) in densify(a.x, a.y, b.x, b.y) {
                let (x, y) = self.project(lon, lat);
                if first {
                    let _ = write!(d, "M{x:.2},{y:.2}");
                    first = false;
                } else {
                    let _ = write!(d, "L{x:.2},{y:.2}");
                }
            }
        }
        if !first {
            d.push('Z');
        }
    }

    /// Path data for the projected sphere outline: the two outer meridians
    /// joined by the flat pole lines.
    pub fn sphere_path(&self) -> String {
        let mut d = String::new();
        // right meridian, south to north
        for lat in -90..=90 {
            let (x, y) = self.project(180.0, lat as f64);
            if lat == -90 {
                let _ = write!(d, "M{x:.2},{y:.2}");
            } else {
                let _ = write!(d, "L{x:.2},{y:.2}");
            }
        }
        // left meridian, north back to south; pole lines are straight
        for lat in (-90..=90).rev() {
            let (x, y) = self.project(-180.0, lat as f64);
            let _ = write!(d, "L{x:.2},{y:.2}");
        }
        d.push('Z');
        d
    }

    /// Path data for the 10° graticule: parallels every 10° between ±80°,
    /// meridians every 10° truncated at ±80° except the ±180° pair, which
    /// run pole to pole.
    pub fn graticule_path(&self) -> String {
        let mut d = String::new();
        for lat10 in (-80..=80).step_by(10) {
            self.polyline(
                (-720..=720).map(|q| (q as f64 / 4.0, lat10 as f64)),
                &mut d,
            );
        }
        for lon10 in (-180i32..=180).step_by(10) {
            let reach = if lon10.abs() == 180 { 360 } else { 320 };
            self.polyline(
                (-reach..=reach).map(|q| (lon10 as f64, q as f64 / 4.0)),
                &mut d,
            );
        }
        d
    }

    fn polyline(&self, points: impl Iterator<Item = (f64, f64)>, d: &mut String) {
        for (i, (lon, lat)) in points.enumerate() {
            let (x, y) = self.project(lon, lat);
            if i == 0 {
                let _ = write!(d, "M{x:.2},{y:.2}");
            } else {
                let _ = write!(d, "L{x:.2},{y:.2}");
            }
        }
    }

    /// Projected centroid of a geometry, the tooltip anchor. `None` for
    /// degenerate geometries.
    pub fn centroid(&self, geometry: &Geometry<f64>) -> Option<(f64, f64)> {
        let c = geometry.centroid()?;
        Some(self.project(c.x(), c.y()))
    }
}

/// Interpolate between two vertices in lon/lat space so no emitted segment
/// spans more than [`DENSIFY_STEP_DEG`]. Yields `a` but not `b`; the ring
/// walk supplies `b` as the next window's `a` and the final vertex closes
/// onto the first via `Z`.
fn densify(lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> impl Iterator<Item = (f64, f64)> {
    let span = (lon1 - lon0).abs().max((lat1 - lat0).abs());
    let steps = (span / DENSIFY_STEP_DEG).ceil().max(1.0) as usize;
    (0..steps).map(move |i| {
        let t = i as f64 / steps as f64;
        (lon0 + (lon1 - lon0) * t, lat0 + (lat1 - lat0) * t)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn origin_projects_to_canvas_center() {
        let p = Projector::fit_width(960.0);
        let (x, y) = p.project(0.0, 0.0);
        assert!((x - 480.0).abs() < 1e-9, "x={x}");
        assert!((y - p.height() / 2.0).abs() < 1e-9, "y={y}");
    }

    #[test]
    fn equator_spans_the_full_width() {
        let p = Projector::fit_width(960.0);
        let (x_w, _) = p.project(-180.0, 0.0);
        let (x_e, _) = p.project(180.0, 0.0);
        assert!(x_w.abs() < 1e-9, "west x={x_w}");
        assert!((x_e - 960.0).abs() < 1e-9, "east x={x_e}");
    }

    #[test]
    fn poles_touch_the_top_and_bottom_edges() {
        let p = Projector::fit_width(960.0);
        let (_, y_n) = p.project(0.0, 90.0);
        let (_, y_s) = p.project(0.0, -90.0);
        assert!(y_n.abs() < 1e-9, "north y={y_n}");
        assert!((y_s - p.height()).abs() < 1e-9, "south y={y_s}");
    }

    #[test]
    fn poles_are_flat_lines_not_points() {
        // Pseudocylindrical with a pole line: the pole projects to
        // different x for different longitudes.
        let p = Projector::fit_width(960.0);
        let (x_a, y_a) = p.project(-180.0, 90.0);
        let (x_b, y_b) = p.project(180.0, 90.0);
        assert!((y_a - y_b).abs() < 1e-9);
        assert!((x_b - x_a) > 100.0, "pole line width {}", x_b - x_a);
    }

    #[test]
    fn height_is_a_deterministic_function_of_width() {
        let a = Projector::fit_width(700.0);
        let b = Projector::fit_width(700.0);
        assert_eq!(a, b);
        // Known Equal Earth aspect ratio, height ≈ 0.4867 × width.
        assert!((a.height() / a.width() - 0.4867).abs() < 0.001);
    }

    #[test]
    fn sphere_bounds_cover_the_canvas() {
        let p = Projector::fit_width(500.0);
        let [[x0, y0], [x1, y1]] = p.sphere_bounds();
        assert_eq!((x0, y0), (0.0, 0.0));
        assert_eq!(x1, 500.0);
        assert!((y1 - p.height()).abs() < 1e-9);
    }

    #[test]
    fn polygon_paths_are_closed_subpaths() {
        let p = Projector::fit_width(960.0);
        let geom = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 20.0, y: 0.0),
            (x: 20.0, y: 20.0),
            (x: 0.0, y: 20.0),
            (x: 0.0, y: 0.0),
        ]);
        let d = p.path_for(&geom);
        assert!(d.starts_with('M'));
        assert!(d.ends_with('Z'));
        assert_eq!(d.matches('M').count(), 1);
    }

    #[test]
    fn holes_become_extra_subpaths() {
        let p = Projector::fit_width(960.0);
        let geom = Geometry::Polygon(polygon!(
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 30.0, y: 0.0),
                (x: 30.0, y: 30.0),
                (x: 0.0, y: 30.0),
            ],
            interiors: [[
                (x: 10.0, y: 10.0),
                (x: 20.0, y: 10.0),
                (x: 20.0, y: 20.0),
                (x: 10.0, y: 20.0),
            ]],
        ));
        let d = p.path_for(&geom);
        assert_eq!(d.matches('M').count(), 2);
        assert_eq!(d.matches('Z').count(), 2);
    }

    #[test]
    fn centroid_of_an_equatorial_square_sits_at_its_middle() {
        let p = Projector::fit_width(960.0);
        let geom = Geometry::Polygon(polygon![
            (x: -10.0, y: -10.0),
            (x: 10.0, y: -10.0),
            (x: 10.0, y: 10.0),
            (x: -10.0, y: 10.0),
            (x: -10.0, y: -10.0),
        ]);
        let (cx, cy) = p.centroid(&geom).unwrap();
        let (ex, ey) = p.project(0.0, 0.0);
        assert!((cx - ex).abs() < 1e-6);
        assert!((cy - ey).abs() < 1e-6);
    }

    #[test]
    fn graticule_contains_all_lines() {
        let p = Projector::fit_width(960.0);
        let d = p.graticule_path();
        // 17 parallels + 37 meridians, one M per line.
        assert_eq!(d.matches('M').count(), 17 + 37);
    }
}
