use std::fmt::Write;

use geo::{Coord, CoordsIter, LineString, MultiPolygon, Rect};

/// Equirectangular lon/lat -> SVG pixel mapping (Y down).
#[derive(Clone, Copy, Debug)]
pub(crate) struct Projection {
    bounds: Rect<f64>,
    margin: f64,
    scale: f64,
}

impl Projection {
    /// Fit `bounds` into `width` pixels, leaving `margin` on each side.
    pub(crate) fn fit(bounds: Rect<f64>, width: f64, margin: f64) -> Self {
        Self { bounds, margin, scale: (width - 2.0 * margin) / bounds.width() }
    }

    #[inline] pub(crate) fn scale(&self) -> f64 { self.scale }

    /// Output height for the fitted bounds.
    #[inline] pub(crate) fn height(&self) -> f64 { self.bounds.height() * self.scale + 2.0 * self.margin }

    #[inline]
    pub(crate) fn project(&self, coord: Coord<f64>) -> (f64, f64) {
        let x = self.margin + (coord.x - self.bounds.min().x) * self.scale;
        let y = self.margin + (self.bounds.max().y - coord.y) * self.scale;
        (x, y)
    }
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
pub(crate) fn multipolygon_to_path(shape: &MultiPolygon<f64>, projection: &Projection) -> String {
    let mut out = String::new();
    for polygon in &shape.0 {
        ring_to_path(polygon.exterior(), projection, &mut out);
        for interior in polygon.interiors() {
            ring_to_path(interior, projection, &mut out);
        }
    }
    out
}

/// Append a ring as an SVG subpath: "M x,y L x,y ... Z"
fn ring_to_path(ring: &LineString<f64>, projection: &Projection, out: &mut String) {
    let mut coords = ring.coords_iter().map(|coord| projection.project(coord));
    if let Some((x, y)) = coords.next() {
        let _ = write!(out, " M{x:.3},{y:.3}");
        for (x, y) in coords {
            let _ = write!(out, " L{x:.3},{y:.3}");
        }
        out.push('Z');
    }
}
