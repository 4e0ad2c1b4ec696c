//! Delegation boundaries loaded from GeoJSON.

mod feature;
mod geojson;

pub use feature::Feature;
pub use geojson::Boundaries;
