//! Export formats for a finished render pass.

mod geojson;
mod svg;
