//! One render pass: parse intervals, classify rows, join onto boundaries, style features.

mod io;
mod pass;

pub use pass::{LegendEntry, MapState, RenderPass, StyledFeature, render_pass};
