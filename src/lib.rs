#![doc = "Choropleth color resolution for Tunisia's administrative delegations"]
mod boundary;
mod classify;
mod color;
mod config;
mod dataset;
mod interval;
mod join;
mod render;
mod style;

#[doc(inline)]
pub use boundary::{Boundaries, Feature};

#[doc(inline)]
pub use classify::{CellValue, classify};

#[doc(inline)]
pub use color::ColorName;

#[doc(inline)]
pub use config::{IntervalSlot, MapConfig, StyleConfig};

#[doc(inline)]
pub use dataset::{Dataset, DatasetRow, LoadError, SchemaError, TabularFormat, ValidatedRows, Validation, load_tabular, load_tabular_bytes};

#[doc(inline)]
pub use interval::{IntervalError, IntervalSpec, ParsedInterval, Rule, RuleSet, parse_interval};

#[doc(inline)]
pub use join::{ColorAssignments, build_assignments};

#[doc(inline)]
pub use render::{LegendEntry, MapState, RenderPass, StyledFeature, render_pass};

#[doc(inline)]
pub use style::{FeatureStyle, Styler, Tooltip};
