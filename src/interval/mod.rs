//! Interval specifications and the ordered rule list built from them.

mod rule;
mod spec;

pub use rule::{Rule, RuleSet};
pub use spec::{IntervalError, IntervalSpec, ParsedInterval, parse_interval};
