//! Value classification against an ordered rule set.

use serde::{Deserialize, Serialize};

use crate::{color::ColorName, interval::RuleSet};

/// A single cell read from the uploaded table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Coerce the cell to a float. Text is trimmed before parsing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
            Self::Missing => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self { Self::Number(value) }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self { Self::Number(value as f64) }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self { Self::Text(text.to_string()) }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self { Self::Text(text) }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self { value.map_or(Self::Missing, Into::into) }
}

/// Pick the color of the first rule containing `value`, or the fallback color
/// when the value is not numeric or no rule matches.
pub fn classify(value: &CellValue, rules: &RuleSet) -> ColorName {
    let Some(value) = value.as_f64() else { return ColorName::fallback() };
    rules.first_match(value)
        .map(|rule| rule.color().clone())
        .unwrap_or_else(ColorName::fallback)
}
