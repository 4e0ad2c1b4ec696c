use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user-entered interval, either `"<low>-<high>"` or `"<low>+"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalSpec(String);

/// Numeric bounds recovered from an [`IntervalSpec`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParsedInterval {
    /// `[low, high]`, both ends inclusive. Never matches when `low > high`.
    Closed { low: f64, high: f64 },
    /// `[low, +inf)`.
    OpenEnded { low: f64 },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("interval '{text}' must have exactly one '-' between its two bounds")]
    BadSeparator { text: String },
    #[error("interval '{text}' has a non-numeric bound '{bound}'")]
    BadBound { text: String, bound: String },
    #[error("interval '{text}' is neither '<low>-<high>' nor '<low>+'")]
    Unrecognized { text: String },
}

impl IntervalSpec {
    pub fn new(text: impl Into<String>) -> Self { Self(text.into()) }

    #[inline] pub fn as_str(&self) -> &str { &self.0 }

    /// Parse the spec into numeric bounds.
    pub fn parse(&self) -> Result<ParsedInterval, IntervalError> { parse_interval(&self.0) }
}

impl From<&str> for IntervalSpec {
    fn from(text: &str) -> Self { Self::new(text) }
}

impl From<String> for IntervalSpec {
    fn from(text: String) -> Self { Self(text) }
}

impl ParsedInterval {
    /// Check whether `value` falls inside the interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            Self::Closed { low, high } => low <= value && value <= high,
            Self::OpenEnded { low } => value >= low,
        }
    }

    #[inline]
    pub fn low(&self) -> f64 {
        match *self {
            Self::Closed { low, .. } | Self::OpenEnded { low } => low,
        }
    }
}

/// Parse an interval string.
///
/// Any `-` selects the closed-range form, so a negative bound such as
/// `"-5-10"` splits into three parts and is rejected.
pub fn parse_interval(text: &str) -> Result<ParsedInterval, IntervalError> {
    if text.contains('-') {
        let mut parts = text.split('-');
        let (Some(low), Some(high), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(IntervalError::BadSeparator { text: text.to_string() });
        };
        Ok(ParsedInterval::Closed { low: parse_bound(text, low)?, high: parse_bound(text, high)? })
    } else if let Some(low) = text.strip_suffix('+') {
        Ok(ParsedInterval::OpenEnded { low: parse_bound(text, low)? })
    } else {
        Err(IntervalError::Unrecognized { text: text.to_string() })
    }
}

fn parse_bound(text: &str, bound: &str) -> Result<f64, IntervalError> {
    bound.trim().parse::<f64>().map_err(|_| IntervalError::BadBound {
        text: text.to_string(),
        bound: bound.to_string(),
    })
}
