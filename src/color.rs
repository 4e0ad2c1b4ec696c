//! Color names handed to the map renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A CSS color as understood by the map widget, e.g. `yellow` or `#ff8800`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorName(String);

impl ColorName {
    /// Color used for anything that could not be classified or joined.
    pub const FALLBACK: &'static str = "lightgrey";

    pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

    #[inline] pub fn fallback() -> Self { Self(Self::FALLBACK.to_string()) }

    #[inline] pub fn as_str(&self) -> &str { &self.0 }

    #[inline] pub fn is_fallback(&self) -> bool { self.0 == Self::FALLBACK }
}

impl Default for ColorName {
    fn default() -> Self { Self::fallback() }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColorName {
    fn from(name: &str) -> Self { Self::new(name) }
}

impl From<String> for ColorName {
    fn from(name: String) -> Self { Self(name) }
}

impl AsRef<str> for ColorName {
    fn as_ref(&self) -> &str { &self.0 }
}
