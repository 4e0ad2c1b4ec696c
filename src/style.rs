//! Per-feature fill and stroke decisions.

use std::borrow::Cow;

use serde::Serialize;

use crate::{boundary::Feature, color::ColorName, config::{MapConfig, StyleConfig}, join::ColorAssignments};

/// Style attributes handed to the map renderer (Leaflet path option names).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureStyle {
    #[serde(rename = "fillColor")]
    pub fill_color: ColorName,
    #[serde(rename = "color")]
    pub stroke_color: ColorName,
    #[serde(rename = "weight")]
    pub stroke_weight: f64,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
}

/// Hover text for a feature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub delegation: Option<String>,
    pub governorate: Option<String>,
}

impl Tooltip {
    pub const DELEGATION_LABEL: &'static str = "Délégation:";
    pub const GOVERNORATE_LABEL: &'static str = "Gouvernorat:";

    /// Labelled lines, skipping absent values.
    pub fn lines(&self) -> Vec<String> {
        [(Self::DELEGATION_LABEL, &self.delegation), (Self::GOVERNORATE_LABEL, &self.governorate)]
            .into_iter()
            .filter_map(|(label, value)| value.as_ref().map(|value| format!("{label} {value}")))
            .collect()
    }
}

/// Decides fill and stroke for each feature from the join result.
///
/// Styling reads only the feature and the assignments, so features can be
/// styled in any order or in parallel.
#[derive(Clone, Debug)]
pub struct Styler {
    delegation_property: String,
    governorate_property: String,
    style: StyleConfig,
}

impl Default for Styler {
    fn default() -> Self { Self::new(&MapConfig::default()) }
}

impl Styler {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            delegation_property: config.delegation_property.clone(),
            governorate_property: config.governorate_property.clone(),
            style: config.style.clone(),
        }
    }

    /// Join key of a feature, if it carries one. Numeric keys are stringified
    /// to line up with table names read as text.
    #[inline]
    pub fn delegation<'a>(&self, feature: &'a Feature) -> Option<Cow<'a, str>> {
        feature.property_text(&self.delegation_property)
    }

    /// Assigned features get their color at full emphasis; everything else is a faint fallback.
    pub fn style_for(&self, feature: &Feature, assignments: &ColorAssignments) -> FeatureStyle {
        let assigned = self.delegation(feature).and_then(|key| assignments.get(&key));
        let (fill_color, fill_opacity) = match assigned {
            Some(color) => (color.clone(), self.style.assigned_opacity),
            None => (ColorName::fallback(), self.style.unassigned_opacity),
        };
        FeatureStyle {
            fill_color,
            stroke_color: self.style.stroke_color.clone(),
            stroke_weight: self.style.stroke_weight,
            fill_opacity,
        }
    }

    pub fn tooltip_for(&self, feature: &Feature) -> Tooltip {
        Tooltip {
            delegation: self.delegation(feature).map(Cow::into_owned),
            governorate: feature.property_str(&self.governorate_property).map(str::to_string),
        }
    }
}
