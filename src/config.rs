//! Render configuration: interval slots, column names, style constants.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{color::ColorName, interval::{IntervalSpec, RuleSet}};

/// One interval text field and the color it paints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntervalSlot {
    pub text: IntervalSpec,
    pub color: ColorName,
}

impl IntervalSlot {
    pub fn new(text: impl Into<IntervalSpec>, color: impl Into<ColorName>) -> Self {
        Self { text: text.into(), color: color.into() }
    }
}

/// Presentation constants applied by the feature styler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub stroke_color: ColorName,
    pub stroke_weight: f64,
    pub assigned_opacity: f64,
    pub unassigned_opacity: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_color: ColorName::from("black"),
            stroke_weight: 1.0,
            assigned_opacity: 0.7,
            unassigned_opacity: 0.3,
        }
    }
}

/// Everything a render pass needs besides the boundaries and the dataset.
///
/// `MapConfig::default()` is the reset state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub intervals: Vec<IntervalSlot>,
    /// Dataset column holding delegation names.
    pub name_column: String,
    /// Dataset column holding the values to classify.
    pub value_column: String,
    /// Feature property used as the join key.
    pub delegation_property: String,
    /// Feature property shown next to the delegation in tooltips.
    pub governorate_property: String,
    pub style: StyleConfig,
    /// Initial map view `[lat, lon]` for the interactive widget.
    pub center: [f64; 2],
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            intervals: vec![
                IntervalSlot::new("0-20", "yellow"),
                IntervalSlot::new("21-40", "orange"),
                IntervalSlot::new("41-60", "red"),
                IntervalSlot::new("61-80", "purple"),
                IntervalSlot::new("81-100", "blue"),
                IntervalSlot::new("101+", "green"),
            ],
            name_column: "Delegations".to_string(),
            value_column: "Valeurs".to_string(),
            delegation_property: "deleg_na_1".to_string(),
            governorate_property: "gov_name_f".to_string(),
            style: StyleConfig::default(),
            center: [33.8869, 9.5375],
            zoom: 7,
        }
    }
}

impl MapConfig {
    /// Read a JSON config file; absent fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("[config::load] Failed to read {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("[config::load] Invalid config in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)
            .context("[config::save] Failed to serialize config")?;
        fs::write(path, json)
            .with_context(|| format!("[config::save] Failed to write {}", path.display()))
    }

    /// Replace slot texts in order, keeping each slot's color.
    ///
    /// Extra texts beyond the configured slots have no color and are dropped.
    pub fn with_interval_overrides<S: Into<IntervalSpec>>(mut self, texts: impl IntoIterator<Item = S>) -> Self {
        let slots = self.intervals.len();
        for (i, text) in texts.into_iter().enumerate() {
            let text: IntervalSpec = text.into();
            match self.intervals.get_mut(i) {
                Some(slot) => slot.text = text,
                None => tracing::warn!("[config] ignoring interval #{} '{}': only {slots} slots are configured", i + 1, text.as_str()),
            }
        }
        self
    }

    /// Build the rule list for the current pass. Invalid slots are logged and kept; they never match.
    pub fn rules(&self) -> RuleSet {
        let rules = RuleSet::new(self.intervals.iter().map(|slot| (slot.text.clone(), slot.color.clone())));
        for (rule, err) in rules.invalid() {
            tracing::warn!("[config] interval #{} ignored: {err}", rule.order() + 1);
        }
        rules
    }
}
