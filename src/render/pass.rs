use std::collections::HashSet;

use serde::Serialize;

use crate::{
    boundary::{Boundaries, Feature},
    color::ColorName,
    config::MapConfig,
    dataset::{Dataset, ValidatedRows, Validation},
    interval::{IntervalSpec, RuleSet},
    join::{ColorAssignments, build_assignments},
    style::{FeatureStyle, Styler, Tooltip},
};

/// Caller-owned inputs of the map: the current dataset and the interval texts.
///
/// Nothing here is global; resetting just restores the base configuration and
/// drops the upload.
#[derive(Clone, Debug, Default)]
pub struct MapState {
    base: MapConfig,
    config: MapConfig,
    dataset: Option<Dataset>,
}

impl MapState {
    pub fn new(config: MapConfig) -> Self {
        Self { base: config.clone(), config, dataset: None }
    }

    #[inline] pub fn config(&self) -> &MapConfig { &self.config }

    #[inline] pub fn dataset(&self) -> Option<&Dataset> { self.dataset.as_ref() }

    /// Replace the current upload.
    pub fn upload(&mut self, dataset: Dataset) {
        tracing::info!("[render::state] dataset '{}' uploaded ({} rows)", dataset.file_name(), dataset.height());
        self.dataset = Some(dataset);
    }

    /// Apply edited interval texts on top of the current configuration.
    pub fn set_intervals<S: Into<IntervalSpec>>(&mut self, texts: impl IntoIterator<Item = S>) {
        self.config = std::mem::take(&mut self.config).with_interval_overrides(texts);
    }

    /// Drop the dataset and any interval edits.
    pub fn reset(&mut self) {
        tracing::info!("[render::state] reset");
        self.config = self.base.clone();
        self.dataset = None;
    }

    pub fn render<'a>(&'a self, boundaries: &'a Boundaries) -> RenderPass<'a> {
        render_pass(boundaries, self.dataset.as_ref(), &self.config)
    }
}

/// One feature with its computed style, ready to draw.
#[derive(Clone, Debug)]
pub struct StyledFeature<'a> {
    pub feature: &'a Feature,
    pub style: FeatureStyle,
    pub tooltip: Tooltip,
}

/// A configured interval as shown in the legend.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub interval: IntervalSpec,
    pub color: ColorName,
    /// `false` when the interval text did not parse and therefore never matches.
    pub valid: bool,
}

/// The result of one pass: rules, assignments and validation, all recomputed from scratch.
#[derive(Debug)]
pub struct RenderPass<'a> {
    boundaries: &'a Boundaries,
    config: &'a MapConfig,
    rules: RuleSet,
    assignments: ColorAssignments,
    validation: Validation,
    styler: Styler,
}

/// Run parse, classify and join for the current inputs.
///
/// A dataset lacking the required columns produces no assignments and a
/// failed [`Validation`]; it never aborts the pass.
pub fn render_pass<'a>(boundaries: &'a Boundaries, dataset: Option<&Dataset>, config: &'a MapConfig) -> RenderPass<'a> {
    let rules = config.rules();
    let ValidatedRows { rows, validation } = dataset
        .map(|dataset| dataset.validate(&config.name_column, &config.value_column))
        .unwrap_or_default();
    let assignments = build_assignments(&rows, &rules);

    let pass = RenderPass { boundaries, config, rules, assignments, validation, styler: Styler::new(config) };
    tracing::info!(
        "[render] {} rows -> {} delegations colored, {}/{} features assigned",
        rows.len(),
        pass.assignments.len(),
        pass.assigned_count(),
        boundaries.len(),
    );
    let unmatched = pass.unmatched_delegations();
    if !unmatched.is_empty() {
        tracing::debug!("[render] dataset names with no boundary: {unmatched:?}");
    }
    pass
}

impl<'a> RenderPass<'a> {
    #[inline] pub fn boundaries(&self) -> &'a Boundaries { self.boundaries }

    #[inline] pub fn config(&self) -> &'a MapConfig { self.config }

    #[inline] pub fn rules(&self) -> &RuleSet { &self.rules }

    #[inline] pub fn assignments(&self) -> &ColorAssignments { &self.assignments }

    #[inline] pub fn validation(&self) -> &Validation { &self.validation }

    /// Style a single feature against this pass's assignments.
    #[inline]
    pub fn style_for(&self, feature: &Feature) -> FeatureStyle {
        self.styler.style_for(feature, &self.assignments)
    }

    /// Every feature paired with its style and tooltip, in collection order.
    pub fn styled(&self) -> impl Iterator<Item = StyledFeature<'a>> + '_ {
        self.boundaries.features().iter().map(move |feature| StyledFeature {
            feature,
            style: self.style_for(feature),
            tooltip: self.styler.tooltip_for(feature),
        })
    }

    /// Number of features whose delegation received a color.
    pub fn assigned_count(&self) -> usize {
        self.boundaries.features().iter()
            .filter(|feature| self.styler.delegation(feature).is_some_and(|key| self.assignments.contains(&key)))
            .count()
    }

    /// Dataset delegations that match no boundary feature, sorted.
    pub fn unmatched_delegations(&self) -> Vec<&str> {
        let known = self.boundaries.features().iter()
            .filter_map(|feature| self.styler.delegation(feature))
            .collect::<HashSet<_>>();
        let mut unmatched = self.assignments.iter()
            .map(|(name, _)| name)
            .filter(|name| !known.contains(*name))
            .collect::<Vec<_>>();
        unmatched.sort_unstable();
        unmatched
    }

    /// One entry per configured interval slot, in order.
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.rules.iter()
            .map(|rule| LegendEntry {
                interval: rule.spec().clone(),
                color: rule.color().clone(),
                valid: rule.parsed().is_some(),
            })
            .collect()
    }
}
