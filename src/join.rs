//! Joining dataset rows onto delegation colors.

use std::collections::HashMap;

use crate::{classify::classify, color::ColorName, dataset::DatasetRow, interval::RuleSet};

/// Delegation name to classified color.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorAssignments {
    colors: HashMap<String, ColorName>,
}

impl ColorAssignments {
    #[inline] pub fn get(&self, delegation: &str) -> Option<&ColorName> { self.colors.get(delegation) }

    #[inline] pub fn contains(&self, delegation: &str) -> bool { self.colors.contains_key(delegation) }

    #[inline] pub fn len(&self) -> usize { self.colors.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.colors.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorName)> + '_ {
        self.colors.iter().map(|(name, color)| (name.as_str(), color))
    }

    /// Record a color, replacing any earlier one for the same delegation.
    pub fn insert(&mut self, delegation: impl Into<String>, color: ColorName) -> Option<ColorName> {
        self.colors.insert(delegation.into(), color)
    }
}

impl<K: Into<String>> FromIterator<(K, ColorName)> for ColorAssignments {
    fn from_iter<I: IntoIterator<Item = (K, ColorName)>>(iter: I) -> Self {
        let mut assignments = Self::default();
        for (delegation, color) in iter {
            assignments.insert(delegation, color);
        }
        assignments
    }
}

/// Classify every row and key the result by delegation name.
///
/// Rows are folded in order, so the last row for a repeated name wins.
pub fn build_assignments(rows: &[DatasetRow], rules: &RuleSet) -> ColorAssignments {
    rows.iter().fold(ColorAssignments::default(), |mut assignments, row| {
        let color = classify(&row.value, rules);
        if let Some(previous) = assignments.insert(row.delegation.as_str(), color) {
            tracing::debug!("[join] '{}' repeated, replacing {previous}", row.delegation);
        }
        assignments
    })
}
