use crate::color::ColorName;
use crate::interval::{IntervalError, IntervalSpec, ParsedInterval};

/// One configured interval bucket.
///
/// The interval text is parsed once on construction; a rule whose text does not parse
/// is kept so it can be reported, but it never matches.
#[derive(Clone, Debug)]
pub struct Rule {
    spec: IntervalSpec,
    color: ColorName,
    order: usize,
    parsed: Result<ParsedInterval, IntervalError>,
}

impl Rule {
    pub fn new(spec: impl Into<IntervalSpec>, color: impl Into<ColorName>, order: usize) -> Self {
        let spec = spec.into();
        let parsed = spec.parse();
        Self { spec, color: color.into(), order, parsed }
    }

    #[inline] pub fn spec(&self) -> &IntervalSpec { &self.spec }

    #[inline] pub fn color(&self) -> &ColorName { &self.color }

    #[inline] pub fn order(&self) -> usize { self.order }

    /// Parsed bounds, or `None` if the interval text was malformed.
    #[inline] pub fn parsed(&self) -> Option<ParsedInterval> { self.parsed.as_ref().ok().copied() }

    #[inline] pub fn error(&self) -> Option<&IntervalError> { self.parsed.as_ref().err() }

    #[inline]
    pub fn matches(&self, value: f64) -> bool {
        self.parsed.as_ref().is_ok_and(|parsed| parsed.contains(value))
    }
}

/// Ordered list of rules; the first matching rule wins.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build from `(spec, color)` pairs, using list position as the order.
    pub fn new<S, C>(entries: impl IntoIterator<Item = (S, C)>) -> Self
    where
        S: Into<IntervalSpec>,
        C: Into<ColorName>,
    {
        Self {
            rules: entries.into_iter()
                .enumerate()
                .map(|(order, (spec, color))| Rule::new(spec, color, order))
                .collect(),
        }
    }

    /// Build from rules carrying their own order. Equal orders keep their input position.
    pub fn from_rules(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(Rule::order);
        Self { rules }
    }

    #[inline] pub fn len(&self) -> usize { self.rules.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rules.is_empty() }

    #[inline] pub fn iter(&self) -> impl Iterator<Item = &Rule> + '_ { self.rules.iter() }

    /// Find the first rule, in order, whose interval contains `value`.
    pub fn first_match(&self, value: f64) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(value))
    }

    /// Rules whose interval text failed to parse, with the reason.
    pub fn invalid(&self) -> impl Iterator<Item = (&Rule, &IntervalError)> + '_ {
        self.rules.iter().filter_map(|rule| rule.error().map(|err| (rule, err)))
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter { self.rules.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_follows_position() {
        let rules = RuleSet::new([("0-20", "yellow"), ("21-40", "orange"), ("101+", "green")]);
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.iter().map(Rule::order).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn from_rules_sorts_by_order() {
        let rules = RuleSet::from_rules(vec![
            Rule::new("0-100", "blue", 2),
            Rule::new("0-100", "red", 0),
            Rule::new("0-100", "green", 2),
        ]);
        let colors = rules.iter().map(|r| r.color().as_str()).collect::<Vec<_>>();
        assert_eq!(colors, vec!["red", "blue", "green"]);
        assert_eq!(rules.first_match(50.0).map(|r| r.color().as_str()), Some("red"));
    }

    #[test]
    fn malformed_rule_is_reported_and_skipped() {
        let rules = RuleSet::new([("abc", "red"), ("0-10", "blue")]);
        let invalid = rules.invalid().map(|(rule, _)| rule.spec().as_str()).collect::<Vec<_>>();
        assert_eq!(invalid, vec!["abc"]);
        assert!(rules.iter().next().unwrap().parsed().is_none());
        assert_eq!(rules.first_match(5.0).map(|r| r.color().as_str()), Some("blue"));
    }

    #[test]
    fn empty_set_never_matches() {
        assert!(RuleSet::default().first_match(0.0).is_none());
    }
}
