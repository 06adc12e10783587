//! The anchor catalog: milestone titles in the order a scheduling order
//! lists them, each with the number of dates worth keeping.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// How a milestone's dates are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRule {
    /// As recognized
    #[default]
    Exact,
    /// Day replaced by 1; the text names a term, not a day
    FirstOfMonth,
}

impl DateRule {
    pub fn apply(self, date: NaiveDate) -> NaiveDate {
        match self {
            DateRule::Exact => date,
            DateRule::FirstOfMonth => date.with_day(1).unwrap_or(date),
        }
    }
}

/// One milestone title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub title: String,
    pub max_dates: usize,
    #[serde(default)]
    pub date_rule: DateRule,
}

impl Anchor {
    pub fn new(title: impl Into<String>, max_dates: usize) -> Self {
        Anchor {
            title: title.into(),
            max_dates,
            date_rule: DateRule::Exact,
        }
    }

    pub fn with_rule(mut self, date_rule: DateRule) -> Self {
        self.date_rule = date_rule;
        self
    }
}

/// Titles of a standard civil scheduling order, in order of appearance.
/// The final entry only closes the scan.
const DEFAULT_ANCHORS: &[(&str, usize, DateRule)] = &[
    ("ADDITION OF ANY NEW PARTIES", 1, DateRule::Exact),
    ("FACT WITNESS LIST", 1, DateRule::Exact),
    ("EXHIBIT LIST", 1, DateRule::Exact),
    ("EXPERT WITNESSES", 1, DateRule::Exact),
    ("FACT AND EXPERT DISCOVERY", 2, DateRule::Exact),
    ("MOTIONS FOR SUMMARY JUDGMENT and DAUBERT MOTIONS", 2, DateRule::Exact),
    ("OBJECTIONS TO PLEADINGS AND ALL OTHER PRETRIAL", 2, DateRule::Exact),
    ("MEDIATION", 1, DateRule::Exact),
    ("TRIAL", 1, DateRule::FirstOfMonth),
    ("JOINT PRETRIAL STIPULATION", 1, DateRule::Exact),
    ("DONE and ORDERED", 1, DateRule::Exact),
];

/// Ordered, validated list of anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorCatalog {
    anchors: Vec<Anchor>,
}

impl AnchorCatalog {
    /// Build a catalog. Rejects an empty list, blank titles, duplicate titles
    /// and anchors that keep no dates.
    pub fn new(anchors: Vec<Anchor>) -> Result<Self, ExtractError> {
        if anchors.is_empty() {
            return Err(ExtractError::Catalog("catalog has no anchors".into()));
        }
        let mut seen = HashSet::new();
        for (idx, anchor) in anchors.iter().enumerate() {
            if anchor.title.trim().is_empty() {
                return Err(ExtractError::Catalog(format!("anchor #{idx} has a blank title")));
            }
            if anchor.max_dates == 0 {
                return Err(ExtractError::Catalog(format!(
                    "anchor {:?} keeps no dates (max_dates = 0)",
                    anchor.title
                )));
            }
            if !seen.insert(anchor.title.as_str()) {
                return Err(ExtractError::Catalog(format!(
                    "duplicate anchor title {:?}",
                    anchor.title
                )));
            }
        }
        Ok(AnchorCatalog { anchors })
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// The entry whose match ends the scan.
    pub fn terminal(&self) -> Option<&Anchor> {
        self.anchors.last()
    }

    pub fn position(&self, title: &str) -> Option<usize> {
        self.anchors.iter().position(|a| a.title == title)
    }
}

impl Default for AnchorCatalog {
    fn default() -> Self {
        let anchors = DEFAULT_ANCHORS
            .iter()
            .map(|&(title, max_dates, rule)| Anchor::new(title, max_dates).with_rule(rule))
            .collect();
        AnchorCatalog { anchors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order() {
        let catalog = AnchorCatalog::default();
        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog.anchors()[0].title, "ADDITION OF ANY NEW PARTIES");
        assert_eq!(catalog.position("MEDIATION"), Some(7));
        assert_eq!(catalog.position("TRIAL"), Some(8));
        assert_eq!(catalog.terminal().unwrap().title, "DONE and ORDERED");
    }

    #[test]
    fn test_default_catalog_caps() {
        let catalog = AnchorCatalog::default();
        for anchor in catalog.anchors() {
            assert!((1..=2).contains(&anchor.max_dates), "{}", anchor.title);
        }
        let discovery = &catalog.anchors()[catalog.position("FACT AND EXPERT DISCOVERY").unwrap()];
        assert_eq!(discovery.max_dates, 2);
    }

    #[test]
    fn test_only_trial_moves_to_first_of_month() {
        let catalog = AnchorCatalog::default();
        let rules: Vec<&str> = catalog
            .anchors()
            .iter()
            .filter(|a| a.date_rule == DateRule::FirstOfMonth)
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(rules, vec!["TRIAL"]);
    }

    #[test]
    fn test_default_catalog_passes_validation() {
        let anchors = AnchorCatalog::default().anchors().to_vec();
        assert!(AnchorCatalog::new(anchors).is_ok());
    }

    #[test]
    fn test_rejects_empty_blank_and_duplicate() {
        assert!(AnchorCatalog::new(Vec::new()).is_err());
        assert!(AnchorCatalog::new(vec![Anchor::new("  ", 1)]).is_err());
        let dup = vec![Anchor::new("TRIAL", 1), Anchor::new("TRIAL", 2)];
        assert!(matches!(AnchorCatalog::new(dup), Err(ExtractError::Catalog(_))));
    }

    #[test]
    fn test_rejects_zero_max_dates() {
        let anchors = vec![Anchor::new("HEARING", 0), Anchor::new("END", 1)];
        assert!(matches!(AnchorCatalog::new(anchors), Err(ExtractError::Catalog(_))));
    }

    #[test]
    fn test_date_rules() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(DateRule::Exact.apply(d), d);
        assert_eq!(
            DateRule::FirstOfMonth.apply(d),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }
}
