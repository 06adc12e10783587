//! Event assembly: one `Event` per section, carrying the first few dates
//! recognized in the section text.

use deadline_types::{DateEntry, Event};
use log::debug;

use crate::dates::DateRecognizer;
use crate::segment::Section;

/// Build the event for a section.
///
/// Keeps at most `max_dates` dates in text order; extra matches are dropped.
/// The anchor's date rule is applied to every kept date.
pub fn build_event(section: &Section<'_>, recognizer: &dyn DateRecognizer) -> Event {
    let anchor = section.anchor;
    let dates: Vec<DateEntry> = recognizer
        .find_dates(&section.text)
        .take(anchor.max_dates)
        .map(|d| DateEntry::new(anchor.date_rule.apply(d)))
        .collect();

    debug!(
        "{}: kept {} of at most {} date(s)",
        anchor.title,
        dates.len(),
        anchor.max_dates
    );

    Event::new(anchor.title.clone(), dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Anchor, AnchorCatalog, DateRule};
    use crate::dates::PatternRecognizer;
    use chrono::{Datelike, NaiveDate};
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn recognizer() -> PatternRecognizer {
        PatternRecognizer::with_reference(date(2024, 1, 1))
    }

    /// Hands back a fixed list, regardless of the text.
    struct FixedDates(Vec<NaiveDate>);

    impl DateRecognizer for FixedDates {
        fn find_dates<'a>(&'a self, _text: &'a str) -> Box<dyn Iterator<Item = NaiveDate> + 'a> {
            Box::new(self.0.iter().copied())
        }
    }

    #[test]
    fn test_single_date_section() {
        let anchor = Anchor::new("FACT WITNESS LIST", 1);
        let section = Section {
            anchor: &anchor,
            text: "\nFACT WITNESS LIST\nDue by March 3, 2024".into(),
        };
        let event = build_event(&section, &recognizer());

        assert_eq!(event.name, "FACT WITNESS LIST");
        assert_eq!(event.dates_count, 1);
        assert_eq!(event.dates[0].value, date(2024, 3, 3));
    }

    #[test]
    fn test_truncates_to_cap_in_text_order() {
        let anchor = Anchor::new("FACT AND EXPERT DISCOVERY", 2);
        let section = Section {
            anchor: &anchor,
            text: "\nFACT AND EXPERT DISCOVERY\nJan 1, 2024; Feb 2, 2024; Mar 3, 2024".into(),
        };
        let event = build_event(&section, &recognizer());

        let values: Vec<_> = event.dates.iter().map(|d| d.value).collect();
        assert_eq!(values, vec![date(2024, 1, 1), date(2024, 2, 2)]);
        assert_eq!(event.dates_count, 2);
    }

    #[test]
    fn test_fewer_dates_than_cap() {
        let anchor = Anchor::new("FACT AND EXPERT DISCOVERY", 2);
        let section = Section {
            anchor: &anchor,
            text: "\nFACT AND EXPERT DISCOVERY\nclosed by 5/1/2024".into(),
        };
        assert_eq!(build_event(&section, &recognizer()).dates_count, 1);
    }

    #[test]
    fn test_no_dates_is_empty_event() {
        let anchor = Anchor::new("MEDIATION", 1);
        let section = Section {
            anchor: &anchor,
            text: "\nMEDIATION\nthe parties shall mediate".into(),
        };
        let event = build_event(&section, &recognizer());
        assert!(event.dates.is_empty());
        assert_eq!(event.dates_count, 0);
    }

    #[test]
    fn test_trial_day_forced_to_first() {
        let catalog = AnchorCatalog::default();
        let trial = &catalog.anchors()[catalog.position("TRIAL").unwrap()];
        let section = Section {
            anchor: trial,
            text: "\nTRIAL\nThe trial term begins June 15, 2025".into(),
        };
        let event = build_event(&section, &recognizer());

        assert_eq!(event.dates.len(), 1);
        assert_eq!(event.dates[0].value, date(2025, 6, 1));
    }

    #[test]
    fn test_first_of_month_rule_on_every_date() {
        let anchor = Anchor::new("TERM", 3).with_rule(DateRule::FirstOfMonth);
        let section = Section {
            anchor: &anchor,
            text: String::new(),
        };
        let fixed = FixedDates(vec![date(2025, 6, 15), date(2025, 7, 31), date(2025, 8, 1)]);
        let event = build_event(&section, &fixed);

        assert_eq!(event.dates_count, 3);
        assert!(event.dates.iter().all(|d| d.value.day() == 1));
    }

    #[test]
    fn test_injected_recognizer_respects_cap() {
        let anchor = Anchor::new("EXHIBIT LIST", 1);
        let section = Section {
            anchor: &anchor,
            text: String::new(),
        };
        let fixed = FixedDates(vec![date(2030, 1, 2), date(2031, 1, 2)]);
        let event = build_event(&section, &fixed);

        assert_eq!(event.dates.len(), 1);
        assert_eq!(event.dates[0].value, date(2030, 1, 2));
    }

    #[test]
    fn test_date_ids_unique() {
        let anchor = Anchor::new("MANY", 50);
        let section = Section {
            anchor: &anchor,
            text: String::new(),
        };
        let fixed = FixedDates((1..=28).map(|d| date(2024, 2, d)).collect());
        let event = build_event(&section, &fixed);

        let ids: HashSet<_> = event.dates.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 28);
        assert_ne!(event.id, event.dates[0].id);
    }
}
