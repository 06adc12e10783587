//! Fuzzy date recognition in free text.

use chrono::{Duration, Local, NaiveDate};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Anything that can pick calendar dates out of prose.
pub trait DateRecognizer: Send + Sync {
    /// Dates in the order they appear in `text`. Lazy: callers that only
    /// want the first few stop the scan early.
    fn find_dates<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = NaiveDate> + 'a>;
}

// ── Regex patterns ─────────────────────────────────────────────────
//
// Real data examples:
//   Due by March 3, 2024
//   no later than Mar. 3rd 2024
//   on or before the 15th day of January, 2025
//   due the 15th of March, 2024
//   set for the trial period commencing 6/2/2025
//   on the docket of June 2025
//   2024-11-01, 2025/10/15
//
// One regex with one branch per shape, so a single left-to-right scan
// yields dates in text order. Branch order decides ties at the same
// position: longer shapes come first.

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

static RE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?ix)
        \b(?:
            (?P<md_month>{m})\.?\s+(?P<md_day>\d{{1,2}})(?:st|nd|rd|th)?,?\s+(?P<md_year>\d{{4}})
          | (?P<dm_day>\d{{1,2}})(?:st|nd|rd|th)?\s+(?:(?:day\s+)?of\s+)?(?P<dm_month>{m})\.?,?\s+(?P<dm_year>\d{{4}})
          | (?P<iso_year>\d{{4}})[/-](?P<iso_month>\d{{1,2}})[/-](?P<iso_day>\d{{1,2}})
          | (?P<us_month>\d{{1,2}})[/-](?P<us_day>\d{{1,2}})[/-](?P<us_year>\d{{4}}|\d{{2}})
          | (?P<my_month>{m})\.?,?\s+(?P<my_year>\d{{4}})
          | (?P<relative>today|tomorrow|yesterday)
        )\b",
        m = MONTHS
    );
    Regex::new(&pattern).unwrap()
});

/// Month name or abbreviation → 1–12.
pub(crate) fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    let m = match lower.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(m)
}

/// Two-digit years are read as 20YY.
fn full_year(s: &str) -> Option<i32> {
    let y: i32 = s.parse().ok()?;
    if s.len() == 2 { Some(2000 + y) } else { Some(y) }
}

/// Regex-driven recognizer for the date shapes scheduling orders use.
#[derive(Debug, Clone)]
pub struct PatternRecognizer {
    /// What "today" means for relative words
    reference: NaiveDate,
}

impl PatternRecognizer {
    pub fn new() -> Self {
        Self::with_reference(Local::now().date_naive())
    }

    pub fn with_reference(reference: NaiveDate) -> Self {
        PatternRecognizer { reference }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Turn one regex match into a date; `None` when the numbers do not form
    /// a real calendar day.
    fn resolve(&self, caps: &Captures<'_>) -> Option<NaiveDate> {
        let num = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());
        let year = |name: &str| caps.name(name).and_then(|m| full_year(m.as_str()));
        let month = |name: &str| caps.name(name).and_then(|m| month_number(m.as_str()));

        if caps.name("md_month").is_some() {
            NaiveDate::from_ymd_opt(year("md_year")?, month("md_month")?, num("md_day")?)
        } else if caps.name("dm_month").is_some() {
            NaiveDate::from_ymd_opt(year("dm_year")?, month("dm_month")?, num("dm_day")?)
        } else if caps.name("iso_year").is_some() {
            NaiveDate::from_ymd_opt(year("iso_year")?, num("iso_month")?, num("iso_day")?)
        } else if caps.name("us_year").is_some() {
            NaiveDate::from_ymd_opt(year("us_year")?, num("us_month")?, num("us_day")?)
        } else if caps.name("my_month").is_some() {
            NaiveDate::from_ymd_opt(year("my_year")?, month("my_month")?, 1)
        } else {
            let word = caps.name("relative")?.as_str().to_ascii_lowercase();
            let offset = match word.as_str() {
                "yesterday" => -1,
                "tomorrow" => 1,
                _ => 0,
            };
            self.reference.checked_add_signed(Duration::days(offset))
        }
    }
}

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DateRecognizer for PatternRecognizer {
    fn find_dates<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = NaiveDate> + 'a> {
        Box::new(
            RE_DATE
                .captures_iter(text)
                .filter_map(move |caps| self.resolve(&caps)),
        )
    }
}
