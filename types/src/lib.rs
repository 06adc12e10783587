//! Output records produced by `deadline_extract` and consumed by whatever
//! turns them into calendar events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Case value reported for a document whose text could not be obtained.
pub const INVALID_DOCUMENT: &str = "INVALID DOCUMENT";

// ── Date entry ───────────────────────────────────────────────────────────

/// One concrete calendar date attached to a milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEntry {
    pub id: Uuid,
    /// Serialized as `YYYY-MM-DD`
    pub value: NaiveDate,
}

impl DateEntry {
    pub fn new(value: NaiveDate) -> Self {
        DateEntry {
            id: Uuid::new_v4(),
            value,
        }
    }
}

// ── Event ────────────────────────────────────────────────────────────────

/// A matched milestone and the dates found in its section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub dates: Vec<DateEntry>,
    pub dates_count: usize,
}

impl Event {
    /// `dates_count` always mirrors `dates.len()`.
    pub fn new(name: impl Into<String>, dates: Vec<DateEntry>) -> Self {
        Event {
            id: Uuid::new_v4(),
            name: name.into(),
            dates_count: dates.len(),
            dates,
        }
    }
}

// ── Parsed document ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    pub id: Uuid,
    pub case: String,
    /// In anchor catalog order
    pub events: Vec<Event>,
    /// Sum of every event's `dates_count`
    pub dates_count: usize,
    pub filename: String,
}

impl ParsedDocument {
    pub fn new(
        id: Uuid,
        case: impl Into<String>,
        events: Vec<Event>,
        filename: impl Into<String>,
    ) -> Self {
        let dates_count = events.iter().map(|e| e.dates_count).sum();
        ParsedDocument {
            id,
            case: case.into(),
            events,
            dates_count,
            filename: filename.into(),
        }
    }

    /// The record reported when text extraction failed for a document.
    pub fn invalid(id: Uuid, filename: impl Into<String>) -> Self {
        ParsedDocument::new(id, INVALID_DOCUMENT, Vec::new(), filename)
    }

    pub fn is_invalid(&self) -> bool {
        self.case == INVALID_DOCUMENT
    }

    /// Flatten into one all-day calendar entry per extracted date.
    pub fn calendar_entries(&self) -> Vec<CalendarEntry> {
        if self.is_invalid() {
            return Vec::new();
        }
        self.events
            .iter()
            .flat_map(|event| {
                event
                    .dates
                    .iter()
                    .map(move |d| CalendarEntry::all_day(&self.case, &event.name, d.value))
            })
            .collect()
    }
}

// ── Calendar entry ───────────────────────────────────────────────────────

/// An all-day calendar entry ready to hand to a calendar service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    /// "<case> - <milestone>"
    pub subject: String,
    pub is_all_day: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CalendarEntry {
    pub fn all_day(case: &str, milestone: &str, date: NaiveDate) -> Self {
        CalendarEntry {
            subject: format!("{case} - {milestone}"),
            is_all_day: true,
            start_date: date,
            end_date: date,
        }
    }
}
