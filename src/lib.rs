//! Deadline extraction for court scheduling orders.
//!
//! Raw document text goes through four steps:
//!
//! ```text
//! text ─┬─ case_number ───────────────────────────────┐
//!       └─ normalize → segment → event (per section) ─┴→ ParsedDocument
//! ```
//!
//! [`parser::DeadlineParser`] runs the pipeline for single documents and for
//! batches; the anchor catalog and the date recognizer are both injected.

pub mod case_number;
pub mod catalog;
pub mod config;
pub mod dates;
pub mod error;
pub mod event;
pub mod normalize;
pub mod parser;
pub mod scanner;
pub mod segment;

pub use catalog::{Anchor, AnchorCatalog, DateRule};
pub use config::Config;
pub use dates::{DateRecognizer, PatternRecognizer};
pub use error::ExtractError;
pub use parser::{DeadlineParser, DocumentBody, PlainTextExtractor, SourceDocument, TextExtractor};

pub use deadline_types::{CalendarEntry, DateEntry, Event, INVALID_DOCUMENT, ParsedDocument};
