use std::fs;
use std::path::PathBuf;

use deadline_types::ParsedDocument;
use log::{debug, info, warn};
use rayon::prelude::*;
use uuid::Uuid;

use crate::case_number::extract_case_id;
use crate::catalog::AnchorCatalog;
use crate::dates::{DateRecognizer, PatternRecognizer};
use crate::error::ExtractError;
use crate::event::build_event;
use crate::normalize::normalize;
use crate::segment::segment;

// ── Input documents ────────────────────────────────────────────────

/// Where a document's content lives.
#[derive(Debug, Clone)]
pub enum DocumentBody {
    Inline(Vec<u8>),
    File(PathBuf),
}

/// One document of a batch.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Reported back on the parsed record
    pub filename: String,
    pub body: DocumentBody,
}

impl SourceDocument {
    pub fn inline(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        SourceDocument {
            filename: filename.into(),
            body: DocumentBody::Inline(bytes.into()),
        }
    }

    pub fn file(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        SourceDocument {
            filename,
            body: DocumentBody::File(path),
        }
    }
}

// ── Text extraction ────────────────────────────────────────────────

/// Turns a document into plain text. Any error marks the document invalid.
pub trait TextExtractor: Sync {
    fn extract_text(&self, doc: &SourceDocument) -> Result<String, ExtractError>;
}

/// Accepts documents that are already UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, doc: &SourceDocument) -> Result<String, ExtractError> {
        let bytes = match &doc.body {
            DocumentBody::Inline(b) => b.clone(),
            DocumentBody::File(path) => fs::read(path).map_err(|source| ExtractError::Io {
                path: path.clone(),
                source,
            })?,
        };

        if bytes.starts_with(b"%PDF-") {
            return Err(ExtractError::Unsupported {
                filename: doc.filename.clone(),
                format: "PDF",
            });
        }

        let mut text = String::from_utf8(bytes).map_err(|e| ExtractError::Encoding {
            filename: doc.filename.clone(),
            offset: e.utf8_error().valid_up_to(),
        })?;
        if text.starts_with('\u{feff}') {
            text.remove(0);
        }
        Ok(text)
    }
}

// ── Parser ─────────────────────────────────────────────────────────

/// Runs the full pipeline: case number, normalization, segmentation and
/// event assembly. Holds no per-document state, so one parser serves a
/// whole batch from many threads.
pub struct DeadlineParser {
    catalog: AnchorCatalog,
    recognizer: Box<dyn DateRecognizer>,
}

impl DeadlineParser {
    pub fn new(catalog: AnchorCatalog, recognizer: Box<dyn DateRecognizer>) -> Self {
        DeadlineParser {
            catalog,
            recognizer,
        }
    }

    pub fn catalog(&self) -> &AnchorCatalog {
        &self.catalog
    }

    pub fn recognizer(&self) -> &dyn DateRecognizer {
        self.recognizer.as_ref()
    }

    /// Parse text that has already been extracted.
    pub fn parse_text(&self, text: &str, filename: &str) -> ParsedDocument {
        self.parse_text_with_id(Uuid::new_v4(), text, filename)
    }

    fn parse_text_with_id(&self, id: Uuid, text: &str, filename: &str) -> ParsedDocument {
        let case = extract_case_id(text);
        let normalized = normalize(text);
        let events: Vec<_> = segment(&normalized, &self.catalog)
            .iter()
            .map(|section| build_event(section, self.recognizer.as_ref()))
            .collect();

        debug!(
            "{filename}: case {case:?}, {} event(s) of {} anchor(s)",
            events.len(),
            self.catalog.len()
        );
        ParsedDocument::new(id, case, events, filename)
    }

    /// Extract and parse one document. Extraction failures come back as an
    /// `INVALID DOCUMENT` record rather than an error.
    pub fn parse_document(
        &self,
        extractor: &dyn TextExtractor,
        doc: &SourceDocument,
    ) -> ParsedDocument {
        let id = Uuid::new_v4();
        match extractor.extract_text(doc) {
            Ok(text) => self.parse_text_with_id(id, &text, &doc.filename),
            Err(e) => {
                warn!("{}: {e}", doc.filename);
                ParsedDocument::invalid(id, doc.filename.clone())
            }
        }
    }

    /// Parse every document in parallel. Output order matches input order
    /// and one bad document never affects another.
    pub fn parse_batch(
        &self,
        extractor: &dyn TextExtractor,
        docs: &[SourceDocument],
    ) -> Vec<ParsedDocument> {
        let parsed: Vec<ParsedDocument> = docs
            .par_iter()
            .map(|doc| self.parse_document(extractor, doc))
            .collect();

        let invalid = parsed.iter().filter(|p| p.is_invalid()).count();
        info!(
            "parsed {} document(s): {} invalid, {} date(s) total",
            parsed.len(),
            invalid,
            parsed.iter().map(|p| p.dates_count).sum::<usize>()
        );
        parsed
    }
}

impl Default for DeadlineParser {
    fn default() -> Self {
        DeadlineParser::new(AnchorCatalog::default(), Box::new(PatternRecognizer::new()))
    }
}
