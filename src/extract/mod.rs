//! Rating extraction from raw scraped text buffers.
//!
//! Two incompatible source layouts exist in the wild: a machine-readable
//! key/value dump and a rendered page blob whose structure is inferred from
//! recurring class-name fragments. Both decoders walk the same per-record
//! states (class → rating → difficulty) and produce the same
//! [`RatingRecord`] shape; the layout is sniffed from the buffer rather
//! than supplied by the caller.

pub mod api_dump;
pub mod rendered;
pub mod scanner;

use thiserror::Error;

use crate::stats::{ProfessorProfile, RatingRecord};

/// The two known source layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLayout {
    /// Machine-readable key/value dump (`"class"`, `"helpfulRating"` keys).
    ApiDump,
    /// Rendered page markup (class-name fragments as anchors).
    Rendered,
}

/// Fatal extraction failure. Per-record problems are never errors; only a
/// buffer with no recognizable structure at all is.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("buffer matches no known rating layout")]
    SchemaMismatch,
}

/// Why a single record was dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("no {0} field before the next record")]
    MissingAnchor(&'static str),
    #[error("unparseable {field} value `{value}`")]
    BadNumber {
        field: &'static str,
        value: String,
    },
}

/// One dropped record: where its class anchor sat and why it was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub offset: usize,
    pub reason: SkipReason,
}

/// Best-effort extraction output: every decoded record plus everything
/// that was skipped. Callers always get both.
#[derive(Debug)]
pub struct Extraction {
    pub layout: SourceLayout,
    pub profile: ProfessorProfile,
    pub records: Vec<RatingRecord>,
    pub skipped: Vec<SkippedRecord>,
}

/// Probes the buffer for each layout's class anchor. Rendered markers win
/// when both appear, since a rendered page can embed key/value payloads.
pub fn sniff(buf: &str) -> Option<SourceLayout> {
    if buf.contains(rendered::CLASS_ANCHOR) {
        Some(SourceLayout::Rendered)
    } else if buf.contains(api_dump::CLASS_KEY) {
        Some(SourceLayout::ApiDump)
    } else {
        None
    }
}

/// Extracts all rating records from `buf`, sniffing the layout first.
pub fn extract(buf: &str) -> Result<Extraction, ExtractError> {
    match sniff(buf) {
        Some(SourceLayout::ApiDump) => Ok(api_dump::extract(buf)),
        Some(SourceLayout::Rendered) => Ok(rendered::extract(buf)),
        None => Err(ExtractError::SchemaMismatch),
    }
}
