//! Decoder for the rendered-markup layout.
//!
//! Anchors are recurring styled-component class-name fragments: one for
//! the course label, and one numeric-rating fragment that repeats twice
//! per record (helpfulness first, then difficulty). Displayed ratings
//! carry one decimal place, so values parse as floats.

use super::scanner::Cursor;
use super::{Extraction, SkipReason, SkippedRecord, SourceLayout};
use crate::stats::{ProfessorProfile, RatingRecord};

pub(crate) const CLASS_ANCHOR: &str = "RatingHeader__StyledClass";
const NUMBER_ANCHOR: &str = "CardNumRating__CardNumRatingNumber";

/// Extracts every complete rating record. The rendered page carries no
/// professor header block, so the profile comes back empty. Incomplete
/// records are dropped and reported; scanning resumes at the next class
/// anchor.
pub fn extract(buf: &str) -> Extraction {
    let mut cur = Cursor::new(buf);
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    while let Some(at) = cur.seek(CLASS_ANCHOR) {
        let limit = cur.peek(CLASS_ANCHOR).unwrap_or(buf.len());

        match decode_record(&mut cur, limit) {
            Ok(record) => records.push(record),
            Err(reason) => skipped.push(SkippedRecord { offset: at, reason }),
        }
    }

    Extraction {
        layout: SourceLayout::Rendered,
        profile: ProfessorProfile::default(),
        records,
        skipped,
    }
}

fn decode_record(cur: &mut Cursor<'_>, limit: usize) -> Result<RatingRecord, SkipReason> {
    let course_code = cur
        .tag_text()
        .ok_or(SkipReason::MissingAnchor("class label"))?
        .to_string();

    let rating = number_field(cur, "helpfulness", limit)?;
    let difficulty = number_field(cur, "difficulty", limit)?;

    Ok(RatingRecord {
        course_code,
        rating,
        difficulty,
    })
}

fn number_field(
    cur: &mut Cursor<'_>,
    name: &'static str,
    limit: usize,
) -> Result<f64, SkipReason> {
    cur.seek_before(NUMBER_ANCHOR, limit)
        .ok_or(SkipReason::MissingAnchor(name))?;
    let text = cur.tag_text().ok_or(SkipReason::MissingAnchor(name))?;

    text.parse().map_err(|_| SkipReason::BadNumber {
        field: name,
        value: text.to_string(),
    })
}
