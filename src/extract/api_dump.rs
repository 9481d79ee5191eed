//! Decoder for the machine-readable key/value dump layout.
//!
//! Ratings arrive as integer fields; the professor header block
//! (name, department, site-wide averages) precedes the per-review records
//! and is recovered on a separate pass when present.

use super::scanner::Cursor;
use super::{Extraction, SkipReason, SkippedRecord, SourceLayout};
use crate::stats::{ProfessorProfile, RatingRecord};

pub(crate) const CLASS_KEY: &str = "\"class\"";
const RATING_KEY: &str = "\"helpfulRating\"";
const DIFFICULTY_KEY: &str = "\"difficultyRating\"";

const LEGACY_ID_KEY: &str = "\"legacyId\"";
const FIRST_NAME_KEY: &str = "\"firstName\"";
const LAST_NAME_KEY: &str = "\"lastName\"";
const DEPARTMENT_KEY: &str = "\"department\"";
const NUM_RATINGS_KEY: &str = "\"numRatings\"";
const AVG_RATING_KEY: &str = "\"avgRating\"";
const AVG_DIFFICULTY_KEY: &str = "\"avgDifficulty\"";

const PROFILE_URL_BASE: &str = "https://www.ratemyprofessors.com/professor/";

/// Extracts every complete rating record, plus the optional professor
/// header block. Incomplete records are dropped and reported; scanning
/// resumes at the next class anchor.
pub fn extract(buf: &str) -> Extraction {
    let mut cur = Cursor::new(buf);
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    // class → rating → difficulty, strictly in this order per record
    while let Some(at) = cur.seek(CLASS_KEY) {
        // Fields found at or past this boundary belong to the next record.
        let limit = cur.peek(CLASS_KEY).unwrap_or(buf.len());

        match decode_record(&mut cur, limit) {
            Ok(record) => records.push(record),
            Err(reason) => skipped.push(SkippedRecord { offset: at, reason }),
        }
    }

    Extraction {
        layout: SourceLayout::ApiDump,
        profile: read_profile(buf),
        records,
        skipped,
    }
}

fn decode_record(cur: &mut Cursor<'_>, limit: usize) -> Result<RatingRecord, SkipReason> {
    const CLASS: SkipReason = SkipReason::MissingAnchor("class");

    cur.skip_key_separator().ok_or(CLASS)?;
    let course_code = cur.take_until(&['"']).ok_or(CLASS)?.to_string();

    let rating = int_field(cur, RATING_KEY, "helpfulRating", limit)?;
    let difficulty = int_field(cur, DIFFICULTY_KEY, "difficultyRating", limit)?;

    Ok(RatingRecord {
        course_code,
        rating,
        difficulty,
    })
}

fn int_field(
    cur: &mut Cursor<'_>,
    key: &str,
    name: &'static str,
    limit: usize,
) -> Result<f64, SkipReason> {
    cur.seek_before(key, limit)
        .ok_or(SkipReason::MissingAnchor(name))?;
    cur.skip_key_separator()
        .ok_or(SkipReason::MissingAnchor(name))?;
    let text = cur
        .take_until(&[',', '}'])
        .ok_or(SkipReason::MissingAnchor(name))?
        .trim();

    let value: i64 = text.parse().map_err(|_| SkipReason::BadNumber {
        field: name,
        value: text.to_string(),
    })?;
    Ok(value as f64)
}

/// Recovers the professor header block. The keys appear once, in dump
/// order, ahead of the review records; any of them may be absent.
fn read_profile(buf: &str) -> ProfessorProfile {
    let mut cur = Cursor::new(buf);
    let mut profile = ProfessorProfile::default();

    if cur.seek(LEGACY_ID_KEY).is_some() {
        if let Some(id) = number_text(&mut cur) {
            profile.profile_url = Some(format!("{PROFILE_URL_BASE}{id}"));
        }
    }
    if cur.seek(FIRST_NAME_KEY).is_some() {
        profile.first_name = string_value(&mut cur);
    }
    if cur.seek(LAST_NAME_KEY).is_some() {
        profile.last_name = string_value(&mut cur);
    }
    if cur.seek(DEPARTMENT_KEY).is_some() {
        profile.department = string_value(&mut cur);
    }
    if cur.seek(NUM_RATINGS_KEY).is_some() {
        profile.num_ratings = number_text(&mut cur).and_then(|v| v.parse().ok());
    }
    if cur.seek(AVG_RATING_KEY).is_some() {
        profile.avg_rating = number_text(&mut cur).and_then(|v| v.parse().ok());
    }
    if cur.seek(AVG_DIFFICULTY_KEY).is_some() {
        profile.avg_difficulty = number_text(&mut cur).and_then(|v| v.parse().ok());
    }

    profile
}

fn string_value(cur: &mut Cursor<'_>) -> Option<String> {
    cur.skip_key_separator()?;
    cur.take_until(&['"']).map(str::to_string)
}

fn number_text<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    cur.skip_key_separator()?;
    cur.take_until(&[',', '}']).map(str::trim)
}
