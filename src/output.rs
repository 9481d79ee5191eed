//! Output formatting and persistence for pipeline results.
//!
//! Supports CSV append for per-course statistics, JSON for the instructor
//! index and compact snapshots, and the flattened courses CSV. Everything
//! here is a pure read-and-format step over already-finalized data.

use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::path::Path;

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::aggregate::types::{CompactCourse, InstructorTermIndex};
use crate::stats::{CourseSummary, ProfessorProfile};

/// One exported per-course statistics row.
#[derive(Debug, Serialize)]
struct CourseStatRow<'a> {
    professor: &'a str,
    course_code: &'a str,
    num_ratings: usize,
    rating: f64,
    difficulty: f64,
}

/// Appends one professor's finalized course statistics to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_course_stats(path: &str, professor: &str, rows: &[CourseSummary]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = rows.len(), "appending stats CSV rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for row in rows {
        writer.serialize(CourseStatRow {
            professor,
            course_code: &row.course_code,
            num_ratings: row.num_ratings,
            rating: row.rating,
            difficulty: row.difficulty,
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the instructor index as pretty-printed JSON. The ordered maps
/// keep term keys ascending on disk.
pub fn write_index_json(path: &str, index: &InstructorTermIndex) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, index)?;
    Ok(())
}

/// Writes a compact snapshot as pretty-printed JSON.
pub fn write_compact_json(path: &str, courses: &[CompactCourse]) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, courses)?;
    Ok(())
}

/// One instructor row of the flattened courses view.
#[derive(Debug, Serialize)]
struct CoursesRow<'a> {
    professor: &'a str,
    courses: String,
}

/// Flattens the index into `professor,courses` rows. Course codes are
/// de-duplicated and sorted before joining, unlike the per-term lists,
/// which keep duplicates and source order.
pub fn write_courses_csv(path: &str, index: &InstructorTermIndex) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().from_writer(file);

    for (instructor, terms) in index {
        let unique: BTreeSet<&str> = terms
            .values()
            .flat_map(|ids| ids.iter().map(String::as_str))
            .collect();
        let courses = unique.into_iter().collect::<Vec<_>>().join(", ");

        writer.serialize(CoursesRow {
            professor: instructor,
            courses,
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// Professor JSON export: profile header plus finalized per-course stats.
#[derive(Debug, Serialize)]
pub struct ProfessorReport<'a> {
    pub professor: &'a str,
    #[serde(flatten)]
    pub profile: &'a ProfessorProfile,
    pub courses: &'a [CourseSummary],
}

pub fn write_professor_json(path: &str, report: &ProfessorReport<'_>) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}
