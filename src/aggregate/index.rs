//! Instructor → term → course index built from per-term snapshot files.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

use super::types::{CompactCourse, InstructorTermIndex};

const SNAPSHOT_PREFIX: &str = "compact_classes";
const SNAPSHOT_EXT: &str = "json";

/// Builds the instructor index from every `compact_classes<TERM>.json`
/// file in `dir`. Files fold in whatever order the directory yields them;
/// ascending term order comes from the final sort alone, never from
/// processing order.
pub fn build_index(dir: &Path) -> Result<InstructorTermIndex> {
    let mut folded: HashMap<String, HashMap<String, Vec<String>>> = HashMap::new();
    let mut file_count = 0usize;

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("reading snapshot directory {}", dir.display()))?
    {
        let path = entry?.path();
        let Some(term) = term_code(&path) else {
            continue;
        };
        if !is_plausible_term(&term) {
            warn!(term = %term, file = %path.display(), "term code is not a year+month");
        }

        let file = File::open(&path)?;
        let courses: Vec<CompactCourse> = serde_json::from_reader(file)
            .with_context(|| format!("decoding snapshot {}", path.display()))?;

        for course in &courses {
            for instructor in &course.instructors {
                folded
                    .entry(instructor.clone())
                    .or_default()
                    .entry(term.clone())
                    .or_default()
                    .push(course.id.clone());
            }
        }

        file_count += 1;
        debug!(term = %term, courses = courses.len(), "snapshot folded");
    }

    debug!(files = file_count, instructors = folded.len(), "index fold complete");

    // Post-hoc sort into ordered maps; the fold above is order-agnostic.
    Ok(folded
        .into_iter()
        .map(|(instructor, terms)| (instructor, terms.into_iter().collect()))
        .collect())
}

/// `compact_classes202501.json` → `202501`. Anything else is not a
/// snapshot file.
fn term_code(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some(SNAPSHOT_EXT) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let term = stem.strip_prefix(SNAPSHOT_PREFIX)?;
    (!term.is_empty()).then(|| term.to_string())
}

/// A plausible term code is a `YYYYMM` month that exists on the calendar.
fn is_plausible_term(term: &str) -> bool {
    if term.len() != 6 || !term.is_ascii() {
        return false;
    }
    let (Ok(year), Ok(month)) = (term[..4].parse::<i32>(), term[4..].parse::<u32>()) else {
        return false;
    };
    NaiveDate::from_ymd_opt(year, month, 1).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn snapshot_dir(name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = env::temp_dir().join(format!("rmp_rater_{name}"));
        let _ = fs::remove_dir_all(&dir); // clean up any prior run
        fs::create_dir_all(&dir).unwrap();
        for (file, contents) in files {
            fs::write(dir.join(file), contents).unwrap();
        }
        dir
    }

    const FALL: &str =
        r#"[{"id":"CSCI-1100","title":"Computer Science I","act":350,"cap":400,"instructors":["Smith"]}]"#;
    const SPRING: &str =
        r#"[{"id":"CSCI-1100","title":"Computer Science I","act":320,"cap":400,"instructors":["Smith"]}]"#;

    #[test]
    fn test_terms_come_out_ascending_regardless_of_fold_order() {
        // File names chosen so directory order is unlikely to match
        // chronological order; the contract holds either way.
        let dir = snapshot_dir(
            "index_ordering",
            &[
                ("compact_classes202501.json", SPRING),
                ("compact_classes202409.json", FALL),
            ],
        );

        let index = build_index(&dir).unwrap();
        let terms: Vec<&String> = index["Smith"].keys().collect();
        assert_eq!(terms, ["202409", "202501"]);
        assert_eq!(index["Smith"]["202409"], ["CSCI-1100"]);
        assert_eq!(index["Smith"]["202501"], ["CSCI-1100"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_duplicate_course_entries_are_retained() {
        // The same instructor/course pair twice in one term: co-taught
        // sections arrive as separate source records and must survive.
        let dir = snapshot_dir(
            "index_duplicates",
            &[(
                "compact_classes202409.json",
                r#"[{"id":"CSCI-2500","title":"Computer Organization","act":10,"cap":20,"instructors":["Chen"]},
                    {"id":"CSCI-2500","title":"Computer Organization","act":15,"cap":20,"instructors":["Chen"]}]"#,
            )],
        );

        let index = build_index(&dir).unwrap();
        assert_eq!(index["Chen"]["202409"], ["CSCI-2500", "CSCI-2500"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_non_snapshot_files_are_ignored() {
        let dir = snapshot_dir(
            "index_ignores",
            &[
                ("compact_classes202409.json", FALL),
                ("notes.txt", "not a snapshot"),
                ("other.json", "[]"),
            ],
        );

        let index = build_index(&dir).unwrap();
        assert_eq!(index.len(), 1);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_plausible_term_codes() {
        assert!(is_plausible_term("202409"));
        assert!(is_plausible_term("202501"));
        assert!(!is_plausible_term("202413")); // no 13th month
        assert!(!is_plausible_term("2024"));
        assert!(!is_plausible_term("term01"));
    }
}
