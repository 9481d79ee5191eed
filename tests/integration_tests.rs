use std::path::Path;

use rmp_rater::aggregate::index::build_index;
use rmp_rater::aggregate::ledger::CourseLedger;
use rmp_rater::aggregate::types::MergeInstruction;
use rmp_rater::extract::{self, SourceLayout};

#[test]
fn test_full_pipeline_api_dump() {
    let buffer = include_str!("fixtures/api_dump.txt");
    let extraction = extract::extract(buffer).expect("layout not recognized");

    assert_eq!(extraction.layout, SourceLayout::ApiDump);
    assert_eq!(extraction.records.len(), 5);
    assert!(extraction.skipped.is_empty());
    assert_eq!(
        extraction.profile.full_name().as_deref(),
        Some("Barbara Cutler")
    );

    let mut ledger = CourseLedger::new();
    for record in &extraction.records {
        ledger.observe(record);
    }

    // Fold the intro course into the upper-level one, as a caller would
    // for a cross-listing.
    let skips = ledger.apply_merges(&[MergeInstruction {
        absorb: "CSCI-1200".to_string(),
        into: "CSCI-2600".to_string(),
    }]);
    assert!(skips.is_empty());

    let rows = ledger.finalize();
    let codes: Vec<&str> = rows.iter().map(|r| r.course_code.as_str()).collect();
    assert_eq!(codes, ["CSCI-2600", "CSCI-4530"]);

    let merged = &rows[0];
    assert_eq!(merged.num_ratings, 3);
    assert_eq!(merged.rating, 3.7);
    assert_eq!(merged.difficulty, 4.0);
}

#[test]
fn test_full_pipeline_rendered_page() {
    let buffer = include_str!("fixtures/rendered.txt");
    let extraction = extract::extract(buffer).expect("layout not recognized");

    assert_eq!(extraction.layout, SourceLayout::Rendered);
    assert_eq!(extraction.records.len(), 3);
    assert!(extraction.skipped.is_empty());
    // The record behind an embedded image marker still decodes.
    assert_eq!(extraction.records[1].course_code, "GSAS4520");

    let mut ledger = CourseLedger::new();
    for record in &extraction.records {
        ledger.observe(record);
    }

    let rows = ledger.finalize();
    let codes: Vec<&str> = rows.iter().map(|r| r.course_code.as_str()).collect();
    assert_eq!(codes, ["COMM-4962", "GSAS-4520"]);

    // "COMM 4962" and "COMM4962" land in one entry: (5.0 + 3.0) / 2.
    assert_eq!(rows[0].num_ratings, 2);
    assert_eq!(rows[0].rating, 4.0);
    assert_eq!(rows[0].difficulty, 3.0);
}

#[test]
fn test_index_from_fixture_snapshots() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/terms");
    let index = build_index(&dir).expect("index build failed");

    let terms: Vec<&String> = index["Smith"].keys().collect();
    assert_eq!(terms, ["202409", "202501"]);
    assert_eq!(index["Smith"]["202409"], ["CSCI-1100"]);
    assert_eq!(index["Smith"]["202501"], ["CSCI-1100"]);

    // Turner taught different courses in each term.
    assert_eq!(index["Turner"]["202409"], ["CSCI-1100"]);
    assert_eq!(index["Turner"]["202501"], ["WRIT-4120"]);
}
