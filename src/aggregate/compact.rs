//! Compacts a full semester catalog dump into a per-term snapshot.
//!
//! The catalog nests subjects → courses → sections → timeslots; a snapshot
//! keeps one entry per course with seat counts summed across sections and
//! instructors de-duplicated across all timeslots.

use std::collections::BTreeSet;

use serde::Deserialize;

use super::types::CompactCourse;

/// Subject grouping as the catalog dump nests it.
#[derive(Debug, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub courses: Vec<CatalogCourse>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogCourse {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub act: u32,
    #[serde(default)]
    pub cap: u32,
    #[serde(default)]
    pub timeslots: Vec<Timeslot>,
}

#[derive(Debug, Deserialize)]
pub struct Timeslot {
    #[serde(default)]
    pub instructor: String,
}

/// Flattens subjects into compact course entries.
pub fn compact_courses(subjects: &[Subject]) -> Vec<CompactCourse> {
    let mut compact = Vec::new();

    for subject in subjects {
        for course in &subject.courses {
            let mut act = 0;
            let mut cap = 0;
            let mut instructors = BTreeSet::new();

            for section in &course.sections {
                act += section.act;
                cap += section.cap;

                for slot in &section.timeslots {
                    // Multiple instructors arrive comma-separated in one field.
                    for name in slot.instructor.split(',') {
                        let name = name.trim();
                        if !name.is_empty() {
                            instructors.insert(name.to_string());
                        }
                    }
                }
            }

            compact.push(CompactCourse {
                id: course.id.clone(),
                title: course.title.clone(),
                act,
                cap,
                instructors: instructors.into_iter().collect(),
            });
        }
    }

    compact
}
