//! Per-professor rating aggregation and cross-listing merges.

use std::collections::HashMap;

use tracing::warn;

use super::types::{MergeInstruction, MergeSkip};
use crate::normalize;
use crate::stats::{CourseStat, CourseSummary, RatingRecord};

/// Accumulates rating records for one professor, keyed by normalized
/// course code. Owned exclusively by that professor's pipeline run.
#[derive(Debug, Default)]
pub struct CourseLedger {
    stats: HashMap<String, CourseStat>,
}

impl CourseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Number of distinct course codes seen so far.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Folds one record into the ledger, creating the course's stat entry
    /// on first sight.
    pub fn observe(&mut self, record: &RatingRecord) {
        let code = normalize::normalize_course_code(&record.course_code);
        if !normalize::is_separated(&code) {
            warn!(code = %code, "course code fell outside the fixed-width form");
        }
        self.stats.entry(code).or_default().observe(record);
    }

    /// Applies merge instructions in the order supplied. An instruction
    /// whose `into` or `absorb` code is absent from the mapping is skipped
    /// and returned; skips never abort the run.
    pub fn apply_merges(&mut self, merges: &[MergeInstruction]) -> Vec<MergeSkip> {
        let mut skips = Vec::new();

        for m in merges {
            if !self.stats.contains_key(&m.into) {
                skips.push(MergeSkip {
                    instruction: m.clone(),
                    missing: m.into.clone(),
                });
                continue;
            }
            if m.absorb == m.into {
                continue;
            }
            let Some(absorbed) = self.stats.remove(&m.absorb) else {
                skips.push(MergeSkip {
                    instruction: m.clone(),
                    missing: m.absorb.clone(),
                });
                continue;
            };
            if let Some(target) = self.stats.get_mut(&m.into) {
                target.absorb(&absorbed);
            }
        }

        skips
    }

    /// Finalizes every remaining course into rounded means, sorted by
    /// course code for deterministic export.
    pub fn finalize(self) -> Vec<CourseSummary> {
        let mut rows: Vec<CourseSummary> = self
            .stats
            .iter()
            .map(|(code, stat)| stat.finalize(code))
            .collect();
        rows.sort_by(|a, b| a.course_code.cmp(&b.course_code));
        rows
    }
}
