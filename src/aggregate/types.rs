//! Data types used by the aggregation pipeline.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Instructor name → term code → course ids. Term keys are ascending once
/// index construction completes; course ids within a term keep source
/// order and may repeat (co-taught sections are separate source records).
pub type InstructorTermIndex = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// "Fold `absorb`'s statistics into `into`, then discard `absorb`."
/// Supplied by the caller as an ordered list; order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeInstruction {
    pub absorb: String,
    pub into: String,
}

impl FromStr for MergeInstruction {
    type Err = String;

    /// Parses the CLI form `ABSORB:INTO`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (absorb, into) = s
            .split_once(':')
            .ok_or_else(|| format!("expected ABSORB:INTO, got `{s}`"))?;
        if absorb.is_empty() || into.is_empty() {
            return Err(format!("expected ABSORB:INTO, got `{s}`"));
        }
        Ok(Self {
            absorb: absorb.to_string(),
            into: into.to_string(),
        })
    }
}

/// A merge instruction that could not be applied because one of its codes
/// was absent from the professor's mapping at merge time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSkip {
    pub instruction: MergeInstruction,
    pub missing: String,
}

/// One course entry of a per-term compact snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompactCourse {
    pub id: String,
    pub title: String,
    pub act: u32,
    pub cap: u32,
    pub instructors: Vec<String>,
}
