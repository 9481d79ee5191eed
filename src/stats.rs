use serde::Serialize;

/// One observed review: a course paired with a helpfulness and a
/// difficulty score. Produced by the decoders, consumed immediately by the
/// aggregation ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRecord {
    pub course_code: String,
    pub rating: f64,
    pub difficulty: f64,
}

/// Running sums for one course while records are being accumulated.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CourseStat {
    pub count: usize,
    pub rating_sum: f64,
    pub difficulty_sum: f64,
}

impl CourseStat {
    /// Folds one record into the sums.
    pub fn observe(&mut self, record: &RatingRecord) {
        self.count += 1;
        self.rating_sum += record.rating;
        self.difficulty_sum += record.difficulty;
    }

    /// Folds another course's sums into this one (cross-listing merge).
    pub fn absorb(&mut self, other: &CourseStat) {
        self.count += other.count;
        self.rating_sum += other.rating_sum;
        self.difficulty_sum += other.difficulty_sum;
    }

    /// Converts the sums into rounded means. A stat only comes into
    /// existence alongside its first record, so `count` is never zero here.
    pub fn finalize(&self, course_code: &str) -> CourseSummary {
        debug_assert!(self.count > 0, "CourseStat exists without a record");
        CourseSummary {
            course_code: course_code.to_string(),
            num_ratings: self.count,
            rating: round1(self.rating_sum / self.count as f64),
            difficulty: round1(self.difficulty_sum / self.count as f64),
        }
    }
}

/// Finalized per-course statistics, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseSummary {
    pub course_code: String,
    pub num_ratings: usize,
    pub rating: f64,
    pub difficulty: f64,
}

/// Professor header fields recovered from the key/value dump. The dump
/// does not always carry the full block, so every field is optional.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProfessorProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
    pub profile_url: Option<String>,
    pub num_ratings: Option<u32>,
    pub avg_rating: Option<f64>,
    pub avg_difficulty: Option<f64>,
}

impl ProfessorProfile {
    /// Full display name, when the dump carried one.
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }
}

/// Rounds to one decimal place.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
