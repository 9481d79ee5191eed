//! Course code canonicalization.
//!
//! The source data writes course references every which way: `COMM4962`,
//! `comm 4962`, `COMM-4962`. The canonical form is `DEPT-NUMBER`.

/// Department prefixes are four letters in the source data, so an
/// unseparated code is exactly eight characters (4 letters + 4 digits).
const FIXED_WIDTH: usize = 8;
const DEPT_LEN: usize = 4;

/// Canonicalizes a free-text course reference into `DEPT-NUMBER` form.
///
/// Uppercases, strips whitespace, and splits an unseparated eight-character
/// code after the fourth character. Codes that fall outside the fixed-width
/// assumption pass through unsplit; use [`is_separated`] to flag them
/// instead of guessing at a split point.
pub fn normalize_course_code(raw: &str) -> String {
    let code: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if !code.contains('-') && code.is_ascii() && code.len() == FIXED_WIDTH {
        format!("{}-{}", &code[..DEPT_LEN], &code[DEPT_LEN..])
    } else {
        code
    }
}

/// True when a normalized code carries the `DEPT-NUMBER` separator.
pub fn is_separated(code: &str) -> bool {
    code.contains('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_fixed_width_code() {
        assert_eq!(normalize_course_code("COMM4962"), "COMM-4962");
    }

    #[test]
    fn test_separated_code_passes_through() {
        assert_eq!(normalize_course_code("COMM-4962"), "COMM-4962");
    }

    #[test]
    fn test_uppercases_and_strips_whitespace() {
        assert_eq!(normalize_course_code("comm 4962"), "COMM-4962");
        assert_eq!(normalize_course_code("  csci-1200 "), "CSCI-1200");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["COMM4962", "comm 4962", "CSCI-1200", "ITWS", "MGMT29620"] {
            let once = normalize_course_code(raw);
            assert_eq!(normalize_course_code(&once), once);
        }
    }

    #[test]
    fn test_non_conforming_code_is_not_split() {
        // Too short and too long both fall outside the 4+4 assumption.
        assert_eq!(normalize_course_code("CS1200"), "CS1200");
        assert_eq!(normalize_course_code("ADMIN1010"), "ADMIN1010");
        assert!(!is_separated("ADMIN1010"));
        assert!(is_separated("ADMN-1010"));
    }
}
