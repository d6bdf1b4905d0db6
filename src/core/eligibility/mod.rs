//! Return-to-course eligibility rules
//!
//! A request is checked against three rules in order, and the first rule that
//! fails decides the outcome:
//! 1. the enrollment must not be cancelled
//! 2. the return must be to the same course
//! 3. fewer than [`GAP_LIMIT`] terms may lie between the last active term and
//!    the current term, and the current term must come after the last active one

pub mod justification;

pub use justification::Justification;

use crate::core::semester::{distance_between, Semester};

/// Gap (in terms) at which a return is no longer ordinary
pub const GAP_LIMIT: i128 = 4;

/// A single return-to-course request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityRequest {
    /// Student registration number
    pub student_id: String,
    /// Whether the enrollment is cancelled
    pub is_cancelled: bool,
    /// Term the student wants to return in
    pub current_semester: Semester,
    /// Last term with an active or suspended enrollment
    pub last_active_semester: Semester,
    /// Whether the return is to the course of origin
    pub is_same_course: bool,
}

/// Terms the student was away, as shown to the user
///
/// `start` is the term after the last active one and `end` the term before the
/// current one. When no term is missing, `end` precedes `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapInterval {
    /// First missing term
    pub start: Semester,
    /// Last missing term
    pub end: Semester,
}

impl GapInterval {
    /// Interval between a last active term and a current term
    #[must_use]
    pub const fn between(last_active: Semester, current: Semester) -> Self {
        Self {
            start: last_active.next(),
            end: current.previous(),
        }
    }
}

/// Decision for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityResult {
    /// Whether the request is an ordinary return to course
    pub is_eligible: bool,
    /// Why
    pub justification: Justification,
    /// Terms between the last active and current terms (0 when a status rule fired)
    pub gap_semesters: i128,
    /// Missing terms, computed for every outcome
    pub gap_interval: GapInterval,
}

impl EligibilityResult {
    const fn ineligible(justification: Justification, gap: i128, interval: GapInterval) -> Self {
        Self {
            is_eligible: false,
            justification,
            gap_semesters: gap,
            gap_interval: interval,
        }
    }
}

/// Evaluate a request against the return-to-course rules
///
/// Never fails: an out-of-order pair of terms is reported as an ineligible
/// result carrying the negative gap.
#[must_use]
pub fn evaluate(request: &EligibilityRequest) -> EligibilityResult {
    let interval = GapInterval::between(request.last_active_semester, request.current_semester);

    if request.is_cancelled {
        return EligibilityResult::ineligible(Justification::Cancelled, 0, interval);
    }

    if !request.is_same_course {
        return EligibilityResult::ineligible(Justification::DifferentCourse, 0, interval);
    }

    let gap = distance_between(request.last_active_semester, request.current_semester);

    if gap < 0 {
        return EligibilityResult::ineligible(Justification::InvalidOrder { gap }, gap, interval);
    }

    if gap >= GAP_LIMIT {
        let justification = Justification::OverLimit {
            gap,
            limit: GAP_LIMIT,
            interval,
        };
        return EligibilityResult::ineligible(justification, gap, interval);
    }

    EligibilityResult {
        is_eligible: true,
        justification: Justification::Eligible {
            gap,
            limit: GAP_LIMIT,
            interval,
        },
        gap_semesters: gap,
        gap_interval: interval,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(last: &str, current: &str) -> EligibilityRequest {
        EligibilityRequest {
            student_id: "20210054".to_string(),
            is_cancelled: false,
            current_semester: current.parse().unwrap(),
            last_active_semester: last.parse().unwrap(),
            is_same_course: true,
        }
    }

    #[test]
    fn cancellation_wins_over_other_rules() {
        let mut req = request("2019.1", "2024.2");
        req.is_cancelled = true;
        req.is_same_course = false;

        let result = evaluate(&req);
        assert!(!result.is_eligible);
        assert_eq!(result.justification, Justification::Cancelled);
        assert_eq!(result.gap_semesters, 0);
    }

    #[test]
    fn different_course_is_checked_before_gap() {
        let mut req = request("2024.1", "2023.1");
        req.is_same_course = false;

        let result = evaluate(&req);
        assert_eq!(result.justification, Justification::DifferentCourse);
        assert_eq!(result.gap_semesters, 0);
    }

    #[test]
    fn gap_of_three_is_eligible() {
        let result = evaluate(&request("2024.1", "2026.1"));
        assert!(result.is_eligible);
        assert_eq!(result.gap_semesters, 3);
        assert_eq!(result.justification.code(), "eligible");
    }

    #[test]
    fn gap_of_four_is_not() {
        let result = evaluate(&request("2024.1", "2026.2"));
        assert!(!result.is_eligible);
        assert_eq!(result.gap_semesters, 4);
        assert_eq!(result.justification.code(), "over_limit");
    }

    #[test]
    fn consecutive_terms_have_zero_gap() {
        let result = evaluate(&request("2024.2", "2025.1"));
        assert!(result.is_eligible);
        assert_eq!(result.gap_semesters, 0);
    }

    #[test]
    fn same_term_is_an_ordering_error() {
        let result = evaluate(&request("2024.1", "2024.1"));
        assert!(!result.is_eligible);
        assert_eq!(result.justification, Justification::InvalidOrder { gap: -1 });
        assert_eq!(result.gap_semesters, -1);
    }

    #[test]
    fn interval_is_computed_even_when_status_rule_fires() {
        let mut req = request("2023.2", "2025.1");
        req.is_cancelled = true;

        let result = evaluate(&req);
        assert_eq!(result.gap_interval.start.to_string(), "2024.1");
        assert_eq!(result.gap_interval.end.to_string(), "2024.2");
    }
    #[test]
    fn interval_is_computed_for_different_course() {
        let mut req = request("2023.2", "2025.1");
        req.is_same_course = false;

        let result = evaluate(&req);
        assert_eq!(result.justification, Justification::DifferentCourse);
        assert_eq!(result.gap_interval.start.to_string(), "2024.1");
        assert_eq!(result.gap_interval.end.to_string(), "2024.2");
    }

    #[test]
    fn interval_is_computed_for_reversed_terms() {
        let result = evaluate(&request("2025.1", "2024.1"));
        assert_eq!(result.justification, Justification::InvalidOrder { gap: -3 });
        assert_eq!(result.gap_interval.start.to_string(), "2025.2");
        assert_eq!(result.gap_interval.end.to_string(), "2023.2");
    }
}
