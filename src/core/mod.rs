//! Core domain: semesters, eligibility rules, form validation and reports

pub mod eligibility;
pub mod form;
pub mod report;
pub mod semester;

pub use eligibility::{evaluate, EligibilityRequest, EligibilityResult, GapInterval, Justification};
pub use form::{FormError, RequestForm};
pub use semester::{distance_between, parse_semester, Period, Semester, SemesterParseError};

/// Returns the current version of the `course-return` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
