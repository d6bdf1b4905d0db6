//! Request form validation
//!
//! Turns the raw text a user typed into an [`EligibilityRequest`], rejecting
//! the submission with a field-specific message when a field is unusable.

use crate::core::eligibility::EligibilityRequest;
use crate::core::semester::{Semester, SemesterParseError};
use std::fmt;

/// Raw, unvalidated request fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestForm {
    /// Student registration number as typed
    pub student_id: String,
    /// Whether the enrollment is cancelled
    pub is_cancelled: bool,
    /// Whether the return is to the course of origin
    pub is_same_course: bool,
    /// Last active term as typed (`YYYY.P`)
    pub last_active_semester: String,
    /// Return term as typed (`YYYY.P`)
    pub current_semester: String,
}

/// Why a form was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Student id is empty or whitespace
    BlankStudentId,
    /// Return term is not `YYYY.P`
    InvalidCurrentSemester(SemesterParseError),
    /// Last active term is not `YYYY.P`
    InvalidLastActiveSemester(SemesterParseError),
}

impl FormError {
    /// Name of the offending field
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BlankStudentId => "student_id",
            Self::InvalidCurrentSemester(_) => "current_semester",
            Self::InvalidLastActiveSemester(_) => "last_active_semester",
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankStudentId => write!(f, "Por favor, insira a matrícula do aluno."),
            Self::InvalidCurrentSemester(_) => write!(
                f,
                "Semestre atual inválido. Use o formato AAAA.P (ex: 2024.1)"
            ),
            Self::InvalidLastActiveSemester(_) => write!(
                f,
                "Último semestre inválido. Use o formato AAAA.P (ex: 2023.2)"
            ),
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BlankStudentId => None,
            Self::InvalidCurrentSemester(e) | Self::InvalidLastActiveSemester(e) => Some(e),
        }
    }
}

impl RequestForm {
    /// Validate the fields and build a request
    ///
    /// Fields are checked in order: student id, return term, last active term.
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// Returns the first [`FormError`] found.
    pub fn validate(&self) -> Result<EligibilityRequest, FormError> {
        let student_id = self.student_id.trim();
        if student_id.is_empty() {
            return Err(FormError::BlankStudentId);
        }

        let current_semester = Semester::parse(self.current_semester.trim())
            .map_err(FormError::InvalidCurrentSemester)?;
        let last_active_semester = Semester::parse(self.last_active_semester.trim())
            .map_err(FormError::InvalidLastActiveSemester)?;

        Ok(EligibilityRequest {
            student_id: student_id.to_string(),
            is_cancelled: self.is_cancelled,
            current_semester,
            last_active_semester,
            is_same_course: self.is_same_course,
        })
    }
}
