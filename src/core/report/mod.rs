//! Decision reports
//!
//! Renders an evaluated request as plain text, JSON, Markdown or HTML, and
//! writes renderings into a reports directory.

pub mod formats;

pub use formats::ReportFormat;

use crate::core::eligibility::{EligibilityRequest, EligibilityResult, GAP_LIMIT};
use crate::core::semester::Semester;
use askama::Template;
use serde::Serialize;
use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot of one request and its decision, ready to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionReport {
    /// Student registration number
    pub student_id: String,
    /// Whether the enrollment is cancelled
    pub is_cancelled: bool,
    /// Whether the return is to the course of origin
    pub is_same_course: bool,
    /// Last active term
    pub last_active_semester: Semester,
    /// Return term
    pub current_semester: Semester,
    /// Decision
    pub is_eligible: bool,
    /// Code of the rule that decided
    pub rule: &'static str,
    /// Rendered justification
    pub justification: String,
    /// Signed gap in terms
    pub gap_semesters: i128,
    /// Gap limit in force
    pub gap_limit: i128,
    /// First missing term
    pub gap_interval_start: Semester,
    /// Last missing term
    pub gap_interval_end: Semester,
}

#[derive(Template)]
#[template(path = "decision.md")]
struct MarkdownTemplate<'a> {
    report: &'a DecisionReport,
}

#[derive(Template)]
#[template(path = "decision.html")]
struct HtmlTemplate<'a> {
    report: &'a DecisionReport,
}

const fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

impl DecisionReport {
    /// Build a report from a request and its result
    #[must_use]
    pub fn new(request: &EligibilityRequest, result: &EligibilityResult) -> Self {
        Self {
            student_id: request.student_id.clone(),
            is_cancelled: request.is_cancelled,
            is_same_course: request.is_same_course,
            last_active_semester: request.last_active_semester,
            current_semester: request.current_semester,
            is_eligible: result.is_eligible,
            rule: result.justification.code(),
            justification: result.justification.to_string(),
            gap_semesters: result.gap_semesters,
            gap_limit: GAP_LIMIT,
            gap_interval_start: result.gap_interval.start,
            gap_interval_end: result.gap_interval.end,
        }
    }

    /// Render the report in the given format
    ///
    /// # Errors
    /// Returns an error if JSON serialization or template rendering fails.
    pub fn render(&self, format: ReportFormat) -> Result<String, Box<dyn Error>> {
        let rendered = match format {
            ReportFormat::Text => self.render_text(),
            ReportFormat::Json => serde_json::to_string_pretty(self)?,
            ReportFormat::Markdown => MarkdownTemplate { report: self }.render()?,
            ReportFormat::Html => HtmlTemplate { report: self }.render()?,
        };
        Ok(rendered)
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        let decision = if self.is_eligible {
            "ELIGIBLE"
        } else {
            "NOT ELIGIBLE"
        };

        // Writing to a String cannot fail
        let _ = writeln!(out, "Student:        {}", self.student_id);
        let _ = writeln!(out, "Last active:    {}", self.last_active_semester);
        let _ = writeln!(out, "Current:        {}", self.current_semester);
        let _ = writeln!(out, "Cancelled:      {}", yes_no(self.is_cancelled));
        let _ = writeln!(out, "Same course:    {}", yes_no(self.is_same_course));
        let _ = writeln!(
            out,
            "Gap:            {} semester(s) (limit {})",
            self.gap_semesters, self.gap_limit
        );
        let _ = writeln!(
            out,
            "Gap interval:   {} .. {}",
            self.gap_interval_start, self.gap_interval_end
        );
        let _ = writeln!(out, "Decision:       {decision} [{}]", self.rule);
        let _ = writeln!(out, "Justification:  {}", self.justification);
        out
    }

    /// File name used when saving into a reports directory
    #[must_use]
    pub fn file_name(&self, format: ReportFormat) -> String {
        let safe_id: String = self
            .student_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!(
            "{safe_id}_{}.{}",
            self.current_semester.to_string().replace('.', "-"),
            format.extension()
        )
    }
}

/// Render a report and write it into `dir`, creating the directory if needed
///
/// # Returns
/// The path of the written file.
///
/// # Errors
/// Returns an error if rendering fails or the file cannot be written.
pub fn write_report(
    report: &DecisionReport,
    format: ReportFormat,
    dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    let path = dir.join(report.file_name(format));
    fs::write(&path, report.render(format)?)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::eligibility::evaluate;

    fn report(student_id: &str, cancelled: bool) -> DecisionReport {
        let request = EligibilityRequest {
            student_id: student_id.to_string(),
            is_cancelled: cancelled,
            current_semester: "2025.1".parse().unwrap(),
            last_active_semester: "2023.2".parse().unwrap(),
            is_same_course: true,
        };
        DecisionReport::new(&request, &evaluate(&request))
    }

    #[test]
    fn text_lists_decision_and_interval() {
        let text = report("20210054", false).render(ReportFormat::Text).unwrap();
        assert!(text.contains("Decision:       ELIGIBLE [eligible]"));
        assert!(text.contains("Gap interval:   2024.1 .. 2024.2"));
        assert!(text.contains("2 semestre(s)"));
    }

    #[test]
    fn json_uses_semester_text() {
        let json = report("20210054", true).render(ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rule"], "cancelled");
        assert_eq!(value["is_eligible"], false);
        assert_eq!(value["gap_semesters"], 0);
        assert_eq!(value["gap_interval_start"], "2024.1");
    }

    #[test]
    fn file_name_is_filesystem_safe() {
        let r = report("2021/00 54", false);
        assert_eq!(r.file_name(ReportFormat::Markdown), "2021_00_54_2025-1.md");
    }
}
