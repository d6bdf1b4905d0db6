//! Integration tests for decision reports

use course_return::core::report::{write_report, DecisionReport, ReportFormat};
use course_return::core::{evaluate, EligibilityRequest};
use std::fs;
use tempfile::TempDir;

fn decision(last_active: &str, current: &str, same_course: bool) -> DecisionReport {
    let request = EligibilityRequest {
        student_id: "20210054".to_string(),
        is_cancelled: false,
        current_semester: current.parse().unwrap(),
        last_active_semester: last_active.parse().unwrap(),
        is_same_course: same_course,
    };
    DecisionReport::new(&request, &evaluate(&request))
}

#[test]
fn markdown_report_contains_decision() {
    let md = decision("2023.2", "2025.1", true)
        .render(ReportFormat::Markdown)
        .unwrap();
    assert!(md.starts_with("# Return to Course: 20210054"));
    assert!(md.contains("| Gap | 2 semester(s), limit 4 |"));
    assert!(md.contains("**Eligible**"));
    assert!(md.contains("2 semestre(s)"));
}

#[test]
fn html_report_marks_ineligible_decision() {
    let html = decision("2023.2", "2025.1", false)
        .render(ReportFormat::Html)
        .unwrap();
    assert!(html.contains("<h2 class=\"ineligible\">Not eligible</h2>"));
    assert!(html.contains("data-rule=\"different_course\""));
    assert!(html.contains("O retorno não é para o mesmo curso"));
}

#[test]
fn json_report_round_trips_through_serde() {
    let json = decision("2022.1", "2024.2", true)
        .render(ReportFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["rule"], "over_limit");
    assert_eq!(value["gap_semesters"], 4);
    assert_eq!(value["gap_limit"], 4);
    assert_eq!(value["current_semester"], "2024.2");
}

#[test]
fn write_report_creates_directory_and_file() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("reports");
    let report = decision("2023.2", "2025.1", true);

    let path = write_report(&report, ReportFormat::Text, &dir).unwrap();

    assert_eq!(path, dir.join("20210054_2025-1.txt"));
    let contents = fs::read_to_string(path).unwrap();
    assert!(contents.contains("Decision:       ELIGIBLE [eligible]"));
}
