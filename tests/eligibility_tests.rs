//! Integration tests for the return-to-course rules

use course_return::core::eligibility::GAP_LIMIT;
use course_return::core::{
    distance_between, evaluate, parse_semester, EligibilityRequest, Justification, Semester,
};

fn sem(text: &str) -> Semester {
    parse_semester(text).expect("valid semester")
}

fn request(last_active: &str, current: &str) -> EligibilityRequest {
    EligibilityRequest {
        student_id: "20210054".to_string(),
        is_cancelled: false,
        current_semester: sem(current),
        last_active_semester: sem(last_active),
        is_same_course: true,
    }
}

#[test]
fn parse_rejects_malformed_text() {
    for text in ["", "2024", "2024.3", "2024.1.2", "abc.1"] {
        assert!(parse_semester(text).is_err(), "{text:?} should be rejected");
    }
}

#[test]
fn gap_boundaries() {
    let start = sem("2024.1");
    assert_eq!(distance_between(start, sem("2024.2")), 0);
    assert_eq!(distance_between(start, sem("2025.1")), 1);
    assert_eq!(distance_between(start, sem("2026.1")), 3);
    assert_eq!(distance_between(start, sem("2026.2")), 4);
}

#[test]
fn index_is_continuous_across_year_boundary() {
    let s = sem("2024.2");
    assert_eq!(s.next().index() - s.index(), 1);
    assert_eq!(s.next().index(), sem("2025.1").index());
}

#[test]
fn cancellation_takes_precedence() {
    let mut req = request("2019.1", "2024.2");
    req.is_cancelled = true;
    req.is_same_course = false;
    assert_eq!(distance_between(req.last_active_semester, req.current_semester), 10);

    let result = evaluate(&req);
    assert!(!result.is_eligible);
    assert_eq!(result.justification, Justification::Cancelled);
    assert_eq!(result.gap_semesters, 0);
}

#[test]
fn threshold_edge() {
    let three = evaluate(&request("2024.1", "2026.1"));
    assert!(three.is_eligible);
    assert_eq!(three.gap_semesters, 3);

    let four = evaluate(&request("2024.1", "2026.2"));
    assert!(!four.is_eligible);
    assert_eq!(four.gap_semesters, GAP_LIMIT);
    assert!(four.justification.to_string().contains("limite de 4"));
}

#[test]
fn reversed_terms_are_an_ordering_error() {
    let result = evaluate(&request("2025.1", "2024.1"));
    assert!(!result.is_eligible);
    assert!(result.gap_semesters < 0);
    assert_eq!(result.gap_semesters, -3);
    assert_eq!(result.justification.code(), "invalid_order");
    assert!(result
        .justification
        .to_string()
        .contains("deve ser posterior ao último vínculo"));
}

#[test]
fn end_to_end_scenario() {
    let result = evaluate(&request("2023.2", "2025.1"));

    assert!(result.is_eligible);
    assert_eq!(result.gap_semesters, 2);
    assert_eq!(result.gap_interval.start.to_string(), "2024.1");
    assert_eq!(result.gap_interval.end.to_string(), "2024.2");

    let text = result.justification.to_string();
    assert!(text.contains("2 semestre(s)"));
    assert!(text.contains("(de 2024.1 a 2024.2)"));
    assert!(text.contains("menor que 4"));
}

#[test]
fn evaluation_is_repeatable() {
    let req = request("2022.1", "2023.2");
    assert_eq!(evaluate(&req), evaluate(&req));
}
