//! Gap command handler

use course_return::core::{distance_between, GapInterval, Semester};
use course_return::debug;

/// Print the number of semesters strictly between `start` and `end`.
///
/// # Errors
/// Returns a printable message when either semester is not `YYYY.P`.
pub fn run(start: &str, end: &str) -> Result<(), String> {
    let start = parse_arg("START", start)?;
    let end = parse_arg("END", end)?;
    debug!("Gap between indices {} and {}", start.index(), end.index());

    println!("{}", describe(start, end));
    Ok(())
}

fn parse_arg(name: &str, value: &str) -> Result<Semester, String> {
    Semester::parse(value.trim()).map_err(|e| format!("✗ Invalid {name} semester '{value}': {e}"))
}

fn describe(start: Semester, end: Semester) -> String {
    let gap = distance_between(start, end);
    let mut lines = vec![format!("Semesters between {start} and {end}: {gap}")];
    if gap > 0 {
        let interval = GapInterval::between(start, end);
        lines.push(format!("Interval: {} .. {}", interval.start, interval.end));
    } else if gap < 0 {
        lines.push(format!("{end} does not come after {start}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sem(text: &str) -> Semester {
        text.parse().unwrap()
    }

    #[test]
    fn describes_interval_when_terms_are_missing() {
        let text = describe(sem("2024.1"), sem("2026.1"));
        assert!(text.contains(": 3"));
        assert!(text.contains("Interval: 2024.2 .. 2025.2"));
    }

    #[test]
    fn consecutive_terms_have_no_interval() {
        let text = describe(sem("2024.2"), sem("2025.1"));
        assert_eq!(text, "Semesters between 2024.2 and 2025.1: 0");
    }

    #[test]
    fn flags_reversed_terms() {
        let text = describe(sem("2025.1"), sem("2024.1"));
        assert!(text.contains(": -3"));
        assert!(text.contains("does not come after"));
    }

    #[test]
    fn rejects_malformed_argument() {
        assert!(run("2024.1", "2024.3").is_err());
    }
}
