//! Evaluate command handler

use course_return::config::Config;
use course_return::core::report::{self, DecisionReport, ReportFormat};
use course_return::core::{evaluate, RequestForm, Semester};
use course_return::{debug, error, info, verbose};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where and how to render the decision
pub struct OutputOptions {
    /// Format requested on the command line, if any
    pub format: Option<String>,
    /// File to write instead of stdout
    pub output: Option<PathBuf>,
    /// Also save into the configured reports directory
    pub save: bool,
}

/// Run the evaluate command for one request, printing the decision to stdout.
///
/// `form.current_semester` may be empty, in which case the configured
/// semester, then today's semester, is used.
///
/// # Errors
/// Returns a printable message when the form is invalid, the format is
/// unknown, or the decision cannot be rendered or written.
pub fn run(form: RequestForm, options: &OutputOptions, config: &Config) -> Result<(), String> {
    run_to(form, options, config, &mut io::stdout().lock())
}

/// Same as [`run`], writing the decision to `out` when no `-o` file is given.
///
/// Only the rendered decision goes to `out`; diagnostics and confirmations
/// go to stderr.
fn run_to(
    mut form: RequestForm,
    options: &OutputOptions,
    config: &Config,
    out: &mut impl Write,
) -> Result<(), String> {
    if form.current_semester.trim().is_empty() {
        let current = default_current_semester(config)?;
        verbose!("Using current semester {current}");
        form.current_semester = current.to_string();
    }

    let request = form.validate().map_err(|e| {
        error!("Rejected request ({}): {e}", e.field());
        format!("✗ {e}")
    })?;
    debug!("Validated request: {request:?}");

    let result = evaluate(&request);
    info!(
        "Student {}: eligible={} rule={} gap={}",
        request.student_id,
        result.is_eligible,
        result.justification.code(),
        result.gap_semesters
    );

    let format = resolve_format(options.format.as_deref(), config)?;
    let decision = DecisionReport::new(&request, &result);
    let rendered = decision
        .render(format)
        .map_err(|e| format!("✗ Failed to render {format} report: {e}"))?;

    match &options.output {
        Some(path) => {
            write_file(path, &rendered)?;
            eprintln!("✓ Decision written to: {}", path.display());
        }
        None => out
            .write_all(rendered.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| format!("✗ Failed to print decision: {e}"))?,
    }

    if options.save {
        let dir = Path::new(&config.report.reports_dir);
        let path = report::write_report(&decision, format, dir).map_err(|e| {
            error!("Failed to save report into {}: {e}", dir.display());
            format!("✗ Failed to save report into {}: {e}", dir.display())
        })?;
        eprintln!("✓ Report saved: {}", path.display());
    }

    Ok(())
}

fn default_current_semester(config: &Config) -> Result<Semester, String> {
    Ok(config.current_semester()?.unwrap_or_else(Semester::current))
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<ReportFormat, String> {
    requested
        .map_or_else(|| config.report_format(), |f| f.parse::<ReportFormat>())
        .map_err(|e| format!("✗ {e}"))
}

fn write_file(path: &Path, contents: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("✗ Failed to create {}: {e}", parent.display()))?;
        }
    }
    fs::write(path, contents).map_err(|e| {
        error!("Failed to write {}: {e}", path.display());
        format!("✗ Failed to write {}: {e}", path.display())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(current: &str, format: &str) -> Config {
        let mut config = Config::from_defaults();
        config.evaluation.current_semester = current.to_string();
        config.report.format = format.to_string();
        config
    }

    #[test]
    fn configured_semester_wins_over_today() {
        let semester = default_current_semester(&config("2030.2", "")).unwrap();
        assert_eq!(semester.to_string(), "2030.2");
    }

    #[test]
    fn empty_configured_semester_falls_back_to_today() {
        let semester = default_current_semester(&config("", "")).unwrap();
        assert_eq!(semester, Semester::current());
    }

    #[test]
    fn bad_configured_semester_is_reported() {
        assert!(default_current_semester(&config("2030", "")).is_err());
    }

    #[test]
    fn cli_format_overrides_config() {
        let cfg = config("", "html");
        assert_eq!(resolve_format(None, &cfg), Ok(ReportFormat::Html));
        assert_eq!(resolve_format(Some("json"), &cfg), Ok(ReportFormat::Json));
        assert!(resolve_format(Some("pdf"), &cfg).is_err());
    }

    #[test]
    fn writes_decision_to_output_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("nested").join("decision.json");
        let form = RequestForm {
            student_id: "20210054".to_string(),
            is_cancelled: false,
            is_same_course: true,
            last_active_semester: "2023.2".to_string(),
            current_semester: "2025.1".to_string(),
        };
        let options = OutputOptions {
            format: Some("json".to_string()),
            output: Some(output.clone()),
            save: false,
        };

        run(form, &options, &config("", "")).unwrap();

        let written = fs::read_to_string(output).unwrap();
        assert!(written.contains("\"is_eligible\": true"));
        assert!(written.contains("\"gap_semesters\": 2"));
    }

    #[test]
    fn json_on_stdout_stays_parseable_when_verbose() {
        course_return::logger::enable_verbose();
        let form = RequestForm {
            student_id: "1".to_string(),
            is_cancelled: false,
            is_same_course: true,
            last_active_semester: "2023.2".to_string(),
            current_semester: String::new(),
        };
        let options = OutputOptions {
            format: Some("json".to_string()),
            output: None,
            save: false,
        };
        let mut stdout = Vec::new();

        run_to(form, &options, &config("2025.1", ""), &mut stdout).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&stdout).unwrap();
        assert_eq!(value["current_semester"], "2025.1");
        assert_eq!(value["is_eligible"], true);
    }

    #[test]
    fn invalid_form_is_rejected() {
        let form = RequestForm {
            student_id: "   ".to_string(),
            ..RequestForm::default()
        };
        let options = OutputOptions {
            format: None,
            output: None,
            save: false,
        };
        let err = run(form, &options, &config("2025.1", "")).unwrap_err();
        assert!(err.contains("matrícula"));
    }
}
