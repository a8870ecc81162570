use crate::config::{RunSettings, SuiteSettings};
use crate::domain::model::{StepOutcome, SuiteDefinition, SuiteReport};
use crate::domain::ports::Storage;
use crate::utils::error::{ErrorSeverity, Result, SuiteError};

pub const EXIT_CASE_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;
pub const EXIT_SYSTEM_ERROR: i32 = 3;

/// Exit code for an error that stopped the run before or between suites.
pub fn exit_code_for_error(e: &SuiteError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium | ErrorSeverity::High => EXIT_CONFIG_ERROR,
        ErrorSeverity::Critical => EXIT_SYSTEM_ERROR,
    }
}

/// 0 when every executed case passed or was skipped.
pub fn exit_code_for_reports(reports: &[SuiteReport]) -> i32 {
    if reports.iter().all(SuiteReport::is_success) {
        0
    } else {
        EXIT_CASE_FAILURE
    }
}

/// What a dry run would execute: setup steps, then the selected cases.
pub fn render_plan(run: &RunSettings, selected: &[(SuiteDefinition, SuiteSettings)]) -> String {
    let mut lines = vec![format!("Execution {}", run.execution_id)];
    for (definition, settings) in selected {
        lines.push(format!(
            "{} -> {} (timeout {:?})",
            definition.name, settings.base_url, settings.timeout
        ));
        for step in &definition.setup {
            lines.push(format!("  setup: {} {}", step.method, step.path));
        }
        for step in definition.cases.iter().filter(|c| run.selects(&c.name)) {
            lines.push(format!(
                "  {} {} -> {}  [{}]",
                step.method,
                step.path,
                step.expect_status.as_u16(),
                step.name
            ));
        }
    }
    lines.join("\n")
}

pub fn report_filename(report: &SuiteReport) -> String {
    format!("{}_{}.json", report.suite_name, report.execution_id)
}

/// Serializes the report as pretty JSON and hands it to storage.
pub async fn write_report<S: Storage>(storage: &S, report: &SuiteReport) -> Result<String> {
    let json = serde_json::to_vec_pretty(report)?;
    let path = storage.write_file(&report_filename(report), &json).await?;
    tracing::info!("💾 Report for '{}' saved to {}", report.suite_name, path);
    Ok(path)
}

/// Human-readable lines for the terminal, one per step.
pub fn render_text(report: &SuiteReport) -> String {
    let mut lines = vec![format!(
        "{} ({}) against {}",
        report.suite_name, report.execution_id, report.base_url
    )];

    for step in &report.steps {
        let marker = match &step.outcome {
            StepOutcome::Passed => "PASS",
            StepOutcome::Failed(_) => "FAIL",
            StepOutcome::Skipped(_) => "SKIP",
        };
        let prefix = if step.setup { "setup: " } else { "" };
        let mut line = format!("  {} {}{} ({}ms)", marker, prefix, step.name, step.duration_ms);
        match &step.outcome {
            StepOutcome::Failed(detail) | StepOutcome::Skipped(detail) => {
                line.push_str(&format!("\n       {}", detail));
            }
            StepOutcome::Passed => {}
        }
        lines.push(line);
    }

    lines.push(format!(
        "  {} passed, {} failed, {} skipped in {}ms",
        report.passed(),
        report.failed(),
        report.skipped(),
        report.duration_ms
    ));
    lines.join("\n")
}
