#![allow(dead_code)]

use serde_json::Value;
use store_api_suites::app::suites;
use store_api_suites::domain::model::RequestBody;
use store_api_suites::{RunSettings, SuiteDefinition, SuiteReport, SuiteSettings};

pub fn settings_for(definition: &SuiteDefinition, base_url: String) -> SuiteSettings {
    let mut settings = SuiteSettings::from_definition(definition);
    settings.base_url = base_url;
    settings
}

pub async fn run_suite(
    definition: &SuiteDefinition,
    settings: &SuiteSettings,
    run: &RunSettings,
) -> anyhow::Result<SuiteReport> {
    let runner = suites::build_runner(definition, settings, run)?;
    Ok(runner.execute_all().await)
}

/// Pins a generated body so a mock server can answer deterministically.
pub fn pin_body(definition: &mut SuiteDefinition, case_name: &str, body: Value) {
    let case = definition
        .cases
        .iter_mut()
        .find(|c| c.name == case_name)
        .unwrap_or_else(|| panic!("no case named {}", case_name));
    case.body = Some(RequestBody::Json(body));
}

pub fn assert_all_passed(report: &SuiteReport) {
    let failures: Vec<String> = report
        .steps
        .iter()
        .filter(|s| s.outcome.is_failure())
        .map(|s| format!("{}: {:?}", s.name, s.outcome))
        .collect();
    assert!(failures.is_empty(), "failed steps: {:#?}", failures);
}
