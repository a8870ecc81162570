pub mod fake_store;
pub mod platzi;

use crate::config::{RunSettings, SuiteSettings};
use crate::core::http_step::{build_client, HttpStep};
use crate::core::runner::SuiteRunner;
use crate::domain::model::SuiteDefinition;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

pub fn all() -> Vec<SuiteDefinition> {
    vec![platzi::definition(), fake_store::definition()]
}

pub fn names() -> Vec<&'static str> {
    vec![platzi::NAME, fake_store::NAME]
}

pub fn find(name: &str) -> Option<SuiteDefinition> {
    match name {
        platzi::NAME => Some(platzi::definition()),
        fake_store::NAME => Some(fake_store::definition()),
        _ => None,
    }
}

/// Wires a suite definition to its target. Setup steps always run; cases are
/// filtered by the run's `only`/`skip` selection.
pub fn build_runner(
    definition: &SuiteDefinition,
    settings: &SuiteSettings,
    run: &RunSettings,
) -> Result<SuiteRunner> {
    settings.validate()?;
    let client = build_client(settings.timeout, &settings.headers)?;

    let mut runner = SuiteRunner::new(&definition.name, &settings.base_url, run.execution_id.clone())
        .with_failure_policy(run.failure_policy);

    for step in &definition.setup {
        runner.add_setup(Box::new(HttpStep::new(
            &settings.base_url,
            step.clone(),
            client.clone(),
        )));
    }

    for step in definition.cases.iter().filter(|c| run.selects(&c.name)) {
        runner.add_case(Box::new(HttpStep::new(
            &settings.base_url,
            step.clone(),
            client.clone(),
        )));
    }

    tracing::debug!(
        "📦 {}: {} setup steps, {} of {} cases selected",
        definition.name,
        definition.setup.len(),
        runner.case_names().len(),
        definition.cases.len()
    );

    Ok(runner)
}
