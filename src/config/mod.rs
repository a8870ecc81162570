#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::runner::FailurePolicy;
use crate::domain::model::SuiteDefinition;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::collections::HashMap;
use std::time::Duration;

pub use toml_config::{RunConfig, RunSection, SuiteOverrides};

pub const MAX_TIMEOUT_MS: u64 = 600_000;

/// Effective target of one suite after defaults, file and flags are layered.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteSettings {
    pub suite_name: String,
    pub enabled: bool,
    pub base_url: String,
    pub timeout: Duration,
    pub headers: HashMap<String, String>,
}

impl SuiteSettings {
    pub fn from_definition(definition: &SuiteDefinition) -> Self {
        Self {
            suite_name: definition.name.clone(),
            enabled: true,
            base_url: definition.default_base_url.clone(),
            timeout: definition.default_timeout,
            headers: HashMap::new(),
        }
    }

    pub fn apply_overrides(&mut self, overrides: &SuiteOverrides) {
        if let Some(enabled) = overrides.enabled {
            self.enabled = enabled;
        }
        if let Some(base_url) = &overrides.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.timeout = Duration::from_millis(timeout_ms);
        }
        if let Some(headers) = &overrides.headers {
            self.headers
                .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
}

impl Validate for SuiteSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url(&format!("suites.{}.base_url", self.suite_name), &self.base_url)?;
        validation::validate_range(
            &format!("suites.{}.timeout_ms", self.suite_name),
            self.timeout.as_millis() as u64,
            1,
            MAX_TIMEOUT_MS,
        )
    }
}

/// Settings shared by every suite of one invocation.
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub execution_id: String,
    pub report_dir: Option<String>,
    pub failure_policy: FailurePolicy,
    pub only: Vec<String>,
    pub skip: Vec<String>,
}

impl RunSettings {
    pub fn new(execution_id: String) -> Self {
        Self {
            execution_id,
            ..Self::default()
        }
    }

    pub fn generate_execution_id() -> String {
        format!("run_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    }

    /// `only` keeps cases whose name contains any filter; `skip` drops them.
    pub fn selects(&self, case_name: &str) -> bool {
        let lowered = case_name.to_lowercase();
        let hit = |filters: &[String]| filters.iter().any(|f| lowered.contains(&f.to_lowercase()));

        (self.only.is_empty() || hit(&self.only)) && !hit(&self.skip)
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("run.execution_id", &self.execution_id)?;
        validation::validate_path_segment("run.execution_id", &self.execution_id)?;
        if let Some(dir) = &self.report_dir {
            validation::validate_non_empty_string("run.report_dir", dir)?;
        }
        Ok(())
    }
}
