use crate::app::suites;
use crate::config::{RunConfig, RunSettings, SuiteSettings};
use crate::core::runner::FailurePolicy;
use crate::domain::model::SuiteDefinition;
use crate::utils::error::{Result, SuiteError};
use crate::utils::validation::Validate;
use clap::{Parser, ValueEnum};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SuiteSelection {
    Platzi,
    FakeStore,
    All,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "store-api-suites")]
#[command(about = "Contract checks against the Platzi and FakeStore demo APIs")]
pub struct CliConfig {
    /// Suite to run
    #[arg(long, value_enum, default_value = "all")]
    pub suite: SuiteSelection,

    /// Path to a TOML run configuration
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the base URL (single suite only)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Run only cases whose name contains one of these (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip cases whose name contains one of these (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Stop a suite at its first failing case
    #[arg(long)]
    pub fail_fast: bool,

    /// Show the execution plan without sending requests
    #[arg(long)]
    pub dry_run: bool,

    /// Write one JSON report per suite into this directory
    #[arg(long)]
    pub report_dir: Option<String>,

    /// Execution ID for this run
    #[arg(long)]
    pub execution_id: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn selected_definitions(&self) -> Vec<SuiteDefinition> {
        match self.suite {
            SuiteSelection::Platzi => vec![suites::platzi::definition()],
            SuiteSelection::FakeStore => vec![suites::fake_store::definition()],
            SuiteSelection::All => suites::all(),
        }
    }

    pub fn load_run_config(&self) -> Result<RunConfig> {
        let config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Flags win over the file, the file wins over built-in defaults.
    pub fn resolve(
        &self,
        file: &RunConfig,
    ) -> Result<(RunSettings, Vec<(SuiteDefinition, SuiteSettings)>)> {
        let section = file.run.clone().unwrap_or_default();

        let run = RunSettings {
            execution_id: self
                .execution_id
                .clone()
                .or(section.execution_id)
                .unwrap_or_else(RunSettings::generate_execution_id),
            report_dir: self.report_dir.clone().or(section.report_dir),
            failure_policy: if self.fail_fast || file.fail_fast() {
                FailurePolicy::Stop
            } else {
                FailurePolicy::Continue
            },
            only: self.only.clone(),
            skip: self.skip.clone(),
        };
        run.validate()?;

        let definitions = self.selected_definitions();
        let mut selected = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let mut settings = SuiteSettings::from_definition(&definition);
            if let Some(overrides) = file.suite(&definition.name) {
                settings.apply_overrides(overrides);
            }
            if !settings.enabled {
                tracing::info!("⏭️ Suite '{}' disabled by configuration", definition.name);
                continue;
            }
            if let Some(timeout_ms) = self.timeout_ms {
                settings.timeout = Duration::from_millis(timeout_ms);
            }
            selected.push((definition, settings));
        }

        // Counted after disabled suites are dropped.
        if let Some(base_url) = &self.base_url {
            if selected.len() > 1 {
                return Err(SuiteError::ConfigError {
                    message: "--base-url needs a single --suite".to_string(),
                });
            }
            for (_, settings) in &mut selected {
                settings.base_url = base_url.clone();
            }
        }
        for (_, settings) in &selected {
            settings.validate()?;
        }

        Ok((run, selected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuiteOverrides;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::parse_from(std::iter::once("store-api-suites").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_select_every_suite() {
        let cli = parse(&[]);
        let (run, selected) = cli.resolve(&RunConfig::default()).unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(run.failure_policy, FailurePolicy::Continue);
        assert!(run.execution_id.starts_with("run_"));
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = RunConfig::default();
        file.suites.insert(
            "fake-store".to_string(),
            SuiteOverrides {
                base_url: Some("http://file.example".to_string()),
                timeout_ms: Some(1_000),
                ..SuiteOverrides::default()
            },
        );

        let cli = parse(&[
            "--suite",
            "fake-store",
            "--base-url",
            "http://127.0.0.1:8080",
            "--only",
            "products,carts",
            "--fail-fast",
        ]);
        let (run, selected) = cli.resolve(&file).unwrap();

        let (_, settings) = &selected[0];
        assert_eq!(settings.base_url, "http://127.0.0.1:8080");
        assert_eq!(settings.timeout, Duration::from_millis(1_000));
        assert_eq!(run.only, vec!["products", "carts"]);
        assert_eq!(run.failure_policy, FailurePolicy::Stop);
    }

    #[test]
    fn test_base_url_requires_single_suite() {
        let cli = parse(&["--base-url", "http://127.0.0.1:8080"]);
        assert!(matches!(
            cli.resolve(&RunConfig::default()),
            Err(SuiteError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_disabled_suite_is_dropped() {
        let mut file = RunConfig::default();
        file.suites.insert(
            "platzi".to_string(),
            SuiteOverrides {
                enabled: Some(false),
                ..SuiteOverrides::default()
            },
        );
        let (_, selected) = parse(&[]).resolve(&file).unwrap();
        let names: Vec<&str> = selected.iter().map(|(d, _)| d.name.as_str()).collect();
        assert_eq!(names, vec!["fake-store"]);
    }

    #[test]
    fn test_base_url_allowed_when_only_one_suite_is_enabled() {
        let mut file = RunConfig::default();
        file.suites.insert(
            "platzi".to_string(),
            SuiteOverrides {
                enabled: Some(false),
                ..SuiteOverrides::default()
            },
        );
        let (_, selected) = parse(&["--base-url", "http://127.0.0.1:8080"])
            .resolve(&file)
            .unwrap();

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].0.name, "fake-store");
        assert_eq!(selected[0].1.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_execution_id_cannot_leave_report_dir() {
        for id in ["../x", "nightly/1", "a\\b"] {
            let cli = parse(&["--execution-id", id, "--report-dir", "reports"]);
            assert!(matches!(
                cli.resolve(&RunConfig::default()),
                Err(SuiteError::InvalidConfigValueError { .. })
            ));
        }
    }
}
