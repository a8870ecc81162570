use crate::app::suites;
use crate::utils::error::{Result, SuiteError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    pub run: Option<RunSection>,
    #[serde(default)]
    pub suites: HashMap<String, SuiteOverrides>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSection {
    pub execution_id: Option<String>,
    pub report_dir: Option<String>,
    pub fail_fast: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteOverrides {
    pub enabled: Option<bool>,
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

impl RunConfig {
    /// Loads a run configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SuiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SuiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn suite(&self, name: &str) -> Option<&SuiteOverrides> {
        self.suites.get(name)
    }

    pub fn fail_fast(&self) -> bool {
        self.run.as_ref().and_then(|r| r.fail_fast).unwrap_or(false)
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        for (name, overrides) in &self.suites {
            if suites::find(name).is_none() {
                return Err(SuiteError::ConfigValidationError {
                    field: format!("suites.{}", name),
                    message: format!(
                        "Unknown suite. Known suites: {}",
                        suites::names().join(", ")
                    ),
                });
            }
            if let Some(base_url) = &overrides.base_url {
                validation::validate_url(&format!("suites.{}.base_url", name), base_url)?;
            }
            if let Some(timeout_ms) = overrides.timeout_ms {
                validation::validate_range(
                    &format!("suites.{}.timeout_ms", name),
                    timeout_ms,
                    1,
                    super::MAX_TIMEOUT_MS,
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_run_config() {
        let toml_content = r#"
[run]
execution_id = "nightly"
report_dir = "./reports"
fail_fast = true

[suites.platzi]
timeout_ms = 15000

[suites.fake-store]
enabled = false
base_url = "http://localhost:3000"

[suites.fake-store.headers]
User-Agent = "store-api-suites"
"#;

        let config = RunConfig::from_toml_str(toml_content).unwrap();
        assert!(config.fail_fast());
        assert_eq!(config.suite("platzi").unwrap().timeout_ms, Some(15000));
        let fake_store = config.suite("fake-store").unwrap();
        assert_eq!(fake_store.enabled, Some(false));
        assert_eq!(
            fake_store.headers.as_ref().unwrap()["User-Agent"],
            "store-api-suites"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STORE_SUITES_TEST_URL", "http://127.0.0.1:9999");

        let toml_content = r#"
[suites.platzi]
base_url = "${STORE_SUITES_TEST_URL}/api/v1"
"#;

        let config = RunConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.suite("platzi").unwrap().base_url.as_deref(),
            Some("http://127.0.0.1:9999/api/v1")
        );

        std::env::remove_var("STORE_SUITES_TEST_URL");
    }

    #[test]
    fn test_unknown_suite_is_rejected() {
        let config = RunConfig::from_toml_str("[suites.petstore]\nenabled = true\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(SuiteError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config =
            RunConfig::from_toml_str("[suites.platzi]\nbase_url = \"${NOT_SET_ANYWHERE}\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[run]\nexecution_id = \"from-file\"\n")
            .unwrap();

        let config = RunConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.run.unwrap().execution_id.as_deref(),
            Some("from-file")
        );
    }
}
