use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{step}: expected status {expected}, got {actual} (body: {body})")]
    UnexpectedStatus {
        step: String,
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("{step}: assertion failed: {message}")]
    AssertionError { step: String, message: String },

    #[error("{step}: cannot capture '{name}' from {pointer}")]
    CaptureError {
        step: String,
        name: String,
        pointer: String,
    },

    #[error("Unresolved placeholder '{{{placeholder}}}' in {template}")]
    TemplateError {
        template: String,
        placeholder: String,
    },

    #[error("Setup step '{step}' failed: {details}")]
    SetupError { step: String, details: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Contract,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SuiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SuiteError::ApiError(_) => ErrorCategory::Network,
            SuiteError::UnexpectedStatus { .. }
            | SuiteError::AssertionError { .. }
            | SuiteError::CaptureError { .. }
            | SuiteError::TemplateError { .. }
            | SuiteError::SetupError { .. } => ErrorCategory::Contract,
            SuiteError::ConfigError { .. }
            | SuiteError::ConfigValidationError { .. }
            | SuiteError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SuiteError::IoError(_) | SuiteError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Contract => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SuiteError::ApiError(e) if e.is_timeout() => {
                "The service did not answer in time; raise --timeout-ms or try again later"
            }
            SuiteError::ApiError(_) => "Check network access to the target API",
            SuiteError::UnexpectedStatus { .. } | SuiteError::AssertionError { .. } => {
                "The public API may have changed its behavior; compare the response body with the expectation"
            }
            SuiteError::CaptureError { .. } => {
                "The response no longer contains the captured field"
            }
            SuiteError::TemplateError { .. } => {
                "An earlier step did not capture the value this step needs"
            }
            SuiteError::SetupError { .. } => "Fix the setup step first; every case depends on it",
            SuiteError::ConfigError { .. }
            | SuiteError::ConfigValidationError { .. }
            | SuiteError::InvalidConfigValueError { .. } => {
                "Review the run configuration file and command line flags"
            }
            SuiteError::IoError(_) => "Check that the report directory is writable",
            SuiteError::SerializationError(_) => "The response or report is not valid JSON",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the API: {}", self),
            ErrorCategory::Contract => format!("Contract check failed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SuiteError>;
