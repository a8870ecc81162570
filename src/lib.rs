pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::{RunConfig, RunSettings, SuiteSettings};
pub use crate::core::runner::{FailurePolicy, SuiteRunner};
pub use domain::model::{StepOutcome, SuiteDefinition, SuiteReport};
pub use utils::error::{Result, SuiteError};
