pub mod fixtures;
pub mod http_step;
pub mod matcher;
pub mod runner;
pub mod template;

pub use crate::domain::model::{StepDefinition, StepExchange, SuiteReport};
pub use crate::domain::ports::{ContextualStep, Storage};
pub use crate::utils::error::Result;
