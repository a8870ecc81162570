use crate::domain::context::SuiteContext;
use crate::domain::model::StepExchange;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// A step that can read values captured by earlier steps of the same suite.
#[async_trait]
pub trait ContextualStep: Send + Sync {
    async fn execute_with_context(&self, context: &SuiteContext) -> Result<StepExchange>;

    fn get_name(&self) -> &str;

    /// `Some(reason)` when the step must not run against this context.
    fn skip_reason(&self, _context: &SuiteContext) -> Option<String> {
        None
    }
}
