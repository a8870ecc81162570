use crate::domain::context::SuiteContext;
use crate::domain::model::{StepOutcome, StepReport, SuiteReport};
use crate::domain::ports::ContextualStep;
use crate::utils::error::SuiteError;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Every case runs even if an earlier one failed.
    #[default]
    Continue,
    /// The first failing case skips the rest.
    Stop,
}

/// Runs setup steps and then cases, strictly in order, sharing one context.
pub struct SuiteRunner {
    name: String,
    base_url: String,
    execution_id: String,
    setup: Vec<Box<dyn ContextualStep>>,
    cases: Vec<Box<dyn ContextualStep>>,
    failure_policy: FailurePolicy,
}

impl SuiteRunner {
    pub fn new(name: &str, base_url: &str, execution_id: String) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.to_string(),
            execution_id,
            setup: Vec::new(),
            cases: Vec::new(),
            failure_policy: FailurePolicy::Continue,
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn add_setup(&mut self, step: Box<dyn ContextualStep>) {
        self.setup.push(step);
    }

    pub fn add_case(&mut self, step: Box<dyn ContextualStep>) {
        self.cases.push(step);
    }

    pub fn case_names(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.get_name()).collect()
    }

    pub async fn execute_all(&self) -> SuiteReport {
        let started_at = chrono::Utc::now();
        let suite_start = Instant::now();
        let mut context = SuiteContext::default();
        let mut steps = Vec::with_capacity(self.setup.len() + self.cases.len());

        tracing::info!("🎬 Suite '{}' against {}", self.name, self.base_url);

        let mut setup_failure: Option<SuiteError> = None;
        for step in &self.setup {
            let report = self.run_step(step.as_ref(), &mut context, true).await;
            let failed = match &report.outcome {
                StepOutcome::Failed(details) => Some(SuiteError::SetupError {
                    step: report.name.clone(),
                    details: details.clone(),
                }),
                _ => None,
            };
            steps.push(report);
            if failed.is_some() {
                setup_failure = failed;
                break;
            }
        }

        let mut stopped = false;
        for step in &self.cases {
            if let Some(err) = &setup_failure {
                tracing::error!("❌ {}: {}", step.get_name(), err);
                steps.push(Self::not_run(step.get_name(), StepOutcome::Failed(err.to_string())));
                continue;
            }
            if stopped {
                steps.push(Self::not_run(
                    step.get_name(),
                    StepOutcome::Skipped("an earlier case failed".to_string()),
                ));
                continue;
            }

            let report = self.run_step(step.as_ref(), &mut context, false).await;
            if report.outcome.is_failure() && self.failure_policy == FailurePolicy::Stop {
                stopped = true;
            }
            steps.push(report);
        }

        let suite = SuiteReport {
            suite_name: self.name.clone(),
            execution_id: self.execution_id.clone(),
            base_url: self.base_url.clone(),
            started_at,
            duration_ms: suite_start.elapsed().as_millis() as u64,
            steps,
        };

        tracing::info!(
            "📊 Suite '{}': {} passed, {} failed, {} skipped in {}ms",
            suite.suite_name,
            suite.passed(),
            suite.failed(),
            suite.skipped(),
            suite.duration_ms
        );

        suite
    }

    async fn run_step(
        &self,
        step: &dyn ContextualStep,
        context: &mut SuiteContext,
        setup: bool,
    ) -> StepReport {
        let name = step.get_name().to_string();

        if let Some(reason) = step.skip_reason(context) {
            tracing::info!("⏭️ Skipping {} ({})", name, reason);
            let mut report = Self::not_run(&name, StepOutcome::Skipped(reason));
            report.setup = setup;
            return report;
        }

        let start = Instant::now();
        match step.execute_with_context(context).await {
            Ok(exchange) => {
                tracing::info!("✅ {} ({} in {:?})", name, exchange.status, exchange.duration);
                let report = StepReport {
                    name,
                    setup,
                    method: Some(exchange.method.clone()),
                    url: Some(exchange.url.clone()),
                    status: Some(exchange.status),
                    outcome: StepOutcome::Passed,
                    duration_ms: exchange.duration.as_millis() as u64,
                };
                context.merge(exchange.captured);
                report
            }
            Err(e) => {
                tracing::error!("❌ {}: {}", name, e);
                tracing::debug!("💡 {}", e.recovery_suggestion());
                let status = match &e {
                    SuiteError::UnexpectedStatus { actual, .. } => Some(*actual),
                    _ => None,
                };
                StepReport {
                    name,
                    setup,
                    method: None,
                    url: None,
                    status,
                    outcome: StepOutcome::Failed(e.to_string()),
                    duration_ms: start.elapsed().as_millis() as u64,
                }
            }
        }
    }

    fn not_run(name: &str, outcome: StepOutcome) -> StepReport {
        StepReport {
            name: name.to_string(),
            setup: false,
            method: None,
            url: None,
            status: None,
            outcome,
            duration_ms: 0,
        }
    }

    pub fn get_execution_summary(reports: &[SuiteReport]) -> HashMap<String, Value> {
        let mut summary = HashMap::new();

        let total_duration: Duration = reports
            .iter()
            .map(|r| Duration::from_millis(r.duration_ms))
            .sum();

        summary.insert("total_suites".to_string(), Value::Number(reports.len().into()));
        summary.insert(
            "passed".to_string(),
            Value::Number(reports.iter().map(SuiteReport::passed).sum::<usize>().into()),
        );
        summary.insert(
            "failed".to_string(),
            Value::Number(reports.iter().map(SuiteReport::failed).sum::<usize>().into()),
        );
        summary.insert(
            "skipped".to_string(),
            Value::Number(reports.iter().map(SuiteReport::skipped).sum::<usize>().into()),
        );
        summary.insert(
            "total_duration_ms".to_string(),
            Value::Number((total_duration.as_millis() as u64).into()),
        );

        let names: Vec<Value> = reports
            .iter()
            .map(|r| Value::String(r.suite_name.clone()))
            .collect();
        summary.insert("executed_suites".to_string(), Value::Array(names));

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::StepExchange;
    use crate::utils::error::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockStep {
        name: String,
        fail: bool,
        captures: Vec<(String, Value)>,
        requires: Option<String>,
        calls: Arc<AtomicUsize>,
    }

    impl MockStep {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                fail: false,
                captures: Vec::new(),
                requires: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }

        fn capturing(mut self, name: &str, value: Value) -> Self {
            self.captures.push((name.to_string(), value));
            self
        }

        fn requiring(mut self, name: &str) -> Self {
            self.requires = Some(name.to_string());
            self
        }

        fn counter(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait::async_trait]
    impl ContextualStep for MockStep {
        async fn execute_with_context(&self, _context: &SuiteContext) -> Result<StepExchange> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SuiteError::AssertionError {
                    step: self.name.clone(),
                    message: "mock failure".to_string(),
                });
            }
            Ok(StepExchange {
                method: "GET".to_string(),
                url: format!("http://mock/{}", self.name),
                status: 200,
                captured: self.captures.iter().cloned().collect(),
                duration: Duration::from_millis(1),
            })
        }

        fn get_name(&self) -> &str {
            &self.name
        }

        fn skip_reason(&self, context: &SuiteContext) -> Option<String> {
            match &self.requires {
                Some(name) if !context.has_captured(name) => Some(format!("missing {}", name)),
                _ => None,
            }
        }
    }

    fn runner() -> SuiteRunner {
        SuiteRunner::new("mock", "http://mock", "test".to_string())
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_later_cases() {
        let mut suite = runner();
        suite.add_case(Box::new(MockStep::new("a").failing()));
        suite.add_case(Box::new(MockStep::new("b")));

        let report = suite.execute_all().await;
        assert!(report.step("a").unwrap().outcome.is_failure());
        assert_eq!(report.step("b").unwrap().outcome, StepOutcome::Passed);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[tokio::test]
    async fn test_stop_policy_skips_remaining_cases() {
        let later = MockStep::new("b");
        let calls = later.counter();
        let mut suite = runner().with_failure_policy(FailurePolicy::Stop);
        suite.add_case(Box::new(MockStep::new("a").failing()));
        suite.add_case(Box::new(later));

        let report = suite.execute_all().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(matches!(report.step("b").unwrap().outcome, StepOutcome::Skipped(_)));
    }

    #[tokio::test]
    async fn test_captured_values_flow_to_later_cases() {
        let mut suite = runner();
        suite.add_case(Box::new(MockStep::new("create").capturing("id", serde_json::json!(7))));
        suite.add_case(Box::new(MockStep::new("update").requiring("id")));
        suite.add_case(Box::new(MockStep::new("other").requiring("never")));

        let report = suite.execute_all().await;
        assert_eq!(report.step("update").unwrap().outcome, StepOutcome::Passed);
        assert_eq!(
            report.step("other").unwrap().outcome,
            StepOutcome::Skipped("missing never".to_string())
        );
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_setup_failure_fails_every_case_without_running_it() {
        let case = MockStep::new("case");
        let calls = case.counter();
        let mut suite = runner();
        suite.add_setup(Box::new(MockStep::new("load").failing()));
        suite.add_case(Box::new(case));

        let report = suite.execute_all().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        match &report.step("case").unwrap().outcome {
            StepOutcome::Failed(msg) => assert!(msg.starts_with("Setup step 'load' failed")),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(report.failed(), 1);
        assert!(report.step("load").unwrap().setup);
    }

    #[tokio::test]
    async fn test_execution_summary_totals() {
        let mut suite = runner();
        suite.add_case(Box::new(MockStep::new("a")));
        suite.add_case(Box::new(MockStep::new("b").failing()));
        let reports = vec![suite.execute_all().await];

        let summary = SuiteRunner::get_execution_summary(&reports);
        assert_eq!(summary["total_suites"], 1);
        assert_eq!(summary["passed"], 1);
        assert_eq!(summary["failed"], 1);
        assert_eq!(summary["executed_suites"], serde_json::json!(["mock"]));
    }
}
