use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Generated request bodies, built fresh each time a step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    PlatziProduct,
    PlatziUser,
    FakeStoreProduct,
    FakeStoreUser,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Literal JSON; string leaves may carry `{placeholder}` templates.
    Json(Value),
    Fixture(FixtureKind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// Partial structural match, pointer-free. Templates are resolved first.
    JsonLike(Value),
    IsArray,
    NonEmptyArray,
    /// The value at the JSON pointer exists and is not null.
    FieldPresent(String),
    /// The string at the JSON pointer matches the regex.
    FieldMatches(String, String),
    /// The response value at the pointer equals the request body value at the same pointer.
    EchoesRequestField(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub name: String,
    pub pointer: String,
}

impl Capture {
    pub fn new(name: &str, pointer: &str) -> Self {
        Self {
            name: name.to_string(),
            pointer: pointer.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepDefinition {
    pub name: String,
    pub method: Method,
    pub path: String,
    pub body: Option<RequestBody>,
    pub expect_status: StatusCode,
    pub expectations: Vec<Expectation>,
    pub captures: Vec<Capture>,
    /// Captured names that must exist, otherwise the step is skipped.
    pub skip_unless: Vec<String>,
}

impl StepDefinition {
    pub fn new(name: &str, method: Method, path: &str, expect_status: StatusCode) -> Self {
        Self {
            name: name.to_string(),
            method,
            path: path.to_string(),
            body: None,
            expect_status,
            expectations: Vec::new(),
            captures: Vec::new(),
            skip_unless: Vec::new(),
        }
    }

    pub fn get(name: &str, path: &str, expect_status: StatusCode) -> Self {
        Self::new(name, Method::GET, path, expect_status)
    }

    pub fn post(name: &str, path: &str, expect_status: StatusCode) -> Self {
        Self::new(name, Method::POST, path, expect_status)
    }

    pub fn put(name: &str, path: &str, expect_status: StatusCode) -> Self {
        Self::new(name, Method::PUT, path, expect_status)
    }

    pub fn patch(name: &str, path: &str, expect_status: StatusCode) -> Self {
        Self::new(name, Method::PATCH, path, expect_status)
    }

    pub fn delete(name: &str, path: &str, expect_status: StatusCode) -> Self {
        Self::new(name, Method::DELETE, path, expect_status)
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn with_fixture(mut self, kind: FixtureKind) -> Self {
        self.body = Some(RequestBody::Fixture(kind));
        self
    }

    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    pub fn capture(mut self, name: &str, pointer: &str) -> Self {
        self.captures.push(Capture::new(name, pointer));
        self
    }

    pub fn skip_unless(mut self, name: &str) -> Self {
        self.skip_unless.push(name.to_string());
        self
    }
}

/// A named suite with its built-in target and ordered steps.
#[derive(Debug, Clone)]
pub struct SuiteDefinition {
    pub name: String,
    pub default_base_url: String,
    pub default_timeout: Duration,
    pub setup: Vec<StepDefinition>,
    pub cases: Vec<StepDefinition>,
}

impl SuiteDefinition {
    pub fn case(&self, name: &str) -> Option<&StepDefinition> {
        self.cases.iter().find(|c| c.name == name)
    }
}

/// What one executed step observed on the wire.
#[derive(Debug, Clone)]
pub struct StepExchange {
    pub method: String,
    pub url: String,
    pub status: u16,
    pub captured: HashMap<String, Value>,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum StepOutcome {
    Passed,
    Failed(String),
    Skipped(String),
}

impl StepOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub name: String,
    pub setup: bool,
    pub method: Option<String>,
    pub url: Option<String>,
    pub status: Option<u16>,
    pub outcome: StepOutcome,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub suite_name: String,
    pub execution_id: String,
    pub base_url: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub duration_ms: u64,
    pub steps: Vec<StepReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.cases()
            .filter(|s| s.outcome == StepOutcome::Passed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.cases().filter(|s| s.outcome.is_failure()).count()
    }

    pub fn skipped(&self) -> usize {
        self.cases()
            .filter(|s| matches!(s.outcome, StepOutcome::Skipped(_)))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.steps.iter().all(|s| !s.outcome.is_failure())
    }

    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.name == name)
    }

    fn cases(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|s| !s.setup)
    }
}
