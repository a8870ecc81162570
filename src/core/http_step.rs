use crate::core::{fixtures, matcher, template};
use crate::domain::context::SuiteContext;
use crate::domain::model::{RequestBody, StepDefinition, StepExchange};
use crate::domain::ports::ContextualStep;
use crate::utils::error::{Result, SuiteError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

const BODY_EXCERPT_LEN: usize = 300;

/// Builds the client a suite shares across its steps.
pub fn build_client(timeout: Duration, headers: &HashMap<String, String>) -> Result<Client> {
    let mut default_headers = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            SuiteError::InvalidConfigValueError {
                field: "headers".to_string(),
                value: key.clone(),
                reason: e.to_string(),
            }
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| SuiteError::InvalidConfigValueError {
            field: format!("headers.{}", key),
            value: value.clone(),
            reason: e.to_string(),
        })?;
        default_headers.insert(name, value);
    }

    Ok(Client::builder()
        .timeout(timeout)
        .default_headers(default_headers)
        .build()?)
}

/// One HTTP exchange of a suite, with its status and shape checks.
pub struct HttpStep {
    base_url: String,
    definition: StepDefinition,
    client: Client,
}

impl HttpStep {
    pub fn new(base_url: &str, definition: StepDefinition, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            definition,
            client,
        }
    }

    fn build_body(&self, context: &SuiteContext) -> Result<Option<Value>> {
        match &self.definition.body {
            None => Ok(None),
            Some(RequestBody::Json(template)) => template::resolve_json(template, context).map(Some),
            Some(RequestBody::Fixture(kind)) => Ok(Some(fixtures::generate(*kind))),
        }
    }

    /// Empty or non-JSON bodies decode to null or a JSON string.
    fn decode_body(text: &str) -> Value {
        if text.trim().is_empty() {
            return Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }

    fn capture_values(&self, body: &Value) -> Result<HashMap<String, Value>> {
        let mut captured = HashMap::new();
        for capture in &self.definition.captures {
            match body.pointer(&capture.pointer) {
                Some(value) if !value.is_null() => {
                    tracing::info!(
                        "📌 {}: captured {} = {}",
                        self.definition.name,
                        capture.name,
                        value
                    );
                    captured.insert(capture.name.clone(), value.clone());
                }
                _ => {
                    return Err(SuiteError::CaptureError {
                        step: self.definition.name.clone(),
                        name: capture.name.clone(),
                        pointer: capture.pointer.clone(),
                    })
                }
            }
        }
        Ok(captured)
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= BODY_EXCERPT_LEN {
        return text.to_string();
    }
    let cut: String = text.chars().take(BODY_EXCERPT_LEN).collect();
    format!("{}…", cut)
}

#[async_trait]
impl ContextualStep for HttpStep {
    async fn execute_with_context(&self, context: &SuiteContext) -> Result<StepExchange> {
        let def = &self.definition;
        let path = template::resolve_str(&def.path, context)?;
        let url = format!("{}{}", self.base_url, path);
        let request_body = self.build_body(context)?;

        let mut request = self.client.request(def.method.clone(), &url);
        if let Some(body) = &request_body {
            request = request.json(body);
        }

        tracing::debug!("📡 {}: {} {}", def.name, def.method, url);
        if let Some(body) = &request_body {
            tracing::debug!("📡 {}: request body {}", def.name, body);
        }

        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let duration = start.elapsed();

        tracing::debug!("📡 {}: response status {} in {:?}", def.name, status, duration);

        if status != def.expect_status {
            return Err(SuiteError::UnexpectedStatus {
                step: def.name.clone(),
                expected: def.expect_status.as_u16(),
                actual: status.as_u16(),
                body: excerpt(&text),
            });
        }

        let response_body = Self::decode_body(&text);
        for expectation in &def.expectations {
            matcher::check(
                &def.name,
                expectation,
                &response_body,
                request_body.as_ref(),
                context,
            )?;
        }

        let captured = self.capture_values(&response_body)?;

        Ok(StepExchange {
            method: def.method.to_string(),
            url,
            status: status.as_u16(),
            captured,
            duration,
        })
    }

    fn get_name(&self) -> &str {
        &self.definition.name
    }

    fn skip_reason(&self, context: &SuiteContext) -> Option<String> {
        let missing: Vec<&str> = self
            .definition
            .skip_unless
            .iter()
            .filter(|name| !context.has_captured(name))
            .map(String::as_str)
            .collect();

        if missing.is_empty() {
            None
        } else {
            Some(format!("no value captured for {}", missing.join(", ")))
        }
    }
}
