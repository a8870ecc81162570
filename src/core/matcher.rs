use crate::domain::context::SuiteContext;
use crate::core::template;
use crate::domain::model::Expectation;
use crate::utils::error::{Result, SuiteError};
use regex::Regex;
use serde_json::Value;

/// Partial structural comparison.
///
/// Objects match when every expected key matches; extra actual keys are
/// ignored. Arrays match when each expected element matches some distinct
/// actual element, in any order. Numbers compare by value so `1` equals `1.0`.
/// Returns the JSON pointer of the first mismatch.
pub fn json_like(actual: &Value, expected: &Value) -> std::result::Result<(), String> {
    match_at("", actual, expected)
}

fn match_at(path: &str, actual: &Value, expected: &Value) -> std::result::Result<(), String> {
    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => {
            for (key, exp_value) in exp {
                let child = format!("{}/{}", path, key);
                match act.get(key) {
                    Some(act_value) => match_at(&child, act_value, exp_value)?,
                    None => return Err(format!("{}: missing field", child)),
                }
            }
            Ok(())
        }
        (Value::Array(exp), Value::Array(act)) => {
            let mut used = vec![false; act.len()];
            for (i, exp_item) in exp.iter().enumerate() {
                let found = act.iter().enumerate().position(|(j, act_item)| {
                    !used[j] && match_at("", act_item, exp_item).is_ok()
                });
                match found {
                    Some(j) => used[j] = true,
                    None => {
                        return Err(format!(
                            "{}/{}: no element matches {}",
                            path, i, exp_item
                        ))
                    }
                }
            }
            Ok(())
        }
        (Value::Number(exp), Value::Number(act)) => {
            if exp == act || exp.as_f64() == act.as_f64() {
                Ok(())
            } else {
                Err(format!("{}: expected {}, got {}", display_path(path), exp, act))
            }
        }
        (exp, act) if exp == act => Ok(()),
        (exp, act) => Err(format!("{}: expected {}, got {}", display_path(path), exp, act)),
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

/// Checks one expectation against a decoded response.
pub fn check(
    step: &str,
    expectation: &Expectation,
    body: &Value,
    request_body: Option<&Value>,
    context: &SuiteContext,
) -> Result<()> {
    let fail = |message: String| SuiteError::AssertionError {
        step: step.to_string(),
        message,
    };

    match expectation {
        Expectation::JsonLike(expected) => {
            let expected = template::resolve_json(expected, context)?;
            json_like(body, &expected).map_err(fail)
        }
        Expectation::IsArray => match body {
            Value::Array(_) => Ok(()),
            other => Err(fail(format!("expected an array, got {}", kind(other)))),
        },
        Expectation::NonEmptyArray => match body {
            Value::Array(items) if !items.is_empty() => Ok(()),
            Value::Array(_) => Err(fail("expected a non-empty array, got []".to_string())),
            other => Err(fail(format!("expected an array, got {}", kind(other)))),
        },
        Expectation::FieldPresent(pointer) => match body.pointer(pointer) {
            Some(value) if !value.is_null() => Ok(()),
            _ => Err(fail(format!("{} is not defined", pointer))),
        },
        Expectation::FieldMatches(pointer, pattern) => {
            let re = Regex::new(pattern)
                .map_err(|e| fail(format!("invalid pattern {}: {}", pattern, e)))?;
            match body.pointer(pointer) {
                Some(Value::String(s)) if re.is_match(s) => Ok(()),
                Some(other) => Err(fail(format!("{} = {} does not match /{}/", pointer, other, pattern))),
                None => Err(fail(format!("{} is not defined", pointer))),
            }
        }
        Expectation::EchoesRequestField(pointer) => {
            let sent = request_body
                .and_then(|b| b.pointer(pointer))
                .ok_or_else(|| fail(format!("request body has no {}", pointer)))?;
            match body.pointer(pointer) {
                Some(received) if received == sent => Ok(()),
                Some(received) => Err(fail(format!(
                    "{}: sent {}, received {}",
                    pointer, sent, received
                ))),
                None => Err(fail(format!("{} is not defined", pointer))),
            }
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
