//! `{name}` placeholder resolution against captured suite values.
//!
//! A string that is exactly one placeholder resolves to the captured value
//! itself, so numeric identifiers stay numeric inside JSON bodies. Placeholders
//! embedded in a longer string are rendered as text.

use crate::domain::context::SuiteContext;
use crate::utils::error::{Result, SuiteError};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder regex"))
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Renders every placeholder of `template` as text.
pub fn resolve_str(template: &str, context: &SuiteContext) -> Result<String> {
    let re = placeholder_regex();
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for caps in re.captures_iter(template) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
        let name = &caps[1];
        let value = context
            .get_captured(name)
            .filter(|v| !v.is_null())
            .ok_or_else(|| SuiteError::TemplateError {
                template: template.to_string(),
                placeholder: name.to_string(),
            })?;

        rendered.push_str(&template[last..whole.start]);
        rendered.push_str(&render_value(value));
        last = whole.end;
    }
    rendered.push_str(&template[last..]);

    Ok(rendered)
}

/// Resolves placeholders in every string leaf of a JSON document.
pub fn resolve_json(template: &Value, context: &SuiteContext) -> Result<Value> {
    match template {
        Value::String(s) => {
            if let Some(caps) = placeholder_regex().captures(s) {
                if caps[0].len() == s.len() {
                    let name = &caps[1];
                    return context
                        .get_captured(name)
                        .filter(|v| !v.is_null())
                        .cloned()
                        .ok_or_else(|| SuiteError::TemplateError {
                            template: s.clone(),
                            placeholder: name.to_string(),
                        });
                }
            }
            Ok(Value::String(resolve_str(s, context)?))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| resolve_json(item, context))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut resolved = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                resolved.insert(key.clone(), resolve_json(value, context)?);
            }
            Ok(Value::Object(resolved))
        }
        other => Ok(other.clone()),
    }
}
