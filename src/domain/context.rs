use serde_json::Value;
use std::collections::HashMap;

/// Values captured by earlier steps of one suite run.
#[derive(Debug, Clone, Default)]
pub struct SuiteContext {
    captured: HashMap<String, Value>,
}

impl SuiteContext {
    pub fn capture(&mut self, name: String, value: Value) {
        self.captured.insert(name, value);
    }

    pub fn get_captured(&self, name: &str) -> Option<&Value> {
        self.captured.get(name)
    }

    /// Null counts as absent, like an unset suite variable.
    pub fn has_captured(&self, name: &str) -> bool {
        self.captured.get(name).is_some_and(|v| !v.is_null())
    }

    /// Later captures replace earlier ones under the same name.
    pub fn merge(&mut self, captured: HashMap<String, Value>) {
        self.captured.extend(captured);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_adds_captures() {
        let mut context = SuiteContext::default();
        context.merge(HashMap::from([("first_product_id".to_string(), json!(1))]));

        assert!(context.has_captured("first_product_id"));
        assert_eq!(context.get_captured("first_product_id").unwrap(), 1);
    }

    #[test]
    fn test_null_capture_is_absent() {
        let mut context = SuiteContext::default();
        context.capture("created_product_id".to_string(), Value::Null);
        assert!(!context.has_captured("created_product_id"));
        assert!(!context.has_captured("other"));
    }

    #[test]
    fn test_later_capture_overrides_earlier() {
        let mut context = SuiteContext::default();
        context.capture("id".to_string(), json!(1));
        context.merge(HashMap::from([("id".to_string(), json!(2))]));
        assert_eq!(context.get_captured("id").unwrap(), 2);
    }
}
