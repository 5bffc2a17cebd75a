use super::Formatter;
use crate::error::NotifierError;
use serde_json::Value;

/// JSON output. Slashes and non-ASCII characters are written as-is.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output, mostly useful when debugging a hub by hand.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, payload: &Value) -> Result<String, NotifierError> {
        let out = if self.pretty {
            serde_json::to_string_pretty(payload)?
        } else {
            serde_json::to_string(payload)?
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compact_by_default() {
        let out = JsonFormatter::new()
            .format(&json!({"id": 2, "one": "c", "two": "d"}))
            .unwrap();
        assert_eq!(out, r#"{"id":2,"one":"c","two":"d"}"#);
    }

    #[test]
    fn keeps_slashes_and_unicode() {
        let out = JsonFormatter::new()
            .format(&json!({"url": "https://example.com/ż"}))
            .unwrap();
        assert_eq!(out, r#"{"url":"https://example.com/ż"}"#);
    }

    #[test]
    fn pretty_indents() {
        let out = JsonFormatter::pretty().format(&json!({"a": 1})).unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }
}
