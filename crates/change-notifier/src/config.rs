//! # Notifier Configuration
//!
//! Settings a host usually keeps next to the rest of its application config. Every field
//! has a default, so an empty object is a valid configuration:
//!
//! ```rust
//! use change_notifier::{Format, NotifierConfig};
//!
//! let config = NotifierConfig::from_json(r#"{ "format": "xml" }"#).unwrap();
//! assert_eq!(config.publisher, "publisher");
//! assert_eq!(config.format, Format::Xml);
//! assert_eq!(config.charset, "UTF-8");
//! ```
//!
//! A tag other than `json` or `xml` names a host formatter. Register it on the table from
//! [`NotifierConfig::formatters`] before handing the table to the notifier.

use crate::error::NotifierError;
use crate::format::{Format, FormatterTable, JsonFormatter, DEFAULT_CHARSET};
use crate::publisher::DEFAULT_COMPONENT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifierConfig {
    /// Registry name of the publisher component.
    pub publisher: String,
    /// Wire format of the update data.
    pub format: Format,
    /// Charset announced in formats that carry one.
    pub charset: String,
    /// Indent JSON output.
    pub pretty: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            publisher: DEFAULT_COMPONENT.to_string(),
            format: Format::Json,
            charset: DEFAULT_CHARSET.to_string(),
            pretty: false,
        }
    }
}

impl NotifierConfig {
    pub fn from_json(raw: &str) -> Result<Self, NotifierError> {
        serde_json::from_str(raw).map_err(|e| NotifierError::Configuration(e.to_string()))
    }

    /// The formatter table these settings describe.
    pub fn formatters(&self) -> FormatterTable {
        let mut table = FormatterTable::with_defaults(&self.charset);
        if self.pretty {
            table.register(Format::Json, JsonFormatter::pretty());
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(
            NotifierConfig::from_json("{}").unwrap(),
            NotifierConfig::default()
        );
    }

    #[test]
    fn unknown_fields_are_configuration_errors() {
        let err = NotifierConfig::from_json(r#"{"serializer": "rest"}"#).unwrap_err();
        assert!(matches!(err, NotifierError::Configuration(_)));
    }

    #[test]
    fn other_format_tags_are_custom() {
        let config = NotifierConfig::from_json(r#"{"format": "YAML"}"#).unwrap();
        assert_eq!(config.format, Format::Custom("yaml".into()));

        let err = NotifierConfig::from_json(r#"{"format": ""}"#).unwrap_err();
        assert!(matches!(err, NotifierError::Configuration(_)));
    }

    #[test]
    fn pretty_flag_switches_json_formatter() {
        let config = NotifierConfig {
            pretty: true,
            ..NotifierConfig::default()
        };
        let out = config
            .formatters()
            .serialize(&json!({"a": 1}), &Format::Json)
            .unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn charset_reaches_xml_declaration() {
        let config = NotifierConfig::from_json(r#"{"charset": "ISO-8859-1"}"#).unwrap();
        let out = config
            .formatters()
            .serialize(&json!({}), &Format::Xml)
            .unwrap();
        assert!(out.contains("encoding=\"ISO-8859-1\""));
    }
}
