//! # Wire Formats
//!
//! Payloads are first converted into a [`serde_json::Value`] tree and then rendered by a
//! [`Formatter`] chosen by a [`Format`] tag. The tag-to-formatter mapping lives in a
//! [`FormatterTable`] built when the notifier is constructed, so a format can be swapped or
//! overridden without touching the notifier.
//!
//! | Tag | Formatter | Output |
//! |-----|-----------|--------|
//! | [`Format::Json`] | [`JsonFormatter`] | `{"id":2,"one":"c"}` |
//! | [`Format::Xml`] | [`XmlFormatter`] | `<response><id>2</id><one>c</one></response>` |
//!
//! Any other tag parses to [`Format::Custom`]. A host plugs its own formatter in under that
//! tag with [`FormatterTable::register`]; a tag with no registered formatter fails at lookup
//! with [`NotifierError::UnknownFormat`].

pub mod json;
pub mod xml;

pub use json::JsonFormatter;
pub use xml::XmlFormatter;

use crate::error::NotifierError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::Arc;

/// Charset announced by formats that carry one.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Tag naming a wire format.
///
/// Tags are case-insensitive and stored lowercase. Serialized as the bare tag string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Format {
    #[default]
    Json,
    Xml,
    /// A host-defined format such as `html` or `yaml`.
    Custom(String),
}

impl Format {
    /// Tag for a host-defined format. Built-in names map to their own variants.
    pub fn custom(tag: &str) -> Result<Self, NotifierError> {
        tag.parse()
    }

    pub fn as_str(&self) -> &str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
            Format::Custom(tag) => tag,
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = NotifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        match tag.as_str() {
            "json" => Ok(Format::Json),
            "xml" => Ok(Format::Xml),
            "" => Err(NotifierError::UnknownFormat(s.to_string())),
            _ => Ok(Format::Custom(tag)),
        }
    }
}

impl TryFrom<String> for Format {
    type Error = NotifierError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<Format> for String {
    fn from(format: Format) -> Self {
        match format {
            Format::Custom(tag) => tag,
            builtin => builtin.as_str().to_string(),
        }
    }
}

/// Renders a value tree as a string in one wire format.
///
/// Implementations must not keep or alter the payload.
pub trait Formatter: Send + Sync {
    fn format(&self, payload: &Value) -> Result<String, NotifierError>;
}

/// Strategy table mapping format tags to formatters.
#[derive(Clone)]
pub struct FormatterTable {
    formatters: HashMap<Format, Arc<dyn Formatter>>,
}

impl FormatterTable {
    /// A table with no formatters at all.
    pub fn empty() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    /// A table with compact JSON and XML declared in `charset`.
    pub fn with_defaults(charset: &str) -> Self {
        let mut table = Self::empty();
        table
            .register(Format::Json, JsonFormatter::new())
            .register(Format::Xml, XmlFormatter::new(charset));
        table
    }

    /// Registers `formatter` for `format`, replacing any previous entry.
    pub fn register(&mut self, format: Format, formatter: impl Formatter + 'static) -> &mut Self {
        self.formatters.insert(format, Arc::new(formatter));
        self
    }

    pub fn get(&self, format: &Format) -> Result<Arc<dyn Formatter>, NotifierError> {
        self.formatters
            .get(format)
            .cloned()
            .ok_or_else(|| NotifierError::UnknownFormat(format.to_string()))
    }

    /// Converts `payload` to a value tree and renders it in `format`.
    pub fn serialize<P>(&self, payload: &P, format: &Format) -> Result<String, NotifierError>
    where
        P: Serialize + ?Sized,
    {
        let formatter = self.get(format)?;
        let value = serde_json::to_value(payload)?;
        formatter.format(&value)
    }
}

impl Default for FormatterTable {
    fn default() -> Self {
        Self::with_defaults(DEFAULT_CHARSET)
    }
}

impl fmt::Debug for FormatterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formats: Vec<&str> = self.formatters.keys().map(Format::as_str).collect();
        formats.sort();
        f.debug_struct("FormatterTable")
            .field("formats", &formats)
            .finish()
    }
}
