use super::{Formatter, DEFAULT_CHARSET};
use crate::error::NotifierError;
use serde_json::Value;
use std::borrow::Cow;

/// XML output in the shape REST clients usually expect:
///
/// ```text
/// <?xml version="1.0" encoding="UTF-8"?>
/// <response><id>2</id><tags><item>a</item><item>b</item></tags></response>
/// ```
///
/// Object keys become element names. Array entries, and keys that are not valid XML
/// names (`@id`, `42`), are written as item elements instead.
#[derive(Debug, Clone)]
pub struct XmlFormatter {
    version: String,
    encoding: String,
    root_tag: Option<String>,
    item_tag: String,
}

impl XmlFormatter {
    pub fn new(encoding: impl Into<String>) -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: encoding.into(),
            root_tag: Some("response".to_string()),
            item_tag: "item".to_string(),
        }
    }

    pub fn root_tag(mut self, tag: impl Into<String>) -> Self {
        self.root_tag = Some(tag.into());
        self
    }

    /// Writes the payload's children directly after the declaration.
    pub fn without_root(mut self) -> Self {
        self.root_tag = None;
        self
    }

    pub fn item_tag(mut self, tag: impl Into<String>) -> Self {
        self.item_tag = tag.into();
        self
    }

    fn write_element(&self, out: &mut String, name: &str, value: &Value) {
        let is_empty_container = match value {
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        };
        if is_empty_container {
            out.push('<');
            out.push_str(name);
            out.push_str("/>");
            return;
        }

        out.push('<');
        out.push_str(name);
        out.push('>');
        self.write_children(out, value);
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }

    fn write_children(&self, out: &mut String, value: &Value) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let name = if is_valid_name(key) {
                        key.as_str()
                    } else {
                        self.item_tag.as_str()
                    };
                    self.write_element(out, name, child);
                }
            }
            Value::Array(items) => {
                for child in items {
                    self.write_element(out, &self.item_tag, child);
                }
            }
            scalar => out.push_str(&escape(&scalar_text(scalar))),
        }
    }
}

impl Default for XmlFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_CHARSET)
    }
}

impl Formatter for XmlFormatter {
    fn format(&self, payload: &Value) -> Result<String, NotifierError> {
        if !is_valid_name(&self.item_tag) {
            return Err(NotifierError::Serialization(format!(
                "`{}` is not a valid XML element name",
                self.item_tag
            )));
        }

        let mut out = format!(
            "<?xml version=\"{}\" encoding=\"{}\"?>\n",
            self.version, self.encoding
        );
        match &self.root_tag {
            Some(root) if is_valid_name(root) => self.write_element(&mut out, root, payload),
            Some(root) => {
                return Err(NotifierError::Serialization(format!(
                    "`{}` is not a valid XML element name",
                    root
                )))
            }
            None => self.write_children(&mut out, payload),
        }
        out.push('\n');
        Ok(out)
    }
}

fn scalar_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::String(s) => Cow::Borrowed(s),
        Value::Array(_) | Value::Object(_) => Cow::Borrowed(""),
    }
}

fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '\r']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\r' => escaped.push_str("&#13;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// XML `Name` production, restricted to what shows up in serialized records.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(out: &str) -> &str {
        out.split_once('\n').unwrap().1.trim_end()
    }

    #[test]
    fn writes_declaration_and_root() {
        let out = XmlFormatter::default()
            .format(&json!({"property": 1}))
            .unwrap();
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<response><property>1</property></response>\n"
        );
    }

    #[test]
    fn declaration_uses_configured_charset() {
        let out = XmlFormatter::new("ISO-8859-2").format(&json!({})).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"ISO-8859-2\"?>\n"));
        assert_eq!(body(&out), "<response/>");
    }

    #[test]
    fn invalid_keys_become_items() {
        let out = XmlFormatter::default().format(&json!({"@id": 2})).unwrap();
        assert_eq!(body(&out), "<response><item>2</item></response>");
    }

    #[test]
    fn arrays_and_nesting() {
        let payload = json!({
            "id": 1,
            "tags": ["a", "b"],
            "author": {"name": "Ann", "active": true, "bio": null},
            "empty": []
        });
        let out = XmlFormatter::default().format(&payload).unwrap();
        assert_eq!(
            body(&out),
            "<response><id>1</id><tags><item>a</item><item>b</item></tags>\
             <author><name>Ann</name><active>true</active><bio></bio></author>\
             <empty/></response>"
        );
    }

    #[test]
    fn escapes_text() {
        let out = XmlFormatter::default()
            .format(&json!({"title": "Fish & <Chips>"}))
            .unwrap();
        assert_eq!(
            body(&out),
            "<response><title>Fish &amp; &lt;Chips&gt;</title></response>"
        );
    }

    #[test]
    fn custom_tags_and_no_root() {
        let out = XmlFormatter::default()
            .without_root()
            .item_tag("entry")
            .format(&json!({"list": [1, 2]}))
            .unwrap();
        assert_eq!(body(&out), "<list><entry>1</entry><entry>2</entry></list>");

        let out = XmlFormatter::default()
            .root_tag("article")
            .format(&json!({"id": 7}))
            .unwrap();
        assert_eq!(body(&out), "<article><id>7</id></article>");
    }

    #[test]
    fn rejects_invalid_root_tag() {
        let err = XmlFormatter::default()
            .root_tag("1st")
            .format(&json!({}))
            .unwrap_err();
        assert!(matches!(err, NotifierError::Serialization(_)));
    }

    #[test]
    fn name_rules() {
        assert!(is_valid_name("one"));
        assert!(is_valid_name("_private"));
        assert!(is_valid_name("created-at.utc"));
        assert!(!is_valid_name("@id"));
        assert!(!is_valid_name("42"));
        assert!(!is_valid_name("with space"));
        assert!(!is_valid_name(""));
        // The "xml" prefix is reserved, not forbidden.
        assert!(is_valid_name("xmlUrl"));
        assert!(is_valid_name("XMLData"));
    }

    #[test]
    fn keeps_xml_prefixed_keys() {
        let out = XmlFormatter::default()
            .format(&json!({"id": 1, "xmlUrl": "a", "XMLData": "b"}))
            .unwrap();
        assert_eq!(
            body(&out),
            "<response><id>1</id><xmlUrl>a</xmlUrl><XMLData>b</XMLData></response>"
        );
    }
}
