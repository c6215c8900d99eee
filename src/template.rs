use crate::record::Record;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Renders the human-readable `message` of a record.
///
/// Either a `{field}` placeholder template or an arbitrary closure. Cheap to
/// clone; the closure is shared.
#[derive(Clone)]
pub struct MessageFormatter {
    inner: Arc<dyn Fn(&Record) -> String + Send + Sync>,
    source: Option<Arc<str>>,
}

impl MessageFormatter {
    /// Build a formatter from a template such as `"[{schema}] {transaction}: {message}"`.
    ///
    /// Placeholders name record fields. `{{` and `}}` produce literal braces.
    /// An unterminated `{` is kept as literal text.
    pub fn template(template: impl Into<String>) -> Self {
        let template: String = template.into();
        let parts: Arc<[Part]> = parse(&template).into();
        MessageFormatter {
            inner: Arc::new(move |record: &Record| render(&parts, record)),
            source: Some(template.into()),
        }
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Record) -> String + Send + Sync + 'static,
    {
        MessageFormatter { inner: Arc::new(f), source: None }
    }

    pub fn format(&self, record: &Record) -> String {
        (self.inner)(record)
    }

    /// The template text, if this formatter was built from one.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl fmt::Debug for MessageFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(s) => f.debug_tuple("MessageFormatter").field(s).finish(),
            None => f.write_str("MessageFormatter(<fn>)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Part {
    Literal(String),
    Field(String),
}

fn parse(template: &str) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                literal.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                literal.push('}');
            }
            '{' => match template[i + 1..].find('}') {
                Some(len) => {
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    let close = i + 1 + len;
                    parts.push(Part::Field(template[i + 1..close].trim().to_string()));
                    while chars.next_if(|&(j, _)| j <= close).is_some() {}
                }
                None => literal.push('{'),
            },
            _ => literal.push(c),
        }
    }
    if !literal.is_empty() {
        parts.push(Part::Literal(literal));
    }
    parts
}

fn render(parts: &[Part], record: &Record) -> String {
    let mut out = String::new();
    for part in parts {
        match part {
            Part::Literal(s) => out.push_str(s),
            Part::Field(name) => {
                if let Some(v) = record.value(name) {
                    push_value(&mut out, v);
                }
            }
        }
    }
    out
}

fn push_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => out.push_str(s),
        Value::Null => {}
        other => out.push_str(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec() -> Record {
        Record::new()
            .with("schema", "SERVER-Info")
            .with("transaction", "T1")
            .with("message", "x")
            .with("code", 0)
            .with("body", json!({"a": [1, 2]}))
    }

    #[test]
    fn renders_fields_in_place() {
        let f = MessageFormatter::template("[{schema}] {transaction}: {message}");
        assert_eq!(f.format(&rec()), "[SERVER-Info] T1: x");
    }

    #[test]
    fn missing_and_null_render_empty() {
        let f = MessageFormatter::template("{nope}|{gone}|");
        let r = rec().with("gone", Value::Null);
        assert_eq!(f.format(&r), "||");
    }

    #[test]
    fn non_strings_render_as_json() {
        let f = MessageFormatter::template("{code} {body}");
        assert_eq!(f.format(&rec()), r#"0 {"a":[1,2]}"#);
    }

    #[test]
    fn escaped_and_unterminated_braces() {
        let f = MessageFormatter::template("{{{transaction}}} {oops");
        assert_eq!(f.format(&rec()), "{T1} {oops");
    }

    #[test]
    fn closure_formatter() {
        let f = MessageFormatter::from_fn(|r| format!("len={}", r.len()));
        assert_eq!(f.format(&rec()), "len=5");
        assert!(f.source().is_none());
    }
}
