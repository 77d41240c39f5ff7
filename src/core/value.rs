use serde::{Deserialize, Serialize};
use std::fmt;

/// A single answer captured by a form field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Number(i64),
    Text(String),
    List(Vec<String>),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Whitespace-only text counts as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.trim().is_empty(),
            Self::List(v) => v.iter().all(|item| item.trim().is_empty()),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Compares against a sentinel the way a form select does, ignoring ASCII case:
    /// text and list items are trimmed, booleans match "Yes"/"No" or "true"/"false".
    pub fn matches(&self, sentinel: &str) -> bool {
        let sentinel = sentinel.trim();
        match self {
            Self::None => false,
            Self::Text(v) => v.trim().eq_ignore_ascii_case(sentinel),
            Self::Bool(v) => {
                let (word, literal) = if *v { ("yes", "true") } else { ("no", "false") };
                sentinel.eq_ignore_ascii_case(word) || sentinel.eq_ignore_ascii_case(literal)
            }
            Self::Number(v) => v.to_string() == sentinel,
            Self::List(items) => items
                .iter()
                .any(|item| item.trim().eq_ignore_ascii_case(sentinel)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Bool(v) => write!(f, "{}", if *v { "Yes" } else { "No" }),
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::List(items) => f.write_str(items.join(", ").as_str()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn whitespace_text_is_empty() {
        assert!(Value::text("   ").is_empty());
        assert!(Value::None.is_empty());
        assert!(!Value::text(" x ").is_empty());
        assert!(!Value::Bool(false).is_empty());
    }

    #[test]
    fn matches_compares_trimmed_text() {
        assert!(Value::text(" not-ok ").matches("not-ok"));
        assert!(!Value::text("ok").matches("not-ok"));
        assert!(Value::Bool(true).matches("true"));
        assert!(Value::Bool(false).matches("No"));
    }

    #[test]
    fn matches_ignores_case_for_every_kind() {
        assert!(Value::text("Not-OK").matches("not-ok"));
        assert!(Value::List(vec!["ok".into(), " Not-OK".into()]).matches("not-ok"));
        assert!(!Value::List(vec!["ok".into()]).matches("not-ok"));
        assert!(Value::Bool(true).matches("TRUE"));
        assert!(Value::Bool(false).matches("False"));
        assert!(!Value::Bool(false).matches("TRUE"));
    }

    #[test]
    fn untagged_yaml_answers_deserialize() {
        let value: Value = serde_yaml::from_str("hello").expect("text");
        assert_eq!(value, Value::text("hello"));
        let value: Value = serde_yaml::from_str("true").expect("bool");
        assert_eq!(value, Value::Bool(true));
        let value: Value = serde_yaml::from_str("[a, b]").expect("list");
        assert_eq!(value, Value::List(vec!["a".into(), "b".into()]));
    }
}
