//! Value semantics: parsing, titling and encoding of value types

pub mod boolean;
pub mod integer;
pub mod string;

use crate::impl_case_insensitive_deserialize;
use serde::Serialize;
use std::fmt;

pub use boolean::BooleanValueSemantics;
pub use integer::{IntegerValueSemantics, LongValueSemantics};
pub use string::StringValueSemantics;

/// The value types the metamodel knows how to parse and encode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Boolean,
    Integer,
    Long,
    String,
}

impl_case_insensitive_deserialize!(
    ValueType,
    Boolean => "boolean",
    Integer => "integer",
    Long => "long",
    String => "string"
);

impl ValueType {
    /// Value type for a builtin class name, if it is one
    pub fn for_class(class_name: &str) -> Option<Self> {
        match class_name {
            "boolean" | "java.lang.Boolean" => Some(ValueType::Boolean),
            "int" | "java.lang.Integer" => Some(ValueType::Integer),
            "long" | "java.lang.Long" => Some(ValueType::Long),
            "java.lang.String" => Some(ValueType::String),
            _ => None,
        }
    }

    pub fn semantics(self) -> &'static dyn ValueSemanticsProvider {
        match self {
            ValueType::Boolean => &BooleanValueSemantics,
            ValueType::Integer => &IntegerValueSemantics,
            ValueType::Long => &LongValueSemantics,
            ValueType::String => &StringValueSemantics,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Long => "long",
            ValueType::String => "string",
        };
        f.write_str(label)
    }
}

/// A parsed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Boolean(bool),
    Integer(i32),
    Long(i64),
    String(String),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Long(_) => ValueType::Long,
            Value::String(_) => ValueType::String,
        }
    }
}

/// Errors raised to callers of a value parser or decoder
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("Cannot parse '{entry}' as {value_type}")]
    TextEntryParse { value_type: ValueType, entry: String },

    #[error("Invalid encoded {value_type} data: {reason}")]
    Decode { value_type: ValueType, reason: String },

    #[error("Expected a {expected} value but got {actual}")]
    TypeMismatch { expected: ValueType, actual: ValueType },
}

/// Parsing, titling and encoding for one value type.
pub trait ValueSemanticsProvider: Send + Sync {
    fn value_type(&self) -> ValueType;

    /// Parse user-entered text; blank text means "no value"
    fn parse_text_entry(&self, entry: &str) -> Result<Option<Value>, ValueError>;

    /// Human-readable rendering; `None` renders as the empty string
    fn title(&self, value: Option<&Value>) -> String;

    /// Compact encoding for persistence and bookmarks
    fn encode(&self, value: &Value) -> Result<String, ValueError>;

    fn decode(&self, data: &str) -> Result<Value, ValueError>;

    fn default_value(&self) -> Option<Value> {
        None
    }

    fn typical_length(&self) -> u32;
}

pub(crate) fn mismatch(expected: ValueType, value: &Value) -> ValueError {
    ValueError::TypeMismatch {
        expected,
        actual: value.value_type(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_for_builtin_classes() {
        assert_eq!(ValueType::for_class("boolean"), Some(ValueType::Boolean));
        assert_eq!(ValueType::for_class("java.lang.Long"), Some(ValueType::Long));
        assert_eq!(ValueType::for_class("com.acme.Customer"), None);
    }

    #[test]
    fn test_semantics_dispatch() {
        for value_type in [
            ValueType::Boolean,
            ValueType::Integer,
            ValueType::Long,
            ValueType::String,
        ] {
            assert_eq!(value_type.semantics().value_type(), value_type);
        }
    }

    #[test]
    fn test_encode_rejects_wrong_value_type() {
        let err = ValueType::Integer
            .semantics()
            .encode(&Value::Boolean(true))
            .unwrap_err();
        assert_eq!(
            err,
            ValueError::TypeMismatch {
                expected: ValueType::Integer,
                actual: ValueType::Boolean
            }
        );
    }
}
