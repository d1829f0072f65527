use super::{Value, ValueError, ValueSemanticsProvider, ValueType, mismatch};

/// Logical values: titles `True`/`False`, encoded as `T`/`F`
pub struct BooleanValueSemantics;

impl ValueSemanticsProvider for BooleanValueSemantics {
    fn value_type(&self) -> ValueType {
        ValueType::Boolean
    }

    fn parse_text_entry(&self, entry: &str) -> Result<Option<Value>, ValueError> {
        let entry = entry.trim();
        if entry.is_empty() {
            return Ok(None);
        }
        let lower = entry.to_lowercase();
        if "true".starts_with(&lower) {
            Ok(Some(Value::Boolean(true)))
        } else if "false".starts_with(&lower) {
            Ok(Some(Value::Boolean(false)))
        } else {
            Err(ValueError::TextEntryParse {
                value_type: ValueType::Boolean,
                entry: entry.to_string(),
            })
        }
    }

    fn title(&self, value: Option<&Value>) -> String {
        match value {
            Some(Value::Boolean(true)) => "True".to_string(),
            Some(Value::Boolean(false)) => "False".to_string(),
            _ => String::new(),
        }
    }

    fn encode(&self, value: &Value) -> Result<String, ValueError> {
        match value {
            Value::Boolean(b) => Ok(if *b { "T" } else { "F" }.to_string()),
            other => Err(mismatch(ValueType::Boolean, other)),
        }
    }

    fn decode(&self, data: &str) -> Result<Value, ValueError> {
        let mut chars = data.chars();
        match (chars.next(), chars.next()) {
            (Some('T'), None) => Ok(Value::Boolean(true)),
            (Some('F'), None) => Ok(Value::Boolean(false)),
            (Some(c), None) => Err(ValueError::Decode {
                value_type: ValueType::Boolean,
                reason: format!("expected 'T' or 'F' but got '{c}'"),
            }),
            _ => Err(ValueError::Decode {
                value_type: ValueType::Boolean,
                reason: format!("expected 1 character, got {}", data.chars().count()),
            }),
        }
    }

    fn default_value(&self) -> Option<Value> {
        Some(Value::Boolean(false))
    }

    fn typical_length(&self) -> u32 {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_then_decode() {
        let semantics = BooleanValueSemantics;
        let encoded = semantics.encode(&Value::Boolean(true)).unwrap();
        assert_eq!(semantics.decode(&encoded).unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_decode_literals() {
        let semantics = BooleanValueSemantics;
        assert_eq!(semantics.decode("T").unwrap(), Value::Boolean(true));
        assert_eq!(semantics.decode("F").unwrap(), Value::Boolean(false));
        assert!(matches!(
            semantics.decode("X"),
            Err(ValueError::Decode { .. })
        ));
        assert!(semantics.decode("t").is_err());
        assert!(semantics.decode("TF").is_err());
        assert!(semantics.decode("").is_err());
    }

    #[test]
    fn test_title() {
        let semantics = BooleanValueSemantics;
        assert_eq!(semantics.title(Some(&Value::Boolean(true))), "True");
        assert_eq!(semantics.title(Some(&Value::Boolean(false))), "False");
        assert_eq!(semantics.title(None), "");
    }

    #[test]
    fn test_parse_text_entry_accepts_prefixes() {
        let semantics = BooleanValueSemantics;
        assert_eq!(semantics.parse_text_entry("TR").unwrap(), Some(Value::Boolean(true)));
        assert_eq!(semantics.parse_text_entry(" f ").unwrap(), Some(Value::Boolean(false)));
        assert_eq!(semantics.parse_text_entry("   ").unwrap(), None);
        assert!(semantics.parse_text_entry("yes").is_err());
    }
}
