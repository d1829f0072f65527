use super::{Value, ValueError, ValueSemanticsProvider, ValueType, mismatch};

pub struct StringValueSemantics;

impl ValueSemanticsProvider for StringValueSemantics {
    fn value_type(&self) -> ValueType {
        ValueType::String
    }

    fn parse_text_entry(&self, entry: &str) -> Result<Option<Value>, ValueError> {
        if entry.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(Value::String(entry.to_string())))
    }

    fn title(&self, value: Option<&Value>) -> String {
        match value {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        }
    }

    fn encode(&self, value: &Value) -> Result<String, ValueError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch(ValueType::String, other)),
        }
    }

    fn decode(&self, data: &str) -> Result<Value, ValueError> {
        Ok(Value::String(data.to_string()))
    }

    fn typical_length(&self) -> u32 {
        25
    }
}
