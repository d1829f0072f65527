use super::{Value, ValueError, ValueSemanticsProvider, ValueType, mismatch};

pub struct IntegerValueSemantics;

pub struct LongValueSemantics;

fn parse_whole_number(value_type: ValueType, entry: &str) -> Result<Option<i64>, ValueError> {
    let entry = entry.trim();
    if entry.is_empty() {
        return Ok(None);
    }
    let digits: String = entry.chars().filter(|c| *c != ',').collect();
    digits
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ValueError::TextEntryParse {
            value_type,
            entry: entry.to_string(),
        })
}

/// Renders with thousands separators, e.g. `-1,234,567`
fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn decode_error(value_type: ValueType, data: &str) -> ValueError {
    ValueError::Decode {
        value_type,
        reason: format!("'{data}' is not a whole number"),
    }
}

impl ValueSemanticsProvider for IntegerValueSemantics {
    fn value_type(&self) -> ValueType {
        ValueType::Integer
    }

    fn parse_text_entry(&self, entry: &str) -> Result<Option<Value>, ValueError> {
        match parse_whole_number(ValueType::Integer, entry)? {
            None => Ok(None),
            Some(n) => i32::try_from(n)
                .map(|n| Some(Value::Integer(n)))
                .map_err(|_| ValueError::TextEntryParse {
                    value_type: ValueType::Integer,
                    entry: entry.trim().to_string(),
                }),
        }
    }

    fn title(&self, value: Option<&Value>) -> String {
        match value {
            Some(Value::Integer(n)) => group_thousands(i64::from(*n)),
            _ => String::new(),
        }
    }

    fn encode(&self, value: &Value) -> Result<String, ValueError> {
        match value {
            Value::Integer(n) => Ok(n.to_string()),
            other => Err(mismatch(ValueType::Integer, other)),
        }
    }

    fn decode(&self, data: &str) -> Result<Value, ValueError> {
        data.parse()
            .map(Value::Integer)
            .map_err(|_| decode_error(ValueType::Integer, data))
    }

    fn default_value(&self) -> Option<Value> {
        Some(Value::Integer(0))
    }

    fn typical_length(&self) -> u32 {
        11
    }
}

impl ValueSemanticsProvider for LongValueSemantics {
    fn value_type(&self) -> ValueType {
        ValueType::Long
    }

    fn parse_text_entry(&self, entry: &str) -> Result<Option<Value>, ValueError> {
        Ok(parse_whole_number(ValueType::Long, entry)?.map(Value::Long))
    }

    fn title(&self, value: Option<&Value>) -> String {
        match value {
            Some(Value::Long(n)) => group_thousands(*n),
            _ => String::new(),
        }
    }

    fn encode(&self, value: &Value) -> Result<String, ValueError> {
        match value {
            Value::Long(n) => Ok(n.to_string()),
            other => Err(mismatch(ValueType::Long, other)),
        }
    }

    fn decode(&self, data: &str) -> Result<Value, ValueError> {
        data.parse()
            .map(Value::Long)
            .map_err(|_| decode_error(ValueType::Long, data))
    }

    fn default_value(&self) -> Option<Value> {
        Some(Value::Long(0))
    }

    fn typical_length(&self) -> u32 {
        20
    }
}
