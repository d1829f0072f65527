use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::type_ref::simple_name_of;

/// An annotation present on a class, method or parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Fully qualified or simple annotation name
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attr(key).and_then(Value::as_str)
    }

    pub fn attr_bool(&self, key: &str) -> Option<bool> {
        self.attr(key).and_then(Value::as_bool)
    }

    pub fn attr_u64(&self, key: &str) -> Option<u64> {
        match self.attr(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The conventional `value` attribute, as a string
    pub fn value_str(&self) -> Option<&str> {
        self.attr_str("value")
    }
}

/// Anything that carries annotations. Lookups match on the simple name so
/// model files can use either `Named` or `org.acme.applib.annotation.Named`.
pub trait Annotated {
    fn annotations(&self) -> &[Annotation];

    fn annotation(&self, simple_name: &str) -> Option<&Annotation> {
        self.annotations()
            .iter()
            .find(|a| a.simple_name() == simple_name)
    }

    fn has_annotation(&self, simple_name: &str) -> bool {
        self.annotation(simple_name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Holder(Vec<Annotation>);

    impl Annotated for Holder {
        fn annotations(&self) -> &[Annotation] {
            &self.0
        }
    }

    #[test]
    fn test_lookup_by_simple_name() {
        let holder = Holder(vec![
            Annotation::new("org.acme.applib.annotation.Named").with("value", "Client"),
            Annotation::new("MaxLength").with("value", 30),
        ]);

        assert_eq!(holder.annotation("Named").unwrap().value_str(), Some("Client"));
        assert_eq!(holder.annotation("MaxLength").unwrap().attr_u64("value"), Some(30));
        assert!(!holder.has_annotation("Hidden"));
    }

    #[test]
    fn test_numeric_attribute_from_string() {
        let annotation = Annotation::new("MaxLength").with("value", " 12 ");
        assert_eq!(annotation.attr_u64("value"), Some(12));
    }
}
