use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the program element a facet holder describes: a class, one of
/// its members, or a parameter of an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier {
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<usize>,
}

impl Identifier {
    pub fn class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            member: None,
            parameter: None,
        }
    }

    pub fn member(class_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            member: Some(member.into()),
            parameter: None,
        }
    }

    pub fn parameter(
        class_name: impl Into<String>,
        member: impl Into<String>,
        index: usize,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            member: Some(member.into()),
            parameter: Some(index),
        }
    }

    pub fn is_class(&self) -> bool {
        self.member.is_none()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.class_name)?;
        if let Some(member) = &self.member {
            write!(f, "#{member}")?;
        }
        if let Some(index) = self.parameter {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Identifier::class("com.acme.Customer").to_string(), "com.acme.Customer");
        assert_eq!(
            Identifier::member("com.acme.Customer", "orders").to_string(),
            "com.acme.Customer#orders"
        );
        assert_eq!(
            Identifier::parameter("com.acme.Customer", "placeOrder", 1).to_string(),
            "com.acme.Customer#placeOrder[1]"
        );
    }
}
