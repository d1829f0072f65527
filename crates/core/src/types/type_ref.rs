use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A reference to a (possibly generic) type, e.g. `java.util.List<com.acme.Order>`.
///
/// Arrays keep their `[]` suffix in `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef {
    pub name: String,
    pub type_args: Vec<TypeRef>,
}

impl TypeRef {
    pub const VOID: &'static str = "void";

    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, type_args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            type_args,
        }
    }

    pub fn void() -> Self {
        Self::simple(Self::VOID)
    }

    pub fn array_of(component: TypeRef) -> Self {
        Self::simple(format!("{}[]", component.name))
    }

    /// Parse the textual form used in domain model files
    pub fn parse(input: &str) -> Result<Self> {
        let mut cursor = Cursor { src: input, pos: 0 };
        let parsed = cursor.parse_type()?;
        cursor.skip_whitespace();
        if cursor.pos != input.len() {
            return Err(cursor.error("unexpected trailing characters"));
        }
        Ok(parsed)
    }

    pub fn is_void(&self) -> bool {
        self.name == Self::VOID
    }

    pub fn is_array(&self) -> bool {
        self.name.ends_with("[]")
    }

    /// Component type of an array reference
    pub fn array_component(&self) -> Option<TypeRef> {
        self.name.strip_suffix("[]").map(TypeRef::simple)
    }

    pub fn first_type_arg(&self) -> Option<&TypeRef> {
        self.type_args.first()
    }

    /// Name without package qualifier or enclosing class
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }
}

/// Strips package and enclosing-class qualifiers from a binary class name
pub fn simple_name_of(name: &str) -> &str {
    let after_package = name.rsplit('.').next().unwrap_or(name);
    after_package.rsplit('$').next().unwrap_or(after_package)
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.type_args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.type_args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::parse(name).unwrap_or_else(|_| TypeRef::simple(name))
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        TypeRef::parse(&text).map_err(serde::de::Error::custom)
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump(c);
        }
    }

    fn error(&self, reason: &str) -> Error {
        Error::TypeParseError {
            input: self.src.to_string(),
            reason: format!("{reason} at offset {}", self.pos),
        }
    }

    fn parse_type(&mut self) -> Result<TypeRef> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '.' | '_' | '$') {
                self.bump(c);
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error("expected a type name"));
        }
        let mut name = self.src[start..self.pos].to_string();

        let mut type_args = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some('<') {
            self.bump('<');
            loop {
                type_args.push(self.parse_type()?);
                self.skip_whitespace();
                match self.peek() {
                    Some(',') => self.bump(','),
                    Some('>') => {
                        self.bump('>');
                        break;
                    }
                    _ => return Err(self.error("expected ',' or '>'")),
                }
            }
        }

        loop {
            self.skip_whitespace();
            if self.src[self.pos..].starts_with("[]") {
                self.pos += 2;
                name.push_str("[]");
            } else {
                break;
            }
        }

        Ok(TypeRef { name, type_args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generic_type() {
        let parsed = TypeRef::parse("java.util.List<com.acme.Order>").unwrap();
        assert_eq!(parsed.name, "java.util.List");
        assert_eq!(parsed.first_type_arg(), Some(&TypeRef::simple("com.acme.Order")));
        assert_eq!(parsed.to_string(), "java.util.List<com.acme.Order>");
    }

    #[test]
    fn test_parse_nested_and_arrays() {
        let parsed = TypeRef::parse("java.util.Map<String, java.util.List<Order[]>>").unwrap();
        assert_eq!(parsed.type_args.len(), 2);
        let inner = &parsed.type_args[1];
        assert_eq!(inner.first_type_arg().unwrap().name, "Order[]");
        assert!(inner.first_type_arg().unwrap().is_array());
        assert_eq!(
            inner.first_type_arg().unwrap().array_component(),
            Some(TypeRef::simple("Order"))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(TypeRef::parse("").is_err());
        assert!(TypeRef::parse("List<Order").is_err());
        assert!(TypeRef::parse("List<Order> extra").is_err());
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name_of("com.acme.Customer"), "Customer");
        assert_eq!(simple_name_of("com.acme.Customer$Address"), "Address");
        assert_eq!(TypeRef::simple("boolean").simple_name(), "boolean");
    }
}
