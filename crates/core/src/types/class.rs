use serde::{Deserialize, Serialize};

use super::type_ref::simple_name_of;
use super::{Annotated, Annotation, MethodDescriptor, TypeRef};
use crate::impl_case_insensitive_deserialize;

/// What sort of type a class descriptor describes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Abstract,
    Interface,
    Enum,
    Array,
    Primitive,
}

impl_case_insensitive_deserialize!(
    ClassKind,
    Class => "class",
    Abstract => "abstract",
    Interface => "interface",
    Enum => "enum",
    Array => "array",
    Primitive => "primitive"
);

/// Runtime description of a domain class: the input to introspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<TypeRef>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            superclass: None,
            interfaces: Vec::new(),
            annotations: Vec::new(),
            methods: Vec::new(),
            component_type: None,
        }
    }

    /// Synthesized descriptor for `component[]`
    pub fn array(component: TypeRef) -> Self {
        let mut descriptor = Self::new(format!("{}[]", component.name));
        descriptor.kind = ClassKind::Array;
        descriptor.superclass = Some("java.lang.Object".to_string());
        descriptor.component_type = Some(component);
        descriptor
    }

    pub fn of_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn extending(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn implementing(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    /// Anonymous classes have a purely numeric binary-name segment, e.g. `Foo$1`
    pub fn is_anonymous(&self) -> bool {
        match self.name.rsplit_once('$') {
            Some((_, tail)) => !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()),
            None => false,
        }
    }

    pub fn is_array(&self) -> bool {
        self.kind == ClassKind::Array || self.name.ends_with("[]")
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == ClassKind::Primitive
    }

    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodDescriptor> {
        self.methods.iter().filter(move |m| m.name == name)
    }

    /// MD5 digest of the descriptor's JSON form, used to detect changed classes on reload
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|_| self.name.clone());
        format!("{:x}", md5::compute(json.as_bytes()))
    }
}

impl Annotated for ClassDescriptor {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_detection() {
        assert!(ClassDescriptor::new("com.acme.Customer$1").is_anonymous());
        assert!(!ClassDescriptor::new("com.acme.Customer$Address").is_anonymous());
        assert!(!ClassDescriptor::new("com.acme.Customer").is_anonymous());
    }

    #[test]
    fn test_fingerprint_changes_with_methods() {
        let before = ClassDescriptor::new("com.acme.Customer");
        let after = before
            .clone()
            .with_method(MethodDescriptor::new("getName").returning("java.lang.String"));

        assert_eq!(before.fingerprint(), before.clone().fingerprint());
        assert_ne!(before.fingerprint(), after.fingerprint());
    }

    #[test]
    fn test_kind_deserializes_case_insensitively() {
        let class: ClassDescriptor =
            serde_json::from_str(r#"{"name": "com.acme.Status", "kind": "ENUM"}"#).unwrap();
        assert_eq!(class.kind, ClassKind::Enum);
        assert!(class.methods.is_empty());
    }
}
