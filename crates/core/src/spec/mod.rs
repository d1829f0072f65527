//! Object specifications: the built description of one domain type

mod member;

pub use member::{ActionParameter, ObjectMember};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::facets::{FacetData, FacetHolder, FacetKind, TitleStrategy};
use crate::types::{ClassDescriptor, ClassKind, FeatureType, Identifier};
use crate::utils::naming::natural_name;
use crate::validator::ValidationFailure;
use crate::values::ValueType;

/// Stable logical type identifier, independent of the class's binary name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectSpecId(String);

impl ObjectSpecId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectSpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectSpecId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// How far a specification has been built
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntrospectionState {
    /// Cached placeholder; nothing introspected yet
    CachedEmpty,
    /// Facets attached to the class and its members; referenced types not yet loaded
    FacetsAttached,
    FullyIntrospected,
}

/// The description of one domain type.
///
/// Other types (superclass, interfaces, member types) are referenced by class
/// name and resolved through the loader, so cyclic type graphs never form
/// owning cycles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSpecification {
    class_name: String,
    kind: ClassKind,
    state: IntrospectionState,
    facets: FacetHolder,
    #[serde(skip_serializing_if = "Option::is_none")]
    superclass: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    interfaces: Vec<String>,
    pub(crate) properties: Vec<ObjectMember>,
    pub(crate) collections: Vec<ObjectMember>,
    pub(crate) actions: Vec<ObjectMember>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) orphaned_methods: Vec<String>,
    #[serde(skip)]
    pub(crate) deferred_failures: Vec<ValidationFailure>,
    fingerprint: String,
}

impl ObjectSpecification {
    /// The empty entry cached before introspection starts
    pub fn placeholder(class: &ClassDescriptor) -> Self {
        Self {
            class_name: class.name.clone(),
            kind: class.kind,
            state: IntrospectionState::CachedEmpty,
            facets: FacetHolder::new(Identifier::class(&class.name)),
            superclass: class.superclass.clone(),
            interfaces: class.interfaces.clone(),
            properties: Vec::new(),
            collections: Vec::new(),
            actions: Vec::new(),
            orphaned_methods: Vec::new(),
            deferred_failures: Vec::new(),
            fingerprint: class.fingerprint(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn state(&self) -> IntrospectionState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: IntrospectionState) {
        self.state = state;
    }

    pub fn facets(&self) -> &FacetHolder {
        &self.facets
    }

    pub(crate) fn facets_mut(&mut self) -> &mut FacetHolder {
        &mut self.facets
    }

    pub fn identifier(&self) -> &Identifier {
        self.facets.identifier()
    }

    pub fn superclass(&self) -> Option<&str> {
        self.superclass.as_deref()
    }

    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn spec_id(&self) -> Option<&ObjectSpecId> {
        match self.facets.data(FacetKind::ObjectSpecId) {
            Some(FacetData::ObjectSpecId(id)) => Some(id),
            _ => None,
        }
    }

    pub fn properties(&self) -> &[ObjectMember] {
        &self.properties
    }

    pub fn collections(&self) -> &[ObjectMember] {
        &self.collections
    }

    pub fn actions(&self) -> &[ObjectMember] {
        &self.actions
    }

    /// Properties, then collections, then actions
    pub fn members(&self) -> impl Iterator<Item = &ObjectMember> {
        self.properties
            .iter()
            .chain(&self.collections)
            .chain(&self.actions)
    }

    /// A property or collection by id
    pub fn association(&self, id: &str) -> Option<&ObjectMember> {
        self.properties
            .iter()
            .chain(&self.collections)
            .find(|m| m.id == id)
    }

    pub fn property(&self, id: &str) -> Option<&ObjectMember> {
        self.properties.iter().find(|m| m.id == id)
    }

    pub fn collection(&self, id: &str) -> Option<&ObjectMember> {
        self.collections.iter().find(|m| m.id == id)
    }

    pub fn action(&self, id: &str) -> Option<&ObjectMember> {
        self.actions.iter().find(|m| m.id == id)
    }

    /// Supporting methods no factory consumed, e.g. `hideFoo` with no `foo` member
    pub fn orphaned_methods(&self) -> &[String] {
        &self.orphaned_methods
    }

    /// Problems recorded by facet factories while this spec was built
    pub fn deferred_failures(&self) -> &[ValidationFailure] {
        &self.deferred_failures
    }

    pub fn is_value(&self) -> bool {
        self.value_type().is_some()
    }

    pub fn value_type(&self) -> Option<ValueType> {
        match self.facets.data(FacetKind::Value) {
            Some(FacetData::Value(value_type)) => Some(*value_type),
            _ => None,
        }
    }

    pub fn is_collection_type(&self) -> bool {
        self.facets.contains(FacetKind::CollectionType)
    }

    pub fn is_immutable(&self) -> bool {
        self.facets.contains(FacetKind::Immutable)
    }

    pub fn title_strategy(&self) -> Option<&TitleStrategy> {
        match self.facets.data(FacetKind::Title) {
            Some(FacetData::Title(strategy)) => Some(strategy),
            _ => None,
        }
    }

    /// Singular display name
    pub fn singular_name(&self) -> String {
        match self.facets.data(FacetKind::Named) {
            Some(FacetData::Named(name)) => name.clone(),
            _ => natural_name(crate::types::simple_name_of(&self.class_name)),
        }
    }

    pub fn plural_name(&self) -> String {
        match self.facets.data(FacetKind::Plural) {
            Some(FacetData::Plural(plural)) => plural.clone(),
            _ => pluralize(&self.singular_name()),
        }
    }

    /// Class names of every type this specification refers to
    pub fn referenced_types(&self) -> Vec<String> {
        let mut referenced: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            if !name.is_empty() && name != "void" && !referenced.iter().any(|r| r == name) {
                referenced.push(name.to_string());
            }
        };

        if let Some(superclass) = &self.superclass {
            push(superclass);
        }
        for interface in &self.interfaces {
            push(interface);
        }
        if let Some(FacetData::TypeOf(element)) = self.facets.data(FacetKind::TypeOf) {
            push(&element.name);
        }
        for member in self.members() {
            push(&member.type_ref.name);
            if let Some(element) = member.element_type() {
                push(&element.name);
            }
            for parameter in &member.parameters {
                push(&parameter.type_ref.name);
            }
        }
        referenced
    }

    pub(crate) fn members_of_mut(&mut self, feature_type: FeatureType) -> &mut Vec<ObjectMember> {
        match feature_type {
            FeatureType::Collection => &mut self.collections,
            FeatureType::Action => &mut self.actions,
            _ => &mut self.properties,
        }
    }
}

fn pluralize(singular: &str) -> String {
    if let Some(stem) = singular.strip_suffix('y') {
        let before_y = stem.chars().last();
        if before_y.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{stem}ies");
        }
    }
    if singular.ends_with('s') || singular.ends_with('x') || singular.ends_with("ch") {
        return format!("{singular}es");
    }
    format!("{singular}s")
}

impl fmt::Display for ObjectSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name)?;
        if let Some(id) = self.spec_id() {
            write!(f, " ({id})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MethodDescriptor;

    #[test]
    fn test_placeholder_is_cached_empty() {
        let class = ClassDescriptor::new("com.acme.Customer").extending("java.lang.Object");
        let spec = ObjectSpecification::placeholder(&class);

        assert_eq!(spec.state(), IntrospectionState::CachedEmpty);
        assert!(spec.facets().is_empty());
        assert_eq!(spec.spec_id(), None);
        assert_eq!(spec.fingerprint(), class.fingerprint());
    }

    #[test]
    fn test_names() {
        let mut spec = ObjectSpecification::placeholder(&ClassDescriptor::new("com.acme.Category"));
        assert_eq!(spec.singular_name(), "Category");
        assert_eq!(spec.plural_name(), "Categories");

        spec.facets_mut().add(FacetData::Plural("Kinds".into()));
        assert_eq!(spec.plural_name(), "Kinds");
        assert_eq!(pluralize("Address"), "Addresses");
        assert_eq!(pluralize("Day"), "Days");
    }

    #[test]
    fn test_referenced_types_are_unique() {
        let class = ClassDescriptor::new("com.acme.Customer").extending("java.lang.Object");
        let mut spec = ObjectSpecification::placeholder(&class);
        let getter = MethodDescriptor::new("getName").returning("java.lang.String");
        let action = MethodDescriptor::new("rename")
            .with_param("java.lang.String")
            .with_param("int");
        spec.properties.push(ObjectMember::new(
            "com.acme.Customer",
            "name",
            FeatureType::Property,
            &getter,
        ));
        let mut rename = ObjectMember::new("com.acme.Customer", "rename", FeatureType::Action, &action);
        rename.parameters = action
            .parameters
            .iter()
            .enumerate()
            .map(|(i, p)| {
                ActionParameter::new(
                    Identifier::parameter("com.acme.Customer", "rename", i),
                    i,
                    p.type_ref.clone(),
                )
            })
            .collect();
        spec.actions.push(rename);

        assert_eq!(
            spec.referenced_types(),
            vec!["java.lang.Object", "java.lang.String", "int"]
        );
    }
}
