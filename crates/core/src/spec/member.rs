use serde::Serialize;

use crate::facets::{FacetData, FacetHolder, FacetKind};
use crate::types::{FeatureType, Identifier, MethodDescriptor, TypeRef};
use crate::utils::naming::natural_name;

/// A parameter of an action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionParameter {
    pub index: usize,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub facets: FacetHolder,
}

impl ActionParameter {
    pub fn new(identifier: Identifier, index: usize, type_ref: TypeRef) -> Self {
        Self {
            index,
            type_ref,
            name: None,
            facets: FacetHolder::new(identifier),
        }
    }
}

/// A property, collection or action of an object specification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectMember {
    pub id: String,
    pub feature_type: FeatureType,
    /// The accessor for associations, the invoked method for actions
    pub method: String,
    /// Property type, collection type or action return type
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    pub facets: FacetHolder,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ActionParameter>,
}

impl ObjectMember {
    pub fn new(
        class_name: &str,
        id: impl Into<String>,
        feature_type: FeatureType,
        method: &MethodDescriptor,
    ) -> Self {
        let id = id.into();
        Self {
            facets: FacetHolder::new(Identifier::member(class_name, id.clone())),
            id,
            feature_type,
            method: method.name.clone(),
            type_ref: method.return_type.clone(),
            parameters: Vec::new(),
        }
    }

    pub fn identifier(&self) -> &Identifier {
        self.facets.identifier()
    }

    /// Display name: `@Named` if present, otherwise derived from the id
    pub fn name(&self) -> String {
        match self.facets.data(FacetKind::Named) {
            Some(FacetData::Named(name)) => name.clone(),
            _ => natural_name(&self.id),
        }
    }

    /// Element type of a collection, or of a collection-returning action
    pub fn element_type(&self) -> Option<&TypeRef> {
        match self.facets.data(FacetKind::TypeOf) {
            Some(FacetData::TypeOf(type_ref)) => Some(type_ref),
            _ => None,
        }
    }

    pub fn sequence(&self) -> Option<&str> {
        match self.facets.data(FacetKind::MemberOrder) {
            Some(FacetData::MemberOrder { sequence, .. }) => Some(sequence),
            _ => None,
        }
    }

    pub fn parameter(&self, index: usize) -> Option<&ActionParameter> {
        self.parameters.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_prefers_named_facet() {
        let method = MethodDescriptor::new("getFirstName").returning("java.lang.String");
        let mut member = ObjectMember::new("com.acme.Customer", "firstName", FeatureType::Property, &method);
        assert_eq!(member.name(), "First Name");

        member.facets.add(FacetData::Named("Given Name".into()));
        assert_eq!(member.name(), "Given Name");
        assert_eq!(member.identifier().to_string(), "com.acme.Customer#firstName");
    }
}
