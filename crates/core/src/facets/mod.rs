//! Facets: the typed behavioural traits attached to classes, members and parameters

mod data;
mod holder;

pub use data::{
    CollectionMutation, FacetData, PropertyClearStrategy, RegExRule, SetterStrategy,
    TitleStrategy, Where,
};
pub use holder::FacetHolder;

use crate::types::Identifier;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// Identifies a kind of facet; a holder carries at most one facet per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    ObjectSpecId,
    Title,
    IconName,
    Named,
    DescribedAs,
    Plural,
    Immutable,
    NotPersistable,
    Value,
    CollectionType,
    TypeOf,
    Grid,
    MemberOrder,
    Hidden,
    Disabled,
    HideForContext,
    DisableForContext,
    Mandatory,
    MaxLength,
    RegEx,
    PropertyAccessor,
    PropertySetter,
    PropertyClear,
    PropertyDefault,
    PropertyChoices,
    AutoComplete,
    PropertyValidate,
    CollectionAccessor,
    CollectionAddTo,
    CollectionRemoveFrom,
    CollectionClear,
    CollectionValidateAddTo,
    CollectionValidateRemoveFrom,
    FilterVisibility,
    ActionInvocation,
    ActionValidate,
    ActionParameterChoices,
    ActionParameterDefaults,
    ActionParameterAutoComplete,
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One behavioural trait of a holder.
///
/// `holder` is a non-owning reference to the element the facet describes.
/// Derived facets were inferred from other facets or conventions rather than
/// found directly on the element.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    holder: Identifier,
    derived: bool,
    data: FacetData,
}

impl Facet {
    pub fn new(holder: Identifier, data: FacetData) -> Self {
        Self {
            holder,
            derived: false,
            data,
        }
    }

    pub fn derived(holder: Identifier, data: FacetData) -> Self {
        Self {
            holder,
            derived: true,
            data,
        }
    }

    pub fn kind(&self) -> FacetKind {
        self.data.kind()
    }

    pub fn holder(&self) -> &Identifier {
        &self.holder
    }

    pub fn is_derived(&self) -> bool {
        self.derived
    }

    pub fn data(&self) -> &FacetData {
        &self.data
    }
}

impl Serialize for Facet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Facet", 3)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("derived", &self.derived)?;
        state.serialize_field("detail", &self.data.to_string())?;
        state.end()
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        let detail = self.data.to_string();
        if !detail.is_empty() {
            write!(f, " {detail}")?;
        }
        if self.derived {
            f.write_str(" [derived]")?;
        }
        Ok(())
    }
}
