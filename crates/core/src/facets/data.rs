//! Concrete facet payloads: one tagged-union variant per facet kind

use regex::Regex;
use std::fmt;

use super::FacetKind;
use crate::impl_case_insensitive_deserialize;
use crate::services::Grid;
use crate::spec::ObjectSpecId;
use crate::types::TypeRef;
use crate::values::ValueType;

/// How an object's title is derived
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleStrategy {
    /// A dedicated `title()` method
    Method(String),
    /// Concatenation of `@Title`-annotated members, in sequence order
    Annotated(Vec<String>),
    /// Falls back on `toString()`
    ToString,
    /// Rendered by the value type's semantics provider
    ValueSemantics(ValueType),
}

/// Where a statically hidden member is hidden
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Where {
    #[default]
    Everywhere,
    ObjectForms,
    AllTables,
}

impl_case_insensitive_deserialize!(
    Where,
    Everywhere => "everywhere",
    ObjectForms => "object_forms",
    AllTables => "all_tables"
);

impl Where {
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(text.to_string())).ok()
    }
}

/// How a property value is changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetterStrategy {
    /// `modifyX(value)`
    ModifyMethod(String),
    /// Plain `setX(value)`
    Setter(String),
}

/// How a property is cleared
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyClearStrategy {
    /// `clearX()`
    Method(String),
    /// Invoke the setter with no value
    SetterWithNull(String),
}

/// How a collection mutation (add, remove, clear) is performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionMutation {
    /// A dedicated supporting method, e.g. `addToOrders(Order)`
    Method(String),
    /// Mutate the collection returned by the accessor directly
    ViaAccessor(String),
}

/// A compiled `@RegEx` validation pattern
#[derive(Debug, Clone)]
pub struct RegExRule {
    pub pattern: String,
    pub case_sensitive: bool,
    regex: Regex,
}

impl RegExRule {
    pub fn new(pattern: &str, case_sensitive: bool) -> Result<Self, regex::Error> {
        let source = if case_sensitive {
            pattern.to_string()
        } else {
            format!("(?i){pattern}")
        };
        Ok(Self {
            pattern: pattern.to_string(),
            case_sensitive,
            regex: Regex::new(&source)?,
        })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for RegExRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.case_sensitive == other.case_sensitive
    }
}

/// The payload of a facet. Each variant corresponds to exactly one [`FacetKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum FacetData {
    ObjectSpecId(ObjectSpecId),
    Title(TitleStrategy),
    IconName { method: String },
    Named(String),
    DescribedAs(String),
    Plural(String),
    Immutable,
    NotPersistable,
    Value(ValueType),
    CollectionType,
    TypeOf(TypeRef),
    Grid { grid: Grid, reloadable: bool },
    MemberOrder { sequence: String, group: Option<String> },
    Hidden(Where),
    Disabled { reason: Option<String> },
    HideForContext { method: String },
    DisableForContext { method: String },
    Mandatory(bool),
    MaxLength(u32),
    RegEx(RegExRule),
    PropertyAccessor { method: String },
    PropertySetter(SetterStrategy),
    PropertyClear(PropertyClearStrategy),
    PropertyDefault { method: String },
    PropertyChoices { method: String },
    AutoComplete { method: String, min_length: u32 },
    PropertyValidate { method: String },
    CollectionAccessor { method: String },
    CollectionAddTo(CollectionMutation),
    CollectionRemoveFrom(CollectionMutation),
    CollectionClear(CollectionMutation),
    CollectionValidateAddTo { method: String },
    CollectionValidateRemoveFrom { method: String },
    FilterVisibility,
    ActionInvocation { method: String, return_type: TypeRef },
    ActionValidate { method: String },
    ActionParameterChoices { method: String },
    ActionParameterDefaults { method: String },
    ActionParameterAutoComplete { method: String, min_length: u32 },
}

impl FacetData {
    pub fn kind(&self) -> FacetKind {
        match self {
            FacetData::ObjectSpecId(_) => FacetKind::ObjectSpecId,
            FacetData::Title(_) => FacetKind::Title,
            FacetData::IconName { .. } => FacetKind::IconName,
            FacetData::Named(_) => FacetKind::Named,
            FacetData::DescribedAs(_) => FacetKind::DescribedAs,
            FacetData::Plural(_) => FacetKind::Plural,
            FacetData::Immutable => FacetKind::Immutable,
            FacetData::NotPersistable => FacetKind::NotPersistable,
            FacetData::Value(_) => FacetKind::Value,
            FacetData::CollectionType => FacetKind::CollectionType,
            FacetData::TypeOf(_) => FacetKind::TypeOf,
            FacetData::Grid { .. } => FacetKind::Grid,
            FacetData::MemberOrder { .. } => FacetKind::MemberOrder,
            FacetData::Hidden(_) => FacetKind::Hidden,
            FacetData::Disabled { .. } => FacetKind::Disabled,
            FacetData::HideForContext { .. } => FacetKind::HideForContext,
            FacetData::DisableForContext { .. } => FacetKind::DisableForContext,
            FacetData::Mandatory(_) => FacetKind::Mandatory,
            FacetData::MaxLength(_) => FacetKind::MaxLength,
            FacetData::RegEx(_) => FacetKind::RegEx,
            FacetData::PropertyAccessor { .. } => FacetKind::PropertyAccessor,
            FacetData::PropertySetter(_) => FacetKind::PropertySetter,
            FacetData::PropertyClear(_) => FacetKind::PropertyClear,
            FacetData::PropertyDefault { .. } => FacetKind::PropertyDefault,
            FacetData::PropertyChoices { .. } => FacetKind::PropertyChoices,
            FacetData::AutoComplete { .. } => FacetKind::AutoComplete,
            FacetData::PropertyValidate { .. } => FacetKind::PropertyValidate,
            FacetData::CollectionAccessor { .. } => FacetKind::CollectionAccessor,
            FacetData::CollectionAddTo(_) => FacetKind::CollectionAddTo,
            FacetData::CollectionRemoveFrom(_) => FacetKind::CollectionRemoveFrom,
            FacetData::CollectionClear(_) => FacetKind::CollectionClear,
            FacetData::CollectionValidateAddTo { .. } => FacetKind::CollectionValidateAddTo,
            FacetData::CollectionValidateRemoveFrom { .. } => {
                FacetKind::CollectionValidateRemoveFrom
            }
            FacetData::FilterVisibility => FacetKind::FilterVisibility,
            FacetData::ActionInvocation { .. } => FacetKind::ActionInvocation,
            FacetData::ActionValidate { .. } => FacetKind::ActionValidate,
            FacetData::ActionParameterChoices { .. } => FacetKind::ActionParameterChoices,
            FacetData::ActionParameterDefaults { .. } => FacetKind::ActionParameterDefaults,
            FacetData::ActionParameterAutoComplete { .. } => {
                FacetKind::ActionParameterAutoComplete
            }
        }
    }
}

impl fmt::Display for TitleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleStrategy::Method(m) => write!(f, "via {m}()"),
            TitleStrategy::Annotated(members) => write!(f, "via @Title on {}", members.join(", ")),
            TitleStrategy::ToString => f.write_str("via toString()"),
            TitleStrategy::ValueSemantics(t) => write!(f, "via {t} semantics"),
        }
    }
}

impl fmt::Display for CollectionMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionMutation::Method(m) => write!(f, "via {m}()"),
            CollectionMutation::ViaAccessor(m) => write!(f, "via collection from {m}()"),
        }
    }
}

impl fmt::Display for FacetData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetData::ObjectSpecId(id) => write!(f, "{id}"),
            FacetData::Title(strategy) => write!(f, "{strategy}"),
            FacetData::Named(s) | FacetData::DescribedAs(s) | FacetData::Plural(s) => {
                write!(f, "\"{s}\"")
            }
            FacetData::Immutable
            | FacetData::NotPersistable
            | FacetData::CollectionType
            | FacetData::FilterVisibility => Ok(()),
            FacetData::Value(t) => write!(f, "{t}"),
            FacetData::TypeOf(t) => write!(f, "{t}"),
            FacetData::Grid { grid, reloadable } => {
                write!(f, "from {}", grid.source)?;
                if *reloadable {
                    f.write_str(" (reloadable)")?;
                }
                Ok(())
            }
            FacetData::MemberOrder { sequence, group } => match group {
                Some(group) => write!(f, "{sequence} in {group}"),
                None => write!(f, "{sequence}"),
            },
            FacetData::Hidden(location) => write!(f, "{location:?}"),
            FacetData::Disabled { reason } => match reason {
                Some(reason) => write!(f, "\"{reason}\""),
                None => Ok(()),
            },
            FacetData::Mandatory(mandatory) => write!(f, "{mandatory}"),
            FacetData::MaxLength(n) => write!(f, "{n}"),
            FacetData::RegEx(rule) => write!(f, "/{}/", rule.pattern),
            FacetData::PropertySetter(SetterStrategy::ModifyMethod(m))
            | FacetData::PropertySetter(SetterStrategy::Setter(m))
            | FacetData::PropertyClear(PropertyClearStrategy::Method(m)) => write!(f, "via {m}()"),
            FacetData::PropertyClear(PropertyClearStrategy::SetterWithNull(m)) => {
                write!(f, "via {m}(null)")
            }
            FacetData::CollectionAddTo(m)
            | FacetData::CollectionRemoveFrom(m)
            | FacetData::CollectionClear(m) => write!(f, "{m}"),
            FacetData::AutoComplete { method, min_length }
            | FacetData::ActionParameterAutoComplete { method, min_length } => {
                write!(f, "via {method}() (min length {min_length})")
            }
            FacetData::ActionInvocation {
                method,
                return_type,
            } => write!(f, "via {method}() -> {return_type}"),
            FacetData::IconName { method }
            | FacetData::HideForContext { method }
            | FacetData::DisableForContext { method }
            | FacetData::PropertyAccessor { method }
            | FacetData::PropertyDefault { method }
            | FacetData::PropertyChoices { method }
            | FacetData::PropertyValidate { method }
            | FacetData::CollectionAccessor { method }
            | FacetData::CollectionValidateAddTo { method }
            | FacetData::CollectionValidateRemoveFrom { method }
            | FacetData::ActionValidate { method }
            | FacetData::ActionParameterChoices { method }
            | FacetData::ActionParameterDefaults { method } => write!(f, "via {method}()"),
        }
    }
}
