//! Facet factories: the pluggable analysis units of the programming model.
//!
//! A factory inspects a class, a member method or an action parameter and
//! attaches zero or more facets to the element's [`FacetHolder`]. Factories
//! that recognise supporting methods (`hideFoo`, `choices0Bar`, ...) take
//! them out of the [`MethodRemover`] so they are not mistaken for actions.

pub mod action;
pub mod collection;
pub mod member;
pub mod object;
pub mod property;

use crate::config::MetaModelConfig;
use crate::facets::FacetHolder;
use crate::repository::ClassRepository;
use crate::services::Services;
use crate::types::{ClassDescriptor, FeatureType, MethodDescriptor, ParameterDescriptor};
use crate::utils::naming::capitalize;
use crate::validator::ValidationFailure;

/// A pluggable unit of analysis
pub trait FacetFactory: Send + Sync {
    /// Unique name, used to exclude the factory through configuration
    fn name(&self) -> &'static str;

    /// The program elements this factory analyses
    fn feature_types(&self) -> &'static [FeatureType];

    /// Method prefixes this factory reserves for supporting methods
    fn prefixes(&self) -> &'static [&'static str] {
        &[]
    }

    fn applies_to(&self, feature_type: FeatureType) -> bool {
        self.feature_types().contains(&feature_type)
    }

    fn process_class(&self, _context: &mut ProcessClassContext<'_>) {}

    fn process_method(&self, _context: &mut ProcessMethodContext<'_>) {}

    fn process_param(&self, _context: &mut ProcessParameterContext<'_>) {}
}

/// Read-only collaborators available to every factory
#[derive(Debug, Clone, Copy)]
pub struct ProcessingEnv<'a> {
    pub config: &'a MetaModelConfig,
    pub repository: &'a ClassRepository,
    pub services: &'a Services,
}

/// Tracks which of a class's methods are still unclaimed.
///
/// Indices refer to `ClassDescriptor::methods`.
#[derive(Debug, Clone)]
pub struct MethodRemover {
    removed: Vec<bool>,
}

impl MethodRemover {
    pub fn new(class: &ClassDescriptor) -> Self {
        Self {
            removed: vec![false; class.methods.len()],
        }
    }

    pub fn is_removed(&self, index: usize) -> bool {
        self.removed.get(index).copied().unwrap_or(true)
    }

    pub fn remove_index(&mut self, index: usize) {
        if let Some(slot) = self.removed.get_mut(index) {
            *slot = true;
        }
    }

    /// First unclaimed method called `name` accepted by `accept`, without claiming it
    pub fn peek<'c>(
        &self,
        class: &'c ClassDescriptor,
        name: &str,
        accept: impl Fn(&MethodDescriptor) -> bool,
    ) -> Option<&'c MethodDescriptor> {
        self.position(class, name, accept).map(|i| &class.methods[i])
    }

    /// Claim the first unclaimed method called `name` accepted by `accept`
    pub fn take<'c>(
        &mut self,
        class: &'c ClassDescriptor,
        name: &str,
        accept: impl Fn(&MethodDescriptor) -> bool,
    ) -> Option<&'c MethodDescriptor> {
        let index = self.position(class, name, accept)?;
        self.removed[index] = true;
        Some(&class.methods[index])
    }

    /// Claim every unclaimed method matching `predicate`; returns how many were claimed
    pub fn remove_where(
        &mut self,
        class: &ClassDescriptor,
        predicate: impl Fn(&MethodDescriptor) -> bool,
    ) -> usize {
        let mut count = 0;
        for (index, method) in class.methods.iter().enumerate() {
            if !self.removed[index] && predicate(method) {
                self.removed[index] = true;
                count += 1;
            }
        }
        count
    }

    /// Unclaimed methods in declaration order
    pub fn remaining<'c>(
        &'c self,
        class: &'c ClassDescriptor,
    ) -> impl Iterator<Item = (usize, &'c MethodDescriptor)> + 'c {
        class
            .methods
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.removed[*index])
    }

    fn position(
        &self,
        class: &ClassDescriptor,
        name: &str,
        accept: impl Fn(&MethodDescriptor) -> bool,
    ) -> Option<usize> {
        class
            .methods
            .iter()
            .enumerate()
            .find(|(index, m)| !self.removed[*index] && m.name == name && accept(m))
            .map(|(index, _)| index)
    }
}

/// Context for analysing the class itself
pub struct ProcessClassContext<'a> {
    pub class: &'a ClassDescriptor,
    pub facets: &'a mut FacetHolder,
    pub remover: &'a mut MethodRemover,
    pub env: ProcessingEnv<'a>,
    pub failures: &'a mut Vec<ValidationFailure>,
}

impl<'a> ProcessClassContext<'a> {
    pub fn take_method(
        &mut self,
        name: &str,
        accept: impl Fn(&MethodDescriptor) -> bool,
    ) -> Option<&'a MethodDescriptor> {
        self.remover.take(self.class, name, accept)
    }

    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.failures.push(ValidationFailure::new(
            self.facets.identifier().clone(),
            message,
        ));
    }
}

/// Context for analysing a property, collection or action
pub struct ProcessMethodContext<'a> {
    pub class: &'a ClassDescriptor,
    pub method: &'a MethodDescriptor,
    pub member_id: &'a str,
    pub feature_type: FeatureType,
    /// Facets already attached to the owning class
    pub class_facets: &'a FacetHolder,
    pub facets: &'a mut FacetHolder,
    pub remover: &'a mut MethodRemover,
    pub env: ProcessingEnv<'a>,
    pub failures: &'a mut Vec<ValidationFailure>,
}

impl<'a> ProcessMethodContext<'a> {
    /// The member id with its first letter upper-cased, as used in supporting method names
    pub fn capitalized_id(&self) -> String {
        capitalize(self.member_id)
    }

    pub fn take_method(
        &mut self,
        name: &str,
        accept: impl Fn(&MethodDescriptor) -> bool,
    ) -> Option<&'a MethodDescriptor> {
        self.remover.take(self.class, name, accept)
    }

    /// Claim `{prefix}{Member}` accepted by `accept`
    pub fn take_supporting(
        &mut self,
        prefix: &str,
        accept: impl Fn(&MethodDescriptor) -> bool,
    ) -> Option<&'a MethodDescriptor> {
        let name = format!("{prefix}{}", self.capitalized_id());
        self.take_method(&name, accept)
    }

    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.failures.push(ValidationFailure::new(
            self.facets.identifier().clone(),
            message,
        ));
    }
}

/// Context for analysing one parameter of an action
pub struct ProcessParameterContext<'a> {
    pub class: &'a ClassDescriptor,
    pub method: &'a MethodDescriptor,
    pub member_id: &'a str,
    pub index: usize,
    pub parameter: &'a ParameterDescriptor,
    pub facets: &'a mut FacetHolder,
    pub remover: &'a mut MethodRemover,
    pub env: ProcessingEnv<'a>,
    pub failures: &'a mut Vec<ValidationFailure>,
}

impl<'a> ProcessParameterContext<'a> {
    /// Claim `{prefix}{index}{Action}` accepted by `accept`, e.g. `choices0PlaceOrder`
    pub fn take_supporting(
        &mut self,
        prefix: &str,
        accept: impl Fn(&MethodDescriptor) -> bool,
    ) -> Option<&'a MethodDescriptor> {
        let name = format!("{prefix}{}{}", self.index, capitalize(self.member_id));
        self.remover.take(self.class, &name, accept)
    }

    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.failures.push(ValidationFailure::new(
            self.facets.identifier().clone(),
            message,
        ));
    }
}

/// Accepts methods without parameters
pub(crate) fn no_params(method: &MethodDescriptor) -> bool {
    method.parameters.is_empty()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn class() -> ClassDescriptor {
        ClassDescriptor::new("com.acme.Customer")
            .with_method(MethodDescriptor::new("hideName"))
            .with_method(MethodDescriptor::new("hideName").with_param("int"))
            .with_method(MethodDescriptor::new("placeOrder"))
    }

    #[test]
    fn test_take_claims_only_accepted_method() {
        let class = class();
        let mut remover = MethodRemover::new(&class);

        let taken = remover.take(&class, "hideName", |m| m.param_count() == 1).unwrap();
        assert_eq!(taken.param_count(), 1);
        assert!(remover.is_removed(1));
        assert!(remover.peek(&class, "hideName", |m| m.param_count() == 1).is_none());
        assert!(remover.peek(&class, "hideName", no_params).is_some());
    }

    #[test]
    fn test_remaining_in_declaration_order() {
        let class = class();
        let mut remover = MethodRemover::new(&class);
        assert_eq!(remover.remove_where(&class, |m| m.name == "hideName"), 2);

        let remaining: Vec<_> = remover.remaining(&class).map(|(_, m)| m.name.as_str()).collect();
        assert_eq!(remaining, vec!["placeOrder"]);
    }
}
