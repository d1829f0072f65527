//! Member discovery: runs the programming model over one class

use std::cmp::Ordering;
use tracing::trace;

use crate::facets::FacetHolder;
use crate::factories::{
    MethodRemover, ProcessClassContext, ProcessMethodContext, ProcessParameterContext,
    ProcessingEnv,
};
use crate::programming_model::ProgrammingModel;
use crate::spec::{ActionParameter, ObjectMember, ObjectSpecification};
use crate::types::{Annotated, ClassDescriptor, FeatureType, Identifier, MethodDescriptor};
use crate::utils::naming::{accessor_property_name, compare_sequence, starts_with_prefix};
use crate::validator::ValidationFailure;

/// Methods every object inherits; never members
const FRAMEWORK_METHODS: &[&str] = &[
    "toString",
    "hashCode",
    "equals",
    "getClass",
    "clone",
    "finalize",
    "wait",
    "notify",
    "notifyAll",
];

pub(crate) struct Introspector<'a> {
    pub model: &'a ProgrammingModel,
    pub env: ProcessingEnv<'a>,
}

impl Introspector<'_> {
    /// Attach class, member and parameter facets to `spec`
    pub fn introspect(&self, class: &ClassDescriptor, spec: &mut ObjectSpecification) {
        let mut remover = MethodRemover::new(class);
        let mut failures: Vec<ValidationFailure> = Vec::new();

        remover.remove_where(class, |m| {
            m.is_static || !m.public || m.has_annotation("Programmatic")
        });

        for factory in self.model.factories_for(FeatureType::Object) {
            factory.process_class(&mut ProcessClassContext {
                class,
                facets: spec.facets_mut(),
                remover: &mut remover,
                env: self.env,
                failures: &mut failures,
            });
        }

        remover.remove_where(class, |m| FRAMEWORK_METHODS.contains(&m.name.as_str()));

        let class_facets = spec.facets().clone();
        let mut properties = Vec::new();
        let mut collections = Vec::new();
        let mut actions = Vec::new();

        // claim every accessor before any member is processed, so one
        // association's factories never mistake another's accessor for a supporting method
        let accessors: Vec<usize> = remover
            .remaining(class)
            .filter(|(_, m)| is_accessor(m))
            .map(|(index, _)| index)
            .collect();
        for &index in &accessors {
            remover.remove_index(index);
        }
        for index in accessors {
            let method = &class.methods[index];
            let Some(id) = accessor_property_name(&method.name) else {
                continue;
            };
            let feature_type = if self
                .env
                .repository
                .is_collection_type(&method.return_type.name)
            {
                FeatureType::Collection
            } else {
                FeatureType::Property
            };
            let member = self.process_member(
                class,
                method,
                id,
                feature_type,
                &class_facets,
                &mut remover,
                &mut failures,
            );
            match feature_type {
                FeatureType::Collection => collections.push(member),
                _ => properties.push(member),
            }
        }

        let candidates: Vec<usize> = remover
            .remaining(class)
            .filter(|(_, m)| !self.model.is_reserved(&m.name))
            .map(|(index, _)| index)
            .collect();
        for index in candidates {
            if remover.is_removed(index) {
                continue;
            }
            remover.remove_index(index);
            let method = &class.methods[index];
            let member = self.process_member(
                class,
                method,
                method.name.clone(),
                FeatureType::Action,
                &class_facets,
                &mut remover,
                &mut failures,
            );
            actions.push(member);
        }

        spec.orphaned_methods = remover
            .remaining(class)
            .map(|(_, m)| m.name.clone())
            .collect();
        if !spec.orphaned_methods.is_empty() {
            trace!(
                "{}: unmatched supporting methods {:?}",
                class.name, spec.orphaned_methods
            );
        }

        sort_by_member_order(&mut properties);
        sort_by_member_order(&mut collections);
        sort_by_member_order(&mut actions);
        spec.properties = properties;
        spec.collections = collections;
        spec.actions = actions;
        spec.deferred_failures = failures;
    }

    #[allow(clippy::too_many_arguments)]
    fn process_member(
        &self,
        class: &ClassDescriptor,
        method: &MethodDescriptor,
        id: String,
        feature_type: FeatureType,
        class_facets: &FacetHolder,
        remover: &mut MethodRemover,
        failures: &mut Vec<ValidationFailure>,
    ) -> ObjectMember {
        let mut member = ObjectMember::new(&class.name, id, feature_type, method);

        for factory in self.model.factories_for(feature_type) {
            factory.process_method(&mut ProcessMethodContext {
                class,
                method,
                member_id: &member.id,
                feature_type,
                class_facets,
                facets: &mut member.facets,
                remover,
                env: self.env,
                failures,
            });
        }

        if feature_type != FeatureType::Action {
            return member;
        }
        for (index, parameter) in method.parameters.iter().enumerate() {
            let mut action_parameter = ActionParameter::new(
                Identifier::parameter(&class.name, &member.id, index),
                index,
                parameter.type_ref.clone(),
            );
            action_parameter.name = parameter.name.clone();
            for factory in self.model.factories_for(FeatureType::ActionParameter) {
                factory.process_param(&mut ProcessParameterContext {
                    class,
                    method,
                    member_id: &member.id,
                    index,
                    parameter,
                    facets: &mut action_parameter.facets,
                    remover,
                    env: self.env,
                    failures,
                });
            }
            member.parameters.push(action_parameter);
        }
        member
    }
}

/// `getX()` returning something, or `isX()` returning a boolean
fn is_accessor(method: &MethodDescriptor) -> bool {
    if !method.parameters.is_empty() {
        return false;
    }
    if starts_with_prefix(&method.name, "get") {
        return !method.is_void();
    }
    starts_with_prefix(&method.name, "is")
        && matches!(
            method.return_type.name.as_str(),
            "boolean" | "java.lang.Boolean"
        )
}

/// Ordered members first by Dewey sequence, then the rest in declaration order
fn sort_by_member_order(members: &mut [ObjectMember]) {
    members.sort_by(|a, b| match (a.sequence(), b.sequence()) {
        (Some(x), Some(y)) => compare_sequence(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
