//! Factories for collections, plus the element-type analysis shared with actions

use super::{FacetFactory, ProcessMethodContext, no_params};
use crate::facets::{CollectionMutation, FacetData, FacetKind};
use crate::types::{Annotated, FeatureType, MethodDescriptor, TypeRef};

pub struct CollectionAccessorFacetFactory;

impl FacetFactory for CollectionAccessorFacetFactory {
    fn name(&self) -> &'static str {
        "collection-accessor"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::COLLECTIONS_ONLY
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["get"]
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        context.facets.add(FacetData::CollectionAccessor {
            method: context.method.name.clone(),
        });
    }
}

/// Element type of a collection or collection-returning action.
///
/// `@TypeOf(value)` wins; otherwise the first generic argument or the array
/// component type is used as a derived facet.
pub struct TypeOfFacetFactory;

impl FacetFactory for TypeOfFacetFactory {
    fn name(&self) -> &'static str {
        "type-of"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::COLLECTIONS_AND_ACTIONS
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        let method = context.method;
        if let Some(declared) = method.annotation("TypeOf").and_then(|a| a.value_str()) {
            match TypeRef::parse(declared) {
                Ok(element) => {
                    context.facets.add(FacetData::TypeOf(element));
                    return;
                }
                Err(e) => context.record_failure(format!("@TypeOf is invalid: {e}")),
            }
        }

        let return_type = &method.return_type;
        if context.feature_type == FeatureType::Action
            && !context.env.repository.is_collection_type(&return_type.name)
        {
            return;
        }
        let inferred = return_type
            .array_component()
            .or_else(|| return_type.first_type_arg().cloned());
        if let Some(element) = inferred {
            context.facets.add_derived(FacetData::TypeOf(element));
        }
    }
}

/// `addToX(T)`, `removeFromX(T)`, `clearX()`; absent methods mutate the
/// collection returned by the accessor
pub struct CollectionAddRemoveClearFacetFactory;

impl FacetFactory for CollectionAddRemoveClearFacetFactory {
    fn name(&self) -> &'static str {
        "collection-add-remove-clear"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::COLLECTIONS_ONLY
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["addTo", "removeFrom", "clear"]
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        let accessor = context.method.name.clone();
        let element = match context.facets.data(FacetKind::TypeOf) {
            Some(FacetData::TypeOf(element)) => Some(element.clone()),
            _ => None,
        };
        let accepts_element = |m: &MethodDescriptor| match &element {
            Some(element) => m.has_param_types(&[element]),
            None => m.param_count() == 1,
        };

        match context.take_supporting("addTo", accepts_element) {
            Some(method) => context
                .facets
                .add(FacetData::CollectionAddTo(CollectionMutation::Method(
                    method.name.clone(),
                ))),
            None => context
                .facets
                .add_derived(FacetData::CollectionAddTo(CollectionMutation::ViaAccessor(
                    accessor.clone(),
                ))),
        };

        match context.take_supporting("removeFrom", accepts_element) {
            Some(method) => context
                .facets
                .add(FacetData::CollectionRemoveFrom(CollectionMutation::Method(
                    method.name.clone(),
                ))),
            None => context
                .facets
                .add_derived(FacetData::CollectionRemoveFrom(
                    CollectionMutation::ViaAccessor(accessor.clone()),
                )),
        };

        match context.take_supporting("clear", no_params) {
            Some(method) => context
                .facets
                .add(FacetData::CollectionClear(CollectionMutation::Method(
                    method.name.clone(),
                ))),
            None => context
                .facets
                .add_derived(FacetData::CollectionClear(CollectionMutation::ViaAccessor(
                    accessor,
                ))),
        };
    }
}

/// `validateAddToX(T)` and `validateRemoveFromX(T)`
pub struct CollectionValidateFacetFactory;

impl FacetFactory for CollectionValidateFacetFactory {
    fn name(&self) -> &'static str {
        "collection-validate"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::COLLECTIONS_ONLY
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["validateAddTo", "validateRemoveFrom"]
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        let single_param = |m: &MethodDescriptor| m.param_count() == 1 && !m.is_void();
        if let Some(method) = context.take_supporting("validateAddTo", single_param) {
            context.facets.add(FacetData::CollectionValidateAddTo {
                method: method.name.clone(),
            });
        }
        if let Some(method) = context.take_supporting("validateRemoveFrom", single_param) {
            context.facets.add(FacetData::CollectionValidateRemoveFrom {
                method: method.name.clone(),
            });
        }
    }
}

/// Marks collections and collection-returning actions for per-user visibility filtering
pub struct FilterVisibilityFacetFactory;

impl FacetFactory for FilterVisibilityFacetFactory {
    fn name(&self) -> &'static str {
        "filter-visibility"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::COLLECTIONS_AND_ACTIONS
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        if !context.env.config.filter_visibility() {
            return;
        }
        let returns_collection = context.feature_type == FeatureType::Collection
            || context
                .env
                .repository
                .is_collection_type(&context.method.return_type.name);
        if returns_collection {
            context.facets.add(FacetData::FilterVisibility);
        }
    }
}
