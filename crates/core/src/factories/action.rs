//! Factories for actions and their parameters

use super::property::{auto_complete_min_length, takes_search_string};
use super::{FacetFactory, ProcessMethodContext, ProcessParameterContext};
use crate::facets::{FacetData, FacetKind};
use crate::types::{FeatureType, MethodDescriptor, TypeRef};

pub struct ActionInvocationFacetFactory;

impl FacetFactory for ActionInvocationFacetFactory {
    fn name(&self) -> &'static str {
        "action-invocation"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::ACTIONS_ONLY
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        context.facets.add(FacetData::ActionInvocation {
            method: context.method.name.clone(),
            return_type: context.method.return_type.clone(),
        });
    }
}

/// `validateX(..)` taking the same parameters as the action
pub struct ActionValidateFacetFactory;

impl FacetFactory for ActionValidateFacetFactory {
    fn name(&self) -> &'static str {
        "action-validate"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::ACTIONS_ONLY
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["validate"]
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        let action = context.method;
        let param_types: Vec<&TypeRef> = action.parameters.iter().map(|p| &p.type_ref).collect();
        let same_params = |m: &MethodDescriptor| m.has_param_types(&param_types) && !m.is_void();
        if let Some(method) = context.take_supporting("validate", same_params) {
            context.facets.add(FacetData::ActionValidate {
                method: method.name.clone(),
            });
        }
    }
}

fn returns_something(method: &MethodDescriptor) -> bool {
    !method.is_void()
}

/// `choices{N}X(..)`
pub struct ActionParameterChoicesFacetFactory;

impl FacetFactory for ActionParameterChoicesFacetFactory {
    fn name(&self) -> &'static str {
        "action-parameter-choices"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::PARAMETERS_ONLY
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["choices"]
    }

    fn process_param(&self, context: &mut ProcessParameterContext<'_>) {
        if let Some(method) = context.take_supporting("choices", returns_something) {
            context.facets.add(FacetData::ActionParameterChoices {
                method: method.name.clone(),
            });
        }
    }
}

/// `default{N}X(..)`
pub struct ActionParameterDefaultsFacetFactory;

impl FacetFactory for ActionParameterDefaultsFacetFactory {
    fn name(&self) -> &'static str {
        "action-parameter-default"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::PARAMETERS_ONLY
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["default"]
    }

    fn process_param(&self, context: &mut ProcessParameterContext<'_>) {
        if let Some(method) = context.take_supporting("default", returns_something) {
            context.facets.add(FacetData::ActionParameterDefaults {
                method: method.name.clone(),
            });
        }
    }
}

/// `autoComplete{N}X(String)`; cannot be combined with choices
pub struct ActionParameterAutoCompleteFacetFactory;

impl FacetFactory for ActionParameterAutoCompleteFacetFactory {
    fn name(&self) -> &'static str {
        "action-parameter-auto-complete"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::PARAMETERS_ONLY
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["autoComplete"]
    }

    fn process_param(&self, context: &mut ProcessParameterContext<'_>) {
        let Some(method) = context.take_supporting("autoComplete", takes_search_string) else {
            return;
        };
        if context.facets.contains(FacetKind::ActionParameterChoices) {
            context.record_failure(format!(
                "has both choices and {}(); use one or the other",
                method.name
            ));
        }
        let min_length =
            auto_complete_min_length(method, context.env.config.auto_complete_min_length());
        context.facets.add(FacetData::ActionParameterAutoComplete {
            method: method.name.clone(),
            min_length,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::FacetHolder;
    use crate::factories::property::MandatoryFacetFactory;
    use crate::factories::testing::Harness;
    use crate::types::{Annotation, ClassDescriptor, Identifier, ParameterDescriptor};

    fn customer() -> ClassDescriptor {
        ClassDescriptor::new("com.acme.Customer")
            .with_method(
                MethodDescriptor::new("placeOrder")
                    .returning("com.acme.Order")
                    .with_param("com.acme.Product")
                    .with_parameter(
                        ParameterDescriptor::new("int")
                            .named("quantity")
                            .annotated(Annotation::new("Optional")),
                    ),
            )
            .with_method(
                MethodDescriptor::new("validatePlaceOrder")
                    .returning("java.lang.String")
                    .with_param("com.acme.Product")
                    .with_param("int"),
            )
            .with_method(
                MethodDescriptor::new("choices0PlaceOrder")
                    .returning("java.util.List<com.acme.Product>"),
            )
            .with_method(
                MethodDescriptor::new("autoComplete0PlaceOrder")
                    .returning("java.util.List<com.acme.Product>")
                    .with_param("java.lang.String"),
            )
            .with_method(MethodDescriptor::new("default1PlaceOrder").returning("int"))
    }

    #[test]
    fn test_action_and_parameter_supporting_methods() {
        let class = customer();
        let outcome = Harness::default().process_member(
            &[
                &ActionInvocationFacetFactory,
                &ActionValidateFacetFactory,
                &MandatoryFacetFactory,
                &ActionParameterChoicesFacetFactory,
                &ActionParameterDefaultsFacetFactory,
                &ActionParameterAutoCompleteFacetFactory,
            ],
            &class,
            FacetHolder::new(Identifier::class("com.acme.Customer")),
            "placeOrder",
            "placeOrder",
            FeatureType::Action,
        );

        assert_eq!(
            outcome.member_facets.data(FacetKind::ActionInvocation),
            Some(&FacetData::ActionInvocation {
                method: "placeOrder".into(),
                return_type: TypeRef::simple("com.acme.Order")
            })
        );
        assert!(outcome.member_facets.contains(FacetKind::ActionValidate));

        let product = &outcome.parameter_facets[0];
        assert!(product.contains(FacetKind::ActionParameterChoices));
        assert!(product.contains(FacetKind::ActionParameterAutoComplete));
        let quantity = &outcome.parameter_facets[1];
        assert!(quantity.contains(FacetKind::ActionParameterDefaults));

        let messages: Vec<String> = outcome.failures.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "com.acme.Customer#placeOrder[0]: has both choices and autoComplete0PlaceOrder(); use one or the other",
                "com.acme.Customer#placeOrder[1]: @Optional cannot be applied to primitive type 'int'",
            ]
        );
        assert_eq!(outcome.remover.remaining(&class).count(), 0);
    }
}
