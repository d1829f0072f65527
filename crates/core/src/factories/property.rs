//! Factories for properties, and the validation facets shared with parameters

use super::{FacetFactory, ProcessMethodContext, ProcessParameterContext, no_params};
use crate::facets::{
    FacetData, FacetHolder, FacetKind, PropertyClearStrategy, RegExRule, SetterStrategy,
};
use crate::repository::ClassRepository;
use crate::types::{Annotated, Annotation, FeatureType, MethodDescriptor, TypeRef};

const STRING_CLASS: &str = "java.lang.String";

pub struct PropertyAccessorFacetFactory;

impl FacetFactory for PropertyAccessorFacetFactory {
    fn name(&self) -> &'static str {
        "property-accessor"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::PROPERTIES_ONLY
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["get", "is"]
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        context.facets.add(FacetData::PropertyAccessor {
            method: context.method.name.clone(),
        });
    }
}

/// `modifyX(T)` / `setX(T)` and `clearX()`; a property with neither is read-only
pub struct PropertySetAndClearFacetFactory;

impl FacetFactory for PropertySetAndClearFacetFactory {
    fn name(&self) -> &'static str {
        "property-set-and-clear"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::PROPERTIES_ONLY
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["set", "modify", "clear"]
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        let method = context.method;
        let property_type = &method.return_type;
        let accepts_value = |m: &MethodDescriptor| m.has_param_types(&[property_type]);

        let modify = context.take_supporting("modify", accepts_value);
        let setter = context.take_supporting("set", accepts_value);
        match (modify, setter) {
            (Some(modify), _) => {
                context
                    .facets
                    .add(FacetData::PropertySetter(SetterStrategy::ModifyMethod(
                        modify.name.clone(),
                    )));
            }
            (None, Some(setter)) => {
                context
                    .facets
                    .add(FacetData::PropertySetter(SetterStrategy::Setter(
                        setter.name.clone(),
                    )));
            }
            (None, None) => {
                context.facets.add_derived_if_absent(FacetData::Disabled {
                    reason: Some("No setter".to_string()),
                });
            }
        }

        if let Some(clear) = context.take_supporting("clear", no_params) {
            context
                .facets
                .add(FacetData::PropertyClear(PropertyClearStrategy::Method(
                    clear.name.clone(),
                )));
        } else if let Some(setter) = setter {
            context
                .facets
                .add_derived(FacetData::PropertyClear(PropertyClearStrategy::SetterWithNull(
                    setter.name.clone(),
                )));
        }
    }
}

fn mandatory_facet(
    annotations: &[Annotation],
    type_ref: &TypeRef,
    repository: &ClassRepository,
    facets: &mut FacetHolder,
) -> Option<String> {
    let find = |name: &str| annotations.iter().any(|a| a.simple_name() == name);
    if find("Optional") {
        if repository.is_primitive(&type_ref.name) {
            facets.add_derived(FacetData::Mandatory(true));
            return Some(format!(
                "@Optional cannot be applied to primitive type '{type_ref}'"
            ));
        }
        facets.add(FacetData::Mandatory(false));
    } else if find("Mandatory") {
        facets.add(FacetData::Mandatory(true));
    } else {
        facets.add_derived(FacetData::Mandatory(true));
    }
    None
}

/// `@Optional` / `@Mandatory`; everything else is mandatory by default
pub struct MandatoryFacetFactory;

impl FacetFactory for MandatoryFacetFactory {
    fn name(&self) -> &'static str {
        "mandatory"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::PROPERTIES_AND_PARAMETERS
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        let method = context.method;
        let failure = mandatory_facet(
            &method.annotations,
            &method.return_type,
            context.env.repository,
            context.facets,
        );
        if let Some(message) = failure {
            context.record_failure(message);
        }
    }

    fn process_param(&self, context: &mut ProcessParameterContext<'_>) {
        let parameter = context.parameter;
        let failure = mandatory_facet(
            &parameter.annotations,
            &parameter.type_ref,
            context.env.repository,
            context.facets,
        );
        if let Some(message) = failure {
            context.record_failure(message);
        }
    }
}

fn max_length_facet(annotation: &Annotation, facets: &mut FacetHolder) -> Option<String> {
    match annotation
        .attr_u64("value")
        .and_then(|n| u32::try_from(n).ok())
    {
        Some(length) => {
            facets.add(FacetData::MaxLength(length));
            None
        }
        None => Some("@MaxLength requires a non-negative length".to_string()),
    }
}

pub struct MaxLengthFacetFactory;

impl FacetFactory for MaxLengthFacetFactory {
    fn name(&self) -> &'static str {
        "max-length"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::PROPERTIES_AND_PARAMETERS
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        let method = context.method;
        if let Some(annotation) = method.annotation("MaxLength") {
            if let Some(message) = max_length_facet(annotation, context.facets) {
                context.record_failure(message);
            }
        }
    }

    fn process_param(&self, context: &mut ProcessParameterContext<'_>) {
        let parameter = context.parameter;
        if let Some(annotation) = parameter.annotation("MaxLength") {
            if let Some(message) = max_length_facet(annotation, context.facets) {
                context.record_failure(message);
            }
        }
    }
}

fn regex_facet(
    annotation: &Annotation,
    type_ref: &TypeRef,
    facets: &mut FacetHolder,
) -> Option<String> {
    if type_ref.name != STRING_CLASS {
        return None;
    }
    let pattern = annotation
        .attr_str("validation")
        .or_else(|| annotation.value_str())?;
    let case_sensitive = annotation.attr_bool("caseSensitive").unwrap_or(true);
    match RegExRule::new(pattern, case_sensitive) {
        Ok(rule) => {
            facets.add(FacetData::RegEx(rule));
            None
        }
        Err(e) => Some(format!("@RegEx pattern '{pattern}' is invalid: {e}")),
    }
}

/// `@RegEx(validation, caseSensitive)` on string properties and parameters
pub struct RegExFacetFactory;

impl FacetFactory for RegExFacetFactory {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::PROPERTIES_AND_PARAMETERS
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        let method = context.method;
        if let Some(annotation) = method.annotation("RegEx") {
            if let Some(message) = regex_facet(annotation, &method.return_type, context.facets) {
                context.record_failure(message);
            }
        }
    }

    fn process_param(&self, context: &mut ProcessParameterContext<'_>) {
        let parameter = context.parameter;
        if let Some(annotation) = parameter.annotation("RegEx") {
            if let Some(message) = regex_facet(annotation, &parameter.type_ref, context.facets) {
                context.record_failure(message);
            }
        }
    }
}

pub struct PropertyChoicesFacetFactory;

impl FacetFactory for PropertyChoicesFacetFactory {
    fn name(&self) -> &'static str {
        "property-choices"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::PROPERTIES_ONLY
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["choices"]
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        if let Some(method) = context.take_supporting("choices", |m| no_params(m) && !m.is_void()) {
            context.facets.add(FacetData::PropertyChoices {
                method: method.name.clone(),
            });
        }
    }
}

/// Minimum search length: `@MinLength` on the supporting method, else configuration
pub(crate) fn auto_complete_min_length(method: &MethodDescriptor, default: u32) -> u32 {
    method
        .annotation("MinLength")
        .and_then(|a| a.attr_u64("value"))
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(default)
}

pub(crate) fn takes_search_string(method: &MethodDescriptor) -> bool {
    method.has_param_types(&[&TypeRef::simple(STRING_CLASS)]) && !method.is_void()
}

/// `autoCompleteX(String)`; cannot be combined with choices
pub struct PropertyAutoCompleteFacetFactory;

impl FacetFactory for PropertyAutoCompleteFacetFactory {
    fn name(&self) -> &'static str {
        "property-auto-complete"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::PROPERTIES_ONLY
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["autoComplete"]
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        let Some(method) = context.take_supporting("autoComplete", takes_search_string) else {
            return;
        };
        if context.facets.contains(FacetKind::PropertyChoices) {
            context.record_failure(format!(
                "has both choices and {}(); use one or the other",
                method.name
            ));
        }
        let min_length =
            auto_complete_min_length(method, context.env.config.auto_complete_min_length());
        context.facets.add(FacetData::AutoComplete {
            method: method.name.clone(),
            min_length,
        });
    }
}

pub struct PropertyDefaultFacetFactory;

impl FacetFactory for PropertyDefaultFacetFactory {
    fn name(&self) -> &'static str {
        "property-default"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::PROPERTIES_ONLY
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["default"]
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        if let Some(method) = context.take_supporting("default", |m| no_params(m) && !m.is_void()) {
            context.facets.add(FacetData::PropertyDefault {
                method: method.name.clone(),
            });
        }
    }
}

pub struct PropertyValidateFacetFactory;

impl FacetFactory for PropertyValidateFacetFactory {
    fn name(&self) -> &'static str {
        "property-validate"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::PROPERTIES_ONLY
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["validate"]
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        let method = context.method;
        let property_type = &method.return_type;
        if let Some(method) =
            context.take_supporting("validate", |m| m.has_param_types(&[property_type]))
        {
            context.facets.add(FacetData::PropertyValidate {
                method: method.name.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;
    use crate::factories::testing::Harness;
    use crate::types::{ClassDescriptor, Identifier};

    fn class_facets() -> FacetHolder {
        FacetHolder::new(Identifier::class("com.acme.Customer"))
    }

    #[test]
    fn test_setter_and_derived_clear() {
        let class = ClassDescriptor::new("com.acme.Customer")
            .with_method(MethodDescriptor::new("getName").returning("java.lang.String"))
            .with_method(MethodDescriptor::new("setName").with_param("java.lang.String"));
        let outcome = Harness::default().process_member(
            &[&PropertySetAndClearFacetFactory],
            &class,
            class_facets(),
            "getName",
            "name",
            FeatureType::Property,
        );

        assert_eq!(
            outcome.member_facets.data(FacetKind::PropertySetter),
            Some(&FacetData::PropertySetter(SetterStrategy::Setter("setName".into())))
        );
        let clear = outcome.member_facets.get(FacetKind::PropertyClear).unwrap();
        assert!(clear.is_derived());
        assert!(!outcome.member_facets.contains(FacetKind::Disabled));
    }

    #[test]
    fn test_modify_wins_and_clear_method_is_used() {
        let class = ClassDescriptor::new("com.acme.Customer")
            .with_method(MethodDescriptor::new("getName").returning("java.lang.String"))
            .with_method(MethodDescriptor::new("setName").with_param("java.lang.String"))
            .with_method(MethodDescriptor::new("modifyName").with_param("java.lang.String"))
            .with_method(MethodDescriptor::new("clearName"));
        let outcome = Harness::default().process_member(
            &[&PropertySetAndClearFacetFactory],
            &class,
            class_facets(),
            "getName",
            "name",
            FeatureType::Property,
        );

        assert_eq!(
            outcome.member_facets.data(FacetKind::PropertySetter),
            Some(&FacetData::PropertySetter(SetterStrategy::ModifyMethod(
                "modifyName".into()
            )))
        );
        assert_eq!(
            outcome.member_facets.data(FacetKind::PropertyClear),
            Some(&FacetData::PropertyClear(PropertyClearStrategy::Method(
                "clearName".into()
            )))
        );
        assert_eq!(outcome.remover.remaining(&class).count(), 0);
    }

    #[test]
    fn test_read_only_property_is_disabled() {
        let class = ClassDescriptor::new("com.acme.Customer")
            .with_method(MethodDescriptor::new("getId").returning("long"));
        let outcome = Harness::default().process_member(
            &[&PropertySetAndClearFacetFactory],
            &class,
            class_facets(),
            "getId",
            "id",
            FeatureType::Property,
        );
        assert!(outcome.member_facets.get(FacetKind::Disabled).unwrap().is_derived());
    }

    #[test]
    fn test_optional_primitive_is_a_failure() {
        let class = ClassDescriptor::new("com.acme.Customer").with_method(
            MethodDescriptor::new("getAge")
                .returning("int")
                .annotated(Annotation::new("Optional")),
        );
        let outcome = Harness::default().process_member(
            &[&MandatoryFacetFactory],
            &class,
            class_facets(),
            "getAge",
            "age",
            FeatureType::Property,
        );

        assert_eq!(outcome.failures.len(), 1);
        insta::assert_snapshot!(
            outcome.failures[0].to_string(),
            @"com.acme.Customer#age: @Optional cannot be applied to primitive type 'int'"
        );
    }

    #[test]
    fn test_string_constraints() {
        let class = ClassDescriptor::new("com.acme.Customer").with_method(
            MethodDescriptor::new("getEmail")
                .returning("java.lang.String")
                .annotated(Annotation::new("MaxLength").with("value", 60))
                .annotated(Annotation::new("RegEx").with("validation", "^\\S+@\\S+$")),
        );
        let outcome = Harness::default().process_member(
            &[&MaxLengthFacetFactory, &RegExFacetFactory, &MandatoryFacetFactory],
            &class,
            class_facets(),
            "getEmail",
            "email",
            FeatureType::Property,
        );

        assert_eq!(
            outcome.member_facets.data(FacetKind::MaxLength),
            Some(&FacetData::MaxLength(60))
        );
        match outcome.member_facets.data(FacetKind::RegEx) {
            Some(FacetData::RegEx(rule)) => assert!(rule.matches("ann@acme.com")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(outcome.member_facets.get(FacetKind::Mandatory).unwrap().is_derived());
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_invalid_regex_is_a_failure() {
        let class = ClassDescriptor::new("com.acme.Customer").with_method(
            MethodDescriptor::new("getCode")
                .returning("java.lang.String")
                .annotated(Annotation::new("RegEx").with("validation", "([a-z")),
        );
        let outcome = Harness::default().process_member(
            &[&RegExFacetFactory],
            &class,
            class_facets(),
            "getCode",
            "code",
            FeatureType::Property,
        );
        assert!(!outcome.member_facets.contains(FacetKind::RegEx));
        assert_eq!(outcome.failures.len(), 1);
    }

    #[test]
    fn test_choices_with_auto_complete_conflict() {
        let class = ClassDescriptor::new("com.acme.Order")
            .with_method(MethodDescriptor::new("getCustomer").returning("com.acme.Customer"))
            .with_method(
                MethodDescriptor::new("choicesCustomer")
                    .returning("java.util.List<com.acme.Customer>"),
            )
            .with_method(
                MethodDescriptor::new("autoCompleteCustomer")
                    .returning("java.util.List<com.acme.Customer>")
                    .with_param("java.lang.String"),
            );
        let mut harness = Harness::default();
        harness.config.set(keys::AUTO_COMPLETE_MIN_LENGTH, "3");
        let outcome = harness.process_member(
            &[&PropertyChoicesFacetFactory, &PropertyAutoCompleteFacetFactory],
            &class,
            class_facets(),
            "getCustomer",
            "customer",
            FeatureType::Property,
        );

        assert!(outcome.member_facets.contains(FacetKind::PropertyChoices));
        assert_eq!(
            outcome.member_facets.data(FacetKind::AutoComplete),
            Some(&FacetData::AutoComplete {
                method: "autoCompleteCustomer".into(),
                min_length: 3
            })
        );
        assert_eq!(outcome.failures.len(), 1);
    }
}
