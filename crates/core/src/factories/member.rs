//! Factories shared by properties, collections and actions

use super::{FacetFactory, ProcessClassContext, ProcessMethodContext, no_params};
use crate::facets::{FacetData, FacetKind, Where};
use crate::types::{Annotated, Annotation, FeatureType};

/// `@MemberOrder(sequence, name)`
pub struct MemberOrderFacetFactory;

impl FacetFactory for MemberOrderFacetFactory {
    fn name(&self) -> &'static str {
        "member-order"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::MEMBERS
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        let Some(annotation) = context.method.annotation("MemberOrder") else {
            return;
        };
        let sequence = annotation
            .attr_str("sequence")
            .map(str::to_string)
            .or_else(|| annotation.attr_u64("sequence").map(|n| n.to_string()));
        match sequence {
            Some(sequence) => {
                let group = annotation.attr_str("name").map(str::to_string);
                context
                    .facets
                    .add(FacetData::MemberOrder { sequence, group });
            }
            None => context.record_failure("@MemberOrder has no sequence"),
        }
    }
}

fn hidden_location(annotation: &Annotation) -> Result<Where, String> {
    match annotation.attr_str("where").or_else(|| annotation.value_str()) {
        None => Ok(Where::Everywhere),
        Some(text) => Where::parse(text).ok_or_else(|| format!("@Hidden has unknown where '{text}'")),
    }
}

/// `@Hidden(where)` on classes and members
pub struct HiddenAnnotationFacetFactory;

impl FacetFactory for HiddenAnnotationFacetFactory {
    fn name(&self) -> &'static str {
        "hidden-annotation"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::EVERYTHING_BUT_PARAMETERS
    }

    fn process_class(&self, context: &mut ProcessClassContext<'_>) {
        let class = context.class;
        if let Some(annotation) = class.annotation("Hidden") {
            match hidden_location(annotation) {
                Ok(location) => {
                    context.facets.add(FacetData::Hidden(location));
                }
                Err(message) => context.record_failure(message),
            }
        }
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        let method = context.method;
        if let Some(annotation) = method.annotation("Hidden") {
            match hidden_location(annotation) {
                Ok(location) => {
                    context.facets.add(FacetData::Hidden(location));
                }
                Err(message) => context.record_failure(message),
            }
        }
    }
}

/// `@Disabled(reason)`; properties of immutable classes are disabled too
pub struct DisabledAnnotationFacetFactory;

impl FacetFactory for DisabledAnnotationFacetFactory {
    fn name(&self) -> &'static str {
        "disabled-annotation"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::MEMBERS
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        if let Some(annotation) = context.method.annotation("Disabled") {
            let reason = annotation
                .attr_str("reason")
                .or_else(|| annotation.value_str())
                .map(str::to_string);
            context.facets.add(FacetData::Disabled { reason });
        } else if context.feature_type == FeatureType::Property
            && context.class_facets.contains(FacetKind::Immutable)
        {
            context.facets.add_derived(FacetData::Disabled {
                reason: Some("Immutable".to_string()),
            });
        }
    }
}

/// `hideX()` supporting methods
pub struct HideMethodFacetFactory;

impl FacetFactory for HideMethodFacetFactory {
    fn name(&self) -> &'static str {
        "hide-method"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::MEMBERS
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["hide"]
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        if let Some(method) = context.take_supporting("hide", no_params) {
            context.facets.add(FacetData::HideForContext {
                method: method.name.clone(),
            });
        }
    }
}

/// `disableX()` supporting methods returning the reason, or null
pub struct DisableMethodFacetFactory;

impl FacetFactory for DisableMethodFacetFactory {
    fn name(&self) -> &'static str {
        "disable-method"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::MEMBERS
    }

    fn prefixes(&self) -> &'static [&'static str] {
        &["disable"]
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        if let Some(method) = context.take_supporting("disable", |m| no_params(m) && !m.is_void()) {
            context.facets.add(FacetData::DisableForContext {
                method: method.name.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::FacetHolder;
    use crate::factories::testing::Harness;
    use crate::types::{ClassDescriptor, Identifier, MethodDescriptor};

    fn customer() -> ClassDescriptor {
        ClassDescriptor::new("com.acme.Customer")
            .with_method(
                MethodDescriptor::new("getName")
                    .returning("java.lang.String")
                    .annotated(Annotation::new("MemberOrder").with("sequence", 2).with("name", "General"))
                    .annotated(Annotation::new("Hidden").with("where", "ALL_TABLES")),
            )
            .with_method(MethodDescriptor::new("hideName").returning("boolean"))
            .with_method(MethodDescriptor::new("disableName").returning("java.lang.String"))
    }

    fn class_facets() -> FacetHolder {
        FacetHolder::new(Identifier::class("com.acme.Customer"))
    }

    #[test]
    fn test_member_annotations() {
        let harness = Harness::default();
        let outcome = harness.process_member(
            &[&MemberOrderFacetFactory, &HiddenAnnotationFacetFactory],
            &customer(),
            class_facets(),
            "getName",
            "name",
            FeatureType::Property,
        );

        assert_eq!(
            outcome.member_facets.data(FacetKind::MemberOrder),
            Some(&FacetData::MemberOrder {
                sequence: "2".into(),
                group: Some("General".into())
            })
        );
        assert_eq!(
            outcome.member_facets.data(FacetKind::Hidden),
            Some(&FacetData::Hidden(Where::AllTables))
        );
    }

    #[test]
    fn test_supporting_methods_are_consumed() {
        let harness = Harness::default();
        let outcome = harness.process_member(
            &[&HideMethodFacetFactory, &DisableMethodFacetFactory],
            &customer(),
            class_facets(),
            "getName",
            "name",
            FeatureType::Property,
        );

        assert!(outcome.member_facets.contains(FacetKind::HideForContext));
        assert!(outcome.member_facets.contains(FacetKind::DisableForContext));
        assert!(outcome.remover.is_removed(1));
        assert!(outcome.remover.is_removed(2));
    }

    #[test]
    fn test_immutable_class_disables_properties() {
        let harness = Harness::default();
        let mut facets = class_facets();
        facets.add(FacetData::Immutable);
        let outcome = harness.process_member(
            &[&DisabledAnnotationFacetFactory],
            &customer(),
            facets,
            "getName",
            "name",
            FeatureType::Property,
        );

        let disabled = outcome.member_facets.get(FacetKind::Disabled).unwrap();
        assert!(disabled.is_derived());
    }

    #[test]
    fn test_unknown_hidden_location_is_a_failure() {
        let harness = Harness::default();
        let class = ClassDescriptor::new("com.acme.Customer")
            .annotated(Annotation::new("Hidden").with("where", "sometimes"));
        let outcome = harness.process_class(&HiddenAnnotationFacetFactory, &class);

        assert!(outcome.class_facets.is_empty());
        assert_eq!(outcome.failures.len(), 1);
    }
}
