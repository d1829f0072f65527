//! Factories that analyse the class itself

use tracing::trace;

use super::{
    FacetFactory, ProcessClassContext, ProcessMethodContext, ProcessParameterContext, no_params,
};
use crate::facets::{FacetData, FacetKind, TitleStrategy};
use crate::spec::ObjectSpecId;
use crate::types::{Annotated, FeatureType, MethodDescriptor};
use crate::utils::naming::{accessor_property_name, compare_sequence};
use crate::values::ValueType;

/// `@Named(value)` on anything
pub struct NamedFacetFactory;

impl FacetFactory for NamedFacetFactory {
    fn name(&self) -> &'static str {
        "named"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::EVERYTHING
    }

    fn process_class(&self, context: &mut ProcessClassContext<'_>) {
        if let Some(name) = context.class.annotation("Named").and_then(|a| a.value_str()) {
            let translated = context.env.services.translate(&context.class.name, name);
            context.facets.add(FacetData::Named(translated));
        }
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        if let Some(name) = context.method.annotation("Named").and_then(|a| a.value_str()) {
            let translated = context.env.services.translate(&context.class.name, name);
            context.facets.add(FacetData::Named(translated));
        }
    }

    fn process_param(&self, context: &mut ProcessParameterContext<'_>) {
        if let Some(name) = context
            .parameter
            .annotation("Named")
            .and_then(|a| a.value_str())
        {
            let translated = context.env.services.translate(&context.class.name, name);
            context.facets.add(FacetData::Named(translated));
        }
    }
}

/// `@DescribedAs(value)` on anything
pub struct DescribedAsFacetFactory;

impl FacetFactory for DescribedAsFacetFactory {
    fn name(&self) -> &'static str {
        "described-as"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::EVERYTHING
    }

    fn process_class(&self, context: &mut ProcessClassContext<'_>) {
        if let Some(text) = context
            .class
            .annotation("DescribedAs")
            .and_then(|a| a.value_str())
        {
            let translated = context.env.services.translate(&context.class.name, text);
            context.facets.add(FacetData::DescribedAs(translated));
        }
    }

    fn process_method(&self, context: &mut ProcessMethodContext<'_>) {
        if let Some(text) = context
            .method
            .annotation("DescribedAs")
            .and_then(|a| a.value_str())
        {
            let translated = context.env.services.translate(&context.class.name, text);
            context.facets.add(FacetData::DescribedAs(translated));
        }
    }

    fn process_param(&self, context: &mut ProcessParameterContext<'_>) {
        if let Some(text) = context
            .parameter
            .annotation("DescribedAs")
            .and_then(|a| a.value_str())
        {
            let translated = context.env.services.translate(&context.class.name, text);
            context.facets.add(FacetData::DescribedAs(translated));
        }
    }
}

pub struct PluralFacetFactory;

impl FacetFactory for PluralFacetFactory {
    fn name(&self) -> &'static str {
        "plural"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::OBJECTS_ONLY
    }

    fn process_class(&self, context: &mut ProcessClassContext<'_>) {
        if let Some(plural) = context.class.annotation("Plural").and_then(|a| a.value_str()) {
            let translated = context.env.services.translate(&context.class.name, plural);
            context.facets.add(FacetData::Plural(translated));
        }
    }
}

/// Stable type identifier: `@ObjectType(value)`, `@DomainObject(objectType)`,
/// otherwise the class name. Anonymous classes get none.
pub struct ObjectSpecIdFacetFactory;

impl FacetFactory for ObjectSpecIdFacetFactory {
    fn name(&self) -> &'static str {
        "object-spec-id"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::OBJECTS_ONLY
    }

    fn process_class(&self, context: &mut ProcessClassContext<'_>) {
        let explicit = context
            .class
            .annotation("ObjectType")
            .and_then(|a| a.value_str())
            .or_else(|| {
                context
                    .class
                    .annotation("DomainObject")
                    .and_then(|a| a.attr_str("objectType"))
            })
            .map(str::trim)
            .filter(|id| !id.is_empty());

        if let Some(id) = explicit {
            context
                .facets
                .add(FacetData::ObjectSpecId(ObjectSpecId::new(id)));
        } else if !context.class.is_anonymous() {
            context
                .facets
                .add_derived(FacetData::ObjectSpecId(ObjectSpecId::new(&context.class.name)));
        }
    }
}

/// Builtin value classes and `@Value(type)`
pub struct ValueFacetFactory;

impl FacetFactory for ValueFacetFactory {
    fn name(&self) -> &'static str {
        "value"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::OBJECTS_ONLY
    }

    fn process_class(&self, context: &mut ProcessClassContext<'_>) {
        let class = context.class;
        let value_type = match class.annotation("Value") {
            Some(annotation) => {
                let declared = annotation
                    .attr_str("type")
                    .or_else(|| annotation.value_str())
                    .unwrap_or_default();
                let parsed = parse_value_type(declared);
                if parsed.is_none() {
                    context.record_failure(format!(
                        "@Value declares unknown value type '{declared}'"
                    ));
                }
                parsed
            }
            None => ValueType::for_class(&class.name),
        };

        if let Some(value_type) = value_type {
            context.facets.add(FacetData::Value(value_type));
            context
                .facets
                .add_derived(FacetData::Title(TitleStrategy::ValueSemantics(value_type)));
        }
    }
}

fn parse_value_type(text: &str) -> Option<ValueType> {
    serde_json::from_value(serde_json::Value::String(text.to_string())).ok()
}

/// Collection classes and arrays
pub struct CollectionTypeFacetFactory;

impl FacetFactory for CollectionTypeFacetFactory {
    fn name(&self) -> &'static str {
        "collection-type"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::OBJECTS_ONLY
    }

    fn process_class(&self, context: &mut ProcessClassContext<'_>) {
        if !context.env.repository.is_collection_type(&context.class.name) {
            return;
        }
        context.facets.add(FacetData::CollectionType);
        if let Some(component) = &context.class.component_type {
            context
                .facets
                .add_derived(FacetData::TypeOf(component.clone()));
        }
    }
}

/// `@Immutable` or `@DomainObject(editing = "DISABLED")`
pub struct ImmutableFacetFactory;

impl FacetFactory for ImmutableFacetFactory {
    fn name(&self) -> &'static str {
        "immutable"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::OBJECTS_ONLY
    }

    fn process_class(&self, context: &mut ProcessClassContext<'_>) {
        let editing_disabled = context
            .class
            .annotation("DomainObject")
            .and_then(|a| a.attr_str("editing"))
            .is_some_and(|editing| editing.eq_ignore_ascii_case("disabled"));
        if context.class.has_annotation("Immutable") || editing_disabled {
            context.facets.add(FacetData::Immutable);
        }
    }
}

/// The deprecated `@NotPersistable` marker: honoured, but reported
pub struct NotPersistableFacetFactory;

impl FacetFactory for NotPersistableFacetFactory {
    fn name(&self) -> &'static str {
        "not-persistable"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::OBJECTS_ONLY
    }

    fn process_class(&self, context: &mut ProcessClassContext<'_>) {
        if context.class.has_annotation("NotPersistable") {
            context.facets.add(FacetData::NotPersistable);
            context.record_failure(
                "@NotPersistable is deprecated; use @DomainObject(nature = VIEW_MODEL) instead",
            );
        }
    }
}

/// `@Title` on accessors, concatenated in `sequence` order
pub struct TitleAnnotationFacetFactory;

impl FacetFactory for TitleAnnotationFacetFactory {
    fn name(&self) -> &'static str {
        "title-annotation"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::OBJECTS_ONLY
    }

    fn process_class(&self, context: &mut ProcessClassContext<'_>) {
        let mut titled: Vec<(String, &MethodDescriptor)> = context
            .remover
            .remaining(context.class)
            .map(|(_, m)| m)
            .filter(|m| m.has_annotation("Title") && no_params(m) && !m.is_void())
            .map(|m| {
                let sequence = m
                    .annotation("Title")
                    .and_then(|a| {
                        a.attr_str("sequence")
                            .map(str::to_string)
                            .or_else(|| a.attr_u64("sequence").map(|n| n.to_string()))
                    })
                    .unwrap_or_else(|| "1".to_string());
                (sequence, m)
            })
            .collect();
        if titled.is_empty() {
            return;
        }

        // stable sort keeps declaration order for equal sequences
        titled.sort_by(|(a, _), (b, _)| compare_sequence(a, b));
        let members = titled
            .into_iter()
            .map(|(_, m)| accessor_property_name(&m.name).unwrap_or_else(|| m.name.clone()))
            .collect();
        context
            .facets
            .add(FacetData::Title(TitleStrategy::Annotated(members)));
    }
}

/// `title()`, falling back on a declared `toString()`
pub struct TitleMethodFacetFactory;

impl FacetFactory for TitleMethodFacetFactory {
    fn name(&self) -> &'static str {
        "title-method"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::OBJECTS_ONLY
    }

    fn process_class(&self, context: &mut ProcessClassContext<'_>) {
        if let Some(method) = context.take_method("title", |m| no_params(m) && !m.is_void()) {
            context
                .facets
                .add_if_absent(FacetData::Title(TitleStrategy::Method(method.name.clone())));
            return;
        }
        let has_to_string = context
            .remover
            .peek(context.class, "toString", no_params)
            .is_some();
        if has_to_string && !context.facets.contains(FacetKind::Title) {
            context
                .facets
                .add_derived(FacetData::Title(TitleStrategy::ToString));
        }
    }
}

pub struct IconNameFacetFactory;

impl FacetFactory for IconNameFacetFactory {
    fn name(&self) -> &'static str {
        "icon-name"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::OBJECTS_ONLY
    }

    fn process_class(&self, context: &mut ProcessClassContext<'_>) {
        if let Some(method) = context.take_method("iconName", |m| no_params(m) && !m.is_void()) {
            context.facets.add(FacetData::IconName {
                method: method.name.clone(),
            });
        }
    }
}

/// Layout supplied by the grid service, if any
pub struct GridFacetFactory;

impl FacetFactory for GridFacetFactory {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        FeatureType::OBJECTS_ONLY
    }

    fn process_class(&self, context: &mut ProcessClassContext<'_>) {
        let Some(service) = &context.env.services.grid else {
            return;
        };
        match service.grid_for(context.class) {
            Some(grid) => {
                let reloadable = context.env.config.layout_reload();
                context.facets.add(FacetData::Grid { grid, reloadable });
            }
            None => trace!("No layout for {}", context.class.name),
        }
    }
}
