//! The programming model: the ordered registry of facet factories

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::config::MetaModelConfig;
use crate::factories::{FacetFactory, action, collection, member, object, property};
use crate::types::FeatureType;
use crate::utils::naming::starts_with_prefix;

/// Ordered set of facet factories. Factories run in registration order.
#[derive(Clone, Default)]
pub struct ProgrammingModel {
    factories: Vec<Arc<dyn FacetFactory>>,
}

impl fmt::Debug for ProgrammingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgrammingModel")
            .field("factories", &self.factory_names())
            .finish()
    }
}

impl ProgrammingModel {
    /// The standard programming model
    pub fn new() -> Self {
        ProgrammingModelBuilder::new().with_defaults().build()
    }

    /// The standard programming model minus the factories excluded by configuration
    pub fn from_config(config: &MetaModelConfig) -> Self {
        let excluded = config.excluded_factories();
        let mut builder = ProgrammingModelBuilder::new().with_defaults();
        for name in &excluded {
            if !builder.contains(name) {
                debug!("Excluded facet factory '{name}' is not registered");
            }
            builder = builder.without(name);
        }
        builder.build()
    }

    pub fn register_factory(&mut self, factory: Arc<dyn FacetFactory>) {
        self.factories.retain(|f| f.name() != factory.name());
        self.factories.push(factory);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn FacetFactory>> {
        self.factories.iter().find(|f| f.name() == name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.iter().any(|f| f.name() == name)
    }

    pub fn factory_names(&self) -> Vec<&'static str> {
        self.factories.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Factories applicable to `feature_type`, in order
    pub fn factories_for(&self, feature_type: FeatureType) -> impl Iterator<Item = &dyn FacetFactory> {
        self.factories
            .iter()
            .map(|f| f.as_ref())
            .filter(move |f| f.applies_to(feature_type))
    }

    /// Every method prefix reserved by a registered factory
    pub fn reserved_prefixes(&self) -> BTreeSet<&'static str> {
        self.factories
            .iter()
            .flat_map(|f| f.prefixes().iter().copied())
            .collect()
    }

    /// Whether `method_name` looks like a supporting method rather than an action
    pub fn is_reserved(&self, method_name: &str) -> bool {
        self.factories
            .iter()
            .flat_map(|f| f.prefixes())
            .any(|prefix| starts_with_prefix(method_name, prefix))
    }
}

/// Builder for custom programming models
#[derive(Default)]
pub struct ProgrammingModelBuilder {
    factories: Vec<Arc<dyn FacetFactory>>,
}

impl ProgrammingModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a factory at the end; a factory of the same name is replaced in place
    pub fn with_factory(mut self, factory: Arc<dyn FacetFactory>) -> Self {
        match self.factories.iter().position(|f| f.name() == factory.name()) {
            Some(index) => self.factories[index] = factory,
            None => self.factories.push(factory),
        }
        self
    }

    /// Insert a factory directly before the one called `before`, or at the end
    pub fn with_factory_before(mut self, before: &str, factory: Arc<dyn FacetFactory>) -> Self {
        self.factories.retain(|f| f.name() != factory.name());
        match self.factories.iter().position(|f| f.name() == before) {
            Some(index) => self.factories.insert(index, factory),
            None => self.factories.push(factory),
        }
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.factories.retain(|f| f.name() != name);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.iter().any(|f| f.name() == name)
    }

    /// Add the standard factories, in their standard order
    pub fn with_defaults(self) -> Self {
        self.with_factory(Arc::new(object::NamedFacetFactory))
            .with_factory(Arc::new(object::DescribedAsFacetFactory))
            .with_factory(Arc::new(object::PluralFacetFactory))
            .with_factory(Arc::new(object::ObjectSpecIdFacetFactory))
            .with_factory(Arc::new(object::ValueFacetFactory))
            .with_factory(Arc::new(object::CollectionTypeFacetFactory))
            .with_factory(Arc::new(object::ImmutableFacetFactory))
            .with_factory(Arc::new(object::NotPersistableFacetFactory))
            .with_factory(Arc::new(object::TitleAnnotationFacetFactory))
            .with_factory(Arc::new(object::TitleMethodFacetFactory))
            .with_factory(Arc::new(object::IconNameFacetFactory))
            .with_factory(Arc::new(object::GridFacetFactory))
            .with_factory(Arc::new(member::MemberOrderFacetFactory))
            .with_factory(Arc::new(member::HiddenAnnotationFacetFactory))
            .with_factory(Arc::new(member::DisabledAnnotationFacetFactory))
            .with_factory(Arc::new(member::HideMethodFacetFactory))
            .with_factory(Arc::new(member::DisableMethodFacetFactory))
            .with_factory(Arc::new(property::PropertyAccessorFacetFactory))
            .with_factory(Arc::new(property::PropertySetAndClearFacetFactory))
            .with_factory(Arc::new(property::MandatoryFacetFactory))
            .with_factory(Arc::new(property::MaxLengthFacetFactory))
            .with_factory(Arc::new(property::RegExFacetFactory))
            .with_factory(Arc::new(property::PropertyChoicesFacetFactory))
            .with_factory(Arc::new(property::PropertyAutoCompleteFacetFactory))
            .with_factory(Arc::new(property::PropertyDefaultFacetFactory))
            .with_factory(Arc::new(property::PropertyValidateFacetFactory))
            .with_factory(Arc::new(collection::CollectionAccessorFacetFactory))
            .with_factory(Arc::new(collection::TypeOfFacetFactory))
            .with_factory(Arc::new(collection::CollectionAddRemoveClearFacetFactory))
            .with_factory(Arc::new(collection::CollectionValidateFacetFactory))
            .with_factory(Arc::new(collection::FilterVisibilityFacetFactory))
            .with_factory(Arc::new(action::ActionInvocationFacetFactory))
            .with_factory(Arc::new(action::ActionValidateFacetFactory))
            .with_factory(Arc::new(action::ActionParameterChoicesFacetFactory))
            .with_factory(Arc::new(action::ActionParameterDefaultsFacetFactory))
            .with_factory(Arc::new(action::ActionParameterAutoCompleteFacetFactory))
    }

    pub fn build(self) -> ProgrammingModel {
        ProgrammingModel {
            factories: self.factories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;
    use crate::factories::ProcessClassContext;

    struct Noop;

    impl FacetFactory for Noop {
        fn name(&self) -> &'static str {
            "noop"
        }

        fn feature_types(&self) -> &'static [FeatureType] {
            FeatureType::OBJECTS_ONLY
        }

        fn process_class(&self, _context: &mut ProcessClassContext<'_>) {}
    }

    #[test]
    fn test_default_model_order() {
        let model = ProgrammingModel::new();
        let names = model.factory_names();

        assert_eq!(names.len(), 36);
        assert_eq!(names.first(), Some(&"named"));
        assert_eq!(names.last(), Some(&"action-parameter-auto-complete"));
        let position = |name: &str| names.iter().position(|n| *n == name).unwrap();
        assert!(position("disabled-annotation") < position("property-set-and-clear"));
        assert!(position("type-of") < position("collection-add-remove-clear"));
        assert!(position("title-annotation") < position("title-method"));
    }

    #[test]
    fn test_config_exclusion() {
        let config = MetaModelConfig::new().with(keys::FACETS_EXCLUDE, "regex, grid, nonexistent");
        let model = ProgrammingModel::from_config(&config);

        assert!(!model.contains("regex"));
        assert!(!model.contains("grid"));
        assert_eq!(model.len(), 34);
    }

    #[test]
    fn test_builder_insertion() {
        let model = ProgrammingModelBuilder::new()
            .with_defaults()
            .with_factory_before("named", Arc::new(Noop))
            .build();
        assert_eq!(model.factory_names()[0], "noop");

        let objects: Vec<_> = model
            .factories_for(FeatureType::Object)
            .map(|f| f.name())
            .take(2)
            .collect();
        assert_eq!(objects, vec!["noop", "named"]);
    }

    #[test]
    fn test_reserved_prefixes() {
        let model = ProgrammingModel::new();
        assert!(model.reserved_prefixes().contains("autoComplete"));
        assert!(model.is_reserved("hideName"));
        assert!(model.is_reserved("choices0PlaceOrder"));
        assert!(model.is_reserved("getName"));
        assert!(!model.is_reserved("placeOrder"));
        assert!(!model.is_reserved("clearance"));
    }
}
