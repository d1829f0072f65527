use arc_swap::ArcSwap;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use super::SpecificationLoader;
use crate::cache::SpecificationCache;
use crate::config::MetaModelConfig;
use crate::programming_model::ProgrammingModel;
use crate::repository::ClassRepository;
use crate::services::Services;
use crate::substitutor::ClassSubstitutor;
use crate::validator::{MetaModelValidatorComposite, ValidationFailures};

/// Builder for [`SpecificationLoader`].
///
/// Anything left unset falls back to the standard component, configured from
/// the builder's [`MetaModelConfig`].
#[derive(Default)]
pub struct SpecificationLoaderBuilder {
    config: Option<MetaModelConfig>,
    repository: Option<ClassRepository>,
    model: Option<Arc<ProgrammingModel>>,
    substitutor: Option<ClassSubstitutor>,
    validators: Option<MetaModelValidatorComposite>,
    services: Option<Services>,
}

impl SpecificationLoaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: MetaModelConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_repository(mut self, repository: ClassRepository) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn with_programming_model(mut self, model: ProgrammingModel) -> Self {
        self.model = Some(Arc::new(model));
        self
    }

    pub fn with_substitutor(mut self, substitutor: ClassSubstitutor) -> Self {
        self.substitutor = Some(substitutor);
        self
    }

    pub fn with_validators(mut self, validators: MetaModelValidatorComposite) -> Self {
        self.validators = Some(validators);
        self
    }

    pub fn with_services(mut self, services: Services) -> Self {
        self.services = Some(services);
        self
    }

    pub fn build(self) -> SpecificationLoader {
        let config = self.config.unwrap_or_default();
        let model = self
            .model
            .unwrap_or_else(|| Arc::new(ProgrammingModel::from_config(&config)));
        let substitutor = self
            .substitutor
            .unwrap_or_else(|| ClassSubstitutor::from_config(&config));

        SpecificationLoader {
            model,
            substitutor,
            validators: self
                .validators
                .unwrap_or_else(MetaModelValidatorComposite::standard),
            services: self.services.unwrap_or_default(),
            repository: ArcSwap::from_pointee(
                self.repository.unwrap_or_else(ClassRepository::new),
            ),
            cache: ArcSwap::from_pointee(SpecificationCache::new()),
            failures: RwLock::new(ValidationFailures::new()),
            writer: Mutex::new(()),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;
    use crate::programming_model::ProgrammingModelBuilder;
    use crate::types::{ClassDescriptor, MethodDescriptor};
    use crate::validator::DeferredFailuresValidator;

    #[test]
    fn test_defaults_follow_config() {
        let config = MetaModelConfig::new().with(keys::FACETS_EXCLUDE, "property-validate");
        let loader = SpecificationLoaderBuilder::new().with_config(config).build();

        assert!(!loader.programming_model().contains("property-validate"));
        assert_eq!(loader.programming_model().len(), 35);
    }

    #[test]
    fn test_custom_components() {
        let model = ProgrammingModelBuilder::new()
            .with_defaults()
            .without("title-method")
            .build();
        let mut repository = ClassRepository::new();
        repository.register(
            ClassDescriptor::new("com.acme.Note")
                .with_method(MethodDescriptor::new("title").returning("java.lang.String")),
        );
        let loader = SpecificationLoaderBuilder::new()
            .with_repository(repository)
            .with_programming_model(model)
            .with_validators(MetaModelValidatorComposite::new().with(DeferredFailuresValidator))
            .build();

        loader.init().unwrap();
        let note = loader.lookup_by_class("com.acme.Note").unwrap();
        // without the title factory, title() is just another action
        assert!(note.action("title").is_some());
    }
}
