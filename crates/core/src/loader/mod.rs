//! Specification loader: builds, caches, validates and reloads specifications

mod builder;
mod introspector;

pub use builder::SpecificationLoaderBuilder;

use arc_swap::ArcSwap;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, trace};

use crate::cache::{Recache, SpecificationCache};
use crate::config::MetaModelConfig;
use crate::error::{Error, Result};
use crate::factories::ProcessingEnv;
use crate::programming_model::ProgrammingModel;
use crate::repository::ClassRepository;
use crate::services::Services;
use crate::spec::{IntrospectionState, ObjectSpecId, ObjectSpecification};
use crate::substitutor::ClassSubstitutor;
use crate::types::TypeRef;
use crate::validator::{MetaModelValidatorComposite, ValidationContext, ValidationFailures};
use introspector::Introspector;

/// What [`SpecificationLoader::reload_changed`] did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReloadSummary {
    /// Classes whose descriptor changed and were introspected again
    pub reloaded: Vec<String>,
    /// Classes that disappeared from the repository
    pub evicted: Vec<String>,
    /// Domain classes that were not loaded before
    pub added: Vec<String>,
}

impl ReloadSummary {
    pub fn is_empty(&self) -> bool {
        self.reloaded.is_empty() && self.evicted.is_empty() && self.added.is_empty()
    }
}

/// Entry point for obtaining object specifications.
///
/// The repository and cache sit behind [`ArcSwap`]. Reloads and rebuilds are
/// assembled in a detached cache and published in one step, so readers see
/// either the previous metamodel or the new one, never a mix. Writers are
/// serialized; a lazy load racing a reload lands in the retired snapshot and
/// is simply redone on the next request.
pub struct SpecificationLoader {
    config: MetaModelConfig,
    model: Arc<ProgrammingModel>,
    substitutor: ClassSubstitutor,
    validators: MetaModelValidatorComposite,
    services: Services,
    repository: ArcSwap<ClassRepository>,
    cache: ArcSwap<SpecificationCache>,
    failures: RwLock<ValidationFailures>,
    writer: Mutex<()>,
}

impl SpecificationLoader {
    /// A loader with the standard programming model, substitutor and validators
    pub fn new(repository: ClassRepository, config: MetaModelConfig) -> Self {
        SpecificationLoaderBuilder::new()
            .with_repository(repository)
            .with_config(config)
            .build()
    }

    pub fn builder() -> SpecificationLoaderBuilder {
        SpecificationLoaderBuilder::new()
    }

    pub fn config(&self) -> &MetaModelConfig {
        &self.config
    }

    pub fn programming_model(&self) -> &ProgrammingModel {
        &self.model
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Current repository snapshot
    pub fn repository(&self) -> Arc<ClassRepository> {
        self.repository.load_full()
    }

    /// Current cache snapshot
    pub fn cache(&self) -> Arc<SpecificationCache> {
        self.cache.load_full()
    }

    pub fn is_initialized(&self) -> bool {
        self.cache.load().is_initialized()
    }

    /// Build (or return the cached) specification for `class_name`.
    ///
    /// Returns `None` for skipped classes and for classes the repository does
    /// not know. Referenced types are loaded too; a cycle sees the in-progress
    /// entry of the class that started it.
    pub fn load_specification(&self, class_name: &str) -> Option<Arc<ObjectSpecification>> {
        let repository = self.repository.load_full();
        let cache = self.cache.load_full();
        self.load_into(&cache, &repository, class_name)
    }

    /// Cached specification for `class_name`, after substitution; never introspects
    pub fn lookup_by_class(&self, class_name: &str) -> Option<Arc<ObjectSpecification>> {
        let repository = self.repository.load();
        let resolved = self.substitutor.substitute(&repository, class_name)?;
        self.cache.load().get(&resolved)
    }

    /// Fails with [`Error::CacheNotInitialized`] until [`Self::init`] has run
    pub fn lookup_by_object_type(
        &self,
        id: impl Into<ObjectSpecId>,
    ) -> Result<Option<Arc<ObjectSpecification>>> {
        self.cache.load().get_by_object_type(&id.into())
    }

    pub fn all_specifications(&self) -> Vec<Arc<ObjectSpecification>> {
        self.cache.load().all_specifications()
    }

    /// Specification for the class a type reference names; arrays resolve to
    /// their own `X[]` specification
    pub fn resolve_type(&self, type_ref: &TypeRef) -> Option<Arc<ObjectSpecification>> {
        if type_ref.is_void() {
            return None;
        }
        self.load_specification(&type_ref.name)
    }

    /// Load every domain class, validate, then open the spec id index.
    ///
    /// Validation failures are returned, not raised; the metamodel is usable
    /// either way.
    pub fn init(&self) -> Result<ValidationFailures> {
        let _writer = self.writer.lock();
        let cache = self.cache.load_full();
        if cache.is_initialized() {
            return Err(Error::CacheAlreadyInitialized);
        }
        let repository = self.repository.load_full();
        debug!(
            "Initializing metamodel with {} domain classes and {} facet factories",
            repository.domain_classes().len(),
            self.model.len()
        );
        for class_name in repository.domain_classes() {
            self.load_into(&cache, &repository, class_name);
        }

        let failures = self.run_validators(&cache);
        cache.set_cache_by_spec_id()?;
        info!(
            "Metamodel initialized: {} specifications, {} validation failures",
            cache.len(),
            failures.len()
        );
        *self.failures.write() = failures.clone();
        Ok(failures)
    }

    /// Re-run every validator over the current cache
    pub fn validate(&self) -> ValidationFailures {
        let failures = self.run_validators(&self.cache.load());
        *self.failures.write() = failures.clone();
        failures
    }

    /// Failures from the most recent `init`, `validate` or `rebuild`
    pub fn validation_failures(&self) -> ValidationFailures {
        self.failures.read().clone()
    }

    /// Drop and rebuild one class against the current repository
    pub fn reload_class(&self, class_name: &str) -> Result<Option<Arc<ObjectSpecification>>> {
        let _writer = self.writer.lock();
        let current = self.cache.load_full();
        if !current.is_initialized() {
            return Err(Error::CacheNotInitialized);
        }
        let repository = self.repository.load_full();
        let staged = current.snapshot();
        let spec = self.reload_into(&staged, &repository, class_name);
        self.cache.store(Arc::new(staged));
        Ok(spec)
    }

    /// Swap in `repository`, then reload only the classes whose fingerprint changed.
    ///
    /// A class that now substitutes to another class (it became a proxy, or is
    /// skipped) is evicted rather than reloaded.
    pub fn reload_changed(&self, repository: ClassRepository) -> Result<ReloadSummary> {
        let _writer = self.writer.lock();
        let current = self.cache.load_full();
        if !current.is_initialized() {
            return Err(Error::CacheNotInitialized);
        }
        let previous = self.repository.load_full();
        let repository = Arc::new(repository);
        let mut summary = ReloadSummary::default();

        for spec in current.all_specifications() {
            let class_name = spec.class_name();
            let substituted = self.substitutor.substitute(&repository, class_name);
            match repository.get(class_name) {
                None => summary.evicted.push(class_name.to_string()),
                Some(_) if substituted.as_deref() != Some(class_name) => {
                    summary.evicted.push(class_name.to_string())
                }
                Some(class) if class.fingerprint() != spec.fingerprint() => {
                    summary.reloaded.push(class_name.to_string())
                }
                Some(_) => {}
            }
        }
        let loaded: BTreeSet<&str> = previous.domain_classes().iter().map(String::as_str).collect();
        summary.added = repository
            .domain_classes()
            .iter()
            .filter(|name| !loaded.contains(name.as_str()) && !current.contains(name))
            .cloned()
            .collect();

        let staged = current.snapshot();
        for class_name in &summary.evicted {
            staged.remove(class_name);
        }
        for class_name in &summary.reloaded {
            self.reload_into(&staged, &repository, class_name);
        }
        for class_name in &summary.added {
            if let Some(spec) = self.load_into(&staged, &repository, class_name) {
                staged.recache(spec);
            }
        }
        self.cache.store(Arc::new(staged));
        self.repository.store(repository);
        info!(
            "Reloaded {} changed, evicted {}, added {}",
            summary.reloaded.len(),
            summary.evicted.len(),
            summary.added.len()
        );
        Ok(summary)
    }

    /// Build a complete metamodel for `repository` off to the side, then
    /// publish it. Readers never observe a half-built cache.
    pub fn rebuild(&self, repository: ClassRepository) -> Result<ValidationFailures> {
        let _writer = self.writer.lock();
        let repository = Arc::new(repository);
        let cache = Arc::new(SpecificationCache::new());
        for class_name in repository.domain_classes() {
            self.load_into(&cache, &repository, class_name);
        }
        let failures = self.run_validators(&cache);
        cache.set_cache_by_spec_id()?;

        self.repository.store(repository);
        self.cache.store(Arc::clone(&cache));
        *self.failures.write() = failures.clone();
        info!("Rebuilt metamodel: {} specifications", cache.len());
        Ok(failures)
    }

    fn run_validators(&self, cache: &SpecificationCache) -> ValidationFailures {
        let specifications = cache.all_specifications();
        self.validators.validate(&ValidationContext {
            specifications: &specifications,
            config: &self.config,
        })
    }

    /// Evict `class_name` from an unpublished cache, then build it again.
    ///
    /// The original name goes first: if it now substitutes to another class,
    /// its own stale entry must not survive.
    fn reload_into(
        &self,
        cache: &SpecificationCache,
        repository: &ClassRepository,
        class_name: &str,
    ) -> Option<Arc<ObjectSpecification>> {
        cache.remove(class_name);
        let resolved = self.substitutor.substitute(repository, class_name)?;
        if resolved != class_name {
            debug!("{class_name} now stands for {resolved}");
            return self.load_into(cache, repository, &resolved);
        }
        let Some(spec) = self.load_into(cache, repository, &resolved) else {
            debug!("{resolved} is no longer in the repository");
            return None;
        };
        match cache.recache(Arc::clone(&spec)) {
            Recache::Indexed => debug!("Reloaded {resolved} as {:?}", spec.spec_id()),
            Recache::MissingSpecId => debug!("Reloaded {resolved} without an object type"),
            Recache::NotInitialized => {}
        }
        Some(spec)
    }

    fn load_into(
        &self,
        cache: &SpecificationCache,
        repository: &ClassRepository,
        class_name: &str,
    ) -> Option<Arc<ObjectSpecification>> {
        let class_name = self.substitutor.substitute(repository, class_name)?;
        if let Some(spec) = cache.get(&class_name) {
            return Some(spec);
        }
        let Some(class) = repository.get(&class_name) else {
            debug!("No descriptor for {class_name}; not loading");
            return None;
        };

        let (placeholder, created) =
            cache.get_or_insert_with(&class_name, || ObjectSpecification::placeholder(&class));
        if !created {
            // another load of the same class is in progress
            return Some(placeholder);
        }
        trace!("Introspecting {class_name}");

        let mut spec = ObjectSpecification::placeholder(&class);
        Introspector {
            model: &self.model,
            env: ProcessingEnv {
                config: &self.config,
                repository,
                services: &self.services,
            },
        }
        .introspect(&class, &mut spec);
        spec.set_state(IntrospectionState::FacetsAttached);
        let referenced = spec.referenced_types();
        cache.cache(Arc::new(spec.clone()));

        for type_name in referenced {
            self.load_into(cache, repository, &type_name);
        }

        spec.set_state(IntrospectionState::FullyIntrospected);
        let spec = Arc::new(spec);
        cache.cache(Arc::clone(&spec));
        Some(spec)
    }
}

impl std::fmt::Debug for SpecificationLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecificationLoader")
            .field("model", &self.model)
            .field("validators", &self.validators)
            .field("specifications", &self.cache.load().len())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
