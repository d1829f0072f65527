use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::spec::{IntrospectionState, ObjectSpecId, ObjectSpecification};

/// Outcome of [`SpecificationCache::recache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recache {
    /// Stored under both class name and spec id
    Indexed,
    /// Stored under its class name only; the spec has no `ObjectSpecId`
    MissingSpecId,
    /// Stored under its class name only; the spec id index is not initialized yet
    NotInitialized,
}

#[derive(Debug, Default)]
struct CacheInner {
    by_class: HashMap<String, Arc<ObjectSpecification>>,
    /// `None` until `set_cache_by_spec_id` runs
    by_spec_id: Option<HashMap<ObjectSpecId, String>>,
}

impl CacheInner {
    fn unindex(&mut self, spec: &ObjectSpecification) {
        let (Some(index), Some(id)) = (self.by_spec_id.as_mut(), spec.spec_id()) else {
            return;
        };
        if index.get(id).is_some_and(|class| class == spec.class_name()) {
            index.remove(id);
        }
    }
}

/// Specifications keyed by class name and, once initialized, by `ObjectSpecId`.
///
/// The spec id index maps to class names, so the class-name map stays the
/// single owner of every specification and the two indices cannot disagree
/// about which specification a class has.
#[derive(Debug, Default)]
pub struct SpecificationCache {
    inner: RwLock<CacheInner>,
}

impl SpecificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, class_name: &str) -> Option<Arc<ObjectSpecification>> {
        self.inner.read().by_class.get(class_name).cloned()
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.inner.read().by_class.contains_key(class_name)
    }

    /// Store `spec` under its class name, and under its spec id when the index is live
    pub fn cache(&self, spec: Arc<ObjectSpecification>) {
        let mut inner = self.inner.write();
        let class_name = spec.class_name().to_string();
        if let Some(previous) = inner.by_class.get(&class_name).cloned() {
            inner.unindex(&previous);
        }
        if let (Some(index), Some(id)) = (inner.by_spec_id.as_mut(), spec.spec_id()) {
            index.insert(id.clone(), class_name.clone());
        }
        inner.by_class.insert(class_name, spec);
    }

    /// Return the cached spec for `class_name`, or insert the one built by `create`.
    ///
    /// The check and the insert happen under one write lock. The boolean is
    /// `true` when `create` ran.
    pub fn get_or_insert_with(
        &self,
        class_name: &str,
        create: impl FnOnce() -> ObjectSpecification,
    ) -> (Arc<ObjectSpecification>, bool) {
        let mut inner = self.inner.write();
        if let Some(existing) = inner.by_class.get(class_name) {
            return (Arc::clone(existing), false);
        }
        let spec = Arc::new(create());
        inner
            .by_class
            .insert(class_name.to_string(), Arc::clone(&spec));
        (spec, true)
    }

    /// Drop `class_name` from both indices
    pub fn remove(&self, class_name: &str) -> Option<Arc<ObjectSpecification>> {
        let mut inner = self.inner.write();
        let removed = inner.by_class.remove(class_name)?;
        inner.unindex(&removed);
        debug!("Removed specification for {class_name}");
        Some(removed)
    }

    /// Snapshot of every cached specification, ordered by class name
    pub fn all_specifications(&self) -> Vec<Arc<ObjectSpecification>> {
        let inner = self.inner.read();
        let mut all: Vec<_> = inner.by_class.values().cloned().collect();
        all.sort_by(|a, b| a.class_name().cmp(b.class_name()));
        all
    }

    /// Look up by spec id; an error until [`Self::set_cache_by_spec_id`] has run
    pub fn get_by_object_type(&self, id: &ObjectSpecId) -> Result<Option<Arc<ObjectSpecification>>> {
        let inner = self.inner.read();
        let index = inner.by_spec_id.as_ref().ok_or(Error::CacheNotInitialized)?;
        Ok(index
            .get(id)
            .and_then(|class_name| inner.by_class.get(class_name))
            .cloned())
    }

    /// Build the spec id index from every cached specification. Runs exactly once.
    pub fn set_cache_by_spec_id(&self) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.by_spec_id.is_some() {
            return Err(Error::CacheAlreadyInitialized);
        }
        let mut index = HashMap::with_capacity(inner.by_class.len());
        let mut class_names: Vec<&String> = inner.by_class.keys().collect();
        class_names.sort();
        for class_name in class_names {
            let spec = &inner.by_class[class_name];
            if let Some(id) = spec.spec_id() {
                // first by class name wins; duplicates are reported by validation
                index
                    .entry(id.clone())
                    .or_insert_with(|| class_name.clone());
            }
        }
        debug!("Initialized spec id index with {} entries", index.len());
        inner.by_spec_id = Some(index);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.read().by_spec_id.is_some()
    }

    /// Re-store a rebuilt specification, keeping both indices consistent
    pub fn recache(&self, spec: Arc<ObjectSpecification>) -> Recache {
        let outcome = {
            let inner = self.inner.read();
            match (inner.by_spec_id.is_some(), spec.spec_id().is_some()) {
                (false, _) => Recache::NotInitialized,
                (true, false) => Recache::MissingSpecId,
                (true, true) => Recache::Indexed,
            }
        };
        if outcome == Recache::NotInitialized {
            warn!(
                "Recaching {} before the spec id index is initialized",
                spec.class_name()
            );
        }
        self.cache(spec);
        outcome
    }

    /// Detached copy holding every fully introspected specification.
    ///
    /// Entries still being built are left out so the copy never hands out a
    /// placeholder nobody will finish. The spec id index is copied only if
    /// it is live.
    pub fn snapshot(&self) -> SpecificationCache {
        let inner = self.inner.read();
        let by_class: HashMap<String, Arc<ObjectSpecification>> = inner
            .by_class
            .iter()
            .filter(|(_, spec)| spec.state() == IntrospectionState::FullyIntrospected)
            .map(|(class_name, spec)| (class_name.clone(), Arc::clone(spec)))
            .collect();
        let by_spec_id = inner.by_spec_id.as_ref().map(|index| {
            index
                .iter()
                .filter(|(_, class_name)| by_class.contains_key(*class_name))
                .map(|(id, class_name)| (id.clone(), class_name.clone()))
                .collect()
        });
        SpecificationCache {
            inner: RwLock::new(CacheInner {
                by_class,
                by_spec_id,
            }),
        }
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.by_class.clear();
        if let Some(index) = inner.by_spec_id.as_mut() {
            index.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().by_class.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().by_class.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::FacetData;
    use crate::types::ClassDescriptor;

    fn spec(class_name: &str, id: Option<&str>) -> Arc<ObjectSpecification> {
        let mut spec = ObjectSpecification::placeholder(&ClassDescriptor::new(class_name));
        if let Some(id) = id {
            spec.facets_mut()
                .add(FacetData::ObjectSpecId(ObjectSpecId::new(id)));
        }
        Arc::new(spec)
    }

    #[test]
    fn test_lookup_by_object_type_requires_initialization() {
        let cache = SpecificationCache::new();
        cache.cache(spec("com.acme.Customer", Some("crm.Customer")));

        let id = ObjectSpecId::new("crm.Customer");
        assert!(matches!(
            cache.get_by_object_type(&id),
            Err(Error::CacheNotInitialized)
        ));

        cache.set_cache_by_spec_id().unwrap();
        let found = cache.get_by_object_type(&id).unwrap().unwrap();
        assert_eq!(found.class_name(), "com.acme.Customer");
        assert!(matches!(
            cache.set_cache_by_spec_id(),
            Err(Error::CacheAlreadyInitialized)
        ));
    }

    #[test]
    fn test_remove_keeps_indices_consistent() {
        let cache = SpecificationCache::new();
        cache.cache(spec("com.acme.Customer", Some("crm.Customer")));
        cache.cache(spec("com.acme.Anon$1", None));
        cache.set_cache_by_spec_id().unwrap();

        assert!(cache.remove("com.acme.Customer").is_some());
        assert!(cache.remove("com.acme.Anon$1").is_some());
        assert!(cache.remove("com.acme.Missing").is_none());
        assert!(cache.get("com.acme.Customer").is_none());
        assert!(cache
            .get_by_object_type(&ObjectSpecId::new("crm.Customer"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_recache_outcomes() {
        let cache = SpecificationCache::new();
        assert_eq!(
            cache.recache(spec("com.acme.Customer", Some("crm.Customer"))),
            Recache::NotInitialized
        );
        assert!(cache.get("com.acme.Customer").is_some());

        cache.set_cache_by_spec_id().unwrap();
        assert_eq!(
            cache.recache(spec("com.acme.Customer", Some("crm.Client"))),
            Recache::Indexed
        );
        assert_eq!(
            cache.recache(spec("com.acme.Anon$1", None)),
            Recache::MissingSpecId
        );

        // the old id no longer resolves after the rename
        assert!(cache
            .get_by_object_type(&ObjectSpecId::new("crm.Customer"))
            .unwrap()
            .is_none());
        assert!(cache
            .get_by_object_type(&ObjectSpecId::new("crm.Client"))
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_get_or_insert_with_is_check_then_insert() {
        let cache = SpecificationCache::new();
        let (first, created) = cache.get_or_insert_with("com.acme.Customer", || {
            ObjectSpecification::placeholder(&ClassDescriptor::new("com.acme.Customer"))
        });
        assert!(created);

        let (second, created) = cache.get_or_insert_with("com.acme.Customer", || {
            panic!("must not rebuild a cached specification")
        });
        assert!(!created);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_clear_resets_entries_but_keeps_initialization() {
        let cache = SpecificationCache::new();
        cache.cache(spec("com.acme.Customer", Some("crm.Customer")));
        cache.set_cache_by_spec_id().unwrap();
        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.is_initialized());
        assert_eq!(cache.all_specifications().len(), 0);
    }

    #[test]
    fn test_snapshot_is_detached_and_skips_unfinished_entries() {
        let cache = SpecificationCache::new();
        let mut customer =
            ObjectSpecification::placeholder(&ClassDescriptor::new("com.acme.Customer"));
        customer
            .facets_mut()
            .add(FacetData::ObjectSpecId(ObjectSpecId::new("crm.Customer")));
        customer.set_state(IntrospectionState::FullyIntrospected);
        cache.cache(Arc::new(customer));
        cache.cache(spec("com.acme.Order", Some("crm.Order")));
        cache.set_cache_by_spec_id().unwrap();

        let copy = cache.snapshot();
        assert!(copy.is_initialized());
        assert!(copy.contains("com.acme.Customer"));
        assert!(!copy.contains("com.acme.Order"));
        assert!(copy
            .get_by_object_type(&ObjectSpecId::new("crm.Order"))
            .unwrap()
            .is_none());

        copy.remove("com.acme.Customer");
        assert!(cache.contains("com.acme.Customer"));
        assert!(cache
            .get_by_object_type(&ObjectSpecId::new("crm.Customer"))
            .unwrap()
            .is_some());
    }
}
