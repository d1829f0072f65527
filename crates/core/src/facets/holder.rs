use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::trace;

use super::{Facet, FacetData, FacetKind};
use crate::types::Identifier;

/// Registry of the facets attached to one introspected element.
///
/// Holds at most one facet per [`FacetKind`]. Adding a facet of a kind already
/// present replaces it; factories that must not override an explicit facet use
/// the `*_if_absent` variants.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetHolder {
    identifier: Identifier,
    facets: BTreeMap<FacetKind, Facet>,
}

impl FacetHolder {
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            facets: BTreeMap::new(),
        }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Attach a facet, returning the one it replaced
    pub fn add(&mut self, data: FacetData) -> Option<Facet> {
        self.insert(Facet::new(self.identifier.clone(), data))
    }

    pub fn add_derived(&mut self, data: FacetData) -> Option<Facet> {
        self.insert(Facet::derived(self.identifier.clone(), data))
    }

    /// Attach only if no facet of the same kind exists; returns whether it was added
    pub fn add_if_absent(&mut self, data: FacetData) -> bool {
        if self.contains(data.kind()) {
            return false;
        }
        self.add(data);
        true
    }

    pub fn add_derived_if_absent(&mut self, data: FacetData) -> bool {
        if self.contains(data.kind()) {
            return false;
        }
        self.add_derived(data);
        true
    }

    fn insert(&mut self, facet: Facet) -> Option<Facet> {
        trace!("{}: attaching {}", self.identifier, facet);
        self.facets.insert(facet.kind(), facet)
    }

    pub fn get(&self, kind: FacetKind) -> Option<&Facet> {
        self.facets.get(&kind)
    }

    pub fn data(&self, kind: FacetKind) -> Option<&FacetData> {
        self.get(kind).map(Facet::data)
    }

    pub fn contains(&self, kind: FacetKind) -> bool {
        self.facets.contains_key(&kind)
    }

    pub fn remove(&mut self, kind: FacetKind) -> Option<Facet> {
        self.facets.remove(&kind)
    }

    /// Facets in kind order
    pub fn facets(&self) -> impl Iterator<Item = &Facet> {
        self.facets.values()
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

/// Serialized as the list of its facets
impl Serialize for FacetHolder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.facets.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder() -> FacetHolder {
        FacetHolder::new(Identifier::member("com.acme.Customer", "name"))
    }

    #[test]
    fn test_one_facet_per_kind_last_wins() {
        let mut holder = holder();
        assert!(holder.add(FacetData::MaxLength(10)).is_none());
        let replaced = holder.add(FacetData::MaxLength(30)).unwrap();

        assert_eq!(replaced.data(), &FacetData::MaxLength(10));
        assert_eq!(holder.len(), 1);
        assert_eq!(holder.data(FacetKind::MaxLength), Some(&FacetData::MaxLength(30)));
    }

    #[test]
    fn test_add_if_absent_keeps_explicit_facet() {
        let mut holder = holder();
        holder.add(FacetData::Mandatory(false));

        assert!(!holder.add_derived_if_absent(FacetData::Mandatory(true)));
        let facet = holder.get(FacetKind::Mandatory).unwrap();
        assert!(!facet.is_derived());
        assert_eq!(facet.data(), &FacetData::Mandatory(false));
    }

    #[test]
    fn test_facets_reference_their_holder() {
        let mut holder = holder();
        holder.add_derived(FacetData::Mandatory(true));
        let facet = holder.get(FacetKind::Mandatory).unwrap();
        assert_eq!(facet.holder(), holder.identifier());
        assert!(facet.is_derived());
    }

    #[test]
    fn test_remove() {
        let mut holder = holder();
        holder.add(FacetData::Immutable);
        assert!(holder.remove(FacetKind::Immutable).is_some());
        assert!(holder.remove(FacetKind::Immutable).is_none());
        assert!(holder.is_empty());
    }
}
