//! facet-metamodel - Facet-based metamodel construction for domain models
//!
//! This crate provides functionality to:
//! - Describe domain classes as plain data (`ClassDescriptor`, `ClassRepository`)
//! - Run a pluggable programming model of facet factories over those classes
//! - Cache the resulting object specifications by class name and object type
//! - Validate the metamodel and reload it when the domain model changes
pub mod cache;
pub mod config;
pub mod error;
pub mod facets;
pub mod factories;
pub mod loader;
pub mod programming_model;
pub mod repository;
pub mod services;
pub mod spec;
pub mod substitutor;
pub mod types;
pub mod utils;
pub mod validator;
pub mod values;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use cache::{Recache, SpecificationCache};
pub use config::MetaModelConfig;
pub use facets::{Facet, FacetData, FacetHolder, FacetKind};
pub use factories::FacetFactory;
pub use loader::{ReloadSummary, SpecificationLoader, SpecificationLoaderBuilder};
pub use programming_model::{ProgrammingModel, ProgrammingModelBuilder};
pub use repository::{ClassRepository, DomainModel};
pub use services::{Grid, GridService, Services, TranslationService};
pub use spec::{IntrospectionState, ObjectMember, ObjectSpecId, ObjectSpecification};
pub use substitutor::ClassSubstitutor;
pub use validator::{
    MetaModelValidator, MetaModelValidatorComposite, ValidationFailure, ValidationFailures,
};
pub use values::{Value, ValueType};
