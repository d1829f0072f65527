//! Runtime type descriptors: the reflection input to metamodel construction

pub mod annotation;
pub mod class;
pub mod feature_type;
pub mod identifier;
pub mod method;
pub mod type_ref;

// Re-export commonly used types
pub use annotation::{Annotated, Annotation};
pub use class::{ClassDescriptor, ClassKind};
pub use feature_type::FeatureType;
pub use identifier::Identifier;
pub use method::{MethodDescriptor, ParameterDescriptor};
pub use type_ref::{TypeRef, simple_name_of};
