//! Specification cache: class-name and spec-id indices over built specifications

pub mod specification_cache;

pub use specification_cache::{Recache, SpecificationCache};
