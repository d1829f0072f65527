//! Post-load validation across every loaded specification

mod deferred;
mod duplicates;
mod object_types;
mod orphans;

pub use deferred::DeferredFailuresValidator;
pub use duplicates::DuplicateMembersValidator;
pub use object_types::UniqueObjectTypesValidator;
pub use orphans::OrphanedMethodsValidator;

use crate::config::MetaModelConfig;
use crate::spec::ObjectSpecification;
use crate::types::Identifier;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// One structural problem found in the metamodel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub identifier: Identifier,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(identifier: Identifier, message: impl Into<String>) -> Self {
        Self {
            identifier,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.identifier, self.message)
    }
}

/// Collected validation failures, in the order they were reported
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationFailures {
    failures: Vec<ValidationFailure>,
}

impl ValidationFailures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    pub fn add_for(&mut self, identifier: Identifier, message: impl Into<String>) {
        self.add(ValidationFailure::new(identifier, message));
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.failures.iter()
    }

    pub fn messages(&self) -> Vec<String> {
        self.failures.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

/// What a validator can see: every loaded specification plus configuration
pub struct ValidationContext<'a> {
    pub specifications: &'a [Arc<ObjectSpecification>],
    pub config: &'a MetaModelConfig,
}

/// A read-only consistency check over the loaded metamodel
pub trait MetaModelValidator: Send + Sync {
    fn name(&self) -> &'static str;

    fn validate(&self, context: &ValidationContext<'_>, failures: &mut ValidationFailures);
}

/// Runs its validators in order; a failing validator never stops the others
#[derive(Default)]
pub struct MetaModelValidatorComposite {
    validators: Vec<Box<dyn MetaModelValidator>>,
}

impl MetaModelValidatorComposite {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard set of validators
    pub fn standard() -> Self {
        Self::new()
            .with(DeferredFailuresValidator)
            .with(DuplicateMembersValidator)
            .with(OrphanedMethodsValidator)
            .with(UniqueObjectTypesValidator)
    }

    pub fn with(mut self, validator: impl MetaModelValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    pub fn validate(&self, context: &ValidationContext<'_>) -> ValidationFailures {
        let mut failures = ValidationFailures::new();
        for validator in &self.validators {
            let before = failures.len();
            validator.validate(context, &mut failures);
            debug!(
                "Validator '{}' reported {} failure(s)",
                validator.name(),
                failures.len() - before
            );
        }
        failures
    }
}

impl fmt::Debug for MetaModelValidatorComposite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaModelValidatorComposite")
            .field("validators", &self.names())
            .finish()
    }
}
