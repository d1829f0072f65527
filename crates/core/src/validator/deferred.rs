use super::{MetaModelValidator, ValidationContext, ValidationFailures};

/// Surfaces the failures facet factories recorded while specifications were built
pub struct DeferredFailuresValidator;

impl MetaModelValidator for DeferredFailuresValidator {
    fn name(&self) -> &'static str {
        "deferred-failures"
    }

    fn validate(&self, context: &ValidationContext<'_>, failures: &mut ValidationFailures) {
        for spec in context.specifications {
            for failure in spec.deferred_failures() {
                failures.add(failure.clone());
            }
        }
    }
}
