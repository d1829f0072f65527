use super::{MetaModelValidator, ValidationContext, ValidationFailures};

/// Supporting methods (`hideFoo`, `choices0Bar`, ...) that matched no member
pub struct OrphanedMethodsValidator;

impl MetaModelValidator for OrphanedMethodsValidator {
    fn name(&self) -> &'static str {
        "orphaned-supporting-methods"
    }

    fn validate(&self, context: &ValidationContext<'_>, failures: &mut ValidationFailures) {
        if !context.config.validate_orphaned_methods() {
            return;
        }
        for spec in context.specifications {
            for method in spec.orphaned_methods() {
                failures.add_for(
                    spec.identifier().clone(),
                    format!("{method}() looks like a supporting method but matches no member"),
                );
            }
        }
    }
}
