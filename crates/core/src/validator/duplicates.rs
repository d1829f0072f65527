use std::collections::BTreeMap;

use super::{MetaModelValidator, ValidationContext, ValidationFailures};

/// Two members of one type sharing an id, e.g. `getActive()` and `isActive()`
pub struct DuplicateMembersValidator;

impl MetaModelValidator for DuplicateMembersValidator {
    fn name(&self) -> &'static str {
        "duplicate-members"
    }

    fn validate(&self, context: &ValidationContext<'_>, failures: &mut ValidationFailures) {
        for spec in context.specifications {
            let mut seen: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
            for member in spec.members() {
                seen.entry(member.id.as_str())
                    .or_default()
                    .push(member.method.as_str());
            }
            for (id, methods) in seen.into_iter().filter(|(_, m)| m.len() > 1) {
                failures.add_for(
                    spec.identifier().clone(),
                    format!("duplicate member '{id}' from methods {}", methods.join(", ")),
                );
            }
        }
    }
}
