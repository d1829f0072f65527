use std::collections::BTreeMap;

use super::{MetaModelValidator, ValidationContext, ValidationFailures};
use crate::spec::ObjectSpecId;
use crate::types::Identifier;

/// Two types sharing one `ObjectSpecId`
pub struct UniqueObjectTypesValidator;

impl MetaModelValidator for UniqueObjectTypesValidator {
    fn name(&self) -> &'static str {
        "unique-object-types"
    }

    fn validate(&self, context: &ValidationContext<'_>, failures: &mut ValidationFailures) {
        if !context.config.validate_unique_object_types() {
            return;
        }
        let mut by_id: BTreeMap<&ObjectSpecId, Vec<&str>> = BTreeMap::new();
        for spec in context.specifications {
            if let Some(id) = spec.spec_id() {
                by_id.entry(id).or_default().push(spec.class_name());
            }
        }
        for (id, mut classes) in by_id.into_iter().filter(|(_, c)| c.len() > 1) {
            classes.sort_unstable();
            failures.add_for(
                Identifier::class(classes[0]),
                format!("object type '{id}' is shared by {}", classes.join(", ")),
            );
        }
    }
}
