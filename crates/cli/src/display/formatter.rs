use std::fmt::Write;

use facet_metamodel_core::{FacetHolder, ObjectMember, ObjectSpecification, ValidationFailures};

pub fn format_specification(spec: &ObjectSpecification) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n📦 {spec}");
    let _ = writeln!(out, "   🏷️  Name: {} / {}", spec.singular_name(), spec.plural_name());
    write_facets(&mut out, spec.facets(), "   ");

    for (label, members) in [
        ("Properties", spec.properties()),
        ("Collections", spec.collections()),
        ("Actions", spec.actions()),
    ] {
        if members.is_empty() {
            continue;
        }
        let _ = writeln!(out, "   {label}:");
        for member in members {
            out.push_str(&format_member(member));
        }
    }
    if !spec.orphaned_methods().is_empty() {
        let _ = writeln!(
            out,
            "   ⚠️  Unmatched supporting methods: {}",
            spec.orphaned_methods().join(", ")
        );
    }
    out
}

pub fn format_member(member: &ObjectMember) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "   • {} ({}: {}) via {}()",
        member.name(),
        member.feature_type,
        member.type_ref,
        member.method
    );
    write_facets(&mut out, &member.facets, "       ");
    for parameter in &member.parameters {
        let name = parameter.name.as_deref().unwrap_or("");
        let _ = writeln!(
            out,
            "       [{}] {} {}",
            parameter.index, parameter.type_ref, name
        );
        write_facets(&mut out, &parameter.facets, "           ");
    }
    out
}

pub fn format_failures(failures: &ValidationFailures) -> String {
    if failures.is_empty() {
        return "✅ No validation failures".to_string();
    }
    let mut out = format!("❌ {} validation failure(s):", failures.len());
    for failure in failures.iter() {
        let _ = write!(out, "\n   {failure}");
    }
    out
}

fn write_facets(out: &mut String, facets: &FacetHolder, indent: &str) {
    for facet in facets.facets() {
        let _ = writeln!(out, "{indent}- {facet}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_metamodel_core::{Identifier, ValidationFailure};

    #[test]
    fn test_format_failures() {
        assert_eq!(
            format_failures(&ValidationFailures::new()),
            "✅ No validation failures"
        );

        let mut failures = ValidationFailures::new();
        failures.add(ValidationFailure::new(
            Identifier::class("com.acme.Report"),
            "@NotPersistable is deprecated",
        ));
        assert_eq!(
            format_failures(&failures),
            "❌ 1 validation failure(s):\n   com.acme.Report: @NotPersistable is deprecated"
        );
    }
}
