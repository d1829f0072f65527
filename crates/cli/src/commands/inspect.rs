use anyhow::{Result, anyhow};
use std::path::Path;
use tracing::debug;

use super::build_loader;
use crate::display::formatter::format_specification;

pub fn inspect_command(
    model: &Path,
    class: Option<&str>,
    json: bool,
    config: Option<&Path>,
) -> Result<()> {
    debug!("Inspecting model: {}", model.display());
    let loader = build_loader(model, config)?;
    let failures = loader.init()?;

    let specifications = match class {
        Some(name) => {
            let spec = loader
                .lookup_by_class(name)
                .ok_or_else(|| anyhow!("No specification for class {name}"))?;
            vec![spec]
        }
        None => loader.all_specifications(),
    };

    if json {
        let specs: Vec<_> = specifications.iter().map(|s| s.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&specs)?);
        return Ok(());
    }

    println!("🔍 Inspecting: {}", model.display());
    println!("{}", "=".repeat(80));
    // builtin and referenced library types are cached too; only show the model's own
    let repository = loader.repository();
    let domain = repository.domain_classes();
    for spec in &specifications {
        if class.is_none() && !domain.iter().any(|c| c == spec.class_name()) {
            continue;
        }
        println!("{}", format_specification(spec));
    }
    if !failures.is_empty() {
        println!(
            "⚠️  {} validation failure(s); run `metamodel validate` for details",
            failures.len()
        );
    }
    Ok(())
}
