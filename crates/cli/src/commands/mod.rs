pub mod inspect;
pub mod validate;
pub mod value;

pub use inspect::inspect_command;
pub use validate::validate_command;
pub use value::value_command;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use facet_metamodel_core::{ClassRepository, MetaModelConfig, SpecificationLoader};

/// Explicit config file, else the nearest one above the model file, else defaults
pub fn load_config(model: &Path, config: Option<&Path>) -> Result<MetaModelConfig> {
    if let Some(path) = config {
        return MetaModelConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    let start = model
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    match MetaModelConfig::find_config_file(start) {
        Some(path) => {
            debug!("Using config file {}", path.display());
            MetaModelConfig::load_from_file(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(MetaModelConfig::new()),
    }
}

/// Load the model file and build the metamodel for it
pub fn build_loader(model: &Path, config: Option<&Path>) -> Result<SpecificationLoader> {
    let config = load_config(model, config)?;
    for key in config.unknown_keys() {
        eprintln!("⚠️  Unknown configuration key: {key}");
    }
    let repository = ClassRepository::load_from_file(model)
        .with_context(|| format!("Failed to load domain model {}", model.display()))?;
    Ok(SpecificationLoader::new(repository, config))
}
