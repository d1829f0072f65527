use anyhow::{Result, bail};
use std::path::Path;
use tracing::debug;

use super::build_loader;
use crate::display::formatter::format_failures;

pub fn validate_command(model: &Path, config: Option<&Path>, strict: bool) -> Result<()> {
    debug!("Validating model: {}", model.display());
    let loader = build_loader(model, config)?;
    let failures = loader.init()?;

    println!("{}", format_failures(&failures));
    if strict && !failures.is_empty() {
        bail!("{} validation failure(s)", failures.len());
    }
    Ok(())
}
