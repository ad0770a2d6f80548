use anyhow::{Context, Result};
use rt_model::ImportOptions;
use std::path::Path;

/// Import options stored next to a model as toml.
pub(crate) fn parse(path: &Path) -> Result<ImportOptions> {
    let data = std::fs::read(path)?;
    let options: ImportOptions = toml::from_slice(&data)
        .with_context(|| format!("Invalid import options: {}", path.display()))?;
    Ok(options)
}
