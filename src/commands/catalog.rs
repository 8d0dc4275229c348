//! Catalog command implementation.
use anyhow::{Context as _, Result};

use crate::cli::{CatalogOpts, GlobalOpts};
use crate::engine::catalog;
use crate::logging::Logger;

/// Print the store catalog, or write it to `--output`.
///
/// # Errors
///
/// Returns an error if the root cannot be determined or the output file
/// cannot be written.
pub fn run(global: &GlobalOpts, opts: &CatalogOpts, log: &Logger) -> Result<()> {
    let root = super::resolve_root(global)?;
    let json = catalog::build(&root).to_json()?;

    match &opts.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing catalog to {}", path.display()))?;
            log.info(&format!("catalog written to {}", path.display()));
        }
        None => print!("{json}"),
    }
    Ok(())
}
