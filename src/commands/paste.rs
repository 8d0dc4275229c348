//! Paste command implementation.
use anyhow::{Context as _, Result};
use std::sync::Arc;

use crate::cli::{GlobalOpts, PasteOpts};
use crate::engine::paste;
use crate::logging::Logger;

/// Run the paste command against the current working directory.
///
/// # Errors
///
/// Returns an error if no source is given, the grocery cannot be found, or
/// the copy fails.
pub fn run(global: &GlobalOpts, opts: &PasteOpts, log: &Arc<Logger>) -> Result<()> {
    let ctx = super::load_context(global, log)?;
    let cwd = std::env::current_dir().context("reading current directory")?;
    paste::paste(&ctx, &cwd, opts.source(), opts.target(), opts.force)?;
    Ok(())
}
