//! Uninstall command implementation.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::{GlobalOpts, UninstallOpts};
use crate::engine::Action;
use crate::logging::Logger;

/// Run the uninstall command.
///
/// # Errors
///
/// Returns an error if the registry fails to load.
pub fn run(global: &GlobalOpts, _opts: &UninstallOpts, log: &Arc<Logger>) -> Result<()> {
    let ctx = super::load_context(global, log)?;
    super::run_collections(&ctx, Action::Uninstall, false)?;
    log.print_summary();
    Ok(())
}
