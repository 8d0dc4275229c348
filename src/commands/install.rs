//! Install command implementation.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::{GlobalOpts, InstallOpts};
use crate::engine::Action;
use crate::logging::Logger;

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the registry fails to load or an override install
/// lacks elevated privileges.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("grocery {}", super::version::version()));
    let ctx = super::load_context(global, log)?;
    if opts.force {
        log.info("override mode: existing destinations will be replaced");
    }
    super::run_collections(&ctx, Action::Install, opts.force)?;
    log.print_summary();
    Ok(())
}
