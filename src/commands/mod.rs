//! Top-level subcommand orchestration.
pub mod catalog;
pub mod install;
pub mod paste;
pub mod uninstall;
pub mod version;

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::engine::collection::{self, CollectionReport};
use crate::engine::{Action, Context};
use crate::logging::{Logger, TaskStatus};

/// Environment variable naming the grocery store root.
pub const ROOT_ENV: &str = "GROCERY_STORE_ROOT";

/// Resolve the root, load the registry and wire a production [`Context`].
///
/// # Errors
///
/// Returns an error if the root cannot be determined or the registry fails
/// to load.
pub fn load_context(global: &GlobalOpts, log: &Arc<Logger>) -> Result<Context> {
    let root = resolve_root(global)?;
    log.debug(&format!("root: {}", root.display()));

    let config = Config::load(&root)?;
    log.debug(&format!("{} collections", config.collections.len()));

    Ok(Context::new(config, log.clone()))
}

/// Process every collection with `action`, recording one summary entry each.
///
/// Target failures are recorded but do not fail the run.
///
/// # Errors
///
/// Returns an error when a collection precondition fails (override without
/// elevation); later collections are not processed.
pub fn run_collections(ctx: &Context, action: Action, overwrite: bool) -> Result<()> {
    for c in &ctx.config.collections {
        match collection::process(ctx, c, action, overwrite)? {
            CollectionReport::Missing => {
                ctx.log
                    .record_task(&c.source, TaskStatus::Skipped, Some("not present"));
            }
            CollectionReport::Processed(stats) if stats.failed > 0 => {
                ctx.log.record_task(
                    &c.source,
                    TaskStatus::Failed,
                    Some(&format!("{} failed", stats.failed)),
                );
            }
            CollectionReport::Processed(stats) => {
                ctx.log
                    .record_task(&c.source, TaskStatus::Ok, Some(&stats.summary()));
            }
        }
    }
    Ok(())
}

/// Resolve the grocery store root from CLI arguments or auto-detection.
///
/// # Errors
///
/// Returns an error if no candidate directory holds a grocery store.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    resolve_root_from(
        global.root.as_deref(),
        std::env::var_os(ROOT_ENV).map(PathBuf::from),
        std::env::current_exe().ok().as_deref(),
        &cwd,
    )
}

/// Root resolution order: explicit flag, environment, ancestors of the
/// binary, then the working directory.
///
/// The result is always absolute; a relative flag or environment value is
/// taken relative to `cwd`.
fn resolve_root_from(
    explicit: Option<&Path>,
    env: Option<PathBuf>,
    exe: Option<&Path>,
    cwd: &Path,
) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return absolute_root(cwd, root);
    }
    if let Some(root) = env.filter(|r| !r.as_os_str().is_empty()) {
        return absolute_root(cwd, &root);
    }

    if let Some(exe) = exe
        && let Some(found) = exe.ancestors().skip(1).find(|c| Config::is_project_root(c))
    {
        return Ok(dunce::canonicalize(found)?);
    }

    if Config::is_project_root(cwd) {
        return Ok(cwd.to_path_buf());
    }

    anyhow::bail!("cannot determine grocery store root. Use --root or set {ROOT_ENV}");
}

fn absolute_root(cwd: &Path, root: &Path) -> Result<PathBuf> {
    let joined = cwd.join(root);
    dunce::canonicalize(&joined)
        .with_context(|| format!("grocery store root not found: {}", joined.display()))
}
