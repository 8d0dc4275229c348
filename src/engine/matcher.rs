//! Matcher resolution: glob expansion and destination fan-out.
use anyhow::{Context as _, Result};
use std::path::Path;

use super::{Action, Context, TargetOutcome, TargetReport};
use crate::config::{InstallMode, Matcher};

/// Expand `matcher` under `source_root` and apply `action` to every
/// source file x destination folder pair, in source-major order.
///
/// A primitive error becomes [`TargetOutcome::Failed`] for that target only
/// and the remaining targets still run.
///
/// # Errors
///
/// Returns an error if the pattern cannot be expanded; no target is touched.
pub fn resolve_and_apply(
    ctx: &Context,
    source_root: &Path,
    matcher: &Matcher,
    action: Action,
    overwrite: bool,
) -> Result<Vec<TargetReport>> {
    ctx.log.debug(&format!(
        "processing matcher {} in {} mode",
        matcher.pattern,
        mode_name(matcher.mode)
    ));

    let sources = ctx
        .fs_ops
        .glob(source_root, &matcher.pattern)
        .with_context(|| format!("expanding pattern {}", matcher.pattern))?;

    let mut reports = Vec::with_capacity(sources.len() * matcher.folders.len());
    for source in &sources {
        let Some(name) = source.file_name() else {
            continue;
        };
        for folder in &matcher.folders {
            let destination = folder.join(name);
            let outcome = apply_target(
                ctx,
                source,
                folder,
                &destination,
                matcher.mode,
                action,
                overwrite,
            );
            reports.push(TargetReport {
                source: source.clone(),
                destination,
                outcome,
            });
        }
    }
    Ok(reports)
}

fn apply_target(
    ctx: &Context,
    source: &Path,
    folder: &Path,
    destination: &Path,
    mode: InstallMode,
    action: Action,
    overwrite: bool,
) -> TargetOutcome {
    if !ctx.fs_ops.exists(folder) {
        match action {
            Action::Install => ctx.log.warn(&format!(
                "install folder {} not found, the program using {} is likely not installed; skipping",
                folder.display(),
                display_name(source)
            )),
            Action::Uninstall => ctx
                .log
                .debug(&format!("folder {} not found, nothing to remove", folder.display())),
        }
        return TargetOutcome::SkippedFolderMissing;
    }

    let replacing = action == Action::Install && overwrite && ctx.fs_ops.exists(destination);
    let result = match (action, mode) {
        (Action::Install, InstallMode::Copy) => {
            ctx.fs_ops.copy_file(source, destination, overwrite)
        }
        (Action::Install, InstallMode::Symlink) => {
            ctx.fs_ops.create_symlink(source, destination, overwrite)
        }
        (Action::Uninstall, InstallMode::Copy) => ctx.fs_ops.remove_file(destination),
        (Action::Uninstall, InstallMode::Symlink) => {
            ctx.fs_ops.remove_symlink(destination, source)
        }
    };

    match result {
        Ok(true) => {
            ctx.log.info(&describe(action, mode, source, destination, replacing));
            match action {
                Action::Install if replacing => TargetOutcome::Overridden,
                Action::Install => TargetOutcome::Created,
                Action::Uninstall => TargetOutcome::Removed,
            }
        }
        Ok(false) => {
            ctx.log
                .debug(&format!("ok: {} (unchanged)", destination.display()));
            match action {
                Action::Install => TargetOutcome::SkippedExists,
                Action::Uninstall => TargetOutcome::SkippedAbsent,
            }
        }
        Err(e) => {
            let reason = format!("{e:#}");
            ctx.log.error(&format!(
                "failed to {} {}: {reason}",
                verb(action, mode),
                destination.display()
            ));
            TargetOutcome::Failed { reason }
        }
    }
}

fn describe(
    action: Action,
    mode: InstallMode,
    source: &Path,
    destination: &Path,
    replaced: bool,
) -> String {
    let prefix = if replaced { "replaced with " } else { "" };
    match (action, mode) {
        (Action::Install, InstallMode::Copy) => format!(
            "{prefix}copy: {} >> {}",
            source.display(),
            destination.display()
        ),
        (Action::Install, InstallMode::Symlink) => format!(
            "{prefix}symlink: {} -> {}",
            destination.display(),
            source.display()
        ),
        (Action::Uninstall, InstallMode::Copy) => {
            format!("removed file: {}", destination.display())
        }
        (Action::Uninstall, InstallMode::Symlink) => {
            format!("removed symlink: {}", destination.display())
        }
    }
}

const fn verb(action: Action, mode: InstallMode) -> &'static str {
    match (action, mode) {
        (Action::Install, InstallMode::Copy) => "copy to",
        (Action::Install, InstallMode::Symlink) => "link",
        (Action::Uninstall, InstallMode::Copy) => "remove file",
        (Action::Uninstall, InstallMode::Symlink) => "remove symlink",
    }
}

const fn mode_name(mode: InstallMode) -> &'static str {
    match mode {
        InstallMode::Symlink => "symlink",
        InstallMode::Copy => "copy",
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
