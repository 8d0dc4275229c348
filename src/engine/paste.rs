//! Copy dispatch: paste one grocery into a working directory.
use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{Context, lookup};
use crate::error::GroceryError;

const SOURCE_QUESTION: &str =
    "Please enter the source file (e.g. \".editorconfig\" or \"nodejs/.editorconfig\"):";

/// Result of a paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteReport {
    /// Grocery that was found.
    pub source: PathBuf,
    /// Final destination file path.
    pub destination: PathBuf,
    /// `false` when the destination existed and override was off.
    pub copied: bool,
}

/// Copy the grocery named `source` to `target`.
///
/// Without a source name the user is asked for one. Without a target the
/// grocery lands in `cwd`. An existing directory target receives the
/// grocery under its own name; any other target is the literal destination.
///
/// # Errors
///
/// Returns [`GroceryError::NoSourceProvided`] when no name is given even
/// after prompting, [`GroceryError::SourceNotFound`] when no collection holds
/// the grocery, or the underlying I/O error of the copy.
pub fn paste(
    ctx: &Context,
    cwd: &Path,
    source: Option<&str>,
    target: Option<&Path>,
    overwrite: bool,
) -> Result<PasteReport> {
    let name = match source.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => name.to_string(),
        None => ctx
            .prompt
            .text(SOURCE_QUESTION)?
            .ok_or(GroceryError::NoSourceProvided)?,
    };

    let found = lookup::find_across(ctx, &name)?
        .ok_or_else(|| GroceryError::SourceNotFound { name: name.clone() })?;

    let mut destination = target.map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
    if ctx.fs_ops.is_dir(&destination)
        && let Some(file_name) = found.file_name()
    {
        destination = destination.join(file_name);
    }

    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        ctx.fs_ops.ensure_dir(parent)?;
    }

    let copied = ctx.fs_ops.copy_file(&found, &destination, overwrite)?;
    if copied {
        let shown = found.strip_prefix(&ctx.config.root).unwrap_or(&found);
        ctx.log.info(&format!(
            "copied file: {} >> {}",
            shown.display(),
            destination.display()
        ));
    } else {
        ctx.log.warn(&format!(
            "{} already exists, use --force to replace it",
            destination.display()
        ));
    }

    Ok(PasteReport {
        source: found,
        destination,
        copied,
    })
}
