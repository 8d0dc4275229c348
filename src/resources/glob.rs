//! Glob expansion relative to a collection root.
//!
//! Patterns are matched against paths relative to the root with
//! [`globset`]: `*` never crosses a `/`, and brace alternation
//! (`{settings,keybindings}.json`) is supported. Matching is case-sensitive
//! and dotfiles are included. Only files are yielded; results
//! are absolute (when the root is) and sorted.
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::ConfigError;

/// Compile a single pattern.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPattern`] if `pattern` is not a valid glob.
pub fn compile(pattern: &str) -> Result<GlobMatcher, ConfigError> {
    build(pattern).map(|glob| glob.compile_matcher())
}

/// Compile a list of patterns into one set (used for exclusions).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPattern`] for the first invalid pattern.
pub fn compile_set(patterns: &[String]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(build(pattern)?);
    }
    builder
        .build()
        .map_err(|source| ConfigError::InvalidPattern {
            pattern: patterns.join(", "),
            source,
        })
}

fn build(pattern: &str) -> Result<Glob, ConfigError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .case_insensitive(false)
        .build()
        .map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Expand `pattern` under `root`.
///
/// A missing root or a pattern matching nothing yields an empty list.
///
/// # Errors
///
/// Returns an error only if `pattern` cannot be compiled.
pub fn expand(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let matcher = compile(pattern)?;
    Ok(walk_files(root, &GlobSet::empty(), &matcher))
}

/// Expand `pattern` under `root`, skipping everything matched by `ignore`.
///
/// An ignored directory prunes its whole subtree.
///
/// # Errors
///
/// Returns an error only if `pattern` cannot be compiled.
pub fn search(root: &Path, pattern: &str, ignore: &GlobSet) -> Result<Vec<PathBuf>, ConfigError> {
    let matcher = compile(pattern)?;
    Ok(walk_files(root, ignore, &matcher))
}

/// Every file under `root`, as paths relative to it.
#[must_use]
pub fn list_relative(root: &Path) -> Vec<PathBuf> {
    walk(root, &GlobSet::empty())
        .filter_map(|entry| relative(root, &entry).map(Path::to_path_buf))
        .collect()
}

fn walk_files(root: &Path, ignore: &GlobSet, matcher: &GlobMatcher) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walk(root, ignore)
        .filter(|entry| relative(root, entry).is_some_and(|rel| matcher.is_match(rel)))
        .map(DirEntry::into_path)
        .collect();
    files.sort();
    files
}

fn walk<'a>(root: &'a Path, ignore: &'a GlobSet) -> impl Iterator<Item = DirEntry> + 'a {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| relative(root, entry).is_none_or(|rel| !ignore.is_match(rel)))
        .filter_map(Result::ok)
        .filter(is_file_like)
}

fn relative<'e>(root: &Path, entry: &'e DirEntry) -> Option<&'e Path> {
    entry.path().strip_prefix(root).ok()
}

/// Regular files, and symlinks that resolve to one.
fn is_file_like(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}
