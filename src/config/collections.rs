//! Collection registry types and their TOML schema.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::resources::glob;

/// How a matched grocery lands in its destination folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// Link the destination back to the grocery store.
    #[default]
    Symlink,
    /// Duplicate the file content.
    Copy,
}

/// A glob pattern fanned out to one or more destination folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    /// Glob evaluated relative to the collection root.
    pub pattern: String,
    /// Destination folders, already expanded. Never empty.
    pub folders: Vec<PathBuf>,
    /// Symlink or copy.
    pub mode: InstallMode,
}

/// A named group of groceries under one source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// Source path relative to the project root.
    pub source: String,
    /// Matchers in declared order.
    pub matchers: Vec<Matcher>,
}

impl Collection {
    /// Absolute source root of this collection under `root`.
    #[must_use]
    pub fn path(&self, root: &Path) -> PathBuf {
        root.join(&self.source)
    }
}

/// Raw registry document as written in `grocery.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryDocument {
    #[serde(default)]
    ignore: Vec<String>,
    #[serde(default, rename = "collection")]
    collections: Vec<CollectionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CollectionEntry {
    source: String,
    #[serde(default, rename = "matcher")]
    matchers: Vec<MatcherEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatcherEntry {
    pattern: String,
    folder: FolderEntry,
    #[serde(default)]
    mode: InstallMode,
}

/// `folder = "~"` or `folder = ["a", "b"]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FolderEntry {
    One(String),
    Many(Vec<String>),
}

impl FolderEntry {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(folder) => vec![folder],
            Self::Many(folders) => folders,
        }
    }
}

impl RegistryDocument {
    /// Validate every pattern and expand every folder with `resolve_folder`.
    ///
    /// Returns the collections in declared order and the ignore patterns.
    ///
    /// # Errors
    ///
    /// Returns an error for an absolute or syntactically invalid pattern.
    pub fn into_parts<F>(
        self,
        mut resolve_folder: F,
    ) -> Result<(Vec<Collection>, Vec<String>), ConfigError>
    where
        F: FnMut(&str) -> PathBuf,
    {
        glob::compile_set(&self.ignore)?;

        let mut collections = Vec::with_capacity(self.collections.len());
        for entry in self.collections {
            let mut matchers = Vec::with_capacity(entry.matchers.len());
            for raw in entry.matchers {
                if raw.pattern.starts_with('/') || Path::new(&raw.pattern).is_absolute() {
                    return Err(ConfigError::AbsolutePattern {
                        pattern: raw.pattern,
                    });
                }
                glob::compile(&raw.pattern)?;
                matchers.push(Matcher {
                    pattern: raw.pattern,
                    folders: raw
                        .folder
                        .into_vec()
                        .iter()
                        .map(|folder| resolve_folder(folder))
                        .collect(),
                    mode: raw.mode,
                });
            }
            collections.push(Collection {
                source: entry.source,
                matchers,
            });
        }
        Ok((collections, self.ignore))
    }
}
