//! Collection registry loading.
//!
//! The registry is a single TOML document. A built-in copy is compiled into
//! the binary; a `grocery.toml` at the project root replaces it.
pub mod collections;
pub mod folders;
pub mod toml_loader;

use anyhow::{Context, Result};
use globset::GlobSet;
use std::path::{Path, PathBuf};

pub use collections::{Collection, InstallMode, Matcher};
use collections::RegistryDocument;

use crate::error::ConfigError;
use crate::resources::glob;

/// Directory under the project root holding every collection.
pub const GROCERY_STORE_DIR: &str = "grocery-store";

/// Registry file name looked up at the project root.
pub const REGISTRY_FILE: &str = "grocery.toml";

const BUILT_IN_REGISTRY: &str = include_str!("grocery.toml");

/// The loaded registry for one project root.
#[derive(Debug)]
pub struct Config {
    /// Project root every collection source is relative to.
    pub root: PathBuf,
    /// Collections in declared (priority) order.
    pub collections: Vec<Collection>,
    /// Exclusion patterns applied by lookups.
    pub ignore: GlobSet,
}

impl Config {
    /// Load the registry for `root`, preferring `<root>/grocery.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read, does not match the
    /// schema, or contains an invalid pattern.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(REGISTRY_FILE);
        let document = match toml_loader::load_optional::<RegistryDocument>(&path)
            .with_context(|| format!("loading {}", path.display()))?
        {
            Some(document) => document,
            None => toml_loader::parse(BUILT_IN_REGISTRY, "built-in")
                .context("loading built-in registry")?,
        };
        Ok(Self::from_document(root, document, folders::resolve)?)
    }

    /// Build a config from a parsed document with an injected folder resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is invalid.
    pub fn from_document<F>(
        root: &Path,
        document: RegistryDocument,
        resolve_folder: F,
    ) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> PathBuf,
    {
        let (collections, ignore) = document.into_parts(resolve_folder)?;
        Ok(Self {
            root: root.to_path_buf(),
            collections,
            ignore: glob::compile_set(&ignore)?,
        })
    }

    /// Whether `root` looks like a project root.
    #[must_use]
    pub fn is_project_root(root: &Path) -> bool {
        root.join(GROCERY_STORE_DIR).is_dir() || root.join(REGISTRY_FILE).is_file()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn built_in_registry_parses() {
        let document: RegistryDocument = toml_loader::parse(BUILT_IN_REGISTRY, "built-in").unwrap();
        let config =
            Config::from_document(Path::new("/repo"), document, |f| PathBuf::from(f)).unwrap();
        let sources: Vec<&str> = config
            .collections
            .iter()
            .map(|c| c.source.as_str())
            .collect();
        assert_eq!(
            sources,
            vec![
                "grocery-store/personal/preferences",
                "grocery-store/personal/template",
                "grocery-store/work/preferences",
            ]
        );
        assert!(config.collections[1].matchers.is_empty());
        assert!(config.ignore.is_match("linter/outdated"));
        assert!(config.ignore.is_match("project/vue/node_modules"));
    }

    #[test]
    fn built_in_vscode_matcher_fans_out_to_two_editors() {
        let document: RegistryDocument = toml_loader::parse(BUILT_IN_REGISTRY, "built-in").unwrap();
        let config =
            Config::from_document(Path::new("/repo"), document, |f| PathBuf::from(f)).unwrap();
        let vscode = config.collections[0]
            .matchers
            .iter()
            .find(|m| m.pattern == "editor/vscode/{settings,keybindings}.json")
            .expect("vscode matcher");
        assert_eq!(vscode.folders.len(), 2);
    }

    #[test]
    fn root_file_replaces_built_in_registry() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(REGISTRY_FILE),
            r#"
[[collection]]
source = "mine"
"#,
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.collections.len(), 1);
        assert_eq!(config.collections[0].source, "mine");
    }

    #[test]
    fn broken_root_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(REGISTRY_FILE), "[[collection]\n").unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains(REGISTRY_FILE), "got: {err:#}");
    }

    #[test]
    fn project_root_detection() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!Config::is_project_root(dir.path()));
        std::fs::create_dir(dir.path().join(GROCERY_STORE_DIR)).unwrap();
        assert!(Config::is_project_root(dir.path()));
    }
}
