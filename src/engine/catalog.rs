//! Catalog of the grocery store as a nested JSON tree.
//!
//! Directories map to objects and files to `null`, keyed by name:
//!
//! ```json
//! { "grocery-store": { "personal": { "vcs": { ".gitconfig": null } } } }
//! ```
//!
//! The `work/` tree is private and never catalogued.
use anyhow::{Context as _, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Component, Path};

use crate::config::GROCERY_STORE_DIR;
use crate::resources::glob;

/// Top-level store directory excluded from the catalog.
const PRIVATE_DIR: &str = "work";

/// One directory level; `None` marks a file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog(BTreeMap<String, Option<Catalog>>);

impl Catalog {
    /// Insert a relative file path, creating intermediate directories.
    pub fn insert(&mut self, path: &Path) {
        let parts: Vec<String> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let Some((file, dirs)) = parts.split_last() else {
            return;
        };
        let mut current = self;
        for dir in dirs {
            let slot = current.0.entry(dir.clone()).or_insert(None);
            current = slot.get_or_insert_with(Self::default);
        }
        current.0.entry(file.clone()).or_insert(None);
    }

    /// Whether nothing has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pretty JSON (two-space indent) with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).context("serializing catalog")?;
        json.push('\n');
        Ok(json)
    }
}

/// Catalog every file under `<root>/grocery-store`, dotfiles included and
/// `work/` excluded. Keys are rooted at `grocery-store`.
#[must_use]
pub fn build(root: &Path) -> Catalog {
    let store = root.join(GROCERY_STORE_DIR);
    let mut catalog = Catalog::default();
    for relative in glob::list_relative(&store) {
        if relative.starts_with(PRIVATE_DIR) {
            continue;
        }
        catalog.insert(&Path::new(GROCERY_STORE_DIR).join(relative));
    }
    catalog
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    #[test]
    fn nested_paths_become_nested_objects() {
        let mut catalog = Catalog::default();
        catalog.insert(Path::new("aaa/1/x"));
        catalog.insert(Path::new("aaa/2"));
        catalog.insert(Path::new("bbb/1"));

        insta::assert_snapshot!(catalog.to_json().unwrap().trim_end(), @r#"
{
  "aaa": {
    "1": {
      "x": null
    },
    "2": null
  },
  "bbb": {
    "1": null
  }
}
"#);
    }

    #[test]
    fn work_tree_is_excluded_and_dotfiles_kept() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "grocery-store/personal/preferences/vcs/git/.gitconfig");
        touch(dir.path(), "grocery-store/work/preferences/linter/cspell/.cspell.wrk.txt");
        touch(dir.path(), "grocery-store/personal/template/workflow/ci.yml");

        let json = build(dir.path()).to_json().unwrap();

        insta::assert_snapshot!(json.trim_end(), @r#"
{
  "grocery-store": {
    "personal": {
      "preferences": {
        "vcs": {
          "git": {
            ".gitconfig": null
          }
        }
      },
      "template": {
        "workflow": {
          "ci.yml": null
        }
      }
    }
  }
}
"#);
    }

    #[test]
    fn missing_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = build(dir.path());
        assert!(catalog.is_empty());
        assert_eq!(catalog.to_json().unwrap(), "{}\n");
    }

    #[test]
    fn json_ends_with_newline() {
        let mut catalog = Catalog::default();
        catalog.insert(Path::new("a"));
        assert!(catalog.to_json().unwrap().ends_with("}\n"));
    }
}
