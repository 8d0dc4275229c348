// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed grocery store and a fluent builder so
// each integration test can set up an isolated store, registry and home
// directory without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code, clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use grocery_store::config::Config;
use grocery_store::engine::Context;
use grocery_store::logging::Logger;
use grocery_store::prompt::Prompt;

/// Registry used by most tests. `{home}` is replaced with the test home.
pub const REGISTRY: &str = r#"
ignore = ["**/outdated"]

[[collection]]
source = "grocery-store/personal/preferences"

[[collection.matcher]]
pattern = "vcs/git/.gitconfig"
folder = "{home}"

[[collection.matcher]]
pattern = "editor/vscode/{settings,keybindings}.json"
folder = ["{home}/Code/User", "{home}/Cursor/User"]
mode = "copy"

[[collection.matcher]]
pattern = "shell/*.sh"
folder = "{home}/not-installed"

[[collection]]
source = "grocery-store/personal/template"

[[collection]]
source = "grocery-store/work/preferences"

[[collection.matcher]]
pattern = "linter/cspell/.cspell.wrk.txt"
folder = "{home}"
"#;

/// Prompt with fixed answers for non-interactive tests.
#[derive(Debug, Default)]
pub struct FixedPrompt {
    /// Index returned by every selection prompt.
    pub selection: Option<usize>,
    /// Answer to every free-text prompt.
    pub text: Option<String>,
}

impl Prompt for FixedPrompt {
    fn select_one(&self, _message: &str, _labels: &[String]) -> anyhow::Result<Option<usize>> {
        Ok(self.selection)
    }

    fn text(&self, _message: &str) -> anyhow::Result<Option<String>> {
        Ok(self.text.clone())
    }
}

/// An isolated grocery store backed by a [`tempfile::TempDir`].
///
/// Layout: `<tmp>/store` is the project root, `<tmp>/home` stands in for the
/// destination folders.
pub struct TestStore {
    dir: tempfile::TempDir,
}

impl TestStore {
    /// Create an empty store with the default registry.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join("store/grocery-store")).expect("create store");
        std::fs::create_dir_all(dir.path().join("home")).expect("create home");
        Self { dir }.registry(REGISTRY)
    }

    /// Project root.
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("store")
    }

    /// Stand-in home directory.
    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    /// Scratch directory outside the store, e.g. a paste target.
    pub fn scratch(&self, rel: &str) -> PathBuf {
        let path = self.dir.path().join("scratch").join(rel);
        std::fs::create_dir_all(&path).expect("create scratch dir");
        path
    }

    /// Replace `grocery.toml`, substituting `{home}`.
    pub fn registry(self, toml: &str) -> Self {
        let home = self.home().to_string_lossy().replace('\\', "/");
        std::fs::write(
            self.root().join("grocery.toml"),
            toml.replace("{home}", &home),
        )
        .expect("write grocery.toml");
        self
    }

    /// Add a grocery at `rel` (relative to the project root).
    pub fn grocery(self, rel: &str, content: &str) -> Self {
        write_file(&self.root().join(rel), content);
        self
    }

    /// Create a destination folder under the home directory.
    pub fn folder(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.home().join(rel)).expect("create folder");
        self
    }

    /// Load the registry and build a context with the given elevation.
    pub fn context(&self, elevated: bool) -> Context {
        self.context_with_prompt(elevated, FixedPrompt::default())
    }

    /// Like [`Self::context`] with a scripted prompt.
    pub fn context_with_prompt(&self, elevated: bool, prompt: FixedPrompt) -> Context {
        let config = Config::load(&self.root()).expect("load registry");
        Context::new(config, Arc::new(Logger::new("test")))
            .with_elevation(elevated)
            .with_prompt(Arc::new(prompt))
    }
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}

/// Read a file to a string.
pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read file")
}
