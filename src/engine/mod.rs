//! The install engine: matcher fan-out, collection processing, lookup and
//! copy dispatch.
//!
//! Every function here takes a [`Context`] carrying the loaded registry and
//! the injectable collaborators (filesystem, logger, prompt, privilege
//! probe), so the whole pipeline runs against mocks in tests.
pub mod catalog;
pub mod collection;
pub mod lookup;
pub mod matcher;
pub mod paste;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::logging::Log;
use crate::operations::{FileSystemOps, SystemFileSystemOps};
use crate::platform::Platform;
use crate::prompt::{InquirePrompt, Prompt};

/// Whether a run places groceries or takes them back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create links or copies in destination folders.
    Install,
    /// Remove what install created.
    Uninstall,
}

impl Action {
    /// Progressive verb for stage headers.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Install => "Installing",
            Self::Uninstall => "Uninstalling",
        }
    }
}

/// What happened to one source file in one destination folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// A new link or copy was placed.
    Created,
    /// An existing destination was replaced (override mode).
    Overridden,
    /// A link or copy was removed.
    Removed,
    /// The destination folder does not exist.
    SkippedFolderMissing,
    /// The destination already exists and override is off, or the link is
    /// already in place.
    SkippedExists,
    /// Nothing to remove at the destination.
    SkippedAbsent,
    /// The filesystem primitive failed; the run carries on.
    Failed {
        /// Error chain of the failure.
        reason: String,
    },
}

/// One entry of the source-file x destination-folder fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    /// Absolute grocery path inside the store.
    pub source: PathBuf,
    /// Destination path: folder joined with the source basename.
    pub destination: PathBuf,
    /// Result of the operation.
    pub outcome: TargetOutcome,
}

/// Counters over the targets of one collection.
///
/// # Examples
///
/// ```
/// use grocery_store::engine::TargetStats;
///
/// let stats = TargetStats { changed: 3, already_ok: 10, skipped: 0, failed: 0 };
/// assert_eq!(stats.summary(), "3 changed, 10 already ok");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TargetStats {
    /// Targets created, overridden or removed.
    pub changed: u32,
    /// Targets already in the requested state.
    pub already_ok: u32,
    /// Targets whose destination folder is missing.
    pub skipped: u32,
    /// Targets whose filesystem operation failed, plus matchers whose
    /// pattern could not be expanded.
    pub failed: u32,
}

impl TargetStats {
    /// Count one outcome.
    pub const fn record(&mut self, outcome: &TargetOutcome) {
        match outcome {
            TargetOutcome::Created | TargetOutcome::Overridden | TargetOutcome::Removed => {
                self.changed += 1;
            }
            TargetOutcome::SkippedExists | TargetOutcome::SkippedAbsent => self.already_ok += 1,
            TargetOutcome::SkippedFolderMissing => self.skipped += 1,
            TargetOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Count a matcher that failed before reaching any target.
    pub const fn record_matcher_failure(&mut self) {
        self.failed += 1;
    }

    /// Format the summary string (e.g. "3 changed, 10 already ok, 1 skipped").
    #[must_use]
    pub fn summary(&self) -> String {
        let mut text = format!("{} changed, {} already ok", self.changed, self.already_ok);
        if self.skipped > 0 {
            text.push_str(&format!(", {} skipped", self.skipped));
        }
        if self.failed > 0 {
            text.push_str(&format!(", {} failed", self.failed));
        }
        text
    }
}

impl std::ops::AddAssign for TargetStats {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_ok += other.already_ok;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Shared context for one command run.
pub struct Context {
    /// Loaded registry, including the project root.
    pub config: Arc<Config>,
    /// Logger for output and summary recording.
    pub log: Arc<dyn Log>,
    /// Filesystem operation abstraction (injectable for testing).
    pub fs_ops: Arc<dyn FileSystemOps>,
    /// Interactive prompt (injectable for testing).
    pub prompt: Arc<dyn Prompt>,
    /// Privilege probe, only consulted for override installs.
    pub is_elevated: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("log", &"<dyn Log>")
            .field("fs_ops", &self.fs_ops)
            .field("prompt", &self.prompt)
            .field("is_elevated", &"<fn>")
            .finish()
    }
}

impl Context {
    /// Context wired to the real filesystem, terminal and privilege probe.
    #[must_use]
    pub fn new(config: Config, log: Arc<dyn Log>) -> Self {
        let platform = Platform::detect();
        Self {
            config: Arc::new(config),
            log,
            fs_ops: Arc::new(SystemFileSystemOps),
            prompt: Arc::new(InquirePrompt),
            is_elevated: Arc::new(move || platform.has_elevated_privileges()),
        }
    }

    /// Replace the filesystem implementation.
    #[must_use]
    pub fn with_fs_ops(mut self, fs_ops: Arc<dyn FileSystemOps>) -> Self {
        self.fs_ops = fs_ops;
        self
    }

    /// Replace the prompt implementation.
    #[must_use]
    pub fn with_prompt(mut self, prompt: Arc<dyn Prompt>) -> Self {
        self.prompt = prompt;
        self
    }

    /// Pin the privilege probe to a fixed answer.
    #[must_use]
    pub fn with_elevation(mut self, elevated: bool) -> Self {
        self.is_elevated = Arc::new(move || elevated);
        self
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::{Collection, InstallMode, Matcher};
    use crate::logging::MemoryLog;
    use crate::operations::MockFileSystemOps;
    use std::path::Path;

    /// Context over a mock filesystem with an in-memory log.
    pub(crate) fn mock_context(
        collections: Vec<Collection>,
        fs: MockFileSystemOps,
    ) -> (Context, Arc<MockFileSystemOps>, Arc<MemoryLog>) {
        let fs = Arc::new(fs);
        let log = Arc::new(MemoryLog::default());
        let config = Config {
            root: PathBuf::from("/repo"),
            collections,
            ignore: globset::GlobSet::empty(),
        };
        let ctx = Context::new(config, log.clone())
            .with_fs_ops(fs.clone())
            .with_elevation(false);
        (ctx, fs, log)
    }

    pub(crate) fn matcher(pattern: &str, folders: &[&str], mode: InstallMode) -> Matcher {
        Matcher {
            pattern: pattern.to_string(),
            folders: folders.iter().map(PathBuf::from).collect(),
            mode,
        }
    }

    pub(crate) fn collection(source: &str, matchers: Vec<Matcher>) -> Collection {
        Collection {
            source: source.to_string(),
            matchers,
        }
    }

    pub(crate) fn p(path: &str) -> PathBuf {
        Path::new(path).to_path_buf()
    }
}
