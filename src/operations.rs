//! Filesystem operation abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that the install engine can be
//! unit-tested without touching the real filesystem.  Production code uses
//! [`SystemFileSystemOps`]; tests use `MockFileSystemOps`.
//!
//! Every mutating primitive returns `Ok(true)` when it changed something and
//! `Ok(false)` when there was nothing to do (destination already present
//! without override, nothing to remove).

use anyhow::{Context as _, Result};
use globset::GlobSet;
use std::path::{Path, PathBuf};

use crate::resources::{fs, glob, symlink};

/// Abstraction over the filesystem primitives the engine drives.
///
/// Implement this trait to swap in a mock during unit tests, keeping engine
/// logic independent of real I/O.  The production implementation is
/// [`SystemFileSystemOps`].
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `path` exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory (following symlinks).
    fn is_dir(&self, path: &Path) -> bool;

    /// Expand `pattern` under `root` to absolute, sorted file paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid glob.
    fn glob(&self, root: &Path, pattern: &str) -> Result<Vec<PathBuf>>;

    /// Like [`FileSystemOps::glob`] but skipping anything matched by `ignore`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid glob.
    fn search(&self, root: &Path, pattern: &str, ignore: &GlobSet) -> Result<Vec<PathBuf>>;

    /// Copy `src` (a file or directory tree) to `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy fails.
    fn copy_file(&self, src: &Path, dest: &Path, overwrite: bool) -> Result<bool>;

    /// Create a symlink at `dest` pointing to `src`.
    ///
    /// A link that already points to `src` is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created.
    fn create_symlink(&self, src: &Path, dest: &Path, overwrite: bool) -> Result<bool>;

    /// Remove a file or copied directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    fn remove_file(&self, path: &Path) -> Result<bool>;

    /// Remove `path` only if it is a symlink pointing to `src`.
    ///
    /// Regular files and links pointing elsewhere are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    fn remove_symlink(&self, path: &Path, src: &Path) -> Result<bool>;

    /// Create `path` and its ancestors. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn ensure_dir(&self, path: &Path) -> Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn glob(&self, root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        Ok(glob::expand(root, pattern)?)
    }

    fn search(&self, root: &Path, pattern: &str, ignore: &GlobSet) -> Result<Vec<PathBuf>> {
        Ok(glob::search(root, pattern, ignore)?)
    }

    fn copy_file(&self, src: &Path, dest: &Path, overwrite: bool) -> Result<bool> {
        if occupied(dest) {
            if !overwrite {
                return Ok(false);
            }
            refuse_self_replace(src, dest)?;
            fs::remove_existing(dest)?;
        }
        fs::copy_path(src, dest)?;
        Ok(true)
    }

    fn create_symlink(&self, src: &Path, dest: &Path, overwrite: bool) -> Result<bool> {
        if occupied(dest) {
            if symlink::points_to(dest, src) || !overwrite {
                return Ok(false);
            }
            refuse_self_replace(src, dest)?;
            fs::remove_existing(dest)?;
        }
        symlink::create(src, dest)?;
        Ok(true)
    }

    fn remove_file(&self, path: &Path) -> Result<bool> {
        if !occupied(path) {
            return Ok(false);
        }
        fs::remove_existing(path)?;
        Ok(true)
    }

    fn remove_symlink(&self, path: &Path, src: &Path) -> Result<bool> {
        if !symlink::points_to(path, src) {
            return Ok(false);
        }
        symlink::remove(path)?;
        Ok(true)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))
    }
}

/// Something sits at `path`, including a dangling symlink.
fn occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Replacing `dest` must never delete `src` itself. A link at `dest` is
/// fine to replace even when it resolves to `src`.
fn refuse_self_replace(src: &Path, dest: &Path) -> Result<()> {
    if !symlink::is_symlink(dest) && fs::same_file(src, dest) {
        anyhow::bail!(
            "{} is the grocery itself, refusing to replace it",
            dest.display()
        );
    }
    Ok(())
}

/// One recorded call on [`MockFileSystemOps`].
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    /// `copy_file(src, dest, overwrite)`
    Copy(PathBuf, PathBuf, bool),
    /// `create_symlink(src, dest, overwrite)`
    Symlink(PathBuf, PathBuf, bool),
    /// `remove_file(path)`
    RemoveFile(PathBuf),
    /// `remove_symlink(path)`
    RemoveSymlink(PathBuf),
    /// `ensure_dir(path)`
    EnsureDir(PathBuf),
}

/// Mock [`FileSystemOps`] for unit tests.
///
/// Pre-configure existing paths, directories, glob results and failing
/// destinations using the builder-style methods, then inspect
/// [`MockFileSystemOps::calls`] after running the engine.
///
/// # Example
///
/// ```ignore
/// use grocery_store::operations::MockFileSystemOps;
///
/// let fs = MockFileSystemOps::new()
///     .with_dir("/dst")
///     .with_glob("a/*.json", ["/store/a/x.json"]);
/// ```
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    dirs: std::collections::HashSet<PathBuf>,
    globs: std::collections::HashMap<String, Vec<PathBuf>>,
    bad_patterns: std::collections::HashSet<String>,
    failing: std::collections::HashSet<PathBuf>,
    state: std::sync::Mutex<MockState>,
}

#[cfg(test)]
#[derive(Debug, Default)]
struct MockState {
    existing: std::collections::HashSet<PathBuf>,
    links: std::collections::HashMap<PathBuf, PathBuf>,
    calls: Vec<FsCall>,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl MockFileSystemOps {
    /// Create an empty mock with nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as an existing directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let p = path.into();
        self.state_mut().existing.insert(p.clone());
        self.dirs.insert(p);
        self
    }

    /// Mark `path` as an existing file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_mut().existing.insert(path.into());
        self
    }

    /// Mark `path` as an existing symlink pointing to `target`.
    #[must_use]
    pub fn with_link(mut self, path: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        let p = path.into();
        let state = self.state_mut();
        state.existing.insert(p.clone());
        state.links.insert(p, target.into());
        self
    }

    /// Set the result returned by `glob`/`search` for `pattern`.
    #[must_use]
    pub fn with_glob<I, P>(mut self, pattern: &str, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.globs
            .insert(pattern.to_string(), files.into_iter().map(Into::into).collect());
        self
    }

    /// Make `glob`/`search` reject `pattern`.
    #[must_use]
    pub fn with_bad_pattern(mut self, pattern: &str) -> Self {
        self.bad_patterns.insert(pattern.to_string());
        self
    }

    /// Make every mutating call targeting `path` fail.
    #[must_use]
    pub fn with_failure(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing.insert(path.into());
        self
    }

    /// Calls recorded so far, in order.
    pub fn calls(&self) -> Vec<FsCall> {
        self.lock().calls.clone()
    }

    fn state_mut(&mut self) -> &mut MockState {
        self.state.get_mut().expect("mock state poisoned")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }

    fn mutate(
        &self,
        call: FsCall,
        path: &Path,
        apply: impl FnOnce(&mut MockState) -> bool,
    ) -> Result<bool> {
        let mut state = self.lock();
        state.calls.push(call);
        if self.failing.contains(path) {
            anyhow::bail!("mock: injected failure for {}", path.display());
        }
        Ok(apply(&mut state))
    }

    fn place(
        &self,
        call: FsCall,
        dest: &Path,
        link_to: Option<&Path>,
        overwrite: bool,
    ) -> Result<bool> {
        self.mutate(call, dest, |state| {
            if state.existing.contains(dest) && !overwrite {
                return false;
            }
            state.existing.insert(dest.to_path_buf());
            match link_to {
                Some(src) => state.links.insert(dest.to_path_buf(), src.to_path_buf()),
                None => state.links.remove(dest),
            };
            true
        })
    }

    fn take(&self, call: FsCall, path: &Path) -> Result<bool> {
        self.mutate(call, path, |state| {
            state.links.remove(path);
            state.existing.remove(path)
        })
    }
}

#[cfg(test)]
impl FileSystemOps for MockFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        self.lock().existing.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path) && self.exists(path)
    }

    fn glob(&self, _root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        if self.bad_patterns.contains(pattern) {
            anyhow::bail!("mock: invalid pattern {pattern}");
        }
        Ok(self.globs.get(pattern).cloned().unwrap_or_default())
    }

    fn search(&self, root: &Path, pattern: &str, ignore: &GlobSet) -> Result<Vec<PathBuf>> {
        let kept = |p: &PathBuf| {
            p.strip_prefix(root).is_ok_and(|rel| {
                !rel.ancestors()
                    .any(|a| !a.as_os_str().is_empty() && ignore.is_match(a))
            })
        };
        Ok(self.glob(root, pattern)?.into_iter().filter(kept).collect())
    }

    fn copy_file(&self, src: &Path, dest: &Path, overwrite: bool) -> Result<bool> {
        let call = FsCall::Copy(src.to_path_buf(), dest.to_path_buf(), overwrite);
        self.place(call, dest, None, overwrite)
    }

    fn create_symlink(&self, src: &Path, dest: &Path, overwrite: bool) -> Result<bool> {
        let call = FsCall::Symlink(src.to_path_buf(), dest.to_path_buf(), overwrite);
        self.place(call, dest, Some(src), overwrite)
    }

    fn remove_file(&self, path: &Path) -> Result<bool> {
        self.take(FsCall::RemoveFile(path.to_path_buf()), path)
    }

    fn remove_symlink(&self, path: &Path, src: &Path) -> Result<bool> {
        let call = FsCall::RemoveSymlink(path.to_path_buf());
        let ours = self.lock().links.get(path).is_some_and(|target| target == src);
        if !ours {
            self.lock().calls.push(call);
            return Ok(false);
        }
        self.take(call, path)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        self.mutate(FsCall::EnsureDir(path.to_path_buf()), path, |state| {
            state.existing.insert(path.to_path_buf())
        })
        .map(|_| ())
    }
}
