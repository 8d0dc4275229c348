//! File-system helpers shared by the filesystem primitives.
use anyhow::{Context as _, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Remove whatever occupies `path`: a file, a symlink (including a broken
/// one) or a real directory tree. Does nothing if `path` does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<()> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(());
    };
    if meta.is_symlink() {
        return super::symlink::remove(path);
    }
    let removed = if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    removed.with_context(|| format!("removing existing {}", path.display()))
}

/// Return `true` if `a` and `b` resolve to the same existing path.
#[must_use]
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copy a file, or a directory tree, from `src` to `dst`.
///
/// Symlinks inside a source tree are followed, so the copy holds their
/// contents rather than the links.
///
/// # Errors
///
/// Returns an error if any entry cannot be read or written.
pub fn copy_path(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        std::fs::copy(src, dst)
            .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
        return Ok(());
    }

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.with_context(|| format!("reading {}", src.display()))?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("creating directory {}", target.display()))?;
        } else {
            std::fs::copy(entry.path(), &target).with_context(|| {
                format!("copying {} to {}", entry.path().display(), target.display())
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn copies_directory_trees() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        std::fs::write(src.path().join("conda.lnk"), b"aaa").unwrap();
        std::fs::create_dir(src.path().join("sub")).unwrap();
        std::fs::write(src.path().join("sub/.condarc"), b"bbb").unwrap();

        let target = dst.path().join("out");
        copy_path(src.path(), &target).unwrap();

        assert_eq!(std::fs::read(target.join("conda.lnk")).unwrap(), b"aaa");
        assert_eq!(std::fs::read(target.join("sub/.condarc")).unwrap(), b"bbb");
    }

    #[test]
    fn copies_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("settings.xml");
        std::fs::write(&src, "<settings/>").unwrap();
        let dst = dir.path().join("copy.xml");

        copy_path(&src, &dst).unwrap();

        assert_eq!(std::fs::read_to_string(dst).unwrap(), "<settings/>");
    }

    #[test]
    fn removes_files_and_trees() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.json");
        let tree = dir.path().join("tree");
        std::fs::write(&file, "{}").unwrap();
        std::fs::create_dir_all(tree.join("inner")).unwrap();
        std::fs::write(tree.join("inner/file"), "x").unwrap();

        remove_existing(&file).unwrap();
        remove_existing(&tree).unwrap();

        assert!(!file.exists());
        assert!(!tree.exists());
    }

    #[test]
    fn same_file_resolves_relative_components() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".gitconfig");
        std::fs::write(&file, "x").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        assert!(same_file(&file, &dir.path().join("sub/../.gitconfig")));
        assert!(!same_file(&file, &dir.path().join("absent")));
    }

    #[test]
    fn remove_is_a_noop_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        remove_existing(&dir.path().join("nonexistent")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn removes_broken_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink("/nonexistent/target", &link).unwrap();

        remove_existing(&link).unwrap();

        assert!(link.symlink_metadata().is_err());
    }
}
