//! Finding a grocery by bare name.
use anyhow::Result;
use std::path::{Path, PathBuf};

use super::Context;
use crate::config::Collection;

/// Search `collection` for files named `name` (or ending in `name` when it
/// contains a `/`), skipping the configured exclusions.
///
/// One match is returned directly. Several matches are offered to the prompt,
/// labelled relative to the collection root; cancelling yields `None`.
///
/// # Errors
///
/// Returns an error if `name` does not form a valid glob or the prompt
/// cannot be shown.
pub fn find(ctx: &Context, collection: &Collection, name: &str) -> Result<Option<PathBuf>> {
    let root = collection.path(&ctx.config.root);
    if !ctx.fs_ops.exists(&root) {
        ctx.log.warn(&format!(
            "grocery collection not found: {}, skipping",
            root.display()
        ));
        return Ok(None);
    }

    let pattern = format!("**/{}", name.trim_start_matches('/'));
    let mut matches = ctx.fs_ops.search(&root, &pattern, &ctx.config.ignore)?;
    ctx.log.debug(&format!(
        "{} match(es) for {pattern} in {}",
        matches.len(),
        collection.source
    ));

    if matches.len() <= 1 {
        return Ok(matches.pop());
    }

    let labels: Vec<String> = matches.iter().map(|m| label(&root, m)).collect();
    let choice = ctx
        .prompt
        .select_one(&format!("Select a certain grocery named {name}:"), &labels)?;
    Ok(choice.and_then(|index| matches.get(index).cloned()))
}

/// Search every collection in declared order; the first hit wins and later
/// collections are never searched.
///
/// # Errors
///
/// Propagates errors from [`find`].
pub fn find_across(ctx: &Context, name: &str) -> Result<Option<PathBuf>> {
    for collection in &ctx.config.collections {
        if let Some(found) = find(ctx, collection, name)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

fn label(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::test_support::{collection, mock_context, p};
    use crate::operations::MockFileSystemOps;
    use crate::prompt::ScriptedPrompt;
    use std::sync::Arc;

    const PREFS: &str = "grocery-store/personal/preferences";
    const TEMPLATE: &str = "grocery-store/personal/template";

    fn two_collections() -> Vec<Collection> {
        vec![collection(PREFS, Vec::new()), collection(TEMPLATE, Vec::new())]
    }

    #[test]
    fn single_match_in_second_collection_needs_no_prompt() {
        let fs = MockFileSystemOps::new()
            .with_dir("/repo/grocery-store/personal/preferences")
            .with_dir("/repo/grocery-store/personal/template")
            .with_glob(
                "**/.gitconfig",
                ["/repo/grocery-store/personal/template/vcs/.gitconfig"],
            );
        let (ctx, _fs, _log) = mock_context(two_collections(), fs);
        let prompt = Arc::new(ScriptedPrompt::selecting(0));
        let ctx = ctx.with_prompt(prompt.clone());

        let found = find_across(&ctx, ".gitconfig").unwrap();

        assert_eq!(
            found,
            Some(p("/repo/grocery-store/personal/template/vcs/.gitconfig"))
        );
        assert!(prompt.selections_shown().is_empty());
    }

    #[test]
    fn first_collection_wins() {
        let fs = MockFileSystemOps::new()
            .with_dir("/repo/grocery-store/personal/preferences")
            .with_dir("/repo/grocery-store/personal/template")
            .with_glob(
                "**/.editorconfig",
                [
                    "/repo/grocery-store/personal/preferences/editor/.editorconfig",
                    "/repo/grocery-store/personal/template/.editorconfig",
                ],
            );
        let (ctx, _fs, _log) = mock_context(two_collections(), fs);

        let found = find_across(&ctx, ".editorconfig").unwrap();

        assert_eq!(
            found,
            Some(p("/repo/grocery-store/personal/preferences/editor/.editorconfig"))
        );
    }

    #[test]
    fn multiple_matches_prompt_once_with_relative_labels() {
        let fs = MockFileSystemOps::new()
            .with_dir("/repo/grocery-store/personal/preferences")
            .with_glob(
                "**/settings.json",
                [
                    "/repo/grocery-store/personal/preferences/editor/vscode/settings.json",
                    "/repo/grocery-store/personal/preferences/terminal/windows-terminal/settings.json",
                    "/repo/grocery-store/personal/preferences/vpn/settings.json",
                ],
            );
        let (ctx, _fs, _log) = mock_context(two_collections(), fs);
        let prompt = Arc::new(ScriptedPrompt::selecting(1));
        let ctx = ctx.with_prompt(prompt.clone());

        let found = find_across(&ctx, "settings.json").unwrap();

        assert_eq!(
            prompt.selections_shown(),
            vec![vec![
                "editor/vscode/settings.json".to_string(),
                "terminal/windows-terminal/settings.json".to_string(),
                "vpn/settings.json".to_string(),
            ]]
        );
        assert_eq!(
            found,
            Some(p(
                "/repo/grocery-store/personal/preferences/terminal/windows-terminal/settings.json"
            ))
        );
    }

    #[test]
    fn cancelled_prompt_returns_none() {
        let fs = MockFileSystemOps::new()
            .with_dir("/repo/grocery-store/personal/preferences")
            .with_glob(
                "**/settings.json",
                [
                    "/repo/grocery-store/personal/preferences/a/settings.json",
                    "/repo/grocery-store/personal/preferences/b/settings.json",
                ],
            );
        let (ctx, _fs, _log) = mock_context(two_collections(), fs);
        let ctx = ctx.with_prompt(Arc::new(ScriptedPrompt::default()));

        let found = find(&ctx, &two_collections()[0], "settings.json").unwrap();

        assert_eq!(found, None);
    }

    #[test]
    fn missing_collection_returns_none_with_warning() {
        let (ctx, _fs, log) = mock_context(two_collections(), MockFileSystemOps::new());

        let found = find(&ctx, &two_collections()[0], ".gitconfig").unwrap();

        assert_eq!(found, None);
        assert_eq!(log.messages("warn").len(), 1);
    }

    #[test]
    fn excluded_directories_are_not_searched() {
        let fs = MockFileSystemOps::new()
            .with_dir("/repo/grocery-store/personal/template")
            .with_glob(
                "**/.babelrc",
                ["/repo/grocery-store/personal/template/outdated/babel/.babelrc"],
            );
        let (mut ctx, _fs, _log) = mock_context(Vec::new(), fs);
        ctx.config = Arc::new(Config {
            root: p("/repo"),
            collections: vec![collection(TEMPLATE, Vec::new())],
            ignore: crate::resources::glob::compile_set(&["**/outdated".to_string()]).unwrap(),
        });

        assert_eq!(find_across(&ctx, ".babelrc").unwrap(), None);
    }

    #[test]
    fn no_match_anywhere_returns_none() {
        let fs = MockFileSystemOps::new()
            .with_dir("/repo/grocery-store/personal/preferences")
            .with_dir("/repo/grocery-store/personal/template");
        let (ctx, _fs, _log) = mock_context(two_collections(), fs);

        assert_eq!(find_across(&ctx, "absent.txt").unwrap(), None);
    }
}
