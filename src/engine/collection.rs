//! Collection processing: every matcher of one collection, in order.
use super::{Action, Context, TargetStats, matcher};
use crate::config::Collection;
use crate::error::GroceryError;

/// Result of processing one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionReport {
    /// The collection root is absent from this checkout.
    Missing,
    /// Every matcher ran; per-target results are tallied.
    Processed(TargetStats),
}

/// Apply `action` to every matcher of `collection`.
///
/// An absent collection root is a warning, not an error. Target failures are
/// counted in the returned stats and never abort the remaining matchers.
///
/// # Errors
///
/// Returns [`GroceryError::ElevationRequired`] for an override install without
/// elevated privileges. The check happens before any file is touched.
pub fn process(
    ctx: &Context,
    collection: &Collection,
    action: Action,
    overwrite: bool,
) -> Result<CollectionReport, GroceryError> {
    let source_root = collection.path(&ctx.config.root);
    if !ctx.fs_ops.exists(&source_root) {
        ctx.log.warn(&format!(
            "grocery collection not found: {}, skipping",
            source_root.display()
        ));
        return Ok(CollectionReport::Missing);
    }

    if action == Action::Install && overwrite && !(ctx.is_elevated)() {
        return Err(GroceryError::ElevationRequired {
            collection: collection.source.clone(),
        });
    }

    ctx.log
        .stage(&format!("{} {}", action.verb(), collection.source));

    let mut stats = TargetStats::default();
    for m in &collection.matchers {
        match matcher::resolve_and_apply(ctx, &source_root, m, action, overwrite) {
            Ok(reports) => reports.iter().for_each(|r| stats.record(&r.outcome)),
            Err(e) => {
                ctx.log.error(&format!("{e:#}"));
                stats.record_matcher_failure();
            }
        }
    }
    ctx.log.info(&stats.summary());
    Ok(CollectionReport::Processed(stats))
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use crate::config::InstallMode;
    use crate::engine::test_support::{collection, matcher, mock_context, p};
    use crate::operations::{FsCall, MockFileSystemOps};

    const SOURCE: &str = "grocery-store/personal/preferences";
    const ROOT: &str = "/repo/grocery-store/personal/preferences";

    fn prefs() -> Collection {
        collection(
            SOURCE,
            vec![
                matcher("vcs/git/.gitconfig", &["/home"], InstallMode::Symlink),
                matcher("maven/settings.xml", &["/home/.m2"], InstallMode::Copy),
            ],
        )
    }

    fn store() -> MockFileSystemOps {
        MockFileSystemOps::new()
            .with_dir(ROOT)
            .with_dir("/home")
            .with_dir("/home/.m2")
            .with_glob("vcs/git/.gitconfig", [format!("{ROOT}/vcs/git/.gitconfig")])
            .with_glob("maven/settings.xml", [format!("{ROOT}/maven/settings.xml")])
    }

    #[test]
    fn missing_collection_is_skipped_with_warning() {
        let (ctx, fs, log) = mock_context(Vec::new(), MockFileSystemOps::new());

        let report = process(&ctx, &prefs(), Action::Install, false).unwrap();

        assert_eq!(report, CollectionReport::Missing);
        assert!(fs.calls().is_empty());
        assert_eq!(log.messages("warn").len(), 1);
    }

    #[test]
    fn missing_collection_skips_before_privilege_check() {
        let (ctx, _fs, _log) = mock_context(Vec::new(), MockFileSystemOps::new());
        let report = process(&ctx, &prefs(), Action::Install, true).unwrap();
        assert_eq!(report, CollectionReport::Missing);
    }

    #[test]
    fn override_install_without_elevation_touches_nothing() {
        let (ctx, fs, _log) = mock_context(Vec::new(), store());

        let err = process(&ctx, &prefs(), Action::Install, true).unwrap_err();

        assert!(matches!(
            err,
            GroceryError::ElevationRequired { ref collection } if collection == SOURCE
        ));
        assert!(fs.calls().is_empty(), "no mutation before the precondition");
    }

    #[test]
    fn override_install_with_elevation_proceeds() {
        let (ctx, fs, _log) = mock_context(Vec::new(), store());
        let ctx = ctx.with_elevation(true);

        let report = process(&ctx, &prefs(), Action::Install, true).unwrap();

        assert_eq!(fs.calls().len(), 2);
        assert!(matches!(report, CollectionReport::Processed(s) if s.changed == 2));
    }

    #[test]
    fn uninstall_never_requires_elevation() {
        let (ctx, _fs, _log) = mock_context(Vec::new(), store());
        assert!(process(&ctx, &prefs(), Action::Uninstall, true).is_ok());
    }

    #[test]
    fn matchers_run_in_declared_order() {
        let (ctx, fs, _log) = mock_context(Vec::new(), store());

        process(&ctx, &prefs(), Action::Install, false).unwrap();

        assert_eq!(
            fs.calls(),
            vec![
                FsCall::Symlink(
                    p(&format!("{ROOT}/vcs/git/.gitconfig")),
                    p("/home/.gitconfig"),
                    false
                ),
                FsCall::Copy(
                    p(&format!("{ROOT}/maven/settings.xml")),
                    p("/home/.m2/settings.xml"),
                    false
                ),
            ]
        );
    }

    #[test]
    fn failing_matcher_does_not_block_the_next() {
        let fs = store().with_failure("/home/.gitconfig");
        let (ctx, fs, _log) = mock_context(Vec::new(), fs);

        let report = process(&ctx, &prefs(), Action::Install, false).unwrap();

        assert_eq!(fs.calls().len(), 2);
        let CollectionReport::Processed(stats) = report else {
            panic!("collection should have been processed");
        };
        assert_eq!((stats.changed, stats.failed), (1, 1));
    }

    #[test]
    fn unexpandable_pattern_counts_once_and_the_rest_still_run() {
        let fs = store().with_bad_pattern("vcs/git/.gitconfig");
        let (ctx, fs, log) = mock_context(Vec::new(), fs);

        let report = process(&ctx, &prefs(), Action::Install, false).unwrap();

        let CollectionReport::Processed(stats) = report else {
            panic!("expected processed report");
        };
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.changed, 1);
        assert_eq!(fs.calls().len(), 1);
        assert!(log.messages("error")[0].contains("vcs/git/.gitconfig"));
    }

    #[test]
    fn second_install_without_override_is_idempotent() {
        let (ctx, _fs, _log) = mock_context(Vec::new(), store());

        process(&ctx, &prefs(), Action::Install, false).unwrap();
        let second = process(&ctx, &prefs(), Action::Install, false).unwrap();

        assert!(matches!(
            second,
            CollectionReport::Processed(s) if s.changed == 0 && s.already_ok == 2
        ));
    }

    #[test]
    fn template_collection_without_matchers_is_a_noop() {
        let fs = MockFileSystemOps::new().with_dir("/repo/grocery-store/personal/template");
        let (ctx, fs, _log) = mock_context(Vec::new(), fs);
        let template = collection("grocery-store/personal/template", Vec::new());

        let report = process(&ctx, &template, Action::Install, false).unwrap();

        assert_eq!(report, CollectionReport::Processed(TargetStats::default()));
        assert!(fs.calls().is_empty());
    }
}
