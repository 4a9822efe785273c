//! Git tag consistency stage.

use crate::error::{Result, ShipcheckError};
use crate::process::CommandSpec;
use crate::ui::Reporter;

use super::{CheckResult, CheckStage, StageContext};

/// Verifies a `v<version>` git tag exists and points at HEAD.
///
/// The HEAD comparison only runs when the tag exists; a missing tag is
/// reported with the exact command to create it.
pub struct TagStage;

impl CheckStage for TagStage {
    fn title(&self) -> &'static str {
        "Verifying git tag"
    }

    fn run(&self, ctx: &StageContext, ui: &Reporter) -> Vec<CheckResult> {
        let mut results = Vec::new();

        let Some(version) = ctx.version else {
            let msg = "Could not extract version from recipe.yaml";
            ui.error(msg);
            results.push(CheckResult::fail("Git tag exists", msg));
            return results;
        };

        ui.info(&format!("Recipe version: {}", version));
        let tag = format!("v{}", version);

        let listing = ctx.runner.run_captured(
            &CommandSpec::new("git")
                .args(["tag", "--list"])
                .arg(&tag)
                .cwd(&ctx.config.project_root),
        );

        if listing.status.success && !listing.stdout.trim().is_empty() {
            let msg = format!("Git tag {} exists", tag);
            ui.success(&msg);
            results.push(CheckResult::pass("Git tag exists", msg));
        } else {
            let msg = format!("Git tag {} does not exist", tag);
            ui.error(&msg);
            ui.info(&format!(
                "Create tag with: git tag -a {} -m 'Release {}'",
                tag, tag
            ));
            results.push(CheckResult::fail("Git tag exists", msg));
            return results;
        }

        let tag_commit = ctx
            .runner
            .run_captured(
                &CommandSpec::new("git")
                    .args(["rev-list", "-n", "1"])
                    .arg(&tag)
                    .cwd(&ctx.config.project_root),
            )
            .stdout
            .trim()
            .to_string();
        let head_commit = ctx
            .runner
            .run_captured(
                &CommandSpec::new("git")
                    .args(["rev-parse", "HEAD"])
                    .cwd(&ctx.config.project_root),
            )
            .stdout
            .trim()
            .to_string();

        match head_consistency(&tag, &tag_commit, &head_commit) {
            Ok(()) => {
                let msg = format!("Tag {} points to HEAD", tag);
                ui.success(&msg);
                results.push(CheckResult::pass("Git tag points to HEAD", msg));
            }
            Err(err) => {
                let msg = err.to_string();
                ui.error(&msg);
                ui.info(&format!(
                    "To move the tag to HEAD: git tag -f {} HEAD && git push --force origin {}",
                    tag, tag
                ));
                results.push(CheckResult::fail("Git tag points to HEAD", msg));
            }
        }

        results
    }
}

/// The tag and HEAD must resolve to the same non-empty commit.
fn head_consistency(tag: &str, tag_commit: &str, head_commit: &str) -> Result<()> {
    if !tag_commit.is_empty() && !head_commit.is_empty() && tag_commit == head_commit {
        return Ok(());
    }
    Err(ShipcheckError::VerificationMismatch {
        message: format!(
            "Tag {} does not point to HEAD (tag: {}, HEAD: {})",
            tag,
            abbrev(tag_commit),
            abbrev(head_commit)
        ),
    })
}

/// First 8 characters of a commit hash, or "unknown" when empty.
///
/// Hashes come from `from_utf8_lossy` over captured git output, so the cut
/// must land on a char boundary.
fn abbrev(commit: &str) -> &str {
    if commit.is_empty() {
        return "unknown";
    }
    match commit.char_indices().nth(8) {
        Some((end, _)) => &commit[..end],
        None => commit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolvedConfig;
    use crate::process::mock::MockRunner;
    use crate::ui::{Reporter, Theme};
    use tempfile::TempDir;

    fn fixture() -> (TempDir, ResolvedConfig, Reporter) {
        let temp = TempDir::new().unwrap();
        let config = ResolvedConfig::resolve(temp.path(), None);
        (temp, config, Reporter::new(Theme::plain(), true))
    }

    #[test]
    fn missing_version_fails_without_touching_git() {
        let (_temp, config, ui) = fixture();
        let runner = MockRunner::new();
        let ctx = StageContext {
            config: &config,
            version: None,
            runner: &runner,
        };

        let results = TagStage.run(&ctx, &ui);

        assert_eq!(results.len(), 1);
        assert!(!results[0].success);
        assert!(results[0].message.contains("Could not extract version"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn missing_tag_fails_and_skips_head_comparison() {
        let (_temp, config, ui) = fixture();
        let runner = MockRunner::new().on_output("git tag --list", 0, "");
        let ctx = StageContext {
            config: &config,
            version: Some("0.5.1"),
            runner: &runner,
        };

        let results = TagStage.run(&ctx, &ui);

        assert_eq!(results.len(), 1);
        assert!(!results[0].success);
        assert_eq!(results[0].message, "Git tag v0.5.1 does not exist");
        assert!(!runner.saw("rev-list"));
        assert!(!runner.saw("rev-parse"));
    }

    #[test]
    fn tag_pointing_at_head_passes_both_sub_checks() {
        let (_temp, config, ui) = fixture();
        let runner = MockRunner::new()
            .on_output("git tag --list v0.5.1", 0, "v0.5.1\n")
            .on_output("git rev-list -n 1 v0.5.1", 0, "abc123def4567890\n")
            .on_output("git rev-parse HEAD", 0, "abc123def4567890\n");
        let ctx = StageContext {
            config: &config,
            version: Some("0.5.1"),
            runner: &runner,
        };

        let results = TagStage.run(&ctx, &ui);

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.success));
        assert_eq!(results[1].message, "Tag v0.5.1 points to HEAD");
    }

    #[test]
    fn tag_elsewhere_fails_with_abbreviated_hashes() {
        let (_temp, config, ui) = fixture();
        let runner = MockRunner::new()
            .on_output("git tag --list v0.5.1", 0, "v0.5.1\n")
            .on_output("git rev-list -n 1 v0.5.1", 0, "1111111111111111\n")
            .on_output("git rev-parse HEAD", 0, "2222222222222222\n");
        let ctx = StageContext {
            config: &config,
            version: Some("0.5.1"),
            runner: &runner,
        };

        let results = TagStage.run(&ctx, &ui);

        assert!(!results[1].success);
        assert!(results[1].message.contains("tag: 11111111"));
        assert!(results[1].message.contains("HEAD: 22222222"));
    }

    #[test]
    fn empty_head_hash_is_a_mismatch() {
        let (_temp, config, ui) = fixture();
        let runner = MockRunner::new()
            .on_output("git tag --list v0.5.1", 0, "v0.5.1\n")
            .on_output("git rev-list -n 1 v0.5.1", 0, "abc123def4567890\n")
            .on_output("git rev-parse HEAD", 128, "");
        let ctx = StageContext {
            config: &config,
            version: Some("0.5.1"),
            runner: &runner,
        };

        let results = TagStage.run(&ctx, &ui);

        assert!(!results[1].success);
        assert!(results[1].message.contains("HEAD: unknown"));
    }

    #[test]
    fn abbrev_handles_short_hashes() {
        assert_eq!(abbrev("abc"), "abc");
        assert_eq!(abbrev(""), "unknown");
        assert_eq!(abbrev("0123456789"), "01234567");
    }

    #[test]
    fn abbrev_is_char_boundary_safe() {
        // Lossy decoding of garbled git output yields multi-byte replacement
        // characters; the 8-char cut must not split one.
        let noisy = "\u{fffd}\u{fffd}\u{fffd}abcdefgh";
        assert_eq!(abbrev(noisy), "\u{fffd}\u{fffd}\u{fffd}abcde");
    }

    #[test]
    fn head_consistency_requires_equal_non_empty_hashes() {
        assert!(head_consistency("v0.5.1", "abc", "abc").is_ok());
        assert!(head_consistency("v0.5.1", "abc", "def").is_err());
        assert!(head_consistency("v0.5.1", "", "").is_err());

        let err = head_consistency("v0.5.1", "abc", "def").unwrap_err();
        assert!(matches!(err, ShipcheckError::VerificationMismatch { .. }));
    }
}
