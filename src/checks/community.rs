//! Downstream community CI replay stage.

use crate::process::CommandSpec;
use crate::ui::Reporter;

use super::{CheckResult, CheckStage, StageContext};

/// Runs `pixi run build-all` inside a local modular-community clone.
///
/// This mirrors the CI pipeline the community repository uses to validate
/// recipes, so a local failure predicts a CI failure before submission.
pub struct CommunityStage;

const NAME: &str = "modular-community build-all";

impl CheckStage for CommunityStage {
    fn title(&self) -> &'static str {
        "Running modular-community pixi run build-all"
    }

    fn run(&self, ctx: &StageContext, ui: &Reporter) -> Vec<CheckResult> {
        let repo_dir = &ctx.config.community_repo;

        if !repo_dir.exists() {
            let msg = format!(
                "modular-community repo not found at {} \
                 (set MODULAR_COMMUNITY_DIR or use --community-repo)",
                repo_dir.display()
            );
            ui.error(&msg);
            return vec![CheckResult::fail(NAME, msg)];
        }

        if !repo_dir.join("pixi.toml").is_file() {
            let msg = format!(
                "No pixi.toml found in modular-community repo at {}",
                repo_dir.display()
            );
            ui.error(&msg);
            return vec![CheckResult::fail(NAME, msg)];
        }

        ui.info(&format!(
            "Using modular-community repo at {}",
            repo_dir.display()
        ));

        let status = ctx
            .runner
            .run(&CommandSpec::new("pixi").args(["run", "build-all"]).cwd(repo_dir));

        if status.success {
            let msg = "modular-community pixi run build-all completed successfully";
            ui.success(msg);
            vec![CheckResult::pass(NAME, msg)]
        } else {
            let msg = "modular-community pixi run build-all failed. Inspect the \
                       output above and modular-community logs for details.";
            ui.error(msg);
            vec![CheckResult::fail(NAME, msg)]
        }
    }
}
