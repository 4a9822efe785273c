//! Full test suite stage.

use crate::process::CommandSpec;
use crate::ui::Reporter;

use super::{CheckResult, CheckStage, StageContext};

/// Runs the project's full test suite via `pixi run test-all`.
pub struct SuiteStage;

const NAME: &str = "Full test suite";

impl CheckStage for SuiteStage {
    fn title(&self) -> &'static str {
        "Running full test suite"
    }

    fn run(&self, ctx: &StageContext, ui: &Reporter) -> Vec<CheckResult> {
        let spec = CommandSpec::new("pixi")
            .args(["run", "test-all"])
            .cwd(&ctx.config.project_root);

        let status = ctx.runner.run(&spec);
        if status.success {
            ui.success("All tests pass");
            vec![CheckResult::pass(NAME, "All tests pass")]
        } else {
            ui.error("Tests failed");
            vec![CheckResult::fail(NAME, "Tests failed")]
        }
    }
}
