//! Recipe schema validation stage.

use crate::process::CommandSpec;
use crate::ui::Reporter;

use super::{CheckResult, CheckStage, StageContext};

/// Validates `recipe.yaml` against the schema via the external validator
/// script. Fails fast, without invoking the validator, when the recipe file
/// is absent.
pub struct SchemaStage;

const NAME: &str = "Recipe schema";

impl CheckStage for SchemaStage {
    fn title(&self) -> &'static str {
        "Validating recipe schema"
    }

    fn run(&self, ctx: &StageContext, ui: &Reporter) -> Vec<CheckResult> {
        let recipe = &ctx.config.recipe_path;

        if !recipe.is_file() {
            let msg = format!("Recipe file not found: {}", recipe.display());
            ui.error(&msg);
            return vec![CheckResult::fail(NAME, msg)];
        }

        let validator = ctx.config.scripts_dir.join("validate-recipe.sh");
        let spec = CommandSpec::new("bash")
            .arg(validator.to_string_lossy())
            .arg(recipe.to_string_lossy())
            .cwd(&ctx.config.project_root);

        let status = ctx.runner.run(&spec);
        if status.success {
            ui.success("Recipe schema is valid");
            vec![CheckResult::pass(NAME, "Recipe schema is valid")]
        } else {
            let msg = "Recipe validation failed";
            ui.error(msg);
            vec![CheckResult::fail(NAME, msg)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolvedConfig;
    use crate::process::mock::MockRunner;
    use crate::ui::Theme;
    use std::fs;
    use tempfile::TempDir;

    fn fixture(with_recipe: bool) -> (TempDir, ResolvedConfig, Reporter) {
        let temp = TempDir::new().unwrap();
        if with_recipe {
            fs::write(temp.path().join("recipe.yaml"), "context:\n  version: 0.1.0\n").unwrap();
        }
        let config = ResolvedConfig::resolve(temp.path(), None);
        (temp, config, Reporter::new(Theme::plain(), true))
    }

    #[test]
    fn missing_recipe_fails_without_running_validator() {
        let (_temp, config, ui) = fixture(false);
        let runner = MockRunner::new();
        let ctx = StageContext {
            config: &config,
            version: None,
            runner: &runner,
        };

        let results = SchemaStage.run(&ctx, &ui);

        assert_eq!(results.len(), 1);
        assert!(!results[0].success);
        assert!(results[0].message.contains("Recipe file not found"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn valid_recipe_passes() {
        let (_temp, config, ui) = fixture(true);
        let runner = MockRunner::new();
        let ctx = StageContext {
            config: &config,
            version: None,
            runner: &runner,
        };

        let results = SchemaStage.run(&ctx, &ui);

        assert!(results[0].success);
        assert!(runner.saw("validate-recipe.sh"));
    }

    #[test]
    fn validator_failure_fails_the_check() {
        let (_temp, config, ui) = fixture(true);
        let runner = MockRunner::new().on("validate-recipe.sh", 2);
        let ctx = StageContext {
            config: &config,
            version: None,
            runner: &runner,
        };

        let results = SchemaStage.run(&ctx, &ui);

        assert!(!results[0].success);
        assert_eq!(results[0].message, "Recipe validation failed");
    }
}
