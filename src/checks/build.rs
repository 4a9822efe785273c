//! Package build and artefact presence stage.

use std::fs;
use std::path::{Path, PathBuf};

use crate::process::CommandSpec;
use crate::ui::Reporter;

use super::{CheckResult, CheckStage, StageContext};

/// Builds the package via the external rattler-build script, then verifies
/// that package artefacts landed in the output directory.
///
/// When the build fails, the artefact sub-check is skipped; its result
/// would be meaningless without a build.
pub struct BuildStage;

impl CheckStage for BuildStage {
    fn title(&self) -> &'static str {
        "Building package with rattler-build"
    }

    fn run(&self, ctx: &StageContext, ui: &Reporter) -> Vec<CheckResult> {
        let mut results = Vec::new();

        let script = ctx.config.scripts_dir.join("build-recipe.sh");
        let spec = CommandSpec::new("bash")
            .arg(script.to_string_lossy())
            .cwd(&ctx.config.project_root);

        let status = ctx.runner.run(&spec);
        if status.success {
            ui.success("Package builds successfully");
            results.push(CheckResult::pass(
                "Build package",
                "Package builds successfully",
            ));
        } else {
            let msg = "Package build failed";
            ui.error(msg);
            results.push(CheckResult::fail("Build package", msg));
            return results;
        }

        let artefacts = package_artifacts(&ctx.config.output_dir);
        if artefacts.is_empty() {
            let msg = "No package artefacts found";
            ui.error(msg);
            results.push(CheckResult::fail("Package artefacts", msg));
        } else {
            let msg = format!("Package artefacts created: {} file(s)", artefacts.len());
            ui.success(&msg);
            results.push(CheckResult::pass("Package artefacts", msg));
        }

        results
    }
}

/// Recursively collect files under `dir` whose names satisfy `matches`.
///
/// Unreadable directories are skipped.
pub(crate) fn find_files(dir: &Path, matches: &dyn Fn(&str) -> bool) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let Ok(entries) = fs::read_dir(dir) else {
        return found;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            found.extend(find_files(&path, matches));
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if matches(name) {
                found.push(path);
            }
        }
    }
    found
}

/// All `.conda` / `.tar.bz2` package files under the output directory.
pub(crate) fn package_artifacts(output_dir: &Path) -> Vec<PathBuf> {
    if !output_dir.is_dir() {
        return Vec::new();
    }
    find_files(output_dir, &|name| {
        name.ends_with(".conda") || name.ends_with(".tar.bz2")
    })
}
