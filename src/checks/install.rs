//! Install verification stage.

use std::path::{Path, PathBuf};

use crate::process::CommandSpec;
use crate::recipe;
use crate::ui::Reporter;

use super::build::find_files;
use super::{CheckResult, CheckStage, StageContext};

/// Installs the built package into an ephemeral pixi project and verifies the
/// files land where consumers expect them.
///
/// The ephemeral project resolves packages from the local build output plus
/// the same remote channels used in normal operation. If the solver cannot
/// install the package but built artefacts exist under `output/`, the check
/// records a soft pass: rattler-build already validated the artefact, and
/// pixi's solver does not always recognise a `file://` channel.
pub struct InstallStage;

const NAME: &str = "Package installation";

/// Remote channels configured for the ephemeral project, in addition to the
/// local `file://` build output.
const REMOTE_CHANNELS: &[&str] = &[
    "conda-forge",
    "https://conda.modular.com/max",
    "https://prefix.dev/modular-community",
];

impl CheckStage for InstallStage {
    fn title(&self) -> &'static str {
        "Testing package installation"
    }

    fn run(&self, ctx: &StageContext, ui: &Reporter) -> Vec<CheckResult> {
        let package = &ctx.config.package_name;

        let spec = ctx.version.and_then(|v| recipe::install_spec(package, v));
        let Some((version, pkg_spec)) = ctx.version.zip(spec) else {
            let msg = "Could not determine version for installation test";
            ui.error(msg);
            return vec![CheckResult::fail(NAME, msg)];
        };

        // Scoped: the ephemeral project is removed on every exit path.
        let tmpdir = match tempfile::TempDir::new() {
            Ok(dir) => dir,
            Err(e) => {
                let msg = format!("Failed to create test environment: {}", e);
                ui.error(&msg);
                return vec![CheckResult::fail(NAME, msg)];
            }
        };
        let test_project = tmpdir.path().join("test-install");
        ui.info(&format!(
            "Creating test environment at {}",
            test_project.display()
        ));

        let init = ctx
            .runner
            .run(&CommandSpec::new("pixi").arg("init").arg(test_project.to_string_lossy()));
        if !init.success {
            let msg = "Failed to create test environment";
            ui.error(msg);
            return vec![CheckResult::fail(NAME, msg)];
        }

        let manifest_path = test_project.join("pixi.toml");
        let channels = ctx.runner.run(
            &CommandSpec::new("pixi")
                .args(["project", "--manifest-path"])
                .arg(manifest_path.to_string_lossy())
                .args(["channel", "add"])
                .arg(format!("file://{}", ctx.config.output_dir.display()))
                .args(REMOTE_CHANNELS.iter().copied()),
        );
        if !channels.success {
            let msg = "Failed to configure channels for test project";
            ui.error(msg);
            return vec![CheckResult::fail(NAME, msg)];
        }

        ui.info(&format!("Installing {} into test environment", pkg_spec));
        let add = ctx.runner.run(
            &CommandSpec::new("pixi")
                .args(["add", "--manifest-path"])
                .arg(manifest_path.to_string_lossy())
                .arg(&pkg_spec),
        );

        if !add.success {
            // The solver can refuse a file:// channel even when the build
            // stage produced a valid artefact. Local artefacts downgrade
            // this to a soft pass.
            let artefacts = local_artifacts(&ctx.config.output_dir, package, version);
            if !artefacts.is_empty() {
                let msg = "Pixi could not solve an environment with the built package, \
                           but local artefacts exist under output/. Treating installation \
                           check as a soft pass.";
                ui.info(msg);
                return vec![CheckResult::pass(NAME, msg)];
            }

            let msg = "Package installation failed";
            ui.error(msg);
            return vec![CheckResult::fail(NAME, msg)];
        }

        ui.success("Package installs successfully");
        let mut results = vec![CheckResult::pass(NAME, "Package installs successfully")];

        let installed_root = test_project
            .join(".pixi")
            .join("envs")
            .join("default")
            .join("lib")
            .join("mojo");
        let (expected, exists) = verify_installed(&installed_root, package);

        if exists {
            let msg = format!(
                "{} files installed correctly ({})",
                package,
                expected.display()
            );
            ui.success(&msg);
            results.push(CheckResult::pass("Package files present", msg));
        } else {
            let msg = format!(
                "Package files not found in environment (expected {})",
                expected.display()
            );
            ui.error(&msg);
            results.push(CheckResult::fail("Package files present", msg));
        }

        results
    }
}

/// Local `.conda` artefacts corroborating a failed solve.
///
/// Mirrors the original heuristic: artefacts named `<package>-<version>-*`
/// are what we are really after, but any built `.conda` under the output
/// directory counts as evidence.
pub(crate) fn local_artifacts(output_dir: &Path, package: &str, version: &str) -> Vec<PathBuf> {
    if !output_dir.is_dir() {
        return Vec::new();
    }
    let prefix = format!("{}-{}-", package, version);
    let mut found = find_files(output_dir, &|name| {
        name.starts_with(&prefix) && name.ends_with(".conda")
    });
    found.extend(find_files(output_dir, &|name| name.ends_with(".conda")));
    found
}

/// Expected install location for a package, and whether it exists.
///
/// Three naming conventions: `mojo-ini` ships a single `ini.mojopkg` file,
/// other `mojo-*` packages ship a subdirectory named without the prefix, and
/// anything else just needs the library root to exist.
pub(crate) fn verify_installed(installed_root: &Path, package: &str) -> (PathBuf, bool) {
    if package == "mojo-ini" {
        let expected = installed_root.join("ini.mojopkg");
        let exists = expected.is_file();
        (expected, exists)
    } else if let Some(subdir) = package.strip_prefix("mojo-") {
        let expected = installed_root.join(subdir);
        let exists = expected.is_dir();
        (expected, exists)
    } else {
        (installed_root.to_path_buf(), installed_root.exists())
    }
}
