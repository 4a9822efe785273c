//! Library-level pipeline tests with a scripted process runner.

use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};

use shipcheck::checks::{CheckResult, Pipeline};
use shipcheck::config::ResolvedConfig;
use shipcheck::process::mock::MockRunner;
use shipcheck::process::{CapturedOutput, CommandSpec, CommandStatus, ProcessRunner};
use shipcheck::ui::{Reporter, Theme};
use tempfile::TempDir;

fn project(recipe: &str) -> (TempDir, ResolvedConfig) {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("pixi.toml"),
        "[workspace]\nname = \"mojo-ini\"\n",
    )
    .unwrap();
    fs::write(temp.path().join("recipe.yaml"), recipe).unwrap();
    let mut config = ResolvedConfig::resolve(temp.path(), None);
    config.community_repo = temp.path().join("no-such-repo");
    (temp, config)
}

fn quiet_ui() -> Reporter {
    Reporter::new(Theme::plain(), true)
}

#[test]
fn missing_tag_scenario_yields_exactly_one_tag_failure() {
    // Recipe carries context.version 0.5.1; the tag listing is empty.
    let (_temp, config) = project("context:\n  version: \"0.5.1\"\n");
    let runner = MockRunner::new().on_output("git tag --list", 0, "");

    let run = Pipeline::new(true).run(&config, &runner, &quiet_ui());

    let tag_failures: Vec<&CheckResult> = run
        .results
        .iter()
        .filter(|r| r.name.starts_with("Git tag") && !r.success)
        .collect();
    assert_eq!(tag_failures.len(), 1);
    assert_eq!(tag_failures[0].message, "Git tag v0.5.1 does not exist");

    // The HEAD comparison never ran.
    assert!(!runner.saw("rev-list"));
    assert!(!runner.saw("rev-parse"));
}

#[test]
fn unextractable_version_fails_tag_and_install_checks() {
    let (_temp, config) = project("package:\n  version: 0.5.1\n");
    let runner = MockRunner::new();

    let run = Pipeline::new(true).run(&config, &runner, &quiet_ui());

    assert_eq!(run.version, None);
    let by_name = |name: &str| {
        run.results
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("no result named {}", name))
    };
    assert!(!by_name("Git tag exists").success);
    assert!(!by_name("Package installation").success);
    // No git or install commands were attempted without a version.
    assert!(!runner.saw("git tag"));
    assert!(!runner.saw("pixi add"));
}

#[test]
fn failing_results_surface_in_execution_order() {
    let (_temp, config) = project("context:\n  version: \"0.5.1\"\n");
    let runner = MockRunner::new()
        .on("pixi run test-all", 1)
        .on("validate-recipe.sh", 1)
        .on_output("git tag --list", 0, "");

    let run = Pipeline::new(true).run(&config, &runner, &quiet_ui());

    let failing: Vec<&str> = run
        .results
        .iter()
        .filter(|r| !r.success)
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(
        failing,
        vec![
            "Full test suite",
            "Recipe schema",
            "Package artefacts",
            "Git tag exists",
            "Package files present",
        ]
    );
    assert_eq!(run.exit_code(), 1);
}

/// Sets the interrupt flag on every executed command, mimicking Ctrl-C
/// arriving while a stage's external tool runs.
struct InterruptingRunner<'a> {
    flag: &'a AtomicBool,
    inner: MockRunner,
}

impl ProcessRunner for InterruptingRunner<'_> {
    fn run(&self, spec: &CommandSpec) -> CommandStatus {
        self.flag.store(true, Ordering::SeqCst);
        self.inner.run(spec)
    }

    fn run_captured(&self, spec: &CommandSpec) -> CapturedOutput {
        self.flag.store(true, Ordering::SeqCst);
        self.inner.run_captured(spec)
    }
}

#[test]
fn interrupt_during_a_stage_stops_before_the_next_one() {
    let (_temp, config) = project("context:\n  version: \"0.5.1\"\n");
    let flag = AtomicBool::new(false);
    let runner = InterruptingRunner {
        flag: &flag,
        inner: MockRunner::new(),
    };

    let run = Pipeline::new(true)
        .with_interrupt_flag(&flag)
        .run(&config, &runner, &quiet_ui());

    // The first stage finished; nothing after it ran.
    assert_eq!(run.results.len(), 1);
    assert_eq!(run.results[0].name, "Full test suite");
    assert!(run.interrupted);
    assert_eq!(run.exit_code(), 130);
}

#[test]
fn clean_run_has_exit_code_zero() {
    let (temp, config) = project("context:\n  version: \"0.5.1\"\n");
    fs::create_dir_all(temp.path().join("output")).unwrap();
    fs::write(temp.path().join("output/mojo-ini-0.5.1-h1.conda"), b"").unwrap();

    // `pixi add` fails, but the local artefact turns that into a soft pass.
    let runner = MockRunner::new()
        .on("pixi add", 1)
        .on_output("git tag --list", 0, "v0.5.1\n")
        .on_output("git rev-list", 0, "abc\n")
        .on_output("git rev-parse", 0, "abc\n");

    let run = Pipeline::new(true).run(&config, &runner, &quiet_ui());

    assert_eq!(run.failed(), 0, "failures: {:?}", run.results);
    assert_eq!(run.exit_code(), 0);
    assert_eq!(run.passed(), run.results.len());
}
