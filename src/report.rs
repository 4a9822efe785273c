//! Result aggregation and the final summary.

use serde::Serialize;

use crate::checks::pipeline::PipelineRun;
use crate::ui::Reporter;

const BANNER_TOP: &str =
    "╔══════════════════════════════════════════════════════════════╗";
const BANNER_BOTTOM: &str =
    "╚══════════════════════════════════════════════════════════════╝";

/// Print the opening banner.
pub fn print_header(ui: &Reporter) {
    let style = &ui.theme().banner_pass;
    ui.line("");
    ui.line(&format!("{}", style.apply_to(BANNER_TOP)));
    ui.line(&format!(
        "{}",
        style.apply_to("║         Pre-Submission Validation Checklist                  ║")
    ));
    ui.line(&format!("{}", style.apply_to(BANNER_BOTTOM)));
    ui.line("");
}

/// Print the final summary and return the process exit code.
///
/// The exit code is 0 iff every collected result passed; failing results are
/// listed with name and message in the order they were produced.
pub fn print_summary(ui: &Reporter, run: &PipelineRun) -> i32 {
    ui.section("SUMMARY");
    ui.line("");

    let passed = run.passed();
    let failed = run.failed();
    let total = passed + failed;

    if failed == 0 {
        let style = &ui.theme().banner_pass;
        ui.line(&format!("{}", style.apply_to(BANNER_TOP)));
        ui.line(&format!(
            "{}",
            style.apply_to(format!("║  ✓ ALL CHECKS PASSED ({}/{})", passed, total))
        ));
        ui.line(&format!("{}", style.apply_to(BANNER_BOTTOM)));
        ui.line("");
        ui.success("Package is ready for submission to modular-community");
        ui.line("");

        let tag = match &run.version {
            Some(v) => format!("v{}", v),
            None => "<version>".to_string(),
        };
        let dim = &ui.theme().dim;
        ui.info("Next steps:");
        ui.line(&format!(
            "{}",
            dim.apply_to(format!("  1. Push tag: git push origin {}", tag))
        ));
        ui.line(&format!(
            "{}",
            dim.apply_to("  2. Update recipe in modular-community PR")
        ));
        ui.line(&format!(
            "{}",
            dim.apply_to("  3. Push updated recipe to trigger CI")
        ));
        ui.line("");
        return 0;
    }

    let style = &ui.theme().banner_fail;
    ui.line(&format!("{}", style.apply_to(BANNER_TOP)));
    ui.line(&format!(
        "{}",
        style.apply_to(format!("║  ✗ CHECKS FAILED ({}/{})", failed, total))
    ));
    ui.line(&format!("{}", style.apply_to(BANNER_BOTTOM)));
    ui.line("");

    ui.line(&format!("{}", style.apply_to("Failed checks:")));
    for result in run.results.iter().filter(|r| !r.success) {
        ui.line(&format!(
            "{}",
            style.apply_to(format!("  - {}: {}", result.name, result.message))
        ));
    }
    ui.line("");
    ui.warning("Fix issues before submitting to modular-community");
    ui.line("");
    1
}

#[derive(Debug, Serialize)]
struct JsonSummary<'a> {
    version: Option<&'a str>,
    passed: usize,
    failed: usize,
    exit_code: i32,
    results: &'a [crate::checks::CheckResult],
}

/// Print the run as JSON on stdout and return the process exit code.
pub fn print_json(run: &PipelineRun) -> i32 {
    let summary = JsonSummary {
        version: run.version.as_deref(),
        passed: run.passed(),
        failed: run.failed(),
        exit_code: run.exit_code(),
        results: &run.results,
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize summary: {}", e),
    }
    run.exit_code()
}
