//! Pipeline orchestration.
//!
//! Stages run one at a time, in a fixed order, and every stage runs
//! regardless of earlier failures, so a failing test suite cannot hide a
//! missing git tag. The only short-circuits are intra-stage (a failed build
//! skips its own artefact sub-check; a missing tag skips the HEAD
//! comparison).
//!
//! An interrupt flag, checked between stages, cuts the run short. Stages
//! themselves are never torn down mid-flight, so their scoped resources (the
//! ephemeral install project) are released normally.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::ResolvedConfig;
use crate::process::ProcessRunner;
use crate::recipe;
use crate::ui::Reporter;

use super::{
    BuildStage, CheckResult, CheckStage, CommunityStage, InstallStage, SchemaStage, StageContext,
    SuiteStage, TagStage,
};

/// The ordered outcome of one pipeline invocation.
#[derive(Debug)]
pub struct PipelineRun {
    /// All results, in execution order.
    pub results: Vec<CheckResult>,

    /// Version extracted once from the recipe before the stages ran.
    pub version: Option<String>,

    /// Whether the run was cut short by an interrupt.
    pub interrupted: bool,
}

impl PipelineRun {
    /// Number of passing results.
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Number of failing results.
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }

    /// Process exit code: 130 for an interrupted run, otherwise 0 iff every
    /// result passed.
    pub fn exit_code(&self) -> i32 {
        if self.interrupted {
            130
        } else if self.failed() == 0 {
            0
        } else {
            1
        }
    }
}

/// The fixed validation pipeline.
pub struct Pipeline<'a> {
    skip_community: bool,
    interrupt: Option<&'a AtomicBool>,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline, optionally without the community replay stage.
    pub fn new(skip_community: bool) -> Self {
        Self {
            skip_community,
            interrupt: None,
        }
    }

    /// Observe `flag` between stages; once set, no further stage runs and
    /// the finished run reports exit code 130.
    pub fn with_interrupt_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    fn interrupted(&self) -> bool {
        self.interrupt.is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Run every stage in order and collect all results.
    ///
    /// The recipe version is extracted exactly once, up front, and shared by
    /// the tag and install stages so they cannot disagree if the recipe file
    /// changes mid-run.
    pub fn run(
        &self,
        config: &ResolvedConfig,
        runner: &dyn ProcessRunner,
        ui: &Reporter,
    ) -> PipelineRun {
        let version = recipe::extract_version(&config.recipe_path);
        tracing::debug!("Extracted recipe version: {:?}", version);

        let ctx = StageContext {
            config,
            version: version.as_deref(),
            runner,
        };

        let mut stages: Vec<Box<dyn CheckStage>> = vec![
            Box::new(SuiteStage),
            Box::new(SchemaStage),
            Box::new(BuildStage),
            Box::new(TagStage),
            Box::new(InstallStage),
        ];
        if !self.skip_community {
            stages.push(Box::new(CommunityStage));
        }

        let mut results = Vec::new();
        for (index, stage) in stages.iter().enumerate() {
            if self.interrupted() {
                break;
            }
            ui.section(&format!("CHECK {}: {}", index + 1, stage.title()));
            results.extend(stage.run(&ctx, ui));
        }

        PipelineRun {
            results,
            version,
            interrupted: self.interrupted(),
        }
    }
}
