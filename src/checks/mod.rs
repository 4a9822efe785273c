//! Check stages and their shared types.
//!
//! A stage is one discrete unit of the validation pipeline. It runs its
//! external tools through the context's [`ProcessRunner`], reports progress
//! through the [`Reporter`], and returns one or more [`CheckResult`]s.
//!
//! Stages never let an error escape: a missing file, a missing binary, or a
//! failing tool all become failing results with an actionable message, and
//! the pipeline moves on to the next stage.

pub mod build;
pub mod community;
pub mod install;
pub mod pipeline;
pub mod schema;
pub mod suite;
pub mod tag;

pub use build::BuildStage;
pub use community::CommunityStage;
pub use install::InstallStage;
pub use pipeline::{Pipeline, PipelineRun};
pub use schema::SchemaStage;
pub use suite::SuiteStage;
pub use tag::TagStage;

use serde::Serialize;

use crate::config::ResolvedConfig;
use crate::process::ProcessRunner;
use crate::ui::Reporter;

/// Immutable outcome of one check or sub-check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Check label shown in the summary (not required unique).
    pub name: String,

    /// Whether the check passed.
    pub success: bool,

    /// Human-readable diagnostic.
    pub message: String,
}

impl CheckResult {
    /// Create a passing result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: true,
            message: message.into(),
        }
    }

    /// Create a failing result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            message: message.into(),
        }
    }
}

/// Read-only context shared by every stage in a run.
pub struct StageContext<'a> {
    /// Resolved paths and package name.
    pub config: &'a ResolvedConfig,

    /// Version extracted once from the recipe, if extraction succeeded.
    /// Shared so the tag and install checks cannot disagree if the recipe
    /// changes mid-run.
    pub version: Option<&'a str>,

    /// Process runner used for all external commands.
    pub runner: &'a dyn ProcessRunner,
}

/// One discrete unit of the validation pipeline.
pub trait CheckStage {
    /// Section title shown in the stage banner.
    fn title(&self) -> &'static str;

    /// Run the stage, returning its results in discovery order.
    fn run(&self, ctx: &StageContext, ui: &Reporter) -> Vec<CheckResult>;
}
