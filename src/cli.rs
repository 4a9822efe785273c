//! CLI argument definitions.
//!
//! Shipcheck is a single flat command: invoking it with no flags runs the
//! full validation pipeline against the current directory.

use clap::Parser;
use std::path::PathBuf;

/// Shipcheck - Pre-submission release validation.
///
/// Runs the full pre-submission checklist for a package recipe: test suite,
/// recipe schema, build + artefacts, git tag consistency, install
/// verification, and optionally the modular-community build-all pipeline.
#[derive(Debug, Parser)]
#[command(name = "shipcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a local clone of the modular-community repository
    /// (falls back to MODULAR_COMMUNITY_DIR, then
    /// ~/code/github/external/modular-community)
    #[arg(long, value_name = "PATH")]
    pub community_repo: Option<PathBuf>,

    /// Skip the modular-community build-all check
    #[arg(long)]
    pub skip_community: bool,

    /// Path to project root (overrides current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Print results as JSON instead of the human summary
    #[arg(long)]
    pub json: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
