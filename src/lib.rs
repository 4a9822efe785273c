//! Shipcheck - Pre-submission release validation.
//!
//! Shipcheck runs the fixed checklist a package must pass before its recipe
//! is submitted to the modular-community channel: full test suite, recipe
//! schema validation, package build + artefact presence, git tag
//! consistency, install verification in an ephemeral environment, and an
//! optional replay of the community repository's own build-all pipeline.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Once-computed, read-only run configuration
//! - [`checks`] - Check stages and the pipeline orchestrator
//! - [`error`] - Error types and result aliases
//! - [`process`] - External command execution
//! - [`recipe`] - Recipe version extraction
//! - [`report`] - Result aggregation and the final summary
//! - [`ui`] - Terminal output and styling
//!
//! # Example
//!
//! ```
//! use shipcheck::recipe::extract_version_from_str;
//!
//! // Only the version inside the top-level `context` block counts.
//! let recipe = "context:\n  version: \"0.5.1\"\npackage:\n  version: ${{ version }}\n";
//! assert_eq!(extract_version_from_str(recipe), Some("0.5.1".to_string()));
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod process;
pub mod recipe;
pub mod report;
pub mod ui;

pub use error::{Result, ShipcheckError};
