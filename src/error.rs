//! Error types for shipcheck operations.
//!
//! This module defines [`ShipcheckError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ShipcheckError` for domain-specific errors that need distinct handling
//!   (recipe extraction, process spawning, tag/HEAD consistency)
//! - Use `anyhow::Error` (via `ShipcheckError::Other`) for unexpected errors
//! - Check stages never let errors cross their boundary: every external-process
//!   or filesystem failure becomes a failing `CheckResult` with an actionable
//!   message, and the pipeline keeps going

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for shipcheck operations.
#[derive(Debug, Error)]
pub enum ShipcheckError {
    /// A required external tool binary could not be located.
    #[error("Required command not found: {command}")]
    ToolNotFound { command: String },

    /// An external tool ran but exited non-zero.
    #[error("Command failed with exit code {code:?}: {command}")]
    ToolFailed { command: String, code: Option<i32> },

    /// An expected file or directory is absent.
    #[error("Missing resource: {path}")]
    ResourceMissing { path: PathBuf },

    /// The recipe version field could not be extracted.
    #[error("Could not extract version from {path}")]
    ExtractionFailed { path: PathBuf },

    /// A consistency check (tag/commit, installed file path) did not match.
    /// The message already names both sides, so it displays bare.
    #[error("{message}")]
    VerificationMismatch { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for shipcheck operations.
pub type Result<T> = std::result::Result<T, ShipcheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_not_found_displays_command() {
        let err = ShipcheckError::ToolNotFound {
            command: "pixi run test-all".into(),
        };
        assert!(err.to_string().contains("pixi run test-all"));
    }

    #[test]
    fn tool_failed_displays_command_and_code() {
        let err = ShipcheckError::ToolFailed {
            command: "git tag --list".into(),
            code: Some(128),
        };
        let msg = err.to_string();
        assert!(msg.contains("git tag --list"));
        assert!(msg.contains("128"));
    }

    #[test]
    fn resource_missing_displays_path() {
        let err = ShipcheckError::ResourceMissing {
            path: PathBuf::from("/project/recipe.yaml"),
        };
        assert!(err.to_string().contains("/project/recipe.yaml"));
    }

    #[test]
    fn extraction_failed_displays_path() {
        let err = ShipcheckError::ExtractionFailed {
            path: PathBuf::from("recipe.yaml"),
        };
        assert!(err.to_string().contains("recipe.yaml"));
    }

    #[test]
    fn verification_mismatch_displays_message() {
        let err = ShipcheckError::VerificationMismatch {
            message: "tag v0.5.1 does not point to HEAD".into(),
        };
        assert_eq!(err.to_string(), "tag v0.5.1 does not point to HEAD");
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ShipcheckError = io_err.into();
        assert!(matches!(err, ShipcheckError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(ShipcheckError::VerificationMismatch {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
