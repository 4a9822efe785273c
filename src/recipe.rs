//! Recipe version extraction.
//!
//! `recipe.yaml` contains several `version` fields: the concrete value under
//! the top-level `context` block and a `package.version` template elsewhere.
//! Only the `context` one drives the tag and install checks.
//!
//! This is deliberately a two-state line scanner, not a YAML parser: a line
//! with no leading indentation switches the scanner in or out of the context
//! block, and the first indented `version:` seen inside it wins. Existing
//! recipes depend on exactly these first-match, colon-split semantics.

use std::fs;
use std::path::Path;

use crate::error::{Result, ShipcheckError};

/// Extract the concrete version from the recipe file.
///
/// The error distinguishes a missing file, an unreadable file, and a recipe
/// with no `version:` line inside a top-level `context` block.
pub fn try_extract_version(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(ShipcheckError::ResourceMissing {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path)?;
    extract_version_from_str(&text).ok_or_else(|| ShipcheckError::ExtractionFailed {
        path: path.to_path_buf(),
    })
}

/// Version from the recipe file, with failures reduced to `None`.
pub fn extract_version(path: &Path) -> Option<String> {
    match try_extract_version(path) {
        Ok(version) => Some(version),
        Err(err) => {
            tracing::debug!("{}", err);
            None
        }
    }
}

/// Extract the `context.version` value from recipe text.
pub fn extract_version_from_str(text: &str) -> Option<String> {
    let mut in_context = false;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        // Top-level key: flips the scanner state.
        if !line.starts_with(' ') {
            in_context = line.trim_start().starts_with("context:");
            continue;
        }

        if in_context {
            let stripped = line.trim();
            if let Some(rest) = stripped.strip_prefix("version:") {
                let value = rest.trim().trim_matches(|c| c == '\'' || c == '"');
                return Some(value.to_string());
            }
        }
    }

    None
}

/// Compute the exclusive upper bound of the install range: major + 1.
///
/// Returns `None` when the leading version component is not an integer.
pub fn next_major(version: &str) -> Option<u64> {
    let major: u64 = version.split('.').next()?.parse().ok()?;
    Some(major + 1)
}

/// Build the pixi package spec used for install verification:
/// `<name> >=<version>,<<major + 1>`.
pub fn install_spec(package: &str, version: &str) -> Option<String> {
    let bound = next_major(version)?;
    Some(format!("{} >={},<{}", package, version, bound))
}
