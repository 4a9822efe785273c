//! Resolved run configuration.
//!
//! Everything the check stages need to know about their surroundings is
//! computed once, up front, into a read-only [`ResolvedConfig`]. Stages read
//! it but never write it, so there is no process-global state to reason about
//! mid-run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable supplying the community repo path when the CLI flag
/// is absent.
pub const COMMUNITY_DIR_ENV: &str = "MODULAR_COMMUNITY_DIR";

/// Default community repo location, relative to the user's home directory.
const COMMUNITY_DIR_DEFAULT: &str = "code/github/external/modular-community";

/// Read-only values shared by every check stage.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Project root directory.
    pub project_root: PathBuf,

    /// Package name, from `pixi.toml` or the directory name.
    pub package_name: String,

    /// Path to `recipe.yaml`.
    pub recipe_path: PathBuf,

    /// Build output directory scanned for package artefacts.
    pub output_dir: PathBuf,

    /// Directory holding the validate/build helper scripts.
    pub scripts_dir: PathBuf,

    /// Local clone of the modular-community repository.
    pub community_repo: PathBuf,
}

impl ResolvedConfig {
    /// Resolve the configuration for a project root.
    ///
    /// `community_repo_flag` is the CLI-supplied path, if any; the
    /// environment variable and the home-directory default are consulted in
    /// that order when it is absent.
    pub fn resolve(project_root: &Path, community_repo_flag: Option<PathBuf>) -> Self {
        let community_repo = resolve_community_repo(
            community_repo_flag,
            |key| std::env::var(key).ok(),
            home_dir(),
        );

        Self {
            project_root: project_root.to_path_buf(),
            package_name: package_name(project_root),
            recipe_path: project_root.join("recipe.yaml"),
            output_dir: project_root.join("output"),
            scripts_dir: project_root.join("scripts"),
            community_repo,
        }
    }
}

/// Subset of `pixi.toml` we care about.
#[derive(Debug, Deserialize)]
struct PixiManifest {
    workspace: Option<WorkspaceSection>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceSection {
    name: Option<String>,
}

/// Best-effort package name detection from `pixi.toml`.
///
/// Uses `[workspace].name` if present. A missing, unreadable, or malformed
/// manifest falls back to the project directory name; this never fails.
pub fn package_name(project_root: &Path) -> String {
    let manifest_path = project_root.join("pixi.toml");

    if let Ok(text) = std::fs::read_to_string(&manifest_path) {
        match toml::from_str::<PixiManifest>(&text) {
            Ok(manifest) => {
                if let Some(name) = manifest.workspace.and_then(|w| w.name) {
                    let name = name.trim();
                    if !name.is_empty() {
                        return name.to_string();
                    }
                }
            }
            Err(e) => {
                tracing::debug!("Ignoring malformed pixi.toml: {}", e);
            }
        }
    }

    project_root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "package".to_string())
}

/// Determine the community repo location.
///
/// Precedence, first non-empty wins:
/// 1. the CLI flag
/// 2. the `MODULAR_COMMUNITY_DIR` environment variable
/// 3. `~/code/github/external/modular-community`
pub fn resolve_community_repo(
    flag: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
    home: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = flag {
        return expand_home(&path, home.as_deref());
    }

    if let Some(value) = env(COMMUNITY_DIR_ENV) {
        if !value.is_empty() {
            return expand_home(Path::new(&value), home.as_deref());
        }
    }

    home.unwrap_or_default().join(COMMUNITY_DIR_DEFAULT)
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    if let (Ok(rest), Some(home)) = (path.strip_prefix("~"), home) {
        return home.join(rest);
    }
    path.to_path_buf()
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
