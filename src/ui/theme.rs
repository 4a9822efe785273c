//! Visual theme and styling.

use console::Style;

/// Shipcheck's visual theme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (yellow).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for informational messages (blue).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for section banners (blue bold).
    pub section: Style,
    /// Style for the final verdict banners (bold, green or red applied on top).
    pub banner_pass: Style,
    /// Style for the failing verdict banner.
    pub banner_fail: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            info: Style::new().blue(),
            dim: Style::new().dim(),
            section: Style::new().blue().bold(),
            banner_pass: Style::new().green().bold(),
            banner_fail: Style::new().red().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            section: Style::new(),
            banner_pass: Style::new(),
            banner_fail: Style::new(),
        }
    }

    /// Format an informational message (arrow + text in blue).
    pub fn format_info(&self, msg: &str) -> String {
        format!("{}", self.info.apply_to(format!("→ {}", msg)))
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in yellow).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}
