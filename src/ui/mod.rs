//! Terminal output.
//!
//! The [`Reporter`] is the single write path for user-facing output. Stage
//! diagnostics go through it as they happen; the external tools themselves
//! write straight to the inherited stdio, interleaved with our lines.

pub mod theme;

pub use theme::{should_use_colors, Theme};

const SECTION_RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Writes styled status lines, respecting quiet mode.
///
/// Errors always print (to stderr); everything else is suppressed when quiet.
#[derive(Debug)]
pub struct Reporter {
    theme: Theme,
    quiet: bool,
}

impl Reporter {
    /// Create a reporter.
    pub fn new(theme: Theme, quiet: bool) -> Self {
        Self { theme, quiet }
    }

    /// The active theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Print an informational line.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", self.theme.format_info(msg));
        }
    }

    /// Print a success line.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", self.theme.format_success(msg));
        }
    }

    /// Print a warning line.
    pub fn warning(&self, msg: &str) {
        if !self.quiet {
            println!("{}", self.theme.format_warning(msg));
        }
    }

    /// Print an error line to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    /// Print a section banner for a pipeline stage.
    pub fn section(&self, title: &str) {
        if self.quiet {
            return;
        }
        println!();
        println!("{}", self.theme.section.apply_to(SECTION_RULE));
        println!("{}", self.theme.section.apply_to(title));
        println!("{}", self.theme.section.apply_to(SECTION_RULE));
    }

    /// Print a raw line, honoring quiet mode.
    pub fn line(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }
}
