//! Shipcheck CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

use anyhow::Context;
use clap::Parser;
use shipcheck::checks::Pipeline;
use shipcheck::cli::Cli;
use shipcheck::config::ResolvedConfig;
use shipcheck::process::SystemRunner;
use shipcheck::report;
use shipcheck::ui::{should_use_colors, Reporter, Theme};
use shipcheck::{Result, ShipcheckError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Set by the SIGINT handler; the pipeline checks it between stages.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("shipcheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shipcheck=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Abort the run on Ctrl-C with exit code 130 (128 + SIGINT), distinct from
/// the normal failure exit 1.
///
/// The handler body is a single atomic store, which is async-signal-safe.
/// Ctrl-C also reaches the foreground child process, so a blocking stage
/// unwinds on its own; the pipeline then stops at the next stage boundary
/// and scoped resources (the ephemeral install project) drop normally.
#[cfg(unix)]
fn install_interrupt_handler() {
    extern "C" fn on_interrupt(_: libc::c_int) {
        INTERRUPTED.store(true, std::sync::atomic::Ordering::SeqCst);
    }

    let handler = on_interrupt as extern "C" fn(libc::c_int);
    unsafe {
        libc::signal(libc::SIGINT, handler as libc::sighandler_t);
    }
}

#[cfg(not(unix))]
fn install_interrupt_handler() {}

/// Project root from `--project`, falling back to the current directory.
fn project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(path) => Ok(path.clone()),
        None => std::env::current_dir()
            .context("could not determine the current directory")
            .map_err(ShipcheckError::from),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("shipcheck starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    install_interrupt_handler();

    let theme = if should_use_colors() {
        Theme::new()
    } else {
        Theme::plain()
    };

    // JSON mode keeps stdout machine-readable; stage errors still reach stderr.
    let ui = Reporter::new(theme, cli.quiet || cli.json);

    let project_root = match project_root(&cli) {
        Ok(root) => root,
        Err(err) => {
            ui.error(&err.to_string());
            return ExitCode::from(1);
        }
    };

    let config = ResolvedConfig::resolve(&project_root, cli.community_repo.clone());
    tracing::debug!(
        "Resolved package '{}' at {}",
        config.package_name,
        config.project_root.display()
    );

    report::print_header(&ui);

    let runner = SystemRunner::new();
    let run = Pipeline::new(cli.skip_community)
        .with_interrupt_flag(&INTERRUPTED)
        .run(&config, &runner, &ui);

    if run.interrupted {
        ui.error("Interrupted by user");
        return ExitCode::from(run.exit_code() as u8);
    }

    let code = if cli.json {
        report::print_json(&run)
    } else {
        report::print_summary(&ui, &run)
    };

    ExitCode::from(code as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_flag_overrides_current_directory() {
        let cli = Cli::parse_from(["shipcheck", "--project", "/src/pkg"]);
        assert_eq!(project_root(&cli).unwrap(), PathBuf::from("/src/pkg"));
    }

    #[test]
    fn without_flag_the_current_directory_is_used() {
        let cli = Cli::parse_from(["shipcheck"]);
        assert_eq!(
            project_root(&cli).unwrap(),
            std::env::current_dir().unwrap()
        );
    }
}
