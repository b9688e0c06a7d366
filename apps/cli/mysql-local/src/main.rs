use mysql_local::cli::{Cli, Commands};
use mysql_local::error::CliError;
use mysql_local::logger;

use common::ErrorLocation;

use server_core::binaries::BundledBinaries;
use server_core::supervisor::LocalServer;

use std::io::{BufRead, Write, stdin, stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            port,
            data_dir,
            basedir,
            admin_user,
            log_dir,
        } => run(port, data_dir, basedir, admin_user, log_dir),
        Commands::Check { basedir } => check(basedir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Start a server, print its connection info, and stop it when the user
/// presses Enter.
#[track_caller]
fn run(
    port: u16,
    data_dir: PathBuf,
    basedir: Option<PathBuf>,
    admin_user: String,
    log_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    let log_dir = log_dir.unwrap_or_else(|| data_dir.clone());
    std::fs::create_dir_all(&log_dir).map_err(|e| CliError::Cli {
        message: format!("Failed to create log directory {}: {e}", log_dir.display()),
        location: ErrorLocation::caller(),
    })?;
    logger::initialize(&log_dir)?;

    let mut server = match basedir {
        Some(base) => LocalServer::with_binary_root(base),
        None => LocalServer::new(),
    }
    .map_err(|e| CliError::Core {
        message: e.to_string(),
        location: ErrorLocation::caller(),
    })?
    .with_admin_user(admin_user);

    let info = server.start(port, &data_dir).map_err(|e| CliError::Core {
        message: e.to_string(),
        location: ErrorLocation::caller(),
    })?;

    let rendered = serde_json::to_string_pretty(&info).map_err(|e| CliError::Cli {
        message: format!("Failed to render server info: {e}"),
        location: ErrorLocation::caller(),
    })?;
    println!("{rendered}");
    println!("Press Enter to stop the server...");
    let _ = stdout().flush();

    let mut line = String::new();
    let _ = stdin().lock().read_line(&mut line);

    server.stop();
    Ok(())
}

/// Resolve the bundled binaries and report where they were found.
#[track_caller]
fn check(basedir: Option<PathBuf>) -> Result<(), CliError> {
    let binaries = match basedir {
        Some(base) => BundledBinaries::at(base),
        None => BundledBinaries::resolve(),
    }
    .map_err(|e| CliError::Core {
        message: e.to_string(),
        location: ErrorLocation::caller(),
    })?;

    let report = serde_json::json!({
        "base_dir": binaries.base_dir(),
        "mysqld": binaries.mysqld(),
        "mysqladmin": binaries.mysqladmin(),
        "data_templates": binaries.data_template_dir(),
    });
    let rendered = serde_json::to_string_pretty(&report).map_err(|e| CliError::Cli {
        message: format!("Failed to render report: {e}"),
        location: ErrorLocation::caller(),
    })?;
    println!("{rendered}");
    Ok(())
}
