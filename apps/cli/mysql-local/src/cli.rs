//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Run a self-contained MySQL 5.5 server from bundled binaries.
#[derive(Debug, Parser)]
#[command(name = "mysql-local", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a server, print its connection info, and stop it on Enter
    Run {
        /// TCP port the server listens on
        #[arg(short, long, default_value_t = 3366)]
        port: u16,

        /// Data directory (created and seeded on first use)
        #[arg(short, long, default_value = "./mysql-data")]
        data_dir: PathBuf,

        /// Bundle root holding bin/ and data/ (overrides auto-detection)
        #[arg(short, long)]
        basedir: Option<PathBuf>,

        /// Administrative account used for shutdown
        #[arg(short = 'u', long, default_value = "root")]
        admin_user: String,

        /// Directory for the log file (defaults to the data directory)
        #[arg(short, long)]
        log_dir: Option<PathBuf>,
    },

    /// Resolve the bundled binaries and report their locations
    Check {
        /// Bundle root holding bin/ and data/ (overrides auto-detection)
        #[arg(short, long)]
        basedir: Option<PathBuf>,
    },
}
