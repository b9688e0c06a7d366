//! Process supervision for a bundled MySQL 5.5 server.
//!
//! This crate manages exactly one OS process and one configuration file: it
//! resolves the bundled server and admin executables, seeds a writable data
//! directory from bundled templates on first use, renders a `my.ini` once,
//! spawns the server detached, and later shuts it down with a forced-kill
//! fallback. Everything behind the TCP port - SQL, storage, wire protocol -
//! belongs to the server binary and whatever client the caller connects with.

pub mod binaries;
pub mod config;
pub mod data_dir;
pub mod error;
pub mod supervisor;

#[cfg(test)]
mod tests;

/// File name of the bundled server executable.
#[cfg(windows)]
pub const MYSQLD_BINARY: &str = "mysqld.exe";
/// File name of the bundled server executable.
#[cfg(not(windows))]
pub const MYSQLD_BINARY: &str = "mysqld";

/// File name of the bundled admin/control executable.
#[cfg(windows)]
pub const MYSQLADMIN_BINARY: &str = "mysqladmin.exe";
/// File name of the bundled admin/control executable.
#[cfg(not(windows))]
pub const MYSQLADMIN_BINARY: &str = "mysqladmin";

pub const SERVER_HOSTNAME: &str = "127.0.0.1";
pub const SERVER_BASE_URL: &str = const_format::concatcp!("mysql://", SERVER_HOSTNAME);

/// Directory bundled alongside the package holding the server distribution.
pub const BUNDLED_DIR_NAME: &str = "mysql55_files";
/// Subdirectory of the bundle holding the executables.
pub const BIN_SUBDIR: &str = "bin";
/// Subdirectory of the bundle holding template data for fresh data directories.
pub const DATA_TEMPLATE_SUBDIR: &str = "data";
/// Seed subdirectories a fresh data directory needs before the server can boot.
pub const SEED_SUBDIRS: [&str; 2] = ["mysql", "performance_schema"];
/// Name of the generated configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "my.ini";
/// Default administrative user of the bundled distribution (empty password).
pub const DEFAULT_ADMIN_USER: &str = "root";
/// Environment variable overriding the bundled-binaries location.
pub const BASEDIR_ENV: &str = "MYSQL_LOCAL_BASEDIR";
/// Application directory name used for the user-local bundle fallback.
pub const APP_DIR_NAME: &str = "mysql-local";
