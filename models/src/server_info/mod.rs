pub mod builder;

use serde::Serialize;
use std::path::PathBuf;

/// A supervised database server that has been started and is believed to be running.
///
/// Instances are produced by [`builder::ServerInfoBuilder`] so that every
/// ServerInfo in the system has passed validation. Clients connect using
/// `connection_url` with `admin_user` and an empty password (the bundled
/// distribution ships with a passwordless administrative account).
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// OS process ID of the server binary.
    pub pid: u32,
    /// TCP port the server listens on.
    pub port: u16,
    /// Connection URL, e.g. `mysql://127.0.0.1:3366`.
    pub connection_url: String,
    /// Absolute path of the mutable data directory.
    pub data_dir: PathBuf,
    /// Absolute path of the generated (or caller-provided) configuration file.
    pub config_file: PathBuf,
    /// Administrative user, used both for client connections and shutdown.
    pub admin_user: String,
    /// Whether this process is owned by the handle that reported it.
    pub owned: bool,
}
