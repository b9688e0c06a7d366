//! Lifecycle supervision of the bundled server process.
//!
//! A [`LocalServer`] owns at most one supervised OS process and moves through
//! a three-state lifecycle: unstarted, running, stopped. `start` and `stop`
//! are synchronous and must be serialized by the caller on a given handle;
//! independent handles on disjoint ports and data directories are safe to
//! run concurrently.

pub mod process;
pub mod spawn;

use crate::binaries::BundledBinaries;
use crate::config::ensure_my_ini;
use crate::data_dir::{ensure_data_dir, seed_data_dir};
use crate::error::binaries::BinariesError;
use crate::error::supervisor::SupervisorError;
use crate::{DEFAULT_ADMIN_USER, SERVER_BASE_URL};

use common::ErrorLocation;

use models::{ModelError, ServerInfo, ServerInfoBuilder};

use std::path::{Path, PathBuf};
use std::process::Child;

use log::{debug, info, warn};

/// Handle owning at most one supervised server process.
#[derive(Debug)]
pub struct LocalServer {
    binaries: BundledBinaries,
    admin_user: String,
    running: Option<RunningServer>,
}

/// Lifecycle state held only between a successful `start` and the next `stop`.
#[derive(Debug)]
struct RunningServer {
    child: Child,
    port: u16,
    data_dir: PathBuf,
    config_file: PathBuf,
}

impl LocalServer {
    /// Create a handle using the default binary resolution order.
    ///
    /// # Errors
    ///
    /// Fails fast with [`BinariesError`] when the bundled executables cannot
    /// be located - a handle without binaries is useless.
    #[track_caller]
    pub fn new() -> Result<Self, BinariesError> {
        Ok(Self::from_binaries(BundledBinaries::resolve()?))
    }

    /// Create a handle over an explicit bundle location.
    ///
    /// # Errors
    ///
    /// Returns [`BinariesError::MissingBinary`] if either executable is
    /// absent under `<base_dir>/bin`.
    #[track_caller]
    pub fn with_binary_root(base_dir: impl Into<PathBuf>) -> Result<Self, BinariesError> {
        Ok(Self::from_binaries(BundledBinaries::at(base_dir)?))
    }

    fn from_binaries(binaries: BundledBinaries) -> Self {
        Self {
            binaries,
            admin_user: DEFAULT_ADMIN_USER.to_string(),
            running: None,
        }
    }

    /// Override the administrative user.
    ///
    /// The same user is passed to the shutdown command and reported in
    /// [`ServerInfo::admin_user`], so shutdown and client configuration
    /// cannot diverge.
    pub fn with_admin_user(mut self, user: impl Into<String>) -> Self {
        self.admin_user = user.into();
        self
    }

    /// The resolved bundle this handle supervises from.
    pub fn binaries(&self) -> &BundledBinaries {
        &self.binaries
    }

    /// Administrative user used for shutdown and reported to clients.
    pub fn admin_user(&self) -> &str {
        &self.admin_user
    }

    /// Port of the tracked server, while one is tracked.
    pub fn port(&self) -> Option<u16> {
        self.running.as_ref().map(|running| running.port)
    }

    /// Data directory of the tracked server, while one is tracked.
    pub fn data_dir(&self) -> Option<&Path> {
        self.running.as_ref().map(|running| running.data_dir.as_path())
    }

    /// Configuration file of the tracked server, while one is tracked.
    pub fn config_file(&self) -> Option<&Path> {
        self.running
            .as_ref()
            .map(|running| running.config_file.as_path())
    }

    /// Whether a supervised process is tracked and has not exited.
    pub fn is_running(&mut self) -> bool {
        match self.running.as_mut() {
            Some(running) => process::is_alive(&mut running.child),
            None => false,
        }
    }

    /// Start the server on `port` against `data_dir`.
    ///
    /// Creates the data directory if needed, seeds it from the bundled
    /// templates on first use, renders `my.ini` once, spawns the server
    /// detached from the caller's process group with all stdio discarded,
    /// and polls until the process is observed alive.
    ///
    /// Success means the OS process launched; it is not a protocol-level
    /// readiness guarantee, and a client connecting immediately may still
    /// be refused for a moment.
    ///
    /// There is no rollback on failure: a seeded directory and generated
    /// configuration are left in place and reused on the next attempt.
    ///
    /// # Errors
    ///
    /// * [`SupervisorError::AlreadyRunning`] - this handle already tracks a process
    /// * [`SupervisorError::Validation`] - `port` is zero or the admin user is blank
    /// * [`SupervisorError::PortInUse`] - another process listens on `port`
    /// * [`SupervisorError::DataDir`] - the data directory cannot be prepared
    /// * [`SupervisorError::Spawn`] - the server executable failed to launch
    /// * [`SupervisorError::StartTimeout`] - the process was never observed alive
    #[track_caller]
    pub fn start(
        &mut self,
        port: u16,
        data_dir: impl AsRef<Path>,
    ) -> Result<ServerInfo, SupervisorError> {
        if self.is_running() {
            return Err(SupervisorError::AlreadyRunning {
                message: format!(
                    "Server already running on port {}; stop it first",
                    self.port().unwrap_or_default()
                ),
                location: ErrorLocation::caller(),
            });
        }

        // Reject inputs the ServerInfo builder would refuse after the spawn.
        // Catching them here keeps every failure path process-free.
        if port == 0 {
            return Err(ModelError::validation("Port must be non-zero").into());
        }
        if self.admin_user.is_empty() {
            return Err(ModelError::validation("Admin user cannot be empty").into());
        }

        if process::port_in_use(port) {
            return Err(SupervisorError::PortInUse {
                port,
                location: ErrorLocation::caller(),
            });
        }

        let data_dir = ensure_data_dir(data_dir.as_ref())?;
        seed_data_dir(&data_dir, &self.binaries.data_template_dir())?;
        let config_file = ensure_my_ini(
            &data_dir,
            port,
            self.binaries.base_dir(),
            &self.admin_user,
        )?;

        let mut child = spawn::spawn_server(&self.binaries, &config_file, &data_dir, port)?;

        // On failure nothing is left tracked; the child has already exited
        // and been reaped by the poll.
        process::wait_for_startup(&mut child)?;

        let pid = child.id();
        info!("Server running on port {port} (PID: {pid})");

        let built = ServerInfoBuilder::default()
            .with_pid(pid)
            .with_port(port)
            .with_connection_url(format!("{SERVER_BASE_URL}:{port}"))
            .with_data_dir(&data_dir)
            .with_config_file(&config_file)
            .with_admin_user(&self.admin_user)
            .with_owned(true)
            .build();

        // The early validation makes a builder rejection unreachable, but a
        // spawned server must never outlive a failed start: reported errors
        // and tracked state have to agree.
        let server_info = match built {
            Ok(info) => info,
            Err(e) => {
                warn!("Discarding spawned server (PID: {pid}): {e}");
                process::terminate(&mut child);
                return Err(e.into());
            }
        };

        self.running = Some(RunningServer {
            child,
            port,
            data_dir,
            config_file,
        });

        Ok(server_info)
    }

    /// Stop the supervised server. Best-effort: never fails.
    ///
    /// Issues an administrative shutdown bounded by a short timeout, then
    /// escalates to graceful and finally forced termination of the OS
    /// process. All lifecycle state is cleared regardless of outcome, so a
    /// subsequent `start` can reuse the handle. A no-op when nothing is
    /// tracked.
    pub fn stop(&mut self) {
        let Some(mut running) = self.running.take() else {
            debug!("stop() with no tracked server; nothing to do");
            return;
        };

        if process::is_alive(&mut running.child) {
            process::admin_shutdown(self.binaries.mysqladmin(), running.port, &self.admin_user);
        }

        if process::is_alive(&mut running.child) {
            process::terminate(&mut running.child);
        }

        info!(
            "Server on port {} stopped; data directory {} retained",
            running.port,
            running.data_dir.display()
        );
    }
}

impl Drop for LocalServer {
    fn drop(&mut self) {
        if self.running.is_some() {
            warn!("LocalServer dropped while running; stopping");
            self.stop();
        }
    }
}
