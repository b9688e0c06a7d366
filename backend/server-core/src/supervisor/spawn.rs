//! Construction and detached spawning of the server command.

use crate::binaries::BundledBinaries;
use crate::error::supervisor::SupervisorError;

use common::ErrorLocation;

use std::path::Path;
use std::process::{Child, Command, Stdio};

use log::debug;

pub(crate) const DEFAULTS_FILE_FLAG: &str = "--defaults-file=";
pub(crate) const BASEDIR_FLAG: &str = "--basedir=";
pub(crate) const DATADIR_FLAG: &str = "--datadir=";
pub(crate) const PORT_FLAG: &str = "--port=";
pub(crate) const CONSOLE_FLAG: &str = "--console";

/// DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP.
#[cfg(windows)]
const DETACH_CREATION_FLAGS: u32 = 0x0000_0008 | 0x0000_0200;

pub(crate) fn build_server_command(
    binaries: &BundledBinaries,
    config_file: &Path,
    data_dir: &Path,
    port: u16,
) -> Command {
    let mut cmd = Command::new(binaries.mysqld());
    cmd.arg(format!("{DEFAULTS_FILE_FLAG}{}", config_file.display()))
        .arg(format!("{BASEDIR_FLAG}{}", binaries.base_dir().display()))
        .arg(format!("{DATADIR_FLAG}{}", data_dir.display()))
        .arg(format!("{PORT_FLAG}{port}"))
        .arg(CONSOLE_FLAG)
        .current_dir(binaries.base_dir())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    detach(&mut cmd);
    cmd
}

/// Put the child in its own process group/session so it outlives the
/// caller's controlling terminal.
#[cfg(unix)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;

    cmd.process_group(0);
}

/// Put the child in its own process group/session so it outlives the
/// caller's controlling terminal.
#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;

    cmd.creation_flags(DETACH_CREATION_FLAGS);
}

/// Spawn the server executable as a detached background process with all
/// standard streams discarded.
#[track_caller]
pub(crate) fn spawn_server(
    binaries: &BundledBinaries,
    config_file: &Path,
    data_dir: &Path,
    port: u16,
) -> Result<Child, SupervisorError> {
    debug!("Spawning {} on port {port}", binaries.mysqld().display());

    build_server_command(binaries, config_file, data_dir, port)
        .spawn()
        .map_err(|e| SupervisorError::Spawn {
            message: format!("Failed to spawn {}: {e}", binaries.mysqld().display()),
            location: ErrorLocation::caller(),
            source: Box::new(e),
        })
}
