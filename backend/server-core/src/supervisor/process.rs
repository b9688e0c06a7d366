//! Liveness polling, administrative shutdown, and termination.

use crate::error::supervisor::SupervisorError;

use common::ErrorLocation;

use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

use backoff::{ExponentialBackoff, backoff::Backoff};
use log::{debug, trace, warn};
use netstat2::{AddressFamilyFlags, ProtocolFlags, ProtocolSocketInfo, TcpState, get_sockets_info};
use sysinfo::{Pid, ProcessesToUpdate, Signal, System};

/// Interval between liveness samples during startup.
const STARTUP_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Ceiling on the startup liveness poll.
const STARTUP_POLL_CEILING: Duration = Duration::from_secs(5);
/// Bound on the administrative shutdown command.
const ADMIN_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(3);
/// Grace period for the server to exit after a termination request.
const TERMINATE_GRACE: Duration = Duration::from_secs(2);

pub(crate) const SHUTDOWN_COMMAND: &str = "shutdown";
pub(crate) const ADMIN_PORT_FLAG: &str = "--port=";
pub(crate) const ADMIN_USER_FLAG: &str = "--user=";

/// Whether the child has not exited. Reaps the exit status when it has.
pub(crate) fn is_alive(child: &mut Child) -> bool {
    matches!(child.try_wait(), Ok(None))
}

/// Poll the spawned server until it is observed alive.
///
/// Liveness is process-level only - the OS process has not exited. It is a
/// weak proxy for readiness and makes no protocol-level guarantee. A child
/// observed already exited fails immediately: it cannot come back, and the
/// exit status is worth more than idling out the ceiling.
#[track_caller]
pub(crate) fn wait_for_startup(child: &mut Child) -> Result<(), SupervisorError> {
    let deadline = Instant::now() + STARTUP_POLL_CEILING;

    while Instant::now() < deadline {
        sleep(STARTUP_POLL_INTERVAL);

        match child.try_wait() {
            Ok(None) => {
                trace!("Server process alive (PID: {})", child.id());
                return Ok(());
            }
            Ok(Some(status)) => {
                return Err(SupervisorError::StartTimeout {
                    message: format!("Server process exited during startup with {status}"),
                    location: ErrorLocation::caller(),
                });
            }
            Err(e) => {
                warn!("Failed to poll server process: {e}");
            }
        }
    }

    Err(SupervisorError::StartTimeout {
        message: format!("Server not observed alive within {STARTUP_POLL_CEILING:?}"),
        location: ErrorLocation::caller(),
    })
}

/// Issue the administrative shutdown command, bounded by a short timeout.
///
/// Best-effort: spawn failures, non-zero exits, and timeouts are all
/// swallowed with a warning. The caller escalates to process signals when
/// the server is still alive afterwards.
pub(crate) fn admin_shutdown(mysqladmin: &Path, port: u16, admin_user: &str) {
    debug!("Requesting administrative shutdown on port {port}");

    let spawned = Command::new(mysqladmin)
        .arg(format!("{ADMIN_PORT_FLAG}{port}"))
        .arg(format!("{ADMIN_USER_FLAG}{admin_user}"))
        .arg(SHUTDOWN_COMMAND)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let mut admin = match spawned {
        Ok(child) => child,
        Err(e) => {
            warn!("Failed to run administrative shutdown: {e}");
            return;
        }
    };

    let deadline = Instant::now() + ADMIN_SHUTDOWN_TIMEOUT;
    loop {
        match admin.try_wait() {
            Ok(Some(status)) => {
                debug!("Administrative shutdown finished with {status}");
                return;
            }
            Ok(None) if Instant::now() >= deadline => {
                warn!("Administrative shutdown timed out after {ADMIN_SHUTDOWN_TIMEOUT:?}");
                let _ = admin.kill();
                let _ = admin.wait();
                return;
            }
            Ok(None) => sleep(STARTUP_POLL_INTERVAL),
            Err(e) => {
                warn!("Failed to poll administrative shutdown: {e}");
                return;
            }
        }
    }
}

/// Terminate the supervised process: graceful signal first, force kill after
/// the grace period. The child is reaped on every path.
pub(crate) fn terminate(child: &mut Child) {
    let pid = child.id();

    if signal_term(pid) {
        let mut backoff = ExponentialBackoff {
            max_elapsed_time: Some(TERMINATE_GRACE),
            ..Default::default()
        };

        loop {
            if !is_alive(child) {
                debug!("Process {pid} exited after graceful termination");
                return;
            }

            match backoff.next_backoff() {
                Some(duration) => {
                    trace!("Process {pid} still alive, retrying after {duration:?}");
                    sleep(duration);
                }
                None => {
                    warn!("Process {pid} still running after {TERMINATE_GRACE:?}, force killing");
                    break;
                }
            }
        }
    } else {
        debug!("Graceful signal unavailable for PID {pid}, force killing");
    }

    if let Err(e) = child.kill() {
        warn!("Force kill of PID {pid} failed: {e}");
    }
    let _ = child.wait();
}

/// Send a graceful termination signal via the system process table.
///
/// Returns false when the process is already gone or the platform has no
/// graceful signal, in which case the caller force kills.
fn signal_term(pid: u32) -> bool {
    let mut sys = System::new_all();
    sys.refresh_processes(ProcessesToUpdate::All, true);

    match sys.process(Pid::from_u32(pid)) {
        Some(p) => {
            let sent = p.kill_with(Signal::Term).unwrap_or(false);
            debug!("Sent graceful termination to PID {pid}: success={sent}");
            sent
        }
        None => false,
    }
}

/// Whether some process already has a TCP listener on `port`.
///
/// A failed socket query is treated as "unknown" and does not block startup.
pub(crate) fn port_in_use(port: u16) -> bool {
    let sockets = match get_sockets_info(
        AddressFamilyFlags::IPV4 | AddressFamilyFlags::IPV6,
        ProtocolFlags::TCP,
    ) {
        Ok(sockets) => sockets,
        Err(e) => {
            warn!("Failed to query network sockets: {e}");
            return false;
        }
    };

    for s in sockets {
        if let ProtocolSocketInfo::Tcp(tcp) = s.protocol_socket_info
            && tcp.state == TcpState::Listen
            && tcp.local_port == port
        {
            debug!(
                "Port {port} already has a listener (PIDs: {:?})",
                s.associated_pids
            );
            return true;
        }
    }

    false
}
