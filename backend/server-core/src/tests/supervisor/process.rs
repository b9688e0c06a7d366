// Unit tests for process helpers

use crate::supervisor::process::{is_alive, port_in_use};

use std::net::TcpListener;

/// **VALUE**: Verifies liveness is observed on a process that has not exited.
///
/// **WHY THIS MATTERS**: `is_alive` is the entire liveness predicate for the
/// startup poll and the stop escalation; if it misreads a live child,
/// `start` times out against healthy servers.
///
/// **BUG THIS CATCHES**: Would catch the try_wait result being interpreted
/// backwards (Some/None confusion).
#[cfg(unix)]
#[test]
fn given_sleeping_child_when_is_alive_called_then_true_until_exit() {
    use std::process::Command;

    // GIVEN: A child that sleeps briefly
    let mut child = Command::new("sleep").arg("5").spawn().expect("spawn sleep");

    // THEN: Alive while sleeping
    assert!(is_alive(&mut child));

    // WHEN: Killed and reaped
    child.kill().expect("kill");
    child.wait().expect("wait");

    // THEN: No longer alive
    assert!(!is_alive(&mut child));
}

/// **VALUE**: Verifies an exited child is detected and reaped.
///
/// **WHY THIS MATTERS**: The startup poll distinguishes "alive" from "exited
/// during startup"; a child that exits immediately must read as not alive so
/// `start` can fail with the exit status instead of succeeding.
///
/// **BUG THIS CATCHES**: Would catch is_alive returning true for zombies.
#[cfg(unix)]
#[test]
fn given_exited_child_when_is_alive_called_then_false() {
    use std::process::Command;

    // GIVEN: A child that exits immediately
    let mut child = Command::new("true").spawn().expect("spawn true");
    child.wait().expect("wait");

    // THEN: Not alive
    assert!(!is_alive(&mut child));
}

/// **VALUE**: Verifies the port-conflict scan sees a real listener.
///
/// **WHY THIS MATTERS**: The pre-start scan is what turns "server silently
/// fails to bind" into a named PortInUse error before anything is spawned.
///
/// **BUG THIS CATCHES**: Would catch the socket scan filtering out the
/// listen state or comparing against the wrong port field.
#[test]
fn given_bound_listener_when_port_in_use_called_then_true() {
    // GIVEN: A listener bound to an ephemeral port
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();

    // THEN: Reported as in use while the listener is held
    assert!(port_in_use(port));
}

/// **VALUE**: Verifies a free port is not reported as in use.
///
/// **WHY THIS MATTERS**: False positives here would make `start` refuse
/// perfectly usable ports and render the supervisor unusable.
///
/// **BUG THIS CATCHES**: Would catch the scan matching non-listen states
/// (TIME_WAIT and friends) or ignoring the port comparison entirely.
#[test]
fn given_free_port_when_port_in_use_called_then_false() {
    // GIVEN: An ephemeral port released immediately
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };

    // THEN: Not in use once the listener is dropped
    assert!(!port_in_use(port));
}
