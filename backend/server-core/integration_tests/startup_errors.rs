use crate::helpers::{CRASHING_SERVER, SLEEPING_SERVER, free_port, occupied_port, stub_bundle};

use server_core::CONFIG_FILE_NAME;
use server_core::error::supervisor::SupervisorError;
use server_core::supervisor::LocalServer;

use tempfile::TempDir;

// ============================================================================
// start() failure scenarios
// ============================================================================

/// **VALUE**: Verifies a server that dies during startup yields StartTimeout with nothing tracked.
///
/// **WHY THIS MATTERS**: A misconfigured or broken server binary exits right
/// after spawn. `start` must report the named failure and leave the handle
/// clean enough to try again - not claim success or track a corpse.
///
/// **BUG THIS CATCHES**: Would catch the liveness poll misreading an exited
/// child as alive, or failure paths leaving `running` populated so the next
/// start reports AlreadyRunning forever.
#[test]
fn given_crashing_server_when_started_then_start_timeout_and_nothing_tracked() {
    // GIVEN: A bundle whose server exits immediately
    let bundle = stub_bundle(CRASHING_SERVER);
    let scratch = TempDir::new().expect("create temp dir");
    let data_path = scratch.path().join("data");

    let mut server = LocalServer::with_binary_root(bundle.path()).expect("construct");

    // WHEN: Starting
    let result = server.start(free_port(), &data_path);

    // THEN: StartTimeout, no process tracked
    assert!(matches!(result, Err(SupervisorError::StartTimeout { .. })));
    assert!(!server.is_running());
    assert_eq!(server.port(), None);

    // stop() after the failure stays a no-op
    server.stop();
}

/// **VALUE**: Verifies a failed start leaves the prepared directory for the next attempt.
///
/// **WHY THIS MATTERS**: There is deliberately no rollback: seeding and the
/// generated config are valid work product, and the documented behavior is
/// that a retry reuses them instead of re-doing (or worse, re-clobbering)
/// the directory.
///
/// **BUG THIS CATCHES**: Would catch cleanup code being added to the failure
/// path that deletes the data directory, breaking the retry contract.
#[test]
fn given_failed_start_when_retried_with_working_server_then_reuses_prepared_dir() {
    // GIVEN: A data dir prepared by a failed start
    let crashing = stub_bundle(CRASHING_SERVER);
    let scratch = TempDir::new().expect("create temp dir");
    let data_path = scratch.path().join("data");
    let port = free_port();

    let mut broken = LocalServer::with_binary_root(crashing.path()).expect("construct broken");
    broken
        .start(port, &data_path)
        .expect_err("crashing server should not start");

    let config = data_path.join(CONFIG_FILE_NAME);
    assert!(config.is_file(), "failed start should leave config behind");
    let config_bytes = std::fs::read_to_string(&config).expect("read config");

    // WHEN: Retrying against the same data dir with a working bundle
    let working = stub_bundle(SLEEPING_SERVER);
    let mut server = LocalServer::with_binary_root(working.path()).expect("construct working");
    server.start(port, &data_path).expect("retry start");

    // THEN: The earlier config was reused untouched
    assert_eq!(
        std::fs::read_to_string(&config).expect("read config again"),
        config_bytes
    );

    server.stop();
}

/// **VALUE**: Verifies a blank admin user is rejected before anything is spawned.
///
/// **WHY THIS MATTERS**: `with_admin_user` accepts any string, and the
/// builder only rejects a blank one after the server is already up. Failing
/// at that point would leave a detached process running while the handle
/// reports not-running - an orphan holding the port with nothing left able
/// to stop it.
///
/// **BUG THIS CATCHES**: Would catch the pre-spawn input validation being
/// removed, reintroducing the untracked-process leak on the builder-error
/// path.
#[test]
fn given_blank_admin_user_when_started_then_validation_error_and_no_side_effects() {
    // GIVEN: A handle with a blank admin user
    let bundle = stub_bundle(SLEEPING_SERVER);
    let scratch = TempDir::new().expect("create temp dir");
    let data_path = scratch.path().join("data");

    let mut server = LocalServer::with_binary_root(bundle.path())
        .expect("construct")
        .with_admin_user("");

    // WHEN: Starting
    let result = server.start(free_port(), &data_path);

    // THEN: Validation error before any directory or process action
    assert!(matches!(result, Err(SupervisorError::Validation(_))));
    assert!(!data_path.exists(), "no directory work before validation");
    assert!(!server.is_running());
}

/// **VALUE**: Verifies port zero is rejected before anything is spawned.
///
/// **WHY THIS MATTERS**: Port 0 would reach the server binary as "pick an
/// ephemeral port", diverging from the port in the config and the one
/// reported to clients. Like the blank admin user, the builder would only
/// catch it after the spawn.
///
/// **BUG THIS CATCHES**: Would catch the zero-port guard being dropped so a
/// spawned server leaks when ServerInfo construction fails.
#[test]
fn given_port_zero_when_started_then_validation_error_and_no_side_effects() {
    // GIVEN: A handle and the reserved port 0
    let bundle = stub_bundle(SLEEPING_SERVER);
    let scratch = TempDir::new().expect("create temp dir");
    let data_path = scratch.path().join("data");

    let mut server = LocalServer::with_binary_root(bundle.path()).expect("construct");

    // WHEN: Starting on port 0
    let result = server.start(0, &data_path);

    // THEN: Validation error before any directory or process action
    assert!(matches!(result, Err(SupervisorError::Validation(_))));
    assert!(!data_path.exists(), "no directory work before validation");
    assert!(!server.is_running());
}

/// **VALUE**: Verifies the port-conflict preflight fires before any filesystem work.
///
/// **WHY THIS MATTERS**: Starting against an occupied port would otherwise
/// spawn a server that fails to bind and exits, reporting an opaque
/// StartTimeout. The preflight names the real problem - and must not leave
/// half-prepared directories behind for a start that never had a chance.
///
/// **BUG THIS CATCHES**: Would catch the preflight being reordered after
/// directory preparation, or removed entirely.
#[test]
fn given_occupied_port_when_started_then_port_in_use_and_no_directory_created() {
    // GIVEN: A port with a live listener
    let bundle = stub_bundle(SLEEPING_SERVER);
    let scratch = TempDir::new().expect("create temp dir");
    let data_path = scratch.path().join("data");
    let (_listener, port) = occupied_port();

    let mut server = LocalServer::with_binary_root(bundle.path()).expect("construct");

    // WHEN: Starting on the occupied port
    let result = server.start(port, &data_path);

    // THEN: PortInUse naming the port, and the data dir was never created
    match result {
        Err(SupervisorError::PortInUse { port: reported, .. }) => assert_eq!(reported, port),
        other => panic!("expected PortInUse, got {other:?}"),
    }
    assert!(!data_path.exists());
    assert!(!server.is_running());
}
