use crate::helpers::{SLEEPING_SERVER, free_port, stub_bundle};

use server_core::error::supervisor::SupervisorError;
use server_core::supervisor::LocalServer;
use server_core::{CONFIG_FILE_NAME, SEED_SUBDIRS, SERVER_HOSTNAME};

use std::fs::{read_to_string, write};

use tempfile::TempDir;

// ============================================================================
// Full lifecycle tests against stub executables
// The server stub sleeps until terminated; the admin stub exits quietly, so
// stop() exercises the signal escalation path every time.
// ============================================================================

/// **VALUE**: Verifies the whole first-start path: create, seed, configure, spawn, poll.
///
/// **WHY THIS MATTERS**: This is the scenario every consumer hits first. If any
/// step silently fails (missing seed tree, no config, dead process), callers
/// get a connection refused with no indication of which layer broke.
///
/// **BUG THIS CATCHES**: Would catch ordering regressions in `start()` - for
/// example spawning before the config exists, or reporting success while the
/// process is already gone.
#[test]
fn given_fresh_data_dir_when_started_then_seeded_configured_and_running() {
    // GIVEN: A stub bundle and a data dir that does not exist yet
    let bundle = stub_bundle(SLEEPING_SERVER);
    let scratch = TempDir::new().expect("create temp dir");
    let data_path = scratch.path().join("data");
    let port = free_port();

    let mut server = LocalServer::with_binary_root(bundle.path()).expect("construct");

    // WHEN: Starting
    let info = server.start(port, &data_path).expect("start");

    // THEN: Running with full lifecycle state, data dir seeded and configured
    assert!(server.is_running());
    assert_eq!(server.port(), Some(port));
    assert_eq!(info.port, port);
    assert!(info.owned);
    assert!(info.pid > 0);
    assert_eq!(
        info.connection_url,
        format!("mysql://{SERVER_HOSTNAME}:{port}")
    );
    assert_eq!(info.admin_user, "root");

    assert!(info.config_file.is_file());
    assert!(info.config_file.ends_with(CONFIG_FILE_NAME));
    for seed in SEED_SUBDIRS {
        assert!(
            info.data_dir.join(seed).join("db.opt").is_file(),
            "seed {seed} should be copied"
        );
    }

    server.stop();
    assert!(!server.is_running());
}

/// **VALUE**: Verifies stop() clears state and the same handle can start again.
///
/// **WHY THIS MATTERS**: The handle is documented as reusable across
/// sequential start/stop cycles; leaked state from a previous run would make
/// the second start fail as AlreadyRunning or track a dead process.
///
/// **BUG THIS CATCHES**: Would catch `stop()` clearing only part of the
/// lifecycle state (port but not the process handle, or vice versa).
#[test]
fn given_stopped_handle_when_started_again_then_runs() {
    // GIVEN: A handle that has completed one start/stop cycle
    let bundle = stub_bundle(SLEEPING_SERVER);
    let scratch = TempDir::new().expect("create temp dir");
    let data_path = scratch.path().join("data");
    let port = free_port();

    let mut server = LocalServer::with_binary_root(bundle.path()).expect("construct");
    server.start(port, &data_path).expect("first start");
    server.stop();

    assert_eq!(server.port(), None);
    assert_eq!(server.data_dir(), None);

    // WHEN: Starting the same handle again
    let info = server.start(port, &data_path).expect("second start");

    // THEN: Running again on the same port
    assert!(server.is_running());
    assert_eq!(info.port, port);

    server.stop();
}

/// **VALUE**: Verifies restart over the same data dir re-copies and rewrites nothing.
///
/// **WHY THIS MATTERS**: This is the persistence contract: databases created
/// in the first run live inside the seeded trees, and the config may carry
/// caller tuning. A restart that re-seeds or re-renders destroys both.
///
/// **BUG THIS CATCHES**: Would catch the presence checks being bypassed when
/// a second, independent handle starts against an existing data dir - the
/// sentinel would vanish and the config bytes would differ.
#[test]
fn given_existing_data_dir_when_restarted_with_new_handle_then_nothing_recopied() {
    // GIVEN: A data dir populated by a first handle, with state accumulated
    let bundle = stub_bundle(SLEEPING_SERVER);
    let scratch = TempDir::new().expect("create temp dir");
    let data_path = scratch.path().join("data");
    let port = free_port();

    let mut first = LocalServer::with_binary_root(bundle.path()).expect("construct first");
    let first_info = first.start(port, &data_path).expect("first start");
    first.stop();

    let config_bytes = read_to_string(&first_info.config_file).expect("read config");
    let sentinel = first_info.data_dir.join(SEED_SUBDIRS[0]).join("topics.MYD");
    write(&sentinel, "4 rows").expect("write sentinel");

    // WHEN: A fresh handle starts against the same data dir (a restart)
    let mut second = LocalServer::with_binary_root(bundle.path()).expect("construct second");
    let second_info = second.start(port, &data_path).expect("second start");

    // THEN: Config is byte-identical and accumulated state survived
    assert_eq!(
        read_to_string(&second_info.config_file).expect("read config again"),
        config_bytes
    );
    assert_eq!(read_to_string(&sentinel).expect("sentinel"), "4 rows");

    second.stop();
}

/// **VALUE**: Verifies start() refuses to double-start a running handle.
///
/// **WHY THIS MATTERS**: A second spawn would orphan the first process - the
/// handle owns exactly one child, so the first would become unstoppable.
///
/// **BUG THIS CATCHES**: Would catch the running-state guard being dropped
/// from the top of `start()`.
#[test]
fn given_running_handle_when_started_again_then_already_running_error() {
    // GIVEN: A running handle
    let bundle = stub_bundle(SLEEPING_SERVER);
    let scratch = TempDir::new().expect("create temp dir");
    let port = free_port();

    let mut server = LocalServer::with_binary_root(bundle.path()).expect("construct");
    server
        .start(port, scratch.path().join("data"))
        .expect("start");

    // WHEN: Starting again without stopping
    let result = server.start(free_port(), scratch.path().join("other"));

    // THEN: AlreadyRunning, and the original process is still tracked
    assert!(matches!(
        result,
        Err(SupervisorError::AlreadyRunning { .. })
    ));
    assert!(server.is_running());
    assert_eq!(server.port(), Some(port));

    server.stop();
}

/// **VALUE**: Verifies dropping a running handle releases the process.
///
/// **WHY THIS MATTERS**: Panics and early returns in caller code drop the
/// handle without a `stop()`. The scoped-ownership contract says the
/// supervised process must still be released, not leaked until reboot.
///
/// **BUG THIS CATCHES**: Would catch the Drop impl being removed or failing
/// to route through the same termination path as `stop()`.
#[test]
fn given_running_handle_when_dropped_then_process_released() {
    // GIVEN: A running handle
    let bundle = stub_bundle(SLEEPING_SERVER);
    let scratch = TempDir::new().expect("create temp dir");
    let port = free_port();

    let pid = {
        let mut server = LocalServer::with_binary_root(bundle.path()).expect("construct");
        let info = server
            .start(port, scratch.path().join("data"))
            .expect("start");
        info.pid
        // WHEN: The handle goes out of scope while running
    };

    // THEN: The process is gone (Drop ran stop(), which reaps the child)
    #[cfg(target_os = "linux")]
    assert!(
        !std::path::Path::new(&format!("/proc/{pid}")).exists(),
        "PID {pid} should be terminated on drop"
    );
    #[cfg(not(target_os = "linux"))]
    let _ = pid;
}
