// Unit tests for handle state that needs no live process
// Full start/stop cycles run in integration_tests/lifecycle.rs

use crate::supervisor::LocalServer;
use crate::tests::support::stub_bundle;

/// **VALUE**: Verifies a fresh handle reports the unstarted state.
///
/// **WHY THIS MATTERS**: Callers gate connection attempts on `is_running()`;
/// a fresh handle claiming to be running would send them to a port nothing
/// listens on.
///
/// **BUG THIS CATCHES**: Would catch lifecycle state being initialized as
/// anything but empty.
#[test]
fn given_fresh_handle_then_not_running_and_no_lifecycle_state() {
    // GIVEN: A freshly constructed handle
    let mut server = LocalServer::with_binary_root(stub_bundle().path()).expect("construct");

    // THEN: Unstarted
    assert!(!server.is_running());
    assert_eq!(server.port(), None);
    assert_eq!(server.data_dir(), None);
    assert_eq!(server.config_file(), None);
}

/// **VALUE**: Verifies `stop()` on a never-started handle is a silent no-op.
///
/// **WHY THIS MATTERS**: `stop()` is the unconditional cleanup path - callers
/// put it in teardown code that runs whether or not `start` ever succeeded.
/// It must never panic or signal anything.
///
/// **BUG THIS CATCHES**: Would catch the no-op guard being removed so stop
/// unwraps absent state.
#[test]
fn given_never_started_handle_when_stop_called_then_no_op() {
    // GIVEN: A never-started handle
    let mut server = LocalServer::with_binary_root(stub_bundle().path()).expect("construct");

    // WHEN: Stopping twice for good measure
    server.stop();
    server.stop();

    // THEN: Still cleanly unstarted
    assert!(!server.is_running());
    assert_eq!(server.port(), None);
}

/// **VALUE**: Verifies the handle renders through Debug.
///
/// **WHY THIS MATTERS**: Tests and callers format handles in assertion and
/// log messages (`{:?}` on a `Result<LocalServer, _>` is the common case);
/// losing the impl breaks compilation of that code.
///
/// **BUG THIS CATCHES**: Would catch the Debug derive being dropped from
/// `LocalServer` or the private `RunningServer` it contains.
#[test]
fn given_fresh_handle_when_debug_formatted_then_renders_state() {
    // GIVEN: A freshly constructed handle
    let server = LocalServer::with_binary_root(stub_bundle().path()).expect("construct");

    // WHEN: Formatting with Debug
    let rendered = format!("{server:?}");

    // THEN: Struct name and fields appear
    assert!(rendered.contains("LocalServer"));
    assert!(rendered.contains("admin_user"));
}

/// **VALUE**: Verifies the admin user default and override.
///
/// **WHY THIS MATTERS**: The admin user is used for the shutdown command and
/// reported to clients; default and override must both land.
///
/// **BUG THIS CATCHES**: Would catch `with_admin_user` failing to replace the
/// default, which would break shutdown for non-root deployments.
#[test]
fn given_admin_user_override_then_handle_reports_it() {
    // GIVEN: A handle with and without the override
    let bundle = stub_bundle();
    let default_server = LocalServer::with_binary_root(bundle.path()).expect("construct");
    let custom_server = LocalServer::with_binary_root(bundle.path())
        .expect("construct")
        .with_admin_user("admin");

    // THEN: Default is root, override sticks
    assert_eq!(default_server.admin_user(), "root");
    assert_eq!(custom_server.admin_user(), "admin");
}
