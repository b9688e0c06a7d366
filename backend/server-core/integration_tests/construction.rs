use crate::helpers::{SLEEPING_SERVER, stub_bundle};

use server_core::binaries::BundledBinaries;
use server_core::error::binaries::BinariesError;
use server_core::supervisor::LocalServer;
use server_core::{BASEDIR_ENV, BIN_SUBDIR, MYSQLD_BINARY};

use std::env::{remove_var, set_var};
use std::fs::remove_file;

use serial_test::serial;

// ============================================================================
// Public API tests for handle construction and binary resolution
// These test the PUBLIC interface from an external consumer's perspective
// ============================================================================

/// **VALUE**: Verifies construction fails with MissingBinary before any other action.
///
/// **WHY THIS MATTERS**: The contract is fail-fast: a caller without the
/// bundled executables must find out at construction, not after `start` has
/// created directories and written configuration.
///
/// **BUG THIS CATCHES**: Would catch binary validation being deferred from
/// the constructor into `start()`.
#[test]
fn given_bundle_without_server_binary_when_constructing_then_missing_binary_error() {
    // GIVEN: A bundle whose server executable was removed
    let bundle = stub_bundle(SLEEPING_SERVER);
    remove_file(bundle.path().join(BIN_SUBDIR).join(MYSQLD_BINARY)).expect("remove mysqld");

    // WHEN: Constructing a handle over it
    let result = LocalServer::with_binary_root(bundle.path());

    // THEN: MissingBinary naming the absent executable
    match result {
        Err(BinariesError::MissingBinary { path, .. }) => {
            assert!(path.ends_with(MYSQLD_BINARY));
        }
        other => panic!("expected MissingBinary, got {other:?}"),
    }
}

/// **VALUE**: Verifies the environment variable participates in default resolution.
///
/// **WHY THIS MATTERS**: The env override is the documented way to point an
/// installed package at an out-of-tree distribution; without it, `new()` is
/// untestable and undeployable outside the packaged layout.
///
/// **BUG THIS CATCHES**: Would catch the resolution order dropping the env
/// var or reading the wrong variable name.
#[test]
#[serial]
fn given_basedir_env_var_when_constructing_with_new_then_uses_that_bundle() {
    // GIVEN: The env var pointing at a stub bundle
    let bundle = stub_bundle(SLEEPING_SERVER);
    unsafe { set_var(BASEDIR_ENV, bundle.path()) };

    // WHEN: Constructing with default resolution
    let result = LocalServer::new();

    unsafe { remove_var(BASEDIR_ENV) };

    // THEN: Resolution lands on the env-provided bundle
    let server = result.expect("env-resolved construction");
    assert_eq!(server.binaries().base_dir(), bundle.path());
}

/// **VALUE**: Verifies an env var pointing at garbage still fails fast.
///
/// **WHY THIS MATTERS**: A stale env var must produce the named MissingBinary
/// failure, not fall through to some other bundle the operator did not
/// intend.
///
/// **BUG THIS CATCHES**: Would catch the resolution order treating an unusable
/// override as "try the next candidate", masking configuration mistakes.
#[test]
#[serial]
fn given_basedir_env_var_at_empty_dir_when_constructing_then_missing_binary_error() {
    // GIVEN: The env var pointing at an empty directory
    let empty = tempfile::TempDir::new().expect("create temp dir");
    unsafe { set_var(BASEDIR_ENV, empty.path()) };

    // WHEN: Constructing with default resolution
    let result = BundledBinaries::resolve();

    unsafe { remove_var(BASEDIR_ENV) };

    // THEN: MissingBinary, not a fallback
    assert!(matches!(result, Err(BinariesError::MissingBinary { .. })));
}
