use crate::{ModelError, ServerInfoBuilder};

fn complete_builder() -> ServerInfoBuilder {
    ServerInfoBuilder::default()
        .with_pid(12345)
        .with_port(3366)
        .with_connection_url("mysql://127.0.0.1:3366")
        .with_data_dir("/tmp/mysql-data")
        .with_config_file("/tmp/mysql-data/my.ini")
        .with_admin_user("root")
        .with_owned(true)
}

/// **VALUE**: Verifies that a fully populated builder produces a ServerInfo.
///
/// **WHY THIS MATTERS**: The builder is the only way to construct ServerInfo.
/// If the happy path breaks, every successful `start()` fails even though the
/// server process launched fine.
///
/// **BUG THIS CATCHES**: Would catch a validation rule accidentally tightened
/// to reject legitimate values (e.g. rejecting all relative paths or all
/// non-default users).
#[test]
fn given_complete_builder_when_building_then_returns_server_info() {
    // GIVEN: A builder with every field populated
    let builder = complete_builder();

    // WHEN: Building
    let result = builder.build();

    // THEN: Should produce a ServerInfo with the given values
    let info = result.expect("complete builder should validate");
    assert_eq!(info.pid, 12345);
    assert_eq!(info.port, 3366);
    assert_eq!(info.connection_url, "mysql://127.0.0.1:3366");
    assert_eq!(info.admin_user, "root");
    assert!(info.owned);
}

/// **VALUE**: Verifies that builder validation rejects zero PIDs.
///
/// **WHY THIS MATTERS**: PID 0 is an invalid process ID on all platforms.
/// Allowing it would break process tracking and shutdown throughout the system.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - Validation logic is accidentally removed or bypassed
/// - PID zero check is deleted during refactoring
/// - Builder allows invalid ServerInfo instances to be created
#[test]
fn given_zero_pid_when_building_server_info_then_returns_validation_error() {
    // GIVEN: Builder with PID set to zero
    let builder = complete_builder().with_pid(0);

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    assert!(result.is_err());
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "PID must be non-zero");
        }
    }
}

/// **VALUE**: Verifies that builder validation rejects missing PID.
///
/// **WHY THIS MATTERS**: Every ServerInfo must have a PID so `stop()` knows
/// which process to terminate. Missing PIDs would make cleanup impossible.
///
/// **BUG THIS CATCHES**: Would catch if required-field validation is removed
/// and the builder allows incomplete construction.
#[test]
fn given_missing_pid_when_building_then_returns_validation_error() {
    // GIVEN: Builder without PID
    let builder = ServerInfoBuilder::default()
        .with_port(3366)
        .with_connection_url("mysql://127.0.0.1:3366")
        .with_data_dir("/tmp/mysql-data")
        .with_config_file("/tmp/mysql-data/my.ini")
        .with_admin_user("root")
        .with_owned(true);

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    assert!(result.is_err());
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "PID is required");
        }
    }
}

/// **VALUE**: Verifies that builder validation rejects port zero.
///
/// **WHY THIS MATTERS**: The supervised server is always started on an
/// explicit caller-chosen port; port 0 here would mean state corruption
/// between spawn and ServerInfo construction.
///
/// **BUG THIS CATCHES**: Would catch the port validation being deleted, which
/// would let a bogus ServerInfo leak to clients that then fail to connect.
#[test]
fn given_zero_port_when_building_then_returns_validation_error() {
    // GIVEN: Builder with port zero
    let builder = complete_builder().with_port(0);

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    assert!(result.is_err());
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Port must be non-zero");
        }
    }
}

/// **VALUE**: Verifies that builder validation rejects non-mysql URL schemes.
///
/// **WHY THIS MATTERS**: Callers feed `connection_url` straight into MySQL
/// client libraries. A URL with any other scheme fails at connect time with a
/// confusing driver error instead of failing here with a clear one.
///
/// **BUG THIS CATCHES**: Would catch scheme checking being removed or the
/// expected scheme silently changing.
#[test]
fn given_invalid_url_scheme_when_building_then_returns_validation_error() {
    // GIVEN: Builder with a non-mysql URL
    let builder = complete_builder().with_connection_url("http://127.0.0.1:3366");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error with the URL in the message
    assert!(result.is_err());
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert!(message.starts_with("Invalid connection URL format:"));
            assert!(message.contains("http://"));
        }
    }
}

/// **VALUE**: Verifies that builder validation rejects an empty admin user.
///
/// **WHY THIS MATTERS**: The admin user is passed to the shutdown command and
/// reported to clients. An empty user means `stop()` would issue a shutdown
/// with no credential and silently fail every time.
///
/// **BUG THIS CATCHES**: Would catch the empty-string check being dropped
/// when the admin-user plumbing is refactored.
#[test]
fn given_empty_admin_user_when_building_then_returns_validation_error() {
    // GIVEN: Builder with empty admin user
    let builder = complete_builder().with_admin_user("");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    assert!(result.is_err());
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Admin user cannot be empty");
        }
    }
}

/// **VALUE**: Verifies that builder validation rejects an empty data directory.
///
/// **WHY THIS MATTERS**: `data_dir` is the anchor for config, seed data, and
/// persistence; an empty path would send later filesystem operations to the
/// process working directory.
///
/// **BUG THIS CATCHES**: Would catch the empty-path check being lost when the
/// path fields are reworked.
#[test]
fn given_empty_data_dir_when_building_then_returns_validation_error() {
    // GIVEN: Builder with empty data dir
    let builder = complete_builder().with_data_dir("");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    assert!(result.is_err());
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Data directory cannot be empty");
        }
    }
}
