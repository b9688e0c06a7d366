// Unit tests for server command construction
// The spawn itself is covered by integration_tests/lifecycle.rs against stub binaries

use crate::binaries::BundledBinaries;
use crate::supervisor::spawn::{
    BASEDIR_FLAG, CONSOLE_FLAG, DATADIR_FLAG, DEFAULTS_FILE_FLAG, PORT_FLAG, build_server_command,
};
use crate::tests::support::stub_bundle;

use std::path::Path;

/// **VALUE**: Verifies the command targets the resolved server executable.
///
/// **WHY THIS MATTERS**: If command construction drifts to a bare binary name,
/// spawning falls back to PATH lookup and may launch an unrelated system
/// MySQL instead of the bundled one.
///
/// **BUG THIS CATCHES**: Would catch the program being built from a name
/// rather than the absolute resolved path.
#[test]
fn given_bundle_when_building_command_then_program_is_resolved_mysqld() {
    // GIVEN: A resolved stub bundle
    let bundle = stub_bundle();
    let binaries = BundledBinaries::at(bundle.path()).expect("resolve");

    // WHEN: Building the command
    let cmd = build_server_command(
        &binaries,
        Path::new("/data/my.ini"),
        Path::new("/data"),
        3366,
    );

    // THEN: Program is the absolute mysqld path, cwd is the bundle root
    assert_eq!(cmd.get_program(), binaries.mysqld().as_os_str());
    assert_eq!(cmd.get_current_dir(), Some(binaries.base_dir()));
}

/// **VALUE**: Verifies every required argument reaches the command line.
///
/// **WHY THIS MATTERS**: The server binary is an external collaborator with a
/// fixed flag contract: config file, base dir, data dir, port, console mode.
/// A missing flag makes it boot with defaults against the wrong directories.
///
/// **BUG THIS CATCHES**: Would catch a flag constant being renamed or an
/// argument dropped during refactoring.
#[test]
fn given_inputs_when_building_command_then_passes_all_flags() {
    // GIVEN: A resolved stub bundle and distinctive inputs
    let bundle = stub_bundle();
    let binaries = BundledBinaries::at(bundle.path()).expect("resolve");

    // WHEN: Building the command
    let cmd = build_server_command(
        &binaries,
        Path::new("/data/my.ini"),
        Path::new("/data"),
        3366,
    );

    // THEN: All five arguments present with their values
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().to_string())
        .collect();

    assert!(args.contains(&format!("{DEFAULTS_FILE_FLAG}/data/my.ini")));
    assert!(args.iter().any(|a| a.starts_with(BASEDIR_FLAG)));
    assert!(args.contains(&format!("{DATADIR_FLAG}/data")));
    assert!(args.contains(&format!("{PORT_FLAG}3366")));
    assert!(args.contains(&CONSOLE_FLAG.to_string()));
}
