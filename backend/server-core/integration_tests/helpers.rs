// Shared scaffolding: fake bundled distributions whose executables are
// small shell scripts, so full lifecycle tests run without the real server.

use server_core::{
    BIN_SUBDIR, DATA_TEMPLATE_SUBDIR, MYSQLADMIN_BINARY, MYSQLD_BINARY, SEED_SUBDIRS,
};

use std::fs::{create_dir_all, write};
use std::net::TcpListener;
use std::path::Path;

use tempfile::TempDir;

/// Server stub that stays up until terminated.
pub const SLEEPING_SERVER: &str = "#!/bin/sh\nexec sleep 30\n";

/// Server stub that dies immediately, as a misconfigured server would.
#[cfg(unix)]
pub const CRASHING_SERVER: &str = "#!/bin/sh\nexit 1\n";

/// Admin stub whose shutdown command succeeds without doing anything.
pub const QUIET_ADMIN: &str = "#!/bin/sh\nexit 0\n";

/// Lay out a stub distribution: bin/ scripts plus data/ seed templates.
pub fn stub_bundle(server_script: &str) -> TempDir {
    let bundle = TempDir::new().expect("create temp bundle");
    let bin = bundle.path().join(BIN_SUBDIR);
    create_dir_all(&bin).expect("create bin dir");

    write_executable(&bin.join(MYSQLD_BINARY), server_script);
    write_executable(&bin.join(MYSQLADMIN_BINARY), QUIET_ADMIN);

    for seed in SEED_SUBDIRS {
        let seed_dir = bundle.path().join(DATA_TEMPLATE_SUBDIR).join(seed);
        create_dir_all(&seed_dir).expect("create seed template");
        write(seed_dir.join("db.opt"), "default-character-set=utf8\n").expect("write seed file");
    }

    bundle
}

fn write_executable(path: &Path, content: &str) {
    write(path, content).expect("write stub executable");

    #[cfg(unix)]
    {
        use std::fs::{Permissions, set_permissions};
        use std::os::unix::fs::PermissionsExt;

        set_permissions(path, Permissions::from_mode(0o755)).expect("make stub executable");
    }
}

/// A port no other process is listening on.
#[cfg(unix)]
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr").port()
}

/// A port with a live listener held for the returned guard's lifetime.
#[cfg(unix)]
pub fn occupied_port() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    (listener, port)
}
