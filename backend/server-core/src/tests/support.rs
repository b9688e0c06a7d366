// Shared scaffolding for unit tests: a fake bundled distribution laid out
// in a tempdir. The executables are empty files - existence is all the
// resolution layer checks, and no unit test spawns them.

use crate::{BIN_SUBDIR, DATA_TEMPLATE_SUBDIR, MYSQLADMIN_BINARY, MYSQLD_BINARY, SEED_SUBDIRS};

use std::fs::{create_dir_all, write};
use std::path::Path;

use tempfile::TempDir;

/// Lay out a stub bundle: bin/ executables plus data/ seed templates.
pub(crate) fn stub_bundle() -> TempDir {
    let bundle = TempDir::new().expect("create temp bundle");
    populate_bundle(bundle.path());
    bundle
}

pub(crate) fn populate_bundle(root: &Path) {
    let bin = root.join(BIN_SUBDIR);
    create_dir_all(&bin).expect("create bin dir");
    write(bin.join(MYSQLD_BINARY), "").expect("write mysqld stub");
    write(bin.join(MYSQLADMIN_BINARY), "").expect("write mysqladmin stub");

    let data = root.join(DATA_TEMPLATE_SUBDIR);
    for seed in SEED_SUBDIRS {
        let seed_dir = data.join(seed);
        create_dir_all(&seed_dir).expect("create seed template");
        write(seed_dir.join("db.opt"), "default-character-set=utf8\n").expect("write seed file");
    }
}
