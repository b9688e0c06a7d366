//! Generation of the server configuration file.
//!
//! The template fixes a conservative tuning block for a low-footprint local
//! or test deployment: MyISAM default engine with InnoDB skipped, utf8,
//! strict SQL mode, 100 connections, small buffers. The values are not
//! contractual beyond producing a server that starts and accepts the given
//! port.

use crate::CONFIG_FILE_NAME;
use crate::error::data_dir::DataDirError;

use common::ErrorLocation;

use std::fs::write;
use std::path::{Path, PathBuf};

use log::{debug, info};

/// Render the configuration template for the given port and directories.
///
/// Rendering is deterministic: the same inputs always produce byte-identical
/// output. Backslashes are normalized to forward slashes since the server
/// parses the file that way on every platform.
pub fn render_my_ini(port: u16, base_dir: &Path, data_dir: &Path, admin_user: &str) -> String {
    let basedir = normalize_path(base_dir);
    let datadir = normalize_path(data_dir);

    format!(
        r#"[mysqladmin]
user = "{admin_user}"
port = {port}


[mysqld]
port={port}

basedir={basedir}
datadir={datadir}

skip-innodb

character-set-server=utf8
collation-server=utf8_general_ci

default-storage-engine=myisam

sql-mode="STRICT_TRANS_TABLES,NO_AUTO_CREATE_USER,NO_ENGINE_SUBSTITUTION"

max_connections=100
query_cache_size=0
table_cache=256
tmp_table_size=34M
thread_cache_size=8
myisam_max_sort_file_size=100G
myisam_sort_buffer_size=67M
key_buffer_size=54M
read_buffer_size=64K
read_rnd_buffer_size=256K
sort_buffer_size=256K

max_allowed_packet=32M
"#
    )
}

/// Ensure a configuration file exists in `data_dir`, rendering it on first use.
///
/// An existing file is reused as-is and never overwritten - it is treated as
/// a caller-provided override.
#[track_caller]
pub fn ensure_my_ini(
    data_dir: &Path,
    port: u16,
    base_dir: &Path,
    admin_user: &str,
) -> Result<PathBuf, DataDirError> {
    let ini_path = data_dir.join(CONFIG_FILE_NAME);

    if ini_path.exists() {
        debug!("Reusing existing configuration at {}", ini_path.display());
        return Ok(ini_path);
    }

    let content = render_my_ini(port, base_dir, data_dir, admin_user);
    write(&ini_path, content).map_err(|e| DataDirError::ConfigWrite {
        path: ini_path.clone(),
        location: ErrorLocation::caller(),
        source: e,
    })?;

    info!("Generated configuration at {}", ini_path.display());
    Ok(ini_path)
}

fn normalize_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
