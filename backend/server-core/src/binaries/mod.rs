//! Resolution of the bundled server and admin executables.
//!
//! The bundle location is resolved once at handle construction and is
//! immutable afterwards. Resolution is explicit and documented rather than
//! package-introspection magic, so tests can point a handle at a fake bundle
//! of stub executables.

use crate::error::binaries::BinariesError;
use crate::{
    APP_DIR_NAME, BASEDIR_ENV, BIN_SUBDIR, BUNDLED_DIR_NAME, DATA_TEMPLATE_SUBDIR,
    MYSQLADMIN_BINARY, MYSQLD_BINARY,
};

use common::ErrorLocation;

use std::env::{current_exe, var_os};
use std::path::{Path, PathBuf};

use log::{debug, trace};

/// Absolute paths of the bundled executables, resolved once and immutable.
#[derive(Debug, Clone)]
pub struct BundledBinaries {
    base_dir: PathBuf,
    mysqld: PathBuf,
    mysqladmin: PathBuf,
}

impl BundledBinaries {
    /// Resolve the bundle using the default lookup order:
    ///
    /// 1. the `MYSQL_LOCAL_BASEDIR` environment variable,
    /// 2. `mysql55_files/` next to the current executable,
    /// 3. `mysql55_files/` under the user-local data directory.
    ///
    /// # Errors
    ///
    /// * [`BinariesError::Resolution`] - no candidate directory was found
    /// * [`BinariesError::MissingBinary`] - the directory exists but lacks an executable
    #[track_caller]
    pub fn resolve() -> Result<Self, BinariesError> {
        Self::at(default_base_dir()?)
    }

    /// Use an explicit bundle location.
    ///
    /// # Errors
    ///
    /// Returns [`BinariesError::MissingBinary`] if either executable is
    /// absent. Fails fast - no directory or process action has happened yet.
    #[track_caller]
    pub fn at(base_dir: impl Into<PathBuf>) -> Result<Self, BinariesError> {
        let base_dir = base_dir.into();
        let bin_dir = base_dir.join(BIN_SUBDIR);
        let mysqld = bin_dir.join(MYSQLD_BINARY);
        let mysqladmin = bin_dir.join(MYSQLADMIN_BINARY);

        for executable in [&mysqld, &mysqladmin] {
            if !executable.is_file() {
                return Err(BinariesError::MissingBinary {
                    path: executable.clone(),
                    location: ErrorLocation::caller(),
                });
            }
        }

        debug!("Bundled binaries resolved under {}", base_dir.display());

        Ok(Self {
            base_dir,
            mysqld,
            mysqladmin,
        })
    }

    /// Root of the bundled server distribution.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the server executable.
    pub fn mysqld(&self) -> &Path {
        &self.mysqld
    }

    /// Path of the admin/control executable.
    pub fn mysqladmin(&self) -> &Path {
        &self.mysqladmin
    }

    /// Template data copied into fresh data directories.
    pub fn data_template_dir(&self) -> PathBuf {
        self.base_dir.join(DATA_TEMPLATE_SUBDIR)
    }
}

#[track_caller]
fn default_base_dir() -> Result<PathBuf, BinariesError> {
    if let Some(dir) = var_os(BASEDIR_ENV) {
        trace!("Using {BASEDIR_ENV} override");
        return Ok(PathBuf::from(dir));
    }

    if let Ok(exe) = current_exe()
        && let Some(dir) = exe.parent()
    {
        let candidate = dir.join(BUNDLED_DIR_NAME);
        if candidate.is_dir() {
            trace!(
                "Using executable-relative bundle at {}",
                candidate.display()
            );
            return Ok(candidate);
        }
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        let candidate = data_dir.join(APP_DIR_NAME).join(BUNDLED_DIR_NAME);
        if candidate.is_dir() {
            trace!("Using user-local bundle at {}", candidate.display());
            return Ok(candidate);
        }
    }

    Err(BinariesError::Resolution {
        message: format!(
            "No bundled server distribution found; set {BASEDIR_ENV} or place {BUNDLED_DIR_NAME} next to the executable"
        ),
        location: ErrorLocation::caller(),
    })
}
