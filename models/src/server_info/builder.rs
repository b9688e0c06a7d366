use crate::ServerInfo;
use crate::error::model_error::ModelError;

use std::path::PathBuf;

/// Builder for creating validated ServerInfo instances.
///
/// Provides a fluent API for constructing ServerInfo with validation of
/// every required field before an instance can exist.
#[derive(Debug, Default)]
pub struct ServerInfoBuilder {
    pid: Option<u32>,
    port: Option<u16>,
    connection_url: Option<String>,
    data_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    admin_user: Option<String>,
    owned: Option<bool>,
}

impl ServerInfoBuilder {
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_connection_url(mut self, url: impl Into<String>) -> Self {
        self.connection_url = Some(url.into());
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    pub fn with_config_file(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = Some(config_file.into());
        self
    }

    pub fn with_admin_user(mut self, user: impl Into<String>) -> Self {
        self.admin_user = Some(user.into());
        self
    }

    pub fn with_owned(mut self, owned: bool) -> Self {
        self.owned = Some(owned);
        self
    }

    /// Build the ServerInfo with validation.
    #[track_caller]
    pub fn build(self) -> Result<ServerInfo, ModelError> {
        let pid = require(self.pid, "PID")?;
        if pid == 0 {
            return Err(ModelError::validation("PID must be non-zero"));
        }

        let port = require(self.port, "Port")?;
        if port == 0 {
            return Err(ModelError::validation("Port must be non-zero"));
        }

        let connection_url = require(self.connection_url, "Connection URL")?;
        if connection_url.is_empty() {
            return Err(ModelError::validation("Connection URL cannot be empty"));
        }
        if !connection_url.starts_with("mysql://") {
            return Err(ModelError::validation(format!(
                "Invalid connection URL format: {connection_url}"
            )));
        }

        let data_dir = require(self.data_dir, "Data directory")?;
        if data_dir.as_os_str().is_empty() {
            return Err(ModelError::validation("Data directory cannot be empty"));
        }

        let config_file = require(self.config_file, "Config file")?;
        if config_file.as_os_str().is_empty() {
            return Err(ModelError::validation("Config file cannot be empty"));
        }

        let admin_user = require(self.admin_user, "Admin user")?;
        if admin_user.is_empty() {
            return Err(ModelError::validation("Admin user cannot be empty"));
        }

        let owned = require(self.owned, "Owned")?;

        Ok(ServerInfo {
            pid,
            port,
            connection_url,
            data_dir,
            config_file,
            admin_user,
            owned,
        })
    }
}

#[track_caller]
fn require<T>(field: Option<T>, name: &str) -> Result<T, ModelError> {
    field.ok_or_else(|| ModelError::validation(format!("{name} is required")))
}
