use std::{fs, path::Path};

use getset::Getters;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{DsmError, DsmResult};

use super::{
    default_config_path, DEFAULT_DOCKER_BIN, DEFAULT_LOG_TAIL, DEFAULT_SERVICE_UNIT,
    DEFAULT_SOCKET_UNIT, DEFAULT_SYSTEMCTL_BIN,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Console settings.
///
/// Every field is optional in the TOML file; missing fields take their defaults. Unknown
/// fields are rejected so that typos do not go unnoticed.
///
/// ## Example
///
/// ```toml
/// service_unit = "docker.service"
/// socket_unit = "docker.socket"
/// default_log_tail = 50
/// clear_screen = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Getters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[getset(get = "pub with_prefix")]
pub struct DsmConfig {
    /// The systemd unit managed by the service menu.
    #[builder(default = DEFAULT_SERVICE_UNIT.to_string(), setter(into))]
    service_unit: String,

    /// The systemd unit managed by the socket menu.
    #[builder(default = DEFAULT_SOCKET_UNIT.to_string(), setter(into))]
    socket_unit: String,

    /// The Docker CLI used in live mode.
    #[builder(default = DEFAULT_DOCKER_BIN.to_string(), setter(into))]
    docker_bin: String,

    /// The systemctl binary used in live mode.
    #[builder(default = DEFAULT_SYSTEMCTL_BIN.to_string(), setter(into))]
    systemctl_bin: String,

    /// Log lines shown when the operator accepts the default.
    #[builder(default = DEFAULT_LOG_TAIL)]
    default_log_tail: usize,

    /// Wait for Enter after printing a result.
    #[builder(default = true)]
    pause_after_output: bool,

    /// Clear the terminal before drawing a menu.
    #[builder(default = true)]
    clear_screen: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl DsmConfig {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, `$DSM_HOME/config.toml` (or
    /// `~/.dsm/config.toml`) is read if present, and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> DsmResult<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reads and validates a TOML config file.
    pub fn from_file(path: &Path) -> DsmResult<Self> {
        tracing::debug!("loading config from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|e| {
            DsmError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;

        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would leave a menu unusable.
    pub fn validate(&self) -> DsmResult<()> {
        let required = [
            ("service_unit", &self.service_unit),
            ("socket_unit", &self.socket_unit),
            ("docker_bin", &self.docker_bin),
            ("systemctl_bin", &self.systemctl_bin),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DsmError::InvalidConfig(format!("{field} must not be empty")));
            }
        }

        if self.default_log_tail == 0 {
            return Err(DsmError::InvalidConfig(
                "default_log_tail must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Default for DsmConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;
    use tempfile::TempDir;

    use crate::config::{CONFIG_FILENAME, DSM_HOME_ENV_VAR};

    use super::*;

    fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, contents).expect("write config");
        path
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = write_config(&dir, "default_log_tail = 25\nclear_screen = false\n");

        let config = DsmConfig::load(Some(path.as_path()))?;
        assert_eq!(*config.get_default_log_tail(), 25);
        assert!(!config.get_clear_screen());
        assert_eq!(config.get_service_unit(), DEFAULT_SERVICE_UNIT);
        assert!(*config.get_pause_after_output());
        Ok(())
    }

    #[test]
    fn test_unknown_key_is_rejected() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = write_config(&dir, "service = \"podman.service\"\n");

        let err = DsmConfig::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, DsmError::ConfigParse(_)));
        Ok(())
    }

    #[test]
    fn test_invalid_values_are_rejected() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = write_config(&dir, "default_log_tail = 0\n");
        assert!(matches!(
            DsmConfig::load(Some(path.as_path())),
            Err(DsmError::InvalidConfig(_))
        ));

        let path = write_config(&dir, "socket_unit = \"  \"\n");
        assert!(matches!(
            DsmConfig::load(Some(path.as_path())),
            Err(DsmError::InvalidConfig(_))
        ));
        Ok(())
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let result = DsmConfig::load(Some(dir.path().join("absent.toml").as_path()));
        assert!(matches!(result, Err(DsmError::InvalidConfig(_))));
        Ok(())
    }

    #[test]
    #[serial]
    fn test_dsm_home_is_searched() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write_config(&dir, "service_unit = \"containerd.service\"\n");

        env::set_var(DSM_HOME_ENV_VAR, dir.path());
        let config = DsmConfig::load(None);
        env::remove_var(DSM_HOME_ENV_VAR);

        assert_eq!(config?.get_service_unit(), "containerd.service");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_empty_dsm_home_falls_back_to_defaults() -> anyhow::Result<()> {
        let dir = TempDir::new()?;

        env::set_var(DSM_HOME_ENV_VAR, dir.path());
        let config = DsmConfig::load(None);
        env::remove_var(DSM_HOME_ENV_VAR);

        assert_eq!(config?, DsmConfig::default());
        Ok(())
    }
}
