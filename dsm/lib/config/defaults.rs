use std::{env, path::PathBuf, sync::LazyLock};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Environment variable that overrides the dsm home directory.
pub const DSM_HOME_ENV_VAR: &str = "DSM_HOME";

/// The sub directory of the user's home where dsm looks for its config.
pub const DSM_HOME_DIR: &str = ".dsm";

/// The config file name inside the dsm home directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// The systemd unit of the Docker engine.
pub const DEFAULT_SERVICE_UNIT: &str = "docker.service";

/// The systemd socket unit that activates the engine.
pub const DEFAULT_SOCKET_UNIT: &str = "docker.socket";

/// The Docker CLI binary, resolved through `PATH`.
pub const DEFAULT_DOCKER_BIN: &str = "docker";

/// The systemctl binary, resolved through `PATH`.
pub const DEFAULT_SYSTEMCTL_BIN: &str = "systemctl";

/// How many log lines to show when the operator does not choose.
pub const DEFAULT_LOG_TAIL: usize = 100;

/// The default dsm home directory, `~/.dsm`. `None` if the home directory is unknown.
pub static DEFAULT_DSM_HOME: LazyLock<Option<PathBuf>> =
    LazyLock::new(|| dirs::home_dir().map(|home| home.join(DSM_HOME_DIR)));

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Returns `$DSM_HOME` if set and non-empty, else [`DEFAULT_DSM_HOME`].
pub fn dsm_home() -> Option<PathBuf> {
    match env::var_os(DSM_HOME_ENV_VAR) {
        Some(home) if !home.is_empty() => Some(PathBuf::from(home)),
        _ => DEFAULT_DSM_HOME.clone(),
    }
}

/// Returns the path of the config file inside [`dsm_home`].
pub fn default_config_path() -> Option<PathBuf> {
    dsm_home().map(|home| home.join(CONFIG_FILENAME))
}
