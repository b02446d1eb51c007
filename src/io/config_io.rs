use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Directory name used under the platform data and config directories
pub const APP_DIR: &str = "todo";
/// Environment variable overriding the storage directory
pub const DIR_ENV: &str = "TODO_DIR";
const CONFIG_FILE: &str = "config.toml";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine a data directory; pass --dir or set TODO_DIR")]
    NoDataDir,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Pick the storage directory: the `--dir` flag, then `$TODO_DIR`, then
/// `todo/` under the platform data directory.
pub fn resolve_storage_dir(cli_dir: Option<&Path>) -> Result<PathBuf, ConfigError> {
    storage_dir_from(
        cli_dir,
        std::env::var_os(DIR_ENV),
        dirs::data_dir(),
    )
}

fn storage_dir_from(
    cli_dir: Option<&Path>,
    env_dir: Option<OsString>,
    data_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = cli_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env_dir.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    data_dir
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoDataDir)
}

/// Location of `config.toml`, if the platform has a config directory
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}

/// Read the config file. A missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the config from its default location, or defaults when there is none
pub fn load_config() -> Result<Config, ConfigError> {
    match config_path() {
        Some(path) => read_config(&path),
        None => Ok(Config::default()),
    }
}
