//! Configuration file management for plantitas.
//!
//! Provides a TOML config file at `~/.config/plantitas/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const FILE_ENV: &str = "PLANTITAS_FILE";
pub const DEBUG_ENV: &str = "PLANTITAS_DEBUG";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Plant record file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// Turn on debug-level logging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// `$XDG_CONFIG_HOME/plantitas` or `~/.config/plantitas`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("plantitas");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("plantitas")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Where plants are kept when nothing else is configured.
pub fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("plantitas")
        .join("plants.txt")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load the config file at `path`. A missing file yields `None`.
pub fn load_config(path: &Path) -> Result<Option<ConfigFile>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to read config file at {}", path.display()));
        }
    };
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(Some(config))
}

/// Write `config` to `path`, creating parent directories as needed.
/// Refuses to replace an existing file unless `force` is set.
pub fn save_config(path: &Path, config: &ConfigFile, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved settings
// -----------------------------------------------------------------------

/// Fully resolved settings, ready for use.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_file: PathBuf,
    pub debug: bool,
}

impl Settings {
    /// Resolve from the real environment and the default config path.
    pub fn resolve(cli_file: Option<&Path>, cli_debug: bool) -> Result<Self> {
        let file_config = load_config(&config_path())?;
        Ok(Self::resolve_with(
            cli_file,
            cli_debug,
            |key| std::env::var(key).ok(),
            file_config.as_ref(),
        ))
    }

    /// Resolution chain: CLI flag > env var > config file > default.
    ///
    /// - data file: `--file` > `PLANTITAS_FILE` > `data_file` > [`default_data_file`]
    /// - debug: `--debug` > `PLANTITAS_DEBUG` > `debug` > off
    pub fn resolve_with<E>(
        cli_file: Option<&Path>,
        cli_debug: bool,
        env: E,
        file_config: Option<&ConfigFile>,
    ) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        let data_file = if let Some(path) = cli_file {
            path.to_path_buf()
        } else if let Some(path) = env(FILE_ENV).filter(|v| !v.is_empty()) {
            PathBuf::from(path)
        } else if let Some(path) = file_config.and_then(|c| c.data_file.clone()) {
            path
        } else {
            default_data_file()
        };

        let debug = if cli_debug {
            true
        } else if let Some(value) = env(DEBUG_ENV) {
            parse_flag(&value)
        } else {
            file_config.and_then(|c| c.debug).unwrap_or(false)
        };

        Self { data_file, debug }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
