//! Configuration file management for director.
//!
//! Provides a TOML-based config file at `~/.config/director/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use director_core::OutputFormat;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub server: ServerSection,
    pub output: OutputSection,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the director config directory.
///
/// Uses XDG layout: `$XDG_CONFIG_HOME/director` or `~/.config/director`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("director");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("director")
}

/// Return the path to the director config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse a config file.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))
}

/// Load the config file if one exists. A missing file is not an error; a
/// malformed one is.
pub fn load_config() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        return Ok(None);
    }
    load_config_from(&path).map(Some)
}

/// Serialize and write a config file, creating parent dirs as needed.
pub fn save_config_to(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Server settings after applying the resolution chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ServeSettings {
    pub bind: String,
    pub port: u16,
}

/// Resolve the listen address.
///
/// - bind: `cli_bind` > `DIRECTOR_BIND` > `server.bind` > `127.0.0.1`
/// - port: `cli_port` > `DIRECTOR_PORT` > `server.port` > `8080`
pub fn resolve_serve(
    cli_bind: Option<&str>,
    cli_port: Option<u16>,
    file: Option<&ConfigFile>,
) -> Result<ServeSettings> {
    let bind = if let Some(bind) = cli_bind {
        bind.to_owned()
    } else if let Ok(bind) = std::env::var("DIRECTOR_BIND") {
        bind
    } else if let Some(cfg) = file {
        cfg.server.bind.clone()
    } else {
        DEFAULT_BIND.to_owned()
    };

    let port = if let Some(port) = cli_port {
        port
    } else if let Ok(raw) = std::env::var("DIRECTOR_PORT") {
        raw.parse()
            .with_context(|| format!("DIRECTOR_PORT is not a valid port: {raw:?}"))?
    } else if let Some(cfg) = file {
        cfg.server.port
    } else {
        DEFAULT_PORT
    };

    Ok(ServeSettings { bind, port })
}

/// Resolve the output format: `cli` > `DIRECTOR_FORMAT` > `output.format` > markdown.
pub fn resolve_format(cli: Option<OutputFormat>, file: Option<&ConfigFile>) -> Result<OutputFormat> {
    if let Some(format) = cli {
        return Ok(format);
    }
    if let Ok(raw) = std::env::var("DIRECTOR_FORMAT") {
        return raw
            .parse()
            .with_context(|| format!("invalid DIRECTOR_FORMAT value {raw:?}"));
    }
    Ok(file.map(|cfg| cfg.output.format).unwrap_or_default())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
