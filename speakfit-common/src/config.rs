//! Configuration resolution
//!
//! Settings are resolved in priority order: command-line argument,
//! environment variable, TOML config file, compiled default. The TOML file
//! lives at `~/.config/speakfit/config.toml` (platform equivalent elsewhere).

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Default analysis engine request timeout in seconds
pub const DEFAULT_ANALYSIS_TIMEOUT_SECS: u64 = 120;

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 5850;

/// Connection settings for the external speech-analysis engine.
///
/// Injected into the analysis client at construction so tests can point a
/// client at a local stub with a short timeout.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Base URL of the engine, without trailing slash
    pub base_url: String,
    /// Request timeout for a single analysis call
    pub timeout: Duration,
}

/// Contents of the optional TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub analysis_base_url: Option<String>,
    pub analysis_timeout_secs: Option<u64>,
}

/// Load the TOML config file if one exists.
///
/// A missing file is not an error; a present-but-invalid file is.
pub fn load_toml_config() -> Result<TomlConfig> {
    let path = match config_file_path() {
        Some(path) if path.exists() => path,
        _ => return Ok(TomlConfig::default()),
    };

    let content = std::fs::read_to_string(&path)?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))?;

    info!("Loaded config file: {}", path.display());
    Ok(config)
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("speakfit").join("config.toml"))
}

/// Resolve the root data folder.
///
/// Priority: CLI argument, `SPEAKFIT_ROOT_FOLDER`, TOML `root_folder`,
/// OS-dependent default under the local data directory.
pub fn resolve_root_folder(cli_arg: Option<&str>, toml: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var("SPEAKFIT_ROOT_FOLDER") {
        return PathBuf::from(path);
    }

    if let Some(path) = &toml.root_folder {
        return PathBuf::from(path);
    }

    dirs::data_local_dir()
        .map(|d| d.join("speakfit"))
        .unwrap_or_else(|| PathBuf::from("./speakfit_data"))
}

/// Resolve the HTTP bind address (`host:port`).
pub fn resolve_bind_addr(cli_port: Option<u16>, toml: &TomlConfig) -> String {
    let host = toml.host.clone().unwrap_or_else(|| "127.0.0.1".to_string());

    let port = cli_port
        .or_else(|| {
            std::env::var("SPEAKFIT_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .or(toml.port)
        .unwrap_or(DEFAULT_PORT);

    format!("{}:{}", host, port)
}

/// Resolve the analysis engine configuration.
///
/// The base URL has no sensible default and must be configured; the timeout
/// falls back to [`DEFAULT_ANALYSIS_TIMEOUT_SECS`].
pub fn resolve_analysis_config(toml: &TomlConfig) -> Result<AnalysisConfig> {
    let base_url = std::env::var("SPEAKFIT_ANALYSIS_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| toml.analysis_base_url.clone())
        .ok_or_else(|| {
            Error::Config(
                "Speech analysis engine URL not configured. Configure using one of:\n\
                 1. Environment: SPEAKFIT_ANALYSIS_URL=http://host:port\n\
                 2. TOML config: ~/.config/speakfit/config.toml (analysis_base_url = \"http://host:port\")"
                    .to_string(),
            )
        })?;

    let timeout_secs = std::env::var("SPEAKFIT_ANALYSIS_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .or(toml.analysis_timeout_secs)
        .unwrap_or(DEFAULT_ANALYSIS_TIMEOUT_SECS);

    Ok(AnalysisConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        timeout: Duration::from_secs(timeout_secs),
    })
}

/// Database file path inside the root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join("speakfit.db")
}

/// Scratch directory for staged recording uploads
pub fn uploads_dir(root_folder: &Path) -> PathBuf {
    root_folder.join("uploads")
}
