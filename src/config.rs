use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{NCBI_HOST, Transport};
use crate::error::ReportError;

pub const DEFAULT_CONFIG_FILE: &str = "assembly-report.json";
pub const DEFAULT_FTP_PORT: u16 = 21;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub transport: Option<Transport>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub transport: Option<Transport>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub host: String,
    pub port: u16,
    pub transport: Transport,
    pub timeout: Duration,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            host: NCBI_HOST.to_string(),
            port: DEFAULT_FTP_PORT,
            transport: Transport::Ftp,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads `path`, or `assembly-report.json` when present, and applies `overrides`.
    pub fn resolve(
        path: Option<&str>,
        overrides: ConfigOverrides,
    ) -> Result<ResolvedConfig, ReportError> {
        Self::resolve_in(Path::new("."), path, overrides)
    }

    /// Same as [`ConfigLoader::resolve`], with relative paths and the default
    /// file looked up under `dir`.
    pub fn resolve_in(
        dir: &Path,
        path: Option<&str>,
        overrides: ConfigOverrides,
    ) -> Result<ResolvedConfig, ReportError> {
        let config_path = match path {
            Some(path) => dir.join(path),
            None => dir.join(DEFAULT_CONFIG_FILE),
        };

        let config = if path.is_none() && !config_path.exists() {
            Config::default()
        } else {
            let content = fs::read_to_string(&config_path)
                .map_err(|_| ReportError::ConfigRead(config_path.clone()))?;
            serde_json::from_str(&content)
                .map_err(|err| ReportError::ConfigParse(err.to_string()))?
        };

        Self::resolve_config(config, overrides)
    }

    pub fn resolve_config(
        config: Config,
        overrides: ConfigOverrides,
    ) -> Result<ResolvedConfig, ReportError> {
        let defaults = ResolvedConfig::default();

        let host = overrides
            .host
            .or(config.host)
            .map(|host| host.trim().to_string())
            .unwrap_or(defaults.host);
        if host.is_empty() {
            return Err(ReportError::InvalidConfig("host must not be empty".to_string()));
        }

        let timeout_secs = overrides
            .timeout_secs
            .or(config.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ReportError::InvalidConfig(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(ResolvedConfig {
            host,
            port: overrides.port.or(config.port).unwrap_or(defaults.port),
            transport: overrides
                .transport
                .or(config.transport)
                .unwrap_or(defaults.transport),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
