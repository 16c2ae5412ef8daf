//! Configuration Management
//!
//! Resolves connection settings for the CaseLink server from layered TOML
//! files. Later layers override only the keys they set.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Packaged defaults (compiled into the library)
const PACKAGED_CONFIG: &str = include_str!("resources/caselink.toml");

const DEFAULT_URL: &str = "http://127.0.0.1:8888/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const GLOBAL_CONFIG: &str = "/etc/caselink.toml";
const USER_CONFIG: &str = ".caselink.toml";
const CURDIR_CONFIG: &str = ".caselink.toml";

/// Resolved connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base endpoint, always ending in `/`
    pub caselink_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// Verbose request logging
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            caselink_url: Url::parse(DEFAULT_URL).expect("default URL is valid"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            debug: false,
        }
    }
}

/// One config file as written on disk
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: Option<ServerSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ServerSection {
    #[serde(default)]
    caselink_url: Option<String>,
    #[serde(default)]
    timeout: Option<u64>,
    #[serde(default)]
    debug: Option<Switch>,
}

/// `debug` accepts `true`/`false` as well as the classic `on`/`off` words
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Switch {
    Bool(bool),
    Word(String),
}

impl Switch {
    fn resolve(&self) -> Result<bool> {
        match self {
            Switch::Bool(b) => Ok(*b),
            Switch::Word(w) => match w.to_ascii_lowercase().as_str() {
                "on" | "yes" | "true" | "1" => Ok(true),
                "off" | "no" | "false" | "0" => Ok(false),
                other => Err(Error::Config(format!("invalid debug value: {}", other))),
            },
        }
    }
}

impl ConfigFile {
    fn parse(origin: &str, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::ConfigParse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Read a config file; a missing file is not an error
    fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config layer {:?}", path);
        Self::parse(&path.display().to_string(), &content).map(Some)
    }
}

/// Config file locations in ascending priority (excluding packaged defaults)
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(GLOBAL_CONFIG)];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(USER_CONFIG));
    }
    paths.push(PathBuf::from(CURDIR_CONFIG));
    paths
}

impl Settings {
    /// Load settings from packaged defaults, then global, user and current
    /// directory files.
    pub fn load() -> Result<Self> {
        let mut layers = vec![ConfigFile::parse("packaged defaults", PACKAGED_CONFIG)?];
        for path in config_paths() {
            layers.extend(ConfigFile::read(&path)?);
        }
        Self::from_layers(layers)
    }

    /// Load settings from the given files only, lowest priority first.
    ///
    /// Fails if none of them exists with a `[server]` section.
    pub fn load_from<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut layers = Vec::new();
        for path in paths {
            layers.extend(ConfigFile::read(path.as_ref())?);
        }
        Self::from_layers(layers)
    }

    /// Parse settings from a single TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::from_layers([ConfigFile::parse("inline config", content)?])
    }

    fn from_layers(layers: impl IntoIterator<Item = ConfigFile>) -> Result<Self> {
        let mut merged: Option<ServerSection> = None;

        for layer in layers {
            let Some(section) = layer.server else {
                continue;
            };
            let current = merged.get_or_insert_with(ServerSection::default);
            if section.caselink_url.is_some() {
                current.caselink_url = section.caselink_url;
            }
            if section.timeout.is_some() {
                current.timeout = section.timeout;
            }
            if section.debug.is_some() {
                current.debug = section.debug;
            }
        }

        let Some(server) = merged else {
            return Err(Error::Config(
                "no config file with a [server] section found".to_string(),
            ));
        };

        let caselink_url = parse_base_url(server.caselink_url.as_deref().unwrap_or(DEFAULT_URL))?;
        let timeout = Duration::from_secs(server.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let debug = match server.debug {
            Some(switch) => switch.resolve()?,
            None => false,
        };

        Ok(Self {
            caselink_url,
            timeout,
            debug,
        })
    }
}

/// Parse a base endpoint, forcing a trailing slash so paths append cleanly
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    let url = Url::parse(&normalized)
        .map_err(|e| Error::Config(format!("invalid caselink-url {}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("caselink-url cannot be a base: {}", raw)));
    }
    Ok(url)
}
