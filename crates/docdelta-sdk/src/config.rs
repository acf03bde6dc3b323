use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use docdelta_diff::{OutlineOptions, TitleRules};
use docdelta_render::RenderOptions;
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// Overrides [`DocdeltaConfig::diff_dir`].
pub const ENV_DIFF_PATH: &str = "DIFF_PATH";
/// Overrides [`DocdeltaConfig::combined_diff_dir`].
pub const ENV_COMBINED_DIFF_PATH: &str = "COMBINED_DIFF_PATH";
/// Overrides [`DocdeltaConfig::document_version`].
pub const ENV_DOCUMENT_VERSION: &str = "DOCUMENT_VERSION_STRING";
/// Overrides [`ServerConfig::bind_addr`].
pub const ENV_BIND_ADDR: &str = "DOCDELTA_BIND";

/// Top-level configuration, usually read from `docdelta.toml`.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocdeltaConfig {
    /// Directory of per-version-pair diffs.
    pub diff_dir: PathBuf,
    /// Directory of combined diffs, selected with `type=combined`.
    pub combined_diff_dir: PathBuf,
    /// Name of the currently published version.
    pub document_version: Option<String>,
    pub render: RenderOptions,
    pub title: TitleRules,
    pub outline: OutlineOptions,
    pub server: ServerConfig,
}

impl Default for DocdeltaConfig {
    fn default() -> Self {
        Self {
            diff_dir: PathBuf::from("public/diffs"),
            combined_diff_dir: PathBuf::from("public/diff-combined"),
            document_version: None,
            render: RenderOptions::default(),
            title: TitleRules::default(),
            outline: OutlineOptions::default(),
            server: ServerConfig::default(),
        }
    }
}

impl DocdeltaConfig {
    /// Read a TOML configuration file.
    pub fn load(path: &Path) -> SdkResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SdkError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| SdkError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(self) -> SdkResult<Self> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`; empty values are ignored.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> SdkResult<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get(ENV_DIFF_PATH) {
            self.diff_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get(ENV_COMBINED_DIFF_PATH) {
            self.combined_diff_dir = PathBuf::from(dir);
        }
        if let Some(version) = get(ENV_DOCUMENT_VERSION) {
            self.document_version = Some(version);
        }
        if let Some(addr) = get(ENV_BIND_ADDR) {
            self.server.bind_addr = addr.parse().map_err(|e| SdkError::InvalidEnv {
                name: ENV_BIND_ADDR,
                reason: format!("{addr:?}: {e}"),
            })?;
        }

        Ok(self)
    }
}

/// HTTP server settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Answer cross-origin requests from any origin.
    pub permissive_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
            permissive_cors: false,
        }
    }
}
