// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Layered configuration: built-in defaults, then `config.toml`, then
//! `WWDL_*` environment variables.

use crate::emit::ChecksumMode;
use crate::error::{Result, WwdlError};
use crate::manifest::{DEFAULT_INDIRECTION_URL, ServerOption, default_servers};
use crate::policy::InclusionPolicy;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "wwdl";
const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "WWDL";
const DEFAULT_RELEASE_CHANNEL: &str = "default";
const DEFAULT_CDN_INDEX: usize = 1;
const DEFAULT_OUTPUT_PREFIX: &str = "wuwa";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WwdlConfig {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub checksum: ChecksumConfig,

    #[serde(default)]
    pub policy: InclusionPolicy,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_indirection_url")]
    pub indirection_url: String,

    /// Channel key inside each manifest, e.g. "default" or "predownload".
    #[serde(default = "default_release_channel")]
    pub release_channel: String,

    /// Position in the channel's CDN list.
    #[serde(default = "default_cdn_index")]
    pub cdn_index: usize,

    #[serde(default = "default_servers")]
    pub servers: Vec<ServerOption>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            indirection_url: default_indirection_url(),
            release_channel: default_release_channel(),
            cdn_index: DEFAULT_CDN_INDEX,
            servers: default_servers(),
        }
    }
}

fn default_indirection_url() -> String {
    DEFAULT_INDIRECTION_URL.to_string()
}

fn default_release_channel() -> String {
    DEFAULT_RELEASE_CHANNEL.to_string()
}

fn default_cdn_index() -> usize {
    DEFAULT_CDN_INDEX
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Write paths relative to the game root instead of bare file names.
    #[serde(default)]
    pub full_path: bool,
}

impl Default for ChecksumConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            full_path: false,
        }
    }
}

impl ChecksumConfig {
    pub fn mode(&self) -> ChecksumMode {
        ChecksumMode::from_flags(self.enabled, self.full_path)
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_output_prefix")]
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            prefix: default_output_prefix(),
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_prefix() -> String {
    DEFAULT_OUTPUT_PREFIX.to_string()
}

impl WwdlConfig {
    /// Load from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_with(Some(File::from(path).format(FileFormat::Toml).required(true)))
    }

    /// Load from the per-user config file when present.
    pub fn load_default() -> Result<Self> {
        let file = default_config_path()
            .map(|path| File::from(path).format(FileFormat::Toml).required(false));
        Self::load_with(file)
    }

    fn load_with(file: Option<File<config::FileSourceFile, FileFormat>>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("policy.include_extensions"),
            )
            .build()?;

        let config: WwdlConfig = settings.try_deserialize()?;
        config.validate()?;
        log::debug!("Loaded configuration: {config:?}");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.release_channel.trim().is_empty() {
            return Err(WwdlError::InvalidConfig(
                "source.release_channel must not be empty".to_string(),
            ));
        }
        if self.source.servers.is_empty() {
            return Err(WwdlError::InvalidConfig(
                "source.servers must list at least one server".to_string(),
            ));
        }
        if self.output.prefix.trim().is_empty() {
            return Err(WwdlError::InvalidConfig(
                "output.prefix must not be empty".to_string(),
            ));
        }
        for ext in &self.policy.include_extensions {
            if !ext.starts_with('.') {
                return Err(WwdlError::InvalidConfig(format!(
                    "policy.include_extensions entry '{ext}' must start with '.'"
                )));
            }
            if *ext != ext.to_lowercase() {
                return Err(WwdlError::InvalidConfig(format!(
                    "policy.include_extensions entry '{ext}' must be lowercase"
                )));
            }
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration from `path` if given, otherwise from the default location.
pub fn new_wwdl_config(path: Option<&Path>) -> Result<WwdlConfig> {
    match path {
        Some(path) => WwdlConfig::load_from(path),
        None => WwdlConfig::load_default(),
    }
}
