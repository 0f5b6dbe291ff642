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

mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WwdlError {
    /// The server answered with a non-success status. Never retried.
    #[error("HTTP error! status: {status} ({url})")]
    Transport { url: String, status: u16 },

    /// The request did not produce a response at all.
    #[error("Failed to reach {url}: {message}")]
    Network { url: String, message: String },

    #[error("Category '{0}' not found in indirection document")]
    CategoryNotFound(String),

    #[error("Region '{region}' not found in category '{category}'")]
    RegionNotFound { category: String, region: String },

    /// A parsed document lacks a field the pipeline depends on.
    #[error("Unexpected document at {url}: {reason}")]
    Schema { url: String, reason: String },

    #[error("Failed to parse document at {url}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No server configured with label '{0}'")]
    ServerNotFound(String),

    #[error("No available versions found")]
    NoAvailableVersion { labels: Vec<String> },

    #[error("Checksum verification failed for {failed} of {checked} files")]
    ChecksumMismatch {
        checked: usize,
        failed: usize,
        files: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl WwdlError {
    /// True for failures to find a category or region key.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            WwdlError::CategoryNotFound(_) | WwdlError::RegionNotFound { .. }
        )
    }

    pub(crate) fn schema(url: impl Into<String>, reason: impl Into<String>) -> Self {
        WwdlError::Schema {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for WwdlError {
    fn from(e: config::ConfigError) -> Self {
        WwdlError::ConfigError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WwdlError>;
