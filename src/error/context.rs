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

use crate::error::WwdlError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a WwdlError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a WwdlError) -> Self {
        let (suggestion, details) = match error {
            WwdlError::Transport { url, status } => {
                let suggestion = if *status == 404 {
                    Some(
                        "The manifest may have moved. Run 'wwdl versions' to refresh the list of \
                         available builds."
                            .to_string(),
                    )
                } else {
                    Some("The server rejected the request. Try again later.".to_string())
                };
                let details = Some(format!("GET {url} returned HTTP {status}"));
                (suggestion, details)
            }
            WwdlError::Network { url, message } => {
                let suggestion = Some(
                    "Check your internet connection and proxy settings (HTTP_PROXY, HTTPS_PROXY)."
                        .to_string(),
                );
                let details = Some(format!("GET {url}: {message}"));
                (suggestion, details)
            }
            WwdlError::CategoryNotFound(category) => {
                let suggestion = Some(
                    "Check the 'category' values under [source.servers] in your configuration."
                        .to_string(),
                );
                let details = Some(format!("No '{category}' key in the indirection document."));
                (suggestion, details)
            }
            WwdlError::RegionNotFound { category, region } => {
                let suggestion = Some(
                    "Check the 'region' values under [source.servers] in your configuration."
                        .to_string(),
                );
                let details = Some(format!(
                    "Category '{category}' exists but has no '{region}' entry."
                ));
                (suggestion, details)
            }
            WwdlError::Schema { reason, .. } => {
                let suggestion = Some(
                    "The remote document format may have changed, or 'release_channel' / \
                     'cdn_index' point at something that does not exist."
                        .to_string(),
                );
                (suggestion, Some(reason.clone()))
            }
            WwdlError::Parse { source, .. } => (None, Some(source.to_string())),
            WwdlError::ServerNotFound(_) => (
                Some("Run 'wwdl versions' to list configured server labels.".to_string()),
                None,
            ),
            WwdlError::NoAvailableVersion { labels } => {
                let suggestion = Some(
                    "Every configured server failed to resolve. Run with -v to see why."
                        .to_string(),
                );
                let details = if labels.is_empty() {
                    None
                } else {
                    Some(format!(
                        "Tried:\n{}",
                        labels
                            .iter()
                            .map(|l| format!("  - {l}"))
                            .collect::<Vec<_>>()
                            .join("\n")
                    ))
                };
                (suggestion, details)
            }
            WwdlError::ChecksumMismatch { files, .. } => {
                let details = Some(
                    files
                        .iter()
                        .map(|f| format!("  - {f}"))
                        .collect::<Vec<_>>()
                        .join("\n"),
                );
                let suggestion =
                    Some("Re-download the listed files and verify again.".to_string());
                (suggestion, details)
            }
            WwdlError::ConfigError(_) | WwdlError::InvalidConfig(_) => {
                let suggestion = Some(
                    "Check your config.toml and any WWDL_* environment variables.".to_string(),
                );
                (suggestion, None)
            }
            WwdlError::Io(e) => (None, Some(format!("I/O error kind: {}", e.kind()))),
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
