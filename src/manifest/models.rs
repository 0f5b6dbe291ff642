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

use crate::error::{Result, WwdlError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version reported when neither manifest schema carries one.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Remote pointer file: category -> region -> absolute manifest URL.
///
/// Only the looked-up keys are inspected, so unrelated fields never make the
/// document unusable.
#[derive(Debug, Clone, PartialEq)]
pub struct IndirectionDocument {
    url: String,
    document: Value,
}

impl IndirectionDocument {
    pub fn new(url: impl Into<String>, document: Value) -> Self {
        Self {
            url: url.into(),
            document,
        }
    }

    /// Exact-key lookup of `document[category][region]`.
    pub fn manifest_url(&self, category: &str, region: &str) -> Result<&str> {
        let regions = self
            .document
            .get(category)
            .filter(|regions| regions.is_object())
            .ok_or_else(|| WwdlError::CategoryNotFound(category.to_string()))?;

        let url = regions
            .get(region)
            .ok_or_else(|| WwdlError::RegionNotFound {
                category: category.to_string(),
                region: region.to_string(),
            })?;

        url.as_str().ok_or_else(|| {
            WwdlError::schema(
                &self.url,
                format!("'{category}.{region}' is not a manifest URL string"),
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdnEntry {
    pub url: String,
}

/// One release channel of a build manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestChannel {
    pub name: String,
    pub manifest_url: String,
    pub version: String,
    /// Raw mirror objects. Only the selected one has to carry a `url`.
    pub cdn_list: Vec<Value>,
    /// Resource index path, relative to a CDN base URL.
    pub resources_path: String,
    /// Prefix joined between the CDN base URL and each resource destination.
    pub resources_base_path: String,
    /// Total size advertised by the manifest, when present.
    pub declared_size: Option<u64>,
}

/// Non-empty string at `key`, if any.
fn non_empty_str<'v>(value: Option<&'v Value>, key: &str) -> Option<&'v str> {
    value
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

impl ManifestChannel {
    pub fn from_document(manifest_url: &str, document: &Value, channel: &str) -> Result<Self> {
        let raw = match document.get(channel) {
            Some(value) if value.is_object() => value,
            Some(value) if !value.is_null() => {
                return Err(WwdlError::schema(
                    manifest_url,
                    format!("channel '{channel}' is not an object"),
                ));
            }
            _ => {
                return Err(WwdlError::schema(
                    manifest_url,
                    format!("channel '{channel}' not found"),
                ));
            }
        };

        let resources_path = raw
            .get("resources")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                WwdlError::schema(
                    manifest_url,
                    format!("channel '{channel}' has no 'resources' path"),
                )
            })?
            .to_string();

        // Newer manifests nest the version under `config`, older ones keep it
        // at the top level.
        let config = raw.get("config");
        let version = non_empty_str(config, "version")
            .or_else(|| non_empty_str(Some(raw), "version"))
            .unwrap_or(UNKNOWN_VERSION)
            .to_string();

        let cdn_list = raw
            .get("cdnList")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let resources_base_path = raw
            .get("resourcesBasePath")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            name: channel.to_string(),
            manifest_url: manifest_url.to_string(),
            version,
            cdn_list,
            resources_path,
            resources_base_path,
            declared_size: config.and_then(|c| c.get("size")).and_then(Value::as_u64),
        })
    }

    /// The mirror at `index`. The index is static configuration.
    pub fn cdn(&self, index: usize) -> Result<CdnEntry> {
        let entry = self.cdn_list.get(index).ok_or_else(|| {
            WwdlError::schema(
                &self.manifest_url,
                format!(
                    "CDN index {index} is out of range for channel '{}' ({} mirrors)",
                    self.name,
                    self.cdn_list.len()
                ),
            )
        })?;

        serde_json::from_value(entry.clone()).map_err(|e| {
            WwdlError::schema(
                &self.manifest_url,
                format!("CDN entry {index} of channel '{}': {e}", self.name),
            )
        })
    }

    pub fn resource_index_url(&self, cdn_index: usize) -> Result<String> {
        Ok(format!("{}{}", self.cdn(cdn_index)?.url, self.resources_path))
    }

    pub fn resource_base_url(&self, cdn_index: usize) -> Result<String> {
        Ok(format!(
            "{}{}",
            self.cdn(cdn_index)?.url,
            self.resources_base_path
        ))
    }
}
