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

use crate::error::Result;
use crate::manifest::models::{IndirectionDocument, ManifestChannel};
use crate::manifest::server::{ServerOption, VersionInfo};
use crate::transport::Transport;
use log::{debug, info, warn};
use serde_json::Value;

/// Resolves category/region selectors to build manifests through the
/// indirection document. Nothing is cached between calls.
pub struct ManifestResolver<'a> {
    transport: &'a Transport,
    indirection_url: String,
}

impl<'a> ManifestResolver<'a> {
    pub fn new(transport: &'a Transport, indirection_url: impl Into<String>) -> Self {
        Self {
            transport,
            indirection_url: indirection_url.into(),
        }
    }

    pub fn indirection_url(&self) -> &str {
        &self.indirection_url
    }

    pub fn fetch_indirection(&self) -> Result<IndirectionDocument> {
        debug!("Fetching indirection document from {}", self.indirection_url);
        let document: Value = self.transport.fetch_json(&self.indirection_url)?;
        Ok(IndirectionDocument::new(&self.indirection_url, document))
    }

    pub fn resolve_manifest_url(&self, category: &str, region: &str) -> Result<String> {
        let document = self.fetch_indirection()?;
        let url = document.manifest_url(category, region)?;
        debug!("Resolved {category}/{region} to {url}");
        Ok(url.to_string())
    }

    pub fn resolve_channel(&self, manifest_url: &str, channel: &str) -> Result<ManifestChannel> {
        let document: Value = self.transport.fetch_json(manifest_url)?;
        let channel = ManifestChannel::from_document(manifest_url, &document, channel)?;
        info!(
            "Channel '{}' at {} is version {} ({} CDN mirrors)",
            channel.name,
            manifest_url,
            channel.version,
            channel.cdn_list.len()
        );
        Ok(channel)
    }

    /// Resolve every server one at a time. A server that fails is reported as
    /// unavailable and the rest are still resolved; only a failure to fetch the
    /// indirection document itself aborts the batch.
    pub fn list_versions(
        &self,
        servers: &[ServerOption],
        channel: &str,
    ) -> Result<Vec<VersionInfo>> {
        let document = self.fetch_indirection()?;

        let versions = servers
            .iter()
            .map(|server| match self.resolve_server(&document, server, channel) {
                Ok(info) => info,
                Err(e) => {
                    warn!("Failed to fetch version for {}: {e}", server.label);
                    VersionInfo::unavailable(server)
                }
            })
            .collect();

        Ok(versions)
    }

    fn resolve_server(
        &self,
        document: &IndirectionDocument,
        server: &ServerOption,
        channel: &str,
    ) -> Result<VersionInfo> {
        let manifest_url = document.manifest_url(&server.category, &server.region)?;
        let resolved = self.resolve_channel(manifest_url, channel)?;

        Ok(VersionInfo {
            label: server.label.clone(),
            category: server.category.clone(),
            region: server.region.clone(),
            version: resolved.version,
            index_url: manifest_url.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
