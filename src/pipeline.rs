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

//! One sequential run: manifest → resource index → filter → write.

use crate::config::WwdlConfig;
use crate::emit::formatting::format_size;
use crate::emit::{EmittedFiles, OutputNames, aggregate, emit, name_prefix};
use crate::error::Result;
use crate::indicator::ProgressIndicator;
use crate::manifest::{DISCOVERY_CHANNEL, ManifestChannel, ManifestResolver, VersionInfo};
use crate::resource::ResourceIndexFetcher;
use crate::transport::Transport;
use log::info;
use std::path::Path;

/// Everything resolved from the manifest for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub channel: ManifestChannel,
    pub cdn_index: usize,
    pub resource_index_url: String,
    pub resource_base_url: String,
}

impl RunContext {
    pub fn version(&self) -> &str {
        &self.channel.version
    }

    pub fn manifest_url(&self) -> &str {
        &self.channel.manifest_url
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub version: String,
    pub total_entries: usize,
    pub included_count: usize,
    pub total_size: u64,
    pub declared_size: Option<u64>,
    pub files: EmittedFiles,
}

pub struct Pipeline<'a> {
    config: &'a WwdlConfig,
    transport: &'a Transport,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a WwdlConfig, transport: &'a Transport) -> Self {
        Self { config, transport }
    }

    pub fn resolver(&self) -> ManifestResolver<'a> {
        ManifestResolver::new(self.transport, &self.config.source.indirection_url)
    }

    /// Version discovery across the configured servers. Always reads the
    /// `default` channel so that servers without a pre-download still report
    /// their live version.
    pub fn discover(&self) -> Result<Vec<VersionInfo>> {
        self.resolver()
            .list_versions(&self.config.source.servers, DISCOVERY_CHANNEL)
    }

    pub fn prepare(&self, manifest_url: &str) -> Result<RunContext> {
        let source = &self.config.source;
        let channel = self
            .resolver()
            .resolve_channel(manifest_url, &source.release_channel)?;

        let resource_index_url = channel.resource_index_url(source.cdn_index)?;
        let resource_base_url = channel.resource_base_url(source.cdn_index)?;
        info!("Using CDN {}: {}", source.cdn_index, channel.cdn(source.cdn_index)?.url);

        Ok(RunContext {
            channel,
            cdn_index: source.cdn_index,
            resource_index_url,
            resource_base_url,
        })
    }

    /// Fetch, filter and write. Nothing is written unless every fetch and
    /// parse step succeeded.
    pub fn run(
        &self,
        manifest_url: &str,
        output_dir: &Path,
        progress: &mut dyn ProgressIndicator,
    ) -> Result<RunReport> {
        progress.start("Fetching manifest".to_string());
        let fetched = self.prepare(manifest_url).and_then(|context| {
            progress.set_message(format!("Fetching resource index for {}", context.version()));
            let entries =
                ResourceIndexFetcher::new(self.transport).fetch(&context.resource_index_url)?;
            Ok((context, entries))
        });

        let (context, entries) = match fetched {
            Ok(fetched) => {
                progress.complete(None);
                fetched
            }
            Err(e) => {
                progress.error(e.to_string());
                return Err(e);
            }
        };

        info!("Processing {} total resources...", entries.len());

        let mode = self.config.checksum.mode();
        let accumulator = aggregate(
            &entries,
            &self.config.policy,
            &context.resource_base_url,
            mode,
        );
        let included_count = accumulator.included_count;
        let total_size = accumulator.total_size;

        info!(
            "Found {included_count} resources to download ({})",
            format_size(total_size)
        );
        if let Some(declared) = context.channel.declared_size {
            info!("Manifest declares a total size of {}", format_size(declared));
        }

        let names = OutputNames::new(
            &name_prefix(&self.config.output.prefix, context.version()),
            &self.config.policy,
        );
        let files = emit(accumulator, output_dir, &names, mode)?;

        Ok(RunReport {
            version: context.version().to_string(),
            total_entries: entries.len(),
            included_count,
            total_size,
            declared_size: context.channel.declared_size,
            files,
        })
    }
}
