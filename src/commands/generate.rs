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

use crate::config::WwdlConfig;
use crate::emit::formatting::to_gib;
use crate::error::Result;
use crate::indicator::new_progress;
use crate::manifest::select_version;
use crate::pipeline::{Pipeline, RunReport};
use crate::transport::Transport;
use colored::*;
use log::info;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Server label to use instead of the first available one.
    pub server: Option<String>,
    /// Skip version discovery and use this manifest directly.
    pub manifest_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub no_progress: bool,
}

pub struct GenerateCommand<'a> {
    config: &'a WwdlConfig,
    transport: Transport,
}

impl<'a> GenerateCommand<'a> {
    pub fn new(config: &'a WwdlConfig) -> Result<Self> {
        Ok(Self::with_transport(config, Transport::default()))
    }

    pub fn with_transport(config: &'a WwdlConfig, transport: Transport) -> Self {
        Self { config, transport }
    }

    pub fn execute(&self, options: &GenerateOptions) -> Result<()> {
        let report = self.run(options)?;

        println!(
            "Found {} resources to download ({:.2} GB)",
            report.included_count,
            to_gib(report.total_size)
        );
        println!("URLs written to: {}", report.files.urls_file.display());
        if let Some(path) = &report.files.checksum_file {
            println!("MD5 hashes written to: {}", path.display());
        }
        println!(
            "File details written to: {}",
            report.files.details_file.display()
        );
        println!(
            "{} Download preparation completed successfully!",
            "✓".green().bold()
        );

        Ok(())
    }

    pub fn run(&self, options: &GenerateOptions) -> Result<RunReport> {
        let pipeline = Pipeline::new(self.config, &self.transport);

        let manifest_url = match &options.manifest_url {
            Some(url) => url.clone(),
            None => {
                let versions = pipeline.discover()?;

                println!("Available versions:");
                for (position, info) in versions.iter().enumerate() {
                    let version = if info.is_available() {
                        info.version.normal()
                    } else {
                        info.version.red()
                    };
                    println!("{}. {} ({})", position + 1, info.label, version);
                }

                let selected = select_version(&versions, options.server.as_deref())?;
                println!("Selected: {} ({})", selected.label, selected.version.bold());
                selected.index_url.clone()
            }
        };

        let output_dir = options
            .output_dir
            .clone()
            .unwrap_or_else(|| self.config.output.directory.clone());
        info!("Writing output to {}", output_dir.display());

        let mut progress = new_progress(options.no_progress);
        pipeline.run(&manifest_url, &output_dir, progress.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WwdlError;
    use mockito::Server;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_with_server_label() {
        let mut server = Server::new();
        let base = server.url();
        let gist = format!(r#"{{"live":{{"os":"{base}/os.json","cn":"{base}/cn.json"}}}}"#);
        let manifest = format!(
            r#"{{"default":{{"version":"3.1","cdnList":[{{"url":"{base}/"}}],"resources":"idx.json","resourcesBasePath":"pkg"}}}}"#
        );

        let _gist = server
            .mock("GET", "/gist.json")
            .with_status(200)
            .with_body(gist)
            .create();
        let _os = server
            .mock("GET", "/os.json")
            .with_status(200)
            .with_body(manifest.clone())
            .create();
        let _cn = server
            .mock("GET", "/cn.json")
            .with_status(200)
            .with_body(manifest)
            .create();
        let _idx = server
            .mock("GET", "/idx.json")
            .with_status(200)
            .with_body(
                r#"{"resource":[{"dest":"/a.pak","size":4096,"md5":"aa"},{"dest":"/b.txt","size":12,"md5":"bb"}]}"#,
            )
            .create();

        let out = TempDir::new().unwrap();
        let mut config = WwdlConfig::default();
        config.source.indirection_url = format!("{base}/gist.json");
        config.source.cdn_index = 0;

        let command = GenerateCommand::new(&config).unwrap();
        let report = command
            .run(&GenerateOptions {
                server: Some("Live - CN".to_string()),
                output_dir: Some(out.path().to_path_buf()),
                no_progress: true,
                ..GenerateOptions::default()
            })
            .unwrap();

        assert_eq!(report.version, "3.1");
        assert_eq!(report.total_entries, 2);
        assert_eq!(report.included_count, 1);
        assert_eq!(
            fs::read_to_string(out.path().join("wuwa_3.1_urls.txt")).unwrap(),
            format!("{base}/pkg/a.pak")
        );
    }

    #[test]
    fn test_run_unknown_server_label() {
        let mut server = Server::new();
        let _gist = server
            .mock("GET", "/gist.json")
            .with_status(200)
            .with_body("{}")
            .create();

        let mut config = WwdlConfig::default();
        config.source.indirection_url = format!("{}/gist.json", server.url());

        let command = GenerateCommand::new(&config).unwrap();
        let err = command
            .run(&GenerateOptions {
                server: Some("Nowhere".to_string()),
                no_progress: true,
                ..GenerateOptions::default()
            })
            .unwrap_err();

        assert!(matches!(err, WwdlError::ServerNotFound(_)));
    }

    #[test]
    fn test_run_nothing_available() {
        let mut server = Server::new();
        let _gist = server
            .mock("GET", "/gist.json")
            .with_status(200)
            .with_body("{}")
            .create();

        let mut config = WwdlConfig::default();
        config.source.indirection_url = format!("{}/gist.json", server.url());

        let command = GenerateCommand::new(&config).unwrap();
        let err = command
            .run(&GenerateOptions {
                no_progress: true,
                ..GenerateOptions::default()
            })
            .unwrap_err();

        assert!(matches!(err, WwdlError::NoAvailableVersion { .. }));
    }
}
