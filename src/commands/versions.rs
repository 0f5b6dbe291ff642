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
use crate::error::Result;
use crate::manifest::VersionInfo;
use crate::pipeline::Pipeline;
use crate::transport::Transport;
use comfy_table::{Cell, Color, Table};

pub struct VersionsCommand<'a> {
    config: &'a WwdlConfig,
    transport: Transport,
}

impl<'a> VersionsCommand<'a> {
    pub fn new(config: &'a WwdlConfig) -> Result<Self> {
        Ok(Self::with_transport(config, Transport::default()))
    }

    pub fn with_transport(config: &'a WwdlConfig, transport: Transport) -> Self {
        Self { config, transport }
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let versions = Pipeline::new(self.config, &self.transport).discover()?;

        if json {
            println!("{}", serde_json::to_string_pretty(&versions)?);
        } else {
            println!("{}", render_versions(&versions));
        }

        Ok(())
    }
}

pub(crate) fn render_versions(versions: &[VersionInfo]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Server"),
        Cell::new("Category/Region"),
        Cell::new("Version"),
    ]);

    for (position, info) in versions.iter().enumerate() {
        let version = if info.is_available() {
            Cell::new(&info.version)
        } else {
            Cell::new(&info.version).fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(position + 1),
            Cell::new(&info.label),
            Cell::new(format!("{}/{}", info.category, info.region)),
            version,
        ]);
    }

    table
}
