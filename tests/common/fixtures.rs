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

use flate2::Compression;
use flate2::write::GzEncoder;
use mockito::{Mock, Server, ServerGuard};
use std::io::Write;

/// A local stand-in for the indirection host, the manifest host and the CDN.
///
/// Mocks are kept alive for as long as the fixture is.
pub struct MockCdn {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

impl MockCdn {
    pub fn new() -> Self {
        Self {
            server: Server::new(),
            mocks: Vec::new(),
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    pub fn serve(&mut self, path: &str, body: &str) -> &mut Self {
        let mock = self
            .server
            .mock("GET", path)
            .with_status(200)
            .with_body(body)
            .create();
        self.mocks.push(mock);
        self
    }

    pub fn serve_gzip(&mut self, path: &str, body: &str) -> &mut Self {
        let mock = self
            .server
            .mock("GET", path)
            .with_status(200)
            .with_body(gzip(body))
            .create();
        self.mocks.push(mock);
        self
    }

    pub fn fail(&mut self, path: &str, status: usize) -> &mut Self {
        let mock = self.server.mock("GET", path).with_status(status).create();
        self.mocks.push(mock);
        self
    }
}

pub fn gzip(body: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

pub fn manifest_body(version: &str, cdn_url: &str, resources: &str, base_path: &str) -> String {
    format!(
        r#"{{"default":{{"version":"{version}","cdnList":[{{"url":"{cdn_url}"}}],"resources":"{resources}","resourcesBasePath":"{base_path}"}}}}"#
    )
}
