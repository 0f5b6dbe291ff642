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

pub mod client;
pub mod decode;

pub use client::{AttohttpcClient, HttpClient, HttpResponse};
pub use decode::decode_payload;

use crate::error::{Result, WwdlError};
use log::debug;
use serde::de::DeserializeOwned;
use std::io::Read;

/// GET-and-decode front end shared by every remote document fetch.
pub struct Transport {
    client: Box<dyn HttpClient>,
}

impl Transport {
    pub fn new(client: Box<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// Fetch the full response body. Any status outside 2xx is an error.
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {url}");
        let mut response = self.client.get(url)?;

        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(WwdlError::Transport {
                url: url.to_string(),
                status,
            });
        }

        let mut body = Vec::new();
        response
            .read_to_end(&mut body)
            .map_err(|e| WwdlError::Network {
                url: url.to_string(),
                message: format!("failed to read response body: {e}"),
            })?;

        debug!("Received {} bytes from {url}", body.len());
        Ok(body)
    }

    pub fn fetch_text(&self, url: &str) -> Result<String> {
        let body = self.fetch_bytes(url)?;
        Ok(decode_payload(&body))
    }

    pub fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let text = self.fetch_text(url)?;
        serde_json::from_str(&text).map_err(|source| WwdlError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(Box::new(AttohttpcClient::new()))
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
