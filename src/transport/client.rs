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
use crate::user_agent;
use attohttpc::{Response, Session};
use std::io::{self, Read};

#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str) -> Result<Box<dyn HttpResponse>>;
}

pub trait HttpResponse: Read + Send {
    fn status(&self) -> u16;
}

/// Blocking client with platform default timeouts. Content-Encoding is not
/// negotiated; payload compression is detected by [`super::decode`].
pub struct AttohttpcClient {
    user_agent: String,
}

impl AttohttpcClient {
    pub fn new() -> Self {
        Self {
            user_agent: user_agent::transport_client(),
        }
    }
}

impl Default for AttohttpcClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for AttohttpcClient {
    fn get(&self, url: &str) -> Result<Box<dyn HttpResponse>> {
        let mut session = Session::new();
        session.proxy_settings(attohttpc::ProxySettings::from_env());

        let response = session
            .get(url)
            .header("User-Agent", &self.user_agent)
            .follow_redirects(true)
            .send()
            .map_err(|e| WwdlError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Box::new(AttohttpcResponse { response }))
    }
}

struct AttohttpcResponse {
    response: Response,
}

impl Read for AttohttpcResponse {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.response.read(buf)
    }
}

impl HttpResponse for AttohttpcResponse {
    fn status(&self) -> u16 {
        self.response.status().as_u16()
    }
}
