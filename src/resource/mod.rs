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

//! The per-build resource index: one flat list of downloadable files.

use crate::error::{Result, WwdlError};
use crate::transport::Transport;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field holding the entry array in a resource index document.
const RESOURCE_FIELD: &str = "resource";

/// One file listed by the resource index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Slash-separated path relative to the resource base, usually with a
    /// leading slash.
    #[serde(rename = "dest")]
    pub destination: String,
    pub size: u64,
    #[serde(rename = "md5", default)]
    pub checksum: String,
}

impl ResourceEntry {
    pub fn new(destination: impl Into<String>, size: u64, checksum: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            size,
            checksum: checksum.into(),
        }
    }

    /// Destination without its leading separator.
    pub fn relative_path(&self) -> &str {
        self.destination
            .strip_prefix('/')
            .unwrap_or(&self.destination)
    }

    /// Final path segment, or the whole destination when that segment is empty.
    pub fn file_name(&self) -> &str {
        match self.destination.rsplit('/').next() {
            Some(name) if !name.is_empty() => name,
            _ => &self.destination,
        }
    }
}

pub struct ResourceIndexFetcher<'a> {
    transport: &'a Transport,
}

impl<'a> ResourceIndexFetcher<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Fetch and validate the whole index. The index is never paginated.
    pub fn fetch(&self, url: &str) -> Result<Vec<ResourceEntry>> {
        let document: Value = self.transport.fetch_json(url)?;
        let entries = parse_resource_index(url, document)?;
        info!("Resource index lists {} entries", entries.len());
        Ok(entries)
    }
}

pub(crate) fn parse_resource_index(url: &str, document: Value) -> Result<Vec<ResourceEntry>> {
    let Value::Object(mut fields) = document else {
        return Err(WwdlError::schema(url, "resource index is not a JSON object"));
    };

    let items = match fields.remove(RESOURCE_FIELD) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(WwdlError::schema(
                url,
                format!("'{RESOURCE_FIELD}' is not an array"),
            ));
        }
        None => {
            return Err(WwdlError::schema(
                url,
                format!("missing '{RESOURCE_FIELD}' array"),
            ));
        }
    };

    debug!("Parsing {} resource entries from {url}", items.len());

    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| {
            let entry: ResourceEntry = serde_json::from_value(item).map_err(|e| {
                WwdlError::schema(url, format!("resource entry {position}: {e}"))
            })?;
            if entry.destination.is_empty() {
                return Err(WwdlError::schema(
                    url,
                    format!("resource entry {position} has an empty destination"),
                ));
            }
            Ok(entry)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    const URL: &str = "https://cdn.example/resource.json";

    #[test]
    fn test_parse_preserves_order() {
        let document = json!({
            "resource": [
                {"dest": "/Client/b.pak", "size": 20, "md5": "bb"},
                {"dest": "/Client/a.pak", "size": 10, "md5": "aa"},
            ]
        });

        let entries = parse_resource_index(URL, document).unwrap();
        assert_eq!(
            entries,
            vec![
                ResourceEntry::new("/Client/b.pak", 20, "bb"),
                ResourceEntry::new("/Client/a.pak", 10, "aa"),
            ]
        );
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let document = json!({
            "resource": [{"dest": "/x.exe", "size": 1, "md5": "m", "sampleHash": "zz"}],
            "patchInfos": []
        });

        let entries = parse_resource_index(URL, document).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_resource_field_is_schema_error() {
        let err = parse_resource_index(URL, json!({"files": []})).unwrap_err();
        match err {
            WwdlError::Schema { url, reason } => {
                assert_eq!(url, URL);
                assert!(reason.contains("missing 'resource'"));
            }
            other => panic!("Expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_resource_field_wrong_type() {
        let err = parse_resource_index(URL, json!({"resource": {}})).unwrap_err();
        assert!(matches!(err, WwdlError::Schema { .. }));

        let err = parse_resource_index(URL, json!([1, 2])).unwrap_err();
        assert!(matches!(err, WwdlError::Schema { .. }));
    }

    #[test]
    fn test_negative_size_is_rejected() {
        let document = json!({"resource": [{"dest": "/a", "size": -1, "md5": "x"}]});
        let err = parse_resource_index(URL, document).unwrap_err();
        assert!(err.to_string().contains(URL));
    }

    #[test]
    fn test_empty_destination_is_rejected() {
        let document = json!({"resource": [{"dest": "", "size": 5, "md5": "x"}]});
        let err = parse_resource_index(URL, document).unwrap_err();
        match err {
            WwdlError::Schema { reason, .. } => assert!(reason.contains("empty destination")),
            other => panic!("Expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_checksum_defaults_to_empty() {
        let document = json!({"resource": [{"dest": "/a.txt", "size": 5}]});
        let entries = parse_resource_index(URL, document).unwrap();
        assert_eq!(entries[0].checksum, "");
    }

    #[test]
    fn test_path_helpers() {
        let entry = ResourceEntry::new("/Client/Content/Paks/pakchunk0.pak", 1, "x");
        assert_eq!(entry.relative_path(), "Client/Content/Paks/pakchunk0.pak");
        assert_eq!(entry.file_name(), "pakchunk0.pak");

        let bare = ResourceEntry::new("launcher.exe", 1, "x");
        assert_eq!(bare.relative_path(), "launcher.exe");
        assert_eq!(bare.file_name(), "launcher.exe");

        let trailing = ResourceEntry::new("/dir/", 1, "x");
        assert_eq!(trailing.file_name(), "/dir/");
    }

    #[test]
    fn test_fetch_from_server() {
        let mut server = Server::new();
        let _m = server
            .mock("GET", "/resource.json")
            .with_status(200)
            .with_body(r#"{"resource":[{"dest":"/f.pak","size":2000,"md5":"abc"}]}"#)
            .create();

        let transport = Transport::default();
        let fetcher = ResourceIndexFetcher::new(&transport);
        let entries = fetcher
            .fetch(&format!("{}/resource.json", server.url()))
            .unwrap();

        assert_eq!(entries, vec![ResourceEntry::new("/f.pak", 2000, "abc")]);
    }
}
