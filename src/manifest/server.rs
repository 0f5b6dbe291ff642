use crate::error::{Result, WwdlError};
use serde::{Deserialize, Serialize};

/// Published indirection document listing manifest URLs per category/region.
pub const DEFAULT_INDIRECTION_URL: &str = "https://gist.githubusercontent.com/yuhkix/b8796681ac2cd3bab11b7e8cdc022254/raw/4435fd290c07f7f766a6d2ab09ed3096d83b02e3/wuwa.json";

/// Channel read when listing versions, whatever channel a run downloads from.
pub const DISCOVERY_CHANNEL: &str = "default";

/// Version reported for a server whose manifest could not be resolved.
pub const UNAVAILABLE_VERSION: &str = "unavailable";

/// A (category, region) pair to resolve, with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerOption {
    pub category: String,
    pub region: String,
    pub label: String,
}

impl ServerOption {
    pub fn new(
        category: impl Into<String>,
        region: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            region: region.into(),
            label: label.into(),
        }
    }
}

pub fn default_servers() -> Vec<ServerOption> {
    vec![
        ServerOption::new("live", "os", "Live - OS"),
        ServerOption::new("live", "cn", "Live - CN"),
        ServerOption::new("beta", "os", "Beta - OS"),
        ServerOption::new("beta", "cn", "Beta - CN"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub label: String,
    pub category: String,
    pub region: String,
    pub version: String,
    /// Manifest URL for this server; empty when resolution failed.
    pub index_url: String,
}

impl VersionInfo {
    pub fn unavailable(server: &ServerOption) -> Self {
        Self {
            label: server.label.clone(),
            category: server.category.clone(),
            region: server.region.clone(),
            version: UNAVAILABLE_VERSION.to_string(),
            index_url: String::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        !self.index_url.is_empty()
    }
}

/// Pick the entry labelled `label`, or the first available one.
pub fn select_version<'v>(
    versions: &'v [VersionInfo],
    label: Option<&str>,
) -> Result<&'v VersionInfo> {
    let unavailable = || WwdlError::NoAvailableVersion {
        labels: versions.iter().map(|v| v.label.clone()).collect(),
    };

    match label {
        Some(label) => {
            let info = versions
                .iter()
                .find(|v| v.label == label)
                .ok_or_else(|| WwdlError::ServerNotFound(label.to_string()))?;
            if info.is_available() {
                Ok(info)
            } else {
                Err(WwdlError::NoAvailableVersion {
                    labels: vec![info.label.clone()],
                })
            }
        }
        None => versions
            .iter()
            .find(|v| v.is_available())
            .ok_or_else(unavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available(label: &str, version: &str) -> VersionInfo {
        VersionInfo {
            label: label.to_string(),
            category: "live".to_string(),
            region: "os".to_string(),
            version: version.to_string(),
            index_url: format!("https://x/{version}.json"),
        }
    }

    #[test]
    fn test_default_servers_order() {
        let labels: Vec<_> = default_servers().into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Live - OS", "Live - CN", "Beta - OS", "Beta - CN"]);
    }

    #[test]
    fn test_unavailable_entry() {
        let info = VersionInfo::unavailable(&ServerOption::new("beta", "cn", "Beta - CN"));
        assert_eq!(info.version, "unavailable");
        assert_eq!(info.index_url, "");
        assert!(!info.is_available());
    }

    #[test]
    fn test_select_first_available() {
        let versions = vec![
            VersionInfo::unavailable(&ServerOption::new("live", "os", "Live - OS")),
            available("Live - CN", "2.1.0"),
            available("Beta - OS", "2.2.0"),
        ];

        let selected = select_version(&versions, None).unwrap();
        assert_eq!(selected.label, "Live - CN");
    }

    #[test]
    fn test_select_by_label() {
        let versions = vec![available("Live - OS", "2.1.0"), available("Beta - OS", "2.2.0")];
        let selected = select_version(&versions, Some("Beta - OS")).unwrap();
        assert_eq!(selected.version, "2.2.0");
    }

    #[test]
    fn test_select_unknown_label() {
        let versions = vec![available("Live - OS", "2.1.0")];
        let err = select_version(&versions, Some("Beta - XX")).unwrap_err();
        assert!(matches!(err, WwdlError::ServerNotFound(ref l) if l == "Beta - XX"));
    }

    #[test]
    fn test_select_unavailable_label() {
        let versions = vec![VersionInfo::unavailable(&ServerOption::new(
            "live", "os", "Live - OS",
        ))];
        let err = select_version(&versions, Some("Live - OS")).unwrap_err();
        assert!(matches!(err, WwdlError::NoAvailableVersion { .. }));
    }

    #[test]
    fn test_select_none_available() {
        let versions: Vec<VersionInfo> = default_servers()
            .iter()
            .map(VersionInfo::unavailable)
            .collect();

        match select_version(&versions, None).unwrap_err() {
            WwdlError::NoAvailableVersion { labels } => assert_eq!(labels.len(), 4),
            other => panic!("Expected NoAvailableVersion, got {other:?}"),
        }
    }
}
