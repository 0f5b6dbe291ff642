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

//! Inclusion policy: decides which resource entries end up in the output.
//!
//! The three modes are priority tiers, not composable filters:
//! include-all beats big-paks-only, which beats the extension allow-list.

use crate::resource::ResourceEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_BIG_PAKS_MIN_SIZE: u64 = 100_000_000;
pub const DEFAULT_MIN_FILE_SIZE: u64 = 1024;
const PAK_EXTENSION: &str = ".pak";

const DEFAULT_INCLUDE_EXTENSIONS: &[&str] = &[
    ".pak", ".pck", ".exe", ".dll", ".json", ".png", ".sig", ".txt", ".ttf", ".otf", ".wav",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InclusionPolicy {
    /// Emit only `.pak` files of at least `big_paks_min_size` bytes.
    pub big_paks_only: bool,
    pub big_paks_min_size: u64,
    /// Emit every file of at least `min_file_size` bytes regardless of type.
    pub include_all_files: bool,
    pub include_extensions: Vec<String>,
    pub min_file_size: u64,
}

impl Default for InclusionPolicy {
    fn default() -> Self {
        Self {
            big_paks_only: false,
            big_paks_min_size: DEFAULT_BIG_PAKS_MIN_SIZE,
            include_all_files: true,
            include_extensions: DEFAULT_INCLUDE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            min_file_size: DEFAULT_MIN_FILE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyMode {
    IncludeAll,
    BigPaksOnly,
    ExtensionAllowList,
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncludeAll => write!(f, "all files"),
            Self::BigPaksOnly => write!(f, "big paks only"),
            Self::ExtensionAllowList => write!(f, "extension allow-list"),
        }
    }
}

impl InclusionPolicy {
    pub fn include_all(min_file_size: u64) -> Self {
        Self {
            include_all_files: true,
            min_file_size,
            ..Self::default()
        }
    }

    pub fn big_paks(big_paks_min_size: u64) -> Self {
        Self {
            include_all_files: false,
            big_paks_only: true,
            big_paks_min_size,
            ..Self::default()
        }
    }

    pub fn extensions<I, S>(extensions: I, min_file_size: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include_all_files: false,
            big_paks_only: false,
            include_extensions: extensions.into_iter().map(Into::into).collect(),
            min_file_size,
            ..Self::default()
        }
    }

    /// The tier that decides inclusion when several flags are set.
    pub fn mode(&self) -> PolicyMode {
        if self.include_all_files {
            PolicyMode::IncludeAll
        } else if self.big_paks_only {
            PolicyMode::BigPaksOnly
        } else {
            PolicyMode::ExtensionAllowList
        }
    }

    pub fn should_include(&self, entry: &ResourceEntry) -> bool {
        match self.mode() {
            PolicyMode::IncludeAll => entry.size >= self.min_file_size,
            PolicyMode::BigPaksOnly => {
                lowercase_extension(&entry.destination) == PAK_EXTENSION
                    && entry.size >= self.big_paks_min_size
            }
            PolicyMode::ExtensionAllowList => {
                let extension = lowercase_extension(&entry.destination);
                self.include_extensions.contains(&extension)
                    && entry.size >= self.min_file_size
            }
        }
    }

    /// Output file name infix. Derived from the raw flags, not from [`Self::mode`],
    /// so runs with different flag sets never share file names.
    pub fn name_infix(&self) -> String {
        let mut infix = String::new();
        if self.big_paks_only {
            infix.push_str("bigpaks_");
        }
        if !self.include_all_files {
            infix.push_str("filtered_");
        }
        infix
    }
}

pub fn should_include(entry: &ResourceEntry, policy: &InclusionPolicy) -> bool {
    policy.should_include(entry)
}

/// `.` followed by the lowercased text after the final `.` of `destination`.
/// A destination without any `.` yields the whole lowercased path.
pub fn lowercase_extension(destination: &str) -> String {
    let tail = destination.rsplit('.').next().unwrap_or(destination);
    format!(".{}", tail.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(destination: &str, size: u64) -> ResourceEntry {
        ResourceEntry::new(destination, size, "d41d8cd98f00b204e9800998ecf8427e")
    }

    #[test]
    fn test_default_policy() {
        let policy = InclusionPolicy::default();
        assert_eq!(policy.mode(), PolicyMode::IncludeAll);
        assert_eq!(policy.min_file_size, 1024);
        assert_eq!(policy.big_paks_min_size, 100_000_000);
        assert_eq!(policy.include_extensions.len(), 11);
        assert_eq!(policy.name_infix(), "");
    }

    #[test]
    fn test_include_all_size_boundary() {
        let policy = InclusionPolicy::include_all(1024);
        assert!(!policy.should_include(&entry("/a.bin", 1023)));
        assert!(policy.should_include(&entry("/a.bin", 1024)));
    }

    #[test]
    fn test_include_all_ignores_extension_and_big_pak_settings() {
        let policy = InclusionPolicy {
            include_all_files: true,
            big_paks_only: true,
            big_paks_min_size: u64::MAX,
            include_extensions: vec![],
            min_file_size: 10,
        };
        assert_eq!(policy.mode(), PolicyMode::IncludeAll);
        assert!(policy.should_include(&entry("/noext", 10)));
        assert!(policy.should_include(&entry("/x.pck", 10)));
    }

    #[test]
    fn test_big_paks_only() {
        let policy = InclusionPolicy::big_paks(100_000_000);
        assert!(policy.should_include(&entry("a.pak", 100_000_000)));
        assert!(!policy.should_include(&entry("a.pck", 999_000_000)));
        assert!(!policy.should_include(&entry("a.pak", 99_999_999)));
        assert!(policy.should_include(&entry("/Paks/A.PAK", 200_000_000)));
    }

    #[test]
    fn test_big_paks_takes_precedence_over_extensions() {
        let policy = InclusionPolicy {
            big_paks_only: true,
            include_all_files: false,
            include_extensions: vec![".png".to_string()],
            min_file_size: 0,
            big_paks_min_size: 1,
        };
        assert_eq!(policy.mode(), PolicyMode::BigPaksOnly);
        assert!(!policy.should_include(&entry("x.png", 4096)));
    }

    #[test]
    fn test_extension_allow_list_is_case_insensitive() {
        let policy = InclusionPolicy::extensions([".png"], 1024);
        assert!(policy.should_include(&entry("x.PNG", 2048)));
        assert!(!policy.should_include(&entry("x.png", 1000)));
        assert!(!policy.should_include(&entry("x.jpg", 2048)));

        // Only the entry side is lowercased; the allow-list is matched as written.
        let upper = InclusionPolicy::extensions([".PNG"], 1024);
        assert!(!upper.should_include(&entry("x.PNG", 2048)));
        assert!(!upper.should_include(&entry("x.png", 2048)));
    }

    #[test]
    fn test_destination_without_dot_is_excluded() {
        let allow = InclusionPolicy::extensions([".pak", ".txt"], 0);
        assert!(!allow.should_include(&entry("/Client/Binaries/launcher", 5000)));

        let big = InclusionPolicy::big_paks(0);
        assert!(!big.should_include(&entry("pak", 5000)));
    }

    #[test]
    fn test_lowercase_extension() {
        assert_eq!(lowercase_extension("/a/b/File.PaK"), ".pak");
        assert_eq!(lowercase_extension("/a/NoExt"), "./a/noext");
        assert_eq!(lowercase_extension("archive.tar.gz"), ".gz");
        assert_eq!(lowercase_extension("trailing."), ".");
        assert_eq!(lowercase_extension("/v1.2/readme"), ".2/readme");
    }

    #[test]
    fn test_should_include_is_pure() {
        let policy = InclusionPolicy::extensions([".pak"], 100);
        let before = policy.clone();
        let item = entry("/x.pak", 150);
        let item_before = item.clone();

        let first = should_include(&item, &policy);
        let second = should_include(&item, &policy);

        assert_eq!(first, second);
        assert_eq!(policy, before);
        assert_eq!(item, item_before);
    }

    #[test]
    fn test_name_infix() {
        assert_eq!(InclusionPolicy::include_all(0).name_infix(), "");
        assert_eq!(InclusionPolicy::big_paks(0).name_infix(), "bigpaks_filtered_");
        assert_eq!(
            InclusionPolicy::extensions([".pak"], 0).name_infix(),
            "filtered_"
        );

        let both = InclusionPolicy {
            big_paks_only: true,
            include_all_files: true,
            ..InclusionPolicy::default()
        };
        assert_eq!(both.name_infix(), "bigpaks_");
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(PolicyMode::IncludeAll.to_string(), "all files");
        assert_eq!(PolicyMode::BigPaksOnly.to_string(), "big paks only");
        assert_eq!(
            PolicyMode::ExtensionAllowList.to_string(),
            "extension allow-list"
        );
    }
}
