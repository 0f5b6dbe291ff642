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

use crate::emit::formatting::{to_gib, to_mib};
use crate::policy::InclusionPolicy;
use crate::resource::ResourceEntry;

const UNKNOWN_EXTENSION: &str = "UNKNOWN";

/// How file names are written into checksum lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    Disabled,
    /// `<md5> *Client/Content/Paks/x.pak`, for a hash file at the game root.
    FullPath,
    /// `<md5> *x.pak`, for a hash file next to the downloaded files.
    FileNameOnly,
}

impl ChecksumMode {
    pub fn from_flags(enabled: bool, full_path: bool) -> Self {
        match (enabled, full_path) {
            (false, _) => Self::Disabled,
            (true, true) => Self::FullPath,
            (true, false) => Self::FileNameOnly,
        }
    }

    pub fn is_enabled(self) -> bool {
        self != Self::Disabled
    }

    fn checksum_line(self, entry: &ResourceEntry) -> Option<String> {
        let name = match self {
            Self::Disabled => return None,
            Self::FullPath => entry.relative_path(),
            Self::FileNameOnly => entry.file_name(),
        };
        Some(format!("{} *{}", entry.checksum, name))
    }
}

/// Outputs collected from the included entries of one run, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmissionAccumulator {
    pub urls: Vec<String>,
    pub checksum_lines: Vec<String>,
    pub detail_lines: Vec<String>,
    pub included_count: usize,
    /// Byte sum of the included entries, capped at `u64::MAX`.
    pub total_size: u64,
}

impl EmissionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: &ResourceEntry, resource_base_url: &str, mode: ChecksumMode) {
        self.urls
            .push(format!("{resource_base_url}{}", entry.destination));
        if let Some(line) = mode.checksum_line(entry) {
            self.checksum_lines.push(line);
        }
        self.detail_lines.push(detail_line(entry));
        self.included_count += 1;
        self.total_size = self.total_size.saturating_add(entry.size);
    }

    pub fn total_size_gib(&self) -> f64 {
        to_gib(self.total_size)
    }
}

pub fn aggregate(
    entries: &[ResourceEntry],
    policy: &InclusionPolicy,
    resource_base_url: &str,
    mode: ChecksumMode,
) -> EmissionAccumulator {
    let mut accumulator = EmissionAccumulator::new();
    for entry in entries.iter().filter(|e| policy.should_include(e)) {
        accumulator.push(entry, resource_base_url, mode);
    }
    accumulator
}

/// `<dest> | <MiB>MB (<GiB>GB) | <EXT> | <checksum>`
pub fn detail_line(entry: &ResourceEntry) -> String {
    format!(
        "{} | {:.1}MB ({:.3}GB) | {} | {}",
        entry.destination,
        to_mib(entry.size),
        to_gib(entry.size),
        display_extension(&entry.destination),
        entry.checksum
    )
}

/// Uppercased extension of the final path segment, or `UNKNOWN`.
pub fn display_extension(destination: &str) -> String {
    let file_name = destination.rsplit('/').next().unwrap_or(destination);
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_uppercase(),
        _ => UNKNOWN_EXTENSION.to_string(),
    }
}
