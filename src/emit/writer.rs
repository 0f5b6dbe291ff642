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

use crate::emit::accumulator::{ChecksumMode, EmissionAccumulator};
use crate::error::Result;
use crate::policy::InclusionPolicy;
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const URLS_SUFFIX: &str = "urls.txt";
pub const CHECKSUMS_SUFFIX: &str = "hashes.md5";
pub const DETAILS_SUFFIX: &str = "details.txt";

/// `<prefix>_<version>_`. Path separators in the version become `_` so the
/// name always stays inside the output directory.
pub fn name_prefix(prefix: &str, version: &str) -> String {
    let version = version.replace(['/', '\\'], "_");
    format!("{prefix}_{version}_")
}

/// File names for one run. The policy infix keeps runs with different
/// policies from overwriting each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    pub urls: String,
    pub checksums: String,
    pub details: String,
}

impl OutputNames {
    pub fn new(name_prefix: &str, policy: &InclusionPolicy) -> Self {
        let stem = format!("{name_prefix}{}", policy.name_infix());
        Self {
            urls: format!("{stem}{URLS_SUFFIX}"),
            checksums: format!("{stem}{CHECKSUMS_SUFFIX}"),
            details: format!("{stem}{DETAILS_SUFFIX}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFiles {
    pub urls_file: PathBuf,
    /// `None` when checksums are disabled.
    pub checksum_file: Option<PathBuf>,
    pub details_file: PathBuf,
}

pub fn render_urls(accumulator: &EmissionAccumulator) -> String {
    accumulator.urls.join("\n")
}

pub fn render_checksums(accumulator: &EmissionAccumulator) -> String {
    accumulator.checksum_lines.join("\n")
}

pub fn render_details(accumulator: &EmissionAccumulator) -> String {
    format!(
        "Total files: {}\nTotal size: {:.2} GB\n\n{}",
        accumulator.included_count,
        accumulator.total_size_gib(),
        accumulator.detail_lines.join("\n")
    )
}

/// Write the artifacts of a completed aggregation into `output_dir`.
///
/// Every artifact is rendered before anything touches the disk, and each file
/// is written to a temporary sibling first and then renamed into place.
pub fn emit(
    accumulator: EmissionAccumulator,
    output_dir: &Path,
    names: &OutputNames,
    mode: ChecksumMode,
) -> Result<EmittedFiles> {
    let urls = render_urls(&accumulator);
    let checksums = mode.is_enabled().then(|| render_checksums(&accumulator));
    let details = render_details(&accumulator);
    drop(accumulator);

    fs::create_dir_all(output_dir)?;

    let urls_file = write_atomic(output_dir, &names.urls, &urls)?;
    info!("URLs written to: {}", urls_file.display());

    let checksum_file = match checksums {
        Some(contents) => {
            let path = write_atomic(output_dir, &names.checksums, &contents)?;
            info!("MD5 hashes written to: {}", path.display());
            Some(path)
        }
        None => None,
    };

    let details_file = write_atomic(output_dir, &names.details, &details)?;
    info!("File details written to: {}", details_file.display());

    Ok(EmittedFiles {
        urls_file,
        checksum_file,
        details_file,
    })
}

fn write_atomic(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let target = dir.join(name);
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.persist(&target).map_err(|e| e.error)?;
    debug!("Wrote {} bytes to {}", contents.len(), target.display());
    Ok(target)
}
