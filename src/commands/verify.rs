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

use crate::checksum::verify_hashes;
use crate::error::{Result, WwdlError};
use colored::*;
use std::path::Path;

pub struct VerifyCommand;

impl VerifyCommand {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }

    /// Check files listed in `hashes_file`. Names resolve against `root`, or
    /// against the directory holding the hash file.
    pub fn execute(&self, hashes_file: &Path, root: Option<&Path>) -> Result<()> {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => hashes_file
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        let report = verify_hashes(hashes_file, &root)?;

        for name in &report.missing {
            println!("{} {name} (missing)", "✗".red());
        }
        for name in &report.mismatched {
            println!("{} {name} (checksum mismatch)", "✗".red());
        }

        if !report.is_ok() {
            let mut files = report.missing.clone();
            files.extend(report.mismatched.iter().cloned());
            return Err(WwdlError::ChecksumMismatch {
                checked: report.checked,
                failed: report.failed(),
                files,
            });
        }

        println!(
            "{} All {} files verified",
            "✓".green().bold(),
            report.checked
        );
        Ok(())
    }
}
