//! Checking local files against a generated `hashes.md5` list.

use crate::error::{Result, WwdlError};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

const CHECKSUM_CHUNK_SIZE: usize = 8192;

pub fn calculate_md5(file_path: &Path) -> Result<String> {
    let mut file = File::open(file_path)?;
    let mut context = md5::Context::new();
    let mut buffer = vec![0u8; CHECKSUM_CHUNK_SIZE];

    loop {
        match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => context.consume(&buffer[..n]),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(format!("{:x}", context.compute()))
}

/// One `<hex> *<name>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumLine {
    pub checksum: String,
    pub name: String,
}

pub fn parse_checksum_line(line: &str) -> Option<ChecksumLine> {
    let (checksum, name) = line.split_once(" *")?;
    if checksum.is_empty()
        || name.is_empty()
        || !checksum.chars().all(|c| c.is_ascii_hexdigit())
    {
        return None;
    }
    Some(ChecksumLine {
        checksum: checksum.to_ascii_lowercase(),
        name: name.to_string(),
    })
}

pub fn read_checksum_file(path: &Path) -> Result<Vec<ChecksumLine>> {
    let contents = fs::read_to_string(path)?;
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            parse_checksum_line(line.trim_end()).ok_or_else(|| {
                WwdlError::schema(
                    path.display().to_string(),
                    format!("line {} is not '<md5> *<name>': {line}", number + 1),
                )
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub checked: usize,
    pub missing: Vec<String>,
    pub mismatched: Vec<String>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty() && self.mismatched.is_empty()
    }

    pub fn failed(&self) -> usize {
        self.missing.len() + self.mismatched.len()
    }
}

/// Check every file listed in `hashes_file`, resolving names against `root`.
pub fn verify_hashes(hashes_file: &Path, root: &Path) -> Result<VerifyReport> {
    let lines = read_checksum_file(hashes_file)?;
    let mut report = VerifyReport::default();

    for line in lines {
        report.checked += 1;
        let path: PathBuf = root.join(&line.name);
        if !path.is_file() {
            log::debug!("Missing {}", path.display());
            report.missing.push(line.name);
            continue;
        }

        let actual = calculate_md5(&path)?;
        if actual != line.checksum {
            log::debug!(
                "Checksum mismatch for {}: expected {}, got {actual}",
                path.display(),
                line.checksum
            );
            report.mismatched.push(line.name);
        }
    }

    Ok(report)
}
