//! Payload decoding.
//!
//! Compression is detected from the first two bytes of the body rather than
//! from response headers. A body that looks like gzip but fails to inflate is
//! decoded as-is.

use flate2::read::MultiGzDecoder;
use log::{trace, warn};
use std::io::{self, Read};

pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Turn a response body into text, inflating it first when it carries the
/// gzip magic number. Never fails.
pub fn decode_payload(bytes: &[u8]) -> String {
    if is_gzip(bytes) {
        match gunzip(bytes) {
            Ok(inflated) => {
                trace!("Inflated {} bytes to {}", bytes.len(), inflated.len());
                return bytes_to_text(&inflated);
            }
            Err(e) => {
                warn!("Failed to decompress gzipped content ({e}), trying as plain text");
            }
        }
    }

    bytes_to_text(bytes)
}

fn gunzip(bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = MultiGzDecoder::new(bytes);
    let mut inflated = Vec::new();
    decoder.read_to_end(&mut inflated)?;
    Ok(inflated)
}

fn bytes_to_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text.into_owned(),
    }
}
