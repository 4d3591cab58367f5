//! Blocking artifact download with SHA-256 verification.

use std::io::Read;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use sha2::{Digest, Sha256};

use crate::domain::artifact::hex_encode;

/// Hard cap on the response body; the remoting jar is ~1.5 MB.
pub const MAX_JAR_BYTES: u64 = 100 * 1024 * 1024;

const CHUNK_SIZE: usize = 64 * 1024;

/// A fetched artifact and its digest.
pub struct Download {
    pub bytes: Vec<u8>,
    pub sha256: String,
}

/// Fetch `url`, hashing as we read. The optional progress bar is advanced
/// per chunk.
///
/// # Errors
///
/// Returns an error if the request fails or the body cannot be read.
pub fn fetch(url: &str, progress: Option<&ProgressBar>) -> Result<Download> {
    let response = ureq::get(url)
        .call()
        .with_context(|| format!("downloading {url}"))?;

    let mut reader = response.into_reader().take(MAX_JAR_BYTES);
    let mut bytes = Vec::new();
    let mut hasher = Sha256::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader
            .read(&mut chunk)
            .with_context(|| format!("reading response from {url}"))?;
        if n == 0 {
            break;
        }
        hasher.update(&chunk[..n]);
        bytes.extend_from_slice(&chunk[..n]);
        if let Some(pb) = progress {
            pb.inc(n as u64);
        }
    }

    Ok(Download {
        bytes,
        sha256: hex_encode(&hasher.finalize()),
    })
}

/// Content length advertised by the server, if any.
///
/// Issues a `HEAD` request so the progress bar can be sized before the
/// download starts; failures simply mean an indeterminate spinner.
#[must_use]
pub fn content_length(url: &str) -> Option<u64> {
    let response = ureq::head(url).call().ok()?;
    response.header("Content-Length")?.parse().ok()
}

/// Compare a computed digest against an expected one (case-insensitive).
///
/// # Errors
///
/// Returns an error on mismatch.
pub fn verify_sha256(actual: &str, expected: &str) -> Result<()> {
    anyhow::ensure!(
        actual.eq_ignore_ascii_case(expected.trim()),
        "checksum mismatch: expected {expected}, got {actual}"
    );
    Ok(())
}
