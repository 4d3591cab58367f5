//! Filesystem helpers — atomic writes and log tailing.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Write a file atomically: temp file in the same directory, then rename.
///
/// Parent directories are created as needed. On unix the file ends up with
/// the given mode.
///
/// # Errors
///
/// Returns an error if the parent cannot be created or any write step fails.
pub fn write_atomic(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let temp_path = temp_sibling(path);
    std::fs::write(&temp_path, content)
        .with_context(|| format!("writing temp file {}", temp_path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(mode))
            .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("finalizing {}", path.display()))?;
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "file".to_string(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!("{name}.tmp"))
}

/// Last `n` lines of a text file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn tail_lines(path: &Path, n: usize) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut lines: Vec<String> = content.lines().rev().take(n).map(String::from).collect();
    lines.reverse();
    Ok(lines)
}

/// File length in bytes, `None` if the file does not exist.
#[must_use]
pub fn file_len(path: &Path) -> Option<u64> {
    std::fs::metadata(path).ok().map(|m| m.len())
}

/// Read the bytes appended past `offset`, returning them with the new length.
///
/// A shrunken file (rotation, truncation) resets the offset to zero.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn read_appended(path: &Path, offset: u64) -> Result<(Vec<u8>, u64)> {
    use std::io::{Seek, SeekFrom};

    let len = file_len(path).unwrap_or(0);
    let start = if len < offset { 0 } else { offset };
    if len == start {
        return Ok((Vec::new(), len));
    }

    let mut file =
        std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    file.seek(SeekFrom::Start(start))
        .with_context(|| format!("seeking in {}", path.display()))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok((buf, len))
}
