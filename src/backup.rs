//! Timestamped backup copies written next to a document when it is opened.

use crate::error::{EditorError, Result};
use crate::statics;
use chrono::NaiveDateTime;
use log::warn;
use serde::Deserialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// How a backup file is named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupStyle {
    /// `lore.json.backup_20240101_120000`
    #[default]
    Suffix,
    /// `lore_backup_20240101_120000.json`
    Stem,
}

/// Candidate backup path. `attempt` > 0 adds a `_N` disambiguator.
pub fn backup_name(original: &Path, style: BackupStyle, stamp: &str, attempt: usize) -> PathBuf {
    let counter = if attempt == 0 {
        String::new()
    } else {
        format!("_{attempt}")
    };
    let file_name = original
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match style {
        BackupStyle::Suffix => format!("{file_name}.{}_{stamp}{counter}", statics::BACKUP_TAG),
        BackupStyle::Stem => {
            let stem = original
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let ext = original
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            format!("{stem}_{}_{stamp}{counter}{ext}", statics::BACKUP_TAG)
        }
    };
    original.with_file_name(name)
}

/// Write `bytes` to a fresh backup path for `original`. Existing files are
/// never overwritten; a numeric suffix is added until a free name is found.
pub fn write_backup(
    original: &Path,
    bytes: &[u8],
    style: BackupStyle,
    now: NaiveDateTime,
) -> Result<PathBuf> {
    write_backup_with(original, bytes, style, now, write_fully)
}

fn write_backup_with(
    original: &Path,
    bytes: &[u8],
    style: BackupStyle,
    now: NaiveDateTime,
    write: impl Fn(File, &[u8]) -> io::Result<()>,
) -> Result<PathBuf> {
    let stamp = now.format(statics::BACKUP_TIMESTAMP_FORMAT).to_string();
    let mut attempt = 0;
    loop {
        let path = backup_name(original, style, &stamp, attempt);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                if let Err(e) = write(file, bytes) {
                    // A short file with a valid backup name would pass for a real backup.
                    if let Err(rm) = fs::remove_file(&path) {
                        warn!("could not remove partial backup {}: {rm}", path.display());
                    }
                    return Err(EditorError::io(path, e));
                }
                return Ok(path);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(EditorError::io(path, e)),
        }
    }
}

fn write_fully(mut file: File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes)?;
    file.flush()
}
