//! Atomic file replacement for the order table
//!
//! The whole table is written to a sibling `.tmp` file, flushed with
//! `sync_all`, then renamed over the live file. A crash leaves either the
//! previous table or the new one on disk, never a torn write.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

/// Result type for atomic operations
pub type AtomicResult<T> = Result<T, AtomicError>;

/// Errors that can occur during atomic operations
#[derive(Debug, Error)]
pub enum AtomicError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("target has no file name: {0}")]
    InvalidTarget(String),
}

/// Atomically replace `path` with whatever `write_fn` writes.
///
/// Parent directories are created on demand.
pub fn atomic_write_with<P, F>(path: P, write_fn: F) -> AtomicResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let path = path.as_ref();
    if path.file_name().is_none() {
        return Err(AtomicError::InvalidTarget(path.display().to_string()));
    }
    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&temp_path)?;
    if let Err(e) = write_fn(&mut file).and_then(|_| file.sync_all()) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Write `lines` as a JSON Lines file, replacing `path` atomically
pub fn atomic_write_lines<P, I>(path: P, lines: I) -> AtomicResult<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = String>,
{
    atomic_write_with(path, |file| {
        for line in lines {
            file.write_all(line.as_bytes())?;
            file.write_all(b"\n")?;
        }
        Ok(())
    })
}

/// Remove a leftover `.tmp` sibling of `path` from an interrupted write.
///
/// Returns whether a file was removed.
pub fn cleanup_temp_file<P: AsRef<Path>>(path: P) -> AtomicResult<bool> {
    let temp_path = path.as_ref().with_extension("tmp");
    if !temp_path.exists() {
        return Ok(false);
    }
    fs::remove_file(&temp_path)?;
    Ok(true)
}
