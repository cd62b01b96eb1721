//! Line-oriented access to the plant record file.
//!
//! Each call opens the file, does its work, and drops the handle before
//! returning, on success and on every error path.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("plant file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error on plant file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Read every line of `path` as raw bytes, without `\n` or `\r\n`
/// terminators.
///
/// Text decoding is left to the caller so that one undecodable line does
/// not make the rest of the file unreadable.
pub fn read_lines(path: &Path) -> Result<Vec<Vec<u8>>, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let mut lines = Vec::new();
    for line in BufReader::new(file).split(b'\n') {
        let mut line = line.map_err(|e| StoreError::io(path, e))?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        lines.push(line);
    }
    debug!(path = %path.display(), lines = lines.len(), "read plant file");
    Ok(lines)
}

/// Write `lines` to `path`, one per line, replacing any existing content.
/// The file is created if it does not exist yet.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<(), StoreError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if !path.exists() {
        debug!(path = %path.display(), "plant file does not exist, creating it");
    }
    let file = File::create(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    let mut count = 0usize;
    for line in lines {
        writeln!(writer, "{}", line.as_ref()).map_err(|e| StoreError::io(path, e))?;
        count += 1;
    }
    writer.flush().map_err(|e| StoreError::io(path, e))?;
    debug!(path = %path.display(), lines = count, "wrote plant file");
    Ok(())
}
