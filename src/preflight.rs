//! Pre-flight inspection of the destination directory.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Observed state of the destination before anything is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    /// Exists and contains no entries
    Empty,
    /// Exists and contains at least one entry
    NonEmpty,
    /// Does not exist yet, generation will create it
    Missing,
}

impl DirectoryState {
    /// Only a populated destination needs the operator's consent.
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, DirectoryState::NonEmpty)
    }
}

/// Lists the destination and classifies it.
///
/// # Errors
/// * `Error::PreflightReadError` if the listing fails for any reason other
///   than the directory not existing (permissions, path is a file, ...)
pub fn check_directory<P: AsRef<Path>>(path: P) -> Result<DirectoryState> {
    let path = path.as_ref();
    let read_error = |source| Error::PreflightReadError {
        path: path.display().to_string(),
        source,
    };

    let state = match fs::read_dir(path) {
        Ok(mut entries) => match entries.next() {
            None => DirectoryState::Empty,
            Some(Ok(_)) => DirectoryState::NonEmpty,
            Some(Err(e)) => return Err(read_error(e)),
        },
        Err(e) if e.kind() == ErrorKind::NotFound => DirectoryState::Missing,
        Err(e) => return Err(read_error(e)),
    };

    debug!("Destination '{}' is {:?}", path.display(), state);
    Ok(state)
}
