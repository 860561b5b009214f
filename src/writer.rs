//! Filesystem materialization with explicit permission bits.

use crate::error::{Error, Result};
use log::debug;
use std::fs::{DirBuilder, OpenOptions};
use std::io::Write;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};

/// Default mode for generated files and directories.
pub const MODE_0666: u32 = 0o666;
/// Mode for directories and the executable launch script.
pub const MODE_0755: u32 = 0o755;

/// Creates directories and files, reporting each creation to `out`.
pub struct FileSystemWriter<W: Write> {
    out: W,
}

impl<W: Write> FileSystemWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Stream the creation reports are written to.
    pub fn output(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Recursively creates `path` with `mode`, succeeding if it already exists.
    ///
    /// # Errors
    /// * `Error::WriteError` if the directory cannot be created, e.g. a
    ///   regular file occupies the path
    pub fn ensure_dir(&mut self, path: &Path, mode: u32) -> Result<()> {
        debug!("Creating directory '{}' ({:o})", path.display(), mode);

        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(mode);

        builder.create(path).map_err(|source| Error::WriteError {
            path: path.display().to_string(),
            source,
        })?;
        self.report(path)
    }

    /// Writes `content` to `path`, replacing any existing file.
    ///
    /// The file ends up with exactly `mode`, whether it was created or replaced.
    ///
    /// # Errors
    /// * `Error::WriteError` if the file cannot be opened or written
    pub fn write_file(&mut self, path: &Path, content: &str, mode: u32) -> Result<()> {
        debug!("Writing file '{}' ({:o})", path.display(), mode);

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(mode);

        options
            .open(path)
            .and_then(|mut file| {
                file.write_all(content.as_bytes())?;
                #[cfg(unix)]
                file.set_permissions(std::fs::Permissions::from_mode(mode))?;
                Ok(())
            })
            .map_err(|source| Error::WriteError {
                path: path.display().to_string(),
                source,
            })?;
        self.report(path)
    }

    fn report(&mut self, path: &Path) -> Result<()> {
        writeln!(self.out, "   create : {}", path.display())?;
        Ok(())
    }
}
