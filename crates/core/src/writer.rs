//! Applies resolved actions to disk.
//!
//! The decision engine only *decides*; [`FileWriter`] is the collaborator
//! that carries the decision out: writing fresh files, replacing existing
//! ones, preserving a backup copy first, or doing nothing at all.

use std::io;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::conflict::{Action, CandidateFile};

/// Default suffix appended to a file's name when backing it up.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

/// Writes candidate files according to their resolved [`Action`].
#[derive(Debug, Clone)]
pub struct FileWriter {
    backup_suffix: String,
}

impl Default for FileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FileWriter {
    pub fn new() -> Self {
        Self::with_backup_suffix(DEFAULT_BACKUP_SUFFIX)
    }

    /// A writer with a custom backup suffix (e.g. `".orig"`).
    pub fn with_backup_suffix(suffix: impl Into<String>) -> Self {
        Self {
            backup_suffix: suffix.into(),
        }
    }

    /// The path a backup of `file` would be written to.
    pub fn backup_path(&self, file: &CandidateFile) -> PathBuf {
        let mut name = file.filepath.as_os_str().to_os_string();
        name.push(&self.backup_suffix);
        PathBuf::from(name)
    }

    /// Carry out `action` for `file`.
    ///
    /// Returns the backup path when a backup was made, `None` otherwise.
    /// `Identical` and `Skip` touch nothing. An existing backup at the
    /// target backup path is replaced. I/O errors propagate unchanged.
    pub async fn apply(
        &self,
        file: &CandidateFile,
        action: Action,
    ) -> io::Result<Option<PathBuf>> {
        match action {
            Action::Identical | Action::Skip => {
                debug!(path = %file.filepath.display(), action = %action, "leaving target untouched");
                Ok(None)
            }
            Action::Create | Action::Overwrite => {
                self.write_contents(file).await?;
                debug!(path = %file.filepath.display(), action = %action, "wrote file");
                Ok(None)
            }
            Action::Backup => {
                let backup = self.backup_path(file);
                tokio::fs::copy(&file.filepath, &backup).await?;
                self.write_contents(file).await?;
                info!(
                    path = %file.filepath.display(),
                    backup = %backup.display(),
                    "backed up and replaced file"
                );
                Ok(Some(backup))
            }
        }
    }

    async fn write_contents(&self, file: &CandidateFile) -> io::Result<()> {
        if let Some(parent) = file.filepath.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&file.filepath, &file.contents).await
    }
}
