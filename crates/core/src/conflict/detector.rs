//! Disk-backed collision detection.
//!
//! [`DiskProbe`] is the default [`CollisionProbe`] implementation: existence
//! via async metadata lookup, content comparison via a size fast-path
//! followed by a byte-for-byte read.

use std::io;
use std::path::Path;

use tracing::debug;

use super::resolver::CollisionProbe;

/// Probes the real filesystem.
///
/// Stateless and trivially cheap to construct; one instance can serve any
/// number of engines.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskProbe;

impl DiskProbe {
    pub fn new() -> Self {
        Self
    }
}

impl CollisionProbe for DiskProbe {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        match tokio::fs::metadata(path).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            // Permission errors and the like are real failures, not "absent".
            Err(err) => Err(err),
        }
    }

    fn has_conflict(&self, path: &Path, contents: &[u8]) -> io::Result<bool> {
        let meta = std::fs::metadata(path)?;
        if meta.len() != contents.len() as u64 {
            debug!(
                path = %path.display(),
                on_disk = meta.len(),
                proposed = contents.len(),
                "size mismatch"
            );
            return Ok(true);
        }
        let on_disk = std::fs::read(path)?;
        Ok(on_disk != contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exists_false_for_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let probe = DiskProbe::new();
        assert!(!probe.exists(&dir.path().join("missing.txt")).await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_true_for_present_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("present.txt");
        std::fs::write(&path, "hello").unwrap();
        let probe = DiskProbe::new();
        assert!(probe.exists(&path).await.unwrap());
    }

    #[test]
    fn test_no_conflict_for_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("same.txt");
        std::fs::write(&path, "hello world").unwrap();
        let probe = DiskProbe::new();
        assert!(!probe.has_conflict(&path, b"hello world").unwrap());
    }

    #[test]
    fn test_conflict_for_different_bytes_same_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diff.txt");
        std::fs::write(&path, "hello world").unwrap();
        let probe = DiskProbe::new();
        assert!(probe.has_conflict(&path, b"hello earth").unwrap());
    }

    #[test]
    fn test_conflict_for_different_lengths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.txt");
        std::fs::write(&path, "hi").unwrap();
        let probe = DiskProbe::new();
        assert!(probe.has_conflict(&path, b"a much longer proposal").unwrap());
    }

    #[test]
    fn test_has_conflict_propagates_missing_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let probe = DiskProbe::new();
        let err = probe
            .has_conflict(&dir.path().join("gone.txt"), b"x")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
