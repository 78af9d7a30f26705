//! Candidate collection.
//!
//! A source is either a directory of rendered files (walked recursively) or
//! a JSON manifest mapping relative paths to file contents. Either way the
//! result is a sorted list of relative paths with their proposed bytes.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

/// One file the generator wants written, relative to the destination root.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Forward-slash relative path under the destination.
    pub rel_path: String,
    pub contents: Vec<u8>,
}

/// Collect candidates from `source`: a directory is walked, a file is
/// parsed as a JSON manifest.
pub fn collect(source: &Path) -> Result<Vec<Candidate>> {
    let meta = std::fs::metadata(source)
        .with_context(|| format!("cannot read source {}", source.display()))?;
    if meta.is_dir() {
        from_dir(source)
    } else {
        from_manifest(source)
    }
}

/// Walk a rendered source tree into candidates, sorted by relative path.
pub fn from_dir(root: &Path) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();
    walk(root, PathBuf::new(), &mut candidates)?;
    candidates.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    debug!(count = candidates.len(), root = %root.display(), "collected candidates from tree");
    Ok(candidates)
}

fn walk(root: &Path, rel: PathBuf, out: &mut Vec<Candidate>) -> Result<()> {
    let dir = root.join(&rel);
    let entries = std::fs::read_dir(&dir)
        .with_context(|| format!("cannot read directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let entry_rel = rel.join(entry.file_name());
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk(root, entry_rel, out)?;
        } else if file_type.is_file() {
            let full = root.join(&entry_rel);
            let contents = std::fs::read(&full)
                .with_context(|| format!("cannot read file {}", full.display()))?;
            out.push(Candidate {
                rel_path: rel_path_string(&entry_rel),
                contents,
            });
        }
        // Symlinks and other specials are not scaffold output; skipped.
    }
    Ok(())
}

/// Parse a JSON manifest of relative path -> contents.
pub fn from_manifest(path: &Path) -> Result<Vec<Candidate>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read manifest {}", path.display()))?;
    let entries: BTreeMap<String, String> = serde_json::from_str(&raw)
        .with_context(|| format!("manifest {} is not a JSON object of path to contents", path.display()))?;

    let mut candidates = Vec::with_capacity(entries.len());
    for (rel_path, contents) in entries {
        validate_rel_path(&rel_path)?;
        candidates.push(Candidate {
            rel_path,
            contents: contents.into_bytes(),
        });
    }
    debug!(count = candidates.len(), manifest = %path.display(), "collected candidates from manifest");
    Ok(candidates)
}

/// Reject manifest paths that would escape the destination root.
fn validate_rel_path(rel_path: &str) -> Result<()> {
    let path = Path::new(rel_path);
    if rel_path.is_empty() {
        bail!("manifest contains an empty path");
    }
    for component in path.components() {
        match component {
            Component::Normal(_) => {}
            _ => bail!(
                "manifest path '{}' must be relative and must not contain '..'",
                rel_path
            ),
        }
    }
    Ok(())
}

fn rel_path_string(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dir_collects_nested_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src/deep")).unwrap();
        std::fs::write(dir.path().join("zed.txt"), "z").unwrap();
        std::fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
        std::fs::write(dir.path().join("src/deep/mod.rs"), "// deep").unwrap();

        let candidates = from_dir(dir.path()).unwrap();
        let paths: Vec<&str> = candidates.iter().map(|c| c.rel_path.as_str()).collect();
        assert_eq!(paths, vec!["src/deep/mod.rs", "src/main.rs", "zed.txt"]);
        assert_eq!(candidates[1].contents, b"fn main() {}");
    }

    #[test]
    fn test_from_dir_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        assert!(from_dir(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_from_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("files.json");
        std::fs::write(
            &manifest,
            r##"{"src/lib.rs": "pub fn hi() {}", "README.md": "# Hi"}"##,
        )
        .unwrap();

        let candidates = from_manifest(&manifest).unwrap();
        let paths: Vec<&str> = candidates.iter().map(|c| c.rel_path.as_str()).collect();
        assert_eq!(paths, vec!["README.md", "src/lib.rs"]);
    }

    #[test]
    fn test_from_manifest_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("evil.json");
        std::fs::write(&manifest, r#"{"../outside.txt": "nope"}"#).unwrap();
        assert!(from_manifest(&manifest).is_err());
    }

    #[test]
    fn test_from_manifest_rejects_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("abs.json");
        std::fs::write(&manifest, r#"{"/etc/passwd": "nope"}"#).unwrap();
        assert!(from_manifest(&manifest).is_err());
    }

    #[test]
    fn test_from_manifest_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("list.json");
        std::fs::write(&manifest, r#"["a.txt"]"#).unwrap();
        assert!(from_manifest(&manifest).is_err());
    }

    #[test]
    fn test_collect_dispatches_on_type() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        let as_tree = collect(dir.path()).unwrap();
        assert_eq!(as_tree.len(), 1);

        let manifest = dir.path().join("m.json");
        std::fs::write(&manifest, r#"{"b.txt": "b"}"#).unwrap();
        let as_manifest = collect(&manifest).unwrap();
        assert_eq!(as_manifest[0].rel_path, "b.txt");
    }
}
