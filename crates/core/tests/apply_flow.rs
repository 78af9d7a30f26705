//! End-to-end tests for the resolve-then-apply flow.
//!
//! These tests exercise the real `Conflicter` with:
//! - A real `DiskProbe` over tempdir trees
//! - A real `FileWriter` applying the resolved actions
//! - Scripted prompts standing in for the interactive chooser
//!
//! No terminal I/O: interactive sessions are replayed from fixed response
//! queues.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::Path;

use tempfile::TempDir;

use scaffwrite_core::config::ConflictMode;
use scaffwrite_core::conflict::{ActionPrompt, CandidateFile, Conflicter, DiskProbe};
use scaffwrite_core::errors::ResolveError;
use scaffwrite_core::writer::FileWriter;
use scaffwrite_core::Action;

// ===========================================================================
// Helpers
// ===========================================================================

/// Replays a fixed queue of menu responses.
struct ScriptedPrompt {
    responses: RefCell<VecDeque<&'static str>>,
    calls: Cell<usize>,
}

impl ScriptedPrompt {
    fn new(responses: &[&'static str]) -> Self {
        Self {
            responses: RefCell::new(responses.iter().copied().collect()),
            calls: Cell::new(0),
        }
    }
}

impl ActionPrompt for ScriptedPrompt {
    async fn choose(
        &self,
        _message: &str,
        _choices: &[&str],
        _default: usize,
    ) -> Result<String, ResolveError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self
            .responses
            .borrow_mut()
            .pop_front()
            .expect("chooser invoked with no scripted response")
            .to_string())
    }
}

/// Fails the test if the engine ever prompts.
struct NoPrompt;

impl ActionPrompt for NoPrompt {
    async fn choose(
        &self,
        message: &str,
        _choices: &[&str],
        _default: usize,
    ) -> Result<String, ResolveError> {
        panic!("unexpected prompt: {}", message);
    }
}

fn write_file(dir: &Path, rel: &str, contents: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

fn read_file(dir: &Path, rel: &str) -> String {
    std::fs::read_to_string(dir.join(rel)).unwrap()
}

fn candidate(dir: &Path, rel: &str, contents: &str) -> CandidateFile {
    CandidateFile::new(dir.join(rel), contents.as_bytes().to_vec())
}

// ===========================================================================
// Bulk mode end to end
// ===========================================================================

#[tokio::test]
async fn test_backup_all_run_over_mixed_tree() {
    let dest = TempDir::new().unwrap();
    write_file(dest.path(), "unchanged.txt", "same");
    write_file(dest.path(), "stale.txt", "old");

    let (overwrite_all, backup_all, skip_all) = ConflictMode::Backup.bulk_flags();
    let mut conflicter =
        Conflicter::with_bulk_mode(DiskProbe::new(), NoPrompt, overwrite_all, backup_all, skip_all);
    let writer = FileWriter::new();

    let candidates = [
        candidate(dest.path(), "fresh.txt", "brand new"),
        candidate(dest.path(), "unchanged.txt", "same"),
        candidate(dest.path(), "stale.txt", "new"),
    ];

    let mut actions = Vec::new();
    for file in &candidates {
        let action = conflicter.resolve(file).await.unwrap();
        writer.apply(file, action).await.unwrap();
        actions.push(action);
    }

    // Bulk mode never consults content equality, so "unchanged.txt" is
    // backed up too rather than reported identical.
    assert_eq!(actions, vec![Action::Create, Action::Backup, Action::Backup]);

    assert_eq!(read_file(dest.path(), "fresh.txt"), "brand new");
    assert_eq!(read_file(dest.path(), "unchanged.txt"), "same");
    assert_eq!(read_file(dest.path(), "unchanged.txt.bak"), "same");
    assert_eq!(read_file(dest.path(), "stale.txt"), "new");
    assert_eq!(read_file(dest.path(), "stale.txt.bak"), "old");
}

#[tokio::test]
async fn test_skip_all_run_leaves_existing_files_alone() {
    let dest = TempDir::new().unwrap();
    write_file(dest.path(), "keep.txt", "precious");

    let (overwrite_all, backup_all, skip_all) = ConflictMode::Skip.bulk_flags();
    let mut conflicter =
        Conflicter::with_bulk_mode(DiskProbe::new(), NoPrompt, overwrite_all, backup_all, skip_all);
    let writer = FileWriter::new();

    let existing = candidate(dest.path(), "keep.txt", "clobber attempt");
    let action = conflicter.resolve(&existing).await.unwrap();
    assert_eq!(action, Action::Skip);
    writer.apply(&existing, action).await.unwrap();
    assert_eq!(read_file(dest.path(), "keep.txt"), "precious");

    // Absent files are still created; skip-all only governs collisions.
    let fresh = candidate(dest.path(), "fresh.txt", "hello");
    let action = conflicter.resolve(&fresh).await.unwrap();
    assert_eq!(action, Action::Create);
    writer.apply(&fresh, action).await.unwrap();
    assert_eq!(read_file(dest.path(), "fresh.txt"), "hello");
}

#[tokio::test]
async fn test_overwrite_all_replaces_without_backups() {
    let dest = TempDir::new().unwrap();
    write_file(dest.path(), "main.rs", "fn old() {}");

    let mut conflicter =
        Conflicter::with_bulk_mode(DiskProbe::new(), NoPrompt, true, false, false);
    let writer = FileWriter::new();

    let file = candidate(dest.path(), "main.rs", "fn new() {}");
    let action = conflicter.resolve(&file).await.unwrap();
    assert_eq!(action, Action::Overwrite);
    let backup = writer.apply(&file, action).await.unwrap();

    assert!(backup.is_none());
    assert_eq!(read_file(dest.path(), "main.rs"), "fn new() {}");
    assert!(!dest.path().join("main.rs.bak").exists());
}

// ===========================================================================
// Interactive sessions (scripted)
// ===========================================================================

#[tokio::test]
async fn test_interactive_session_with_skip_all_midway() {
    // File A conflicts, user picks "overwrite".
    // File B conflicts, user picks "skip all".
    // File C conflicts, no prompt, skipped.
    let dest = TempDir::new().unwrap();
    write_file(dest.path(), "a.txt", "old a");
    write_file(dest.path(), "b.txt", "old b");
    write_file(dest.path(), "c.txt", "old c");

    let prompt = ScriptedPrompt::new(&["overwrite", "skip all"]);
    let mut conflicter = Conflicter::new(DiskProbe::new(), prompt);
    let writer = FileWriter::new();

    let a = candidate(dest.path(), "a.txt", "new a");
    let b = candidate(dest.path(), "b.txt", "new b");
    let c = candidate(dest.path(), "c.txt", "new c");

    let action = conflicter.resolve(&a).await.unwrap();
    assert_eq!(action, Action::Overwrite);
    writer.apply(&a, action).await.unwrap();

    let action = conflicter.resolve(&b).await.unwrap();
    assert_eq!(action, Action::Skip);
    writer.apply(&b, action).await.unwrap();

    let action = conflicter.resolve(&c).await.unwrap();
    assert_eq!(action, Action::Skip);
    writer.apply(&c, action).await.unwrap();

    assert_eq!(read_file(dest.path(), "a.txt"), "new a");
    assert_eq!(read_file(dest.path(), "b.txt"), "old b");
    assert_eq!(read_file(dest.path(), "c.txt"), "old c");
}

#[tokio::test]
async fn test_identical_files_never_prompt_in_interactive_mode() {
    let dest = TempDir::new().unwrap();
    write_file(dest.path(), "same.txt", "content");

    let mut conflicter = Conflicter::new(DiskProbe::new(), NoPrompt);
    let file = candidate(dest.path(), "same.txt", "content");

    assert_eq!(conflicter.resolve(&file).await.unwrap(), Action::Identical);
    // Unchanged file resolves identically again; nothing sticky happened.
    assert_eq!(conflicter.resolve(&file).await.unwrap(), Action::Identical);
}

#[tokio::test]
async fn test_backup_all_from_prompt_applies_to_later_files() {
    let dest = TempDir::new().unwrap();
    write_file(dest.path(), "first.txt", "old 1");
    write_file(dest.path(), "second.txt", "old 2");

    let prompt = ScriptedPrompt::new(&["backup all"]);
    let mut conflicter = Conflicter::new(DiskProbe::new(), prompt);
    let writer = FileWriter::new();

    let first = candidate(dest.path(), "first.txt", "new 1");
    let second = candidate(dest.path(), "second.txt", "new 2");

    let action = conflicter.resolve(&first).await.unwrap();
    assert_eq!(action, Action::Backup);
    writer.apply(&first, action).await.unwrap();

    let action = conflicter.resolve(&second).await.unwrap();
    assert_eq!(action, Action::Backup);
    writer.apply(&second, action).await.unwrap();

    assert_eq!(read_file(dest.path(), "first.txt"), "new 1");
    assert_eq!(read_file(dest.path(), "first.txt.bak"), "old 1");
    assert_eq!(read_file(dest.path(), "second.txt"), "new 2");
    assert_eq!(read_file(dest.path(), "second.txt.bak"), "old 2");
}
