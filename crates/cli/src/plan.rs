//! The `plan` subcommand: dry-run report of what `apply` would do.
//!
//! Never prompts and never writes. Conflicting files are reported as
//! `conflict` rather than resolved, since their outcome depends on the
//! interactive choice (or configured mode) at apply time.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use scaffwrite_core::conflict::{CollisionProbe, DiskProbe};
use scaffwrite_core::config::ApplyConfig;
use scaffwrite_core::policy::{PolicyDecision, WritePolicy};

use crate::candidates;
use crate::style;

pub async fn run_plan(config: &ApplyConfig, source: &Path, dest: &Path) -> Result<()> {
    let candidates = candidates::collect(source)?;
    if candidates.is_empty() {
        println!("{}", style::warn("Nothing to plan: source is empty"));
        return Ok(());
    }

    let policy = WritePolicy::new(config.options.ignore_patterns.clone());
    let probe = DiskProbe::new();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Disposition"]);

    let mut conflicts = 0usize;
    for candidate in &candidates {
        let disposition = match policy.evaluate(&candidate.rel_path) {
            PolicyDecision::Ignored { .. } => "ignored",
            PolicyDecision::Evaluate => {
                let target = dest.join(&candidate.rel_path);
                let exists = probe
                    .exists(&target)
                    .await
                    .with_context(|| format!("failed to probe '{}'", candidate.rel_path))?;
                if !exists {
                    "create"
                } else if !probe
                    .has_conflict(&target, &candidate.contents)
                    .with_context(|| format!("failed to compare '{}'", candidate.rel_path))?
                {
                    "identical"
                } else {
                    conflicts += 1;
                    "conflict"
                }
            }
        };
        table.add_row(vec![Cell::new(&candidate.rel_path), Cell::new(disposition)]);
    }

    println!();
    println!(
        "{}",
        style::header(&format!("Plan ({} candidate(s))", candidates.len()))
    );
    println!("{}", table);

    if conflicts > 0 {
        println!(
            "{}",
            style::warn(&format!(
                "{} conflict(s) will prompt or follow the configured on_conflict mode",
                conflicts
            ))
        );
    } else {
        println!("{}", style::success("No conflicts"));
    }
    println!();

    Ok(())
}
