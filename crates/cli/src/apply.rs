//! The `apply` subcommand: resolve and write a candidate set.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};

use scaffwrite_core::config::{ApplyConfig, ConflictMode};
use scaffwrite_core::conflict::{CandidateFile, Conflicter, DiskProbe};
use scaffwrite_core::policy::{PolicyDecision, WritePolicy};
use scaffwrite_core::writer::FileWriter;
use scaffwrite_core::Action;

use crate::candidates;
use crate::prompt::CliPrompt;
use crate::style;

/// Per-run tally of what happened to each candidate.
#[derive(Debug, Default)]
struct Summary {
    create: usize,
    identical: usize,
    overwrite: usize,
    backup: usize,
    skip: usize,
    ignored: usize,
}

impl Summary {
    fn record(&mut self, action: Action) {
        match action {
            Action::Create => self.create += 1,
            Action::Identical => self.identical += 1,
            Action::Overwrite => self.overwrite += 1,
            Action::Backup => self.backup += 1,
            Action::Skip => self.skip += 1,
        }
    }

    fn rows(&self) -> [(&'static str, usize); 6] {
        [
            ("create", self.create),
            ("identical", self.identical),
            ("overwrite", self.overwrite),
            ("backup", self.backup),
            ("skip", self.skip),
            ("ignored", self.ignored),
        ]
    }

    fn written(&self) -> usize {
        self.create + self.overwrite + self.backup
    }

    fn untouched(&self) -> usize {
        self.identical + self.skip + self.ignored
    }
}

/// Apply a candidate set from `source` into `dest` under `mode`.
pub async fn run_apply(
    config: &ApplyConfig,
    source: &Path,
    dest: &Path,
    mode: ConflictMode,
) -> Result<()> {
    let candidates = candidates::collect(source)?;
    if candidates.is_empty() {
        println!("{}", style::warn("Nothing to apply: source is empty"));
        return Ok(());
    }

    let policy = WritePolicy::new(config.options.ignore_patterns.clone());
    let writer = FileWriter::with_backup_suffix(config.apply.backup_suffix.as_str());
    let prompt = CliPrompt::new(config.options.show_diff);
    let (overwrite_all, backup_all, skip_all) = mode.bulk_flags();
    let mut conflicter =
        Conflicter::with_bulk_mode(DiskProbe::new(), &prompt, overwrite_all, backup_all, skip_all);

    // A progress bar only makes sense when no prompt will interleave with it.
    let bulk = mode != ConflictMode::Prompt;
    let progress = if bulk && candidates.len() > 1 {
        let bar = ProgressBar::new(candidates.len() as u64);
        bar.set_style(ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len}").unwrap());
        Some(bar)
    } else {
        None
    };

    println!();
    let mut summary = Summary::default();
    for candidate in &candidates {
        let line = match policy.evaluate(&candidate.rel_path) {
            PolicyDecision::Ignored { .. } => {
                summary.ignored += 1;
                style::ignored_line(&candidate.rel_path)
            }
            PolicyDecision::Evaluate => {
                let file = CandidateFile::new(
                    dest.join(&candidate.rel_path),
                    candidate.contents.clone(),
                );
                prompt.stage(&file.filepath, &file.contents);
                let action = conflicter
                    .resolve(&file)
                    .await
                    .with_context(|| format!("failed to resolve '{}'", candidate.rel_path))?;
                writer
                    .apply(&file, action)
                    .await
                    .with_context(|| format!("failed to write '{}'", candidate.rel_path))?;
                summary.record(action);
                style::action_line(action, &candidate.rel_path)
            }
        };

        match &progress {
            Some(bar) => {
                bar.println(line);
                bar.inc(1);
            }
            None => println!("{}", line),
        }
    }
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &Summary) {
    println!();
    println!("{}", style::header("Summary"));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Action", "Files"]);
    for (label, count) in summary.rows() {
        if count > 0 {
            table.add_row(vec![Cell::new(label), Cell::new(count)]);
        }
    }
    println!("{}", table);

    println!(
        "{}",
        style::success(&format!(
            "{} file(s) written, {} left untouched",
            summary.written(),
            summary.untouched()
        ))
    );
    println!();
}
