//! ScaffWrite command-line apply tool.
//!
//! Takes a rendered source tree (or a JSON manifest of path -> contents)
//! and writes it into a destination tree, resolving every collision through
//! the conflict engine: interactively by default, or in bulk via
//! `--force` / `--backup` / `--skip-existing`.

mod apply;
mod candidates;
mod plan;
mod prompt;
mod style;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scaffwrite_core::config::{ApplyConfig, ConflictMode};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// ScaffWrite command-line apply tool.
#[derive(Parser, Debug)]
#[command(
    name = "scaffwrite",
    version,
    about = "Write generated files into a destination tree, resolving conflicts"
)]
struct Cli {
    /// Path to the TOML configuration file. Defaults to the platform config
    /// directory; missing default config falls back to built-in defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve and write a candidate set into a destination tree.
    Apply {
        /// Rendered source tree, or a JSON manifest file of path -> contents.
        source: PathBuf,

        /// Destination directory.
        dest: PathBuf,

        /// Overwrite every conflicting file without prompting.
        #[arg(long, conflicts_with_all = ["backup", "skip_existing"])]
        force: bool,

        /// Back up, then overwrite, every conflicting file without prompting.
        #[arg(long, conflicts_with = "skip_existing")]
        backup: bool,

        /// Leave every conflicting file untouched without prompting.
        #[arg(long)]
        skip_existing: bool,
    },

    /// Dry run: report what `apply` would do without prompting or writing.
    Plan {
        /// Rendered source tree, or a JSON manifest file of path -> contents.
        source: PathBuf,

        /// Destination directory.
        dest: PathBuf,
    },

    /// Generate a default configuration file.
    Init {
        /// Output path for the generated config file.
        #[arg(short, long, default_value = "./scaffwrite.toml")]
        output: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> ExitCode {
    // Minimal logging for CLI
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { output } => cmd_init(&output),
        Commands::Apply {
            source,
            dest,
            force,
            backup,
            skip_existing,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let mode = select_mode(&config, force, backup, skip_existing);
            apply::run_apply(&config, &source, &dest, mode).await
        }
        Commands::Plan { source, dest } => {
            let config = load_config(cli.config.as_deref())?;
            plan::run_plan(&config, &source, &dest).await
        }
    }
}

// ---------------------------------------------------------------------------
// Config helpers
// ---------------------------------------------------------------------------

fn load_config(explicit: Option<&std::path::Path>) -> Result<ApplyConfig> {
    match explicit {
        // An explicitly named file must exist.
        Some(path) => {
            ApplyConfig::load_from_file(path).context("failed to load configuration file")
        }
        None => {
            let default = default_config_path();
            ApplyConfig::load_or_default(&default).context("failed to load configuration file")
        }
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scaffwrite")
        .join("config.toml")
}

/// CLI flags override the configured mode; at most one flag can be set
/// (enforced by clap).
fn select_mode(config: &ApplyConfig, force: bool, backup: bool, skip_existing: bool) -> ConflictMode {
    if force {
        ConflictMode::Overwrite
    } else if backup {
        ConflictMode::Backup
    } else if skip_existing {
        ConflictMode::Skip
    } else {
        config.apply.on_conflict
    }
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn cmd_init(output: &PathBuf) -> Result<()> {
    let default_config = r#"# ScaffWrite Configuration

[apply]
# What to do when a target file exists with different content:
#   prompt    — ask interactively per file
#   overwrite — replace every conflicting file
#   backup    — back up then replace every conflicting file
#   skip      — leave every conflicting file untouched
on_conflict = "prompt"

# Suffix appended to a file's name when backing it up.
backup_suffix = ".bak"

[options]
# Glob patterns for candidates to drop before conflict resolution.
# Matched against the destination-relative path.
ignore_patterns = []

# Show a unified diff of on-disk vs. proposed content above the prompt.
show_diff = true
"#;

    if output.exists() {
        anyhow::bail!(
            "file already exists: {}. Use a different path or remove the existing file.",
            output.display()
        );
    }

    std::fs::write(output, default_config)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{}",
        style::success(&format!("Configuration written to {}", output.display()))
    );
    Ok(())
}
