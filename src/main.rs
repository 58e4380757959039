//! commit-source - list the commits a message checker would validate
//!
//! # Usage
//! ```bash
//! commit-source                                  # Current directory
//! commit-source ~/project --since 2024-01-01     # Only recent commits
//! commit-source --ignore-name '\[bot\]$' --max-parents 1
//! git log -1 --format=%B | commit-source --message-file -
//! ```

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commit_source::git::{FileSystem, in_repository};
use commit_source::source::fake_commit;
use commit_source::{Commit, CommitSource, PipelineConfig};

/// List repository commits after filtering
#[derive(Parser)]
#[command(name = "commit-source")]
#[command(about = "List the commits that would be validated", long_about = None)]
struct Cli {
    /// Path to the git repository
    #[arg(value_name = "REPO_PATH", default_value = ".")]
    repo_path: PathBuf,

    /// Only keep commits authored on or after this date (YYYY-MM-DD, UTC)
    #[arg(long, value_name = "DATE")]
    since: Option<String>,

    /// Drop commits whose author name matches this regex (repeatable)
    #[arg(long = "ignore-name", value_name = "REGEX")]
    ignore_names: Vec<String>,

    /// Drop commits whose author email matches this regex (repeatable)
    #[arg(long = "ignore-email", value_name = "REGEX")]
    ignore_emails: Vec<String>,

    /// Drop commits with more parents than this
    #[arg(long, value_name = "N")]
    max_parents: Option<usize>,

    /// Validate a message read from a file instead of history ("-" for stdin)
    #[arg(long, value_name = "PATH")]
    message_file: Option<String>,

    /// Print commits as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            since: self.since.clone(),
            ignore_author_names: self.ignore_names.clone(),
            ignore_author_emails: self.ignore_emails.clone(),
            max_parents: self.max_parents,
        }
    }
}

fn print_commits(commits: &[Commit], json: bool) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, commits)?;
        writeln!(out)?;
        return Ok(());
    }
    for commit in commits {
        let id = commit.short_id().unwrap_or(commit.id());
        writeln!(out, "{} {}", id, commit.subject())?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = cli.pipeline();
    let source: Box<dyn CommitSource> = match cli.message_file.as_deref() {
        Some("-") => config.apply(fake_commit(io::stdin())),
        Some(path) => config.apply(fake_commit(File::open(path)?)),
        None => config.apply(in_repository(FileSystem::new(&cli.repo_path))),
    };

    let commits = source.commits()?;
    tracing::info!("{} commits selected", commits.len());
    print_commits(&commits, cli.json)
}
