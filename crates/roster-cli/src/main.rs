//! `roster` — document-health reports over a workforce export.
//!
//! # Usage
//!
//! ```text
//! roster classify 2027-03-01 --kind passport
//! roster list --input promoters.json --status critical --sort expiry
//! roster metrics --input promoters.json --as-of 2026-12-31 --json
//! ```
//!
//! Settings are read from `roster.toml` (or `--config`) and `ROSTER_*`
//! environment variables; flags win over both. Logs go to stderr.

mod error;
mod input;
mod render;
mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, Result, anyhow};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use input::JsonFileSource;
use roster_core::{
  clock::{Clock, FixedClock, SystemClock},
  document::{DocumentKind, MissingReason, classify},
  metrics::aggregate,
  query::{SortKey, SubjectQuery},
  source::SubjectSource,
  status::OverallStatus,
  subject::{SubjectView, evaluate_all},
};
use settings::Settings;
use strum::IntoEnumIterator;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Workforce document-health reports")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, global = true, default_value = "roster.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Classify a single expiry date and print the result as JSON.
  Classify {
    /// Raw expiry value, e.g. `2027-03-01`.
    expiry: String,

    /// Document kind whose configured window applies.
    #[arg(long, default_value = "id-card")]
    kind: DocumentKind,

    /// Override the "expiring soon" window in days.
    #[arg(long)]
    threshold: Option<u32>,

    /// Evaluate as of this date instead of today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    as_of: Option<NaiveDate>,
  },

  /// List evaluated subjects with optional filtering and sorting.
  List {
    #[command(flatten)]
    batch: BatchArgs,

    /// Keep only subjects with this overall status.
    #[arg(long)]
    status: Option<OverallStatus>,

    /// Case-insensitive match on name or id.
    #[arg(long)]
    search: Option<String>,

    /// Keep only subjects without an employer.
    #[arg(long)]
    unassigned: bool,

    /// Sort by `name`, `status` or `expiry`.
    #[arg(long, default_value = "name")]
    sort: SortKey,

    #[arg(long)]
    limit: Option<usize>,

    #[arg(long)]
    offset: Option<usize>,
  },

  /// Print summary metrics for the whole export.
  Metrics {
    #[command(flatten)]
    batch: BatchArgs,
  },
}

#[derive(Args, Debug)]
struct BatchArgs {
  /// JSON export of subject records; `-` reads stdin.
  #[arg(short, long, value_name = "FILE")]
  input: Option<PathBuf>,

  /// Evaluate as of this date instead of today.
  #[arg(long, value_name = "YYYY-MM-DD")]
  as_of: Option<NaiveDate>,

  /// Emit JSON instead of text.
  #[arg(long)]
  json: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  // Initialise tracing on stderr so stdout stays pipeable.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;
  tracing::debug!(?settings, "loaded settings");

  match cli.command {
    Command::Classify {
      expiry,
      kind,
      threshold,
      as_of,
    } => {
      let threshold =
        threshold.unwrap_or_else(|| settings.policy.threshold_for(kind));
      let today = clock(as_of).today();
      let health = classify(Some(expiry.as_str()), threshold, today);
      println!("{}", render::json(&health)?);
    }

    Command::List {
      batch,
      status,
      search,
      unassigned,
      sort,
      limit,
      offset,
    } => {
      let views = evaluate_batch(&batch, &settings)?;
      let query = SubjectQuery {
        status,
        text: search,
        unassigned_only: unassigned,
        sort,
        limit,
        offset,
      };
      let selected = query.apply(&views);
      tracing::info!(
        matched = selected.len(),
        total = views.len(),
        "applied query"
      );

      if batch.json {
        println!("{}", render::json(&selected)?);
      } else {
        print!("{}", render::table(&selected));
      }
    }

    Command::Metrics { batch } => {
      let views = evaluate_batch(&batch, &settings)?;
      let snapshot = aggregate(&views);

      if batch.json {
        println!("{}", render::json(&snapshot)?);
      } else {
        print!("{}", render::metrics(&snapshot));
      }
    }
  }

  Ok(())
}

fn clock(as_of: Option<NaiveDate>) -> FixedClock {
  FixedClock(as_of.unwrap_or_else(|| SystemClock.today()))
}

/// Load the export named by `--input` (or the configured default) and
/// evaluate every subject at one instant.
fn evaluate_batch(
  batch: &BatchArgs,
  settings: &Settings,
) -> Result<Vec<SubjectView>> {
  let path = batch
    .input
    .clone()
    .or_else(|| settings.input.clone())
    .ok_or_else(|| anyhow!("no input file: pass --input or set `input`"))?;

  let source = JsonFileSource::new(path);
  let subjects = source
    .load()
    .with_context(|| format!("failed to load {}", source.path().display()))?;
  tracing::info!(
    count = subjects.len(),
    path = %source.path().display(),
    "loaded subjects"
  );

  let clock = clock(batch.as_of);
  let views = evaluate_all(subjects, &settings.policy, clock);
  tracing::debug!(as_of = %clock.today(), "evaluated subjects");

  for view in &views {
    for kind in DocumentKind::iter() {
      let health = view.health(kind);
      if health.missing_reason() == Some(MissingReason::Unparseable) {
        tracing::warn!(
          subject_id = %view.subject.subject_id,
          %kind,
          raw = ?health.expires_on,
          "unparseable expiry date"
        );
      }
    }
  }

  Ok(views)
}
