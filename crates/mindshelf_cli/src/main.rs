//! Command-line front end for Mindshelf.
//!
//! Renders overview or single-folder reports from the remote thought service
//! or a local SQLite snapshot, and imports JSON exports into snapshots.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use log::info;
use mindshelf_core::db::open_db;
use mindshelf_core::repo::http_store::ThoughtListEnvelope;
use mindshelf_core::{
    default_log_level, init_logging, Folder, HttpStoreConfig, HttpThoughtStore, OverviewReport,
    OverviewService, SqliteThoughtStore, ThoughtRecord, ThoughtStore, ViewMode,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const TITLE_PREVIEW_CHARS: usize = 60;

#[derive(Debug, Parser)]
#[command(name = "mindshelf", about = "Summaries over captured thoughts", version)]
struct Cli {
    /// Log level (trace|debug|info|warn|error). Defaults by build mode.
    #[arg(long, global = true, env = "MINDSHELF_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true, env = "MINDSHELF_LOG_DIR")]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print core linkage information.
    Ping,
    /// Compute statistics and ranked slices for a region.
    Report(ReportArgs),
    /// List folders known to the remote service.
    Folders(RemoteArgs),
    /// Import a JSON export into a local snapshot database.
    Import(ImportArgs),
}

#[derive(Debug, Args)]
struct RemoteArgs {
    /// Base URL of the remote thought service.
    #[arg(long, env = "MINDSHELF_BACKEND_URL", default_value = mindshelf_core::repo::http_store::DEFAULT_BASE_URL)]
    backend_url: String,
    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

impl RemoteArgs {
    fn store(&self) -> HttpThoughtStore {
        HttpThoughtStore::new(HttpStoreConfig {
            base_url: self.backend_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

#[derive(Debug, Args)]
struct ReportArgs {
    /// Region key: `overview` or a folder key such as `tasks`.
    #[arg(default_value = ViewMode::OVERVIEW_REGION_KEY)]
    region: String,
    /// Read from this snapshot database instead of the remote service.
    #[arg(long, env = "MINDSHELF_DB")]
    db: Option<PathBuf>,
    #[command(flatten)]
    remote: RemoteArgs,
    /// Evaluation time (RFC 3339). Defaults to now.
    #[arg(long)]
    at: Option<DateTime<Utc>>,
    /// Emit JSON instead of a human-readable summary.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// Snapshot database to write into; created when missing.
    #[arg(long, env = "MINDSHELF_DB")]
    db: PathBuf,
    /// JSON file holding a record array or a `{ "items": [...] }` envelope.
    input: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Records(Vec<ThoughtRecord>),
    Envelope(ThoughtListEnvelope),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    match cli.command {
        Commands::Ping => {
            println!("mindshelf_core ping={}", mindshelf_core::ping());
            println!("mindshelf_core version={}", mindshelf_core::core_version());
            Ok(())
        }
        Commands::Report(args) => handle_report(args),
        Commands::Folders(args) => handle_folders(args),
        Commands::Import(args) => handle_import(args),
    }
}

fn handle_report(args: ReportArgs) -> Result<()> {
    let mode = ViewMode::from_region_key(&args.region);
    let now = args.at.unwrap_or_else(Utc::now);

    let report = match &args.db {
        Some(path) => {
            let conn = open_db(path).with_context(|| format!("opening {}", path.display()))?;
            run_report(SqliteThoughtStore::new(conn), &mode, now)?
        }
        None => run_report(args.remote.store(), &mode, now)?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn run_report<S: ThoughtStore>(
    store: S,
    mode: &ViewMode,
    now: DateTime<Utc>,
) -> Result<OverviewReport> {
    OverviewService::new(store)
        .report(mode, now)
        .with_context(|| format!("building {mode} report"))
}

fn handle_folders(args: RemoteArgs) -> Result<()> {
    let folders = args
        .store()
        .list_folders()
        .context("listing remote folders")?;
    for folder in folders {
        println!("{:<10} {}", folder.key, folder.name);
    }
    Ok(())
}

fn handle_import(args: ImportArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let records = match serde_json::from_str::<ImportPayload>(&raw)
        .with_context(|| format!("decoding {}", args.input.display()))?
    {
        ImportPayload::Records(records) => records,
        ImportPayload::Envelope(envelope) => envelope.items,
    };

    let conn = open_db(&args.db).with_context(|| format!("opening {}", args.db.display()))?;
    let written = SqliteThoughtStore::new(conn)
        .import_thoughts(&records)
        .context("writing snapshot")?;
    info!("event=snapshot_import module=cli status=ok count={written}");
    println!("imported {written} thoughts into {}", args.db.display());
    Ok(())
}

fn print_report(report: &OverviewReport) {
    let stats = &report.stats;
    println!("== {} ==", heading(&report.mode));
    println!(
        "total {}  completed {} ({}%)  avg age {}d  latest {}d",
        stats.total,
        stats.completed,
        stats.completion_rate,
        stats.avg_age_days,
        stats.latest_age_days
    );
    println!(
        "text {}  images {}  other {}",
        stats.text, stats.images, report.other_count
    );

    println!();
    println!("Due soon");
    if report.ranking.due_soon.is_empty() {
        println!("  nothing due in the next week");
    }
    for item in &report.ranking.due_soon {
        let when = match item.days_until_due {
            days if days < 0 => format!("overdue {}d", days.abs()),
            0 => "today".to_string(),
            days => format!("in {days}d"),
        };
        println!("  {when:<12} {}", headline(&item.record));
    }

    println!();
    println!("Recently updated");
    for item in &report.ranking.recently_updated {
        println!(
            "  {:>4}d ago  [{}] {}",
            item.days_since_update,
            item.record.folder,
            headline(&item.record)
        );
    }
}

fn heading(mode: &ViewMode) -> String {
    match mode {
        ViewMode::Overview => {
            let keys: Vec<&str> = Folder::OVERVIEW.iter().map(|folder| folder.key()).collect();
            format!("Overview ({})", keys.join(" + "))
        }
        ViewMode::Folder(key) => Folder::from_key(key)
            .map(|folder| folder.display_name().to_string())
            .unwrap_or_else(|| key.clone()),
    }
}

fn headline(record: &ThoughtRecord) -> String {
    let text = record
        .title_text()
        .or_else(|| record.content_text())
        .unwrap_or(record.id.as_str());
    let mut preview: String = text
        .replace(['\n', '\r'], " ")
        .chars()
        .take(TITLE_PREVIEW_CHARS)
        .collect();
    if text.chars().count() > TITLE_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}
