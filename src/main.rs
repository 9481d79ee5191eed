//! CLI entry point for the RMP Rater tool.
//!
//! Provides subcommands for extracting and aggregating professor rating
//! dumps, compacting semester catalog dumps, building the instructor
//! course index, and flattening it to CSV.

use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rmp_rater::aggregate::compact::{Subject, compact_courses};
use rmp_rater::aggregate::index::build_index;
use rmp_rater::aggregate::ledger::CourseLedger;
use rmp_rater::aggregate::types::{InstructorTermIndex, MergeInstruction};
use rmp_rater::extract;
use rmp_rater::output::{self, ProfessorReport};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "rmp_rater")]
#[command(about = "A tool to extract and aggregate professor course ratings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract rating records from a scraped dump and append per-course stats to a CSV
    Rate {
        /// Path to the raw dump (key/value or rendered-markup layout)
        #[arg(value_name = "DUMP_FILE")]
        source: PathBuf,

        /// Professor name for the exported rows (overrides the dump's own)
        #[arg(short, long)]
        professor: Option<String>,

        /// Cross-listing merges, applied in the order given
        #[arg(short, long, value_name = "ABSORB:INTO")]
        merge: Vec<MergeInstruction>,

        /// CSV file to append results to
        #[arg(short, long, default_value = "prof_stats.csv")]
        output: String,

        /// Optional: also write profile and stats as JSON
        #[arg(long)]
        json: Option<String>,
    },
    /// Compact a full semester catalog dump into a per-term snapshot
    Compact {
        /// Path to the full catalog JSON (subjects with courses and sections)
        #[arg(value_name = "CATALOG_JSON")]
        source: PathBuf,

        /// Compact snapshot file to write
        #[arg(short, long)]
        output: String,
    },
    /// Build the instructor -> term -> courses index from snapshot files
    Index {
        /// Directory containing compact_classes<TERM>.json files
        #[arg(value_name = "SNAPSHOT_DIR", default_value = "class")]
        input_dir: PathBuf,

        /// Index JSON file to write
        #[arg(short, long, default_value = "professor_courses.json")]
        output: String,
    },
    /// Flatten an index JSON into a professor,courses CSV
    Courses {
        /// Path to the index JSON produced by `index`
        #[arg(value_name = "INDEX_JSON")]
        source: PathBuf,

        /// CSV file to write
        #[arg(short, long, default_value = "professor_courses.csv")]
        output: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/rmp_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("rmp_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rate {
            source,
            professor,
            merge,
            output,
            json,
        } => rate(&source, professor, &merge, &output, json.as_deref()),
        Commands::Compact { source, output } => compact_catalog(&source, &output),
        Commands::Index { input_dir, output } => index(&input_dir, &output),
        Commands::Courses { source, output } => courses(&source, &output),
    }
}

/// Extracts records from one dump, aggregates them for one professor, and
/// appends the finalized rows to the stats CSV.
#[tracing::instrument(skip_all, fields(source = %source.display()))]
fn rate(
    source: &Path,
    professor: Option<String>,
    merges: &[MergeInstruction],
    output: &str,
    json: Option<&str>,
) -> Result<()> {
    let buffer = std::fs::read_to_string(source)
        .with_context(|| format!("reading dump {}", source.display()))?;

    let extraction = extract::extract(&buffer)
        .with_context(|| format!("extracting from {}", source.display()))?;

    info!(
        layout = ?extraction.layout,
        records = extraction.records.len(),
        skipped = extraction.skipped.len(),
        "extraction complete"
    );
    for skip in &extraction.skipped {
        warn!(offset = skip.offset, reason = %skip.reason, "record dropped");
    }

    let mut ledger = CourseLedger::new();
    for record in &extraction.records {
        ledger.observe(record);
    }

    for skip in ledger.apply_merges(merges) {
        warn!(
            absorb = %skip.instruction.absorb,
            into = %skip.instruction.into,
            missing = %skip.missing,
            "merge skipped: code not in mapping"
        );
    }

    let professor = professor
        .or_else(|| extraction.profile.full_name())
        .unwrap_or_else(|| "unknown".to_string());

    let rows = ledger.finalize();
    output::append_course_stats(output, &professor, &rows)?;
    info!(professor = %professor, rows = rows.len(), output, "stats CSV updated");

    if let Some(json_path) = json {
        let report = ProfessorReport {
            professor: &professor,
            profile: &extraction.profile,
            courses: &rows,
        };
        output::write_professor_json(json_path, &report)?;
        info!(output = json_path, "professor JSON written");
    }

    Ok(())
}

/// Compacts a full catalog dump into a snapshot file.
fn compact_catalog(source: &Path, output: &str) -> Result<()> {
    let file =
        File::open(source).with_context(|| format!("reading catalog {}", source.display()))?;
    let subjects: Vec<Subject> = serde_json::from_reader(file)
        .with_context(|| format!("decoding catalog {}", source.display()))?;

    let compact = compact_courses(&subjects);
    output::write_compact_json(output, &compact)?;

    info!(
        subjects = subjects.len(),
        courses = compact.len(),
        output,
        "compact snapshot written"
    );
    Ok(())
}

/// Builds the instructor index from a directory of snapshot files.
#[tracing::instrument(fields(input_dir = %input_dir.display()))]
fn index(input_dir: &Path, output: &str) -> Result<()> {
    let index = build_index(input_dir)?;
    output::write_index_json(output, &index)?;

    info!(instructors = index.len(), output, "instructor index written");
    Ok(())
}

/// Flattens a previously written index JSON into the courses CSV.
fn courses(source: &Path, output: &str) -> Result<()> {
    let file =
        File::open(source).with_context(|| format!("reading index {}", source.display()))?;
    let index: InstructorTermIndex = serde_json::from_reader(file)
        .with_context(|| format!("decoding index {}", source.display()))?;

    output::write_courses_csv(output, &index)?;

    info!(instructors = index.len(), output, "courses CSV written");
    Ok(())
}
