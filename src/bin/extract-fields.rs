//! CLI binary for edgequake-fields.
//!
//! Acts as a headless page: the file argument is placed in the view's file
//! input, the form is submitted once through `ExtractionController`, and the
//! filled outputs are printed.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_fields::pipeline::upload::load_file;
use edgequake_fields::{
    DocumentField, ExtractedFields, ExtractionConfig, ExtractionController, ExtractionView,
    FailureKind, Notifier, SubmissionOrdering, SubmissionOutcome, SubmitEvent,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI notifier using indicatif ─────────────────────────────────────────────

/// Shows a spinner while the request is pending and prints alerts to stderr.
struct CliNotifier {
    bar: Option<ProgressBar>,
}

impl CliNotifier {
    fn new(show_progress: bool) -> Arc<Self> {
        let bar = show_progress.then(|| {
            let bar = ProgressBar::new_spinner();
            let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
            bar.set_style(style);
            bar.set_prefix("Extracting");
            bar
        });
        Arc::new(Self { bar })
    }

    fn clear(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Notifier for CliNotifier {
    fn on_request_start(&self, _ticket: u64, endpoint: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(format!("waiting for {endpoint}…"));
            bar.enable_steady_tick(Duration::from_millis(80));
        }
    }

    fn on_fields_populated(&self, _ticket: u64, _fields: &ExtractedFields) {
        self.clear();
    }

    fn alert(&self, message: &str) {
        self.clear();
        eprintln!("{} {}", red("✗"), red(message));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract from a local invoice (service on 127.0.0.1:8000)
  extract-fields invoice.pdf

  # Use a remote service
  extract-fields --endpoint http://10.0.0.5:8000/extract-fields scan.jpg

  # Reduce verbose answers to their core values, print JSON
  extract-fields --normalize --json invoice.pdf

  # Submit without a file (the service decides what to answer)
  extract-fields

EXIT CODES:
  0  fields extracted
  1  unexpected failure (unreadable file, malformed response)
  2  transport failure (service unreachable or non-2xx status)
  3  the service reported an error

ENVIRONMENT VARIABLES:
  EXTRACT_FIELDS_ENDPOINT   Extraction endpoint URL
  RUST_LOG                  Log filter (overrides -v / -q)
"#;

/// Extract document fields through a remote extraction service.
#[derive(Parser, Debug)]
#[command(
    name = "extract-fields",
    version,
    about = "Extract document number, dates, currency, amount and subtype from a document",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Document to upload (PDF or image). Omit to submit without a file.
    file: Option<PathBuf>,

    /// Extraction endpoint.
    #[arg(
        long,
        env = "EXTRACT_FIELDS_ENDPOINT",
        default_value = edgequake_fields::DEFAULT_ENDPOINT
    )]
    endpoint: String,

    /// Reduce each value to its core (codes, dates, amounts).
    #[arg(long, env = "EXTRACT_FIELDS_NORMALIZE")]
    normalize: bool,

    /// Policy for overlapping submissions.
    #[arg(long, value_enum, default_value = "latest")]
    ordering: OrderingArg,

    /// Print the fields as JSON instead of a table.
    #[arg(long, env = "EXTRACT_FIELDS_JSON")]
    json: bool,

    /// Disable the spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "EXTRACT_FIELDS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "EXTRACT_FIELDS_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OrderingArg {
    Latest,
    LastResolved,
}

impl From<OrderingArg> for SubmissionOrdering {
    fn from(v: OrderingArg) -> Self {
        match v {
            OrderingArg::Latest => SubmissionOrdering::LatestSubmissionWins,
            OrderingArg::LastResolved => SubmissionOrdering::LastResolvedWins,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config and view ────────────────────────────────────────────
    let config = ExtractionConfig::builder()
        .endpoint(&cli.endpoint)
        .normalize_values(cli.normalize)
        .ordering(cli.ordering.clone().into())
        .build()
        .context("Invalid configuration")?;

    let view = Arc::new(Mutex::new(ExtractionView::new()));
    if let Some(ref path) = cli.file {
        let upload = load_file(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        view.lock()
            .map_err(|_| anyhow::anyhow!("view lock poisoned"))?
            .file_input
            .select(upload);
    }

    let notifier = CliNotifier::new(show_progress);
    let controller = ExtractionController::with_notifier(config, view, notifier.clone())
        .context("Failed to create controller")?;

    // ── Submit ───────────────────────────────────────────────────────────
    let mut event = SubmitEvent::new();
    let outcome = controller.submit(&mut event).await;
    notifier.clear();

    match outcome {
        SubmissionOutcome::Populated(fields) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&fields).context("Failed to serialise fields")?
                );
            } else {
                print_table(&fields);
                if !cli.quiet {
                    let filled = fields.iter().filter(|(_, v)| !v.is_empty()).count();
                    eprintln!("{} {}/6 fields extracted", green("✔"), bold(&filled.to_string()));
                }
            }
            Ok(())
        }
        SubmissionOutcome::Failed(e) => {
            if cli.json {
                let body = serde_json::json!({
                    "error": e.user_message(),
                    "kind": e.kind(),
                    "detail": e.to_string(),
                });
                println!("{body}");
            } else if cli.verbose {
                eprintln!("  {}", dim(&e.to_string()));
            }
            std::process::exit(exit_code(e.kind()));
        }
        // Only one submission is ever made here, so nothing can supersede it.
        SubmissionOutcome::Superseded => Ok(()),
    }
}

fn exit_code(kind: FailureKind) -> i32 {
    match kind {
        FailureKind::Unexpected => 1,
        FailureKind::Transport => 2,
        FailureKind::Application => 3,
    }
}

fn print_table(fields: &ExtractedFields) {
    let width = DocumentField::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(0);
    for (field, value) in fields.iter() {
        println!("{:<width$}  {}", field.label(), value, width = width);
    }
}
