/// SBF command-line tool: decode and inspect files of schema-driven binary
/// values.
///
/// # Command overview
///
/// ```text
/// sbf <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Decode a file as a sequence of typed values
///   inspect    Hex-dump the head of a file
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log decoder activity to stderr (debug level)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                      |
/// |------|----------------------------------------------|
/// | 0    | Success                                      |
/// | 1    | Error (I/O failure, malformed value, etc.)   |
///
/// All error details and log output go to stderr so stdout can be piped
/// cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_inspect;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The SBF command-line tool.
#[derive(Parser)]
#[command(name = "sbf", version, about = "Schema-driven binary format CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder activity at debug level. `RUST_LOG` overrides this.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Decode a file as a sequence of typed values.
    Decode(DecodeArgs),
    /// Hex-dump the head of a file.
    Inspect(InspectArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `sbf decode`.
///
/// The file carries no type information of its own, so the caller names
/// the type of each value in order.
///
/// ```text
/// ┌────────────────────┬─────────────────────────────────────────────────┐
/// │ Flag               │ Effect                                          │
/// ├────────────────────┼─────────────────────────────────────────────────┤
/// │ --types LIST       │ comma-separated value types, in stream order    │
/// │ --repeat           │ cycle LIST until the file is exhausted          │
/// │ --json             │ one JSON object per value instead of text       │
/// │ --max-length N     │ reject string/bytes length prefixes above N     │
/// │ --pooled-threshold │ largest string decoded through the scratch pool │
/// └────────────────────┴─────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the file to decode.
    pub file: PathBuf,

    /// Comma-separated value types (e.g. `long,string,fixed:16`).
    ///
    /// Recognised names: `null`, `boolean`, `int`, `long`, `float`,
    /// `double`, `string`, `bytes`, `fixed:<size>`.
    #[arg(short, long)]
    pub types: String,

    /// Repeat the type list until the end of the file.
    #[arg(long)]
    pub repeat: bool,

    /// Emit JSON lines instead of plain text.
    #[arg(long)]
    pub json: bool,

    /// Upper bound on any string or bytes length prefix.
    #[arg(long)]
    pub max_length: Option<u64>,

    /// Largest string, in bytes, decoded through the shared scratch pool.
    /// Values above the pool's 4096-byte retention cap are lowered to it.
    #[arg(long)]
    pub pooled_threshold: Option<usize>,
}

/// Arguments for `sbf inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the file to inspect.
    pub file: PathBuf,

    /// Number of bytes to dump from the start of the file.
    #[arg(short = 'n', long, default_value_t = 256)]
    pub bytes: usize,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
