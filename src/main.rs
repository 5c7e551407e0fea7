use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use docfrag::{
    ConvertLimits, ConvertRequest, ErrorResponse, FragmentSplitter, SplitConfig, convert_markup,
    telemetry,
};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "docfrag", about = "Split rendered document markup into bounded fragments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split markup and print the JSON envelope
    Split(SplitArgs),
    /// Show where each cut lands and why
    Inspect(InspectArgs),
}

#[derive(Args)]
struct SplitArgs {
    /// Markup file (reads stdin when omitted)
    file: Option<PathBuf>,
    /// Maximum fragment length in characters
    #[arg(long, allow_negative_numbers = true)]
    max_length: Option<i64>,
    /// Strip all tags from each fragment
    #[arg(long, default_value_t = false)]
    plain: bool,
    /// Reject lengths outside the configured bounds
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Pretty-print the JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// Markup file (reads stdin when omitted)
    file: Option<PathBuf>,
    /// Maximum fragment length in characters
    #[arg(long, default_value_t = docfrag::DEFAULT_MAX_LENGTH)]
    max_length: usize,
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Split(args) => run_split(args),
        Commands::Inspect(args) => run_inspect(args),
    }
}

fn read_markup(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read markup from {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read markup from stdin")?;
            Ok(buf)
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    out.context("serialize response")
}

fn run_split(args: SplitArgs) -> Result<ExitCode> {
    let start = Instant::now();
    let limits = ConvertLimits::from_env()
        .context("load limits")?
        .strict(args.strict);
    let markup = read_markup(args.file.as_ref())?;

    let request = ConvertRequest {
        maxlength: args.max_length,
        plain: args.plain,
    };

    match convert_markup(&markup, &request, &limits) {
        Ok(response) => {
            println!("{}", to_json(&response, args.pretty)?);
            info!(
                fragments = response.total_fragments,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "split done"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("{}", to_json(&ErrorResponse::from(&err), args.pretty)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_inspect(args: InspectArgs) -> Result<ExitCode> {
    let markup = read_markup(args.file.as_ref())?;
    let splitter = FragmentSplitter::new(SplitConfig::new(args.max_length));

    println!(
        "{:>5}  {:>10}  {:>10}  {:>7}  cut",
        "#", "start", "end", "chars"
    );
    for fragment in splitter.fragments(&markup) {
        let m = fragment.metadata;
        println!(
            "{:>5}  {:>10}  {:>10}  {:>7}  {:?}",
            m.index, m.start_offset, m.end_offset, m.char_count, m.cut
        );
    }

    Ok(ExitCode::SUCCESS)
}
