//! CLI for the roomlog sensor log.
//!
//! Provides the interactive menu, a one-shot report over the sample data,
//! and a sorted-insertion benchmark.

mod menu;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use roomlog::format::{self, EntryRow, RoomSummary};
use roomlog::{Logbook, LogbookConfig, Reading, check};
use tracing_subscriber::EnvFilter;

/// roomlog — Fixed-capacity room sensor log.
#[derive(Parser)]
#[command(name = "roomlog", version, about)]
struct Cli {
    /// Path to a JSON capacity configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Command to run; defaults to the interactive menu.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu on stdin/stdout.
    Menu,

    /// Load the sample data and print entries, rooms and check results.
    Report {
        /// Output format.
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Run a sorted-insertion microbenchmark.
    Bench {
        /// Number of times to fill a logbook to capacity.
        #[arg(long, default_value = "10000")]
        rounds: u32,
    },
}

/// Output format for reports.
#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Fixed-width text tables.
    Text,
    /// A single JSON object.
    Json,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => cmd_menu(cli.config.as_deref()),
        Commands::Report { format } => cmd_report(cli.config.as_deref(), &format),
        Commands::Bench { rounds } => cmd_bench(cli.config.as_deref(), rounds),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Logs to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds an empty logbook from `--config`, or the defaults.
fn open_logbook(config_path: Option<&Path>) -> Result<Logbook, Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            LogbookConfig::load(path)?
        }
        None => LogbookConfig::default(),
    };
    tracing::debug!(?config, "opening logbook");
    Ok(Logbook::new(config)?)
}

/// Implements `roomlog menu`.
fn cmd_menu(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut logbook = open_logbook(config_path)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    menu::run(&mut logbook, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

/// Implements `roomlog report`.
fn cmd_report(
    config_path: Option<&Path>,
    output_format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut logbook = open_logbook(config_path)?;
    roomlog::sample::load_sample(&mut logbook)?;
    let report = check::verify(&logbook);
    tracing::debug!(entries = logbook.len(), rooms = logbook.room_count(), "sample loaded");

    match output_format {
        OutputFormat::Text => {
            println!("All Entries (sorted):");
            print!("{}", format::format_entries(&logbook)?);
            println!();
            println!("All Rooms:");
            for (id, _) in logbook.rooms() {
                println!();
                print!("{}", format::format_room(&logbook, id)?);
            }
            println!();
            println!("Order test {}.", pass_fail(report.order));
            println!("Room entries test {}.", pass_fail(report.bijection));
            println!("Room order test {}.", pass_fail(report.room_order));
        }
        OutputFormat::Json => {
            let entries = logbook
                .entries()
                .map(|view| EntryRow::from_view(&view))
                .collect::<roomlog::Result<Vec<_>>>()?;
            let rooms = logbook
                .rooms()
                .map(|(id, _)| RoomSummary::build(&logbook, id))
                .collect::<roomlog::Result<Vec<_>>>()?;
            let document = serde_json::json!({
                "entries": entries,
                "rooms": rooms,
                "checks": report,
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    if !report.passed() {
        tracing::warn!(?report, "consistency checks failed");
        return Err("consistency checks failed".into());
    }
    Ok(())
}

/// Implements `roomlog bench`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
fn cmd_bench(config_path: Option<&Path>, rounds: u32) -> Result<(), Box<dyn std::error::Error>> {
    let template = open_logbook(config_path)?;
    let config = template.config().clone();
    let room_count = config.max_rooms.min(4);

    println!("roomlog sorted-insertion benchmark");
    println!("  Rounds: {rounds}");
    println!("  Rooms: {room_count}");
    println!("  Entries per round: {}", config.max_entries);
    println!();

    let mut total_writes = 0u64;
    let start = Instant::now();

    for _ in 0..rounds {
        let mut logbook = Logbook::new(config.clone())?;
        let rooms = (0..room_count)
            .map(|i| logbook.add_room(&format!("room_{i:02}")))
            .collect::<roomlog::Result<Vec<_>>>()?;

        // Descending timestamps so each insert lands at the front of its room.
        for i in 0..config.max_entries {
            let room = rooms[i % rooms.len()];
            let reading = Reading::SoundLevel(40);
            if logbook.create(room, reading, (config.max_entries - i) as i64).is_err() {
                break;
            }
            total_writes += 1;
        }
    }

    let elapsed = start.elapsed();
    let ns_per_write = elapsed.as_nanos() as f64 / total_writes.max(1) as f64;
    let writes_per_sec = total_writes as f64 / elapsed.as_secs_f64();

    println!("Results:");
    println!("  Total writes: {total_writes}");
    println!("  Elapsed: {elapsed:.3?}");
    println!("  Avg latency: {ns_per_write:.1} ns/write");
    println!("  Throughput: {writes_per_sec:.0} writes/sec");
    println!();

    Ok(())
}

fn pass_fail(passed: bool) -> &'static str {
    if passed { "PASSED" } else { "FAILED" }
}
