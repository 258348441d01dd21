use std::io::Read;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wordtree::export::{self, Format};
use wordtree::text::DEFAULT_CHUNK_SIZE;
use wordtree::config::DEFAULT_INTERVAL_MS;
use wordtree::{Analyzer, AnalyzerConfig, Frame, Playback};

#[derive(Parser, Debug)]
#[command(name = "wordtree", about = "Build AVL word trees and trace every rotation")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenize a text, build one tree per chunk, and print statistics.
    Analyze {
        /// Input text file (`-` for stdin).
        input: PathBuf,
        /// Words per tree.
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
        /// Export statistics as `key,value` lines.
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Export statistics as JSON.
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Replay one tree insertion by insertion.
    Replay {
        /// Input text file (`-` for stdin).
        input: PathBuf,
        /// Words per tree.
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
        /// Delay between insertions (300-1500, multiples of 100).
        #[arg(long, default_value_t = DEFAULT_INTERVAL_MS)]
        interval_ms: u64,
        /// Tree number to replay (1-based).
        #[arg(long, default_value_t = 1)]
        tree: usize,
        /// Print every frame without waiting.
        #[arg(long)]
        no_delay: bool,
    },
    /// Insert the given words in order and print each step.
    Trace {
        /// Normalized words (lowercase a-z).
        #[arg(required = true)]
        words: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            input,
            chunk_size,
            csv,
            json,
        } => run_analyze(&input, chunk_size, csv, json)?,
        Commands::Replay {
            input,
            chunk_size,
            interval_ms,
            tree,
            no_delay,
        } => run_replay(&input, chunk_size, interval_ms, tree, no_delay)?,
        Commands::Trace { words } => run_trace(&words)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_analyze(
    input: &Path,
    chunk_size: usize,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    let analyzer = Analyzer::new(AnalyzerConfig::new().with_chunk_size(chunk_size))
        .context("invalid analyzer configuration")?;
    let text = read_input(input)?;
    let analysis = analyzer.analyze(&text);

    info!(
        trees = analysis.stats.trees_generated,
        words = analysis.stats.total_words,
        "analysis complete"
    );

    println!("{}", analysis.stats);
    for report in &analysis.reports {
        println!("{}", report);
    }

    if let Some(path) = csv {
        export::export_to_file(&path, &analysis.stats, Format::Csv)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), "exported CSV");
    }

    if let Some(path) = json {
        export_json(&path, &analysis.stats)?;
    }

    Ok(())
}

#[cfg(feature = "visualize")]
fn export_json(path: &Path, stats: &wordtree::TextStats) -> Result<()> {
    export::export_to_file(path, stats, Format::Json)
        .with_context(|| format!("failed to write JSON to {}", path.display()))?;
    info!(path = %path.display(), "exported JSON");
    Ok(())
}

#[cfg(not(feature = "visualize"))]
fn export_json(_path: &Path, _stats: &wordtree::TextStats) -> Result<()> {
    bail!("JSON export requires the `visualize` feature")
}

fn run_replay(
    input: &Path,
    chunk_size: usize,
    interval_ms: u64,
    tree: usize,
    no_delay: bool,
) -> Result<()> {
    let config = AnalyzerConfig::new()
        .with_chunk_size(chunk_size)
        .with_interval_ms(interval_ms);
    let analyzer = Analyzer::new(config).context("invalid analyzer configuration")?;

    let text = read_input(input)?;
    let words = wordtree::text::tokenize(&text);
    if words.is_empty() {
        bail!("no words found in {}", input.display());
    }

    let mut playback = analyzer
        .playback(&words, tree)
        .with_context(|| format!("cannot replay tree {}", tree))?;

    info!(tree, words = playback.len(), "replaying");
    play(&mut playback, no_delay);
    Ok(())
}

fn run_trace(words: &[String]) -> Result<()> {
    let analyzer = Analyzer::new(AnalyzerConfig::new())?;
    let mut playback = analyzer
        .playback_from_keys(words)
        .context("words must be lowercase a-z")?;
    play(&mut playback, true);
    Ok(())
}

fn play(playback: &mut Playback, no_delay: bool) {
    while let Some(frame) = playback.tick() {
        print_frame(&frame);
        if !no_delay && !playback.is_finished() {
            thread::sleep(playback.interval());
        }
    }

    if let Some(snapshot) = playback.tree().snapshot() {
        println!();
        print!("{}", snapshot);
    }
    println!("{}", playback.report());
}

fn print_frame(frame: &Frame) {
    println!("step {}\t{}\t{}", frame.step, frame.word, frame.trace);
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input from {}", path.display()))
}
