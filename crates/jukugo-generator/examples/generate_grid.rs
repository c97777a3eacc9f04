//! Example demonstrating balanced grid generation.
//!
//! This example shows how to:
//! - Build a `Vocabulary` from a list of two-kanji words
//! - Create a `GridGenerator` from a seed
//! - Generate a grid and inspect its possible pairs
//! - Sample many seeds in parallel to measure how often repair is needed
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_grid
//! ```
//!
//! Reproduce a grid from a logged seed, or derive the seed from a phrase:
//!
//! ```sh
//! cargo run --example generate_grid -- --seed c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1
//! cargo run --example generate_grid -- --phrase "daily puzzle"
//! ```
//!
//! Sample repair statistics over many seeds (default: 1):
//!
//! ```sh
//! cargo run --example generate_grid -- --samples 10000 --rows 4 --columns 4
//! ```
//!
//! Set `RUST_LOG=debug` to see each fill, or `RUST_LOG=trace` for every
//! repair assignment.

use std::process;

use clap::Parser;
use jukugo_core::{Grid, GridSize, Vocabulary};
use jukugo_detector::MatchDetector;
use jukugo_generator::{DEFAULT_FILL_ATTEMPTS, FillReport, GridGenerator, GridSeed};
use rayon::prelude::*;

const DEFAULT_WORDS: &str = "\
日本 本日 人口 口調 調和 和風 風車 車道 道人 日曜 曜日 人生 生人 \
大人 人気 気分 分野 野生 生活 活気 気長 長大 大会 会話 話題";

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Seed as 64 hex digits. A random seed is used if neither this nor
    /// `--phrase` is given.
    #[arg(long, value_name = "HEX", conflicts_with = "phrase")]
    seed: Option<GridSeed>,

    /// Derive the seed from arbitrary text.
    #[arg(long, value_name = "TEXT")]
    phrase: Option<String>,

    /// Whitespace-separated two-symbol words making up the vocabulary.
    #[arg(long, value_name = "WORDS", default_value = DEFAULT_WORDS)]
    words: String,

    /// Number of grid rows.
    #[arg(long, value_name = "COUNT", default_value_t = 3)]
    rows: usize,

    /// Number of grid columns.
    #[arg(long, value_name = "COUNT", default_value_t = 3)]
    columns: usize,

    /// Number of seeds to sample for repair statistics.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    samples: usize,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let vocabulary = match args.words.parse::<Vocabulary>() {
        Ok(vocabulary) => vocabulary,
        Err(err) => {
            eprintln!("Invalid vocabulary: {err}");
            process::exit(2);
        }
    };
    let seed = match (&args.seed, &args.phrase) {
        (Some(seed), _) => *seed,
        (None, Some(phrase)) => GridSeed::from_phrase(phrase),
        (None, None) => GridSeed::random(),
    };
    let size = GridSize::new(args.rows, args.columns);

    if args.samples == 0 {
        eprintln!("--samples must be at least 1.");
        process::exit(1);
    }

    let mut generator = match GridGenerator::new(vocabulary.clone(), seed) {
        Ok(generator) => generator,
        Err(err) => {
            eprintln!("Unusable vocabulary: {err}");
            process::exit(2);
        }
    };
    let mut grid = Grid::new(size);
    let report = match generator.fill_with_retries(&mut grid, DEFAULT_FILL_ATTEMPTS) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Generation failed: {err}");
            process::exit(1);
        }
    };
    print_grid(&vocabulary, seed, &grid, &report);

    if args.samples > 1 {
        print_samples(&vocabulary, seed, size, args.samples);
    }
}

fn print_grid(vocabulary: &Vocabulary, seed: GridSeed, grid: &Grid, report: &FillReport) {
    let detector = MatchDetector::new(vocabulary);

    println!("Seed:");
    println!("  {seed}");
    println!();

    println!("Grid:");
    for row in grid.to_string().split('/') {
        println!("  {row}");
    }
    println!();

    println!("Possible pairs:");
    for pair in detector.possible_pairs(grid) {
        println!("  {pair}");
    }
    println!();

    println!("Stats:");
    println!("  repairs: {}", report.repairs);
    println!("  balanced: {}", detector.is_balanced(grid));
}

fn print_samples(vocabulary: &Vocabulary, seed: GridSeed, size: GridSize, samples: usize) {
    let results = (0..samples)
        .into_par_iter()
        .map(|i| {
            let sample_seed = GridSeed::from_phrase(&format!("{seed}-{i}"));
            let mut generator = GridGenerator::new(vocabulary.clone(), sample_seed).ok()?;
            let mut grid = Grid::new(size);
            generator.fill(&mut grid).ok().map(|report| report.repairs)
        })
        .collect::<Vec<_>>();

    let successes = results.iter().flatten().collect::<Vec<_>>();
    let without_repair = successes.iter().filter(|&&&repairs| repairs == 0).count();
    let max_repairs = successes.iter().copied().max().copied().unwrap_or(0);
    let total_repairs = successes.iter().copied().sum::<usize>();

    println!();
    println!("Samples ({size}, single attempt each):");
    println!("  samples: {samples}");
    println!("  balanced: {}", successes.len());
    println!("  unsolvable: {}", samples - successes.len());
    println!("  no repair needed: {without_repair}");
    println!("  max repairs: {max_repairs}");
    if !successes.is_empty() {
        #[expect(clippy::cast_precision_loss)]
        let mean = total_repairs as f64 / successes.len() as f64;
        println!("  mean repairs: {mean:.2}");
    }
}
