//! Balanced grid generation for the jukugo tile puzzle.
//!
//! A grid is *balanced* when some valid pair can be spelled from its symbols
//! but no valid pair is already spelled by adjacent tiles. [`GridGenerator`]
//! fills empty slots so that the result is balanced, repairing random fills
//! by construction instead of re-rolling whole grids.
//!
//! Generation is deterministic for a given [`GridSeed`], which makes grids
//! reproducible in tests and bug reports.
//!
//! # Errors
//!
//! - [`ConfigurationError`]: the vocabulary can never yield a balanced grid
//!   (reported when the generator is built).
//! - [`FillError`]: a particular fill failed; [`UnsolvableGridError`] means
//!   the repair pass ran out of candidates and the fill may be retried.
//!
//! # Examples
//!
//! ```
//! use jukugo_core::{GridSize, Position, Vocabulary};
//! use jukugo_detector::is_balanced;
//! use jukugo_generator::{DEFAULT_FILL_ATTEMPTS, GridGenerator, GridSeed};
//!
//! let vocabulary: Vocabulary = "日本 本日 人口 口調 調和 和風".parse()?;
//! let mut generator = GridGenerator::new(vocabulary.clone(), GridSeed::from_phrase("docs"))?;
//!
//! let mut grid = generator.generate(GridSize::STANDARD)?;
//!
//! // Clear a matched pair of tiles and refill them.
//! grid.set_symbol(Position::new(1, 0), None);
//! grid.set_symbol(Position::new(1, 1), None);
//! let report = generator.fill_with_retries(&mut grid, DEFAULT_FILL_ATTEMPTS)?;
//!
//! assert_eq!(report.filled.len(), 2);
//! assert!(is_balanced(&grid, &vocabulary));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    error::{ConfigurationError, FillError, UnsolvableGridError},
    grid_generator::{DEFAULT_FILL_ATTEMPTS, FillReport, GridGenerator},
    seed::{GridSeed, SeedParseError},
};

mod error;
mod grid_generator;
mod seed;
