//! Core data structures for the jukugo tile puzzle.
//!
//! This crate provides the data model shared by match detection, grid
//! generation, and the puzzle state machine.
//!
//! # Overview
//!
//! 1. **Vocabulary types**
//!    - [`symbol`]: [`Symbol`] (a single tile character) and [`Pair`] (an
//!      ordered two-symbol compound word)
//!    - [`vocabulary`]: the externally supplied mapping from each symbol to
//!      the pairs it takes part in
//!
//! 2. **Grid types**
//!    - [`position`]: [`Position`] and [`GridSize`], plus the
//!      [`is_distant`] predicate used by grid repair
//!    - [`grid`]: [`Tile`] and the row-major [`Grid`] that owns them
//!
//! # Examples
//!
//! ```
//! use jukugo_core::{Grid, Position, Vocabulary};
//!
//! let vocabulary: Vocabulary = "日本 本日 人口".parse()?;
//! let grid: Grid = "日人. / ... / ..本".parse()?;
//!
//! assert_eq!(grid.size().rows(), 3);
//! assert_eq!(grid.symbol_at(Position::new(2, 2)).map(|s| s.as_char()), Some('本'));
//! assert!(vocabulary.is_valid(&"日本".parse()?));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod grid;
pub mod position;
pub mod symbol;
pub mod vocabulary;

pub use self::{
    grid::{Grid, GridParseError, Tile},
    position::{GridSize, Neighbors, Position, PositionSet, is_distant},
    symbol::{Pair, PairParseError, Symbol},
    vocabulary::{Vocabulary, VocabularyError},
};
