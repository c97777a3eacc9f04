//! Game state for the jukugo tile puzzle.
//!
//! [`Puzzle`] owns a grid that is always populated and, between matches,
//! balanced. The host drives it from its render loop:
//!
//! - pointer input goes through a [`DragGesture`], which swaps the held tile
//!   along the drag and marks forming matches when released,
//! - [`Puzzle::tick`] is called once per frame to fade matched tiles out,
//!   clear them and refill the grid,
//! - [`Puzzle::snapshot`] hands the renderer each tile's symbol, position
//!   and opacity.
//!
//! Rendering, timing and pixel-to-cell mapping are left to the host.
//!
//! # Examples
//!
//! ```
//! use jukugo_core::{GridSize, Position, Vocabulary};
//! use jukugo_game::{DragGesture, Puzzle, PuzzleConfig};
//! use jukugo_generator::GridSeed;
//!
//! let vocabulary: Vocabulary = "日本 本日 人口 口調 調和 和風".parse()?;
//! let mut puzzle = Puzzle::new(
//!     vocabulary,
//!     GridSize::STANDARD,
//!     GridSeed::from_phrase("session"),
//!     PuzzleConfig::default(),
//! )?;
//!
//! let mut drag = DragGesture::new();
//! drag.begin(&puzzle, Position::new(0, 0));
//! drag.move_to(&mut puzzle, Position::new(0, 1));
//! let matched = drag.end(&mut puzzle);
//!
//! // Fade out any match, then keep ticking until the grid settles.
//! while !matched.is_empty() && puzzle.phase().is_fading() {
//!     puzzle.tick();
//! }
//! assert!(puzzle.grid().is_full());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    config::PuzzleConfig,
    drag::DragGesture,
    error::PuzzleError,
    puzzle::{Puzzle, PuzzlePhase, TickOutcome, TileView},
};

mod config;
mod drag;
mod error;
mod puzzle;
