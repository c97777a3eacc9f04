use jukugo_core::{Position, Symbol};
use jukugo_generator::{ConfigurationError, FillError};

/// Errors that can occur while setting up or reshuffling a puzzle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum PuzzleError {
    /// The vocabulary cannot produce balanced grids.
    #[display("invalid vocabulary: {_0}")]
    Configuration(#[from] ConfigurationError),
    /// The grid could not be filled.
    #[display("grid generation failed: {_0}")]
    Fill(#[from] FillError),
    /// A tile of a supplied grid holds a symbol outside the vocabulary.
    #[display("symbol {symbol} at {position} is not in the vocabulary")]
    UnknownSymbol {
        /// Where the symbol was found.
        position: Position,
        /// The unknown symbol.
        symbol: Symbol,
    },
    /// The fade step would never finish a fade, or overshoots it.
    #[display("fade step must be in (0.0, 1.0], got {step}")]
    InvalidFadeStep {
        /// The rejected step.
        step: f32,
    },
}
