use jukugo_core::{GridSize, Symbol};

/// The vocabulary cannot produce balanced grids.
///
/// Returned by [`GridGenerator::new`](crate::GridGenerator::new) so that a
/// bad vocabulary is reported once, up front, instead of surfacing as
/// endless failed fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigurationError {
    /// Fewer than two symbols: every possible pair would also be forming.
    #[display("vocabulary needs at least two symbols, got {count}")]
    TooFewSymbols {
        /// Number of symbols in the vocabulary.
        count: usize,
    },
    /// A symbol has no pairs, so repair cannot pick a partner for it.
    #[display("symbol {symbol} has no pairs")]
    SymbolWithoutPairs {
        /// The symbol with an empty pair list.
        symbol: Symbol,
    },
}

/// The repair pass finished without reaching a balanced grid.
///
/// The grid is left fully populated with the last assignment. Filling again
/// after clearing the same slots draws fresh randomness and may succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no balanced {size} grid found after {repairs} repair assignments")]
pub struct UnsolvableGridError {
    /// Size of the grid being filled.
    pub size: GridSize,
    /// Number of repair assignments tried.
    pub repairs: usize,
}

/// Errors returned while filling a grid.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum FillError {
    /// The grid has fewer than two cells and can never hold a pair.
    #[display("a {size} grid has fewer than two cells")]
    GridTooSmall {
        /// Size of the rejected grid.
        size: GridSize,
    },
    /// No balanced assignment was found.
    #[display("{_0}")]
    Unsolvable(#[from] UnsolvableGridError),
}
