//! Tiles and the grid that owns them.

use std::{
    fmt::{self, Display, Write as _},
    ops::Index,
    str::FromStr,
};

use crate::{GridSize, Position, Symbol};

/// A single grid slot.
///
/// A tile holds an optional symbol and its fade state. `alpha` is the
/// opacity used by renderers: `1.0` is fully visible, `0.0` fully faded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    symbol: Option<Symbol>,
    alpha: f32,
    is_fading: bool,
}

impl Default for Tile {
    fn default() -> Self {
        Self::new()
    }
}

impl Tile {
    /// Creates an empty, fully opaque tile that is not fading.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            symbol: None,
            alpha: 1.0,
            is_fading: false,
        }
    }

    /// Creates an opaque tile holding `symbol`.
    #[must_use]
    pub const fn with_symbol(symbol: Symbol) -> Self {
        Self {
            symbol: Some(symbol),
            alpha: 1.0,
            is_fading: false,
        }
    }

    /// Returns the symbol, or `None` for an empty tile.
    #[must_use]
    pub const fn symbol(&self) -> Option<Symbol> {
        self.symbol
    }

    /// Returns `true` if the tile has no symbol.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.symbol.is_none()
    }

    /// Returns the current opacity in `[0.0, 1.0]`.
    #[must_use]
    pub const fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Returns `true` if the tile is fading out.
    #[must_use]
    pub const fn is_fading(&self) -> bool {
        self.is_fading
    }

    /// Returns `true` if the tile was fading and has become fully transparent.
    #[must_use]
    pub fn is_faded_out(&self) -> bool {
        self.is_fading && self.alpha <= 0.0
    }

    /// Sets or clears the symbol. Fade state is left untouched.
    pub fn set_symbol(&mut self, symbol: Option<Symbol>) {
        self.symbol = symbol;
    }

    /// Marks the tile as fading out.
    pub fn start_fading(&mut self) {
        self.is_fading = true;
    }

    /// Clears the fading flag; the tile fades back in on later steps.
    pub fn stop_fading(&mut self) {
        self.is_fading = false;
    }

    /// Moves `alpha` one step toward `0.0` when fading, otherwise toward
    /// `1.0`, clamping at the bounds.
    pub fn step_alpha(&mut self, step: f32) {
        self.alpha = if self.is_fading {
            (self.alpha - step).max(0.0)
        } else {
            (self.alpha + step).min(1.0)
        };
    }
}

/// A rectangular grid of tiles stored in row-major order.
///
/// # String format
///
/// Grids parse from and print to a compact text form, which keeps tests
/// readable:
///
/// - rows are separated by `/` or newlines,
/// - `.` or `_` is an empty tile, any other character is a symbol,
/// - whitespace inside a row is ignored, and blank rows are skipped.
///
/// [`Display`] writes rows joined by `/`.
///
/// # Examples
///
/// ```
/// use jukugo_core::{Grid, GridSize, Position};
///
/// let mut grid: Grid = "
///     AB.
///     ...
///     ..C
/// "
/// .parse()?;
///
/// assert_eq!(grid.size(), GridSize::STANDARD);
/// assert!(grid.swap(Position::new(0, 0), Position::new(2, 2)));
/// assert_eq!(grid.to_string(), "CB./.../..A");
/// # Ok::<(), jukugo_core::GridParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: GridSize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid of empty tiles.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            tiles: vec![Tile::new(); size.cell_count()],
        }
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the tile at `pos`, or `None` if `pos` is out of bounds.
    #[must_use]
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.size
            .contains(pos)
            .then(|| &self.tiles[self.size.index_of(pos)])
    }

    /// Returns the tile at `pos` mutably, or `None` if `pos` is out of bounds.
    #[must_use]
    pub fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if self.size.contains(pos) {
            let index = self.size.index_of(pos);
            Some(&mut self.tiles[index])
        } else {
            None
        }
    }

    /// Returns the symbol at `pos`; `None` for empty or out-of-bounds slots.
    #[must_use]
    pub fn symbol_at(&self, pos: Position) -> Option<Symbol> {
        self.tile(pos).and_then(Tile::symbol)
    }

    /// Sets the symbol at `pos`. Out-of-bounds positions are ignored.
    pub fn set_symbol(&mut self, pos: Position, symbol: Option<Symbol>) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.set_symbol(symbol);
        }
    }

    /// Exchanges the whole contents (symbol and fade state) of two tiles.
    ///
    /// Returns `false` without touching the grid if either position is out
    /// of bounds.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        if !self.size.contains(a) || !self.size.contains(b) {
            return false;
        }
        let a = self.size.index_of(a);
        let b = self.size.index_of(b);
        self.tiles.swap(a, b);
        true
    }

    /// Iterates over every tile together with its position, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, &Tile)> {
        self.size.positions().zip(&self.tiles)
    }

    /// Iterates mutably over every tile together with its position.
    pub fn tiles_mut(&mut self) -> impl Iterator<Item = (Position, &mut Tile)> {
        self.size.positions().zip(&mut self.tiles)
    }

    /// Iterates over occupied slots and their symbols, row-major.
    pub fn symbols(&self) -> impl Iterator<Item = (Position, Symbol)> + '_ {
        self.tiles()
            .filter_map(|(pos, tile)| tile.symbol().map(|symbol| (pos, symbol)))
    }

    /// Returns the positions of empty tiles, row-major.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        self.tiles()
            .filter(|(_, tile)| tile.is_empty())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Returns `true` if every tile holds a symbol.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tiles.iter().all(|tile| !tile.is_empty())
    }
}

impl Index<Position> for Grid {
    type Output = Tile;

    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    fn index(&self, pos: Position) -> &Tile {
        assert!(
            self.size.contains(pos),
            "position {pos} out of bounds for {} grid",
            self.size
        );
        &self.tiles[self.size.index_of(pos)]
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, tile) in self.tiles() {
            if pos.column() == 0 && pos.row() > 0 {
                f.write_char('/')?;
            }
            match tile.symbol() {
                Some(symbol) => f.write_char(symbol.as_char())?,
                None => f.write_char('.')?,
            }
        }
        Ok(())
    }
}

/// Errors returned when parsing a [`Grid`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridParseError {
    /// The text contained no rows.
    #[display("grid text contains no rows")]
    Empty,
    /// A row had a different width from the first row.
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
}

impl FromStr for Grid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split(['/', '\n'])
            .map(|row| {
                row.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c {
                        '.' | '_' => Tile::new(),
                        c => Tile::with_symbol(Symbol::new(c)),
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect::<Vec<_>>();

        let Some(expected) = rows.first().map(Vec::len) else {
            return Err(GridParseError::Empty);
        };
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(GridParseError::RaggedRow {
                row,
                expected,
                found,
            });
        }

        Ok(Self {
            size: GridSize::new(rows.len(), expected),
            tiles: rows.into_iter().flatten().collect(),
        })
    }
}
