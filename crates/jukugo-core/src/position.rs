//! Grid coordinates.

use std::{
    collections::BTreeSet,
    fmt::{self, Display},
};

use tinyvec::ArrayVec;

/// A `(row, column)` coordinate, 0-indexed from the top-left corner.
///
/// Positions are plain coordinates and carry no grid size; use
/// [`GridSize::contains`] to check bounds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: usize,
    column: usize,
}

/// A set of positions, iterated in row-major order.
pub type PositionSet = BTreeSet<Position>;

/// The up-to-four orthogonal neighbours of a position.
pub type Neighbors = ArrayVec<[Position; 4]>;

impl Position {
    /// Creates a position from its row and column.
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Returns the row index.
    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Returns the column index.
    #[must_use]
    pub const fn column(self) -> usize {
        self.column
    }

    /// Returns the in-bounds orthogonal neighbours, in up, down, left, right
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use jukugo_core::{GridSize, Position};
    ///
    /// let corner = Position::new(0, 0);
    /// let neighbors = corner.neighbors(GridSize::STANDARD);
    /// assert_eq!(neighbors.as_slice(), &[Position::new(1, 0), Position::new(0, 1)]);
    /// ```
    #[must_use]
    pub fn neighbors(self, size: GridSize) -> Neighbors {
        let mut neighbors = Neighbors::new();
        if self.row > 0 {
            neighbors.push(Self::new(self.row - 1, self.column));
        }
        if self.row + 1 < size.rows {
            neighbors.push(Self::new(self.row + 1, self.column));
        }
        if self.column > 0 {
            neighbors.push(Self::new(self.row, self.column - 1));
        }
        if self.column + 1 < size.columns {
            neighbors.push(Self::new(self.row, self.column + 1));
        }
        neighbors
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Returns `true` if `b` is far enough from `a` that placing a partner
/// symbol at `a` cannot line up with `b` as a neighbour.
///
/// `b` is *not* distant if it shares `a`'s row within one column, or
/// shares `a`'s column within one row. In particular a position is never
/// distant from itself. The predicate ignores grid contents and size.
///
/// # Examples
///
/// ```
/// use jukugo_core::{Position, is_distant};
///
/// let center = Position::new(1, 1);
/// assert!(!is_distant(center, Position::new(1, 2)));
/// assert!(!is_distant(center, Position::new(0, 1)));
/// assert!(is_distant(center, Position::new(0, 0)));
/// ```
#[must_use]
pub fn is_distant(a: Position, b: Position) -> bool {
    let same_line_near_column = a.row == b.row && a.column.abs_diff(b.column) <= 1;
    let same_line_near_row = a.column == b.column && a.row.abs_diff(b.row) <= 1;
    !same_line_near_column && !same_line_near_row
}

/// The dimensions of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    rows: usize,
    columns: usize,
}

impl GridSize {
    /// The 3×3 grid the puzzle is played on.
    pub const STANDARD: Self = Self::new(3, 3);

    /// Creates a grid size.
    #[must_use]
    pub const fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn columns(self) -> usize {
        self.columns
    }

    /// Returns the number of cells.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.rows * self.columns
    }

    /// Returns `true` if `pos` lies inside the grid.
    #[must_use]
    pub const fn contains(self, pos: Position) -> bool {
        pos.row < self.rows && pos.column < self.columns
    }

    /// Converts signed coordinates into a position, or `None` if they fall
    /// outside the grid.
    ///
    /// Input layers compute cell coordinates from pointer locations and may
    /// land to the left of or above the grid; this is where such coordinates
    /// are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use jukugo_core::{GridSize, Position};
    ///
    /// let size = GridSize::STANDARD;
    /// assert_eq!(size.checked_position(2, 0), Some(Position::new(2, 0)));
    /// assert_eq!(size.checked_position(-1, 0), None);
    /// assert_eq!(size.checked_position(0, 3), None);
    /// ```
    #[must_use]
    pub fn checked_position(self, row: isize, column: isize) -> Option<Position> {
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        let pos = Position::new(row, column);
        self.contains(pos).then_some(pos)
    }

    /// Returns the linear index of `pos` in row-major order.
    #[must_use]
    pub(crate) const fn index_of(self, pos: Position) -> usize {
        pos.row * self.columns + pos.column
    }

    /// Iterates over every position in row-major order.
    pub fn positions(self) -> impl DoubleEndedIterator<Item = Position> + Clone {
        let columns = self.columns;
        (0..self.cell_count()).map(move |i| Position::new(i / columns, i % columns))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_neighbors_center_and_edges() {
        let size = GridSize::STANDARD;

        let center = Position::new(1, 1).neighbors(size);
        assert_eq!(
            center.as_slice(),
            &[
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
        );

        let edge = Position::new(2, 1).neighbors(size);
        assert_eq!(edge.len(), 3);
        assert!(!edge.contains(&Position::new(3, 1)));

        let single = Position::new(0, 0).neighbors(GridSize::new(1, 1));
        assert!(single.is_empty());
    }

    #[test]
    fn test_distant_positions_of_standard_grid() {
        let size = GridSize::STANDARD;
        let distant_from = |pos| {
            size.positions()
                .filter(|&other| is_distant(pos, other))
                .collect::<Vec<_>>()
        };

        // Corner: everything except itself, its row neighbour and its column neighbour.
        let corner = distant_from(Position::new(0, 0));
        assert_eq!(corner.len(), 6);
        assert!(corner.contains(&Position::new(0, 2)));
        assert!(corner.contains(&Position::new(2, 0)));
        assert!(corner.contains(&Position::new(1, 1)));

        // Center: only the four diagonal corners.
        let center = distant_from(Position::new(1, 1));
        assert_eq!(
            center,
            vec![
                Position::new(0, 0),
                Position::new(0, 2),
                Position::new(2, 0),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_positions_row_major() {
        let positions = GridSize::new(2, 3).positions().collect::<Vec<_>>();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[2], Position::new(0, 2));
        assert_eq!(positions[3], Position::new(1, 0));
        assert_eq!(GridSize::new(2, 3).index_of(Position::new(1, 2)), 5);
    }

    proptest! {
        #[test]
        fn test_is_distant_is_symmetric(
            a in (0usize..8, 0usize..8),
            b in (0usize..8, 0usize..8),
        ) {
            let a = Position::new(a.0, a.1);
            let b = Position::new(b.0, b.1);
            prop_assert_eq!(is_distant(a, b), is_distant(b, a));
        }

        #[test]
        fn test_neighbors_are_never_distant(row in 0usize..6, column in 0usize..6) {
            let size = GridSize::new(6, 6);
            let pos = Position::new(row, column);
            prop_assert!(!is_distant(pos, pos));
            for neighbor in pos.neighbors(size) {
                prop_assert!(size.contains(neighbor));
                prop_assert!(!is_distant(pos, neighbor));
            }
        }
    }
}
