use jukugo_core::{Position, PositionSet};

use crate::Puzzle;

/// Tracks a pointer drag in grid coordinates.
///
/// While the pointer is down, the held tile travels with it: each time the
/// pointer enters a new cell, the held tile is swapped into that cell. No
/// match check happens until [`DragGesture::end`].
///
/// Mapping pointer pixels to cells is the host's job; a pointer outside the
/// grid is simply not reported as a position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragGesture {
    active: bool,
    held: Option<Position>,
}

impl DragGesture {
    /// Creates an idle gesture.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: false,
            held: None,
        }
    }

    /// Returns `true` between [`DragGesture::begin`] and [`DragGesture::end`].
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.active
    }

    /// Returns the cell currently holding the dragged tile.
    #[must_use]
    pub const fn held(&self) -> Option<Position> {
        self.held
    }

    /// Starts a drag. The tile at `pos` is picked up if `pos` is on the grid.
    pub fn begin(&mut self, puzzle: &Puzzle, pos: Position) {
        self.active = true;
        self.held = puzzle.grid().size().contains(pos).then_some(pos);
    }

    /// Moves the pointer to `pos`.
    ///
    /// Returns `true` if the held tile was swapped into `pos`. Moving within
    /// the held cell, off the grid, or without a drag in progress does
    /// nothing. A drag that began off the grid picks up the first tile it
    /// enters.
    pub fn move_to(&mut self, puzzle: &mut Puzzle, pos: Position) -> bool {
        if !self.active || !puzzle.grid().size().contains(pos) {
            return false;
        }
        match self.held {
            Some(held) if held == pos => false,
            Some(held) => {
                let swapped = puzzle.apply_swap(held, pos);
                if swapped {
                    self.held = Some(pos);
                }
                swapped
            }
            None => {
                self.held = Some(pos);
                false
            }
        }
    }

    /// Releases the tile and marks any forming match as fading.
    ///
    /// Returns the matched positions; an empty set means the drag produced
    /// no match (or no drag was in progress).
    pub fn end(&mut self, puzzle: &mut Puzzle) -> PositionSet {
        let was_active = self.active;
        *self = Self::new();
        if was_active {
            puzzle.mark_forming_as_fading()
        } else {
            PositionSet::new()
        }
    }
}
