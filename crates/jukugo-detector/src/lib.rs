//! Idiom detection for jukugo grids.
//!
//! This crate answers the two questions the puzzle asks of a grid:
//!
//! - **Forming matches**: which tiles already sit next to a partner so that
//!   the two, read left-to-right or top-to-bottom, spell a valid pair.
//! - **Possible pairs**: which valid pairs could be spelled from the symbols
//!   on the grid at all, wherever they are placed.
//!
//! A grid is *balanced* when at least one pair is possible but none is
//! already formed: the player has something to solve, and nothing was
//! solved by chance.
//!
//! All functions are pure and ignore empty tiles.
//!
//! # Examples
//!
//! ```
//! use jukugo_core::{Grid, Position, Vocabulary};
//! use jukugo_detector::MatchDetector;
//!
//! let vocabulary: Vocabulary = "AB".parse()?;
//! let detector = MatchDetector::new(&vocabulary);
//!
//! // B is left of A: "BA" is not a word, but "AB" could be made.
//! let unsolved: Grid = "BA".parse()?;
//! assert!(detector.forming_matches(&unsolved).is_empty());
//! assert!(detector.is_balanced(&unsolved));
//!
//! let solved: Grid = "AB".parse()?;
//! assert_eq!(detector.forming_matches(&solved).len(), 2);
//! assert!(!detector.is_balanced(&solved));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeSet;

use jukugo_core::{Grid, Pair, Position, PositionSet, Vocabulary};

/// An adjacent pair of tiles that spells a valid pair.
///
/// `first` precedes `second` in reading order, and `pair` is their symbols
/// in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormingPair {
    /// The tile read first (above or to the left).
    pub first: Position,
    /// The tile read second (below or to the right).
    pub second: Position,
    /// The spelled pair.
    pub pair: Pair,
}

/// Runs detection against a borrowed vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct MatchDetector<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> MatchDetector<'a> {
    /// Creates a detector for `vocabulary`.
    #[must_use]
    pub const fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Returns the vocabulary this detector checks against.
    #[must_use]
    pub const fn vocabulary(&self) -> &'a Vocabulary {
        self.vocabulary
    }

    /// Returns every adjacent tile pair that spells a valid pair, in reading
    /// order of the first tile.
    #[must_use]
    pub fn forming_pairs(&self, grid: &Grid) -> Vec<FormingPair> {
        let size = grid.size();
        let mut found = Vec::new();
        for (pos, symbol) in grid.symbols() {
            for neighbor in pos.neighbors(size) {
                // Each adjacency is visited from both ends; keep the visit
                // from the tile that is read first.
                if neighbor < pos {
                    continue;
                }
                let Some(neighbor_symbol) = grid.symbol_at(neighbor) else {
                    continue;
                };
                let pair = Pair::new(symbol, neighbor_symbol);
                if self.vocabulary.is_valid(&pair) {
                    found.push(FormingPair {
                        first: pos,
                        second: neighbor,
                        pair,
                    });
                }
            }
        }
        found
    }

    /// Returns the positions of all tiles currently part of a forming match.
    ///
    /// For each occupied tile every orthogonal neighbour is checked, with the
    /// two symbols concatenated in reading order (above before below, left
    /// before right). A tile belonging to several matches appears once.
    #[must_use]
    pub fn forming_matches(&self, grid: &Grid) -> PositionSet {
        self.forming_pairs(grid)
            .into_iter()
            .flat_map(|forming| [forming.first, forming.second])
            .collect()
    }

    /// Returns every valid pair that can be spelled from two distinct tiles,
    /// regardless of where they are.
    ///
    /// All `n·(n−1)` ordered position pairs are checked, so this is quadratic
    /// in the number of cells.
    #[must_use]
    pub fn possible_pairs(&self, grid: &Grid) -> BTreeSet<Pair> {
        let mut pairs = BTreeSet::new();
        for (pos1, symbol1) in grid.symbols() {
            for (pos2, symbol2) in grid.symbols() {
                if pos1 == pos2 {
                    continue;
                }
                let pair = Pair::new(symbol1, symbol2);
                if self.vocabulary.is_valid(&pair) {
                    pairs.insert(pair);
                }
            }
        }
        pairs
    }

    /// Returns `true` if the grid has at least one possible pair and no
    /// forming match.
    #[must_use]
    pub fn is_balanced(&self, grid: &Grid) -> bool {
        self.has_possible_pair(grid) && !self.has_forming_match(grid)
    }

    fn has_possible_pair(&self, grid: &Grid) -> bool {
        grid.symbols().any(|(pos1, symbol1)| {
            grid.symbols().any(|(pos2, symbol2)| {
                pos1 != pos2 && self.vocabulary.is_valid(&Pair::new(symbol1, symbol2))
            })
        })
    }

    fn has_forming_match(&self, grid: &Grid) -> bool {
        let size = grid.size();
        grid.symbols().any(|(pos, symbol)| {
            pos.neighbors(size).into_iter().any(|neighbor| {
                neighbor > pos
                    && grid
                        .symbol_at(neighbor)
                        .is_some_and(|other| self.vocabulary.is_valid(&Pair::new(symbol, other)))
            })
        })
    }
}

/// Shorthand for [`MatchDetector::forming_matches`].
#[must_use]
pub fn forming_matches(grid: &Grid, vocabulary: &Vocabulary) -> PositionSet {
    MatchDetector::new(vocabulary).forming_matches(grid)
}

/// Shorthand for [`MatchDetector::possible_pairs`].
#[must_use]
pub fn possible_pairs(grid: &Grid, vocabulary: &Vocabulary) -> BTreeSet<Pair> {
    MatchDetector::new(vocabulary).possible_pairs(grid)
}

/// Shorthand for [`MatchDetector::is_balanced`].
#[must_use]
pub fn is_balanced(grid: &Grid, vocabulary: &Vocabulary) -> bool {
    MatchDetector::new(vocabulary).is_balanced(grid)
}

#[cfg(test)]
mod tests {
    use jukugo_core::Symbol;
    use proptest::prelude::*;

    use super::*;

    fn grid(s: &str) -> Grid {
        s.parse().unwrap()
    }

    fn pair(s: &str) -> Pair {
        s.parse().unwrap()
    }

    fn positions(list: &[(usize, usize)]) -> PositionSet {
        list.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn test_adjacent_valid_pair_forms_match() {
        // {"A": ["AB"], "B": ["AB"]} on a 1×2 grid holding [A, B].
        let vocabulary: Vocabulary = "AB".parse().unwrap();
        let detector = MatchDetector::new(&vocabulary);
        let grid = grid("AB");

        assert_eq!(
            detector.forming_matches(&grid),
            positions(&[(0, 0), (0, 1)])
        );
        assert_eq!(detector.possible_pairs(&grid), BTreeSet::from([pair("AB")]));
        assert!(!detector.is_balanced(&grid));
    }

    #[test]
    fn test_reading_order_matters() {
        let vocabulary: Vocabulary = "AB".parse().unwrap();
        let detector = MatchDetector::new(&vocabulary);

        // Horizontal: B then A spells "BA".
        assert!(detector.forming_matches(&grid("BA")).is_empty());
        // Vertical: A above B spells "AB".
        assert_eq!(
            detector.forming_matches(&grid("A/B")),
            positions(&[(0, 0), (1, 0)])
        );
        // Vertical: B above A spells "BA".
        assert!(detector.forming_matches(&grid("B/A")).is_empty());
    }

    #[test]
    fn test_forming_matches_deduplicates_shared_tiles() {
        let vocabulary: Vocabulary = "AB BC".parse().unwrap();
        let detector = MatchDetector::new(&vocabulary);
        let grid = grid("
            ABC
            ...
            ...
        ");

        let forming = detector.forming_pairs(&grid);
        assert_eq!(
            forming,
            vec![
                FormingPair {
                    first: Position::new(0, 0),
                    second: Position::new(0, 1),
                    pair: pair("AB"),
                },
                FormingPair {
                    first: Position::new(0, 1),
                    second: Position::new(0, 2),
                    pair: pair("BC"),
                },
            ]
        );
        assert_eq!(
            detector.forming_matches(&grid),
            positions(&[(0, 0), (0, 1), (0, 2)])
        );
    }

    #[test]
    fn test_pair_listed_under_one_symbol_only() {
        let a = Symbol::new('A');
        let b = Symbol::new('B');
        let vocabulary =
            Vocabulary::from_entries([(a, vec![]), (b, vec![pair("AB")])]).unwrap();

        assert_eq!(
            forming_matches(&grid("AB"), &vocabulary),
            positions(&[(0, 0), (0, 1)])
        );
    }

    #[test]
    fn test_possible_pairs_ignore_adjacency() {
        let vocabulary: Vocabulary = "日本 本日 人口".parse().unwrap();
        let grid = grid("
            日人.
            ...
            ..本
        ");

        assert_eq!(
            possible_pairs(&grid, &vocabulary),
            BTreeSet::from([pair("日本"), pair("本日")])
        );
        assert!(forming_matches(&grid, &vocabulary).is_empty());
        assert!(is_balanced(&grid, &vocabulary));
    }

    #[test]
    fn test_possible_pairs_need_distinct_positions() {
        // A lone "人" cannot pair with itself.
        let vocabulary: Vocabulary = "人人".parse().unwrap();
        assert!(possible_pairs(&grid("人./.."), &vocabulary).is_empty());
        assert!(!is_balanced(&grid("人./.."), &vocabulary));

        // Two of them can.
        let two = grid("人./.人");
        assert_eq!(
            possible_pairs(&two, &vocabulary),
            BTreeSet::from([pair("人人")])
        );
        assert!(is_balanced(&two, &vocabulary));
    }

    #[test]
    fn test_no_pairs_anywhere_is_unbalanced() {
        let vocabulary: Vocabulary = "AB CD".parse().unwrap();
        let grid = grid("
            AAA
            CAA
            AAA
        ");

        assert!(possible_pairs(&grid, &vocabulary).is_empty());
        assert!(forming_matches(&grid, &vocabulary).is_empty());
        assert!(!is_balanced(&grid, &vocabulary));
    }

    #[test]
    fn test_empty_tiles_are_ignored() {
        let vocabulary: Vocabulary = "AB".parse().unwrap();
        let detector = MatchDetector::new(&vocabulary);
        assert!(detector.possible_pairs(&grid("../..")).is_empty());

        let grid = grid("A.B");

        assert!(detector.forming_matches(&grid).is_empty());
        assert_eq!(detector.possible_pairs(&grid), BTreeSet::from([pair("AB")]));
        assert!(detector.is_balanced(&grid));
    }

    fn arbitrary_grid() -> impl Strategy<Value = Grid> {
        (1usize..=4, 1usize..=4).prop_flat_map(|(rows, columns)| {
            prop::collection::vec(prop::sample::select(vec!['A', 'B', 'C', '.']), rows * columns)
                .prop_map(move |cells| {
                    let text = cells
                        .chunks(columns)
                        .map(|row| row.iter().collect::<String>())
                        .collect::<Vec<_>>()
                        .join("/");
                    text.parse::<Grid>().unwrap()
                })
        })
    }

    proptest! {
        #[test]
        fn test_detection_is_pure(grid in arbitrary_grid()) {
            let vocabulary: Vocabulary = "AB BC CA".parse().unwrap();
            let detector = MatchDetector::new(&vocabulary);
            let before = grid.clone();

            prop_assert_eq!(detector.forming_matches(&grid), detector.forming_matches(&grid));
            prop_assert_eq!(detector.possible_pairs(&grid), detector.possible_pairs(&grid));
            prop_assert_eq!(&grid, &before);
        }

        #[test]
        fn test_is_balanced_agrees_with_scans(grid in arbitrary_grid()) {
            let vocabulary: Vocabulary = "AB BC CA".parse().unwrap();
            let detector = MatchDetector::new(&vocabulary);

            let expected = !detector.possible_pairs(&grid).is_empty()
                && detector.forming_matches(&grid).is_empty();
            prop_assert_eq!(detector.is_balanced(&grid), expected);
        }

        #[test]
        fn test_forming_pairs_are_possible(grid in arbitrary_grid()) {
            let vocabulary: Vocabulary = "AB BC CA".parse().unwrap();
            let detector = MatchDetector::new(&vocabulary);
            let possible = detector.possible_pairs(&grid);

            for forming in detector.forming_pairs(&grid) {
                prop_assert!(possible.contains(&forming.pair));
            }
        }
    }
}
