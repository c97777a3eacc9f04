use jukugo_core::{Grid, GridSize, Position, PositionSet, Symbol, Vocabulary};
use jukugo_detector::MatchDetector;
use jukugo_generator::{FillError, FillReport, GridGenerator, GridSeed};

use crate::{PuzzleConfig, PuzzleError};

/// Whether any tile is currently fading out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PuzzlePhase {
    /// No tile is fading. After a successful refill the grid is balanced.
    Stable,
    /// At least one matched tile is fading out.
    Fading,
}

/// What a single [`Puzzle::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// Nothing is fading; tiles only moved toward full opacity.
    Idle,
    /// Matched tiles are still fading out.
    Fading,
    /// Faded-out tiles were cleared and the grid was refilled. Every fading
    /// flag has been reset.
    Refilled {
        /// `false` if every refill attempt failed and the grid was left
        /// populated but unbalanced.
        balanced: bool,
    },
}

/// A read-only view of one tile for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileView {
    /// Where the tile sits.
    pub position: Position,
    /// The tile's symbol, or `None` while it is empty.
    pub symbol: Option<Symbol>,
    /// Opacity in `[0.0, 1.0]`.
    pub alpha: f32,
}

/// A jukugo puzzle session.
///
/// Owns the grid and the generator that refills it, and drives the
/// match → fade → refill cycle:
///
/// 1. The host swaps tiles with [`Puzzle::apply_swap`] while a gesture is in
///    progress.
/// 2. When the gesture ends, [`Puzzle::mark_forming_as_fading`] flags every
///    tile that is part of a forming match.
/// 3. Each frame, [`Puzzle::tick`] steps tile opacity. Once a fading tile is
///    fully transparent its symbol is cleared and the whole grid is refilled
///    in that same tick, after which all fading flags are reset.
///
/// All operations are synchronous and bounded; the puzzle is driven by the
/// host's render loop and never blocks.
///
/// # Example
///
/// ```
/// use jukugo_core::{GridSize, Vocabulary};
/// use jukugo_game::{Puzzle, PuzzleConfig};
/// use jukugo_generator::GridSeed;
///
/// let vocabulary: Vocabulary = "日本 本日 人口 口調 調和 和風".parse()?;
/// let mut puzzle = Puzzle::new(
///     vocabulary,
///     GridSize::STANDARD,
///     GridSeed::from_phrase("doc"),
///     PuzzleConfig::default(),
/// )?;
///
/// assert!(puzzle.is_balanced());
/// assert!(puzzle.phase().is_stable());
/// assert!(puzzle.tick().is_idle());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Puzzle {
    generator: GridGenerator,
    grid: Grid,
    config: PuzzleConfig,
}

impl Puzzle {
    /// Creates a puzzle with a freshly generated, balanced grid.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::Configuration`] if the vocabulary is unusable,
    /// [`PuzzleError::InvalidFadeStep`] if the configured fade step is
    /// outside `(0.0, 1.0]`, and [`PuzzleError::Fill`] if the grid is too
    /// small or every generation attempt failed.
    pub fn new(
        vocabulary: Vocabulary,
        size: GridSize,
        seed: GridSeed,
        config: PuzzleConfig,
    ) -> Result<Self, PuzzleError> {
        if !config.has_valid_fade_step() {
            return Err(PuzzleError::InvalidFadeStep {
                step: config.fade_step,
            });
        }
        let mut generator = GridGenerator::new(vocabulary, seed)?;
        let mut grid = Grid::new(size);
        generator.fill_with_retries(&mut grid, config.refill_attempts)?;
        log::debug!("new {size} puzzle from seed {seed}: {grid}");
        Ok(Self {
            generator,
            grid,
            config,
        })
    }

    /// Creates a puzzle around an existing grid.
    ///
    /// The grid's symbols are kept as they are. Empty tiles are filled on the
    /// next refill, that is, after the next match fades out; call
    /// [`Puzzle::reshuffle`] to start from a fresh grid instead.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::InvalidFadeStep`] if the configured fade step is
    /// outside `(0.0, 1.0]`, [`PuzzleError::Fill`] with
    /// [`FillError::GridTooSmall`] if the grid has fewer than two cells, and
    /// [`PuzzleError::UnknownSymbol`] if a tile holds a symbol the vocabulary
    /// does not know.
    pub fn from_grid(
        generator: GridGenerator,
        grid: Grid,
        config: PuzzleConfig,
    ) -> Result<Self, PuzzleError> {
        if !config.has_valid_fade_step() {
            return Err(PuzzleError::InvalidFadeStep {
                step: config.fade_step,
            });
        }
        let size = grid.size();
        if size.cell_count() < 2 {
            return Err(FillError::GridTooSmall { size }.into());
        }
        if let Some((position, symbol)) = grid
            .symbols()
            .find(|&(_, symbol)| !generator.vocabulary().contains_symbol(symbol))
        {
            return Err(PuzzleError::UnknownSymbol { position, symbol });
        }
        Ok(Self {
            generator,
            grid,
            config,
        })
    }

    /// Returns the grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the vocabulary in use.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        self.generator.vocabulary()
    }

    /// Returns the seed the puzzle's random stream started from.
    #[must_use]
    pub fn seed(&self) -> GridSeed {
        self.generator.seed()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Returns whether any tile is fading.
    #[must_use]
    pub fn phase(&self) -> PuzzlePhase {
        if self.grid.tiles().any(|(_, tile)| tile.is_fading()) {
            PuzzlePhase::Fading
        } else {
            PuzzlePhase::Stable
        }
    }

    /// Returns `true` if the grid has a possible pair and no forming match.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.detector().is_balanced(&self.grid)
    }

    /// Returns the positions of tiles currently part of a forming match.
    #[must_use]
    pub fn forming_matches(&self) -> PositionSet {
        self.detector().forming_matches(&self.grid)
    }

    /// Exchanges the contents of two tiles, including their fade state.
    ///
    /// Returns `false` and leaves the grid untouched if either position is
    /// out of bounds. No match check is made; see
    /// [`Puzzle::mark_forming_as_fading`].
    pub fn apply_swap(&mut self, a: Position, b: Position) -> bool {
        let swapped = self.grid.swap(a, b);
        if swapped {
            log::trace!("swapped {a} and {b}");
        }
        swapped
    }

    /// Flags every tile in a forming match as fading and returns their
    /// positions.
    ///
    /// An empty set means the last gesture did not produce a match.
    pub fn mark_forming_as_fading(&mut self) -> PositionSet {
        let matches = self.forming_matches();
        for &pos in &matches {
            if let Some(tile) = self.grid.tile_mut(pos) {
                tile.start_fading();
            }
        }
        if !matches.is_empty() {
            log::debug!("{} tiles matched and start fading", matches.len());
        }
        matches
    }

    /// Advances fading by one frame.
    ///
    /// Tiles that finished fading out are cleared, and if any were, the grid
    /// is refilled and every fading flag is reset. Then each tile's alpha
    /// moves one step toward `0.0` (fading) or `1.0` (not fading), so
    /// refilled tiles fade in over the following ticks.
    ///
    /// This never fails. If every refill attempt ends unbalanced the grid is
    /// still fully populated; the outcome reports `balanced: false` and
    /// [`Puzzle::reshuffle`] can be used to start over.
    pub fn tick(&mut self) -> TickOutcome {
        let mut needs_refill = false;
        for (_, tile) in self.grid.tiles_mut() {
            if tile.is_faded_out() {
                tile.set_symbol(None);
                needs_refill = true;
            }
        }

        let outcome = if needs_refill {
            let balanced = match self.refill() {
                Ok(report) => {
                    log::debug!(
                        "refilled {} tiles with {} repairs",
                        report.filled.len(),
                        report.repairs
                    );
                    true
                }
                Err(err) => {
                    log::warn!("refill left the grid unbalanced: {err}");
                    false
                }
            };
            for (_, tile) in self.grid.tiles_mut() {
                tile.stop_fading();
            }
            TickOutcome::Refilled { balanced }
        } else if self.phase().is_fading() {
            TickOutcome::Fading
        } else {
            TickOutcome::Idle
        };

        for (_, tile) in self.grid.tiles_mut() {
            tile.step_alpha(self.config.fade_step);
        }
        outcome
    }

    /// Clears every tile and generates a new grid.
    ///
    /// # Errors
    ///
    /// Returns the fill error if every attempt failed; the grid is then
    /// populated but unbalanced.
    pub fn reshuffle(&mut self) -> Result<FillReport, FillError> {
        for (_, tile) in self.grid.tiles_mut() {
            tile.set_symbol(None);
            tile.stop_fading();
        }
        self.refill()
    }

    /// Returns a per-tile view for rendering, in row-major order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TileView> {
        self.grid
            .tiles()
            .map(|(position, tile)| TileView {
                position,
                symbol: tile.symbol(),
                alpha: tile.alpha(),
            })
            .collect()
    }

    fn refill(&mut self) -> Result<FillReport, FillError> {
        self.generator
            .fill_with_retries(&mut self.grid, self.config.refill_attempts)
    }

    fn detector(&self) -> MatchDetector<'_> {
        MatchDetector::new(self.generator.vocabulary())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use jukugo_generator::ConfigurationError;
    use proptest::prelude::*;

    use super::*;

    const WORDS: &str = "日本 本日 人口 口調 調和 和風 風車 車道 道人 日曜 曜日";

    fn new_puzzle(phrase: &str) -> Puzzle {
        Puzzle::new(
            WORDS.parse().unwrap(),
            GridSize::STANDARD,
            GridSeed::from_phrase(phrase),
            PuzzleConfig::default(),
        )
        .unwrap()
    }

    /// A puzzle over the vocabulary {"AB"} whose top-left pair spells "AB".
    fn matched_puzzle() -> Puzzle {
        let vocabulary: Vocabulary = "AB".parse().unwrap();
        let generator = GridGenerator::new(vocabulary, GridSeed::from_phrase("matched")).unwrap();
        let grid = "ABA/AAA/AAA".parse().unwrap();
        Puzzle::from_grid(generator, grid, PuzzleConfig::default()).unwrap()
    }

    fn pos(row: usize, column: usize) -> Position {
        Position::new(row, column)
    }

    #[test]
    fn test_new_puzzle_is_full_balanced_and_stable() {
        let puzzle = new_puzzle("new");

        assert!(puzzle.grid().is_full());
        assert!(puzzle.is_balanced());
        assert!(puzzle.forming_matches().is_empty());
        assert_eq!(puzzle.phase(), PuzzlePhase::Stable);
        assert_eq!(puzzle.seed(), GridSeed::from_phrase("new"));
        for view in puzzle.snapshot() {
            assert!(view.symbol.is_some());
            assert!((view.alpha - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_new_rejects_bad_configuration() {
        let err = Puzzle::new(
            "人人".parse().unwrap(),
            GridSize::STANDARD,
            GridSeed::from_phrase("bad"),
            PuzzleConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PuzzleError::Configuration(ConfigurationError::TooFewSymbols { count: 1 })
        );

        let err = Puzzle::new(
            WORDS.parse().unwrap(),
            GridSize::new(1, 1),
            GridSeed::from_phrase("bad"),
            PuzzleConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PuzzleError::Fill(FillError::GridTooSmall { .. })));

        let err = Puzzle::new(
            WORDS.parse().unwrap(),
            GridSize::STANDARD,
            GridSeed::from_phrase("bad"),
            PuzzleConfig::default().with_fade_step(0.0),
        )
        .unwrap_err();
        assert!(err.is_invalid_fade_step());
    }

    #[test]
    fn test_swap_twice_restores_grid() {
        let mut puzzle = new_puzzle("swap");
        let before = puzzle.grid().clone();

        assert!(puzzle.apply_swap(pos(0, 0), pos(2, 1)));
        assert_eq!(
            puzzle.grid().symbol_at(pos(0, 0)),
            before.symbol_at(pos(2, 1))
        );
        assert!(puzzle.apply_swap(pos(0, 0), pos(2, 1)));
        assert_eq!(puzzle.grid(), &before);
    }

    #[test]
    fn test_out_of_bounds_swap_is_ignored() {
        let mut puzzle = new_puzzle("bounds");
        let before = puzzle.grid().clone();

        // (-1, 0) never becomes a position.
        let size = puzzle.grid().size();
        assert_eq!(size.checked_position(-1, 0), None);

        assert!(!puzzle.apply_swap(pos(3, 0), pos(0, 0)));
        assert!(!puzzle.apply_swap(pos(0, 0), pos(0, 3)));
        assert!(!puzzle.apply_swap(pos(usize::MAX, 0), pos(0, 0)));
        assert_eq!(puzzle.grid(), &before);
        assert!(puzzle.phase().is_stable());
    }

    #[test]
    fn test_mark_forming_without_match_is_empty() {
        let mut puzzle = new_puzzle("nomatch");
        assert!(puzzle.mark_forming_as_fading().is_empty());
        assert!(puzzle.phase().is_stable());
        assert!(puzzle.tick().is_idle());
    }

    #[test]
    fn test_match_fades_out_then_refills() {
        let mut puzzle = matched_puzzle();

        let matched = puzzle.mark_forming_as_fading();
        assert_eq!(matched, PositionSet::from([pos(0, 0), pos(0, 1)]));
        assert!(puzzle.phase().is_fading());

        let mut last_alpha = 1.0;
        let mut refilled = None;
        for _ in 0..100 {
            match puzzle.tick() {
                TickOutcome::Fading => {
                    let alpha = puzzle.grid()[pos(0, 0)].alpha();
                    assert!(alpha < last_alpha);
                    assert!(alpha >= 0.0);
                    last_alpha = alpha;
                    // Unmatched tiles stay opaque.
                    assert!((puzzle.grid()[pos(2, 2)].alpha() - 1.0).abs() < f32::EPSILON);
                }
                TickOutcome::Refilled { balanced } => {
                    refilled = Some(balanced);
                    break;
                }
                TickOutcome::Idle => panic!("fade ended without a refill"),
            }
        }

        assert!(last_alpha <= 0.0);
        assert_eq!(refilled, Some(true));
        assert!(puzzle.grid().is_full());
        assert!(puzzle.is_balanced());
        assert!(puzzle.phase().is_stable());
        // Refilled tiles start transparent and fade back in.
        let alpha = puzzle.grid()[pos(0, 0)].alpha();
        assert!(alpha > 0.0 && alpha < 1.0);
        assert!(puzzle.tick().is_idle());
        assert!(puzzle.grid()[pos(0, 0)].alpha() > alpha);
    }

    #[test]
    fn test_cleared_tiles_refill_on_following_tick() {
        let mut puzzle = matched_puzzle();
        let config = PuzzleConfig::default().with_fade_step(1.0);
        puzzle.config = config;

        puzzle.mark_forming_as_fading();
        // One step takes the tiles to zero, the next clears and refills.
        assert!(puzzle.tick().is_fading());
        assert!(puzzle.grid()[pos(0, 0)].alpha() <= 0.0);
        assert!(puzzle.grid()[pos(0, 0)].symbol().is_some());
        assert!(matches!(puzzle.tick(), TickOutcome::Refilled { .. }));
        assert!(puzzle.phase().is_stable());
    }

    #[test]
    fn test_reshuffle_generates_new_grid() {
        let mut puzzle = matched_puzzle();
        puzzle.mark_forming_as_fading();

        let report = puzzle.reshuffle().unwrap();
        assert_eq!(report.filled.len(), 9);
        assert!(puzzle.is_balanced());
        assert!(puzzle.phase().is_stable());
    }

    #[test]
    fn test_snapshot_matches_grid() {
        let puzzle = new_puzzle("snapshot");
        let snapshot = puzzle.snapshot();

        assert_eq!(snapshot.len(), 9);
        assert_eq!(snapshot[4].position, pos(1, 1));
        assert_eq!(snapshot[4].symbol, puzzle.grid().symbol_at(pos(1, 1)));
    }

    #[test]
    fn test_unbalanced_refill_is_reported() {
        // Only "AB" exists and the grid is 1×2: the only balanced layout is "BA".
        let vocabulary: Vocabulary = "AB".parse().unwrap();
        let generator = GridGenerator::new(vocabulary, GridSeed::from_phrase("narrow")).unwrap();
        let config = PuzzleConfig::default()
            .with_fade_step(1.0)
            .with_refill_attempts(NonZero::<usize>::MIN);
        let mut puzzle = Puzzle::from_grid(generator, "AB".parse().unwrap(), config).unwrap();

        puzzle.mark_forming_as_fading();
        puzzle.tick();
        let TickOutcome::Refilled { balanced } = puzzle.tick() else {
            panic!("expected a refill");
        };
        assert!(!balanced);
        assert!(!puzzle.is_balanced());
        assert!(puzzle.grid().is_full());
        assert!(puzzle.phase().is_stable());
    }

    #[test]
    fn test_from_grid_rejects_unknown_symbol() {
        let vocabulary: Vocabulary = "AB".parse().unwrap();
        let generator = GridGenerator::new(vocabulary, GridSeed::from_phrase("unknown")).unwrap();
        let grid = "AB./.X./...".parse().unwrap();

        let err = Puzzle::from_grid(generator, grid, PuzzleConfig::default()).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::UnknownSymbol {
                position: pos(1, 1),
                symbol: Symbol::new('X'),
            }
        );
    }

    #[test]
    fn test_from_grid_rejects_single_cell() {
        let vocabulary: Vocabulary = "AB".parse().unwrap();
        let generator = GridGenerator::new(vocabulary, GridSeed::from_phrase("single")).unwrap();
        let grid = "A".parse().unwrap();

        let err = Puzzle::from_grid(generator, grid, PuzzleConfig::default()).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::Fill(FillError::GridTooSmall {
                size: GridSize::new(1, 1),
            })
        );
    }

    proptest! {
        #[test]
        fn test_swap_symmetry(
            a in (0usize..4, 0usize..4),
            b in (0usize..4, 0usize..4),
        ) {
            let mut puzzle = new_puzzle("proptest swap");
            let before = puzzle.grid().clone();
            let a = pos(a.0, a.1);
            let b = pos(b.0, b.1);

            let first = puzzle.apply_swap(a, b);
            let second = puzzle.apply_swap(a, b);
            prop_assert_eq!(first, second);
            prop_assert_eq!(puzzle.grid(), &before);
        }

        #[test]
        fn test_fade_is_monotonic(step in 0.01f32..=1.0) {
            let mut puzzle = matched_puzzle();
            puzzle.config = PuzzleConfig::default().with_fade_step(step);
            puzzle.mark_forming_as_fading();

            let mut last = puzzle.grid()[pos(0, 1)].alpha();
            while puzzle.tick().is_fading() {
                let alpha = puzzle.grid()[pos(0, 1)].alpha();
                prop_assert!(alpha < last);
                last = alpha;
            }
            prop_assert!(last <= 0.0);
        }
    }
}
