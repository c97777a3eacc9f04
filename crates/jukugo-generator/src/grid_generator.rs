use std::num::NonZero;

use jukugo_core::{Grid, GridSize, Position, Vocabulary, is_distant};
use jukugo_detector::MatchDetector;
use rand::{
    SeedableRng as _,
    seq::{IndexedRandom as _, SliceRandom as _},
};
use rand_pcg::Pcg64;

use crate::{ConfigurationError, FillError, GridSeed, UnsolvableGridError};

/// Number of fill attempts used by [`GridGenerator::generate`].
pub const DEFAULT_FILL_ATTEMPTS: NonZero<usize> = NonZero::new(16).unwrap();

/// What a successful [`GridGenerator::fill`] did to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReport {
    /// Slots that were empty and received a symbol, in row-major order.
    pub filled: Vec<Position>,
    /// Number of repair assignments made after the random fill.
    pub repairs: usize,
}

/// Fills grids so that they end up balanced: at least one pair can be made
/// from the symbols on the grid, but no pair is already formed by adjacent
/// tiles.
///
/// Empty slots first receive uniformly random symbols. If that alone is not
/// balanced, a repair pass walks the newly filled slots in random order and,
/// for each, tries the *distant* positions (see [`is_distant`]) in random
/// order: it picks a random pair of the distant symbol and gives the slot
/// that pair's other symbol. The grid is re-checked after every assignment.
/// The search is bounded by `filled × distant` assignments; it never loops
/// on rejection.
///
/// All randomness comes from a [`Pcg64`] stream seeded by a [`GridSeed`], so
/// a seed reproduces the exact sequence of grids.
///
/// # Examples
///
/// ```
/// use jukugo_core::{GridSize, Vocabulary};
/// use jukugo_detector::is_balanced;
/// use jukugo_generator::{GridGenerator, GridSeed};
///
/// let vocabulary: Vocabulary = "日本 本日 人口 口調 調和".parse()?;
/// let seed = GridSeed::from_phrase("example");
/// let mut generator = GridGenerator::new(vocabulary.clone(), seed)?;
///
/// let grid = generator.generate(GridSize::STANDARD)?;
/// assert!(grid.is_full());
/// assert!(is_balanced(&grid, &vocabulary));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GridGenerator {
    vocabulary: Vocabulary,
    seed: GridSeed,
    rng: Pcg64,
}

impl GridGenerator {
    /// Creates a generator whose random stream starts from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::TooFewSymbols`] if the vocabulary has
    /// fewer than two symbols, and [`ConfigurationError::SymbolWithoutPairs`]
    /// if some symbol has an empty pair list.
    pub fn new(vocabulary: Vocabulary, seed: GridSeed) -> Result<Self, ConfigurationError> {
        if vocabulary.len() < 2 {
            return Err(ConfigurationError::TooFewSymbols {
                count: vocabulary.len(),
            });
        }
        if let Some(&symbol) = vocabulary
            .symbols()
            .iter()
            .find(|&&symbol| vocabulary.pairs_of(symbol).is_empty())
        {
            return Err(ConfigurationError::SymbolWithoutPairs { symbol });
        }

        Ok(Self {
            vocabulary,
            seed,
            rng: Pcg64::from_seed(*seed.as_bytes()),
        })
    }

    /// Creates a generator seeded from system entropy.
    ///
    /// # Errors
    ///
    /// Same as [`GridGenerator::new`].
    pub fn with_random_seed(vocabulary: Vocabulary) -> Result<Self, ConfigurationError> {
        Self::new(vocabulary, GridSeed::random())
    }

    /// Returns the vocabulary symbols are drawn from.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Returns the seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> GridSeed {
        self.seed
    }

    /// Fills every empty slot of `grid` and repairs the result until it is
    /// balanced.
    ///
    /// Occupied slots are never rewritten by the random fill, but any slot
    /// filled by this call may be reassigned during repair. A grid that is
    /// already full and balanced is left as is.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::GridTooSmall`] for grids with fewer than two
    /// cells, and [`FillError::Unsolvable`] if the repair pass ends without a
    /// balanced grid. In the latter case the grid stays fully populated with
    /// the last assignment.
    pub fn fill(&mut self, grid: &mut Grid) -> Result<FillReport, FillError> {
        let size = grid.size();
        if size.cell_count() < 2 {
            return Err(FillError::GridTooSmall { size });
        }

        let filled = grid.empty_positions();
        for &pos in &filled {
            let symbol = self.vocabulary.symbols().choose(&mut self.rng).copied();
            grid.set_symbol(pos, symbol);
        }

        let detector = MatchDetector::new(&self.vocabulary);
        if detector.is_balanced(grid) {
            log::debug!("filled {} slots of {size} grid without repair", filled.len());
            return Ok(FillReport { filled, repairs: 0 });
        }

        let mut targets = filled.clone();
        targets.shuffle(&mut self.rng);

        let mut repairs = 0;
        for target in targets {
            let mut sources = size
                .positions()
                .filter(|&pos| is_distant(target, pos))
                .collect::<Vec<_>>();
            sources.shuffle(&mut self.rng);

            for source in sources {
                let Some(anchor) = grid.symbol_at(source) else {
                    continue;
                };
                let Some(partner) = self
                    .vocabulary
                    .pairs_of(anchor)
                    .choose(&mut self.rng)
                    .and_then(|pair| pair.partner_of(anchor))
                else {
                    continue;
                };

                grid.set_symbol(target, Some(partner));
                repairs += 1;
                log::trace!("repair: {target} <- {partner} (anchored on {anchor} at {source})");

                if detector.is_balanced(grid) {
                    log::debug!(
                        "filled {} slots of {size} grid with {repairs} repair assignments",
                        filled.len()
                    );
                    return Ok(FillReport { filled, repairs });
                }
            }
        }

        log::debug!("repair of {size} grid exhausted after {repairs} assignments");
        Err(UnsolvableGridError { size, repairs }.into())
    }

    /// Fills the grid, retrying up to `attempts` times when the repair pass
    /// fails.
    ///
    /// Before each retry the slots that were empty on entry are cleared
    /// again, so every attempt starts from the caller's grid with fresh
    /// randomness. After the final failed attempt the grid keeps its last
    /// assignment.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt. [`FillError::GridTooSmall`] is
    /// returned immediately, as is a failure on a grid that had no empty
    /// slots to redraw.
    pub fn fill_with_retries(
        &mut self,
        grid: &mut Grid,
        attempts: NonZero<usize>,
    ) -> Result<FillReport, FillError> {
        let empty = grid.empty_positions();
        let mut attempt = 1;
        loop {
            match self.fill(grid) {
                Ok(report) => return Ok(report),
                Err(FillError::Unsolvable(_)) if attempt < attempts.get() && !empty.is_empty() => {
                    log::debug!("fill attempt {attempt}/{attempts} failed; retrying");
                    for &pos in &empty {
                        grid.set_symbol(pos, None);
                    }
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Creates a fully populated, balanced grid of the given size.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt if
    /// [`DEFAULT_FILL_ATTEMPTS`] fills all fail.
    pub fn generate(&mut self, size: GridSize) -> Result<Grid, FillError> {
        let mut grid = Grid::new(size);
        self.fill_with_retries(&mut grid, DEFAULT_FILL_ATTEMPTS)?;
        Ok(grid)
    }
}
