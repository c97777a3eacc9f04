//! The symbol → pair mapping supplied by the host.

use std::{collections::BTreeMap, str::FromStr};

use crate::{Pair, PairParseError, Symbol};

/// Errors raised while building a [`Vocabulary`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum VocabularyError {
    /// A pair was listed under a symbol it does not contain.
    #[display("pair {pair} is listed under {key} but does not contain it")]
    PairMissingKey {
        /// The symbol the pair was listed under.
        key: Symbol,
        /// The offending pair.
        pair: Pair,
    },
    /// A pair refers to a symbol that has no entry of its own.
    #[display("pair {pair} uses {symbol}, which is not a vocabulary symbol")]
    UnknownSymbol {
        /// The offending pair.
        pair: Pair,
        /// The symbol with no entry.
        symbol: Symbol,
    },
    /// A word in a textual vocabulary was not a two-symbol pair.
    #[display("invalid pair in vocabulary text: {source}")]
    InvalidPair {
        /// The underlying parse error.
        source: PairParseError,
    },
}

/// The vocabulary of valid compounds, keyed by symbol.
///
/// Every key lists the pairs it takes part in, in the order they were
/// supplied. A pair is valid if it appears in the list of either of its two
/// symbols. The vocabulary is read-only once built.
///
/// Construction guarantees two properties the rest of the puzzle relies on:
///
/// - every listed pair contains the key it is listed under, and
/// - both symbols of every listed pair are keys themselves, so any symbol
///   picked from a pair can be placed on the grid.
///
/// # Examples
///
/// ```
/// use jukugo_core::{Pair, Symbol, Vocabulary};
///
/// let vocabulary: Vocabulary = "日本 本日 日曜".parse()?;
///
/// assert_eq!(vocabulary.len(), 3);
/// assert_eq!(vocabulary.pairs_of(Symbol::new('日')).len(), 3);
/// assert!(vocabulary.is_valid(&"日曜".parse::<Pair>()?));
/// assert!(!vocabulary.is_valid(&"曜日".parse::<Pair>()?));
/// assert_eq!(vocabulary.pairs_of(Symbol::new('曜')), &["日曜".parse::<Pair>()?]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    entries: BTreeMap<Symbol, Vec<Pair>>,
    symbols: Vec<Symbol>,
}

impl Vocabulary {
    /// Builds a vocabulary from an explicit symbol → pairs mapping.
    ///
    /// Repeated keys have their lists concatenated; repeated pairs within a
    /// list are kept once.
    ///
    /// # Errors
    ///
    /// Returns [`VocabularyError::PairMissingKey`] if a pair is listed under a
    /// symbol it does not contain, and [`VocabularyError::UnknownSymbol`] if a
    /// pair uses a symbol that has no entry.
    pub fn from_entries<I>(entries: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = (Symbol, Vec<Pair>)>,
    {
        let mut map: BTreeMap<Symbol, Vec<Pair>> = BTreeMap::new();
        for (key, pairs) in entries {
            let list = map.entry(key).or_default();
            for pair in pairs {
                if !pair.contains(key) {
                    return Err(VocabularyError::PairMissingKey { key, pair });
                }
                if !list.contains(&pair) {
                    list.push(pair);
                }
            }
        }

        for pair in map.values().flatten() {
            for symbol in [pair.first(), pair.second()] {
                if !map.contains_key(&symbol) {
                    return Err(VocabularyError::UnknownSymbol {
                        pair: *pair,
                        symbol,
                    });
                }
            }
        }

        let symbols = map.keys().copied().collect();
        Ok(Self {
            entries: map,
            symbols,
        })
    }

    /// Builds a vocabulary from a list of pairs, indexing each pair under
    /// both of its symbols.
    ///
    /// This cannot fail: every symbol mentioned by a pair becomes a key.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = Pair>,
    {
        let mut map: BTreeMap<Symbol, Vec<Pair>> = BTreeMap::new();
        for pair in pairs {
            for symbol in [pair.first(), pair.second()] {
                let list = map.entry(symbol).or_default();
                if !list.contains(&pair) {
                    list.push(pair);
                }
            }
        }
        let symbols = map.keys().copied().collect();
        Self {
            entries: map,
            symbols,
        }
    }

    /// Returns all symbols in ascending order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Returns the number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if the vocabulary has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns `true` if `symbol` is a key of this vocabulary.
    #[must_use]
    pub fn contains_symbol(&self, symbol: Symbol) -> bool {
        self.entries.contains_key(&symbol)
    }

    /// Returns the pairs listed under `symbol`, or an empty slice for an
    /// unknown symbol.
    #[must_use]
    pub fn pairs_of(&self, symbol: Symbol) -> &[Pair] {
        self.entries.get(&symbol).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` if `pair` is listed under either of its symbols.
    #[must_use]
    pub fn is_valid(&self, pair: &Pair) -> bool {
        self.pairs_of(pair.first()).contains(pair) || self.pairs_of(pair.second()).contains(pair)
    }
}

impl FromStr for Vocabulary {
    type Err = VocabularyError;

    /// Parses whitespace-separated two-symbol words, e.g. `"日本 本日"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pairs = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Pair>, _>>()
            .map_err(|source| VocabularyError::InvalidPair { source })?;
        Ok(Self::from_pairs(pairs))
    }
}
