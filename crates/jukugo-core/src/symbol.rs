//! Tile symbols and two-symbol pairs.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// A single tile value.
///
/// Symbols are opaque: the puzzle only ever compares them for equality and
/// concatenates two of them into a [`Pair`]. Each symbol is one Unicode
/// scalar value, which covers the kanji the vocabulary is made of.
///
/// # Examples
///
/// ```
/// use jukugo_core::Symbol;
///
/// let symbol = Symbol::new('日');
/// assert_eq!(symbol.as_char(), '日');
/// assert_eq!(symbol.to_string(), "日");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(char);

impl Symbol {
    /// Creates a symbol from a character.
    #[must_use]
    pub const fn new(c: char) -> Self {
        Self(c)
    }

    /// Returns the character this symbol stands for.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// An ordered pair of symbols read left-to-right or top-to-bottom.
///
/// A pair is only meaningful relative to a [`Vocabulary`](crate::Vocabulary),
/// which decides whether it is a valid compound.
///
/// # Examples
///
/// ```
/// use jukugo_core::{Pair, Symbol};
///
/// let pair: Pair = "日本".parse()?;
/// assert_eq!(pair.first(), Symbol::new('日'));
/// assert_eq!(pair.second(), Symbol::new('本'));
/// assert_eq!(pair.partner_of(Symbol::new('本')), Some(Symbol::new('日')));
/// # Ok::<(), jukugo_core::PairParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pair {
    first: Symbol,
    second: Symbol,
}

impl Pair {
    /// Creates a pair from its two symbols, in reading order.
    #[must_use]
    pub const fn new(first: Symbol, second: Symbol) -> Self {
        Self { first, second }
    }

    /// Returns the symbol read first.
    #[must_use]
    pub const fn first(self) -> Symbol {
        self.first
    }

    /// Returns the symbol read second.
    #[must_use]
    pub const fn second(self) -> Symbol {
        self.second
    }

    /// Returns `true` if either side of the pair is `symbol`.
    #[must_use]
    pub fn contains(self, symbol: Symbol) -> bool {
        self.first == symbol || self.second == symbol
    }

    /// Returns the symbol that completes this pair together with `symbol`.
    ///
    /// When `symbol` appears on both sides (as in `人人`), the partner is the
    /// symbol itself. Returns `None` if `symbol` is not part of the pair.
    #[must_use]
    pub fn partner_of(self, symbol: Symbol) -> Option<Symbol> {
        if self.second == symbol {
            Some(self.first)
        } else if self.first == symbol {
            Some(self.second)
        } else {
            None
        }
    }
}

impl Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

/// Error returned when a string is not exactly two symbols long.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("a pair must be exactly two characters, got {input:?}")]
pub struct PairParseError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Pair {
    type Err = PairParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(first), Some(second), None) => Ok(Self::new(first.into(), second.into())),
            _ => Err(PairParseError {
                input: s.to_owned(),
            }),
        }
    }
}
