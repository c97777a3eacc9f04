use std::{
    fmt::{self, Display},
    str::FromStr,
};

use sha2::{Digest as _, Sha256};

/// A 256-bit seed that fully determines a generator's random stream.
///
/// Seeds print as 64 lowercase hexadecimal digits and parse from the same
/// form (upper-case digits are accepted too), so a grid sequence can be
/// reproduced from a logged seed.
///
/// # Examples
///
/// ```
/// use jukugo_generator::GridSeed;
///
/// let seed = GridSeed::from_phrase("daily puzzle 2026-10-19");
/// let parsed: GridSeed = seed.to_string().parse()?;
/// assert_eq!(parsed, seed);
/// # Ok::<(), jukugo_generator::SeedParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSeed([u8; 32]);

impl GridSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh seed from system entropy.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Derives a seed from arbitrary text by hashing it with SHA-256.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        Self(Sha256::digest(phrase.as_bytes()).into())
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for GridSeed {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Display for GridSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Errors returned when parsing a [`GridSeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    /// The input was not 64 characters long.
    #[display("seed must be 64 hex digits, got {len} characters")]
    InvalidLength {
        /// Number of characters in the input.
        len: usize,
    },
    /// A character was not a hexadecimal digit.
    #[display("invalid hex digit at position {index}")]
    InvalidDigit {
        /// Character index of the offending digit.
        index: usize,
    },
}

impl FromStr for GridSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .chars()
            .enumerate()
            .map(|(index, c)| {
                c.to_digit(16)
                    .and_then(|d| u8::try_from(d).ok())
                    .ok_or(SeedParseError::InvalidDigit { index })
            })
            .collect::<Result<Vec<u8>, _>>()?;
        if digits.len() != 64 {
            return Err(SeedParseError::InvalidLength { len: digits.len() });
        }

        let mut bytes = [0; 32];
        for (byte, pair) in bytes.iter_mut().zip(digits.chunks_exact(2)) {
            *byte = (pair[0] << 4) | pair[1];
        }
        Ok(Self(bytes))
    }
}
