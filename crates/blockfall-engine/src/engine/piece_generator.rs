use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{Piece, PieceKind};

/// Draws piece kinds uniformly at random.
///
/// Every draw is independent: the same kind can come up any number of
/// times in a row.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceGenerator, PieceSeed};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
/// assert_eq!(a.next_kind(), b.next_kind());
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For deterministic sequences, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws the next kind.
    pub fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }

    /// Draws the next kind and spawns it.
    pub fn next_piece(&mut self) -> Piece {
        Piece::new(self.next_kind())
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the generator's RNG. The same seed gives the same
/// sequence of pieces, which makes sessions reproducible in tests and from
/// the command line. Its text form (serde and [`FromStr`]) is 32 hex digits.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameConfig, GameSession, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
///
/// let mut a = GameSession::with_seed(GameConfig::default(), seed);
/// let mut b = GameSession::with_seed(GameConfig::default(), seed);
/// a.start();
/// b.start();
/// assert_eq!(a.current_piece(), b.current_piece());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed: {reason}")]
pub struct ParseSeedError {
    #[error(not(source))]
    reason: String,
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError {
                reason: format!("expected 32 characters, got {}", s.len()),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|e| ParseSeedError {
            reason: format!("{s} ({e})"),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed([
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ]);

    #[test]
    fn test_deterministic_piece_generation() {
        let mut a = PieceGenerator::with_seed(SEED);
        let mut b = PieceGenerator::with_seed(SEED);
        for _ in 0..50 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }

    #[test]
    fn test_every_kind_is_drawn() {
        let mut generator = PieceGenerator::with_seed(SEED);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            seen[generator.next_kind() as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "seen: {seen:?}");
    }

    #[test]
    fn test_next_piece_spawns() {
        let mut generator = PieceGenerator::with_seed(SEED);
        let piece = generator.next_piece();
        assert_eq!(piece, Piece::new(piece.kind()));
    }

    #[test]
    fn test_seed_text_form() {
        assert_eq!(SEED.to_string(), "123456789abcdef01122334455667788");
        assert_eq!(
            "123456789ABCDEF01122334455667788".parse::<PieceSeed>(),
            Ok(SEED)
        );
        assert_eq!(
            serde_json::to_string(&PieceSeed([0; 16])).unwrap(),
            "\"00000000000000000000000000000000\""
        );
        let parsed: PieceSeed =
            serde_json::from_str("\"123456789abcdef01122334455667788\"").unwrap();
        assert_eq!(parsed, SEED);
    }

    #[test]
    fn test_seed_parse_errors() {
        let err = "0123".parse::<PieceSeed>().unwrap_err();
        assert!(err.to_string().contains("invalid hex"));

        assert!("ghijklmnopqrstuvwxyzghijklmnopqr".parse::<PieceSeed>().is_err());
        assert!(serde_json::from_str::<PieceSeed>("\"\"").is_err());
    }
}
