//! Level numbers. Level `n` is played with `n` disks.

use crate::action::MoveError;
use serde::{Deserialize, Serialize};

/// A playable level in `1..=Level::MAX`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{}", _0)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// Highest level; completing it completes the game.
    pub const MAX: u8 = 4;

    /// The first level.
    pub const FIRST: Level = Level(1);

    /// Validates a level number.
    pub fn new(n: u8) -> Result<Self, MoveError> {
        if (1..=Self::MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(MoveError::LevelOutOfRange(n))
        }
    }

    /// Returns the level number.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Number of disks played at this level.
    pub fn disk_count(self) -> usize {
        self.0 as usize
    }

    /// Returns true for the last level.
    pub fn is_final(self) -> bool {
        self.0 == Self::MAX
    }

    /// The following level, or `None` after the final one.
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1).ok()
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for Level {
    type Error = MoveError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}
