//! First-class relocation actions and their errors.
//!
//! A [`Relocation`] names a source and destination pillar and always moves
//! the source's top disk. It is what keyboard play, replays and tests feed
//! into [`Board::apply`](crate::Board::apply); drag-and-drop resolves to the
//! same code path through [`Board::relocate`](crate::Board::relocate).

use crate::disk::{DiskId, Rank};
use crate::pillar::PillarId;
use serde::{Deserialize, Serialize};

/// Move the top disk of `from` onto `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Relocation {
    /// Pillar the disk is taken from.
    pub from: PillarId,
    /// Pillar the disk is placed on.
    pub to: PillarId,
}

impl std::fmt::Display for Relocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from.slot(), self.to.slot())
    }
}

/// A relocation the board accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocated {
    /// The disk that moved.
    pub disk: DiskId,
    /// Its rank.
    pub rank: Rank,
    /// Pillar it came from.
    pub from: PillarId,
    /// Pillar it now sits on.
    pub to: PillarId,
    /// Whether the move counted as a step (`from != to`).
    pub counted: bool,
}

/// Error raised when validating or applying a relocation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Tried to take a disk from an empty pillar.
    #[display("{} has no disk to take", _0)]
    EmptyPillar(PillarId),

    /// The disk is not the top disk of its pillar.
    #[display("{} is not on top of {}", disk, pillar)]
    NotTopDisk {
        /// The disk that was asked to move.
        disk: DiskId,
        /// The pillar that owns it.
        pillar: PillarId,
    },

    /// The id belongs to a disk destroyed by a restart or level change.
    #[display("{} no longer exists", _0)]
    StaleDisk(DiskId),

    /// The destination's top disk is not larger than the moving disk.
    #[display("Disk {} cannot sit on disk {} at {}", disk, top, pillar)]
    Rejected {
        /// Rank of the moving disk.
        disk: Rank,
        /// Rank of the destination's top disk.
        top: Rank,
        /// The destination.
        pillar: PillarId,
    },

    /// Level number outside `1..=4`.
    #[display("Level {} is out of range (1-{})", _0, crate::Level::MAX)]
    LevelOutOfRange(u8),

    /// A board invariant failed after a mutation.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
