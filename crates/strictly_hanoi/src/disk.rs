//! Disks and the arena that owns them.
//!
//! Pillars and the controller refer to disks by [`DiskId`] rather than by
//! reference. Ids carry the arena generation they were issued in, so an id
//! kept across a restart or level change resolves to nothing instead of
//! aliasing a freshly created disk.

use crate::geometry::Point;
use crate::pillar::PillarId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Ordinal disk size. A smaller rank is a smaller disk.
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
pub struct Rank(pub u8);

impl Rank {
    /// Returns the numeric rank.
    pub fn get(self) -> u8 {
        self.0
    }
}

/// Generation-checked handle to a disk in a [`DiskArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("disk#{}@{}", slot, generation)]
pub struct DiskId {
    slot: u32,
    generation: u32,
}

/// A movable disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Disk {
    id: DiskId,
    rank: Rank,
    pillar: PillarId,
    position: Point,
}

impl Disk {
    /// Returns this disk's id.
    pub fn id(&self) -> DiskId {
        self.id
    }

    /// Returns this disk's size rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the pillar whose stack holds this disk.
    pub fn pillar(&self) -> PillarId {
        self.pillar
    }

    /// Returns the display position (centre of the disk).
    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_pillar(&mut self, pillar: PillarId) {
        self.pillar = pillar;
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// Index-stable registry of the disks in play.
#[derive(Debug, Clone, Default)]
pub struct DiskArena {
    disks: Vec<Disk>,
    generation: u32,
}

impl DiskArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroys every disk. Ids issued before the call become stale.
    #[instrument(skip(self), fields(count = self.disks.len(), generation = self.generation))]
    pub fn clear(&mut self) {
        self.disks.clear();
        self.generation = self.generation.wrapping_add(1);
        debug!(generation = self.generation, "Disk arena cleared");
    }

    /// Creates a disk and returns its id.
    pub fn spawn(&mut self, rank: Rank, pillar: PillarId, position: Point) -> DiskId {
        let id = DiskId {
            slot: self.disks.len() as u32,
            generation: self.generation,
        };
        self.disks.push(Disk {
            id,
            rank,
            pillar,
            position,
        });
        id
    }

    /// Looks up a live disk.
    pub fn get(&self, id: DiskId) -> Option<&Disk> {
        if id.generation != self.generation {
            return None;
        }
        self.disks.get(id.slot as usize)
    }

    /// Looks up a live disk mutably.
    pub fn get_mut(&mut self, id: DiskId) -> Option<&mut Disk> {
        if id.generation != self.generation {
            return None;
        }
        self.disks.get_mut(id.slot as usize)
    }

    /// Iterates over all live disks in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Disk> {
        self.disks.iter()
    }

    /// Number of live disks.
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Returns true if there are no live disks.
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }
}
