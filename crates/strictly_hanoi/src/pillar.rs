//! Pillars: ordered disk stacks with a stacking predicate.

use crate::action::MoveError;
use crate::disk::{Disk, DiskId, Rank};
use crate::geometry::AaRect;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// One of the three fixed pillar slots, left to right.
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
    strum::EnumIter,
    derive_more::Display,
)]
pub enum PillarId {
    /// Slot 1, where every level starts.
    #[display("pillar 1")]
    Left,
    /// Slot 2.
    #[display("pillar 2")]
    Middle,
    /// Slot 3, the goal.
    #[display("pillar 3")]
    Right,
}

impl PillarId {
    /// All pillars in slot order.
    pub const ALL: [PillarId; 3] = [PillarId::Left, PillarId::Middle, PillarId::Right];

    /// Zero-based index into per-pillar arrays.
    pub fn index(self) -> usize {
        match self {
            PillarId::Left => 0,
            PillarId::Middle => 1,
            PillarId::Right => 2,
        }
    }

    /// One-based slot number as shown to the player.
    pub fn slot(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Converts a one-based slot number.
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(PillarId::Left),
            2 => Some(PillarId::Middle),
            3 => Some(PillarId::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    disk: DiskId,
    rank: Rank,
}

/// A pillar holding a stack of disks, bottom first.
///
/// The stack is strictly rank-descending from bottom to top as long as
/// every [`Pillar::push`] is preceded by a passing [`Pillar::can_accept`].
#[derive(Debug, Clone, PartialEq)]
pub struct Pillar {
    id: PillarId,
    shape: AaRect,
    stack: Vec<Slot>,
}

impl Pillar {
    /// Creates an empty pillar occupying `shape`.
    pub fn new(id: PillarId, shape: AaRect) -> Self {
        Self {
            id,
            shape,
            stack: Vec::new(),
        }
    }

    /// Returns the pillar's slot.
    pub fn id(&self) -> PillarId {
        self.id
    }

    /// Returns the pillar's collision shape.
    pub fn shape(&self) -> AaRect {
        self.shape
    }

    /// Returns true if `disk` may be placed on top of this pillar.
    pub fn can_accept(&self, disk: &Disk) -> bool {
        self.accepts_rank(disk.rank())
    }

    /// Returns true if a disk of `rank` may be placed on top of this pillar.
    pub fn accepts_rank(&self, rank: Rank) -> bool {
        match self.top_rank() {
            None => true,
            Some(top) => rank < top,
        }
    }

    /// Places `disk` on top and records this pillar as its owner.
    ///
    /// Callers validate with [`Pillar::can_accept`] first.
    #[instrument(
        skip(self, disk),
        fields(pillar = %self.id, disk = %disk.id(), rank = %disk.rank())
    )]
    pub fn push(&mut self, disk: &mut Disk) {
        debug_assert!(
            self.can_accept(disk),
            "{} pushed onto {} without validation",
            disk.id(),
            self.id
        );
        self.stack.push(Slot {
            disk: disk.id(),
            rank: disk.rank(),
        });
        disk.set_pillar(self.id);
        trace!(depth = self.stack.len(), "Disk pushed");
    }

    /// Removes and returns the top disk.
    #[instrument(skip(self), fields(pillar = %self.id))]
    pub fn pop(&mut self) -> Result<DiskId, MoveError> {
        self.stack
            .pop()
            .map(|slot| slot.disk)
            .ok_or(MoveError::EmptyPillar(self.id))
    }

    /// Peeks at the top disk.
    pub fn top(&self) -> Option<DiskId> {
        self.stack.last().map(|slot| slot.disk)
    }

    /// Rank of the top disk.
    pub fn top_rank(&self) -> Option<Rank> {
        self.stack.last().map(|slot| slot.rank)
    }

    /// Number of disks on the pillar.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns true if the pillar holds no disks.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Disk ids from bottom to top.
    pub fn disks(&self) -> impl Iterator<Item = DiskId> + '_ {
        self.stack.iter().map(|slot| slot.disk)
    }

    /// Disk ranks from bottom to top.
    pub fn ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.stack.iter().map(|slot| slot.rank)
    }

    pub(crate) fn clear(&mut self) {
        self.stack.clear();
    }

    #[cfg(test)]
    pub(crate) fn force_push(&mut self, disk: DiskId, rank: Rank) {
        self.stack.push(Slot { disk, rank });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::DiskArena;
    use crate::geometry::Point;
    use strum::IntoEnumIterator;

    fn pillar() -> Pillar {
        Pillar::new(PillarId::Middle, AaRect::new(Point::new(400.0, 200.0), 12.5, 125.0))
    }

    #[test]
    fn test_empty_pillar_accepts_anything() {
        let mut arena = DiskArena::new();
        let big = arena.spawn(Rank(4), PillarId::Left, Point::default());
        assert!(pillar().can_accept(arena.get(big).unwrap()));
    }

    #[test]
    fn test_smaller_on_larger_only() {
        let mut arena = DiskArena::new();
        let mut p = pillar();
        let big = arena.spawn(Rank(3), PillarId::Left, Point::default());
        p.push(arena.get_mut(big).unwrap());

        assert!(p.accepts_rank(Rank(1)));
        assert!(p.accepts_rank(Rank(2)));
        assert!(!p.accepts_rank(Rank(3)));
        assert!(!p.accepts_rank(Rank(4)));
    }

    #[test]
    fn test_push_sets_owner_and_top() {
        let mut arena = DiskArena::new();
        let mut p = pillar();
        let id = arena.spawn(Rank(2), PillarId::Left, Point::default());
        p.push(arena.get_mut(id).unwrap());

        assert_eq!(arena.get(id).unwrap().pillar(), PillarId::Middle);
        assert_eq!(p.top(), Some(id));
        assert_eq!(p.top_rank(), Some(Rank(2)));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_pop_empty_pillar_errors() {
        let mut p = pillar();
        assert_eq!(p.pop(), Err(MoveError::EmptyPillar(PillarId::Middle)));
    }

    #[test]
    fn test_pop_returns_last_pushed() {
        let mut arena = DiskArena::new();
        let mut p = pillar();
        let big = arena.spawn(Rank(2), PillarId::Left, Point::default());
        let small = arena.spawn(Rank(1), PillarId::Left, Point::default());
        p.push(arena.get_mut(big).unwrap());
        p.push(arena.get_mut(small).unwrap());

        assert_eq!(p.pop(), Ok(small));
        assert_eq!(p.top(), Some(big));
    }

    #[test]
    fn test_slots_round_trip() {
        for id in PillarId::iter() {
            assert_eq!(PillarId::from_slot(id.slot()), Some(id));
        }
        assert_eq!(PillarId::from_slot(0), None);
        assert_eq!(PillarId::from_slot(4), None);
    }
}
