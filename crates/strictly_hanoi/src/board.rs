//! Level state: three pillars, the disks on them, the step counter and the
//! in-progress drag selection.

use crate::action::{MoveError, Relocated, Relocation};
use crate::disk::{Disk, DiskArena, DiskId, Rank};
use crate::geometry::{AaRect, Point};
use crate::invariants::{HanoiInvariants, InvariantSet};
use crate::layout::Layout;
use crate::level::Level;
use crate::pillar::{Pillar, PillarId};
use tracing::{debug, info, instrument};

/// A disk picked up by a press, waiting for its release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    disk: DiskId,
    origin_pillar: PillarId,
    origin_position: Point,
    dragging: bool,
}

impl Selection {
    /// The selected disk.
    pub fn disk(&self) -> DiskId {
        self.disk
    }

    /// Pillar the disk was on when it was picked up.
    pub fn origin_pillar(&self) -> PillarId {
        self.origin_pillar
    }

    /// Position the disk snaps back to if the drop fails.
    pub fn origin_position(&self) -> Point {
        self.origin_position
    }

    /// Whether at least one drag event arrived since the press.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

/// Result of the completion check that follows an accepted relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Not all disks are on pillar 3 yet.
    InProgress,
    /// The level was solved and the board now holds the next level.
    LevelComplete {
        /// Level that was solved.
        completed: Level,
        /// Steps taken to solve it.
        steps: u32,
        /// Level now on the board.
        next: Level,
    },
    /// The final level was solved. The board keeps its solved state.
    GameComplete {
        /// Level that was solved.
        level: Level,
        /// Steps taken to solve it.
        steps: u32,
    },
}

/// Level state for one game.
#[derive(Debug, Clone)]
pub struct Board {
    layout: Layout,
    level: Level,
    step: u32,
    pillars: [Pillar; 3],
    disks: DiskArena,
    selection: Option<Selection>,
}

impl Board {
    /// Creates a board set up for `level`.
    #[instrument(skip(layout))]
    pub fn new(level: Level, layout: Layout) -> Self {
        let pillars = PillarId::ALL.map(|id| Pillar::new(id, layout.pillar_shape(id)));
        let mut board = Self {
            layout,
            level,
            step: 0,
            pillars,
            disks: DiskArena::new(),
            selection: None,
        };
        board.init_level(level);
        board
    }

    /// Replays relocations from the start of `level`.
    #[instrument(skip(layout, moves), fields(moves = moves.len()))]
    pub fn replay(level: Level, layout: Layout, moves: &[Relocation]) -> Result<Self, MoveError> {
        let mut board = Self::new(level, layout);
        for relocation in moves {
            board.apply(*relocation)?;
        }
        Ok(board)
    }

    /// Destroys all disks and stacks `level` fresh disks on pillar 1.
    ///
    /// Resets the step counter and drops any selection.
    #[instrument(skip(self), fields(from = %self.level))]
    pub fn init_level(&mut self, level: Level) {
        for pillar in &mut self.pillars {
            pillar.clear();
        }
        self.disks.clear();
        self.step = 0;
        self.selection = None;
        self.level = level;

        let start = &mut self.pillars[PillarId::Left.index()];
        for (depth, rank) in (1..=level.get()).rev().enumerate() {
            let position = self.layout.stacked_position(PillarId::Left, depth + 1);
            let id = self.disks.spawn(Rank(rank), PillarId::Left, position);
            if let Some(disk) = self.disks.get_mut(id) {
                start.push(disk);
            }
        }

        info!(level = %level, disks = self.disks.len(), "Level initialised");
        self.assert_invariants();
    }

    /// Restarts the current level.
    #[instrument(skip(self), fields(level = %self.level, step = self.step))]
    pub fn restart(&mut self) {
        self.init_level(self.level);
    }

    /// Moves the top disk of `relocation.from` onto `relocation.to`.
    #[instrument(skip_all, fields(relocation = %relocation))]
    pub fn apply(&mut self, relocation: Relocation) -> Result<Relocated, MoveError> {
        let disk = self
            .pillar(relocation.from)
            .top()
            .ok_or(MoveError::EmptyPillar(relocation.from))?;
        self.relocate(disk, relocation.to)
    }

    /// Moves `disk` from its current pillar onto `to`.
    ///
    /// The disk is popped from its pillar before the destination is asked to
    /// accept it; a rejected disk is pushed straight back, so on `Err` the
    /// stacks are exactly as they were. On success the disk's position is
    /// reset to its stacked slot and the step counter advances if the
    /// pillar changed.
    #[instrument(skip_all, fields(disk = %disk_id, to = %to))]
    pub fn relocate(&mut self, disk_id: DiskId, to: PillarId) -> Result<Relocated, MoveError> {
        let disk = self
            .disks
            .get_mut(disk_id)
            .ok_or(MoveError::StaleDisk(disk_id))?;
        let from = disk.pillar();
        let rank = disk.rank();

        let origin = &mut self.pillars[from.index()];
        if origin.top() != Some(disk_id) {
            return Err(MoveError::NotTopDisk {
                disk: disk_id,
                pillar: from,
            });
        }
        origin.pop()?;

        if !self.pillars[to.index()].can_accept(disk) {
            let top = self.pillars[to.index()].top_rank().unwrap_or(rank);
            self.pillars[from.index()].push(disk);
            debug!(%rank, %top, "Relocation rejected, disk returned to origin");
            self.assert_invariants();
            return Err(MoveError::Rejected {
                disk: rank,
                top,
                pillar: to,
            });
        }

        let destination = &mut self.pillars[to.index()];
        destination.push(disk);
        disk.set_position(self.layout.stacked_position(to, destination.len()));

        let counted = from != to;
        if counted {
            self.step += 1;
        }
        info!(%rank, %from, %to, step = self.step, "Disk relocated");
        self.assert_invariants();

        Ok(Relocated {
            disk: disk_id,
            rank,
            from,
            to,
            counted,
        })
    }

    /// Checks whether the level is solved and advances if so.
    #[instrument(skip(self), fields(level = %self.level))]
    pub fn check_completion(&mut self) -> Completion {
        if self.pillar(PillarId::Right).len() != self.level.disk_count() {
            return Completion::InProgress;
        }

        let completed = self.level;
        let steps = self.step;
        match completed.next() {
            Some(next) => {
                info!(%completed, steps, %next, "Level complete, advancing");
                self.init_level(next);
                Completion::LevelComplete {
                    completed,
                    steps,
                    next,
                }
            }
            None => {
                info!(level = %completed, steps, "Final level complete");
                Completion::GameComplete {
                    level: completed,
                    steps,
                }
            }
        }
    }

    /// The top disk whose hit region contains `point`, searching pillars in
    /// slot order.
    pub fn top_disk_at(&self, point: Point) -> Option<DiskId> {
        self.pillars
            .iter()
            .filter_map(|pillar| pillar.top())
            .find(|&id| self.disk_shape(id).is_some_and(|shape| shape.contains(point)))
    }

    /// Hit and collision shape of a live disk at its current position.
    pub fn disk_shape(&self, id: DiskId) -> Option<AaRect> {
        self.disks
            .get(id)
            .map(|disk| self.layout.disk_shape(disk.rank(), self.level, disk.position()))
    }

    /// Checks every board invariant.
    pub fn verify(&self) -> Result<(), MoveError> {
        HanoiInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(descriptions)
        })
    }

    fn assert_invariants(&self) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.verify() {
            tracing::error!(error = %err, "Board invariants violated");
            panic!("{err}");
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Selection
    // ─────────────────────────────────────────────────────────────

    /// Picks up `disk`, remembering where it came from.
    pub(crate) fn select(&mut self, disk: DiskId) -> Result<Selection, MoveError> {
        let picked = self.disks.get(disk).ok_or(MoveError::StaleDisk(disk))?;
        let selection = Selection {
            disk,
            origin_pillar: picked.pillar(),
            origin_position: picked.position(),
            dragging: false,
        };
        self.selection = Some(selection);
        Ok(selection)
    }

    /// Moves the selected disk to follow the pointer.
    pub(crate) fn drag_selected(&mut self, to: Point) -> Option<DiskId> {
        let selection = self.selection.as_mut()?;
        selection.dragging = true;
        let disk = selection.disk;
        self.disks.get_mut(disk)?.set_position(to);
        Some(disk)
    }

    /// Ends the selection, returning it.
    pub(crate) fn take_selection(&mut self) -> Option<Selection> {
        self.selection.take()
    }

    /// Puts a disk back at a remembered position.
    pub(crate) fn restore_position(&mut self, disk: DiskId, position: Point) {
        if let Some(disk) = self.disks.get_mut(disk) {
            disk.set_position(position);
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// Current level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Steps taken in the current level.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// World geometry.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// One pillar.
    pub fn pillar(&self, id: PillarId) -> &Pillar {
        &self.pillars[id.index()]
    }

    /// All pillars in slot order.
    pub fn pillars(&self) -> &[Pillar; 3] {
        &self.pillars
    }

    /// The disk arena.
    pub fn disks(&self) -> &DiskArena {
        &self.disks
    }

    /// A live disk.
    pub fn disk(&self, id: DiskId) -> Option<&Disk> {
        self.disks.get(id)
    }

    /// The active selection, if a disk is picked up.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn pillar_mut(&mut self, id: PillarId) -> &mut Pillar {
        &mut self.pillars[id.index()]
    }
}
