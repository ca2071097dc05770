//! Pointer-driven interaction: press picks a disk up, drag moves it, release
//! drops it onto whatever pillar it overlaps.
//!
//! ```text
//! Idle --press on top disk--> Selected --drag--> Dragging
//!   ^                            |                  |
//!   +----------release-----------+------release-----+
//! ```

use crate::action::{MoveError, Relocated, Relocation};
use crate::board::{Board, Completion};
use crate::collision::{CollisionIndex, CollisionManager};
use crate::disk::DiskId;
use crate::geometry::{AaRect, Point};
use crate::layout::Layout;
use crate::level::Level;
use crate::pillar::PillarId;
use tracing::{debug, error, info, instrument, warn};

/// A pointer event in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed.
    Press(Point),
    /// Pointer moved while pressed.
    Drag {
        /// New pointer position.
        at: Point,
        /// Movement since the previous event.
        delta: Point,
    },
    /// Button released.
    Release(Point),
}

/// Where the controller is in the press/drag/release cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No disk picked up.
    Idle,
    /// A disk was pressed but has not moved.
    Selected,
    /// A disk is following the pointer.
    Dragging,
}

/// Result of a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// A top disk was picked up.
    Selected {
        /// The disk.
        disk: DiskId,
        /// Pillar it was picked from.
        pillar: PillarId,
    },
    /// The restart control was pressed and the level restarted.
    Restarted,
    /// Nothing was hit.
    Missed,
}

/// An accepted relocation together with the completion check that followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The move.
    pub relocated: Relocated,
    /// Level state after the move.
    pub completion: Completion,
}

/// Result of a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// No disk was selected.
    NoSelection,
    /// The disk was dropped away from every pillar and went back.
    Returned {
        /// The disk.
        disk: DiskId,
    },
    /// The pillar under the disk refused it; the disk snapped back.
    Rejected {
        /// The disk.
        disk: DiskId,
        /// Why the move failed.
        error: MoveError,
    },
    /// The disk was placed.
    Placed(Placement),
}

/// Result of dispatching a [`PointerEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Outcome of a press.
    Pressed(PressOutcome),
    /// The disk that moved, if one was selected.
    Dragged(Option<DiskId>),
    /// Outcome of a release.
    Released(ReleaseOutcome),
}

/// Capability interface the host event loop drives.
pub trait PointerHandler {
    /// Handles a button press.
    fn on_press(&mut self, at: Point) -> PressOutcome;

    /// Handles pointer movement while the button is held.
    fn on_drag(&mut self, at: Point, delta: Point) -> Option<DiskId>;

    /// Handles the button release.
    fn on_release(&mut self, at: Point) -> ReleaseOutcome;
}

/// Translates pointer events into board mutations.
#[derive(Debug, Clone)]
pub struct InteractionController<C = CollisionManager> {
    board: Board,
    collisions: C,
    restart_control: AaRect,
}

impl InteractionController<CollisionManager> {
    /// Creates a controller with a fresh board for `level`.
    #[instrument(skip(layout))]
    pub fn new(level: Level, layout: Layout) -> Self {
        Self::with_index(Board::new(level, layout), CollisionManager::new())
    }
}

impl<C: CollisionIndex> InteractionController<C> {
    /// Wraps an existing board, registering its pillars into `collisions`.
    #[instrument(skip_all, fields(level = %board.level()))]
    pub fn with_index(board: Board, mut collisions: C) -> Self {
        for pillar in board.pillars() {
            collisions.register(pillar.id(), pillar.shape());
        }
        let restart_control = board.layout().restart_control();
        Self {
            board,
            collisions,
            restart_control,
        }
    }

    /// The board being played.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The collision index.
    pub fn collisions(&self) -> &C {
        &self.collisions
    }

    /// Hit region of the restart control.
    pub fn restart_control(&self) -> AaRect {
        self.restart_control
    }

    /// Current phase of the press/drag/release cycle.
    pub fn phase(&self) -> DragPhase {
        match self.board.selection() {
            None => DragPhase::Idle,
            Some(selection) if selection.is_dragging() => DragPhase::Dragging,
            Some(_) => DragPhase::Selected,
        }
    }

    /// Restarts the current level.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!(level = %self.board.level(), "Restarting level");
        self.board.restart();
    }

    /// Moves a pillar's top disk without pointer geometry.
    ///
    /// Follows the same acceptance rules, step policy and completion check
    /// as a drop.
    #[instrument(skip_all, fields(relocation = %relocation))]
    pub fn move_top(&mut self, relocation: Relocation) -> Result<Placement, MoveError> {
        if let Some(selection) = self.board.take_selection() {
            self.board
                .restore_position(selection.disk(), selection.origin_position());
        }
        let relocated = self.board.apply(relocation)?;
        let completion = self.board.check_completion();
        Ok(Placement {
            relocated,
            completion,
        })
    }

    /// Dispatches any pointer event to the matching handler.
    pub fn dispatch(&mut self, event: PointerEvent) -> PointerOutcome {
        match event {
            PointerEvent::Press(at) => PointerOutcome::Pressed(self.on_press(at)),
            PointerEvent::Drag { at, delta } => PointerOutcome::Dragged(self.on_drag(at, delta)),
            PointerEvent::Release(at) => PointerOutcome::Released(self.on_release(at)),
        }
    }
}

impl<C: CollisionIndex> PointerHandler for InteractionController<C> {
    #[instrument(skip_all, fields(at = %at))]
    fn on_press(&mut self, at: Point) -> PressOutcome {
        if let Some(stale) = self.board.take_selection() {
            warn!(disk = %stale.disk(), "Press arrived before release, dropping old selection");
            self.board
                .restore_position(stale.disk(), stale.origin_position());
        }

        if let Some(disk) = self.board.top_disk_at(at) {
            match self.board.select(disk) {
                Ok(selection) => {
                    debug!(%disk, pillar = %selection.origin_pillar(), "Disk selected");
                    return PressOutcome::Selected {
                        disk,
                        pillar: selection.origin_pillar(),
                    };
                }
                Err(err) => {
                    warn!(error = %err, "Hit disk could not be selected");
                    return PressOutcome::Missed;
                }
            }
        }

        if self.restart_control.contains(at) {
            self.restart();
            return PressOutcome::Restarted;
        }

        PressOutcome::Missed
    }

    fn on_drag(&mut self, at: Point, delta: Point) -> Option<DiskId> {
        let disk = self.board.drag_selected(at)?;
        tracing::trace!(%disk, at = %at, delta = %delta, "Dragging");
        Some(disk)
    }

    #[instrument(skip_all, fields(at = %at))]
    fn on_release(&mut self, at: Point) -> ReleaseOutcome {
        let Some(selection) = self.board.take_selection() else {
            return ReleaseOutcome::NoSelection;
        };
        let disk = selection.disk();
        let origin = selection.origin_position();

        let Some(shape) = self.board.disk_shape(disk) else {
            warn!(%disk, "Selected disk vanished before release");
            return ReleaseOutcome::NoSelection;
        };

        let Some(candidate) = self.collisions.landing_pillar(&shape) else {
            debug!(%disk, "Dropped away from pillars, returning");
            self.board.restore_position(disk, origin);
            return ReleaseOutcome::Returned { disk };
        };

        match self.board.relocate(disk, candidate) {
            Ok(relocated) => {
                let completion = self.board.check_completion();
                ReleaseOutcome::Placed(Placement {
                    relocated,
                    completion,
                })
            }
            Err(error @ MoveError::Rejected { .. }) => {
                debug!(%disk, error = %error, "Drop rejected, snapping back");
                self.board.restore_position(disk, origin);
                ReleaseOutcome::Rejected { disk, error }
            }
            Err(error) => {
                error!(%disk, error = %error, "Selection no longer matches the board");
                debug_assert!(false, "inconsistent selection: {error}");
                self.board.restore_position(disk, origin);
                ReleaseOutcome::Returned { disk }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(n: u8) -> InteractionController {
        InteractionController::new(Level::new(n).unwrap(), Layout::default())
    }

    fn top_position(c: &InteractionController, pillar: PillarId) -> Point {
        let id = c.board().pillar(pillar).top().unwrap();
        c.board().disk(id).unwrap().position()
    }

    #[test]
    fn test_press_on_top_disk_selects_it() {
        let mut c = controller(3);
        let at = top_position(&c, PillarId::Left);
        assert!(matches!(
            c.on_press(at),
            PressOutcome::Selected {
                pillar: PillarId::Left,
                ..
            }
        ));
        assert_eq!(c.phase(), DragPhase::Selected);
    }

    #[test]
    fn test_second_press_returns_held_disk_to_origin() {
        let mut c = controller(2);
        let origin = top_position(&c, PillarId::Left);
        let PressOutcome::Selected { disk, .. } = c.on_press(origin) else {
            panic!("top disk not selected");
        };
        c.on_drag(Point::new(400.0, 300.0), Point::new(240.0, 173.0));
        assert_eq!(c.board().disk(disk).unwrap().position(), Point::new(400.0, 300.0));

        assert_eq!(c.on_press(Point::new(500.0, 420.0)), PressOutcome::Missed);
        assert_eq!(c.board().disk(disk).unwrap().position(), origin);
        assert_eq!(c.board().pillar(PillarId::Left).top(), Some(disk));
        assert_eq!(c.phase(), DragPhase::Idle);
        assert_eq!(c.board().step(), 0);
    }

    #[test]
    fn test_press_on_empty_space_misses() {
        let mut c = controller(3);
        assert_eq!(c.on_press(Point::new(500.0, 420.0)), PressOutcome::Missed);
        assert_eq!(c.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_drag_moves_only_selected_disk() {
        let mut c = controller(2);
        assert_eq!(c.on_drag(Point::new(1.0, 1.0), Point::default()), None);

        let at = top_position(&c, PillarId::Left);
        c.on_press(at);
        let dragged = c.on_drag(Point::new(400.0, 300.0), Point::new(240.0, 210.0));
        assert!(dragged.is_some());
        assert_eq!(c.phase(), DragPhase::Dragging);
        assert_eq!(top_position(&c, PillarId::Left), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_release_without_selection() {
        let mut c = controller(1);
        assert_eq!(c.on_release(Point::new(0.0, 0.0)), ReleaseOutcome::NoSelection);
    }

    #[test]
    fn test_release_clears_selection_on_every_branch() {
        let mut c = controller(2);
        let start = top_position(&c, PillarId::Left);

        c.on_press(start);
        c.on_drag(Point::new(400.0, 440.0), Point::default());
        assert!(matches!(c.on_release(Point::new(400.0, 440.0)), ReleaseOutcome::Returned { .. }));
        assert_eq!(c.phase(), DragPhase::Idle);
        assert_eq!(top_position(&c, PillarId::Left), start);

        c.on_press(start);
        c.on_drag(Point::new(400.0, 150.0), Point::default());
        assert!(matches!(c.on_release(Point::new(400.0, 150.0)), ReleaseOutcome::Placed(_)));
        assert_eq!(c.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_move_top_uses_same_rules() {
        let mut c = controller(2);
        let placed = c
            .move_top(Relocation::new(PillarId::Left, PillarId::Middle))
            .unwrap();
        assert!(placed.relocated.counted);
        assert_eq!(placed.completion, Completion::InProgress);
        assert!(matches!(
            c.move_top(Relocation::new(PillarId::Left, PillarId::Middle)),
            Err(MoveError::Rejected { .. })
        ));
        assert_eq!(c.board().step(), 1);
    }
}
