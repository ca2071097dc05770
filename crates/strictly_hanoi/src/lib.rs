//! Tower of Hanoi rules engine.
//!
//! Pure game logic with no rendering or I/O: pillars as rank-checked
//! stacks, a level board with step counting and completion detection, a
//! pointer-driven interaction controller that resolves drops through a
//! collision index, and the scene flow that sequences intro, levels and
//! the win screen.
//!
//! # Example
//!
//! ```
//! use strictly_hanoi::{Board, Completion, Layout, Level, PillarId, Relocation};
//!
//! let mut board = Board::new(Level::FIRST, Layout::default());
//! board.apply(Relocation::new(PillarId::Left, PillarId::Right))?;
//! assert_eq!(board.step(), 1);
//! assert!(matches!(board.check_completion(), Completion::LevelComplete { .. }));
//! # Ok::<(), strictly_hanoi::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod collision;
mod controller;
mod disk;
mod flow;
mod geometry;
mod invariants;
mod layout;
mod level;
mod pillar;

pub use action::{MoveError, Relocated, Relocation};
pub use board::{Board, Completion, Selection};
pub use collision::{CollisionIndex, CollisionManager};
pub use controller::{
    DragPhase, InteractionController, Placement, PointerEvent, PointerHandler, PointerOutcome,
    PressOutcome, ReleaseOutcome,
};
pub use disk::{Disk, DiskArena, DiskId, Rank};
pub use flow::{
    DEFAULT_INTRO_DELAY, FlowSettings, Intro, Scene, SceneFlow, SceneTransition, TransitionStyle,
    Victory,
};
pub use geometry::{AaRect, Point};
pub use invariants::{
    DiskCountInvariant, HanoiInvariants, Invariant, InvariantSet, InvariantViolation,
    OwnershipInvariant, StrictlyDescendingInvariant,
};
pub use layout::Layout;
pub use level::Level;
pub use pillar::{Pillar, PillarId};
