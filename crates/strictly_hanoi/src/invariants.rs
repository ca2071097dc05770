//! First-class board invariants.
//!
//! Invariants are logical properties that hold after every board mutation.
//! Debug builds check the full [`HanoiInvariants`] set after each mutation;
//! each invariant is also testable on its own.

use crate::board::Board;
use crate::disk::Rank;
use crate::pillar::PillarId;
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: every stack is strictly rank-descending from bottom to top.
pub struct StrictlyDescendingInvariant;

impl Invariant<Board> for StrictlyDescendingInvariant {
    fn holds(board: &Board) -> bool {
        board.pillars().iter().all(|pillar| {
            let ranks: Vec<Rank> = pillar.ranks().collect();
            let ordered = ranks.windows(2).all(|pair| pair[0] > pair[1]);
            if !ordered {
                warn!(pillar = %pillar.id(), ?ranks, "Stack is not strictly descending");
            }
            ordered
        })
    }

    fn description() -> &'static str {
        "Every pillar is strictly rank-descending from bottom to top"
    }
}

/// Invariant: each live disk sits in exactly one stack, the one it names
/// as its owner, and stacks reference only live disks.
pub struct OwnershipInvariant;

impl Invariant<Board> for OwnershipInvariant {
    fn holds(board: &Board) -> bool {
        for pillar in board.pillars() {
            for (id, rank) in pillar.disks().zip(pillar.ranks()) {
                match board.disk(id) {
                    Some(disk) if disk.pillar() == pillar.id() && disk.rank() == rank => {}
                    Some(disk) => {
                        warn!(
                            disk = %id,
                            stack = %pillar.id(),
                            owner = %disk.pillar(),
                            "Disk owner disagrees with stack"
                        );
                        return false;
                    }
                    None => {
                        warn!(disk = %id, stack = %pillar.id(), "Stack references a dead disk");
                        return false;
                    }
                }
            }
        }

        board.disks().iter().all(|disk| {
            let occurrences: usize = PillarId::ALL
                .iter()
                .map(|&p| board.pillar(p).disks().filter(|&d| d == disk.id()).count())
                .sum();
            occurrences == 1
        })
    }

    fn description() -> &'static str {
        "Every disk belongs to exactly one stack, matching its owner"
    }
}

/// Invariant: the number of disks equals the level number.
pub struct DiskCountInvariant;

impl Invariant<Board> for DiskCountInvariant {
    fn holds(board: &Board) -> bool {
        let stacked: usize = board.pillars().iter().map(|p| p.len()).sum();
        board.disks().len() == board.level().disk_count() && stacked == board.disks().len()
    }

    fn description() -> &'static str {
        "The board holds exactly `level` disks"
    }
}

/// All board invariants as a composable set.
pub type HanoiInvariants = (
    StrictlyDescendingInvariant,
    OwnershipInvariant,
    DiskCountInvariant,
);
