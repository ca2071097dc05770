//! Rules properties exercised through the public API.

use strictly_hanoi::{
    Board, Completion, DragPhase, InteractionController, Layout, Level, MoveError, PillarId,
    Point, PointerEvent, PointerOutcome, PressOutcome, Rank, ReleaseOutcome, Relocation,
};

const L: PillarId = PillarId::Left;
const M: PillarId = PillarId::Middle;
const R: PillarId = PillarId::Right;

fn level(n: u8) -> Level {
    Level::new(n).expect("valid level")
}

fn ranks(board: &Board, pillar: PillarId) -> Vec<u8> {
    board.pillar(pillar).ranks().map(Rank::get).collect()
}

fn assert_descending(board: &Board) {
    for pillar in PillarId::ALL {
        let r = ranks(board, pillar);
        assert!(
            r.windows(2).all(|w| w[0] > w[1]),
            "{} is not strictly descending: {:?}",
            pillar,
            r
        );
    }
    board.verify().expect("board invariants hold");
}

fn top_position(controller: &InteractionController, pillar: PillarId) -> Point {
    let board = controller.board();
    let id = board.pillar(pillar).top().expect("pillar has a disk");
    board.disk(id).expect("live disk").position()
}

fn drag_and_drop(controller: &mut InteractionController, from: Point, to: Point) -> ReleaseOutcome {
    controller.dispatch(PointerEvent::Press(from));
    controller.dispatch(PointerEvent::Drag {
        at: to,
        delta: Point::new(to.x - from.x, to.y - from.y),
    });
    match controller.dispatch(PointerEvent::Release(to)) {
        PointerOutcome::Released(outcome) => outcome,
        other => panic!("release produced {:?}", other),
    }
}

#[test]
fn test_init_level_stacks_all_disks_on_first_pillar() {
    for n in 1..=Level::MAX {
        let board = Board::new(level(n), Layout::default());
        let expected: Vec<u8> = (1..=n).rev().collect();
        assert_eq!(ranks(&board, L), expected);
        assert!(board.pillar(M).is_empty());
        assert!(board.pillar(R).is_empty());
        assert_eq!(board.step(), 0);
    }
}

#[test]
fn test_minimal_three_disk_solution_advances_to_level_four() {
    let mut board = Board::new(level(3), Layout::default());
    let moves = [(L, R), (L, M), (R, M), (L, R), (M, L), (M, R), (L, R)];
    for (i, (from, to)) in moves.into_iter().enumerate() {
        board.apply(Relocation::new(from, to)).expect("legal move");
        assert_descending(&board);
        assert_eq!(board.step(), i as u32 + 1);
    }
    assert_eq!(ranks(&board, R), vec![3, 2, 1]);

    let completion = board.check_completion();
    assert_eq!(
        completion,
        Completion::LevelComplete {
            completed: level(3),
            steps: 7,
            next: level(4),
        }
    );
    assert_eq!(board.level(), level(4));
    assert_eq!(ranks(&board, L), vec![4, 3, 2, 1]);
    assert_eq!(board.step(), 0);
}

#[test]
fn test_larger_onto_smaller_is_always_rejected() {
    let mut board = Board::new(level(4), Layout::default());
    board.apply(Relocation::new(L, M)).expect("legal move");

    let err = board.apply(Relocation::new(L, M)).unwrap_err();
    assert_eq!(
        err,
        MoveError::Rejected {
            disk: Rank(2),
            top: Rank(1),
            pillar: M,
        }
    );
    assert_eq!(ranks(&board, L), vec![4, 3, 2]);
    assert_eq!(ranks(&board, M), vec![1]);
    assert_eq!(board.step(), 1);
    assert_descending(&board);
}

#[test]
fn test_empty_pillar_cannot_be_moved_from() {
    let mut board = Board::new(level(2), Layout::default());
    assert_eq!(
        board.apply(Relocation::new(R, L)),
        Err(MoveError::EmptyPillar(R))
    );
}

#[test]
fn test_restart_keeps_level_and_resets_steps() {
    let mut board = Board::replay(level(3), Layout::default(), &[Relocation::new(L, R)])
        .expect("legal replay");
    assert_eq!(board.step(), 1);

    board.restart();
    assert_eq!(board.level(), level(3));
    assert_eq!(board.step(), 0);
    assert_eq!(ranks(&board, L), vec![3, 2, 1]);
}

#[test]
fn test_drag_onto_other_pillar_counts_a_step() {
    let mut controller = InteractionController::new(level(3), Layout::default());
    let from = top_position(&controller, L);

    let outcome = drag_and_drop(&mut controller, from, Point::new(660.0, 200.0));
    let ReleaseOutcome::Placed(placement) = outcome else {
        panic!("expected placement, got {:?}", outcome);
    };
    assert_eq!(placement.relocated.to, R);
    assert!(placement.relocated.counted);
    assert_eq!(placement.completion, Completion::InProgress);

    let board = controller.board();
    assert_eq!(board.step(), 1);
    assert_eq!(ranks(board, R), vec![1]);
    assert_eq!(top_position(&controller, R), board.layout().stacked_position(R, 1));
    assert_eq!(controller.phase(), DragPhase::Idle);
}

#[test]
fn test_drop_back_on_origin_does_not_count() {
    let mut controller = InteractionController::new(level(3), Layout::default());
    let from = top_position(&controller, L);

    let outcome = drag_and_drop(&mut controller, from, Point::new(170.0, 250.0));
    let ReleaseOutcome::Placed(placement) = outcome else {
        panic!("expected placement, got {:?}", outcome);
    };
    assert!(!placement.relocated.counted);
    assert_eq!(controller.board().step(), 0);
    assert_eq!(top_position(&controller, L), from);
}

#[test]
fn test_rejected_drop_snaps_back_to_origin() {
    let mut controller = InteractionController::new(level(2), Layout::default());
    controller
        .move_top(Relocation::new(L, M))
        .expect("legal move");
    let origin = top_position(&controller, L);

    let outcome = drag_and_drop(&mut controller, origin, Point::new(400.0, 200.0));
    assert!(matches!(outcome, ReleaseOutcome::Rejected { .. }));

    let board = controller.board();
    assert_eq!(board.step(), 1);
    assert_eq!(ranks(board, L), vec![2]);
    assert_eq!(top_position(&controller, L), origin);
    assert_descending(board);
}

#[test]
fn test_drop_in_empty_space_returns_disk() {
    let mut controller = InteractionController::new(level(2), Layout::default());
    let origin = top_position(&controller, L);

    let outcome = drag_and_drop(&mut controller, origin, Point::new(280.0, 440.0));
    assert!(matches!(outcome, ReleaseOutcome::Returned { .. }));
    assert_eq!(top_position(&controller, L), origin);
    assert_eq!(controller.board().step(), 0);
}

#[test]
fn test_press_on_restart_control_restarts() {
    let mut controller = InteractionController::new(level(2), Layout::default());
    controller
        .move_top(Relocation::new(L, R))
        .expect("legal move");

    let at = controller.restart_control().center;
    assert_eq!(
        controller.dispatch(PointerEvent::Press(at)),
        PointerOutcome::Pressed(PressOutcome::Restarted)
    );
    assert_eq!(controller.board().step(), 0);
    assert_eq!(ranks(controller.board(), L), vec![2, 1]);
}
