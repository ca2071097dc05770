//! Scene flow from the intro to the win screen.

use std::time::Duration;
use strictly_hanoi::{
    FlowSettings, Level, PillarId, Point, PointerEvent, Relocation, Scene, SceneFlow,
    SceneTransition, TransitionStyle,
};

fn solve(
    flow: &mut SceneFlow,
    n: u8,
    from: PillarId,
    via: PillarId,
    to: PillarId,
) -> Option<SceneTransition> {
    if n == 0 {
        return None;
    }
    let mut last = solve(flow, n - 1, from, to, via);
    last = flow
        .move_top(Relocation::new(from, to))
        .expect("legal move")
        .or(last);
    solve(flow, n - 1, via, from, to).or(last)
}

#[test]
fn test_full_game_from_intro_to_victory() {
    let mut flow = SceneFlow::new(FlowSettings::default());
    assert!(matches!(flow.scene(), Scene::Intro(_)));

    let started = flow.tick(Duration::from_secs(5)).expect("intro ends");
    assert_eq!(started.style(), Some(TransitionStyle::Fade));

    let (l, m, r) = (PillarId::Left, PillarId::Middle, PillarId::Right);
    for n in 1..Level::MAX {
        let transition = solve(&mut flow, n, l, m, r);
        let expected_steps = (1u32 << n) - 1;
        assert_eq!(
            transition,
            Some(SceneTransition::LevelAdvanced {
                completed: Level::new(n).expect("valid level"),
                steps: expected_steps,
                next: Level::new(n + 1).expect("valid level"),
            })
        );
    }

    let won = solve(&mut flow, Level::MAX, l, m, r).expect("game won");
    assert_eq!(won, SceneTransition::GameWon { total_steps: 1 + 3 + 7 + 15 });
    assert_eq!(won.style(), Some(TransitionStyle::RotoZoom));
    assert!(matches!(flow.scene(), Scene::Won(_)));
    assert_eq!(flow.total_steps(), 26);
}

#[test]
fn test_pointer_drop_completes_first_level() {
    let mut flow = SceneFlow::new(FlowSettings {
        skip_intro: true,
        ..FlowSettings::default()
    });
    let board = flow.controller().expect("playing").board();
    let id = board.pillar(PillarId::Left).top().expect("one disk");
    let from = board.disk(id).expect("live disk").position();
    let to = Point::new(660.0, 200.0);

    assert_eq!(flow.pointer(PointerEvent::Press(from)), None);
    assert_eq!(
        flow.pointer(PointerEvent::Drag {
            at: to,
            delta: Point::new(to.x - from.x, to.y - from.y),
        }),
        None
    );
    let transition = flow.pointer(PointerEvent::Release(to));
    assert!(matches!(
        transition,
        Some(SceneTransition::LevelAdvanced { steps: 1, .. })
    ));
    let board = flow.controller().expect("still playing").board();
    assert_eq!(board.level().get(), 2);
}

#[test]
fn test_restart_control_press_reports_restart() {
    let mut flow = SceneFlow::new(FlowSettings {
        skip_intro: true,
        ..FlowSettings::default()
    });
    let at = flow.controller().expect("playing").restart_control().center;
    assert_eq!(
        flow.pointer(PointerEvent::Press(at)),
        Some(SceneTransition::LevelRestarted {
            level: Level::FIRST
        })
    );
}

#[test]
fn test_input_during_intro_is_ignored_by_pointer() {
    let mut flow = SceneFlow::new(FlowSettings::default());
    assert_eq!(flow.pointer(PointerEvent::Press(Point::new(160.0, 67.0))), None);
    assert!(matches!(flow.scene(), Scene::Intro(_)));
}
