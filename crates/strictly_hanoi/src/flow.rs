//! Scene flow: intro, the levels, and the win screen.
//!
//! The flow decides *when* to change scene. Drawing the scenes and
//! animating the transitions is left to the host, which receives a
//! [`SceneTransition`] for every change.

use crate::action::{MoveError, Relocation};
use crate::board::Completion;
use crate::controller::{
    InteractionController, PointerEvent, PointerOutcome, PressOutcome, ReleaseOutcome,
};
use crate::layout::Layout;
use crate::level::Level;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// How long the intro plays before the game starts on its own.
pub const DEFAULT_INTRO_DELAY: Duration = Duration::from_secs(4);

/// Visual style the host should use for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStyle {
    /// Cross-fade to the next scene.
    Fade,
    /// Spin-and-zoom into the next scene.
    RotoZoom,
}

/// A scene change the host should present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition {
    /// The intro ended and the first level began.
    GameStarted {
        /// Level now being played.
        level: Level,
    },
    /// A level was solved and the next one began.
    LevelAdvanced {
        /// Level that was solved.
        completed: Level,
        /// Steps it took.
        steps: u32,
        /// Level now being played.
        next: Level,
    },
    /// The current level was restarted.
    LevelRestarted {
        /// Level being replayed.
        level: Level,
    },
    /// The final level was solved.
    GameWon {
        /// Steps summed over every solved level.
        total_steps: u32,
    },
}

impl SceneTransition {
    /// Animation style, or `None` for an in-place change.
    pub fn style(&self) -> Option<TransitionStyle> {
        match self {
            SceneTransition::GameStarted { .. } | SceneTransition::LevelAdvanced { .. } => {
                Some(TransitionStyle::Fade)
            }
            SceneTransition::GameWon { .. } => Some(TransitionStyle::RotoZoom),
            SceneTransition::LevelRestarted { .. } => None,
        }
    }
}

/// The intro scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intro {
    elapsed: Duration,
    delay: Duration,
}

impl Intro {
    /// Time spent in the intro so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time after which the intro ends on its own.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// The win scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Victory {
    /// Steps summed over every solved level.
    pub total_steps: u32,
    /// The final level.
    pub level: Level,
}

/// The active scene.
#[derive(Debug, Clone)]
pub enum Scene {
    /// Title animation.
    Intro(Intro),
    /// A level in play.
    Playing(InteractionController),
    /// All levels solved.
    Won(Victory),
}

/// Settings the flow is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSettings {
    /// Intro length.
    pub intro_delay: Duration,
    /// Level the game starts at.
    pub start_level: Level,
    /// Start playing immediately.
    pub skip_intro: bool,
    /// World geometry for every board.
    pub layout: Layout,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            intro_delay: DEFAULT_INTRO_DELAY,
            start_level: Level::FIRST,
            skip_intro: false,
            layout: Layout::default(),
        }
    }
}

/// State machine sequencing the scenes.
#[derive(Debug, Clone)]
pub struct SceneFlow {
    scene: Scene,
    settings: FlowSettings,
    total_steps: u32,
}

impl SceneFlow {
    /// Creates the flow, starting with the intro unless it is skipped.
    #[instrument(
        skip(settings),
        fields(start_level = %settings.start_level, skip_intro = settings.skip_intro)
    )]
    pub fn new(settings: FlowSettings) -> Self {
        let scene = if settings.skip_intro {
            Scene::Playing(InteractionController::new(
                settings.start_level,
                settings.layout.clone(),
            ))
        } else {
            Scene::Intro(Intro {
                elapsed: Duration::ZERO,
                delay: settings.intro_delay,
            })
        };
        Self {
            scene,
            settings,
            total_steps: 0,
        }
    }

    /// The active scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The controller of the level in play.
    pub fn controller(&self) -> Option<&InteractionController> {
        match &self.scene {
            Scene::Playing(controller) => Some(controller),
            _ => None,
        }
    }

    /// Steps summed over the levels solved so far.
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Advances timers by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Option<SceneTransition> {
        let Scene::Intro(intro) = &mut self.scene else {
            return None;
        };
        intro.elapsed += dt;
        if intro.elapsed >= intro.delay {
            debug!(elapsed = ?intro.elapsed, "Intro delay elapsed");
            return Some(self.start_game());
        }
        None
    }

    /// Any key press. Skips the intro; ignored elsewhere.
    #[instrument(skip(self))]
    pub fn key_pressed(&mut self) -> Option<SceneTransition> {
        match self.scene {
            Scene::Intro(_) => Some(self.start_game()),
            _ => None,
        }
    }

    /// Restarts the level in play.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Option<SceneTransition> {
        let Scene::Playing(controller) = &mut self.scene else {
            return None;
        };
        controller.restart();
        Some(SceneTransition::LevelRestarted {
            level: controller.board().level(),
        })
    }

    /// Routes a pointer event to the level in play.
    pub fn pointer(&mut self, event: PointerEvent) -> Option<SceneTransition> {
        let Scene::Playing(controller) = &mut self.scene else {
            return None;
        };
        match controller.dispatch(event) {
            PointerOutcome::Pressed(PressOutcome::Restarted) => {
                Some(SceneTransition::LevelRestarted {
                    level: controller.board().level(),
                })
            }
            PointerOutcome::Released(ReleaseOutcome::Placed(placement)) => {
                self.on_completion(placement.completion)
            }
            _ => None,
        }
    }

    /// Moves a top disk by pillar numbers, as keyboard play does.
    #[instrument(skip(self))]
    pub fn move_top(
        &mut self,
        relocation: Relocation,
    ) -> Result<Option<SceneTransition>, MoveError> {
        let Scene::Playing(controller) = &mut self.scene else {
            return Ok(None);
        };
        let placement = controller.move_top(relocation)?;
        Ok(self.on_completion(placement.completion))
    }

    fn start_game(&mut self) -> SceneTransition {
        let level = self.settings.start_level;
        info!(%level, "Starting game");
        self.total_steps = 0;
        let controller = InteractionController::new(level, self.settings.layout.clone());
        self.scene = Scene::Playing(controller);
        SceneTransition::GameStarted { level }
    }

    fn on_completion(&mut self, completion: Completion) -> Option<SceneTransition> {
        match completion {
            Completion::InProgress => None,
            Completion::LevelComplete {
                completed,
                steps,
                next,
            } => {
                self.total_steps += steps;
                Some(SceneTransition::LevelAdvanced {
                    completed,
                    steps,
                    next,
                })
            }
            Completion::GameComplete { level, steps } => {
                self.total_steps += steps;
                info!(total_steps = self.total_steps, "Game won");
                self.scene = Scene::Won(Victory {
                    total_steps: self.total_steps,
                    level,
                });
                Some(SceneTransition::GameWon {
                    total_steps: self.total_steps,
                })
            }
        }
    }
}
