//! Application state and logic.

use std::time::Duration;
use strictly_hanoi::{
    FlowSettings, PillarId, Point, PointerEvent, Relocation, Scene, SceneFlow, SceneTransition,
    TransitionStyle,
};
use tracing::{debug, info, instrument};

use super::input::Command;
use super::intro::IntroAnimation;
use super::viewport::Viewport;

/// A transition banner on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    /// Text shown.
    pub text: String,
    /// How the banner is animated.
    pub style: Option<TransitionStyle>,
    /// Total time on screen.
    pub duration: Duration,
    /// Time left on screen.
    pub remaining: Duration,
}

impl Banner {
    /// Fraction of the banner's time already spent, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        1.0 - self.remaining.as_secs_f32() / self.duration.as_secs_f32()
    }
}

/// Main application state.
pub struct App {
    flow: SceneFlow,
    intro: IntroAnimation,
    viewport: Viewport,
    banner_duration: Duration,
    banner: Option<Banner>,
    picked: Option<PillarId>,
    last_pointer: Option<Point>,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(settings: FlowSettings, banner_duration: Duration) -> Self {
        let viewport = Viewport::new(
            Default::default(),
            settings.layout.world_width,
            settings.layout.world_height,
        );
        let mut app = Self {
            flow: SceneFlow::new(settings),
            intro: IntroAnimation::default(),
            viewport,
            banner_duration,
            banner: None,
            picked: None,
            last_pointer: None,
            status_message: String::new(),
            should_quit: false,
        };
        if app.flow.controller().is_some() {
            app.status_message = playing_hint().to_string();
        }
        app
    }

    /// The scene flow.
    pub fn flow(&self) -> &SceneFlow {
        &self.flow
    }

    /// The intro animation.
    pub fn intro(&self) -> &IntroAnimation {
        &self.intro
    }

    /// The board viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable board viewport, updated after each draw.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The banner on screen, if any.
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Pillar picked with the keyboard, waiting for a destination.
    pub fn picked(&self) -> Option<PillarId> {
        self.picked
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles one decoded input command.
    #[instrument(skip(self))]
    pub fn handle(&mut self, command: Command) {
        if command == Command::Quit {
            info!("User quit");
            self.should_quit = true;
            return;
        }

        if matches!(self.flow.scene(), Scene::Intro(_)) {
            // Only key presses end the intro.
            if matches!(
                command,
                Command::Press(_) | Command::Drag(_) | Command::Release(_)
            ) {
                return;
            }
            if let Some(transition) = self.flow.key_pressed() {
                self.on_transition(transition);
            }
            return;
        }

        match command {
            Command::Quit | Command::OtherKey => {}
            Command::Restart => {
                self.picked = None;
                if let Some(transition) = self.flow.restart() {
                    self.on_transition(transition);
                }
            }
            Command::Pillar(pillar) => self.pillar_key(pillar),
            Command::Press(at) => {
                self.picked = None;
                self.last_pointer = Some(at);
                self.pointer(PointerEvent::Press(at));
            }
            Command::Drag(at) => {
                let Some(last) = self.last_pointer.replace(at) else {
                    return;
                };
                let delta = Point::new(at.x - last.x, at.y - last.y);
                self.pointer(PointerEvent::Drag { at, delta });
            }
            Command::Release(at) => {
                self.last_pointer = None;
                self.pointer(PointerEvent::Release(at));
            }
        }
    }

    /// Advances timers by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(banner) = &mut self.banner {
            banner.remaining = banner.remaining.saturating_sub(dt);
            if banner.remaining.is_zero() {
                self.banner = None;
            }
        }
        if let Some(transition) = self.flow.tick(dt) {
            self.on_transition(transition);
        }
    }

    fn pointer(&mut self, event: PointerEvent) {
        if let Some(transition) = self.flow.pointer(event) {
            self.on_transition(transition);
        }
    }

    fn pillar_key(&mut self, pillar: PillarId) {
        let Some(controller) = self.flow.controller() else {
            return;
        };

        let Some(from) = self.picked.take() else {
            if controller.board().pillar(pillar).is_empty() {
                self.status_message = format!("{} is empty", pillar);
            } else {
                debug!(%pillar, "Picked pillar");
                self.picked = Some(pillar);
                self.status_message = format!("Picked {}, choose where to drop", pillar);
            }
            return;
        };

        match self.flow.move_top(Relocation::new(from, pillar)) {
            Ok(transition) => {
                self.status_message = playing_hint().to_string();
                if let Some(transition) = transition {
                    self.on_transition(transition);
                }
            }
            Err(e) => {
                debug!(error = %e, "Keyboard move rejected");
                self.status_message = e.to_string();
            }
        }
    }

    fn on_transition(&mut self, transition: SceneTransition) {
        info!(?transition, "Scene transition");
        let text = match transition {
            SceneTransition::GameStarted { level } => format!("Level {}", level),
            SceneTransition::LevelAdvanced {
                completed,
                steps,
                next,
            } => format!("Level {} solved in {} steps. Level {}", completed, steps, next),
            SceneTransition::LevelRestarted { level } => {
                self.status_message = format!("Level {} restarted", level);
                return;
            }
            SceneTransition::GameWon { total_steps } => {
                format!("You win! {} steps", total_steps)
            }
        };
        self.picked = None;
        self.last_pointer = None;
        self.status_message = match transition {
            SceneTransition::GameWon { .. } => "Press 'q' to quit.".to_string(),
            _ => playing_hint().to_string(),
        };
        self.banner = Some(Banner {
            text,
            style: transition.style(),
            duration: self.banner_duration,
            remaining: self.banner_duration,
        });
    }
}

fn playing_hint() -> &'static str {
    "Drag disks with the mouse, or press 1-3 twice. 'r' restarts, 'q' quits."
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_hanoi::Level;

    fn playing_app(level: u8) -> App {
        let settings = FlowSettings {
            skip_intro: true,
            start_level: Level::new(level).unwrap(),
            ..FlowSettings::default()
        };
        App::new(settings, Duration::from_secs(1))
    }

    #[test]
    fn test_any_key_leaves_intro() {
        let mut app = App::new(FlowSettings::default(), Duration::from_secs(1));
        app.handle(Command::OtherKey);
        assert!(app.flow().controller().is_some());
        assert_eq!(app.banner().map(|b| b.text.as_str()), Some("Level 1"));
    }

    #[test]
    fn test_mouse_press_does_not_skip_intro() {
        let mut app = App::new(FlowSettings::default(), Duration::from_secs(1));
        app.handle(Command::Press(Point::new(420.0, 240.0)));
        assert!(matches!(app.flow().scene(), Scene::Intro(_)));
        assert!(app.banner().is_none());
    }

    #[test]
    fn test_two_digits_move_a_disk() {
        let mut app = playing_app(2);
        app.handle(Command::Pillar(PillarId::Left));
        assert_eq!(app.picked(), Some(PillarId::Left));
        app.handle(Command::Pillar(PillarId::Middle));
        assert_eq!(app.picked(), None);

        let board = app.flow().controller().unwrap().board();
        assert_eq!(board.step(), 1);
        assert_eq!(board.pillar(PillarId::Middle).len(), 1);
    }

    #[test]
    fn test_illegal_keyboard_move_reports_error() {
        let mut app = playing_app(2);
        app.handle(Command::Pillar(PillarId::Left));
        app.handle(Command::Pillar(PillarId::Middle));
        app.handle(Command::Pillar(PillarId::Left));
        app.handle(Command::Pillar(PillarId::Middle));

        let board = app.flow().controller().unwrap().board();
        assert_eq!(board.step(), 1);
        assert!(app.status_message().contains("cannot sit on"));
    }

    #[test]
    fn test_picking_empty_pillar_does_nothing() {
        let mut app = playing_app(1);
        app.handle(Command::Pillar(PillarId::Right));
        assert_eq!(app.picked(), None);
    }

    #[test]
    fn test_level_advance_shows_banner_until_it_expires() {
        let mut app = playing_app(1);
        app.handle(Command::Pillar(PillarId::Left));
        app.handle(Command::Pillar(PillarId::Right));
        let banner = app.banner().unwrap();
        assert_eq!(banner.style, Some(TransitionStyle::Fade));

        app.tick(Duration::from_millis(600));
        assert!(app.banner().is_some());
        app.tick(Duration::from_millis(600));
        assert!(app.banner().is_none());
    }

    #[test]
    fn test_quit() {
        let mut app = playing_app(1);
        app.handle(Command::Quit);
        assert!(app.should_quit());
    }
}
