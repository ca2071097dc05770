//! Terminal UI for Strictly Towers

mod app;
mod input;
mod intro;
mod ui;
mod viewport;

pub use app::{App, Banner};
pub use input::{Command, key_command, mouse_command};
pub use intro::{IntroAnimation, IntroElement, IntroFrame, IntroKind, accel_decel};
pub use viewport::Viewport;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use strictly_hanoi::Layout;
use tracing::{debug, error, info, instrument};

use crate::config::GameConfig;

/// Run the terminal game
pub async fn run_tui(config: GameConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,strictly_hanoi=debug")
            }),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(start_level = config.start_level(), "Starting Strictly Towers TUI");

    let settings = config.flow_settings()?;
    let layout = settings.layout.clone();
    let mut app = App::new(settings, config.transition());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, &mut app, &layout, config.tick()).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draw, drain input, advance timers, repeat.
#[instrument(skip_all, fields(tick_millis = tick.as_millis() as u64))]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    layout: &Layout,
    tick: Duration,
) -> Result<()> {
    info!("Starting game loop");
    let mut last_frame = Instant::now();

    loop {
        let mut world_area = app.viewport().area();
        terminal.draw(|f| {
            world_area = ui::draw(f, &*app, layout);
        })?;
        app.viewport_mut().set_area(world_area);

        while event::poll(Duration::ZERO)? {
            let command = match event::read()? {
                Event::Key(key) => key_command(key),
                Event::Mouse(mouse) => mouse_command(mouse, app.viewport()),
                _ => None,
            };
            if let Some(command) = command {
                debug!(?command, "Input");
                app.handle(command);
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        let now = Instant::now();
        app.tick(now - last_frame);
        last_frame = now;

        tokio::time::sleep(tick).await;
    }
}
