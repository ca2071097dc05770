//! Stateless UI rendering for the towers.
//!
//! The board is drawn on a [`Canvas`] whose bounds are the world itself, so
//! rectangles from the rules crate are painted without any conversion.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout as Split, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        Block, Borders, Clear, Paragraph,
        canvas::{Canvas, Context, Painter, Shape},
    },
};
use strictly_hanoi::{AaRect, Board, DiskId, Layout, Level, Point, Rank, Scene, TransitionStyle};

use super::app::{App, Banner};
use super::intro::{IntroKind, accel_decel};

const BACKGROUND: (u8, u8, u8) = (222, 200, 158);
const INK: (u8, u8, u8) = (60, 40, 20);
const PILLAR: (u8, u8, u8) = (120, 80, 40);
const RESTART: (u8, u8, u8) = (170, 60, 50);
const DISK_COLORS: [(u8, u8, u8); 4] = [
    (200, 60, 60),
    (60, 140, 200),
    (80, 170, 90),
    (230, 160, 40),
];

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Mixes `fg` over `bg` at the given opacity.
fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), opacity: f32) -> Color {
    let a = opacity.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (f32::from(b) + (f32::from(f) - f32::from(b)) * a).round() as u8;
    Color::Rgb(mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}

fn lighten(color: (u8, u8, u8)) -> (u8, u8, u8) {
    let up = |c: u8| c.saturating_add((255 - c) / 2);
    (up(color.0), up(color.1), up(color.2))
}

fn disk_color(rank: Rank) -> (u8, u8, u8) {
    let index = usize::from(rank.get().saturating_sub(1)) % DISK_COLORS.len();
    DISK_COLORS[index]
}

/// A solid axis-aligned rectangle in world coordinates.
struct FilledRect {
    rect: AaRect,
    color: Color,
    world: (f32, f32),
}

impl Shape for FilledRect {
    fn draw(&self, painter: &mut Painter) {
        let left = self.rect.left().max(0.0);
        let right = self.rect.right().min(self.world.0);
        let bottom = self.rect.bottom().max(0.0);
        let top = self.rect.top().min(self.world.1);
        if left > right || bottom > top {
            return;
        }
        let Some((x0, y0)) = painter.get_point(f64::from(left), f64::from(top)) else {
            return;
        };
        let Some((x1, y1)) = painter.get_point(f64::from(right), f64::from(bottom)) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                painter.paint(x, y, self.color);
            }
        }
    }
}

/// Geometry shared by the scene painters.
struct World {
    width: f32,
    height: f32,
    cell_width: f32,
}

impl World {
    fn new(layout: &Layout, area: Rect) -> Self {
        Self {
            width: layout.world_width,
            height: layout.world_height,
            cell_width: layout.world_width / f32::from(area.width.max(1)),
        }
    }

    fn rect(&self, rect: AaRect, color: Color) -> FilledRect {
        FilledRect {
            rect,
            color,
            world: (self.width, self.height),
        }
    }

    /// Prints `text` centred on `at`.
    fn label(&self, ctx: &mut Context, at: Point, text: String, style: Style) {
        let half = text.chars().count() as f32 * self.cell_width / 2.0;
        ctx.print(
            f64::from(at.x - half),
            f64::from(at.y),
            Span::styled(text, style),
        );
    }

    fn canvas<F>(&self, paint: F) -> Canvas<'_, F>
    where
        F: Fn(&mut Context),
    {
        Canvas::default()
            .background_color(rgb(BACKGROUND))
            .marker(Marker::HalfBlock)
            .x_bounds([0.0, f64::from(self.width)])
            .y_bounds([0.0, f64::from(self.height)])
            .paint(paint)
    }
}

/// Renders the whole screen and returns the area the world occupies.
pub fn draw(frame: &mut Frame, app: &App, layout: &Layout) -> Rect {
    let area = frame.area();

    let chunks = Split::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(8),    // World
            Constraint::Length(1), // Status
        ])
        .split(area);

    let title = Paragraph::new("Strictly Towers")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let world_area = chunks[1];
    let world = World::new(layout, world_area);
    match app.flow().scene() {
        Scene::Intro(intro) => {
            draw_intro(frame, world_area, &world, app, layout, intro.elapsed())
        }
        Scene::Playing(controller) => {
            draw_board(frame, world_area, &world, controller.board(), app)
        }
        Scene::Won(victory) => draw_victory(
            frame,
            world_area,
            &world,
            victory.total_steps,
            victory.level,
        ),
    }

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    frame.render_widget(status, chunks[2]);

    if let Some(banner) = app.banner() {
        draw_banner(frame, world_area, banner);
    }

    world_area
}

fn draw_intro(
    frame: &mut Frame,
    area: Rect,
    world: &World,
    app: &App,
    layout: &Layout,
    elapsed: std::time::Duration,
) {
    let elements = app.intro().frame(elapsed);
    let center_x = world.width / 2.0;
    let canvas = world.canvas(|ctx| {
        for (i, element) in elements.iter().enumerate() {
            let at = Point::new(center_x, element.y);
            match element.element.kind {
                IntroKind::Plate => {
                    let half_width = layout.disk_base_width * element.element.scale / 2.0;
                    let rect = AaRect::new(at, half_width, layout.disk_height / 2.0);
                    let color = DISK_COLORS[(DISK_COLORS.len() - 1 - i) % DISK_COLORS.len()];
                    ctx.draw(&world.rect(rect, blend(color, BACKGROUND, element.opacity)));
                }
                IntroKind::Title => {
                    ctx.layer();
                    let style = Style::default()
                        .fg(blend(INK, BACKGROUND, element.opacity))
                        .add_modifier(Modifier::BOLD);
                    world.label(ctx, at, "TOWER OF HANOI".to_string(), style);
                    let hint = Point::new(center_x, element.y - 40.0);
                    let plain = style.remove_modifier(Modifier::BOLD);
                    world.label(ctx, hint, "press any key".to_string(), plain);
                }
            }
        }
    });
    frame.render_widget(canvas, area);
}

fn draw_board(frame: &mut Frame, area: Rect, world: &World, board: &Board, app: &App) {
    let layout = board.layout();
    let highlight: Option<DiskId> = board
        .selection()
        .map(|s| s.disk())
        .or_else(|| app.picked().and_then(|p| board.pillar(p).top()));
    let ink = Style::default().fg(rgb(INK)).add_modifier(Modifier::BOLD);

    let canvas = world.canvas(|ctx| {
        for pillar in board.pillars() {
            let color = if app.picked() == Some(pillar.id()) {
                lighten(PILLAR)
            } else {
                PILLAR
            };
            ctx.draw(&world.rect(pillar.shape(), rgb(color)));
        }

        // Held disks are drawn last so they pass over the others.
        let mut disks: Vec<_> = board.disks().iter().collect();
        disks.sort_by_key(|d| Some(d.id()) == highlight);
        for disk in &disks {
            let Some(shape) = board.disk_shape(disk.id()) else {
                continue;
            };
            let base = disk_color(disk.rank());
            let color = if Some(disk.id()) == highlight {
                lighten(base)
            } else {
                base
            };
            ctx.draw(&world.rect(shape, rgb(color)));
        }

        let restart = layout.restart_control();
        ctx.draw(&world.rect(restart, rgb(RESTART)));

        ctx.layer();
        for disk in &disks {
            world.label(ctx, disk.position(), disk.rank().to_string(), ink);
        }
        for pillar in board.pillars() {
            let foot = Point::new(pillar.shape().center.x, pillar.shape().bottom() - 20.0);
            world.label(ctx, foot, pillar.id().slot().to_string(), ink);
        }
        world.label(ctx, restart.center, "R".to_string(), ink);

        let top = world.height - 25.0;
        world.label(
            ctx,
            Point::new(world.width / 2.0, top),
            format!("Level {}/{}", board.level(), Level::MAX),
            ink,
        );
        world.label(
            ctx,
            Point::new(world.width - 100.0, top),
            format!("Steps: {}", board.step()),
            ink,
        );
    });
    frame.render_widget(canvas, area);
}

fn draw_victory(frame: &mut Frame, area: Rect, world: &World, total_steps: u32, level: Level) {
    let ink = Style::default().fg(rgb(INK)).add_modifier(Modifier::BOLD);
    let canvas = world.canvas(|ctx| {
        let center = Point::new(world.width / 2.0, world.height / 2.0 + 30.0);
        world.label(ctx, center, "You win!".to_string(), ink);
        world.label(
            ctx,
            Point::new(center.x, center.y - 50.0),
            format!("All {} levels solved in {} steps", level, total_steps),
            ink.remove_modifier(Modifier::BOLD),
        );
    });
    frame.render_widget(canvas, area);
}

fn draw_banner(frame: &mut Frame, area: Rect, banner: &Banner) {
    let progress = banner.progress();
    let full_width = (banner.text.chars().count() as u16 + 4).min(area.width);
    let (width, opacity) = match banner.style {
        Some(TransitionStyle::RotoZoom) => {
            let zoom = accel_decel(progress * 2.0);
            let width = (f32::from(full_width) * zoom).round() as u16;
            (width.max(4).min(full_width), 1.0)
        }
        Some(TransitionStyle::Fade) | None => {
            let fade_in = accel_decel(progress * 4.0);
            let fade_out = accel_decel((1.0 - progress) * 2.0);
            (full_width, fade_in.min(fade_out))
        }
    };
    let rect = center_rect(area, width, 3);
    let text_color = blend(INK, BACKGROUND, opacity);

    frame.render_widget(Clear, rect);
    let paragraph = Paragraph::new(banner.text.as_str())
        .style(Style::default().fg(text_color).bg(rgb(BACKGROUND)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(text_color)),
        );
    frame.render_widget(paragraph, rect);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
