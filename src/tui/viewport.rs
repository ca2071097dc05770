//! Mapping between terminal cells and world coordinates.

use ratatui::layout::Rect;
use strictly_hanoi::Point;

/// The terminal area the world is drawn into.
///
/// The canvas stretches the whole world over `area`, so each cell covers
/// `world_width / area.width` units across and `world_height / area.height`
/// units down. Rows grow downward while world `y` grows upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    area: Rect,
    world_width: f32,
    world_height: f32,
}

impl Viewport {
    /// Creates a viewport over `area` for a world of the given size.
    pub fn new(area: Rect, world_width: f32, world_height: f32) -> Self {
        Self {
            area,
            world_width,
            world_height,
        }
    }

    /// The terminal area.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Points the viewport at a new area after a resize.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// World point at the centre of the cell, or `None` outside the area.
    pub fn to_world(&self, column: u16, row: u16) -> Option<Point> {
        if self.area.width == 0 || self.area.height == 0 {
            return None;
        }
        let inside_x = column >= self.area.x && column < self.area.x + self.area.width;
        let inside_y = row >= self.area.y && row < self.area.y + self.area.height;
        if !inside_x || !inside_y {
            return None;
        }

        let cell_w = self.world_width / f32::from(self.area.width);
        let cell_h = self.world_height / f32::from(self.area.height);
        let x = (f32::from(column - self.area.x) + 0.5) * cell_w;
        let y = self.world_height - (f32::from(row - self.area.y) + 0.5) * cell_h;
        Some(Point::new(x, y))
    }

    /// Like [`Viewport::to_world`], but clamps positions outside the area
    /// to its edge. Drags keep following the pointer past the border.
    pub fn to_world_clamped(&self, column: u16, row: u16) -> Option<Point> {
        if self.area.width == 0 || self.area.height == 0 {
            return None;
        }
        let column = column.clamp(self.area.x, self.area.x + self.area.width - 1);
        let row = row.clamp(self.area.y, self.area.y + self.area.height - 1);
        self.to_world(column, row)
    }
}
