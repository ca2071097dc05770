//! World-space placement of pillars, disks and the restart control.

use crate::disk::Rank;
use crate::geometry::{AaRect, Point};
use crate::level::Level;
use crate::pillar::PillarId;
use serde::{Deserialize, Serialize};

/// Width scale of the largest disk relative to [`Layout::disk_base_width`].
const LARGEST_DISK_SCALE: f32 = 0.7;
/// Width scale lost per rank below the largest disk.
const DISK_SCALE_STEP: f32 = 0.1;

/// Geometry of the playing field.
///
/// Defaults reproduce an 840x480 window with pillars at x = 160, 400
/// and 660.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// World width.
    pub world_width: f32,
    /// World height.
    pub world_height: f32,
    /// Horizontal centre of each pillar, left to right.
    pub pillar_x: [f32; 3],
    /// Vertical centre shared by all pillars.
    pub pillar_center_y: f32,
    /// Half of a pillar's width.
    pub pillar_half_width: f32,
    /// Half of a pillar's height.
    pub pillar_half_height: f32,
    /// Unscaled disk width.
    pub disk_base_width: f32,
    /// Disk height.
    pub disk_height: f32,
    /// Vertical gap between stacked disks.
    pub disk_gap: f32,
    /// Centre height of the bottom disk on a pillar.
    pub base_y: f32,
    /// Half extent of the (square) restart control.
    pub restart_half_extent: f32,
    /// Centre of the restart control.
    pub restart_center: Point,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            world_width: 840.0,
            world_height: 480.0,
            pillar_x: [160.0, 400.0, 660.0],
            pillar_center_y: 200.0,
            pillar_half_width: 12.5,
            pillar_half_height: 125.0,
            disk_base_width: 250.0,
            disk_height: 25.0,
            disk_gap: 5.0,
            base_y: 67.0,
            restart_half_extent: 16.0,
            restart_center: Point::new(40.0, 455.0),
        }
    }
}

impl Layout {
    /// Collision shape of a pillar.
    pub fn pillar_shape(&self, pillar: PillarId) -> AaRect {
        AaRect::new(
            Point::new(self.pillar_x[pillar.index()], self.pillar_center_y),
            self.pillar_half_width,
            self.pillar_half_height,
        )
    }

    /// Width scale of a disk. The largest disk of a level is always drawn
    /// at the same width.
    pub fn disk_scale(&self, rank: Rank, level: Level) -> f32 {
        let below_largest = level.get().saturating_sub(rank.get()) as f32;
        LARGEST_DISK_SCALE - DISK_SCALE_STEP * below_largest
    }

    /// Centre of the disk at `depth` (1 = bottom) on `pillar`.
    pub fn stacked_position(&self, pillar: PillarId, depth: usize) -> Point {
        let above_base = depth.saturating_sub(1) as f32;
        Point::new(
            self.pillar_x[pillar.index()],
            self.base_y + above_base * (self.disk_height + self.disk_gap),
        )
    }

    /// Hit and collision shape of a disk centred at `position`.
    pub fn disk_shape(&self, rank: Rank, level: Level, position: Point) -> AaRect {
        AaRect::new(
            position,
            self.disk_base_width * self.disk_scale(rank, level) * 0.5,
            self.disk_height * 0.5,
        )
    }

    /// Hit region of the restart control.
    pub fn restart_control(&self) -> AaRect {
        AaRect::new(
            self.restart_center,
            self.restart_half_extent,
            self.restart_half_extent,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_grows_upward_from_base() {
        let layout = Layout::default();
        assert_eq!(layout.stacked_position(PillarId::Left, 1), Point::new(160.0, 67.0));
        assert_eq!(layout.stacked_position(PillarId::Right, 3), Point::new(660.0, 127.0));
    }

    #[test]
    fn test_largest_disk_has_fixed_scale() {
        let layout = Layout::default();
        for n in 1..=Level::MAX {
            let level = Level::new(n).unwrap();
            assert!((layout.disk_scale(Rank(n), level) - 0.7).abs() < f32::EPSILON);
        }
        let four = Level::new(4).unwrap();
        assert!((layout.disk_scale(Rank(1), four) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_default_pillars_do_not_touch_neighbouring_disks() {
        let layout = Layout::default();
        let level = Level::new(4).unwrap();
        let widest = layout.disk_shape(Rank(4), level, layout.stacked_position(PillarId::Left, 1));
        assert!(widest.overlaps(&layout.pillar_shape(PillarId::Left)));
        assert!(!widest.overlaps(&layout.pillar_shape(PillarId::Middle)));
    }
}
