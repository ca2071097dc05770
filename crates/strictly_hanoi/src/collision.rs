//! Spatial queries against the registered pillars.

use crate::geometry::AaRect;
use crate::pillar::PillarId;
use tracing::{debug, instrument};

/// A spatial index the controller registers pillars into.
///
/// Queries return matches in registration order.
pub trait CollisionIndex {
    /// Registers (or replaces) the shape of a pillar.
    fn register(&mut self, pillar: PillarId, shape: AaRect);

    /// Pillars whose shape overlaps `shape`.
    fn colliding_with(&self, shape: &AaRect) -> Vec<PillarId>;

    /// The single pillar a dropped shape lands on.
    ///
    /// When several pillars overlap, the one whose centre is horizontally
    /// nearest the shape's centre wins; equal distances go to the lower slot.
    fn landing_pillar(&self, shape: &AaRect) -> Option<PillarId>;
}

/// Linear-scan collision index. Three pillars do not warrant a grid.
#[derive(Debug, Clone, Default)]
pub struct CollisionManager {
    entries: Vec<(PillarId, AaRect)>,
}

impl CollisionManager {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered pillars.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CollisionIndex for CollisionManager {
    #[instrument(skip(self))]
    fn register(&mut self, pillar: PillarId, shape: AaRect) {
        match self.entries.iter_mut().find(|(id, _)| *id == pillar) {
            Some(entry) => entry.1 = shape,
            None => self.entries.push((pillar, shape)),
        }
    }

    fn colliding_with(&self, shape: &AaRect) -> Vec<PillarId> {
        self.entries
            .iter()
            .filter(|(_, registered)| registered.overlaps(shape))
            .map(|(id, _)| *id)
            .collect()
    }

    #[instrument(skip(self))]
    fn landing_pillar(&self, shape: &AaRect) -> Option<PillarId> {
        let candidates = self.colliding_with(shape);
        let landing = self
            .entries
            .iter()
            .filter(|(id, _)| candidates.contains(id))
            .min_by(|(a_id, a), (b_id, b)| {
                a.horizontal_distance(shape)
                    .total_cmp(&b.horizontal_distance(shape))
                    .then(a_id.cmp(b_id))
            })
            .map(|(id, _)| *id);
        debug!(?candidates, ?landing, "Landing pillar resolved");
        landing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Layout, Point};

    fn manager(layout: &Layout) -> CollisionManager {
        let mut manager = CollisionManager::new();
        for id in PillarId::ALL {
            manager.register(id, layout.pillar_shape(id));
        }
        manager
    }

    #[test]
    fn test_register_replaces_existing() {
        let layout = Layout::default();
        let mut m = manager(&layout);
        m.register(PillarId::Left, layout.pillar_shape(PillarId::Middle));
        assert_eq!(m.len(), 3);
        let spot = AaRect::new(Point::new(400.0, 200.0), 1.0, 1.0);
        assert_eq!(m.colliding_with(&spot), vec![PillarId::Left, PillarId::Middle]);
    }

    #[test]
    fn test_overlap_queries() {
        let layout = Layout::default();
        let m = manager(&layout);
        let gap = AaRect::new(Point::new(280.0, 200.0), 50.0, 12.5);
        assert!(m.colliding_with(&gap).is_empty());

        let disk = AaRect::new(Point::new(420.0, 250.0), 50.0, 12.5);
        assert_eq!(m.colliding_with(&disk), vec![PillarId::Middle]);
        assert_eq!(m.landing_pillar(&disk), Some(PillarId::Middle));
    }

    #[test]
    fn test_nothing_below_drop() {
        let m = manager(&Layout::default());
        let disk = AaRect::new(Point::new(400.0, 420.0), 50.0, 12.5);
        assert_eq!(m.landing_pillar(&disk), None);
    }

    #[test]
    fn test_multi_overlap_prefers_nearest_centre() {
        let layout = Layout {
            pillar_x: [100.0, 200.0, 300.0],
            ..Layout::default()
        };
        let m = manager(&layout);

        let wide = AaRect::new(Point::new(190.0, 200.0), 150.0, 12.5);
        assert_eq!(m.colliding_with(&wide).len(), 3);
        assert_eq!(m.landing_pillar(&wide), Some(PillarId::Middle));

        let between = AaRect::new(Point::new(150.0, 200.0), 80.0, 12.5);
        assert_eq!(m.landing_pillar(&between), Some(PillarId::Left));
    }
}
