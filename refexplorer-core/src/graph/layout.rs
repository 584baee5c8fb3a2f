//! Radial Layout
//!
//! Children of a node are spread over a half circle (π radians) on the
//! parent's side facing away from the root. The angular step is `π / K`
//! for `K` children and the radius is picked so that neighbors on the arc
//! stay at least `height_step` apart:
//!
//! ```text
//! radius = height_step / max(|1 - cos Δ|, |sin Δ|)
//! angle_i = i·Δ + (π - Δ·(K - 1) / 2)
//! ```
//!
//! Screen space is Y-down, so a positive sine moves a child up. Placement is
//! deterministic and O(K); there is no iteration.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::{LayoutConfig, LayoutPolicy};

/// Integer screen-space position of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

/// Places children around their parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RadialLayout {
    config: LayoutConfig,
}

impl RadialLayout {
    /// Create a layout with the given settings.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The settings in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Angular step between neighbors for `child_count` children.
    pub fn delta_angle(child_count: usize) -> f64 {
        PI / child_count.max(1) as f64
    }

    /// Arc radius for `child_count` children.
    pub fn radius(&self, child_count: usize) -> f64 {
        let delta = Self::delta_angle(child_count);
        let spread = (1.0 - delta.cos()).abs().max(delta.sin().abs());
        f64::from(self.config.height_step) / spread
    }

    /// Angle of child `index` out of `child_count`.
    pub fn angle(index: usize, child_count: usize) -> f64 {
        let delta = Self::delta_angle(child_count);
        let last = delta * child_count.saturating_sub(1) as f64;
        index as f64 * delta + (PI - last / 2.0)
    }

    /// Position of child `index` out of `child_count` around `parent`.
    pub fn child_position(&self, parent: Position, index: usize, child_count: usize) -> Position {
        debug_assert!(index < child_count, "child index {index} out of {child_count}");

        let radius = self.radius(child_count);
        let angle = Self::angle(index, child_count);
        let y = f64::from(parent.y) - radius * angle.sin();

        let x = match self.config.policy {
            LayoutPolicy::Stacked => {
                let row = index.min(child_count - index - 1) + 1;
                f64::from(parent.x) - row as f64 * f64::from(self.config.width_step)
            }
            LayoutPolicy::Symmetric => f64::from(parent.x) + radius * angle.cos(),
        };

        Position::new(x.round() as i32, y.round() as i32)
    }

    /// Positions of all `child_count` children around `parent`, in order.
    pub fn child_positions(&self, parent: Position, child_count: usize) -> Vec<Position> {
        (0..child_count)
            .map(|index| self.child_position(parent, index, child_count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn layout(policy: LayoutPolicy) -> RadialLayout {
        RadialLayout::new(LayoutConfig {
            policy,
            ..LayoutConfig::default()
        })
    }

    #[test]
    fn single_child_sits_level_with_parent() {
        let layout = layout(LayoutPolicy::Stacked);
        let parent = Position::new(100, 50);
        let child = layout.child_position(parent, 0, 1);

        assert_eq!(child, Position::new(100 - 256, 50));
        assert!((layout.radius(1) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn two_children_use_step_as_radius() {
        let layout = layout(LayoutPolicy::Symmetric);
        assert!((layout.radius(2) - 400.0).abs() < 1e-9);

        let positions = layout.child_positions(Position::default(), 2);
        // Mirrored above and below the parent, to its left.
        assert_eq!(positions[0].x, positions[1].x);
        assert_eq!(positions[0].y, -positions[1].y);
        assert!(positions[0].x < 0);
    }

    #[test]
    fn siblings_never_collide() {
        for policy in [LayoutPolicy::Stacked, LayoutPolicy::Symmetric] {
            let layout = layout(policy);
            for count in 2..=40 {
                let positions = layout.child_positions(Position::new(-30, 70), count);
                let unique: HashSet<_> = positions.iter().collect();
                assert_eq!(unique.len(), count, "{policy:?} with {count} children");
            }
        }
    }

    #[test]
    fn neighbors_on_the_arc_keep_their_distance() {
        let layout = layout(LayoutPolicy::Symmetric);
        for count in 2..=24 {
            let positions = layout.child_positions(Position::default(), count);
            for pair in positions.windows(2) {
                // Rounding to integer coordinates can shave off at most ~1.5 units.
                assert!(pair[0].distance(pair[1]) >= 400.0 * 2.0 * (PI / count as f64 / 2.0).sin() - 2.0);
            }
        }
    }

    #[test]
    fn distance_grows_with_step() {
        let near = RadialLayout::new(LayoutConfig {
            height_step: 200,
            policy: LayoutPolicy::Symmetric,
            ..LayoutConfig::default()
        });
        let far = RadialLayout::new(LayoutConfig {
            height_step: 400,
            policy: LayoutPolicy::Symmetric,
            ..LayoutConfig::default()
        });

        for count in 1..=10 {
            let origin = Position::default();
            for (a, b) in near
                .child_positions(origin, count)
                .into_iter()
                .zip(far.child_positions(origin, count))
            {
                assert!(origin.distance(a) < origin.distance(b));
            }
        }
    }

    #[test]
    fn stacked_rows_step_outwards() {
        let layout = layout(LayoutPolicy::Stacked);
        let xs: Vec<i32> = layout
            .child_positions(Position::default(), 5)
            .iter()
            .map(|p| p.x)
            .collect();
        assert_eq!(xs, [-256, -512, -768, -512, -256]);
    }
}
