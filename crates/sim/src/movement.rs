use crate::grid::CollisionGrid;
use crate::math::{Aabb, Vec2};

/// Inset applied to the trailing corner of each leading-edge test so an
/// actor flush against a wall on one axis can still slide along it.
const EDGE_INSET: f32 = 1.0;

/// Outcome of resolving a desired displacement against the tile grid.
/// A blocked flag is only set when the axis had nonzero desired motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResolution {
    pub delta: Vec2,
    pub blocked_x: bool,
    pub blocked_y: bool,
}

impl MoveResolution {
    /// Both axes wanted to move and neither was allowed to.
    pub fn fully_blocked(&self) -> bool {
        self.blocked_x && self.blocked_y
    }
}

/// Tests a desired displacement one axis at a time, so a diagonal move
/// with one blocked axis degrades to a slide instead of a full stop.
///
/// Each axis tests the grid under the leading edge (the edge the motion
/// is toward) at both of that edge's corners, with the trailing corner
/// pulled in by [`EDGE_INSET`].
pub fn resolve_move(grid: &CollisionGrid, rect: Aabb, desired: Vec2) -> MoveResolution {
    let mut blocked_x = false;
    if desired.x != 0.0 {
        let test_x = if desired.x > 0.0 {
            rect.right + desired.x
        } else {
            rect.left + desired.x
        };
        if grid.is_solid_at_world(test_x, rect.top)
            || grid.is_solid_at_world(test_x, rect.bottom - EDGE_INSET)
        {
            blocked_x = true;
        }
    }

    let mut blocked_y = false;
    if desired.y != 0.0 {
        let test_y = if desired.y > 0.0 {
            rect.bottom + desired.y
        } else {
            rect.top + desired.y
        };
        if grid.is_solid_at_world(rect.left, test_y)
            || grid.is_solid_at_world(rect.right - EDGE_INSET, test_y)
        {
            blocked_y = true;
        }
    }

    MoveResolution {
        delta: Vec2 {
            x: if blocked_x { 0.0 } else { desired.x },
            y: if blocked_y { 0.0 } else { desired.y },
        },
        blocked_x,
        blocked_y,
    }
}
