use tracing::debug;

use crate::math::{Aabb, Vec2};

/// Constant box shape shared by the player and every enemy kind.
pub const ACTOR_BOUNDING_BOX: BoundingBox = BoundingBox {
    width: 16.0,
    height: 16.0,
    offset_x: 8.0,
    offset_y: 8.0,
};

/// Box dimensions plus the offset from the actor's center point. The box
/// is not required to be centered; the offset places it (e.g. at the
/// actor's feet).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Shared shape of every simulated agent: position, derived bounding box,
/// clamped health, facing, and an alive flag that flips exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    position: Vec2,
    bounds: BoundingBox,
    current_health: u32,
    max_health: u32,
    facing_right: bool,
    alive: bool,
}

impl Actor {
    pub fn new(position: Vec2, bounds: BoundingBox, max_health: u32) -> Self {
        Self {
            position,
            bounds,
            current_health: max_health,
            max_health,
            facing_right: true,
            alive: true,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn left(&self) -> f32 {
        self.position.x - self.bounds.offset_x
    }

    pub fn right(&self) -> f32 {
        self.left() + self.bounds.width
    }

    pub fn top(&self) -> f32 {
        self.position.y - self.bounds.offset_y
    }

    pub fn bottom(&self) -> f32 {
        self.top() + self.bounds.height
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            left: self.left(),
            right: self.right(),
            top: self.top(),
            bottom: self.bottom(),
        }
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    /// Applies a displacement and updates facing from the sign of the
    /// last nonzero horizontal component.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.position.x += dx;
        self.position.y += dy;
        if dx != 0.0 {
            self.facing_right = dx > 0.0;
        }
    }

    /// Returns true exactly when this call flipped `alive` to false.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.current_health = self.current_health.saturating_sub(amount);
        debug!(
            amount,
            health = self.current_health,
            max = self.max_health,
            "actor took damage"
        );
        if self.current_health == 0 && self.alive {
            self.alive = false;
            return true;
        }
        false
    }

    /// Clamped to max health. Healing never resurrects.
    pub fn heal(&mut self, amount: u32) {
        self.current_health = (self.current_health + amount).min(self.max_health);
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub(crate) fn restore_health(&mut self, current: u32) {
        self.current_health = current.min(self.max_health);
        self.alive = self.current_health > 0;
    }
}
