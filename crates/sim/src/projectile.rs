use tracing::debug;

use crate::enemy::EnemyKind;
use crate::grid::CollisionGrid;
use crate::math::Vec2;

pub const PROJECTILE_SPEED: f32 = 200.0;
pub const PROJECTILE_RADIUS: f32 = 4.0;
pub const PROJECTILE_LIFETIME_SECONDS: f32 = 5.0;

/// Who fired the projectile. Governs which actor set the combat resolver
/// tests it against, and which sprite row presentation selects; it never
/// changes the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileSource {
    Player,
    Enemy(EnemyKind),
}

impl ProjectileSource {
    pub fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }

    /// Row index into the shared projectile sheet.
    pub fn sprite_row(self) -> u32 {
        match self {
            Self::Player => 0,
            Self::Enemy(EnemyKind::FlyingEye) => 1,
            Self::Enemy(EnemyKind::Shroom) => 2,
            Self::Enemy(_) => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    position: Vec2,
    direction: Vec2,
    source: ProjectileSource,
    elapsed_lifetime: f32,
    active: bool,
}

impl Projectile {
    /// Direction is normalized at construction; a zero direction is left
    /// as zero, producing a projectile that expires in place.
    pub fn new(position: Vec2, direction: Vec2, source: ProjectileSource) -> Self {
        Self {
            position,
            direction: direction.normalized_or_zero(),
            source,
            elapsed_lifetime: 0.0,
            active: true,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn source(&self) -> ProjectileSource {
        self.source
    }

    pub fn radius(&self) -> f32 {
        PROJECTILE_RADIUS
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Accumulates lifetime (expiring on the threshold), then advances
    /// along the straight-line path. Inactive projectiles are no-ops.
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.elapsed_lifetime += dt;
        if self.elapsed_lifetime >= PROJECTILE_LIFETIME_SECONDS {
            self.active = false;
            debug!(
                elapsed = self.elapsed_lifetime,
                "projectile expired by lifetime"
            );
            return;
        }
        self.position.x += self.direction.x * PROJECTILE_SPEED * dt;
        self.position.y += self.direction.y * PROJECTILE_SPEED * dt;
    }

    /// Circle-circle test against a target point. Pure query.
    pub fn hits_circle(&self, target: Vec2, target_radius: f32) -> bool {
        if !self.active {
            return false;
        }
        self.position.distance_to(target) <= PROJECTILE_RADIUS + target_radius
    }

    /// Single-point tile lookup at the projectile's position. Pure query.
    pub fn hits_wall(&self, grid: &CollisionGrid) -> bool {
        if !self.active {
            return false;
        }
        grid.is_solid_at_world(self.position.x, self.position.y)
    }

    pub(crate) fn restore(
        position: Vec2,
        direction: Vec2,
        source: ProjectileSource,
        elapsed_lifetime: f32,
    ) -> Self {
        Self {
            position,
            direction: direction.normalized_or_zero(),
            source,
            elapsed_lifetime,
            active: true,
        }
    }

    pub(crate) fn elapsed_lifetime(&self) -> f32 {
        self.elapsed_lifetime
    }
}
