use tracing::{debug, info};

use crate::actor::{Actor, ACTOR_BOUNDING_BOX};
use crate::math::Vec2;

pub const PLAYER_MOVE_SPEED: f32 = 150.0;
pub const PLAYER_SHOOT_COOLDOWN_SECONDS: f32 = 0.5;
pub const PLAYER_MAX_HEALTH: u32 = 100;
pub const PLAYER_LEVEL_CAP: u32 = 5;
pub const PLAYER_INITIAL_MAX_XP: f32 = 100.0;
pub const XP_THRESHOLD_GROWTH: f32 = 1.5;

/// One frame of player intent. `move_x`/`move_y` are raw axis values
/// (typically -1, 0 or 1); `aim` is a world-space point to fire toward,
/// present only on frames where the fire control is active.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerInput {
    pub move_x: f32,
    pub move_y: f32,
    pub aim: Option<Vec2>,
}

#[derive(Debug, Clone)]
pub struct Player {
    actor: Actor,
    shoot_cooldown: f32,
    colliding_with_enemy: bool,
    experience: f32,
    max_experience: f32,
    level: u32,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            actor: Actor::new(position, ACTOR_BOUNDING_BOX, PLAYER_MAX_HEALTH),
            shoot_cooldown: 0.0,
            colliding_with_enemy: false,
            experience: 0.0,
            max_experience: PLAYER_INITIAL_MAX_XP,
            level: 1,
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn is_alive(&self) -> bool {
        self.actor.is_alive()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> f32 {
        self.experience
    }

    pub fn max_experience(&self) -> f32 {
        self.max_experience
    }

    pub fn colliding_with_enemy(&self) -> bool {
        self.colliding_with_enemy
    }

    pub(crate) fn set_colliding_with_enemy(&mut self, colliding: bool) {
        self.colliding_with_enemy = colliding;
    }

    pub(crate) fn teleport(&mut self, position: Vec2) {
        self.actor.set_position(position);
    }

    pub(crate) fn move_by(&mut self, dx: f32, dy: f32) {
        if !self.is_alive() {
            return;
        }
        self.actor.move_by(dx, dy);
    }

    pub fn tick_cooldown(&mut self, dt: f32) {
        if self.shoot_cooldown > 0.0 {
            self.shoot_cooldown -= dt;
        }
    }

    /// Input axes are normalized before scaling, so diagonal movement is
    /// no faster than straight.
    pub fn movement_delta(&self, dt: f32, input: &PlayerInput) -> Vec2 {
        if !self.is_alive() {
            return Vec2::ZERO;
        }
        let direction = Vec2::new(input.move_x, input.move_y).normalized_or_zero();
        Vec2::new(
            direction.x * PLAYER_MOVE_SPEED * dt,
            direction.y * PLAYER_MOVE_SPEED * dt,
        )
    }

    /// Fires toward `target` if the cooldown has elapsed, returning the
    /// unnormalized aim direction. Dead players hold fire.
    pub fn try_shoot(&mut self, target: Vec2) -> Option<Vec2> {
        if !self.is_alive() || self.shoot_cooldown > 0.0 {
            return None;
        }
        self.shoot_cooldown = PLAYER_SHOOT_COOLDOWN_SECONDS;
        let position = self.actor.position();
        debug!(x = target.x, y = target.y, "player shot projectile");
        Some(Vec2::new(target.x - position.x, target.y - position.y))
    }

    /// Returns true exactly when this hit was lethal.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let died = self.actor.take_damage(amount);
        info!(
            amount,
            health = self.actor.current_health(),
            "player took damage"
        );
        died
    }

    pub fn heal(&mut self, amount: u32) {
        self.actor.heal(amount);
    }

    /// Adds experience and returns true if it crossed the threshold.
    /// Leveling resets experience to zero and grows the threshold, so at
    /// most one level is gained per award. Capped at the maximum level.
    pub fn gain_experience(&mut self, amount: f32) -> bool {
        self.experience += amount;
        if self.experience >= self.max_experience && self.level < PLAYER_LEVEL_CAP {
            self.level += 1;
            self.experience = 0.0;
            self.max_experience *= XP_THRESHOLD_GROWTH;
            info!(level = self.level, "player leveled up");
            return true;
        }
        false
    }

    pub(crate) fn restore(
        position: Vec2,
        current_health: u32,
        experience: f32,
        max_experience: f32,
        level: u32,
    ) -> Self {
        let mut player = Self::new(position);
        player.actor.restore_health(current_health);
        player.experience = experience;
        player.max_experience = max_experience;
        player.level = level;
        player
    }
}
