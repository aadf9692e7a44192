use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::actor::{Actor, ACTOR_BOUNDING_BOX};
use crate::math::Vec2;
use crate::movement::MoveResolution;

pub const PATROL_FLIP_SECONDS: f32 = 3.0;
pub const PATROL_SPEED_SCALE: f32 = 0.5;
pub const IDLE_REROLL_SECONDS: f32 = 2.0;
pub const IDLE_SPEED_SCALE: f32 = 0.3;
pub const FLYING_IDLE_SPEED_MULTIPLIER: f32 = 1.5;
pub const CHASE_JITTER_SCALE: f32 = 0.3;
pub const PATROL_SINE_SCALE: f32 = 0.3;
pub const DEATH_ANIMATION_SECONDS: f32 = 0.6;
pub const DEAD_REMOVE_DELAY_SECONDS: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnemyId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Skeleton,
    Zombie,
    Ghost,
    FlyingEye,
    Shroom,
}

/// Constant tuning values for one enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub move_speed: f32,
    pub patrol_radius: f32,
    pub chase_radius: f32,
    pub shoot_interval: f32,
    pub shoot_range: f32,
    pub max_health: u32,
}

const MELEE_PROFILE: EnemyProfile = EnemyProfile {
    move_speed: 50.0,
    patrol_radius: 100.0,
    chase_radius: 150.0,
    shoot_interval: 2.0,
    shoot_range: 200.0,
    max_health: 100,
};

const FLYING_EYE_PROFILE: EnemyProfile = EnemyProfile {
    move_speed: 80.0,
    patrol_radius: 120.0,
    chase_radius: 180.0,
    shoot_interval: 1.5,
    shoot_range: 250.0,
    max_health: 150,
};

const SHROOM_PROFILE: EnemyProfile = EnemyProfile {
    move_speed: 40.0,
    patrol_radius: 80.0,
    chase_radius: 140.0,
    shoot_interval: 2.5,
    shoot_range: 180.0,
    max_health: 200,
};

impl EnemyKind {
    pub fn profile(self) -> EnemyProfile {
        match self {
            Self::Skeleton | Self::Zombie | Self::Ghost => MELEE_PROFILE,
            Self::FlyingEye => FLYING_EYE_PROFILE,
            Self::Shroom => SHROOM_PROFILE,
        }
    }

    /// Ranged kinds fire projectiles; the melee kinds resolve contact
    /// through separation instead.
    pub fn is_ranged(self) -> bool {
        matches!(self, Self::FlyingEye | Self::Shroom)
    }

    /// The flying kind moves erratically: chase jitter, a sine component
    /// while patrolling, and faster idle drift.
    pub fn is_flying(self) -> bool {
        matches!(self, Self::FlyingEye)
    }
}

/// `Attacking` is declared but never entered: melee contact damage goes
/// through the separation resolver, not a dedicated attack state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Idle,
    Patrolling,
    Chasing,
    Attacking,
    Dying,
    Dead,
}

/// Per-frame output of the behavior state machine, before collision
/// resolution. `shoot_at` is the player position to aim at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyDecision {
    pub desired_move: Vec2,
    pub shoot_at: Option<Vec2>,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    actor: Actor,
    state: EnemyState,
    patrol_timer: f32,
    patrol_direction: f32,
    random_move_timer: f32,
    random_direction: Vec2,
    shoot_cooldown: f32,
    dying_timer: f32,
    dead_timer: f32,
    rng: SmallRng,
}

impl Enemy {
    pub fn new(id: EnemyId, kind: EnemyKind, position: Vec2, seed: u64) -> Self {
        debug!(?kind, x = position.x, y = position.y, "enemy created");
        Self {
            id,
            kind,
            actor: Actor::new(position, ACTOR_BOUNDING_BOX, kind.profile().max_health),
            state: EnemyState::Idle,
            patrol_timer: 0.0,
            patrol_direction: 1.0,
            random_move_timer: 0.0,
            random_direction: Vec2::ZERO,
            shoot_cooldown: 0.0,
            dying_timer: 0.0,
            dead_timer: 0.0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn is_alive(&self) -> bool {
        self.actor.is_alive()
    }

    fn random_unit(&mut self) -> f32 {
        self.rng.gen_range(-1.0f32..=1.0)
    }

    /// Runs one frame of the behavior state machine while alive: state
    /// transition from player distance, then the per-state displacement
    /// policy and the shooting decision.
    pub fn update_ai(&mut self, dt: f32, player_position: Vec2) -> EnemyDecision {
        debug_assert!(self.is_alive(), "update_ai called on a dead enemy");
        let profile = self.kind.profile();

        if self.shoot_cooldown > 0.0 {
            self.shoot_cooldown -= dt;
        }

        let position = self.actor.position();
        let distance = position.distance_to(player_position);

        // Chase is checked first and its radius is the larger one in
        // every profile, so the patrol branch is shadowed in practice.
        self.state = if distance <= profile.chase_radius {
            EnemyState::Chasing
        } else if distance <= profile.patrol_radius {
            EnemyState::Patrolling
        } else {
            EnemyState::Idle
        };

        let desired = self.state_displacement(dt, player_position, distance);

        let shoot_at = if self.kind.is_ranged()
            && self.shoot_cooldown <= 0.0
            && distance <= profile.shoot_range
        {
            self.shoot_cooldown = profile.shoot_interval;
            debug!(id = self.id.0, "enemy shot projectile at player");
            Some(player_position)
        } else {
            None
        };

        EnemyDecision {
            desired_move: desired,
            shoot_at,
        }
    }

    fn state_displacement(&mut self, dt: f32, player_position: Vec2, distance: f32) -> Vec2 {
        let profile = self.kind.profile();
        let position = self.actor.position();
        let mut desired = Vec2::ZERO;
        match self.state {
            EnemyState::Chasing => {
                if distance > 0.0 {
                    let step = profile.move_speed * dt;
                    desired.x = (player_position.x - position.x) / distance * step;
                    desired.y = (player_position.y - position.y) / distance * step;
                    if self.kind.is_flying() {
                        desired.x += self.random_unit() * CHASE_JITTER_SCALE * step;
                        desired.y += self.random_unit() * CHASE_JITTER_SCALE * step;
                    }
                }
            }
            EnemyState::Patrolling => {
                self.patrol_timer += dt;
                if self.patrol_timer >= PATROL_FLIP_SECONDS {
                    self.patrol_timer = 0.0;
                    self.patrol_direction = -self.patrol_direction;
                }
                desired.x = self.patrol_direction * profile.move_speed * PATROL_SPEED_SCALE * dt;
                if self.kind.is_flying() {
                    desired.y = (self.patrol_timer * 2.0).sin()
                        * profile.move_speed
                        * PATROL_SINE_SCALE
                        * dt;
                }
            }
            EnemyState::Idle => {
                self.random_move_timer += dt;
                if self.random_move_timer >= IDLE_REROLL_SECONDS {
                    self.random_move_timer = 0.0;
                    self.random_direction =
                        Vec2::new(self.random_unit(), self.random_unit()).normalized_or_zero();
                    debug!(
                        x = self.random_direction.x,
                        y = self.random_direction.y,
                        "enemy new idle direction"
                    );
                }
                let mut scale = profile.move_speed * IDLE_SPEED_SCALE * dt;
                if self.kind.is_flying() {
                    scale *= FLYING_IDLE_SPEED_MULTIPLIER;
                }
                desired.x = self.random_direction.x * scale;
                desired.y = self.random_direction.y * scale;
            }
            EnemyState::Attacking | EnemyState::Dying | EnemyState::Dead => {}
        }
        desired
    }

    /// Wall feedback: a fully blocked patrol step flips the patrol
    /// direction, a fully blocked idle step forces a direction re-roll
    /// on the next evaluation. Chasing has no bounce reaction.
    pub fn react_to_block(&mut self, resolution: MoveResolution) {
        if !resolution.fully_blocked() {
            return;
        }
        match self.state {
            EnemyState::Patrolling => {
                self.patrol_direction = -self.patrol_direction;
                self.patrol_timer = 0.0;
            }
            EnemyState::Idle => {
                self.random_move_timer = IDLE_REROLL_SECONDS;
            }
            _ => {}
        }
    }

    /// No-op once dead, like every other mutation of a corpse.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        if !self.is_alive() {
            return;
        }
        self.actor.move_by(dx, dy);
    }

    /// Returns true exactly when this hit was lethal; the death
    /// sub-machine starts on that same frame.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let died = self.actor.take_damage(amount);
        info!(
            id = self.id.0,
            amount,
            health = self.actor.current_health(),
            max = self.actor.max_health(),
            "enemy took damage"
        );
        if died {
            self.state = EnemyState::Dying;
            self.dying_timer = 0.0;
            warn!(id = self.id.0, "enemy has been defeated");
        }
        died
    }

    pub fn heal(&mut self, amount: u32) {
        self.actor.heal(amount);
    }

    /// Advances the death sub-machine. Returns true on the single frame
    /// the death animation completes (Dying -> Dead).
    pub fn tick_death(&mut self, dt: f32) -> bool {
        match self.state {
            EnemyState::Dying => {
                self.dying_timer += dt;
                if self.dying_timer >= DEATH_ANIMATION_SECONDS {
                    self.state = EnemyState::Dead;
                    self.dead_timer = 0.0;
                    return true;
                }
            }
            EnemyState::Dead => {
                self.dead_timer += dt;
            }
            _ => {}
        }
        false
    }

    /// The corpse stays visible but inert for a fixed delay after the
    /// death animation, then the orchestrator removes it.
    pub fn should_remove(&self) -> bool {
        self.state == EnemyState::Dead && self.dead_timer >= DEAD_REMOVE_DELAY_SECONDS
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        id: EnemyId,
        kind: EnemyKind,
        position: Vec2,
        current_health: u32,
        state: EnemyState,
        dying_timer: f32,
        dead_timer: f32,
        seed: u64,
    ) -> Self {
        let mut enemy = Self::new(id, kind, position, seed);
        enemy.actor.restore_health(current_health);
        enemy.state = state;
        enemy.dying_timer = dying_timer;
        enemy.dead_timer = dead_timer;
        enemy
    }

    pub(crate) fn dying_timer(&self) -> f32 {
        self.dying_timer
    }

    pub(crate) fn dead_timer(&self) -> f32 {
        self.dead_timer
    }
}
