//! Serde mirror types for persisting and restoring a running world.
//!
//! The live types keep private fields and non-serializable state (RNG
//! streams), so saving goes through plain `Saved*` structs. Enemy RNG
//! streams are reseeded from the world seed on restore, so a restored
//! world is deterministic but not a bitwise continuation of the saved
//! one.

use serde::{Deserialize, Serialize};

use crate::enemy::{Enemy, EnemyId, EnemyKind, EnemyState};
use crate::grid::CollisionGrid;
use crate::math::Vec2;
use crate::player::Player;
use crate::projectile::{Projectile, ProjectileSource};
use crate::world::{EnemySpawn, World};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedVec2 {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for SavedVec2 {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<SavedVec2> for Vec2 {
    fn from(v: SavedVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavedEnemyKind {
    Skeleton,
    Zombie,
    Ghost,
    FlyingEye,
    Shroom,
}

impl From<EnemyKind> for SavedEnemyKind {
    fn from(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Skeleton => Self::Skeleton,
            EnemyKind::Zombie => Self::Zombie,
            EnemyKind::Ghost => Self::Ghost,
            EnemyKind::FlyingEye => Self::FlyingEye,
            EnemyKind::Shroom => Self::Shroom,
        }
    }
}

impl From<SavedEnemyKind> for EnemyKind {
    fn from(kind: SavedEnemyKind) -> Self {
        match kind {
            SavedEnemyKind::Skeleton => Self::Skeleton,
            SavedEnemyKind::Zombie => Self::Zombie,
            SavedEnemyKind::Ghost => Self::Ghost,
            SavedEnemyKind::FlyingEye => Self::FlyingEye,
            SavedEnemyKind::Shroom => Self::Shroom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavedEnemyState {
    Idle,
    Patrolling,
    Chasing,
    Attacking,
    Dying,
    Dead,
}

impl From<EnemyState> for SavedEnemyState {
    fn from(state: EnemyState) -> Self {
        match state {
            EnemyState::Idle => Self::Idle,
            EnemyState::Patrolling => Self::Patrolling,
            EnemyState::Chasing => Self::Chasing,
            EnemyState::Attacking => Self::Attacking,
            EnemyState::Dying => Self::Dying,
            EnemyState::Dead => Self::Dead,
        }
    }
}

impl From<SavedEnemyState> for EnemyState {
    fn from(state: SavedEnemyState) -> Self {
        match state {
            SavedEnemyState::Idle => Self::Idle,
            SavedEnemyState::Patrolling => Self::Patrolling,
            SavedEnemyState::Chasing => Self::Chasing,
            SavedEnemyState::Attacking => Self::Attacking,
            SavedEnemyState::Dying => Self::Dying,
            SavedEnemyState::Dead => Self::Dead,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavedProjectileSource {
    Player,
    Enemy(SavedEnemyKind),
}

impl From<ProjectileSource> for SavedProjectileSource {
    fn from(source: ProjectileSource) -> Self {
        match source {
            ProjectileSource::Player => Self::Player,
            ProjectileSource::Enemy(kind) => Self::Enemy(kind.into()),
        }
    }
}

impl From<SavedProjectileSource> for ProjectileSource {
    fn from(source: SavedProjectileSource) -> Self {
        match source {
            SavedProjectileSource::Player => Self::Player,
            SavedProjectileSource::Enemy(kind) => Self::Enemy(kind.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlayer {
    pub position: SavedVec2,
    pub current_health: u32,
    pub experience: f32,
    pub max_experience: f32,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEnemy {
    pub id: u64,
    pub kind: SavedEnemyKind,
    pub position: SavedVec2,
    pub current_health: u32,
    pub state: SavedEnemyState,
    pub dying_timer: f32,
    pub dead_timer: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProjectile {
    pub position: SavedVec2,
    pub direction: SavedVec2,
    pub source: SavedProjectileSource,
    pub elapsed_lifetime: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSpawn {
    pub kind: SavedEnemyKind,
    pub position: SavedVec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    pub seed: u64,
    pub next_enemy_id: u64,
    pub gate_cooldown: f32,
    pub player: SavedPlayer,
    pub enemies: Vec<SavedEnemy>,
    pub projectiles: Vec<SavedProjectile>,
    pub spawns: Vec<SavedSpawn>,
}

impl SaveState {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl World {
    pub fn snapshot(&self) -> SaveState {
        SaveState {
            seed: self.seed,
            next_enemy_id: self.next_enemy_id,
            gate_cooldown: self.gate_cooldown,
            player: SavedPlayer {
                position: self.player.actor().position().into(),
                current_health: self.player.actor().current_health(),
                experience: self.player.experience(),
                max_experience: self.player.max_experience(),
                level: self.player.level(),
            },
            enemies: self
                .enemies
                .iter()
                .map(|enemy| SavedEnemy {
                    id: enemy.id().0,
                    kind: enemy.kind().into(),
                    position: enemy.actor().position().into(),
                    current_health: enemy.actor().current_health(),
                    state: enemy.state().into(),
                    dying_timer: enemy.dying_timer(),
                    dead_timer: enemy.dead_timer(),
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|projectile| SavedProjectile {
                    position: projectile.position().into(),
                    direction: projectile.direction().into(),
                    source: projectile.source().into(),
                    elapsed_lifetime: projectile.elapsed_lifetime(),
                })
                .collect(),
            spawns: self
                .spawns
                .iter()
                .map(|spawn| SavedSpawn {
                    kind: spawn.kind.into(),
                    position: spawn.position.into(),
                })
                .collect(),
        }
    }

    /// Rebuilds a world from a snapshot. The grid is level data, not
    /// save data, so the caller supplies it separately.
    pub fn from_snapshot(grid: CollisionGrid, state: &SaveState) -> Self {
        let mut world = Self {
            grid,
            player: Player::restore(
                state.player.position.into(),
                state.player.current_health,
                state.player.experience,
                state.player.max_experience,
                state.player.level,
            ),
            enemies: Vec::with_capacity(state.enemies.len()),
            projectiles: state
                .projectiles
                .iter()
                .map(|saved| {
                    Projectile::restore(
                        saved.position.into(),
                        saved.direction.into(),
                        saved.source.into(),
                        saved.elapsed_lifetime,
                    )
                })
                .collect(),
            spawns: state
                .spawns
                .iter()
                .map(|saved| EnemySpawn {
                    kind: saved.kind.into(),
                    position: saved.position.into(),
                })
                .collect(),
            next_enemy_id: state.next_enemy_id,
            seed: state.seed,
            gate_cooldown: state.gate_cooldown,
        };
        for saved in &state.enemies {
            let seed = world.enemy_seed(saved.id);
            world.enemies.push(Enemy::restore(
                EnemyId(saved.id),
                saved.kind.into(),
                saved.position.into(),
                saved.current_health,
                saved.state.into(),
                saved.dying_timer,
                saved.dead_timer,
                seed,
            ));
        }
        world
    }
}
