pub mod actor;
pub mod combat;
pub mod enemy;
pub mod events;
pub mod grid;
pub mod math;
pub mod movement;
pub mod player;
pub mod projectile;
pub mod separation;
pub mod snapshot;
pub mod world;

pub use actor::{Actor, BoundingBox, ACTOR_BOUNDING_BOX};
pub use combat::{
    resolve_projectile_hits, BLOOD_EFFECT_OFFSET_Y, ENEMY_PROJECTILE_DAMAGE, HIT_TEST_RADIUS,
    PLAYER_PROJECTILE_DAMAGE,
};
pub use enemy::{
    Enemy, EnemyDecision, EnemyId, EnemyKind, EnemyProfile, EnemyState, DEAD_REMOVE_DELAY_SECONDS,
    DEATH_ANIMATION_SECONDS,
};
pub use events::SimEvent;
pub use grid::{CollisionGrid, GridError};
pub use math::{Aabb, Vec2};
pub use movement::{resolve_move, MoveResolution};
pub use player::{
    Player, PlayerInput, PLAYER_LEVEL_CAP, PLAYER_MAX_HEALTH, PLAYER_MOVE_SPEED,
    PLAYER_SHOOT_COOLDOWN_SECONDS,
};
pub use projectile::{
    Projectile, ProjectileSource, PROJECTILE_LIFETIME_SECONDS, PROJECTILE_RADIUS, PROJECTILE_SPEED,
};
pub use separation::{
    separation_deltas, within_prefilter_distance, ENEMY_ENEMY_SEPARATION_SHARE,
    PLAYER_ENEMY_SEPARATION_SHARE, SEPARATION_PREFILTER_DISTANCE,
};
pub use snapshot::SaveState;
pub use world::{EnemySpawn, World, GATE_COOLDOWN_SECONDS, GATE_TILE_IDS};
