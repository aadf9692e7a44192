use tracing::{debug, info};

use crate::combat;
use crate::enemy::{Enemy, EnemyId, EnemyKind};
use crate::events::SimEvent;
use crate::grid::CollisionGrid;
use crate::math::Vec2;
use crate::movement::resolve_move;
use crate::player::{Player, PlayerInput};
use crate::projectile::{Projectile, ProjectileSource};
use crate::separation::{
    separation_deltas, within_prefilter_distance, ENEMY_ENEMY_SEPARATION_SHARE,
    PLAYER_ENEMY_SEPARATION_SHARE,
};

/// Tile ids that trigger a level transition when the player stands on them.
pub const GATE_TILE_IDS: [u16; 4] = [120, 121, 122, 123];

/// Debounce so one gate crossing fires a single transition.
pub const GATE_COOLDOWN_SECONDS: f32 = 0.5;

const ENEMY_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Where and what to spawn. The world keeps its spawn list so the same
/// layout can be respawned later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub position: Vec2,
}

/// Owns every simulated entity for one loaded level and steps them in a
/// fixed per-frame order: player, enemies, separation, projectiles,
/// combat, death lifecycle, purge.
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) grid: CollisionGrid,
    pub(crate) player: Player,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) spawns: Vec<EnemySpawn>,
    pub(crate) next_enemy_id: u64,
    pub(crate) seed: u64,
    pub(crate) gate_cooldown: f32,
}

impl World {
    pub fn new(grid: CollisionGrid, player_position: Vec2, spawns: Vec<EnemySpawn>, seed: u64) -> Self {
        let mut world = Self {
            grid,
            player: Player::new(player_position),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            spawns: spawns.clone(),
            next_enemy_id: 0,
            seed,
            gate_cooldown: 0.0,
        };
        for spawn in spawns {
            world.spawn_enemy(spawn.kind, spawn.position);
        }
        info!(
            enemies = world.enemies.len(),
            seed, "world initialized"
        );
        world
    }

    pub fn grid(&self) -> &CollisionGrid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id() == id)
    }

    pub fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id() == id)
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub(crate) fn enemy_seed(&self, id: u64) -> u64 {
        self.seed ^ id.wrapping_mul(ENEMY_SEED_MIX)
    }

    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Vec2) -> EnemyId {
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        let seed = self.enemy_seed(id.0);
        self.enemies.push(Enemy::new(id, kind, position, seed));
        id
    }

    /// Clears all enemies and respawns the original layout with fresh ids.
    pub fn respawn_enemies(&mut self) {
        debug!(count = self.spawns.len(), "respawning enemy layout");
        self.enemies.clear();
        let spawns = self.spawns.clone();
        for spawn in spawns {
            self.spawn_enemy(spawn.kind, spawn.position);
        }
    }

    /// Advances the simulation by `dt` seconds and returns the one-shot
    /// events produced by this frame's transitions, in the order they
    /// happened.
    pub fn update(&mut self, dt: f32, input: &PlayerInput) -> Vec<SimEvent> {
        let mut events = Vec::new();

        self.player.tick_cooldown(dt);
        if self.gate_cooldown > 0.0 {
            self.gate_cooldown -= dt;
        }

        self.check_gate(&mut events);
        self.step_player(dt, input);
        self.step_enemies(dt);
        self.resolve_separation();
        self.step_projectiles(dt);
        combat::resolve_projectile_hits(
            &mut self.projectiles,
            &mut self.player,
            &mut self.enemies,
            &mut events,
        );
        self.tick_deaths(dt, &mut events);
        self.purge(&mut events);

        events
    }

    /// Gates only open once every enemy is down. Passing one resets the
    /// arena: projectiles cleared, enemies respawned, player teleported
    /// to the map center and healed to full.
    fn check_gate(&mut self, events: &mut Vec<SimEvent>) {
        if self.gate_cooldown > 0.0 || !self.player.is_alive() {
            return;
        }
        let position = self.player.actor().position();
        let (tile_x, tile_y) = self.grid.tile_coords_at_world(position.x, position.y);
        let Some(tile_id) = self.grid.tile_id_at(tile_x, tile_y) else {
            return;
        };
        if !GATE_TILE_IDS.contains(&tile_id) {
            return;
        }
        if self.enemies.iter().any(|enemy| enemy.is_alive()) {
            return;
        }

        info!(tile_id, tile_x, tile_y, "gate passed, resetting arena");
        self.projectiles.clear();
        self.respawn_enemies();
        self.player.teleport(Vec2::new(
            self.grid.width_in_world() / 2.0,
            self.grid.height_in_world() / 2.0,
        ));
        let missing = self.player.actor().max_health() - self.player.actor().current_health();
        if missing > 0 {
            self.player.heal(missing);
        }
        self.gate_cooldown = GATE_COOLDOWN_SECONDS;
        events.push(SimEvent::GatePassed { tile_id });
    }

    fn step_player(&mut self, dt: f32, input: &PlayerInput) {
        let desired = self.player.movement_delta(dt, input);
        let resolution = resolve_move(&self.grid, self.player.actor().aabb(), desired);
        self.player.move_by(resolution.delta.x, resolution.delta.y);

        if let Some(target) = input.aim {
            if let Some(direction) = self.player.try_shoot(target) {
                self.projectiles.push(Projectile::new(
                    self.player.actor().position(),
                    direction,
                    ProjectileSource::Player,
                ));
            }
        }
    }

    fn step_enemies(&mut self, dt: f32) {
        let player_position = self.player.actor().position();
        for enemy in &mut self.enemies {
            if !enemy.is_alive() {
                continue;
            }
            let decision = enemy.update_ai(dt, player_position);
            let resolution = resolve_move(&self.grid, enemy.actor().aabb(), decision.desired_move);
            enemy.move_by(resolution.delta.x, resolution.delta.y);
            enemy.react_to_block(resolution);

            if let Some(target) = decision.shoot_at {
                let origin = enemy.actor().position();
                self.projectiles.push(Projectile::new(
                    origin,
                    Vec2::new(target.x - origin.x, target.y - origin.y),
                    ProjectileSource::Enemy(enemy.kind()),
                ));
            }
        }
    }

    fn resolve_separation(&mut self) {
        let mut player_colliding = false;
        if self.player.is_alive() {
            for enemy in &mut self.enemies {
                if !enemy.is_alive() {
                    continue;
                }
                if !within_prefilter_distance(
                    self.player.actor().position(),
                    enemy.actor().position(),
                ) {
                    continue;
                }
                let player_box = self.player.actor().aabb();
                let enemy_box = enemy.actor().aabb();
                if !player_box.intersects(enemy_box) {
                    continue;
                }
                player_colliding = true;
                let (player_delta, enemy_delta) =
                    separation_deltas(player_box, enemy_box, PLAYER_ENEMY_SEPARATION_SHARE);
                self.player.move_by(player_delta.x, player_delta.y);
                enemy.move_by(enemy_delta.x, enemy_delta.y);
            }
        }
        self.player.set_colliding_with_enemy(player_colliding);

        for i in 0..self.enemies.len() {
            for j in (i + 1)..self.enemies.len() {
                let (head, tail) = self.enemies.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];
                if !a.is_alive() || !b.is_alive() {
                    continue;
                }
                if !within_prefilter_distance(a.actor().position(), b.actor().position()) {
                    continue;
                }
                let a_box = a.actor().aabb();
                let b_box = b.actor().aabb();
                if !a_box.intersects(b_box) {
                    continue;
                }
                let (a_delta, b_delta) =
                    separation_deltas(a_box, b_box, ENEMY_ENEMY_SEPARATION_SHARE);
                a.move_by(a_delta.x, a_delta.y);
                b.move_by(b_delta.x, b_delta.y);
            }
        }
    }

    fn step_projectiles(&mut self, dt: f32) {
        for projectile in &mut self.projectiles {
            projectile.update(dt);
            if projectile.hits_wall(&self.grid) {
                projectile.deactivate();
            }
        }
    }

    fn tick_deaths(&mut self, dt: f32, events: &mut Vec<SimEvent>) {
        for enemy in &mut self.enemies {
            if enemy.tick_death(dt) {
                events.push(SimEvent::EnemyDeathAnimationFinished { id: enemy.id() });
            }
        }
    }

    fn purge(&mut self, events: &mut Vec<SimEvent>) {
        self.projectiles.retain(|projectile| projectile.is_active());
        for enemy in &self.enemies {
            if enemy.should_remove() {
                events.push(SimEvent::EnemyRemoved { id: enemy.id() });
            }
        }
        self.enemies.retain(|enemy| !enemy.should_remove());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{DEAD_REMOVE_DELAY_SECONDS, DEATH_ANIMATION_SECONDS};

    const DT: f32 = 1.0 / 60.0;

    fn open_grid() -> CollisionGrid {
        CollisionGrid::new(20, 20, 16.0, 16.0, vec![0; 400], vec![0; 400])
            .expect("valid grid shape")
    }

    fn idle_input() -> PlayerInput {
        PlayerInput::default()
    }

    #[test]
    fn player_movement_is_blocked_by_walls() {
        // Solid column at tile x=5 (world x 80..96).
        let mut collision = vec![0u16; 400];
        for y in 0..20 {
            collision[y * 20 + 5] = 1;
        }
        let grid =
            CollisionGrid::new(20, 20, 16.0, 16.0, vec![0; 400], collision).expect("valid grid shape");
        let mut world = World::new(grid, Vec2::new(64.0, 100.0), Vec::new(), 1);

        let input = PlayerInput {
            move_x: 1.0,
            move_y: 0.0,
            aim: None,
        };
        for _ in 0..120 {
            world.update(DT, &input);
        }
        // Right edge stays left of the wall at x=80.
        assert!(world.player().actor().right() <= 80.0);
        assert!(world.player().actor().position().x > 64.0);
    }

    #[test]
    fn gate_resets_the_arena_and_respects_the_cooldown() {
        let mut tiles = vec![0u16; 400];
        // Player starts on tile (4, 4); the teleport target (map center,
        // tile (10, 10)) is also a gate so the cooldown can be observed.
        tiles[4 * 20 + 4] = 120;
        tiles[10 * 20 + 10] = 121;
        let grid =
            CollisionGrid::new(20, 20, 16.0, 16.0, tiles, vec![0; 400]).expect("valid grid shape");
        let mut world = World::new(grid, Vec2::new(72.0, 72.0), Vec::new(), 1);
        world.player_mut().take_damage(30);

        let first = world.update(DT, &idle_input());
        assert!(first.contains(&SimEvent::GatePassed { tile_id: 120 }));
        assert_eq!(
            world.player().actor().position(),
            Vec2::new(160.0, 160.0)
        );
        assert_eq!(world.player().actor().current_health(), 100);

        let second = world.update(DT, &idle_input());
        assert!(!second
            .iter()
            .any(|event| matches!(event, SimEvent::GatePassed { .. })));

        let after_cooldown = world.update(GATE_COOLDOWN_SECONDS, &idle_input());
        assert!(after_cooldown.contains(&SimEvent::GatePassed { tile_id: 121 }));
    }

    #[test]
    fn gate_stays_closed_while_any_enemy_lives() {
        let mut tiles = vec![0u16; 400];
        tiles[4 * 20 + 4] = 122;
        let grid =
            CollisionGrid::new(20, 20, 16.0, 16.0, tiles, vec![0; 400]).expect("valid grid shape");
        let mut world = World::new(
            grid,
            Vec2::new(72.0, 72.0),
            vec![EnemySpawn {
                kind: EnemyKind::Ghost,
                position: Vec2::new(300.0, 300.0),
            }],
            1,
        );

        let closed = world.update(DT, &idle_input());
        assert!(!closed
            .iter()
            .any(|event| matches!(event, SimEvent::GatePassed { .. })));

        // Corpses do not hold the gate shut, and passing respawns them.
        let id = world.enemies()[0].id();
        world.enemy_mut(id).expect("spawned").take_damage(100);
        let open = world.update(DT, &idle_input());
        assert!(open.contains(&SimEvent::GatePassed { tile_id: 122 }));
        assert_eq!(world.enemies().len(), 1);
        assert!(world.enemies()[0].is_alive());
        assert_ne!(world.enemies()[0].id(), id);
    }

    #[test]
    fn death_lifecycle_animates_then_lingers_then_removes() {
        let mut world = World::new(
            open_grid(),
            Vec2::new(100.0, 100.0),
            vec![EnemySpawn {
                kind: EnemyKind::Skeleton,
                position: Vec2::new(250.0, 100.0),
            }],
            1,
        );
        let id = world.enemies()[0].id();
        world.enemy_mut(id).expect("spawned").take_damage(100);

        let finished = world.update(DEATH_ANIMATION_SECONDS, &idle_input());
        assert!(finished.contains(&SimEvent::EnemyDeathAnimationFinished { id }));
        assert_eq!(world.enemies().len(), 1);

        // Corpse lingers, then leaves exactly once.
        let lingering = world.update(DEAD_REMOVE_DELAY_SECONDS / 2.0, &idle_input());
        assert!(!lingering.contains(&SimEvent::EnemyRemoved { id }));

        let removed = world.update(DEAD_REMOVE_DELAY_SECONDS, &idle_input());
        assert!(removed.contains(&SimEvent::EnemyRemoved { id }));
        assert!(world.enemies().is_empty());
    }

    #[test]
    fn overlapping_actors_are_pushed_apart() {
        let mut world = World::new(
            open_grid(),
            Vec2::new(100.0, 100.0),
            vec![EnemySpawn {
                kind: EnemyKind::Skeleton,
                position: Vec2::new(104.0, 100.0),
            }],
            1,
        );
        let before = world.player().actor().position().distance_to(
            world.enemies()[0].actor().position(),
        );

        world.update(DT, &idle_input());

        let after = world.player().actor().position().distance_to(
            world.enemies()[0].actor().position(),
        );
        assert!(after > before);
        assert!(world.player().colliding_with_enemy());
    }

    #[test]
    fn player_projectile_is_purged_after_hitting_a_wall() {
        let mut collision = vec![0u16; 400];
        for y in 0..20 {
            collision[y * 20 + 10] = 1;
        }
        let grid =
            CollisionGrid::new(20, 20, 16.0, 16.0, vec![0; 400], collision).expect("valid grid shape");
        let mut world = World::new(grid, Vec2::new(100.0, 100.0), Vec::new(), 1);

        let input = PlayerInput {
            move_x: 0.0,
            move_y: 0.0,
            aim: Some(Vec2::new(300.0, 100.0)),
        };
        world.update(DT, &input);
        assert_eq!(world.projectiles().len(), 1);

        // Wall at x=160 is 60 units ahead: at speed 200 the shot dies
        // well inside a second.
        for _ in 0..60 {
            world.update(DT, &idle_input());
        }
        assert!(world.projectiles().is_empty());
    }

    #[test]
    fn ranged_enemy_eventually_hits_the_stationary_player() {
        let mut world = World::new(
            open_grid(),
            Vec2::new(100.0, 100.0),
            vec![EnemySpawn {
                kind: EnemyKind::Shroom,
                position: Vec2::new(200.0, 100.0),
            }],
            1,
        );

        let mut damaged = false;
        for _ in 0..120 {
            let events = world.update(DT, &idle_input());
            if events
                .iter()
                .any(|event| matches!(event, SimEvent::PlayerDamaged { .. }))
            {
                damaged = true;
                break;
            }
        }
        assert!(damaged);
        assert!(world.player().actor().current_health() < 100);
    }

    #[test]
    fn identical_seeds_stay_in_lockstep() {
        let spawns = vec![
            EnemySpawn {
                kind: EnemyKind::FlyingEye,
                position: Vec2::new(200.0, 120.0),
            },
            EnemySpawn {
                kind: EnemyKind::Skeleton,
                position: Vec2::new(60.0, 180.0),
            },
        ];
        let mut a = World::new(open_grid(), Vec2::new(100.0, 100.0), spawns.clone(), 42);
        let mut b = World::new(open_grid(), Vec2::new(100.0, 100.0), spawns, 42);

        let input = PlayerInput {
            move_x: 1.0,
            move_y: 0.0,
            aim: None,
        };
        for _ in 0..180 {
            let ea = a.update(DT, &input);
            let eb = b.update(DT, &input);
            assert_eq!(ea, eb);
        }
        assert_eq!(
            a.player().actor().position(),
            b.player().actor().position()
        );
        for (ea, eb) in a.enemies().iter().zip(b.enemies()) {
            assert_eq!(ea.actor().position(), eb.actor().position());
        }
    }

    #[test]
    fn respawn_restores_the_original_layout_with_fresh_ids() {
        let mut world = World::new(
            open_grid(),
            Vec2::new(100.0, 100.0),
            vec![EnemySpawn {
                kind: EnemyKind::Zombie,
                position: Vec2::new(250.0, 250.0),
            }],
            9,
        );
        let first_id = world.enemies()[0].id();
        world.enemy_mut(first_id).expect("spawned").take_damage(100);
        world.update(DEATH_ANIMATION_SECONDS, &idle_input());
        world.update(DEAD_REMOVE_DELAY_SECONDS + DT, &idle_input());
        assert!(world.enemies().is_empty());

        world.respawn_enemies();
        assert_eq!(world.enemies().len(), 1);
        assert_ne!(world.enemies()[0].id(), first_id);
        assert_eq!(
            world.enemies()[0].actor().position(),
            Vec2::new(250.0, 250.0)
        );
    }
}
