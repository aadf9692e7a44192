use crate::enemy::EnemyId;
use crate::math::Vec2;

/// One-shot notifications emitted by [`crate::world::World::update`].
/// Each fires on exactly the frame its transition happens; consumers that
/// miss a frame miss the event, so the orchestrator returns the full
/// batch every update instead of exposing polled flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// A projectile connected with an actor; spawn a blood effect here.
    BloodEffectRequested { position: Vec2 },
    EnemyDamaged { id: EnemyId, amount: u32 },
    /// Lethal hit landed; the death animation starts this frame.
    EnemyDied { id: EnemyId },
    /// The death animation just completed (Dying -> Dead).
    EnemyDeathAnimationFinished { id: EnemyId },
    /// The corpse delay elapsed and the enemy left the simulation.
    EnemyRemoved { id: EnemyId },
    PlayerDamaged { amount: u32 },
    PlayerDied,
    PlayerLeveledUp { level: u32 },
    /// The player stepped onto a gate tile; the shell should change maps.
    GatePassed { tile_id: u16 },
}
