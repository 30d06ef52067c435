//! `Spawner` — summoning and despawning auxiliaries.

use std::time::Duration;

use enc_core::{ActorId, Position, TemplateId};

/// How long a summoned actor outlives its purpose.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LifetimePolicy {
    /// Lives until explicitly despawned.
    Persistent,
    /// Removed when the summoning encounter resets.
    DespawnOnReset,
    /// Corpse lingers for the given duration after death, then despawns.
    CorpseTimed(Duration),
}

/// Summon/despawn capability.
pub trait Spawner {
    /// Summon an actor of `template` at `position` on behalf of `owner`.
    ///
    /// `None` if the host refused (e.g. population cap) — callers skip and
    /// retry on their next validation pass.
    fn summon(
        &mut self,
        owner:    ActorId,
        template: TemplateId,
        position: Position,
        lifetime: LifetimePolicy,
    ) -> Option<ActorId>;

    /// Despawn every actor of `template` summoned by `owner` (cloud cleanup
    /// on reset).  Absent templates are a no-op.
    fn despawn_by_template(&mut self, owner: ActorId, template: TemplateId);
}
