//! `Targeting` — combat target queries.

use enc_core::ActorId;

/// How the host should pick a target on a script's behalf.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TargetStrategy {
    /// The actor's current victim.
    Current,
    /// Uniformly random among hostiles on the actor's threat list.
    Random,
    /// Closest hostile.
    Nearest,
}

/// Read-side combat queries answered by the host.
pub trait Targeting {
    /// The actor's current victim, if any.
    fn current_target(&self, actor: ActorId) -> Option<ActorId>;

    /// Select a target by `strategy`.  `None` if nothing qualifies.
    ///
    /// Takes `&mut self` because `Random` draws from the host's RNG.
    fn select_target(&mut self, actor: ActorId, strategy: TargetStrategy) -> Option<ActorId>;

    /// `true` if `actor` resolves to a living actor.  Stale handles are
    /// simply `false` — never an error.
    fn is_alive(&self, actor: ActorId) -> bool;

    /// `true` if `actor` is in combat.
    fn in_combat(&self, actor: ActorId) -> bool;

    /// Distance between two actors in host units.  `f32::INFINITY` if either
    /// handle does not resolve.
    fn distance(&self, a: ActorId, b: ActorId) -> f32;
}
