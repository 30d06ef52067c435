//! `ActorActions` — casting, movement, speech, and flag control.

use enc_core::{AbilityId, ActorId, LineId, PathId};

use crate::ActorFlags;

/// Who an ability is aimed at.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CastTarget {
    /// The caster itself.
    Caster,
    /// The caster's current combat target.
    Victim,
    /// A specific actor.
    At(ActorId),
}

/// Actions a script can drive on an actor it controls.
///
/// All methods take the acting actor explicitly — scripts are plain state
/// machines, the host holds the world.
pub trait ActorActions {
    /// Begin casting `ability` at `target`.
    ///
    /// Returns `false` if the host rejected the cast (dead caster, unresolved
    /// target, already casting an uninterruptible ability, …).  Scripts treat
    /// a rejection as "skip this cycle" and re-arm as usual.
    fn cast(&mut self, caster: ActorId, target: CastTarget, ability: AbilityId) -> bool;

    /// `true` while `actor` is mid-cast (or otherwise committed to an
    /// action).  The phase controller consults this between scheduler pops.
    fn is_acting(&self, actor: ActorId) -> bool;

    /// Interrupt any cast in progress.  No-op if idle.
    fn interrupt(&mut self, actor: ActorId);

    /// Swing at the current victim if in melee range and off swing cooldown.
    fn melee_attack_if_ready(&mut self, actor: ActorId);

    /// Start moving along a host-defined path.
    fn move_along_path(&mut self, actor: ActorId, path: PathId);

    /// Play a scripted speech line.
    fn speak(&mut self, actor: ActorId, line: LineId);

    /// Put `actor` into combat against `target` (the aggro handoff used when
    /// one actor pulls its siblings in).  No-op if `actor` is absent or
    /// already fighting.
    fn engage(&mut self, actor: ActorId, target: ActorId);

    fn set_flags(&mut self, actor: ActorId, flags: ActorFlags);

    fn clear_flags(&mut self, actor: ActorId, flags: ActorFlags);

    fn flags(&self, actor: ActorId) -> ActorFlags;
}
