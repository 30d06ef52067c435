//! The `EncounterScript` trait — per-template behavior.

use std::time::Duration;

use enc_core::ActorId;
use enc_host::{Host, Signal};

/// Scripted behavior for one actor template.
///
/// One instance exists per live scripted actor; the runner creates it from
/// the [`ScriptRegistry`](crate::ScriptRegistry) at spawn and drops it at
/// despawn.  All callbacks receive the acting actor's id and mutable host
/// access; only [`on_tick`][Self::on_tick] is required — everything else
/// defaults to a no-op so minimal scripts stay minimal.
///
/// # Example
///
/// ```rust,ignore
/// struct Sentry { events: EventScheduler, rng: EncounterRng }
///
/// impl EncounterScript for Sentry {
///     fn on_engage(&mut self, _me: ActorId, _who: ActorId, _host: &mut dyn Host) {
///         self.events.schedule(EV_VOLLEY, Duration::from_secs(5), &mut self.rng);
///     }
///
///     fn on_tick(&mut self, me: ActorId, dt: Duration, host: &mut dyn Host) {
///         self.events.update(dt);
///         while let Some(ev) = self.events.next_ready() {
///             // dispatch, then self.events.repeat(...)
///             if host.is_acting(me) { break; }
///         }
///         host.melee_attack_if_ready(me);
///     }
/// }
/// ```
pub trait EncounterScript {
    /// Called at spawn and on every full encounter reset.  Re-arm initial
    /// timers and restore out-of-combat state here.
    fn on_reset(&mut self, _me: ActorId, _host: &mut dyn Host) {}

    /// Called when the actor enters combat against `who`.
    fn on_engage(&mut self, _me: ActorId, _who: ActorId, _host: &mut dyn Host) {}

    /// Called once per actor per frame with the elapsed time.
    fn on_tick(&mut self, me: ActorId, dt: Duration, host: &mut dyn Host);

    /// Called when the actor dies.  Terminal: no further scheduling.
    fn on_death(&mut self, _me: ActorId, _killer: Option<ActorId>, _host: &mut dyn Host) {}

    /// Called when the actor kills `victim`.
    fn on_killed_unit(&mut self, _me: ActorId, _victim: ActorId, _host: &mut dyn Host) {}

    /// Called when the actor loses all valid targets (evade trigger).
    fn on_target_lost(&mut self, _me: ActorId, _host: &mut dyn Host) {}

    /// Called when a player interacts with this actor (gossip, lever pull).
    fn on_activate(&mut self, _me: ActorId, _host: &mut dyn Host) {}

    /// Called for each [`Signal`] addressed to this actor, in send order,
    /// within the tick that sent it.
    fn on_signal(&mut self, _me: ActorId, _signal: Signal, _host: &mut dyn Host) {}

    /// Called on a freshly summoned actor with its summoner.
    fn on_summoned(&mut self, _me: ActorId, _summoner: ActorId, _host: &mut dyn Host) {}
}
