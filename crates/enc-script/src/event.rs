//! `HostEvent` — the typed inbox the host pushes at each actor.

use std::time::Duration;

use enc_core::ActorId;
use enc_host::{Host, Signal};

use crate::EncounterScript;

/// One lifecycle notification from host to script.
///
/// Events are delivered synchronously in arrival order; there is no deferred
/// queue across ticks.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum HostEvent {
    /// One frame of elapsed time.
    Tick(Duration),
    /// Entered combat against the instigator.
    Engaged(ActorId),
    /// This actor died; killer when known.
    Died(Option<ActorId>),
    /// This actor killed the given victim.
    KilledUnit(ActorId),
    /// Lost all valid targets.
    TargetLost,
    /// A player interacted with this actor.
    Activated,
    /// This actor was just summoned by another.
    SummonedBy(ActorId),
    /// Full state reset requested.
    Reset,
    /// A cross-actor signal addressed to this actor.
    Signal(Signal),
}

impl HostEvent {
    /// Route this event to the matching [`EncounterScript`] callback.
    pub fn deliver(self, script: &mut dyn EncounterScript, me: ActorId, host: &mut dyn Host) {
        match self {
            HostEvent::Tick(dt)        => script.on_tick(me, dt, host),
            HostEvent::Engaged(who)    => script.on_engage(me, who, host),
            HostEvent::Died(killer)    => script.on_death(me, killer, host),
            HostEvent::KilledUnit(v)   => script.on_killed_unit(me, v, host),
            HostEvent::TargetLost      => script.on_target_lost(me, host),
            HostEvent::Activated       => script.on_activate(me, host),
            HostEvent::SummonedBy(by)  => script.on_summoned(me, by, host),
            HostEvent::Reset           => script.on_reset(me, host),
            HostEvent::Signal(signal)  => script.on_signal(me, signal, host),
        }
    }
}
