//! `Signals` — typed cross-actor messages delivered within the current tick.
//!
//! One actor's state change often has to reach a sibling before the tick
//! returns to the host (a channeler pulling its boss into the fight must not
//! leave a one-tick window where the boss idles).  Scripts therefore never
//! call each other directly; they enqueue a `Signal` through the host, and
//! the runner drains the queue to completion after every dispatch — same
//! observable ordering as a direct synchronous call chain, without aliased
//! mutable borrows between scripts.

use enc_core::ActorId;

/// A cross-actor coordination message.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Signal {
    /// Enter combat against the given instigator.
    Engage(ActorId),
    /// Begin the intro/`Preparing` phase (sent by an interaction gate).
    Prepare,
    /// An auxiliary died; `Some(killer)` when the killer is known.
    AuxiliaryDied(Option<ActorId>),
    /// Gating condition lifted — become attackable and join the fight.
    Release,
    /// Begin channeling at the given linked auxiliary (sent by the ring
    /// owner each channel cycle).
    Channel(ActorId),
    /// Reset the whole encounter attempt (sent by an add reaching home).
    ResetEncounter,
}

/// Signal enqueue capability.
pub trait Signals {
    /// Queue `signal` for delivery to `to` before the current tick returns.
    ///
    /// Signals to absent actors are dropped at delivery time.
    fn signal(&mut self, to: ActorId, signal: Signal);
}
