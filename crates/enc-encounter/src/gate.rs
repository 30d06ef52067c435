//! `InteractionGate` — the lever/door object arming an encounter.

use enc_core::{ActorId, GateKey, GateState};
use enc_host::{ActorFlags, Host, Signal};

/// Binds a physical interactable to an encounter gate and its primary actor.
///
/// Owned by the interactable's script.  The only externally triggered
/// operation is [`activate`](Self::activate); the rest of the gate's life is
/// driven by the primary actor (reset back to `NotStarted` on evade, `Done`
/// on death).
#[derive(Copy, Clone, Debug)]
pub struct InteractionGate {
    key:     GateKey,
    primary: ActorId,
}

impl InteractionGate {
    pub fn new(key: GateKey, primary: ActorId) -> Self {
        Self { key, primary }
    }

    pub fn key(&self) -> GateKey {
        self.key
    }

    /// Handle a player interaction with the physical object `me`.
    ///
    /// If the encounter is neither done nor already running, moves the gate
    /// to `InProgress` and signals the primary actor to begin preparing.
    /// The physical object is latched `IN_USE` in every case — the visual
    /// lock is idempotent and independent of whether the attempt armed.
    ///
    /// Returns `true` if this interaction armed the encounter.
    pub fn activate(&self, me: ActorId, host: &mut dyn Host) -> bool {
        let state = host.gate(self.key);
        let armed = state != GateState::Done && state != GateState::InProgress;

        if armed {
            host.set_gate(self.key, GateState::InProgress);
            host.signal(self.primary, Signal::Prepare);
        }

        host.set_flags(me, ActorFlags::IN_USE | ActorFlags::UNTARGETABLE);
        armed
    }

    /// Restore the physical object `me` for a fresh attempt (primary's evade
    /// path calls this alongside setting the gate back to `NotStarted`).
    pub fn rearm_object(me: ActorId, host: &mut dyn Host) {
        host.clear_flags(me, ActorFlags::IN_USE | ActorFlags::UNTARGETABLE);
    }
}
