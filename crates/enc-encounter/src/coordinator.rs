//! `Coordinator` — cross-actor signaling for boss-and-auxiliaries encounters.
//!
//! Owned by the primary actor's script.  All sibling effects, combat
//! propagation and per-cycle channel-link assignments alike, go through
//! [`Signal`]s so they land within the same tick without scripts borrowing
//! each other.

use enc_actor::AuxiliaryRing;
use enc_core::{ActorId, Position, TemplateId};
use enc_host::{Host, LifetimePolicy, Signal};

/// Design-time spawn point for one auxiliary position.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnSlot {
    pub template: TemplateId,
    pub position: Position,
}

/// Primary-side coordination state for one fixed set of auxiliaries.
pub struct Coordinator {
    ring:     AuxiliaryRing,
    spawns:   Vec<SpawnSlot>,
    lifetime: LifetimePolicy,
    /// Latch: the all-auxiliaries-dead release fires exactly once per attempt.
    released: bool,
}

impl Coordinator {
    /// One auxiliary per entry of `spawns`; link permutation maps position
    /// `i` to `(i + link_offset) % spawns.len()`.
    ///
    /// # Panics
    /// Panics if `spawns` is empty.
    pub fn new(spawns: Vec<SpawnSlot>, link_offset: usize, lifetime: LifetimePolicy) -> Self {
        let ring = AuxiliaryRing::new(spawns.len(), link_offset);
        Self { ring, spawns, lifetime, released: false }
    }

    pub fn ring(&self) -> &AuxiliaryRing {
        &self.ring
    }

    pub fn released(&self) -> bool {
        self.released
    }

    /// Lazily (re-)summon every position whose handle is absent or dead.
    ///
    /// Called from the primary's reset path and before link queries, so a
    /// despawned auxiliary is transparently replaced.  A refused summon
    /// leaves the slot cleared; the next validation pass retries.
    pub fn ensure_populated(&mut self, owner: ActorId, host: &mut dyn Host) {
        for i in 0..self.ring.len() {
            let current = self.ring.slot(i);
            if host.is_alive(current) {
                continue;
            }
            let slot = &self.spawns[i];
            match host.summon(owner, slot.template, slot.position, self.lifetime) {
                Some(id) => self.ring.set_slot(i, id),
                None     => self.ring.clear_slot(i),
            }
        }
    }

    /// Propagate an enter-combat signal to every auxiliary not already
    /// fighting.  Absent handles are skipped.
    pub fn notify_engaged(&self, host: &mut dyn Host, instigator: ActorId) {
        for id in self.ring.iter() {
            if host.is_alive(id) && !host.in_combat(id) {
                host.signal(id, Signal::Engage(instigator));
            }
        }
    }

    /// An auxiliary died.  Returns `true` exactly once per attempt: on the
    /// call that observes every auxiliary in a terminal state.  Earlier
    /// calls (some auxiliaries still alive) and later calls (already
    /// released) return `false`.
    pub fn notify_auxiliary_died(&mut self, host: &dyn Host) -> bool {
        if self.released {
            return false;
        }
        if self.ring.iter().any(|id| host.is_alive(id)) {
            return false;
        }
        self.released = true;
        true
    }

    /// The auxiliary linked to `of` under the ring permutation, or `None`
    /// if `of` is not a current member.
    pub fn linked_target(&self, of: ActorId) -> Option<ActorId> {
        self.ring.linked_of(of)
    }

    /// Re-arm the release latch for a fresh attempt.
    pub fn reset(&mut self) {
        self.released = false;
    }
}
