//! `AuxiliaryRing` — a fixed-count ordered set of auxiliary actor handles.
//!
//! Boss-and-adds encounters keep a by-position reference to each auxiliary
//! (five channelers around a dais, four pillar guardians, …).  The ring holds
//! one `ActorId` slot per design position plus a fixed link offset that
//! defines a deterministic permutation between positions — used for chained
//! effects cycling through the set (each member targets the member `offset`
//! positions around the ring).
//!
//! Slots hold handles, not liveness: a despawned member's handle simply
//! stops resolving against the arena, and whoever maintains the ring
//! re-populates the slot.

use enc_core::ActorId;

/// Fixed-count ring of auxiliary actor handles with a design-time link offset.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuxiliaryRing {
    slots:  Vec<ActorId>,
    offset: usize,
}

impl AuxiliaryRing {
    /// A ring of `count` positions whose link permutation maps position `i`
    /// to position `(i + link_offset) % count`.
    ///
    /// # Panics
    /// Panics if `count == 0`.
    pub fn new(count: usize, link_offset: usize) -> Self {
        assert!(count > 0, "auxiliary ring must have at least one position");
        Self {
            slots:  vec![ActorId::INVALID; count],
            offset: link_offset % count,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        false // by construction: count > 0
    }

    /// The handle at position `i` (possibly `ActorId::INVALID`).
    pub fn slot(&self, i: usize) -> ActorId {
        self.slots[i]
    }

    pub fn set_slot(&mut self, i: usize, id: ActorId) {
        self.slots[i] = id;
    }

    pub fn clear_slot(&mut self, i: usize) {
        self.slots[i] = ActorId::INVALID;
    }

    /// Position of `id` in the ring, or `None` if not a member.
    pub fn position_of(&self, id: ActorId) -> Option<usize> {
        if id.is_invalid() {
            return None;
        }
        self.slots.iter().position(|&s| s == id)
    }

    /// The position linked to position `i` under the ring permutation.
    pub fn linked_index(&self, i: usize) -> usize {
        (i + self.offset) % self.slots.len()
    }

    /// The handle linked to member `of`, or `None` if `of` is not a member.
    ///
    /// The returned handle may itself be stale; callers resolve it against
    /// the arena and skip the effect if absent.
    pub fn linked_of(&self, of: ActorId) -> Option<ActorId> {
        let i = self.position_of(of)?;
        Some(self.slots[self.linked_index(i)])
    }

    /// Iterate the handles in position order.
    pub fn iter(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.slots.iter().copied()
    }
}
