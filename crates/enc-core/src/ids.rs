//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` so
//! encounter content can declare ids as `const` tables (`const EV_NOVA:
//! EventId = EventId(3);`).
//!
//! [`ActorId`] is the one exception to the plain-wrapper pattern: it carries a
//! slot index *and* a generation counter so that a reference to a despawned
//! actor can never resolve to the actor that later reuses its slot.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the max value.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// An actor template (creature or interactable object blueprint).
    /// Scripts are registered against template ids, not actor instances.
    pub struct TemplateId(u32);
}

typed_id! {
    /// A scheduler event tag.  Meaning is local to one script; `u16` keeps
    /// scheduler entries compact.
    pub struct EventId(u16);
}

typed_id! {
    /// An ability (spell/attack) known to the host engine.
    pub struct AbilityId(u32);
}

typed_id! {
    /// A host-side movement path.
    pub struct PathId(u32);
}

typed_id! {
    /// A scripted speech line.
    pub struct LineId(u16);
}

typed_id! {
    /// Key into the host's shared encounter-state store (one per encounter).
    pub struct GateKey(u16);
}

// ── ActorId ───────────────────────────────────────────────────────────────────

/// Handle to a live actor slot in an [`ActorArena`](../enc_actor) table.
///
/// `slot` indexes the arena; `generation` is bumped every time a slot is
/// reused, so a handle held across a despawn resolves to absent rather than
/// to whatever actor now occupies the slot.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId {
    pub slot:       u16,
    pub generation: u16,
}

impl ActorId {
    /// Sentinel meaning "no valid actor".
    pub const INVALID: ActorId = ActorId { slot: u16::MAX, generation: u16::MAX };

    #[inline(always)]
    pub const fn new(slot: u16, generation: u16) -> Self {
        Self { slot, generation }
    }

    /// Cast the slot to `usize` for direct use as a table index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.slot as usize
    }

    #[inline(always)]
    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }
}

impl Default for ActorId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({}g{})", self.slot, self.generation)
    }
}
