//! `ActorArena` — fixed-capacity generational slot table.
//!
//! The arena is the single source of truth for "does this actor exist?".
//! Hosts layer their own per-actor state in parallel `Vec`s indexed by
//! `id.index()`, the same SoA layout the rest of the framework assumes.

use enc_core::{ActorId, EncError, EncResult, Position, TemplateId};

/// The framework-visible state of one actor.
///
/// Deliberately minimal: combat bookkeeping (target, cast state, flags) is
/// host state, not framework state, and lives with the host implementation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorRecord {
    pub template: TemplateId,
    pub position: Position,
    pub alive:    bool,
}

impl ActorRecord {
    pub fn new(template: TemplateId, position: Position) -> Self {
        Self { template, position, alive: true }
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u16,
    occupant:   Option<ActorRecord>,
}

/// Fixed-capacity actor table with generational ids.
///
/// `insert` hands out the lowest free slot; `remove` bumps the slot's
/// generation so previously issued ids for that slot stop resolving.
pub struct ActorArena {
    slots: Vec<Slot>,
    live:  usize,
}

impl ActorArena {
    /// Create an arena with room for `capacity` simultaneous actors.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity <= u16::MAX as usize, "capacity must fit in a u16 slot index");
        Self {
            slots: vec![Slot::default(); capacity],
            live:  0,
        }
    }

    /// Insert a record into the lowest free slot.
    pub fn insert(&mut self, record: ActorRecord) -> EncResult<ActorId> {
        let Some((i, slot)) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, s)| s.occupant.is_none())
        else {
            return Err(EncError::ArenaFull { capacity: self.slots.len() });
        };
        slot.occupant = Some(record);
        self.live += 1;
        Ok(ActorId::new(i as u16, slot.generation))
    }

    /// Remove the actor behind `id`, returning its record.
    ///
    /// Stale or invalid ids are a no-op returning `None`.
    pub fn remove(&mut self, id: ActorId) -> Option<ActorRecord> {
        let slot = self.slot_mut(id)?;
        let record = slot.occupant.take()?;
        // Previously issued ids for this slot are dead from here on.
        slot.generation = slot.generation.wrapping_add(1);
        self.live -= 1;
        Some(record)
    }

    /// Resolve `id` to its record, or `None` if despawned/stale.
    pub fn get(&self, id: ActorId) -> Option<&ActorRecord> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        slot.occupant.as_ref()
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut ActorRecord> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        slot.occupant.as_mut()
    }

    /// `true` if `id` resolves to a present actor (alive or corpse).
    pub fn contains(&self, id: ActorId) -> bool {
        self.get(id).is_some()
    }

    /// `true` if `id` resolves to a present, living actor.
    pub fn is_alive(&self, id: ActorId) -> bool {
        self.get(id).is_some_and(|r| r.alive)
    }

    /// Iterate all present actors in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &ActorRecord)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.occupant
                .as_ref()
                .map(|r| (ActorId::new(i as u16, slot.generation), r))
        })
    }

    /// Number of present actors.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn slot_mut(&mut self, id: ActorId) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        Some(slot)
    }
}
