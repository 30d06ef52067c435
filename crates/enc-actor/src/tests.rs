//! Unit tests for enc-actor.

use enc_core::{ActorId, Position, TemplateId};

use crate::{ActorArena, ActorRecord, AuxiliaryRing};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn record(template: u32) -> ActorRecord {
    ActorRecord::new(TemplateId(template), Position::default())
}

// ── ActorArena ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod arena {
    use super::*;

    #[test]
    fn insert_and_resolve() {
        let mut arena = ActorArena::new(4);
        let id = arena.insert(record(17)).unwrap();
        assert_eq!(arena.get(id).unwrap().template, TemplateId(17));
        assert!(arena.contains(id));
        assert!(arena.is_alive(id));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn removed_id_resolves_to_absent() {
        let mut arena = ActorArena::new(4);
        let id = arena.insert(record(1)).unwrap();
        assert!(arena.remove(id).is_some());
        assert!(arena.get(id).is_none());
        assert!(!arena.contains(id));
        // Double remove is a no-op.
        assert!(arena.remove(id).is_none());
    }

    #[test]
    fn stale_id_never_reaches_slot_reuser() {
        let mut arena = ActorArena::new(2);
        let first = arena.insert(record(1)).unwrap();
        arena.remove(first);

        // The replacement lands in the same slot with a new generation.
        let second = arena.insert(record(2)).unwrap();
        assert_eq!(first.index(), second.index());
        assert_ne!(first, second);

        assert!(arena.get(first).is_none());
        assert_eq!(arena.get(second).unwrap().template, TemplateId(2));
    }

    #[test]
    fn full_arena_rejects_insert() {
        let mut arena = ActorArena::new(1);
        arena.insert(record(1)).unwrap();
        assert!(arena.insert(record(2)).is_err());
    }

    #[test]
    fn dead_actor_is_present_but_not_alive() {
        let mut arena = ActorArena::new(2);
        let id = arena.insert(record(1)).unwrap();
        arena.get_mut(id).unwrap().alive = false;
        assert!(arena.contains(id));
        assert!(!arena.is_alive(id));
    }

    #[test]
    fn iter_visits_live_actors_in_slot_order() {
        let mut arena = ActorArena::new(4);
        let a = arena.insert(record(10)).unwrap();
        let b = arena.insert(record(20)).unwrap();
        let c = arena.insert(record(30)).unwrap();
        arena.remove(b);

        let ids: Vec<ActorId> = arena.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn invalid_id_resolves_to_absent() {
        let arena = ActorArena::new(4);
        assert!(arena.get(ActorId::INVALID).is_none());
        assert!(!arena.is_alive(ActorId::INVALID));
    }
}

// ── AuxiliaryRing ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod ring {
    use super::*;

    fn filled_ring(count: usize, offset: usize) -> (AuxiliaryRing, Vec<ActorId>) {
        let mut arena = ActorArena::new(count);
        let mut ring = AuxiliaryRing::new(count, offset);
        let ids: Vec<ActorId> = (0..count)
            .map(|i| {
                let id = arena.insert(record(i as u32)).unwrap();
                ring.set_slot(i, id);
                id
            })
            .collect();
        (ring, ids)
    }

    #[test]
    fn link_permutation_is_plus_offset_mod_len() {
        // Ring of 5 with offset 2: position i always links to (i + 2) % 5.
        let (ring, ids) = filled_ring(5, 2);
        for i in 0..5 {
            assert_eq!(ring.linked_index(i), (i + 2) % 5);
            assert_eq!(ring.linked_of(ids[i]), Some(ids[(i + 2) % 5]));
        }
    }

    #[test]
    fn non_member_has_no_link() {
        let (ring, _) = filled_ring(5, 2);
        assert_eq!(ring.linked_of(ActorId::new(9, 0)), None);
        assert_eq!(ring.linked_of(ActorId::INVALID), None);
    }

    #[test]
    fn cleared_slot_is_invalid_but_link_math_holds() {
        let (mut ring, ids) = filled_ring(5, 2);
        ring.clear_slot(2);
        // Position 0 still links to position 2; the handle there is INVALID
        // and resolves to absent downstream.
        assert_eq!(ring.linked_of(ids[0]), Some(ActorId::INVALID));
    }

    #[test]
    fn offset_wraps_at_construction() {
        let ring = AuxiliaryRing::new(3, 7); // 7 % 3 == 1
        assert_eq!(ring.linked_index(2), 0);
    }
}
