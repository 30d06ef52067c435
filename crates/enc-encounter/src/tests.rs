//! Unit tests for enc-encounter.

use std::collections::HashMap;
use std::time::Duration;

use enc_core::{
    AbilityId, ActorId, EncounterRng, EventId, GateKey, GateState, LineId, PathId, Position,
    TemplateId,
};
use enc_host::{
    ActorActions, ActorFlags, CastTarget, LifetimePolicy, SharedState, Signal, Signals, Spawner,
    TargetStrategy, Targeting,
};

use crate::{Coordinator, InteractionGate, Phase, PhaseController, SpawnSlot};

// ── Ledger host stub ──────────────────────────────────────────────────────────

/// In-memory host good enough for state-machine tests: tracks liveness,
/// combat membership, flags, gates, and queued signals.
#[derive(Default)]
struct LedgerHost {
    next_slot: u16,
    alive:     HashMap<ActorId, bool>,
    fighting:  HashMap<ActorId, bool>,
    flags:     HashMap<ActorId, ActorFlags>,
    gates:     HashMap<GateKey, GateState>,
    signals:   Vec<(ActorId, Signal)>,
    acting:    bool,
    /// When set, the host refuses all summons.
    summons_refused: bool,
}

impl LedgerHost {
    fn spawn_live(&mut self) -> ActorId {
        let id = ActorId::new(self.next_slot, 0);
        self.next_slot += 1;
        self.alive.insert(id, true);
        id
    }

    fn kill(&mut self, id: ActorId) {
        self.alive.insert(id, false);
        self.fighting.insert(id, false);
    }
}

impl ActorActions for LedgerHost {
    fn cast(&mut self, _: ActorId, _: CastTarget, _: AbilityId) -> bool {
        true
    }
    fn is_acting(&self, _: ActorId) -> bool {
        self.acting
    }
    fn interrupt(&mut self, _: ActorId) {}
    fn melee_attack_if_ready(&mut self, _: ActorId) {}
    fn move_along_path(&mut self, _: ActorId, _: PathId) {}
    fn speak(&mut self, _: ActorId, _: LineId) {}
    fn engage(&mut self, actor: ActorId, _: ActorId) {
        self.fighting.insert(actor, true);
    }
    fn set_flags(&mut self, actor: ActorId, flags: ActorFlags) {
        let entry = self.flags.entry(actor).or_default();
        *entry |= flags;
    }
    fn clear_flags(&mut self, actor: ActorId, flags: ActorFlags) {
        let entry = self.flags.entry(actor).or_default();
        *entry &= !flags;
    }
    fn flags(&self, actor: ActorId) -> ActorFlags {
        self.flags.get(&actor).copied().unwrap_or_default()
    }
}

impl Targeting for LedgerHost {
    fn current_target(&self, _: ActorId) -> Option<ActorId> {
        None
    }
    fn select_target(&mut self, _: ActorId, _: TargetStrategy) -> Option<ActorId> {
        None
    }
    fn is_alive(&self, actor: ActorId) -> bool {
        self.alive.get(&actor).copied().unwrap_or(false)
    }
    fn in_combat(&self, actor: ActorId) -> bool {
        self.fighting.get(&actor).copied().unwrap_or(false)
    }
    fn distance(&self, _: ActorId, _: ActorId) -> f32 {
        0.0
    }
}

impl Spawner for LedgerHost {
    fn summon(
        &mut self,
        _: ActorId,
        _: TemplateId,
        _: Position,
        _: LifetimePolicy,
    ) -> Option<ActorId> {
        if self.summons_refused {
            return None;
        }
        Some(self.spawn_live())
    }
    fn despawn_by_template(&mut self, _: ActorId, _: TemplateId) {}
}

impl SharedState for LedgerHost {
    fn gate(&self, key: GateKey) -> GateState {
        self.gates.get(&key).copied().unwrap_or_default()
    }
    fn set_gate(&mut self, key: GateKey, state: GateState) {
        self.gates.insert(key, state);
    }
}

impl Signals for LedgerHost {
    fn signal(&mut self, to: ActorId, signal: Signal) {
        self.signals.push((to, signal));
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

const EV_A: EventId = EventId(1);
const EV_B: EventId = EventId(2);

fn rng() -> EncounterRng {
    EncounterRng::new(42, ActorId::new(0, 0))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn five_slots() -> Vec<SpawnSlot> {
    (0..5)
        .map(|i| SpawnSlot {
            template: TemplateId(100),
            position: Position::new(i as f32, 0.0, 0.0, 0.0),
        })
        .collect()
}

// ── PhaseController ───────────────────────────────────────────────────────────

#[cfg(test)]
mod phase {
    use super::*;

    #[test]
    fn full_lifecycle_transitions() {
        let mut ctl = PhaseController::new();
        assert_eq!(ctl.phase(), Phase::Idle);

        assert!(ctl.begin_preparing());
        assert_eq!(ctl.phase(), Phase::Preparing);

        assert!(ctl.activate());
        assert_eq!(ctl.phase(), Phase::Active);

        assert!(ctl.evade());
        assert_eq!(ctl.phase(), Phase::Evading);

        assert!(ctl.finish_reset());
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[test]
    fn direct_pull_skips_preparing() {
        let mut ctl = PhaseController::new();
        assert!(ctl.activate());
        assert_eq!(ctl.phase(), Phase::Active);
    }

    #[test]
    fn illegal_transitions_are_ignored() {
        let mut ctl = PhaseController::new();
        assert!(!ctl.evade(), "cannot evade from Idle");
        assert!(!ctl.finish_reset(), "cannot finish reset from Idle");
        assert_eq!(ctl.phase(), Phase::Idle);

        ctl.activate();
        assert!(!ctl.begin_preparing(), "cannot re-prepare mid-combat");
        assert_eq!(ctl.phase(), Phase::Active);
    }

    #[test]
    fn double_evade_is_idempotent() {
        let mut r = rng();
        let mut ctl = PhaseController::new();
        ctl.activate();
        ctl.combat_events().schedule(EV_A, ms(10), &mut r);

        assert!(ctl.evade());
        assert!(!ctl.evade(), "second evade must be a no-op");
        assert_eq!(ctl.phase(), Phase::Evading);
        assert!(ctl.combat_events().is_empty());
    }

    #[test]
    fn evade_cancels_both_queues() {
        let mut r = rng();
        let mut ctl = PhaseController::new();
        ctl.idle_events().schedule(EV_A, ms(10), &mut r);
        ctl.activate();
        ctl.combat_events().schedule(EV_B, ms(10), &mut r);

        ctl.evade();
        assert!(ctl.combat_events().is_empty());
        assert!(ctl.idle_events().is_empty());
    }

    #[test]
    fn dead_is_terminal() {
        let mut ctl = PhaseController::new();
        ctl.activate();
        assert!(ctl.die());
        assert!(!ctl.evade());
        assert!(!ctl.activate());
        assert!(!ctl.finish_reset());
        assert!(!ctl.die());
        assert_eq!(ctl.phase(), Phase::Dead);
    }

    #[test]
    fn combat_events_only_run_while_active() {
        let mut r = rng();
        let mut ctl = PhaseController::new();
        ctl.combat_events().schedule(EV_A, ms(0), &mut r);

        let mut fired = Vec::new();
        ctl.run_combat_events(ms(100), &mut (), |_| false, |_, _, ev| fired.push(ev));
        assert!(fired.is_empty(), "Idle phase must not drain combat events");

        ctl.activate();
        ctl.run_combat_events(ms(0), &mut (), |_| false, |_, _, ev| fired.push(ev));
        assert_eq!(fired, vec![EV_A]);
    }

    #[test]
    fn busy_actor_fires_nothing() {
        let mut r = rng();
        let mut ctl = PhaseController::new();
        ctl.activate();
        ctl.combat_events().schedule(EV_A, ms(0), &mut r);

        let mut fired = Vec::new();
        ctl.run_combat_events(ms(10), &mut (), |_| true, |_, _, ev| fired.push(ev));
        assert!(fired.is_empty());
        // Still pending for the next tick.
        assert_eq!(ctl.combat_events().len(), 1);
    }

    #[test]
    fn dispatch_turning_busy_stops_the_drain() {
        // Two due events; dispatching the first makes the actor busy, so the
        // second stays pending until the next tick.
        let mut r = rng();
        let mut ctl = PhaseController::new();
        ctl.activate();
        ctl.combat_events().schedule(EV_A, ms(0), &mut r);
        ctl.combat_events().schedule(EV_B, ms(0), &mut r);

        let mut busy = false;
        let mut fired = Vec::new();
        ctl.run_combat_events(
            ms(10),
            &mut busy,
            |b| *b,
            |_, b, ev| {
                fired.push(ev);
                *b = true;
            },
        );
        assert_eq!(fired, vec![EV_A]);
        assert_eq!(ctl.combat_events().len(), 1);

        busy = false;
        ctl.run_combat_events(ms(0), &mut busy, |b| *b, |_, _, ev| fired.push(ev));
        assert_eq!(fired, vec![EV_A, EV_B]);
    }

    #[test]
    fn dispatch_can_rearm_through_the_queue_argument() {
        let mut r = rng();
        let mut ctl = PhaseController::new();
        ctl.activate();
        ctl.combat_events().schedule(EV_A, ms(0), &mut r);

        let mut rearm_rng = rng();
        let mut count = 0;
        ctl.run_combat_events(ms(10), &mut (), |_| false, |queue, _, ev| {
            count += 1;
            queue.repeat(ev, ms(20), &mut rearm_rng);
        });
        assert_eq!(count, 1);
        assert_eq!(ctl.combat_events().len(), 1);
    }

    #[test]
    fn zero_delay_rearm_waits_for_the_next_tick() {
        // A dispatch that re-arms itself with no delay must not re-enter the
        // drain it is running in.
        let mut r = rng();
        let mut ctl = PhaseController::new();
        ctl.activate();
        ctl.combat_events().schedule(EV_A, ms(0), &mut r);

        let mut rearm_rng = rng();
        let mut count = 0;
        for _ in 0..3 {
            ctl.run_combat_events(ms(10), &mut (), |_| false, |queue, _, ev| {
                count += 1;
                queue.repeat(ev, ms(0), &mut rearm_rng);
            });
        }
        assert_eq!(count, 3, "one firing per tick, never a same-tick loop");
        assert_eq!(ctl.combat_events().len(), 1);
    }

    #[test]
    fn idle_events_stop_once_active() {
        let mut r = rng();
        let mut ctl = PhaseController::new();
        ctl.idle_events().schedule(EV_A, ms(0), &mut r);

        let mut fired = Vec::new();
        ctl.activate();
        ctl.run_idle_events(ms(100), &mut (), |_, _, ev| fired.push(ev));
        assert!(fired.is_empty());
    }

    #[test]
    fn idle_events_run_while_preparing() {
        let mut r = rng();
        let mut ctl = PhaseController::new();
        ctl.begin_preparing();
        ctl.idle_events().schedule(EV_A, ms(50), &mut r);

        let mut fired = Vec::new();
        ctl.run_idle_events(ms(50), &mut (), |_, _, ev| fired.push(ev));
        assert_eq!(fired, vec![EV_A]);
    }
}

// ── InteractionGate ───────────────────────────────────────────────────────────

#[cfg(test)]
mod gate {
    use super::*;

    const KEY: GateKey = GateKey(1);

    #[test]
    fn first_activation_arms_and_signals_primary() {
        let mut host = LedgerHost::default();
        let boss = host.spawn_live();
        let lever = host.spawn_live();
        let gate = InteractionGate::new(KEY, boss);

        assert!(gate.activate(lever, &mut host));
        assert_eq!(host.gate(KEY), GateState::InProgress);
        assert_eq!(host.signals, vec![(boss, Signal::Prepare)]);
        assert!(host.flags(lever).contains(ActorFlags::IN_USE));
    }

    #[test]
    fn activation_while_in_progress_only_locks_the_object() {
        let mut host = LedgerHost::default();
        let boss = host.spawn_live();
        let lever = host.spawn_live();
        let gate = InteractionGate::new(KEY, boss);

        gate.activate(lever, &mut host);
        host.signals.clear();

        assert!(!gate.activate(lever, &mut host));
        assert!(host.signals.is_empty(), "no second Prepare signal");
        assert!(host.flags(lever).contains(ActorFlags::IN_USE));
    }

    #[test]
    fn done_gate_never_rearms() {
        let mut host = LedgerHost::default();
        let boss = host.spawn_live();
        let lever = host.spawn_live();
        host.set_gate(KEY, GateState::Done);
        let gate = InteractionGate::new(KEY, boss);

        assert!(!gate.activate(lever, &mut host));
        assert_eq!(host.gate(KEY), GateState::Done);
        assert!(host.signals.is_empty());
    }

    #[test]
    fn rearm_object_clears_the_visual_lock() {
        let mut host = LedgerHost::default();
        let boss = host.spawn_live();
        let lever = host.spawn_live();
        let gate = InteractionGate::new(KEY, boss);

        gate.activate(lever, &mut host);
        InteractionGate::rearm_object(lever, &mut host);
        assert!(!host.flags(lever).contains(ActorFlags::IN_USE));
    }
}

// ── Coordinator ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod coordinator {
    use super::*;

    #[test]
    fn ensure_populated_fills_every_slot() {
        let mut host = LedgerHost::default();
        let owner = host.spawn_live();
        let mut coord = Coordinator::new(five_slots(), 2, LifetimePolicy::DespawnOnReset);

        coord.ensure_populated(owner, &mut host);
        assert!(coord.ring().iter().all(|id| host.is_alive(id)));
    }

    #[test]
    fn ensure_populated_replaces_only_dead_slots() {
        let mut host = LedgerHost::default();
        let owner = host.spawn_live();
        let mut coord = Coordinator::new(five_slots(), 2, LifetimePolicy::DespawnOnReset);
        coord.ensure_populated(owner, &mut host);

        let before: Vec<ActorId> = coord.ring().iter().collect();
        host.kill(before[3]);
        coord.ensure_populated(owner, &mut host);

        let after: Vec<ActorId> = coord.ring().iter().collect();
        for i in 0..5 {
            if i == 3 {
                assert_ne!(after[i], before[i], "dead slot must be re-summoned");
            } else {
                assert_eq!(after[i], before[i], "live slot must be untouched");
            }
        }
    }

    #[test]
    fn refused_summons_leave_slots_absent_without_panicking() {
        let mut host = LedgerHost::default();
        let owner = host.spawn_live();
        host.summons_refused = true;
        let mut coord = Coordinator::new(five_slots(), 2, LifetimePolicy::DespawnOnReset);

        coord.ensure_populated(owner, &mut host);
        assert!(coord.ring().iter().all(|id| id.is_invalid()));
        // Coordination calls on an unpopulated ring stay silent no-ops.
        coord.notify_engaged(&mut host, owner);
        assert!(host.signals.is_empty());
    }

    #[test]
    fn notify_engaged_skips_members_already_fighting() {
        let mut host = LedgerHost::default();
        let owner = host.spawn_live();
        let player = host.spawn_live();
        let mut coord = Coordinator::new(five_slots(), 2, LifetimePolicy::DespawnOnReset);
        coord.ensure_populated(owner, &mut host);

        let members: Vec<ActorId> = coord.ring().iter().collect();
        host.fighting.insert(members[1], true);

        coord.notify_engaged(&mut host, player);
        let signalled: Vec<ActorId> = host.signals.iter().map(|&(to, _)| to).collect();
        assert_eq!(signalled.len(), 4);
        assert!(!signalled.contains(&members[1]));
        assert!(
            host.signals
                .iter()
                .all(|&(_, s)| s == Signal::Engage(player))
        );
    }

    #[test]
    fn release_fires_exactly_once_on_the_last_death() {
        let mut host = LedgerHost::default();
        let owner = host.spawn_live();
        let mut coord = Coordinator::new(five_slots(), 2, LifetimePolicy::DespawnOnReset);
        coord.ensure_populated(owner, &mut host);

        let members: Vec<ActorId> = coord.ring().iter().collect();
        let mut releases = 0;
        for &m in &members {
            host.kill(m);
            if coord.notify_auxiliary_died(&host) {
                releases += 1;
            }
        }
        assert_eq!(releases, 1, "only the final death may release");
        assert!(coord.released());

        // Subsequent notifications stay no-ops.
        assert!(!coord.notify_auxiliary_died(&host));
    }

    #[test]
    fn reset_rearms_the_release_latch() {
        let mut host = LedgerHost::default();
        let owner = host.spawn_live();
        let mut coord = Coordinator::new(five_slots(), 2, LifetimePolicy::DespawnOnReset);
        coord.ensure_populated(owner, &mut host);
        for id in coord.ring().iter().collect::<Vec<_>>() {
            host.kill(id);
        }
        assert!(coord.notify_auxiliary_died(&host));

        coord.reset();
        assert!(!coord.released());
        coord.ensure_populated(owner, &mut host);
        assert!(!coord.notify_auxiliary_died(&host), "fresh ring is alive again");
    }

    #[test]
    fn linked_target_is_the_fixed_permutation() {
        let mut host = LedgerHost::default();
        let owner = host.spawn_live();
        let mut coord = Coordinator::new(five_slots(), 2, LifetimePolicy::DespawnOnReset);
        coord.ensure_populated(owner, &mut host);

        let members: Vec<ActorId> = coord.ring().iter().collect();
        for i in 0..5 {
            assert_eq!(
                coord.linked_target(members[i]),
                Some(members[(i + 2) % 5]),
                "position {i} must link to {}",
                (i + 2) % 5
            );
        }
    }

    #[test]
    fn linked_target_for_non_member_is_none() {
        let mut host = LedgerHost::default();
        let owner = host.spawn_live();
        let outsider = host.spawn_live();
        let mut coord = Coordinator::new(five_slots(), 2, LifetimePolicy::DespawnOnReset);
        coord.ensure_populated(owner, &mut host);

        assert_eq!(coord.linked_target(outsider), None);
    }
}
