//! Unit tests for enc-script.

use std::time::Duration;

use enc_core::{AbilityId, ActorId, GateKey, GateState, LineId, PathId, Position, TemplateId};
use enc_host::{
    ActorActions, ActorFlags, CastTarget, Host, LifetimePolicy, SharedState, Signal, Signals,
    Spawner, TargetStrategy, Targeting,
};

use crate::{EncounterScript, HostEvent, NoopScript, ScriptRegistry};

// ── Minimal host stub ─────────────────────────────────────────────────────────

/// Records nothing, answers everything with "absent".
#[derive(Default)]
struct AbsentHost {
    signals: Vec<(ActorId, Signal)>,
}

impl ActorActions for AbsentHost {
    fn cast(&mut self, _: ActorId, _: CastTarget, _: AbilityId) -> bool {
        false
    }
    fn is_acting(&self, _: ActorId) -> bool {
        false
    }
    fn interrupt(&mut self, _: ActorId) {}
    fn melee_attack_if_ready(&mut self, _: ActorId) {}
    fn move_along_path(&mut self, _: ActorId, _: PathId) {}
    fn speak(&mut self, _: ActorId, _: LineId) {}
    fn engage(&mut self, _: ActorId, _: ActorId) {}
    fn set_flags(&mut self, _: ActorId, _: ActorFlags) {}
    fn clear_flags(&mut self, _: ActorId, _: ActorFlags) {}
    fn flags(&self, _: ActorId) -> ActorFlags {
        ActorFlags::empty()
    }
}

impl Targeting for AbsentHost {
    fn current_target(&self, _: ActorId) -> Option<ActorId> {
        None
    }
    fn select_target(&mut self, _: ActorId, _: TargetStrategy) -> Option<ActorId> {
        None
    }
    fn is_alive(&self, _: ActorId) -> bool {
        false
    }
    fn in_combat(&self, _: ActorId) -> bool {
        false
    }
    fn distance(&self, _: ActorId, _: ActorId) -> f32 {
        f32::INFINITY
    }
}

impl Spawner for AbsentHost {
    fn summon(&mut self, _: ActorId, _: TemplateId, _: Position, _: LifetimePolicy) -> Option<ActorId> {
        None
    }
    fn despawn_by_template(&mut self, _: ActorId, _: TemplateId) {}
}

impl SharedState for AbsentHost {
    fn gate(&self, _: GateKey) -> GateState {
        GateState::NotStarted
    }
    fn set_gate(&mut self, _: GateKey, _: GateState) {}
}

impl Signals for AbsentHost {
    fn signal(&mut self, to: ActorId, signal: Signal) {
        self.signals.push((to, signal));
    }
}

// ── Event-counting script ─────────────────────────────────────────────────────

#[derive(Default)]
struct Counter {
    ticks:     usize,
    engages:   usize,
    deaths:    usize,
    resets:    usize,
    activates: usize,
    signals:   Vec<Signal>,
}

impl EncounterScript for Counter {
    fn on_reset(&mut self, _: ActorId, _: &mut dyn Host) {
        self.resets += 1;
    }
    fn on_engage(&mut self, _: ActorId, _: ActorId, _: &mut dyn Host) {
        self.engages += 1;
    }
    fn on_tick(&mut self, _: ActorId, _: Duration, _: &mut dyn Host) {
        self.ticks += 1;
    }
    fn on_death(&mut self, _: ActorId, _: Option<ActorId>, _: &mut dyn Host) {
        self.deaths += 1;
    }
    fn on_activate(&mut self, _: ActorId, _: &mut dyn Host) {
        self.activates += 1;
    }
    fn on_signal(&mut self, _: ActorId, signal: Signal, _: &mut dyn Host) {
        self.signals.push(signal);
    }
}

// ── HostEvent routing ─────────────────────────────────────────────────────────

#[cfg(test)]
mod events {
    use super::*;

    #[test]
    fn deliver_routes_to_matching_callback() {
        let mut host = AbsentHost::default();
        let mut script = Counter::default();
        let me = ActorId::new(0, 0);
        let other = ActorId::new(1, 0);

        HostEvent::Tick(Duration::from_millis(100)).deliver(&mut script, me, &mut host);
        HostEvent::Engaged(other).deliver(&mut script, me, &mut host);
        HostEvent::Died(Some(other)).deliver(&mut script, me, &mut host);
        HostEvent::Reset.deliver(&mut script, me, &mut host);
        HostEvent::Activated.deliver(&mut script, me, &mut host);
        HostEvent::Signal(Signal::Prepare).deliver(&mut script, me, &mut host);

        assert_eq!(script.ticks, 1);
        assert_eq!(script.engages, 1);
        assert_eq!(script.deaths, 1);
        assert_eq!(script.resets, 1);
        assert_eq!(script.activates, 1);
        assert_eq!(script.signals, vec![Signal::Prepare]);
    }

    #[test]
    fn defaulted_callbacks_are_noops() {
        // NoopScript only implements on_tick; every other event must be safe.
        let mut host = AbsentHost::default();
        let mut script = NoopScript;
        let me = ActorId::new(0, 0);
        HostEvent::Engaged(me).deliver(&mut script, me, &mut host);
        HostEvent::TargetLost.deliver(&mut script, me, &mut host);
        HostEvent::KilledUnit(me).deliver(&mut script, me, &mut host);
        HostEvent::SummonedBy(me).deliver(&mut script, me, &mut host);
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use super::*;

    #[test]
    fn instantiate_registered_template() {
        let mut reg = ScriptRegistry::new();
        reg.register(TemplateId(17), |_actor| Box::new(Counter::default()));

        assert!(reg.contains(TemplateId(17)));
        assert!(reg.instantiate(TemplateId(17), ActorId::new(0, 0)).is_some());
    }

    #[test]
    fn unregistered_template_is_none() {
        let reg = ScriptRegistry::new();
        assert!(!reg.contains(TemplateId(5)));
        assert!(reg.instantiate(TemplateId(5), ActorId::new(0, 0)).is_none());
    }

    #[test]
    fn register_replaces_previous_entry() {
        let mut reg = ScriptRegistry::new();
        reg.register(TemplateId(1), |_| Box::new(NoopScript));
        reg.register(TemplateId(1), |_| Box::new(Counter::default()));
        assert_eq!(reg.len(), 1);
    }
}
