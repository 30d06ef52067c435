//! Encounter content for the cell block: a caged warden behind a lever,
//! four captive brutes in side cells, and the lever itself.
//!
//! Spawn order is part of the encounter design: the warden goes into slot 0
//! and the lever into slot 1, so the two scripts can name each other as
//! constants the same way their spawn points are constants.

use std::time::Duration;

use enc_core::{
    AbilityId, ActorId, EncounterRng, EventId, GateKey, GateState, LineId, PathId, Position,
    TemplateId,
};
use enc_encounter::{InteractionGate, Phase, PhaseController};
use enc_host::{ActorFlags, CastTarget, Host, LifetimePolicy, Signal, TargetStrategy};
use enc_script::EncounterScript;

// ── Design-time identifiers ───────────────────────────────────────────────────

pub const TPL_WARDEN:   TemplateId = TemplateId(9001);
pub const TPL_LEVER:    TemplateId = TemplateId(9002);
pub const TPL_PRISONER: TemplateId = TemplateId(9003);
pub const TPL_PLAYER:   TemplateId = TemplateId(1);

/// Fixed placements: warden first, lever second.
pub const WARDEN: ActorId = ActorId::new(0, 0);
pub const LEVER:  ActorId = ActorId::new(1, 0);

pub const AB_ACID_SPRAY:  AbilityId = AbilityId(101);
pub const AB_VENOM_BOLT:  AbilityId = AbilityId(102);
pub const AB_MIASMA:      AbilityId = AbilityId(103);
pub const AB_WILD_STRIKE: AbilityId = AbilityId(104);

const EV_OPEN_CELLS: EventId = EventId(1);
const EV_CHARGE:     EventId = EventId(2);
const EV_SPRAY:      EventId = EventId(3);
const EV_BOLT:       EventId = EventId(4);
const EV_MIASMA:     EventId = EventId(5);
const EV_RATTLE:     EventId = EventId(6);
const EV_STRIKE:     EventId = EventId(7);

pub const LINE_AWAKEN: LineId = LineId(1);
pub const LINE_CELLS:  LineId = LineId(2);
pub const LINE_CHARGE: LineId = LineId(3);
pub const LINE_EVADE:  LineId = LineId(4);
pub const LINE_DEATH:  LineId = LineId(5);
pub const LINE_RATTLE: LineId = LineId(6);

pub const PATH_CHARGE: PathId = PathId(1);
pub const PATH_OUT:    PathId = PathId(2);

pub const GATE_CELLBLOCK: GateKey = GateKey(1);

pub const CELL_SPAWNS: [Position; 4] = [
    Position::new(-8.0, 4.0, 0.0, 0.0),
    Position::new(-8.0, -4.0, 0.0, 0.0),
    Position::new(8.0, 4.0, 0.0, 0.0),
    Position::new(8.0, -4.0, 0.0, 0.0),
];

fn sec(n: u64) -> Duration {
    Duration::from_secs(n)
}

fn caged() -> ActorFlags {
    ActorFlags::PASSIVE | ActorFlags::UNTARGETABLE
}

// ── Warden ────────────────────────────────────────────────────────────────────

/// The cell block warden.  Caged and untargetable until the lever arms the
/// encounter; runs a cell-opening intro while preparing, then fights on
/// three repeating ability timers.  Any captive reaching its cell again, or
/// the warden losing all attackers, resets the whole attempt.
pub struct Warden {
    ctl:       PhaseController,
    rng:       EncounterRng,
    prisoners: Vec<ActorId>,
}

impl Warden {
    pub fn boxed(me: ActorId, seed: u64) -> Box<dyn EncounterScript> {
        Box::new(Self {
            ctl:       PhaseController::new(),
            rng:       EncounterRng::new(seed, me),
            prisoners: Vec::new(),
        })
    }

    fn summon_captives(&mut self, me: ActorId, host: &mut dyn Host) {
        host.despawn_by_template(me, TPL_PRISONER);
        self.prisoners.clear();
        for spawn in CELL_SPAWNS {
            if let Some(id) = host.summon(me, TPL_PRISONER, spawn, LifetimePolicy::DespawnOnReset)
            {
                self.prisoners.push(id);
            }
        }
    }

    fn schedule_combat(&mut self) {
        let rng = &mut self.rng;
        let combat = self.ctl.combat_events();
        combat.schedule(EV_SPRAY, (sec(5), sec(9)), rng);
        combat.schedule(EV_BOLT, (sec(4), sec(8)), rng);
        combat.schedule(EV_MIASMA, (sec(10), sec(15)), rng);
    }

    fn reset_attempt(&mut self, me: ActorId, host: &mut dyn Host) {
        if !self.ctl.evade() {
            return;
        }
        host.interrupt(me);
        host.speak(me, LINE_EVADE);
        host.set_flags(me, caged());
        host.set_gate(GATE_CELLBLOCK, GateState::NotStarted);
        host.signal(LEVER, Signal::ResetEncounter);
        self.summon_captives(me, host);
        self.ctl.finish_reset();
    }
}

impl EncounterScript for Warden {
    fn on_reset(&mut self, me: ActorId, host: &mut dyn Host) {
        self.ctl = PhaseController::new();
        host.set_flags(me, caged());
        self.summon_captives(me, host);
    }

    fn on_signal(&mut self, me: ActorId, signal: Signal, host: &mut dyn Host) {
        match signal {
            Signal::Prepare => {
                if self.ctl.begin_preparing() {
                    host.speak(me, LINE_AWAKEN);
                    let rng = &mut self.rng;
                    self.ctl.idle_events().schedule(EV_OPEN_CELLS, sec(2), rng);
                    self.ctl.idle_events().schedule(EV_CHARGE, sec(8), rng);
                }
            }
            Signal::ResetEncounter => self.reset_attempt(me, host),
            _ => {}
        }
    }

    fn on_engage(&mut self, _me: ActorId, _instigator: ActorId, _host: &mut dyn Host) {
        if self.ctl.activate() {
            self.schedule_combat();
        }
    }

    fn on_tick(&mut self, me: ActorId, dt: Duration, host: &mut dyn Host) {
        let prisoners = &self.prisoners;
        self.ctl.run_idle_events(dt, host, |_, h, ev| match ev {
            EV_OPEN_CELLS => {
                h.speak(me, LINE_CELLS);
                for &p in prisoners {
                    h.signal(p, Signal::Prepare);
                }
            }
            EV_CHARGE => {
                h.clear_flags(me, caged());
                h.move_along_path(me, PATH_CHARGE);
                h.speak(me, LINE_CHARGE);
            }
            _ => {}
        });

        let rng = &mut self.rng;
        self.ctl.run_combat_events(
            dt,
            host,
            |h| h.is_acting(me),
            |queue, h, ev| match ev {
                EV_SPRAY => {
                    h.cast(me, CastTarget::Victim, AB_ACID_SPRAY);
                    queue.repeat(ev, (sec(7), sec(12)), rng);
                }
                EV_BOLT => {
                    if let Some(target) = h.select_target(me, TargetStrategy::Random) {
                        h.cast(me, CastTarget::At(target), AB_VENOM_BOLT);
                    }
                    queue.repeat(ev, (sec(4), sec(8)), rng);
                }
                EV_MIASMA => {
                    h.cast(me, CastTarget::Caster, AB_MIASMA);
                    queue.repeat(ev, (sec(10), sec(15)), rng);
                }
                _ => {}
            },
        );

        if self.ctl.phase() == Phase::Active && !host.is_acting(me) {
            host.melee_attack_if_ready(me);
        }
    }

    fn on_target_lost(&mut self, me: ActorId, host: &mut dyn Host) {
        self.reset_attempt(me, host);
    }

    fn on_death(&mut self, me: ActorId, _killer: Option<ActorId>, host: &mut dyn Host) {
        if self.ctl.die() {
            host.speak(me, LINE_DEATH);
            host.set_gate(GATE_CELLBLOCK, GateState::Done);
        }
    }
}

// ── Prisoner ──────────────────────────────────────────────────────────────────

/// A captive brute.  Rattles its cell on a randomized idle timer until the
/// warden opens the cells, then fights on a single strike timer.  Losing
/// all attackers sends it home and resets the warden's attempt.
pub struct Prisoner {
    ctl:   PhaseController,
    rng:   EncounterRng,
    owner: ActorId,
}

impl Prisoner {
    pub fn boxed(me: ActorId, seed: u64) -> Box<dyn EncounterScript> {
        Box::new(Self {
            ctl:   PhaseController::new(),
            rng:   EncounterRng::new(seed, me),
            owner: ActorId::INVALID,
        })
    }
}

impl EncounterScript for Prisoner {
    fn on_reset(&mut self, me: ActorId, host: &mut dyn Host) {
        self.ctl = PhaseController::new();
        host.set_flags(me, ActorFlags::PASSIVE);
        self.ctl
            .idle_events()
            .schedule(EV_RATTLE, (sec(6), sec(14)), &mut self.rng);
    }

    fn on_summoned(&mut self, _me: ActorId, by: ActorId, _host: &mut dyn Host) {
        self.owner = by;
    }

    fn on_signal(&mut self, me: ActorId, signal: Signal, host: &mut dyn Host) {
        if signal == Signal::Prepare {
            self.ctl.idle_events().cancel(EV_RATTLE);
            host.clear_flags(me, ActorFlags::PASSIVE);
            host.move_along_path(me, PATH_OUT);
        }
    }

    fn on_engage(&mut self, _me: ActorId, _instigator: ActorId, _host: &mut dyn Host) {
        if self.ctl.activate() {
            self.ctl
                .combat_events()
                .schedule(EV_STRIKE, (sec(3), sec(6)), &mut self.rng);
        }
    }

    fn on_tick(&mut self, me: ActorId, dt: Duration, host: &mut dyn Host) {
        let rng = &mut self.rng;
        self.ctl.run_idle_events(dt, host, |queue, h, ev| {
            if ev == EV_RATTLE {
                h.speak(me, LINE_RATTLE);
                queue.repeat(ev, (sec(6), sec(14)), rng);
            }
        });

        let rng = &mut self.rng;
        self.ctl.run_combat_events(
            dt,
            host,
            |h| h.is_acting(me),
            |queue, h, ev| {
                if ev == EV_STRIKE {
                    h.cast(me, CastTarget::Victim, AB_WILD_STRIKE);
                    queue.repeat(ev, (sec(3), sec(6)), rng);
                }
            },
        );

        if self.ctl.phase() == Phase::Active {
            host.melee_attack_if_ready(me);
        }
    }

    fn on_target_lost(&mut self, me: ActorId, host: &mut dyn Host) {
        if self.ctl.evade() {
            host.move_along_path(me, PATH_OUT);
            self.ctl.finish_reset();
            host.signal(self.owner, Signal::ResetEncounter);
        }
    }
}

// ── Lever ─────────────────────────────────────────────────────────────────────

/// The cell block lever.  First pull arms the encounter and wakes the
/// warden; the warden unlocks it again on a wipe, and a finished encounter
/// leaves it locked for good.
pub struct CellLever {
    gate: InteractionGate,
}

impl CellLever {
    pub fn boxed(_me: ActorId) -> Box<dyn EncounterScript> {
        Box::new(Self { gate: InteractionGate::new(GATE_CELLBLOCK, WARDEN) })
    }
}

impl EncounterScript for CellLever {
    fn on_tick(&mut self, _me: ActorId, _dt: Duration, _host: &mut dyn Host) {}

    fn on_reset(&mut self, me: ActorId, host: &mut dyn Host) {
        InteractionGate::rearm_object(me, host);
    }

    fn on_activate(&mut self, me: ActorId, host: &mut dyn Host) {
        self.gate.activate(me, host);
    }

    fn on_signal(&mut self, me: ActorId, signal: Signal, host: &mut dyn Host) {
        if signal == Signal::ResetEncounter {
            InteractionGate::rearm_object(me, host);
        }
    }
}
