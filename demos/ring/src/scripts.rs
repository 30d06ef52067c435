//! Encounter content for the ring: a bound binder boss kept untargetable by
//! five channelers at fixed points around it.
//!
//! Out of combat the binder runs a commune cycle: it revalidates the ring,
//! assigns each channeler its link under the `(i + 2) % 5` permutation, and
//! channels on itself.  Engaging any one channeler pulls in the rest; only
//! when all five are dead does the binder release and turn on the killer.

use std::time::Duration;

use enc_core::{AbilityId, ActorId, EncounterRng, EventId, LineId, Position, TemplateId};
use enc_encounter::{Coordinator, Phase, PhaseController, SpawnSlot};
use enc_host::{ActorFlags, CastTarget, Host, LifetimePolicy, Signal, TargetStrategy};
use enc_script::EncounterScript;

// ── Design-time identifiers ───────────────────────────────────────────────────

pub const TPL_BINDER:    TemplateId = TemplateId(9101);
pub const TPL_CHANNELER: TemplateId = TemplateId(9102);
pub const TPL_PLAYER:    TemplateId = TemplateId(1);

/// The binder is always the first spawn.
pub const BINDER: ActorId = ActorId::new(0, 0);

pub const AB_SHADOW_BOLT:     AbilityId = AbilityId(201);
pub const AB_CORRUPTION:      AbilityId = AbilityId(202);
pub const AB_NOVA_SHELL:      AbilityId = AbilityId(203);
pub const AB_NOVA_BURST:      AbilityId = AbilityId(204);
pub const AB_COMMUNE:         AbilityId = AbilityId(205);
pub const AB_BINDING_CHANNEL: AbilityId = AbilityId(206);
pub const AB_DARK_TOUCH:      AbilityId = AbilityId(207);

const EV_BOLT:       EventId = EventId(1);
const EV_CURSE:      EventId = EventId(2);
const EV_NOVA_ARM:   EventId = EventId(3);
const EV_NOVA_BURST: EventId = EventId(4);
const EV_COMMUNE:    EventId = EventId(5);
const EV_TOUCH:      EventId = EventId(6);

pub const LINE_RELEASE: LineId = LineId(11);
pub const LINE_NOVA:    LineId = LineId(12);
pub const LINE_DEATH:   LineId = LineId(13);

/// Pentagon of radius 12 around the binder.
pub const RING_SPAWNS: [Position; 5] = [
    Position::new(12.0, 0.0, 0.0, 0.0),
    Position::new(3.7, 11.4, 0.0, 0.0),
    Position::new(-9.7, 7.1, 0.0, 0.0),
    Position::new(-9.7, -7.1, 0.0, 0.0),
    Position::new(3.7, -11.4, 0.0, 0.0),
];

/// Each channeler channels at the member two positions around the ring.
pub const LINK_OFFSET: usize = 2;

fn sec(n: u64) -> Duration {
    Duration::from_secs(n)
}

fn bound() -> ActorFlags {
    ActorFlags::PASSIVE | ActorFlags::UNTARGETABLE
}

// ── Binder ────────────────────────────────────────────────────────────────────

/// The ring's primary.  Untargetable while any channeler lives; fights with
/// bolt/curse timers and a two-stage nova once released.
pub struct Binder {
    ctl:   PhaseController,
    rng:   EncounterRng,
    coord: Coordinator,
}

impl Binder {
    pub fn boxed(me: ActorId, seed: u64) -> Box<dyn EncounterScript> {
        let spawns = RING_SPAWNS
            .iter()
            .map(|&position| SpawnSlot { template: TPL_CHANNELER, position })
            .collect();
        Box::new(Self {
            ctl:   PhaseController::new(),
            rng:   EncounterRng::new(seed, me),
            coord: Coordinator::new(spawns, LINK_OFFSET, LifetimePolicy::DespawnOnReset),
        })
    }

    fn schedule_combat(&mut self) {
        let rng = &mut self.rng;
        let combat = self.ctl.combat_events();
        combat.schedule(EV_BOLT, (sec(4), sec(7)), rng);
        combat.schedule(EV_CURSE, (sec(8), sec(12)), rng);
        combat.schedule(EV_NOVA_ARM, sec(15), rng);
    }

    fn release(&mut self, me: ActorId, killer: Option<ActorId>, host: &mut dyn Host) {
        host.clear_flags(me, bound());
        host.speak(me, LINE_RELEASE);
        if let Some(k) = killer.filter(|&k| host.is_alive(k)) {
            host.engage(me, k);
        }
        if self.ctl.activate() {
            self.schedule_combat();
        }
    }

    fn reset_attempt(&mut self, me: ActorId, host: &mut dyn Host) {
        if !self.ctl.evade() {
            return;
        }
        host.interrupt(me);
        host.set_flags(me, bound());
        host.despawn_by_template(me, TPL_CHANNELER);
        self.coord.reset();
        self.coord.ensure_populated(me, host);
        self.ctl.finish_reset();
        self.ctl.idle_events().schedule(EV_COMMUNE, sec(6), &mut self.rng);
    }
}

impl EncounterScript for Binder {
    fn on_reset(&mut self, me: ActorId, host: &mut dyn Host) {
        self.ctl = PhaseController::new();
        host.set_flags(me, bound());
        self.coord.reset();
        self.coord.ensure_populated(me, host);
        self.ctl.idle_events().schedule(EV_COMMUNE, sec(6), &mut self.rng);
    }

    fn on_signal(&mut self, me: ActorId, signal: Signal, host: &mut dyn Host) {
        match signal {
            Signal::AuxiliaryDied(killer) => {
                if self.coord.notify_auxiliary_died(host) {
                    self.release(me, killer, host);
                }
            }
            Signal::ResetEncounter => self.reset_attempt(me, host),
            _ => {}
        }
    }

    fn on_engage(&mut self, _me: ActorId, instigator: ActorId, host: &mut dyn Host) {
        if self.coord.released() {
            if self.ctl.activate() {
                self.schedule_combat();
            }
        } else {
            // Still bound: the pull only spreads to the rest of the ring.
            self.coord.notify_engaged(host, instigator);
        }
    }

    fn on_tick(&mut self, me: ActorId, dt: Duration, host: &mut dyn Host) {
        let coord = &mut self.coord;
        let rng = &mut self.rng;
        self.ctl.run_idle_events(dt, host, |queue, h, ev| {
            if ev != EV_COMMUNE {
                return;
            }
            coord.ensure_populated(me, h);
            for member in coord.ring().iter() {
                if !h.is_alive(member) {
                    continue;
                }
                // A missing link just skips this member's channel for the
                // cycle.
                if let Some(link) = coord.linked_target(member).filter(|&l| h.is_alive(l)) {
                    h.signal(member, Signal::Channel(link));
                }
            }
            h.cast(me, CastTarget::Caster, AB_COMMUNE);
            queue.repeat(ev, (sec(10), sec(15)), rng);
        });

        let rng = &mut self.rng;
        self.ctl.run_combat_events(
            dt,
            host,
            |h| h.is_acting(me),
            |queue, h, ev| match ev {
                EV_BOLT => {
                    h.cast(me, CastTarget::Victim, AB_SHADOW_BOLT);
                    queue.repeat(ev, (sec(5), sec(8)), rng);
                }
                EV_CURSE => {
                    if let Some(target) = h.select_target(me, TargetStrategy::Random) {
                        h.cast(me, CastTarget::At(target), AB_CORRUPTION);
                    }
                    queue.repeat(ev, (sec(9), sec(14)), rng);
                }
                EV_NOVA_ARM => {
                    h.speak(me, LINE_NOVA);
                    h.cast(me, CastTarget::Caster, AB_NOVA_SHELL);
                    // Second stage on a short fixed fuse; the arm itself only
                    // re-arms after the burst fires.
                    queue.schedule(EV_NOVA_BURST, sec(5), rng);
                }
                EV_NOVA_BURST => {
                    h.cast(me, CastTarget::Caster, AB_NOVA_BURST);
                    queue.repeat(EV_NOVA_ARM, (sec(22), sec(30)), rng);
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
        }
    }
}

// ── Channeler ─────────────────────────────────────────────────────────────────

/// One of the five.  Channels at its assigned link while out of combat;
/// breaks the channel and fights when pulled; reports its death to the
/// binder.
pub struct Channeler {
    ctl:   PhaseController,
    rng:   EncounterRng,
    owner: ActorId,
}

impl Channeler {
    pub fn boxed(me: ActorId, seed: u64) -> Box<dyn EncounterScript> {
        Box::new(Self {
            ctl:   PhaseController::new(),
            rng:   EncounterRng::new(seed, me),
            owner: ActorId::INVALID,
        })
    }
}

impl EncounterScript for Channeler {
    fn on_reset(&mut self, _me: ActorId, _host: &mut dyn Host) {
        self.ctl = PhaseController::new();
    }

    fn on_summoned(&mut self, _me: ActorId, by: ActorId, _host: &mut dyn Host) {
        self.owner = by;
    }

    fn on_signal(&mut self, me: ActorId, signal: Signal, host: &mut dyn Host) {
        if let Signal::Channel(link) = signal {
            if self.ctl.phase() == Phase::Idle && !host.is_acting(me) {
                host.cast(me, CastTarget::At(link), AB_BINDING_CHANNEL);
            }
        }
    }

    fn on_engage(&mut self, me: ActorId, instigator: ActorId, host: &mut dyn Host) {
        host.interrupt(me);
        host.signal(self.owner, Signal::Engage(instigator));
        if self.ctl.activate() {
            self.ctl
                .combat_events()
                .schedule(EV_TOUCH, (sec(4), sec(9)), &mut self.rng);
        }
    }

    fn on_tick(&mut self, me: ActorId, dt: Duration, host: &mut dyn Host) {
        let rng = &mut self.rng;
        self.ctl.run_combat_events(
            dt,
            host,
            |h| h.is_acting(me),
            |queue, h, ev| {
                if ev == EV_TOUCH {
                    h.cast(me, CastTarget::Victim, AB_DARK_TOUCH);
                    queue.repeat(ev, (sec(4), sec(9)), rng);
                }
            },
        );
        if self.ctl.phase() == Phase::Active {
            host.melee_attack_if_ready(me);
        }
    }

    fn on_target_lost(&mut self, me: ActorId, host: &mut dyn Host) {
        if self.ctl.evade() {
            host.interrupt(me);
            self.ctl.finish_reset();
            host.signal(self.owner, Signal::ResetEncounter);
        }
    }

    fn on_death(&mut self, _me: ActorId, killer: Option<ActorId>, host: &mut dyn Host) {
        if self.ctl.die() {
            host.signal(self.owner, Signal::AuxiliaryDied(killer));
        }
    }
}
