//! `EncounterRunner` — the synchronous dispatch loop over a [`World`].
//!
//! The runner owns the world, a script registry, and one live script
//! instance per scripted actor.  Every externally driven event (a frame
//! tick, an engage, a kill, an object activation) is delivered to exactly
//! one script, and after *every* delivery the runner settles: it attaches
//! scripts to fresh summons, drops scripts for removed actors, and drains
//! the signal queue to completion.  Settling repeats until no work remains,
//! so a signal sent mid-dispatch is observed by its recipient within the
//! same frame, in send order.

use std::collections::BTreeMap;
use std::time::Duration;

use enc_core::{ActorId, Position, TemplateId};
use enc_host::{Signal, Targeting};
use enc_script::{EncounterScript, HostEvent, ScriptRegistry};

use crate::observer::{EncounterObserver, NoopObserver};
use crate::world::World;
use crate::SimResult;

/// Drives scripts against a [`World`].  See module docs for the dispatch
/// and settling contract.
pub struct EncounterRunner<O: EncounterObserver = NoopObserver> {
    world:    World,
    registry: ScriptRegistry,
    scripts:  BTreeMap<ActorId, Box<dyn EncounterScript>>,
    observer: O,
    elapsed:  Duration,
    /// Deliveries made during the current frame, reported to the observer.
    frame_dispatches: usize,
}

impl EncounterRunner<NoopObserver> {
    pub fn new(world: World, registry: ScriptRegistry) -> Self {
        Self::with_observer(world, registry, NoopObserver)
    }
}

impl<O: EncounterObserver> EncounterRunner<O> {
    pub fn with_observer(world: World, registry: ScriptRegistry, observer: O) -> Self {
        Self {
            world,
            registry,
            scripts: BTreeMap::new(),
            observer,
            elapsed: Duration::ZERO,
            frame_dispatches: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// `true` if `actor` currently has a script instance attached.
    pub fn is_scripted(&self, actor: ActorId) -> bool {
        self.scripts.contains_key(&actor)
    }

    // ── External drivers ──────────────────────────────────────────────────

    /// Place an actor.  If its template is registered, a script instance is
    /// attached and receives `Reset` immediately.
    pub fn spawn(&mut self, template: TemplateId, position: Position) -> SimResult<ActorId> {
        let id = self.world.insert_actor(template, position)?;
        if let Some(script) = self.registry.instantiate(template, id) {
            self.scripts.insert(id, script);
            self.deliver(id, HostEvent::Reset);
            self.settle();
        }
        Ok(id)
    }

    /// Remove an actor and its script outright.
    pub fn despawn(&mut self, actor: ActorId) {
        self.world.remove_actor(actor);
        self.scripts.remove(&actor);
        self.settle();
    }

    /// A player interacts with `object` (a lever, a console).
    pub fn activate(&mut self, object: ActorId) {
        self.deliver(object, HostEvent::Activated);
        self.settle();
    }

    /// Put `actor` into combat against `instigator` and tell its script.
    pub fn engage(&mut self, actor: ActorId, instigator: ActorId) {
        if !self.world.is_alive(actor) || !self.world.is_alive(instigator) {
            return;
        }
        self.world.engage_actor(actor, instigator);
        self.deliver(actor, HostEvent::Engaged(instigator));
        self.settle();
    }

    /// Kill `victim`.  Its script sees `Died`; a known killer's script sees
    /// `KilledUnit`.
    pub fn kill(&mut self, victim: ActorId, killer: Option<ActorId>) {
        self.world.kill(victim);
        self.deliver(victim, HostEvent::Died(killer));
        if let Some(killer) = killer {
            self.deliver(killer, HostEvent::KilledUnit(victim));
        }
        self.settle();
    }

    /// Re-deliver `Reset` to an actor's script (respawn in place).
    pub fn reset(&mut self, actor: ActorId) {
        self.deliver(actor, HostEvent::Reset);
        self.settle();
    }

    /// Advance one frame: host timers first, then one `Tick` per live
    /// scripted actor in ascending id order, settling after each.
    pub fn tick(&mut self, dt: Duration) {
        self.frame_dispatches = 0;
        self.observer.on_frame_start(self.elapsed);

        self.world.advance(dt);
        self.settle();

        let ids: Vec<ActorId> = self.scripts.keys().copied().collect();
        for id in ids {
            if !self.world.is_alive(id) {
                continue;
            }
            // An actor whose every attacker died evades before it ticks.
            if self.world.in_combat(id) && !self.world.has_living_attacker(id) {
                self.world.leave_combat(id);
                self.deliver(id, HostEvent::TargetLost);
                self.settle();
            }
            if !self.world.is_alive(id) {
                continue;
            }
            self.deliver(id, HostEvent::Tick(dt));
            self.settle();
        }

        self.elapsed += dt;
        self.observer.on_frame_end(self.elapsed, self.frame_dispatches);
    }

    /// Run `frames` frames of `dt` each.
    pub fn run_frames(&mut self, frames: usize, dt: Duration) {
        for _ in 0..frames {
            self.tick(dt);
        }
    }

    /// Tear down, yielding the world for post-run inspection.
    pub fn into_world(self) -> World {
        self.world
    }

    // ── Dispatch core ─────────────────────────────────────────────────────

    fn deliver(&mut self, actor: ActorId, event: HostEvent) {
        let Some(script) = self.scripts.get_mut(&actor) else {
            return;
        };
        self.observer.on_dispatch(actor, &event);
        self.frame_dispatches += 1;
        event.deliver(script.as_mut(), actor, &mut self.world);
    }

    /// Drain spawns, removals, and signals until the world is quiet.
    fn settle(&mut self) {
        while self.world.has_pending_work() {
            for (id, owner) in self.world.drain_spawns() {
                self.attach(id, owner);
            }
            for id in self.world.drain_removals() {
                self.scripts.remove(&id);
            }
            while let Some((to, signal)) = self.world.pop_signal() {
                self.route(to, signal);
            }
        }
    }

    fn attach(&mut self, id: ActorId, owner: ActorId) {
        let Some(template) = self.world.arena().get(id).map(|r| r.template) else {
            return;
        };
        let Some(script) = self.registry.instantiate(template, id) else {
            return;
        };
        self.scripts.insert(id, script);
        self.deliver(id, HostEvent::Reset);
        self.deliver(id, HostEvent::SummonedBy(owner));
    }

    fn route(&mut self, to: ActorId, signal: Signal) {
        match signal {
            // Engage is host-visible: pull the recipient into combat before
            // its script hears about it.  Already-fighting recipients are
            // left alone.
            Signal::Engage(instigator) => {
                if self.world.is_alive(to)
                    && !self.world.in_combat(to)
                    && self.world.is_alive(instigator)
                {
                    self.world.engage_actor(to, instigator);
                    self.deliver(to, HostEvent::Engaged(instigator));
                }
            }
            other => self.deliver(to, HostEvent::Signal(other)),
        }
    }
}

impl<O: EncounterObserver> std::fmt::Debug for EncounterRunner<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncounterRunner")
            .field("actors", &self.world.arena().len())
            .field("scripted", &self.scripts.len())
            .field("elapsed", &self.elapsed)
            .finish()
    }
}
