//! `World` — the in-memory reference host.
//!
//! Implements every [`enc_host`] capability over an [`ActorArena`] plus a
//! parallel combat-state table (same slot-indexed SoA layout the arena
//! hands out).  It models exactly as much combat as the scripting contracts
//! need: liveness, threat lists, cast-in-progress with per-ability cast
//! times, flags, gates, and corpse-timed despawns.  Damage, auras, and
//! pathing physics are out of scope — casts, speech, swings, and path starts
//! are recorded for inspection instead of simulated.

use std::collections::VecDeque;
use std::time::Duration;

use enc_actor::{ActorArena, ActorRecord};
use enc_core::{
    AbilityId, ActorId, EncResult, GateKey, GateState, LineId, PathId, Position, TemplateId,
    WorldRng,
};
use enc_host::{
    ActorActions, ActorFlags, CastTarget, LifetimePolicy, SharedState, Signal, Signals, Spawner,
    TargetStrategy, Targeting,
};
use rustc_hash::FxHashMap;

// ── Records ───────────────────────────────────────────────────────────────────

/// One cast accepted by the host, in acceptance order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CastRecord {
    pub caster:  ActorId,
    pub ability: AbilityId,
    /// Resolved target (the caster itself for self-casts).
    pub target:  ActorId,
}

/// Host-side combat bookkeeping for one arena slot.
#[derive(Clone)]
struct CombatState {
    target:    ActorId,
    in_combat: bool,
    flags:     ActorFlags,
    /// Ability being cast and time remaining.
    cast:      Option<(AbilityId, Duration)>,
    /// Actors that attacked this one (its hostiles for target selection).
    threat:    Vec<ActorId>,
    summoner:  ActorId,
    lifetime:  LifetimePolicy,
    /// Countdown to corpse despawn, armed on death for `CorpseTimed` actors.
    corpse_in: Option<Duration>,
}

impl Default for CombatState {
    fn default() -> Self {
        Self {
            target:    ActorId::INVALID,
            in_combat: false,
            flags:     ActorFlags::empty(),
            cast:      None,
            threat:    Vec::new(),
            summoner:  ActorId::INVALID,
            lifetime:  LifetimePolicy::Persistent,
            corpse_in: None,
        }
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// The reference host.  See module docs.
pub struct World {
    arena:      ActorArena,
    combat:     Vec<CombatState>,
    cast_times: FxHashMap<AbilityId, Duration>,
    gates:      FxHashMap<GateKey, GateState>,
    rng:        WorldRng,

    /// Signals queued via [`Signals::signal`], drained by the runner after
    /// every dispatch.
    signals: VecDeque<(ActorId, Signal)>,
    /// Fresh summons `(new actor, summoner)` awaiting script attachment.
    spawn_log: Vec<(ActorId, ActorId)>,
    /// Actors removed host-side (corpse expiry, despawn-by-template) whose
    /// scripts the runner must drop.
    removal_log: Vec<ActorId>,

    // Recorded effects, in order, for assertions and tracing.
    pub casts:  Vec<CastRecord>,
    pub speech: Vec<(ActorId, LineId)>,
    pub paths:  Vec<(ActorId, PathId)>,
    pub swings: Vec<(ActorId, ActorId)>,
}

impl World {
    /// A world with room for `capacity` simultaneous actors.
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self {
            arena:       ActorArena::new(capacity),
            combat:      vec![CombatState::default(); capacity],
            cast_times:  FxHashMap::default(),
            gates:       FxHashMap::default(),
            rng:         WorldRng::new(seed),
            signals:     VecDeque::new(),
            spawn_log:   Vec::new(),
            removal_log: Vec::new(),
            casts:       Vec::new(),
            speech:      Vec::new(),
            paths:       Vec::new(),
            swings:      Vec::new(),
        }
    }

    /// Configure how long casting `ability` takes.  Unconfigured abilities
    /// are instant and never leave the caster "acting".
    pub fn set_cast_time(&mut self, ability: AbilityId, time: Duration) {
        self.cast_times.insert(ability, time);
    }

    pub fn arena(&self) -> &ActorArena {
        &self.arena
    }

    // ── Lifecycle (runner-facing) ─────────────────────────────────────────

    /// Place a new actor.  Combat state for the slot starts fresh.
    pub fn insert_actor(&mut self, template: TemplateId, position: Position) -> EncResult<ActorId> {
        let id = self.arena.insert(ActorRecord::new(template, position))?;
        self.combat[id.index()] = CombatState::default();
        Ok(id)
    }

    /// Remove an actor outright (no corpse).  Stale ids are a no-op.
    pub fn remove_actor(&mut self, id: ActorId) {
        if self.arena.remove(id).is_some() {
            self.purge_from_threat(id);
        }
    }

    /// Mark `victim` dead: interrupts its cast, drops it from combat, and
    /// arms its corpse timer if it despawns corpse-timed.
    pub fn kill(&mut self, victim: ActorId) {
        let Some(record) = self.arena.get_mut(victim) else {
            return;
        };
        record.alive = false;
        let state = &mut self.combat[victim.index()];
        state.cast = None;
        state.in_combat = false;
        state.target = ActorId::INVALID;
        state.threat.clear();
        if let LifetimePolicy::CorpseTimed(linger) = state.lifetime {
            state.corpse_in = Some(linger);
        }
    }

    /// Advance cast and corpse timers by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        let ids: Vec<ActorId> = self.arena.iter().map(|(id, _)| id).collect();
        for id in ids {
            let state = &mut self.combat[id.index()];
            if let Some((ability, remaining)) = state.cast {
                let left = remaining.saturating_sub(dt);
                state.cast = (left > Duration::ZERO).then_some((ability, left));
            }
            if let Some(remaining) = state.corpse_in {
                let left = remaining.saturating_sub(dt);
                if left > Duration::ZERO {
                    state.corpse_in = Some(left);
                } else {
                    state.corpse_in = None;
                    self.arena.remove(id);
                    self.removal_log.push(id);
                }
            }
        }
    }

    /// Put `actor` into combat against `target` and vice versa.
    pub fn engage_actor(&mut self, actor: ActorId, target: ActorId) {
        if !self.arena.is_alive(actor) || !self.arena.is_alive(target) {
            return;
        }
        let state = &mut self.combat[actor.index()];
        state.in_combat = true;
        state.target = target;
        if !state.threat.contains(&target) {
            state.threat.push(target);
        }
        // Mutual awareness: the target knows its attacker.
        let other = &mut self.combat[target.index()];
        other.in_combat = true;
        if !other.threat.contains(&actor) {
            other.threat.push(actor);
        }
        if other.target.is_invalid() {
            other.target = actor;
        }
    }

    /// Clear `actor`'s combat state (evade handoff).
    pub fn leave_combat(&mut self, actor: ActorId) {
        if !self.arena.contains(actor) {
            return;
        }
        let state = &mut self.combat[actor.index()];
        state.in_combat = false;
        state.target = ActorId::INVALID;
        state.threat.clear();
    }

    /// `true` if any actor on `actor`'s threat list is still alive.
    pub fn has_living_attacker(&self, actor: ActorId) -> bool {
        self.state(actor)
            .is_some_and(|s| s.threat.iter().any(|&t| self.arena.is_alive(t)))
    }

    // ── Runner drains ─────────────────────────────────────────────────────

    pub(crate) fn pop_signal(&mut self) -> Option<(ActorId, Signal)> {
        self.signals.pop_front()
    }

    pub(crate) fn drain_spawns(&mut self) -> Vec<(ActorId, ActorId)> {
        std::mem::take(&mut self.spawn_log)
    }

    pub(crate) fn drain_removals(&mut self) -> Vec<ActorId> {
        std::mem::take(&mut self.removal_log)
    }

    pub(crate) fn has_pending_work(&self) -> bool {
        !self.signals.is_empty() || !self.spawn_log.is_empty() || !self.removal_log.is_empty()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn state(&self, id: ActorId) -> Option<&CombatState> {
        self.arena.contains(id).then(|| &self.combat[id.index()])
    }

    fn state_mut(&mut self, id: ActorId) -> Option<&mut CombatState> {
        self.arena
            .contains(id)
            .then(|| &mut self.combat[id.index()])
    }

    fn purge_from_threat(&mut self, gone: ActorId) {
        for state in &mut self.combat {
            state.threat.retain(|&t| t != gone);
            if state.target == gone {
                state.target = ActorId::INVALID;
            }
        }
    }
}

// ── Host trait implementations ────────────────────────────────────────────────

impl ActorActions for World {
    fn cast(&mut self, caster: ActorId, target: CastTarget, ability: AbilityId) -> bool {
        if !self.arena.is_alive(caster) {
            return false;
        }
        if self.combat[caster.index()].cast.is_some() {
            return false;
        }
        let resolved = match target {
            CastTarget::Caster  => Some(caster),
            CastTarget::Victim  => self.current_target(caster),
            CastTarget::At(id)  => self.arena.contains(id).then_some(id),
        };
        let Some(resolved) = resolved else {
            return false;
        };

        self.casts.push(CastRecord { caster, ability, target: resolved });
        let time = self.cast_times.get(&ability).copied().unwrap_or(Duration::ZERO);
        if time > Duration::ZERO {
            self.combat[caster.index()].cast = Some((ability, time));
        }
        true
    }

    fn is_acting(&self, actor: ActorId) -> bool {
        self.state(actor).is_some_and(|s| s.cast.is_some())
    }

    fn interrupt(&mut self, actor: ActorId) {
        if let Some(state) = self.state_mut(actor) {
            state.cast = None;
        }
    }

    fn melee_attack_if_ready(&mut self, actor: ActorId) {
        let Some(target) = self.current_target(actor) else {
            return;
        };
        self.swings.push((actor, target));
    }

    fn move_along_path(&mut self, actor: ActorId, path: PathId) {
        if self.arena.is_alive(actor) {
            self.paths.push((actor, path));
        }
    }

    fn speak(&mut self, actor: ActorId, line: LineId) {
        // Presence, not liveness: death lines are spoken by a corpse whose
        // record is still in the arena.
        if self.arena.contains(actor) {
            self.speech.push((actor, line));
        }
    }

    fn engage(&mut self, actor: ActorId, target: ActorId) {
        self.engage_actor(actor, target);
    }

    fn set_flags(&mut self, actor: ActorId, flags: ActorFlags) {
        if let Some(state) = self.state_mut(actor) {
            state.flags |= flags;
        }
    }

    fn clear_flags(&mut self, actor: ActorId, flags: ActorFlags) {
        if let Some(state) = self.state_mut(actor) {
            state.flags &= !flags;
        }
    }

    fn flags(&self, actor: ActorId) -> ActorFlags {
        self.state(actor).map(|s| s.flags).unwrap_or_default()
    }
}

impl Targeting for World {
    fn current_target(&self, actor: ActorId) -> Option<ActorId> {
        let state = self.state(actor)?;
        self.arena.is_alive(state.target).then_some(state.target)
    }

    fn select_target(&mut self, actor: ActorId, strategy: TargetStrategy) -> Option<ActorId> {
        let state = self.state(actor)?;
        let hostiles: Vec<ActorId> = state
            .threat
            .iter()
            .copied()
            .filter(|&t| {
                self.arena.is_alive(t)
                    && !self.combat[t.index()].flags.contains(ActorFlags::UNTARGETABLE)
            })
            .collect();
        match strategy {
            TargetStrategy::Current => self.current_target(actor),
            TargetStrategy::Random  => self.rng.choose(&hostiles).copied(),
            TargetStrategy::Nearest => hostiles.into_iter().min_by(|&a, &b| {
                let da = self.distance(actor, a);
                let db = self.distance(actor, b);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
    }

    fn is_alive(&self, actor: ActorId) -> bool {
        self.arena.is_alive(actor)
    }

    fn in_combat(&self, actor: ActorId) -> bool {
        self.state(actor).is_some_and(|s| s.in_combat)
    }

    fn distance(&self, a: ActorId, b: ActorId) -> f32 {
        match (self.arena.get(a), self.arena.get(b)) {
            (Some(ra), Some(rb)) => ra.position.distance_to(&rb.position),
            _ => f32::INFINITY,
        }
    }
}

impl Spawner for World {
    fn summon(
        &mut self,
        owner:    ActorId,
        template: TemplateId,
        position: Position,
        lifetime: LifetimePolicy,
    ) -> Option<ActorId> {
        // A full arena refuses the summon; callers retry on their next
        // validation pass.
        let id = self.insert_actor(template, position).ok()?;
        let state = &mut self.combat[id.index()];
        state.summoner = owner;
        state.lifetime = lifetime;
        self.spawn_log.push((id, owner));
        Some(id)
    }

    fn despawn_by_template(&mut self, owner: ActorId, template: TemplateId) {
        let doomed: Vec<ActorId> = self
            .arena
            .iter()
            .filter(|&(id, record)| {
                record.template == template && self.combat[id.index()].summoner == owner
            })
            .map(|(id, _)| id)
            .collect();
        for id in doomed {
            self.arena.remove(id);
            self.purge_from_threat(id);
            self.removal_log.push(id);
        }
    }
}

impl SharedState for World {
    fn gate(&self, key: GateKey) -> GateState {
        self.gates.get(&key).copied().unwrap_or_default()
    }

    fn set_gate(&mut self, key: GateKey, state: GateState) {
        self.gates.insert(key, state);
    }
}

impl Signals for World {
    fn signal(&mut self, to: ActorId, signal: Signal) {
        self.signals.push_back((to, signal));
    }
}
