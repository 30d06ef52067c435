//! `PhaseController` — the per-actor encounter lifecycle state machine.

use std::time::Duration;

use enc_core::EventId;
use enc_events::EventScheduler;

/// Where one actor stands in the current encounter attempt.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No target engaged; out-of-combat behavior only.
    #[default]
    Idle,
    /// Intro sequence running, combat not yet open.
    Preparing,
    /// Combat event loop running.
    Active,
    /// Targets lost; resetting.
    Evading,
    /// Terminal for this attempt.
    Dead,
}

/// Phase state plus the two event queues it gates.
///
/// Combat events only run while `Active` and honor the busy rule: once a
/// dispatched event leaves the actor mid-action, no further events fire that
/// tick.  Out-of-combat events run while `Idle`/`Preparing` with no busy
/// check and no target requirement — intro chains and idle channel refreshes
/// live there.
///
/// Transition methods return `true` if the phase changed, `false` if the
/// request was ignored as illegal from the current phase.
pub struct PhaseController {
    phase:  Phase,
    combat: EventScheduler,
    idle:   EventScheduler,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseController {
    pub fn new() -> Self {
        Self {
            phase:  Phase::Idle,
            combat: EventScheduler::new(),
            idle:   EventScheduler::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The combat event queue (drained while `Active`).
    pub fn combat_events(&mut self) -> &mut EventScheduler {
        &mut self.combat
    }

    /// The out-of-combat event queue (drained while `Idle`/`Preparing`).
    pub fn idle_events(&mut self) -> &mut EventScheduler {
        &mut self.idle
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// `Idle → Preparing`: the gate armed the encounter.
    pub fn begin_preparing(&mut self) -> bool {
        self.transition(Phase::Preparing, matches!(self.phase, Phase::Idle))
    }

    /// `Idle | Preparing → Active`: intro done, or pulled straight into
    /// combat without an intro.
    pub fn activate(&mut self) -> bool {
        self.transition(
            Phase::Active,
            matches!(self.phase, Phase::Idle | Phase::Preparing),
        )
    }

    /// `Preparing | Active → Evading`: all valid targets lost.
    ///
    /// Cancels both event queues.  Calling again while already `Evading` (or
    /// after the reset completed) is a no-op — evading is idempotent-safe.
    pub fn evade(&mut self) -> bool {
        let ok = self.transition(
            Phase::Evading,
            matches!(self.phase, Phase::Preparing | Phase::Active),
        );
        if ok {
            self.combat.cancel_all();
            self.idle.cancel_all();
        }
        ok
    }

    /// `Evading → Idle`: reset bookkeeping finished.
    pub fn finish_reset(&mut self) -> bool {
        self.transition(Phase::Idle, matches!(self.phase, Phase::Evading))
    }

    /// `* → Dead` (except from `Dead`): terminal; cancels all scheduling.
    pub fn die(&mut self) -> bool {
        let ok = self.transition(Phase::Dead, self.phase != Phase::Dead);
        if ok {
            self.combat.cancel_all();
            self.idle.cancel_all();
        }
        ok
    }

    fn transition(&mut self, to: Phase, legal: bool) -> bool {
        if legal {
            self.phase = to;
        }
        legal
    }

    // ── Tick-time drains ──────────────────────────────────────────────────

    /// Advance and drain the combat queue.
    ///
    /// `busy` is consulted before the first pop and after every dispatch; a
    /// `true` stops the drain for this tick, leaving remaining due events
    /// pending.  `dispatch` receives the queue back so it can `repeat` the
    /// fired event with whatever interval the current phase calls for.  The
    /// drain is capped at the batch due when the tick began, so a zero-delay
    /// re-arm fires on the next tick rather than re-entering this one.
    ///
    /// `ctx` is threaded through both closures so a single `&mut` resource
    /// (typically the host) can be consulted by `busy` and mutated by
    /// `dispatch` without the two closures aliasing it.
    pub fn run_combat_events<C, B, D>(
        &mut self,
        dt:       Duration,
        ctx:      &mut C,
        mut busy: B,
        mut dispatch: D,
    ) where
        C: ?Sized,
        B: FnMut(&mut C) -> bool,
        D: FnMut(&mut EventScheduler, &mut C, EventId),
    {
        if self.phase != Phase::Active {
            return;
        }
        self.combat.update(dt);
        if busy(ctx) {
            return;
        }
        // Drain at most the batch that was due when the tick began; an event
        // re-armed at zero delay fires next tick, not in a loop this tick.
        let mut batch = self.combat.ready_len();
        while batch > 0 {
            let Some(event) = self.combat.next_ready() else {
                break;
            };
            batch -= 1;
            dispatch(&mut self.combat, ctx, event);
            if busy(ctx) {
                return;
            }
        }
    }

    /// Advance and drain the out-of-combat queue (no busy gating, no target
    /// requirement).
    pub fn run_idle_events<C, D>(&mut self, dt: Duration, ctx: &mut C, mut dispatch: D)
    where
        C: ?Sized,
        D: FnMut(&mut EventScheduler, &mut C, EventId),
    {
        if !matches!(self.phase, Phase::Idle | Phase::Preparing) {
            return;
        }
        self.idle.update(dt);
        let mut batch = self.idle.ready_len();
        while batch > 0 {
            let Some(event) = self.idle.next_ready() else {
                break;
            };
            batch -= 1;
            dispatch(&mut self.idle, ctx, event);
        }
    }
}
