//! `EventScheduler` — ordered queue of delayed, manually re-armed events.
//!
//! # Why this shape
//!
//! Encounter scripts fire a handful of abilities on staggered, partly
//! randomized timers.  Storing one countdown per event and decrementing all
//! of them each tick works but makes "which event is due first?" an O(n)
//! scan.  Instead the scheduler keeps a monotonic `elapsed` cursor and maps
//! absolute fire-at instants to the events due then:
//!
//! ```text
//! BTreeMap<fire_at, Vec<EventId>>      elapsed: Duration
//! ```
//!
//! `update(dt)` only advances the cursor; `next_ready` pops due events in
//! deadline order, ties broken by insertion order within the `Vec`.  For a
//! boss with 3–6 pending events the map is tiny and every operation is
//! effectively constant time.

use std::collections::BTreeMap;
use std::time::Duration;

use enc_core::{EncounterRng, EventId};

// ── DelayRange ────────────────────────────────────────────────────────────────

/// An inclusive `[min, max]` delay window sampled uniformly at schedule time.
///
/// A fixed delay is the degenerate window `min == max`; `From<Duration>`
/// builds one, so call sites can pass a plain `Duration` wherever a range is
/// accepted, and `(Duration, Duration)` converts through
/// [`between`](Self::between).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    /// A fixed delay (`min == max`).
    pub const fn fixed(delay: Duration) -> Self {
        Self { min: delay, max: delay }
    }

    /// A uniform window.  Swaps the bounds if given in the wrong order.
    pub fn between(a: Duration, b: Duration) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Sample a delay uniformly from the window (inclusive), at millisecond
    /// granularity.  Fixed windows never touch the RNG, so interleaving fixed
    /// and randomized schedules does not perturb the random stream.
    pub fn sample(&self, rng: &mut EncounterRng) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        Duration::from_millis(rng.gen_range(min_ms..=max_ms))
    }
}

impl From<Duration> for DelayRange {
    fn from(delay: Duration) -> Self {
        Self::fixed(delay)
    }
}

impl From<(Duration, Duration)> for DelayRange {
    fn from((a, b): (Duration, Duration)) -> Self {
        Self::between(a, b)
    }
}

// ── EventScheduler ────────────────────────────────────────────────────────────

/// Ordered queue of delayed events for one actor.
///
/// Owned exclusively by that actor's script; never shared.  See the crate
/// docs for the per-tick drain loop and the manual-repeat contract.
#[derive(Default)]
pub struct EventScheduler {
    /// Monotonic time advanced by [`update`](Self::update).
    elapsed: Duration,
    /// Fire-at instant → events due then, in insertion order.
    queue: BTreeMap<Duration, Vec<EventId>>,
    /// Cached total entry count for O(1) `len()`.
    pending: usize,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to become ready after a delay sampled from `delay`.
    ///
    /// The same event id may be scheduled more than once; each entry fires
    /// independently.
    pub fn schedule(
        &mut self,
        event: EventId,
        delay: impl Into<DelayRange>,
        rng:   &mut EncounterRng,
    ) {
        let fire_at = self.elapsed + delay.into().sample(rng);
        self.queue.entry(fire_at).or_default().push(event);
        self.pending += 1;
    }

    /// Re-arm a just-fired event.
    ///
    /// Identical to [`schedule`](Self::schedule) — the separate name exists
    /// to mark the intent at call sites.  Repetition is always explicit: a
    /// consumer that does not call `repeat` has cancelled the cycle, and one
    /// that does may pass a different window than the original (phase changes
    /// routinely shorten or lengthen their own next interval).
    pub fn repeat(
        &mut self,
        event: EventId,
        delay: impl Into<DelayRange>,
        rng:   &mut EncounterRng,
    ) {
        self.schedule(event, delay, rng);
    }

    /// Advance the elapsed cursor by `dt`.  Never fires anything by itself.
    pub fn update(&mut self, dt: Duration) {
        self.elapsed += dt;
    }

    /// Pop the next due event, or `None` if nothing is ready yet.
    ///
    /// Events come out ordered by the instant they became ready, ties broken
    /// by insertion order.  Callers drain in a loop and must re-check their
    /// busy predicate between pops — a fired event may start a cast that
    /// should suppress the rest of the tick's events.
    pub fn next_ready(&mut self) -> Option<EventId> {
        let (&fire_at, due) = self.queue.iter_mut().next()?;
        if fire_at > self.elapsed {
            return None;
        }
        // Non-empty by construction: emptied keys are removed below.
        let event = due.remove(0);
        if due.is_empty() {
            self.queue.remove(&fire_at);
        }
        self.pending -= 1;
        Some(event)
    }

    /// Remove every pending entry for `event`.
    pub fn cancel(&mut self, event: EventId) {
        self.queue.retain(|_, due| {
            due.retain(|&e| {
                if e == event {
                    self.pending -= 1;
                    false
                } else {
                    true
                }
            });
            !due.is_empty()
        });
    }

    /// Clear all pending events.  The elapsed cursor is kept: cancellation
    /// resets the actor's agenda, not its clock.
    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.pending = 0;
    }

    /// Total pending entries.
    pub fn len(&self) -> usize {
        self.pending
    }

    /// Entries already due at the current cursor — the most `next_ready` can
    /// pop without a further `update`.  Drain loops snapshot this before
    /// popping so an event re-armed at zero delay joins the next tick's batch
    /// instead of the one being drained.
    pub fn ready_len(&self) -> usize {
        self.queue.range(..=self.elapsed).map(|(_, due)| due.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }

    /// Elapsed time accumulated via `update`.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time until the earliest pending event becomes ready (zero if already
    /// due), or `None` if the queue is empty.
    pub fn next_deadline(&self) -> Option<Duration> {
        let (&fire_at, _) = self.queue.iter().next()?;
        Some(fire_at.saturating_sub(self.elapsed))
    }
}
