//! Unit tests for enc-events.

use std::time::Duration;

use enc_core::{ActorId, EncounterRng, EventId};

use crate::{DelayRange, EventScheduler};

// ── Helpers ───────────────────────────────────────────────────────────────────

const EV_A: EventId = EventId(1);
const EV_B: EventId = EventId(2);
const EV_C: EventId = EventId(3);

fn rng() -> EncounterRng {
    EncounterRng::new(42, ActorId::new(0, 0))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ── DelayRange ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod delay_range {
    use super::*;

    #[test]
    fn fixed_never_varies() {
        let mut r = rng();
        let range = DelayRange::fixed(ms(500));
        for _ in 0..8 {
            assert_eq!(range.sample(&mut r), ms(500));
        }
    }

    #[test]
    fn sample_within_inclusive_bounds() {
        let mut r = rng();
        let range = DelayRange::between(ms(100), ms(200));
        for _ in 0..256 {
            let d = range.sample(&mut r);
            assert!(d >= ms(100) && d <= ms(200), "sampled {d:?}");
        }
    }

    #[test]
    fn between_swaps_reversed_bounds() {
        let range = DelayRange::between(ms(200), ms(100));
        assert_eq!(range.min, ms(100));
        assert_eq!(range.max, ms(200));
    }

    #[test]
    fn from_duration_is_fixed() {
        let range: DelayRange = ms(750).into();
        assert_eq!(range, DelayRange::fixed(ms(750)));
    }
}

// ── EventScheduler ────────────────────────────────────────────────────────────

#[cfg(test)]
mod scheduler {
    use super::*;

    #[test]
    fn nothing_ready_before_delay_elapses() {
        let mut r = rng();
        let mut sched = EventScheduler::new();
        sched.schedule(EV_A, ms(1000), &mut r);

        sched.update(ms(999));
        assert_eq!(sched.next_ready(), None);

        sched.update(ms(1));
        assert_eq!(sched.next_ready(), Some(EV_A));
        assert_eq!(sched.next_ready(), None);
    }

    #[test]
    fn never_fires_before_cumulative_updates_reach_delay() {
        // Updates summing to >= delay are required, regardless of chunking.
        let mut r = rng();
        let mut sched = EventScheduler::new();
        sched.schedule(EV_A, ms(300), &mut r);
        for _ in 0..29 {
            sched.update(ms(10));
            assert_eq!(sched.next_ready(), None);
        }
        sched.update(ms(10));
        assert_eq!(sched.next_ready(), Some(EV_A));
    }

    #[test]
    fn ready_order_is_deadline_then_insertion() {
        let mut r = rng();
        let mut sched = EventScheduler::new();
        sched.schedule(EV_C, ms(200), &mut r);
        sched.schedule(EV_A, ms(100), &mut r);
        sched.schedule(EV_B, ms(100), &mut r);

        sched.update(ms(200));
        // EV_A and EV_B became ready first (at 100ms), A before B by insertion.
        assert_eq!(sched.next_ready(), Some(EV_A));
        assert_eq!(sched.next_ready(), Some(EV_B));
        assert_eq!(sched.next_ready(), Some(EV_C));
        assert_eq!(sched.next_ready(), None);
    }

    #[test]
    fn zero_delay_is_ready_immediately() {
        let mut r = rng();
        let mut sched = EventScheduler::new();
        sched.schedule(EV_A, ms(0), &mut r);
        assert_eq!(sched.next_ready(), Some(EV_A));
    }

    #[test]
    fn randomized_delay_fires_within_window() {
        let mut r = rng();
        let mut sched = EventScheduler::new();
        sched.schedule(EV_A, DelayRange::between(ms(100), ms(300)), &mut r);

        sched.update(ms(99));
        assert_eq!(sched.next_ready(), None, "fired before min delay");
        sched.update(ms(201));
        assert_eq!(sched.next_ready(), Some(EV_A), "not fired by max delay");
    }

    #[test]
    fn repeat_rearms_with_new_window() {
        let mut r = rng();
        let mut sched = EventScheduler::new();
        sched.schedule(EV_A, ms(100), &mut r);

        sched.update(ms(100));
        assert_eq!(sched.next_ready(), Some(EV_A));
        // Re-arm with a different (shorter) fixed interval.
        sched.repeat(EV_A, ms(50), &mut r);

        assert_eq!(sched.next_ready(), None);
        sched.update(ms(50));
        assert_eq!(sched.next_ready(), Some(EV_A));
    }

    #[test]
    fn no_repeat_means_no_refire() {
        let mut r = rng();
        let mut sched = EventScheduler::new();
        sched.schedule(EV_A, ms(100), &mut r);
        sched.update(ms(100));
        assert_eq!(sched.next_ready(), Some(EV_A));

        sched.update(ms(10_000));
        assert_eq!(sched.next_ready(), None);
        assert!(sched.is_empty());
    }

    #[test]
    fn cancel_all_then_empty_until_rescheduled() {
        let mut r = rng();
        let mut sched = EventScheduler::new();
        sched.schedule(EV_A, ms(10), &mut r);
        sched.schedule(EV_B, ms(20), &mut r);
        sched.cancel_all();

        sched.update(ms(1000));
        assert_eq!(sched.next_ready(), None);
        assert!(sched.is_empty());

        sched.schedule(EV_C, ms(5), &mut r);
        sched.update(ms(5));
        assert_eq!(sched.next_ready(), Some(EV_C));
    }

    #[test]
    fn cancel_removes_only_that_event() {
        let mut r = rng();
        let mut sched = EventScheduler::new();
        sched.schedule(EV_A, ms(10), &mut r);
        sched.schedule(EV_B, ms(10), &mut r);
        sched.schedule(EV_A, ms(20), &mut r);
        sched.cancel(EV_A);

        assert_eq!(sched.len(), 1);
        sched.update(ms(20));
        assert_eq!(sched.next_ready(), Some(EV_B));
        assert_eq!(sched.next_ready(), None);
    }

    #[test]
    fn cancel_all_keeps_elapsed_cursor() {
        let mut sched = EventScheduler::new();
        sched.update(ms(500));
        sched.cancel_all();
        assert_eq!(sched.elapsed(), ms(500));
    }

    #[test]
    fn next_deadline_reports_remaining_time() {
        let mut r = rng();
        let mut sched = EventScheduler::new();
        assert_eq!(sched.next_deadline(), None);

        sched.schedule(EV_A, ms(100), &mut r);
        assert_eq!(sched.next_deadline(), Some(ms(100)));

        sched.update(ms(40));
        assert_eq!(sched.next_deadline(), Some(ms(60)));

        sched.update(ms(100));
        assert_eq!(sched.next_deadline(), Some(ms(0)));
    }

    #[test]
    fn schedule_during_drain_lands_after_current_batch() {
        // Re-arming mid-drain with a nonzero delay must not fire this tick.
        let mut r = rng();
        let mut sched = EventScheduler::new();
        sched.schedule(EV_A, ms(10), &mut r);
        sched.schedule(EV_B, ms(10), &mut r);

        sched.update(ms(10));
        assert_eq!(sched.next_ready(), Some(EV_A));
        sched.repeat(EV_A, ms(30), &mut r);
        assert_eq!(sched.next_ready(), Some(EV_B));
        assert_eq!(sched.next_ready(), None);
    }

    #[test]
    fn ready_len_counts_only_the_due_batch() {
        let mut r = rng();
        let mut sched = EventScheduler::new();
        sched.schedule(EV_A, ms(10), &mut r);
        sched.schedule(EV_B, ms(10), &mut r);
        sched.schedule(EV_C, ms(50), &mut r);
        assert_eq!(sched.ready_len(), 0);

        sched.update(ms(10));
        assert_eq!(sched.ready_len(), 2);

        // A zero-delay re-arm joins the due batch, but a snapshot taken
        // before it does not.
        let batch = sched.ready_len();
        assert_eq!(sched.next_ready(), Some(EV_A));
        sched.repeat(EV_A, ms(0), &mut r);
        assert_eq!(sched.ready_len(), 2);
        assert_eq!(batch, 2);
    }
}
