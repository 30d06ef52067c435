//! Runner observer trait for progress reporting and trace collection.

use std::time::Duration;

use enc_core::ActorId;
use enc_script::HostEvent;

/// Callbacks invoked by [`EncounterRunner`][crate::EncounterRunner] at key
/// points in the frame loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — dispatch tracer
///
/// ```rust,ignore
/// struct Tracer;
///
/// impl EncounterObserver for Tracer {
///     fn on_dispatch(&mut self, actor: ActorId, event: &HostEvent) {
///         if !matches!(event, HostEvent::Tick(_)) {
///             println!("{actor}: {event:?}");
///         }
///     }
/// }
/// ```
pub trait EncounterObserver {
    /// Called at the start of each frame, before any actor is ticked.
    fn on_frame_start(&mut self, _elapsed: Duration) {}

    /// Called after each frame.  `dispatched` counts every event delivered
    /// during the frame, signals included.
    fn on_frame_end(&mut self, _elapsed: Duration, _dispatched: usize) {}

    /// Called for every event delivered to a script, ticks and signals alike.
    fn on_dispatch(&mut self, _actor: ActorId, _event: &HostEvent) {}
}

/// An [`EncounterObserver`] that does nothing.
pub struct NoopObserver;

impl EncounterObserver for NoopObserver {}
