//! `enc-events` — the per-actor timed event scheduler.
//!
//! # Crate layout
//!
//! | Module        | Contents                                   |
//! |---------------|--------------------------------------------|
//! | [`scheduler`] | `EventScheduler`, `DelayRange`             |
//!
//! # Execution model (summary)
//!
//! Every scripted actor owns one or two `EventScheduler`s.  Each host tick:
//!
//! ```text
//! scheduler.update(dt);                       // advance the elapsed cursor
//! while let Some(event) = scheduler.next_ready() {
//!     dispatch(event);                        // may start a cast
//!     if host.is_acting(me) { break; }        // busy rule: stop draining
//! }
//! ```
//!
//! Repetition is never automatic: a consumer that wants an event again calls
//! [`EventScheduler::repeat`] after dispatching it, which lets call sites
//! change the interval from one arming to the next.

pub mod scheduler;

#[cfg(test)]
mod tests;

pub use scheduler::{DelayRange, EventScheduler};
