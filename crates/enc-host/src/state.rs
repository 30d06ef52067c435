//! `SharedState` — the host's per-instance encounter-state store.

use enc_core::{GateKey, GateState};

/// Access to the shared gate store.
///
/// One gate per encounter, keyed by `GateKey`.  Persistence across sessions
/// is entirely the host's concern; the framework only reads and writes the
/// tri-state value.  Single-writer-at-a-time is guaranteed by the encounter's
/// own phase discipline, not by this trait.
pub trait SharedState {
    /// Current state for `key`.  Unset keys read as `NotStarted`.
    fn gate(&self, key: GateKey) -> GateState;

    fn set_gate(&mut self, key: GateKey, state: GateState);
}
