//! `enc-encounter` — the encounter state machines.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`phase`]       | `Phase`, `PhaseController` — per-actor lifecycle      |
//! | [`gate`]        | `InteractionGate` — lever/door arming an encounter    |
//! | [`coordinator`] | `Coordinator` — boss ↔ auxiliary-ring signaling       |
//!
//! # Lifecycle (summary)
//!
//! ```text
//!            gate.activate()            intro chain done
//!   Idle ───────────────────► Preparing ────────────────► Active
//!    ▲                                                      │ │
//!    │ finish_reset()                         target lost   │ │ death
//!    └───────────── Evading ◄───────────────────────────────┘ └──► Dead
//! ```
//!
//! Transitions are monotonic within one attempt; only `finish_reset` returns
//! to `Idle`, and `Dead` is terminal.  Illegal transition requests are
//! ignored rather than errored — calling `evade` twice leaves exactly the
//! state one call leaves.

pub mod coordinator;
pub mod gate;
pub mod phase;

#[cfg(test)]
mod tests;

pub use coordinator::{Coordinator, SpawnSlot};
pub use gate::InteractionGate;
pub use phase::{Phase, PhaseController};
