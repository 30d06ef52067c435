//! `enc-core` — foundational types for the `rust_enc` encounter scripting
//! framework.
//!
//! This crate is a dependency of every other `enc-*` crate.  It intentionally
//! has no `enc-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `ActorId`, `TemplateId`, `EventId`, `AbilityId`, …      |
//! | [`gate`]      | `GateState` — shared encounter-attempt tri-state        |
//! | [`position`]  | `Position` — spawn-point coordinates plus facing        |
//! | [`rng`]       | `EncounterRng` (per-actor), `WorldRng` (global)         |
//! | [`error`]     | `EncError`, `EncResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod gate;
pub mod ids;
pub mod position;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EncError, EncResult};
pub use gate::GateState;
pub use ids::{AbilityId, ActorId, EventId, GateKey, LineId, PathId, TemplateId};
pub use position::Position;
pub use rng::{EncounterRng, WorldRng};
