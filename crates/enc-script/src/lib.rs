//! `enc-script` — the script extension point of the `rust_enc` framework.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`event`]    | `HostEvent` — the typed per-actor inbox                   |
//! | [`script`]   | `EncounterScript` trait                                   |
//! | [`registry`] | `ScriptRegistry` — template id → script factory           |
//! | [`noop`]     | `NoopScript` — placeholder that never reacts              |
//!
//! # Design notes
//!
//! The host does not call script methods directly; it pushes [`HostEvent`]s
//! onto each actor's inbox and the runner delivers them synchronously in
//! arrival order.  Per-encounter behavior variants are plain structs
//! implementing [`EncounterScript`], registered against a
//! [`TemplateId`](enc_core::TemplateId) — a lookup table, not a class
//! hierarchy.  Script state (schedulers, phase, coordination handles) lives
//! inside the script struct; world state lives with the host.

pub mod event;
pub mod noop;
pub mod registry;
pub mod script;

#[cfg(test)]
mod tests;

pub use event::HostEvent;
pub use noop::NoopScript;
pub use registry::ScriptRegistry;
pub use script::EncounterScript;
