//! `enc-actor` — actor storage for the `rust_enc` framework.
//!
//! # Crate layout
//!
//! | Module     | Contents                                             |
//! |------------|------------------------------------------------------|
//! | [`arena`]  | `ActorArena`, `ActorRecord` — generational slot table|
//! | [`ring`]   | `AuxiliaryRing` — fixed-count linked auxiliary set   |
//!
//! # Reference safety
//!
//! Actors reference each other by [`ActorId`](enc_core::ActorId), never by
//! pointer.  An id held across a despawn resolves to `None` — the arena bumps
//! the slot's generation on removal, so even a reused slot cannot be reached
//! through a stale handle.  All coordination code is written against this
//! "present or absent, never dangling" contract.

pub mod arena;
pub mod ring;

#[cfg(test)]
mod tests;

pub use arena::{ActorArena, ActorRecord};
pub use ring::AuxiliaryRing;
