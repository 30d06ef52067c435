//! `enc-sim` — drives encounter scripts against an in-memory host.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`world`]    | `World` — reference [`Host`](enc_host::Host) implementation|
//! | [`runner`]   | `EncounterRunner` — spawn/despawn, tick dispatch, signals  |
//! | [`observer`] | `EncounterObserver` trait, `NoopObserver`                  |
//! | [`error`]    | `SimError`, `SimResult`                                    |
//!
//! # Tick model
//!
//! The runner delivers one `Tick(dt)` per live scripted actor per frame, in
//! ascending actor-slot order (deterministic).  After **every** dispatch it
//! drains the world's signal queue to completion, so a signal sent by one
//! actor reaches its sibling — and any signals that sibling sends in
//! response — before the frame moves on.  This realizes the synchronous
//! cross-actor call chain of the scripting model without scripts ever
//! holding references to each other.
//!
//! There is no parallelism anywhere: the cooperative single-threaded model
//! is part of the scripting contract, not an implementation shortcut.

pub mod error;
pub mod observer;
pub mod runner;
pub mod world;


pub use error::{SimError, SimResult};
pub use observer::{EncounterObserver, NoopObserver};
pub use runner::EncounterRunner;
pub use world::{CastRecord, World};
