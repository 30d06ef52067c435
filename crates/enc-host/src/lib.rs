//! `enc-host` — the seam between encounter scripts and the game engine.
//!
//! The framework never implements combat, casting, pathing, or persistence.
//! It consumes them through the capability traits here, which a host engine
//! implements over its own object model.  `enc-sim` ships an in-memory
//! reference implementation for tests and demos.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`actions`] | `ActorActions` — casting, movement, speech, flags          |
//! | [`targeting`] | `Targeting` — target queries and selection               |
//! | [`spawn`]   | `Spawner`, `LifetimePolicy`                                |
//! | [`state`]   | `SharedState` — the instance-state gate store              |
//! | [`signal`]  | `Signals`, `Signal` — same-tick cross-actor messages       |
//! | [`flags`]   | `ActorFlags` bitflags                                      |
//!
//! # Error policy
//!
//! None of these methods return `Result`.  A rejected cast reports `false`,
//! an absent target reports `None`, and scripts skip the effect for that
//! tick — the live-loop tolerance described in the framework docs.

pub mod actions;
pub mod flags;
pub mod signal;
pub mod spawn;
pub mod state;
pub mod targeting;

pub use actions::{ActorActions, CastTarget};
pub use flags::ActorFlags;
pub use signal::{Signal, Signals};
pub use spawn::{LifetimePolicy, Spawner};
pub use state::SharedState;
pub use targeting::{TargetStrategy, Targeting};

/// Everything a script can ask of its host, as one object-safe trait.
///
/// Scripts receive `&mut dyn Host` in every callback; the supertrait keeps
/// their signatures to a single parameter while hosts implement the five
/// capability traits separately.
pub trait Host: ActorActions + Targeting + Spawner + SharedState + Signals {}

impl<T: ActorActions + Targeting + Spawner + SharedState + Signals> Host for T {}
