//! Framework error type.
//!
//! Errors are for construction and configuration only.  Inside a running
//! encounter, failure modes are absence conditions (stale actor reference,
//! rejected cast) handled by silent skip-and-continue — the tick path never
//! returns a `Result`.

use thiserror::Error;

/// The top-level error type for `enc-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EncError {
    #[error("actor arena full (capacity {capacity})")]
    ArenaFull { capacity: usize },
}

/// Shorthand result type for all `enc-*` crates.
pub type EncResult<T> = Result<T, EncError>;
