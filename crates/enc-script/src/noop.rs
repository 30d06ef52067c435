//! A script that never reacts.

use std::time::Duration;

use enc_core::ActorId;
use enc_host::Host;

use crate::EncounterScript;

/// An [`EncounterScript`] that ignores every event.  Useful as a placeholder
/// for templates that only exist to be summoned and despawned.
pub struct NoopScript;

impl EncounterScript for NoopScript {
    fn on_tick(&mut self, _me: ActorId, _dt: Duration, _host: &mut dyn Host) {}
}
