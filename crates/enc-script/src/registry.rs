//! `ScriptRegistry` — template id → script factory lookup.

use enc_core::{ActorId, TemplateId};
use rustc_hash::FxHashMap;

use crate::EncounterScript;

/// Constructor for one template's script, called per spawned actor.
///
/// Receives the new actor's id so scripts can seed their deterministic RNG
/// from it.
pub type ScriptFactory = Box<dyn Fn(ActorId) -> Box<dyn EncounterScript>>;

/// Maps actor templates to script factories.
///
/// Populated once at startup by encounter content, then read by the runner
/// at every spawn.  Templates with no entry spawn scriptless (the host's
/// default behavior applies).
#[derive(Default)]
pub struct ScriptRegistry {
    factories: FxHashMap<TemplateId, ScriptFactory>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` for `template`, replacing any previous entry.
    pub fn register<F>(&mut self, template: TemplateId, factory: F)
    where
        F: Fn(ActorId) -> Box<dyn EncounterScript> + 'static,
    {
        self.factories.insert(template, Box::new(factory));
    }

    /// Instantiate the script for `template`, or `None` if unregistered.
    pub fn instantiate(
        &self,
        template: TemplateId,
        actor:    ActorId,
    ) -> Option<Box<dyn EncounterScript>> {
        self.factories.get(&template).map(|f| f(actor))
    }

    pub fn contains(&self, template: TemplateId) -> bool {
        self.factories.contains_key(&template)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
