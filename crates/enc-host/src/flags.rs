//! Actor state flags mirrored between scripts and the host.

use bitflags::bitflags;

bitflags! {
    /// Host-visible actor toggles a script may set or clear.
    ///
    /// The host owns the consequences: an `UNTARGETABLE` actor is skipped by
    /// target selection, a `PASSIVE` actor never auto-acquires targets, and
    /// an `IN_USE` interactable refuses further interaction.
    #[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActorFlags: u32 {
        /// Cannot be selected as a target or attacked.
        const UNTARGETABLE = 1 << 0;
        /// Does not acquire targets or retaliate on its own.
        const PASSIVE      = 1 << 1;
        /// Interactable object already used this attempt (visual lock).
        const IN_USE       = 1 << 2;
    }
}
