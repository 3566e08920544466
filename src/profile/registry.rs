//! The two character profiles and which one the UI is editing

use crate::core::types::{CharacterRole, SlotIdentity};
use crate::profile::slot_config::{CharacterProfile, SlotConfig};

pub const PRIMARY_PROFILE_NAME: &str = "Player";
pub const COMPANION_PROFILE_NAME: &str = "Pet";

/// Sole owner of the primary and companion profiles
///
/// The engine reads through this on every notification and never caches
/// slot configs, so edits show up on the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRegistry {
    primary: CharacterProfile,
    companion: CharacterProfile,
    active: CharacterRole,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self {
            primary: CharacterProfile::new(PRIMARY_PROFILE_NAME),
            companion: CharacterProfile::new(COMPANION_PROFILE_NAME),
            active: CharacterRole::Primary,
        }
    }
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        primary: CharacterProfile,
        companion: CharacterProfile,
        active: CharacterRole,
    ) -> Self {
        Self {
            primary,
            companion,
            active,
        }
    }

    pub fn active_role(&self) -> CharacterRole {
        self.active
    }

    pub fn set_active_role(&mut self, role: CharacterRole) {
        self.active = role;
    }

    pub fn profile(&self, role: CharacterRole) -> &CharacterProfile {
        match role {
            CharacterRole::Primary => &self.primary,
            CharacterRole::Companion => &self.companion,
        }
    }

    pub fn profile_mut(&mut self, role: CharacterRole) -> &mut CharacterProfile {
        match role {
            CharacterRole::Primary => &mut self.primary,
            CharacterRole::Companion => &mut self.companion,
        }
    }

    pub fn active_profile(&self) -> &CharacterProfile {
        self.profile(self.active)
    }

    pub fn active_profile_mut(&mut self) -> &mut CharacterProfile {
        self.profile_mut(self.active)
    }

    pub fn slot(&self, role: CharacterRole, slot: SlotIdentity) -> SlotConfig {
        self.profile(role).slot(slot)
    }

    pub fn set_slot(&mut self, role: CharacterRole, slot: SlotIdentity, config: SlotConfig) {
        self.profile_mut(role).slots.set(slot, config);
    }

    /// Replace the whole registry, as after a load
    pub fn replace(&mut self, other: ProfileRegistry) {
        *self = other;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ItemTypeId;

    #[test]
    fn test_defaults() {
        let registry = ProfileRegistry::new();
        assert_eq!(registry.active_role(), CharacterRole::Primary);
        assert_eq!(registry.profile(CharacterRole::Primary).name, "Player");
        assert_eq!(registry.profile(CharacterRole::Companion).name, "Pet");
    }

    #[test]
    fn test_profiles_are_independent() {
        let mut registry = ProfileRegistry::new();
        registry.set_slot(
            CharacterRole::Companion,
            SlotIdentity::Helmet,
            SlotConfig::with_skin(ItemTypeId(42)),
        );
        assert_eq!(
            registry.slot(CharacterRole::Primary, SlotIdentity::Helmet),
            SlotConfig::default()
        );
        assert!(registry
            .slot(CharacterRole::Companion, SlotIdentity::Helmet)
            .use_skin);
    }

    #[test]
    fn test_active_profile_follows_role() {
        let mut registry = ProfileRegistry::new();
        registry.set_active_role(CharacterRole::Companion);
        registry.active_profile_mut().name = "Dog".into();
        assert_eq!(registry.profile(CharacterRole::Companion).name, "Dog");
        assert_eq!(registry.profile(CharacterRole::Primary).name, "Player");
    }
}
