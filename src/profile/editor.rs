//! UI-facing representation of slot configs and the batch edits the UI issues

use crate::core::error::{Result, SkinError};
use crate::core::types::{CharacterRole, SlotIdentity};
use crate::profile::registry::ProfileRegistry;
use crate::profile::slot_config::{SlotConfig, HIDDEN_SKIN, NO_SKIN};

/// Text shown in a slot's skin field
///
/// "No override" is an empty field, never a literal zero.
pub fn skin_field_text(config: &SlotConfig) -> String {
    if config.skin_identity == NO_SKIN {
        String::new()
    } else {
        config.skin_identity.to_string()
    }
}

/// Parse text typed into a skin field back into a raw skin value
pub fn parse_skin_field(text: &str) -> Result<i32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(NO_SKIN);
    }
    match trimmed.parse::<i32>() {
        Ok(value) if value >= HIDDEN_SKIN => Ok(value),
        _ => Err(SkinError::InvalidSkinText(text.to_string())),
    }
}

/// Edits the UI applies in bulk; each is followed by a refresh pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEdit {
    /// Set one slot from the UI fields
    SetSlot {
        role: CharacterRole,
        slot: SlotIdentity,
        text: String,
        use_skin: bool,
    },
    /// Change which character the UI edits
    SwitchRole(CharacterRole),
    /// Clear every slot of one profile
    ResetProfile(CharacterRole),
    /// Clear both profiles
    ResetAll,
}

impl BatchEdit {
    /// Apply to the registry; invalid field text leaves the slot unchanged
    pub fn apply(&self, registry: &mut ProfileRegistry) -> Result<()> {
        match self {
            BatchEdit::SetSlot {
                role,
                slot,
                text,
                use_skin,
            } => {
                let skin_identity = parse_skin_field(text)?;
                registry.set_slot(*role, *slot, SlotConfig::new(skin_identity, *use_skin));
            }
            BatchEdit::SwitchRole(role) => registry.set_active_role(*role),
            BatchEdit::ResetProfile(role) => registry.profile_mut(*role).slots.reset(),
            BatchEdit::ResetAll => {
                for role in CharacterRole::ALL {
                    registry.profile_mut(role).slots.reset();
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_displays_empty() {
        assert_eq!(skin_field_text(&SlotConfig::new(0, true)), "");
        assert_eq!(skin_field_text(&SlotConfig::new(0, false)), "");
        assert_eq!(skin_field_text(&SlotConfig::hidden()), "-1");
        assert_eq!(skin_field_text(&SlotConfig::new(501, false)), "501");
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_skin_field("").unwrap(), 0);
        assert_eq!(parse_skin_field("  ").unwrap(), 0);
        assert_eq!(parse_skin_field(" 501 ").unwrap(), 501);
        assert_eq!(parse_skin_field("-1").unwrap(), -1);
        assert!(parse_skin_field("-2").is_err());
        assert!(parse_skin_field("helmet").is_err());
    }

    #[test]
    fn test_invalid_text_leaves_slot() {
        let mut registry = ProfileRegistry::new();
        registry.set_slot(CharacterRole::Primary, SlotIdentity::Armor, SlotConfig::new(4, true));
        let edit = BatchEdit::SetSlot {
            role: CharacterRole::Primary,
            slot: SlotIdentity::Armor,
            text: "abc".into(),
            use_skin: false,
        };
        assert!(edit.apply(&mut registry).is_err());
        assert_eq!(
            registry.slot(CharacterRole::Primary, SlotIdentity::Armor),
            SlotConfig::new(4, true)
        );
    }

    #[test]
    fn test_reset_all() {
        let mut registry = ProfileRegistry::new();
        registry.set_slot(CharacterRole::Primary, SlotIdentity::Helmet, SlotConfig::hidden());
        registry.set_slot(CharacterRole::Companion, SlotIdentity::Backpack, SlotConfig::new(3, true));
        BatchEdit::ResetAll.apply(&mut registry).unwrap();
        assert_eq!(registry, ProfileRegistry::new());
    }
}
