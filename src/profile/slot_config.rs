//! Per-slot skin configuration and the per-character store holding it

use serde::{Deserialize, Serialize};

use crate::core::config::CURRENT_CONFIG_VERSION;
use crate::core::types::{ItemTypeId, SlotIdentity};

/// Raw skin value meaning "render nothing"
pub const HIDDEN_SKIN: i32 = -1;

/// Raw skin value meaning "use the equipped item's own look"
pub const NO_SKIN: i32 = 0;

/// Skin override for one slot
///
/// `skin_identity` is kept exactly as written so inert values survive a
/// save/load cycle while `use_skin` is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotConfig {
    pub skin_identity: i32,
    pub use_skin: bool,
}

/// Interpreted meaning of a raw `skin_identity`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinSelection {
    /// Show whatever is functionally equipped
    Passthrough,
    /// Render nothing
    Hidden,
    /// Always render this item's appearance
    Override(ItemTypeId),
}

impl SlotConfig {
    pub fn new(skin_identity: i32, use_skin: bool) -> Self {
        Self {
            skin_identity,
            use_skin,
        }
    }

    /// Override with a specific item appearance
    pub fn with_skin(id: ItemTypeId) -> Self {
        Self::new(id.value(), true)
    }

    /// Hide the slot entirely
    pub fn hidden() -> Self {
        Self::new(HIDDEN_SKIN, true)
    }

    /// Typed view of the raw value, ignoring `use_skin`
    ///
    /// Negative values other than -1 carry no meaning and read as passthrough.
    pub fn selection(&self) -> SkinSelection {
        match self.skin_identity {
            HIDDEN_SKIN => SkinSelection::Hidden,
            id if id > 0 => SkinSelection::Override(ItemTypeId(id)),
            _ => SkinSelection::Passthrough,
        }
    }

    /// Selection that actually applies: `None` while the master switch is off
    pub fn effective(&self) -> Option<SkinSelection> {
        self.use_skin.then(|| self.selection())
    }

    /// True when this config would change what the slot shows
    pub fn has_override(&self) -> bool {
        matches!(
            self.effective(),
            Some(SkinSelection::Hidden) | Some(SkinSelection::Override(_))
        )
    }
}

/// One `SlotConfig` for every `SlotIdentity`
///
/// Backed by a fixed array so a slot can never be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotConfigStore {
    slots: [SlotConfig; 5],
}

impl SlotConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: SlotIdentity) -> SlotConfig {
        self.slots[slot as usize]
    }

    pub fn get_mut(&mut self, slot: SlotIdentity) -> &mut SlotConfig {
        &mut self.slots[slot as usize]
    }

    pub fn set(&mut self, slot: SlotIdentity, config: SlotConfig) {
        self.slots[slot as usize] = config;
    }

    /// Restore every slot to `{0, false}`
    pub fn reset(&mut self) {
        self.slots = [SlotConfig::default(); 5];
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotIdentity, SlotConfig)> + '_ {
        SlotIdentity::ALL.iter().map(move |&slot| (slot, self.get(slot)))
    }
}

/// A named per-character set of slot configurations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterProfile {
    pub name: String,
    pub config_version: i32,
    pub slots: SlotConfigStore,
}

impl CharacterProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config_version: CURRENT_CONFIG_VERSION,
            slots: SlotConfigStore::new(),
        }
    }

    pub fn slot(&self, slot: SlotIdentity) -> SlotConfig {
        self.slots.get(slot)
    }

    pub fn slot_mut(&mut self, slot: SlotIdentity) -> &mut SlotConfig {
        self.slots.get_mut(slot)
    }

    /// Number of slots whose override is active
    pub fn active_override_count(&self) -> usize {
        self.slots.iter().filter(|(_, c)| c.has_override()).count()
    }
}
