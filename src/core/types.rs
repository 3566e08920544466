//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::SkinError;

/// Numeric item-definition identifier (the host's item type id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemTypeId(pub i32);

impl ItemTypeId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ItemTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Logical equipment slot on a character
///
/// The discriminants are the persisted `SlotType` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum SlotIdentity {
    Armor = 0,
    Helmet = 1,
    FaceMask = 2,
    Backpack = 3,
    Headset = 4,
}

impl SlotIdentity {
    /// Every slot, in persisted order
    pub const ALL: [SlotIdentity; 5] = [
        SlotIdentity::Armor,
        SlotIdentity::Helmet,
        SlotIdentity::FaceMask,
        SlotIdentity::Backpack,
        SlotIdentity::Headset,
    ];

    /// Head-group slots in the order a coupled pass processes them
    pub const HEAD_GROUP: [SlotIdentity; 3] = [
        SlotIdentity::Headset,
        SlotIdentity::Helmet,
        SlotIdentity::FaceMask,
    ];

    /// Whether this slot belongs to the coupled Helmet/Headset/FaceMask trio
    pub fn is_head_group(self) -> bool {
        matches!(
            self,
            SlotIdentity::Helmet | SlotIdentity::FaceMask | SlotIdentity::Headset
        )
    }

    /// Persisted integer value
    pub fn as_index(self) -> i64 {
        self as u8 as i64
    }

    /// Parse the persisted integer value
    pub fn from_index(value: i64) -> Option<Self> {
        match value {
            0 => Some(SlotIdentity::Armor),
            1 => Some(SlotIdentity::Helmet),
            2 => Some(SlotIdentity::FaceMask),
            3 => Some(SlotIdentity::Backpack),
            4 => Some(SlotIdentity::Headset),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SlotIdentity::Armor => "Armor",
            SlotIdentity::Helmet => "Helmet",
            SlotIdentity::FaceMask => "FaceMask",
            SlotIdentity::Backpack => "Backpack",
            SlotIdentity::Headset => "Headset",
        }
    }
}

impl TryFrom<i64> for SlotIdentity {
    type Error = SkinError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or(SkinError::UnknownSlotType(value))
    }
}

impl fmt::Display for SlotIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which character a profile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CharacterRole {
    /// The player character
    #[default]
    Primary,
    /// The pet / companion character
    Companion,
}

impl CharacterRole {
    pub const ALL: [CharacterRole; 2] = [CharacterRole::Primary, CharacterRole::Companion];

    /// Persisted `CurrentCharacterType` value
    pub fn as_index(self) -> u8 {
        match self {
            CharacterRole::Primary => 0,
            CharacterRole::Companion => 1,
        }
    }

    /// Unknown values fall back to the primary character
    pub fn from_index(value: i64) -> Self {
        match value {
            1 => CharacterRole::Companion,
            _ => CharacterRole::Primary,
        }
    }
}

impl fmt::Display for CharacterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterRole::Primary => f.write_str("primary"),
            CharacterRole::Companion => f.write_str("companion"),
        }
    }
}

/// Character-model features whose visibility depends on head gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterFeature {
    Hair,
    Mouth,
}

/// Host-side handle to a physical attachment point on a character model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttachmentPointId(pub u32);
