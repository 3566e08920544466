//! The narrow surface the engine needs from the host game
//!
//! The host owns slot contents, item templates and the character model.
//! It calls into the engine through the notification hook and exposes only
//! the lookups below in return.

pub mod memory;
pub mod scene;

pub use memory::MemoryHost;
pub use scene::{
    AttachmentPoint, ChildKind, ItemTemplate, ProxyChild, ProxyId, TemplateChild, Transform,
    VisualProxy,
};

use crate::core::types::{AttachmentPointId, CharacterFeature, CharacterRole, ItemTypeId, SlotIdentity};

/// Payload of the host's slot-change hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotNotification {
    pub role: CharacterRole,
    pub slot: SlotIdentity,
    /// Functionally equipped item, if any
    pub item: Option<ItemTypeId>,
    /// Attachment point the host is about to render into
    pub point: AttachmentPointId,
}

/// What the host should do after the hook returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The engine rendered the slot; skip the default
    Handled,
    /// Run the default rendering for the equipped item
    DeferToDefault,
    /// Run the default rendering for an empty slot
    DeferToDefaultNoItem,
}

impl HookOutcome {
    pub fn is_handled(self) -> bool {
        self == HookOutcome::Handled
    }
}

/// Host equipment system as seen by the engine
pub trait EquipmentHost {
    /// Whether the character exists and its equipment finished loading
    fn character_ready(&self, role: CharacterRole) -> bool;

    /// Item functionally equipped in a slot
    fn equipped_item(&self, role: CharacterRole, slot: SlotIdentity) -> Option<ItemTypeId>;

    /// Attachment point a slot renders into
    fn attachment_point_id(&self, role: CharacterRole, slot: SlotIdentity)
        -> Option<AttachmentPointId>;

    fn attachment_point(&self, id: AttachmentPointId) -> Option<&AttachmentPoint>;

    fn attachment_point_mut(&mut self, id: AttachmentPointId) -> Option<&mut AttachmentPoint>;

    /// Renderable definition of an item type
    fn template(&self, id: ItemTypeId) -> Option<&ItemTemplate>;

    /// Toggle a character-model feature; false if the feature object is absent
    fn set_feature_active(
        &mut self,
        role: CharacterRole,
        feature: CharacterFeature,
        active: bool,
    ) -> bool;

    /// The host's own rendering of a slot, used when the engine defers
    fn render_default(&mut self, role: CharacterRole, slot: SlotIdentity);
}
