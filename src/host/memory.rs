//! In-memory host used by the simulation binary and the tests
//!
//! Mirrors the layout of the real character rig: Helmet and Headset render
//! into one head socket, FaceMask into its own face socket unless the rig
//! is built with the two merged.

use ahash::AHashMap;

use crate::core::types::{AttachmentPointId, CharacterFeature, CharacterRole, ItemTypeId, SlotIdentity};
use crate::host::scene::{AttachmentPoint, ItemTemplate, VisualProxy};
use crate::host::EquipmentHost;

/// Per-character state held by the host
#[derive(Debug, Clone, Default)]
struct CharacterRig {
    ready: bool,
    items: AHashMap<SlotIdentity, ItemTypeId>,
    sockets: AHashMap<SlotIdentity, AttachmentPointId>,
    features: AHashMap<CharacterFeature, bool>,
}

/// Simple `EquipmentHost` backed by hash maps
#[derive(Debug, Default)]
pub struct MemoryHost {
    templates: AHashMap<ItemTypeId, ItemTemplate>,
    rigs: AHashMap<CharacterRole, CharacterRig>,
    points: AHashMap<AttachmentPointId, AttachmentPoint>,
    next_point: u32,
    /// Slots the host rendered itself after the engine deferred
    pub default_renders: Vec<(CharacterRole, SlotIdentity)>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_template(&mut self, template: ItemTemplate) {
        self.templates.insert(template.id, template);
    }

    /// Spawn a character with the standard socket layout
    pub fn add_character(&mut self, role: CharacterRole) {
        self.add_character_with_layout(role, false);
    }

    /// Spawn a character whose face mask shares the head socket
    pub fn add_character_with_merged_face(&mut self, role: CharacterRole) {
        self.add_character_with_layout(role, true);
    }

    fn add_character_with_layout(&mut self, role: CharacterRole, merged_face: bool) {
        let armor = self.new_point(role, "Armor");
        let head = self.new_point(role, "Head");
        let face = if merged_face {
            head
        } else {
            self.new_point(role, "Face")
        };
        let back = self.new_point(role, "Back");

        let mut rig = CharacterRig {
            ready: true,
            ..Default::default()
        };
        rig.sockets.insert(SlotIdentity::Armor, armor);
        rig.sockets.insert(SlotIdentity::Helmet, head);
        rig.sockets.insert(SlotIdentity::Headset, head);
        rig.sockets.insert(SlotIdentity::FaceMask, face);
        rig.sockets.insert(SlotIdentity::Backpack, back);
        rig.features.insert(CharacterFeature::Hair, true);
        rig.features.insert(CharacterFeature::Mouth, true);
        self.rigs.insert(role, rig);
    }

    fn new_point(&mut self, role: CharacterRole, name: &str) -> AttachmentPointId {
        self.next_point += 1;
        let id = AttachmentPointId(self.next_point);
        self.points
            .insert(id, AttachmentPoint::new(id, format!("{}/{}", role, name)));
        id
    }

    pub fn set_ready(&mut self, role: CharacterRole, ready: bool) {
        if let Some(rig) = self.rigs.get_mut(&role) {
            rig.ready = ready;
        }
    }

    /// Put an item into (or clear) a slot without notifying anyone
    pub fn equip(&mut self, role: CharacterRole, slot: SlotIdentity, item: Option<ItemTypeId>) {
        if let Some(rig) = self.rigs.get_mut(&role) {
            match item {
                Some(id) => rig.items.insert(slot, id),
                None => rig.items.remove(&slot),
            };
        }
    }

    /// Remove a feature object from the model, as on a rig without one
    pub fn remove_feature(&mut self, role: CharacterRole, feature: CharacterFeature) {
        if let Some(rig) = self.rigs.get_mut(&role) {
            rig.features.remove(&feature);
        }
    }

    /// Drop the socket mapping for a slot
    pub fn remove_socket(&mut self, role: CharacterRole, slot: SlotIdentity) {
        if let Some(rig) = self.rigs.get_mut(&role) {
            rig.sockets.remove(&slot);
        }
    }

    /// The hook payload the host would send for a slot right now
    pub fn notification(
        &self,
        role: CharacterRole,
        slot: SlotIdentity,
    ) -> Option<crate::host::SlotNotification> {
        Some(crate::host::SlotNotification {
            role,
            slot,
            item: self.equipped_item(role, slot),
            point: self.attachment_point_id(role, slot)?,
        })
    }

    /// Visual identities attached at a slot's socket
    pub fn socket_items(&self, role: CharacterRole, slot: SlotIdentity) -> Vec<ItemTypeId> {
        self.attachment_point_id(role, slot)
            .and_then(|id| self.points.get(&id))
            .map(|p| p.visual_items())
            .unwrap_or_default()
    }

    /// Proxies attached at a slot's socket
    pub fn socket_proxies(&self, role: CharacterRole, slot: SlotIdentity) -> &[VisualProxy] {
        self.attachment_point_id(role, slot)
            .and_then(|id| self.points.get(&id))
            .map(|p| p.children())
            .unwrap_or_default()
    }

    pub fn feature_active(&self, role: CharacterRole, feature: CharacterFeature) -> Option<bool> {
        self.rigs.get(&role)?.features.get(&feature).copied()
    }

    /// Every point of a character, deduplicated, for printing
    pub fn character_points(&self, role: CharacterRole) -> Vec<&AttachmentPoint> {
        let Some(rig) = self.rigs.get(&role) else {
            return Vec::new();
        };
        let mut ids: Vec<AttachmentPointId> = rig.sockets.values().copied().collect();
        ids.sort();
        ids.dedup();
        ids.iter().filter_map(|id| self.points.get(id)).collect()
    }
}

impl EquipmentHost for MemoryHost {
    fn character_ready(&self, role: CharacterRole) -> bool {
        self.rigs.get(&role).map_or(false, |rig| rig.ready)
    }

    fn equipped_item(&self, role: CharacterRole, slot: SlotIdentity) -> Option<ItemTypeId> {
        self.rigs.get(&role)?.items.get(&slot).copied()
    }

    fn attachment_point_id(
        &self,
        role: CharacterRole,
        slot: SlotIdentity,
    ) -> Option<AttachmentPointId> {
        self.rigs.get(&role)?.sockets.get(&slot).copied()
    }

    fn attachment_point(&self, id: AttachmentPointId) -> Option<&AttachmentPoint> {
        self.points.get(&id)
    }

    fn attachment_point_mut(&mut self, id: AttachmentPointId) -> Option<&mut AttachmentPoint> {
        self.points.get_mut(&id)
    }

    fn template(&self, id: ItemTypeId) -> Option<&ItemTemplate> {
        self.templates.get(&id)
    }

    fn set_feature_active(
        &mut self,
        role: CharacterRole,
        feature: CharacterFeature,
        active: bool,
    ) -> bool {
        match self
            .rigs
            .get_mut(&role)
            .and_then(|rig| rig.features.get_mut(&feature))
        {
            Some(state) => {
                *state = active;
                true
            }
            None => false,
        }
    }

    fn render_default(&mut self, role: CharacterRole, slot: SlotIdentity) {
        self.default_renders.push((role, slot));
        let Some(point_id) = self.attachment_point_id(role, slot) else {
            return;
        };
        let proxy = self
            .equipped_item(role, slot)
            .and_then(|item| self.templates.get(&item))
            .and_then(|template| template.instantiate().ok())
            .map(|mut proxy| {
                proxy.functional_item = Some(proxy.visual_item);
                proxy
            });
        if let Some(point) = self.points.get_mut(&point_id) {
            point.clear();
            if let Some(proxy) = proxy {
                point.attach(proxy);
            }
        }
    }
}
