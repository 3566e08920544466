//! Coupled Headset -> Helmet -> FaceMask pass
//!
//! Helmet and Headset render into the same socket, and on some rigs the face
//! mask does too. Within one pass each socket is cleared exactly once, by the
//! first slot that touches it; every later render into that socket appends.
//! Re-running the pass therefore never accumulates proxies and never lets a
//! late slot wipe an earlier slot's render.

use ahash::AHashSet;

use crate::appearance::decision::{decide, RenderAction};
use crate::appearance::renderer::{ClearMode, SocketRenderer};
use crate::appearance::visibility::{self, FeatureVisibility};
use crate::core::config::EngineConfig;
use crate::core::error::{Result, SkinError};
use crate::core::types::{AttachmentPointId, CharacterRole, ItemTypeId, SlotIdentity};
use crate::host::{EquipmentHost, SlotNotification};
use crate::profile::registry::ProfileRegistry;

/// Outcome for one head slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadSlotResult {
    pub slot: SlotIdentity,
    pub equipped: Option<ItemTypeId>,
    pub action: RenderAction,
    pub point: Option<AttachmentPointId>,
    /// This slot was the first to touch its socket and cleared it
    pub cleared_point: bool,
    /// Identity actually attached
    pub shown: Option<ItemTypeId>,
    pub error: Option<String>,
}

/// Outcome of a full head-group pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadPassReport {
    pub role: CharacterRole,
    pub slots: Vec<HeadSlotResult>,
    pub visibility: FeatureVisibility,
}

impl HeadPassReport {
    pub fn slot(&self, slot: SlotIdentity) -> Option<&HeadSlotResult> {
        self.slots.iter().find(|r| r.slot == slot)
    }

    pub fn action(&self, slot: SlotIdentity) -> Option<RenderAction> {
        self.slot(slot).map(|r| r.action)
    }

    pub fn failures(&self) -> usize {
        self.slots.iter().filter(|r| r.error.is_some()).count()
    }
}

pub struct HeadGroupPass<'a> {
    config: &'a EngineConfig,
    registry: &'a ProfileRegistry,
}

impl<'a> HeadGroupPass<'a> {
    pub fn new(config: &'a EngineConfig, registry: &'a ProfileRegistry) -> Self {
        Self { config, registry }
    }

    /// Recompute and re-render all three head slots of one character
    ///
    /// `trigger` supplies the item and socket for the notified slot, which
    /// may be newer than what the host reports through its getters.
    pub fn run<H: EquipmentHost>(
        &self,
        host: &mut H,
        role: CharacterRole,
        trigger: Option<&SlotNotification>,
    ) -> HeadPassReport {
        let renderer = SocketRenderer::new(self.config);
        let mut cleared: AHashSet<AttachmentPointId> = AHashSet::new();
        let mut slots = Vec::with_capacity(3);

        for slot in self.config.head_pass_order {
            let (equipped, point) = match trigger.filter(|n| n.slot == slot && n.role == role) {
                Some(n) => (n.item, Some(n.point)),
                None => (
                    host.equipped_item(role, slot),
                    host.attachment_point_id(role, slot),
                ),
            };
            let action = decide(self.registry.slot(role, slot), equipped);
            let mut result = HeadSlotResult {
                slot,
                equipped,
                action,
                point,
                cleared_point: false,
                shown: None,
                error: None,
            };

            match point {
                Some(point) => {
                    let first_touch = cleared.insert(point);
                    result.cleared_point = first_touch;
                    match Self::render_slot(&renderer, host, point, action, equipped, first_touch) {
                        Ok(shown) => result.shown = shown,
                        Err(e) => {
                            tracing::warn!(%role, %slot, %action, error = %e, "Head slot render failed");
                            result.error = Some(e.to_string());
                        }
                    }
                }
                None => {
                    let e = SkinError::AttachmentPointMissing { role, slot };
                    tracing::warn!(%role, %slot, error = %e, "Head slot skipped");
                    result.error = Some(e.to_string());
                }
            }

            tracing::debug!(
                %role,
                %slot,
                %action,
                cleared = result.cleared_point,
                "Head slot processed"
            );
            slots.push(result);
        }

        let shown_on = |slot: SlotIdentity| {
            slots
                .iter()
                .find(|r: &&HeadSlotResult| r.slot == slot)
                .and_then(|r| r.shown)
        };
        let visibility = visibility::resolve(
            visibility::slot_allowance(host, shown_on(SlotIdentity::Helmet)),
            visibility::slot_allowance(host, shown_on(SlotIdentity::FaceMask)),
        );
        visibility::apply(host, role, visibility);

        HeadPassReport {
            role,
            slots,
            visibility,
        }
    }

    /// Clear on first touch, then add this slot's render alongside
    fn render_slot<H: EquipmentHost>(
        renderer: &SocketRenderer<'_>,
        host: &mut H,
        point: AttachmentPointId,
        action: RenderAction,
        equipped: Option<ItemTypeId>,
        first_touch: bool,
    ) -> Result<Option<ItemTypeId>> {
        if first_touch {
            renderer.clear(host, point)?;
        }
        let outcome = renderer.execute(host, point, action, equipped, ClearMode::Append)?;
        Ok(outcome.attached)
    }
}
