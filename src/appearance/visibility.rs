//! Hair and mouth visibility derived from the helmet and face-mask renders

use crate::appearance::decision::RenderAction;
use crate::core::types::{CharacterFeature, CharacterRole, ItemTypeId};
use crate::host::EquipmentHost;

/// What one slot's render permits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAllowance {
    pub hair: bool,
    pub mouth: bool,
}

impl SlotAllowance {
    pub const ALL: SlotAllowance = SlotAllowance {
        hair: true,
        mouth: true,
    };
}

/// Resolved feature visibility for a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureVisibility {
    pub show_hair: bool,
    pub show_mouth: bool,
}

impl Default for FeatureVisibility {
    fn default() -> Self {
        Self {
            show_hair: true,
            show_mouth: true,
        }
    }
}

/// Allowance of the item actually shown on a slot
///
/// Nothing shown (empty, suppressed, or a failed render) allows both.
/// Otherwise the shown item's declared flags apply, defaulting to allowed.
pub fn slot_allowance<H: EquipmentHost>(host: &H, shown: Option<ItemTypeId>) -> SlotAllowance {
    let Some(template) = shown.and_then(|id| host.template(id)) else {
        return SlotAllowance::ALL;
    };
    SlotAllowance {
        hair: template.allows_hair(),
        mouth: template.allows_mouth(),
    }
}

/// Allowance straight from a decided action, before rendering
pub fn action_allowance<H: EquipmentHost>(host: &H, action: RenderAction) -> SlotAllowance {
    slot_allowance(host, action.rendered_identity())
}

/// Combine helmet and face mask: a feature shows only if both allow it
pub fn resolve(helmet: SlotAllowance, face_mask: SlotAllowance) -> FeatureVisibility {
    FeatureVisibility {
        show_hair: helmet.hair && face_mask.hair,
        show_mouth: helmet.mouth && face_mask.mouth,
    }
}

/// Push the resolved flags onto the character model
pub fn apply<H: EquipmentHost>(host: &mut H, role: CharacterRole, visibility: FeatureVisibility) {
    for (feature, active) in [
        (CharacterFeature::Hair, visibility.show_hair),
        (CharacterFeature::Mouth, visibility.show_mouth),
    ] {
        if !host.set_feature_active(role, feature, active) {
            tracing::debug!(%role, ?feature, "Feature object absent on character model");
        }
    }
}
