//! Pure decision table: slot config + equipped item -> render action

use std::fmt;

use crate::core::types::{ItemTypeId, SlotIdentity};
use crate::host::HookOutcome;
use crate::profile::slot_config::{SkinSelection, SlotConfig};

/// What to do with a slot's attachment point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderAction {
    /// Leave the slot to the host's default rendering
    Defer,
    /// Clear the point and show nothing
    Suppress,
    /// Show this item's appearance through the override path
    RenderIdentity(ItemTypeId),
    /// Show the equipped item itself with its gameplay bindings
    RenderFunctional(ItemTypeId),
}

impl RenderAction {
    /// Item whose appearance ends up on the point, if any
    pub fn rendered_identity(self) -> Option<ItemTypeId> {
        match self {
            RenderAction::RenderIdentity(id) | RenderAction::RenderFunctional(id) => Some(id),
            RenderAction::Defer | RenderAction::Suppress => None,
        }
    }

    pub fn is_render(self) -> bool {
        self.rendered_identity().is_some()
    }

    pub fn label(self) -> &'static str {
        match self {
            RenderAction::Defer => "defer",
            RenderAction::Suppress => "suppress",
            RenderAction::RenderIdentity(_) => "render-identity",
            RenderAction::RenderFunctional(_) => "render-functional",
        }
    }
}

impl fmt::Display for RenderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rendered_identity() {
            Some(id) => write!(f, "{}({})", self.label(), id),
            None => f.write_str(self.label()),
        }
    }
}

/// Choose the action for one slot
///
/// | use_skin | skin  | equipped | action                  |
/// |----------|-------|----------|-------------------------|
/// | false    | any   | none     | Defer                   |
/// | false    | any   | id       | RenderFunctional(id)    |
/// | true     | -1    | any      | Suppress                |
/// | true     | n > 0 | any      | RenderIdentity(n)       |
/// | true     | 0     | id       | RenderIdentity(id)      |
/// | true     | 0     | none     | Defer                   |
pub fn decide(config: SlotConfig, equipped: Option<ItemTypeId>) -> RenderAction {
    match (config.effective(), equipped) {
        (Some(SkinSelection::Hidden), _) => RenderAction::Suppress,
        (Some(SkinSelection::Override(id)), _) => RenderAction::RenderIdentity(id),
        (Some(SkinSelection::Passthrough), Some(id)) => RenderAction::RenderIdentity(id),
        (None, Some(id)) => RenderAction::RenderFunctional(id),
        (Some(SkinSelection::Passthrough) | None, None) => RenderAction::Defer,
    }
}

/// How the host hook should answer for a decided action
///
/// Head-group slots are always owned by the engine. Elsewhere a functional
/// render is exactly what the host does by default, so it is handed back.
pub fn hook_outcome(slot: SlotIdentity, action: RenderAction) -> HookOutcome {
    if slot.is_head_group() {
        return HookOutcome::Handled;
    }
    match action {
        RenderAction::Defer => HookOutcome::DeferToDefaultNoItem,
        RenderAction::RenderFunctional(_) => HookOutcome::DeferToDefault,
        RenderAction::Suppress | RenderAction::RenderIdentity(_) => HookOutcome::Handled,
    }
}
