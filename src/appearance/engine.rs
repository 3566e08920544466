//! Appearance engine: the host's slot-change hook and the bulk refresh

use crate::appearance::decision::{decide, hook_outcome, RenderAction};
use crate::appearance::head_group::{HeadGroupPass, HeadPassReport};
use crate::appearance::refresh::{RefreshGuard, RefreshReport};
use crate::appearance::renderer::{ClearMode, SocketRenderer};
use crate::core::config::EngineConfig;
use crate::core::error::SkinError;
use crate::core::types::{CharacterRole, SlotIdentity};
use crate::host::{EquipmentHost, HookOutcome, SlotNotification};
use crate::profile::registry::ProfileRegistry;

/// Result of dispatching one notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dispatch {
    outcome: HookOutcome,
    head_pass: bool,
    failures: usize,
}

/// Decides and renders equipment appearance on host notifications
///
/// Holds no slot configuration of its own; every call reads the registry
/// it is handed.
#[derive(Debug)]
pub struct AppearanceEngine {
    config: EngineConfig,
    guard: RefreshGuard,
    last_head_pass: Option<HeadPassReport>,
}

impl Default for AppearanceEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl AppearanceEngine {
    /// Create an engine; an inconsistent config is replaced by the default
    pub fn new(config: EngineConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(msg) => {
                tracing::error!(error = %msg, "Invalid engine config, using defaults");
                EngineConfig::default()
            }
        };
        Self {
            config,
            guard: RefreshGuard::new(),
            last_head_pass: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Report from the most recent head-group pass
    pub fn last_head_pass(&self) -> Option<&HeadPassReport> {
        self.last_head_pass.as_ref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.guard.is_refreshing()
    }

    /// Host hook: a slot's content or socket changed
    ///
    /// Never fails; problems are logged and the hook answers with whatever
    /// leaves the host in a sane state.
    pub fn on_slot_changed<H: EquipmentHost>(
        &mut self,
        registry: &ProfileRegistry,
        host: &mut H,
        notification: SlotNotification,
    ) -> HookOutcome {
        self.dispatch(registry, host, notification).outcome
    }

    fn dispatch<H: EquipmentHost>(
        &mut self,
        registry: &ProfileRegistry,
        host: &mut H,
        n: SlotNotification,
    ) -> Dispatch {
        if n.slot.is_head_group() {
            if !self.guard.claim_head_pass(n.role) {
                tracing::trace!(role = %n.role, slot = %n.slot, "Head group already refreshed");
                return Dispatch {
                    outcome: HookOutcome::Handled,
                    head_pass: false,
                    failures: 0,
                };
            }
            let report = HeadGroupPass::new(&self.config, registry).run(host, n.role, Some(&n));
            let failures = report.failures();
            tracing::debug!(
                role = %n.role,
                trigger = %n.slot,
                hair = report.visibility.show_hair,
                mouth = report.visibility.show_mouth,
                failures,
                "Head group pass complete"
            );
            self.last_head_pass = Some(report);
            return Dispatch {
                outcome: HookOutcome::Handled,
                head_pass: true,
                failures,
            };
        }

        let action = decide(registry.slot(n.role, n.slot), n.item);
        let outcome = hook_outcome(n.slot, action);
        tracing::debug!(role = %n.role, slot = %n.slot, %action, ?outcome, "Slot decision");

        let mut failures = 0;
        if outcome.is_handled() {
            failures = self.execute_single(host, n, action);
        }
        Dispatch {
            outcome,
            head_pass: false,
            failures,
        }
    }

    /// Render a non-head slot; returns the failure count (0 or 1)
    fn execute_single<H: EquipmentHost>(
        &self,
        host: &mut H,
        n: SlotNotification,
        action: RenderAction,
    ) -> usize {
        let renderer = SocketRenderer::new(&self.config);
        match renderer.execute(host, n.point, action, n.item, ClearMode::Clear) {
            Ok(_) => 0,
            Err(SkinError::UnknownAttachmentPoint(point)) => {
                tracing::warn!(role = %n.role, slot = %n.slot, point = point.0, "Attachment point gone, ignoring event");
                1
            }
            Err(e) => {
                tracing::warn!(role = %n.role, slot = %n.slot, %action, error = %e, "Slot render failed, socket left empty");
                1
            }
        }
    }

    /// Re-issue decisions for every occupied or configured slot of every ready character
    pub fn refresh_all<H: EquipmentHost>(
        &mut self,
        registry: &ProfileRegistry,
        host: &mut H,
    ) -> RefreshReport {
        self.guard.begin();
        let report = self.refresh_pass(registry, host);
        self.guard.end();

        tracing::info!(
            visited = report.visited,
            skipped = report.skipped,
            head_passes = report.head_passes,
            failures = report.failures,
            "Appearance refresh complete"
        );
        report
    }

    fn refresh_pass<H: EquipmentHost>(
        &mut self,
        registry: &ProfileRegistry,
        host: &mut H,
    ) -> RefreshReport {
        let mut report = RefreshReport::default();

        for role in CharacterRole::ALL {
            if self.config.skip_unloaded_characters && !host.character_ready(role) {
                tracing::debug!(%role, "Character not ready, refresh skipped");
                report.characters_skipped += 1;
                continue;
            }

            for slot in SlotIdentity::ALL {
                let item = host.equipped_item(role, slot);
                if item.is_none() && !registry.slot(role, slot).has_override() {
                    report.skipped += 1;
                    continue;
                }
                let Some(point) = host.attachment_point_id(role, slot) else {
                    tracing::warn!(%role, %slot, "No attachment point, refresh skipped slot");
                    report.failures += 1;
                    continue;
                };

                report.visited += 1;
                let notification = SlotNotification {
                    role,
                    slot,
                    item,
                    point,
                };
                let dispatch = self.dispatch(registry, host, notification);
                report.failures += dispatch.failures;
                if dispatch.head_pass {
                    report.head_passes += 1;
                }
                if !dispatch.outcome.is_handled() {
                    host.render_default(role, slot);
                    report.deferred += 1;
                }
            }
        }
        report
    }
}
