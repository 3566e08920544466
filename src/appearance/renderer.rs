//! Socket renderer: executes render actions against attachment points
//!
//! A proxy for an equipped item is always built from that item's own
//! template so its functional children stay bound to gameplay. When a
//! different look is requested, only the visual children are swapped for
//! those of the target template; collision geometry from the target is
//! never copied.

use crate::appearance::decision::RenderAction;
use crate::core::config::EngineConfig;
use crate::core::error::{Result, SkinError};
use crate::core::types::{AttachmentPointId, ItemTypeId};
use crate::host::scene::{ChildKind, ProxyChild, VisualProxy};
use crate::host::EquipmentHost;

/// Whether a render may wipe what is already on the point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    /// Destroy existing children first
    Clear,
    /// Keep existing children and add alongside them
    Append,
}

/// What happened on the point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOutcome {
    /// Children destroyed before rendering
    pub cleared: usize,
    /// Visual identity attached, if anything was
    pub attached: Option<ItemTypeId>,
}

pub struct SocketRenderer<'a> {
    config: &'a EngineConfig,
}

impl<'a> SocketRenderer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Destroy every child of a point
    pub fn clear<H: EquipmentHost>(&self, host: &mut H, point: AttachmentPointId) -> Result<usize> {
        let socket = host
            .attachment_point_mut(point)
            .ok_or(SkinError::UnknownAttachmentPoint(point))?;
        Ok(socket.clear())
    }

    /// Execute a decided action on a point
    ///
    /// `Defer` is a no-op here; the caller decides whether the host renders.
    pub fn execute<H: EquipmentHost>(
        &self,
        host: &mut H,
        point: AttachmentPointId,
        action: RenderAction,
        equipped: Option<ItemTypeId>,
        mode: ClearMode,
    ) -> Result<RenderOutcome> {
        match action {
            RenderAction::Defer => Ok(RenderOutcome::default()),
            RenderAction::Suppress => {
                let cleared = match mode {
                    ClearMode::Clear => self.clear(host, point)?,
                    ClearMode::Append => 0,
                };
                Ok(RenderOutcome {
                    cleared,
                    attached: None,
                })
            }
            RenderAction::RenderIdentity(target) => self.render(host, point, equipped, target, mode),
            RenderAction::RenderFunctional(item) => self.render(host, point, Some(item), item, mode),
        }
    }

    /// Show `target` on the point, grafted onto `functional` when present
    ///
    /// The point is cleared before the proxy is built, so a failed build
    /// leaves it empty in `Clear` mode.
    pub fn render<H: EquipmentHost>(
        &self,
        host: &mut H,
        point: AttachmentPointId,
        functional: Option<ItemTypeId>,
        target: ItemTypeId,
        mode: ClearMode,
    ) -> Result<RenderOutcome> {
        let cleared = match mode {
            ClearMode::Clear => self.clear(host, point)?,
            ClearMode::Append => {
                if host.attachment_point(point).is_none() {
                    return Err(SkinError::UnknownAttachmentPoint(point));
                }
                0
            }
        };

        let proxy = self.build_proxy(host, functional, target)?;
        let socket = host
            .attachment_point_mut(point)
            .ok_or(SkinError::UnknownAttachmentPoint(point))?;
        socket.attach(proxy);

        tracing::debug!(
            point = point.0,
            item = target.0,
            functional = ?functional.map(|f| f.0),
            cleared,
            "Attached visual proxy"
        );
        Ok(RenderOutcome {
            cleared,
            attached: Some(target),
        })
    }

    /// Build the proxy without touching any point
    pub fn build_proxy<H: EquipmentHost>(
        &self,
        host: &H,
        functional: Option<ItemTypeId>,
        target: ItemTypeId,
    ) -> Result<VisualProxy> {
        let Some(functional) = functional else {
            // Preview render: nothing equipped, show the target as-is
            return host
                .template(target)
                .ok_or(SkinError::TemplateMissing(target))?
                .instantiate();
        };

        let mut proxy = host
            .template(functional)
            .ok_or(SkinError::TemplateMissing(functional))?
            .instantiate()?;
        proxy.functional_item = Some(functional);

        if target != functional {
            let substitute = host
                .template(target)
                .ok_or(SkinError::TemplateMissing(target))?
                .instantiate()?;
            self.graft_visuals(&mut proxy, substitute.children);
            proxy.visual_item = target;
        }
        Ok(proxy)
    }

    /// Replace the proxy's visual children with the substitute's
    fn graft_visuals(&self, proxy: &mut VisualProxy, substitute: Vec<ProxyChild>) {
        proxy
            .children
            .retain(|child| child.kind != ChildKind::Visual || self.is_collision(child));
        proxy.children.extend(
            substitute
                .into_iter()
                .filter(|child| child.kind == ChildKind::Visual && !self.is_collision(child)),
        );
    }

    fn is_collision(&self, child: &ProxyChild) -> bool {
        child.kind == ChildKind::Collision || self.config.is_collision_name(&child.name)
    }
}
