//! Scene data exchanged with the host: item templates, visual proxies and
//! the attachment points they hang from.

use glam::{Quat, Vec3};
use uuid::Uuid;

use crate::core::error::{Result, SkinError};
use crate::core::types::{AttachmentPointId, ItemTypeId};

/// What a template child contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildKind {
    /// Meshes and materials; safe to swap for another item's look
    Visual,
    /// Components gameplay depends on (lights, interaction hooks, sounds)
    Functional,
    /// Collision or trigger volumes
    Collision,
}

/// One child node of an item template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateChild {
    pub name: String,
    pub kind: ChildKind,
}

impl TemplateChild {
    pub fn new(name: impl Into<String>, kind: ChildKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn visual(name: impl Into<String>) -> Self {
        Self::new(name, ChildKind::Visual)
    }

    pub fn functional(name: impl Into<String>) -> Self {
        Self::new(name, ChildKind::Functional)
    }

    pub fn collision(name: impl Into<String>) -> Self {
        Self::new(name, ChildKind::Collision)
    }
}

/// The host's renderable definition for an item type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTemplate {
    pub id: ItemTypeId,
    pub name: String,
    pub children: Vec<TemplateChild>,
    /// Declared hair visibility while worn; absent means shown
    pub show_hair: Option<bool>,
    /// Declared mouth visibility while worn; absent means shown
    pub show_mouth: Option<bool>,
}

impl ItemTemplate {
    pub fn new(id: ItemTypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
            show_hair: None,
            show_mouth: None,
        }
    }

    pub fn with_child(mut self, child: TemplateChild) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_hair(mut self, show: bool) -> Self {
        self.show_hair = Some(show);
        self
    }

    pub fn with_mouth(mut self, show: bool) -> Self {
        self.show_mouth = Some(show);
        self
    }

    pub fn allows_hair(&self) -> bool {
        self.show_hair.unwrap_or(true)
    }

    pub fn allows_mouth(&self) -> bool {
        self.show_mouth.unwrap_or(true)
    }

    /// Build a fresh proxy from this template
    ///
    /// A template without any child has no model to show and cannot be
    /// instantiated.
    pub fn instantiate(&self) -> Result<VisualProxy> {
        if self.children.is_empty() {
            return Err(SkinError::TemplateUnusable(
                self.id,
                format!("template '{}' has no model", self.name),
            ));
        }
        Ok(VisualProxy {
            id: ProxyId::new(),
            functional_item: None,
            visual_item: self.id,
            children: self
                .children
                .iter()
                .map(|child| ProxyChild {
                    name: child.name.clone(),
                    kind: child.kind,
                    source: self.id,
                })
                .collect(),
            transform: Transform::IDENTITY,
        })
    }
}

/// Local transform relative to the parent attachment point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Unique identifier for an instantiated proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProxyId(pub Uuid);

impl ProxyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProxyId {
    fn default() -> Self {
        Self::new()
    }
}

/// Instantiated child of a proxy, tagged with the template it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyChild {
    pub name: String,
    pub kind: ChildKind,
    pub source: ItemTypeId,
}

/// Renderable standing in for a slot's content
#[derive(Debug, Clone, PartialEq)]
pub struct VisualProxy {
    pub id: ProxyId,
    /// Item whose gameplay bindings this proxy carries, if any
    pub functional_item: Option<ItemTypeId>,
    /// Item whose appearance this proxy shows
    pub visual_item: ItemTypeId,
    pub children: Vec<ProxyChild>,
    pub transform: Transform,
}

impl VisualProxy {
    pub fn children_of_kind(&self, kind: ChildKind) -> impl Iterator<Item = &ProxyChild> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// True when the look was grafted from a different item
    pub fn is_grafted(&self) -> bool {
        self.functional_item
            .map_or(false, |functional| functional != self.visual_item)
    }
}

/// Physical anchor on a character model
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentPoint {
    pub id: AttachmentPointId,
    pub name: String,
    children: Vec<VisualProxy>,
}

impl AttachmentPoint {
    pub fn new(id: AttachmentPointId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Destroy every attached child, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.children.len();
        self.children.clear();
        removed
    }

    /// Parent a proxy here at identity transform
    pub fn attach(&mut self, mut proxy: VisualProxy) {
        proxy.transform = Transform::IDENTITY;
        self.children.push(proxy);
    }

    pub fn children(&self) -> &[VisualProxy] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Visual identities currently shown, in attach order
    pub fn visual_items(&self) -> Vec<ItemTypeId> {
        self.children.iter().map(|p| p.visual_item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helmet() -> ItemTemplate {
        ItemTemplate::new(ItemTypeId(10), "Helmet")
            .with_child(TemplateChild::visual("Shell"))
            .with_child(TemplateChild::functional("Flashlight"))
            .with_hair(false)
    }

    #[test]
    fn test_instantiate_copies_children() {
        let proxy = helmet().instantiate().unwrap();
        assert_eq!(proxy.visual_item, ItemTypeId(10));
        assert_eq!(proxy.children.len(), 2);
        assert!(proxy.children.iter().all(|c| c.source == ItemTypeId(10)));
        assert_eq!(proxy.transform, Transform::IDENTITY);
    }

    #[test]
    fn test_empty_template_unusable() {
        let template = ItemTemplate::new(ItemTypeId(3), "Broken");
        assert!(matches!(
            template.instantiate(),
            Err(SkinError::TemplateUnusable(ItemTypeId(3), _))
        ));
    }

    #[test]
    fn test_declared_flags_default_to_shown() {
        let template = helmet();
        assert!(!template.allows_hair());
        assert!(template.allows_mouth());
    }

    #[test]
    fn test_attach_resets_transform() {
        let mut point = AttachmentPoint::new(AttachmentPointId(1), "Head");
        let mut proxy = helmet().instantiate().unwrap();
        proxy.transform.translation = Vec3::new(1.0, 2.0, 3.0);
        point.attach(proxy);
        assert_eq!(point.children()[0].transform, Transform::IDENTITY);
        assert_eq!(point.clear(), 1);
        assert!(point.is_empty());
    }
}
