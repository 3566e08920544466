use crate::core::types::{AttachmentPointId, CharacterRole, ItemTypeId, SlotIdentity};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkinError {
    #[error("Template not found for item {0}")]
    TemplateMissing(ItemTypeId),

    #[error("Template for item {0} could not be instantiated: {1}")]
    TemplateUnusable(ItemTypeId, String),

    #[error("No attachment point for {slot} on {role} character")]
    AttachmentPointMissing {
        role: CharacterRole,
        slot: SlotIdentity,
    },

    #[error("Attachment point {0:?} does not exist")]
    UnknownAttachmentPoint(AttachmentPointId),

    #[error("Invalid skin text: {0:?}")]
    InvalidSkinText(String),

    #[error("Unknown slot type: {0}")]
    UnknownSlotType(i64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SkinError>;
