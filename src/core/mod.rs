pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{AppSettings, EngineConfig, CURRENT_CONFIG_VERSION, LEGACY_CONFIG_VERSION};
pub use error::{Result, SkinError};
pub use types::{AttachmentPointId, CharacterFeature, CharacterRole, ItemTypeId, SlotIdentity};
