//! Per-character skin profiles: data model, registry, persistence, UI edits

pub mod editor;
pub mod persistence;
pub mod registry;
pub mod slot_config;

pub use editor::{parse_skin_field, skin_field_text, BatchEdit};
pub use persistence::{LoadOutcome, LoadSource, ProfileFile, ProfileStore};
pub use registry::ProfileRegistry;
pub use slot_config::{CharacterProfile, SkinSelection, SlotConfig, SlotConfigStore};
