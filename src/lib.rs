//! Equipment Skins - per-character appearance overrides for equipped items

pub mod appearance;
pub mod core;
pub mod host;
pub mod profile;
pub mod session;

pub use session::SkinSession;
