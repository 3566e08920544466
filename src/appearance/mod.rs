//! Equipment appearance decision engine
//!
//! Given a slot-change notification, decides what model the slot should
//! show, renders it onto the character's attachment points, and keeps the
//! head-group trio and the hair/mouth flags consistent.

pub mod decision;
pub mod engine;
pub mod head_group;
pub mod refresh;
pub mod renderer;
pub mod visibility;

pub use decision::{decide, hook_outcome, RenderAction};
pub use engine::AppearanceEngine;
pub use head_group::{HeadGroupPass, HeadPassReport, HeadSlotResult};
pub use refresh::{RefreshGuard, RefreshReport};
pub use renderer::{ClearMode, RenderOutcome, SocketRenderer};
pub use visibility::{FeatureVisibility, SlotAllowance};
