//! Application settings and engine constants
//!
//! `AppSettings` is persisted alongside the profiles; `EngineConfig` holds the
//! fixed knobs of the appearance engine and is built in code.

use serde::{Deserialize, Serialize};

use crate::core::types::SlotIdentity;

/// Schema version written by this build
pub const CURRENT_CONFIG_VERSION: i32 = 2;

/// Version assigned to profiles migrated from the legacy single-profile file
pub const LEGACY_CONFIG_VERSION: i32 = 1;

/// User-facing settings stored in the `AppSettings` block of the profile file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AppSettings {
    pub enable_debug_log: bool,
    pub enable_info_log: bool,
    pub enable_warning_log: bool,
    pub enable_error_log: bool,
    /// Localization key; the string tables themselves live in the UI layer
    pub language: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            enable_debug_log: false,
            enable_info_log: true,
            enable_warning_log: true,
            enable_error_log: true,
            language: "English".to_string(),
        }
    }
}

impl AppSettings {
    /// Most verbose enabled level as a tracing filter directive
    ///
    /// Toggles are cumulative from the top: enabling debug implies the rest
    /// are wanted too. With every toggle off logging is disabled entirely.
    pub fn level_directive(&self) -> &'static str {
        if self.enable_debug_log {
            "debug"
        } else if self.enable_info_log {
            "info"
        } else if self.enable_warning_log {
            "warn"
        } else if self.enable_error_log {
            "error"
        } else {
            "off"
        }
    }

    /// Full `EnvFilter` directive scoped to this crate
    pub fn filter_directive(&self) -> String {
        format!("equipment_skins={}", self.level_directive())
    }
}

/// Configuration for the appearance engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Order of the coupled head-group pass
    ///
    /// Headset first: it shares the helmet socket and is the piece most often
    /// layered underneath.
    pub head_pass_order: [SlotIdentity; 3],

    /// Case-insensitive name fragments marking a template child as collision
    /// or trigger geometry, in addition to its declared kind
    pub collision_name_markers: Vec<String>,

    /// Skip characters whose equipment has not finished loading during a
    /// bulk refresh
    pub skip_unloaded_characters: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            head_pass_order: SlotIdentity::HEAD_GROUP,
            collision_name_markers: vec!["collider".to_string(), "trigger".to_string()],
            skip_unloaded_characters: true,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = self.head_pass_order.to_vec();
        seen.sort();
        seen.dedup();
        if seen.len() != 3 || !seen.iter().all(|s| s.is_head_group()) {
            return Err(format!(
                "head_pass_order must list Helmet, FaceMask and Headset exactly once, got {:?}",
                self.head_pass_order
            ));
        }

        if self
            .collision_name_markers
            .iter()
            .any(|marker| marker.trim().is_empty())
        {
            return Err("collision_name_markers must not contain empty entries".into());
        }

        Ok(())
    }

    /// Whether a child name matches one of the collision markers
    pub fn is_collision_name(&self, name: &str) -> bool {
        let lowered = name.to_ascii_lowercase();
        self.collision_name_markers
            .iter()
            .any(|marker| lowered.contains(&marker.to_ascii_lowercase()))
    }
}
