//! Profile file load/save
//!
//! The on-disk shape is a single JSON document holding both character
//! profiles and the app settings. Loading never fails: a missing or
//! unreadable file yields defaults, malformed slot entries are skipped,
//! and files written by older builds are migrated and flagged for re-save.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::{AppSettings, CURRENT_CONFIG_VERSION, LEGACY_CONFIG_VERSION};
use crate::core::error::Result;
use crate::core::types::{CharacterRole, SlotIdentity};
use crate::profile::registry::{ProfileRegistry, COMPANION_PROFILE_NAME, PRIMARY_PROFILE_NAME};
use crate::profile::slot_config::{CharacterProfile, SlotConfig};

const KEY_CURRENT_CHARACTER: &str = "CurrentCharacterType";
const KEY_PLAYER_PROFILE: &str = "PlayerProfile";
const KEY_PET_PROFILE: &str = "PetProfile";
const KEY_APP_SETTINGS: &str = "AppSettings";
const KEY_CONFIG_VERSION: &str = "ConfigVersion";
const KEY_PROFILE_NAME: &str = "ProfileName";
const KEY_SLOT_LIST: &str = "SlotConfigsList";

/// Root document as written by this build
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileFile {
    pub current_character_type: u8,
    pub player_profile: ProfileRecord,
    pub pet_profile: ProfileRecord,
    pub app_settings: AppSettings,
}

/// One character profile on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileRecord {
    pub config_version: i32,
    pub profile_name: String,
    pub slot_configs_list: Vec<SlotRecord>,
}

/// One slot entry on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    #[serde(rename = "SlotType")]
    pub slot_type: i64,
    #[serde(rename = "SkinItemTypeID")]
    pub skin_item_type_id: i32,
    #[serde(rename = "UseSkin")]
    pub use_skin: bool,
}

/// Where the loaded registry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// No file on disk
    Missing,
    /// File present but unreadable or not a JSON object
    Corrupt,
    /// Single-profile file from an older build
    Legacy,
    /// Current two-profile shape
    Current,
}

/// Result of reading a profile file
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub registry: ProfileRegistry,
    pub settings: AppSettings,
    pub source: LoadSource,
    /// The file should be rewritten in the current shape
    pub needs_resave: bool,
}

impl LoadOutcome {
    fn defaults(source: LoadSource) -> Self {
        Self {
            registry: ProfileRegistry::new(),
            settings: AppSettings::default(),
            source,
            needs_resave: false,
        }
    }
}

impl ProfileRecord {
    pub fn from_profile(profile: &CharacterProfile) -> Self {
        Self {
            config_version: profile.config_version,
            profile_name: profile.name.clone(),
            slot_configs_list: profile
                .slots
                .iter()
                .map(|(slot, config)| SlotRecord {
                    slot_type: slot.as_index(),
                    skin_item_type_id: config.skin_identity,
                    use_skin: config.use_skin,
                })
                .collect(),
        }
    }
}

impl ProfileFile {
    pub fn from_registry(registry: &ProfileRegistry, settings: &AppSettings) -> Self {
        Self {
            current_character_type: registry.active_role().as_index(),
            player_profile: ProfileRecord::from_profile(registry.profile(CharacterRole::Primary)),
            pet_profile: ProfileRecord::from_profile(registry.profile(CharacterRole::Companion)),
            app_settings: settings.clone(),
        }
    }
}

/// Serialize the registry and settings to the persisted JSON shape
pub fn to_json_string(registry: &ProfileRegistry, settings: &AppSettings) -> Result<String> {
    let file = ProfileFile::from_registry(registry, settings);
    Ok(serde_json::to_string_pretty(&file)?)
}

/// True when a document lacks both profile wrappers
pub fn is_legacy_shape(root: &Map<String, Value>) -> bool {
    !root.contains_key(KEY_PLAYER_PROFILE) && !root.contains_key(KEY_PET_PROFILE)
}

/// Parse a profile document, applying defaulting and migration rules
pub fn parse_str(content: &str) -> LoadOutcome {
    let root = match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "Profile file is not a JSON object, using defaults");
            return LoadOutcome::defaults(LoadSource::Corrupt);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Profile file could not be parsed, using defaults");
            return LoadOutcome::defaults(LoadSource::Corrupt);
        }
    };

    let active = root
        .get(KEY_CURRENT_CHARACTER)
        .and_then(Value::as_i64)
        .map(CharacterRole::from_index)
        .unwrap_or_default();

    let settings = match root.get(KEY_APP_SETTINGS) {
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "AppSettings block malformed, using defaults");
            AppSettings::default()
        }),
        None => AppSettings::default(),
    };

    if is_legacy_shape(&root) {
        tracing::info!("Migrating legacy single-profile file");
        let (mut primary, _) = read_profile(&root, PRIMARY_PROFILE_NAME, LEGACY_CONFIG_VERSION);
        primary.config_version = CURRENT_CONFIG_VERSION;
        return LoadOutcome {
            registry: ProfileRegistry::from_parts(
                primary,
                CharacterProfile::new(COMPANION_PROFILE_NAME),
                active,
            ),
            settings,
            source: LoadSource::Legacy,
            needs_resave: true,
        };
    }

    let mut needs_resave = false;
    let mut load_role = |key: &str, default_name: &str| -> CharacterProfile {
        match root.get(key) {
            Some(Value::Object(map)) => {
                let (mut profile, repaired) = read_profile(map, default_name, CURRENT_CONFIG_VERSION);
                needs_resave |= repaired;
                if profile.config_version < CURRENT_CONFIG_VERSION {
                    tracing::info!(
                        profile = %profile.name,
                        from = profile.config_version,
                        to = CURRENT_CONFIG_VERSION,
                        "Upgrading profile schema version"
                    );
                    profile.config_version = CURRENT_CONFIG_VERSION;
                    needs_resave = true;
                } else if profile.config_version > CURRENT_CONFIG_VERSION {
                    tracing::warn!(
                        profile = %profile.name,
                        version = profile.config_version,
                        "Profile written by a newer build, keeping its version"
                    );
                }
                profile
            }
            Some(_) => {
                tracing::warn!(key, "Profile entry malformed, using defaults");
                needs_resave = true;
                CharacterProfile::new(default_name)
            }
            None => {
                tracing::info!(key, "Profile entry absent, synthesizing defaults");
                needs_resave = true;
                CharacterProfile::new(default_name)
            }
        }
    };

    let primary = load_role(KEY_PLAYER_PROFILE, PRIMARY_PROFILE_NAME);
    let companion = load_role(KEY_PET_PROFILE, COMPANION_PROFILE_NAME);

    LoadOutcome {
        registry: ProfileRegistry::from_parts(primary, companion, active),
        settings,
        source: LoadSource::Current,
        needs_resave,
    }
}

/// Read one profile object; the flag reports whether any slot had to be synthesized
fn read_profile(
    map: &Map<String, Value>,
    default_name: &str,
    default_version: i32,
) -> (CharacterProfile, bool) {
    let mut profile = CharacterProfile::new(
        map.get(KEY_PROFILE_NAME)
            .and_then(Value::as_str)
            .unwrap_or(default_name),
    );
    profile.config_version = map
        .get(KEY_CONFIG_VERSION)
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(default_version);

    let mut seen = [false; 5];
    let entries = map
        .get(KEY_SLOT_LIST)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for entry in entries {
        let record: SlotRecord = match serde_json::from_value(entry.clone()) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed slot entry");
                continue;
            }
        };
        let slot = match SlotIdentity::try_from(record.slot_type) {
            Ok(slot) => slot,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping slot entry");
                continue;
            }
        };
        if seen[slot as usize] {
            tracing::debug!(%slot, "Duplicate slot entry ignored");
            continue;
        }
        seen[slot as usize] = true;
        profile
            .slots
            .set(slot, SlotConfig::new(record.skin_item_type_id, record.use_skin));
    }

    let synthesized = seen.iter().filter(|present| !**present).count();
    if synthesized > 0 {
        tracing::info!(
            profile = %profile.name,
            synthesized,
            "Filled missing slot entries with defaults"
        );
    }
    (profile, synthesized > 0)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Persistence gateway bound to one file path
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, falling back to defaults on any failure
    pub fn load(&self) -> LoadOutcome {
        match fs::read_to_string(&self.path) {
            Ok(content) => parse_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No profile file, using defaults");
                LoadOutcome::defaults(LoadSource::Missing)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Profile file unreadable, using defaults");
                LoadOutcome::defaults(LoadSource::Corrupt)
            }
        }
    }

    /// Write the file atomically: temp file in the same directory, then rename
    pub fn save(&self, registry: &ProfileRegistry, settings: &AppSettings) -> Result<()> {
        let json = to_json_string(registry, settings)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        tracing::debug!(path = %self.path.display(), "Profiles saved");
        Ok(())
    }

    /// Load and immediately re-save when the file needed migration or repair
    ///
    /// Save failures are logged; the loaded data is returned either way.
    pub fn load_or_default(&self) -> LoadOutcome {
        let mut outcome = self.load();
        if outcome.needs_resave {
            match self.save(&outcome.registry, &outcome.settings) {
                Ok(()) => outcome.needs_resave = false,
                Err(e) => {
                    tracing::error!(path = %self.path.display(), error = %e, "Re-saving migrated profiles failed")
                }
            }
        }
        outcome
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "profiles.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ItemTypeId;

    #[test]
    fn test_roundtrip_preserves_inert_and_zero_values() {
        let mut registry = ProfileRegistry::new();
        registry.set_slot(CharacterRole::Primary, SlotIdentity::Armor, SlotConfig::new(77, false));
        registry.set_slot(CharacterRole::Primary, SlotIdentity::Backpack, SlotConfig::new(0, true));
        registry.set_slot(CharacterRole::Companion, SlotIdentity::Helmet, SlotConfig::hidden());
        registry.set_slot(
            CharacterRole::Companion,
            SlotIdentity::Headset,
            SlotConfig::with_skin(ItemTypeId(9001)),
        );
        registry.set_active_role(CharacterRole::Companion);

        let json = to_json_string(&registry, &AppSettings::default()).unwrap();
        let outcome = parse_str(&json);

        assert_eq!(outcome.source, LoadSource::Current);
        assert!(!outcome.needs_resave);
        assert_eq!(outcome.registry, registry);
    }

    #[test]
    fn test_garbage_yields_defaults() {
        let outcome = parse_str("{ not json");
        assert_eq!(outcome.source, LoadSource::Corrupt);
        assert_eq!(outcome.registry, ProfileRegistry::new());

        let outcome = parse_str("[1, 2, 3]");
        assert_eq!(outcome.source, LoadSource::Corrupt);
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let json = r#"{
            "CurrentCharacterType": 0,
            "PlayerProfile": {
                "ConfigVersion": 2,
                "ProfileName": "Player",
                "SlotConfigsList": [
                    { "SlotType": 0, "SkinItemTypeID": 12, "UseSkin": true },
                    { "SlotType": "Helmet", "SkinItemTypeID": 5, "UseSkin": true },
                    { "SlotType": 9, "SkinItemTypeID": 5, "UseSkin": true },
                    { "SlotType": 2, "SkinItemTypeID": -1, "UseSkin": true },
                    { "SlotType": 3, "SkinItemTypeID": 0, "UseSkin": false },
                    { "SlotType": 4, "SkinItemTypeID": 33, "UseSkin": false }
                ]
            },
            "PetProfile": { "ConfigVersion": 2, "ProfileName": "Pet", "SlotConfigsList": [] }
        }"#;
        let outcome = parse_str(json);
        let primary = outcome.registry.profile(CharacterRole::Primary);

        assert_eq!(primary.slot(SlotIdentity::Armor), SlotConfig::new(12, true));
        assert_eq!(primary.slot(SlotIdentity::Helmet), SlotConfig::default());
        assert_eq!(primary.slot(SlotIdentity::FaceMask), SlotConfig::hidden());
        assert_eq!(primary.slot(SlotIdentity::Headset), SlotConfig::new(33, false));
        assert!(outcome.needs_resave);
    }

    #[test]
    fn test_duplicate_slot_first_wins() {
        let json = r#"{
            "PlayerProfile": { "ConfigVersion": 2, "ProfileName": "Player", "SlotConfigsList": [
                { "SlotType": 1, "SkinItemTypeID": 10, "UseSkin": true },
                { "SlotType": 1, "SkinItemTypeID": 20, "UseSkin": true }
            ]},
            "PetProfile": { "ConfigVersion": 2, "ProfileName": "Pet", "SlotConfigsList": [] }
        }"#;
        let outcome = parse_str(json);
        assert_eq!(
            outcome.registry.slot(CharacterRole::Primary, SlotIdentity::Helmet),
            SlotConfig::new(10, true)
        );
    }

    #[test]
    fn test_legacy_file_migrates() {
        let json = r#"{
            "ConfigVersion": 1,
            "ProfileName": "Old",
            "SlotConfigsList": [
                { "SlotType": 1, "SkinItemTypeID": 501, "UseSkin": true }
            ]
        }"#;
        let outcome = parse_str(json);
        assert_eq!(outcome.source, LoadSource::Legacy);
        assert!(outcome.needs_resave);

        let primary = outcome.registry.profile(CharacterRole::Primary);
        assert_eq!(primary.name, "Old");
        assert_eq!(primary.config_version, CURRENT_CONFIG_VERSION);
        assert_eq!(primary.slot(SlotIdentity::Helmet), SlotConfig::new(501, true));
        assert_eq!(
            outcome.registry.profile(CharacterRole::Companion),
            &CharacterProfile::new(COMPANION_PROFILE_NAME)
        );

        let saved = to_json_string(&outcome.registry, &outcome.settings).unwrap();
        let root: Map<String, Value> = serde_json::from_str(&saved).unwrap();
        assert!(!is_legacy_shape(&root));
        assert!(!root.contains_key(KEY_SLOT_LIST));
    }

    #[test]
    fn test_old_version_flags_resave() {
        let registry = ProfileRegistry::new();
        let mut file = ProfileFile::from_registry(&registry, &AppSettings::default());
        file.pet_profile.config_version = 1;
        let json = serde_json::to_string(&file).unwrap();

        let outcome = parse_str(&json);
        assert!(outcome.needs_resave);
        assert_eq!(
            outcome.registry.profile(CharacterRole::Companion).config_version,
            CURRENT_CONFIG_VERSION
        );
    }

    #[test]
    fn test_settings_block_loaded() {
        let json = r#"{
            "CurrentCharacterType": 1,
            "PlayerProfile": { "ConfigVersion": 2, "ProfileName": "Player", "SlotConfigsList": [] },
            "PetProfile": { "ConfigVersion": 2, "ProfileName": "Pet", "SlotConfigsList": [] },
            "AppSettings": { "EnableDebugLog": true, "EnableInfoLog": false,
                "EnableWarningLog": true, "EnableErrorLog": true, "Language": "Deutsch" }
        }"#;
        let outcome = parse_str(json);
        assert_eq!(outcome.registry.active_role(), CharacterRole::Companion);
        assert!(outcome.settings.enable_debug_log);
        assert_eq!(outcome.settings.language, "Deutsch");
    }
}
