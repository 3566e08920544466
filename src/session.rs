//! Skin session: the explicitly constructed context tying profiles,
//! settings, persistence and the engine together
//!
//! The UI layer and the host hook both go through a session. Edits mark it
//! dirty; dropping a dirty session writes the profiles out.

use crate::appearance::{AppearanceEngine, RefreshReport};
use crate::core::config::{AppSettings, EngineConfig};
use crate::core::error::Result;
use crate::host::{EquipmentHost, HookOutcome, SlotNotification};
use crate::profile::editor::BatchEdit;
use crate::profile::persistence::{LoadSource, ProfileStore};
use crate::profile::registry::ProfileRegistry;

pub struct SkinSession {
    registry: ProfileRegistry,
    settings: AppSettings,
    store: Option<ProfileStore>,
    engine: AppearanceEngine,
    dirty: bool,
}

impl SkinSession {
    /// In-memory session with default profiles and no backing file
    pub fn new(config: EngineConfig) -> Self {
        Self {
            registry: ProfileRegistry::new(),
            settings: AppSettings::default(),
            store: None,
            engine: AppearanceEngine::new(config),
            dirty: false,
        }
    }

    /// Session backed by a profile file, loaded (and migrated) immediately
    pub fn open(store: ProfileStore, config: EngineConfig) -> Self {
        let outcome = store.load_or_default();
        tracing::info!(
            path = %store.path().display(),
            source = ?outcome.source,
            active = %outcome.registry.active_role(),
            "Profiles loaded"
        );
        Self {
            registry: outcome.registry,
            settings: outcome.settings,
            store: Some(store),
            engine: AppearanceEngine::new(config),
            dirty: false,
        }
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: AppSettings) {
        self.settings = settings;
        self.dirty = true;
    }

    pub fn engine(&self) -> &AppearanceEngine {
        &self.engine
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Host hook entry point
    pub fn on_slot_changed<H: EquipmentHost>(
        &mut self,
        host: &mut H,
        notification: SlotNotification,
    ) -> HookOutcome {
        self.engine
            .on_slot_changed(&self.registry, host, notification)
    }

    /// Bulk refresh entry point the UI calls after any batch edit
    pub fn refresh_all<H: EquipmentHost>(&mut self, host: &mut H) -> RefreshReport {
        self.engine.refresh_all(&self.registry, host)
    }

    /// Apply a UI edit and refresh
    ///
    /// Invalid input leaves the profiles untouched and skips the refresh.
    pub fn apply_edit<H: EquipmentHost>(
        &mut self,
        edit: BatchEdit,
        host: &mut H,
    ) -> Result<RefreshReport> {
        edit.apply(&mut self.registry)?;
        self.dirty = true;
        tracing::debug!(?edit, "Applied edit");
        Ok(self.refresh_all(host))
    }

    /// Write profiles to disk, then refresh
    pub fn save<H: EquipmentHost>(&mut self, host: &mut H) -> Result<RefreshReport> {
        self.persist()?;
        Ok(self.refresh_all(host))
    }

    /// Re-read profiles from disk, as when the UI opens, then refresh
    pub fn reload<H: EquipmentHost>(&mut self, host: &mut H) -> RefreshReport {
        if let Some(store) = &self.store {
            let outcome = store.load_or_default();
            if outcome.source != LoadSource::Current {
                tracing::info!(source = ?outcome.source, "Reloaded profiles from fallback source");
            }
            self.registry.replace(outcome.registry);
            self.settings = outcome.settings;
            self.dirty = false;
        }
        self.refresh_all(host)
    }

    /// Final save at shutdown
    pub fn shutdown(mut self) -> Result<()> {
        let result = self.persist();
        // Already written (or failed loudly); don't retry in Drop
        self.dirty = false;
        result
    }

    fn persist(&mut self) -> Result<()> {
        if let Some(store) = &self.store {
            store.save(&self.registry, &self.settings)?;
        }
        self.dirty = false;
        Ok(())
    }
}

impl Drop for SkinSession {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.persist() {
                tracing::error!(error = %e, "Saving profiles on drop failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{CharacterRole, ItemTypeId, SlotIdentity};
    use crate::host::scene::{ItemTemplate, TemplateChild};
    use crate::host::MemoryHost;
    use crate::profile::slot_config::SlotConfig;

    fn host() -> MemoryHost {
        let mut host = MemoryHost::new();
        host.add_character(CharacterRole::Primary);
        host.add_template(
            ItemTemplate::new(ItemTypeId(10), "Helmet").with_child(TemplateChild::visual("Shell")),
        );
        host.add_template(
            ItemTemplate::new(ItemTypeId(501), "Skin").with_child(TemplateChild::visual("Skin")),
        );
        host
    }

    #[test]
    fn test_edit_refreshes_and_marks_dirty() {
        let mut session = SkinSession::new(EngineConfig::default());
        let mut host = host();
        host.equip(CharacterRole::Primary, SlotIdentity::Helmet, Some(ItemTypeId(10)));

        let report = session
            .apply_edit(
                BatchEdit::SetSlot {
                    role: CharacterRole::Primary,
                    slot: SlotIdentity::Helmet,
                    text: "501".into(),
                    use_skin: true,
                },
                &mut host,
            )
            .unwrap();

        assert!(session.is_dirty());
        assert_eq!(report.head_passes, 1);
        assert_eq!(
            host.socket_items(CharacterRole::Primary, SlotIdentity::Helmet),
            vec![ItemTypeId(501)]
        );
        assert_eq!(
            session.registry().slot(CharacterRole::Primary, SlotIdentity::Helmet),
            SlotConfig::new(501, true)
        );
    }

    #[test]
    fn test_invalid_edit_skips_refresh() {
        let mut session = SkinSession::new(EngineConfig::default());
        let mut host = host();
        let result = session.apply_edit(
            BatchEdit::SetSlot {
                role: CharacterRole::Primary,
                slot: SlotIdentity::Armor,
                text: "nope".into(),
                use_skin: true,
            },
            &mut host,
        );
        assert!(result.is_err());
        assert!(!session.is_dirty());
    }
}
