//! Integration tests for the appearance engine against an in-memory host

use equipment_skins::appearance::{AppearanceEngine, RenderAction};
use equipment_skins::core::types::{CharacterFeature, CharacterRole, ItemTypeId, SlotIdentity};
use equipment_skins::host::{ChildKind, HookOutcome, ItemTemplate, MemoryHost, TemplateChild};
use equipment_skins::profile::{BatchEdit, ProfileRegistry, SlotConfig};
use equipment_skins::SkinSession;
use equipment_skins::core::EngineConfig;

const PLAYER: CharacterRole = CharacterRole::Primary;
const PET: CharacterRole = CharacterRole::Companion;

fn catalog_host() -> MemoryHost {
    let mut host = MemoryHost::new();
    host.add_character(PLAYER);
    host.add_character(PET);
    host.add_template(
        ItemTemplate::new(ItemTypeId(7), "Headset")
            .with_child(TemplateChild::visual("Earcups"))
            .with_child(TemplateChild::functional("Radio")),
    );
    host.add_template(
        ItemTemplate::new(ItemTypeId(10), "Helmet")
            .with_child(TemplateChild::visual("Shell"))
            .with_child(TemplateChild::functional("Flashlight"))
            .with_hair(false),
    );
    host.add_template(
        ItemTemplate::new(ItemTypeId(20), "Gas Mask")
            .with_child(TemplateChild::visual("Mask"))
            .with_mouth(false),
    );
    host.add_template(
        ItemTemplate::new(ItemTypeId(21), "Bandana")
            .with_child(TemplateChild::visual("Cloth"))
            .with_hair(false)
            .with_mouth(false),
    );
    host.add_template(
        ItemTemplate::new(ItemTypeId(501), "Cowboy Hat")
            .with_child(TemplateChild::visual("Brim"))
            .with_child(TemplateChild::collision("BrimBounds"))
            .with_hair(true),
    );
    host.add_template(
        ItemTemplate::new(ItemTypeId(502), "Crown")
            .with_child(TemplateChild::visual("Crown"))
            .with_hair(false),
    );
    host.add_template(
        ItemTemplate::new(ItemTypeId(30), "Pack").with_child(TemplateChild::visual("Pack")),
    );
    host
}

fn fire(
    engine: &mut AppearanceEngine,
    registry: &ProfileRegistry,
    host: &mut MemoryHost,
    role: CharacterRole,
    slot: SlotIdentity,
) -> HookOutcome {
    let notification = host.notification(role, slot).expect("slot has a socket");
    engine.on_slot_changed(registry, host, notification)
}

#[test]
fn test_empty_helmet_with_skin_renders_preview() {
    let mut engine = AppearanceEngine::default();
    let mut registry = ProfileRegistry::new();
    registry.set_slot(PLAYER, SlotIdentity::Helmet, SlotConfig::new(501, true));
    let mut host = catalog_host();
    host.equip(PLAYER, SlotIdentity::FaceMask, Some(ItemTypeId(21)));

    let outcome = fire(&mut engine, &registry, &mut host, PLAYER, SlotIdentity::Helmet);

    assert_eq!(outcome, HookOutcome::Handled);
    let report = engine.last_head_pass().unwrap();
    assert_eq!(
        report.action(SlotIdentity::Helmet),
        Some(RenderAction::RenderIdentity(ItemTypeId(501)))
    );
    // Cowboy hat allows hair, bandana does not
    assert!(!report.visibility.show_hair);
    assert_eq!(host.feature_active(PLAYER, CharacterFeature::Hair), Some(false));
    assert_eq!(host.feature_active(PLAYER, CharacterFeature::Mouth), Some(false));

    let proxies = host.socket_proxies(PLAYER, SlotIdentity::Helmet);
    assert_eq!(proxies.len(), 1);
    assert_eq!(proxies[0].functional_item, None);
}

#[test]
fn test_hair_follows_skin_not_functional_item() {
    let mut engine = AppearanceEngine::default();
    let mut registry = ProfileRegistry::new();
    let mut host = catalog_host();
    host.equip(PLAYER, SlotIdentity::Helmet, Some(ItemTypeId(10)));

    fire(&mut engine, &registry, &mut host, PLAYER, SlotIdentity::Helmet);
    assert_eq!(host.feature_active(PLAYER, CharacterFeature::Hair), Some(false));

    registry.set_slot(PLAYER, SlotIdentity::Helmet, SlotConfig::with_skin(ItemTypeId(501)));
    fire(&mut engine, &registry, &mut host, PLAYER, SlotIdentity::Helmet);
    assert_eq!(host.feature_active(PLAYER, CharacterFeature::Hair), Some(true));

    let proxy = &host.socket_proxies(PLAYER, SlotIdentity::Helmet)[0];
    assert_eq!(proxy.functional_item, Some(ItemTypeId(10)));
    assert_eq!(proxy.visual_item, ItemTypeId(501));
    assert!(proxy.children.iter().any(|c| c.name == "Flashlight"));
    assert!(proxy
        .children
        .iter()
        .all(|c| c.kind != ChildKind::Collision || c.source == ItemTypeId(10)));

    registry.set_slot(PLAYER, SlotIdentity::Helmet, SlotConfig::hidden());
    fire(&mut engine, &registry, &mut host, PLAYER, SlotIdentity::Helmet);
    assert_eq!(host.feature_active(PLAYER, CharacterFeature::Hair), Some(true));
    assert!(host.socket_items(PLAYER, SlotIdentity::Helmet).is_empty());
}

#[test]
fn test_headset_notification_recomputes_whole_group() {
    let mut engine = AppearanceEngine::default();
    let registry = ProfileRegistry::new();
    let mut host = catalog_host();
    host.equip(PLAYER, SlotIdentity::Headset, Some(ItemTypeId(7)));
    host.equip(PLAYER, SlotIdentity::Helmet, Some(ItemTypeId(10)));
    host.equip(PLAYER, SlotIdentity::FaceMask, Some(ItemTypeId(20)));

    let outcome = fire(&mut engine, &registry, &mut host, PLAYER, SlotIdentity::Headset);

    assert_eq!(outcome, HookOutcome::Handled);
    let report = engine.last_head_pass().unwrap();
    let order: Vec<SlotIdentity> = report.slots.iter().map(|r| r.slot).collect();
    assert_eq!(order, SlotIdentity::HEAD_GROUP.to_vec());
    assert_eq!(
        report.action(SlotIdentity::Headset),
        Some(RenderAction::RenderFunctional(ItemTypeId(7)))
    );
    assert_eq!(
        host.socket_items(PLAYER, SlotIdentity::Helmet),
        vec![ItemTypeId(7), ItemTypeId(10)]
    );
    assert_eq!(host.socket_items(PLAYER, SlotIdentity::FaceMask), vec![ItemTypeId(20)]);
    assert_eq!(host.feature_active(PLAYER, CharacterFeature::Mouth), Some(false));
}

#[test]
fn test_repeated_notifications_do_not_duplicate() {
    let mut engine = AppearanceEngine::default();
    let mut registry = ProfileRegistry::new();
    registry.set_slot(PLAYER, SlotIdentity::Headset, SlotConfig::with_skin(ItemTypeId(502)));
    registry.set_slot(PLAYER, SlotIdentity::Backpack, SlotConfig::with_skin(ItemTypeId(30)));
    let mut host = catalog_host();
    host.equip(PLAYER, SlotIdentity::Helmet, Some(ItemTypeId(10)));

    for slot in SlotIdentity::ALL {
        fire(&mut engine, &registry, &mut host, PLAYER, slot);
    }
    let head = host.socket_items(PLAYER, SlotIdentity::Helmet);
    let back = host.socket_items(PLAYER, SlotIdentity::Backpack);

    for slot in SlotIdentity::ALL {
        fire(&mut engine, &registry, &mut host, PLAYER, slot);
    }

    assert_eq!(head, vec![ItemTypeId(502), ItemTypeId(10)]);
    assert_eq!(host.socket_items(PLAYER, SlotIdentity::Helmet), head);
    assert_eq!(host.socket_items(PLAYER, SlotIdentity::Backpack), back);
    assert_eq!(back, vec![ItemTypeId(30)]);
}

#[test]
fn test_profiles_apply_per_character() {
    let mut engine = AppearanceEngine::default();
    let mut registry = ProfileRegistry::new();
    registry.set_slot(PET, SlotIdentity::Helmet, SlotConfig::with_skin(ItemTypeId(502)));
    let mut host = catalog_host();
    host.equip(PLAYER, SlotIdentity::Helmet, Some(ItemTypeId(10)));
    host.equip(PET, SlotIdentity::Helmet, Some(ItemTypeId(10)));

    let report = engine.refresh_all(&registry, &mut host);

    assert_eq!(report.head_passes, 2);
    assert_eq!(host.socket_items(PLAYER, SlotIdentity::Helmet), vec![ItemTypeId(10)]);
    assert_eq!(host.socket_items(PET, SlotIdentity::Helmet), vec![ItemTypeId(502)]);
}

#[test]
fn test_missing_feature_objects_do_not_abort_pass() {
    let mut engine = AppearanceEngine::default();
    let registry = ProfileRegistry::new();
    let mut host = catalog_host();
    host.remove_feature(PLAYER, CharacterFeature::Hair);
    host.remove_feature(PLAYER, CharacterFeature::Mouth);
    host.equip(PLAYER, SlotIdentity::Helmet, Some(ItemTypeId(10)));

    let outcome = fire(&mut engine, &registry, &mut host, PLAYER, SlotIdentity::Helmet);

    assert_eq!(outcome, HookOutcome::Handled);
    assert_eq!(host.socket_items(PLAYER, SlotIdentity::Helmet), vec![ItemTypeId(10)]);
}

#[test]
fn test_missing_face_socket_isolated() {
    let mut engine = AppearanceEngine::default();
    let registry = ProfileRegistry::new();
    let mut host = catalog_host();
    host.equip(PLAYER, SlotIdentity::Helmet, Some(ItemTypeId(10)));
    host.equip(PLAYER, SlotIdentity::FaceMask, Some(ItemTypeId(20)));
    host.remove_socket(PLAYER, SlotIdentity::FaceMask);

    fire(&mut engine, &registry, &mut host, PLAYER, SlotIdentity::Helmet);

    let report = engine.last_head_pass().unwrap();
    assert_eq!(report.failures(), 1);
    assert_eq!(host.socket_items(PLAYER, SlotIdentity::Helmet), vec![ItemTypeId(10)]);
}

#[test]
fn test_session_reset_restores_functional_look() {
    let mut session = SkinSession::new(EngineConfig::default());
    let mut host = catalog_host();
    host.equip(PLAYER, SlotIdentity::Helmet, Some(ItemTypeId(10)));
    host.equip(PLAYER, SlotIdentity::Backpack, Some(ItemTypeId(30)));

    session
        .apply_edit(
            BatchEdit::SetSlot {
                role: PLAYER,
                slot: SlotIdentity::Helmet,
                text: "-1".into(),
                use_skin: true,
            },
            &mut host,
        )
        .unwrap();
    assert!(host.socket_items(PLAYER, SlotIdentity::Helmet).is_empty());

    let report = session
        .apply_edit(BatchEdit::ResetProfile(PLAYER), &mut host)
        .unwrap();

    assert_eq!(report.deferred, 1);
    assert_eq!(host.socket_items(PLAYER, SlotIdentity::Helmet), vec![ItemTypeId(10)]);
    assert_eq!(host.socket_items(PLAYER, SlotIdentity::Backpack), vec![ItemTypeId(30)]);
}
