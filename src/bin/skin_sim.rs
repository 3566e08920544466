//! Skin simulation driver
//!
//! Loads a profile file, equips a demo loadout on an in-memory character
//! rig, fires the host notifications, applies any edits given on the command
//! line, and prints what ends up on each attachment point.

use clap::Parser;
use std::path::PathBuf;

use equipment_skins::core::logging::init_logging;
use equipment_skins::core::types::{CharacterFeature, CharacterRole, ItemTypeId, SlotIdentity};
use equipment_skins::core::EngineConfig;
use equipment_skins::host::{EquipmentHost, ItemTemplate, MemoryHost, TemplateChild};
use equipment_skins::profile::{skin_field_text, BatchEdit, ProfileStore};
use equipment_skins::SkinSession;

#[derive(Parser, Debug)]
#[command(name = "skin_sim", about = "Drive the equipment appearance engine on a demo rig")]
struct Args {
    /// Profile file to load and save
    #[arg(short, long, default_value = "skin_profiles.json")]
    profile: PathBuf,

    /// Slot edits for the active character, e.g. `helmet=501` or `backpack=-1`
    #[arg(short, long = "set", value_name = "SLOT=SKIN")]
    sets: Vec<String>,

    /// Edit the companion instead of the player
    #[arg(long)]
    companion: bool,

    /// Give the companion a merged head/face socket
    #[arg(long)]
    merged_face: bool,

    /// Write the profile file when done
    #[arg(long)]
    save: bool,
}

fn parse_slot(name: &str) -> Option<SlotIdentity> {
    SlotIdentity::ALL
        .into_iter()
        .find(|slot| slot.name().eq_ignore_ascii_case(name))
}

fn demo_host(merged_face: bool) -> MemoryHost {
    let mut host = MemoryHost::new();
    host.add_character(CharacterRole::Primary);
    if merged_face {
        host.add_character_with_merged_face(CharacterRole::Companion);
    } else {
        host.add_character(CharacterRole::Companion);
    }

    let catalog = [
        ItemTemplate::new(ItemTypeId(5), "Tactical Vest")
            .with_child(TemplateChild::visual("VestMesh"))
            .with_child(TemplateChild::functional("PouchSlots")),
        ItemTemplate::new(ItemTypeId(7), "Comms Headset")
            .with_child(TemplateChild::visual("Earcups"))
            .with_child(TemplateChild::functional("RadioReceiver")),
        ItemTemplate::new(ItemTypeId(10), "Ballistic Helmet")
            .with_child(TemplateChild::visual("Shell"))
            .with_child(TemplateChild::functional("Flashlight"))
            .with_child(TemplateChild::collision("HeadCollider"))
            .with_hair(false),
        ItemTemplate::new(ItemTypeId(20), "Gas Mask")
            .with_child(TemplateChild::visual("MaskBody"))
            .with_child(TemplateChild::functional("Filter"))
            .with_mouth(false),
        ItemTemplate::new(ItemTypeId(30), "Field Pack")
            .with_child(TemplateChild::visual("PackMesh"))
            .with_child(TemplateChild::functional("Storage")),
        ItemTemplate::new(ItemTypeId(501), "Cowboy Hat")
            .with_child(TemplateChild::visual("Brim"))
            .with_child(TemplateChild::visual("BrimTrigger")),
        ItemTemplate::new(ItemTypeId(502), "Party Hat")
            .with_child(TemplateChild::visual("Cone"))
            .with_hair(true),
    ];
    for template in catalog {
        host.add_template(template);
    }

    let loadout = [
        (SlotIdentity::Armor, 5),
        (SlotIdentity::Headset, 7),
        (SlotIdentity::Helmet, 10),
        (SlotIdentity::FaceMask, 20),
        (SlotIdentity::Backpack, 30),
    ];
    for (slot, id) in loadout {
        host.equip(CharacterRole::Primary, slot, Some(ItemTypeId(id)));
    }
    host.equip(CharacterRole::Companion, SlotIdentity::Helmet, Some(ItemTypeId(10)));
    host
}

fn print_character(session: &SkinSession, host: &MemoryHost, role: CharacterRole) {
    println!("\n== {} ({}) ==", role, session.registry().profile(role).name);
    for slot in SlotIdentity::ALL {
        let config = session.registry().slot(role, slot);
        let equipped = host
            .equipped_item(role, slot)
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "  {:<9} equipped {:<6} skin [{:>5}] use_skin={}",
            slot.name(),
            equipped,
            skin_field_text(&config),
            config.use_skin
        );
    }
    for point in host.character_points(role) {
        let shown: Vec<String> = point
            .children()
            .iter()
            .map(|proxy| match proxy.functional_item {
                Some(functional) if functional != proxy.visual_item => {
                    format!("{} (on {})", proxy.visual_item, functional)
                }
                _ => proxy.visual_item.to_string(),
            })
            .collect();
        println!("  socket {:<16} {}", point.name, shown.join(", "));
    }
    let flag = |feature| {
        host.feature_active(role, feature)
            .map(|on| if on { "shown" } else { "hidden" })
            .unwrap_or("absent")
    };
    println!(
        "  hair {}, mouth {}",
        flag(CharacterFeature::Hair),
        flag(CharacterFeature::Mouth)
    );
}

fn main() {
    let args = Args::parse();

    let store = ProfileStore::new(&args.profile);
    let settings = store.load().settings;
    init_logging(&settings);

    let mut session = SkinSession::open(store, EngineConfig::default());
    let mut host = demo_host(args.merged_face);

    // Host fires one notification per slot as the rigs finish loading
    for role in CharacterRole::ALL {
        for slot in SlotIdentity::ALL {
            if let Some(notification) = host.notification(role, slot) {
                if !session.on_slot_changed(&mut host, notification).is_handled() {
                    host.render_default(role, slot);
                }
            }
        }
    }

    let role = if args.companion {
        CharacterRole::Companion
    } else {
        CharacterRole::Primary
    };
    if role != session.registry().active_role() {
        if let Err(e) = session.apply_edit(BatchEdit::SwitchRole(role), &mut host) {
            tracing::error!(error = %e, "Switching character failed");
        }
    }

    for entry in &args.sets {
        let Some((slot_name, text)) = entry.split_once('=') else {
            eprintln!("ignoring '{}': expected SLOT=SKIN", entry);
            continue;
        };
        let Some(slot) = parse_slot(slot_name.trim()) else {
            eprintln!("ignoring '{}': unknown slot '{}'", entry, slot_name);
            continue;
        };
        let edit = BatchEdit::SetSlot {
            role,
            slot,
            text: text.to_string(),
            use_skin: true,
        };
        match session.apply_edit(edit, &mut host) {
            Ok(report) => tracing::info!(%slot, failures = report.failures, "Edit applied"),
            Err(e) => eprintln!("ignoring '{}': {}", entry, e),
        }
    }

    for role in CharacterRole::ALL {
        print_character(&session, &host, role);
    }

    if args.save {
        match session.save(&mut host) {
            Ok(_) => println!("\nSaved {}", args.profile.display()),
            Err(e) => eprintln!("\nSave failed: {}", e),
        }
    }
    if let Err(e) = session.shutdown() {
        tracing::error!(error = %e, "Final save failed");
    }
}
