// ============================================
// Footfall Trace - Прогон сценария с логом звуков
// ============================================
// RUST_LOG=info cargo run --bin footfall_trace
// RUST_LOG=debug дополнительно показывает выброшенные звуки и реестр.

use std::sync::Arc;

use ultraviolet::DVec3;

use footfall::acoustics::{AcousticDef, ArmorClass, Substrate};
use footfall::blocks::SoundType;
use footfall::{
    BlockCatalog, BlockState, FootfallError, FootstepConfig, FootstepSystem, LogSink, MotionSample, RegistryBuilder,
    VoxelWorld,
};

const PLAYER: u64 = 1;
const TICK_MS: u64 = 50;

const STONE: u16 = 1;
const CARPET: u16 = 2;
const TALL_GRASS: u16 = 3;
const GRASS: u16 = 4;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("Trace failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), FootfallError> {
    let mut world = build_world();
    world.set_block(footfall::BlockPos::new(4, 64, 0), BlockState::new(CARPET));
    for x in 8..12 {
        world.set_block(footfall::BlockPos::new(x, 63, 0), BlockState::new(GRASS));
        world.set_block(footfall::BlockPos::new(x, 64, 0), BlockState::new(TALL_GRASS));
    }
    log::info!("World: {} blocks", world.block_count());

    let registry = build_registry()?;
    let config = match std::env::args().nth(1) {
        Some(path) => FootstepConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => FootstepConfig::default(),
    };
    let mut system = FootstepSystem::new(Arc::new(registry), config, LogSink::new())?;

    let mut now = 0;
    let mut position = DVec3::new(0.5, 64.0, 0.5);

    // Разбег по камню, ковру и траве
    log::info!("--- walk ---");
    for _ in 0..120 {
        position.x += 0.12;
        let sample = MotionSample {
            motion: DVec3::new(0.12, 0.0, 0.0),
            yaw: 0.0,
            armor: Some(ArmorClass::Heavy),
            ..MotionSample::standing(position)
        };
        step(&mut system, &world, &sample, &mut now);
    }

    // Остановка, прыжок с места и жёсткое приземление
    log::info!("--- jump ---");
    for _ in 0..6 {
        step(&mut system, &world, &MotionSample::standing(position), &mut now);
    }
    for (dy, fall) in [(0.42, 0.0), (0.75, 0.0), (0.6, 0.5), (0.2, 1.1)] {
        let sample = MotionSample {
            on_ground: false,
            jumping: fall == 0.0,
            motion: DVec3::new(0.0, 0.2, 0.0),
            fall_distance: fall,
            ..MotionSample::standing(DVec3::new(position.x, position.y + dy, position.z))
        };
        step(&mut system, &world, &sample, &mut now);
    }
    step(&mut system, &world, &MotionSample::standing(position), &mut now);

    // Дать очереди догнать задержанные звуки
    for _ in 0..10 {
        now += TICK_MS;
        system.think(now);
    }

    log::info!("Played {} sounds, {} still pending", system.sink().played(), system.pending_len());
    Ok(())
}

fn step(system: &mut FootstepSystem<LogSink>, world: &VoxelWorld, sample: &MotionSample, now: &mut u64) {
    system.tick_entity(PLAYER, sample, world, *now);
    system.think(*now);
    *now += TICK_MS;
}

fn build_world() -> VoxelWorld {
    let mut catalog = BlockCatalog::new();
    catalog.register_simple(STONE, "stone", SoundType::vanilla("stone", 1.0, 1.0));
    catalog.register_simple(CARPET, "carpet", SoundType::vanilla("cloth", 1.0, 1.0));
    catalog.register_simple(TALL_GRASS, "tall_grass", SoundType::vanilla("plant", 1.0, 1.0));
    catalog.register_simple(GRASS, "grass", SoundType::vanilla("grass", 0.6, 1.0));

    let mut world = VoxelWorld::new(catalog);
    world.fill_floor((-4, -4), (24, 4), 63, BlockState::new(STONE));
    world
}

fn build_registry() -> Result<footfall::AcousticRegistry, FootfallError> {
    let mut builder = RegistryBuilder::new();
    builder
        .acoustic(
            "stone_step",
            AcousticDef::Basic { sound: "step.stone".into(), volume: [0.8, 1.0], pitch: [0.9, 1.1], delay: None },
        )
        .acoustic("stone_echo", AcousticDef::delayed("step.stone.echo", [60, 120]))
        .acoustic("stone", AcousticDef::Simultaneous { parts: vec!["stone_step".into(), "stone_echo".into()] })
        .acoustic("carpet", AcousticDef::basic("step.carpet"))
        .acoustic("grass", AcousticDef::basic("step.grass"))
        .acoustic("brush", AcousticDef::basic("brush.grass"))
        .acoustic("plate", AcousticDef::basic("armor.plate"))
        .block(CARPET, None, Some(Substrate::Carpet), &["carpet"])
        .block(GRASS, None, None, &["grass"])
        .block(TALL_GRASS, None, Some(Substrate::Foliage), &["brush"])
        .block(TALL_GRASS, None, Some(Substrate::Messy), &["brush"])
        .primitive("block.stone.step", Some("1.00_1.00"), &["stone"])
        .armor(ArmorClass::Heavy, "plate");
    builder.build()
}
