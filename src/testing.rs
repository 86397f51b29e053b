// ============================================
// Test Fixtures - Синтетический мир для тестов
// ============================================

use ultraviolet::DVec3;

use crate::acoustics::{AcousticDef, AcousticRegistry, ArmorClass, RegistryBuilder, Substrate, NOT_EMITTER};
use crate::blocks::{BlockCatalog, BlockDefinition, BlockPos, BlockState, BlockType, SoundType, VoxelWorld};
use crate::core::FootstepConfig;

pub const STONE: BlockType = 1;
pub const CARPET: BlockType = 2;
pub const FENCE: BlockType = 3;
pub const GRASS: BlockType = 4;
pub const TALL_GRASS: BlockType = 5;
pub const SILENT: BlockType = 6;
pub const WOOD: BlockType = 7;
pub const SNOW_LAYER: BlockType = 8;
pub const WATER: BlockType = 9;
pub const MUTED_CARPET: BlockType = 11;

/// Высота пола во всех сценариях
pub const FLOOR_Y: i32 = 63;

pub fn catalog() -> BlockCatalog {
    let mut catalog = BlockCatalog::new();
    catalog.register_simple(STONE, "stone", SoundType::vanilla("stone", 1.0, 1.0));
    catalog.register_simple(CARPET, "carpet", SoundType::vanilla("cloth", 1.0, 1.0));
    catalog.register_simple(FENCE, "fence", SoundType::vanilla("wood", 1.0, 1.0));
    catalog.register_simple(GRASS, "grass", SoundType::vanilla("grass", 1.0, 1.0));
    catalog.register_simple(TALL_GRASS, "tall_grass", SoundType::vanilla("plant", 1.0, 1.0));
    catalog.register_simple(SILENT, "silent", SoundType::vanilla("stone", 1.0, 1.0));
    catalog.register_simple(WOOD, "planks", SoundType::vanilla("wood", 1.0, 1.0));
    catalog.register_simple(MUTED_CARPET, "muted_carpet", SoundType::vanilla("cloth", 1.0, 1.0));
    catalog.register(BlockDefinition {
        id: "snow_layer".to_string(),
        numeric_id: SNOW_LAYER,
        name: "Snow Layer".to_string(),
        sound: Some(SoundType::vanilla("snow", 1.0, 1.0)),
        snow_layer: true,
        ..Default::default()
    });
    catalog.register(BlockDefinition {
        id: "water".to_string(),
        numeric_id: WATER,
        name: "Water".to_string(),
        sound: Some(SoundType::vanilla("water", 1.0, 1.0)),
        liquid: true,
        ..Default::default()
    });
    catalog
}

pub fn registry_builder() -> RegistryBuilder {
    let mut builder = RegistryBuilder::new();
    builder
        .acoustic("stone_step", AcousticDef::basic("step.stone"))
        .acoustic("carpet", AcousticDef::basic("step.carpet"))
        .acoustic("fence", AcousticDef::basic("step.fence"))
        .acoustic("grass", AcousticDef::basic("step.grass"))
        .acoustic("brush", AcousticDef::basic("brush.grass"))
        .acoustic("plate", AcousticDef::basic("armor.plate"))
        .acoustic("chain", AcousticDef::basic("armor.chain"))
        .acoustic(
            "_SWIM",
            AcousticDef::Basic { sound: "liquid.swim".into(), volume: [0.0, 1.0], pitch: [1.0, 1.0], delay: None },
        )
        .block(CARPET, None, Some(Substrate::Carpet), &["carpet"])
        .block(MUTED_CARPET, None, Some(Substrate::Carpet), &[NOT_EMITTER])
        .block(FENCE, None, Some(Substrate::Fence), &["fence"])
        .block(GRASS, None, None, &["grass"])
        .block(TALL_GRASS, None, Some(Substrate::Foliage), &["brush"])
        .block(TALL_GRASS, None, Some(Substrate::Messy), &["brush"])
        .block(SILENT, None, None, &[NOT_EMITTER])
        .primitive("block.stone.step", Some("1.00_1.00"), &["stone_step"])
        .armor(ArmorClass::Heavy, "plate")
        .foot_armor(ArmorClass::Heavy, "plate")
        .foot_armor(ArmorClass::Medium, "chain");
    builder
}

pub fn registry() -> AcousticRegistry {
    registry_builder().build().expect("fixture registry")
}

pub fn config() -> FootstepConfig {
    FootstepConfig { rng_seed: Some(42), ..Default::default() }
}

/// Пустой мир
pub fn world() -> VoxelWorld {
    VoxelWorld::new(catalog())
}

/// Каменный пол 32x32 вокруг начала координат
pub fn stone_floor() -> VoxelWorld {
    let mut world = world();
    world.fill_floor((-16, -16), (16, 16), FLOOR_Y, BlockState::new(STONE));
    world
}

pub fn at(x: i32, y: i32, z: i32) -> BlockPos {
    BlockPos::new(x, y, z)
}

/// Точка на полу (ноги ровно на поверхности)
pub fn on_floor(x: f64, z: f64) -> DVec3 {
    DVec3::new(x, FLOOR_Y as f64 + 1.0, z)
}
