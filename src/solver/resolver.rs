// ============================================
// Acoustic Resolver - Послойный поиск акустики
// ============================================
// Порядок слоёв для точки удара стопы:
//   1. ковёр (блок сверху, субстрат carpet) - перехватывает всё
//   2. забор (блок снизу, если точка - воздух)
//   3. сам блок, затем примитив по родному звуку
//   4. листва сверху дописывается после базовых акустик
// NOT_EMITTER на любом шаге - тишина, даже без родного звука.

use std::sync::Arc;

use ultraviolet::DVec3;

use crate::acoustics::{Association, BlockAcoustics, Substrate};
use crate::blocks::{BlockPos, BlockState};
use crate::core::WorldContext;
use crate::generator::MotionSample;

/// Резолвер ассоциаций; живёт один тик
pub struct Resolver<'a> {
    ctx: WorldContext<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(ctx: WorldContext<'a>) -> Self {
        Self { ctx }
    }

    /// Ассоциация для блока или None, если блок не должен звучать
    pub fn find_association_for_block(&self, pos: BlockPos) -> Option<Association> {
        Some(self.resolve_block(pos)).filter(|a| !a.is_not_emitter())
    }

    /// Полное разрешение блока; NOT_EMITTER возвращается как not_emitter ассоциация
    pub fn resolve_block(&self, pos: BlockPos) -> Association {
        let world = self.ctx.world;
        let registry = self.ctx.registry;

        let mut state = world.block_state(pos);
        let mut target = pos;

        let above_pos = pos.up();
        let above = world.block_state(above_pos);
        let carpet = if world.is_air(above) {
            None
        } else {
            registry.lookup(above, Some(Substrate::Carpet))
        };

        let acoustics = match carpet {
            Some(BlockAcoustics::Emitter(list)) => {
                // Ковёр перехватывает: ни блок под ним, ни листва не смотрятся
                state = above;
                target = above_pos;
                Some(BlockAcoustics::Emitter(list.clone()))
            }
            // NOT_EMITTER ковёр не блокирует поиск дальше
            _ => {
                let mut base = None;
                if world.is_air(state) {
                    let below_pos = pos.down();
                    let below = world.block_state(below_pos);
                    if let Some(fence) = registry.lookup(below, Some(Substrate::Fence)) {
                        state = below;
                        target = below_pos;
                        base = Some(fence.clone());
                    }
                }
                let base = base
                    .or_else(|| registry.lookup(state, None).cloned())
                    .or_else(|| self.resolve_primitive(state));

                match base {
                    Some(BlockAcoustics::Emitter(mut list)) => {
                        // Листва над NOT_EMITTER блоком не звучит, поэтому только здесь
                        let foliage_state = world.block_state(target.up());
                        if let Some(BlockAcoustics::Emitter(foliage)) =
                            registry.lookup(foliage_state, Some(Substrate::Foliage))
                        {
                            list.extend(foliage.iter().map(Arc::clone));
                        }
                        Some(BlockAcoustics::Emitter(list))
                    }
                    other => other,
                }
            }
        };

        match acoustics {
            Some(BlockAcoustics::NotEmitter) => Association::not_emitter(Some(state), Some(target)),
            Some(BlockAcoustics::Emitter(list)) => self.block_association(state, target).with_acoustics(list),
            None => self.block_association(state, target),
        }
    }

    fn block_association(&self, state: BlockState, pos: BlockPos) -> Association {
        let world = self.ctx.world;
        Association::for_block(state, pos)
            .with_liquid(world.is_liquid(state))
            .with_sound_type(world.sound_type(state))
    }

    /// Примитив по родному звуку: "volume_pitch" -> "break_<name>" -> голое имя
    fn resolve_primitive(&self, state: BlockState) -> Option<BlockAcoustics> {
        let world = self.ctx.world;
        if world.is_air(state) {
            return Some(BlockAcoustics::NotEmitter);
        }
        let sound = match world.sound_type(state) {
            Some(sound) => sound,
            None => return Some(BlockAcoustics::NotEmitter),
        };

        let primitives = self.ctx.registry.primitives();
        let volume_pitch = sound.volume_pitch_key();
        let break_key = format!("break_{}", sound.name);
        primitives
            .lookup(&sound.step_sound, Some(&volume_pitch))
            .or_else(|| primitives.lookup(&sound.step_sound, Some(&break_key)))
            .or_else(|| primitives.lookup(&sound.step_sound, None))
            .cloned()
    }

    /// Поиск с учётом края блока.
    ///
    /// `point` - горизонтальная точка удара (стопа), `pos` - блок под ней.
    /// Если блок не звучит, а точка у края клетки дальше порога, пробуем
    /// соседа по доминирующей оси, затем по ортогональной.
    /// None - чанк не загружен.
    pub fn find_association_for_location(&self, point: DVec3, pos: BlockPos) -> Option<Association> {
        if !self.ctx.world.is_loaded(pos) {
            return None;
        }
        let worked = self.resolve_block(pos);
        if !worked.is_not_emitter() {
            return Some(worked);
        }

        // Позиция внутри клетки: -1..1 по каждой оси
        let xdang = (point.x - pos.x as f64) * 2.0 - 1.0;
        let zdang = (point.z - pos.z as f64) * 2.0 - 1.0;
        let threshold = self.ctx.config.distance_to_center as f64;
        if xdang.abs().max(zdang.abs()) <= threshold {
            return Some(worked);
        }

        let x_neighbor = if xdang > 0.0 { pos.east() } else { pos.west() };
        let z_neighbor = if zdang > 0.0 { pos.south() } else { pos.north() };
        let candidates = if xdang.abs() > zdang.abs() {
            [x_neighbor, z_neighbor]
        } else {
            [z_neighbor, x_neighbor]
        };

        for candidate in candidates {
            if !self.ctx.world.is_loaded(candidate) {
                continue;
            }
            let neighbor = self.resolve_block(candidate);
            if !neighbor.is_not_emitter() {
                return Some(neighbor);
            }
        }
        Some(worked)
    }

    /// Ассоциация под левой/правой стопой, с наложением брони.
    /// None - ничего не играть.
    pub fn find_association_for_foot(
        &self,
        sample: &MotionSample,
        vertical_offset: f64,
        right_foot: bool,
    ) -> Option<Association> {
        let foot = foot_position(sample, self.ctx.config.distance_to_center, right_foot);
        let yy = (sample.position.y - 0.1 - vertical_offset).floor() as i32;
        let pos = BlockPos::new(foot.x.floor() as i32, yy, foot.z.floor() as i32);

        let print = DVec3::new(foot.x, yy as f64 + 1.0, foot.z);
        let found = self
            .find_association_for_location(foot, pos)
            .map(|assoc| assoc.at_foot(print));

        self.apply_overlays(found, sample)
            .filter(|assoc| assoc.is_playable())
    }

    /// Заросли ("messy" субстрат) в блоке над pos
    pub fn find_messy_foliage(&self, pos: BlockPos) -> Option<Association> {
        let world = self.ctx.world;
        let up = pos.up();
        let above = world.block_state(up);
        if world.is_air(above) {
            return None;
        }
        match self.ctx.registry.lookup(above, Some(Substrate::Messy)) {
            Some(BlockAcoustics::Emitter(list)) if !list.is_empty() => {
                Some(Association::for_block(above, up).with_acoustics(list.iter().map(Arc::clone)))
            }
            _ => None,
        }
    }

    /// Броня и обувь поверх результата.
    ///
    /// Никогда не заменяет и не действует на NOT_EMITTER. Если ассоциации
    /// не было вовсе, создаёт пустую синтетическую.
    pub fn apply_overlays(&self, assoc: Option<Association>, sample: &MotionSample) -> Option<Association> {
        if assoc.as_ref().map_or(false, Association::is_not_emitter) {
            return assoc;
        }
        let config = self.ctx.config;
        let registry = self.ctx.registry;

        let armor = sample
            .armor
            .filter(|_| config.armor_sounds)
            .and_then(|class| registry.armor_acoustic(class));
        let foot = sample
            .foot_armor
            .filter(|_| config.foot_armor_sounds)
            .and_then(|class| registry.foot_armor_acoustic(class));

        if armor.is_none() && foot.is_none() {
            return assoc;
        }

        let mut result = assoc.unwrap_or_else(Association::synthetic);
        if let Some(armor) = armor {
            result = result.with_overlay(Arc::clone(armor));
        }
        if let Some(foot) = foot {
            let duplicate = armor.map_or(false, |armor| Arc::ptr_eq(armor, foot));
            if !duplicate {
                result = result.with_overlay(Arc::clone(foot));
            }
        }
        Some(result)
    }
}

/// Мировая позиция стопы: смещение вбок от центра по yaw (правая - минус)
pub fn foot_position(sample: &MotionSample, distance_to_center: f32, right_foot: bool) -> DVec3 {
    let rot = (sample.yaw as f64).to_radians();
    let offset = if right_foot {
        -(distance_to_center as f64)
    } else {
        distance_to_center as f64
    };
    DVec3::new(
        sample.position.x + rot.cos() * offset,
        sample.position.y,
        sample.position.z + rot.sin() * offset,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::acoustics::{AcousticDef, ArmorClass, RegistryBuilder};
    use crate::blocks::{BlockCatalog, BlockType, SoundType, VoxelWorld};
    use crate::core::FootstepConfig;
    use crate::testing::*;

    fn with_resolver<R>(world: &VoxelWorld, f: impl FnOnce(&Resolver<'_>) -> R) -> R {
        let registry = registry();
        let config = config();
        let ctx = WorldContext::new(world, &registry, &config, 0);
        f(&Resolver::new(ctx))
    }

    #[test]
    fn test_stone_resolves_through_primitive() {
        let world = stone_floor();
        let assoc = with_resolver(&world, |r| r.find_association_for_block(at(0, FLOOR_Y, 0))).unwrap();
        assert_eq!(assoc.acoustic_names(), ["stone_step"]);
        assert_eq!(assoc.pos(), Some(at(0, FLOOR_Y, 0)));
        assert_eq!(assoc.sound_type().unwrap().name, "stone");
    }

    #[test]
    fn test_carpet_takes_over_base_block() {
        let mut world = world();
        world.set_block(at(0, FLOOR_Y, 0), BlockState::new(GRASS));
        world.set_block(at(0, FLOOR_Y + 1, 0), BlockState::new(CARPET));

        let assoc = with_resolver(&world, |r| r.find_association_for_block(at(0, FLOOR_Y, 0))).unwrap();
        assert_eq!(assoc.acoustic_names(), ["carpet"]);
        assert_eq!(assoc.pos(), Some(at(0, FLOOR_Y + 1, 0)));
        assert_eq!(assoc.state(), Some(BlockState::new(CARPET)));
    }

    #[test]
    fn test_not_emitter_carpet_falls_through() {
        let mut world = world();
        world.set_block(at(0, FLOOR_Y, 0), BlockState::new(GRASS));
        world.set_block(at(0, FLOOR_Y + 1, 0), BlockState::new(MUTED_CARPET));

        let assoc = with_resolver(&world, |r| r.find_association_for_block(at(0, FLOOR_Y, 0))).unwrap();
        assert_eq!(assoc.acoustic_names(), ["grass"]);
        assert_eq!(assoc.pos(), Some(at(0, FLOOR_Y, 0)));
    }

    #[test]
    fn test_fence_below_air_shifts_down() {
        let mut world = world();
        world.set_block(at(0, FLOOR_Y - 1, 0), BlockState::new(FENCE));

        let assoc = with_resolver(&world, |r| r.find_association_for_block(at(0, FLOOR_Y, 0))).unwrap();
        assert_eq!(assoc.acoustic_names(), ["fence"]);
        assert_eq!(assoc.pos(), Some(at(0, FLOOR_Y - 1, 0)));
    }

    #[test]
    fn test_foliage_is_layered_after_base() {
        let mut world = world();
        world.set_block(at(0, FLOOR_Y, 0), BlockState::new(GRASS));
        world.set_block(at(0, FLOOR_Y + 1, 0), BlockState::new(TALL_GRASS));

        let assoc = with_resolver(&world, |r| r.find_association_for_block(at(0, FLOOR_Y, 0))).unwrap();
        assert_eq!(assoc.acoustic_names(), ["grass", "brush"]);
    }

    #[test]
    fn test_not_emitter_block_silences_foliage_and_armor() {
        let mut world = world();
        world.set_block(at(0, FLOOR_Y, 0), BlockState::new(SILENT));
        world.set_block(at(0, FLOOR_Y + 1, 0), BlockState::new(TALL_GRASS));

        with_resolver(&world, |r| {
            assert!(r.find_association_for_block(at(0, FLOOR_Y, 0)).is_none());

            let resolved = r.resolve_block(at(0, FLOOR_Y, 0));
            assert!(resolved.is_not_emitter());
            assert!(resolved.acoustics().is_empty());

            let mut sample = MotionSample::standing(on_floor(0.5, 0.5));
            sample.armor = Some(ArmorClass::Heavy);
            let overlaid = r.apply_overlays(Some(resolved), &sample).unwrap();
            assert!(overlaid.is_not_emitter());
            assert!(overlaid.overlays().is_empty());

            assert!(r.find_association_for_foot(&sample, 0.0, false).is_none());
        });
    }

    #[test]
    fn test_unmapped_block_falls_back_to_native_sound() {
        let mut world = world();
        world.set_block(at(0, FLOOR_Y, 0), BlockState::new(WOOD));

        let assoc = with_resolver(&world, |r| r.find_association_for_block(at(0, FLOOR_Y, 0))).unwrap();
        assert!(assoc.is_native_fallback());
        assert_eq!(assoc.state(), Some(BlockState::new(WOOD)));
    }

    #[test]
    fn test_air_never_emits() {
        let world = world();
        let found = with_resolver(&world, |r| r.find_association_for_block(at(0, FLOOR_Y, 0)));
        assert!(found.is_none());
    }

    #[test]
    fn test_primitive_fallback_order() {
        const GRAVEL: BlockType = 20;
        const SAND: BlockType = 21;
        let mut catalog = BlockCatalog::new();
        catalog.register_simple(GRAVEL, "gravel", SoundType::vanilla("gravel", 1.0, 1.0));
        catalog.register_simple(SAND, "sand", SoundType::vanilla("sand", 0.5, 0.8));
        let mut world = VoxelWorld::new(catalog);
        world.set_block(at(0, 0, 0), BlockState::new(GRAVEL));
        world.set_block(at(5, 0, 0), BlockState::new(SAND));

        let mut builder = RegistryBuilder::new();
        builder
            .acoustic("gravel_break", AcousticDef::basic("break.gravel"))
            .acoustic("gravel_bare", AcousticDef::basic("bare.gravel"))
            .acoustic("sand_bare", AcousticDef::basic("bare.sand"))
            .primitive("block.gravel.step", Some("break_gravel"), &["gravel_break"])
            .primitive("block.gravel.step", None, &["gravel_bare"])
            .primitive("block.sand.step", None, &["sand_bare"]);
        let registry = builder.build().unwrap();
        let config = FootstepConfig::default();
        let resolver = Resolver::new(WorldContext::new(&world, &registry, &config, 0));

        let gravel = resolver.find_association_for_block(at(0, 0, 0)).unwrap();
        assert_eq!(gravel.acoustic_names(), ["gravel_break"]);
        let sand = resolver.find_association_for_block(at(5, 0, 0)).unwrap();
        assert_eq!(sand.acoustic_names(), ["sand_bare"]);
    }

    #[test]
    fn test_not_emitter_primitive_suppresses() {
        let mut world = world();
        world.set_block(at(0, 0, 0), BlockState::new(WOOD));
        let mut builder = registry_builder();
        builder.primitive("block.wood.step", None, &[crate::acoustics::NOT_EMITTER]);
        let registry = builder.build().unwrap();
        let config = config();
        let resolver = Resolver::new(WorldContext::new(&world, &registry, &config, 0));

        assert!(resolver.find_association_for_block(at(0, 0, 0)).is_none());
    }

    #[test]
    fn test_not_emitter_primitive_silences_foliage_and_armor() {
        let mut world = world();
        world.set_block(at(0, FLOOR_Y, 0), BlockState::new(WOOD));
        world.set_block(at(0, FLOOR_Y + 1, 0), BlockState::new(TALL_GRASS));
        let mut builder = registry_builder();
        builder.primitive("block.wood.step", None, &[crate::acoustics::NOT_EMITTER]);
        let registry = builder.build().unwrap();
        let config = config();
        let resolver = Resolver::new(WorldContext::new(&world, &registry, &config, 0));

        let resolved = resolver.resolve_block(at(0, FLOOR_Y, 0));
        assert!(resolved.is_not_emitter());
        assert!(resolved.acoustics().is_empty());

        let mut sample = MotionSample::standing(on_floor(0.5, 0.5));
        sample.armor = Some(ArmorClass::Heavy);
        sample.foot_armor = Some(ArmorClass::Medium);
        assert!(resolver.find_association_for_foot(&sample, 0.0, false).is_none());
        assert!(resolver.find_association_for_foot(&sample, 0.0, true).is_none());
    }

    #[test]
    fn test_not_emitter_fence_suppresses() {
        let mut world = world();
        world.set_block(at(0, FLOOR_Y - 1, 0), BlockState::new(FENCE));
        let mut builder = RegistryBuilder::new();
        builder
            .acoustic("fence_top", AcousticDef::basic("step.fence"))
            .block(FENCE, None, None, &["fence_top"])
            .block(FENCE, None, Some(Substrate::Fence), &[crate::acoustics::NOT_EMITTER]);
        let registry = builder.build().unwrap();
        let config = config();
        let resolver = Resolver::new(WorldContext::new(&world, &registry, &config, 0));

        // Забор-NOT_EMITTER глушит точку, обычная запись забора не подхватывается
        assert!(resolver.find_association_for_block(at(0, FLOOR_Y, 0)).is_none());
        let resolved = resolver.resolve_block(at(0, FLOOR_Y, 0));
        assert!(resolved.is_not_emitter());
        assert_eq!(resolved.pos(), Some(at(0, FLOOR_Y - 1, 0)));
    }

    #[test]
    fn test_edge_retries_dominant_axis_first() {
        // xdang = 0.9, zdang = 0.1 внутри клетки (0, 63, 0)
        let point = DVec3::new(0.95, FLOOR_Y as f64 + 1.0, 0.55);
        let mut world = world();
        world.set_block(at(1, FLOOR_Y, 0), BlockState::new(GRASS));
        world.set_block(at(0, FLOOR_Y, 1), BlockState::new(STONE));

        let assoc = with_resolver(&world, |r| r.find_association_for_location(point, at(0, FLOOR_Y, 0))).unwrap();
        assert_eq!(assoc.pos(), Some(at(1, FLOOR_Y, 0)));
    }

    #[test]
    fn test_edge_retries_orthogonal_axis_second() {
        let point = DVec3::new(0.95, FLOOR_Y as f64 + 1.0, 0.55);
        let mut world = world();
        world.set_block(at(0, FLOOR_Y, 1), BlockState::new(STONE));

        let assoc = with_resolver(&world, |r| r.find_association_for_location(point, at(0, FLOOR_Y, 0))).unwrap();
        assert_eq!(assoc.pos(), Some(at(0, FLOOR_Y, 1)));
        assert_eq!(assoc.acoustic_names(), ["stone_step"]);
    }

    #[test]
    fn test_edge_negative_direction() {
        // xdang = -0.1, zdang = -0.8 -> сначала север (-Z)
        let point = DVec3::new(0.45, FLOOR_Y as f64 + 1.0, 0.1);
        let mut world = world();
        world.set_block(at(0, FLOOR_Y, -1), BlockState::new(GRASS));
        world.set_block(at(-1, FLOOR_Y, 0), BlockState::new(STONE));

        let assoc = with_resolver(&world, |r| r.find_association_for_location(point, at(0, FLOOR_Y, 0))).unwrap();
        assert_eq!(assoc.pos(), Some(at(0, FLOOR_Y, -1)));
    }

    #[test]
    fn test_near_center_does_not_retry() {
        let point = DVec3::new(0.55, FLOOR_Y as f64 + 1.0, 0.5);
        let mut world = world();
        world.set_block(at(1, FLOOR_Y, 0), BlockState::new(GRASS));

        let assoc = with_resolver(&world, |r| r.find_association_for_location(point, at(0, FLOOR_Y, 0))).unwrap();
        assert!(assoc.is_not_emitter());
    }

    #[test]
    fn test_foot_position_follows_yaw() {
        let mut sample = MotionSample::standing(DVec3::new(10.0, 64.0, 10.0));
        let left = foot_position(&sample, 0.2, false);
        let right = foot_position(&sample, 0.2, true);
        assert_relative_eq!(left.x, 10.2, epsilon = 1e-6);
        assert_relative_eq!(right.x, 9.8, epsilon = 1e-6);
        assert_relative_eq!(left.z, 10.0, epsilon = 1e-6);

        sample.yaw = 90.0;
        let left = foot_position(&sample, 0.2, false);
        assert_relative_eq!(left.x, 10.0, epsilon = 1e-6);
        assert_relative_eq!(left.z, 10.2, epsilon = 1e-6);
    }

    #[test]
    fn test_foot_lookup_uses_block_below_feet() {
        let world = stone_floor();
        let sample = MotionSample::standing(on_floor(0.5, 0.5));
        let assoc = with_resolver(&world, |r| r.find_association_for_foot(&sample, 0.0, true)).unwrap();
        assert_eq!(assoc.pos(), Some(at(0, FLOOR_Y, 0)));
        let foot = assoc.foot().unwrap();
        assert_relative_eq!(foot.x, 0.3, epsilon = 1e-6);
        assert_relative_eq!(foot.y, FLOOR_Y as f64 + 1.0);
    }

    #[test]
    fn test_armor_overlay_deduplicates_identical_acoustic() {
        let world = stone_floor();
        let mut sample = MotionSample::standing(on_floor(0.5, 0.5));
        sample.armor = Some(ArmorClass::Heavy);
        sample.foot_armor = Some(ArmorClass::Heavy);

        let assoc = with_resolver(&world, |r| r.find_association_for_foot(&sample, 0.0, false)).unwrap();
        assert_eq!(assoc.acoustic_names(), ["stone_step"]);
        assert_eq!(assoc.overlay_names(), ["plate"]);

        sample.foot_armor = Some(ArmorClass::Medium);
        let assoc = with_resolver(&world, |r| r.find_association_for_foot(&sample, 0.0, false)).unwrap();
        assert_eq!(assoc.overlay_names(), ["plate", "chain"]);
    }

    #[test]
    fn test_armor_over_unloaded_chunk_is_synthetic() {
        let mut world = stone_floor();
        world.set_min_loaded_y(100);
        let mut sample = MotionSample::standing(on_floor(0.5, 0.5));

        with_resolver(&world, |r| {
            assert!(r.find_association_for_foot(&sample, 0.0, false).is_none());

            sample.foot_armor = Some(ArmorClass::Medium);
            let assoc = r.find_association_for_foot(&sample, 0.0, false).unwrap();
            assert!(assoc.state().is_none());
            assert_eq!(assoc.overlay_names(), ["chain"]);
        });
    }

    #[test]
    fn test_messy_foliage_lookup() {
        let mut world = stone_floor();
        world.set_block(at(0, FLOOR_Y + 1, 0), BlockState::new(TALL_GRASS));

        with_resolver(&world, |r| {
            let messy = r.find_messy_foliage(at(0, FLOOR_Y, 0)).unwrap();
            assert_eq!(messy.acoustic_names(), ["brush"]);
            assert_eq!(messy.pos(), Some(at(0, FLOOR_Y + 1, 0)));
            assert!(r.find_messy_foliage(at(3, FLOOR_Y, 3)).is_none());
        });
    }
}
