// ============================================
// Footstep System - Фасад для хоста
// ============================================
// Генератор на каждую сущность, общий плеер и снимок реестра.
// Реестр подменяется целиком между тиками через swap_registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::acoustics::{AcousticRegistry, EntityId};
use crate::audio::{PlaybackSink, SoundPlayer};
use crate::blocks::WorldQuery;
use crate::core::{FootfallError, FootstepConfig, WorldContext};
use crate::generator::{GaitProfile, Generator, MotionSample};

pub struct FootstepSystem<S: PlaybackSink> {
    registry: Arc<AcousticRegistry>,
    config: FootstepConfig,
    generators: HashMap<EntityId, Generator>,
    player: SoundPlayer<S>,
}

impl<S: PlaybackSink> FootstepSystem<S> {
    pub fn new(registry: Arc<AcousticRegistry>, config: FootstepConfig, sink: S) -> Result<Self, FootfallError> {
        config.validate()?;
        let player = SoundPlayer::new(sink, &config);
        log::info!(
            "[FOOTSTEPS] Система шагов готова: {} записей блоков, {} примитивов",
            registry.block_entries(),
            registry.primitives().len()
        );
        Ok(Self {
            registry,
            config,
            generators: HashMap::new(),
            player,
        })
    }

    /// Начать отслеживать сущность с заданной походкой (сбрасывает состояние)
    pub fn track(&mut self, entity: EntityId, profile: GaitProfile) {
        self.generators.insert(entity, Generator::new(entity, profile, &self.config));
    }

    /// Сущность выгружена: состояние и её отложенные звуки удаляются
    pub fn untrack(&mut self, entity: EntityId) -> bool {
        self.player.forget_entity(entity);
        self.generators.remove(&entity).is_some()
    }

    pub fn is_tracked(&self, entity: EntityId) -> bool {
        self.generators.contains_key(&entity)
    }

    pub fn tracked_len(&self) -> usize {
        self.generators.len()
    }

    pub fn generator(&self, entity: EntityId) -> Option<&Generator> {
        self.generators.get(&entity)
    }

    /// Тик одной сущности. Неизвестная сущность начинает отслеживаться двуногой.
    pub fn tick_entity(&mut self, entity: EntityId, sample: &MotionSample, world: &dyn WorldQuery, now_ms: u64) {
        let config = &self.config;
        let generator = self
            .generators
            .entry(entity)
            .or_insert_with(|| Generator::new(entity, GaitProfile::Biped, config));

        let ctx = WorldContext::new(world, &self.registry, &self.config, now_ms);
        generator.generate_footsteps(sample, &ctx, &mut self.player);
    }

    /// Раз в тик после всех сущностей
    pub fn think(&mut self, now_ms: u64) -> usize {
        self.player.think(now_ms)
    }

    /// Подменить реестр целиком
    pub fn swap_registry(&mut self, registry: Arc<AcousticRegistry>) {
        log::info!("[FOOTSTEPS] Реестр акустики заменён ({} записей блоков)", registry.block_entries());
        self.registry = registry;
    }

    pub fn registry(&self) -> &Arc<AcousticRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &FootstepConfig {
        &self.config
    }

    /// Новая конфигурация; состояние генераторов сохраняется
    pub fn set_config(&mut self, config: FootstepConfig) -> Result<(), FootfallError> {
        config.validate()?;
        self.player.configure(&config);
        self.config = config;
        Ok(())
    }

    pub fn pending_len(&self) -> usize {
        self.player.pending_len()
    }

    pub fn player(&self) -> &SoundPlayer<S> {
        &self.player
    }

    pub fn sink(&self) -> &S {
        self.player.sink()
    }

    pub fn sink_mut(&mut self) -> &mut S {
        self.player.sink_mut()
    }
}
