// ============================================
// Sound Emitter - Шов между акустикой и плеером
// ============================================

use ultraviolet::DVec3;

use super::definition::DelayWindow;

/// Идентификатор сущности хоста
pub type EntityId = u64;

/// Откуда звучит звук
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundSource {
    pub entity: EntityId,
    pub position: DVec3,
}

impl SoundSource {
    pub fn new(entity: EntityId, position: DVec3) -> Self {
        Self { entity, position }
    }
}

/// Входные опции воспроизведения акустики
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AcousticOptions {
    /// 0..1 - громкость берётся из диапазона акустики по этому коэффициенту
    pub gliding_volume: Option<f32>,
}

/// Приёмник звуков, который реализует SoundPlayer
pub trait SoundEmitter {
    /// Сыграть (или отложить, если есть окно задержки)
    fn emit(&mut self, source: &SoundSource, sound: &str, volume: f32, pitch: f32, delay: Option<DelayWindow>);

    /// Равномерное число в [0, 1)
    fn roll(&mut self) -> f32;
}
