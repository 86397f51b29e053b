// ============================================
// World Context - Внедряемое окружение тика
// ============================================
// Всё, что генератору и резолверу нужно от хоста, собрано здесь
// вместо глобальных синглтонов.

use crate::acoustics::AcousticRegistry;
use crate::blocks::WorldQuery;

use super::config::FootstepConfig;

/// Окружение одного тика
#[derive(Clone, Copy)]
pub struct WorldContext<'a> {
    pub world: &'a dyn WorldQuery,
    pub registry: &'a AcousticRegistry,
    pub config: &'a FootstepConfig,
    /// Время хоста в миллисекундах
    pub now_ms: u64,
}

impl<'a> WorldContext<'a> {
    pub fn new(
        world: &'a dyn WorldQuery,
        registry: &'a AcousticRegistry,
        config: &'a FootstepConfig,
        now_ms: u64,
    ) -> Self {
        Self { world, registry, config, now_ms }
    }
}
