// ============================================
// Pending Sound - Отложенный звук
// ============================================

use ultraviolet::DVec3;

use crate::acoustics::EntityId;

/// Звук, который должен прозвучать позже
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSound {
    pub entity: EntityId,
    pub sound: String,
    pub volume: f32,
    pub pitch: f32,
    /// Позиция на момент планирования
    pub position: DVec3,
    /// Абсолютное время воспроизведения (мс)
    pub play_at_ms: u64,
    /// Сколько можно опоздать (мс)
    pub lateness_ms: u64,
}

impl PendingSound {
    #[inline]
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.play_at_ms
    }

    /// Опоздание больше окна: звук уже вне контекста
    #[inline]
    pub fn is_late(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.play_at_ms) > self.lateness_ms
    }
}
