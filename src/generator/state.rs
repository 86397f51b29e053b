// ============================================
// Step State - Состояние генератора между тиками
// ============================================

use ultraviolet::DVec3;

use crate::blocks::BlockPos;

/// Изменяемое состояние шагов одной сущности
#[derive(Debug, Clone, PartialEq)]
pub struct StepState {
    /// Собственный счётчик пройденного расстояния (x0.6)
    pub distance_walked: f64,
    /// Значение счётчика на последнем шаге
    pub dmw_base: f64,
    /// Счётчик в момент последней смены высоты
    pub y_change_marker: f64,
    /// Y на последнем тике на земле
    pub last_grounded_y: Option<f64>,

    pub last_reference: f64,
    pub immobile_since: u64,
    pub is_immobile: bool,

    /// Активная стопа
    pub right_foot: bool,
    pub flying: bool,
    pub fall_distance: f32,
    pub stepped_this_frame: bool,

    /// Следующая проверка зарослей (мс)
    pub brush_next_ms: u64,
    pub last_brushed: Option<BlockPos>,

    /// true - горизонтальное движение остановилось или развернулось
    pub scalar_state: bool,
    pub prev_motion: DVec3,
    pub prev_position: Option<DVec3>,
}

impl StepState {
    pub fn new() -> Self {
        Self {
            distance_walked: 0.0,
            dmw_base: 0.0,
            y_change_marker: 0.0,
            last_grounded_y: None,
            last_reference: 0.0,
            immobile_since: 0,
            is_immobile: false,
            right_foot: false,
            flying: false,
            fall_distance: 0.0,
            stepped_this_frame: false,
            brush_next_ms: 0,
            last_brushed: None,
            scalar_state: true,
            prev_motion: DVec3::zero(),
            prev_position: None,
        }
    }

    /// Отслеживание неподвижности. true - движение возобновилось после
    /// стояния дольше `immobile_duration`.
    pub fn stopped_immobile(&mut self, reference: f64, now_ms: u64, immobile_duration: u64) -> bool {
        let diff = self.last_reference - reference;
        self.last_reference = reference;

        if !self.is_immobile && diff == 0.0 {
            self.immobile_since = now_ms;
            self.is_immobile = true;
        } else if self.is_immobile && diff != 0.0 {
            self.is_immobile = false;
            return now_ms.saturating_sub(self.immobile_since) > immobile_duration;
        }
        false
    }
}

impl Default for StepState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_pause_is_not_a_transition() {
        let mut state = StepState::new();
        assert!(!state.stopped_immobile(0.0, 0, 200));
        assert!(state.is_immobile);
        assert!(!state.stopped_immobile(0.5, 150, 200));
        assert!(!state.is_immobile);
    }

    #[test]
    fn test_long_pause_reports_transition_once() {
        let mut state = StepState::new();
        state.stopped_immobile(1.0, 1000, 200);
        assert!(!state.stopped_immobile(1.0, 1100, 200));
        assert!(!state.stopped_immobile(1.0, 1200, 200));
        assert!(state.stopped_immobile(1.3, 1400, 200));
        assert!(!state.stopped_immobile(1.6, 1450, 200));
    }
}
