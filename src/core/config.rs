// ============================================
// Footstep Config - Параметры генератора шагов
// ============================================

use serde::{Deserialize, Serialize};

use super::error::FootfallError;

/// Параметры генератора, резолвера и планировщика
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FootstepConfig {
    /// Длина шага по ровной поверхности
    pub stride: f32,
    /// Длина шага на лестнице (подъём)
    pub stride_stair: f32,
    /// Длина шага по приставной лестнице
    pub stride_ladder: f32,
    /// Квадрат горизонтальной скорости, выше которого - бег
    pub speed_to_run: f64,
    /// Квадрат скорости, ниже которого прыжок считается прыжком с места
    pub speed_to_jump_as_multifoot: f64,
    /// Высота падения для "жёсткого" приземления на обе ноги
    pub land_hard_distance_min: f32,
    /// Сколько мс нужно стоять, чтобы возобновление шло без шага (мс)
    pub immobile_duration: u64,
    /// Смещение стопы от центра / порог края блока
    pub distance_to_center: f32,
    pub event_on_jump: bool,
    pub play_wander: bool,
    /// Период проверки зарослей (мс)
    pub brush_interval: u64,
    /// Скачок позиции за тик, который считается телепортом
    pub teleport_distance: f64,
    /// Задержка меньше этой играет сразу (мс)
    pub min_delay: u64,
    /// Окно опоздания = delay_max / lateness_divider
    pub lateness_divider: f32,
    /// Ёмкость очереди отложенных звуков
    pub max_pending: usize,
    pub global_volume: f32,
    pub armor_sounds: bool,
    pub foot_armor_sounds: bool,
    /// Имя акустики плавания
    pub swim_acoustic: String,
    /// Сид RNG (None = из энтропии)
    pub rng_seed: Option<u64>,
}

impl Default for FootstepConfig {
    fn default() -> Self {
        Self {
            stride: 0.75,
            stride_stair: 0.75 * 0.65,
            stride_ladder: 0.5,
            speed_to_run: 0.022,
            speed_to_jump_as_multifoot: 0.005,
            land_hard_distance_min: 0.9,
            immobile_duration: 200,
            distance_to_center: 0.2,
            event_on_jump: true,
            play_wander: true,
            brush_interval: 100,
            teleport_distance: 8.0,
            min_delay: 5,
            lateness_divider: 1.5,
            max_pending: 256,
            global_volume: 1.0,
            armor_sounds: true,
            foot_armor_sounds: true,
            swim_acoustic: "_SWIM".to_string(),
            rng_seed: None,
        }
    }
}

impl FootstepConfig {
    /// Загрузить из JSON строки (отсутствующие поля - по умолчанию)
    pub fn from_json(json: &str) -> Result<Self, FootfallError> {
        let config: FootstepConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FootfallError> {
        for (name, value) in [
            ("stride", self.stride),
            ("stride_stair", self.stride_stair),
            ("stride_ladder", self.stride_ladder),
            ("lateness_divider", self.lateness_divider),
        ] {
            if !(value > 0.0) {
                return Err(FootfallError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(0.0..1.0).contains(&self.distance_to_center) {
            return Err(FootfallError::InvalidConfig(format!(
                "distance_to_center must be in [0, 1), got {}",
                self.distance_to_center
            )));
        }
        if self.max_pending == 0 {
            return Err(FootfallError::InvalidConfig("max_pending must be at least 1".into()));
        }
        Ok(())
    }
}
