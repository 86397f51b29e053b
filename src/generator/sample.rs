// ============================================
// Motion Sample - Снимок движения за тик
// ============================================

use ultraviolet::DVec3;

use crate::acoustics::ArmorClass;

/// То, что хост сообщает о сущности каждый тик
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    /// Позиция ног
    pub position: DVec3,
    /// Скорость за тик
    pub motion: DVec3,
    pub on_ground: bool,
    pub in_water: bool,
    /// Голова под водой
    pub submerged: bool,
    pub on_ladder: bool,
    pub sneaking: bool,
    pub jumping: bool,
    pub fall_distance: f32,
    /// Горизонтальный угол в градусах
    pub yaw: f32,
    /// Класс нагрудной брони
    pub armor: Option<ArmorClass>,
    /// Класс обуви
    pub foot_armor: Option<ArmorClass>,
}

impl MotionSample {
    /// Сущность стоит на земле в точке
    pub fn standing(position: DVec3) -> Self {
        Self {
            position,
            motion: DVec3::zero(),
            on_ground: true,
            in_water: false,
            submerged: false,
            on_ladder: false,
            sneaking: false,
            jumping: false,
            fall_distance: 0.0,
            yaw: 0.0,
            armor: None,
            foot_armor: None,
        }
    }

    /// Квадрат горизонтальной скорости
    #[inline]
    pub fn horizontal_speed_sq(&self) -> f64 {
        self.motion.x * self.motion.x + self.motion.z * self.motion.z
    }

    /// Полная скорость по трём осям
    #[inline]
    pub fn speed(&self) -> f64 {
        self.motion.mag()
    }

    /// Есть ли горизонтальное движение
    #[inline]
    pub fn is_moving_horizontally(&self) -> bool {
        self.motion.x != 0.0 || self.motion.z != 0.0
    }
}

impl Default for MotionSample {
    fn default() -> Self {
        Self::standing(DVec3::zero())
    }
}
