// ============================================
// Block Types - Координаты и состояния блоков
// ============================================
// Value-типы: копируются дёшево, без мутабельных scratch-объектов

use std::fmt;

use serde::{Deserialize, Serialize};

/// BlockType - numeric_id блока из каталога
pub type BlockType = u16;

/// Воздух всегда имеет numeric_id = 0
pub const AIR: BlockType = 0;

/// Ключ для блока в мире
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Блок, содержащий точку мира
    pub fn containing(x: f64, y: f64, z: f64) -> Self {
        Self::new(x.floor() as i32, y.floor() as i32, z.floor() as i32)
    }

    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub const fn up(self) -> Self {
        self.offset(0, 1, 0)
    }

    pub const fn down(self) -> Self {
        self.offset(0, -1, 0)
    }

    /// +X
    pub const fn east(self) -> Self {
        self.offset(1, 0, 0)
    }

    /// -X
    pub const fn west(self) -> Self {
        self.offset(-1, 0, 0)
    }

    /// +Z
    pub const fn south(self) -> Self {
        self.offset(0, 0, 1)
    }

    /// -Z
    pub const fn north(self) -> Self {
        self.offset(0, 0, -1)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Состояние блока: тип + вариант (meta)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockState {
    pub block: BlockType,
    #[serde(default)]
    pub meta: u8,
}

impl BlockState {
    pub const AIR: BlockState = BlockState { block: AIR, meta: 0 };

    pub const fn new(block: BlockType) -> Self {
        Self { block, meta: 0 }
    }

    pub const fn with_meta(block: BlockType, meta: u8) -> Self {
        Self { block, meta }
    }
}

/// Родной звуковой тип блока (то, что играет движок без акустики)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundType {
    /// Короткое имя ("stone", "grass", "snow")
    pub name: String,
    /// Звук шага ("block.stone.step")
    pub step_sound: String,
    /// Звук падения ("block.stone.fall")
    pub fall_sound: String,
    #[serde(default = "default_unit")]
    pub volume: f32,
    #[serde(default = "default_unit")]
    pub pitch: f32,
}

fn default_unit() -> f32 { 1.0 }

impl SoundType {
    /// Тип в стиле ванильных блоков: block.<name>.step / block.<name>.fall
    pub fn vanilla(name: &str, volume: f32, pitch: f32) -> Self {
        Self {
            name: name.to_string(),
            step_sound: format!("block.{}.step", name),
            fall_sound: format!("block.{}.fall", name),
            volume,
            pitch,
        }
    }

    /// Ключ субстрата для примитивов: "1.00_1.00"
    pub fn volume_pitch_key(&self) -> String {
        format!("{:.2}_{:.2}", self.volume, self.pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_floors_negative_coordinates() {
        assert_eq!(BlockPos::containing(-0.2, 64.9, 3.0), BlockPos::new(-1, 64, 3));
    }

    #[test]
    fn test_volume_pitch_key_two_decimals() {
        let wood = SoundType::vanilla("wood", 1.0, 1.0);
        assert_eq!(wood.volume_pitch_key(), "1.00_1.00");

        let snow = SoundType::vanilla("snow", 0.15, 1.0);
        assert_eq!(snow.volume_pitch_key(), "0.15_1.00");
    }
}
