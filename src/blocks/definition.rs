// ============================================
// Data-Driven Block Definition
// ============================================
// Метаданные блока, нужные звуковой подсистеме

use serde::{Deserialize, Serialize};

use super::types::{BlockType, SoundType};

/// Определение блока из JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockDefinition {
    /// Уникальный ID блока (string, например "minecraft:stone")
    pub id: String,

    /// Числовой ID
    pub numeric_id: BlockType,

    /// Отображаемое имя
    #[serde(default)]
    pub name: String,

    /// Родной звуковой тип (None = блок не звучит вовсе)
    #[serde(default)]
    pub sound: Option<SoundType>,

    /// Воздух (материал AIR)
    #[serde(default)]
    pub air: bool,

    /// Жидкость - шаг по ней не играет родной звук
    #[serde(default)]
    pub liquid: bool,

    /// Слой снега - подменяет звук блока под ним
    #[serde(default)]
    pub snow_layer: bool,
}

impl Default for BlockDefinition {
    fn default() -> Self {
        Self {
            id: "unknown".to_string(),
            numeric_id: 0,
            name: "Unknown".to_string(),
            sound: None,
            air: false,
            liquid: false,
            snow_layer: false,
        }
    }
}

/// Файл с определениями блоков
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlocksFile {
    /// Версия формата
    #[serde(default = "default_version")]
    pub version: String,

    /// Список блоков
    pub blocks: Vec<BlockDefinition>,
}

fn default_version() -> String { "1.0".to_string() }
