// ============================================
// Block Catalog - Data-Driven из JSON
// ============================================
// Read-only справочник метаданных блоков для резолвера

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::FootfallError;

use super::definition::{BlockDefinition, BlocksFile};
use super::types::{BlockType, SoundType, AIR};

/// Каталог блоков
pub struct BlockCatalog {
    /// Блоки по numeric ID
    blocks_by_numeric: HashMap<BlockType, BlockDefinition>,
    /// Маппинг string ID -> numeric ID
    id_to_numeric: HashMap<String, BlockType>,
}

impl BlockCatalog {
    /// Пустой каталог, в котором зарегистрирован только воздух
    pub fn new() -> Self {
        let mut catalog = Self {
            blocks_by_numeric: HashMap::new(),
            id_to_numeric: HashMap::new(),
        };
        catalog.register(BlockDefinition {
            id: "air".to_string(),
            numeric_id: AIR,
            name: "Air".to_string(),
            air: true,
            ..Default::default()
        });
        catalog
    }

    /// Загрузить блоки из JSON строки
    pub fn load_from_json(&mut self, json: &str) -> Result<usize, FootfallError> {
        let blocks_file: BlocksFile = serde_json::from_str(json)?;

        let count = blocks_file.blocks.len();
        for block in blocks_file.blocks {
            self.register(block);
        }
        Ok(count)
    }

    /// Загрузить блоки из файла
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, FootfallError> {
        let content = fs::read_to_string(path.as_ref())?;
        self.load_from_json(&content)
    }

    /// Зарегистрировать блок
    pub fn register(&mut self, block: BlockDefinition) {
        if let Some(previous) = self.blocks_by_numeric.get(&block.numeric_id) {
            if previous.id != block.id {
                log::warn!(
                    "Block {} replaces {} at numeric id {}",
                    block.id, previous.id, block.numeric_id
                );
                self.id_to_numeric.remove(&previous.id);
            }
        }
        self.id_to_numeric.insert(block.id.clone(), block.numeric_id);
        self.blocks_by_numeric.insert(block.numeric_id, block);
    }

    /// Быстрая регистрация обычного блока со звуком
    pub fn register_simple(&mut self, numeric_id: BlockType, id: &str, sound: SoundType) {
        self.register(BlockDefinition {
            id: id.to_string(),
            numeric_id,
            name: id.to_string(),
            sound: Some(sound),
            ..Default::default()
        });
    }

    pub fn get(&self, block: BlockType) -> Option<&BlockDefinition> {
        self.blocks_by_numeric.get(&block)
    }

    /// Получить numeric ID по string ID
    pub fn numeric_id(&self, id: &str) -> Option<BlockType> {
        self.id_to_numeric.get(id).copied()
    }

    /// Количество блоков
    pub fn count(&self) -> usize {
        self.blocks_by_numeric.len()
    }
}

impl Default for BlockCatalog {
    fn default() -> Self { Self::new() }
}
