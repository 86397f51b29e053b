// ============================================
// World Query - Поверхность запросов к миру
// ============================================
// Хост-движок реализует WorldQuery; VoxelWorld - хранилище в памяти
// для тестов и трассировки.

use std::collections::HashMap;

use super::catalog::BlockCatalog;
use super::types::{BlockPos, BlockState, SoundType};

/// Синхронные запросы к миру без побочных эффектов
pub trait WorldQuery {
    fn block_state(&self, pos: BlockPos) -> BlockState;

    fn is_air(&self, state: BlockState) -> bool;

    /// Родной звуковой тип блока (None = блок беззвучен)
    fn sound_type(&self, state: BlockState) -> Option<SoundType>;

    fn is_liquid(&self, _state: BlockState) -> bool {
        false
    }

    fn is_snow_layer(&self, _state: BlockState) -> bool {
        false
    }

    /// Загружен ли чанк с этой позицией
    fn is_loaded(&self, _pos: BlockPos) -> bool {
        true
    }
}

/// Мир в памяти: поставленные блоки поверх пустоты
pub struct VoxelWorld {
    catalog: BlockCatalog,
    /// Блоки: позиция -> состояние (отсутствие = воздух)
    blocks: HashMap<BlockPos, BlockState>,
    /// Граница загруженной области по Y (ниже - "не загружено")
    min_loaded_y: i32,
}

impl VoxelWorld {
    pub fn new(catalog: BlockCatalog) -> Self {
        Self {
            catalog,
            blocks: HashMap::new(),
            min_loaded_y: i32::MIN,
        }
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    /// Установить блок (или удалить если воздух)
    pub fn set_block(&mut self, pos: BlockPos, state: BlockState) {
        if self.is_air(state) {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, state);
        }
    }

    /// Заполнить прямоугольный пол на высоте y
    pub fn fill_floor(&mut self, min: (i32, i32), max: (i32, i32), y: i32, state: BlockState) {
        for x in min.0..=max.0 {
            for z in min.1..=max.1 {
                self.set_block(BlockPos::new(x, y, z), state);
            }
        }
    }

    /// Всё ниже y считается незагруженным
    pub fn set_min_loaded_y(&mut self, y: i32) {
        self.min_loaded_y = y;
    }

    /// Количество блоков
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

impl WorldQuery for VoxelWorld {
    fn block_state(&self, pos: BlockPos) -> BlockState {
        self.blocks.get(&pos).copied().unwrap_or(BlockState::AIR)
    }

    fn is_air(&self, state: BlockState) -> bool {
        self.catalog.get(state.block).map_or(true, |def| def.air)
    }

    fn sound_type(&self, state: BlockState) -> Option<SoundType> {
        self.catalog.get(state.block).and_then(|def| def.sound.clone())
    }

    fn is_liquid(&self, state: BlockState) -> bool {
        self.catalog.get(state.block).map_or(false, |def| def.liquid)
    }

    fn is_snow_layer(&self, state: BlockState) -> bool {
        self.catalog.get(state.block).map_or(false, |def| def.snow_layer)
    }

    fn is_loaded(&self, pos: BlockPos) -> bool {
        pos.y >= self.min_loaded_y
    }
}
