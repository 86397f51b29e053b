// ============================================
// Блоки и мир для звуковой подсистемы
// ============================================
// Data-Driven Architecture: метаданные блоков загружаются из JSON

mod types;
mod definition;
mod catalog;
mod world;

pub use types::*;
pub use definition::*;
pub use catalog::*;
pub use world::*;
