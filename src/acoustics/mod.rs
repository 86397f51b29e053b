// ============================================
// Acoustics Module - Data-Driven звуковые определения
// ============================================
// Реестр акустики блоков, примитивы, брони и разрешённые ассоциации

mod association;
mod definition;
mod emitter;
mod event;
mod registry;

pub use association::*;
pub use definition::*;
pub use emitter::*;
pub use event::*;
pub use registry::*;
