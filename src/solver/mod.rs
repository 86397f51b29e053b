// ============================================
// Solver Module - Разрешение акустики в мире
// ============================================

mod resolver;

pub use resolver::{foot_position, Resolver};
