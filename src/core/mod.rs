// ============================================
// Core Module - Конфигурация, ошибки, контекст
// ============================================

mod config;
mod context;
mod error;

pub use config::FootstepConfig;
pub use context::WorldContext;
pub use error::{FootfallError, PlaybackError};
