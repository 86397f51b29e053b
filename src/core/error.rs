// ============================================
// Errors - Ошибки загрузки и конфигурации
// ============================================
// В тиковом пути ошибок нет: промах резолвера и подавление - это значения,
// сбои воспроизведения логируются на границе SoundPlayer.

use thiserror::Error;

/// Ошибки построения реестров и конфигурации
#[derive(Debug, Error)]
pub enum FootfallError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Ссылка на акустику, которой нет в реестре
    #[error("Unknown acoustic '{name}' referenced by {context}")]
    UnknownAcoustic { name: String, context: String },

    /// Акустика ссылается сама на себя (напрямую или через цепочку)
    #[error("Acoustic '{0}' is part of a reference cycle")]
    CyclicAcoustic(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Сбой аудио-движка при воспроизведении
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Sound '{0}' is not loaded")]
    UnknownSound(String),

    #[error("Audio backend error: {0}")]
    Backend(String),
}
