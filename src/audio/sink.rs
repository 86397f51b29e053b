// ============================================
// Playback Sink - Граница с аудио-движком
// ============================================

use ultraviolet::DVec3;

use crate::core::PlaybackError;

/// Затухание звука с расстоянием
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attenuation {
    /// Слышно одинаково везде (интерфейс)
    None,
    /// Линейное затухание до границы слышимости
    #[default]
    Linear,
}

/// Готовый к воспроизведению звук
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    pub sound: String,
    pub volume: f32,
    pub pitch: f32,
    pub position: DVec3,
    pub attenuation: Attenuation,
}

/// Приёмник звуков. Ошибка не выходит за пределы SoundPlayer.
pub trait PlaybackSink {
    fn play(&mut self, request: &SoundRequest) -> Result<(), PlaybackError>;
}

impl<S: PlaybackSink + ?Sized> PlaybackSink for Box<S> {
    fn play(&mut self, request: &SoundRequest) -> Result<(), PlaybackError> {
        (**self).play(request)
    }
}

/// Записывает все запросы; для тестов и трассировки
#[derive(Debug, Default)]
pub struct RecordingSink {
    requests: Vec<SoundRequest>,
    failing: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Имитировать сбой движка на каждом запросе
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn requests(&self) -> &[SoundRequest] {
        &self.requests
    }

    /// Имена прозвучавших звуков по порядку
    pub fn sounds(&self) -> Vec<&str> {
        self.requests.iter().map(|r| r.sound.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }
}

impl PlaybackSink for RecordingSink {
    fn play(&mut self, request: &SoundRequest) -> Result<(), PlaybackError> {
        if self.failing {
            return Err(PlaybackError::Backend(format!("refused '{}'", request.sound)));
        }
        self.requests.push(request.clone());
        Ok(())
    }
}

/// Пишет каждый запрос в лог
#[derive(Debug, Default)]
pub struct LogSink {
    played: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> usize {
        self.played
    }
}

impl PlaybackSink for LogSink {
    fn play(&mut self, request: &SoundRequest) -> Result<(), PlaybackError> {
        self.played += 1;
        log::info!(
            "[SOUND] {} vol={:.2} pitch={:.2} at ({:.2}, {:.2}, {:.2})",
            request.sound,
            request.volume,
            request.pitch,
            request.position.x,
            request.position.y,
            request.position.z
        );
        Ok(())
    }
}
