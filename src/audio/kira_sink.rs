// ============================================
// Kira Sink - Воспроизведение через kira
// ============================================
// Звуки грузятся заранее по id; затухание считается относительно
// слушателя линейно до max_distance.

use std::collections::HashMap;

use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::static_sound::{StaticSoundData, StaticSoundSettings},
    Volume,
};
use ultraviolet::DVec3;

use crate::core::PlaybackError;

use super::sink::{Attenuation, PlaybackSink, SoundRequest};

/// Дальность слышимости шагов (блоков)
const DEFAULT_MAX_DISTANCE: f64 = 16.0;

pub struct KiraSink {
    manager: AudioManager,
    sounds: HashMap<String, StaticSoundData>,
    listener: DVec3,
    max_distance: f64,
}

impl KiraSink {
    pub fn new() -> Result<Self, PlaybackError> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| PlaybackError::Backend(format!("Failed to create audio manager: {:?}", e)))?;
        log::info!("[AUDIO] kira backend initialized");
        Ok(Self {
            manager,
            sounds: HashMap::new(),
            listener: DVec3::zero(),
            max_distance: DEFAULT_MAX_DISTANCE,
        })
    }

    /// Загрузить звук под id ("block.stone.step")
    pub fn load_sound(&mut self, id: &str, path: &str) -> Result<(), PlaybackError> {
        let data = StaticSoundData::from_file(path)
            .map_err(|e| PlaybackError::Backend(format!("Failed to load '{}': {:?}", path, e)))?;
        self.sounds.insert(id.to_string(), data);
        log::debug!("[AUDIO] Loaded sound {} from {}", id, path);
        Ok(())
    }

    pub fn set_listener(&mut self, position: DVec3) {
        self.listener = position;
    }

    pub fn set_max_distance(&mut self, max_distance: f64) {
        self.max_distance = max_distance.max(f64::EPSILON);
    }

    fn attenuate(&self, request: &SoundRequest) -> f64 {
        let volume = request.volume as f64;
        match request.attenuation {
            Attenuation::None => volume,
            Attenuation::Linear => {
                let distance = (request.position - self.listener).mag();
                volume * (1.0 - distance / self.max_distance).max(0.0)
            }
        }
    }
}

impl PlaybackSink for KiraSink {
    fn play(&mut self, request: &SoundRequest) -> Result<(), PlaybackError> {
        let data = self
            .sounds
            .get(&request.sound)
            .ok_or_else(|| PlaybackError::UnknownSound(request.sound.clone()))?
            .clone();

        let volume = self.attenuate(request);
        if volume <= 0.0 {
            return Ok(());
        }

        let settings = StaticSoundSettings::new()
            .volume(Volume::Amplitude(volume))
            .playback_rate(request.pitch as f64);

        self.manager
            .play(data.with_settings(settings))
            .map(|_| ())
            .map_err(|e| PlaybackError::Backend(format!("{:?}", e)))
    }
}
