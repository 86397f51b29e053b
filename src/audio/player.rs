// ============================================
// Sound Player - Воспроизведение и очередь отложенных звуков
// ============================================
// Реализует SoundEmitter для акустик. Звуки с окном задержки ставятся
// в ограниченную очередь; think() выпускает созревшие и выбрасывает
// опоздавшие. Сбои движка логируются и глотаются здесь.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::acoustics::{
    Acoustic, AcousticOptions, Association, DelayWindow, EntityId, EventType, SoundEmitter, SoundSource,
};
use crate::core::{FootstepConfig, WorldContext};

use super::pending::PendingSound;
use super::sink::{Attenuation, PlaybackSink, SoundRequest};

/// Множители родного звука шага
const NATIVE_STEP_VOLUME: f32 = 0.15;
const NATIVE_FALL_VOLUME: f32 = 0.5;
const NATIVE_FALL_PITCH: f32 = 0.75;

/// Параметры плеера, снятые с конфигурации
#[derive(Debug, Clone, Copy)]
struct PlayerSettings {
    min_delay: u64,
    lateness_divider: f32,
    max_pending: usize,
    global_volume: f32,
}

impl PlayerSettings {
    fn from_config(config: &FootstepConfig) -> Self {
        Self {
            min_delay: config.min_delay,
            lateness_divider: config.lateness_divider,
            max_pending: config.max_pending,
            global_volume: config.global_volume,
        }
    }
}

pub struct SoundPlayer<S: PlaybackSink> {
    sink: S,
    pending: Vec<PendingSound>,
    settings: PlayerSettings,
    rng: StdRng,
    /// Время последнего тика (мс), от него считаются задержки
    clock_ms: u64,
}

impl<S: PlaybackSink> SoundPlayer<S> {
    pub fn new(sink: S, config: &FootstepConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            sink,
            pending: Vec::new(),
            settings: PlayerSettings::from_config(config),
            rng,
            clock_ms: 0,
        }
    }

    /// Применить новую конфигурацию (очередь сохраняется)
    pub fn configure(&mut self, config: &FootstepConfig) {
        self.settings = PlayerSettings::from_config(config);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn pending(&self) -> &[PendingSound] {
        &self.pending
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Сыграть ассоциацию: базовые акустики (или родной звук), затем наложения
    pub fn play_association(
        &mut self,
        ctx: &WorldContext<'_>,
        source: &SoundSource,
        assoc: &Association,
        event: EventType,
    ) {
        if assoc.is_not_emitter() {
            return;
        }
        self.clock_ms = ctx.now_ms;

        let options = AcousticOptions::default();
        if assoc.is_native_fallback() {
            self.play_step(ctx, source, assoc, event);
        } else {
            for acoustic in assoc.acoustics() {
                acoustic.play(self, source, event, &options);
            }
        }
        for overlay in assoc.overlays() {
            overlay.play(self, source, event, &options);
        }
    }

    /// Родной звук блока: шаг, или падение для LAND
    pub fn play_step(
        &mut self,
        ctx: &WorldContext<'_>,
        source: &SoundSource,
        assoc: &Association,
        event: EventType,
    ) {
        if assoc.is_liquid() {
            return;
        }
        let pos = match assoc.pos() {
            Some(pos) => pos,
            None => return,
        };

        // Снежный слой поверх блока звучит как снег
        let world = ctx.world;
        let above = world.block_state(pos.up());
        let sound_type = if world.is_snow_layer(above) {
            world.sound_type(above)
        } else {
            assoc.sound_type().cloned()
        };
        let sound_type = match sound_type {
            Some(sound_type) => sound_type,
            None => return,
        };

        self.clock_ms = ctx.now_ms;
        if event == EventType::Land {
            self.play_sound(
                source,
                &sound_type.fall_sound,
                sound_type.volume * NATIVE_FALL_VOLUME,
                sound_type.pitch * NATIVE_FALL_PITCH,
                None,
            );
        } else {
            self.play_sound(
                source,
                &sound_type.step_sound,
                sound_type.volume * NATIVE_STEP_VOLUME,
                sound_type.pitch,
                None,
            );
        }
    }

    /// Сыграть одну акустику с опциями (плавание с gliding громкостью)
    pub fn play_acoustic(
        &mut self,
        now_ms: u64,
        source: &SoundSource,
        acoustic: &Acoustic,
        event: EventType,
        options: &AcousticOptions,
    ) {
        self.clock_ms = now_ms;
        acoustic.play(self, source, event, options);
    }

    /// Сыграть сразу или поставить в очередь, если есть окно задержки.
    /// Задержка отсчитывается от clock_ms, его выставляют публичные входы.
    fn play_sound(
        &mut self,
        source: &SoundSource,
        sound: &str,
        volume: f32,
        pitch: f32,
        delay: Option<DelayWindow>,
    ) {
        let volume = volume * self.settings.global_volume;

        let [min, max] = match delay {
            Some(window) => window,
            None => {
                self.play_now(source, sound, volume, pitch);
                return;
            }
        };
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let delay_ms = self.rng.gen_range(min..=max);
        if delay_ms < self.settings.min_delay {
            self.play_now(source, sound, volume, pitch);
            return;
        }

        if self.pending.len() >= self.settings.max_pending {
            log::debug!("Pending queue full ({}), dropping '{}'", self.pending.len(), sound);
            return;
        }
        self.pending.push(PendingSound {
            entity: source.entity,
            sound: sound.to_string(),
            volume,
            pitch,
            position: source.position,
            play_at_ms: self.clock_ms + delay_ms,
            lateness_ms: (max as f32 / self.settings.lateness_divider) as u64,
        });
    }

    /// Раз в тик: сыграть созревшие звуки, выбросить опоздавшие.
    /// Возвращает количество звуков, принятых движком.
    pub fn think(&mut self, now_ms: u64) -> usize {
        self.clock_ms = now_ms;
        if self.pending.is_empty() {
            return 0;
        }

        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.is_due(now_ms));
        self.pending = waiting;

        let mut played = 0;
        for sound in due {
            if sound.is_late(now_ms) {
                log::debug!(
                    "Dropping late sound '{}' ({} ms past schedule)",
                    sound.sound,
                    now_ms - sound.play_at_ms
                );
                continue;
            }
            let request = SoundRequest {
                sound: sound.sound,
                volume: sound.volume,
                pitch: sound.pitch,
                position: sound.position,
                attenuation: Attenuation::Linear,
            };
            if self.submit(&request) {
                played += 1;
            }
        }
        played
    }

    /// Убрать из очереди звуки сущности
    pub fn forget_entity(&mut self, entity: EntityId) {
        self.pending.retain(|p| p.entity != entity);
    }

    fn play_now(&mut self, source: &SoundSource, sound: &str, volume: f32, pitch: f32) {
        let request = SoundRequest {
            sound: sound.to_string(),
            volume,
            pitch,
            position: source.position,
            attenuation: Attenuation::Linear,
        };
        self.submit(&request);
    }

    /// false, если движок отказал (ошибка уже залогирована)
    fn submit(&mut self, request: &SoundRequest) -> bool {
        match self.sink.play(request) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to play '{}': {}", request.sound, e);
                false
            }
        }
    }
}

impl<S: PlaybackSink> SoundEmitter for SoundPlayer<S> {
    fn emit(&mut self, source: &SoundSource, sound: &str, volume: f32, pitch: f32, delay: Option<DelayWindow>) {
        self.play_sound(source, sound, volume, pitch, delay);
    }

    fn roll(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}
