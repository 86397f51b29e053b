// ============================================
// Acoustic Definition - Именованные звуковые определения
// ============================================
// AcousticDef - то, что приходит из JSON (ссылки по именам).
// Acoustic - разрешённый граф, общий через Arc.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::emitter::{AcousticOptions, SoundEmitter, SoundSource};
use super::event::EventType;

/// Окно задержки [min, max] в мс
pub type DelayWindow = [u64; 2];

/// Разделяемая ссылка на акустику
pub type AcousticRef = Arc<Acoustic>;

/// Определение акустики из JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcousticDef {
    /// Один звук со случайными громкостью/высотой и опциональной задержкой
    Basic {
        sound: String,
        #[serde(default = "unit_range")]
        volume: [f32; 2],
        #[serde(default = "unit_range")]
        pitch: [f32; 2],
        #[serde(default)]
        delay: Option<DelayWindow>,
    },
    /// Выбор по типу события
    Events { events: HashMap<EventType, String> },
    /// Все части сразу, по порядку
    Simultaneous { parts: Vec<String> },
    /// Одна часть по весу
    Probability { entries: Vec<(f32, String)> },
}

fn unit_range() -> [f32; 2] { [1.0, 1.0] }

impl AcousticDef {
    pub fn basic(sound: &str) -> Self {
        AcousticDef::Basic {
            sound: sound.to_string(),
            volume: unit_range(),
            pitch: unit_range(),
            delay: None,
        }
    }

    pub fn delayed(sound: &str, delay: DelayWindow) -> Self {
        AcousticDef::Basic {
            sound: sound.to_string(),
            volume: unit_range(),
            pitch: unit_range(),
            delay: Some(delay),
        }
    }
}

/// Базовый звук
#[derive(Debug, Clone, PartialEq)]
pub struct BasicAcoustic {
    /// Пустая строка - намеренная тишина (не то же, что fallback)
    pub sound: String,
    pub volume: [f32; 2],
    pub pitch: [f32; 2],
    pub delay: Option<DelayWindow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AcousticKind {
    Basic(BasicAcoustic),
    Events(HashMap<EventType, AcousticRef>),
    Simultaneous(Vec<AcousticRef>),
    Probability(Vec<(f32, AcousticRef)>),
}

/// Разрешённая акустика
#[derive(Debug, Clone, PartialEq)]
pub struct Acoustic {
    pub name: String,
    pub kind: AcousticKind,
}

impl Acoustic {
    pub fn new(name: &str, kind: AcousticKind) -> Self {
        Self { name: name.to_string(), kind }
    }

    /// Проиграть акустику через эмиттер. Вложенные акустики играют по порядку.
    pub fn play(
        &self,
        emitter: &mut dyn SoundEmitter,
        source: &SoundSource,
        event: EventType,
        options: &AcousticOptions,
    ) {
        match &self.kind {
            AcousticKind::Basic(basic) => {
                if basic.sound.is_empty() {
                    return;
                }
                let volume = match options.gliding_volume {
                    Some(glide) => lerp(basic.volume, glide),
                    None => lerp(basic.volume, emitter.roll()),
                };
                let pitch = lerp(basic.pitch, emitter.roll());
                emitter.emit(source, &basic.sound, volume, pitch, basic.delay);
            }
            AcousticKind::Events(events) => {
                if let Some(acoustic) = events.get(&event) {
                    acoustic.play(emitter, source, event, options);
                }
            }
            AcousticKind::Simultaneous(parts) => {
                for part in parts {
                    part.play(emitter, source, event, options);
                }
            }
            AcousticKind::Probability(entries) => {
                if let Some(acoustic) = pick_weighted(entries, emitter.roll()) {
                    acoustic.play(emitter, source, event, options);
                }
            }
        }
    }
}

#[inline]
fn lerp(range: [f32; 2], t: f32) -> f32 {
    range[0] + (range[1] - range[0]) * t
}

fn pick_weighted(entries: &[(f32, AcousticRef)], roll: f32) -> Option<&AcousticRef> {
    let total: f32 = entries.iter().map(|(w, _)| w.max(0.0)).sum();
    if total <= 0.0 {
        return None;
    }
    let mut target = roll * total;
    for (weight, acoustic) in entries {
        let weight = weight.max(0.0);
        if target < weight {
            return Some(acoustic);
        }
        target -= weight;
    }
    entries.last().map(|(_, a)| a)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    /// Эмиттер с фиксированным броском, записывает всё в вектор
    struct FixedEmitter {
        roll: f32,
        played: Vec<(String, f32, f32, Option<DelayWindow>)>,
    }

    impl SoundEmitter for FixedEmitter {
        fn emit(&mut self, _source: &SoundSource, sound: &str, volume: f32, pitch: f32, delay: Option<DelayWindow>) {
            self.played.push((sound.to_string(), volume, pitch, delay));
        }

        fn roll(&mut self) -> f32 {
            self.roll
        }
    }

    fn basic(name: &str, sound: &str, volume: [f32; 2]) -> AcousticRef {
        Arc::new(Acoustic::new(
            name,
            AcousticKind::Basic(BasicAcoustic {
                sound: sound.to_string(),
                volume,
                pitch: [1.0, 1.0],
                delay: None,
            }),
        ))
    }

    fn source() -> SoundSource {
        SoundSource::new(1, ultraviolet::DVec3::zero())
    }

    #[test]
    fn test_empty_sound_is_silent() {
        let mut emitter = FixedEmitter { roll: 0.5, played: Vec::new() };
        basic("quiet", "", [1.0, 1.0]).play(&mut emitter, &source(), EventType::Walk, &AcousticOptions::default());
        assert!(emitter.played.is_empty());
    }

    #[test]
    fn test_gliding_volume_overrides_random_volume() {
        let mut emitter = FixedEmitter { roll: 0.0, played: Vec::new() };
        let options = AcousticOptions { gliding_volume: Some(0.5) };
        basic("swim", "liquid.swim", [0.2, 0.6]).play(&mut emitter, &source(), EventType::Swim, &options);
        assert_relative_eq!(emitter.played[0].1, 0.4);
    }

    #[test]
    fn test_events_selects_by_event() {
        let mut events = HashMap::new();
        events.insert(EventType::Land, basic("land", "step.land", [1.0, 1.0]));
        let selector = Acoustic::new("stone", AcousticKind::Events(events));

        let mut emitter = FixedEmitter { roll: 0.5, played: Vec::new() };
        selector.play(&mut emitter, &source(), EventType::Walk, &AcousticOptions::default());
        assert!(emitter.played.is_empty());
        selector.play(&mut emitter, &source(), EventType::Land, &AcousticOptions::default());
        assert_eq!(emitter.played[0].0, "step.land");
    }

    #[test]
    fn test_simultaneous_keeps_order() {
        let group = Acoustic::new(
            "group",
            AcousticKind::Simultaneous(vec![
                basic("a", "first", [1.0, 1.0]),
                basic("b", "second", [1.0, 1.0]),
            ]),
        );
        let mut emitter = FixedEmitter { roll: 0.5, played: Vec::new() };
        group.play(&mut emitter, &source(), EventType::Walk, &AcousticOptions::default());
        let names: Vec<_> = emitter.played.iter().map(|p| p.0.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn test_probability_pick_follows_weights() {
        let entries = vec![
            (1.0, basic("a", "rare", [1.0, 1.0])),
            (3.0, basic("b", "common", [1.0, 1.0])),
        ];
        assert_eq!(pick_weighted(&entries, 0.1).unwrap().name, "a");
        assert_eq!(pick_weighted(&entries, 0.3).unwrap().name, "b");
        assert_eq!(pick_weighted(&entries, 0.99).unwrap().name, "b");
        assert!(pick_weighted(&[(0.0, basic("z", "z", [1.0, 1.0]))], 0.5).is_none());
    }
}
