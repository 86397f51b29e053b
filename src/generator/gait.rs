// ============================================
// Gait - Походка (двуногая / четвероногая)
// ============================================
// Походка меняет только числа: длину шага по событию и хук после шага.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::acoustics::{EntityId, EventType};

/// Начальный множитель шага четвероногих
const INITIAL_WALK_MULTIPLIER: f32 = 0.05;

/// Профиль походки для сущности
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaitProfile {
    #[default]
    Biped,
    Quadruped,
}

#[derive(Debug, Clone)]
pub enum Gait {
    Biped,
    Quadruped(QuadrupedGait),
}

impl Gait {
    /// Походка по профилю. Сид смешивается с id, чтобы стада не шагали в такт.
    pub fn from_profile(profile: GaitProfile, seed: Option<u64>, entity: EntityId) -> Self {
        match profile {
            GaitProfile::Biped => Gait::Biped,
            GaitProfile::Quadruped => Gait::Quadruped(QuadrupedGait::new(seed.map(|s| s ^ entity))),
        }
    }

    pub fn profile(&self) -> GaitProfile {
        match self {
            Gait::Biped => GaitProfile::Biped,
            Gait::Quadruped(_) => GaitProfile::Quadruped,
        }
    }

    /// Требуемая длина шага для события
    pub fn reevaluate_distance(&self, event: EventType, distance: f32) -> f32 {
        match self {
            Gait::Biped => distance,
            Gait::Quadruped(gait) => gait.reevaluate_distance(event, distance),
        }
    }

    /// Хук после шага. true - нужен ещё один шаг в этом же тике.
    pub fn stepped(&mut self, event: EventType) -> bool {
        match self {
            Gait::Biped => false,
            Gait::Quadruped(gait) => gait.stepped(event),
        }
    }
}

/// Четырёхтактный цикл копыт 0..=3
#[derive(Debug, Clone)]
pub struct QuadrupedGait {
    hoof: u8,
    walk_multiplier: f32,
    rng: StdRng,
}

impl QuadrupedGait {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            hoof: 0,
            walk_multiplier: INITIAL_WALK_MULTIPLIER,
            rng,
        }
    }

    pub fn hoof(&self) -> u8 {
        self.hoof
    }

    pub fn walk_multiplier(&self) -> f32 {
        self.walk_multiplier
    }

    pub fn reevaluate_distance(&self, event: EventType, distance: f32) -> f32 {
        match event {
            EventType::Walk => {
                let pond = self.walk_multiplier * self.walk_multiplier * 0.2;
                if self.hoof % 2 == 1 {
                    distance * pond * 1.4
                } else {
                    distance * (1.0 - pond) * 1.4
                }
            }
            EventType::Run => match self.hoof {
                0 => distance * 0.8,
                1 => distance * 0.3,
                _ => distance,
            },
            _ => distance,
        }
    }

    pub fn stepped(&mut self, event: EventType) -> bool {
        if self.hoof == 0 || self.hoof == 2 {
            self.walk_multiplier = self.rng.gen::<f32>();
        }
        self.hoof = if self.hoof >= 3 { 0 } else { self.hoof + 1 };

        if self.hoof == 3 && event == EventType::Run {
            self.hoof = 0;
            return true;
        }
        false
    }
}
