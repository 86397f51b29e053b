// ============================================
// Generator Module - Классификация движения
// ============================================
// Снимок движения -> события шагов (WALK/RUN/JUMP/LAND...) с чередованием стоп

mod classifier;
mod gait;
mod sample;
mod state;

pub use classifier::Generator;
pub use gait::{Gait, GaitProfile, QuadrupedGait};
pub use sample::MotionSample;
pub use state::StepState;
