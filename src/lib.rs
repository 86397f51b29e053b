// ============================================
// Footfall - Акустика шагов в воксельном мире
// ============================================
// Движение сущности -> события шагов -> поиск акустики по блокам
// (ковёр / забор / блок / примитив / листва) -> звук или очередь.

pub mod acoustics;
pub mod audio;
pub mod blocks;
pub mod core;
pub mod footsteps;
pub mod generator;
pub mod solver;

#[cfg(test)]
mod testing;

pub use acoustics::{AcousticRegistry, Association, EventType, RegistryBuilder, NOT_EMITTER};
pub use audio::{LogSink, PlaybackSink, RecordingSink, SoundPlayer, SoundRequest};
pub use blocks::{BlockCatalog, BlockPos, BlockState, VoxelWorld, WorldQuery};
pub use crate::core::{FootfallError, FootstepConfig, PlaybackError, WorldContext};
pub use footsteps::FootstepSystem;
pub use generator::{GaitProfile, Generator, MotionSample};
pub use solver::Resolver;
