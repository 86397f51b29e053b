// ============================================
// Audio Module - Плеер, очередь и приёмники звука
// ============================================

mod pending;
mod player;
mod sink;
#[cfg(feature = "kira")]
mod kira_sink;

pub use pending::PendingSound;
pub use player::SoundPlayer;
pub use sink::*;
#[cfg(feature = "kira")]
pub use kira_sink::KiraSink;
