// ============================================
// Event Type - Классы звуковых событий
// ============================================

use std::fmt;

use serde::{Deserialize, Serialize};

/// Тип события шага
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Walk,
    Run,
    Up,
    UpRun,
    Down,
    DownRun,
    Climb,
    ClimbRun,
    Jump,
    Land,
    Swim,
    Wander,
}

impl EventType {
    pub const ALL: [EventType; 12] = [
        EventType::Walk,
        EventType::Run,
        EventType::Up,
        EventType::UpRun,
        EventType::Down,
        EventType::DownRun,
        EventType::Climb,
        EventType::ClimbRun,
        EventType::Jump,
        EventType::Land,
        EventType::Swim,
        EventType::Wander,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EventType::Walk => "walk",
            EventType::Run => "run",
            EventType::Up => "up",
            EventType::UpRun => "up_run",
            EventType::Down => "down",
            EventType::DownRun => "down_run",
            EventType::Climb => "climb",
            EventType::ClimbRun => "climb_run",
            EventType::Jump => "jump",
            EventType::Land => "land",
            EventType::Swim => "swim",
            EventType::Wander => "wander",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
