/// Seat table: how many Good and Evil seats a player count gets.

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::schema::config::ModuleConfiguration;

pub const MIN_PLAYERS: u32 = 5;
pub const MAX_PLAYERS: u32 = 10;

/// Good and Evil seats for one player count. Always sums to the player count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSeatBudget {
    pub good: u32,
    pub evil: u32,
}

impl TeamSeatBudget {
    pub fn total(&self) -> u32 {
        self.good + self.evil
    }
}

/// Look up the seat budget for `players`.
pub fn seat_budget(players: u32) -> Result<TeamSeatBudget, EngineError> {
    let evil = match players {
        5 | 6 => 2,
        7..=9 => 3,
        10 => 4,
        _ => return Err(EngineError::InvalidPlayerCount(players)),
    };
    Ok(TeamSeatBudget {
        good: players - evil,
        evil,
    })
}

/// One-line description of a session, e.g. "Base game: 5 players (3 Good, 2 Evil)".
pub fn summary(players: u32, config: &ModuleConfiguration) -> String {
    let kind = if config.is_advanced() {
        "Advanced"
    } else {
        "Base"
    };
    match seat_budget(players) {
        Ok(budget) => format!(
            "{} game: {} players ({} Good, {} Evil)",
            kind, players, budget.good, budget.evil
        ),
        Err(_) => format!("{} game: {} players (unsupported)", kind, players),
    }
}
