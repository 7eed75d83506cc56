use thiserror::Error;

use crate::schema::config::ConfigError;
use crate::schema::team::Team;

/// Reasons a game cannot be dealt, plus configuration loading failures.
///
/// A pool whose size disagrees with the player count is a logic defect and
/// panics instead of surfacing here.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Player count must be between 5 and 10 (got {0})")]
    InvalidPlayerCount(u32),
    #[error(
        "Too many {team} roles selected ({selected}/{seats}); {overflow} over budget: {names}",
        names = .roles.join(", ")
    )]
    RoleBudgetExceeded {
        team: Team,
        selected: u32,
        seats: u32,
        overflow: u32,
        roles: Vec<String>,
    },
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    pub(crate) fn budget_exceeded(team: Team, seats: u32, roles: Vec<String>) -> Self {
        let selected = roles.len() as u32;
        Self::RoleBudgetExceeded {
            team,
            selected,
            seats,
            overflow: selected.saturating_sub(seats),
            roles,
        }
    }
}
