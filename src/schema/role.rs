use serde::{Deserialize, Serialize};

use super::team::Team;

/// One intended seat's role: a named role or a generic placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleDescriptor {
    pub name: String,
    pub team: Team,
}

impl RoleDescriptor {
    pub fn new(name: impl Into<String>, team: Team) -> Self {
        Self {
            name: name.into(),
            team,
        }
    }

    /// Numbered placeholder: "Loyal Servant 2", "Minion of Mordred 1".
    pub fn placeholder(team: Team, number: u32) -> Self {
        Self::new(format!("{} {}", team.placeholder_name(), number), team)
    }
}

/// The exact set of roles to be dealt for one game.
///
/// Only built by the pool builder, which guarantees one descriptor per player
/// and per-team counts matching the seat budget. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolePool {
    roles: Vec<RoleDescriptor>,
}

impl RolePool {
    pub(crate) fn from_roles(roles: Vec<RoleDescriptor>) -> Self {
        Self { roles }
    }

    pub fn roles(&self) -> &[RoleDescriptor] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn count(&self, team: Team) -> usize {
        self.roles.iter().filter(|r| r.team == team).count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }

    pub fn into_roles(self) -> Vec<RoleDescriptor> {
        self.roles
    }
}

/// A dealt seat. The engine does not know who sits there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub seat: u32,
    pub role: String,
    pub team: Team,
}

/// The result of dealing a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub assignments: Vec<Assignment>,
    pub good_count: u32,
    pub evil_count: u32,
}

impl Deal {
    pub fn from_assignments(assignments: Vec<Assignment>) -> Self {
        let good_count = assignments.iter().filter(|a| a.team == Team::Good).count() as u32;
        let evil_count = assignments.len() as u32 - good_count;
        Self {
            assignments,
            good_count,
            evil_count,
        }
    }

    pub fn seat_of(&self, role: &str) -> Option<u32> {
        self.assignments
            .iter()
            .find(|a| a.role == role)
            .map(|a| a.seat)
    }
}
