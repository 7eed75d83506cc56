use serde::{Deserialize, Serialize};
use std::fmt;

/// The two opposing factions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Good,
    Evil,
}

impl Team {
    /// Display label: "Good" or "Evil".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Evil => "Evil",
        }
    }

    /// Generic role used to fill this team's unclaimed seats.
    pub fn placeholder_name(&self) -> &'static str {
        match self {
            Self::Good => "Loyal Servant",
            Self::Evil => "Minion of Mordred",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
