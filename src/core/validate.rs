/// Configuration validator with live feedback for a host editing a setup.
///
/// Uses the same counting rules as the pool builder, but never fails:
/// problems become `errors` (dealing impossible) or `warnings` (advisory).

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::core::pool::{selected_names, selected_roles};
use crate::core::seats::seat_budget;
use crate::schema::config::ModuleConfiguration;
use crate::schema::module::Module;
use crate::schema::team::Team;

/// Selected-versus-available seats per team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionCounts {
    pub good_slots: u32,
    pub evil_slots: u32,
    pub good_selected: u32,
    pub evil_selected: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub counts: SelectionCounts,
}

impl ValidationResult {
    /// True when the configuration can be dealt.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Tunable thresholds for advisory warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Suggest more named roles when a team has fewer than `slots - slack`
    /// selected. `None` disables the suggestion.
    pub underfill_slack: Option<u32>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            underfill_slack: Some(1),
        }
    }
}

/// Validate with the default policy.
pub fn validate(players: u32, config: &ModuleConfiguration) -> ValidationResult {
    validate_with_policy(players, config, &ValidationPolicy::default())
}

pub fn validate_with_policy(
    players: u32,
    config: &ModuleConfiguration,
    policy: &ValidationPolicy,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    let budget = match seat_budget(players) {
        Ok(budget) => Some(budget),
        Err(e) => {
            result.errors.push(e.to_string());
            None
        }
    };

    let selected = selected_roles(config);
    let good_names = selected_names(&selected, Team::Good);
    let evil_names = selected_names(&selected, Team::Evil);

    result.counts = SelectionCounts {
        good_slots: budget.map_or(0, |b| b.good),
        evil_slots: budget.map_or(0, |b| b.evil),
        good_selected: good_names.len() as u32,
        evil_selected: evil_names.len() as u32,
    };
    let counts = result.counts;

    if let Some(budget) = budget {
        if counts.good_selected > budget.good {
            result
                .errors
                .push(EngineError::budget_exceeded(Team::Good, budget.good, good_names).to_string());
        }
        if counts.evil_selected > budget.evil {
            result
                .errors
                .push(EngineError::budget_exceeded(Team::Evil, budget.evil, evil_names).to_string());
        }

        if let Some(slack) = policy.underfill_slack {
            if counts.good_selected + slack < budget.good {
                result.warnings.push(format!(
                    "Consider adding more Good roles ({}/{})",
                    counts.good_selected, budget.good
                ));
            }
            if counts.evil_selected + slack < budget.evil {
                result.warnings.push(format!(
                    "Consider adding more Evil roles ({}/{})",
                    counts.evil_selected, budget.evil
                ));
            }
        }
    }

    result.warnings.extend(advisories(config));
    result
}

/// Roles whose counterpart is missing from the configuration.
fn advisories(config: &ModuleConfiguration) -> Vec<String> {
    let has = |m: Module| config.has(m);
    let mut warnings = Vec::new();

    if has(Module::Percival) && !has(Module::Merlin) && !has(Module::Morgana) {
        warnings.push(
            "Percival is selected but neither Merlin nor Morgana is in play, so Percival has no one to see."
                .to_string(),
        );
    }
    if has(Module::Morgana) && !has(Module::Percival) {
        warnings.push("Morgana is usually paired with Percival; without Percival she deceives no one.".to_string());
    }
    if has(Module::Mordred) && !has(Module::Merlin) {
        warnings.push("Mordred is selected without Merlin, so there is no one for Mordred to hide from.".to_string());
    }
    if has(Module::SeniorMessenger) && !has(Module::JuniorMessenger) {
        warnings.push("Senior Messenger is selected without a Junior Messenger to learn.".to_string());
    }
    if has(Module::JuniorMessenger) && !has(Module::SeniorMessenger) {
        warnings.push("Junior Messenger is selected without a Senior Messenger; no messenger reveal will happen.".to_string());
    }
    if has(Module::UntrustworthyServant) && !has(Module::Merlin) {
        warnings.push("Untrustworthy Servant is selected without Merlin, so there is no one to mislead.".to_string());
    }

    warnings
}
