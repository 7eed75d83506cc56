/// Role pool builder. Turns a configuration into the exact roles to deal.

use crate::core::error::EngineError;
use crate::core::seats::seat_budget;
use crate::schema::config::ModuleConfiguration;
use crate::schema::module::{Module, ASSASSIN, EVIL_LANCELOT, GOOD_LANCELOT};
use crate::schema::role::{RoleDescriptor, RolePool};
use crate::schema::team::Team;

/// Order in which selected modules enter the pool. The Assassin is inserted
/// after Merlin, ahead of every optional Evil role, and the Lancelot pair
/// follows Oberon.
const DEAL_ORDER_HEAD: [Module; 1] = [Module::Merlin];
const DEAL_ORDER_BASE: [Module; 4] = [
    Module::Percival,
    Module::Mordred,
    Module::Morgana,
    Module::Oberon,
];
const DEAL_ORDER_TAIL: [Module; 15] = [
    Module::JuniorMessenger,
    Module::SeniorMessenger,
    Module::EvilMessenger,
    Module::GoodRogue,
    Module::EvilRogue,
    Module::GoodSorcerer,
    Module::EvilSorcerer,
    Module::Cleric,
    Module::Troublemaker,
    Module::UntrustworthyServant,
    Module::Apprentice,
    Module::Lunatic,
    Module::Brute,
    Module::Revealer,
    Module::Trickster,
];

/// Named roles the configuration puts into play, in deal order.
///
/// The Assassin is always present. Rule modules contribute nothing.
pub fn selected_roles(config: &ModuleConfiguration) -> Vec<RoleDescriptor> {
    let mut chosen = Vec::new();
    push_selected(&mut chosen, config, &DEAL_ORDER_HEAD);
    chosen.push(RoleDescriptor::new(ASSASSIN, Team::Evil));
    push_selected(&mut chosen, config, &DEAL_ORDER_BASE);

    if config.lancelot.is_active() {
        chosen.push(RoleDescriptor::new(GOOD_LANCELOT, Team::Good));
        chosen.push(RoleDescriptor::new(EVIL_LANCELOT, Team::Evil));
    }

    push_selected(&mut chosen, config, &DEAL_ORDER_TAIL);
    chosen
}

fn push_selected(chosen: &mut Vec<RoleDescriptor>, config: &ModuleConfiguration, modules: &[Module]) {
    for module in modules {
        if !config.has(*module) {
            continue;
        }
        if let (Some(name), Some(team)) = (module.role_name(), module.team()) {
            chosen.push(RoleDescriptor::new(name, team));
        }
    }
}

/// Names of the selected roles on one team, in deal order.
pub fn selected_names(selected: &[RoleDescriptor], team: Team) -> Vec<String> {
    selected
        .iter()
        .filter(|r| r.team == team)
        .map(|r| r.name.clone())
        .collect()
}

/// Build the full pool for `players`: named roles first, then placeholders.
///
/// Fails if the player count is unsupported or if either team has more named
/// roles than seats. Evil is checked first.
pub fn build_pool(players: u32, config: &ModuleConfiguration) -> Result<RolePool, EngineError> {
    let budget = seat_budget(players)?;
    let mut roles = selected_roles(config);

    let evil_names = selected_names(&roles, Team::Evil);
    if evil_names.len() as u32 > budget.evil {
        return Err(EngineError::budget_exceeded(Team::Evil, budget.evil, evil_names));
    }
    let good_names = selected_names(&roles, Team::Good);
    if good_names.len() as u32 > budget.good {
        return Err(EngineError::budget_exceeded(Team::Good, budget.good, good_names));
    }

    let open_good = budget.good - good_names.len() as u32;
    let open_evil = budget.evil - evil_names.len() as u32;
    roles.extend((1..=open_good).map(|n| RoleDescriptor::placeholder(Team::Good, n)));
    roles.extend((1..=open_evil).map(|n| RoleDescriptor::placeholder(Team::Evil, n)));

    assert_eq!(
        roles.len(),
        players as usize,
        "role pool size does not match player count"
    );

    tracing::debug!(
        players,
        named = good_names.len() + evil_names.len(),
        placeholders = open_good + open_evil,
        "built role pool"
    );

    Ok(RolePool::from_roles(roles))
}
