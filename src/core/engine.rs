/// The engine facade: validate, assign and narrate behind one type.
///
/// Every caller (host CLI, WASM/JSON boundary, tests) goes through
/// `AvalonEngine`, so the rule tables live in exactly one place.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::error::EngineError;
use crate::core::narration::{compile, NarrationScript};
use crate::core::pool::build_pool;
use crate::core::seats::summary;
use crate::core::shuffle::shuffle_seats;
use crate::core::validate::{validate_with_policy, ValidationPolicy, ValidationResult};
use crate::schema::config::ModuleConfiguration;
use crate::schema::role::Deal;

/// Built via `AvalonEngine::builder()`.
#[derive(Debug, Clone)]
pub struct AvalonEngine {
    seed: Option<u64>,
    policy: ValidationPolicy,
    deal_count: u64,
}

/// Builder for constructing an `AvalonEngine`.
#[derive(Debug, Clone, Default)]
pub struct AvalonEngineBuilder {
    seed: Option<u64>,
    policy: ValidationPolicy,
}

impl Default for AvalonEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AvalonEngine {
    pub fn builder() -> AvalonEngineBuilder {
        AvalonEngineBuilder::default()
    }

    /// Check a configuration without dealing. Never fails.
    pub fn validate(&self, players: u32, config: &ModuleConfiguration) -> ValidationResult {
        validate_with_policy(players, config, &self.policy)
    }

    /// Deal a game using the engine's own random source.
    ///
    /// A seeded engine produces the same sequence of deals every run; an
    /// unseeded one draws from OS entropy.
    pub fn assign(
        &mut self,
        players: u32,
        config: &ModuleConfiguration,
    ) -> Result<Deal, EngineError> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.deal_count)),
            None => StdRng::from_entropy(),
        };
        let deal = self.assign_with_rng(players, config, &mut rng)?;
        self.deal_count += 1;
        Ok(deal)
    }

    /// Deal a game with a caller-supplied random source.
    pub fn assign_with_rng<R: Rng + ?Sized>(
        &self,
        players: u32,
        config: &ModuleConfiguration,
        rng: &mut R,
    ) -> Result<Deal, EngineError> {
        let pool = build_pool(players, config).map_err(|e| {
            tracing::warn!(players, error = %e, "refusing to deal configuration");
            e
        })?;
        let deal = Deal::from_assignments(shuffle_seats(pool, rng));
        tracing::info!(
            players,
            good = deal.good_count,
            evil = deal.evil_count,
            "dealt roles"
        );
        Ok(deal)
    }

    /// Compile the reveal ritual. Never fails; the player count only
    /// appears in logs because the ritual is phrased in roles, not seats.
    pub fn narrate(&self, players: u32, config: &ModuleConfiguration) -> NarrationScript {
        tracing::debug!(players, "narrating reveal ritual");
        compile(config)
    }

    /// Load a module configuration from a RON file.
    pub fn load_configuration(&self, path: &Path) -> Result<ModuleConfiguration, EngineError> {
        let config = ModuleConfiguration::load_from_ron(path)?;
        tracing::debug!(
            path = %path.display(),
            modules = config.modules.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// One-line description of the session.
    pub fn summary(&self, players: u32, config: &ModuleConfiguration) -> String {
        summary(players, config)
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }
}

impl AvalonEngineBuilder {
    /// Seed the engine's random source for reproducible deals.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> AvalonEngine {
        AvalonEngine {
            seed: self.seed,
            policy: self.policy,
            deal_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::config::ConfigError;
    use crate::schema::module::Module;
    use crate::schema::team::Team;

    fn base_config() -> ModuleConfiguration {
        ModuleConfiguration::new().with_all(&[
            Module::Merlin,
            Module::Percival,
            Module::Mordred,
            Module::Morgana,
        ])
    }

    #[test]
    fn builder_with_seed() {
        let engine = AvalonEngine::builder().seed(12345).build();
        assert_eq!(engine.seed, Some(12345));
        assert_eq!(engine.deal_count, 0);
    }

    #[test]
    fn assign_deals_every_seat() {
        let mut engine = AvalonEngine::builder().seed(42).build();
        let deal = engine.assign(7, &base_config()).unwrap();
        assert_eq!(deal.assignments.len(), 7);
        assert_eq!(deal.good_count, 4);
        assert_eq!(deal.evil_count, 3);
        assert!(deal.seat_of("Assassin").is_some());
        assert!(deal
            .assignments
            .iter()
            .filter(|a| a.role.starts_with("Loyal Servant"))
            .all(|a| a.team == Team::Good));
    }

    #[test]
    fn seeded_engines_agree() {
        let mut a = AvalonEngine::builder().seed(9).build();
        let mut b = AvalonEngine::builder().seed(9).build();
        for _ in 0..3 {
            assert_eq!(
                a.assign(8, &base_config()).unwrap(),
                b.assign(8, &base_config()).unwrap()
            );
        }
    }

    #[test]
    fn failed_assign_does_not_advance_sequence() {
        let mut engine = AvalonEngine::builder().seed(5).build();
        assert!(engine.assign(4, &base_config()).is_err());
        assert_eq!(engine.deal_count, 0);
        engine.assign(5, &ModuleConfiguration::new()).unwrap();
        assert_eq!(engine.deal_count, 1);
    }

    #[test]
    fn assign_with_injected_rng() {
        let engine = AvalonEngine::default();
        let mut rng = StdRng::seed_from_u64(77);
        let first = engine.assign_with_rng(7, &base_config(), &mut rng).unwrap();
        let mut rng = StdRng::seed_from_u64(77);
        let second = engine.assign_with_rng(7, &base_config(), &mut rng).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.evil_count, 3);
    }

    #[test]
    fn assign_rejects_over_budget() {
        let mut engine = AvalonEngine::default();
        let config = ModuleConfiguration::new().with_all(&[Module::Oberon, Module::Mordred]);
        let err = engine.assign(5, &config).unwrap_err();
        assert!(err.to_string().starts_with("Too many Evil roles selected (3/2)"));
    }

    #[test]
    fn policy_flows_into_validate() {
        let engine = AvalonEngine::builder()
            .policy(ValidationPolicy {
                underfill_slack: None,
            })
            .build();
        assert!(engine.validate(10, &ModuleConfiguration::new()).warnings.is_empty());
        assert_eq!(engine.policy().underfill_slack, None);
    }

    #[test]
    fn load_configuration_from_fixture() {
        let engine = AvalonEngine::default();
        let config = engine
            .load_configuration(Path::new("tests/fixtures/seven_player_base.ron"))
            .unwrap();
        assert_eq!(config, base_config());
    }

    #[test]
    fn load_configuration_failures_are_engine_errors() {
        let engine = AvalonEngine::default();
        let err = engine
            .load_configuration(Path::new("tests/fixtures/missing.ron"))
            .unwrap_err();
        assert!(matches!(err, EngineError::Config(ConfigError::Io(_))));
        assert!(err.to_string().starts_with("configuration error: IO error"));
    }

    #[test]
    fn narrate_ignores_player_count() {
        let engine = AvalonEngine::default();
        assert_eq!(
            engine.narrate(5, &base_config()),
            engine.narrate(10, &base_config())
        );
    }
}
