use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::module::{LancelotMode, Module};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Which optional modules are in play for one session.
///
/// Owned by the caller and treated by the engine as a read-only snapshot.
/// In RON:
///
/// ```ron
/// (
///     modules: [Merlin, Percival, Mordred, Morgana],
///     lancelot: Classic,
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfiguration {
    #[serde(default)]
    pub modules: FxHashSet<Module>,
    #[serde(default)]
    pub lancelot: LancelotMode,
}

impl ModuleConfiguration {
    /// An empty configuration: only the Assassin and placeholder roles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: switch a module on.
    pub fn with(mut self, module: Module) -> Self {
        self.modules.insert(module);
        self
    }

    /// Builder-style: switch several modules on.
    pub fn with_all(mut self, modules: &[Module]) -> Self {
        self.modules.extend(modules.iter().copied());
        self
    }

    pub fn with_lancelot(mut self, mode: LancelotMode) -> Self {
        self.lancelot = mode;
        self
    }

    /// Returns true if the module is switched on.
    pub fn has(&self, module: Module) -> bool {
        self.modules.contains(&module)
    }

    /// Flip a module on or off, as a host toggling a checkbox would.
    pub fn set(&mut self, module: Module, enabled: bool) {
        if enabled {
            self.modules.insert(module);
        } else {
            self.modules.remove(&module);
        }
    }

    /// Active modules in catalogue order.
    pub fn active_modules(&self) -> Vec<Module> {
        Module::ALL.into_iter().filter(|m| self.has(*m)).collect()
    }

    /// True when anything beyond the base box is in play.
    pub fn is_advanced(&self) -> bool {
        self.lancelot.is_active() || self.modules.iter().any(|m| !m.is_base())
    }

    /// Load a configuration from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<ModuleConfiguration, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a configuration from a RON string.
    pub fn parse_ron(input: &str) -> Result<ModuleConfiguration, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_configuration() {
        let config = ModuleConfiguration::new();
        assert!(config.modules.is_empty());
        assert_eq!(config.lancelot, LancelotMode::Off);
        assert!(!config.is_advanced());
    }

    #[test]
    fn builder_and_toggle() {
        let mut config = ModuleConfiguration::new()
            .with(Module::Merlin)
            .with_all(&[Module::Percival, Module::Morgana]);
        assert!(config.has(Module::Merlin));
        assert!(config.has(Module::Morgana));

        config.set(Module::Morgana, false);
        assert!(!config.has(Module::Morgana));
        config.set(Module::Oberon, true);
        assert!(config.has(Module::Oberon));
    }

    #[test]
    fn active_modules_follow_catalogue_order() {
        let config = ModuleConfiguration::new()
            .with(Module::Trickster)
            .with(Module::Merlin)
            .with(Module::Cleric);
        assert_eq!(
            config.active_modules(),
            vec![Module::Merlin, Module::Cleric, Module::Trickster]
        );
    }

    #[test]
    fn advanced_detection() {
        let base = ModuleConfiguration::new().with_all(&[
            Module::Merlin,
            Module::Percival,
            Module::Mordred,
            Module::Morgana,
            Module::Oberon,
        ]);
        assert!(!base.is_advanced());
        assert!(base.clone().with(Module::LadyOfTheLake).is_advanced());
        assert!(base.with_lancelot(LancelotMode::Variant).is_advanced());
    }

    #[test]
    fn parse_ron_configuration() {
        let config = ModuleConfiguration::parse_ron(
            "(modules: [Merlin, Percival, Morgana], lancelot: Classic)",
        )
        .unwrap();
        assert!(config.has(Module::Merlin));
        assert!(config.has(Module::Percival));
        assert!(config.has(Module::Morgana));
        assert_eq!(config.lancelot, LancelotMode::Classic);
    }

    #[test]
    fn parse_ron_defaults_missing_fields() {
        let config = ModuleConfiguration::parse_ron("(modules: [Oberon])").unwrap();
        assert_eq!(config.lancelot, LancelotMode::Off);

        let config = ModuleConfiguration::parse_ron("()").unwrap();
        assert_eq!(config, ModuleConfiguration::new());
    }

    #[test]
    fn parse_ron_rejects_unknown_module() {
        assert!(ModuleConfiguration::parse_ron("(modules: [Galahad])").is_err());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ModuleConfiguration::load_from_ron(Path::new("does/not/exist.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
