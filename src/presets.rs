//! Ready-made module configurations shipped with the crate.
//!
//! The RON sources are compiled in, so presets work without touching the
//! filesystem (the WASM bindings rely on this).

use crate::schema::config::{ConfigError, ModuleConfiguration};

mod data {
    pub const BASE: &str = include_str!("../presets/base.ron");
    pub const CLASSIC: &str = include_str!("../presets/classic.ron");
    pub const LANCELOTS: &str = include_str!("../presets/lancelots.ron");
    pub const BIG_BOX: &str = include_str!("../presets/big_box.ron");
}

/// Names accepted by [`builtin`].
pub const PRESET_NAMES: [&str; 4] = ["base", "classic", "lancelots", "big_box"];

/// Parse a built-in preset by name. Returns `Ok(None)` for unknown names.
pub fn builtin(name: &str) -> Result<Option<ModuleConfiguration>, ConfigError> {
    let source = match name {
        "base" => data::BASE,
        "classic" => data::CLASSIC,
        "lancelots" => data::LANCELOTS,
        "big_box" => data::BIG_BOX,
        _ => return Ok(None),
    };
    ModuleConfiguration::parse_ron(source).map(Some)
}
