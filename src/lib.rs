//! Avalon Engine: role dealing and reveal-ritual narration for Avalon-style
//! social deduction games.
//!
//! Deals hidden roles to 5–10 players under a configurable set of optional
//! modules, and compiles the script a host reads aloud so that each role
//! learns exactly what its rules allow.

pub mod core;
pub mod presets;
pub mod schema;

pub use crate::core::engine::{AvalonEngine, AvalonEngineBuilder};
pub use crate::core::error::EngineError;
pub use crate::core::narration::NarrationScript;
pub use crate::core::validate::{ValidationPolicy, ValidationResult};
pub use crate::schema::config::ModuleConfiguration;
pub use crate::schema::module::{LancelotMode, Module};
pub use crate::schema::role::{Assignment, Deal, RoleDescriptor, RolePool};
pub use crate::schema::team::Team;
