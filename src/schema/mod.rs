//! Value types shared by every stage of the engine.

pub mod config;
pub mod module;
pub mod role;
pub mod team;
