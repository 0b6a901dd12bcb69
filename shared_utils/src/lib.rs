//! Small helpers shared by the workspace crates: environment lookup and
//! TOML config-file loading.

pub mod config;
pub mod env;
