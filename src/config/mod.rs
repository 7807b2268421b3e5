//! Configuration module.
//!
//! Handles loading and validating settings from TOML files. Every section
//! is optional; an empty file yields the tolerant defaults.

mod settings;

pub use settings::*;
