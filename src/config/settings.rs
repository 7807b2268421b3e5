//! Configuration settings for registration and dispatch.

use serde::Deserialize;
use std::path::Path;

use crate::error::{CommandError, CommandResult};

/// Placeholder replaced with the required capability's name.
pub const SOURCE_TYPE_PLACEHOLDER: &str = "{sourcetype}";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub registry: RegistryPolicy,
    #[serde(default)]
    pub messages: MessagesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the tree builder treats tolerated registration problems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RegistryPolicy {
    /// Sub-commands whose parent is not a registered root.
    #[serde(default)]
    pub orphaned_children: OrphanPolicy,
    /// Aliases declared by more than one root (or sibling).
    #[serde(default)]
    pub alias_collisions: CollisionPolicy,
}

impl RegistryPolicy {
    /// Reject orphans and collisions instead of tolerating them.
    pub fn strict() -> Self {
        Self {
            orphaned_children: OrphanPolicy::Reject,
            alias_collisions: CollisionPolicy::Reject,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Drop the orphan and log a warning.
    #[default]
    Warn,
    /// Fail the build.
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Keep both; the later registration wins at binding time.
    #[default]
    LastWins,
    /// Fail the build.
    Reject,
}

/// Messages sent back to invocation sources.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesConfig {
    /// Sent when a source lacks the required capability.
    /// `{sourcetype}` is replaced with e.g. "a player".
    #[serde(default = "default_invalid_source")]
    pub invalid_source: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format ("pretty" or "json").
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_invalid_source() -> String {
    "You must be {sourcetype} to run this command!".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            invalid_source: default_invalid_source(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl MessagesConfig {
    /// Render the invalid-source message for a capability name.
    pub fn render_invalid_source(&self, source_type: &str) -> String {
        self.invalid_source.replace(SOURCE_TYPE_PLACEHOLDER, source_type)
    }
}

impl Settings {
    /// Load settings from a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> CommandResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CommandError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            CommandError::Config { message } => CommandError::Config {
                message: format!("{} ({})", message, path.display()),
            },
            other => other,
        })
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> CommandResult<Self> {
        let settings: Settings = toml::from_str(content).map_err(|e| CommandError::Config {
            message: format!("Failed to parse config: {}", e),
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate the settings.
    fn validate(&self) -> CommandResult<()> {
        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(CommandError::Config {
                message: format!(
                    "Invalid log level '{}'. Valid levels: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        // Validate log format
        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(CommandError::Config {
                message: format!(
                    "Invalid log format '{}'. Valid formats: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        if !self.messages.invalid_source.contains(SOURCE_TYPE_PLACEHOLDER) {
            return Err(CommandError::Config {
                message: format!(
                    "Invalid source message must contain '{}'",
                    SOURCE_TYPE_PLACEHOLDER
                ),
            });
        }

        Ok(())
    }
}
