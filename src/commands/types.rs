//! Command types: arguments, results, and invocation context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ArgumentErrorKind, CommandError, CommandResult};

/// Pre-parsed invocation arguments with typed getters.
///
/// Argument parsing belongs to the host; by the time a command body sees
/// its arguments they are a JSON object keyed by argument name.
#[derive(Debug, Clone, Default)]
pub struct CommandArgs {
    inner: serde_json::Value,
}

impl CommandArgs {
    /// Create new arguments from a JSON value.
    pub fn new(value: serde_json::Value) -> Self {
        Self { inner: value }
    }

    /// Arguments for a command invoked without any.
    pub fn empty() -> Self {
        Self::new(serde_json::json!({}))
    }

    /// Get the underlying JSON value.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.inner
    }

    /// Get a required string argument.
    pub fn get_string(&self, key: &str) -> CommandResult<String> {
        self.inner
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| missing(key))
    }

    /// Get an optional string argument.
    pub fn get_optional_string(&self, key: &str) -> Option<String> {
        self.inner.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
    }

    /// Get a required boolean argument.
    pub fn get_bool(&self, key: &str) -> CommandResult<bool> {
        self.inner
            .get(key)
            .and_then(|v| v.as_bool())
            .ok_or_else(|| missing(key))
    }

    /// Get an optional boolean argument with a default.
    pub fn get_optional_bool(&self, key: &str, default: bool) -> bool {
        self.inner
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    /// Get a required integer argument.
    pub fn get_i64(&self, key: &str) -> CommandResult<i64> {
        self.inner
            .get(key)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| missing(key))
    }

    /// Get an optional integer argument.
    pub fn get_optional_i64(&self, key: &str) -> Option<i64> {
        self.inner.get(key).and_then(|v| v.as_i64())
    }

    /// Get a required array of strings.
    ///
    /// Fails if any element is not a string.
    pub fn get_string_array(&self, key: &str) -> CommandResult<Vec<String>> {
        let arr = self
            .inner
            .get(key)
            .and_then(|v| v.as_array())
            .ok_or_else(|| missing(key))?;

        arr.iter()
            .map(|v| {
                v.as_str().map(|s| s.to_string()).ok_or_else(|| CommandError::Argument {
                    kind: ArgumentErrorKind::InvalidArgument {
                        name: key.to_string(),
                        message: format!("expected string element, found {}", v),
                    },
                })
            })
            .collect()
    }

    /// Check if an argument exists.
    pub fn has(&self, key: &str) -> bool {
        self.inner.get(key).is_some()
    }
}

impl From<serde_json::Value> for CommandArgs {
    fn from(value: serde_json::Value) -> Self {
        Self::new(value)
    }
}

fn missing(key: &str) -> CommandError {
    CommandError::Argument {
        kind: ArgumentErrorKind::MissingArgument {
            name: key.to_string(),
        },
    }
}

/// Output of a command body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Whether the command succeeded.
    pub success: bool,
    /// Result data on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Error code on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Error message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl CommandOutput {
    /// Create a success output with data.
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error_code: None,
            error_message: None,
        }
    }

    /// Create a success output with no data.
    pub fn success_empty() -> Self {
        Self {
            success: true,
            data: None,
            error_code: None,
            error_message: None,
        }
    }

    /// Create a failure output.
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error_code: Some(code.into()),
            error_message: Some(message.into()),
        }
    }
}

/// Per-invocation metadata handed to a command body.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Unique identifier for this invocation.
    pub invocation_id: Uuid,
    /// When the dispatcher received the invocation.
    pub received_at: DateTime<Utc>,
    /// Canonical aliases from the root to the dispatched node.
    pub command_path: Vec<String>,
}

impl InvocationContext {
    /// Create a context with a fresh id, stamped now.
    pub fn new(command_path: Vec<String>) -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            received_at: Utc::now(),
            command_path,
        }
    }

    /// The command path joined by spaces, as typed.
    pub fn command_line(&self) -> String {
        self.command_path.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_args_get_string() {
        let args = CommandArgs::new(serde_json::json!({
            "name": "spawn",
            "count": 42
        }));

        assert_eq!(args.get_string("name").unwrap(), "spawn");
        assert!(matches!(
            args.get_string("missing"),
            Err(CommandError::Argument {
                kind: ArgumentErrorKind::MissingArgument { .. }
            })
        ));
        assert_eq!(args.get_i64("count").unwrap(), 42);
    }

    #[test]
    fn test_command_args_optional() {
        let args = CommandArgs::new(serde_json::json!({
            "name": "spawn",
            "silent": true
        }));

        assert_eq!(args.get_optional_string("name"), Some("spawn".to_string()));
        assert_eq!(args.get_optional_string("missing"), None);
        assert!(args.get_optional_bool("silent", false));
        assert!(args.get_optional_bool("missing", true));
        assert_eq!(args.get_optional_i64("missing"), None);
    }

    #[test]
    fn test_command_args_string_array() {
        let args = CommandArgs::new(serde_json::json!({
            "targets": ["alice", "bob"],
            "mixed": ["alice", 3]
        }));

        assert_eq!(args.get_string_array("targets").unwrap(), vec!["alice", "bob"]);
        assert!(matches!(
            args.get_string_array("mixed"),
            Err(CommandError::Argument {
                kind: ArgumentErrorKind::InvalidArgument { .. }
            })
        ));
    }

    #[test]
    fn test_empty_args() {
        let args = CommandArgs::empty();
        assert!(!args.has("anything"));
        assert!(args.as_value().is_object());
    }

    #[test]
    fn test_command_output_success() {
        let output = CommandOutput::success(serde_json::json!({"key": "value"}));
        assert!(output.success);
        assert!(output.data.is_some());
        assert!(output.error_code.is_none());
    }

    #[test]
    fn test_command_output_failure() {
        let output = CommandOutput::failure("NO_HOME", "No home set");
        assert!(!output.success);
        assert!(output.data.is_none());
        assert_eq!(output.error_code, Some("NO_HOME".to_string()));
    }

    #[test]
    fn test_invocation_context_command_line() {
        let ctx = InvocationContext::new(vec!["home".to_string(), "set".to_string()]);
        assert_eq!(ctx.command_line(), "home set");
        assert_ne!(ctx.invocation_id, InvocationContext::new(vec![]).invocation_id);
    }
}
