//! Declarative command descriptors.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CommandError, CommandResult, DescriptorErrorKind};
use crate::source::{CommandSource, SourceCapability};

use super::traits::CommandBehavior;
use super::types::{CommandArgs, CommandOutput, InvocationContext};

/// Stable identity of a descriptor, referenced by sub-commands as their parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandKey(String);

impl CommandKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommandKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for CommandKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Whether the body runs on the dispatching thread or as a background job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Synchronous,
    Asynchronous,
}

/// One command's identity, constraints and body.
///
/// Immutable once built; clones share the same behavior.
#[derive(Clone)]
pub struct CommandDescriptor {
    key: CommandKey,
    aliases: Vec<String>,
    permission: String,
    description: Option<String>,
    source_capability: SourceCapability,
    parent: Option<CommandKey>,
    execution_mode: ExecutionMode,
    behavior: Arc<dyn CommandBehavior>,
}

impl CommandDescriptor {
    /// Start building a descriptor.
    pub fn builder() -> CommandDescriptorBuilder {
        CommandDescriptorBuilder::default()
    }

    /// Identity used for parent/child linking.
    pub fn key(&self) -> &CommandKey {
        &self.key
    }

    /// Invocation tokens; never empty.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The first alias.
    pub fn canonical_alias(&self) -> &str {
        // build() guarantees at least one alias
        &self.aliases[0]
    }

    /// Permission string passed through to the host; empty means unrestricted.
    pub fn permission(&self) -> &str {
        &self.permission
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn source_capability(&self) -> SourceCapability {
        self.source_capability
    }

    /// The parent's key, for sub-commands.
    pub fn parent(&self) -> Option<&CommandKey> {
        self.parent.as_ref()
    }

    pub fn is_sub_command(&self) -> bool {
        self.parent.is_some()
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        self.execution_mode
    }

    /// Shared handle to the command body.
    pub fn behavior(&self) -> Arc<dyn CommandBehavior> {
        Arc::clone(&self.behavior)
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("key", &self.key)
            .field("aliases", &self.aliases)
            .field("permission", &self.permission)
            .field("description", &self.description)
            .field("source_capability", &self.source_capability)
            .field("parent", &self.parent)
            .field("execution_mode", &self.execution_mode)
            .finish_non_exhaustive()
    }
}

/// Builder for [`CommandDescriptor`].
///
/// The key defaults to the canonical alias.
#[derive(Default)]
pub struct CommandDescriptorBuilder {
    key: Option<CommandKey>,
    aliases: Vec<String>,
    permission: String,
    description: Option<String>,
    source_capability: Option<SourceCapability>,
    parent: Option<CommandKey>,
    execution_mode: ExecutionMode,
    behavior: Option<Arc<dyn CommandBehavior>>,
}

impl CommandDescriptorBuilder {
    /// Set an explicit identity.
    pub fn key(mut self, key: impl Into<CommandKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Append one alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Append several aliases, keeping their order.
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = permission.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Required source capability. Defaults to `Any`.
    pub fn capability(mut self, capability: SourceCapability) -> Self {
        self.source_capability = Some(capability);
        self
    }

    /// Mark this descriptor as a sub-command of `parent`.
    pub fn parent(mut self, parent: impl Into<CommandKey>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = mode;
        self
    }

    /// Shorthand for `execution_mode(ExecutionMode::Asynchronous)`.
    pub fn asynchronous(self) -> Self {
        self.execution_mode(ExecutionMode::Asynchronous)
    }

    /// Set the body from a closure.
    pub fn behavior<F>(self, behavior: F) -> Self
    where
        F: Fn(&InvocationContext, &dyn CommandSource, CommandArgs) -> CommandResult<CommandOutput>
            + Send
            + Sync
            + 'static,
    {
        self.shared_behavior(Arc::new(behavior))
    }

    /// Set the body from an existing shared behavior.
    pub fn shared_behavior(mut self, behavior: Arc<dyn CommandBehavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Validate and build the descriptor.
    pub fn build(self) -> CommandResult<CommandDescriptor> {
        let label = self
            .key
            .as_ref()
            .map(|k| k.to_string())
            .or_else(|| self.aliases.first().cloned())
            .unwrap_or_else(|| "<unnamed>".to_string());

        if self.aliases.is_empty() {
            return Err(CommandError::invalid_descriptor(DescriptorErrorKind::NoAliases {
                key: label,
            }));
        }

        if let Some(alias) = self
            .aliases
            .iter()
            .find(|a| a.is_empty() || a.chars().any(char::is_whitespace))
        {
            return Err(CommandError::invalid_descriptor(
                DescriptorErrorKind::MalformedAlias {
                    alias: alias.clone(),
                },
            ));
        }

        let behavior = self.behavior.ok_or_else(|| {
            CommandError::invalid_descriptor(DescriptorErrorKind::MissingBehavior {
                key: label.clone(),
            })
        })?;

        let key = self
            .key
            .unwrap_or_else(|| CommandKey::new(self.aliases[0].clone()));

        if self.parent.as_ref() == Some(&key) {
            return Err(CommandError::invalid_descriptor(DescriptorErrorKind::SelfParent {
                key: key.to_string(),
            }));
        }

        Ok(CommandDescriptor {
            key,
            aliases: self.aliases,
            permission: self.permission,
            description: self.description,
            source_capability: self.source_capability.unwrap_or(SourceCapability::Any),
            parent: self.parent,
            execution_mode: self.execution_mode,
            behavior,
        })
    }
}
