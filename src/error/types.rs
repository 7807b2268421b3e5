//! Error types for command registration and dispatch.

use thiserror::Error;

use crate::source::SourceCapability;

/// Main error type for the command core.
///
/// Nothing here is fatal to the process: every variant describes one
/// descriptor or one invocation that did not succeed.
#[derive(Error, Debug)]
pub enum CommandError {
    /// A descriptor could not be constructed.
    #[error("Invalid descriptor: {kind}")]
    Descriptor { kind: DescriptorErrorKind },

    /// Tree assembly problems (only fatal under a strict policy).
    #[error("Registration error: {kind}")]
    Registration { kind: RegistrationErrorKind },

    /// The invocation source does not satisfy the required capability.
    #[error(transparent)]
    Capability(#[from] CapabilityMismatch),

    /// Dispatch failures.
    #[error("Dispatch error: {kind}")]
    Dispatch { kind: DispatchErrorKind },

    /// Argument lookup failures inside a command body.
    #[error("Argument error: {kind}")]
    Argument { kind: ArgumentErrorKind },

    /// Configuration-related errors.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CommandError {
    /// Shorthand for an `InvalidDescriptor` error.
    pub fn invalid_descriptor(kind: DescriptorErrorKind) -> Self {
        Self::Descriptor { kind }
    }

    /// Shorthand for a command body failure.
    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::Dispatch {
            kind: DispatchErrorKind::ExecutionFailed {
                message: message.into(),
            },
        }
    }
}

/// Descriptor construction error kinds (`InvalidDescriptor`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorErrorKind {
    #[error("command '{key}' declares no aliases")]
    NoAliases { key: String },

    #[error("alias '{alias}' is blank or contains whitespace")]
    MalformedAlias { alias: String },

    #[error("command '{key}' has no behavior")]
    MissingBehavior { key: String },

    #[error("command '{key}' names itself as its parent")]
    SelfParent { key: String },
}

/// Registration error kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationErrorKind {
    #[error("sub-command '{key}' references unknown parent '{parent}'")]
    OrphanedChild { key: String, parent: String },

    #[error("alias '{alias}' is declared by both '{first}' and '{second}'")]
    AliasCollision {
        alias: String,
        first: String,
        second: String,
    },

    #[error("host refused binding for '{key}': {message}")]
    BindingRefused { key: String, message: String },
}

/// Dispatch error kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchErrorKind {
    #[error("Unknown command: {path}")]
    UnknownCommand { path: String },

    #[error("Background job could not be submitted: {message}")]
    SubmissionFailed { message: String },

    #[error("Command execution failed: {message}")]
    ExecutionFailed { message: String },
}

/// Argument error kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentErrorKind {
    #[error("Missing required argument: {name}")]
    MissingArgument { name: String },

    #[error("Invalid value for argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },
}

/// Returned by the capability checker when a source lacks the required capability.
///
/// Carries the required capability so the host can render its own message
/// through the `{sourcetype}` placeholder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("source must be {} to run this command", .required.display_name())]
pub struct CapabilityMismatch {
    pub required: SourceCapability,
}

impl CapabilityMismatch {
    /// Human-readable name of the required capability.
    pub fn required_name(&self) -> &'static str {
        self.required.display_name()
    }
}

/// Result type alias for command core operations.
pub type CommandResult<T> = Result<T, CommandError>;
