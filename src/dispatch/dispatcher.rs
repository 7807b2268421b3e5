//! Capability-checked dispatcher.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::commands::{
    CommandArgs, CommandBehavior, CommandOutput, ExecutionMode, InvocationContext,
};
use crate::config::{MessagesConfig, Settings};
use crate::error::{CapabilityMismatch, CommandError, CommandResult, DispatchErrorKind};
use crate::registry::{RegistrationNode, RegistrationTree};
use crate::source::{check, CommandSource};

use super::submitter::{Job, JobSubmitter};

/// Terminal state of one dispatch.
#[derive(Debug)]
pub enum DispatchResult {
    /// The source lacked the required capability; the body never ran.
    Rejected(CapabilityMismatch),
    /// A synchronous body ran to completion.
    ///
    /// Also used when an asynchronous body could not be submitted, in which
    /// case it holds the submission error and the body never ran.
    Completed(CommandResult<CommandOutput>),
    /// An asynchronous body was handed to the job facility.
    Submitted { invocation_id: Uuid },
}

impl DispatchResult {
    pub fn is_rejected(&self) -> bool {
        matches!(self, DispatchResult::Rejected(_))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, DispatchResult::Completed(_))
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, DispatchResult::Submitted { .. })
    }

    /// The body's output, for a successful synchronous run.
    pub fn output(&self) -> Option<&CommandOutput> {
        match self {
            DispatchResult::Completed(Ok(output)) => Some(output),
            _ => None,
        }
    }
}

/// Per-invocation entry point.
///
/// Holds no per-invocation state, so one dispatcher can serve concurrent
/// invocations.
#[derive(Clone)]
pub struct Dispatcher {
    submitter: Arc<dyn JobSubmitter>,
    messages: MessagesConfig,
}

impl Dispatcher {
    /// Create a dispatcher with the default rejection message.
    pub fn new(submitter: Arc<dyn JobSubmitter>) -> Self {
        Self {
            submitter,
            messages: MessagesConfig::default(),
        }
    }

    /// Create a dispatcher using the configured messages.
    pub fn from_settings(settings: &Settings, submitter: Arc<dyn JobSubmitter>) -> Self {
        Self::new(submitter).with_messages(settings.messages.clone())
    }

    pub fn with_messages(mut self, messages: MessagesConfig) -> Self {
        self.messages = messages;
        self
    }

    /// Dispatch one invocation of `node`.
    pub fn dispatch(
        &self,
        node: &RegistrationNode,
        source: Arc<dyn CommandSource>,
        args: CommandArgs,
    ) -> DispatchResult {
        let ctx = InvocationContext::new(vec![node.descriptor().canonical_alias().to_string()]);
        self.dispatch_with_context(node, ctx, source, args)
    }

    /// Resolve `path` against the tree, then dispatch.
    ///
    /// The invocation context records the canonical alias of every node
    /// on the path.
    pub fn dispatch_path<S: AsRef<str>>(
        &self,
        tree: &RegistrationTree,
        path: &[S],
        source: Arc<dyn CommandSource>,
        args: CommandArgs,
    ) -> CommandResult<DispatchResult> {
        let chain = tree.resolve_chain(path).ok_or_else(|| CommandError::Dispatch {
            kind: DispatchErrorKind::UnknownCommand {
                path: path
                    .iter()
                    .map(|s| s.as_ref())
                    .collect::<Vec<_>>()
                    .join(" "),
            },
        })?;

        let command_path = chain
            .iter()
            .map(|n| n.descriptor().canonical_alias().to_string())
            .collect();

        // resolve_chain never returns an empty chain
        let Some(node) = chain.last() else {
            return Err(CommandError::Dispatch {
                kind: DispatchErrorKind::UnknownCommand {
                    path: String::new(),
                },
            });
        };

        Ok(self.dispatch_with_context(node, InvocationContext::new(command_path), source, args))
    }

    /// Dispatch with a caller-supplied context.
    pub fn dispatch_with_context(
        &self,
        node: &RegistrationNode,
        ctx: InvocationContext,
        source: Arc<dyn CommandSource>,
        args: CommandArgs,
    ) -> DispatchResult {
        let descriptor = node.descriptor();

        debug!(
            invocation_id = %ctx.invocation_id,
            command = %ctx.command_line(),
            source = source.name(),
            "Dispatching command"
        );

        if let Err(mismatch) = check(descriptor.source_capability(), source.as_ref()) {
            warn!(
                invocation_id = %ctx.invocation_id,
                command = %ctx.command_line(),
                source = source.name(),
                required = %mismatch.required,
                "Invocation source rejected"
            );
            source.send_message(&self.messages.render_invalid_source(mismatch.required_name()));
            return DispatchResult::Rejected(mismatch);
        }

        match descriptor.execution_mode() {
            ExecutionMode::Synchronous => {
                let start_time = Instant::now();
                let result = descriptor.behavior().run(&ctx, source.as_ref(), args);
                let duration_ms = start_time.elapsed().as_millis() as u64;

                match &result {
                    Ok(output) => info!(
                        invocation_id = %ctx.invocation_id,
                        command = %ctx.command_line(),
                        success = output.success,
                        duration_ms,
                        "Command executed"
                    ),
                    Err(e) => warn!(
                        invocation_id = %ctx.invocation_id,
                        command = %ctx.command_line(),
                        error = %e,
                        duration_ms,
                        "Command failed"
                    ),
                }

                DispatchResult::Completed(result)
            }
            ExecutionMode::Asynchronous => {
                let invocation_id = ctx.invocation_id;
                let job = background_job(descriptor.behavior(), ctx, source, args);

                match self.submitter.submit(job) {
                    Ok(()) => {
                        info!(invocation_id = %invocation_id, "Command submitted");
                        DispatchResult::Submitted { invocation_id }
                    }
                    Err(e) => {
                        error!(invocation_id = %invocation_id, error = %e, "Command submission failed");
                        DispatchResult::Completed(Err(e))
                    }
                }
            }
        }
    }
}

/// Wrap a body as a job. Its outcome is only logged.
fn background_job(
    behavior: Arc<dyn CommandBehavior>,
    ctx: InvocationContext,
    source: Arc<dyn CommandSource>,
    args: CommandArgs,
) -> Job {
    Box::new(move || {
        let start_time = Instant::now();
        let result = behavior.run(&ctx, source.as_ref(), args);
        let duration_ms = start_time.elapsed().as_millis() as u64;

        match result {
            Ok(output) if output.success => debug!(
                invocation_id = %ctx.invocation_id,
                command = %ctx.command_line(),
                duration_ms,
                "Background command finished"
            ),
            Ok(output) => warn!(
                invocation_id = %ctx.invocation_id,
                command = %ctx.command_line(),
                error_code = ?output.error_code,
                error_message = ?output.error_message,
                duration_ms,
                "Background command reported failure"
            ),
            Err(e) => error!(
                invocation_id = %ctx.invocation_id,
                command = %ctx.command_line(),
                error = %e,
                duration_ms,
                "Background command failed"
            ),
        }
    })
}
