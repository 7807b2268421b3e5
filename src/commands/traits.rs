//! Command behavior trait definition.

use crate::error::CommandResult;
use crate::source::CommandSource;

use super::types::{CommandArgs, CommandOutput, InvocationContext};

/// The body of a command.
///
/// Invoked only after the source passed the capability check. Closures of
/// the matching shape implement this trait, so most commands never name it.
///
/// # Example
///
/// ```ignore
/// let behavior = |_ctx: &InvocationContext, src: &dyn CommandSource, args: CommandArgs| {
///     let name = args.get_string("name")?;
///     src.send_message(&format!("Home '{}' set", name));
///     Ok(CommandOutput::success_empty())
/// };
/// ```
pub trait CommandBehavior: Send + Sync {
    /// Run the command for the given source.
    ///
    /// Note: asynchronous commands call this from a worker thread.
    fn run(
        &self,
        ctx: &InvocationContext,
        source: &dyn CommandSource,
        args: CommandArgs,
    ) -> CommandResult<CommandOutput>;
}

impl<F> CommandBehavior for F
where
    F: Fn(&InvocationContext, &dyn CommandSource, CommandArgs) -> CommandResult<CommandOutput>
        + Send
        + Sync,
{
    fn run(
        &self,
        ctx: &InvocationContext,
        source: &dyn CommandSource,
        args: CommandArgs,
    ) -> CommandResult<CommandOutput> {
        self(ctx, source, args)
    }
}
