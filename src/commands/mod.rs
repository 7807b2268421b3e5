//! Command descriptors and the types command bodies work with.
//!
//! ## Declaring a Command
//!
//! 1. Build a [`CommandDescriptor`] with its aliases, capability and body
//! 2. Give sub-commands a `parent` naming the root's key
//! 3. Hand every descriptor to [`crate::registry::build_tree`] once at startup

mod descriptor;
mod traits;
mod types;

pub use descriptor::{CommandDescriptor, CommandDescriptorBuilder, CommandKey, ExecutionMode};
pub use traits::CommandBehavior;
pub use types::{CommandArgs, CommandOutput, InvocationContext};
