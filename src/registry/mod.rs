//! Registration tree assembly and host binding.
//!
//! The tree is built once at startup from a flat list of descriptors and
//! is read-only afterwards, so it can be shared across dispatching threads
//! without locking.

mod binding;
mod builder;
mod tree;

pub use binding::{AliasTable, CommandRegistrar};
pub use builder::{build_tree, DescriptorEntry};
pub use tree::{Diagnostic, RegistrationNode, RegistrationTree};
