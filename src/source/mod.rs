//! Invocation sources and the capability checker.
//!
//! The host classifies every concrete source into a [`CapabilitySet`]; the
//! checker only compares that classification against a descriptor's
//! required [`SourceCapability`].

mod capability;
mod checker;
mod traits;

pub use capability::{CapabilitySet, SourceCapability};
pub use checker::check;
pub use traits::CommandSource;
