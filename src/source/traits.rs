//! Invocation source trait.

use super::capability::CapabilitySet;

/// A concrete invocation source, supplied by the host.
///
/// The host decides which capability tags the source satisfies; the core
/// trusts that classification.
pub trait CommandSource: Send + Sync {
    /// Display name (player name, "Console", ...).
    fn name(&self) -> &str;

    /// The capability tags this source satisfies.
    fn capabilities(&self) -> CapabilitySet;

    /// Deliver a message back to the source.
    fn send_message(&self, message: &str);
}
