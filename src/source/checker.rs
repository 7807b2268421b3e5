//! Source capability checker.

use crate::error::CapabilityMismatch;

use super::capability::SourceCapability;
use super::traits::CommandSource;

/// Check whether `source` satisfies `required`.
///
/// `Any` always passes. Pure predicate: nothing is sent to the source.
pub fn check(
    required: SourceCapability,
    source: &dyn CommandSource,
) -> Result<(), CapabilityMismatch> {
    if source.capabilities().satisfies(required) {
        Ok(())
    } else {
        Err(CapabilityMismatch { required })
    }
}
