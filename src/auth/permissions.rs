//! Permission checks supplied by the host.

use std::collections::{HashMap, HashSet};

use crate::registry::RegistrationNode;
use crate::source::CommandSource;

/// The host's authorization collaborator.
pub trait Authorizer: Send + Sync {
    /// Whether `source` holds `permission`.
    fn has_permission(&self, source: &dyn CommandSource, permission: &str) -> bool;
}

/// Check `node`'s own permission. The empty permission is unrestricted.
pub fn is_permitted(
    authorizer: &dyn Authorizer,
    node: &RegistrationNode,
    source: &dyn CommandSource,
) -> bool {
    let permission = node.permission();
    permission.is_empty() || authorizer.has_permission(source, permission)
}

/// Grants everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn has_permission(&self, _source: &dyn CommandSource, _permission: &str) -> bool {
        true
    }
}

/// Fixed permission grants keyed by source name.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    grants: HashMap<String, HashSet<String>>,
}

impl StaticPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `permission` to the source named `source_name`.
    pub fn grant(mut self, source_name: impl Into<String>, permission: impl Into<String>) -> Self {
        self.grants
            .entry(source_name.into())
            .or_default()
            .insert(permission.into());
        self
    }
}

impl Authorizer for StaticPermissions {
    fn has_permission(&self, source: &dyn CommandSource, permission: &str) -> bool {
        self.grants
            .get(source.name())
            .is_some_and(|perms| perms.contains(permission))
    }
}
