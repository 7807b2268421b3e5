//! Host binding of the finished tree.

use std::collections::HashMap;

use tracing::debug;

use crate::error::CommandResult;

use super::tree::RegistrationNode;

/// The host's command registration facility.
///
/// Receives each root node (with its children, aliases and permission
/// strings) once, in insertion order. Binding the same alias twice is the
/// host's call; the core does not deduplicate.
pub trait CommandRegistrar {
    fn register(&mut self, root: &RegistrationNode) -> CommandResult<()>;
}

/// In-memory registrar mapping each root alias to its node.
///
/// A later root declaring an alias replaces the earlier binding.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    bindings: HashMap<String, RegistrationNode>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The node currently bound to `alias` (ASCII case-insensitive).
    pub fn lookup(&self, alias: &str) -> Option<&RegistrationNode> {
        self.bindings.get(&alias.to_ascii_lowercase())
    }

    /// Resolve a root alias followed by child aliases.
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<&RegistrationNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.lookup(first.as_ref())?;
        for token in rest {
            node = node.child(token.as_ref())?;
        }
        Some(node)
    }

    /// Number of bound aliases.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All bound aliases, sorted.
    pub fn aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }
}

impl CommandRegistrar for AliasTable {
    fn register(&mut self, root: &RegistrationNode) -> CommandResult<()> {
        for alias in root.aliases() {
            if let Some(previous) = self.bindings.insert(alias.to_ascii_lowercase(), root.clone()) {
                debug!(
                    alias = %alias,
                    previous = %previous.key(),
                    current = %root.key(),
                    "Alias rebound"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandArgs, CommandDescriptor, CommandOutput, InvocationContext};
    use crate::config::RegistryPolicy;
    use crate::error::{CommandError, RegistrationErrorKind};
    use crate::registry::{build_tree, Diagnostic};
    use crate::source::CommandSource;

    fn noop(
        _ctx: &InvocationContext,
        _src: &dyn CommandSource,
        _args: CommandArgs,
    ) -> CommandResult<CommandOutput> {
        Ok(CommandOutput::success_empty())
    }

    fn descriptor(key: &str, aliases: &[&str]) -> CommandDescriptor {
        CommandDescriptor::builder()
            .key(key)
            .aliases(aliases.iter().copied())
            .behavior(noop)
            .build()
            .unwrap()
    }

    #[test]
    fn test_bind_last_registration_wins() {
        let tree = build_tree(
            vec![
                descriptor("teleport", &["teleport", "tp"]),
                descriptor("tppos", &["tppos", "tp"]),
            ],
            &RegistryPolicy::default(),
        )
        .unwrap();
        assert!(matches!(
            tree.diagnostics(),
            [Diagnostic::AliasCollision { .. }]
        ));

        let mut table = AliasTable::new();
        assert_eq!(tree.bind(&mut table), 2);

        assert_eq!(table.lookup("tp").unwrap().key().as_str(), "tppos");
        assert_eq!(table.lookup("teleport").unwrap().key().as_str(), "teleport");
        assert_eq!(table.aliases(), vec!["teleport", "tp", "tppos"]);
    }

    #[test]
    fn test_resolve_through_table() {
        let tree = build_tree(
            vec![
                descriptor("home", &["home"]),
                CommandDescriptor::builder()
                    .key("home.set")
                    .alias("set")
                    .parent("home")
                    .behavior(noop)
                    .build()
                    .unwrap(),
            ],
            &RegistryPolicy::default(),
        )
        .unwrap();

        let mut table = AliasTable::new();
        tree.bind(&mut table);

        assert_eq!(table.resolve(&["HOME", "set"]).unwrap().key().as_str(), "home.set");
        assert!(table.resolve(&["home", "del"]).is_none());
    }

    #[test]
    fn test_description_survives_binding() {
        let tree = build_tree(
            vec![
                CommandDescriptor::builder()
                    .alias("home")
                    .description("Manage homes")
                    .behavior(noop)
                    .build()
                    .unwrap(),
                CommandDescriptor::builder()
                    .key("home.set")
                    .alias("set")
                    .description("Set a home at your position")
                    .parent("home")
                    .behavior(noop)
                    .build()
                    .unwrap(),
            ],
            &RegistryPolicy::default(),
        )
        .unwrap();
        assert_eq!(
            tree.roots()[0].descriptor().description(),
            Some("Manage homes")
        );

        let mut table = AliasTable::new();
        tree.bind(&mut table);

        let home = table.lookup("home").unwrap();
        assert_eq!(home.descriptor().description(), Some("Manage homes"));
        let set = table.resolve(&["home", "set"]).unwrap();
        assert_eq!(
            set.descriptor().description(),
            Some("Set a home at your position")
        );
    }

    struct RefuseWarp {
        bound: Vec<String>,
    }

    impl CommandRegistrar for RefuseWarp {
        fn register(&mut self, root: &RegistrationNode) -> CommandResult<()> {
            if root.key().as_str() == "warp" {
                return Err(CommandError::Registration {
                    kind: RegistrationErrorKind::BindingRefused {
                        key: "warp".to_string(),
                        message: "reserved".to_string(),
                    },
                });
            }
            self.bound.push(root.key().to_string());
            Ok(())
        }
    }

    #[test]
    fn test_refused_binding_does_not_stop_others() {
        let tree = build_tree(
            vec![
                descriptor("warp", &["warp"]),
                descriptor("home", &["home"]),
            ],
            &RegistryPolicy::default(),
        )
        .unwrap();

        let mut registrar = RefuseWarp { bound: Vec::new() };
        assert_eq!(tree.bind(&mut registrar), 1);
        assert_eq!(registrar.bound, vec!["home"]);
    }
}
