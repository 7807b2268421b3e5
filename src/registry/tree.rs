//! Registration tree types.

use tracing::warn;

use crate::commands::{CommandDescriptor, CommandKey};

use super::binding::CommandRegistrar;

/// A descriptor plus its attached sub-commands.
#[derive(Debug, Clone)]
pub struct RegistrationNode {
    descriptor: CommandDescriptor,
    children: Vec<RegistrationNode>,
}

impl RegistrationNode {
    pub(crate) fn new(descriptor: CommandDescriptor, children: Vec<RegistrationNode>) -> Self {
        Self {
            descriptor,
            children,
        }
    }

    pub(crate) fn leaf(descriptor: CommandDescriptor) -> Self {
        Self::new(descriptor, Vec::new())
    }

    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    /// Attached sub-commands in registration order.
    pub fn children(&self) -> &[RegistrationNode] {
        &self.children
    }

    pub fn key(&self) -> &CommandKey {
        self.descriptor.key()
    }

    pub fn aliases(&self) -> &[String] {
        self.descriptor.aliases()
    }

    /// The node's own permission; never inherited from the parent.
    pub fn permission(&self) -> &str {
        self.descriptor.permission()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether `token` names this node (ASCII case-insensitive).
    pub fn answers_to(&self, token: &str) -> bool {
        self.aliases().iter().any(|a| a.eq_ignore_ascii_case(token))
    }

    /// The child bound to `token`; the later of two colliding siblings wins.
    pub fn child(&self, token: &str) -> Option<&RegistrationNode> {
        self.children.iter().rev().find(|c| c.answers_to(token))
    }
}

/// Something the builder tolerated but wants the host to know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A descriptor failed construction and was skipped.
    InvalidDescriptor { message: String },
    /// A sub-command whose parent is not a root; it was dropped.
    OrphanedChild { key: CommandKey, parent: CommandKey },
    /// Two roots (or two siblings under `parent`) share an alias; `second` wins.
    AliasCollision {
        alias: String,
        first: CommandKey,
        second: CommandKey,
        parent: Option<CommandKey>,
    },
}

/// Output of [`super::build_tree`]: root nodes in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RegistrationTree {
    roots: Vec<RegistrationNode>,
    diagnostics: Vec<Diagnostic>,
}

impl RegistrationTree {
    pub(crate) fn new(roots: Vec<RegistrationNode>, diagnostics: Vec<Diagnostic>) -> Self {
        Self { roots, diagnostics }
    }

    pub fn roots(&self) -> &[RegistrationNode] {
        &self.roots
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of root commands.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Find a root by key. The last root with that key wins.
    pub fn root(&self, key: &str) -> Option<&RegistrationNode> {
        self.roots.iter().rev().find(|r| r.key().as_str() == key)
    }

    /// Walk alias tokens from a root down to a child.
    ///
    /// Returns every node on the way, root first. All tokens must match.
    pub fn resolve_chain<S: AsRef<str>>(&self, path: &[S]) -> Option<Vec<&RegistrationNode>> {
        let (first, rest) = path.split_first()?;
        let mut node = self
            .roots
            .iter()
            .rev()
            .find(|r| r.answers_to(first.as_ref()))?;

        let mut chain = vec![node];
        for token in rest {
            node = node.child(token.as_ref())?;
            chain.push(node);
        }
        Some(chain)
    }

    /// The node `path` resolves to, applying last-registration-wins.
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<&RegistrationNode> {
        self.resolve_chain(path).and_then(|chain| chain.last().copied())
    }

    /// Hand every root to the host's registrar in insertion order.
    ///
    /// A root the registrar refuses is logged and skipped; the rest are
    /// still bound. Returns the number of roots bound.
    pub fn bind<R: CommandRegistrar + ?Sized>(&self, registrar: &mut R) -> usize {
        let mut bound = 0;
        for root in &self.roots {
            match registrar.register(root) {
                Ok(()) => bound += 1,
                Err(e) => {
                    warn!(command = %root.key(), error = %e, "Host refused command binding");
                }
            }
        }
        bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandArgs, CommandOutput, InvocationContext};
    use crate::error::CommandResult;
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
    fn test_answers_to_ignores_ascii_case() {
        let node = RegistrationNode::leaf(descriptor("home", &["home", "h"]));
        assert!(node.answers_to("HOME"));
        assert!(node.answers_to("h"));
        assert!(!node.answers_to("homes"));
        assert!(node.is_leaf());
    }

    #[test]
    fn test_later_sibling_wins() {
        let node = RegistrationNode::new(
            descriptor("home", &["home"]),
            vec![
                RegistrationNode::leaf(descriptor("home.set", &["set"])),
                RegistrationNode::leaf(descriptor("home.put", &["put", "set"])),
            ],
        );
        assert_eq!(node.child("set").unwrap().key().as_str(), "home.put");
        assert_eq!(node.child("put").unwrap().key().as_str(), "home.put");
        assert!(node.child("del").is_none());
    }

    #[test]
    fn test_root_lookup_by_key() {
        let tree = RegistrationTree::new(
            vec![
                RegistrationNode::leaf(descriptor("warp", &["warp"])),
                RegistrationNode::leaf(descriptor("home", &["home"])),
            ],
            Vec::new(),
        );
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root("home").unwrap().aliases(), &["home".to_string()]);
        assert!(tree.root("spawn").is_none());
    }
}
