use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

use cmdtree::commands::{CommandArgs, CommandDescriptor, CommandOutput, InvocationContext};
use cmdtree::config::{OrphanPolicy, RegistryPolicy};
use cmdtree::error::{CommandError, CommandResult, RegistrationErrorKind};
use cmdtree::registry::{build_tree, Diagnostic};
use cmdtree::source::CommandSource;

fn noop(
    _ctx: &InvocationContext,
    _src: &dyn CommandSource,
    _args: CommandArgs,
) -> CommandResult<CommandOutput> {
    Ok(CommandOutput::success_empty())
}

/// A generated descriptor list: root names plus `(alias, parent)` children.
///
/// Parent indices run past the root name range so some children are orphans.
#[derive(Debug, Clone)]
struct DescriptorSet {
    roots: Vec<u8>,
    children: Vec<(u8, u8)>,
}

impl DescriptorSet {
    fn root_key(index: u8) -> String {
        format!("r{}", index)
    }

    fn child_key(position: usize, alias: u8, parent: u8) -> String {
        format!("{}.c{}.{}", Self::root_key(parent), alias, position)
    }

    fn has_root(&self, parent: u8) -> bool {
        self.roots.contains(&parent)
    }

    /// Roots and children interleaved, each kept in input order.
    fn descriptors(&self) -> Vec<CommandDescriptor> {
        let roots = self.roots.iter().map(|&r| {
            CommandDescriptor::builder()
                .alias(Self::root_key(r))
                .behavior(noop)
                .build()
                .unwrap()
        });
        let children = self.children.iter().enumerate().map(|(i, &(alias, parent))| {
            CommandDescriptor::builder()
                .key(Self::child_key(i, alias, parent))
                .alias(format!("c{}", alias))
                .parent(Self::root_key(parent))
                .behavior(noop)
                .build()
                .unwrap()
        });

        let mut out = Vec::new();
        let mut roots = roots.peekable();
        let mut children = children.peekable();
        while roots.peek().is_some() || children.peek().is_some() {
            out.extend(children.next());
            out.extend(roots.next());
        }
        out
    }

    fn expected_children(&self, root: u8) -> Vec<String> {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, &(_, parent))| parent == root)
            .map(|(i, &(alias, parent))| Self::child_key(i, alias, parent))
            .collect()
    }

    fn expected_orphans(&self) -> Vec<String> {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, &(_, parent))| !self.has_root(parent))
            .map(|(i, &(alias, parent))| Self::child_key(i, alias, parent))
            .collect()
    }
}

fn arb_descriptor_set() -> impl Strategy<Value = DescriptorSet> {
    (
        prop::collection::vec(0u8..6, 0..=6),
        prop::collection::vec((0u8..4, 0u8..9), 0..=12),
    )
        .prop_map(|(roots, children)| DescriptorSet { roots, children })
}

proptest! {
    #![proptest_config(ProptestConfig {
        // Do not write `.proptest-regressions` files into the repo.
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_children_attach_to_every_matching_root(set in arb_descriptor_set()) {
        let tree = build_tree(set.descriptors(), &RegistryPolicy::default()).unwrap();

        let root_keys: Vec<String> = tree.roots().iter().map(|n| n.key().to_string()).collect();
        let expected_roots: Vec<String> = set.roots.iter().map(|&r| DescriptorSet::root_key(r)).collect();
        prop_assert_eq!(root_keys, expected_roots);

        for (node, &root) in tree.roots().iter().zip(&set.roots) {
            let children: Vec<String> = node.children().iter().map(|c| c.key().to_string()).collect();
            prop_assert_eq!(children, set.expected_children(root));
            prop_assert!(node.children().iter().all(|c| c.is_leaf()));
        }
    }

    #[test]
    fn prop_orphans_are_dropped_and_reported(set in arb_descriptor_set()) {
        let tree = build_tree(set.descriptors(), &RegistryPolicy::default()).unwrap();
        let expected = set.expected_orphans();

        let reported: Vec<String> = tree
            .diagnostics()
            .iter()
            .filter_map(|d| match d {
                Diagnostic::OrphanedChild { key, .. } => Some(key.to_string()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(&reported, &expected);

        for node in tree.roots() {
            prop_assert!(!expected.contains(&node.key().to_string()));
            for child in node.children() {
                prop_assert!(!expected.contains(&child.key().to_string()));
            }
        }
    }

    #[test]
    fn prop_reject_policy_fails_only_with_orphans(set in arb_descriptor_set()) {
        let policy = RegistryPolicy {
            orphaned_children: OrphanPolicy::Reject,
            ..RegistryPolicy::default()
        };
        let result = build_tree(set.descriptors(), &policy);

        match set.expected_orphans().first() {
            Some(first) => prop_assert!(matches!(
                result,
                Err(CommandError::Registration {
                    kind: RegistrationErrorKind::OrphanedChild { ref key, .. }
                }) if key == first
            ), "expected OrphanedChild error for first orphan"),
            None => prop_assert!(result.is_ok()),
        }
    }
}
