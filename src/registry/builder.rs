//! Tree builder: links sub-commands to their parents.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::commands::{CommandDescriptor, CommandKey};
use crate::config::{CollisionPolicy, OrphanPolicy, RegistryPolicy};
use crate::error::{CommandError, CommandResult, RegistrationErrorKind};

use super::tree::{Diagnostic, RegistrationNode, RegistrationTree};

/// One input item for [`build_tree`]: a descriptor, or the error its
/// construction produced.
#[derive(Debug)]
pub enum DescriptorEntry {
    Valid(CommandDescriptor),
    Invalid(CommandError),
}

impl From<CommandDescriptor> for DescriptorEntry {
    fn from(descriptor: CommandDescriptor) -> Self {
        Self::Valid(descriptor)
    }
}

impl From<CommandResult<CommandDescriptor>> for DescriptorEntry {
    fn from(result: CommandResult<CommandDescriptor>) -> Self {
        match result {
            Ok(descriptor) => Self::Valid(descriptor),
            Err(e) => Self::Invalid(e),
        }
    }
}

/// Build the registration tree from a flat list of descriptors.
///
/// Descriptors without a parent become roots; every sub-command is attached
/// to each root whose key matches its parent. Only one level of nesting is
/// supported. Invalid entries are skipped. Orphans and alias collisions are
/// tolerated (and reported in [`RegistrationTree::diagnostics`]) unless the
/// policy rejects them.
pub fn build_tree<I>(descriptors: I, policy: &RegistryPolicy) -> CommandResult<RegistrationTree>
where
    I: IntoIterator,
    I::Item: Into<DescriptorEntry>,
{
    let mut diagnostics = Vec::new();
    let mut roots = Vec::new();
    let mut children = Vec::new();

    for (index, entry) in descriptors.into_iter().enumerate() {
        match entry.into() {
            DescriptorEntry::Valid(descriptor) if descriptor.is_sub_command() => {
                children.push(descriptor)
            }
            DescriptorEntry::Valid(descriptor) => roots.push(descriptor),
            DescriptorEntry::Invalid(e) => {
                warn!(index, error = %e, "Skipping invalid command descriptor");
                diagnostics.push(Diagnostic::InvalidDescriptor {
                    message: e.to_string(),
                });
            }
        }
    }

    let mut claimed = vec![false; children.len()];
    let mut nodes = Vec::with_capacity(roots.len());

    for root in roots {
        let mut attached = Vec::new();
        for (i, child) in children.iter().enumerate() {
            if child.parent() == Some(root.key()) {
                debug!(
                    command = %child.key(),
                    parent = %root.key(),
                    aliases = ?child.aliases(),
                    permission = child.permission(),
                    "Attaching sub-command"
                );
                claimed[i] = true;
                attached.push(RegistrationNode::leaf(child.clone()));
            }
        }

        check_collisions(&attached, Some(root.key()), policy, &mut diagnostics)?;

        debug!(
            command = %root.key(),
            aliases = ?root.aliases(),
            children = attached.len(),
            "Registering command"
        );
        nodes.push(RegistrationNode::new(root, attached));
    }

    let child_keys: HashSet<&CommandKey> = children.iter().map(|c| c.key()).collect();
    let mut dropped = 0;

    for (child, _) in children.iter().zip(&claimed).filter(|(_, claimed)| !**claimed) {
        // parent() is always Some for the children partition
        let Some(parent) = child.parent() else {
            continue;
        };

        if policy.orphaned_children == OrphanPolicy::Reject {
            return Err(CommandError::Registration {
                kind: RegistrationErrorKind::OrphanedChild {
                    key: child.key().to_string(),
                    parent: parent.to_string(),
                },
            });
        }

        if child_keys.contains(parent) {
            warn!(
                command = %child.key(),
                parent = %parent,
                "Dropping sub-command: nested sub-commands are not supported"
            );
        } else {
            warn!(
                command = %child.key(),
                parent = %parent,
                "Dropping sub-command with no registered parent"
            );
        }

        dropped += 1;
        diagnostics.push(Diagnostic::OrphanedChild {
            key: child.key().clone(),
            parent: parent.clone(),
        });
    }

    check_collisions(&nodes, None, policy, &mut diagnostics)?;

    info!(
        roots = nodes.len(),
        sub_commands = children.len() - dropped,
        dropped,
        diagnostics = diagnostics.len(),
        "Command tree built"
    );

    Ok(RegistrationTree::new(nodes, diagnostics))
}

/// Flag aliases shared between nodes at the same level.
///
/// Under `LastWins` the later node keeps the alias at binding time.
fn check_collisions(
    nodes: &[RegistrationNode],
    parent: Option<&CommandKey>,
    policy: &RegistryPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) -> CommandResult<()> {
    let mut owners: HashMap<String, &CommandKey> = HashMap::new();

    for node in nodes {
        let mut seen = HashSet::new();
        for alias in node.aliases() {
            let folded = alias.to_ascii_lowercase();
            // an alias repeated within one descriptor is not a collision
            if !seen.insert(folded.clone()) {
                continue;
            }

            if let Some(first) = owners.insert(folded, node.key()) {
                if policy.alias_collisions == CollisionPolicy::Reject {
                    return Err(CommandError::Registration {
                        kind: RegistrationErrorKind::AliasCollision {
                            alias: alias.clone(),
                            first: first.to_string(),
                            second: node.key().to_string(),
                        },
                    });
                }

                warn!(
                    alias = %alias,
                    first = %first,
                    second = %node.key(),
                    parent = ?parent.map(|p| p.as_str()),
                    "Alias declared twice, later registration wins"
                );
                diagnostics.push(Diagnostic::AliasCollision {
                    alias: alias.clone(),
                    first: first.clone(),
                    second: node.key().clone(),
                    parent: parent.cloned(),
                });
            }
        }
    }

    Ok(())
}
