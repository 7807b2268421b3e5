//! Closed set of invocation-source capability tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What kind of invocation source a command requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCapability {
    /// Any source may run the command.
    Any,
    /// A source with a position in the world.
    Located,
    Player,
    Console,
    /// A source connected from outside the process.
    Remote,
    /// A source acting on behalf of another source.
    Proxy,
    /// A command block.
    Block,
    BlockMinecart,
    Sign,
    Rcon,
}

impl SourceCapability {
    /// Every tag except `Any`, in declaration order.
    pub const CONCRETE: [SourceCapability; 9] = [
        SourceCapability::Located,
        SourceCapability::Player,
        SourceCapability::Console,
        SourceCapability::Remote,
        SourceCapability::Proxy,
        SourceCapability::Block,
        SourceCapability::BlockMinecart,
        SourceCapability::Sign,
        SourceCapability::Rcon,
    ];

    /// Name substituted for `{sourcetype}` in rejection messages.
    pub fn display_name(self) -> &'static str {
        match self {
            SourceCapability::Any => "any source",
            SourceCapability::Located => "a located source",
            SourceCapability::Player => "a player",
            SourceCapability::Console => "a console",
            SourceCapability::Remote => "a remote source",
            SourceCapability::Proxy => "a proxy source",
            SourceCapability::Block => "a command block",
            SourceCapability::BlockMinecart => "a command block minecart",
            SourceCapability::Sign => "a sign source",
            SourceCapability::Rcon => "an Rcon client",
        }
    }

    /// Tags a source of this kind also satisfies in the default source hierarchy.
    pub fn implied(self) -> &'static [SourceCapability] {
        match self {
            SourceCapability::Player => &[SourceCapability::Located, SourceCapability::Remote],
            SourceCapability::Block
            | SourceCapability::BlockMinecart
            | SourceCapability::Sign => &[SourceCapability::Located],
            SourceCapability::Rcon => &[SourceCapability::Remote],
            _ => &[],
        }
    }

    fn bit(self) -> u16 {
        match self {
            SourceCapability::Any => 0,
            SourceCapability::Located => 1 << 0,
            SourceCapability::Player => 1 << 1,
            SourceCapability::Console => 1 << 2,
            SourceCapability::Remote => 1 << 3,
            SourceCapability::Proxy => 1 << 4,
            SourceCapability::Block => 1 << 5,
            SourceCapability::BlockMinecart => 1 << 6,
            SourceCapability::Sign => 1 << 7,
            SourceCapability::Rcon => 1 << 8,
        }
    }
}

impl fmt::Display for SourceCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The capability tags a concrete source satisfies.
///
/// `Any` is implicit and never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet {
    bits: u16,
}

impl CapabilitySet {
    /// A source that satisfies nothing beyond `Any`.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// A source classified as `capability`, plus the tags it implies.
    ///
    /// A player is both located and remote; an Rcon client is only remote.
    pub fn classified_as(capability: SourceCapability) -> Self {
        Self::empty().with(capability)
    }

    /// Add a tag (and the tags it implies).
    pub fn with(mut self, capability: SourceCapability) -> Self {
        self.bits |= capability.bit();
        for implied in capability.implied() {
            self.bits |= implied.bit();
        }
        self
    }

    /// Add exactly one tag, without implied tags.
    pub fn with_only(mut self, capability: SourceCapability) -> Self {
        self.bits |= capability.bit();
        self
    }

    /// Whether a source with this classification satisfies `capability`.
    pub fn satisfies(&self, capability: SourceCapability) -> bool {
        match capability {
            SourceCapability::Any => true,
            other => self.bits & other.bit() != 0,
        }
    }

    /// Whether no concrete tag is present.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate the concrete tags present.
    pub fn iter(&self) -> impl Iterator<Item = SourceCapability> + '_ {
        SourceCapability::CONCRETE
            .into_iter()
            .filter(move |c| self.bits & c.bit() != 0)
    }
}

impl FromIterator<SourceCapability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = SourceCapability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), CapabilitySet::with)
    }
}
