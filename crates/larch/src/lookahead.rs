use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use bit_set::BitSet;

use crate::ids::TerminalId;

/// A set of terminals, stored as a bit set over dense terminal ids.
///
/// Equality, ordering and hashing only look at the members, never at the
/// capacity of the underlying bit vector, so two sets built along different
/// paths compare equal whenever they hold the same terminals.
#[derive(Clone, Debug, Default)]
pub struct TerminalSet {
    bits: BitSet,
}

impl TerminalSet {
    pub fn new() -> TerminalSet {
        TerminalSet { bits: BitSet::new() }
    }

    pub fn singleton(terminal: TerminalId) -> TerminalSet {
        let mut set = TerminalSet::new();
        set.insert(terminal);
        set
    }

    /// Returns true if the terminal was not already present.
    pub fn insert(&mut self, terminal: TerminalId) -> bool {
        self.bits.insert(terminal.index())
    }

    pub fn contains(&self, terminal: TerminalId) -> bool {
        self.bits.contains(terminal.index())
    }

    /// Unions `other` into `self`, returning true if `self` grew.
    pub fn union_with(&mut self, other: &TerminalSet) -> bool {
        let before = self.bits.len();
        self.bits.union_with(&other.bits);
        self.bits.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = TerminalId> + '_ {
        self.bits.iter().map(TerminalId::new)
    }
}

impl PartialEq for TerminalSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for TerminalSet {}

impl Hash for TerminalSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for terminal in self.iter() {
            terminal.hash(state);
        }
        self.len().hash(state);
    }
}

impl PartialOrd for TerminalSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TerminalSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl FromIterator<TerminalId> for TerminalSet {
    fn from_iter<I: IntoIterator<Item = TerminalId>>(iter: I) -> Self {
        let mut set = TerminalSet::new();
        for terminal in iter {
            set.insert(terminal);
        }
        set
    }
}
