use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use larch_util::TypeIdx;

/// Hash-consing table: structurally equal values collapse onto one id.
///
/// Each canonical value is stored once, in `values`. The lookup side only
/// keeps ids, bucketed by the value's hash, and resolves collisions by
/// comparing against `values`.
///
/// Owned by a single construction (see [`crate::automaton::Arena`]) and kept
/// alongside the parser it produced; nothing here is process-wide.
#[derive(Debug, Clone)]
pub(crate) struct Interner<K, I> {
    values: Vec<K>,
    buckets: HashMap<u64, Vec<I>>,
    hasher: RandomState,
}

impl<K: Eq + Hash, I: TypeIdx> Interner<K, I> {
    pub(crate) fn new() -> Self {
        Interner {
            values: Vec::new(),
            buckets: HashMap::new(),
            hasher: RandomState::new(),
        }
    }

    /// Returns the canonical id for `candidate`, registering it if no equal
    /// value has been seen. The flag is true when the candidate became
    /// canonical itself.
    pub(crate) fn intern(&mut self, candidate: K) -> (I, bool) {
        let hash = self.hasher.hash_one(&candidate);
        if let Some(id) = self.find(hash, &candidate) {
            return (id, false);
        }

        let id = I::from_index(self.values.len());
        self.values.push(candidate);
        self.buckets.entry(hash).or_default().push(id);
        (id, true)
    }

    pub(crate) fn get(&self, key: &K) -> Option<I> {
        self.find(self.hasher.hash_one(key), key)
    }

    fn find(&self, hash: u64, key: &K) -> Option<I> {
        self.buckets
            .get(&hash)?
            .iter()
            .copied()
            .find(|id| self.values[id.to_index()] == *key)
    }

    pub(crate) fn resolve(&self, id: I) -> &K {
        &self.values[id.to_index()]
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    /// Canonical values in registration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (I, &K)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, value)| (I::from_index(i), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::EdgeId;

    #[test]
    fn equal_values_share_an_id() {
        let mut interner: Interner<Vec<u8>, EdgeId> = Interner::new();
        let (a, fresh_a) = interner.intern(vec![1, 2]);
        let (b, fresh_b) = interner.intern(vec![3]);
        let (c, fresh_c) = interner.intern(vec![1, 2]);

        assert!(fresh_a && fresh_b && !fresh_c);
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(interner.len(), 2);
        assert_eq!(interner.resolve(b), &vec![3]);
        assert_eq!(interner.get(&vec![3]), Some(b));
        assert_eq!(interner.get(&vec![4]), None);
        assert_eq!(
            interner.iter().map(|(id, _)| id).collect::<Vec<_>>(),
            vec![a, b]
        );
    }

    // No `Clone`: interning has to move the one and only copy into the table.
    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Unique(u32);

    #[test]
    fn values_are_stored_once() {
        let mut interner: Interner<Unique, EdgeId> = Interner::new();
        let (a, _) = interner.intern(Unique(1));
        let (b, fresh) = interner.intern(Unique(1));
        let (c, _) = interner.intern(Unique(2));

        assert!(!fresh);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(c), &Unique(2));
        assert_eq!(interner.get(&Unique(1)), Some(a));
        assert_eq!(interner.len(), 2);
    }
}
