use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeMap, HashMap, btree_map, hash_map};

use hashbrown::Equivalent;

use super::{Lookup, Mapping, Unchecked};

impl<K, V, S> Mapping for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;
    type Found<'a>
        = &'a V
    where
        Self: 'a;
    type Entry<'a>
        = (&'a K, &'a V)
    where
        Self: 'a;
    type Cursor<'a>
        = Unchecked<hash_map::Iter<'a, K, V>>
    where
        Self: 'a;

    fn count(&self) -> usize {
        self.len()
    }

    fn cursor(&self) -> Self::Cursor<'_> {
        Unchecked::new(self.iter())
    }
}

impl<K, V, S, Q> Lookup<Q> for HashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Eq + Hash,
    S: BuildHasher,
{
    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }

    fn contains_key(&self, key: &Q) -> bool {
        HashMap::contains_key(self, key)
    }
}

impl<K, V, S> Mapping for hashbrown::HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;
    type Found<'a>
        = &'a V
    where
        Self: 'a;
    type Entry<'a>
        = (&'a K, &'a V)
    where
        Self: 'a;
    type Cursor<'a>
        = Unchecked<hashbrown::hash_map::Iter<'a, K, V>>
    where
        Self: 'a;

    fn count(&self) -> usize {
        self.len()
    }

    fn cursor(&self) -> Self::Cursor<'_> {
        Unchecked::new(self.iter())
    }
}

impl<K, V, S, Q> Lookup<Q> for hashbrown::HashMap<K, V, S>
where
    K: Eq + Hash,
    Q: ?Sized + Hash + Equivalent<K>,
    S: BuildHasher,
{
    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }

    fn contains_key(&self, key: &Q) -> bool {
        hashbrown::HashMap::contains_key(self, key)
    }
}

impl<K, V> Mapping for BTreeMap<K, V>
where
    K: Ord,
{
    type Key = K;
    type Value = V;
    type Found<'a>
        = &'a V
    where
        Self: 'a;
    type Entry<'a>
        = (&'a K, &'a V)
    where
        Self: 'a;
    type Cursor<'a>
        = Unchecked<btree_map::Iter<'a, K, V>>
    where
        Self: 'a;

    fn count(&self) -> usize {
        self.len()
    }

    fn cursor(&self) -> Self::Cursor<'_> {
        Unchecked::new(self.iter())
    }
}

impl<K, V, Q> Lookup<Q> for BTreeMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: ?Sized + Ord,
{
    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }

    fn contains_key(&self, key: &Q) -> bool {
        BTreeMap::contains_key(self, key)
    }
}
