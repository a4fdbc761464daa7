//! A mapping that can be changed through shared references and notices when
//! that happens under an open cursor.

use core::cell::{Cell, RefCell};
use core::fmt;
use core::hash::Hash;
use core::mem;
use std::rc::Rc;

use hashbrown::{Equivalent, HashMap};

use crate::{Lookup, Mapping, ViewError};

/// A hash map with interior mutability and structural-modification tracking.
///
/// `insert`, `remove` and `clear` take `&self`, so the map can keep changing while
/// a [`ReadOnlyView`](crate::ReadOnlyView) of it is alive. Every change to the key
/// set advances the map's [epoch](TrackedMap::epoch). Replacing the value of an
/// existing key does not.
///
/// Cursors remember the epoch they were opened at. The first advancement after the
/// epoch moved yields [`ViewError::ConcurrentModification`], and the cursor is
/// exhausted from then on.
///
/// Values are kept behind `Rc`. Lookups and cursors hand out clones of that `Rc`,
/// never copies of the value, and no borrow of the map outlives a method call, so
/// a value obtained from the map can be held across any later change to it.
///
/// Entries live in a dense vector indexed by a `hashbrown` table. Removal swaps the
/// last entry into the hole, so iteration order is insertion order only until the
/// first removal.
pub struct TrackedMap<K, V> {
    table: RefCell<Table<K, V>>,
    epoch: Cell<u64>,
}

struct Table<K, V> {
    slots: Vec<(K, Rc<V>)>,
    index: HashMap<K, usize>,
}

impl<K, V> Table<K, V>
where
    K: Eq + Hash,
{
    fn get<Q>(&self, key: &Q) -> Option<&Rc<V>>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.index.get(key).map(|&slot| &self.slots[slot].1)
    }
}

impl<K, V> TrackedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TrackedMap {
            table: RefCell::new(Table {
                slots: Vec::with_capacity(capacity),
                index: HashMap::with_capacity(capacity),
            }),
            epoch: Cell::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.table.borrow().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of structural modifications so far.
    pub fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    /// Inserts or replaces. Returns the previous value for `key`, if any.
    ///
    /// Only a new key counts as a structural modification.
    pub fn insert(&self, key: K, value: V) -> Option<Rc<V>> {
        let mut table = self.table.borrow_mut();
        if let Some(&slot) = table.index.get(&key) {
            return Some(mem::replace(&mut table.slots[slot].1, Rc::new(value)));
        }

        let slot = table.slots.len();
        table.index.insert(key.clone(), slot);
        table.slots.push((key, Rc::new(value)));
        self.advance();
        None
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<Rc<V>>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let mut guard = self.table.borrow_mut();
        let table = &mut *guard;
        let slot = table.index.remove(key)?;
        let (_, value) = table.slots.swap_remove(slot);
        if let Some((moved, _)) = table.slots.get(slot) {
            if let Some(index) = table.index.get_mut(moved) {
                *index = slot;
            }
        }
        self.advance();
        Some(value)
    }

    pub fn clear(&self) {
        let mut table = self.table.borrow_mut();
        if table.slots.is_empty() {
            return;
        }
        table.slots.clear();
        table.index.clear();
        self.advance();
    }

    pub fn get<Q>(&self, key: &Q) -> Option<Rc<V>>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.table.borrow().get(key).cloned()
    }

    fn advance(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
    }
}

impl<K, V> Default for TrackedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for TrackedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for TrackedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> fmt::Debug for TrackedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.borrow();
        f.debug_map()
            .entries(table.slots.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K, V> Mapping for TrackedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    type Key = K;
    type Value = V;
    type Found<'a>
        = Rc<V>
    where
        Self: 'a;
    // Owned: a reference can't outlive the `RefCell` borrow it came from.
    type Entry<'a>
        = (K, Rc<V>)
    where
        Self: 'a;
    type Cursor<'a>
        = TrackedCursor<'a, K, V>
    where
        Self: 'a;

    fn count(&self) -> usize {
        self.len()
    }

    fn cursor(&self) -> TrackedCursor<'_, K, V> {
        TrackedCursor {
            map: self,
            position: 0,
            opened_at: self.epoch(),
            done: false,
        }
    }
}

impl<K, V, Q> Lookup<Q> for TrackedMap<K, V>
where
    K: Eq + Hash + Clone,
    Q: ?Sized + Hash + Equivalent<K>,
{
    fn lookup(&self, key: &Q) -> Option<Rc<V>> {
        self.get(key)
    }

    fn contains_key(&self, key: &Q) -> bool {
        self.table.borrow().index.contains_key(key)
    }
}

/// Cursor over a [`TrackedMap`].
///
/// Holds no borrow of the map between advancements.
pub struct TrackedCursor<'a, K, V> {
    map: &'a TrackedMap<K, V>,
    position: usize,
    opened_at: u64,
    done: bool,
}

impl<K, V> Iterator for TrackedCursor<'_, K, V>
where
    K: Clone,
{
    type Item = Result<(K, Rc<V>), ViewError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let observed = self.map.epoch.get();
        if observed != self.opened_at {
            self.done = true;
            tracing::debug!(
                opened_at = self.opened_at,
                observed,
                "Key set changed under an open cursor"
            );
            return Some(Err(ViewError::ConcurrentModification {
                opened_at: self.opened_at,
                observed,
            }));
        }

        let table = self.map.table.borrow();
        match table.slots.get(self.position) {
            Some((key, value)) => {
                self.position += 1;
                Some(Ok((key.clone(), Rc::clone(value))))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl<K, V> fmt::Debug for TrackedCursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedCursor")
            .field("position", &self.position)
            .field("opened_at", &self.opened_at)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_not_impl_any!(TrackedMap<u8, u8>: Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_logging;
    use pretty_assertions::assert_eq;

    fn sample() -> TrackedMap<&'static str, i32> {
        [("a", 1), ("b", 2), ("c", 3)].into_iter().collect()
    }

    fn entry(key: &'static str, value: i32) -> (&'static str, Rc<i32>) {
        (key, Rc::new(value))
    }

    // ==================
    // Mutation & epochs
    // ==================

    #[test]
    fn insert_new_key_advances_epoch() {
        let map = TrackedMap::new();
        assert_eq!(map.insert("x", 1), None);
        assert_eq!(map.epoch(), 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn replacing_a_value_keeps_epoch() {
        let map = sample();
        let before = map.epoch();

        assert_eq!(map.insert("b", 20), Some(Rc::new(2)));
        assert_eq!(map.epoch(), before);
        assert_eq!(map.get("b").as_deref(), Some(&20));
    }

    #[test]
    fn remove_reindexes_the_swapped_entry() {
        let map = sample();

        assert_eq!(map.remove("a"), Some(Rc::new(1)));
        assert_eq!(map.remove("a"), None);
        // "c" was swapped into the hole left by "a".
        assert_eq!(map.get("c").as_deref(), Some(&3));
        assert_eq!(map.get("b").as_deref(), Some(&2));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn removing_a_missing_key_keeps_epoch() {
        let map = sample();
        let before = map.epoch();

        assert_eq!(map.remove("zzz"), None);
        assert_eq!(map.epoch(), before);
    }

    #[test]
    fn clear_advances_epoch_only_when_non_empty() {
        let map = sample();
        let before = map.epoch();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.epoch(), before + 1);

        map.clear();
        assert_eq!(map.epoch(), before + 1);
    }

    #[test]
    fn lookup_by_borrowed_key() {
        let map: TrackedMap<String, i32> = [(String::from("ada"), 1)].into_iter().collect();

        assert_eq!(map.lookup("ada").as_deref(), Some(&1));
        assert!(map.lookup("nope").is_none());
        assert!(Lookup::<str>::contains_key(&map, "ada"));
        assert_eq!(map.remove("ada"), Some(Rc::new(1)));
    }

    #[test]
    fn held_values_survive_later_changes() {
        let map = sample();
        let held = map.lookup("b").unwrap();

        map.insert("d", 4);
        map.insert("b", 20);
        map.remove("b");
        map.clear();

        assert_eq!(*held, 2);
        assert!(map.is_empty());
    }

    #[test]
    fn values_are_shared_not_copied() {
        let map = sample();
        let first = map.lookup("a").unwrap();
        let (_, from_cursor) = map.cursor().next().unwrap().unwrap();

        assert!(Rc::ptr_eq(&first, &from_cursor));
    }

    #[test]
    fn debug_lists_entries() {
        let map: TrackedMap<u8, char> = [(1, 'x')].into_iter().collect();
        assert_eq!(format!("{:?}", map), "{1: 'x'}");
    }

    // =======
    // Cursors
    // =======

    #[test]
    fn cursor_yields_entries_in_slot_order() {
        let map = sample();
        let entries: Result<Vec<_>, _> = map.cursor().collect();

        assert_eq!(entries, Ok(vec![entry("a", 1), entry("b", 2), entry("c", 3)]));
    }

    #[test]
    fn cursor_reports_insertion() {
        init_test_logging();
        let map = sample();
        let mut cursor = map.cursor();
        assert_eq!(cursor.next(), Some(Ok(entry("a", 1))));

        map.insert("d", 4);
        assert_eq!(
            cursor.next(),
            Some(Err(ViewError::ConcurrentModification {
                opened_at: 3,
                observed: 4,
            }))
        );
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn cursor_tolerates_value_updates() {
        let map = sample();
        let mut cursor = map.cursor();
        assert_eq!(cursor.next(), Some(Ok(entry("a", 1))));

        map.insert("b", 200);
        assert_eq!(cursor.next(), Some(Ok(entry("b", 200))));
        assert_eq!(cursor.next(), Some(Ok(entry("c", 3))));
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn cursor_opened_after_modification_is_fine() {
        let map = sample();
        map.remove("b");

        assert_eq!(map.cursor().count(), 2);
        assert!(map.cursor().all(|entry| entry.is_ok()));
    }

    #[test]
    fn error_message() {
        let err = ViewError::ConcurrentModification {
            opened_at: 2,
            observed: 5,
        };
        assert_eq!(
            err.to_string(),
            "mapping was structurally modified during iteration (opened at epoch 2, now at 5)"
        );
    }
}
