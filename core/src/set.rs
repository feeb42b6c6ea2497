use crate::dict::{self, HashDictionary};
use crate::error::Result;
use rustc_hash::FxBuildHasher;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// Set of distinct items, stored as the keys of a [`HashDictionary`].
#[derive(Clone)]
pub struct HashSet<T, S = FxBuildHasher> {
    map: HashDictionary<T, (), S>,
}

impl<T> HashSet<T, FxBuildHasher> {
    pub fn new() -> Self {
        Self { map: HashDictionary::new() }
    }
}

impl<T, S> HashSet<T, S> {
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.map.keys()
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Returns `true` when the item was not already present.
    pub fn insert(&mut self, item: T) -> bool {
        self.map.put(item, ()).is_none()
    }

    pub fn remove<Q>(&mut self, item: &Q) -> Result<()>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(item)
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(item)
    }
}

impl<T, S: Default> Default for HashSet<T, S> {
    fn default() -> Self {
        Self { map: HashDictionary::default() }
    }
}

impl<T: fmt::Debug, S> fmt::Debug for HashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<T, S> IntoIterator for HashSet<T, S> {
    type Item = T;
    type IntoIter = std::iter::Map<dict::IntoIter<T, ()>, fn((T, ())) -> T>;

    fn into_iter(self) -> Self::IntoIter {
        let key: fn((T, ())) -> T = |(item, ())| item;
        self.map.into_iter().map(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContainerError;

    #[test]
    fn insert_reports_novelty() {
        let mut set = HashSet::new();
        assert!(set.insert("a"));
        assert!(set.insert("b"));
        assert!(!set.insert("a"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_absent_item_fails() {
        let mut set: HashSet<String> = ["x".to_string()].into_iter().collect();
        assert_eq!(set.remove("y"), Err(ContainerError::KeyNotFound));
        assert_eq!(set.remove("x"), Ok(()));
        assert!(set.is_empty());
    }

    #[test]
    fn collects_distinct_items() {
        let set: HashSet<u8> = [3, 1, 3, 2, 1].into_iter().collect();
        let mut items: Vec<u8> = set.into_iter().collect();
        items.sort();
        assert_eq!(items, vec![1, 2, 3]);
    }
}
