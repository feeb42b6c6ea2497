//! Chained hash dictionary.
//!
//! Buckets are small linear-scan dictionaries owned by their slot. The table
//! grows to `2 * buckets + 1` (kept odd) and rehashes every pair once
//! `len / buckets` exceeds [`LOAD_FACTOR`] ahead of an insert.

use crate::error::{ContainerError, Result};
use rustc_hash::FxBuildHasher;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// Resize once `len / bucket_count` exceeds this ratio.
pub const LOAD_FACTOR: f64 = 0.75;
/// Bucket count of a freshly created dictionary.
pub const DEFAULT_BUCKETS: usize = 11;
/// Spreads correlated hashes before they are reduced into the bucket range.
pub const HASH_MULTIPLIER: u64 = 3;

/// Linear-scan dictionary backing a single bucket.
#[derive(Clone)]
pub(crate) struct ArrayDictionary<K, V> {
    pairs: Vec<(K, V)>,
}

impl<K, V> ArrayDictionary<K, V> {
    pub(crate) fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, (K, V)> {
        self.pairs.iter()
    }

    fn into_pairs(self) -> Vec<(K, V)> {
        self.pairs
    }

    // Caller guarantees the key is not already present.
    fn push_new(&mut self, key: K, value: V) {
        self.pairs.push((key, value));
    }
}

impl<K: Eq, V> ArrayDictionary<K, V> {
    fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.pairs.iter().position(|(k, _)| k.borrow() == key)
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.index_of(key)
            .map(|i| &self.pairs[i].1)
            .ok_or(ContainerError::KeyNotFound)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        match self.index_of(key) {
            Some(i) => Ok(&mut self.pairs[i].1),
            None => Err(ContainerError::KeyNotFound),
        }
    }

    /// Inserts or overwrites, returning the previous value.
    pub(crate) fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.index_of(&key) {
            Some(i) => Some(std::mem::replace(&mut self.pairs[i].1, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    /// Returns the slot for `key` and whether it was created by this call.
    pub(crate) fn get_or_insert_with<F>(&mut self, key: K, default: F) -> (&mut V, bool)
    where
        F: FnOnce() -> V,
    {
        let (index, inserted) = match self.index_of(&key) {
            Some(i) => (i, false),
            None => {
                self.pairs.push((key, default()));
                (self.pairs.len() - 1, true)
            }
        };
        (&mut self.pairs[index].1, inserted)
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let index = self.index_of(key).ok_or(ContainerError::KeyNotFound)?;
        Ok(self.pairs.swap_remove(index).1)
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.index_of(key).is_some()
    }
}

/// Generic key/value map over an array of bucket dictionaries.
///
/// Keys compare by value (`Eq`). `Option<K>` keys give the "null key"
/// behaviour: `None` is one ordinary, distinguishable key. Iteration order is
/// unspecified and may change whenever the table resizes.
#[derive(Clone)]
pub struct HashDictionary<K, V, S = FxBuildHasher> {
    chains: Vec<ArrayDictionary<K, V>>,
    len: usize,
    hash_builder: S,
}

impl<K, V> HashDictionary<K, V, FxBuildHasher> {
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    pub fn with_buckets(buckets: usize) -> Self {
        Self::with_buckets_and_hasher(buckets, FxBuildHasher)
    }
}

impl<K, V, S> HashDictionary<K, V, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_buckets_and_hasher(DEFAULT_BUCKETS, hash_builder)
    }

    pub fn with_buckets_and_hasher(buckets: usize, hash_builder: S) -> Self {
        Self {
            chains: empty_chains(buckets.max(1)),
            len: 0,
            hash_builder,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.chains.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.chains.len() as f64
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            chains: self.chains.iter(),
            current: (&[]).iter(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<K, V, S> HashDictionary<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn bucket_for<Q>(hash_builder: &S, key: &Q, buckets: usize) -> usize
    where
        Q: Hash + ?Sized,
    {
        let hash = hash_builder.hash_one(key);
        (hash.wrapping_mul(HASH_MULTIPLIER) % buckets as u64) as usize
    }

    fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        Self::bucket_for(&self.hash_builder, key, self.chains.len())
    }

    fn grow_if_needed(&mut self) {
        if self.load_factor() <= LOAD_FACTOR {
            return;
        }
        let old_buckets = self.chains.len();
        let buckets = old_buckets * 2 + 1;
        let mut chains = empty_chains(buckets);
        for chain in std::mem::take(&mut self.chains) {
            for (key, value) in chain.into_pairs() {
                let index = Self::bucket_for(&self.hash_builder, &key, buckets);
                chains[index].push_new(key, value);
            }
        }
        self.chains = chains;
        tracing::debug!(from = old_buckets, to = buckets, len = self.len, "rehashed dictionary");
    }

    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.chains[self.bucket_of(key)].get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_of(key);
        self.chains[index].get_mut(key)
    }

    /// Inserts `key -> value`, overwriting any existing mapping. Returns the
    /// value that was replaced.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.grow_if_needed();
        let index = self.bucket_of(&key);
        let previous = self.chains[index].put(key, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Returns the value for `key`, inserting `default()` first when absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.grow_if_needed();
        let index = self.bucket_of(&key);
        let (value, inserted) = self.chains[index].get_or_insert_with(key, default);
        if inserted {
            self.len += 1;
        }
        value
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_of(key);
        let value = self.chains[index].remove(key)?;
        self.len -= 1;
        Ok(value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        !self.is_empty() && self.chains[self.bucket_of(key)].contains_key(key)
    }
}

fn empty_chains<K, V>(buckets: usize) -> Vec<ArrayDictionary<K, V>> {
    (0..buckets).map(|_| ArrayDictionary::new()).collect()
}

impl<K, V, S: Default> Default for HashDictionary<K, V, S> {
    fn default() -> Self {
        Self::with_buckets_and_hasher(DEFAULT_BUCKETS, S::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashDictionary<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashDictionary<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::default();
        dict.extend(iter);
        dict
    }
}

impl<K, V, S> Extend<(K, V)> for HashDictionary<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

/// Borrowing iterator over every `(key, value)` pair.
pub struct Iter<'a, K, V> {
    chains: std::slice::Iter<'a, ArrayDictionary<K, V>>,
    current: std::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, value)) = self.current.next() {
                self.remaining -= 1;
                return Some((key, value));
            }
            self.current = self.chains.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Owning iterator; drains bucket by bucket.
pub struct IntoIter<K, V> {
    chains: std::vec::IntoIter<ArrayDictionary<K, V>>,
    current: std::vec::IntoIter<(K, V)>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.current.next() {
                self.remaining -= 1;
                return Some(pair);
            }
            self.current = self.chains.next()?.into_pairs().into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<'a, K, V, S> IntoIterator for &'a HashDictionary<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for HashDictionary<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            chains: self.chains.into_iter(),
            current: Vec::new().into_iter(),
            remaining: self.len,
        }
    }
}
