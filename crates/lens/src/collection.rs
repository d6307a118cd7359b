//! Collection lenses.
//!
//! Lenses focusing on elements of sequences and maps. They follow the same
//! get/set contract as any other lens, with these absence rules:
//!
//! - reading a missing index or key yields `None`;
//! - setting `Some(v)` at an index past the end extends the vector by
//!   repeating `v` until the index is reachable;
//! - setting `None` removes the element (a no-op when it is missing).

use crate::lens::Lens;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use core::ops::Range;

/// Focuses on element `index` of a vector.
///
/// # Example
///
/// ```rust
/// use conduit_lens::index;
///
/// let lens = index(5);
/// let grown = lens.set(vec!['a', 'b'], Some('z'));
/// assert_eq!(grown, vec!['a', 'b', 'z', 'z', 'z', 'z']);
/// assert_eq!(index::<char>(10).get(&grown), None);
/// ```
pub fn index<T: Clone + 'static>(index: usize) -> Lens<Vec<T>, Option<T>> {
    Lens::new(
        move |v: &Vec<T>| v.get(index).cloned(),
        move |mut v: Vec<T>, part: Option<T>| {
            match part {
                Some(value) if index < v.len() => v[index] = value,
                Some(value) => {
                    if let Some(len) = index.checked_add(1) {
                        v.resize(len, value);
                    }
                }
                None if index < v.len() => {
                    v.remove(index);
                }
                None => {}
            }
            v
        },
    )
}

/// Focuses on element `index` of an optional vector.
///
/// This is [`index`] made total over an absent collection: reading a `None`
/// whole yields `None`, and setting onto a `None` whole leaves it `None`.
pub fn at<T: Clone + 'static>(index: usize) -> Lens<Option<Vec<T>>, Option<T>> {
    let element = self::index(index);
    let setter = element.clone();
    Lens::new(
        move |whole: &Option<Vec<T>>| whole.as_ref().and_then(|v| element.get(v)),
        move |whole: Option<Vec<T>>, part: Option<T>| whole.map(|v| setter.set(v, part)),
    )
}

/// Focuses on a contiguous range of a vector.
///
/// The range is clamped to the vector's bounds on every access. Setting
/// splices the new elements in place of the clamped range, so the vector
/// grows or shrinks when the lengths differ.
pub fn range<T: Clone + 'static>(range: Range<usize>) -> Lens<Vec<T>, Vec<T>> {
    let read = range.clone();
    Lens::new(
        move |v: &Vec<T>| v[clamp(&read, v.len())].to_vec(),
        move |mut v: Vec<T>, part: Vec<T>| {
            let target = clamp(&range, v.len());
            v.splice(target, part).for_each(drop);
            v
        },
    )
}

fn clamp(range: &Range<usize>, len: usize) -> Range<usize> {
    let start = range.start.min(len);
    let end = range.end.max(start).min(len);
    start..end
}

/// A map-like collection addressable by key.
pub trait KeyedCollection {
    /// Key type.
    type Key;
    /// Value type.
    type Value;

    /// Returns a copy of the value stored under `key`.
    fn lookup(&self, key: &Self::Key) -> Option<Self::Value>;

    /// Stores `value` under `key`, replacing any previous value.
    fn store(&mut self, key: Self::Key, value: Self::Value);

    /// Removes the value stored under `key`, if any.
    fn evict(&mut self, key: &Self::Key);
}

impl<K, V, S> KeyedCollection for hashbrown::HashMap<K, V, S>
where
    K: Eq + Hash,
    V: Clone,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }

    fn store(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn evict(&mut self, key: &K) {
        self.remove(key);
    }
}

impl<K: Ord, V: Clone> KeyedCollection for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }

    fn store(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn evict(&mut self, key: &K) {
        self.remove(key);
    }
}

/// Focuses on the value stored under `key`.
///
/// Setting `None` removes the key.
pub fn key<M>(key: M::Key) -> Lens<M, Option<M::Value>>
where
    M: KeyedCollection + 'static,
    M::Key: Clone + 'static,
    M::Value: 'static,
{
    let read = key.clone();
    Lens::new(
        move |m: &M| m.lookup(&read),
        move |mut m: M, part: Option<M::Value>| {
            match part {
                Some(value) => m.store(key.clone(), value),
                None => m.evict(&key),
            }
            m
        },
    )
}

/// Replaces an absent value with `template` when reading.
///
/// Writing always stores a present value. The lens laws hold for present
/// wholes; reading then writing back an absent whole materializes the
/// template.
pub fn coalesce<T: Clone + 'static>(template: T) -> Lens<Option<T>, T> {
    Lens::new(
        move |whole: &Option<T>| whole.clone().unwrap_or_else(|| template.clone()),
        |_, part: T| Some(part),
    )
}
