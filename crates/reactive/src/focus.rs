//! Lens-focused channels.
//!
//! Focusing a channel through a [`Lens`] yields a channel over a part of the
//! parent's value. The focused channel is backed by a [`LensSource`], which
//! reads through the lens and writes by rebuilding the whole parent value.

use crate::channel::Channel;
use alloc::vec::Vec;
use conduit_core::{Pulse, Source, StateSource};
use conduit_lens::{at, coalesce, index, key, range, KeyedCollection, Lens};
use core::fmt;
use core::ops::Range;

/// A source derived from a parent channel through a lens.
///
/// Every write replaces the entire parent value, so receivers of the parent
/// and of sibling focuses observe it.
pub struct LensSource<S: Source, X> {
    parent: Channel<S, Pulse<S::Value>>,
    lens: Lens<S::Value, X>,
}

impl<S: Source + Clone, X> Clone for LensSource<S, X> {
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            lens: self.lens.clone(),
        }
    }
}

impl<S: Source + fmt::Debug, X> fmt::Debug for LensSource<S, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LensSource")
            .field("parent", &self.parent)
            .field("lens", &self.lens)
            .finish()
    }
}

impl<S: Source, X> LensSource<S, X> {
    /// Returns the channel this source was focused from.
    #[inline]
    pub fn parent(&self) -> &Channel<S, Pulse<S::Value>> {
        &self.parent
    }

    /// Returns the focusing lens.
    #[inline]
    pub fn lens(&self) -> &Lens<S::Value, X> {
        &self.lens
    }
}

impl<S, X> Source for LensSource<S, X>
where
    S: Source,
    S::Value: 'static,
    X: 'static,
{
    type Value = X;

    fn get(&self) -> X {
        self.lens.get(&self.parent.get())
    }
}

impl<S, X> StateSource for LensSource<S, X>
where
    S: StateSource,
    S::Value: 'static,
    X: 'static,
{
    fn set(&self, value: X) {
        let whole = self.lens.set(self.parent.get(), value);
        self.parent.set(whole);
    }
}

impl<S> Channel<S, Pulse<S::Value>>
where
    S: Source + Clone + 'static,
    S::Value: 'static,
{
    /// Focuses this channel onto a part of its value.
    ///
    /// Delivered pulses carry the focused part of both the old and the new
    /// parent value. Reading and writing the returned channel goes through
    /// the lens.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conduit_reactive::{field_lens, Lens, Transceiver};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let point = Transceiver::new(Point { x: 1, y: 2 });
    /// let x: Lens<Point, i32> = field_lens!(Point, x);
    /// let x_channel = point.channel().focus(x);
    ///
    /// x_channel.set(10);
    /// assert_eq!(point.get(), Point { x: 10, y: 2 });
    /// assert_eq!(x_channel.get(), 10);
    /// ```
    pub fn focus<X: 'static>(
        &self,
        lens: Lens<S::Value, X>,
    ) -> Channel<LensSource<S, X>, Pulse<X>> {
        let getter = lens.clone();
        let focused =
            self.map(move |pulse: Pulse<S::Value>| pulse.map_ref(|whole| getter.get(whole)));
        focused.rebind(LensSource {
            parent: self.clone(),
            lens,
        })
    }
}

impl<S, T> Channel<S, Pulse<Vec<T>>>
where
    S: Source<Value = Vec<T>> + Clone + 'static,
    T: Clone + 'static,
{
    /// Focuses on element `i`; see [`conduit_lens::index`].
    pub fn index(&self, i: usize) -> Channel<LensSource<S, Option<T>>, Pulse<Option<T>>> {
        self.focus(index(i))
    }

    /// Focuses on a contiguous range; see [`conduit_lens::range`].
    pub fn range(&self, r: Range<usize>) -> Channel<LensSource<S, Vec<T>>, Pulse<Vec<T>>> {
        self.focus(range(r))
    }
}

impl<S, T> Channel<S, Pulse<Option<Vec<T>>>>
where
    S: Source<Value = Option<Vec<T>>> + Clone + 'static,
    T: Clone + 'static,
{
    /// Focuses on element `i` of an optional vector.
    pub fn at(&self, i: usize) -> Channel<LensSource<S, Option<T>>, Pulse<Option<T>>> {
        self.focus(at(i))
    }
}

impl<S, T> Channel<S, Pulse<Option<T>>>
where
    S: Source<Value = Option<T>> + Clone + 'static,
    T: Clone + 'static,
{
    /// Focuses on the value, reading `template` while it is absent.
    pub fn coalesce(&self, template: T) -> Channel<LensSource<S, T>, Pulse<T>> {
        self.focus(coalesce(template))
    }
}

impl<S, M> Channel<S, Pulse<M>>
where
    S: Source<Value = M> + Clone + 'static,
    M: KeyedCollection + 'static,
    M::Key: Clone + 'static,
    M::Value: 'static,
{
    /// Focuses on the entry stored under `k`.
    pub fn key(
        &self,
        k: M::Key,
    ) -> Channel<LensSource<S, Option<M::Value>>, Pulse<Option<M::Value>>> {
        self.focus(key(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transceiver::Transceiver;
    use alloc::collections::BTreeMap;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use conduit_lens::field_lens;
    use core::cell::RefCell;

    #[derive(Clone, Debug, PartialEq)]
    struct Profile {
        name: String,
        scores: Vec<u32>,
    }

    fn profile() -> Transceiver<Profile> {
        Transceiver::new(Profile {
            name: String::from("ada"),
            scores: vec![1, 2],
        })
    }

    #[test]
    fn test_focus_get_set_round_trip() {
        let source = profile();
        let name = source.channel().focus(field_lens!(Profile, name));

        assert_eq!(name.get(), "ada");
        name.set(String::from("grace"));

        assert_eq!(source.get().name, "grace");
        assert_eq!(source.get().scores, vec![1, 2]);
    }

    #[test]
    fn test_focus_delivers_focused_pulses() {
        let source = profile();
        let log = Rc::new(RefCell::new(Vec::new()));

        let log_clone = log.clone();
        let _receipt = source
            .channel()
            .focus(field_lens!(Profile, scores))
            .subscribe(move |p: Pulse<Vec<u32>>| log_clone.borrow_mut().push(p));

        source.modify(|p| p.scores.push(3));

        assert_eq!(
            *log.borrow(),
            vec![Pulse::prime(vec![1, 2]), Pulse::change(vec![1, 2], vec![1, 2, 3])]
        );
    }

    #[test]
    fn test_nested_focus_writes_whole_parent() {
        let source = profile();
        let parent_log = Rc::new(RefCell::new(Vec::new()));

        let parent_clone = parent_log.clone();
        let _receipt = source
            .channel()
            .values()
            .subscribe(move |p: Profile| parent_clone.borrow_mut().push(p.scores));

        let second = source
            .channel()
            .focus(field_lens!(Profile, scores))
            .index(1);
        second.set(Some(20));

        assert_eq!(source.get().scores, vec![1, 20]);
        assert_eq!(*parent_log.borrow(), vec![vec![1, 2], vec![1, 20]]);
    }

    #[test]
    fn test_index_channel_fills_past_end() {
        let source = Transceiver::new(vec!['a']);
        let slot = source.channel().index(3);

        assert_eq!(slot.get(), None);
        slot.set(Some('z'));
        assert_eq!(source.get(), vec!['a', 'z', 'z', 'z']);

        slot.set(None);
        assert_eq!(source.get(), vec!['a', 'z', 'z']);
    }

    #[test]
    fn test_range_channel() {
        let source = Transceiver::new(vec![1, 2, 3, 4]);
        let middle = source.channel().range(1..3);

        assert_eq!(middle.get(), vec![2, 3]);
        middle.set(vec![9]);
        assert_eq!(source.get(), vec![1, 9, 4]);
    }

    #[test]
    fn test_at_channel_absent() {
        let source: Transceiver<Option<Vec<i32>>> = Transceiver::new(None);
        let first = source.channel().at(0);

        assert_eq!(first.get(), None);
        first.set(Some(1));
        assert_eq!(source.get(), None);
    }

    #[test]
    fn test_key_channel() {
        let source: Transceiver<BTreeMap<&str, u8>> = Transceiver::new(BTreeMap::new());
        let entry = source.channel().key("volume");

        entry.set(Some(7));
        assert_eq!(source.get().get("volume"), Some(&7));

        entry.set(None);
        assert!(source.get().is_empty());
    }

    #[test]
    fn test_coalesce_channel() {
        let source: Transceiver<Option<u8>> = Transceiver::new(None);
        let level = source.channel().coalesce(5);

        assert_eq!(level.get(), 5);
        level.set(6);
        assert_eq!(source.get(), Some(6));
    }
}
