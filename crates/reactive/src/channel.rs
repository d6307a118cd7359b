//! Channel implementation.
//!
//! A `Channel<S, P>` pairs a source `S` with a subscription function that
//! registers a receiver of `P` values and returns a [`Receipt`]. Channels are
//! immutable: `map`, `filter` and the combinators build new channels whose
//! subscription functions wrap the parent's.

use alloc::rc::Rc;
use conduit_core::{Callback, Pulse, Receipt, Source, StateSource};
use core::fmt;

/// Subscription function shared by a channel and its clones.
pub(crate) type Reception<P> = Rc<dyn Fn(Callback<P>) -> Receipt>;

/// A composable, typed pipeline from a source to its receivers.
///
/// Subscribing to a channel backed by a current value primes the receiver:
/// it is invoked once, synchronously, before `subscribe` returns.
///
/// # Example
///
/// ```rust
/// use conduit_reactive::Transceiver;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let count = Transceiver::new(1);
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let seen_clone = seen.clone();
/// let receipt = count
///     .channel()
///     .map(|pulse| pulse.new * 10)
///     .filter(|v| *v > 10)
///     .subscribe(move |v| seen_clone.borrow_mut().push(v));
///
/// count.set(2);
/// receipt.cancel();
/// count.set(3);
///
/// // The primed value 10 failed the filter
/// assert_eq!(*seen.borrow(), vec![20]);
/// ```
pub struct Channel<S, P> {
    pub(crate) source: S,
    pub(crate) reception: Reception<P>,
}

impl<S: Clone, P> Clone for Channel<S, P> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            reception: Rc::clone(&self.reception),
        }
    }
}

impl<S: fmt::Debug, P> fmt::Debug for Channel<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("source", &self.source)
            .field("pulse", &core::any::type_name::<P>())
            .finish()
    }
}

impl<S, P: 'static> Channel<S, P> {
    /// Creates a channel from a source and a subscription function.
    ///
    /// The subscription function receives each new receiver and must return
    /// a receipt that detaches it. Value-backed sources are expected to prime
    /// the receiver before returning.
    pub fn new<F>(source: S, reception: F) -> Self
    where
        F: Fn(Callback<P>) -> Receipt + 'static,
    {
        Self {
            source,
            reception: Rc::new(reception),
        }
    }

    /// Returns the channel's source.
    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Subscribes a receiver.
    ///
    /// The receiver is primed with the current value (if the source has one)
    /// before this returns. Cancelling the returned receipt detaches it.
    pub fn subscribe<F>(&self, receiver: F) -> Receipt
    where
        F: Fn(P) + 'static,
    {
        (self.reception)(Rc::new(receiver))
    }

    /// Subscribes an already shared receiver.
    pub fn subscribe_shared(&self, receiver: Callback<P>) -> Receipt {
        (self.reception)(receiver)
    }

    /// Returns a channel with the same subscription function over a
    /// different source.
    pub fn rebind<S2>(&self, source: S2) -> Channel<S2, P> {
        Channel {
            source,
            reception: Rc::clone(&self.reception),
        }
    }
}

impl<S: Clone, P: 'static> Channel<S, P> {
    /// Transforms every delivered value.
    pub fn map<Q, F>(&self, transform: F) -> Channel<S, Q>
    where
        Q: 'static,
        F: Fn(P) -> Q + 'static,
    {
        let parent = Rc::clone(&self.reception);
        let transform = Rc::new(transform);
        Channel::new(self.source.clone(), move |receiver: Callback<Q>| {
            let transform = Rc::clone(&transform);
            parent(Rc::new(move |value: P| receiver(transform(value))))
        })
    }

    /// Suppresses values failing `predicate`.
    ///
    /// This applies to the priming value too: a subscriber whose primed value
    /// fails the predicate receives no initial delivery.
    pub fn filter<F>(&self, predicate: F) -> Channel<S, P>
    where
        F: Fn(&P) -> bool + 'static,
    {
        let parent = Rc::clone(&self.reception);
        let predicate = Rc::new(predicate);
        Channel::new(self.source.clone(), move |receiver: Callback<P>| {
            let predicate = Rc::clone(&predicate);
            parent(Rc::new(move |value: P| {
                if predicate(&value) {
                    receiver(value)
                }
            }))
        })
    }
}

impl<S: Clone, T: 'static> Channel<S, Pulse<T>> {
    /// Maps each pulse to its new value.
    pub fn values(&self) -> Channel<S, T> {
        self.map(Pulse::into_value)
    }

    /// Drops pulses whose new value equals the old one.
    ///
    /// Priming pulses always pass.
    pub fn sieve(&self) -> Channel<S, Pulse<T>>
    where
        T: PartialEq,
    {
        self.filter(Pulse::is_changed)
    }
}

impl<S: Source, P> Channel<S, P> {
    /// Reads the source's current value.
    #[inline]
    pub fn get(&self) -> S::Value {
        self.source.get()
    }
}

impl<S: StateSource, P> Channel<S, P> {
    /// Writes a new value to the source, notifying its receivers.
    #[inline]
    pub fn set(&self, value: S::Value) {
        self.source.set(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transceiver::Transceiver;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    fn record<T: 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(T) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        (log, move |v: T| log_clone.borrow_mut().push(v))
    }

    #[test]
    fn test_subscribe_primes_once() {
        let source = Transceiver::new(5);
        let (log, receiver) = record();

        let _receipt = source.channel().subscribe(receiver);

        assert_eq!(*log.borrow(), vec![Pulse::prime(5)]);
    }

    #[test]
    fn test_subscribe_receives_changes() {
        let source = Transceiver::new(1);
        let (log, receiver) = record();

        let _receipt = source.channel().subscribe(receiver);
        source.set(2);
        source.set(3);

        assert_eq!(
            *log.borrow(),
            vec![Pulse::prime(1), Pulse::change(1, 2), Pulse::change(2, 3)]
        );
    }

    #[test]
    fn test_map() {
        let source = Transceiver::new(2);
        let (log, receiver) = record();

        let _receipt = source.channel().map(|p| p.new * p.new).subscribe(receiver);
        source.set(3);

        assert_eq!(*log.borrow(), vec![4, 9]);
    }

    #[test]
    fn test_filter_swallows_priming() {
        let source = Transceiver::new(1);
        let (log, receiver) = record();

        let _receipt = source
            .channel()
            .values()
            .filter(|v| v % 2 == 0)
            .subscribe(receiver);
        assert!(log.borrow().is_empty());

        source.set(2);
        source.set(3);
        source.set(4);

        assert_eq!(*log.borrow(), vec![2, 4]);
    }

    #[test]
    fn test_sieve() {
        let source = Transceiver::new(1);
        let (log, receiver) = record();

        let _receipt = source.channel().sieve().values().subscribe(receiver);
        source.set(1);
        source.set(2);
        source.set(2);

        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_map_chain_is_independent() {
        let source = Transceiver::new(1);
        let base = source.channel().values();
        let doubled = base.map(|v| v * 2);

        let (base_log, base_receiver) = record();
        let (doubled_log, doubled_receiver) = record();
        let _r1 = base.subscribe(base_receiver);
        let _r2 = doubled.subscribe(doubled_receiver);

        source.set(4);

        assert_eq!(*base_log.borrow(), vec![1, 4]);
        assert_eq!(*doubled_log.borrow(), vec![2, 8]);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let source = Transceiver::new(0);
        let (log, receiver) = record();

        let receipt = source.channel().values().subscribe(receiver);
        receipt.cancel();
        receipt.cancel();
        source.set(1);

        assert_eq!(*log.borrow(), vec![0]);
        assert_eq!(source.receivers(), 0);
    }

    #[test]
    fn test_request_reprimes_through_map() {
        let source = Transceiver::new(3);
        let (log, receiver) = record();

        let receipt = source.channel().map(|p| (p.old, p.new)).subscribe(receiver);
        source.set(4);
        receipt.request();

        assert_eq!(*log.borrow(), vec![(None, 3), (Some(3), 4), (None, 4)]);
    }

    #[test]
    fn test_channel_get_set() {
        let channel = Transceiver::new(7).channel();
        let calls = Rc::new(Cell::new(0));

        let calls_clone = calls.clone();
        let _receipt = channel.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));
        channel.set(8);

        assert_eq!(channel.get(), 8);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_rebind_keeps_subscription() {
        let source = Transceiver::new(1);
        let rebound = source.channel().rebind(());
        let (log, receiver) = record();

        let _receipt = rebound.subscribe(receiver);
        source.set(2);

        assert_eq!(log.borrow().len(), 2);
    }
}
