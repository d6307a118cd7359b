//! Binary channel combinators.
//!
//! - `either`: forwards each side as it arrives, tagged by origin
//! - `combine`: pairs each arrival with the other side's latest value
//! - `zip`: pairs arrivals first-in first-out
//!
//! Each subscription to a combined channel subscribes to both parents and
//! owns its own combinator state, so independent subscribers never share
//! caches or queues. Cancelling the returned receipt cancels both parent
//! subscriptions.

use crate::channel::Channel;
use crate::one_of::OneOf2;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use conduit_core::{Callback, Receipt, ZipConfig};
use core::cell::RefCell;

/// Latest value seen on each side of a `combine`.
struct Latest<P, P2> {
    left: Option<P>,
    right: Option<P2>,
}

/// Pending values on each side of a `zip`.
struct ZipQueues<P, P2> {
    left: VecDeque<P>,
    right: VecDeque<P2>,
    capacity: Option<usize>,
}

impl<P, P2> ZipQueues<P, P2> {
    fn new(config: ZipConfig) -> Self {
        Self {
            left: VecDeque::new(),
            right: VecDeque::new(),
            capacity: config.capacity,
        }
    }

    /// Removes every complete pair, oldest first.
    fn drain_pairs(&mut self) -> Vec<(P, P2)> {
        let count = self.left.len().min(self.right.len());
        self.left
            .drain(..count)
            .zip(self.right.drain(..count))
            .collect()
    }
}

/// Appends `value`, dropping the oldest element first if the queue is full.
fn push_bounded<T>(queue: &mut VecDeque<T>, value: T, capacity: Option<usize>) {
    if let Some(capacity) = capacity {
        if queue.len() >= capacity {
            queue.pop_front();
            tracing::debug!(capacity, "zip queue full, dropped oldest");
        }
    }
    queue.push_back(value);
}

impl<S: Clone + 'static, P: 'static> Channel<S, P> {
    /// Merges two channels into one carrying values of either.
    ///
    /// Nothing is cached or dropped: every value from either side is
    /// forwarded immediately, in arrival order.
    pub fn either<S2, P2>(&self, other: &Channel<S2, P2>) -> Channel<(S, S2), OneOf2<P, P2>>
    where
        S2: Clone + 'static,
        P2: 'static,
    {
        let left = Rc::clone(&self.reception);
        let right = Rc::clone(&other.reception);
        let source = (self.source.clone(), other.source.clone());

        Channel::new(source, move |receiver: Callback<OneOf2<P, P2>>| {
            let on_left = Rc::clone(&receiver);
            let left_receipt = left(Rc::new(move |value: P| on_left(OneOf2::V1(value))));
            let right_receipt = right(Rc::new(move |value: P2| receiver(OneOf2::V2(value))));
            Receipt::merge([left_receipt, right_receipt])
        })
    }

    /// Merges two channels into one carrying their latest values as a pair.
    ///
    /// Nothing is emitted until both sides have delivered at least once.
    /// After that, each arrival is emitted together with the last value
    /// from the other side.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conduit_reactive::Transceiver;
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// let width = Transceiver::new(2);
    /// let height = Transceiver::new(3);
    /// let areas = Rc::new(RefCell::new(Vec::new()));
    ///
    /// let areas_clone = areas.clone();
    /// let _receipt = width
    ///     .channel()
    ///     .values()
    ///     .combine(&height.channel().values())
    ///     .subscribe(move |(w, h)| areas_clone.borrow_mut().push(w * h));
    ///
    /// height.set(4);
    /// assert_eq!(*areas.borrow(), vec![6, 8]);
    /// ```
    pub fn combine<S2, P2>(&self, other: &Channel<S2, P2>) -> Channel<(S, S2), (P, P2)>
    where
        P: Clone,
        S2: Clone + 'static,
        P2: Clone + 'static,
    {
        let left = Rc::clone(&self.reception);
        let right = Rc::clone(&other.reception);
        let source = (self.source.clone(), other.source.clone());

        Channel::new(source, move |receiver: Callback<(P, P2)>| {
            let latest = Rc::new(RefCell::new(Latest {
                left: None,
                right: None,
            }));

            let state = Rc::clone(&latest);
            let on_left = Rc::clone(&receiver);
            let left_receipt = left(Rc::new(move |value: P| {
                let pair = {
                    let mut latest = state.borrow_mut();
                    latest.left = Some(value.clone());
                    latest.right.clone().map(|r| (value, r))
                };
                if let Some(pair) = pair {
                    on_left(pair);
                }
            }));

            let state = Rc::clone(&latest);
            let right_receipt = right(Rc::new(move |value: P2| {
                let pair = {
                    let mut latest = state.borrow_mut();
                    latest.right = Some(value.clone());
                    latest.left.clone().map(|l| (l, value))
                };
                if let Some(pair) = pair {
                    receiver(pair);
                }
            }));

            Receipt::merge([left_receipt, right_receipt])
        })
    }

    /// Merges two channels by pairing their values in arrival order.
    ///
    /// The n-th value of one side is paired with the n-th value of the
    /// other. Queues are unbounded; see [`Channel::zip_with`].
    pub fn zip<S2, P2>(&self, other: &Channel<S2, P2>) -> Channel<(S, S2), (P, P2)>
    where
        S2: Clone + 'static,
        P2: 'static,
    {
        self.zip_with(other, ZipConfig::unbounded())
    }

    /// Like [`Channel::zip`], with configured queue capacity.
    ///
    /// When a side's queue is full, its oldest pending value is dropped to
    /// make room, so a fast side can no longer pair with stale values.
    pub fn zip_with<S2, P2>(
        &self,
        other: &Channel<S2, P2>,
        config: ZipConfig,
    ) -> Channel<(S, S2), (P, P2)>
    where
        S2: Clone + 'static,
        P2: 'static,
    {
        let left = Rc::clone(&self.reception);
        let right = Rc::clone(&other.reception);
        let source = (self.source.clone(), other.source.clone());

        Channel::new(source, move |receiver: Callback<(P, P2)>| {
            let queues = Rc::new(RefCell::new(ZipQueues::new(config)));

            let state = Rc::clone(&queues);
            let on_left = Rc::clone(&receiver);
            let left_receipt = left(Rc::new(move |value: P| {
                let pairs = {
                    let mut queues = state.borrow_mut();
                    let capacity = queues.capacity;
                    push_bounded(&mut queues.left, value, capacity);
                    queues.drain_pairs()
                };
                for pair in pairs {
                    on_left(pair);
                }
            }));

            let state = Rc::clone(&queues);
            let right_receipt = right(Rc::new(move |value: P2| {
                let pairs = {
                    let mut queues = state.borrow_mut();
                    let capacity = queues.capacity;
                    push_bounded(&mut queues.right, value, capacity);
                    queues.drain_pairs()
                };
                for pair in pairs {
                    receiver(pair);
                }
            }));

            Receipt::merge([left_receipt, right_receipt])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::Emitter;
    use crate::transceiver::Transceiver;
    use alloc::vec;
    use conduit_core::Pulse;

    fn record<T: 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(T) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        (log, move |v: T| log_clone.borrow_mut().push(v))
    }

    #[test]
    fn test_drain_pairs_leaves_surplus_queued() {
        let mut queues = ZipQueues::new(ZipConfig::unbounded());
        queues.left.extend([1, 2, 3]);
        queues.right.extend(['a']);

        assert_eq!(queues.drain_pairs(), vec![(1, 'a')]);
        assert_eq!(queues.left, [2, 3]);
        assert!(queues.right.is_empty());
    }

    #[test]
    fn test_either_forwards_in_order() {
        let a = Emitter::new();
        let b = Emitter::new();
        let (log, receiver) = record();

        let _receipt = a.channel().either(&b.channel()).subscribe(receiver);
        a.emit(1);
        b.emit('x');
        a.emit(2);

        assert_eq!(
            *log.borrow(),
            vec![OneOf2::V1(1), OneOf2::V2('x'), OneOf2::V1(2)]
        );
    }

    #[test]
    fn test_combine_waits_for_both_sides() {
        let a = Emitter::new();
        let b = Emitter::new();
        let (log, receiver) = record();

        let _receipt = a.channel().combine(&b.channel()).subscribe(receiver);
        a.emit(1);
        a.emit(2);
        assert!(log.borrow().is_empty());

        b.emit('x');
        a.emit(3);
        b.emit('y');

        assert_eq!(*log.borrow(), vec![(2, 'x'), (3, 'x'), (3, 'y')]);
    }

    #[test]
    fn test_combine_primes_from_both_transceivers() {
        let a = Transceiver::new(1);
        let b = Transceiver::new(10);
        let (log, receiver) = record();

        let _receipt = a
            .channel()
            .values()
            .combine(&b.channel().values())
            .subscribe(receiver);
        a.set(2);

        assert_eq!(*log.borrow(), vec![(1, 10), (2, 10)]);
    }

    #[test]
    fn test_zip_pairs_in_order() {
        let a = Emitter::new();
        let b = Emitter::new();
        let (log, receiver) = record();

        let _receipt = a.channel().zip(&b.channel()).subscribe(receiver);
        a.emit(1);
        a.emit(2);
        a.emit(3);
        b.emit('x');
        b.emit('y');

        assert_eq!(*log.borrow(), vec![(1, 'x'), (2, 'y')]);
    }

    #[test]
    fn test_zip_with_capacity_drops_oldest() {
        let a = Emitter::new();
        let b = Emitter::new();
        let (log, receiver) = record();

        let config = ZipConfig::bounded(2).unwrap();
        let _receipt = a.channel().zip_with(&b.channel(), config).subscribe(receiver);
        a.emit(1);
        a.emit(2);
        a.emit(3);
        b.emit('x');
        b.emit('y');
        b.emit('z');

        assert_eq!(*log.borrow(), vec![(2, 'x'), (3, 'y')]);
    }

    #[test]
    fn test_combined_receipt_cancels_both_sides() {
        let a = Transceiver::new(0);
        let b = Transceiver::new(0);
        let (log, receiver) = record();

        let receipt = a.channel().either(&b.channel()).subscribe(receiver);
        assert_eq!(a.receivers(), 1);
        assert_eq!(b.receivers(), 1);

        receipt.cancel();
        a.set(1);
        b.set(1);

        assert_eq!(a.receivers(), 0);
        assert_eq!(b.receivers(), 0);
        assert_eq!(
            *log.borrow(),
            vec![OneOf2::V1(Pulse::prime(0)), OneOf2::V2(Pulse::prime(0))]
        );
    }

    #[test]
    fn test_subscribers_have_independent_state() {
        let a = Emitter::new();
        let b = Emitter::new();
        let zipped = a.channel().zip(&b.channel());

        let (first, first_receiver) = record();
        let _r1 = zipped.subscribe(first_receiver);
        a.emit(1);

        let (second, second_receiver) = record();
        let _r2 = zipped.subscribe(second_receiver);
        b.emit('x');

        assert_eq!(*first.borrow(), vec![(1, 'x')]);
        assert!(second.borrow().is_empty());
    }

    #[test]
    fn test_combine_reentrant_write_does_not_panic() {
        let a = Transceiver::new(0);
        let b = Transceiver::new(0);
        let (log, receiver) = record();

        let _receipt = a.channel().values().subscribe(receiver);
        let writer = a.clone();
        let _feedback = a
            .channel()
            .values()
            .combine(&b.channel().values())
            .subscribe(move |(x, y): (i32, i32)| {
                if x < 3 && y == 1 {
                    writer.set(x + 1);
                }
            });

        b.set(1);

        assert_eq!(a.get(), 3);
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
    }
}
