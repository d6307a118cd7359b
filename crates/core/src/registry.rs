//! Receiver registry for channel sources.
//!
//! This module provides receiver IDs and a registry that tracks the
//! callbacks subscribed to one source and broadcasts pulses to them.

use crate::config::RegistryConfig;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

/// Unique identifier for a registered receiver.
pub type ReceiverId = u64;

/// Shared callback type for delivered values.
pub type Callback<P> = Rc<dyn Fn(P)>;

/// A registered receiver.
struct Receiver<P> {
    /// Unique identifier
    id: ReceiverId,
    /// Callback to invoke on delivery
    callback: Callback<P>,
    /// Cleared on removal; checked before every invocation
    active: Rc<Cell<bool>>,
}

/// Ordered collection of receiver callbacks for one source.
///
/// All methods take `&self`; the registry is meant to be embedded in an
/// `Rc`-shared source and driven from a single thread.
///
/// # Reentrancy
///
/// A callback may cause another delivery on the same registry (for example by
/// setting the source it is subscribed to). Such nested deliveries are
/// allowed up to [`RegistryConfig::max_depth`]; deeper ones are dropped and
/// counted in [`ReceiverRegistry::dropped`].
pub struct ReceiverRegistry<P> {
    /// Receivers in registration order
    receivers: RefCell<Vec<Receiver<P>>>,
    /// Next receiver ID to assign
    next_id: Cell<ReceiverId>,
    /// Number of `receive` calls currently on the stack
    depth: Cell<usize>,
    /// Deliveries dropped by the depth limit
    dropped: Cell<u64>,
    config: RegistryConfig,
}

impl<P> Default for ReceiverRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ReceiverRegistry<P> {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            receivers: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            depth: Cell::new(0),
            dropped: Cell::new(0),
            config,
        }
    }

    /// Registers a callback.
    ///
    /// Returns the receiver ID that can be used to remove it.
    pub fn add<F>(&self, callback: F) -> ReceiverId
    where
        F: Fn(P) + 'static,
    {
        self.add_shared(Rc::new(callback))
    }

    /// Registers an already shared callback.
    pub fn add_shared(&self, callback: Callback<P>) -> ReceiverId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        self.receivers.borrow_mut().push(Receiver {
            id,
            callback,
            active: Rc::new(Cell::new(true)),
        });
        tracing::trace!(receiver = id, "receiver added");

        id
    }

    /// Removes a receiver by ID.
    ///
    /// Returns true if the receiver was found and removed. A receiver removed
    /// while a delivery is in progress is not invoked by that delivery.
    pub fn remove(&self, id: ReceiverId) -> bool {
        let mut receivers = self.receivers.borrow_mut();
        match receivers.iter().position(|r| r.id == id) {
            Some(pos) => {
                let receiver = receivers.remove(pos);
                receiver.active.set(false);
                tracing::trace!(receiver = id, "receiver removed");
                true
            }
            None => false,
        }
    }

    /// Returns true if a receiver with the given ID is registered.
    pub fn contains(&self, id: ReceiverId) -> bool {
        self.receivers.borrow().iter().any(|r| r.id == id)
    }

    /// Returns the callback registered under `id`.
    pub fn get(&self, id: ReceiverId) -> Option<Callback<P>> {
        self.receivers
            .borrow()
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.callback.clone())
    }

    /// Returns the number of registered receivers.
    #[inline]
    pub fn len(&self) -> usize {
        self.receivers.borrow().len()
    }

    /// Returns true if there are no receivers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.receivers.borrow().is_empty()
    }

    /// Returns all receiver IDs in registration order.
    pub fn receiver_ids(&self) -> Vec<ReceiverId> {
        self.receivers.borrow().iter().map(|r| r.id).collect()
    }

    /// Removes all receivers.
    pub fn clear(&self) {
        for receiver in self.receivers.borrow_mut().drain(..) {
            receiver.active.set(false);
        }
    }

    /// Returns the current delivery nesting depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Returns how many deliveries the depth limit has dropped so far.
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped.get()
    }

    /// Returns the registry configuration.
    #[inline]
    pub fn config(&self) -> RegistryConfig {
        self.config
    }
}

impl<P: Clone> ReceiverRegistry<P> {
    /// Delivers a pulse to every registered receiver in registration order.
    ///
    /// The receiver list is snapshotted first, so callbacks may add or remove
    /// receivers freely. Receivers added during the delivery are not invoked
    /// by it.
    ///
    /// Returns false if the delivery was dropped by the depth limit.
    pub fn receive(&self, pulse: P) -> bool {
        let depth = self.depth.get();
        if depth >= self.config.max_depth {
            self.dropped.set(self.dropped.get() + 1);
            #[cfg(debug_assertions)]
            tracing::warn!(
                depth,
                max_depth = self.config.max_depth,
                dropped = self.dropped.get(),
                "delivery dropped: reentrancy limit reached"
            );
            return false;
        }

        let _guard = DepthGuard::enter(&self.depth);
        let snapshot: Vec<(Callback<P>, Rc<Cell<bool>>)> = self
            .receivers
            .borrow()
            .iter()
            .map(|r| (r.callback.clone(), r.active.clone()))
            .collect();

        for (callback, active) in snapshot {
            if active.get() {
                callback(pulse.clone());
            }
        }
        true
    }
}

impl<P> fmt::Debug for ReceiverRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiverRegistry")
            .field("receivers", &self.len())
            .field("depth", &self.depth.get())
            .field("dropped", &self.dropped.get())
            .field("config", &self.config)
            .finish()
    }
}

/// Decrements the depth counter when a delivery leaves the stack, including
/// by unwinding.
struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        Self { depth }
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}
