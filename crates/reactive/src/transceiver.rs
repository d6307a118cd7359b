//! In-memory two-way sources.
//!
//! A `Transceiver<T>` owns its value and its receiver registry outright. It
//! is the basis of stateful channels: reading returns the held value, writing
//! replaces it and broadcasts a [`Pulse`] to every receiver.

use crate::channel::Channel;
use alloc::rc::{Rc, Weak};
use conduit_core::{
    Callback, Pulse, Receipt, ReceiverRegistry, RegistryConfig, Source, StateSource,
};
use core::cell::RefCell;
use core::fmt;

struct TransceiverInner<T> {
    value: RefCell<T>,
    registry: ReceiverRegistry<Pulse<T>>,
}

/// A value cell that both emits its current value and accepts new ones.
///
/// Cloning a `Transceiver` creates a new handle to the **same** value.
pub struct Transceiver<T> {
    inner: Rc<TransceiverInner<T>>,
}

impl<T> Clone for Transceiver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Transceiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transceiver")
            .field("value", &self.inner.value.borrow())
            .field("registry", &self.inner.registry)
            .finish()
    }
}

impl<T: Clone + 'static> Transceiver<T> {
    /// Creates a transceiver holding `value`.
    pub fn new(value: T) -> Self {
        Self::with_config(value, RegistryConfig::default())
    }

    /// Creates a transceiver whose registry uses `config`.
    pub fn with_config(value: T, config: RegistryConfig) -> Self {
        Self {
            inner: Rc::new(TransceiverInner {
                value: RefCell::new(value),
                registry: ReceiverRegistry::with_config(config),
            }),
        }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Reads the current value by reference.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replaces the value and notifies every receiver.
    ///
    /// The value is stored before delivery, so receivers reading the
    /// transceiver observe the new value. Receivers may call `set` again;
    /// nesting is capped by the registry's depth limit.
    pub fn set(&self, value: T) {
        let old = self.inner.value.replace(value.clone());
        self.inner.registry.receive(Pulse::change(old, value));
    }

    /// Updates the value in place and notifies every receiver.
    ///
    /// `f` runs on a copy with no borrow held, so it may read the transceiver.
    pub fn modify(&self, f: impl FnOnce(&mut T)) {
        let mut new = self.get();
        f(&mut new);
        let old = self.inner.value.replace(new.clone());
        self.inner.registry.receive(Pulse::change(old, new));
    }

    /// Returns the number of subscribed receivers.
    #[inline]
    pub fn receivers(&self) -> usize {
        self.inner.registry.len()
    }

    /// Returns the transceiver's receiver registry.
    #[inline]
    pub fn registry(&self) -> &ReceiverRegistry<Pulse<T>> {
        &self.inner.registry
    }

    /// Returns a channel over this transceiver.
    ///
    /// Subscribers are primed with the current value. Receipts hold the
    /// transceiver weakly; cancelling after it is dropped is a no-op.
    pub fn channel(&self) -> Channel<Transceiver<T>, Pulse<T>> {
        let weak = Rc::downgrade(&self.inner);
        Channel::new(self.clone(), move |receiver| attach(&weak, receiver))
    }
}

fn attach<T: Clone + 'static>(
    inner: &Weak<TransceiverInner<T>>,
    receiver: Callback<Pulse<T>>,
) -> Receipt {
    let Some(strong) = inner.upgrade() else {
        return Receipt::empty();
    };

    let id = strong.registry.add_shared(Rc::clone(&receiver));
    let current = strong.value.borrow().clone();
    receiver(Pulse::prime(current));

    let cancel_ref = Weak::clone(inner);
    let request_ref = Weak::clone(inner);
    Receipt::new(move || {
        if let Some(inner) = cancel_ref.upgrade() {
            inner.registry.remove(id);
        }
    })
    .with_request(move || {
        if let Some(inner) = request_ref.upgrade() {
            if inner.registry.contains(id) {
                let current = inner.value.borrow().clone();
                receiver(Pulse::prime(current));
            }
        }
    })
}

impl<T: Clone + 'static> Source for Transceiver<T> {
    type Value = T;

    fn get(&self) -> T {
        Transceiver::get(self)
    }
}

impl<T: Clone + 'static> StateSource for Transceiver<T> {
    fn set(&self, value: T) {
        Transceiver::set(self, value)
    }
}

/// Creates a channel over a fresh transceiver holding `value`.
pub fn state<T: Clone + 'static>(value: T) -> Channel<Transceiver<T>, Pulse<T>> {
    Transceiver::new(value).channel()
}
