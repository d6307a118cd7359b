//! Event sources without a current value.
//!
//! An `Emitter<T>` broadcasts discrete values as they happen. Having no
//! current value, its channel has nothing to prime subscribers with: they
//! only see values emitted after subscribing.

use crate::channel::Channel;
use alloc::rc::{Rc, Weak};
use conduit_core::{Receipt, ReceiverRegistry, RegistryConfig, Source};
use core::cell::RefCell;

struct EmitterInner<T> {
    last: RefCell<Option<T>>,
    registry: ReceiverRegistry<T>,
}

/// A source of discrete events.
///
/// Reading an emitter as a [`Source`] returns the most recently emitted
/// value, or `None` before the first emission.
pub struct Emitter<T> {
    inner: Rc<EmitterInner<T>>,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Emitter<T> {
    /// Creates an emitter with the default registry configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an emitter whose registry uses `config`.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            inner: Rc::new(EmitterInner {
                last: RefCell::new(None),
                registry: ReceiverRegistry::with_config(config),
            }),
        }
    }

    /// Broadcasts `value` to every receiver.
    pub fn emit(&self, value: T) {
        *self.inner.last.borrow_mut() = Some(value.clone());
        self.inner.registry.receive(value);
    }

    /// Returns the number of subscribed receivers.
    #[inline]
    pub fn receivers(&self) -> usize {
        self.inner.registry.len()
    }

    /// Returns a channel over this emitter's events.
    pub fn channel(&self) -> Channel<Emitter<T>, T> {
        let weak = Rc::downgrade(&self.inner);
        Channel::new(self.clone(), move |receiver| {
            let Some(inner) = weak.upgrade() else {
                return Receipt::empty();
            };
            let id = inner.registry.add_shared(receiver);
            let cancel_ref: Weak<EmitterInner<T>> = Weak::clone(&weak);
            Receipt::new(move || {
                if let Some(inner) = cancel_ref.upgrade() {
                    inner.registry.remove(id);
                }
            })
        })
    }
}

impl<T: Clone + 'static> Source for Emitter<T> {
    type Value = Option<T>;

    fn get(&self) -> Option<T> {
        self.inner.last.borrow().clone()
    }
}
