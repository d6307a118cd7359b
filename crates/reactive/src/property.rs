//! Adapter-backed two-way sources.
//!
//! A `Property<O, T>` observes one field of an object the library does not
//! own. The adapter author declares the field through an [`Accessor`]; no
//! runtime discovery is involved. The property keeps only a weak reference to
//! the object and checks whether it is gone before every access.
//!
//! # Failure Modes
//!
//! - **Read after the object is gone**: yields `None`.
//! - **Write after the object is gone**: `try_set` returns
//!   [`Error::SourceGone`]; the infallible `set` panics with it.
//! - **Writing an absent value** through [`StateSource::set`]: panics with
//!   [`Error::Unrepresentable`], since the field itself is not optional.

use crate::channel::Channel;
use alloc::rc::{Rc, Weak};
use conduit_core::{
    Error, Pulse, Receipt, ReceiverRegistry, RegistryConfig, Result, Source, StateSource,
};
use core::cell::RefCell;
use core::fmt;

/// An explicitly declared field accessor.
pub struct Accessor<O, T> {
    key: &'static str,
    get: fn(&O) -> T,
    set: fn(&mut O, T),
}

impl<O, T> Clone for Accessor<O, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O, T> Copy for Accessor<O, T> {}

impl<O, T> fmt::Debug for Accessor<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor").field("key", &self.key).finish()
    }
}

impl<O, T> Accessor<O, T> {
    /// Declares an accessor named `key`.
    pub const fn new(key: &'static str, get: fn(&O) -> T, set: fn(&mut O, T)) -> Self {
        Self { key, get, set }
    }

    /// Returns the accessor's name.
    #[inline]
    pub fn key(&self) -> &'static str {
        self.key
    }
}

struct PropertyInner<O, T> {
    /// The observed object; never owned
    target: Weak<RefCell<O>>,
    accessor: Accessor<O, T>,
    /// Last value broadcast, used as the old side of the next pulse
    last: RefCell<Option<T>>,
    registry: ReceiverRegistry<Pulse<Option<T>>>,
}

/// A two-way source over a field of an externally owned object.
///
/// Its value type is `Option<T>`: `None` once the object is gone.
pub struct Property<O, T> {
    inner: Rc<PropertyInner<O, T>>,
}

impl<O, T> Clone for Property<O, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<O, T> fmt::Debug for Property<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("key", &self.inner.accessor.key)
            .field("gone", &(self.inner.target.strong_count() == 0))
            .field("registry", &self.inner.registry)
            .finish()
    }
}

impl<O: 'static, T: Clone + 'static> Property<O, T> {
    /// Binds `accessor` to `target` without taking ownership of it.
    pub fn bind(target: &Rc<RefCell<O>>, accessor: Accessor<O, T>) -> Self {
        Self::bind_with_config(target, accessor, RegistryConfig::default())
    }

    /// Binds with a custom registry configuration.
    pub fn bind_with_config(
        target: &Rc<RefCell<O>>,
        accessor: Accessor<O, T>,
        config: RegistryConfig,
    ) -> Self {
        let current = (accessor.get)(&target.borrow());
        Self {
            inner: Rc::new(PropertyInner {
                target: Rc::downgrade(target),
                accessor,
                last: RefCell::new(Some(current)),
                registry: ReceiverRegistry::with_config(config),
            }),
        }
    }

    /// Returns the accessor's name.
    #[inline]
    pub fn key(&self) -> &'static str {
        self.inner.accessor.key
    }

    /// Returns true once the observed object has been dropped.
    #[inline]
    pub fn is_gone(&self) -> bool {
        self.inner.target.strong_count() == 0
    }

    /// Reads the field, or `None` if the object is gone.
    pub fn get(&self) -> Option<T> {
        match self.inner.target.upgrade() {
            Some(target) => Some((self.inner.accessor.get)(&target.borrow())),
            None => {
                tracing::debug!(key = self.key(), "read from gone source");
                None
            }
        }
    }

    /// Writes the field and notifies every receiver.
    pub fn try_set(&self, value: T) -> Result<()> {
        let target = self
            .inner
            .target
            .upgrade()
            .ok_or_else(|| Error::source_gone(self.key()))?;
        (self.inner.accessor.set)(&mut target.borrow_mut(), value);
        drop(target);

        tracing::debug!(key = self.key(), "property written");
        self.changed();
        Ok(())
    }

    /// Writes the field and notifies every receiver.
    ///
    /// # Panics
    ///
    /// Panics if the object is gone.
    pub fn set(&self, value: T) {
        if let Err(err) = self.try_set(value) {
            panic!("{}", err);
        }
    }

    /// Re-reads the field and broadcasts it.
    ///
    /// Adapters call this whenever the object changed outside the property,
    /// including when the object is about to disappear.
    pub fn changed(&self) {
        let current = self.get();
        let old = self.inner.last.replace(current.clone());
        self.inner.registry.receive(Pulse::change(old, current));
    }

    /// Returns the number of subscribed receivers.
    #[inline]
    pub fn receivers(&self) -> usize {
        self.inner.registry.len()
    }

    /// Returns a channel over this property, priming with the current read.
    pub fn channel(&self) -> Channel<Property<O, T>, Pulse<Option<T>>> {
        let weak = Rc::downgrade(&self.inner);
        Channel::new(self.clone(), move |receiver| {
            let Some(inner) = weak.upgrade() else {
                return Receipt::empty();
            };
            let id = inner.registry.add_shared(Rc::clone(&receiver));
            let property = Property { inner };
            receiver(Pulse::prime(property.get()));

            let cancel_ref = Weak::clone(&weak);
            let request_ref = Weak::clone(&weak);
            Receipt::new(move || {
                if let Some(inner) = cancel_ref.upgrade() {
                    inner.registry.remove(id);
                }
            })
            .with_request(move || {
                if let Some(inner) = request_ref.upgrade() {
                    if inner.registry.contains(id) {
                        receiver(Pulse::prime(Property { inner }.get()));
                    }
                }
            })
        })
    }
}

impl<O: 'static, T: Clone + 'static> Source for Property<O, T> {
    type Value = Option<T>;

    fn get(&self) -> Option<T> {
        Property::get(self)
    }
}

impl<O: 'static, T: Clone + 'static> StateSource for Property<O, T> {
    fn set(&self, value: Option<T>) {
        if self.is_gone() {
            panic!("{}", Error::source_gone(self.key()));
        }
        match value {
            Some(value) => Property::set(self, value),
            None => panic!("{}", Error::unrepresentable(self.key())),
        }
    }
}
