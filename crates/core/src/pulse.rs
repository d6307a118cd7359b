//! Pulse type for channel delivery.
//!
//! A Pulse represents one state transition of a source: the value it held
//! before (if any receiver saw one) and the value it holds now.

/// An immutable `(old, new)` value pair.
///
/// `new` is always the authoritative current value. `old` is `None` only for
/// the first delivery to a receiver (the priming pulse).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pulse<T> {
    /// The value before the change, if any
    pub old: Option<T>,
    /// The value after the change
    pub new: T,
}

impl<T> Pulse<T> {
    /// Creates a pulse from an optional old value and a new value.
    #[inline]
    pub fn new(old: Option<T>, new: T) -> Self {
        Self { old, new }
    }

    /// Creates a priming pulse carrying only the current value.
    #[inline]
    pub fn prime(value: T) -> Self {
        Self {
            old: None,
            new: value,
        }
    }

    /// Creates a pulse for a change from `old` to `new`.
    #[inline]
    pub fn change(old: T, new: T) -> Self {
        Self {
            old: Some(old),
            new,
        }
    }

    /// Returns true if this is a priming pulse (no old value).
    #[inline]
    pub fn is_prime(&self) -> bool {
        self.old.is_none()
    }

    /// Returns a reference to the new value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.new
    }

    /// Returns a reference to the old value, if any.
    #[inline]
    pub fn old(&self) -> Option<&T> {
        self.old.as_ref()
    }

    /// Consumes the pulse, returning the new value.
    #[inline]
    pub fn into_value(self) -> T {
        self.new
    }

    /// Maps both sides of the pulse to a new type.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Pulse<U>
    where
        F: Fn(T) -> U,
    {
        Pulse {
            old: self.old.map(&f),
            new: f(self.new),
        }
    }

    /// Maps both sides of the pulse by reference.
    #[inline]
    pub fn map_ref<U, F>(&self, f: F) -> Pulse<U>
    where
        F: Fn(&T) -> U,
    {
        Pulse {
            old: self.old.as_ref().map(&f),
            new: f(&self.new),
        }
    }
}

impl<T: PartialEq> Pulse<T> {
    /// Returns true if the new value differs from the old one.
    ///
    /// Priming pulses always count as changed.
    #[inline]
    pub fn is_changed(&self) -> bool {
        match &self.old {
            Some(old) => *old != self.new,
            None => true,
        }
    }
}
