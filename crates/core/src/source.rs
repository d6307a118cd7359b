//! Source contracts.
//!
//! A [`Source`] holds the current value behind a channel. A [`StateSource`]
//! also accepts writes; it is the basis of stateful channels and lenses.

/// A readable holder of a current value.
pub trait Source {
    /// The type of the current value.
    type Value;

    /// Returns the current value.
    fn get(&self) -> Self::Value;
}

/// A two-way source accepting new values.
pub trait StateSource: Source {
    /// Replaces the current value and notifies receivers.
    ///
    /// # Panics
    ///
    /// Implementations backed by an external object panic when that object is
    /// gone; writing to a dead resource is a contract violation.
    fn set(&self, value: Self::Value);
}

/// Implements the source contracts for tuples of sources, element-wise.
macro_rules! tuple_source {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Source),+> Source for ($($name,)+) {
            type Value = ($($name::Value,)+);

            fn get(&self) -> Self::Value {
                ($(self.$idx.get(),)+)
            }
        }

        impl<$($name: StateSource),+> StateSource for ($($name,)+) {
            fn set(&self, value: Self::Value) {
                $(self.$idx.set(value.$idx);)+
            }
        }
    };
}

tuple_source!(A 0, B 1);
tuple_source!(A 0, B 1, C 2);
tuple_source!(A 0, B 1, C 2, D 3);
tuple_source!(A 0, B 1, C 2, D 3, E 4);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14, P 15);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14, P 15, Q 16);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14, P 15, Q 16, R 17);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14, P 15, Q 16, R 17, S 18);
tuple_source!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14, P 15, Q 16, R 17, S 18, T 19);

impl<S: Source + ?Sized> Source for alloc::rc::Rc<S> {
    type Value = S::Value;

    fn get(&self) -> Self::Value {
        (**self).get()
    }
}

impl<S: StateSource + ?Sized> StateSource for alloc::rc::Rc<S> {
    fn set(&self, value: Self::Value) {
        (**self).set(value)
    }
}
