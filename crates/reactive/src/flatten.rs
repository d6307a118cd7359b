//! N-way combinators.
//!
//! Wider `combine`, `zip` and `either` channels are folded from the binary
//! primitives: the nested result of combining a pair with a third channel is
//! re-associated into a flat tuple (or a flat [`OneOf3`](crate::OneOf3)
//! union), and so on up to twenty channels. The re-association is a pure
//! reshaping; delivery semantics are exactly those of the binary form.
//!
//! The [`combine!`](crate::combine!), [`zip!`](crate::zip!) and
//! [`either!`](crate::either!) macros spell out the fold.

use crate::channel::Channel;
use crate::one_of::{OneOf2, Widen};

/// Appends one element to a tuple, producing the next wider tuple.
pub trait Append<Next> {
    /// The tuple with `Next` appended.
    type Output;

    /// Moves the elements into the wider tuple.
    fn append(self, next: Next) -> Self::Output;
}

macro_rules! tuple_append {
    ($($ty:ident $value:ident),+) => {
        impl<$($ty,)+ Next> Append<Next> for ($($ty,)+) {
            type Output = ($($ty,)+ Next);

            #[inline]
            fn append(self, next: Next) -> Self::Output {
                let ($($value,)+) = self;
                ($($value,)+ next)
            }
        }
    };
}

tuple_append!(A a, B b);
tuple_append!(A a, B b, C c);
tuple_append!(A a, B b, C c, D d);
tuple_append!(A a, B b, C c, D d, E e);
tuple_append!(A a, B b, C c, D d, E e, F f);
tuple_append!(A a, B b, C c, D d, E e, F f, G g);
tuple_append!(A a, B b, C c, D d, E e, F f, G g, H h);
tuple_append!(A a, B b, C c, D d, E e, F f, G g, H h, I i);
tuple_append!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j);
tuple_append!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k);
tuple_append!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l);
tuple_append!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l, M m);
tuple_append!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l, M m, N n);
tuple_append!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l, M m, N n, O o);
tuple_append!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l, M m, N n, O o, P p);
tuple_append!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l, M m, N n, O o, P p, Q q);
tuple_append!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l, M m, N n, O o, P p, Q q, R r);
tuple_append!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l, M m, N n, O o, P p, Q q, R r, S s);

impl<S: Clone + 'static, P: 'static> Channel<S, P> {
    /// Extends a combined channel with one more channel.
    ///
    /// `a.combine(&b).combine_next(&c)` carries `(A, B, C)` tuples with the
    /// semantics of `combine`.
    pub fn combine_next<S2, Q>(&self, other: &Channel<S2, Q>) -> Channel<S::Output, P::Output>
    where
        S: Append<S2>,
        P: Append<Q> + Clone,
        S2: Clone + 'static,
        Q: Clone + 'static,
        P::Output: 'static,
    {
        let source = self.source.clone().append(other.source.clone());
        self.combine(other)
            .map(|(head, next)| head.append(next))
            .rebind(source)
    }

    /// Extends a zipped channel with one more channel.
    pub fn zip_next<S2, Q>(&self, other: &Channel<S2, Q>) -> Channel<S::Output, P::Output>
    where
        S: Append<S2>,
        P: Append<Q>,
        S2: Clone + 'static,
        Q: 'static,
        P::Output: 'static,
    {
        let source = self.source.clone().append(other.source.clone());
        self.zip(other)
            .map(|(head, next)| head.append(next))
            .rebind(source)
    }

    /// Extends an `either` channel with one more channel.
    ///
    /// Existing variants keep their position; values from `other` arrive as
    /// the new last variant.
    pub fn either_next<S2, Q>(&self, other: &Channel<S2, Q>) -> Channel<S::Output, P::Wider>
    where
        S: Append<S2>,
        P: Widen<Q>,
        S2: Clone + 'static,
        Q: 'static,
        P::Wider: 'static,
    {
        let source = self.source.clone().append(other.source.clone());
        self.either(other)
            .map(|value| match value {
                OneOf2::V1(head) => head.widen(),
                OneOf2::V2(next) => P::last(next),
            })
            .rebind(source)
    }
}

/// Combines two or more channels into one carrying a flat tuple of their
/// latest values.
///
/// # Example
///
/// ```rust
/// use conduit_reactive::{combine, Transceiver};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let a = Transceiver::new(1);
/// let b = Transceiver::new("b");
/// let c = Transceiver::new('c');
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let seen_clone = seen.clone();
/// let _receipt = combine!(a.channel().values(), b.channel().values(), c.channel().values())
///     .subscribe(move |t| seen_clone.borrow_mut().push(t));
///
/// a.set(2);
/// assert_eq!(*seen.borrow(), vec![(1, "b", 'c'), (2, "b", 'c')]);
/// ```
#[macro_export]
macro_rules! combine {
    ($first:expr, $second:expr $(, $rest:expr)* $(,)?) => {{
        let channel = $first.combine(&$second);
        $(let channel = channel.combine_next(&$rest);)*
        channel
    }};
}

/// Zips two or more channels into one carrying flat tuples, paired in
/// arrival order.
#[macro_export]
macro_rules! zip {
    ($first:expr, $second:expr $(, $rest:expr)* $(,)?) => {{
        let channel = $first.zip(&$second);
        $(let channel = channel.zip_next(&$rest);)*
        channel
    }};
}

/// Merges two or more channels into one carrying a `OneOfN` tagged by
/// origin.
#[macro_export]
macro_rules! either {
    ($first:expr, $second:expr $(, $rest:expr)* $(,)?) => {{
        let channel = $first.either(&$second);
        $(let channel = channel.either_next(&$rest);)*
        channel
    }};
}
