//! The lens primitive.
//!
//! A `Lens<A, B>` pairs a getter reading a part `B` out of a whole `A` with a
//! setter producing a new whole from an old whole and a new part. Lenses
//! compose, so a deep field of a value-type state tree can be read and
//! replaced without the outer layers knowing about the part's type.

use alloc::rc::Rc;
use core::fmt;

/// A get/set pair focusing on part `B` of a whole `A`.
///
/// Well-formed lenses obey the lens laws:
///
/// - `lens.get(&lens.set(a, b)) == b`
/// - `lens.set(a.clone(), lens.get(&a)) == a`
///
/// The laws are not checked at runtime. Cloning a lens is cheap; clones
/// share the same functions.
///
/// # Example
///
/// ```rust
/// use conduit_lens::Lens;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// let x = Lens::new(|p: &Point| p.x, |p: Point, x| Point { x, ..p });
///
/// let p = Point { x: 1, y: 2 };
/// assert_eq!(x.get(&p), 1);
/// assert_eq!(x.set(p, 5), Point { x: 5, y: 2 });
/// ```
pub struct Lens<A, B> {
    getter: Rc<dyn Fn(&A) -> B>,
    setter: Rc<dyn Fn(A, B) -> A>,
}

impl<A, B> Clone for Lens<A, B> {
    fn clone(&self) -> Self {
        Self {
            getter: Rc::clone(&self.getter),
            setter: Rc::clone(&self.setter),
        }
    }
}

impl<A, B> fmt::Debug for Lens<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lens")
            .field("whole", &core::any::type_name::<A>())
            .field("part", &core::any::type_name::<B>())
            .finish()
    }
}

impl<A: 'static, B: 'static> Lens<A, B> {
    /// Creates a lens from a getter and a setter.
    pub fn new<G, S>(get: G, set: S) -> Self
    where
        G: Fn(&A) -> B + 'static,
        S: Fn(A, B) -> A + 'static,
    {
        Self {
            getter: Rc::new(get),
            setter: Rc::new(set),
        }
    }

    /// Reads the focused part of `whole`.
    #[inline]
    pub fn get(&self, whole: &A) -> B {
        (self.getter)(whole)
    }

    /// Returns `whole` with its focused part replaced by `part`.
    #[inline]
    pub fn set(&self, whole: A, part: B) -> A {
        (self.setter)(whole, part)
    }

    /// Returns `whole` with its focused part replaced by `f(part)`.
    pub fn modify<F>(&self, whole: A, f: F) -> A
    where
        F: FnOnce(B) -> B,
    {
        let part = self.get(&whole);
        self.set(whole, f(part))
    }

    /// Focuses further through `inner`, yielding a lens from `A` to `C`.
    ///
    /// Setting through the composed lens reads the intermediate part, updates
    /// it with `inner`, and writes it back with `self`.
    pub fn compose<C: 'static>(&self, inner: &Lens<B, C>) -> Lens<A, C> {
        let outer_get = self.clone();
        let inner_get = inner.clone();
        let outer_set = self.clone();
        let inner_set = inner.clone();
        Lens::new(
            move |a: &A| inner_get.get(&outer_get.get(a)),
            move |a: A, c: C| {
                let b = outer_set.get(&a);
                outer_set.set(a, inner_set.set(b, c))
            },
        )
    }

    /// Lifts the lens over optional wholes.
    ///
    /// Reading a `None` whole yields `None`. Setting onto a `None` whole
    /// returns `None`, and setting `None` onto a present whole returns it
    /// unchanged, so composition stays total when the target may be absent.
    pub fn optional(&self) -> Lens<Option<A>, Option<B>> {
        let getter = self.clone();
        let setter = self.clone();
        Lens::new(
            move |whole: &Option<A>| whole.as_ref().map(|a| getter.get(a)),
            move |whole: Option<A>, part: Option<B>| match (whole, part) {
                (Some(a), Some(b)) => Some(setter.set(a, b)),
                (whole, _) => whole,
            },
        )
    }
}

impl<A: 'static> Lens<A, A>
where
    A: Clone,
{
    /// The lens focusing on the whole value.
    pub fn identity() -> Self {
        Lens::new(|a: &A| a.clone(), |_, a| a)
    }
}
