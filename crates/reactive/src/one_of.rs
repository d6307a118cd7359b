//! Closed sum types produced by `either`.
//!
//! `OneOf2` is the binary form. Wider forms up to `OneOf20` are generated,
//! together with the [`Widen`] impls that re-associate a nested union into
//! the next wider one.

/// A value tagged with which of two channels produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OneOf2<A, B> {
    V1(A),
    V2(B),
}

impl<A, B> OneOf2<A, B> {
    /// Returns the first variant's value, if present.
    pub fn first(self) -> Option<A> {
        match self {
            OneOf2::V1(a) => Some(a),
            OneOf2::V2(_) => None,
        }
    }

    /// Returns the second variant's value, if present.
    pub fn second(self) -> Option<B> {
        match self {
            OneOf2::V1(_) => None,
            OneOf2::V2(b) => Some(b),
        }
    }
}

/// Re-associates a union with one more variant type.
///
/// `OneOf2<OneOfN<..>, Next>` flattens to `OneOf(N+1)<.., Next>` by widening
/// the left side and tagging the right side with the last variant.
pub trait Widen<Next> {
    /// The union with `Next` appended.
    type Wider;

    /// Moves every existing variant into the wider union.
    fn widen(self) -> Self::Wider;

    /// Builds the wider union's last variant.
    fn last(value: Next) -> Self::Wider;
}

macro_rules! one_of {
    ($($name:ident from $prev:ident [$($variant:ident $ty:ident),+] + $next_variant:ident $next:ident;)+) => {
        $(
            #[doc = concat!("A value tagged with its origin; see [`", stringify!($prev), "`].")]
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            pub enum $name<$($ty,)+ $next> {
                $($variant($ty),)+
                $next_variant($next),
            }

            impl<$($ty,)+ $next> Widen<$next> for $prev<$($ty),+> {
                type Wider = $name<$($ty,)+ $next>;

                fn widen(self) -> Self::Wider {
                    match self {
                        $($prev::$variant(value) => $name::$variant(value),)+
                    }
                }

                fn last(value: $next) -> Self::Wider {
                    $name::$next_variant(value)
                }
            }
        )+
    };
}

one_of! {
    OneOf3 from OneOf2 [V1 A, V2 B] + V3 C;
    OneOf4 from OneOf3 [V1 A, V2 B, V3 C] + V4 D;
    OneOf5 from OneOf4 [V1 A, V2 B, V3 C, V4 D] + V5 E;
    OneOf6 from OneOf5 [V1 A, V2 B, V3 C, V4 D, V5 E] + V6 F;
    OneOf7 from OneOf6 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F] + V7 G;
    OneOf8 from OneOf7 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F, V7 G] + V8 H;
    OneOf9 from OneOf8 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F, V7 G, V8 H] + V9 I;
    OneOf10 from OneOf9 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F, V7 G, V8 H, V9 I] + V10 J;
    OneOf11 from OneOf10 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F, V7 G, V8 H, V9 I, V10 J] + V11 K;
    OneOf12 from OneOf11 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F, V7 G, V8 H, V9 I, V10 J, V11 K] + V12 L;
    OneOf13 from OneOf12 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F, V7 G, V8 H, V9 I, V10 J, V11 K, V12 L] + V13 M;
    OneOf14 from OneOf13 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F, V7 G, V8 H, V9 I, V10 J, V11 K, V12 L, V13 M] + V14 N;
    OneOf15 from OneOf14 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F, V7 G, V8 H, V9 I, V10 J, V11 K, V12 L, V13 M, V14 N] + V15 O;
    OneOf16 from OneOf15 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F, V7 G, V8 H, V9 I, V10 J, V11 K, V12 L, V13 M, V14 N, V15 O] + V16 P;
    OneOf17 from OneOf16 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F, V7 G, V8 H, V9 I, V10 J, V11 K, V12 L, V13 M, V14 N, V15 O, V16 P] + V17 Q;
    OneOf18 from OneOf17 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F, V7 G, V8 H, V9 I, V10 J, V11 K, V12 L, V13 M, V14 N, V15 O, V16 P, V17 Q] + V18 R;
    OneOf19 from OneOf18 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F, V7 G, V8 H, V9 I, V10 J, V11 K, V12 L, V13 M, V14 N, V15 O, V16 P, V17 Q, V18 R] + V19 S;
    OneOf20 from OneOf19 [V1 A, V2 B, V3 C, V4 D, V5 E, V6 F, V7 G, V8 H, V9 I, V10 J, V11 K, V12 L, V13 M, V14 N, V15 O, V16 P, V17 Q, V18 R, V19 S] + V20 T;
}
