//! Conduit Lens - Get/set lenses for focusing on parts of state.
//!
//! A lens pairs a getter with a setter so that a part of an immutable value
//! can be read and replaced, producing an updated copy of the whole. Channels
//! use lenses to derive focused sub-channels whose writes round-trip through
//! the entire parent value.
//!
//! # Core Concepts
//!
//! - `Lens<A, B>`: A get/set pair from whole `A` to part `B`
//! - `Lens::compose`: Focus through several layers
//! - `Lens::optional`: Lift a lens over optional wholes
//!
//! # Collection Lenses
//!
//! - `index`: Element of a vector (grows by repeating the written value)
//! - `at`: Element of an optional vector
//! - `range`: Contiguous slice of a vector
//! - `key`: Entry of a keyed map
//! - `coalesce`: Absent value replaced by a template
//!
//! # Example
//!
//! ```rust
//! use conduit_lens::{field_lens, index, Lens};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Doc { tags: Vec<String> }
//!
//! let tags: Lens<Doc, Vec<String>> = field_lens!(Doc, tags);
//! let first_tag = tags.compose(&index(0));
//!
//! let doc = Doc { tags: vec!["draft".into()] };
//! let doc = first_tag.set(doc, Some("final".into()));
//! assert_eq!(doc.tags, vec!["final".to_string()]);
//! ```

#![no_std]

extern crate alloc;

pub mod collection;
pub mod lens;

pub use collection::{at, coalesce, index, key, range, KeyedCollection};
pub use lens::Lens;

/// Builds a lens onto a named struct field.
///
/// The field type must be `Clone`; the struct is updated by moving it and
/// overwriting the field.
#[macro_export]
macro_rules! field_lens {
    ($whole:ty, $field:ident) => {
        $crate::Lens::new(
            |whole: &$whole| ::core::clone::Clone::clone(&whole.$field),
            |mut whole: $whole, part| {
                whole.$field = part;
                whole
            },
        )
    };
}
