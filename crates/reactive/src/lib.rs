//! Conduit Reactive - Composable channels over observable state.
//!
//! This crate implements typed channels that propagate state changes from
//! sources to receivers. Channels compose: they can be transformed, filtered,
//! merged with other channels, and focused onto parts of their value through
//! lenses, with writes to a focused channel round-tripping into the source.
//!
//! # Core Concepts
//!
//! - `Channel`: A source paired with a subscription function
//! - `Transceiver`: An in-memory two-way source
//! - `Emitter`: A source of discrete events with no current value
//! - `Property`: A two-way source over a field of an externally owned object
//! - `LensSource`: A source focused through a lens onto a parent channel
//! - `OneOf2` .. `OneOf20`: Tagged unions produced by `either`
//!
//! # Key Features
//!
//! - `subscribe()`: Register a receiver, primed with the current value
//! - `map()` / `filter()` / `values()` / `sieve()`: Per-pulse transforms
//! - `focus()`: Derive a two-way channel onto part of the value
//! - `either()` / `combine()` / `zip()`: Binary merges, with N-way macros
//!
//! # Example
//!
//! ```rust
//! use conduit_reactive::{field_lens, Lens, Pulse, Transceiver};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Player { name: String, score: u32 }
//!
//! let player = Transceiver::new(Player { name: "ada".into(), score: 0 });
//! let score: Lens<Player, u32> = field_lens!(Player, score);
//! let score_channel = player.channel().focus(score);
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let seen_clone = seen.clone();
//! let receipt = score_channel
//!     .sieve()
//!     .subscribe(move |p: Pulse<u32>| seen_clone.borrow_mut().push(p.new));
//!
//! score_channel.set(10);
//! player.modify(|p| p.name = "grace".into());
//! receipt.cancel();
//!
//! // The rename left the score unchanged, so the sieve dropped it
//! assert_eq!(*seen.borrow(), vec![0, 10]);
//! ```

#![no_std]

extern crate alloc;

pub mod channel;
pub mod combine;
pub mod emitter;
pub mod flatten;
pub mod focus;
pub mod one_of;
pub mod property;
pub mod transceiver;

pub use channel::Channel;
pub use emitter::Emitter;
pub use flatten::Append;
pub use focus::LensSource;
pub use one_of::{
    OneOf10, OneOf11, OneOf12, OneOf13, OneOf14, OneOf15, OneOf16, OneOf17, OneOf18, OneOf19,
    OneOf2, OneOf20, OneOf3, OneOf4, OneOf5, OneOf6, OneOf7, OneOf8, OneOf9, Widen,
};
pub use property::{Accessor, Property};
pub use transceiver::{state, Transceiver};

// Re-export commonly used types from dependencies
pub use conduit_core::{
    Callback, Error, Pulse, Receipt, ReceiptGuard, RegistryConfig, Result, Source, StateSource,
    ZipConfig,
};
pub use conduit_lens::{field_lens, Lens};
