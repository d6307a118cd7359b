//! Conduit Core - Delivery primitives for Conduit channels.
//!
//! This crate provides the leaf types every channel is built from:
//!
//! - `Pulse`: An immutable `(old, new)` value pair, the unit of delivery
//! - `Receipt`: A cancellable handle returned by every subscription
//! - `ReceiverRegistry`: Ordered receiver callbacks with reentrancy guarding
//! - `Source` / `StateSource`: Read and read-write value contracts
//! - `RegistryConfig` / `ZipConfig`: Delivery configuration
//! - `Error`: Error types for contract violations
//!
//! # Example
//!
//! ```rust
//! use conduit_core::{Pulse, ReceiverRegistry};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let registry = ReceiverRegistry::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let seen_clone = seen.clone();
//! let id = registry.add(move |p: Pulse<i32>| seen_clone.borrow_mut().push(p.new));
//!
//! registry.receive(Pulse::change(1, 2));
//! registry.remove(id);
//! registry.receive(Pulse::change(2, 3));
//!
//! assert_eq!(*seen.borrow(), vec![2]);
//! ```

#![no_std]

extern crate alloc;

mod config;
mod error;
mod pulse;
mod receipt;
mod registry;
mod source;

pub use config::{RegistryConfig, ZipConfig, DEFAULT_MAX_DEPTH};
pub use error::{Error, Result};
pub use pulse::Pulse;
pub use receipt::{Receipt, ReceiptGuard};
pub use registry::{Callback, ReceiverId, ReceiverRegistry};
pub use source::{Source, StateSource};
