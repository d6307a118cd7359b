//! Configuration for registries and zip queues.

use crate::error::{Error, Result};

/// Default nesting limit for deliveries on a single registry.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Configuration for a [`ReceiverRegistry`](crate::ReceiverRegistry).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum number of nested `receive` calls on the same registry.
    /// Deliveries beyond this depth are dropped.
    pub max_depth: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RegistryConfig {
    /// Creates a configuration with the given depth limit.
    ///
    /// A limit of zero would drop every delivery and is rejected.
    pub fn new(max_depth: usize) -> Result<Self> {
        if max_depth == 0 {
            return Err(Error::invalid_config("max_depth must be at least 1"));
        }
        Ok(Self { max_depth })
    }
}

/// Configuration for the per-side queues of a zipped channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZipConfig {
    /// Maximum queued pulses per side. `None` means unbounded.
    ///
    /// When a queue would grow past the capacity its oldest element is
    /// dropped.
    pub capacity: Option<usize>,
}

impl ZipConfig {
    /// Unbounded queues.
    #[inline]
    pub fn unbounded() -> Self {
        Self { capacity: None }
    }

    /// Queues holding at most `capacity` pulses per side.
    pub fn bounded(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid_config("zip capacity must be at least 1"));
        }
        Ok(Self {
            capacity: Some(capacity),
        })
    }
}
