//! Receipts for active subscriptions.
//!
//! A `Receipt` is returned by every subscription. Cancelling it detaches the
//! callback from its source; requesting re-delivers the source's current
//! value to that callback.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

/// A cancellable handle representing an active subscription.
///
/// `cancel()` is idempotent: the second and later calls are no-ops. A
/// receipt is not cancelled when dropped; use [`Receipt::guard`] for
/// scope-bound subscriptions.
pub struct Receipt {
    /// Set once `cancel` has run
    cancelled: Cell<bool>,
    /// Detaches the callback; taken on first cancel
    canceller: RefCell<Option<Box<dyn FnOnce()>>>,
    /// Re-delivers the current value, if the source has one
    requester: Option<Box<dyn Fn()>>,
}

impl Receipt {
    /// Creates a receipt that runs `cancel` once when cancelled.
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            cancelled: Cell::new(false),
            canceller: RefCell::new(Some(Box::new(cancel))),
            requester: None,
        }
    }

    /// Creates a receipt with nothing to cancel.
    pub fn empty() -> Self {
        Self {
            cancelled: Cell::new(false),
            canceller: RefCell::new(None),
            requester: None,
        }
    }

    /// Attaches a request function, invoked by [`Receipt::request`].
    pub fn with_request<F>(mut self, request: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.requester = Some(Box::new(request));
        self
    }

    /// Combines several receipts into one.
    ///
    /// Cancelling the result cancels every part in order; requesting
    /// requests every part in order.
    pub fn merge<I>(receipts: I) -> Self
    where
        I: IntoIterator<Item = Receipt>,
    {
        let parts: Rc<Vec<Receipt>> = Rc::new(receipts.into_iter().collect());
        let requested = parts.clone();
        Receipt::new(move || {
            for part in parts.iter() {
                part.cancel();
            }
        })
        .with_request(move || {
            for part in requested.iter() {
                part.request();
            }
        })
    }

    /// Cancels the subscription.
    ///
    /// After this returns the callback will never be invoked again, even if
    /// called from inside a delivery.
    pub fn cancel(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        let canceller = self.canceller.borrow_mut().take();
        if let Some(cancel) = canceller {
            cancel();
        }
    }

    /// Returns whether this receipt has been cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Asks the source to re-deliver its current value to this subscription.
    ///
    /// No-op once cancelled, or when the source has no current value.
    pub fn request(&self) {
        if self.cancelled.get() {
            return;
        }
        if let Some(request) = &self.requester {
            request();
        }
    }

    /// Wraps the receipt in a guard that cancels it when dropped.
    #[inline]
    pub fn guard(self) -> ReceiptGuard {
        ReceiptGuard { receipt: self }
    }
}

impl fmt::Debug for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receipt")
            .field("cancelled", &self.cancelled.get())
            .field("requestable", &self.requester.is_some())
            .finish()
    }
}

/// RAII guard that cancels its receipt on drop.
#[derive(Debug)]
pub struct ReceiptGuard {
    receipt: Receipt,
}

impl ReceiptGuard {
    /// Returns the guarded receipt.
    #[inline]
    pub fn receipt(&self) -> &Receipt {
        &self.receipt
    }
}

impl Drop for ReceiptGuard {
    fn drop(&mut self) {
        self.receipt.cancel();
    }
}
