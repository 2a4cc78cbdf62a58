//! Power lifecycle state and the termination guard
//!
//! A bistable panel must never be left energized: extended time in the
//! powered-on state damages the hardware. The [`PowerState`] machine tracks
//! where the panel is in its wake/refresh/sleep cycle, and the [`Shutdown`]
//! flag lets a host record a termination request (SIGINT/SIGTERM or an
//! equivalent) without interrupting an in-flight command exchange. The
//! request is acted upon at the next protocol checkpoint, directly after a
//! register programming sequence completes, by putting the panel to deep
//! sleep.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

/// Panel power state
///
/// ```text
/// Uninitialized -> PoweredOff <-> Initializing -> PoweredOn
///                       ^                             |
///                       +--------- Refreshing <-------+
/// ```
///
/// `PoweredOff` means deep sleep, the only state in which the panel may be
/// left unattended. Waking is only permitted from `Uninitialized` or
/// `PoweredOff`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerState {
    /// No hardware initialization has run yet
    Uninitialized,
    /// Deep sleep; safe to leave unattended
    PoweredOff,
    /// The wake register programming sequence is in progress
    Initializing,
    /// Energized and accepting RAM writes
    PoweredOn,
    /// A frame is being streamed and activated
    Refreshing,
}

/// Clonable termination-request flag
///
/// A display creates one of these and hands out clones via
/// [`Display::shutdown_handle`](crate::Display::shutdown_handle). A host
/// wires a clone into its signal handling (e.g. a SIGINT hook) and calls
/// [`request`](Self::request); the display observes the request at its next
/// power checkpoint and forces the panel to deep sleep before any further
/// work.
///
/// ## Example
///
/// ```
/// use il3820::Shutdown;
///
/// let shutdown = Shutdown::new();
/// let handle = shutdown.clone();
///
/// assert!(!shutdown.is_requested());
/// handle.request();
/// assert!(shutdown.is_requested());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Shutdown {
    requested: Arc<AtomicBool>,
}

impl Shutdown {
    /// Create a flag with no request recorded
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a termination request
    ///
    /// Safe to call from anywhere the clone was sent; the display acts on it
    /// at its next checkpoint.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }

    /// Whether a termination request has been recorded
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_visible_through_clones() {
        let shutdown = Shutdown::new();
        let handle = shutdown.clone();
        assert!(!shutdown.is_requested());

        handle.request();
        assert!(shutdown.is_requested());
        assert!(handle.is_requested());
    }
}
