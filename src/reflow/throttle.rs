//! Trailing-edge rate limiting over caller-supplied timestamps.
//!
//! The first signal after a quiet period fires immediately. Signals inside
//! the window collapse into a single deferred fire at the end of the window,
//! so the most recent signal of a burst is always handled.
//!
//! ```
//! use zenjustify::reflow::{Signal, Throttle};
//!
//! let mut t = Throttle::new(250);
//! assert_eq!(t.signal(1_000), Signal::Fire);
//! assert_eq!(t.signal(1_100), Signal::Deferred { at: 1_250 });
//! assert_eq!(t.signal(1_200), Signal::Deferred { at: 1_250 });
//! assert!(!t.poll(1_249));
//! assert!(t.poll(1_250));
//! assert!(!t.poll(1_300));
//! ```

/// Minimum interval between reactions to window resize, in milliseconds.
pub const RESIZE_THROTTLE_MS: u64 = 250;

/// What to do with a signal right now.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Handle the signal now.
    Fire,
    /// Handle it later; one fire is pending at `at`.
    Deferred {
        /// Timestamp the pending fire becomes due.
        at: u64,
    },
}

/// Trailing-edge throttle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Throttle {
    delay: u64,
    last_fire: Option<u64>,
    pending: Option<u64>,
}

impl Throttle {
    /// Throttle allowing at most one fire per `delay` milliseconds.
    pub fn new(delay: u64) -> Self {
        Self {
            delay,
            last_fire: None,
            pending: None,
        }
    }

    /// Configured window length.
    pub fn delay(&self) -> u64 {
        self.delay
    }

    /// Register a signal at `now`.
    ///
    /// Returns [`Signal::Fire`] when the window since the last fire has
    /// passed; the caller handles the signal immediately. Otherwise the one
    /// pending fire is (re)scheduled for the end of the window.
    pub fn signal(&mut self, now: u64) -> Signal {
        match self.last_fire {
            Some(last) if now.saturating_sub(last) <= self.delay => {
                let at = last.saturating_add(self.delay);
                self.pending = Some(at);
                Signal::Deferred { at }
            }
            _ => {
                self.pending = None;
                self.last_fire = Some(now);
                Signal::Fire
            }
        }
    }

    /// Fire the pending trailing signal if it is due at `now`.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.pending {
            Some(at) if now >= at => {
                self.pending = None;
                self.last_fire = Some(now);
                true
            }
            _ => false,
        }
    }

    /// When the pending fire is due, if one is scheduled.
    pub fn deadline(&self) -> Option<u64> {
        self.pending
    }

    /// Drop any pending fire without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(RESIZE_THROTTLE_MS)
    }
}
