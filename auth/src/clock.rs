//! Time source for token issuance and expiry checks.
//!
//! Production code uses [`SystemClock`]. Tests can freeze and advance time
//! with `FixedClock`, available under `cfg(test)` or the `testing` feature.

use std::fmt::Debug;

#[cfg(any(test, feature = "testing"))]
use std::sync::atomic::AtomicI64;
#[cfg(any(test, feature = "testing"))]
use std::sync::atomic::Ordering;

/// A provider of the current time in whole seconds since the Unix epoch.
pub trait Clock: Send + Sync + Debug {
    fn now_secs(&self) -> i64;
}

/// Wall-clock time via [`chrono::Utc`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock frozen at a given instant until moved explicitly.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct FixedClock {
    secs: AtomicI64,
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    pub fn new(secs: i64) -> Self {
        Self {
            secs: AtomicI64::new(secs),
        }
    }

    /// Freeze at the current wall-clock second.
    pub fn now() -> Self {
        Self::new(SystemClock.now_secs())
    }

    pub fn set(&self, secs: i64) {
        self.secs.store(secs, Ordering::SeqCst);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.secs.fetch_add(by.num_seconds(), Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        self.secs.load(Ordering::SeqCst)
    }
}
