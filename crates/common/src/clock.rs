//! Injectable clock for settle delays.
//!
//! The capture retry loop sleeps briefly before and after each emulator
//! invocation to ride out file-flush races. Tests inject a fake clock so the
//! retry machine can be exercised without real delays.

use std::time::Duration;

/// Source of blocking sleeps.
pub trait Clock {
    /// Block the current thread for the given duration.
    fn sleep(&self, duration: Duration);
}

/// Real wall-clock sleeping via the OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
