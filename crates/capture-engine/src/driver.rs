//! Capture retry driver.
//!
//! RetroArch is occasionally flaky about flushing the screenshot file, so a
//! single invocation is not trusted to produce it. The driver runs the
//! capture command inside a bounded retry loop with short settle delays and
//! polls for the expected file; existence of that file is the only success
//! signal, never the process exit status.

use std::path::Path;
use std::time::Duration;

use shadershot_common::clock::Clock;
use shadershot_common::process::{CommandRunner, Invocation};

/// Settle delay before and after each emulator invocation.
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Default retry budget per capture job.
pub const DEFAULT_TRIES: u32 = 5;

/// States of the capture retry machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Job accepted, nothing run yet.
    Pending,
    /// Retry loop in progress.
    Running,
    /// The expected file exists.
    Success,
    /// Retry budget spent without the file appearing.
    Exhausted,
}

/// Result of driving one capture job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOutcome {
    /// Terminal state, either `Success` or `Exhausted`.
    pub state: CaptureState,

    /// How many times the capture command was actually invoked.
    pub invocations: u32,
}

impl CaptureOutcome {
    /// Whether the expected file exists now.
    pub fn succeeded(&self) -> bool {
        self.state == CaptureState::Success
    }

    /// Whether this run created the file (as opposed to finding it).
    pub fn created(&self) -> bool {
        self.succeeded() && self.invocations > 0
    }
}

/// Drives capture jobs through the retry machine, one at a time.
pub struct CaptureDriver<'a> {
    runner: &'a mut dyn CommandRunner,
    clock: &'a dyn Clock,
    tries: u32,
    force: bool,
    settle: Duration,
}

impl<'a> CaptureDriver<'a> {
    pub fn new(runner: &'a mut dyn CommandRunner, clock: &'a dyn Clock, tries: u32, force: bool) -> Self {
        Self {
            runner,
            clock,
            tries,
            force,
            settle: SETTLE_DELAY,
        }
    }

    /// Run one capture job until `expected` exists or the budget is spent.
    ///
    /// Idempotent short-circuit: when not forcing and the file is already
    /// there, nothing is invoked and the job counts as successful. A
    /// spawn failure counts as a spent attempt; exhaustion is the caller's
    /// signal to report and move on, it never aborts the batch.
    pub fn drive(&mut self, invocation: &Invocation, expected: &Path) -> CaptureOutcome {
        let mut state = CaptureState::Pending;
        let mut remaining = self.tries;
        let mut invocations = 0;

        loop {
            state = match state {
                CaptureState::Pending => {
                    if !self.force && expected.exists() {
                        tracing::debug!(
                            file = %expected.display(),
                            "Screenshot already exists, skipping"
                        );
                        CaptureState::Success
                    } else {
                        CaptureState::Running
                    }
                }
                CaptureState::Running => {
                    if remaining == 0 {
                        CaptureState::Exhausted
                    } else {
                        remaining -= 1;
                        self.clock.sleep(self.settle);
                        invocations += 1;
                        if let Err(e) = self.runner.run(invocation) {
                            tracing::warn!(error = %e, "Capture process failed to start");
                        }
                        self.clock.sleep(self.settle);

                        if expected.exists() {
                            CaptureState::Success
                        } else {
                            CaptureState::Running
                        }
                    }
                }
                CaptureState::Success | CaptureState::Exhausted => break,
            };
        }

        CaptureOutcome { state, invocations }
    }
}
