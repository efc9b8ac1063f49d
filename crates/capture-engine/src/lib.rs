//! Shadershot Capture Engine
//!
//! Everything between validated inputs and screenshot files on disk:
//!
//! - `compose` layers the scratch RetroArch configuration with strict
//!   first-write-wins precedence
//! - `command` assembles the emulator invocation and the screenshot path a
//!   job is expected to produce
//! - `driver` runs each job through a bounded retry/poll loop, trusting
//!   only the existence of the expected file
//!
//! Jobs execute strictly one at a time; the workload is bound by the
//! external emulator process, not by the CPU.

pub mod command;
pub mod compose;
pub mod driver;

pub use compose::{ScratchConfig, WindowSize};
pub use driver::{CaptureDriver, CaptureOutcome, CaptureState, DEFAULT_TRIES};
