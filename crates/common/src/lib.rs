//! Shadershot Common Utilities
//!
//! Shared infrastructure for all Shadershot crates:
//! - Error types and result aliases
//! - External process invocation with an injectable runner
//! - Injectable clock for settle delays
//! - Tracing/logging initialization
//! - Path expansion for user-supplied paths

pub mod clock;
pub mod error;
pub mod logging;
pub mod paths;
pub mod process;

pub use clock::*;
pub use error::*;
pub use process::*;
