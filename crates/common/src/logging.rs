//! Logging and tracing initialization.

/// How much output the user asked for.
///
/// `Quiet` keeps errors only, `Verbose` additionally echoes every external
/// invocation before it runs (they are logged at debug level).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// Default filter directive for this verbosity.
    pub fn filter(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Initialize the tracing subscriber for the given verbosity.
///
/// `RUST_LOG` still takes precedence when set, so a filter like
/// `shadershot_capture_engine=trace` works regardless of the CLI flags.
pub fn init_logging(verbosity: Verbosity) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
