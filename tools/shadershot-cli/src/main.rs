//! Shadershot CLI — automated RetroArch shader screenshots and crops.
//!
//! Usage:
//!   shadershot capture [OPTIONS]   Capture screenshots for every profile × shader
//!   shadershot crop [OPTIONS]      Crop screenshots and compose per-title collages
//!   shadershot batch [OPTIONS]     Capture and crop across multiple resolutions

use clap::{Parser, Subcommand};

mod commands;

use commands::batch::BatchArgs;
use commands::capture::CaptureArgs;
use commands::crop::CropArgs;
use shadershot_common::logging::Verbosity;

#[derive(Parser)]
#[command(
    name = "shadershot",
    about = "Automated RetroArch screenshots, crops, and collages",
    version,
    author
)]
struct Cli {
    /// Echo every external invocation before it runs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create automated screenshots with RetroArch using save-state entry slots
    Capture(CaptureArgs),

    /// Create crops and collages from captured screenshots
    Crop(CropArgs),

    /// Run a capture pass and a crop pass for each requested resolution
    Batch(BatchArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else if cli.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };
    shadershot_common::logging::init_logging(verbosity);

    let quiet = cli.quiet;
    match cli.command {
        Commands::Capture(args) => commands::capture::run(args, quiet),
        Commands::Crop(args) => commands::crop::run(args, quiet),
        Commands::Batch(args) => commands::batch::run(args, quiet),
    }
}
