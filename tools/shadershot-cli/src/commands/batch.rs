//! Run a capture pass and a crop pass for each requested resolution.

use clap::Args;

use shadershot_capture_engine::compose::WindowSize;

use super::capture::{CaptureArgs, DEFAULT_GAMELIST, DEFAULT_SHADERLIST};
use super::crop::CropArgs;
use super::{capture, crop};

pub const DEFAULT_RESOLUTIONS: &str = "720p,1080p,1440p,4k";

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Path to the list of game profile settings
    #[arg(long, value_name = "gamelist.ini", default_value = DEFAULT_GAMELIST)]
    pub gamelist: String,

    /// Path to the text file listing shader paths, one per line
    #[arg(long, value_name = "shaderlist.txt", default_value = DEFAULT_SHADERLIST)]
    pub shaderlist: String,

    /// Config file to append temporarily; repeatable, each following file
    /// has higher priority than the one before it
    #[arg(long = "appendconfig", value_name = "append.cfg")]
    pub appendconfig: Vec<String>,

    /// Comma-separated list of window sizes, e.g. "1920+1080,4k"
    #[arg(long, value_name = "720p,1080p,1440p,4k", default_value = DEFAULT_RESOLUTIONS)]
    pub resolution: String,

    /// Convert collages to lossless webp format, keep the PNGs
    #[arg(long)]
    pub webp: bool,
}

pub fn run(args: BatchArgs, quiet: bool) -> anyhow::Result<()> {
    let resolutions: Vec<&str> = args
        .resolution
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .collect();

    // A typo in any resolution aborts before the first pass runs.
    for resolution in &resolutions {
        WindowSize::parse(resolution)?;
    }

    for resolution in resolutions {
        let screenshots_dir = format!("screenshots/{resolution}");
        let crops_dir = format!("crops/{resolution}");

        tracing::info!(resolution, "Starting batch pass");

        capture::run(
            CaptureArgs::for_resolution(
                args.gamelist.clone(),
                args.shaderlist.clone(),
                args.appendconfig.clone(),
                resolution.to_string(),
                screenshots_dir.clone(),
            ),
            quiet,
        )?;

        crop::run(
            CropArgs::for_resolution(
                args.gamelist.clone(),
                screenshots_dir,
                crops_dir,
                args.webp,
            ),
            quiet,
        )?;
    }

    Ok(())
}
