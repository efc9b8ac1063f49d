//! Crop screenshots and compose per-title collages.

use clap::Args;

use shadershot_common::paths;
use shadershot_common::process::SystemRunner;
use shadershot_postprocess::{
    convert_tree_to_webp, process_title, PostProcessOptions, PostProcessStats,
};
use shadershot_profile_model::{load_gamelist, ProfileDefaults};

use super::capture::{DEFAULT_GAMELIST, DEFAULT_SEP};

pub const DEFAULT_INPUTDIR: &str = "screenshots/";
pub const DEFAULT_OUTPUTDIR: &str = "crops/";
pub const DEFAULT_SIZE: &str = "480x480";
pub const DEFAULT_POS: &str = "0+0";

#[derive(Debug, Args)]
pub struct CropArgs {
    /// Path to the list of game profile settings
    #[arg(long, value_name = "gamelist.ini", default_value = DEFAULT_GAMELIST)]
    pub gamelist: String,

    /// Source folder of screenshots to create crops of
    #[arg(long, value_name = "dir", default_value = DEFAULT_INPUTDIR)]
    pub inputdir: String,

    /// Output folder for created crops
    #[arg(long, value_name = "dir", default_value = DEFAULT_OUTPUTDIR)]
    pub outputdir: String,

    /// Separator in screenshot filenames including subdirectories
    #[arg(long, value_name = "char", default_value = DEFAULT_SEP)]
    pub sep: String,

    /// Crop width and height when a profile sets none
    #[arg(long, value_name = "480x480", default_value = DEFAULT_SIZE)]
    pub size: String,

    /// Crop starting position when a profile sets none
    #[arg(long, value_name = "0+0", default_value = DEFAULT_POS)]
    pub pos: String,

    /// Overwrite existing crops and collages
    #[arg(long)]
    pub force: bool,

    /// Pass on creating collages out of the crops
    #[arg(long)]
    pub nocollage: bool,

    /// Convert output images to lossless webp format, keep the PNGs
    #[arg(long)]
    pub webp: bool,
}

impl CropArgs {
    /// Args for one batch pass: defaults everywhere except the shared
    /// gamelist and the per-resolution directories.
    pub fn for_resolution(
        gamelist: String,
        inputdir: String,
        outputdir: String,
        webp: bool,
    ) -> Self {
        Self {
            gamelist,
            inputdir,
            outputdir,
            sep: DEFAULT_SEP.to_string(),
            size: DEFAULT_SIZE.to_string(),
            pos: DEFAULT_POS.to_string(),
            force: false,
            nocollage: false,
            webp,
        }
    }
}

pub fn run(args: CropArgs, quiet: bool) -> anyhow::Result<()> {
    let sep = super::single_char(&args.sep)?;
    let defaults = ProfileDefaults {
        sep,
        size: args.size.clone(),
        pos: args.pos.clone(),
        ..ProfileDefaults::default()
    };

    let games = load_gamelist(&paths::expand(&args.gamelist), &defaults)?;
    let input_dir = paths::expand(&args.inputdir);
    let output_dir = paths::expand(&args.outputdir);
    std::fs::create_dir_all(&output_dir)?;

    let options = PostProcessOptions {
        force: args.force,
        collage: !args.nocollage,
    };

    let mut runner = SystemRunner;
    let mut stats = PostProcessStats::default();

    for game in &games {
        if !quiet {
            println!("Processing [{}] ...", game.title);
        }
        stats.add(process_title(
            &mut runner,
            game,
            &input_dir,
            &output_dir,
            &options,
        )?);
    }

    if args.webp {
        if !quiet {
            println!("Processing webp conversion ...");
        }
        convert_tree_to_webp(&mut runner, &output_dir)?;
    }

    if !quiet {
        println!();
        println!("{} crop(s) created.", stats.crops);
        println!("{} collage(s) created.", stats.collages);
    }

    Ok(())
}
