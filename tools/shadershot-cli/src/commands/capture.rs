//! Capture screenshots for every profile × shader combination.

use std::path::PathBuf;

use clap::Args;

use shadershot_capture_engine::command::{capture_invocation, screenshot_path};
use shadershot_capture_engine::compose::{compose_config, ScratchConfig, WindowSize};
use shadershot_capture_engine::driver::{CaptureDriver, CaptureState, DEFAULT_TRIES};
use shadershot_common::clock::SystemClock;
use shadershot_common::error::{ShadershotError, ShadershotResult};
use shadershot_common::paths;
use shadershot_common::process::SystemRunner;
use shadershot_profile_model::{load_gamelist, load_shaderlist, GameProfile, ProfileDefaults};

pub const DEFAULT_GAMELIST: &str = "gamelist.ini";
pub const DEFAULT_SHADERLIST: &str = "shaderlist.txt";
pub const DEFAULT_SHADERDIR: &str = "~/.config/retroarch/shaders/shaders_slang/";
pub const DEFAULT_CONFIG: &str = "~/.config/retroarch/retroarch.cfg";
pub const DEFAULT_APPENDCONFIG: &str = "append.cfg";
pub const DEFAULT_OUTPUTDIR: &str = "screenshots/";
pub const DEFAULT_STATESDIR: &str = "states/";
pub const DEFAULT_SEP: &str = "／";

#[derive(Debug, Args)]
pub struct CaptureArgs {
    /// Path to the list of game profile settings
    #[arg(long, value_name = "gamelist.ini", default_value = DEFAULT_GAMELIST)]
    pub gamelist: String,

    /// Path to the text file listing shader paths, one per line
    #[arg(long, value_name = "shaderlist.txt", default_value = DEFAULT_SHADERLIST)]
    pub shaderlist: String,

    /// RetroArch shaders folder used to determine relative shader paths
    #[arg(long, value_name = "dir", default_value = DEFAULT_SHADERDIR)]
    pub shaderdir: String,

    /// Config file to append temporarily; repeatable, each following file
    /// has higher priority than the one before it
    #[arg(long = "appendconfig", value_name = "append.cfg")]
    pub appendconfig: Vec<String>,

    /// Base RetroArch config file to read from
    #[arg(long, value_name = "retroarch.cfg", default_value = DEFAULT_CONFIG)]
    pub config: String,

    /// Output folder for created screenshots
    #[arg(long, value_name = "dir", default_value = DEFAULT_OUTPUTDIR)]
    pub outputdir: String,

    /// Folder to look for save-state files in
    #[arg(long, value_name = "dir", default_value = DEFAULT_STATESDIR)]
    pub statesdir: String,

    /// Save-state entry slot to load when a profile sets none
    #[arg(long, value_name = "1", default_value_t = 1)]
    pub slot: u32,

    /// Frames to run before capture when a profile sets none
    #[arg(long, value_name = "5", default_value_t = 5)]
    pub frames: u32,

    /// Force window mode at a resolution, e.g. "1080p" or "1920+1080"
    #[arg(long, value_name = "width+height")]
    pub window: Option<String>,

    /// Separator for screenshot filenames including subdirectories
    #[arg(long, value_name = "char", default_value = DEFAULT_SEP)]
    pub sep: String,

    /// Times to run the capture command until it succeeds
    #[arg(long, value_name = "5", default_value_t = DEFAULT_TRIES)]
    pub tries: u32,

    /// Overwrite existing screenshots
    #[arg(long)]
    pub force: bool,
}

impl CaptureArgs {
    /// Args for one batch pass: defaults everywhere except the shared input
    /// files, the forced window resolution, and the per-resolution output.
    pub fn for_resolution(
        gamelist: String,
        shaderlist: String,
        appendconfig: Vec<String>,
        window: String,
        outputdir: String,
    ) -> Self {
        Self {
            gamelist,
            shaderlist,
            shaderdir: DEFAULT_SHADERDIR.to_string(),
            appendconfig,
            config: DEFAULT_CONFIG.to_string(),
            outputdir,
            statesdir: DEFAULT_STATESDIR.to_string(),
            slot: 1,
            frames: 5,
            window: Some(window),
            sep: DEFAULT_SEP.to_string(),
            tries: DEFAULT_TRIES,
            force: false,
        }
    }
}

/// Immutable, validated inputs for one capture run. Built once before the
/// first external process starts; any validation failure aborts here.
struct CaptureRun {
    games: Vec<GameProfile>,
    shaders: Vec<PathBuf>,
    shader_root: PathBuf,
    output_dir: PathBuf,
    base_config: PathBuf,
    /// Override config files, highest priority first.
    overrides: Vec<PathBuf>,
    states_dir: PathBuf,
    window: Option<WindowSize>,
    tries: u32,
    force: bool,
}

fn build_run(args: &CaptureArgs) -> ShadershotResult<CaptureRun> {
    let sep = super::single_char(&args.sep)?;
    let defaults = ProfileDefaults {
        slot: args.slot,
        frames: args.frames,
        sep,
        ..ProfileDefaults::default()
    };

    let window = args.window.as_deref().map(WindowSize::parse).transpose()?;
    let games = load_gamelist(&paths::expand(&args.gamelist), &defaults)?;
    let shaders = load_shaderlist(&paths::expand(&args.shaderlist))?;
    let shader_root = paths::expand(&args.shaderdir);

    for shader in &shaders {
        if shader.strip_prefix(&shader_root).is_err() {
            return Err(ShadershotError::validation(format!(
                "shader {} is not under the shader root {}",
                shader.display(),
                shader_root.display()
            )));
        }
    }

    // The last file given on the command line has the highest priority, so
    // it goes first into the composed config.
    let overrides: Vec<PathBuf> = if args.appendconfig.is_empty() {
        vec![paths::expand(DEFAULT_APPENDCONFIG)]
    } else {
        args.appendconfig
            .iter()
            .rev()
            .map(|file| paths::expand(file))
            .collect()
    };

    Ok(CaptureRun {
        games,
        shaders,
        shader_root,
        output_dir: paths::expand(&args.outputdir),
        base_config: paths::expand(&args.config),
        overrides,
        states_dir: paths::expand(&args.statesdir),
        window,
        tries: args.tries,
        force: args.force,
    })
}

pub fn run(args: CaptureArgs, quiet: bool) -> anyhow::Result<()> {
    let run = build_run(&args)?;

    // Scratch config lives for the whole run and is removed on every exit
    // path when this guard drops.
    let scratch = ScratchConfig::new()?;
    compose_config(
        scratch.path(),
        &run.base_config,
        &run.overrides,
        run.window,
        &run.states_dir,
    )?;

    let mut runner = SystemRunner;
    let clock = SystemClock;

    let mut created = 0u32;
    let mut incomplete = 0u32;

    for game in &run.games {
        if !quiet {
            println!("Processing [{}] ...", game.title);
        }

        for shader in &run.shaders {
            let expected = screenshot_path(
                shader,
                &run.shader_root,
                &run.output_dir,
                &game.title,
                game.sep,
            )?;
            if let Some(parent) = expected.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let invocation = capture_invocation(game, shader, scratch.path(), &expected);
            let mut driver = CaptureDriver::new(&mut runner, &clock, run.tries, run.force);
            let outcome = driver.drive(&invocation, &expected);

            if outcome.created() {
                created += 1;
            }
            if outcome.state == CaptureState::Exhausted {
                incomplete += 1;
                tracing::warn!(
                    title = %game.title,
                    shader = %shader.display(),
                    tries = run.tries,
                    "Capture incomplete, no screenshot after retry budget"
                );
            }
        }
    }

    if !quiet {
        println!();
        println!("{created} screenshot(s) created.");
    }
    if incomplete > 0 {
        tracing::warn!(jobs = incomplete, "Capture jobs ended without a screenshot");
    }

    Ok(())
}
