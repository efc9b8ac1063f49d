//! Per-title crop and collage pipeline.
//!
//! Jobs run strictly sequentially. A failed or skipped job never aborts
//! sibling jobs; success is counted by re-checking the output file after
//! the external tool ran, since its exit status is not trusted as
//! evidence.

use std::path::Path;

use shadershot_common::error::ShadershotResult;
use shadershot_common::process::CommandRunner;
use shadershot_profile_model::GameProfile;

use crate::collect::{collect_crops, collect_pngs, collect_screenshots};
use crate::command::{collage_invocation, collage_path, crop_invocation, webp_invocation};

/// What the post-process run should do besides cropping.
#[derive(Debug, Clone, Copy)]
pub struct PostProcessOptions {
    /// Overwrite existing crops and collages.
    pub force: bool,

    /// Build a collage per title after cropping.
    pub collage: bool,
}

/// Counters reported in the final summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PostProcessStats {
    pub crops: u32,
    pub collages: u32,
}

impl PostProcessStats {
    pub fn add(&mut self, other: PostProcessStats) {
        self.crops += other.crops;
        self.collages += other.collages;
    }
}

/// Crop all screenshots of one title, then optionally compose its collage.
pub fn process_title(
    runner: &mut dyn CommandRunner,
    profile: &GameProfile,
    input_dir: &Path,
    output_dir: &Path,
    options: &PostProcessOptions,
) -> ShadershotResult<PostProcessStats> {
    let mut stats = PostProcessStats::default();

    let out_game_dir = output_dir.join(&profile.title);
    std::fs::create_dir_all(&out_game_dir)?;

    let screenshots = collect_screenshots(input_dir, &profile.title)?;
    if screenshots.is_empty() {
        tracing::warn!(title = %profile.title, "No screenshots to crop");
    }

    let geometry = profile.geometry();
    for infile in &screenshots {
        let (invocation, outfile) =
            crop_invocation(infile, &out_game_dir, &geometry, options.force);
        let Some(invocation) = invocation else {
            continue;
        };

        if let Err(e) = runner.run(&invocation) {
            tracing::warn!(error = %e, file = %infile.display(), "Crop failed to run");
        }
        if outfile.exists() {
            stats.crops += 1;
        }
    }

    if !options.collage {
        return Ok(stats);
    }

    let crops = collect_crops(&out_game_dir)?;
    let outfile = collage_path(output_dir, &profile.title);
    let invocation = collage_invocation(
        &profile.title,
        &profile.size,
        &crops,
        profile.sep,
        &outfile,
        options.force,
    );
    if let Some(invocation) = invocation {
        if let Err(e) = runner.run(&invocation) {
            tracing::warn!(error = %e, title = %profile.title, "Collage failed to run");
        }
        if outfile.exists() {
            stats.collages += 1;
        }
    }

    Ok(stats)
}

/// Convert every PNG under the output tree to lossless webp, keeping the
/// originals.
pub fn convert_tree_to_webp(
    runner: &mut dyn CommandRunner,
    output_dir: &Path,
) -> ShadershotResult<()> {
    let pngs = collect_pngs(output_dir)?;
    let Some(invocation) = webp_invocation(&pngs) else {
        tracing::debug!(dir = %output_dir.display(), "No PNG files to convert");
        return Ok(());
    };

    if let Err(e) = runner.run(&invocation) {
        tracing::warn!(error = %e, "Webp conversion failed to run");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    use shadershot_common::error::ShadershotResult;
    use shadershot_common::process::Invocation;

    /// Records invocations and simulates the tool by creating the output
    /// file (the last argument).
    #[derive(Default)]
    struct FakeMagick {
        invocations: Vec<Invocation>,
        create_outputs: bool,
    }

    impl CommandRunner for FakeMagick {
        fn run(&mut self, invocation: &Invocation) -> ShadershotResult<()> {
            self.invocations.push(invocation.clone());
            if self.create_outputs {
                if let Some(out) = invocation.args.last() {
                    fs::write(out, b"png").unwrap();
                }
            }
            Ok(())
        }
    }

    fn profile(title: &str) -> GameProfile {
        GameProfile {
            title: title.to_string(),
            game: PathBuf::from("/roms/g.sfc"),
            core: PathBuf::from("/cores/c.so"),
            slot: 1,
            frames: 5,
            sep: '／',
            size: "480x480".to_string(),
            pos: "0+0".to_string(),
        }
    }

    fn seed_screenshots(input_dir: &Path, title: &str, names: &[&str]) {
        let dir = input_dir.join(title);
        fs::create_dir_all(&dir).unwrap();
        for name in names {
            fs::write(dir.join(name), b"png").unwrap();
        }
    }

    #[test]
    fn test_crops_and_collage_are_counted_by_existence() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("screenshots");
        let output = dir.path().join("crops");
        seed_screenshots(&input, "Game1", &["a.png", "b.png"]);

        let mut runner = FakeMagick {
            create_outputs: true,
            ..Default::default()
        };
        let options = PostProcessOptions {
            force: false,
            collage: true,
        };

        let stats = process_title(&mut runner, &profile("Game1"), &input, &output, &options).unwrap();
        assert_eq!(stats.crops, 2);
        assert_eq!(stats.collages, 1);
        assert!(output.join("Game1-crop-collage.png").exists());

        // Two crops plus one montage.
        assert_eq!(runner.invocations.len(), 3);
        assert_eq!(runner.invocations[0].program, "convert");
        assert_eq!(runner.invocations[2].program, "montage");
    }

    #[test]
    fn test_tool_without_output_counts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("screenshots");
        let output = dir.path().join("crops");
        seed_screenshots(&input, "Game1", &["a.png"]);

        let mut runner = FakeMagick::default();
        let options = PostProcessOptions {
            force: false,
            collage: false,
        };

        let stats = process_title(&mut runner, &profile("Game1"), &input, &output, &options).unwrap();
        assert_eq!(stats.crops, 0);
        assert_eq!(runner.invocations.len(), 1);
    }

    #[test]
    fn test_rerun_skips_existing_crops() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("screenshots");
        let output = dir.path().join("crops");
        seed_screenshots(&input, "Game1", &["a.png"]);

        let options = PostProcessOptions {
            force: false,
            collage: false,
        };

        let mut first = FakeMagick {
            create_outputs: true,
            ..Default::default()
        };
        process_title(&mut first, &profile("Game1"), &input, &output, &options).unwrap();

        let mut second = FakeMagick {
            create_outputs: true,
            ..Default::default()
        };
        let stats =
            process_title(&mut second, &profile("Game1"), &input, &output, &options).unwrap();
        assert!(second.invocations.is_empty());
        assert_eq!(stats.crops, 0);
    }

    #[test]
    fn test_collage_skipped_without_crops() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("screenshots");
        let output = dir.path().join("crops");

        let mut runner = FakeMagick {
            create_outputs: true,
            ..Default::default()
        };
        let options = PostProcessOptions {
            force: false,
            collage: true,
        };

        let stats = process_title(&mut runner, &profile("Empty"), &input, &output, &options).unwrap();
        assert_eq!(stats, PostProcessStats::default());
        assert!(runner.invocations.is_empty());
    }

    #[test]
    fn test_webp_stage_collects_whole_tree() {
        let dir = tempfile::tempdir().unwrap();
        let game = dir.path().join("Game1");
        fs::create_dir_all(&game).unwrap();
        fs::write(dir.path().join("Game1-crop-collage.png"), b"png").unwrap();
        fs::write(game.join("a-crop.png"), b"png").unwrap();

        let mut runner = FakeMagick::default();
        convert_tree_to_webp(&mut runner, dir.path()).unwrap();

        assert_eq!(runner.invocations.len(), 1);
        let invocation = &runner.invocations[0];
        assert_eq!(invocation.program, "mogrify");
        assert_eq!(
            invocation.args.iter().filter(|a| a.ends_with(".png")).count(),
            2
        );
    }
}
