//! Capture command assembly.
//!
//! Pure functions from a profile, a shader, and the effective config to the
//! RetroArch invocation and the screenshot path it is expected to produce.
//! No filesystem side effects happen here; directory creation belongs to
//! the run loop.

use std::path::{Path, PathBuf};

use shadershot_common::error::{ShadershotError, ShadershotResult};
use shadershot_common::process::Invocation;
use shadershot_profile_model::GameProfile;

const RETROARCH: &str = "retroarch";

/// Screenshot path for a (profile, shader) capture job.
///
/// The shader path relative to `shader_root` gets its extension replaced by
/// `.png` and its path separators replaced by the profile's separator
/// character, then lands under `output_dir/<title>/`. The separator keeps
/// the shader's directory structure readable in a flat filename.
pub fn screenshot_path(
    shader: &Path,
    shader_root: &Path,
    output_dir: &Path,
    title: &str,
    sep: char,
) -> ShadershotResult<PathBuf> {
    let relative = shader.strip_prefix(shader_root).map_err(|_| {
        ShadershotError::validation(format!(
            "shader {} is not under the shader root {}",
            shader.display(),
            shader_root.display()
        ))
    })?;

    let renamed = relative.with_extension("png");
    let flat = renamed
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join(&sep.to_string());

    Ok(output_dir.join(title).join(flat))
}

/// Assemble the full RetroArch invocation for one capture job.
///
/// The flag layout is fixed: RetroArch is positional-sensitive about the
/// trailing core/game pair, and `--sram-mode noload-nosave` keeps a batch
/// run from touching the user's save data.
pub fn capture_invocation(
    profile: &GameProfile,
    shader: &Path,
    config: &Path,
    screenshot: &Path,
) -> Invocation {
    Invocation::new(RETROARCH)
        .arg("--config")
        .arg(config.to_string_lossy())
        .arg("--sram-mode")
        .arg("noload-nosave")
        .arg("--max-frames-ss")
        .arg("--eof-exit")
        .arg("--set-shader")
        .arg(shader.to_string_lossy())
        .arg("--max-frames-ss-path")
        .arg(screenshot.to_string_lossy())
        .arg("--max-frames")
        .arg(profile.frames.to_string())
        .arg("--entryslot")
        .arg(profile.slot.to_string())
        .arg("--libretro")
        .arg(profile.core.to_string_lossy())
        .arg(profile.game.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> GameProfile {
        GameProfile {
            title: "Game1".to_string(),
            game: PathBuf::from("/roms/game1.sfc"),
            core: PathBuf::from("/cores/snes9x.so"),
            slot: 2,
            frames: 60,
            sep: '／',
            size: "480x480".to_string(),
            pos: "0+0".to_string(),
        }
    }

    #[test]
    fn test_screenshot_path_substitutes_separator() {
        let path = screenshot_path(
            Path::new("/shaders/a/b/c.slangp"),
            Path::new("/shaders"),
            Path::new("out"),
            "Game1",
            '／',
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("out/Game1/a／b／c.png"));
    }

    #[test]
    fn test_screenshot_path_flat_shader() {
        let path = screenshot_path(
            Path::new("/shaders/crt-royale.slangp"),
            Path::new("/shaders"),
            Path::new("out"),
            "Game1",
            '-',
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("out/Game1/crt-royale.png"));
    }

    #[test]
    fn test_screenshot_path_rejects_shader_outside_root() {
        let err = screenshot_path(
            Path::new("/elsewhere/c.slangp"),
            Path::new("/shaders"),
            Path::new("out"),
            "Game1",
            '／',
        )
        .unwrap_err();
        assert!(matches!(err, ShadershotError::Validation { .. }));
    }

    #[test]
    fn test_capture_invocation_flag_order() {
        let invocation = capture_invocation(
            &profile(),
            Path::new("/shaders/a/c.slangp"),
            Path::new("/tmp/tempconfig-x.cfg"),
            Path::new("out/Game1/a／c.png"),
        );

        assert_eq!(invocation.program, "retroarch");
        assert_eq!(
            invocation.args,
            [
                "--config",
                "/tmp/tempconfig-x.cfg",
                "--sram-mode",
                "noload-nosave",
                "--max-frames-ss",
                "--eof-exit",
                "--set-shader",
                "/shaders/a/c.slangp",
                "--max-frames-ss-path",
                "out/Game1/a／c.png",
                "--max-frames",
                "60",
                "--entryslot",
                "2",
                "--libretro",
                "/cores/snes9x.so",
                "/roms/game1.sfc",
            ]
        );
    }
}
