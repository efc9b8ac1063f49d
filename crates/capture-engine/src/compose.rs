//! Effective configuration composition.
//!
//! RetroArch reads only the first occurrence of a key from its config file
//! and ignores any later line for the same key. The composer exploits that:
//! it writes one scratch file with the highest-priority settings first, so
//! the precedence order is simply the write order:
//!
//! 1. forced safety settings (never save config back on exit)
//! 2. save-state directory override, only when that directory exists
//! 3. window-size override, only when a window size was requested
//! 4. user override files, highest priority first
//! 5. the base configuration file
//!
//! The scratch file is a disposable run artifact and is removed on every
//! exit path, including panics and errors, via its drop guard.

use std::io::Write;
use std::path::{Path, PathBuf};

use shadershot_common::error::{ShadershotError, ShadershotResult};
use tempfile::NamedTempFile;

/// A parsed window size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    /// Resolve a window spec: a named preset (`720p`, `1080p`, `1440p`,
    /// `2160p`, `4k`) or a free-form `WIDTHxHEIGHT` / `WIDTH+HEIGHT` pair.
    pub fn parse(spec: &str) -> ShadershotResult<Self> {
        let (width, height) = match spec {
            "720p" => (1280, 720),
            "1080p" => (1920, 1080),
            "1440p" => (2560, 1440),
            "2160p" | "4k" => (3840, 2160),
            other => parse_dimensions(other).ok_or_else(|| {
                ShadershotError::validation(format!(
                    "Try \"1920+1080\" format on window size: {other}"
                ))
            })?,
        };

        Ok(Self { width, height })
    }
}

fn parse_dimensions(spec: &str) -> Option<(u32, u32)> {
    let (width, height) = spec.split_once(['x', '+'])?;
    if !is_digits(width) || !is_digits(height) {
        return None;
    }
    Some((width.parse().ok()?, height.parse().ok()?))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// The scratch effective-config file, deleted when dropped.
#[derive(Debug)]
pub struct ScratchConfig {
    file: NamedTempFile,
}

impl ScratchConfig {
    /// Create an empty scratch config in the system temp directory.
    pub fn new() -> ShadershotResult<Self> {
        let file = tempfile::Builder::new()
            .prefix("tempconfig-")
            .suffix(".cfg")
            .tempfile()
            .map_err(ShadershotError::from)?;
        Ok(Self { file })
    }

    /// Path handed to the emulator via `--config`.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Settings forced on top of everything else, so a batch run can never
/// overwrite the user's real RetroArch configuration on exit.
pub fn forced_config() -> Vec<String> {
    vec![r#"config_save_on_exit = "false""#.to_string()]
}

/// Save-state directory override; empty when the directory does not exist.
pub fn states_dir_config(states_dir: &Path) -> Vec<String> {
    if !states_dir.exists() {
        return Vec::new();
    }
    vec![format!(
        r#"savestate_directory = "{}""#,
        states_dir.display()
    )]
}

/// Window overrides: windowed, non-fullscreen, undecorated, fixed size.
pub fn window_config(window: Option<WindowSize>) -> Vec<String> {
    let Some(WindowSize { width, height }) = window else {
        return Vec::new();
    };

    vec![
        r#"video_fullscreen = "false""#.to_string(),
        r#"video_windowed_fullscreen = "false""#.to_string(),
        r#"video_window_show_decorations = "false""#.to_string(),
        r#"video_window_custom_size_enable = "false""#.to_string(),
        format!(r#"video_window_auto_width_max = "{width}""#),
        format!(r#"video_window_auto_height_max = "{height}""#),
        format!(r#"video_windowed_position_width = "{width}""#),
        format!(r#"video_windowed_position_height = "{height}""#),
    ]
}

/// Write the effective configuration into `out`.
///
/// `overrides` must be ordered highest priority first; each file is copied
/// verbatim, so a duplicate key inside one file also resolves to its first
/// line. The base config goes last.
pub fn compose_config(
    out: &Path,
    base: &Path,
    overrides: &[PathBuf],
    window: Option<WindowSize>,
    states_dir: &Path,
) -> ShadershotResult<()> {
    let mut writer = std::io::BufWriter::new(std::fs::File::create(out)?);

    for line in forced_config() {
        writeln!(writer, "{line}")?;
    }
    for line in states_dir_config(states_dir) {
        writeln!(writer, "{line}")?;
    }
    for line in window_config(window) {
        writeln!(writer, "{line}")?;
    }

    let base = base.to_path_buf();
    for file in overrides.iter().chain(std::iter::once(&base)) {
        let content = match std::fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ShadershotError::file_not_found(file));
            }
            Err(e) => return Err(e.into()),
        };
        writer.write_all(content.as_bytes())?;
        if !content.is_empty() && !content.ends_with('\n') {
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    tracing::debug!(config = %out.display(), "Effective config composed");
    Ok(())
}
