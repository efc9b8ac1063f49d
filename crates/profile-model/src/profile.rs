//! Game profiles and their field invariants.
//!
//! A profile describes one game in the batch: which ROM and libretro core to
//! launch, which save-state entry slot to load, how many frames to run
//! before the screenshot, and how the post-process stage should crop the
//! result. Profiles are validated once at load time and immutable after.

use std::path::PathBuf;

/// One validated game entry from the gamelist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameProfile {
    /// Section title, unique within a gamelist.
    pub title: String,

    /// Path to the game ROM. Must exist at load time.
    pub game: PathBuf,

    /// Path to the libretro core. Must exist at load time.
    pub core: PathBuf,

    /// Save-state entry slot to load, 1-9.
    pub slot: u32,

    /// Frames to run before the screenshot is taken, 0-999.
    pub frames: u32,

    /// Separator character substituted for `/` in screenshot filenames.
    pub sep: char,

    /// Crop size as `WIDTHxHEIGHT` with positive integers.
    pub size: String,

    /// Crop position as `X+Y` with non-negative integers.
    pub pos: String,
}

impl GameProfile {
    /// Crop geometry in the form the image tool consumes: `{size}+{pos}`.
    pub fn geometry(&self) -> String {
        format!("{}+{}", self.size, self.pos)
    }
}

/// Caller-supplied fallbacks for profile fields absent in a gamelist section.
#[derive(Debug, Clone)]
pub struct ProfileDefaults {
    pub slot: u32,
    pub frames: u32,
    pub sep: char,
    pub size: String,
    pub pos: String,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            slot: 1,
            frames: 5,
            sep: '／',
            size: "480x480".to_string(),
            pos: "0+0".to_string(),
        }
    }
}

/// Whether `value` matches the crop size pattern `^[1-9][0-9]*x[1-9][0-9]*$`.
pub fn is_valid_size(value: &str) -> bool {
    match value.split_once('x') {
        Some((w, h)) => is_positive_int(w) && is_positive_int(h),
        None => false,
    }
}

/// Whether `value` matches the crop position pattern `^[0-9]+\+[0-9]+$`.
pub fn is_valid_pos(value: &str) -> bool {
    match value.split_once('+') {
        Some((x, y)) => is_non_negative_int(x) && is_non_negative_int(y),
        None => false,
    }
}

fn is_positive_int(s: &str) -> bool {
    is_non_negative_int(s) && !s.starts_with('0')
}

fn is_non_negative_int(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
