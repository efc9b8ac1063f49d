//! Gamelist loading and validation.
//!
//! The gamelist is a section-per-title key-value file:
//!
//! ```ini
//! [Super Metroid]
//! game = ~/roms/snes/Super Metroid.sfc
//! core = ~/.config/retroarch/cores/snes9x_libretro.so
//! slot = 2
//! size = 480x480
//! pos = 320+200
//! ```
//!
//! Recognized keys are `game`, `core`, `slot`, `frames`, `sep`, `size`, and
//! `pos`; other keys are ignored so the file can be shared with other
//! tools. Loading is all-or-nothing: a single malformed profile aborts the
//! run before any capture starts, with an error naming the offending title
//! and field.

use std::path::Path;

use shadershot_common::error::{ShadershotError, ShadershotResult};
use shadershot_common::paths;

use crate::profile::{is_valid_pos, is_valid_size, GameProfile, ProfileDefaults};

/// Load and validate all game profiles from a gamelist file, in file order.
pub fn load_gamelist(
    path: &Path,
    defaults: &ProfileDefaults,
) -> ShadershotResult<Vec<GameProfile>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ShadershotError::file_not_found(path));
        }
        Err(e) => return Err(e.into()),
    };

    let sections = parse_sections(&content, path)?;
    let mut profiles = Vec::with_capacity(sections.len());

    for section in sections {
        if profiles.iter().any(|p: &GameProfile| p.title == section.title) {
            return Err(ShadershotError::validation(format!(
                "duplicate profile [{}]",
                section.title
            )));
        }
        profiles.push(validate_profile(section, defaults)?);
    }

    tracing::debug!(profiles = profiles.len(), "Gamelist loaded");
    Ok(profiles)
}

/// One raw `[title]` section with its key-value pairs, order preserved.
struct Section {
    title: String,
    entries: Vec<(String, String)>,
}

impl Section {
    /// First value for a key; keys were lowercased at parse time.
    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn parse_sections(content: &str, path: &Path) -> ShadershotResult<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();

    for (lineno, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(title) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            sections.push(Section {
                title: title.trim().to_string(),
                entries: Vec::new(),
            });
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ShadershotError::validation(format!(
                "{}:{}: expected `key = value`, got: {line}",
                path.display(),
                lineno + 1
            )));
        };

        let Some(section) = sections.last_mut() else {
            return Err(ShadershotError::validation(format!(
                "{}:{}: entry outside of any [section]: {line}",
                path.display(),
                lineno + 1
            )));
        };

        section
            .entries
            .push((key.trim().to_ascii_lowercase(), value.trim().to_string()));
    }

    Ok(sections)
}

fn validate_profile(
    section: Section,
    defaults: &ProfileDefaults,
) -> ShadershotResult<GameProfile> {
    let title = section.title.clone();

    let game = required_path(&section, "game")?;
    let core = required_path(&section, "core")?;
    let slot = numeric_field(&section, "slot", defaults.slot, 1..=9, "1-9")?;
    let frames = numeric_field(&section, "frames", defaults.frames, 0..=999, "0-999")?;

    let sep = match section.get("sep") {
        Some(value) => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(ShadershotError::validation(format!(
                        "[{title}] sep accepts only 1 character: {value}"
                    )));
                }
            }
        }
        None => defaults.sep,
    };

    let size = section.get("size").unwrap_or(&defaults.size).to_string();
    if !is_valid_size(&size) {
        return Err(ShadershotError::validation(format!(
            "[{title}] size has wrong format: {size}"
        )));
    }

    let pos = section.get("pos").unwrap_or(&defaults.pos).to_string();
    if !is_valid_pos(&pos) {
        return Err(ShadershotError::validation(format!(
            "[{title}] pos has wrong format: {pos}"
        )));
    }

    Ok(GameProfile {
        title,
        game,
        core,
        slot,
        frames,
        sep,
        size,
        pos,
    })
}

fn required_path(section: &Section, field: &str) -> ShadershotResult<std::path::PathBuf> {
    let Some(value) = section.get(field) else {
        return Err(ShadershotError::validation(format!(
            "[{}] missing required key: {field}",
            section.title
        )));
    };

    let path = paths::expand(value);
    if !path.exists() {
        return Err(ShadershotError::validation(format!(
            "[{}] {field} file not found: {}",
            section.title,
            path.display()
        )));
    }

    Ok(path)
}

fn numeric_field(
    section: &Section,
    field: &str,
    default: u32,
    range: std::ops::RangeInclusive<u32>,
    range_text: &str,
) -> ShadershotResult<u32> {
    let reject = |value: &dyn std::fmt::Display| {
        ShadershotError::validation(format!(
            "[{}] {field} accepts only {range_text}: {value}",
            section.title
        ))
    };

    // The caller-supplied fallback goes through the same range check as a
    // value written in the file.
    let effective = match section.get(field) {
        Some(value) => value.parse::<u32>().map_err(|_| reject(&value))?,
        None => default,
    };

    if !range.contains(&effective) {
        return Err(reject(&effective));
    }
    Ok(effective)
}
