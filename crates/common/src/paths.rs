//! Path expansion for user-supplied paths.
//!
//! Gamelist entries, shader lists, and CLI flags all accept paths written
//! the way people write them in shell configs: `~/roms/game.sfc`,
//! `$HOME/.config/retroarch/retroarch.cfg`, `${CORES}/snes9x.so`. This
//! mirrors the environment lookups the rest of the workspace uses; unknown
//! variables are left untouched rather than erased.

use std::path::PathBuf;

/// Expand `~` and environment variables in a path string.
pub fn expand(input: &str) -> PathBuf {
    let expanded = expand_vars(input);

    if let Some(rest) = expanded.strip_prefix('~') {
        // Only `~` and `~/...` are supported; `~user` is left alone.
        if rest.is_empty() {
            if let Some(home) = home_dir() {
                return home;
            }
        } else if let Some(tail) = rest.strip_prefix('/') {
            if let Some(home) = home_dir() {
                return home.join(tail);
            }
        }
    }

    PathBuf::from(expanded)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Substitute `$VAR` and `${VAR}` occurrences from the environment.
fn expand_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;

    while let Some(offset) = input[pos..].find('$') {
        let dollar = pos + offset;
        out.push_str(&input[pos..dollar]);

        let rest = &input[dollar + 1..];
        let (name, consumed) = if let Some(inner) = rest.strip_prefix('{') {
            match inner.find('}') {
                Some(end) => (&inner[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = rest
                .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                .unwrap_or(rest.len());
            (&rest[..end], end)
        };

        if name.is_empty() {
            out.push('$');
            pos = dollar + 1;
            continue;
        }

        match std::env::var(name) {
            Ok(value) => out.push_str(&value),
            // Unknown variable: keep the original text.
            Err(_) => {
                out.push('$');
                out.push_str(&rest[..consumed]);
            }
        }

        pos = dollar + 1 + consumed;
    }

    out.push_str(&input[pos..]);
    out
}
