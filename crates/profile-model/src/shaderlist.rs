//! Shader list loading.
//!
//! A flat text file with one shader path per line. Order is significant: it
//! decides the order screenshots are generated in and how their filenames
//! are suffixed. Every listed shader must exist before any capture starts.

use std::path::{Path, PathBuf};

use shadershot_common::error::{ShadershotError, ShadershotResult};
use shadershot_common::paths;

/// Load an ordered list of shader paths from a shader list file.
pub fn load_shaderlist(path: &Path) -> ShadershotResult<Vec<PathBuf>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ShadershotError::file_not_found(path));
        }
        Err(e) => return Err(e.into()),
    };

    let mut shaders = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let shader = paths::expand(line);
        if !shader.exists() {
            return Err(ShadershotError::file_not_found(shader));
        }
        shaders.push(shader);
    }

    tracing::debug!(shaders = shaders.len(), "Shader list loaded");
    Ok(shaders)
}
