//! Deterministic file collection for the post-process stages.
//!
//! Directory iteration order is filesystem-dependent, so every collection
//! here sorts before returning. The crop collection additionally applies
//! the collage ordering rule: `nearest*` and `bilinear*` files are the
//! unfiltered reference renders and must lead the collage no matter where
//! the alphabet would put them.

use std::path::{Path, PathBuf};

use shadershot_common::error::ShadershotResult;

/// Raw screenshot files of one title, sorted by filename.
///
/// A title without a capture directory yields an empty list: the title
/// simply has nothing to crop, which must not abort sibling titles.
pub fn collect_screenshots(input_dir: &Path, title: &str) -> ShadershotResult<Vec<PathBuf>> {
    let dir = input_dir.join(title);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Crop files of one title in collage order: `nearest*` first, `bilinear*`
/// second, everything else lexicographically after them.
pub fn collect_crops(dir: &Path) -> ShadershotResult<Vec<PathBuf>> {
    let mut nearest = Vec::new();
    let mut bilinear = Vec::new();
    let mut rest = Vec::new();

    if dir.is_dir() {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != "png") {
                continue;
            }

            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            if stem.starts_with("nearest") {
                nearest.push(path);
            } else if stem.starts_with("bilinear") {
                bilinear.push(path);
            } else {
                rest.push(path);
            }
        }
    }

    nearest.sort();
    bilinear.sort();
    rest.sort();

    nearest.extend(bilinear);
    nearest.extend(rest);
    Ok(nearest)
}

/// Every `.png` under `dir`, recursively, sorted.
pub fn collect_pngs(dir: &Path) -> ShadershotResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk_pngs(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk_pngs(dir: &Path, files: &mut Vec<PathBuf>) -> ShadershotResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_pngs(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "png") {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"png").unwrap();
    }

    #[test]
    fn test_collect_crops_reference_renders_lead() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "zebra-crop.png",
            "nearest-crop.png",
            "apple-crop.png",
            "bilinear-crop.png",
        ] {
            touch(&dir.path().join(name));
        }

        let crops = collect_crops(dir.path()).unwrap();
        let names: Vec<_> = crops
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "nearest-crop.png",
                "bilinear-crop.png",
                "apple-crop.png",
                "zebra-crop.png"
            ]
        );
    }

    #[test]
    fn test_collect_crops_skips_non_png() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a-crop.png"));
        touch(&dir.path().join("notes.txt"));
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let crops = collect_crops(dir.path()).unwrap();
        assert_eq!(crops.len(), 1);
    }

    #[test]
    fn test_collect_screenshots_missing_title_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = collect_screenshots(dir.path(), "NoSuchGame").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_screenshots_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let game = dir.path().join("Game1");
        fs::create_dir(&game).unwrap();
        touch(&game.join("b.png"));
        touch(&game.join("a.png"));

        let files = collect_screenshots(dir.path(), "Game1").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.png", "b.png"]);
    }

    #[test]
    fn test_collect_pngs_walks_tree() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("Game1");
        fs::create_dir(&sub).unwrap();
        touch(&dir.path().join("Game1-crop-collage.png"));
        touch(&sub.join("shot-crop.png"));
        touch(&sub.join("shot.webp"));

        let pngs = collect_pngs(dir.path()).unwrap();
        assert_eq!(pngs.len(), 2);
    }
}
