//! ImageMagick command assembly for crops, collages, and conversion.
//!
//! Pure builders; a builder returns `None` instead of an invocation when
//! the skip-if-exists policy applies, so re-runs are naturally idempotent
//! and an interrupted batch resumes by doing nothing for finished outputs.

use std::path::{Path, PathBuf};

use shadershot_common::process::Invocation;

const CONVERT: &str = "convert";
const MONTAGE: &str = "montage";
const MOGRIFY: &str = "mogrify";

/// Crop filename suffix marker; also where labels are cut off.
const CROP_MARKER: &str = "-crop";

/// Build the crop invocation for one screenshot.
///
/// The output filename embeds the geometry, so crops at different
/// geometries coexist. Returns the output path in any case; the invocation
/// is `None` when the output already exists and force is off.
pub fn crop_invocation(
    infile: &Path,
    out_dir: &Path,
    geometry: &str,
    force: bool,
) -> (Option<Invocation>, PathBuf) {
    let stem = file_stem(infile);
    let outfile = out_dir.join(format!("{stem}{CROP_MARKER}{geometry}.png"));

    if !force && outfile.exists() {
        return (None, outfile);
    }

    let invocation = Invocation::new(CONVERT)
        .arg(infile.to_string_lossy())
        .arg("-crop")
        .arg(geometry)
        .arg(outfile.to_string_lossy());
    (Some(invocation), outfile)
}

/// Collage output path for a title.
pub fn collage_path(output_dir: &Path, title: &str) -> PathBuf {
    output_dir.join(format!("{title}{CROP_MARKER}-collage.png"))
}

/// Label for one crop inside a collage: the filename stem with the crop
/// suffix stripped. Reference renders keep their raw name; for everything
/// else the separator is rendered as `" / "` so nested shader paths read
/// naturally under the tile.
pub fn crop_label(infile: &Path, sep: char) -> String {
    let stem = file_stem(infile);
    let label = match stem.find(CROP_MARKER) {
        Some(idx) => &stem[..idx],
        None => stem.as_str(),
    };

    if label.starts_with("nearest") || label.starts_with("bilinear") {
        label.to_string()
    } else {
        label.replace(sep, " / ")
    }
}

/// Build the montage invocation for one title's collage.
///
/// Returns `None` when there is nothing to compose or the output already
/// exists and force is off.
pub fn collage_invocation(
    title: &str,
    size: &str,
    crops: &[PathBuf],
    sep: char,
    outfile: &Path,
    force: bool,
) -> Option<Invocation> {
    if crops.is_empty() {
        return None;
    }
    if !force && outfile.exists() {
        return None;
    }

    let mut invocation = Invocation::new(MONTAGE)
        .arg("-frame")
        .arg("8x8")
        .arg("-geometry")
        .arg(size)
        .arg("-title")
        .arg(title);

    for crop in crops {
        invocation = invocation
            .arg("-label")
            .arg(crop_label(crop, sep))
            .arg(crop.to_string_lossy());
    }

    Some(invocation.arg(outfile.to_string_lossy()))
}

/// Convert the given PNGs to lossless webp in place, keeping the originals.
pub fn webp_invocation(files: &[PathBuf]) -> Option<Invocation> {
    if files.is_empty() {
        return None;
    }

    Some(
        Invocation::new(MOGRIFY)
            .arg("-quality")
            .arg("100%")
            .arg("-format")
            .arg("webp")
            .arg("-define")
            .arg("webp:lossless=true")
            .args(files.iter().map(|f| f.to_string_lossy())),
    )
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_crop_output_embeds_geometry() {
        let (invocation, outfile) = crop_invocation(
            Path::new("shots/Game1/crt.png"),
            Path::new("crops/Game1"),
            "480x480+0+0",
            false,
        );
        assert_eq!(outfile, PathBuf::from("crops/Game1/crt-crop480x480+0+0.png"));

        let invocation = invocation.unwrap();
        assert_eq!(invocation.program, "convert");
        assert_eq!(
            invocation.args,
            [
                "shots/Game1/crt.png",
                "-crop",
                "480x480+0+0",
                "crops/Game1/crt-crop480x480+0+0.png"
            ]
        );
    }

    #[test]
    fn test_crop_skips_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let (_, outfile) = crop_invocation(
            Path::new("shots/Game1/crt.png"),
            dir.path(),
            "480x480+0+0",
            false,
        );
        fs::write(&outfile, b"png").unwrap();
        let before = fs::read(&outfile).unwrap();

        let (invocation, again) =
            crop_invocation(Path::new("shots/Game1/crt.png"), dir.path(), "480x480+0+0", false);
        assert!(invocation.is_none());
        assert_eq!(again, outfile);
        assert_eq!(fs::read(&outfile).unwrap(), before);

        let (forced, _) =
            crop_invocation(Path::new("shots/Game1/crt.png"), dir.path(), "480x480+0+0", true);
        assert!(forced.is_some());
    }

    #[test]
    fn test_crop_label_renders_separator() {
        let label = crop_label(Path::new("crops/crt／geom／royale-crop480x480+0+0.png"), '／');
        assert_eq!(label, "crt / geom / royale");
    }

    #[test]
    fn test_reference_labels_stay_raw() {
        let label = crop_label(Path::new("crops/nearest-crop480x480+0+0.png"), '／');
        assert_eq!(label, "nearest");
        let label = crop_label(Path::new("crops/bilinear-crop480x480+0+0.png"), '／');
        assert_eq!(label, "bilinear");
    }

    #[test]
    fn test_collage_invocation_layout() {
        let crops = vec![
            PathBuf::from("crops/Game1/nearest-crop.png"),
            PathBuf::from("crops/Game1/a／b-crop.png"),
        ];
        let invocation = collage_invocation(
            "Game1",
            "480x480",
            &crops,
            '／',
            Path::new("crops/Game1-crop-collage.png"),
            false,
        )
        .unwrap();

        assert_eq!(invocation.program, "montage");
        assert_eq!(
            invocation.args,
            [
                "-frame",
                "8x8",
                "-geometry",
                "480x480",
                "-title",
                "Game1",
                "-label",
                "nearest",
                "crops/Game1/nearest-crop.png",
                "-label",
                "a / b",
                "crops/Game1/a／b-crop.png",
                "crops/Game1-crop-collage.png",
            ]
        );
    }

    #[test]
    fn test_collage_skips_existing_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let outfile = dir.path().join("Game1-crop-collage.png");
        let crops = vec![PathBuf::from("a-crop.png")];

        assert!(collage_invocation("Game1", "480x480", &[], '／', &outfile, false).is_none());

        fs::write(&outfile, b"png").unwrap();
        assert!(collage_invocation("Game1", "480x480", &crops, '／', &outfile, false).is_none());
        assert!(collage_invocation("Game1", "480x480", &crops, '／', &outfile, true).is_some());
    }

    #[test]
    fn test_collage_path_convention() {
        assert_eq!(
            collage_path(Path::new("crops"), "Game1"),
            PathBuf::from("crops/Game1-crop-collage.png")
        );
    }

    #[test]
    fn test_webp_invocation() {
        let files = vec![PathBuf::from("a.png"), PathBuf::from("b.png")];
        let invocation = webp_invocation(&files).unwrap();
        assert_eq!(invocation.program, "mogrify");
        assert_eq!(
            invocation.args,
            [
                "-quality",
                "100%",
                "-format",
                "webp",
                "-define",
                "webp:lossless=true",
                "a.png",
                "b.png"
            ]
        );

        assert!(webp_invocation(&[]).is_none());
    }
}
