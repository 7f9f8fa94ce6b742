//! Flatten transparent PNG icons onto an opaque white background.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use serde::Serialize;

use crate::foundation::error::CookerResult;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComposeReport {
    pub processed: usize,
    pub skipped: Vec<SkippedImage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedImage {
    pub path: PathBuf,
    pub error: String,
}

/// Straight-alpha "over" onto opaque white:
/// `out = c * a + 255 * (1 - a)` per channel, rounded.
pub fn over_white(px: Rgba<u8>) -> Rgb<u8> {
    let [r, g, b, a] = px.0;
    let a = u16::from(a);
    let inv = 255 - a;
    let blend = |c: u8| add_sat_u8(mul_div255(u16::from(c), a), mul_div255(255, inv));
    Rgb([blend(r), blend(g), blend(b)])
}

/// Composites `src` over a white canvas of the same size and drops alpha.
pub fn flatten_onto_white(src: &RgbaImage) -> RgbImage {
    let (width, height) = src.dimensions();
    let mut canvas = RgbImage::from_pixel(width, height, WHITE);
    for (dst, px) in canvas.pixels_mut().zip(src.pixels()) {
        *dst = over_white(*px);
    }
    canvas
}

pub fn is_png_file_name(name: &str) -> bool {
    png_stem(name).is_some()
}

/// `Bok-Choy.PNG` -> `Bok-Choy`. `None` unless the name ends in `.png`, any case.
pub fn png_stem(name: &str) -> Option<&str> {
    let split = name.len().checked_sub(4)?;
    let suffix = name.get(split..)?;
    suffix
        .eq_ignore_ascii_case(".png")
        .then(|| &name[..split])
}

/// Regular files in `dir` with a `.png` name, sorted by path.
/// Subdirectories and other files are skipped without notice.
pub fn list_png_files(dir: &Path) -> CookerResult<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("read directory '{}'", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if is_png_file_name(&entry.file_name().to_string_lossy()) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn flatten_file(src: &Path, dst: &Path) -> CookerResult<()> {
    let img = image::ImageReader::open(src)
        .and_then(|reader| reader.with_guessed_format())
        .with_context(|| format!("open image '{}'", src.display()))?
        .decode()?
        .to_rgba8();
    let flat = flatten_onto_white(&img);
    flat.save_with_format(dst, ImageFormat::Png)?;
    Ok(())
}

/// Flattens every PNG in `src_dir` into `dst_dir` under the same file name.
/// A file that fails to decode or encode is logged and skipped; only problems
/// with the directories themselves are returned as errors.
#[tracing::instrument]
pub fn run(src_dir: &Path, dst_dir: &Path) -> CookerResult<ComposeReport> {
    fs::create_dir_all(dst_dir)
        .with_context(|| format!("create output dir '{}'", dst_dir.display()))?;

    tracing::info!(
        "processing images from {} to {}",
        src_dir.display(),
        dst_dir.display()
    );

    let mut report = ComposeReport::default();
    for path in list_png_files(src_dir)? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let out = dst_dir.join(name);

        match flatten_file(&path, &out) {
            Ok(()) => {
                tracing::debug!("wrote {}", out.display());
                report.processed += 1;
            }
            Err(err) => {
                tracing::warn!("error processing {}: {err}", name.to_string_lossy());
                report.skipped.push(SkippedImage {
                    path,
                    error: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        processed = report.processed,
        skipped = report.skipped.len(),
        "done"
    );
    Ok(report)
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(px: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(2, 2, Rgba(px))
    }

    #[test]
    fn transparent_becomes_white() {
        let out = flatten_onto_white(&solid([12, 34, 56, 0]));
        assert_eq!(out.dimensions(), (2, 2));
        assert!(out.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn opaque_is_unchanged() {
        let out = flatten_onto_white(&solid([255, 0, 0, 255]));
        assert!(out.pixels().all(|p| p.0 == [255, 0, 0]));
    }

    #[test]
    fn half_alpha_red_blends_toward_white() {
        let out = flatten_onto_white(&solid([255, 0, 0, 127]));
        assert!(out.pixels().all(|p| p.0 == [255, 128, 128]));
    }

    #[test]
    fn over_white_never_darkens() {
        for a in 0..=255u8 {
            for c in [0u8, 1, 127, 128, 254, 255] {
                let px = over_white(Rgba([c, c, c, a]));
                assert!(px.0[0] >= c);
            }
        }
    }

    #[test]
    fn png_suffix_is_case_insensitive() {
        assert_eq!(png_stem("kelp.png"), Some("kelp"));
        assert_eq!(png_stem("Kelp.PNG"), Some("Kelp"));
        assert_eq!(png_stem(".png"), Some(""));
        assert_eq!(png_stem("kelp.jpg"), None);
        assert_eq!(png_stem("png"), None);
        assert_eq!(png_stem("豆腐.png"), Some("豆腐"));
        assert!(!is_png_file_name("notes.txt"));
    }
}
