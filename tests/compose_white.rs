use std::path::Path;

use cooker_assets::compose;
use image::{ImageFormat, Rgba, RgbaImage};

fn write_png(path: &Path, px: [u8; 4]) {
    RgbaImage::from_pixel(2, 2, Rgba(px))
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

fn read_rgb(path: &Path) -> image::RgbImage {
    let img = image::open(path).unwrap();
    assert_eq!(img.color(), image::ColorType::Rgb8);
    img.to_rgb8()
}

#[test]
fn flattens_each_png_and_skips_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("ingredients");
    let dst = dir.path().join("ingredients-white");
    std::fs::create_dir_all(src.join("nested.png")).unwrap();

    write_png(&src.join("clear.png"), [0, 0, 0, 0]);
    write_png(&src.join("red.png"), [255, 0, 0, 255]);
    write_png(&src.join("Half.PNG"), [255, 0, 0, 127]);
    std::fs::write(src.join("notes.txt"), "not an image").unwrap();
    std::fs::write(src.join("broken.png"), b"definitely not a png").unwrap();

    let report = compose::run(&src, &dst).unwrap();

    assert_eq!(report.processed, 3);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].path.ends_with("broken.png"));

    assert!(read_rgb(&dst.join("clear.png")).pixels().all(|p| p.0 == [255, 255, 255]));
    assert!(read_rgb(&dst.join("red.png")).pixels().all(|p| p.0 == [255, 0, 0]));
    assert!(read_rgb(&dst.join("Half.PNG")).pixels().all(|p| p.0 == [255, 128, 128]));

    assert!(!dst.join("broken.png").exists());
    assert!(!dst.join("notes.txt").exists());
    assert!(!dst.join("nested.png").exists());
}

#[test]
fn processed_count_drops_below_input_count_on_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in");
    let dst = dir.path().join("out");
    std::fs::create_dir_all(&src).unwrap();

    write_png(&src.join("a.png"), [10, 20, 30, 200]);
    std::fs::write(src.join("b.png"), b"").unwrap();
    write_png(&src.join("c.png"), [10, 20, 30, 0]);

    let inputs = compose::list_png_files(&src).unwrap();
    let report = compose::run(&src, &dst).unwrap();

    assert_eq!(inputs.len(), 3);
    assert_eq!(report.processed, 2);
    assert!(report.processed < inputs.len());
    assert!(dst.join("a.png").exists());
    assert!(dst.join("c.png").exists());
}

#[test]
fn rerun_overwrites_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in");
    let dst = dir.path().join("out");
    std::fs::create_dir_all(&src).unwrap();

    write_png(&src.join("icon.png"), [0, 0, 255, 255]);
    compose::run(&src, &dst).unwrap();
    write_png(&src.join("icon.png"), [0, 255, 0, 255]);
    compose::run(&src, &dst).unwrap();

    assert!(read_rgb(&dst.join("icon.png")).pixels().all(|p| p.0 == [0, 255, 0]));
}

#[test]
fn missing_source_dir_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(compose::run(&dir.path().join("absent"), &dir.path().join("out")).is_err());
}
