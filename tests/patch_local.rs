use cooker_assets::patch;
use image::{Rgba, RgbaImage};
use serde_json::Value;

#[test]
fn points_ids_with_local_png_at_asset_path() {
    let dir = tempfile::tempdir().unwrap();
    let assets = dir.path().join("assets");
    std::fs::create_dir_all(&assets).unwrap();
    RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]))
        .save(assets.join("garlic.png"))
        .unwrap();
    std::fs::write(assets.join("clam.jpg"), "jpeg").unwrap();

    let path = dir.path().join("ingredients_master.json");
    std::fs::write(&path, include_str!("data/ingredients_sample.json")).unwrap();

    let report = patch::local::run(&path, &assets, "/src/assets/ingredients").unwrap();

    assert_eq!(report.updated, 1);
    assert_eq!(report.missing.len(), 4);
    assert_eq!(report.missing[0].id.as_deref(), Some("bok-choy"));
    assert_eq!(report.missing[2].id, None);
    assert_eq!(report.missing[2].name.as_deref(), Some("神秘食材"));

    let after: Vec<Value> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(after[2]["imageUrl"], "/src/assets/ingredients/garlic.png");
    assert_eq!(
        after[4]["imageUrl"],
        "https://www.themealdb.com/images/ingredients/Clam.png"
    );
}

#[test]
fn missing_assets_dir_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ingredients_master.json");
    std::fs::write(&path, "[]\n").unwrap();

    assert!(patch::local::run(&path, &dir.path().join("nope"), "/x").is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
}

#[test]
fn uppercase_png_asset_yields_url_to_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let assets = dir.path().join("assets");
    std::fs::create_dir_all(&assets).unwrap();
    std::fs::write(assets.join("kelp.PNG"), b"").unwrap();

    let path = dir.path().join("ingredients_master.json");
    std::fs::write(&path, r#"[{"id":"kelp"}]"#).unwrap();

    let report = patch::local::run(&path, &assets, "/src/assets/ingredients").unwrap();
    assert_eq!(report.updated, 1);

    let after: Vec<Value> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let url = after[0]["imageUrl"].as_str().unwrap();
    assert_eq!(url, "/src/assets/ingredients/kelp.PNG");

    let file_name = url.rsplit('/').next().unwrap();
    assert!(assets.join(file_name).is_file());
}
