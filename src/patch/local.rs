use std::{collections::BTreeMap, path::Path};

use crate::{
    compose::{list_png_files, png_stem},
    foundation::error::CookerResult,
    ingredients::IngredientCollection,
    patch::{MissingImage, PatchReport, patch_file},
};

pub const DEFAULT_LOCAL_URL_PREFIX: &str = "/src/assets/ingredients";

/// PNG files in `dir` keyed by stem: `bok-choy` -> `bok-choy.png`.
/// The file name keeps its on-disk case; when both `x.png` and `x.PNG`
/// exist the lowercase suffix wins.
pub fn available_images(dir: &Path) -> CookerResult<BTreeMap<String, String>> {
    let mut images = BTreeMap::new();
    for path in list_png_files(dir)? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let name = name.to_string_lossy();
        let Some(stem) = png_stem(&name) else {
            continue;
        };
        match images.get(stem) {
            Some(existing) if !name.ends_with(".png") => {
                tracing::debug!("ignoring {name}, already have {existing}");
            }
            _ => {
                images.insert(stem.to_string(), name.to_string());
            }
        }
    }
    Ok(images)
}

pub fn local_url_for(prefix: &str, file_name: &str) -> String {
    format!("{}/{file_name}", prefix.trim_end_matches('/'))
}

/// Points `imageUrl` at `<prefix>/<file name>` for every id with a local image.
/// Every other record is left alone and listed in `missing`.
pub fn apply(
    ingredients: &mut IngredientCollection,
    available: &BTreeMap<String, String>,
    prefix: &str,
) -> PatchReport {
    let mut report = PatchReport::default();
    for ingredient in ingredients.iter_mut() {
        match ingredient.id() {
            Some(id) if available.contains_key(id) => {
                let url = local_url_for(prefix, &available[id]);
                ingredient.set_image_url(url);
                report.updated += 1;
            }
            _ => report.missing.push(MissingImage {
                id: ingredient.id().map(str::to_string),
                name: ingredient.name().map(str::to_string),
                current_url: ingredient.image_url().map(str::to_string),
            }),
        }
    }
    report
}

#[tracing::instrument]
pub fn run(path: &Path, assets_dir: &Path, prefix: &str) -> CookerResult<PatchReport> {
    let available = available_images(assets_dir)?;
    tracing::info!("found {} local images", available.len());

    patch_file(path, |ingredients| apply(ingredients, &available, prefix))
}
