use std::path::Path;

use crate::{
    foundation::error::CookerResult,
    ingredients::IngredientCollection,
    patch::{PatchReport, patch_file},
};

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://www.themealdb.com/images/ingredients";

/// `rice-noodle` -> `Rice Noodle`. Only the first character of each segment is
/// upper-cased; the rest keeps its case. Empty segments stay empty, so `a--b`
/// becomes `A  B`.
pub fn kebab_to_title(id: &str) -> String {
    id.split('-')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn image_url_for(base_url: &str, id: &str) -> String {
    format!(
        "{}/{}.png",
        base_url.trim_end_matches('/'),
        kebab_to_title(id)
    )
}

/// Overwrites `imageUrl` of every record with a non-empty string id.
pub fn apply(ingredients: &mut IngredientCollection, base_url: &str) -> PatchReport {
    let mut report = PatchReport::default();
    for ingredient in ingredients.iter_mut() {
        let url = match ingredient.id() {
            Some(id) if !id.is_empty() => image_url_for(base_url, id),
            _ => continue,
        };

        tracing::debug!("{url}");
        ingredient.set_image_url(url);
        report.updated += 1;
    }
    report
}

#[tracing::instrument]
pub fn run(path: &Path, base_url: &str) -> CookerResult<PatchReport> {
    patch_file(path, |ingredients| apply(ingredients, base_url))
}
