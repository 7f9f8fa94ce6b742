use std::{collections::BTreeMap, path::Path};

use crate::{
    foundation::error::CookerResult,
    ingredients::IngredientCollection,
    patch::{PatchReport, patch_file},
};

/// Ingredient id to replacement image URL.
pub type MappingTable = BTreeMap<String, String>;

const BUILTIN: &[(&str, &str)] = &[
    ("bok-choy", "https://www.themealdb.com/images/ingredients/Pak Choi.png"),
    ("rice-noodle", "https://www.themealdb.com/images/ingredients/Rice Vermicelli.png"),
    ("glass-noodle", "https://www.themealdb.com/images/ingredients/Glass Noodles.png"),
    ("soy-sauce", "https://www.themealdb.com/images/ingredients/Soy Sauce.png"),
    ("scallop", "https://www.themealdb.com/images/ingredients/Scallops.png"),
    ("pork-ribs", "https://www.themealdb.com/images/ingredients/Pork.png"),
    ("chicken-essence", "https://cdn-icons-png.flaticon.com/512/3058/3058995.png"),
    ("whitebait", "https://cdn-icons-png.flaticon.com/512/2970/2970094.png"),
    ("milkfish", "https://cdn-icons-png.flaticon.com/512/3065/3065584.png"),
    ("clam", "https://cdn-icons-png.flaticon.com/512/2906/2906334.png"),
    ("pork-liver", "https://cdn-icons-png.flaticon.com/512/7222/7222067.png"),
    ("winter-melon", "https://www.themealdb.com/images/ingredients/Cantaloupe.png"),
    ("luffa", "https://www.themealdb.com/images/ingredients/Zucchini.png"),
    ("kelp", "https://cdn-icons-png.flaticon.com/512/3361/3361370.png"),
    ("seaweed", "https://cdn-icons-png.flaticon.com/512/7518/7518597.png"),
    ("bonito", "https://cdn-icons-png.flaticon.com/512/8662/8662369.png"),
    ("mantou", "https://cdn-icons-png.flaticon.com/512/1037/1037675.png"),
    ("wonton-wrapper", "https://www.themealdb.com/images/ingredients/Wonton Wrappers.png"),
];

/// The corrections maintained by hand for ids whose derived URL is wrong.
pub fn builtin_mapping() -> MappingTable {
    BUILTIN
        .iter()
        .map(|(id, url)| ((*id).to_string(), (*url).to_string()))
        .collect()
}

pub fn apply(ingredients: &mut IngredientCollection, mapping: &MappingTable) -> PatchReport {
    let mut report = PatchReport::default();
    for ingredient in ingredients.iter_mut() {
        let Some(id) = ingredient.id() else {
            continue;
        };
        let Some(url) = mapping.get(id) else {
            continue;
        };

        tracing::info!("updating {id} -> {url}");
        ingredient.set_image_url(url.as_str());
        report.updated += 1;
    }
    report
}

#[tracing::instrument(skip(mapping), fields(entries = mapping.len()))]
pub fn run(path: &Path, mapping: &MappingTable) -> CookerResult<PatchReport> {
    patch_file(path, |ingredients| apply(ingredients, mapping))
}
