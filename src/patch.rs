//! Read-modify-write passes over the ingredient file's `imageUrl` field.
//!
//! Every patcher leaves record count and order alone and only rewrites
//! `imageUrl`. They do not coordinate: running [`derive`] after [`manual`]
//! discards the manual corrections.

pub mod derive;
pub mod local;
pub mod manual;

use std::path::Path;

use serde::Serialize;

use crate::{foundation::error::CookerResult, ingredients::IngredientCollection};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub updated: usize,
    /// Records the local patcher found no image for. Empty for the other patchers.
    pub missing: Vec<MissingImage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MissingImage {
    pub id: Option<String>,
    pub name: Option<String>,
    pub current_url: Option<String>,
}

/// Loads `path`, applies `apply`, and writes the collection back even when
/// nothing changed.
pub(crate) fn patch_file(
    path: &Path,
    apply: impl FnOnce(&mut IngredientCollection) -> PatchReport,
) -> CookerResult<PatchReport> {
    tracing::info!("reading {}", path.display());
    let mut ingredients = IngredientCollection::load(path)?;
    if ingredients.is_empty() {
        tracing::warn!("{} holds no ingredients", path.display());
    }
    let before = ingredients.len();

    let report = apply(&mut ingredients);
    debug_assert_eq!(before, ingredients.len());

    ingredients.save(path)?;
    tracing::info!(
        updated = report.updated,
        total = ingredients.len(),
        "wrote {}",
        path.display()
    );
    Ok(report)
}
