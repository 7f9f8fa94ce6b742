use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

use crate::{
    foundation::error::CookerResult,
    patch::{
        derive::DEFAULT_IMAGE_BASE_URL,
        local::DEFAULT_LOCAL_URL_PREFIX,
        manual::{MappingTable, builtin_mapping},
    },
    prompts::{DEFAULT_PROMPTS_PATH, NameTable, builtin_names},
};

pub const DEFAULT_INGREDIENTS_PATH: &str = "src/data/ingredients_master.json";
pub const DEFAULT_ASSETS_DIR: &str = "src/assets/ingredients";
pub const DEFAULT_WHITE_DIR: &str = "src/assets/ingredients-white";

/// Paths, URL bases, the manual mapping table and the prompt name table. Relative paths resolve
/// against the working directory. Every field is optional in the JSON file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub ingredients_path: PathBuf,
    pub assets_dir: PathBuf,
    pub white_dir: PathBuf,
    pub prompts_path: PathBuf,
    pub image_base_url: String,
    pub local_url_prefix: String,
    pub manual_mapping: MappingTable,
    pub name_translations: NameTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ingredients_path: PathBuf::from(DEFAULT_INGREDIENTS_PATH),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            white_dir: PathBuf::from(DEFAULT_WHITE_DIR),
            prompts_path: PathBuf::from(DEFAULT_PROMPTS_PATH),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            local_url_prefix: DEFAULT_LOCAL_URL_PREFIX.to_string(),
            manual_mapping: builtin_mapping(),
            name_translations: builtin_names(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> CookerResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(s: &str) -> CookerResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
