//! Maintenance passes over a cooking app's ingredient dataset.
//!
//! Each flow is a single sequential read-transform-write pass:
//!
//! - [`patch::manual`]: overwrite `imageUrl` from a hand-maintained mapping table
//! - [`patch::derive`]: derive `imageUrl` from the kebab-case id (`rice-noodle` -> `Rice Noodle.png`)
//! - [`patch::local`]: point `imageUrl` at local PNG assets when one exists
//! - [`prompts`]: write a Markdown table of AI image prompts per ingredient
//! - [`compose`]: flatten transparent PNG icons onto an opaque white background
//!
//! The patchers overwrite each other's results, so the last one run wins.
#![forbid(unsafe_code)]

mod foundation;

pub mod compose;
pub mod config;
pub mod ingredients;
pub mod patch;
pub mod prompts;

pub use compose::{ComposeReport, SkippedImage, flatten_onto_white, over_white};
pub use config::Config;
pub use foundation::error::{CookerError, CookerResult};
pub use ingredients::{Ingredient, IngredientCollection};
pub use patch::{MissingImage, PatchReport};
pub use patch::manual::MappingTable;
pub use prompts::{NameTable, PromptReport};
