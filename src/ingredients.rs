use std::{
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::foundation::error::{CookerError, CookerResult};

pub const ID_KEY: &str = "id";
pub const NAME_KEY: &str = "name";
pub const IMAGE_URL_KEY: &str = "imageUrl";

/// One ingredient record. Fields other than `id` and `imageUrl` are carried
/// through untouched, in their original key order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ingredient(Map<String, Value>);

impl Ingredient {
    /// The identifier, if present and a string.
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_KEY).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME_KEY).and_then(Value::as_str)
    }

    pub fn image_url(&self) -> Option<&str> {
        self.0.get(IMAGE_URL_KEY).and_then(Value::as_str)
    }

    /// Replaces `imageUrl` in place; a record without one gets it appended.
    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.0
            .insert(IMAGE_URL_KEY.to_string(), Value::String(url.into()));
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IngredientCollection {
    records: Vec<Ingredient>,
}

impl IngredientCollection {
    pub fn load(path: &Path) -> CookerResult<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read ingredients '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(s: &str) -> CookerResult<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> CookerResult<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(CookerError::validation(format!(
                    "ingredient file must hold a JSON array, found {}",
                    kind_of(&other)
                )));
            }
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(fields) => Ok(Ingredient(fields)),
                other => Err(CookerError::validation(format!(
                    "ingredient #{index} must be an object, found {}",
                    kind_of(&other)
                ))),
            })
            .collect::<CookerResult<Vec<_>>>()?;

        Ok(Self { records })
    }

    /// Pretty JSON with 4-space indentation. Non-ASCII text is written as-is.
    pub fn to_pretty_json(&self) -> CookerResult<String> {
        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| CookerError::serde(e.to_string()))
    }

    /// Writes the collection over `path`. The bytes go to a sibling temp file
    /// first and are renamed into place, so the target is never left truncated.
    pub fn save(&self, path: &Path) -> CookerResult<()> {
        let text = self.to_pretty_json()?;
        write_atomic(path, text.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ingredient> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Ingredient> {
        self.records.iter_mut()
    }

    pub fn records(&self) -> &[Ingredient] {
        &self.records
    }
}

/// Writes `bytes` to `path` through a sibling temp file and a rename. A
/// symlinked `path` is resolved first so the link itself survives.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> CookerResult<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)
        .with_context(|| format!("create temp file in '{}'", dir.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("write temp file '{}'", tmp.path().display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("sync temp file '{}'", tmp.path().display()))?;

    // Temp files are created owner-only; keep whatever mode the target had.
    if let Ok(meta) = fs::metadata(&target) {
        fs::set_permissions(tmp.path(), meta.permissions())
            .with_context(|| format!("copy permissions of '{}'", target.display()))?;
    }

    tmp.persist(&target)
        .map_err(|e| e.error)
        .with_context(|| format!("replace '{}'", target.display()))?;
    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
