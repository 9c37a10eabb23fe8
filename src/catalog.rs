//! Loading, writing, and discovery of JSON locale catalogs.
//!
//! A catalog is the root object of one locale file, kept in file order
//! (`serde_json` with `preserve_order`). Values are arbitrary JSON, so
//! nested namespaces and string arrays survive a round-trip untouched.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// Filename of the baseline catalog every target is derived from.
pub const SOURCE_FILE_NAME: &str = "en.json";
/// Filename of the optional per-key hints file.
pub const CONTEXT_FILE_NAME: &str = "keys_context.json";

/// One locale's key/value table, in file order.
pub type Catalog = Map<String, Value>;

/// Load the source catalog. A missing or malformed `en.json` is fatal.
pub fn load_source_catalog(directory: &Path) -> Result<Catalog> {
    let path = directory.join(SOURCE_FILE_NAME);
    if !path.exists() {
        bail!(
            "{} not found in '{}'.",
            SOURCE_FILE_NAME,
            directory.display()
        );
    }
    read_catalog(&path)
}

/// Load an existing target catalog.
///
/// Returns `Ok(None)` when the file does not exist yet; `Err` when it
/// exists but cannot be read or parsed. The caller decides whether that
/// is fatal (it is not, for target files).
pub fn load_target_catalog(path: &Path) -> Result<Option<Catalog>> {
    if !path.exists() {
        return Ok(None);
    }
    read_catalog(path).map(Some)
}

fn read_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    parse_catalog(&content).with_context(|| format!("Failed to parse JSON: {}", path.display()))
}

/// Parse a string as a JSON object.
pub fn parse_catalog(content: &str) -> Result<Catalog> {
    let value: Value = serde_json::from_str(content)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("Root of JSON document must be an object"),
    }
}

/// Write a catalog pretty-printed, with 2-space indentation, literal
/// (unescaped) non-ASCII characters, and a trailing newline.
///
/// The content goes through a temporary file in the same directory and a
/// rename, so a reader never observes a half-written catalog.
pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    let content = serde_json::to_string_pretty(catalog).context("Failed to serialize JSON")?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, format!("{}\n", content))
        .with_context(|| format!("Failed to write file: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
}

/// List the target locale files in a directory: every `*.json` except the
/// source and context files.
///
/// Each entry is `(language code, path)`, the language code being the
/// filename stem ("es.json" -> "es", "zh-CN.json" -> "zh-CN"). Sorted by
/// code so batch runs process files in a deterministic order.
pub fn discover_targets(directory: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut targets = Vec::new();

    for entry in fs::read_dir(directory)
        .with_context(|| format!("Failed to read directory: {}", directory.display()))?
    {
        let path = entry?.path();

        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name == SOURCE_FILE_NAME || file_name == CONTEXT_FILE_NAME {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            targets.push((stem.to_string(), path.clone()));
        }
    }

    targets.sort();
    Ok(targets)
}
