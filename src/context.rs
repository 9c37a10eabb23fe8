//! Per-key translation hints.
//!
//! An optional `keys_context.json` maps translation keys to free-text
//! hints ("a.title: heading of the checkout page") that are forwarded to
//! the translation provider to disambiguate short or reused strings. The
//! file may sit next to the locale files or one level up, shared across
//! several locale directories. It is never required and never fatal.

use std::fs;
use std::path::Path;

use colored::Colorize;
use indexmap::IndexMap;
use serde_json::Value;

use crate::catalog::CONTEXT_FILE_NAME;

/// Hints keyed by translation key, in file order.
pub type KeysContext = IndexMap<String, String>;

/// Load the keys context for a locale directory.
///
/// Looks in `directory` first, then in its parent. A missing file yields
/// an empty map; a file that exists but cannot be read or parsed is
/// reported on the console and also yields an empty map.
pub fn load_keys_context(directory: &Path) -> KeysContext {
    let candidates = [
        directory.join(CONTEXT_FILE_NAME),
        directory.join("..").join(CONTEXT_FILE_NAME),
    ];

    for path in &candidates {
        if !path.exists() {
            continue;
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                println!(
                    "{} Failed to read {}: {}. Proceeding without context.",
                    "Warning:".yellow(),
                    CONTEXT_FILE_NAME,
                    err
                );
                return KeysContext::new();
            }
        };
        return match parse_keys_context(&content) {
            Some(context) => context,
            None => {
                println!(
                    "{} {} contains invalid JSON. Proceeding without context.",
                    "Warning:".yellow(),
                    CONTEXT_FILE_NAME
                );
                KeysContext::new()
            }
        };
    }

    KeysContext::new()
}

/// Parse hint content. `None` on malformed JSON or a non-object root.
/// Entries whose value is not a string are skipped.
fn parse_keys_context(content: &str) -> Option<KeysContext> {
    let value: Value = serde_json::from_str(content).ok()?;
    let object = value.as_object()?;

    let mut context = KeysContext::new();
    for (key, hint) in object {
        if let Value::String(hint) = hint {
            context.insert(key.clone(), hint.clone());
        }
    }
    Some(context)
}
