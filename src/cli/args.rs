//! CLI argument definitions using clap.
//!
//! Locsync has a single flat command surface: a locale directory, an
//! optional target-language argument, and flags controlling the run mode.
//! The provider credential and model are ordinary arguments with
//! environment-variable fallbacks, so a missing credential fails at
//! argument-parse time, before any file is touched.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;

use crate::sync::TargetSelection;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Directory containing en.json and the target locale files
    pub directory: PathBuf,

    /// Target language code (ISO 639-1), a comma-separated list,
    /// or "all" (the default) for every locale file in the directory
    pub languages: Option<String>,

    /// Only translate and update these top-level keys (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub keys: Vec<String>,

    /// Delete keys that no longer exist in en.json from the target files
    #[arg(long)]
    pub delete_missing_keys: bool,

    /// Report intended changes without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Bearer token for the translation provider
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Model identifier sent to the translation provider
    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub model: String,
}

impl Arguments {
    /// Resolve the positional language argument into a target selection.
    ///
    /// Omitted, `all`, or a list that is empty after trimming all mean
    /// "every locale file in the directory".
    pub fn target_selection(&self) -> TargetSelection {
        match self.languages.as_deref() {
            None | Some("all") => TargetSelection::All,
            Some(list) => {
                let languages: Vec<String> = list
                    .split(',')
                    .map(|lang| lang.trim().to_string())
                    .filter(|lang| !lang.is_empty())
                    .collect();
                if languages.is_empty() {
                    TargetSelection::All
                } else {
                    TargetSelection::Languages(languages)
                }
            }
        }
    }

    /// The requested key selection, or `None` when the whole catalog
    /// participates.
    pub fn key_selection(&self) -> Option<BTreeSet<String>> {
        if self.keys.is_empty() {
            None
        } else {
            Some(self.keys.iter().cloned().collect())
        }
    }
}
