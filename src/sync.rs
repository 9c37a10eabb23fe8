//! Catalog reconciliation.
//!
//! The one piece of locsync with actual decision logic. For every target
//! file the [`Synchronizer`] loads what exists, decides whether the
//! translation provider needs to be involved at all (deletion-only and
//! dry-run passes never call it), merges the translated reply with the
//! existing catalog, prunes keys the source no longer has, and rewrites
//! the file. Provider and parse failures are narrated and skip the file;
//! the batch always continues.
//!
//! Merge policy: with a key selection only the selected keys are copied
//! from the reply onto the existing catalog; without one the reply wholly
//! replaces the catalog content.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::catalog::{self, Catalog};
use crate::context::{self, KeysContext};
use crate::gateway::Translator;
use crate::prompt::build_system_prompt;

/// Which target languages a run applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelection {
    /// Every locale file in the directory except the source and context
    /// files.
    All,
    /// An explicit list of language codes; each maps to `<lang>.json`,
    /// created if absent.
    Languages(Vec<String>),
}

/// Options for one synchronization run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub directory: PathBuf,
    pub targets: TargetSelection,
    /// Restrict the run to these top-level source keys. `None` means the
    /// whole catalog participates.
    pub key_selection: Option<BTreeSet<String>>,
    pub delete_missing_keys: bool,
    pub dry_run: bool,
}

/// Outcome counters, used for the final summary line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunResult {
    pub files_updated: usize,
    pub files_skipped: usize,
    pub files_previewed: usize,
    pub keys_deleted: usize,
}

/// Runner for a synchronization pass over one locale directory.
///
/// The source catalog and keys context are loaded once in [`Self::new`]
/// and are read-only for the rest of the run; target files are handled
/// strictly one after another.
pub struct Synchronizer<'a> {
    options: SyncOptions,
    source: Catalog,
    keys_context: KeysContext,
    translator: &'a dyn Translator,
}

impl<'a> Synchronizer<'a> {
    /// Load the source catalog and keys context for the run.
    ///
    /// A missing or malformed `en.json` is fatal. A missing or malformed
    /// keys context is not.
    pub fn new(options: SyncOptions, translator: &'a dyn Translator) -> Result<Self> {
        let source = catalog::load_source_catalog(&options.directory)?;

        let keys_context = context::load_keys_context(&options.directory);
        if keys_context.is_empty() {
            println!("No keys context found or loaded");
        } else {
            println!("Loaded context for {} keys", keys_context.len());
        }

        Ok(Self {
            options,
            source,
            keys_context,
            translator,
        })
    }

    pub fn run(self) -> Result<RunResult> {
        let slice = self.translation_slice();

        if self.options.key_selection.is_some() && slice.is_empty() {
            println!(
                "{} None of the requested keys exist in {}. Nothing to do.",
                "Warning:".yellow(),
                catalog::SOURCE_FILE_NAME
            );
            return Ok(RunResult::default());
        }

        let targets = self.resolve_targets()?;
        if targets.is_empty() {
            println!(
                "No target locale files found in '{}'.",
                self.options.directory.display()
            );
            return Ok(RunResult::default());
        }

        let payload =
            serde_json::to_string(&slice).context("Failed to serialize the source catalog")?;

        let mut result = RunResult::default();
        for (language, path) in &targets {
            self.sync_file(language, path, &slice, &payload, &mut result)?;
        }

        if self.options.dry_run {
            println!(
                "{} {} file(s) previewed, no files were modified.",
                "Dry run complete.".yellow().bold(),
                result.files_previewed
            );
        } else {
            println!(
                "{} {} file(s) updated, {} skipped, {} key(s) deleted.",
                "Done.".green().bold(),
                result.files_updated,
                result.files_skipped,
                result.keys_deleted
            );
        }

        Ok(result)
    }

    /// The portion of the source catalog submitted for translation: the
    /// keys matching the selection, or the whole catalog without one.
    fn translation_slice(&self) -> Catalog {
        match &self.options.key_selection {
            Some(selection) => self
                .source
                .iter()
                .filter(|(key, _)| selection.contains(*key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            None => self.source.clone(),
        }
    }

    fn resolve_targets(&self) -> Result<Vec<(String, PathBuf)>> {
        match &self.options.targets {
            TargetSelection::All => catalog::discover_targets(&self.options.directory),
            TargetSelection::Languages(languages) => Ok(languages
                .iter()
                .map(|lang| {
                    (
                        lang.clone(),
                        self.options.directory.join(format!("{}.json", lang)),
                    )
                })
                .collect()),
        }
    }

    /// Reconcile one target file. Only I/O failures while writing
    /// propagate; provider and parse failures are narrated and counted as
    /// a skip.
    fn sync_file(
        &self,
        language: &str,
        path: &Path,
        slice: &Catalog,
        payload: &str,
        result: &mut RunResult,
    ) -> Result<()> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}.json", language));

        let existing = match catalog::load_target_catalog(path) {
            Ok(Some(existing)) => existing,
            Ok(None) => Catalog::new(),
            Err(_) => {
                println!(
                    "{} {} contains invalid JSON. Starting from an empty catalog.",
                    "Warning:".yellow(),
                    file_name
                );
                Catalog::new()
            }
        };

        // A deletion run without a key selection has nothing to translate:
        // every surviving key would be overwritten by the merge anyway, so
        // the provider is never called.
        let deletion_only = self.options.delete_missing_keys
            && self.options.key_selection.is_none()
            && !self.options.dry_run;

        if deletion_only {
            let mut output = existing;
            let deleted = self.delete_missing(&mut output);
            self.report_deletions(&deleted, false);
            catalog::save_catalog(path, &output)?;
            result.files_updated += 1;
            result.keys_deleted += deleted.len();
            println!("{} {}", "Updated".green().bold(), file_name);
            return Ok(());
        }

        if self.options.dry_run {
            self.preview_file(&file_name, &existing, slice);
            result.files_previewed += 1;
            return Ok(());
        }

        println!("Translating JSON file {}...", file_name.blue());

        let system_prompt = build_system_prompt(payload, language, &self.keys_context);
        let reply = match self.translator.translate(&system_prompt, payload) {
            Ok(reply) => reply,
            Err(err) => {
                println!("{} {}", "Error during translation:".red(), err);
                println!("Translation failed for {}. Skipping.", file_name);
                result.files_skipped += 1;
                return Ok(());
            }
        };

        let translated = match catalog::parse_catalog(&reply) {
            Ok(translated) => translated,
            Err(err) => {
                println!(
                    "{} Could not parse translated JSON for {}: {}",
                    "Error:".red(),
                    file_name,
                    err
                );
                println!("Raw translated text: {}...", excerpt(&reply, 200));
                result.files_skipped += 1;
                return Ok(());
            }
        };

        let mut output = match &self.options.key_selection {
            Some(selection) => {
                let mut merged = existing;
                for key in selection {
                    if let Some(value) = translated.get(key) {
                        merged.insert(key.clone(), value.clone());
                    }
                }
                merged
            }
            None => translated,
        };

        let mut deleted = Vec::new();
        if self.options.delete_missing_keys {
            deleted = self.delete_missing(&mut output);
            self.report_deletions(&deleted, false);
        }

        catalog::save_catalog(path, &output)?;
        result.files_updated += 1;
        result.keys_deleted += deleted.len();
        println!("{} {}", "Updated".green().bold(), file_name);

        Ok(())
    }

    /// Remove keys the source catalog no longer contains, returning them.
    ///
    /// Always computed against the full source catalog, never the
    /// translation slice: a key outside the current selection is still
    /// legitimate as long as en.json has it.
    fn delete_missing(&self, output: &mut Catalog) -> Vec<String> {
        let missing: Vec<String> = output
            .keys()
            .filter(|key| !self.source.contains_key(*key))
            .cloned()
            .collect();
        for key in &missing {
            output.remove(key);
        }
        missing
    }

    fn report_deletions(&self, deleted: &[String], would: bool) {
        if deleted.is_empty() {
            println!("No missing keys to delete.");
            return;
        }

        let verb = if would {
            "Would delete".yellow().bold()
        } else {
            "Deleted".green().bold()
        };
        println!("{} {} missing key(s):", verb, deleted.len());
        for key in deleted {
            println!("  {} {}", "-".dimmed(), key);
        }
    }

    /// Narrate what a real run would change, writing nothing. The
    /// existing catalog is the reporting basis; the provider is never
    /// called.
    fn preview_file(&self, file_name: &str, existing: &Catalog, slice: &Catalog) {
        println!("{} {}", "Dry run for".yellow().bold(), file_name);

        match &self.options.key_selection {
            Some(_) => {
                println!("Would translate and update {} key(s):", slice.len());
                for key in slice.keys() {
                    println!("  {} {}", "-".dimmed(), key);
                }
            }
            None => {
                println!(
                    "Would translate all {} source key(s) and overwrite the catalog content.",
                    slice.len()
                );
            }
        }

        if self.options.delete_missing_keys {
            let missing: Vec<String> = existing
                .keys()
                .filter(|key| !self.source.contains_key(*key))
                .cloned()
                .collect();
            self.report_deletions(&missing, true);
        }
    }
}

/// First `limit` characters of `text`, for log excerpts of unparseable
/// replies.
fn excerpt(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
