//! Locsync - LLM-backed locale file synchronizer
//!
//! Locsync is a CLI tool and library for keeping JSON locale files in sync
//! with a baseline `en.json`. It sends the source catalog (or a selected
//! subset of its keys) to an LLM translation provider, then reconciles the
//! reply with each target locale file: selective key updates, missing-key
//! deletion, and dry-run previews.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, entry point)
//! - `catalog`: Loading, writing, and discovery of locale catalogs
//! - `context`: Per-key translation hints (`keys_context.json`)
//! - `prompt`: System prompt assembly for the translation provider
//! - `gateway`: Translation provider client and its error taxonomy
//! - `sync`: Catalog reconciliation (merge, deletion, dry-run)

pub mod catalog;
pub mod cli;
pub mod context;
pub mod gateway;
pub mod prompt;
pub mod sync;
