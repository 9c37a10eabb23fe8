use anyhow::Result;

pub use args::Arguments;
pub use exit_status::ExitStatus;

mod args;
mod exit_status;

use crate::gateway::GeminiTranslator;
use crate::sync::{SyncOptions, Synchronizer};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let translator = GeminiTranslator::new(args.api_key.clone(), args.model.clone());

    let options = SyncOptions {
        directory: args.directory.clone(),
        targets: args.target_selection(),
        key_selection: args.key_selection(),
        delete_missing_keys: args.delete_missing_keys,
        dry_run: args.dry_run,
    };

    let synchronizer = Synchronizer::new(options, &translator)?;
    synchronizer.run()?;

    Ok(ExitStatus::Success)
}
